//! Node and attribute types

use super::tags;
use serde::{Deserialize, Serialize};

/// An attribute as written on a tag line. An empty value renders as a bare attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attr {
    pub name: String,
    pub value: String,
}

impl Attr {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn is_bare(&self) -> bool {
        self.value.is_empty()
    }
}

/// One element, text run or expression directive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Tag name; empty for the root and for pure text/expression carriers
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Class names in the order written, duplicates kept
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub class: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attr: Vec<Attr>,
    /// Literal text rendered after the children, or in their place
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
    /// Unparsed expression fragment; empty means none
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub expr: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Append a fresh empty child and return it.
    pub fn new_child(&mut self) -> &mut Node {
        self.children.push(Node::default());
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    pub fn has_expr(&self) -> bool {
        !self.expr.is_empty()
    }

    /// Whether the tag name carries the raw-block terminator.
    pub fn is_raw_block(&self) -> bool {
        tags::is_raw_block(&self.name)
    }

    /// The tag name as it should be rendered.
    pub fn tag_name(&self) -> &str {
        tags::canonical_name(&self.name)
    }

    /// This node plus all of its descendants.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Node::count).sum::<usize>()
    }

    /// Length of the longest root-to-leaf chain below this node.
    pub fn depth(&self) -> usize {
        self.children.iter().map(|c| c.depth() + 1).max().unwrap_or(0)
    }
}

/// A parsed template source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub root: Node,
}

impl Document {
    pub fn new(root: Node) -> Self {
        Self { root }
    }

    /// Number of nodes below the synthetic root.
    pub fn node_count(&self) -> usize {
        self.root.count() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_child_appends_in_order() {
        let mut root = Node::default();
        root.new_child().name = "a".to_string();
        root.new_child().name = "b".to_string();
        let names: Vec<_> = root.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_count_and_depth() {
        let mut root = Node::default();
        root.new_child().new_child().new_child();
        root.new_child();
        let doc = Document::new(root);
        assert_eq!(doc.node_count(), 4);
        assert_eq!(doc.root.depth(), 3);
    }

    #[test]
    fn test_raw_block_name() {
        let node = Node::new("javascript:");
        assert!(node.is_raw_block());
        assert_eq!(node.tag_name(), "script");
        assert_eq!(Node::new("style:").tag_name(), "style");
        assert_eq!(Node::new("javascript").tag_name(), "javascript");
    }

    #[test]
    fn test_serialization_skips_empty_fields() {
        let mut node = Node::new("p");
        node.text = "Hello".to_string();
        let json = serde_json::to_string(&node).unwrap();
        assert_eq!(json, r#"{"name":"p","text":"Hello"}"#);
    }
}

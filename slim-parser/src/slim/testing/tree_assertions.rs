//! Fluent assertions over parsed trees

use crate::slim::ast::{Document, Node};

pub fn assert_tree(doc: &Document) -> DocumentAssertion<'_> {
    DocumentAssertion { doc }
}

fn summarize(nodes: &[Node]) -> String {
    nodes
        .iter()
        .map(|n| {
            if n.name.is_empty() {
                format!("<{:?}>", n.text)
            } else {
                n.name.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

pub struct DocumentAssertion<'a> {
    doc: &'a Document,
}

impl<'a> DocumentAssertion<'a> {
    /// Assert the number of top-level nodes
    pub fn child_count(self, expected: usize) -> Self {
        node_assertion(&self.doc.root, "root".to_string()).child_count(expected);
        self
    }

    pub fn child<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>),
    {
        node_assertion(&self.doc.root, "root".to_string()).child(index, assertion);
        self
    }

    /// Assert the total number of nodes below the root
    pub fn node_count(self, expected: usize) -> Self {
        let actual = self.doc.node_count();
        assert_eq!(
            actual, expected,
            "Expected {} nodes in the tree, found {}",
            expected, actual
        );
        self
    }
}

fn node_assertion(node: &Node, context: String) -> NodeAssertion<'_> {
    NodeAssertion { node, context }
}

pub struct NodeAssertion<'a> {
    node: &'a Node,
    context: String,
}

impl<'a> NodeAssertion<'a> {
    pub fn name(self, expected: &str) -> Self {
        assert_eq!(
            self.node.name, expected,
            "{}: expected tag name {:?}, found {:?}",
            self.context, expected, self.node.name
        );
        self
    }

    pub fn id(self, expected: &str) -> Self {
        assert_eq!(
            self.node.id.as_deref(),
            Some(expected),
            "{}: expected id {:?}",
            self.context,
            expected
        );
        self
    }

    pub fn no_id(self) -> Self {
        assert!(
            self.node.id.is_none(),
            "{}: expected no id, found {:?}",
            self.context,
            self.node.id
        );
        self
    }

    pub fn classes(self, expected: &[&str]) -> Self {
        assert_eq!(
            self.node.class, expected,
            "{}: class list mismatch",
            self.context
        );
        self
    }

    /// Assert an attribute is present with this value
    pub fn attr(self, name: &str, value: &str) -> Self {
        let found = self.node.attr.iter().find(|a| a.name == name);
        match found {
            Some(attr) => assert_eq!(
                attr.value, value,
                "{}: attribute {:?} has value {:?}, expected {:?}",
                self.context, name, attr.value, value
            ),
            None => panic!(
                "{}: attribute {:?} missing (have: {:?})",
                self.context, name, self.node.attr
            ),
        }
        self
    }

    pub fn attr_count(self, expected: usize) -> Self {
        assert_eq!(
            self.node.attr.len(),
            expected,
            "{}: expected {} attributes, found {:?}",
            self.context,
            expected,
            self.node.attr
        );
        self
    }

    pub fn text(self, expected: &str) -> Self {
        assert_eq!(
            self.node.text, expected,
            "{}: text mismatch",
            self.context
        );
        self
    }

    /// Assert the expression fragment, ignoring surrounding blanks
    pub fn expr(self, expected: &str) -> Self {
        assert_eq!(
            self.node.expr.trim(),
            expected,
            "{}: expression mismatch",
            self.context
        );
        self
    }

    pub fn no_expr(self) -> Self {
        assert!(
            !self.node.has_expr(),
            "{}: expected no expression, found {:?}",
            self.context,
            self.node.expr
        );
        self
    }

    pub fn child_count(self, expected: usize) -> Self {
        let actual = self.node.children.len();
        assert_eq!(
            actual,
            expected,
            "{}: expected {} children, found {}: [{}]",
            self.context,
            expected,
            actual,
            summarize(&self.node.children)
        );
        self
    }

    pub fn is_leaf(self) -> Self {
        self.child_count(0)
    }

    pub fn child<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>),
    {
        assert!(
            index < self.node.children.len(),
            "{}: child index {} out of bounds (children: [{}])",
            self.context,
            index,
            summarize(&self.node.children)
        );
        assertion(NodeAssertion {
            node: &self.node.children[index],
            context: format!("{}[{}]", self.context, index),
        });
        self
    }

    /// Apply the same assertion to every child
    pub fn each_child<F>(self, assertion: F) -> Self
    where
        F: Fn(NodeAssertion<'a>),
    {
        for (i, child) in self.node.children.iter().enumerate() {
            assertion(NodeAssertion {
                node: child,
                context: format!("{}[{}]", self.context, i),
            });
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slim::parsing::parse_str;

    #[test]
    fn test_passing_assertions() {
        let doc = parse_str("ul#nav.menu\n  li.item a\n  li.item b");
        assert_tree(&doc).node_count(3).child(0, |ul| {
            ul.name("ul")
                .id("nav")
                .classes(&["menu"])
                .child_count(2)
                .each_child(|li| {
                    li.name("li").classes(&["item"]).is_leaf();
                });
        });
    }

    #[test]
    #[should_panic(expected = "root[0]: expected tag name")]
    fn test_failure_reports_path() {
        let doc = parse_str("p");
        assert_tree(&doc).child(0, |p| {
            p.name("div");
        });
    }
}

//! Arena used while the tree is being built
//!
//! Nodes are addressed by [`NodeId`]. Slot 0 is always the root. Every slot records its parent
//! and its children in insertion order, so attaching a child and walking up are both O(1).

use super::node::Node;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug)]
struct Slot {
    node: Node,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Debug)]
pub struct NodeArena {
    slots: Vec<Slot>,
}

impl Default for NodeArena {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeArena {
    /// An arena holding only the empty root.
    pub fn new() -> Self {
        Self {
            slots: vec![Slot {
                node: Node::default(),
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// Attach a fresh empty node as the last child of `parent`.
    pub fn new_child(&mut self, parent: NodeId) -> NodeId {
        let id = NodeId(self.slots.len());
        self.slots.push(Slot {
            node: Node::default(),
            parent: Some(parent),
            children: Vec::new(),
        });
        self.slots[parent.0].children.push(id);
        id
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.slots[id.0].node
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.slots[id.0].node
    }

    /// Parent of `id`; the root is its own parent.
    pub fn parent(&self, id: NodeId) -> NodeId {
        self.slots[id.0].parent.unwrap_or(NodeId::ROOT)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.slots[id.0].children
    }

    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.slots[id.0].children.last().copied()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.len() == 1
    }

    /// Fold the arena into an owned tree rooted at slot 0.
    ///
    /// Children always have a larger id than their parent, so walking the slots from the back
    /// guarantees every child is complete before it is moved into its parent.
    pub fn into_tree(self) -> Node {
        let mut built: Vec<Option<Node>> = Vec::with_capacity(self.slots.len());
        let mut child_ids = Vec::with_capacity(self.slots.len());
        for slot in self.slots {
            built.push(Some(slot.node));
            child_ids.push(slot.children);
        }

        for index in (0..built.len()).rev() {
            let children: Vec<Node> = child_ids[index]
                .iter()
                .filter_map(|child| built[child.0].take())
                .collect();
            if let Some(node) = built[index].as_mut() {
                node.children = children;
            }
        }

        built
            .into_iter()
            .next()
            .flatten()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_links() {
        let mut arena = NodeArena::new();
        let a = arena.new_child(NodeId::ROOT);
        let b = arena.new_child(a);
        assert_eq!(arena.parent(b), a);
        assert_eq!(arena.parent(a), NodeId::ROOT);
        assert_eq!(arena.parent(NodeId::ROOT), NodeId::ROOT);
        assert_eq!(arena.last_child(NodeId::ROOT), Some(a));
        assert_eq!(arena.len(), 3);
    }

    #[test]
    fn test_into_tree_keeps_order_and_nesting() {
        let mut arena = NodeArena::new();
        let html = arena.new_child(NodeId::ROOT);
        arena.node_mut(html).name = "html".to_string();
        let head = arena.new_child(html);
        arena.node_mut(head).name = "head".to_string();
        let title = arena.new_child(head);
        arena.node_mut(title).name = "title".to_string();
        let body = arena.new_child(html);
        arena.node_mut(body).name = "body".to_string();

        let root = arena.into_tree();
        assert_eq!(root.children.len(), 1);
        let html = &root.children[0];
        let names: Vec<_> = html.children.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["head", "body"]);
        assert_eq!(html.children[0].children[0].name, "title");
    }
}

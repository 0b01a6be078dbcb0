//! Indentation resolver
//!
//!     Slim has no block delimiters: nesting comes from the column at which each element starts.
//!     The resolver keeps the chain of open elements as a stack of `(column, node)` pairs, with
//!     columns strictly increasing from bottom to top. The top entry is always the element opened
//!     last, so its column is the `last` cursor.
//!
//!     For a new element starting at column `n`:
//!         deeper than the top:      child of the top entry, pushed.
//!         same column as the top:   sibling of the top entry, replaces it.
//!         shallower than the top:   entries at columns `>= n` are popped and the element
//!                                   becomes a child of the entry left below them (or of the
//!                                   root when none is left), then it is pushed.

use crate::slim::ast::{NodeArena, NodeId};

#[derive(Debug, Default)]
pub struct IndentationResolver {
    stack: Vec<(usize, NodeId)>,
}

impl IndentationResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Column of the most recently opened element.
    pub fn last(&self) -> Option<usize> {
        self.stack.last().map(|&(column, _)| column)
    }

    /// The open chain, outermost first.
    pub fn stack(&self) -> &[(usize, NodeId)] {
        &self.stack
    }

    /// Attach a new node for an element starting at `column` and return it.
    pub fn resolve(&mut self, arena: &mut NodeArena, column: usize) -> NodeId {
        let parent = match self.stack.last().copied() {
            None => NodeId::ROOT,
            Some((last, top)) if column > last => top,
            Some((last, top)) if column == last => {
                self.stack.pop();
                arena.parent(top)
            }
            Some(_) => {
                let first_closed = self
                    .stack
                    .iter()
                    .position(|&(open, _)| open >= column)
                    .unwrap_or(self.stack.len());
                let parent = match first_closed {
                    0 => NodeId::ROOT,
                    i => self.stack[i - 1].1,
                };
                self.stack.truncate(first_closed);
                parent
            }
        };

        let node = arena.new_child(parent);
        self.stack.push((column, node));
        node
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve_all(columns: &[usize]) -> (NodeArena, Vec<NodeId>) {
        let mut arena = NodeArena::new();
        let mut resolver = IndentationResolver::new();
        let ids = columns
            .iter()
            .map(|&column| resolver.resolve(&mut arena, column))
            .collect();
        (arena, ids)
    }

    #[test]
    fn test_first_element_attaches_to_root() {
        let (arena, ids) = resolve_all(&[4]);
        assert_eq!(arena.parent(ids[0]), NodeId::ROOT);
    }

    #[test]
    fn test_deeper_nests() {
        let (arena, ids) = resolve_all(&[0, 2, 4]);
        assert_eq!(arena.parent(ids[1]), ids[0]);
        assert_eq!(arena.parent(ids[2]), ids[1]);
    }

    #[test]
    fn test_same_column_is_sibling() {
        let (arena, ids) = resolve_all(&[0, 2, 2, 2]);
        for id in &ids[1..] {
            assert_eq!(arena.parent(*id), ids[0]);
        }
        assert_eq!(arena.children(ids[0]), &ids[1..]);
    }

    #[test]
    fn test_dedent() {
        let (arena, ids) = resolve_all(&[0, 2, 4, 2, 0]);
        assert_eq!(arena.parent(ids[3]), ids[0]);
        assert_eq!(arena.parent(ids[4]), NodeId::ROOT);
    }

    #[test]
    fn test_sibling_after_deep_excursion() {
        let (arena, ids) = resolve_all(&[0, 2, 4, 6, 8, 2]);
        assert_eq!(arena.parent(ids[5]), ids[0]);
        assert_eq!(arena.children(ids[0]), &[ids[1], ids[5]]);
    }

    #[test]
    fn test_dedent_between_levels() {
        // 3 closes the element at 4 and lands under the one at 0
        let (arena, ids) = resolve_all(&[0, 4, 3]);
        assert_eq!(arena.parent(ids[2]), ids[0]);
    }

    #[test]
    fn test_stack_tracks_open_chain() {
        let mut arena = NodeArena::new();
        let mut resolver = IndentationResolver::new();
        let a = resolver.resolve(&mut arena, 0);
        let b = resolver.resolve(&mut arena, 2);
        resolver.resolve(&mut arena, 4);
        let d = resolver.resolve(&mut arena, 2);
        assert_eq!(resolver.stack(), &[(0, a), (2, d)]);
        assert_eq!(resolver.last(), Some(2));
        assert_ne!(b, d);
    }
}

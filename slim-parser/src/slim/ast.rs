//! The node tree
//!
//!     Parsing produces a tree of [`Node`]s under a synthetic, nameless root. A node is an
//!     element (it has a tag name), or a nameless carrier of text or an expression. Children
//!     are kept in document order.
//!
//!     While lines are being consumed the tree lives in a [`NodeArena`]: the indentation
//!     resolver needs parent links and remembers open nodes by [`NodeId`], which an owned tree
//!     cannot hand out without aliasing. Once the last line is in, the arena is folded into the
//!     owned tree and discarded.

pub mod arena;
pub mod node;
pub mod tags;

pub use arena::{NodeArena, NodeId};
pub use node::{Attr, Document, Node};

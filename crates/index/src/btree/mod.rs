//! B+Tree index implementation.
//!
//! Nodes are stored in an arena owned by the tree and address each other by
//! [`NodeId`]. Leaves form a doubly linked chain in key order; internal nodes
//! on one level are linked the same way.

mod iter;
mod node;
mod tree;
mod validate;

pub use iter::Iter;
pub use node::{InternalNode, LeafInsert, LeafNode, Node, NodeId};
pub use tree::{BPlusTree, DEFAULT_BRANCHING_FACTOR, MIN_BRANCHING_FACTOR};

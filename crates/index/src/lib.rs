//! B+Tree index mapping ordered keys to buckets of values.
//!
//! This crate provides:
//!
//! - `BPlusTree`: an in-memory B+Tree where every key owns a bucket of values,
//!   so inserting an existing key accumulates rather than replaces
//! - `Operator`: the comparison predicates answered by `RangeIndex::search`
//! - `KeyOrdered`: a `(key, value)` record that orders by key alone
//!
//! # Example
//!
//! ```rust
//! use bptree_index::{BPlusTree, Index, Operator, RangeIndex};
//!
//! let mut tree: BPlusTree<i32, i32> = BPlusTree::with_branching_factor(4).unwrap();
//! for k in [10, 20, 5, 6, 12, 30, 7, 17] {
//!     tree.insert(k, k);
//! }
//! tree.insert(10, 99);
//!
//! // Point query
//! assert_eq!(tree.get(&10), Some(&[10, 99][..]));
//! assert_eq!(tree.get(&100), None);
//!
//! // Range queries
//! assert_eq!(tree.search(Operator::Ge, &12), vec![12, 17, 20, 30]);
//! assert_eq!(tree.search_str("<", &7).unwrap(), vec![5, 6]);
//!
//! assert_eq!(tree.keys(), vec![5, 6, 7, 10, 12, 17, 20, 30]);
//! assert_eq!(tree.len(), 9);
//! assert_eq!(tree.height(), 1);
//! ```

#![no_std]

extern crate alloc;

pub mod btree;
pub mod comparator;
pub mod operator;
pub mod stats;
pub mod traits;

pub use btree::{BPlusTree, Iter, NodeId, DEFAULT_BRANCHING_FACTOR, MIN_BRANCHING_FACTOR};
pub use comparator::KeyOrdered;
pub use operator::Operator;
pub use stats::TreeStats;
pub use traits::{Index, IndexError, RangeIndex};

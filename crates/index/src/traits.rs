//! Index trait definitions.
//!
//! This module defines the `Index` and `RangeIndex` traits implemented by the
//! B+Tree, and the error type shared by all index operations.

use crate::btree::NodeId;
use crate::operator::Operator;
use alloc::string::String;
use alloc::vec::Vec;

/// Core trait for keyed, multi-valued indexes.
pub trait Index<K, V> {
    /// Adds a key-value pair to the index.
    /// Inserting an existing key appends the value to that key's bucket.
    fn insert(&mut self, key: K, value: V);

    /// Gets every value stored under a key, in insertion order.
    fn get(&self, key: &K) -> Option<&[V]>;

    /// Checks if the index contains the given key.
    fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Returns the number of insertions performed (duplicate keys included).
    fn len(&self) -> usize;

    /// Returns true if the index is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clears all entries from the index.
    fn clear(&mut self);

    /// Returns the minimum key and its bucket.
    fn min(&self) -> Option<(&K, &[V])>;

    /// Returns the maximum key and its bucket.
    fn max(&self) -> Option<(&K, &[V])>;
}

/// Trait for indexes that answer comparison predicates.
pub trait RangeIndex<K, V>: Index<K, V> {
    /// Returns every value whose key satisfies `stored <op> key`, in key order.
    fn search(&self, op: Operator, key: &K) -> Vec<V>;

    /// Like [`search`](RangeIndex::search), but restricted to `<`, `<=`, `>`
    /// and `>=`.
    fn range_search(&self, op: Operator, key: &K) -> Result<Vec<V>, IndexError> {
        if !op.is_range() {
            return Err(IndexError::UnsupportedOperator(op));
        }
        Ok(self.search(op, key))
    }

    /// Parses an operator token such as `">="` and runs the search.
    fn search_str(&self, token: &str, key: &K) -> Result<Vec<V>, IndexError> {
        let op: Operator = token.parse()?;
        Ok(self.search(op, key))
    }
}

/// Error type for index operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IndexError {
    /// The token is not one of `<`, `<=`, `>`, `>=`, `==`, `!=`.
    InvalidOperator(String),
    /// A range-only query was given an equality operator.
    UnsupportedOperator(Operator),
    /// The branching factor is below the supported minimum.
    InvalidBranchingFactor(usize),
    /// Bulk load was given key and value sequences of different lengths.
    LengthMismatch { keys: usize, values: usize },
    /// A structural invariant does not hold.
    Corrupted { node: NodeId, reason: &'static str },
}

impl core::fmt::Display for IndexError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            IndexError::InvalidOperator(token) => write!(
                f,
                "Unsupported operator: {:?}. Only '<' '<=' '>' '>=' '==' '!=' are supported",
                token
            ),
            IndexError::UnsupportedOperator(op) => write!(
                f,
                "Unsupported range operator: {}. Only '<' '<=' '>' '>=' are supported",
                op
            ),
            IndexError::InvalidBranchingFactor(b) => {
                write!(f, "Invalid branching factor: {} (minimum is {})", b, crate::btree::MIN_BRANCHING_FACTOR)
            }
            IndexError::LengthMismatch { keys, values } => {
                write!(f, "Length mismatch: {} keys, {} values", keys, values)
            }
            IndexError::Corrupted { node, reason } => {
                write!(f, "Corrupted node {}: {}", node, reason)
            }
        }
    }
}

//! B+Tree node definitions.

use alloc::vec;
use alloc::vec::Vec;

/// Node identifier in the B+Tree arena.
pub type NodeId = usize;

/// Result of inserting into a leaf.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LeafInsert {
    /// The key was already present; the value joined its bucket.
    Appended,
    /// A new key was added to the leaf.
    Inserted,
}

/// A leaf node: sorted keys, each with a bucket of values.
#[derive(Clone, Debug)]
pub struct LeafNode<K, V> {
    /// Keys stored in this leaf, strictly ascending.
    pub keys: Vec<K>,
    /// `buckets[i]` holds the values of `keys[i]` in insertion order.
    pub buckets: Vec<Vec<V>>,
    /// Previous leaf in key order.
    pub prev: Option<NodeId>,
    /// Next leaf in key order.
    pub next: Option<NodeId>,
    /// Parent node ID, `None` for the root.
    pub parent: Option<NodeId>,
}

impl<K, V> LeafNode<K, V> {
    /// Creates a new empty leaf.
    pub fn new() -> Self {
        Self {
            keys: Vec::new(),
            buckets: Vec::new(),
            prev: None,
            next: None,
            parent: None,
        }
    }

    /// Returns the number of keys in this leaf.
    pub fn key_count(&self) -> usize {
        self.keys.len()
    }
}

impl<K: Ord, V> LeafNode<K, V> {
    /// Finds the position where a key should be inserted.
    pub fn find_key_position(&self, key: &K) -> usize {
        self.keys.partition_point(|k| k < key)
    }

    /// Finds the exact position of a key, or None if not found.
    pub fn find_key(&self, key: &K) -> Option<usize> {
        let pos = self.find_key_position(key);
        if pos < self.keys.len() && &self.keys[pos] == key {
            Some(pos)
        } else {
            None
        }
    }

    /// Inserts a key-value pair, appending to the bucket if the key exists.
    pub fn insert(&mut self, key: K, value: V) -> LeafInsert {
        let pos = self.find_key_position(&key);
        if pos < self.keys.len() && self.keys[pos] == key {
            self.buckets[pos].push(value);
            LeafInsert::Appended
        } else {
            self.keys.insert(pos, key);
            self.buckets.insert(pos, vec![value]);
            LeafInsert::Inserted
        }
    }

    /// Returns the bucket for a key.
    pub fn get(&self, key: &K) -> Option<&[V]> {
        self.find_key(key).map(|pos| self.buckets[pos].as_slice())
    }

    /// Moves `keys[at..]` and their buckets into a new, unlinked leaf.
    pub fn split_off(&mut self, at: usize) -> Self {
        Self {
            keys: self.keys.split_off(at),
            buckets: self.buckets.split_off(at),
            prev: None,
            next: None,
            parent: self.parent,
        }
    }

    /// Buckets whose keys are `< key`, or `<= key` when `include_key`.
    pub fn buckets_before(&self, key: &K, include_key: bool) -> &[Vec<V>] {
        let end = if include_key {
            self.keys.partition_point(|k| k <= key)
        } else {
            self.keys.partition_point(|k| k < key)
        };
        &self.buckets[..end]
    }

    /// Buckets whose keys are `> key`, or `>= key` when `include_key`.
    pub fn buckets_after(&self, key: &K, include_key: bool) -> &[Vec<V>] {
        let start = if include_key {
            self.keys.partition_point(|k| k < key)
        } else {
            self.keys.partition_point(|k| k <= key)
        };
        &self.buckets[start..]
    }
}

/// An internal node: separator keys and one more child than keys.
#[derive(Clone, Debug)]
pub struct InternalNode<K> {
    /// Separator keys, ascending.
    pub keys: Vec<K>,
    /// Child node IDs; child `i` holds keys below `keys[i]`.
    pub children: Vec<NodeId>,
    /// Previous node on the same level.
    pub prev: Option<NodeId>,
    /// Next node on the same level.
    pub next: Option<NodeId>,
    /// Parent node ID, `None` for the root.
    pub parent: Option<NodeId>,
}

impl<K: Ord> InternalNode<K> {
    /// Creates a root with a single separator over two children.
    pub fn new_root(key: K, left: NodeId, right: NodeId) -> Self {
        Self {
            keys: vec![key],
            children: vec![left, right],
            prev: None,
            next: None,
            parent: None,
        }
    }

    /// Returns the number of children.
    pub fn degree(&self) -> usize {
        self.children.len()
    }

    /// Finds the child to descend into. Keys equal to a separator route right.
    #[inline]
    pub fn find_child_position(&self, key: &K) -> usize {
        self.keys.partition_point(|k| k <= key)
    }

    /// Returns the child responsible for `key`.
    #[inline]
    pub fn child_for(&self, key: &K) -> NodeId {
        self.children[self.find_child_position(key)]
    }

    /// Inserts a separator and the child immediately to its right.
    pub fn insert_child(&mut self, key: K, child: NodeId) {
        let pos = self.find_child_position(&key);
        self.keys.insert(pos, key);
        self.children.insert(pos + 1, child);
    }

    /// Splits at `at`: returns the promoted key and a new, unlinked node owning
    /// `keys[at + 1..]` and `children[at + 1..]`.
    pub fn split_off(&mut self, at: usize) -> (K, Self) {
        let mut keys = self.keys.split_off(at);
        let promoted = keys.remove(0);
        let children = self.children.split_off(at + 1);
        let node = Self {
            keys,
            children,
            prev: None,
            next: None,
            parent: self.parent,
        };
        (promoted, node)
    }
}

/// A node in the B+Tree.
#[derive(Clone, Debug)]
pub enum Node<K, V> {
    Leaf(LeafNode<K, V>),
    Internal(InternalNode<K>),
}

impl<K, V> Node<K, V> {
    pub fn keys(&self) -> &[K] {
        match self {
            Node::Leaf(leaf) => &leaf.keys,
            Node::Internal(node) => &node.keys,
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        match self {
            Node::Leaf(leaf) => leaf.parent,
            Node::Internal(node) => node.parent,
        }
    }

    pub fn set_parent(&mut self, parent: Option<NodeId>) {
        match self {
            Node::Leaf(leaf) => leaf.parent = parent,
            Node::Internal(node) => node.parent = parent,
        }
    }

    pub fn prev(&self) -> Option<NodeId> {
        match self {
            Node::Leaf(leaf) => leaf.prev,
            Node::Internal(node) => node.prev,
        }
    }

    pub fn set_prev(&mut self, prev: Option<NodeId>) {
        match self {
            Node::Leaf(leaf) => leaf.prev = prev,
            Node::Internal(node) => node.prev = prev,
        }
    }

    pub fn next(&self) -> Option<NodeId> {
        match self {
            Node::Leaf(leaf) => leaf.next,
            Node::Internal(node) => node.next,
        }
    }

    pub fn set_next(&mut self, next: Option<NodeId>) {
        match self {
            Node::Leaf(leaf) => leaf.next = next,
            Node::Internal(node) => node.next = next,
        }
    }

    /// First child of an internal node; `None` for leaves.
    pub fn first_child(&self) -> Option<NodeId> {
        match self {
            Node::Leaf(_) => None,
            Node::Internal(node) => node.children.first().copied(),
        }
    }

    /// Last child of an internal node; `None` for leaves.
    pub fn last_child(&self) -> Option<NodeId> {
        match self {
            Node::Leaf(_) => None,
            Node::Internal(node) => node.children.last().copied(),
        }
    }

    pub fn as_leaf(&self) -> Option<&LeafNode<K, V>> {
        match self {
            Node::Leaf(leaf) => Some(leaf),
            Node::Internal(_) => None,
        }
    }

    pub fn as_leaf_mut(&mut self) -> Option<&mut LeafNode<K, V>> {
        match self {
            Node::Leaf(leaf) => Some(leaf),
            Node::Internal(_) => None,
        }
    }

    pub fn as_internal_mut(&mut self) -> Option<&mut InternalNode<K>> {
        match self {
            Node::Leaf(_) => None,
            Node::Internal(node) => Some(node),
        }
    }
}

//! B+Tree implementation.

use super::iter::Iter;
use super::node::{InternalNode, LeafInsert, LeafNode, Node, NodeId};
use crate::operator::Operator;
use crate::stats::TreeStats;
use crate::traits::{Index, IndexError, RangeIndex};
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use tracing::{debug, trace};

/// Default branching factor for the B+Tree.
pub const DEFAULT_BRANCHING_FACTOR: usize = 32;

/// Smallest branching factor for which both halves of a split are non-empty.
pub const MIN_BRANCHING_FACTOR: usize = 3;

/// A B+Tree mapping each key to a bucket of values.
///
/// Nodes live in an arena and refer to each other through [`NodeId`]s. Leaves
/// are doubly linked in key order, which is what ordered scans and range
/// queries walk.
#[derive(Clone, Debug)]
pub struct BPlusTree<K, V> {
    /// Arena of all nodes.
    pub(super) arena: Vec<Node<K, V>>,
    /// Root node ID.
    pub(super) root: NodeId,
    /// Maximum keys per leaf, and maximum children per internal node.
    branching_factor: usize,
    /// Statistics for this tree.
    pub(super) stats: TreeStats,
}

impl<K: Clone + Ord, V> BPlusTree<K, V> {
    /// Creates an empty tree with the default branching factor.
    pub fn new() -> Self {
        Self::with_order(DEFAULT_BRANCHING_FACTOR)
    }

    /// Creates an empty tree with the given branching factor.
    pub fn with_branching_factor(branching_factor: usize) -> Result<Self, IndexError> {
        if branching_factor < MIN_BRANCHING_FACTOR {
            return Err(IndexError::InvalidBranchingFactor(branching_factor));
        }
        Ok(Self::with_order(branching_factor))
    }

    fn with_order(branching_factor: usize) -> Self {
        Self {
            arena: vec![Node::Leaf(LeafNode::new())],
            root: 0,
            branching_factor,
            stats: TreeStats::new(),
        }
    }

    /// Returns the branching factor.
    pub fn branching_factor(&self) -> usize {
        self.branching_factor
    }

    /// Returns the statistics for this tree.
    pub fn stats(&self) -> &TreeStats {
        &self.stats
    }

    /// Inserts every `keys[i]`/`values[i]` pair.
    ///
    /// Nothing is inserted if the sequences differ in length.
    pub fn build(&mut self, keys: Vec<K>, values: Vec<V>) -> Result<(), IndexError> {
        if keys.len() != values.len() {
            return Err(IndexError::LengthMismatch {
                keys: keys.len(),
                values: values.len(),
            });
        }
        for (key, value) in keys.into_iter().zip(values) {
            Index::insert(self, key, value);
        }
        Ok(())
    }

    /// Allocates a new node in the arena and returns its ID.
    fn alloc_node(&mut self, node: Node<K, V>) -> NodeId {
        let id = self.arena.len();
        self.arena.push(node);
        id
    }

    fn leaf(&self, id: NodeId) -> &LeafNode<K, V> {
        match &self.arena[id] {
            Node::Leaf(leaf) => leaf,
            Node::Internal(_) => unreachable!("node {} is not a leaf", id),
        }
    }

    fn leaf_mut(&mut self, id: NodeId) -> &mut LeafNode<K, V> {
        match &mut self.arena[id] {
            Node::Leaf(leaf) => leaf,
            Node::Internal(_) => unreachable!("node {} is not a leaf", id),
        }
    }

    fn internal_mut(&mut self, id: NodeId) -> &mut InternalNode<K> {
        match &mut self.arena[id] {
            Node::Internal(node) => node,
            Node::Leaf(_) => unreachable!("node {} is not an internal node", id),
        }
    }

    /// Finds the leaf node that should contain the given key.
    fn find_leaf(&self, key: &K) -> NodeId {
        let mut current = self.root;
        loop {
            match &self.arena[current] {
                Node::Leaf(_) => return current,
                Node::Internal(node) => current = node.child_for(key),
            }
        }
    }

    /// Returns the leftmost leaf node.
    pub(super) fn leftmost_leaf(&self) -> NodeId {
        let mut current = self.root;
        while let Some(child) = self.arena[current].first_child() {
            current = child;
        }
        current
    }

    /// Returns the rightmost leaf node.
    fn rightmost_leaf(&self) -> NodeId {
        let mut current = self.root;
        while let Some(child) = self.arena[current].last_child() {
            current = child;
        }
        current
    }

    /// Leaves in key order, starting at `start`.
    fn leaves_from(&self, start: Option<NodeId>) -> impl Iterator<Item = &LeafNode<K, V>> + '_ {
        core::iter::successors(start.map(|id| self.leaf(id)), move |leaf| {
            leaf.next.map(|id| self.leaf(id))
        })
    }

    /// Links `right` into the sibling chain directly after `left`.
    fn link_after(&mut self, left: NodeId, right: NodeId) {
        let next = self.arena[left].next();
        self.arena[right].set_prev(Some(left));
        self.arena[right].set_next(next);
        if let Some(next_id) = next {
            self.arena[next_id].set_prev(Some(right));
        }
        self.arena[left].set_next(Some(right));
    }

    /// Splits an overfull leaf. Returns the new root if the split reached it.
    fn split_leaf(&mut self, leaf_id: NodeId) -> Option<NodeId> {
        let at = self.branching_factor.div_ceil(2);
        let new_leaf = self.leaf_mut(leaf_id).split_off(at);
        let separator = new_leaf.keys[0].clone();
        let new_leaf_id = self.alloc_node(Node::Leaf(new_leaf));
        self.link_after(leaf_id, new_leaf_id);

        self.stats.record_leaf_split();
        trace!(leaf = leaf_id, new_leaf = new_leaf_id, at, "split leaf");

        self.insert_into_parent(leaf_id, separator, new_leaf_id)
    }

    /// Splits an overfull internal node, returning the promoted key and the new
    /// right sibling.
    fn split_internal(&mut self, node_id: NodeId) -> (K, NodeId) {
        let at = self.branching_factor / 2;
        let (promote_key, new_node) = self.internal_mut(node_id).split_off(at);
        let moved: Vec<NodeId> = new_node.children.clone();
        let new_node_id = self.alloc_node(Node::Internal(new_node));

        for child_id in moved {
            self.arena[child_id].set_parent(Some(new_node_id));
        }
        self.link_after(node_id, new_node_id);

        self.stats.record_internal_split();
        trace!(node = node_id, new_node = new_node_id, at, "split internal node");

        (promote_key, new_node_id)
    }

    /// Hands a separator and new right sibling to the parent of `left`,
    /// splitting ancestors as long as they overflow.
    ///
    /// Returns the new root when the cascade grows the tree by one level.
    fn insert_into_parent(
        &mut self,
        mut left: NodeId,
        mut key: K,
        mut right: NodeId,
    ) -> Option<NodeId> {
        loop {
            let parent_id = match self.arena[left].parent() {
                Some(parent_id) => parent_id,
                None => return Some(self.grow_root(left, key, right)),
            };

            let max_degree = self.branching_factor;
            let parent = self.internal_mut(parent_id);
            parent.insert_child(key, right);
            let overfull = parent.degree() > max_degree;
            self.arena[right].set_parent(Some(parent_id));

            if !overfull {
                return None;
            }
            let (promote_key, new_node_id) = self.split_internal(parent_id);
            left = parent_id;
            key = promote_key;
            right = new_node_id;
        }
    }

    /// Creates a new root above the former root `left` and its new sibling.
    fn grow_root(&mut self, left: NodeId, key: K, right: NodeId) -> NodeId {
        let new_root_id = self.alloc_node(Node::Internal(InternalNode::new_root(key, left, right)));
        self.arena[left].set_parent(Some(new_root_id));
        self.arena[right].set_parent(Some(new_root_id));

        self.stats.record_root_split();
        debug!(root = new_root_id, height = self.stats.root_splits(), "tree grew a level");
        new_root_id
    }

    /// Returns the number of levels above the leaves (0 for a single leaf).
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut current = self.root;
        while let Some(child) = self.arena[current].first_child() {
            height += 1;
            current = child;
        }
        height
    }

    /// Returns an iterator over every `(key, value)` pair in key order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.arena, Some(self.leftmost_leaf()))
    }

    /// Returns the distinct keys in ascending order.
    pub fn keys(&self) -> Vec<K> {
        self.leaves_from(Some(self.leftmost_leaf()))
            .flat_map(|leaf| leaf.keys.iter().cloned())
            .collect()
    }

    /// Returns each level's node key lists, root first.
    ///
    /// Each level is read by walking its sibling chain.
    pub fn levels(&self) -> Vec<Vec<Vec<K>>> {
        let mut levels = Vec::new();
        let mut level_start = Some(self.root);
        while let Some(first) = level_start {
            let mut level = Vec::new();
            let mut cursor = Some(first);
            while let Some(id) = cursor {
                level.push(self.arena[id].keys().to_vec());
                cursor = self.arena[id].next();
            }
            levels.push(level);
            level_start = self.arena[first].first_child();
        }
        levels
    }
}

impl<K: Clone + Ord, V: Clone> BPlusTree<K, V> {
    /// Returns every value, ordered by key, then by insertion within a key.
    pub fn values(&self) -> Vec<V> {
        self.iter().map(|(_, value)| value.clone()).collect()
    }

    /// Returns each distinct key with its bucket, in key order.
    pub fn items(&self) -> Vec<(K, Vec<V>)> {
        self.leaves_from(Some(self.leftmost_leaf()))
            .flat_map(|leaf| leaf.keys.iter().cloned().zip(leaf.buckets.iter().cloned()))
            .collect()
    }

    /// Values of every key below `key` (or up to it when `include_key`).
    fn find_left(&self, key: &K, include_key: bool) -> Vec<V> {
        let leaf_id = self.find_leaf(key);
        let leaf = self.leaf(leaf_id);

        // Every leaf before the target holds only keys below its separator.
        let mut preceding = Vec::new();
        let mut cursor = leaf.prev;
        while let Some(id) = cursor {
            preceding.push(id);
            cursor = self.leaf(id).prev;
        }

        let mut result = Vec::new();
        for &id in preceding.iter().rev() {
            result.extend(self.leaf(id).buckets.iter().flatten().cloned());
        }
        result.extend(leaf.buckets_before(key, include_key).iter().flatten().cloned());
        result
    }

    /// Values of every key above `key` (or from it when `include_key`).
    fn find_right(&self, key: &K, include_key: bool) -> Vec<V> {
        let leaf_id = self.find_leaf(key);
        let leaf = self.leaf(leaf_id);

        let mut result: Vec<V> = leaf
            .buckets_after(key, include_key)
            .iter()
            .flatten()
            .cloned()
            .collect();
        for next in self.leaves_from(leaf.next) {
            result.extend(next.buckets.iter().flatten().cloned());
        }
        result
    }
}

impl<K: Clone + Ord, V> Default for BPlusTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone + Ord, V> Index<K, V> for BPlusTree<K, V> {
    fn insert(&mut self, key: K, value: V) {
        let max_keys = self.branching_factor;
        let leaf_id = self.find_leaf(&key);
        let leaf = self.leaf_mut(leaf_id);
        let outcome = leaf.insert(key, value);
        let overfull = leaf.key_count() > max_keys;
        self.stats.add_entry();

        if outcome == LeafInsert::Inserted && overfull {
            if let Some(new_root) = self.split_leaf(leaf_id) {
                self.root = new_root;
            }
        }
        debug_assert!(self.arena[self.root].parent().is_none());
    }

    fn get(&self, key: &K) -> Option<&[V]> {
        self.leaf(self.find_leaf(key)).get(key)
    }

    fn len(&self) -> usize {
        self.stats.entries()
    }

    fn clear(&mut self) {
        self.arena.clear();
        self.root = self.alloc_node(Node::Leaf(LeafNode::new()));
        self.stats.clear();
    }

    fn min(&self) -> Option<(&K, &[V])> {
        let leaf = self.leaf(self.leftmost_leaf());
        let key = leaf.keys.first()?;
        Some((key, leaf.buckets[0].as_slice()))
    }

    fn max(&self) -> Option<(&K, &[V])> {
        let leaf = self.leaf(self.rightmost_leaf());
        let key = leaf.keys.last()?;
        Some((key, leaf.buckets[leaf.key_count() - 1].as_slice()))
    }
}

impl<K: Clone + Ord, V: Clone> RangeIndex<K, V> for BPlusTree<K, V> {
    fn search(&self, op: Operator, key: &K) -> Vec<V> {
        match op {
            Operator::Eq => self.get(key).map(<[V]>::to_vec).unwrap_or_default(),
            Operator::Ne => {
                let mut result = self.find_left(key, false);
                result.extend(self.find_right(key, false));
                result
            }
            Operator::Lt => self.find_left(key, false),
            Operator::Le => self.find_left(key, true),
            Operator::Gt => self.find_right(key, false),
            Operator::Ge => self.find_right(key, true),
        }
    }
}

impl<K: Clone + Ord, V> Extend<(K, V)> for BPlusTree<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            Index::insert(self, key, value);
        }
    }
}

impl<K: Clone + Ord, V> FromIterator<(K, V)> for BPlusTree<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<'a, K: Clone + Ord, V> IntoIterator for &'a BPlusTree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Clone + Ord + fmt::Debug, V> fmt::Display for BPlusTree<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (depth, level) in self.levels().iter().enumerate() {
            writeln!(f, "Layer: {}", depth)?;
            for (i, keys) in level.iter().enumerate() {
                if i > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{:?}", keys)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

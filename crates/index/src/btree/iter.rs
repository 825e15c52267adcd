//! B+Tree iterator implementation.

use super::node::{Node, NodeId};

/// Iterator over every `(key, value)` pair, following the leaf chain.
///
/// Values of one key are yielded in insertion order.
pub struct Iter<'a, K, V> {
    /// Reference to the arena of nodes.
    arena: &'a [Node<K, V>],
    /// Current leaf ID.
    current_node: Option<NodeId>,
    /// Current key position within the leaf.
    current_pos: usize,
    /// Current position within the bucket of the current key.
    value_pos: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    /// Creates a new iterator starting at the given leaf.
    pub(crate) fn new(arena: &'a [Node<K, V>], start_node: Option<NodeId>) -> Self {
        Self {
            arena,
            current_node: start_node,
            current_pos: 0,
            value_pos: 0,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let node_id = self.current_node?;
            let leaf = self.arena[node_id].as_leaf()?;

            if self.current_pos >= leaf.key_count() {
                // Move to next leaf
                self.current_node = leaf.next;
                self.current_pos = 0;
                self.value_pos = 0;
                continue;
            }

            let bucket = &leaf.buckets[self.current_pos];
            if self.value_pos < bucket.len() {
                let value = &bucket[self.value_pos];
                self.value_pos += 1;
                return Some((&leaf.keys[self.current_pos], value));
            }

            self.current_pos += 1;
            self.value_pos = 0;
        }
    }
}

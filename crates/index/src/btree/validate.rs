//! Structural invariant checks for the B+Tree.

use super::node::{Node, NodeId};
use super::tree::BPlusTree;
use crate::traits::IndexError;
use alloc::vec;
use alloc::vec::Vec;
use hashbrown::HashSet;

fn corrupted(node: NodeId, reason: &'static str) -> IndexError {
    IndexError::Corrupted { node, reason }
}

impl<K: Clone + Ord, V> BPlusTree<K, V> {
    /// Walks the whole tree and reports the first broken invariant.
    ///
    /// Checks key order and separator bounds, child counts and parent links,
    /// equal leaf depth, sibling chains on every level, and that the leaf chain
    /// holds exactly `len()` values.
    pub fn check_invariants(&self) -> Result<(), IndexError> {
        let b = self.branching_factor();
        if self.arena[self.root].parent().is_some() {
            return Err(corrupted(self.root, "root has a parent"));
        }

        // Depth-first, left to right, collecting each level in order.
        let mut levels: Vec<Vec<NodeId>> = Vec::new();
        let mut leaf_depth = None;
        let mut visited = HashSet::new();
        let mut stack: Vec<(NodeId, usize, Option<&K>, Option<&K>)> = vec![(self.root, 0, None, None)];

        while let Some((id, depth, lower, upper)) = stack.pop() {
            if !visited.insert(id) {
                return Err(corrupted(id, "node reachable twice"));
            }
            if levels.len() <= depth {
                levels.push(Vec::new());
            }
            levels[depth].push(id);

            let node = &self.arena[id];
            let keys = node.keys();
            if keys.windows(2).any(|w| w[0] >= w[1]) {
                return Err(corrupted(id, "keys not strictly ascending"));
            }
            if let (Some(lower), Some(first)) = (lower, keys.first()) {
                if first < lower {
                    return Err(corrupted(id, "key below separator"));
                }
            }
            if let (Some(upper), Some(last)) = (upper, keys.last()) {
                if last >= upper {
                    return Err(corrupted(id, "key not below separator"));
                }
            }

            match node {
                Node::Leaf(leaf) => {
                    if leaf.buckets.len() != leaf.keys.len() {
                        return Err(corrupted(id, "bucket count differs from key count"));
                    }
                    if leaf.buckets.iter().any(|bucket| bucket.is_empty()) {
                        return Err(corrupted(id, "empty bucket"));
                    }
                    if leaf.keys.len() > b {
                        return Err(corrupted(id, "leaf over capacity"));
                    }
                    if id != self.root && leaf.keys.is_empty() {
                        return Err(corrupted(id, "empty non-root leaf"));
                    }
                    match leaf_depth {
                        None => leaf_depth = Some(depth),
                        Some(d) if d != depth => {
                            return Err(corrupted(id, "leaves at different depths"));
                        }
                        Some(_) => {}
                    }
                }
                Node::Internal(internal) => {
                    if internal.keys.is_empty() {
                        return Err(corrupted(id, "internal node without keys"));
                    }
                    if internal.children.len() != internal.keys.len() + 1 {
                        return Err(corrupted(id, "child count is not key count + 1"));
                    }
                    if internal.children.len() > b {
                        return Err(corrupted(id, "internal node over capacity"));
                    }
                    for (i, &child) in internal.children.iter().enumerate().rev() {
                        if self.arena[child].parent() != Some(id) {
                            return Err(corrupted(child, "parent link mismatch"));
                        }
                        let child_lower = if i == 0 { lower } else { Some(&internal.keys[i - 1]) };
                        let child_upper = internal.keys.get(i).or(upper);
                        stack.push((child, depth + 1, child_lower, child_upper));
                    }
                }
            }
        }

        for level in &levels {
            self.check_sibling_chain(level)?;
        }

        let stored: usize = levels
            .last()
            .map(|leaves| {
                leaves
                    .iter()
                    .filter_map(|&id| self.arena[id].as_leaf())
                    .flat_map(|leaf| leaf.buckets.iter())
                    .map(Vec::len)
                    .sum::<usize>()
            })
            .unwrap_or(0);
        if stored != self.stats.entries() {
            return Err(corrupted(self.root, "stored values differ from entry count"));
        }
        Ok(())
    }

    /// Checks that `prev`/`next` links on one level match its left-to-right order.
    fn check_sibling_chain(&self, level: &[NodeId]) -> Result<(), IndexError> {
        for (i, &id) in level.iter().enumerate() {
            let node = &self.arena[id];
            let expected_prev = if i == 0 { None } else { Some(level[i - 1]) };
            let expected_next = level.get(i + 1).copied();
            if node.prev() != expected_prev {
                return Err(corrupted(id, "prev link mismatch"));
            }
            if node.next() != expected_next {
                return Err(corrupted(id, "next link mismatch"));
            }
        }
        Ok(())
    }
}

//! Statistics for the B+Tree index.

use core::sync::atomic::{AtomicUsize, Ordering};

/// Counters maintained by the tree as it grows.
#[derive(Debug)]
pub struct TreeStats {
    /// Number of insert calls, duplicate keys included.
    entries: AtomicUsize,
    /// Number of leaf splits.
    leaf_splits: AtomicUsize,
    /// Number of internal node splits.
    internal_splits: AtomicUsize,
    /// Number of times a new root was created.
    root_splits: AtomicUsize,
}

impl TreeStats {
    /// Creates a new empty stats instance.
    pub fn new() -> Self {
        Self {
            entries: AtomicUsize::new(0),
            leaf_splits: AtomicUsize::new(0),
            internal_splits: AtomicUsize::new(0),
            root_splits: AtomicUsize::new(0),
        }
    }

    /// Returns the number of entries.
    pub fn entries(&self) -> usize {
        self.entries.load(Ordering::Relaxed)
    }

    /// Returns the number of leaf splits.
    pub fn leaf_splits(&self) -> usize {
        self.leaf_splits.load(Ordering::Relaxed)
    }

    /// Returns the number of internal node splits.
    pub fn internal_splits(&self) -> usize {
        self.internal_splits.load(Ordering::Relaxed)
    }

    /// Returns the number of root splits. Equals the tree height.
    pub fn root_splits(&self) -> usize {
        self.root_splits.load(Ordering::Relaxed)
    }

    pub fn add_entry(&self) {
        self.entries.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_leaf_split(&self) {
        self.leaf_splits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_internal_split(&self) {
        self.internal_splits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_root_split(&self) {
        self.root_splits.fetch_add(1, Ordering::Relaxed);
    }

    /// Resets every counter to zero.
    pub fn clear(&self) {
        self.entries.store(0, Ordering::Relaxed);
        self.leaf_splits.store(0, Ordering::Relaxed);
        self.internal_splits.store(0, Ordering::Relaxed);
        self.root_splits.store(0, Ordering::Relaxed);
    }
}

impl Default for TreeStats {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for TreeStats {
    fn clone(&self) -> Self {
        Self {
            entries: AtomicUsize::new(self.entries()),
            leaf_splits: AtomicUsize::new(self.leaf_splits()),
            internal_splits: AtomicUsize::new(self.internal_splits()),
            root_splits: AtomicUsize::new(self.root_splits()),
        }
    }
}

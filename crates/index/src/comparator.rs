//! Key-only ordering for `(key, value)` records.
//!
//! The B+Tree itself orders keys through `Ord`. `KeyOrdered` is for callers
//! that sort records by key while ignoring the value.

use core::cmp::Ordering;

/// A `(key, value)` record that compares by key alone.
///
/// Two records with equal keys are equal regardless of their values, so a
/// stable sort keeps their original relative order.
#[derive(Clone, Copy, Debug)]
pub struct KeyOrdered<K, V> {
    pub key: K,
    pub value: V,
}

impl<K, V> KeyOrdered<K, V> {
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    pub fn into_pair(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K: PartialEq, V> PartialEq for KeyOrdered<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<K: Eq, V> Eq for KeyOrdered<K, V> {}

impl<K: PartialOrd, V> PartialOrd for KeyOrdered<K, V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.key.partial_cmp(&other.key)
    }
}

impl<K: Ord, V> Ord for KeyOrdered<K, V> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn test_key_ordered_ignores_value() {
        let a = KeyOrdered::new(1, "x");
        let b = KeyOrdered::new(1, "y");
        let c = KeyOrdered::new(2, "a");

        assert_eq!(a, b);
        assert!(a < c);
        assert_eq!(a.cmp(&b), Ordering::Equal);
        assert_eq!(c.into_pair(), (2, "a"));
    }

    #[test]
    fn test_key_ordered_stable_sort() {
        let mut records: Vec<KeyOrdered<i32, char>> = vec![
            KeyOrdered::new(3, 'a'),
            KeyOrdered::new(1, 'b'),
            KeyOrdered::new(3, 'c'),
            KeyOrdered::new(2, 'd'),
            KeyOrdered::new(1, 'e'),
        ];
        records.sort();

        let pairs: Vec<(i32, char)> = records.into_iter().map(KeyOrdered::into_pair).collect();
        assert_eq!(pairs, vec![(1, 'b'), (1, 'e'), (2, 'd'), (3, 'a'), (3, 'c')]);
    }

    #[test]
    fn test_key_ordered_reverse_sort() {
        let mut records = vec![
            KeyOrdered::new(1, 10),
            KeyOrdered::new(3, 30),
            KeyOrdered::new(2, 20),
        ];
        records.sort_by(|a, b| b.cmp(a));
        let keys: Vec<i32> = records.iter().map(|r| r.key).collect();
        assert_eq!(keys, vec![3, 2, 1]);
    }
}

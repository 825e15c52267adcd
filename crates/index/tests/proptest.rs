//! Property-based tests for bptree-index using proptest.

use bptree_index::{BPlusTree, Index, Operator, RangeIndex};
use proptest::prelude::*;
use std::collections::BTreeMap;

fn build_tree(order: usize, keys: &[i64]) -> BPlusTree<i64, usize> {
    let mut tree = BPlusTree::with_branching_factor(order).unwrap();
    for (i, &key) in keys.iter().enumerate() {
        tree.insert(key, i);
    }
    tree
}

/// Reference model: key -> values in insertion order.
fn model(keys: &[i64]) -> BTreeMap<i64, Vec<usize>> {
    let mut map: BTreeMap<i64, Vec<usize>> = BTreeMap::new();
    for (i, &key) in keys.iter().enumerate() {
        map.entry(key).or_default().push(i);
    }
    map
}

fn sorted(mut values: Vec<usize>) -> Vec<usize> {
    values.sort_unstable();
    values
}

proptest! {
    /// keys() is the sorted set of distinct keys; len() counts every insert.
    #[test]
    fn btree_keys_sorted_and_distinct(
        order in 3usize..12,
        keys in prop::collection::vec(-500i64..500, 0..400)
    ) {
        let tree = build_tree(order, &keys);
        let expected: Vec<i64> = model(&keys).into_keys().collect();
        prop_assert_eq!(tree.keys(), expected);
        prop_assert_eq!(tree.len(), keys.len());
    }

    /// Every bucket holds its values in insertion order.
    #[test]
    fn btree_bucket_insertion_order(
        order in 3usize..12,
        keys in prop::collection::vec(0i64..50, 1..300)
    ) {
        let tree = build_tree(order, &keys);
        for (key, values) in model(&keys) {
            prop_assert_eq!(tree.get(&key), Some(values.as_slice()));
        }
        prop_assert_eq!(tree.get(&-1), None);
    }

    /// items() and values() agree with the model.
    #[test]
    fn btree_traversal_matches_model(
        order in 3usize..12,
        keys in prop::collection::vec(-100i64..100, 0..300)
    ) {
        let tree = build_tree(order, &keys);
        let expected = model(&keys);

        let items: Vec<(i64, Vec<usize>)> = expected.clone().into_iter().collect();
        prop_assert_eq!(tree.items(), items);

        let values: Vec<usize> = expected.into_values().flatten().collect();
        prop_assert_eq!(tree.values(), values);
    }

    /// Structural invariants hold after every single insert.
    #[test]
    fn btree_invariants_after_each_insert(
        order in 3usize..8,
        keys in prop::collection::vec(-200i64..200, 1..200)
    ) {
        let mut tree = BPlusTree::with_branching_factor(order).unwrap();
        for (i, &key) in keys.iter().enumerate() {
            tree.insert(key, i);
            prop_assert_eq!(tree.check_invariants(), Ok(()));
        }
        prop_assert_eq!(tree.stats().root_splits(), tree.height());
    }

    /// Each operator returns exactly the model entries it selects, in key order.
    #[test]
    fn btree_search_matches_model(
        order in 3usize..12,
        keys in prop::collection::vec(-100i64..100, 0..300),
        probe in -120i64..120
    ) {
        let tree = build_tree(order, &keys);
        let expected = model(&keys);

        for op in Operator::ALL {
            let want: Vec<usize> = expected
                .iter()
                .filter(|(key, _)| op.matches(*key, &probe))
                .flat_map(|(_, values)| values.iter().copied())
                .collect();
            prop_assert_eq!(tree.search(op, &probe), want, "operator {}", op);
        }
    }

    /// `<` with `>=`, and `<=` with `>`, partition the whole index.
    #[test]
    fn btree_partition_laws(
        order in 3usize..12,
        keys in prop::collection::vec(-100i64..100, 0..300),
        probe in -120i64..120
    ) {
        let tree = build_tree(order, &keys);
        let all = tree.values();

        let mut lt_ge = tree.search(Operator::Lt, &probe);
        lt_ge.extend(tree.search(Operator::Ge, &probe));
        prop_assert_eq!(&lt_ge, &all);

        let mut le_gt = tree.search(Operator::Le, &probe);
        le_gt.extend(tree.search(Operator::Gt, &probe));
        prop_assert_eq!(&le_gt, &all);

        let mut ne_eq = tree.search(Operator::Ne, &probe);
        ne_eq.extend(tree.search(Operator::Eq, &probe));
        prop_assert_eq!(sorted(ne_eq), sorted(all));
    }

    /// Traversing twice without mutation yields identical results.
    #[test]
    fn btree_retraversal_is_stable(
        order in 3usize..12,
        keys in prop::collection::vec(0i64..1000, 0..200)
    ) {
        let tree = build_tree(order, &keys);
        prop_assert_eq!(tree.items(), tree.items());
        prop_assert_eq!(tree.keys(), tree.keys());
        prop_assert_eq!(tree.iter().count(), tree.len());
    }

    /// min/max agree with the smallest and largest inserted keys.
    #[test]
    fn btree_min_max_correct(keys in prop::collection::vec(1i64..10000, 1..100)) {
        let tree = build_tree(5, &keys);
        let expected_min = *keys.iter().min().unwrap();
        let expected_max = *keys.iter().max().unwrap();

        prop_assert_eq!(*tree.min().unwrap().0, expected_min);
        prop_assert_eq!(*tree.max().unwrap().0, expected_max);
    }

    /// Unknown operator tokens are rejected with the offending token.
    #[test]
    fn btree_rejects_unknown_tokens(token in "[a-z=<>!]{0,3}") {
        let tree = build_tree(4, &[1, 2, 3]);
        let known = ["<", "<=", ">", ">=", "==", "!="];
        let result = tree.search_str(&token, &2);
        if known.contains(&token.as_str()) {
            prop_assert!(result.is_ok());
        } else {
            prop_assert_eq!(
                result,
                Err(bptree_index::IndexError::InvalidOperator(token.clone()))
            );
        }
    }
}

use std::collections::BTreeSet;

use avl_bst::{AvlTree, BinarySearchTree};
use proptest::prelude::*;

fn avl_from(keys: &[i16]) -> AvlTree<i16, i16> {
    let mut tree = AvlTree::new();
    for &k in keys {
        tree.insert(k, k);
    }
    tree
}

proptest! {
    #[test]
    fn prop_avl_iterates_strictly_increasing(keys in prop::collection::vec(any::<i16>(), 0..200)) {
        let tree = avl_from(&keys);
        let walked: Vec<i16> = tree.iter().map(|(k, _)| *k).collect();
        let expected: Vec<i16> = keys.iter().copied().collect::<BTreeSet<_>>().into_iter().collect();
        prop_assert_eq!(walked, expected);
    }

    #[test]
    fn prop_avl_stays_balanced(keys in prop::collection::vec(any::<i16>(), 0..200)) {
        let tree = avl_from(&keys);
        prop_assert!(tree.assert_valid().is_ok());
        prop_assert!(tree.is_balanced());
        let bound = 1.44 * ((tree.len() + 2) as f64).log2();
        prop_assert!(tree.height() as f64 <= bound);
    }

    #[test]
    fn prop_avl_reinsert_is_idempotent(keys in prop::collection::vec(-50i16..50, 1..80)) {
        let mut tree = avl_from(&keys);
        let before = tree.print();
        for &k in &keys {
            prop_assert_eq!(tree.insert(k, k), Some(k));
        }
        prop_assert_eq!(tree.print(), before);
    }

    #[test]
    fn prop_avl_remove_all_empties(
        keys in prop::collection::vec(-100i16..100, 0..120),
        cut in any::<prop::sample::Index>(),
    ) {
        let mut tree = avl_from(&keys);
        let mut unique: Vec<i16> = keys.iter().copied().collect::<BTreeSet<_>>().into_iter().collect();
        if !unique.is_empty() {
            let at = cut.index(unique.len());
            unique.rotate_left(at);
        }
        for k in &unique {
            prop_assert_eq!(tree.remove(k), Some(*k));
            prop_assert!(tree.assert_valid().is_ok());
        }
        prop_assert!(tree.is_empty());
        prop_assert_eq!(tree.height(), 0);
    }

    #[test]
    fn prop_bst_remove_keeps_order(
        keys in prop::collection::vec(-100i16..100, 0..120),
        drop in prop::collection::vec(-100i16..100, 0..60),
    ) {
        let mut tree = BinarySearchTree::new();
        let mut model = BTreeSet::new();
        for &k in &keys {
            tree.insert(k, ());
            model.insert(k);
        }
        for k in &drop {
            prop_assert_eq!(tree.remove(k).is_some(), model.remove(k));
        }
        prop_assert!(tree.assert_valid().is_ok());
        let walked: Vec<i16> = tree.iter().map(|(k, _)| *k).collect();
        prop_assert_eq!(walked, model.into_iter().collect::<Vec<_>>());
    }
}

use std::collections::BTreeMap;

use avl_bst::{BinarySearchTree, KeyError};
use avl_bst_util::{Fuzzer, Op};

#[test]
fn bst_insert_order_defines_shape_matrix() {
    let cases: [(&[i32], i32, usize); 4] = [
        (&[1, 2, 3, 4, 5], 1, 5),
        (&[5, 4, 3, 2, 1], 5, 5),
        (&[3, 1, 4, 2, 5], 3, 3),
        (&[4, 2, 6, 1, 3, 5, 7], 4, 3),
    ];
    for (keys, root_key, height) in cases {
        let mut tree = BinarySearchTree::new();
        for &k in keys {
            tree.insert(k, k);
        }
        let root = tree.root().unwrap();
        assert_eq!(tree.key(root), &root_key, "keys {keys:?}");
        assert_eq!(tree.height(), height, "keys {keys:?}");
        tree.assert_valid().unwrap();
    }
}

#[test]
fn bst_is_balanced_matrix() {
    let mut tree = BinarySearchTree::<i32, ()>::new();
    assert!(tree.is_balanced());
    tree.insert(2, ());
    tree.insert(1, ());
    assert!(tree.is_balanced());
    tree.insert(3, ());
    tree.insert(4, ());
    assert!(tree.is_balanced());
    tree.insert(5, ());
    assert!(!tree.is_balanced());
}

#[test]
fn bst_fuzzed_against_btree_map_matrix() {
    for seed in 0u8..8 {
        let fuzzer = Fuzzer::new(Some([seed.wrapping_mul(31); 32]));
        let mut tree = BinarySearchTree::<i64, i64>::new();
        let mut model = BTreeMap::new();

        for (step, op) in fuzzer.operations(300, 48, 0.35).into_iter().enumerate() {
            match op {
                Op::Insert(k) => {
                    let v = step as i64;
                    assert_eq!(tree.insert(k, v), model.insert(k, v));
                }
                Op::Remove(k) => {
                    assert_eq!(tree.remove(&k), model.remove(&k));
                }
            }
            if let Err(e) = tree.assert_valid() {
                panic!("seed {seed}, step {step}, {op:?}: {e}\n{tree}");
            }
            assert_eq!(tree.len(), model.len());
        }

        for (k, v) in &model {
            assert_eq!(tree.at(k), Ok(v));
        }
        let keys: Vec<i64> = tree.iter().map(|(k, _)| *k).collect();
        let expected: Vec<i64> = model.keys().copied().collect();
        assert_eq!(keys, expected);
    }
}

#[test]
fn bst_handles_track_entries_until_removal_matrix() {
    let mut tree = BinarySearchTree::new();
    for k in [50, 30, 70, 20, 40, 60, 80] {
        tree.insert(k, k.to_string());
    }
    let h = tree.find(&60).position().unwrap();
    tree.insert(65, "65".to_string());
    assert_eq!(tree.key(h), &60);
    assert_eq!(tree.value(h), "60");
    assert_eq!(tree.successor(h).map(|i| *tree.key(i)), Some(65));
}

#[test]
fn bst_missing_key_contracts_matrix() {
    let mut tree = BinarySearchTree::<String, u8>::new();
    assert!(tree.find(&"x".to_string()).is_end());
    assert_eq!(tree.at(&"x".to_string()), Err(KeyError));

    tree.insert("x".to_string(), 1);
    let it = tree.find(&"x".to_string());
    assert!(!it.is_end());
    assert_eq!(it.key().map(String::as_str), Some("x"));
    assert_eq!(tree.at(&"y".to_string()).unwrap_err(), KeyError);
}

#[test]
fn bst_display_matches_print_matrix() {
    let mut tree = BinarySearchTree::new();
    for k in [2, 1, 3] {
        tree.insert(k, ());
    }
    assert_eq!(tree.to_string(), tree.print());
    assert_eq!(
        tree.print(),
        "BinarySearchTree\n└─ 2 = ()\n   ├─ 1 = ()\n   └─ 3 = ()"
    );
}

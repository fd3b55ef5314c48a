//! AVL tree layered over the binary search tree.

mod avl_tree;
pub mod util;

pub use avl_tree::AvlTree;
pub use util::{assert_avl_balance, insert_fix, remove_fix, rotate_left, rotate_right};

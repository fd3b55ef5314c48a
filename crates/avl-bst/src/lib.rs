//! Arena-based binary search tree and AVL tree.
//!
//! Nodes live in a `Vec` owned by the tree and refer to each other through
//! `Option<u32>` indices (`p` / `l` / `r`), so the parent/child cycle needs no
//! shared ownership and dropping the tree drops every node at once.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`types`] | [`Node`], [`KvNode`], [`BalancedNode`] link traits |
//! | [`tree_node`] | [`TreeNode`], the arena node with a balance field |
//! | [`util`] | `first`, `next`, `prev`, `swap`, `promote`, `unlink`, printing |
//! | [`bst`] | [`BinarySearchTree`], unbalanced insert/remove/find |
//! | [`avl`] | [`AvlTree`], rotations and `insert_fix` / `remove_fix` |
//! | [`iter`] | [`Iter`], the in-order cursor |
//!
//! # Example
//!
//! ```
//! use avl_bst::AvlTree;
//!
//! let mut tree = AvlTree::new();
//! for k in [1, 2, 3] {
//!     tree.insert(k, k * 10);
//! }
//! let root = tree.root().unwrap();
//! assert_eq!(tree.key(root), &2);
//! assert_eq!(tree.find(&4), tree.end());
//! assert!(tree.at(&4).is_err());
//! tree.assert_valid().unwrap();
//! ```

pub mod avl;
pub mod bst;
pub mod error;
pub mod iter;
pub mod tree_node;
pub mod types;
pub mod util;

pub use avl::AvlTree;
pub use bst::BinarySearchTree;
pub use error::KeyError;
pub use iter::Iter;
pub use tree_node::TreeNode;
pub use types::{BalancedNode, Comparator, KvNode, Node};

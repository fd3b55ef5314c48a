//! Leaf-depth check for plain binary trees.
//!
//! ```
//! use equal_paths::{equal_paths, TreeNode};
//!
//! let tree = TreeNode::with_children(1, Some(TreeNode::leaf(2)), Some(TreeNode::leaf(3)));
//! assert!(equal_paths(Some(&tree)));
//! ```

/// Owned binary tree node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeNode {
    pub key: i32,
    pub left: Option<Box<TreeNode>>,
    pub right: Option<Box<TreeNode>>,
}

impl TreeNode {
    pub fn leaf(key: i32) -> Self {
        Self {
            key,
            left: None,
            right: None,
        }
    }

    pub fn with_children(key: i32, left: Option<TreeNode>, right: Option<TreeNode>) -> Self {
        Self {
            key,
            left: left.map(Box::new),
            right: right.map(Box::new),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Depth shared by every leaf under `node`, or `None` once two leaves disagree.
fn leaf_depth(node: &TreeNode, depth: usize) -> Option<usize> {
    match (node.left.as_deref(), node.right.as_deref()) {
        (None, None) => Some(depth),
        (Some(only), None) | (None, Some(only)) => leaf_depth(only, depth + 1),
        (Some(l), Some(r)) => {
            let left = leaf_depth(l, depth + 1)?;
            let right = leaf_depth(r, depth + 1)?;
            if left != right {
                tracing::trace!(key = node.key, left, right, "leaf depths differ");
                return None;
            }
            Some(left)
        }
    }
}

/// Whether every root-to-leaf path has the same length.
///
/// An empty tree and a lone root both qualify. A node with a single child is
/// not a leaf, so its one path is the only one counted below it.
pub fn equal_paths(root: Option<&TreeNode>) -> bool {
    match root {
        Some(node) => leaf_depth(node, 0).is_some(),
        None => true,
    }
}

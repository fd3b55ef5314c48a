use std::fmt::{self, Debug, Display};
use std::ops::Index;

use crate::bst::BinarySearchTree;
use crate::error::KeyError;
use crate::iter::Iter;
use crate::tree_node::TreeNode;
use crate::types::Comparator;
use crate::util::{get_l, get_p, get_r, last};

use super::util::{assert_avl_balance, insert_leaf, remove_fix, swap};

/// Self-balancing AVL tree.
///
/// Structural search is shared with [`BinarySearchTree`]; after every
/// insert or remove the balance factors on the path to the root are repaired,
/// rotating wherever a node leans by two.
pub struct AvlTree<K, V, C = Comparator<K>>
where
    C: Fn(&K, &K) -> i32,
{
    tree: BinarySearchTree<K, V, C>,
}

impl<K, V> AvlTree<K, V, Comparator<K>>
where
    K: PartialOrd,
{
    pub fn new() -> Self {
        Self {
            tree: BinarySearchTree::new(),
        }
    }
}

impl<K, V> Default for AvlTree<K, V, Comparator<K>>
where
    K: PartialOrd,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C> AvlTree<K, V, C>
where
    C: Fn(&K, &K) -> i32,
{
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            tree: BinarySearchTree::with_comparator(comparator),
        }
    }

    /// Read-only view of the underlying search tree.
    pub fn as_bst(&self) -> &BinarySearchTree<K, V, C> {
        &self.tree
    }

    /// Inserts `key` or overwrites the value stored under it.
    ///
    /// Overwriting never changes the shape, so no rebalancing happens then.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let (node, old) = self.tree.insert_node(key, value);
        if old.is_some() {
            return old;
        }
        if let Some(parent) = get_p(&self.tree.arena, node) {
            self.tree.root = insert_leaf(&mut self.tree.arena, self.tree.root, parent, node);
        }
        None
    }

    /// Removes `key` and returns its value, or `None` if it is absent.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let node = self.tree.internal_find(key)?;
        let arena = &mut self.tree.arena;

        if let (Some(l), Some(_)) = (get_l(arena, node), get_r(arena, node)) {
            if let Some(pred) = last(arena, Some(l)) {
                self.tree.root = swap(arena, self.tree.root, node, pred);
            }
        }

        let parent = get_p(arena, node);
        let diff = match parent {
            Some(p) if get_l(arena, p) == Some(node) => 1,
            Some(_) => -1,
            None => 0,
        };

        self.tree.unlink(node);
        self.tree.root = remove_fix(&mut self.tree.arena, self.tree.root, parent, diff);
        Some(self.tree.reclaim(node))
    }

    /// Stored balance factor of the node holding `key`.
    pub fn balance_of(&self, key: &K) -> Option<i8> {
        self.tree
            .internal_find(key)
            .map(|i| self.tree.arena[i as usize].balance)
    }

    pub fn find(&self, key: &K) -> Iter<'_, K, V> {
        self.tree.find(key)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.tree.get(key)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.tree.get_mut(key)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.tree.contains_key(key)
    }

    /// Value under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError`] when the key is not in the tree.
    pub fn at(&self, key: &K) -> Result<&V, KeyError> {
        self.tree.at(key)
    }

    /// Mutable value under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError`] when the key is not in the tree.
    pub fn at_mut(&mut self, key: &K) -> Result<&mut V, KeyError> {
        self.tree.at_mut(key)
    }

    pub fn begin(&self) -> Iter<'_, K, V> {
        self.tree.begin()
    }

    pub fn end(&self) -> Iter<'_, K, V> {
        self.tree.end()
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        self.tree.iter()
    }

    pub fn clear(&mut self) {
        self.tree.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn height(&self) -> usize {
        self.tree.height()
    }

    pub fn is_balanced(&self) -> bool {
        self.tree.is_balanced()
    }

    pub fn root(&self) -> Option<u32> {
        self.tree.root()
    }

    pub fn node(&self, idx: u32) -> &TreeNode<K, V> {
        self.tree.node(idx)
    }

    pub fn key(&self, idx: u32) -> &K {
        self.tree.key(idx)
    }

    pub fn value(&self, idx: u32) -> &V {
        self.tree.value(idx)
    }

    pub fn predecessor(&self, idx: u32) -> Option<u32> {
        self.tree.predecessor(idx)
    }

    pub fn successor(&self, idx: u32) -> Option<u32> {
        self.tree.successor(idx)
    }

    /// Checks links, key order and every stored balance factor.
    pub fn assert_valid(&self) -> Result<(), String> {
        self.tree.assert_valid()?;
        assert_avl_balance(&self.tree.arena, self.tree.root)
    }

    pub fn print(&self) -> String
    where
        K: Debug,
        V: Debug,
    {
        self.tree.dump("AvlTree", |_, n| {
            format!("{:?} = {:?} [{:+}]", n.k, n.v, n.balance)
        })
    }
}

impl<'a, K, V, C> IntoIterator for &'a AvlTree<K, V, C>
where
    C: Fn(&K, &K) -> i32,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, C> Index<&K> for AvlTree<K, V, C>
where
    C: Fn(&K, &K) -> i32,
{
    type Output = V;

    fn index(&self, key: &K) -> &V {
        &self.tree[key]
    }
}

impl<K: Debug, V: Debug, C> Display for AvlTree<K, V, C>
where
    C: Fn(&K, &K) -> i32,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.print())
    }
}

impl<K: Debug, V: Debug, C> Debug for AvlTree<K, V, C>
where
    C: Fn(&K, &K) -> i32,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

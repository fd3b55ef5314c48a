use std::fmt::{self, Debug, Display};
use std::ops::Index;

use crate::error::KeyError;
use crate::iter::Iter;
use crate::tree_node::TreeNode;
use crate::types::{default_comparator, Comparator, KvNode};
use crate::util::{
    assert_bst, find, first, get_l, get_r, height, is_height_balanced, last, next, prev,
    print_node, reclaim, set_l, set_r, size, swap, unlink,
};

/// Unbalanced binary search tree over a node arena.
///
/// Keys are unique. Inserting an existing key overwrites its value in place;
/// removing a node with two children first swaps it with its in-order
/// predecessor.
pub struct BinarySearchTree<K, V, C = Comparator<K>>
where
    C: Fn(&K, &K) -> i32,
{
    pub(crate) root: Option<u32>,
    pub(crate) comparator: C,
    pub(crate) arena: Vec<TreeNode<K, V>>,
}

impl<K, V> BinarySearchTree<K, V, Comparator<K>>
where
    K: PartialOrd,
{
    pub fn new() -> Self {
        Self::with_comparator(default_comparator::<K>)
    }
}

impl<K, V> Default for BinarySearchTree<K, V, Comparator<K>>
where
    K: PartialOrd,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C> BinarySearchTree<K, V, C>
where
    C: Fn(&K, &K) -> i32,
{
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            root: None,
            comparator,
            arena: Vec::new(),
        }
    }

    /// Address of the tree, stable for as long as a cursor borrows it.
    fn id(&self) -> usize {
        self as *const Self as usize
    }

    pub(crate) fn internal_find(&self, key: &K) -> Option<u32> {
        find(&self.arena, self.root, key, &self.comparator)
    }

    /// Places `key` in the tree without any rebalancing.
    ///
    /// Returns the handle of the node holding `key` and, if the key was
    /// already present, the value it replaced.
    pub(crate) fn insert_node(&mut self, key: K, value: V) -> (u32, Option<V>) {
        let Some(mut curr) = self.root else {
            self.arena.push(TreeNode::new(key, value, None));
            let idx = (self.arena.len() - 1) as u32;
            self.root = Some(idx);
            return (idx, None);
        };

        loop {
            let cmp = (self.comparator)(&key, &self.arena[curr as usize].k);
            if cmp == 0 {
                let old = self.arena[curr as usize].set_value(value);
                return (curr, Some(old));
            }
            let next = if cmp < 0 {
                get_l(&self.arena, curr)
            } else {
                get_r(&self.arena, curr)
            };
            match next {
                Some(n) => curr = n,
                None => {
                    self.arena.push(TreeNode::new(key, value, Some(curr)));
                    let idx = (self.arena.len() - 1) as u32;
                    if cmp < 0 {
                        set_l(&mut self.arena, curr, Some(idx));
                    } else {
                        set_r(&mut self.arena, curr, Some(idx));
                    }
                    return (idx, None);
                }
            }
        }
    }

    /// Exchanges the positions of two nodes, keeping entries with handles.
    pub(crate) fn node_swap(&mut self, n1: u32, n2: u32) {
        self.root = swap(&mut self.arena, self.root, n1, n2);
    }

    /// Detaches a node with at most one child.
    pub(crate) fn unlink(&mut self, node: u32) {
        self.root = unlink(&mut self.arena, self.root, node);
    }

    /// Frees the slot of a detached node and hands back its value.
    pub(crate) fn reclaim(&mut self, node: u32) -> V {
        let (root, removed) = reclaim(&mut self.arena, self.root, node);
        self.root = root;
        removed.v
    }

    /// Inserts `key` or overwrites the value stored under it.
    ///
    /// Returns the previous value when the key already existed.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.insert_node(key, value).1
    }

    /// Removes `key` and returns its value, or `None` if it is absent.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let node = self.internal_find(key)?;
        if let (Some(l), Some(_)) = (get_l(&self.arena, node), get_r(&self.arena, node)) {
            if let Some(pred) = last(&self.arena, Some(l)) {
                self.node_swap(node, pred);
            }
        }
        self.unlink(node);
        Some(self.reclaim(node))
    }

    /// Cursor at `key`, or the end cursor when the key is absent.
    pub fn find(&self, key: &K) -> Iter<'_, K, V> {
        Iter::new(&self.arena, self.internal_find(key), self.id())
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.internal_find(key).map(|i| &self.arena[i as usize].v)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let i = self.internal_find(key)?;
        Some(self.arena[i as usize].value_mut())
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.internal_find(key).is_some()
    }

    /// Value under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError`] when the key is not in the tree.
    pub fn at(&self, key: &K) -> Result<&V, KeyError> {
        self.get(key).ok_or(KeyError)
    }

    /// Mutable value under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError`] when the key is not in the tree.
    pub fn at_mut(&mut self, key: &K) -> Result<&mut V, KeyError> {
        self.get_mut(key).ok_or(KeyError)
    }

    /// Cursor at the smallest key.
    pub fn begin(&self) -> Iter<'_, K, V> {
        Iter::new(&self.arena, first(&self.arena, self.root), self.id())
    }

    pub fn end(&self) -> Iter<'_, K, V> {
        Iter::new(&self.arena, None, self.id())
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        self.begin()
    }

    /// Drops every node.
    pub fn clear(&mut self) {
        tracing::trace!(nodes = size(&self.arena, self.root), "clearing tree");
        self.arena.clear();
        self.root = None;
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn height(&self) -> usize {
        height(&self.arena, self.root)
    }

    /// Whether the heights of the two subtrees of every node differ by at most one.
    pub fn is_balanced(&self) -> bool {
        is_height_balanced(&self.arena, self.root)
    }

    pub fn root(&self) -> Option<u32> {
        self.root
    }

    /// Node behind a handle.
    ///
    /// # Panics
    ///
    /// Panics if the handle does not belong to this tree.
    pub fn node(&self, idx: u32) -> &TreeNode<K, V> {
        &self.arena[idx as usize]
    }

    pub fn first(&self) -> Option<u32> {
        first(&self.arena, self.root)
    }

    pub fn last(&self) -> Option<u32> {
        last(&self.arena, self.root)
    }

    /// In-order predecessor of the node behind `idx`.
    pub fn predecessor(&self, idx: u32) -> Option<u32> {
        prev(&self.arena, idx)
    }

    /// In-order successor of the node behind `idx`.
    pub fn successor(&self, idx: u32) -> Option<u32> {
        next(&self.arena, idx)
    }

    pub fn key(&self, idx: u32) -> &K {
        &self.arena[idx as usize].k
    }

    pub fn value(&self, idx: u32) -> &V {
        &self.arena[idx as usize].v
    }

    pub fn assert_valid(&self) -> Result<(), String> {
        assert_bst(&self.arena, self.root, &self.comparator)
    }

    pub(crate) fn dump<F>(&self, name: &str, label: F) -> String
    where
        K: Debug,
        V: Debug,
        F: Fn(u32, &TreeNode<K, V>) -> String,
    {
        match self.root {
            Some(root) => format!(
                "{name}\n└─ {}",
                print_node(&self.arena, root, "   ", &label)
            ),
            None => format!("{name} ∅"),
        }
    }

    /// Debug dump of the tree shape.
    pub fn print(&self) -> String
    where
        K: Debug,
        V: Debug,
    {
        self.dump("BinarySearchTree", |_, n| format!("{:?} = {:?}", n.k, n.v))
    }
}

impl<'a, K, V, C> IntoIterator for &'a BinarySearchTree<K, V, C>
where
    C: Fn(&K, &K) -> i32,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, C> Index<&K> for BinarySearchTree<K, V, C>
where
    C: Fn(&K, &K) -> i32,
{
    type Output = V;

    fn index(&self, key: &K) -> &V {
        match self.at(key) {
            Ok(v) => v,
            Err(e) => panic!("{e}"),
        }
    }
}

impl<K: Debug, V: Debug, C> Display for BinarySearchTree<K, V, C>
where
    C: Fn(&K, &K) -> i32,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.print())
    }
}

impl<K: Debug, V: Debug, C> Debug for BinarySearchTree<K, V, C>
where
    C: Fn(&K, &K) -> i32,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Comparator;

    fn tree(keys: &[i32]) -> BinarySearchTree<i32, i32> {
        let mut t = BinarySearchTree::new();
        for &k in keys {
            t.insert(k, k * 10);
        }
        t
    }

    fn keys(t: &BinarySearchTree<i32, i32>) -> Vec<i32> {
        t.iter().map(|(k, _)| *k).collect()
    }

    #[test]
    fn insert_builds_unbalanced_chain() {
        let t = tree(&[1, 2, 3, 4]);
        assert_eq!(keys(&t), vec![1, 2, 3, 4]);
        assert_eq!(t.height(), 4);
        assert!(!t.is_balanced());
        assert_eq!(t.key(t.root().unwrap()), &1);
        t.assert_valid().unwrap();
    }

    #[test]
    fn insert_existing_overwrites_value_only() {
        let mut t = tree(&[5, 3, 8]);
        let root = t.root();
        assert_eq!(t.insert(3, 99), Some(30));
        assert_eq!(t.len(), 3);
        assert_eq!(t.root(), root);
        assert_eq!(t.get(&3), Some(&99));
    }

    #[test]
    fn remove_leaf_single_child_and_two_children() {
        //        5
        //      /   \
        //     3     8
        //    / \     \
        //   1   4     9
        let mut t = tree(&[5, 3, 8, 1, 4, 9]);

        assert_eq!(t.remove(&1), Some(10));
        assert_eq!(keys(&t), vec![3, 4, 5, 8, 9]);
        t.assert_valid().unwrap();

        assert_eq!(t.remove(&8), Some(80));
        assert_eq!(keys(&t), vec![3, 4, 5, 9]);
        t.assert_valid().unwrap();

        // Root with two children: predecessor 4 takes its place.
        assert_eq!(t.remove(&5), Some(50));
        assert_eq!(t.key(t.root().unwrap()), &4);
        assert_eq!(keys(&t), vec![3, 4, 9]);
        t.assert_valid().unwrap();

        assert_eq!(t.remove(&5), None);
    }

    #[test]
    fn remove_two_children_with_adjacent_predecessor() {
        let mut t = tree(&[5, 3, 8]);
        assert_eq!(t.remove(&5), Some(50));
        let root = t.root().unwrap();
        assert_eq!(t.key(root), &3);
        assert_eq!(t.node(root).r.map(|i| *t.key(i)), Some(8));
        assert_eq!(t.node(root).l, None);
        t.assert_valid().unwrap();
    }

    #[test]
    fn remove_last_node_empties_tree() {
        let mut t = tree(&[1]);
        assert_eq!(t.remove(&1), Some(10));
        assert!(t.is_empty());
        assert_eq!(t.height(), 0);
        assert_eq!(t.begin(), t.end());
    }

    #[test]
    fn neighbours_walk_to_boundaries() {
        let t = tree(&[4, 2, 6, 1, 3, 5, 7]);
        let first = t.first().unwrap();
        assert_eq!(t.key(first), &1);
        assert_eq!(t.predecessor(first), None);
        let last = t.last().unwrap();
        assert_eq!(t.key(last), &7);
        assert_eq!(t.successor(last), None);

        let three = t.find(&3).position().unwrap();
        assert_eq!(t.successor(three).map(|i| *t.key(i)), Some(4));
        let five = t.find(&5).position().unwrap();
        assert_eq!(t.predecessor(five).map(|i| *t.key(i)), Some(4));
    }

    #[test]
    fn find_and_indexed_access_have_distinct_missing_contracts() {
        let mut t = tree(&[2, 1, 3]);
        assert_eq!(t.find(&4), t.end());
        assert_eq!(t.find(&2).get(), Some((&2, &20)));
        assert_eq!(t.at(&4), Err(KeyError));
        assert_eq!(t[&3], 30);
        *t.at_mut(&3).unwrap() = 31;
        assert_eq!(t.at(&3), Ok(&31));
    }

    #[test]
    #[should_panic(expected = "Invalid key")]
    fn index_panics_on_missing_key() {
        let t = tree(&[1]);
        let _ = t[&2];
    }

    #[test]
    fn find_cursor_continues_in_order() {
        let t = tree(&[4, 2, 6, 1, 3, 5, 7]);
        let rest: Vec<i32> = t.find(&3).map(|(k, _)| *k).collect();
        assert_eq!(rest, vec![3, 4, 5, 6, 7]);
    }

    #[test]
    fn clear_resets_tree() {
        let mut t = tree(&[3, 1, 2]);
        t.clear();
        assert!(t.is_empty());
        assert_eq!(t.len(), 0);
        assert_eq!(t.iter().count(), 0);
        t.insert(7, 70);
        assert_eq!(keys(&t), vec![7]);
    }

    #[test]
    fn print_dumps_shape() {
        let t = tree(&[2, 1, 3]);
        assert_eq!(
            t.print(),
            "BinarySearchTree\n└─ 2 = 20\n   ├─ 1 = 10\n   └─ 3 = 30"
        );
        assert_eq!(BinarySearchTree::<i32, i32>::new().print(), "BinarySearchTree ∅");
        assert_eq!(format!("{t:?}"), "{1: 10, 2: 20, 3: 30}");
    }

    #[test]
    fn custom_comparator_reverses_order() {
        let mut t = BinarySearchTree::with_comparator(|a: &i32, b: &i32| b.cmp(a) as i32);
        for k in [1, 3, 2] {
            t.insert(k, ());
        }
        let keys: Vec<i32> = t.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec![3, 2, 1]);
    }

    #[test]
    fn default_comparator_type_names_the_tree() {
        let mut t: BinarySearchTree<i32, (), Comparator<i32>> = BinarySearchTree::default();
        t.insert(2, ());
        t.insert(1, ());
        assert_eq!(t.first().map(|i| *t.key(i)), Some(1));
    }

    #[test]
    fn cursors_from_different_trees_never_compare_equal() {
        let a = BinarySearchTree::<i32, i32>::new();
        let b = BinarySearchTree::<i32, i32>::new();
        assert_eq!(a.end(), a.end());
        assert_eq!(a.begin(), a.end());
        assert_ne!(a.end(), b.end());

        let c = tree(&[1, 2]);
        let d = tree(&[1, 2]);
        assert_eq!(c.find(&1), c.begin());
        assert_ne!(c.find(&1), d.find(&1));
    }
}

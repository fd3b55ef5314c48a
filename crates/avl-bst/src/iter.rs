use std::iter::FusedIterator;

use crate::tree_node::TreeNode;
use crate::util::next;

/// In-order cursor over a tree.
///
/// A cursor either points at a node or is the end cursor. Iterating yields the
/// current entry and then moves to its in-order successor; once past the last
/// entry the cursor compares equal to the tree's `end()`.
///
/// Cursors compare equal only when they come from the same tree and sit on
/// the same node.
pub struct Iter<'a, K, V> {
    arena: &'a [TreeNode<K, V>],
    curr: Option<u32>,
    owner: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    /// `owner` is the address of the tree the cursor borrows from.
    pub(crate) fn new(arena: &'a [TreeNode<K, V>], curr: Option<u32>, owner: usize) -> Self {
        Self { arena, curr, owner }
    }

    /// Entry under the cursor without advancing.
    pub fn get(&self) -> Option<(&'a K, &'a V)> {
        self.curr.map(|i| {
            let n = &self.arena[i as usize];
            (&n.k, &n.v)
        })
    }

    pub fn key(&self) -> Option<&'a K> {
        self.get().map(|(k, _)| k)
    }

    pub fn value(&self) -> Option<&'a V> {
        self.get().map(|(_, v)| v)
    }

    /// Handle of the node under the cursor.
    pub fn position(&self) -> Option<u32> {
        self.curr
    }

    pub fn is_end(&self) -> bool {
        self.curr.is_none()
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let out = self.get()?;
        self.curr = self.curr.and_then(|i| next(self.arena, i));
        Some(out)
    }
}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            arena: self.arena,
            curr: self.curr,
            owner: self.owner,
        }
    }
}

impl<K, V> PartialEq for Iter<'_, K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.curr == other.curr && self.owner == other.owner
    }
}

impl<K, V> Eq for Iter<'_, K, V> {}

impl<K, V> std::fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Iter").field("curr", &self.curr).finish()
    }
}

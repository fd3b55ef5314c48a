//! Node trait definitions.
//!
//! Every "pointer" between nodes is an `Option<u32>` index into the
//! `Vec`-backed arena owned by the tree. All tree-manipulation functions take
//! the arena as a slice (or `&mut Vec<N>` when they allocate or free) and work
//! with indices.

/// Structural links (`p`, `l`, `r`).
pub trait Node {
    fn p(&self) -> Option<u32>;
    fn l(&self) -> Option<u32>;
    fn r(&self) -> Option<u32>;
    fn set_p(&mut self, v: Option<u32>);
    fn set_l(&mut self, v: Option<u32>);
    fn set_r(&mut self, v: Option<u32>);
}

/// Default comparator type of the trees.
///
/// Returns a negative number when `a < b`, zero when equal and a positive
/// number when `a > b`. Any `Fn(&K, &K) -> i32` closure can stand in through
/// `with_comparator`.
pub type Comparator<K> = fn(&K, &K) -> i32;

/// Key/value node interface.
pub trait KvNode<K, V>: Node {
    fn key(&self) -> &K;
    fn value(&self) -> &V;
    fn value_mut(&mut self) -> &mut V;
    fn set_value(&mut self, value: V) -> V;
}

/// Node carrying an AVL balance factor, `height(right) - height(left)`.
pub trait BalancedNode<K, V>: KvNode<K, V> {
    fn balance(&self) -> i8;
    fn set_balance(&mut self, balance: i8);

    fn update_balance(&mut self, diff: i8) {
        let balance = self.balance() + diff;
        self.set_balance(balance);
    }
}

/// Comparator derived from `PartialOrd`.
pub fn default_comparator<K: PartialOrd>(a: &K, b: &K) -> i32 {
    if a == b {
        0
    } else if a < b {
        -1
    } else {
        1
    }
}

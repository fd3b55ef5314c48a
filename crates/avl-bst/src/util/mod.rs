//! Link-level utility functions over a node arena.
//!
//! Functions that can change the root take the current root and return the
//! new one, so callers never keep a stale root handle.

pub mod print;
pub mod swap;

use crate::types::{KvNode, Node};

pub use print::print_node;
pub use swap::swap;

#[inline]
pub(crate) fn get_p<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].p()
}

#[inline]
pub(crate) fn get_l<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].l()
}

#[inline]
pub(crate) fn get_r<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].r()
}

#[inline]
pub(crate) fn set_p<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_p(v);
}

#[inline]
pub(crate) fn set_l<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_l(v);
}

#[inline]
pub(crate) fn set_r<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_r(v);
}

/// Points `parent`'s link that currently holds `old` at `new` instead.
#[inline]
pub(crate) fn replace_child<N: Node>(arena: &mut [N], parent: u32, old: u32, new: Option<u32>) {
    if get_l(arena, parent) == Some(old) {
        set_l(arena, parent, new);
    } else if get_r(arena, parent) == Some(old) {
        set_r(arena, parent, new);
    }
}

/// Leftmost node in the tree.
pub fn first<N: Node>(arena: &[N], root: Option<u32>) -> Option<u32> {
    let mut curr = root?;
    while let Some(l) = get_l(arena, curr) {
        curr = l;
    }
    Some(curr)
}

/// Rightmost node in the tree.
pub fn last<N: Node>(arena: &[N], root: Option<u32>) -> Option<u32> {
    let mut curr = root?;
    while let Some(r) = get_r(arena, curr) {
        curr = r;
    }
    Some(curr)
}

/// In-order successor.
pub fn next<N: Node>(arena: &[N], mut curr: u32) -> Option<u32> {
    if let Some(r) = get_r(arena, curr) {
        return first(arena, Some(r));
    }
    let mut p = get_p(arena, curr);
    while let Some(pi) = p {
        if get_r(arena, pi) == Some(curr) {
            curr = pi;
            p = get_p(arena, pi);
        } else {
            return Some(pi);
        }
    }
    None
}

/// In-order predecessor.
pub fn prev<N: Node>(arena: &[N], mut curr: u32) -> Option<u32> {
    if let Some(l) = get_l(arena, curr) {
        return last(arena, Some(l));
    }
    let mut p = get_p(arena, curr);
    while let Some(pi) = p {
        if get_l(arena, pi) == Some(curr) {
            curr = pi;
            p = get_p(arena, pi);
        } else {
            return Some(pi);
        }
    }
    None
}

/// Finds a node by key.
pub fn find<K, V, N, C>(arena: &[N], root: Option<u32>, key: &K, comparator: &C) -> Option<u32>
where
    N: KvNode<K, V>,
    C: Fn(&K, &K) -> i32,
{
    let mut curr = root;
    while let Some(i) = curr {
        let cmp = comparator(key, arena[i as usize].key());
        if cmp == 0 {
            return Some(i);
        }
        curr = if cmp < 0 {
            get_l(arena, i)
        } else {
            get_r(arena, i)
        };
    }
    None
}

fn size_inner<N: Node>(arena: &[N], root: u32) -> usize {
    1 + get_l(arena, root).map_or(0, |l| size_inner(arena, l))
        + get_r(arena, root).map_or(0, |r| size_inner(arena, r))
}

/// Number of nodes under `root`.
pub fn size<N: Node>(arena: &[N], root: Option<u32>) -> usize {
    root.map_or(0, |r| size_inner(arena, r))
}

/// Height of the subtree under `root`; an empty tree has height 0.
pub fn height<N: Node>(arena: &[N], root: Option<u32>) -> usize {
    root.map_or(0, |i| {
        1 + height(arena, get_l(arena, i)).max(height(arena, get_r(arena, i)))
    })
}

/// Height of the subtree if every node in it is height-balanced.
fn balanced_height<N: Node>(arena: &[N], root: Option<u32>) -> Option<usize> {
    let Some(i) = root else {
        return Some(0);
    };
    let lh = balanced_height(arena, get_l(arena, i))?;
    let rh = balanced_height(arena, get_r(arena, i))?;
    if lh.abs_diff(rh) > 1 {
        return None;
    }
    Some(1 + lh.max(rh))
}

/// Whether `|height(l) - height(r)| <= 1` holds at every node.
///
/// Computed from the actual shape; stored balance factors are ignored.
pub fn is_height_balanced<N: Node>(arena: &[N], root: Option<u32>) -> bool {
    balanced_height(arena, root).is_some()
}

/// Moves `child` into its parent's position.
///
/// The parent is left dangling: its own links are not touched.
pub fn promote<N: Node>(arena: &mut [N], root: Option<u32>, child: u32) -> Option<u32> {
    let Some(parent) = get_p(arena, child) else {
        return root;
    };
    let gparent = get_p(arena, parent);
    set_p(arena, child, gparent);
    match gparent {
        Some(g) => {
            replace_child(arena, g, parent, Some(child));
            root
        }
        None => Some(child),
    }
}

/// Detaches `node`, which must have at most one child, from the tree.
///
/// A leaf is unlinked from its parent (or empties the tree when it is the
/// root); a node with one child has that child promoted into its place.
pub fn unlink<N: Node>(arena: &mut [N], root: Option<u32>, node: u32) -> Option<u32> {
    let p = get_p(arena, node);
    let child = get_l(arena, node).or(get_r(arena, node));
    let root = match (child, p) {
        (Some(c), _) => promote(arena, root, c),
        (None, Some(p)) => {
            replace_child(arena, p, node, None);
            root
        }
        (None, None) => None,
    };
    set_p(arena, node, None);
    set_l(arena, node, None);
    set_r(arena, node, None);
    root
}

/// Frees the slot of an already detached `node`.
///
/// The arena stays dense: the last node is moved into the freed slot and every
/// link to it (parent, children, root) is rewritten.
pub fn reclaim<N: Node>(arena: &mut Vec<N>, root: Option<u32>, node: u32) -> (Option<u32>, N) {
    let moved = (arena.len() - 1) as u32;
    let removed = arena.swap_remove(node as usize);
    if moved == node {
        return (root, removed);
    }

    if let Some(p) = get_p(arena, node) {
        replace_child(arena, p, moved, Some(node));
    }
    if let Some(l) = get_l(arena, node) {
        set_p(arena, l, Some(node));
    }
    if let Some(r) = get_r(arena, node) {
        set_p(arena, r, Some(node));
    }
    let root = if root == Some(moved) { Some(node) } else { root };
    (root, removed)
}

/// Checks parent/child link symmetry and strict in-order key ordering.
pub fn assert_bst<K, V, N, C>(arena: &[N], root: Option<u32>, comparator: &C) -> Result<(), String>
where
    N: KvNode<K, V>,
    C: Fn(&K, &K) -> i32,
{
    let Some(root) = root else {
        return Ok(());
    };

    if get_p(arena, root).is_some() {
        return Err("Root has parent".to_string());
    }

    fn validate_links<N: Node>(arena: &[N], node: u32, seen: &mut usize) -> Result<(), String> {
        *seen += 1;
        if *seen > arena.len() {
            return Err("Cycle detected".to_string());
        }
        if let Some(l) = get_l(arena, node) {
            if get_p(arena, l) != Some(node) {
                return Err(format!("Broken parent link on left child of node {node}"));
            }
            validate_links(arena, l, seen)?;
        }
        if let Some(r) = get_r(arena, node) {
            if get_p(arena, r) != Some(node) {
                return Err(format!("Broken parent link on right child of node {node}"));
            }
            validate_links(arena, r, seen)?;
        }
        Ok(())
    }

    let mut seen = 0;
    validate_links(arena, root, &mut seen)?;
    if seen != arena.len() {
        return Err(format!(
            "Reachable node count {seen} does not match arena size {}",
            arena.len()
        ));
    }

    let mut curr = first(arena, Some(root));
    let mut prev_node: Option<u32> = None;
    while let Some(i) = curr {
        if let Some(prev) = prev_node {
            if comparator(arena[prev as usize].key(), arena[i as usize].key()) >= 0 {
                return Err("Node order violated".to_string());
            }
        }
        prev_node = Some(i);
        curr = next(arena, i);
    }

    Ok(())
}

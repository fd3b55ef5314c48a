//! AVL rotations and fix-up ascents over a node arena.
//!
//! Balance factors are `height(right) - height(left)`. Rotations only move
//! links; the fix-up routines set every balance a rotation affects.
//! Functions that may move the root take the current root and return the new
//! one.

use crate::types::BalancedNode;
use crate::util::{get_l, get_p, get_r, height, replace_child, set_l, set_p, set_r};

#[inline]
fn bal<K, V, N>(arena: &[N], i: u32) -> i8
where
    N: BalancedNode<K, V>,
{
    arena[i as usize].balance()
}

#[inline]
fn set_bal<K, V, N>(arena: &mut [N], i: u32, v: i8)
where
    N: BalancedNode<K, V>,
{
    arena[i as usize].set_balance(v);
}

/// Side of `node` under its parent: `-1` left, `1` right, `0` for the root.
#[inline]
fn side<K, V, N>(arena: &[N], node: u32) -> i8
where
    N: BalancedNode<K, V>,
{
    match get_p(arena, node) {
        Some(p) if get_l(arena, p) == Some(node) => -1,
        Some(_) => 1,
        None => 0,
    }
}

/// Moves `axis`'s right child into `axis`'s position.
pub fn rotate_left<K, V, N>(arena: &mut [N], root: Option<u32>, axis: u32) -> Option<u32>
where
    N: BalancedNode<K, V>,
{
    let Some(child) = get_r(arena, axis) else {
        return root;
    };
    let gparent = get_p(arena, axis);
    let inner = get_l(arena, child);

    set_p(arena, child, gparent);
    let root = match gparent {
        Some(g) => {
            replace_child(arena, g, axis, Some(child));
            root
        }
        None => Some(child),
    };

    set_r(arena, axis, inner);
    if let Some(inner) = inner {
        set_p(arena, inner, Some(axis));
    }
    set_l(arena, child, Some(axis));
    set_p(arena, axis, Some(child));

    tracing::trace!(axis, child, "rotate left");
    root
}

/// Moves `axis`'s left child into `axis`'s position.
pub fn rotate_right<K, V, N>(arena: &mut [N], root: Option<u32>, axis: u32) -> Option<u32>
where
    N: BalancedNode<K, V>,
{
    let Some(child) = get_l(arena, axis) else {
        return root;
    };
    let gparent = get_p(arena, axis);
    let inner = get_r(arena, child);

    set_p(arena, child, gparent);
    let root = match gparent {
        Some(g) => {
            replace_child(arena, g, axis, Some(child));
            root
        }
        None => Some(child),
    };

    set_l(arena, axis, inner);
    if let Some(inner) = inner {
        set_p(arena, inner, Some(axis));
    }
    set_r(arena, child, Some(axis));
    set_p(arena, axis, Some(child));

    tracing::trace!(axis, child, "rotate right");
    root
}

/// Single rotation that lifts the child on side `dir` (`-1` left, `1` right).
#[inline]
fn rotate_up<K, V, N>(arena: &mut [N], root: Option<u32>, axis: u32, dir: i8) -> Option<u32>
where
    N: BalancedNode<K, V>,
{
    if dir < 0 {
        rotate_right(arena, root, axis)
    } else {
        rotate_left(arena, root, axis)
    }
}

/// Attaches the balance change of a freshly inserted leaf `child` to `parent`.
pub fn insert_leaf<K, V, N>(arena: &mut [N], root: Option<u32>, parent: u32, child: u32) -> Option<u32>
where
    N: BalancedNode<K, V>,
{
    let diff = side(arena, child);
    arena[parent as usize].update_balance(diff);
    if bal(arena, parent) == 0 {
        return root;
    }
    insert_fix(arena, root, parent, child)
}

/// Restores the AVL invariant after `parent`'s subtree grew by one level
/// through `child`.
pub fn insert_fix<K, V, N>(arena: &mut [N], root: Option<u32>, parent: u32, child: u32) -> Option<u32>
where
    N: BalancedNode<K, V>,
{
    let Some(gparent) = get_p(arena, parent) else {
        return root;
    };
    let dir = side(arena, parent);
    arena[gparent as usize].update_balance(dir);

    match bal(arena, gparent) {
        0 => root,
        -1 | 1 => insert_fix(arena, root, gparent, parent),
        _ => {
            if bal(arena, parent) == dir {
                // zig-zig
                let root = rotate_up(arena, root, gparent, dir);
                set_bal(arena, gparent, 0);
                set_bal(arena, parent, 0);
                root
            } else {
                // zig-zag: child is parent's inner child
                let root = rotate_up(arena, root, parent, -dir);
                let root = rotate_up(arena, root, gparent, dir);
                let (pb, gb) = match bal(arena, child) {
                    b if b == dir => (0, -dir),
                    0 => (0, 0),
                    _ => (dir, 0),
                };
                set_bal(arena, parent, pb);
                set_bal(arena, gparent, gb);
                set_bal(arena, child, 0);
                root
            }
        }
    }
}

/// Restores the AVL invariant after the subtree of `node` on one side lost a
/// level.
///
/// `diff` is `1` when the shrunk subtree is the left one and `-1` when it is
/// the right one.
pub fn remove_fix<K, V, N>(arena: &mut [N], root: Option<u32>, node: Option<u32>, diff: i8) -> Option<u32>
where
    N: BalancedNode<K, V>,
{
    let Some(n) = node else {
        return root;
    };
    let p = get_p(arena, n);
    // Removing from the left raises the balance, so a left child reports +1.
    let ndiff = -side(arena, n);

    let b = bal(arena, n) + diff;
    match b {
        -1 | 1 => {
            set_bal(arena, n, b);
            root
        }
        0 => {
            set_bal(arena, n, 0);
            remove_fix(arena, root, p, ndiff)
        }
        _ => {
            let s = b.signum();
            let taller = if s < 0 { get_l(arena, n) } else { get_r(arena, n) };
            let Some(c) = taller else {
                return root;
            };
            let cb = bal(arena, c);
            if cb == s {
                // zig-zig, subtree height still shrinks
                let root = rotate_up(arena, root, n, s);
                set_bal(arena, n, 0);
                set_bal(arena, c, 0);
                remove_fix(arena, root, p, ndiff)
            } else if cb == 0 {
                // zig-zig, subtree height unchanged
                let root = rotate_up(arena, root, n, s);
                set_bal(arena, n, s);
                set_bal(arena, c, -s);
                tracing::trace!(n, "remove fix stopped after rotation");
                root
            } else {
                // zig-zag
                let inner = if s < 0 { get_r(arena, c) } else { get_l(arena, c) };
                let Some(g) = inner else {
                    return root;
                };
                let root = rotate_up(arena, root, c, -s);
                let root = rotate_up(arena, root, n, s);
                let (nb, cb) = match bal(arena, g) {
                    gb if gb == -s => (0, s),
                    0 => (0, 0),
                    _ => (-s, 0),
                };
                set_bal(arena, n, nb);
                set_bal(arena, c, cb);
                set_bal(arena, g, 0);
                remove_fix(arena, root, p, ndiff)
            }
        }
    }
}

/// Exchanges two nodes' positions together with their balance factors.
pub fn swap<K, V, N>(arena: &mut [N], root: Option<u32>, x: u32, y: u32) -> Option<u32>
where
    N: BalancedNode<K, V>,
{
    let root = crate::util::swap(arena, root, x, y);
    let xb = bal(arena, x);
    set_bal(arena, x, bal(arena, y));
    set_bal(arena, y, xb);
    root
}

/// Checks that every stored balance equals the actual height difference and
/// lies in `-1..=1`.
pub fn assert_avl_balance<K, V, N>(arena: &[N], root: Option<u32>) -> Result<(), String>
where
    N: BalancedNode<K, V>,
{
    let Some(node) = root else {
        return Ok(());
    };
    let l = get_l(arena, node);
    let r = get_r(arena, node);
    assert_avl_balance(arena, l)?;
    assert_avl_balance(arena, r)?;

    let expected = height(arena, r) as i64 - height(arena, l) as i64;
    let actual = bal(arena, node);
    if i64::from(actual) != expected {
        return Err(format!(
            "Balance factor mismatch at node {node}: expected {expected}, got {actual}"
        ));
    }
    if !(-1..=1).contains(&actual) {
        return Err(format!("AVL balance violated at node {node}: {actual}"));
    }
    Ok(())
}

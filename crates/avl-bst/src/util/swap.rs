use crate::types::Node;

use super::{get_l, get_p, get_r, set_l, set_p, set_r};

/// Links of one node: parent, left, right.
type Links = (Option<u32>, Option<u32>, Option<u32>);

fn links<N: Node>(arena: &[N], i: u32) -> Links {
    (get_p(arena, i), get_l(arena, i), get_r(arena, i))
}

/// Which side of its parent `i` hangs on: `Some(true)` left, `Some(false)`
/// right, `None` for the root.
fn hangs_left<N: Node>(arena: &[N], i: u32) -> Option<bool> {
    get_p(arena, i).map(|p| get_l(arena, p) == Some(i))
}

/// Exchanges the tree positions of `x` and `y`.
///
/// Parent/child links and root status move; whatever the nodes store stays
/// with their handles. Works when one node is the direct parent of the other
/// and when both share a parent.
pub fn swap<N: Node>(arena: &mut [N], root: Option<u32>, x: u32, y: u32) -> Option<u32> {
    if x == y {
        return root;
    }

    let (xp, xl, xr) = links(arena, x);
    let (yp, yl, yr) = links(arena, y);
    let x_left = hangs_left(arena, x);
    let y_left = hangs_left(arena, y);

    // A link to one of the pair now points at the other.
    let flip = |h: Option<u32>| match h {
        Some(h) if h == x => Some(y),
        Some(h) if h == y => Some(x),
        h => h,
    };

    for (node, (p, l, r)) in [(x, (yp, yl, yr)), (y, (xp, xl, xr))] {
        set_p(arena, node, flip(p));
        set_l(arena, node, flip(l));
        set_r(arena, node, flip(r));
    }

    // Outside neighbours: children re-parent, parents re-point.
    for (new, kids) in [(y, [xl, xr]), (x, [yl, yr])] {
        for kid in kids.into_iter().flatten() {
            if kid != x && kid != y {
                set_p(arena, kid, Some(new));
            }
        }
    }
    for (new, parent, left) in [(y, xp, x_left), (x, yp, y_left)] {
        match (parent, left) {
            (Some(p), Some(true)) if p != x && p != y => set_l(arena, p, Some(new)),
            (Some(p), Some(false)) if p != x && p != y => set_r(arena, p, Some(new)),
            _ => {}
        }
    }

    tracing::trace!(x, y, "swapped node positions");
    flip(root)
}

use crate::types::Node;

/// Dumps the subtree under `node`, labelling each node with `label`.
///
/// Children go on their own lines under `tab`, left first with `├─` and
/// right with `└─`. A leaf prints only its label; an absent child of a node
/// that has the other child is shown as `∅` so left and right stay
/// distinguishable.
pub fn print_node<N, F>(arena: &[N], node: u32, tab: &str, label: &F) -> String
where
    N: Node,
    F: Fn(u32, &N) -> String,
{
    let n = &arena[node as usize];
    let mut out = label(node, n);
    if n.l().is_none() && n.r().is_none() {
        return out;
    }

    for (child, branch, rail) in [(n.l(), "├─", "│"), (n.r(), "└─", " ")] {
        let body = match child {
            Some(c) => print_node(arena, c, &format!("{tab}{rail}  "), label),
            None => "∅".to_string(),
        };
        out.push('\n');
        out.push_str(tab);
        out.push_str(branch);
        out.push(' ');
        out.push_str(&body);
    }
    out
}

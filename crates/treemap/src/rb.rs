//! Red-black rebalancing: rotations, insertion fix-up, deletion fix-up,
//! and a structural validator used by tests.
//!
//! Invariants enforced here:
//! - the root is black (or the tree is empty);
//! - no red node has a red child;
//! - every path from a node to an absent-child position passes the same
//!   number of black nodes.

use std::cmp::Ordering;

use crate::navigate;
use crate::node::{color, left, parent, right, set_color, Color, NodeArena};

/// Left rotation around `p`. Re-points the pivot's former parent, or the
/// root if the pivot was the root.
pub(crate) fn rotate_left<K, V>(arena: &mut NodeArena<K, V>, root: &mut Option<u32>, p: u32) {
    let r = arena.node(p).r.expect("left rotation pivot has a right child");
    let rl = arena.node(r).l;

    arena.node_mut(p).r = rl;
    if let Some(rl) = rl {
        arena.node_mut(rl).p = Some(p);
    }

    let pp = arena.node(p).p;
    arena.node_mut(r).p = pp;
    match pp {
        None => *root = Some(r),
        Some(pp) => {
            if arena.node(pp).l == Some(p) {
                arena.node_mut(pp).l = Some(r);
            } else {
                arena.node_mut(pp).r = Some(r);
            }
        }
    }

    arena.node_mut(r).l = Some(p);
    arena.node_mut(p).p = Some(r);
}

/// Right rotation around `p`.
pub(crate) fn rotate_right<K, V>(arena: &mut NodeArena<K, V>, root: &mut Option<u32>, p: u32) {
    let l = arena.node(p).l.expect("right rotation pivot has a left child");
    let lr = arena.node(l).r;

    arena.node_mut(p).l = lr;
    if let Some(lr) = lr {
        arena.node_mut(lr).p = Some(p);
    }

    let pp = arena.node(p).p;
    arena.node_mut(l).p = pp;
    match pp {
        None => *root = Some(l),
        Some(pp) => {
            if arena.node(pp).r == Some(p) {
                arena.node_mut(pp).r = Some(l);
            } else {
                arena.node_mut(pp).l = Some(l);
            }
        }
    }

    arena.node_mut(l).r = Some(p);
    arena.node_mut(p).p = Some(l);
}

/// Restores the red-black invariants after attaching the red node `x`.
///
/// While the parent is red, the uncle's color decides between a recolor
/// step (red uncle, continue from the grandparent) and one or two rotations
/// (black uncle, terminating). The two symmetric sides mirror each other.
pub(crate) fn fix_after_insertion<K, V>(
    arena: &mut NodeArena<K, V>,
    root: &mut Option<u32>,
    mut x: u32,
) {
    arena.node_mut(x).color = Color::Red;

    while Some(x) != *root && color(arena, parent(arena, Some(x))) == Color::Red {
        let p = parent(arena, Some(x));
        let g = parent(arena, p);
        if p == left(arena, g) {
            let u = right(arena, g);
            if color(arena, u) == Color::Red {
                set_color(arena, p, Color::Black);
                set_color(arena, u, Color::Black);
                set_color(arena, g, Color::Red);
                x = g.expect("red parent implies a grandparent");
            } else {
                if Some(x) == right(arena, p) {
                    x = p.expect("red parent exists");
                    rotate_left(arena, root, x);
                }
                let p = parent(arena, Some(x));
                let g = parent(arena, p);
                set_color(arena, p, Color::Black);
                set_color(arena, g, Color::Red);
                if let Some(g) = g {
                    rotate_right(arena, root, g);
                }
            }
        } else {
            let u = left(arena, g);
            if color(arena, u) == Color::Red {
                set_color(arena, p, Color::Black);
                set_color(arena, u, Color::Black);
                set_color(arena, g, Color::Red);
                x = g.expect("red parent implies a grandparent");
            } else {
                if Some(x) == left(arena, p) {
                    x = p.expect("red parent exists");
                    rotate_right(arena, root, x);
                }
                let p = parent(arena, Some(x));
                let g = parent(arena, p);
                set_color(arena, p, Color::Black);
                set_color(arena, g, Color::Red);
                if let Some(g) = g {
                    rotate_left(arena, root, g);
                }
            }
        }
    }

    set_color(arena, *root, Color::Black);
}

/// Resolves the double-black deficiency at `x` after unlinking a black node.
///
/// `x` is either the spliced-in replacement or, for a childless removal, the
/// node itself acting as a phantom position before it is unlinked.
pub(crate) fn fix_after_deletion<K, V>(
    arena: &mut NodeArena<K, V>,
    root: &mut Option<u32>,
    mut x: u32,
) {
    while Some(x) != *root && color(arena, Some(x)) == Color::Black {
        let p = parent(arena, Some(x));
        if Some(x) == left(arena, p) {
            let mut sib = right(arena, p);

            if color(arena, sib) == Color::Red {
                set_color(arena, sib, Color::Black);
                set_color(arena, p, Color::Red);
                rotate_left(arena, root, p.expect("non-root node has a parent"));
                sib = right(arena, parent(arena, Some(x)));
            }

            if color(arena, left(arena, sib)) == Color::Black
                && color(arena, right(arena, sib)) == Color::Black
            {
                set_color(arena, sib, Color::Red);
                x = parent(arena, Some(x)).expect("non-root node has a parent");
            } else {
                if color(arena, right(arena, sib)) == Color::Black {
                    set_color(arena, left(arena, sib), Color::Black);
                    set_color(arena, sib, Color::Red);
                    rotate_right(arena, root, sib.expect("sibling exists"));
                    sib = right(arena, parent(arena, Some(x)));
                }
                let p = parent(arena, Some(x));
                set_color(arena, sib, color(arena, p));
                set_color(arena, p, Color::Black);
                set_color(arena, right(arena, sib), Color::Black);
                rotate_left(arena, root, p.expect("non-root node has a parent"));
                x = root.expect("tree is non-empty during fix-up");
            }
        } else {
            let mut sib = left(arena, p);

            if color(arena, sib) == Color::Red {
                set_color(arena, sib, Color::Black);
                set_color(arena, p, Color::Red);
                rotate_right(arena, root, p.expect("non-root node has a parent"));
                sib = left(arena, parent(arena, Some(x)));
            }

            if color(arena, right(arena, sib)) == Color::Black
                && color(arena, left(arena, sib)) == Color::Black
            {
                set_color(arena, sib, Color::Red);
                x = parent(arena, Some(x)).expect("non-root node has a parent");
            } else {
                if color(arena, left(arena, sib)) == Color::Black {
                    set_color(arena, right(arena, sib), Color::Black);
                    set_color(arena, sib, Color::Red);
                    rotate_left(arena, root, sib.expect("sibling exists"));
                    sib = left(arena, parent(arena, Some(x)));
                }
                let p = parent(arena, Some(x));
                set_color(arena, sib, color(arena, p));
                set_color(arena, p, Color::Black);
                set_color(arena, left(arena, sib), Color::Black);
                rotate_right(arena, root, p.expect("non-root node has a parent"));
                x = root.expect("tree is non-empty during fix-up");
            }
        }
    }

    set_color(arena, Some(x), Color::Black);
}

/// Checks the full set of structural invariants, returning a description of
/// the first violation found.
pub(crate) fn assert_red_black_tree<K, V, C>(
    arena: &NodeArena<K, V>,
    root: Option<u32>,
    comparator: &C,
) -> Result<(), String>
where
    C: Fn(&K, &K) -> Ordering,
{
    let Some(root) = root else {
        return Ok(());
    };

    if arena.node(root).p.is_some() {
        return Err("Root has parent".to_string());
    }
    if arena.node(root).color != Color::Black {
        return Err("Root is not black".to_string());
    }

    fn black_height<K, V>(arena: &NodeArena<K, V>, node: Option<u32>) -> Result<usize, String> {
        let Some(node) = node else {
            return Ok(0);
        };

        let l = arena.node(node).l;
        let r = arena.node(node).r;

        if let Some(li) = l {
            if arena.node(li).p != Some(node) {
                return Err("Broken parent link on left child".to_string());
            }
        }
        if let Some(ri) = r {
            if arena.node(ri).p != Some(node) {
                return Err("Broken parent link on right child".to_string());
            }
        }

        if arena.node(node).color == Color::Red {
            if color(arena, l) == Color::Red {
                return Err("Red node has red left child".to_string());
            }
            if color(arena, r) == Color::Red {
                return Err("Red node has red right child".to_string());
            }
        }

        let lh = black_height(arena, l)?;
        let rh = black_height(arena, r)?;
        if lh != rh {
            return Err("Black height mismatch".to_string());
        }

        Ok(lh + usize::from(arena.node(node).color == Color::Black))
    }

    black_height(arena, Some(root))?;

    let mut curr = navigate::first(arena, Some(root));
    let mut prev_node: Option<u32> = None;
    while let Some(i) = curr {
        if let Some(prev) = prev_node {
            if comparator(&arena.node(prev).k, &arena.node(i).k) != Ordering::Less {
                return Err("Node order violated".to_string());
            }
        }
        prev_node = Some(i);
        curr = navigate::next(arena, i);
    }

    Ok(())
}

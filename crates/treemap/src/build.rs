//! Linear-time balanced construction from an already-sorted source.
//!
//! The middle entry of each index range becomes the subtree root, with the
//! halves built recursively. Nodes down to the deepest complete level are
//! black; the single possibly-incomplete bottom level is red, which
//! satisfies all red-black invariants without a rebalancing pass.

use std::cmp::Ordering;

use crate::node::{Color, Node, NodeArena};
use crate::TreeMap;

/// The level at which nodes turn red: the depth of the last full level of
/// a complete binary tree of `n` nodes, `floor(log2(n + 1))`.
fn red_level(n: usize) -> u32 {
    usize::BITS - 1 - (n + 1).leading_zeros()
}

pub(crate) fn build_from_sorted<K, V, C, I>(comparator: C, n: usize, entries: I) -> TreeMap<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
    I: IntoIterator<Item = (K, V)>,
{
    let mut arena = NodeArena::new();
    let mut it = entries.into_iter();
    let root = build(
        &mut arena,
        0,
        0,
        n as i64 - 1,
        red_level(n),
        &mut it,
    );
    TreeMap::from_parts(arena, root, n, comparator)
}

/// Builds the subtree for the inclusive index range `lo..=hi`, consuming
/// entries from `it` in order.
fn build<K, V, I>(
    arena: &mut NodeArena<K, V>,
    level: u32,
    lo: i64,
    hi: i64,
    red_level: u32,
    it: &mut I,
) -> Option<u32>
where
    I: Iterator<Item = (K, V)>,
{
    if hi < lo {
        return None;
    }

    let mid = (lo + hi) / 2;

    let left = build(arena, level + 1, lo, mid - 1, red_level, it);

    let (k, v) = it.next().expect("sorted source ended before `n` entries");
    let mut node = Node::new(k, v);
    node.color = if level == red_level {
        Color::Red
    } else {
        Color::Black
    };
    let idx = arena.alloc(node);

    if let Some(l) = left {
        arena.node_mut(idx).l = Some(l);
        arena.node_mut(l).p = Some(idx);
    }

    let right = build(arena, level + 1, mid + 1, hi, red_level, it);
    if let Some(r) = right {
        arena.node_mut(idx).r = Some(r);
        arena.node_mut(r).p = Some(idx);
    }

    Some(idx)
}

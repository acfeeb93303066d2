//! Tree navigation primitives: extremes, successor/predecessor, exact and
//! relational key lookups. All functions are free functions over the arena.

use std::cmp::Ordering;

use crate::node::NodeArena;

/// Leftmost node under `root`.
pub(crate) fn first<K, V>(arena: &NodeArena<K, V>, root: Option<u32>) -> Option<u32> {
    let mut curr = root?;
    while let Some(l) = arena.node(curr).l {
        curr = l;
    }
    Some(curr)
}

/// Rightmost node under `root`.
pub(crate) fn last<K, V>(arena: &NodeArena<K, V>, root: Option<u32>) -> Option<u32> {
    let mut curr = root?;
    while let Some(r) = arena.node(curr).r {
        curr = r;
    }
    Some(curr)
}

/// In-order successor of `curr`.
pub(crate) fn next<K, V>(arena: &NodeArena<K, V>, mut curr: u32) -> Option<u32> {
    if let Some(r) = arena.node(curr).r {
        let mut c = r;
        while let Some(l) = arena.node(c).l {
            c = l;
        }
        return Some(c);
    }
    let mut p = arena.node(curr).p;
    while let Some(pi) = p {
        if arena.node(pi).r == Some(curr) {
            curr = pi;
            p = arena.node(pi).p;
        } else {
            return Some(pi);
        }
    }
    None
}

/// In-order predecessor of `curr`.
pub(crate) fn prev<K, V>(arena: &NodeArena<K, V>, mut curr: u32) -> Option<u32> {
    if let Some(l) = arena.node(curr).l {
        let mut c = l;
        while let Some(r) = arena.node(c).r {
            c = r;
        }
        return Some(c);
    }
    let mut p = arena.node(curr).p;
    while let Some(pi) = p {
        if arena.node(pi).l == Some(curr) {
            curr = pi;
            p = arena.node(pi).p;
        } else {
            return Some(pi);
        }
    }
    None
}

/// Exact-key lookup.
pub(crate) fn find<K, V, C>(
    arena: &NodeArena<K, V>,
    root: Option<u32>,
    key: &K,
    comparator: &C,
) -> Option<u32>
where
    C: Fn(&K, &K) -> Ordering,
{
    let mut curr = root;
    while let Some(i) = curr {
        curr = match comparator(key, &arena.node(i).k) {
            Ordering::Equal => return Some(i),
            Ordering::Less => arena.node(i).l,
            Ordering::Greater => arena.node(i).r,
        };
    }
    None
}

/// Smallest node with key >= `key`.
///
/// Descends toward the key; when forced the wrong way at a missing right
/// child, walks back up while the current node is a right child.
pub(crate) fn ceiling<K, V, C>(
    arena: &NodeArena<K, V>,
    root: Option<u32>,
    key: &K,
    comparator: &C,
) -> Option<u32>
where
    C: Fn(&K, &K) -> Ordering,
{
    let mut p = root?;
    loop {
        match comparator(key, &arena.node(p).k) {
            Ordering::Less => match arena.node(p).l {
                Some(l) => p = l,
                None => return Some(p),
            },
            Ordering::Greater => match arena.node(p).r {
                Some(r) => p = r,
                None => return ascend_from_right(arena, p),
            },
            Ordering::Equal => return Some(p),
        }
    }
}

/// Smallest node with key > `key`.
pub(crate) fn higher<K, V, C>(
    arena: &NodeArena<K, V>,
    root: Option<u32>,
    key: &K,
    comparator: &C,
) -> Option<u32>
where
    C: Fn(&K, &K) -> Ordering,
{
    let mut p = root?;
    loop {
        match comparator(key, &arena.node(p).k) {
            Ordering::Less => match arena.node(p).l {
                Some(l) => p = l,
                None => return Some(p),
            },
            _ => match arena.node(p).r {
                Some(r) => p = r,
                None => return ascend_from_right(arena, p),
            },
        }
    }
}

/// Largest node with key <= `key`.
pub(crate) fn floor<K, V, C>(
    arena: &NodeArena<K, V>,
    root: Option<u32>,
    key: &K,
    comparator: &C,
) -> Option<u32>
where
    C: Fn(&K, &K) -> Ordering,
{
    let mut p = root?;
    loop {
        match comparator(key, &arena.node(p).k) {
            Ordering::Greater => match arena.node(p).r {
                Some(r) => p = r,
                None => return Some(p),
            },
            Ordering::Less => match arena.node(p).l {
                Some(l) => p = l,
                None => return ascend_from_left(arena, p),
            },
            Ordering::Equal => return Some(p),
        }
    }
}

/// Largest node with key < `key`.
pub(crate) fn lower<K, V, C>(
    arena: &NodeArena<K, V>,
    root: Option<u32>,
    key: &K,
    comparator: &C,
) -> Option<u32>
where
    C: Fn(&K, &K) -> Ordering,
{
    let mut p = root?;
    loop {
        match comparator(key, &arena.node(p).k) {
            Ordering::Greater => match arena.node(p).r {
                Some(r) => p = r,
                None => return Some(p),
            },
            _ => match arena.node(p).l {
                Some(l) => p = l,
                None => return ascend_from_left(arena, p),
            },
        }
    }
}

fn ascend_from_right<K, V>(arena: &NodeArena<K, V>, mut ch: u32) -> Option<u32> {
    let mut parent = arena.node(ch).p;
    while let Some(pi) = parent {
        if arena.node(pi).r == Some(ch) {
            ch = pi;
            parent = arena.node(pi).p;
        } else {
            break;
        }
    }
    parent
}

fn ascend_from_left<K, V>(arena: &NodeArena<K, V>, mut ch: u32) -> Option<u32> {
    let mut parent = arena.node(ch).p;
    while let Some(pi) = parent {
        if arena.node(pi).l == Some(ch) {
            ch = pi;
            parent = arena.node(pi).p;
        } else {
            break;
        }
    }
    parent
}

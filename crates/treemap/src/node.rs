//! Node representation and slot arena.
//!
//! All "pointers" are `Option<u32>` indices into a [`NodeArena`]. Rotations
//! and unlinking are plain index reassignment; removed slots go onto a free
//! list and are reused by later insertions.

/// Node color tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    Red,
    Black,
}

/// A tree element: key, value, three structural links, and a color.
#[derive(Clone, Debug)]
pub(crate) struct Node<K, V> {
    pub p: Option<u32>,
    pub l: Option<u32>,
    pub r: Option<u32>,
    pub k: K,
    pub v: V,
    pub color: Color,
}

impl<K, V> Node<K, V> {
    /// Fresh detached node. New nodes are red; attachment fix-up settles
    /// the final color.
    pub fn new(k: K, v: V) -> Self {
        Self {
            p: None,
            l: None,
            r: None,
            k,
            v,
            color: Color::Red,
        }
    }
}

/// Slot vector plus free list.
///
/// Occupied slots hold nodes; vacated slots are `None` and queue on `free`
/// for reuse, so a long-lived map does not grow without bound under churn.
#[derive(Clone, Debug)]
pub(crate) struct NodeArena<K, V> {
    slots: Vec<Option<Node<K, V>>>,
    free: Vec<u32>,
}

impl<K, V> NodeArena<K, V> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    pub fn alloc(&mut self, node: Node<K, V>) -> u32 {
        match self.free.pop() {
            Some(idx) => {
                self.slots[idx as usize] = Some(node);
                idx
            }
            None => {
                self.slots.push(Some(node));
                (self.slots.len() - 1) as u32
            }
        }
    }

    /// Vacates a slot, returning the node that occupied it.
    pub fn free(&mut self, idx: u32) -> Node<K, V> {
        let node = self.slots[idx as usize]
            .take()
            .expect("freeing a vacant arena slot");
        self.free.push(idx);
        node
    }

    pub fn node(&self, idx: u32) -> &Node<K, V> {
        self.slots[idx as usize]
            .as_ref()
            .expect("vacant arena slot")
    }

    pub fn node_mut(&mut self, idx: u32) -> &mut Node<K, V> {
        self.slots[idx as usize]
            .as_mut()
            .expect("vacant arena slot")
    }

    /// Swaps the key/value payloads of two occupied slots, leaving links and
    /// colors in place.
    pub fn swap_payload(&mut self, a: u32, b: u32) {
        if a == b {
            return;
        }
        let (lo, hi) = if a < b {
            (a as usize, b as usize)
        } else {
            (b as usize, a as usize)
        };
        let (head, tail) = self.slots.split_at_mut(hi);
        let x = head[lo].as_mut().expect("vacant arena slot");
        let y = tail[0].as_mut().expect("vacant arena slot");
        std::mem::swap(&mut x.k, &mut y.k);
        std::mem::swap(&mut x.v, &mut y.v);
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}

// Null-safe link and color helpers. Treating an absent child as a black
// node collapses the nil cases in the rebalancing loops.

#[inline]
pub(crate) fn parent<K, V>(arena: &NodeArena<K, V>, i: Option<u32>) -> Option<u32> {
    i.and_then(|i| arena.node(i).p)
}

#[inline]
pub(crate) fn left<K, V>(arena: &NodeArena<K, V>, i: Option<u32>) -> Option<u32> {
    i.and_then(|i| arena.node(i).l)
}

#[inline]
pub(crate) fn right<K, V>(arena: &NodeArena<K, V>, i: Option<u32>) -> Option<u32> {
    i.and_then(|i| arena.node(i).r)
}

#[inline]
pub(crate) fn color<K, V>(arena: &NodeArena<K, V>, i: Option<u32>) -> Color {
    i.map_or(Color::Black, |i| arena.node(i).color)
}

#[inline]
pub(crate) fn set_color<K, V>(arena: &mut NodeArena<K, V>, i: Option<u32>, c: Color) {
    if let Some(i) = i {
        arena.node_mut(i).color = c;
    }
}

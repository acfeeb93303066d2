//! The top-level ordered map container.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Bound;

use crate::cursor::{Cursor, Iter, Keys, Values};
use crate::error::TreeMapError;
use crate::navigate;
use crate::node::{Color, Node, NodeArena};
use crate::range::SubMap;
use crate::rb;

pub(crate) fn default_comparator<K: Ord>(a: &K, b: &K) -> Ordering {
    a.cmp(b)
}

/// Ordered key-value map backed by a red-black tree.
///
/// Point operations are O(log n). Iteration is in key order under the
/// map's ordering function, which is either the keys' intrinsic order
/// ([`TreeMap::new`]) or an injected comparison function
/// ([`TreeMap::with_comparator`]) fixed for the map's lifetime.
///
/// Nodes live in a slot arena owned by the map; range views and cursors
/// refer back to it and never copy the tree.
#[derive(Clone)]
pub struct TreeMap<K, V, C = fn(&K, &K) -> Ordering>
where
    C: Fn(&K, &K) -> Ordering,
{
    arena: NodeArena<K, V>,
    root: Option<u32>,
    len: usize,
    mod_count: u64,
    comparator: C,
}

impl<K: Ord, V> TreeMap<K, V> {
    /// Empty map ordered by the keys' intrinsic order.
    pub fn new() -> Self {
        Self::with_comparator(default_comparator::<K>)
    }

    /// Balanced map built from `n` entries of an already key-ordered source,
    /// in linear time.
    ///
    /// The caller guarantees the source yields at least `n` entries in
    /// strictly increasing key order; extra entries are not consumed.
    pub fn from_sorted_iter<I>(n: usize, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        Self::from_sorted_iter_with(default_comparator::<K>, n, entries)
    }
}

impl<K: Ord, V> Default for TreeMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C> TreeMap<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    /// Empty map ordered by `comparator`.
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            arena: NodeArena::new(),
            root: None,
            len: 0,
            mod_count: 0,
            comparator,
        }
    }

    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Whether any entry holds `value`. Linear scan; values are not sorted.
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        let mut curr = navigate::first(&self.arena, self.root);
        while let Some(i) = curr {
            if self.arena.node(i).v == *value {
                return true;
            }
            curr = navigate::next(&self.arena, i);
        }
        false
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.find(key).map(|i| &self.arena.node(i).v)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let idx = self.find(key)?;
        Some(&mut self.arena.node_mut(idx).v)
    }

    /// Inserts `key` with `value`, returning the previous value if the key
    /// was already present. A replacement mutates the value in place: no
    /// structural change, no modification-counter bump.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let Some(mut t) = self.root else {
            let idx = self.arena.alloc(Node::new(key, value));
            self.arena.node_mut(idx).color = Color::Black;
            self.root = Some(idx);
            self.len = 1;
            self.mod_count += 1;
            return None;
        };

        loop {
            match (self.comparator)(&key, &self.arena.node(t).k) {
                Ordering::Equal => {
                    return Some(std::mem::replace(&mut self.arena.node_mut(t).v, value));
                }
                Ordering::Less => match self.arena.node(t).l {
                    Some(l) => t = l,
                    None => {
                        let idx = self.arena.alloc(Node::new(key, value));
                        self.arena.node_mut(idx).p = Some(t);
                        self.arena.node_mut(t).l = Some(idx);
                        self.finish_insertion(idx);
                        return None;
                    }
                },
                Ordering::Greater => match self.arena.node(t).r {
                    Some(r) => t = r,
                    None => {
                        let idx = self.arena.alloc(Node::new(key, value));
                        self.arena.node_mut(idx).p = Some(t);
                        self.arena.node_mut(t).r = Some(idx);
                        self.finish_insertion(idx);
                        return None;
                    }
                },
            }
        }
    }

    fn finish_insertion(&mut self, idx: u32) {
        rb::fix_after_insertion(&mut self.arena, &mut self.root, idx);
        self.len += 1;
        self.mod_count += 1;
    }

    /// Removes `key`, returning its value if present.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let idx = self.find(key)?;
        let (_, v) = self.remove_at(idx);
        Some(v)
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
        self.len = 0;
        self.mod_count += 1;
    }

    /// First (lowest) key. Fails with [`TreeMapError::NoSuchElement`] on an
    /// empty map.
    pub fn first_key(&self) -> Result<&K, TreeMapError> {
        navigate::first(&self.arena, self.root)
            .map(|i| &self.arena.node(i).k)
            .ok_or(TreeMapError::NoSuchElement)
    }

    /// Last (highest) key. Fails with [`TreeMapError::NoSuchElement`] on an
    /// empty map.
    pub fn last_key(&self) -> Result<&K, TreeMapError> {
        navigate::last(&self.arena, self.root)
            .map(|i| &self.arena.node(i).k)
            .ok_or(TreeMapError::NoSuchElement)
    }

    pub fn first_entry(&self) -> Option<(&K, &V)> {
        self.entry_at(navigate::first(&self.arena, self.root))
    }

    pub fn last_entry(&self) -> Option<(&K, &V)> {
        self.entry_at(navigate::last(&self.arena, self.root))
    }

    /// Largest entry with key <= `key`.
    pub fn floor_entry(&self, key: &K) -> Option<(&K, &V)> {
        self.entry_at(navigate::floor(&self.arena, self.root, key, &self.comparator))
    }

    /// Smallest entry with key >= `key`.
    pub fn ceiling_entry(&self, key: &K) -> Option<(&K, &V)> {
        self.entry_at(navigate::ceiling(&self.arena, self.root, key, &self.comparator))
    }

    /// Smallest entry with key > `key`.
    pub fn higher_entry(&self, key: &K) -> Option<(&K, &V)> {
        self.entry_at(navigate::higher(&self.arena, self.root, key, &self.comparator))
    }

    /// Largest entry with key < `key`.
    pub fn lower_entry(&self, key: &K) -> Option<(&K, &V)> {
        self.entry_at(navigate::lower(&self.arena, self.root, key, &self.comparator))
    }

    pub fn floor_key(&self, key: &K) -> Option<&K> {
        self.floor_entry(key).map(|(k, _)| k)
    }

    pub fn ceiling_key(&self, key: &K) -> Option<&K> {
        self.ceiling_entry(key).map(|(k, _)| k)
    }

    pub fn higher_key(&self, key: &K) -> Option<&K> {
        self.higher_entry(key).map(|(k, _)| k)
    }

    pub fn lower_key(&self, key: &K) -> Option<&K> {
        self.lower_entry(key).map(|(k, _)| k)
    }

    /// Removes and returns the lowest entry.
    pub fn poll_first(&mut self) -> Option<(K, V)> {
        let idx = navigate::first(&self.arena, self.root)?;
        Some(self.remove_at(idx))
    }

    /// Removes and returns the highest entry.
    pub fn poll_last(&mut self) -> Option<(K, V)> {
        let idx = navigate::last(&self.arena, self.root)?;
        Some(self.remove_at(idx))
    }

    /// Ascending iterator over `(&K, &V)` entries.
    pub fn iter(&self) -> Iter<'_, K, V, C> {
        Iter::new(
            self,
            navigate::first(&self.arena, self.root),
            None,
            false,
        )
    }

    /// Descending iterator over `(&K, &V)` entries.
    pub fn iter_desc(&self) -> Iter<'_, K, V, C> {
        Iter::new(self, navigate::last(&self.arena, self.root), None, true)
    }

    pub fn keys(&self) -> Keys<'_, K, V, C> {
        Keys::new(self.iter())
    }

    pub fn descending_keys(&self) -> Keys<'_, K, V, C> {
        Keys::new(self.iter_desc())
    }

    pub fn values(&self) -> Values<'_, K, V, C> {
        Values::new(self.iter())
    }

    /// Detached ascending fail-fast cursor over the whole map.
    pub fn cursor(&self) -> Cursor {
        Cursor::new(navigate::first(&self.arena, self.root), None, false, self.mod_count)
    }

    /// Detached descending fail-fast cursor over the whole map.
    pub fn cursor_desc(&self) -> Cursor {
        Cursor::new(navigate::last(&self.arena, self.root), None, true, self.mod_count)
    }

    /// Bounded view over this map. Fails with
    /// [`TreeMapError::InvalidRange`] if the low bound is greater than the
    /// high bound.
    pub fn sub_map(
        &mut self,
        lo: Bound<K>,
        hi: Bound<K>,
    ) -> Result<SubMap<'_, K, V, C>, TreeMapError> {
        SubMap::new(self, lo, hi, false)
    }

    /// View of all entries with key below `to` (inclusive or exclusive).
    pub fn head_map(&mut self, to: K, inclusive: bool) -> SubMap<'_, K, V, C> {
        let hi = if inclusive {
            Bound::Included(to)
        } else {
            Bound::Excluded(to)
        };
        SubMap::new_unchecked(self, Bound::Unbounded, hi, false)
    }

    /// View of all entries with key above `from` (inclusive or exclusive).
    pub fn tail_map(&mut self, from: K, inclusive: bool) -> SubMap<'_, K, V, C> {
        let lo = if inclusive {
            Bound::Included(from)
        } else {
            Bound::Excluded(from)
        };
        SubMap::new_unchecked(self, lo, Bound::Unbounded, false)
    }

    /// Reverse-order view of the whole map.
    pub fn descending_map(&mut self) -> SubMap<'_, K, V, C> {
        SubMap::new_unchecked(self, Bound::Unbounded, Bound::Unbounded, true)
    }

    /// Checks all red-black and ordering invariants.
    pub fn assert_valid(&self) -> Result<(), String> {
        rb::assert_red_black_tree(&self.arena, self.root, &self.comparator)?;
        let mut count = 0usize;
        let mut curr = navigate::first(&self.arena, self.root);
        while let Some(i) = curr {
            count += 1;
            curr = navigate::next(&self.arena, i);
        }
        if count != self.len {
            return Err(format!("Length mismatch: len={} traversal={count}", self.len));
        }
        Ok(())
    }

    fn entry_at(&self, idx: Option<u32>) -> Option<(&K, &V)> {
        idx.map(|i| {
            let n = self.arena.node(i);
            (&n.k, &n.v)
        })
    }

    pub(crate) fn find(&self, key: &K) -> Option<u32> {
        navigate::find(&self.arena, self.root, key, &self.comparator)
    }

    pub(crate) fn arena(&self) -> &NodeArena<K, V> {
        &self.arena
    }

    pub(crate) fn root(&self) -> Option<u32> {
        self.root
    }

    pub(crate) fn mod_count(&self) -> u64 {
        self.mod_count
    }

    pub(crate) fn compare(&self, a: &K, b: &K) -> Ordering {
        (self.comparator)(a, b)
    }

    /// Unlinks the node at `idx` and returns its key and value.
    ///
    /// A node with two children trades payloads with its in-order successor
    /// and the successor node is the one physically removed, so the unlinked
    /// node always has at most one child.
    pub(crate) fn remove_at(&mut self, idx: u32) -> (K, V) {
        self.mod_count += 1;
        self.len -= 1;

        let mut target = idx;
        if self.arena.node(target).l.is_some() && self.arena.node(target).r.is_some() {
            let s = navigate::next(&self.arena, target).expect("two-child node has a successor");
            self.arena.swap_payload(target, s);
            target = s;
        }

        let replacement = self.arena.node(target).l.or(self.arena.node(target).r);

        if let Some(rep) = replacement {
            let p = self.arena.node(target).p;
            self.arena.node_mut(rep).p = p;
            match p {
                None => self.root = Some(rep),
                Some(p) => {
                    if self.arena.node(p).l == Some(target) {
                        self.arena.node_mut(p).l = Some(rep);
                    } else {
                        self.arena.node_mut(p).r = Some(rep);
                    }
                }
            }

            {
                let t = self.arena.node_mut(target);
                t.l = None;
                t.r = None;
                t.p = None;
            }

            if self.arena.node(target).color == Color::Black {
                rb::fix_after_deletion(&mut self.arena, &mut self.root, rep);
            }
        } else if self.arena.node(target).p.is_none() {
            self.root = None;
        } else {
            // No replacement: resolve the deficiency with the node still in
            // place as a phantom position, then unlink it.
            if self.arena.node(target).color == Color::Black {
                rb::fix_after_deletion(&mut self.arena, &mut self.root, target);
            }
            if let Some(p) = self.arena.node(target).p {
                if self.arena.node(p).l == Some(target) {
                    self.arena.node_mut(p).l = None;
                } else {
                    self.arena.node_mut(p).r = None;
                }
                self.arena.node_mut(target).p = None;
            }
        }

        let node = self.arena.free(target);
        (node.k, node.v)
    }

    /// Balanced map built from `n` entries of a source already sorted under
    /// `comparator`, in linear time.
    pub fn from_sorted_iter_with<I>(comparator: C, n: usize, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        crate::build::build_from_sorted(comparator, n, entries)
    }

    pub(crate) fn from_parts(
        arena: NodeArena<K, V>,
        root: Option<u32>,
        len: usize,
        comparator: C,
    ) -> Self {
        Self {
            arena,
            root,
            len,
            mod_count: 0,
            comparator,
        }
    }
}

impl<K, V, C> fmt::Debug for TreeMap<K, V, C>
where
    K: fmt::Debug,
    V: fmt::Debug,
    C: Fn(&K, &K) -> Ordering,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, C> PartialEq for TreeMap<K, V, C>
where
    K: PartialEq,
    V: PartialEq,
    C: Fn(&K, &K) -> Ordering,
{
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<K, V, C> Extend<(K, V)> for TreeMap<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

/// O(n log n) construction from an arbitrary source via repeated insertion.
impl<K: Ord, V> FromIterator<(K, V)> for TreeMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<'a, K, V, C> IntoIterator for &'a TreeMap<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Owning in-order iterator; drains the map lowest key first.
pub struct IntoIter<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    map: TreeMap<K, V, C>,
}

impl<K, V, C> Iterator for IntoIter<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.map.poll_first()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.map.len(), Some(self.map.len()))
    }
}

impl<K, V, C> IntoIterator for TreeMap<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    type Item = (K, V);
    type IntoIter = IntoIter<K, V, C>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { map: self }
    }
}

//! Bounded, directional views over a shared tree.
//!
//! A [`SubMap`] does not copy data: it holds a mutable borrow of the map
//! plus two bound descriptors and a direction flag. Every navigation query
//! is an absolute query against the tree, guarded by the bound predicates;
//! a descending view only swaps the roles of low/high and of
//! successor/predecessor.

use std::cmp::Ordering;
use std::ops::Bound;

use crate::cursor::{Cursor, Iter, Keys, Values};
use crate::error::TreeMapError;
use crate::navigate;
use crate::TreeMap;

/// Direction-aware bounded view of a [`TreeMap`].
///
/// Mutation through the view (insert within bounds, remove, poll) mutates
/// the underlying map directly.
pub struct SubMap<'a, K, V, C = fn(&K, &K) -> Ordering>
where
    C: Fn(&K, &K) -> Ordering,
{
    map: &'a mut TreeMap<K, V, C>,
    lo: Bound<K>,
    hi: Bound<K>,
    descending: bool,
}

impl<'a, K, V, C> SubMap<'a, K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    pub(crate) fn new(
        map: &'a mut TreeMap<K, V, C>,
        lo: Bound<K>,
        hi: Bound<K>,
        descending: bool,
    ) -> Result<Self, TreeMapError> {
        if let (Bound::Included(l) | Bound::Excluded(l), Bound::Included(h) | Bound::Excluded(h)) =
            (&lo, &hi)
        {
            if map.compare(l, h) == Ordering::Greater {
                return Err(TreeMapError::InvalidRange);
            }
        }
        Ok(Self::new_unchecked(map, lo, hi, descending))
    }

    pub(crate) fn new_unchecked(
        map: &'a mut TreeMap<K, V, C>,
        lo: Bound<K>,
        hi: Bound<K>,
        descending: bool,
    ) -> Self {
        Self {
            map,
            lo,
            hi,
            descending,
        }
    }

    // Bound predicates.

    fn too_low(&self, key: &K) -> bool {
        match &self.lo {
            Bound::Unbounded => false,
            Bound::Included(lo) => self.map.compare(key, lo) == Ordering::Less,
            Bound::Excluded(lo) => self.map.compare(key, lo) != Ordering::Greater,
        }
    }

    fn too_high(&self, key: &K) -> bool {
        match &self.hi {
            Bound::Unbounded => false,
            Bound::Included(hi) => self.map.compare(key, hi) == Ordering::Greater,
            Bound::Excluded(hi) => self.map.compare(key, hi) != Ordering::Less,
        }
    }

    /// Whether `key` falls within this view's bounds.
    pub fn in_range(&self, key: &K) -> bool {
        !self.too_low(key) && !self.too_high(key)
    }

    fn in_closed_range(&self, key: &K) -> bool {
        let above_lo = match &self.lo {
            Bound::Unbounded => true,
            Bound::Included(lo) | Bound::Excluded(lo) => {
                self.map.compare(key, lo) != Ordering::Less
            }
        };
        let below_hi = match &self.hi {
            Bound::Unbounded => true,
            Bound::Included(hi) | Bound::Excluded(hi) => {
                self.map.compare(key, hi) != Ordering::Greater
            }
        };
        above_lo && below_hi
    }

    // A bound key for a narrower view may coincide with an exclusive bound
    // of this view, so exclusive narrowing checks the closed range.
    fn in_range_for_bound(&self, key: &K, inclusive: bool) -> bool {
        if inclusive {
            self.in_range(key)
        } else {
            self.in_closed_range(key)
        }
    }

    // Absolute (ascending-sense) navigation, filtered by the bounds.

    fn abs_lowest(&self) -> Option<u32> {
        let arena = self.map.arena();
        let e = match &self.lo {
            Bound::Unbounded => navigate::first(arena, self.map.root()),
            Bound::Included(k) => {
                navigate::ceiling(arena, self.map.root(), k, self.map.comparator())
            }
            Bound::Excluded(k) => {
                navigate::higher(arena, self.map.root(), k, self.map.comparator())
            }
        };
        e.filter(|&i| !self.too_high(&arena.node(i).k))
    }

    fn abs_highest(&self) -> Option<u32> {
        let arena = self.map.arena();
        let e = match &self.hi {
            Bound::Unbounded => navigate::last(arena, self.map.root()),
            Bound::Included(k) => {
                navigate::floor(arena, self.map.root(), k, self.map.comparator())
            }
            Bound::Excluded(k) => {
                navigate::lower(arena, self.map.root(), k, self.map.comparator())
            }
        };
        e.filter(|&i| !self.too_low(&arena.node(i).k))
    }

    fn abs_ceiling(&self, key: &K) -> Option<u32> {
        if self.too_low(key) {
            return self.abs_lowest();
        }
        let arena = self.map.arena();
        navigate::ceiling(arena, self.map.root(), key, self.map.comparator())
            .filter(|&i| !self.too_high(&arena.node(i).k))
    }

    fn abs_higher(&self, key: &K) -> Option<u32> {
        if self.too_low(key) {
            return self.abs_lowest();
        }
        let arena = self.map.arena();
        navigate::higher(arena, self.map.root(), key, self.map.comparator())
            .filter(|&i| !self.too_high(&arena.node(i).k))
    }

    fn abs_floor(&self, key: &K) -> Option<u32> {
        if self.too_high(key) {
            return self.abs_highest();
        }
        let arena = self.map.arena();
        navigate::floor(arena, self.map.root(), key, self.map.comparator())
            .filter(|&i| !self.too_low(&arena.node(i).k))
    }

    fn abs_lower(&self, key: &K) -> Option<u32> {
        if self.too_high(key) {
            return self.abs_highest();
        }
        let arena = self.map.arena();
        navigate::lower(arena, self.map.root(), key, self.map.comparator())
            .filter(|&i| !self.too_low(&arena.node(i).k))
    }

    /// First node past the high bound, for ascending traversal.
    fn abs_high_fence(&self) -> Option<u32> {
        let arena = self.map.arena();
        match &self.hi {
            Bound::Unbounded => None,
            Bound::Included(k) => {
                navigate::higher(arena, self.map.root(), k, self.map.comparator())
            }
            Bound::Excluded(k) => {
                navigate::ceiling(arena, self.map.root(), k, self.map.comparator())
            }
        }
    }

    /// First node past the low bound, for descending traversal.
    fn abs_low_fence(&self) -> Option<u32> {
        let arena = self.map.arena();
        match &self.lo {
            Bound::Unbounded => None,
            Bound::Included(k) => {
                navigate::lower(arena, self.map.root(), k, self.map.comparator())
            }
            Bound::Excluded(k) => {
                navigate::floor(arena, self.map.root(), k, self.map.comparator())
            }
        }
    }

    fn first_in_view(&self) -> Option<u32> {
        if self.descending {
            self.abs_highest()
        } else {
            self.abs_lowest()
        }
    }

    fn last_in_view(&self) -> Option<u32> {
        if self.descending {
            self.abs_lowest()
        } else {
            self.abs_highest()
        }
    }

    fn entry_at(&self, idx: Option<u32>) -> Option<(&K, &V)> {
        idx.map(|i| {
            let n = self.map.arena().node(i);
            (&n.k, &n.v)
        })
    }

    // View-relative queries.

    /// Number of entries within the bounds. Bounded scan.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.abs_lowest().is_none()
    }

    /// Compares two keys in this view's order; inverted for a descending
    /// view.
    pub fn compare(&self, a: &K, b: &K) -> Ordering {
        let ord = self.map.compare(a, b);
        if self.descending {
            ord.reverse()
        } else {
            ord
        }
    }

    pub fn first_entry(&self) -> Option<(&K, &V)> {
        self.entry_at(self.first_in_view())
    }

    pub fn last_entry(&self) -> Option<(&K, &V)> {
        self.entry_at(self.last_in_view())
    }

    pub fn first_key(&self) -> Result<&K, TreeMapError> {
        self.first_entry()
            .map(|(k, _)| k)
            .ok_or(TreeMapError::NoSuchElement)
    }

    pub fn last_key(&self) -> Result<&K, TreeMapError> {
        self.last_entry()
            .map(|(k, _)| k)
            .ok_or(TreeMapError::NoSuchElement)
    }

    /// Smallest entry (in view order) with key >= `key` in view order.
    pub fn ceiling_entry(&self, key: &K) -> Option<(&K, &V)> {
        let idx = if self.descending {
            self.abs_floor(key)
        } else {
            self.abs_ceiling(key)
        };
        self.entry_at(idx)
    }

    pub fn floor_entry(&self, key: &K) -> Option<(&K, &V)> {
        let idx = if self.descending {
            self.abs_ceiling(key)
        } else {
            self.abs_floor(key)
        };
        self.entry_at(idx)
    }

    pub fn higher_entry(&self, key: &K) -> Option<(&K, &V)> {
        let idx = if self.descending {
            self.abs_lower(key)
        } else {
            self.abs_higher(key)
        };
        self.entry_at(idx)
    }

    pub fn lower_entry(&self, key: &K) -> Option<(&K, &V)> {
        let idx = if self.descending {
            self.abs_higher(key)
        } else {
            self.abs_lower(key)
        };
        self.entry_at(idx)
    }

    pub fn ceiling_key(&self, key: &K) -> Option<&K> {
        self.ceiling_entry(key).map(|(k, _)| k)
    }

    pub fn floor_key(&self, key: &K) -> Option<&K> {
        self.floor_entry(key).map(|(k, _)| k)
    }

    pub fn higher_key(&self, key: &K) -> Option<&K> {
        self.higher_entry(key).map(|(k, _)| k)
    }

    pub fn lower_key(&self, key: &K) -> Option<&K> {
        self.lower_entry(key).map(|(k, _)| k)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.in_range(key) && self.map.contains_key(key)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        if !self.in_range(key) {
            return None;
        }
        self.map.get(key)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        if !self.in_range(key) {
            return None;
        }
        self.map.get_mut(key)
    }

    /// Inserts through the view. Fails with [`TreeMapError::OutOfRange`]
    /// for a key outside the view's bounds.
    pub fn insert(&mut self, key: K, value: V) -> Result<Option<V>, TreeMapError> {
        if !self.in_range(&key) {
            return Err(TreeMapError::OutOfRange);
        }
        Ok(self.map.insert(key, value))
    }

    /// Removes `key` if it lies within the bounds.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        if !self.in_range(key) {
            return None;
        }
        self.map.remove(key)
    }

    /// Removes and returns the first entry in view order.
    pub fn poll_first(&mut self) -> Option<(K, V)> {
        let idx = self.first_in_view()?;
        Some(self.map.remove_at(idx))
    }

    /// Removes and returns the last entry in view order.
    pub fn poll_last(&mut self) -> Option<(K, V)> {
        let idx = self.last_in_view()?;
        Some(self.map.remove_at(idx))
    }

    // Traversal.

    /// Iterator over the view's entries, in view order.
    pub fn iter(&self) -> Iter<'_, K, V, C> {
        let (start, fence) = if self.descending {
            (self.abs_highest(), self.abs_low_fence())
        } else {
            (self.abs_lowest(), self.abs_high_fence())
        };
        Iter::new(&*self.map, start, fence, self.descending)
    }

    /// Iterator in the reverse of the view's order.
    pub fn iter_desc(&self) -> Iter<'_, K, V, C> {
        let (start, fence) = if self.descending {
            (self.abs_lowest(), self.abs_high_fence())
        } else {
            (self.abs_highest(), self.abs_low_fence())
        };
        Iter::new(&*self.map, start, fence, !self.descending)
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

    /// Detached fail-fast cursor over the view, in view order.
    pub fn cursor(&self) -> Cursor {
        let (start, fence) = if self.descending {
            (self.abs_highest(), self.abs_low_fence())
        } else {
            (self.abs_lowest(), self.abs_high_fence())
        };
        Cursor::new(start, fence, self.descending, self.map.mod_count())
    }

    // Derived views.

    /// The same view in the opposite direction.
    pub fn descending(self) -> Self {
        Self {
            map: self.map,
            lo: self.lo,
            hi: self.hi,
            descending: !self.descending,
        }
    }

    /// Narrower view. `from` and `to` are given in this view's order; an
    /// unbounded end inherits this view's bound. Fails with
    /// [`TreeMapError::OutOfRange`] when a bound key falls outside this
    /// view, or [`TreeMapError::InvalidRange`] when the bounds are inverted.
    pub fn sub_map(
        &mut self,
        from: Bound<K>,
        to: Bound<K>,
    ) -> Result<SubMap<'_, K, V, C>, TreeMapError>
    where
        K: Clone,
    {
        let (new_lo, new_hi) = if self.descending {
            (to, from)
        } else {
            (from, to)
        };

        let lo = match new_lo {
            Bound::Unbounded => self.lo.clone(),
            Bound::Included(k) => {
                if !self.in_range_for_bound(&k, true) {
                    return Err(TreeMapError::OutOfRange);
                }
                Bound::Included(k)
            }
            Bound::Excluded(k) => {
                if !self.in_range_for_bound(&k, false) {
                    return Err(TreeMapError::OutOfRange);
                }
                Bound::Excluded(k)
            }
        };
        let hi = match new_hi {
            Bound::Unbounded => self.hi.clone(),
            Bound::Included(k) => {
                if !self.in_range_for_bound(&k, true) {
                    return Err(TreeMapError::OutOfRange);
                }
                Bound::Included(k)
            }
            Bound::Excluded(k) => {
                if !self.in_range_for_bound(&k, false) {
                    return Err(TreeMapError::OutOfRange);
                }
                Bound::Excluded(k)
            }
        };

        SubMap::new(&mut *self.map, lo, hi, self.descending)
    }

    /// Narrower view of everything before `to` in view order.
    pub fn head_map(
        &mut self,
        to: K,
        inclusive: bool,
    ) -> Result<SubMap<'_, K, V, C>, TreeMapError>
    where
        K: Clone,
    {
        let to = if inclusive {
            Bound::Included(to)
        } else {
            Bound::Excluded(to)
        };
        self.sub_map(Bound::Unbounded, to)
    }

    /// Narrower view of everything from `from` onward in view order.
    pub fn tail_map(
        &mut self,
        from: K,
        inclusive: bool,
    ) -> Result<SubMap<'_, K, V, C>, TreeMapError>
    where
        K: Clone,
    {
        let from = if inclusive {
            Bound::Included(from)
        } else {
            Bound::Excluded(from)
        };
        self.sub_map(from, Bound::Unbounded)
    }
}

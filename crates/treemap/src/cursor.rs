//! Traversal: borrowing iterators and detached fail-fast cursors.
//!
//! A [`Cursor`] holds arena indices and a snapshot of the map's
//! modification counter instead of borrowing the map, so the map stays
//! usable between steps. Every step revalidates the snapshot against the
//! live counter; the check is best-effort and diagnostic only.
//!
//! The borrowing [`Iter`]/[`Keys`]/[`Values`] wrappers hold a shared borrow
//! of the map for their whole lifetime, which statically rules out
//! structural modification, so they carry no snapshot.

use std::cmp::Ordering;

use crate::error::TreeMapError;
use crate::navigate;
use crate::TreeMap;

/// Detached cursor over a tree or a bounded range of it.
///
/// Yields entries through [`Cursor::advance`]; supports removal of the
/// last-yielded entry exactly once via [`Cursor::remove`]. The `fence` is
/// the first node past the traversal's end; `None` means unbounded.
#[derive(Clone, Debug)]
pub struct Cursor {
    next: Option<u32>,
    last_returned: Option<u32>,
    fence: Option<u32>,
    descending: bool,
    expected_mod_count: u64,
}

impl Cursor {
    pub(crate) fn new(
        next: Option<u32>,
        fence: Option<u32>,
        descending: bool,
        expected_mod_count: u64,
    ) -> Self {
        Self {
            next,
            last_returned: None,
            fence,
            descending,
            expected_mod_count,
        }
    }

    /// Yields the next entry, or `Ok(None)` once the traversal is finished.
    ///
    /// Fails with [`TreeMapError::ConcurrentStructuralChange`] if the map
    /// was structurally modified since the cursor was created, other than
    /// through this cursor.
    pub fn advance<'a, K, V, C>(
        &mut self,
        map: &'a TreeMap<K, V, C>,
    ) -> Result<Option<(&'a K, &'a V)>, TreeMapError>
    where
        C: Fn(&K, &K) -> Ordering,
    {
        if map.mod_count() != self.expected_mod_count {
            return Err(TreeMapError::ConcurrentStructuralChange);
        }
        let Some(e) = self.next else {
            return Ok(None);
        };
        if self.fence == Some(e) {
            return Ok(None);
        }
        self.next = if self.descending {
            navigate::prev(map.arena(), e)
        } else {
            navigate::next(map.arena(), e)
        };
        self.last_returned = Some(e);
        let n = map.arena().node(e);
        Ok(Some((&n.k, &n.v)))
    }

    /// Removes the last entry yielded by [`Cursor::advance`] and refreshes
    /// the snapshot, keeping the cursor valid.
    ///
    /// Fails with [`TreeMapError::IllegalIteratorState`] if nothing has been
    /// yielded yet or the entry was already removed through this cursor.
    pub fn remove<K, V, C>(&mut self, map: &mut TreeMap<K, V, C>) -> Result<(), TreeMapError>
    where
        C: Fn(&K, &K) -> Ordering,
    {
        let last = self
            .last_returned
            .ok_or(TreeMapError::IllegalIteratorState)?;
        if map.mod_count() != self.expected_mod_count {
            return Err(TreeMapError::ConcurrentStructuralChange);
        }

        let two_children =
            map.arena().node(last).l.is_some() && map.arena().node(last).r.is_some();
        if !self.descending && two_children {
            // Removal of a two-child node physically frees the successor
            // slot after moving its payload into `last`, so the pending
            // `next` (and the fence, when it was that successor) now live
            // at `last`.
            if self.fence == self.next {
                self.fence = Some(last);
            }
            self.next = Some(last);
        }

        map.remove_at(last);
        self.expected_mod_count = map.mod_count();
        self.last_returned = None;
        Ok(())
    }
}

/// Borrowing in-order iterator over `(&K, &V)`.
pub struct Iter<'a, K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    map: &'a TreeMap<K, V, C>,
    next: Option<u32>,
    fence: Option<u32>,
    descending: bool,
}

impl<'a, K, V, C> Iter<'a, K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    pub(crate) fn new(
        map: &'a TreeMap<K, V, C>,
        next: Option<u32>,
        fence: Option<u32>,
        descending: bool,
    ) -> Self {
        Self {
            map,
            next,
            fence,
            descending,
        }
    }
}

impl<'a, K, V, C> Iterator for Iter<'a, K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let e = self.next?;
        if self.fence == Some(e) {
            return None;
        }
        self.next = if self.descending {
            navigate::prev(self.map.arena(), e)
        } else {
            navigate::next(self.map.arena(), e)
        };
        let n = self.map.arena().node(e);
        Some((&n.k, &n.v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.map.len()))
    }
}

/// Key projection of [`Iter`].
pub struct Keys<'a, K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    inner: Iter<'a, K, V, C>,
}

impl<'a, K, V, C> Keys<'a, K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    pub(crate) fn new(inner: Iter<'a, K, V, C>) -> Self {
        Self { inner }
    }
}

impl<'a, K, V, C> Iterator for Keys<'a, K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }
}

/// Value projection of [`Iter`].
pub struct Values<'a, K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    inner: Iter<'a, K, V, C>,
}

impl<'a, K, V, C> Values<'a, K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    pub(crate) fn new(inner: Iter<'a, K, V, C>) -> Self {
        Self { inner }
    }
}

impl<'a, K, V, C> Iterator for Values<'a, K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }
}

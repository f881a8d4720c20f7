//! Iterators over a [`SkipList`].
//!
//! Iterators walk row 0 with their own position and never move the list's
//! cursor. They borrow the list shared, so the list cannot be modified while
//! one is alive.

use core::cmp::Ordering;
use core::iter::FusedIterator;

use rand_core::RngCore;

use crate::arena::Arena;
use crate::compare::Compare;
use crate::entry::Entry;
use crate::error::Error;
use crate::node::Idx;
use crate::skiplist::SkipList;

/// Lookahead protocol shared by all skip list iterators.
///
/// ```
/// use skipq::{Error, Lookahead, SkipList};
///
/// let list: SkipList<u8, ()> = [(1, ())].into_iter().collect();
/// let mut iter = list.iter();
///
/// assert!(iter.has_more());
/// assert_eq!(iter.take_next().unwrap().key(), &1);
/// assert!(!iter.has_more());
/// assert_eq!(iter.take_next().unwrap_err(), Error::Exhausted);
/// ```
pub trait Lookahead: Iterator {
    /// Returns `true` if another item remains. Does not advance.
    fn has_more(&self) -> bool;

    /// Returns the next item.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Exhausted`] once nothing remains.
    fn take_next(&mut self) -> Result<Self::Item, Error> {
        self.next().ok_or(Error::Exhausted)
    }
}

// ============================================================================
// Construction
// ============================================================================

impl<K, V, C, R> SkipList<K, V, C, R> {
    /// Returns an iterator over all entries in order.
    ///
    /// Equal keys come newest first.
    pub fn iter(&self) -> Iter<'_, K, V> {
        let row0 = self.row0();
        Iter {
            arena: self.arena(),
            front: self.arena().next(row0.head),
            end: row0.tail,
        }
    }

    /// Returns an iterator over all entries in reverse order.
    pub fn iter_rev(&self) -> IterRev<'_, K, V> {
        let row0 = self.row0();
        IterRev {
            arena: self.arena(),
            back: self.arena().prev(row0.tail),
            end: row0.head,
        }
    }

    /// Returns an iterator over the keys in order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over the values in key order.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }
}

impl<K, V, C, R> SkipList<K, V, C, R>
where
    C: Compare<K>,
    R: RngCore,
{
    /// Returns an iterator over the entries with keys `>= key`, in order.
    ///
    /// If `key` is present, iteration starts at the newest entry carrying it.
    pub fn iter_from(&self, key: &K) -> Iter<'_, K, V> {
        let arena = self.arena();
        let idx = self.locate(key);
        let front = if self.is_equal(idx, key) {
            self.block_start(idx)
        } else {
            arena.next(idx)
        };
        Iter {
            arena,
            front,
            end: self.row0().tail,
        }
    }

    /// Returns an iterator over the entries with keys `<= key`, in reverse
    /// order.
    ///
    /// If `key` is present, iteration starts at the oldest entry carrying it.
    pub fn iter_rev_from(&self, key: &K) -> IterRev<'_, K, V> {
        IterRev {
            arena: self.arena(),
            back: self.locate(key),
            end: self.row0().head,
        }
    }

    /// Returns an iterator over the entries with exactly `key`, newest to
    /// oldest.
    ///
    /// ```
    /// use skipq::SkipList;
    ///
    /// let mut list = SkipList::new();
    /// list.insert(1, "x");
    /// list.insert(2, "old");
    /// list.insert(2, "new");
    ///
    /// let twos: Vec<_> = list.same_key(&2).map(|e| *e.value()).collect();
    /// assert_eq!(twos, ["new", "old"]);
    /// assert_eq!(list.same_key(&3).count(), 0);
    /// ```
    pub fn same_key(&self, key: &K) -> Iter<'_, K, V> {
        let arena = self.arena();
        let last = self.locate(key);
        if !self.is_equal(last, key) {
            return Iter {
                arena,
                front: last,
                end: last,
            };
        }
        Iter {
            arena,
            front: self.block_start(last),
            end: arena.next(last),
        }
    }

    #[inline]
    fn is_equal(&self, idx: Idx, key: &K) -> bool {
        self.arena().bound(idx).cmp_key(key, self.comparator()) == Ordering::Equal
    }
}

impl<'a, K, V, C, R> IntoIterator for &'a SkipList<K, V, C, R> {
    type Item = &'a Entry<K, V>;
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ============================================================================
// Iterators
// ============================================================================

/// A forward iterator over entries.
pub struct Iter<'a, K, V> {
    arena: &'a Arena<K, V>,
    front: Idx,
    /// First node not yielded.
    end: Idx,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = &'a Entry<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.end {
            return None;
        }
        let entry = self.arena.entry_at(self.front)?;
        self.front = self.arena.next(self.front);
        Some(entry)
    }
}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Lookahead for Iter<'_, K, V> {
    #[inline]
    fn has_more(&self) -> bool {
        self.front != self.end
    }
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            arena: self.arena,
            front: self.front,
            end: self.end,
        }
    }
}

/// A backward iterator over entries.
pub struct IterRev<'a, K, V> {
    arena: &'a Arena<K, V>,
    back: Idx,
    end: Idx,
}

impl<'a, K, V> Iterator for IterRev<'a, K, V> {
    type Item = &'a Entry<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.back == self.end {
            return None;
        }
        let entry = self.arena.entry_at(self.back)?;
        self.back = self.arena.prev(self.back);
        Some(entry)
    }
}

impl<K, V> FusedIterator for IterRev<'_, K, V> {}

impl<K, V> Lookahead for IterRev<'_, K, V> {
    #[inline]
    fn has_more(&self) -> bool {
        self.back != self.end
    }
}

/// An iterator over keys in order.
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(Entry::key)
    }
}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

impl<K, V> Lookahead for Keys<'_, K, V> {
    #[inline]
    fn has_more(&self) -> bool {
        self.inner.has_more()
    }
}

/// An iterator over values in key order.
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(Entry::value)
    }
}

impl<K, V> FusedIterator for Values<'_, K, V> {}

impl<K, V> Lookahead for Values<'_, K, V> {
    #[inline]
    fn has_more(&self) -> bool {
        self.inner.has_more()
    }
}

//! Skip list - a sorted multimap with a navigation cursor.
//!
//! Every level is a doubly linked row closed by `-oo`/`+oo` sentinels. An
//! entry's nodes form a tower starting at row 0; the tower's height is drawn
//! at insertion from a fair-coin geometric distribution, which gives O(log n)
//! expected search, insert, and removal without rebalancing.
//!
//! ```text
//! row 3:  -oo ─────────────────────────────────────► +oo   (always empty)
//!          │                                          │
//! row 2:  -oo ────────────────► 50 ────────────────► +oo
//!          │                     │                    │
//! row 1:  -oo ─────────► 20 ──► 50 ────────────────► +oo
//!          │              │      │                    │
//! row 0:  -oo ──► 10 ──► 20 ──► 50 ──► 50 ──► 60 ──► +oo
//!                               new    old
//! ```
//!
//! # Duplicate keys
//!
//! Equal keys are allowed. A new entry is placed in front of every existing
//! entry with the same key, at every row it occupies, so a block of equal
//! keys reads newest to oldest from left to right. [`SkipList::search`] lands
//! on the right end of the block (the oldest entry).
//!
//! # The cursor
//!
//! The list carries one navigation cursor, the *current* entry. It is moved by
//! [`first`](SkipList::first), [`last`](SkipList::last),
//! [`next`](SkipList::next), [`prior`](SkipList::prior), and
//! [`search`](SkipList::search), which all take `&self`, so the cursor can be
//! moved while iterators are alive. Iterators keep their own position and
//! never touch the cursor. Structural changes take `&mut self` and therefore
//! cannot happen while an iterator borrows the list.
//!
//! # Example
//!
//! ```
//! use skipq::SkipList;
//!
//! let mut list = SkipList::new();
//! list.insert(5, "a");
//! list.insert(5, "b");
//! list.insert(3, "c");
//!
//! assert!(list.search(&5));
//! assert_eq!(list.current_entry().unwrap().value(), &"a"); // oldest 5
//!
//! let from_five: Vec<_> = list.iter_from(&5).map(|e| *e.value()).collect();
//! assert_eq!(from_five, ["b", "a"]);
//!
//! list.remove().unwrap();
//! assert_eq!(list.len(), 2);
//! ```

use core::cell::Cell;
use core::cmp::Ordering;
use core::fmt;
use core::mem;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand_core::RngCore;
use tracing::{debug, trace};

use crate::arena::Arena;
use crate::compare::{Compare, Natural};
use crate::config::Config;
use crate::entry::Entry;
use crate::error::Error;
use crate::height::HeightGen;
use crate::node::{Idx, NIL, Row};

/// A probabilistic sorted multimap built from quad-linked level rows.
///
/// # Type Parameters
///
/// - `K`: Key type, ordered by `C`
/// - `V`: Value type
/// - `C`: Key comparator implementing [`Compare`], defaults to [`Natural`]
/// - `R`: Random number generator for tower heights, defaults to `SmallRng`
pub struct SkipList<K, V, C = Natural, R = SmallRng> {
    /// Owns every node and entry.
    arena: Arena<K, V>,
    /// Level rows, `rows[0]` is the full row.
    rows: Vec<Row>,
    /// Number of real entries (row 0 only).
    len: usize,
    /// Navigation cursor: a real row-0 node, or anything else for "none".
    current: Cell<Idx>,
    cmp: C,
    heights: HeightGen<R>,
    config: Config,
}

impl<K: Ord, V> SkipList<K, V> {
    /// Creates an empty list ordered by `Ord`.
    ///
    /// Tower heights come from a `SmallRng` seeded by the thread RNG.
    pub fn new() -> Self {
        Self::with_comparator(Natural)
    }
}

impl<K: Ord, V> Default for SkipList<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C: Compare<K>> SkipList<K, V, C> {
    /// Creates an empty list ordered by `cmp`.
    pub fn with_comparator(cmp: C) -> Self {
        Self::with_rng(cmp, SmallRng::from_rng(&mut rand::rng()))
    }
}

impl<K, V, C, R> SkipList<K, V, C, R>
where
    C: Compare<K>,
    R: RngCore,
{
    /// Creates an empty list with an explicit comparator and RNG.
    ///
    /// Seeding the RNG makes tower heights, and so the row layout,
    /// reproducible.
    pub fn with_rng(cmp: C, rng: R) -> Self {
        Self::build(Config::default(), cmp, rng)
    }

    /// Creates an empty list from a [`Config`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMaxHeight`] if the height cap is out of range.
    pub fn with_config(config: Config, cmp: C, rng: R) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self::build(config, cmp, rng))
    }

    fn build(config: Config, cmp: C, rng: R) -> Self {
        let mut arena = Arena::new();
        let row0 = arena.new_row(None);
        Self {
            arena,
            rows: vec![row0],
            len: 0,
            current: Cell::new(NIL),
            cmp,
            heights: HeightGen::new(rng, config.max_height),
            config,
        }
    }

    // ========================================================================
    // Search
    // ========================================================================

    /// Moves the cursor to the rightmost entry whose key is `<= key`.
    ///
    /// If `key` is present this is the oldest entry carrying it and the
    /// method returns `true`. Otherwise the cursor lands on the predecessor of
    /// the insertion point and the method returns `false`; when every key is
    /// greater than `key` (or the list is empty) there is no current entry
    /// afterwards.
    ///
    /// ```
    /// use skipq::SkipList;
    ///
    /// let mut list = SkipList::new();
    /// list.insert(10, ());
    /// list.insert(20, ());
    ///
    /// assert!(!list.search(&15));
    /// assert_eq!(list.current_entry().unwrap().key(), &10);
    ///
    /// assert!(!list.search(&5));
    /// assert!(!list.has_current());
    /// ```
    pub fn search(&self, key: &K) -> bool {
        let idx = self.locate(key);
        // Landing on row 0's head means every key is greater.
        self.current.set(if self.arena.is_real(idx) { idx } else { NIL });
        self.arena.bound(idx).cmp_key(key, &self.cmp) == Ordering::Equal
    }

    /// Returns the value of the oldest entry with `key`, without moving the
    /// cursor.
    pub fn get(&self, key: &K) -> Option<&V> {
        let idx = self.locate(key);
        match self.arena.bound(idx).cmp_key(key, &self.cmp) {
            Ordering::Equal => self.arena.entry_at(idx).map(Entry::value),
            _ => None,
        }
    }

    /// Returns `true` if some entry has `key`.
    #[inline]
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Returns the number of entries with `key`.
    pub fn count_key(&self, key: &K) -> usize {
        self.same_key(key).count()
    }

    /// Descends from the top-left sentinel to the rightmost row-0 node whose
    /// bound is `<= key`. Returns row 0's head when no key qualifies.
    pub(crate) fn locate(&self, key: &K) -> Idx {
        let mut idx = self.top().head;
        loop {
            loop {
                let next = self.arena.next(idx);
                if self.arena.bound(next).cmp_key(key, &self.cmp) == Ordering::Greater {
                    break;
                }
                idx = next;
            }
            let below = self.arena.below(idx);
            if below == NIL {
                return idx;
            }
            idx = below;
        }
    }

    /// Walks left from real node `idx` to the first node of its duplicate
    /// block.
    pub(crate) fn block_start(&self, mut idx: Idx) -> Idx {
        let Some(entry) = self.arena.entry_at(idx) else {
            return idx;
        };
        let key = entry.key();
        loop {
            let prev = self.arena.prev(idx);
            if self.arena.bound(prev).cmp_key(key, &self.cmp) != Ordering::Equal {
                return idx;
            }
            idx = prev;
        }
    }

    // ========================================================================
    // Insert
    // ========================================================================

    /// Inserts an entry and makes it current.
    ///
    /// Equal keys are kept: the new entry goes in front of all existing
    /// entries with the same key. Returns the stored entry.
    pub fn insert(&mut self, key: K, value: V) -> &Entry<K, V> {
        let h = self.heights.next_height();
        if h >= self.height() {
            self.grow_to_height(h + 1);
        }

        let entry = self.arena.insert_entry(Entry::new(key, value));

        // The top row is always empty, start one row below it.
        let mut level = self.height() - 1;
        let mut idx = self.rows[level].head;
        let mut above = NIL;
        loop {
            idx = self.scan_before(idx, entry);
            if level <= h {
                above = self.arena.splice_after(idx, entry, above);
            }
            if level == 0 {
                break;
            }
            idx = self.arena.below(idx);
            level -= 1;
        }

        self.len += 1;
        self.current.set(above);
        self.arena.entry(entry)
    }

    /// Scans right from `idx` while the next node's key is strictly less than
    /// the key of `entry`, returning the last node passed.
    #[inline]
    fn scan_before(&self, mut idx: Idx, entry: Idx) -> Idx {
        let key = self.arena.entry(entry).key();
        loop {
            let next = self.arena.next(idx);
            if self.arena.bound(next).cmp_key(key, &self.cmp) != Ordering::Less {
                return idx;
            }
            idx = next;
        }
    }

    // ========================================================================
    // Removal
    // ========================================================================

    /// Removes the current entry and returns it.
    ///
    /// The cursor moves to the removed entry's successor, or becomes invalid
    /// if the removed entry was the last one. Empty rows left at the top are
    /// released, keeping a single empty row.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoCurrent`] if there is no current entry.
    pub fn remove(&mut self) -> Result<Entry<K, V>, Error> {
        let cur = self.current.get();
        let Some(entry) = self.real_entry(cur) else {
            return Err(Error::NoCurrent);
        };

        let successor = self.arena.next(cur);

        // Unlink the tower bottom-up.
        let mut idx = cur;
        while idx != NIL {
            idx = self.arena.unlink(idx).above;
        }
        let removed = self.arena.remove_entry(entry);
        self.len -= 1;

        self.current.set(if self.arena.is_real(successor) {
            successor
        } else {
            NIL
        });

        self.shrink_excess_levels();
        Ok(removed)
    }

    /// Removes the oldest entry with `key`.
    ///
    /// Leaves the cursor on the successor, as [`remove`](Self::remove) does.
    /// Returns `None` if the key is absent; the cursor is then where
    /// [`search`](Self::search) put it.
    pub fn remove_key(&mut self, key: &K) -> Option<Entry<K, V>> {
        if !self.search(key) {
            return None;
        }
        self.remove().ok()
    }

    /// Removes and returns the first entry.
    pub fn pop_first(&mut self) -> Option<Entry<K, V>> {
        self.first();
        self.remove().ok()
    }

    /// Removes and returns the last entry.
    pub fn pop_last(&mut self) -> Option<Entry<K, V>> {
        self.last();
        self.remove().ok()
    }

    /// Removes every entry and collapses the list to one empty row.
    pub fn clear(&mut self) {
        debug!(len = self.len, height = self.height(), "clearing skip list");
        self.arena.clear();
        let row0 = self.arena.new_row(None);
        self.rows.clear();
        self.rows.push(row0);
        self.len = 0;
        self.current.set(NIL);
    }

    // ========================================================================
    // Levels
    // ========================================================================

    /// Stacks empty rows until the top row index reaches `h`.
    fn grow_to_height(&mut self, h: usize) {
        while self.height() < h {
            let top = self.top();
            let row = self.arena.new_row(Some(top));
            self.rows.push(row);
        }
        trace!(height = self.height(), "grew skip list");
    }

    /// Drops the top row while it and the row below it are both empty.
    fn shrink_excess_levels(&mut self) {
        let before = self.height();
        while self.rows.len() > 1 {
            let top = self.top();
            let below = self.rows[self.rows.len() - 2];
            if !self.arena.row_is_empty(top) || !self.arena.row_is_empty(below) {
                break;
            }
            self.rows.pop();
            self.arena.free_row(top);
        }
        if self.height() != before {
            trace!(from = before, to = self.height(), "shrank skip list");
        }
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Moves the cursor to the first entry. Does nothing on an empty list.
    pub fn first(&self) {
        if self.len > 0 {
            self.current.set(self.arena.next(self.row0().head));
        }
    }

    /// Moves the cursor to the last entry. Does nothing on an empty list.
    pub fn last(&self) {
        if self.len > 0 {
            self.current.set(self.arena.prev(self.row0().tail));
        }
    }

    /// Moves the cursor one entry forward.
    ///
    /// Moving past the last entry leaves no current entry. Does nothing if
    /// there is no current entry.
    pub fn next(&self) {
        self.step(|arena, idx| arena.next(idx));
    }

    /// Moves the cursor one entry back.
    ///
    /// Moving before the first entry leaves no current entry. Does nothing if
    /// there is no current entry.
    pub fn prior(&self) {
        self.step(|arena, idx| arena.prev(idx));
    }

    #[inline]
    fn step(&self, f: impl Fn(&Arena<K, V>, Idx) -> Idx) {
        let cur = self.current.get();
        if !self.arena.is_real(cur) {
            return;
        }
        let to = f(&self.arena, cur);
        self.current.set(if self.arena.is_real(to) { to } else { NIL });
    }

    // ========================================================================
    // Sub-ranges and copies
    // ========================================================================

    /// Copies every entry with `from <= key < to` into a new list.
    ///
    /// The result shares nothing with `self`. Its RNG is seeded from the
    /// thread RNG; use [`sub_range_with_rng`](Self::sub_range_with_rng) for a
    /// reproducible layout.
    ///
    /// ```
    /// use skipq::SkipList;
    ///
    /// let list: SkipList<u32, ()> = [5, 10, 15, 20, 25].into_iter().map(|k| (k, ())).collect();
    /// let sub = list.sub_range(&10, &20);
    /// assert_eq!(sub.keys().copied().collect::<Vec<_>>(), [10, 15]);
    /// ```
    pub fn sub_range(&self, from: &K, to: &K) -> SkipList<K, V, C, R>
    where
        K: Clone,
        V: Clone,
        C: Clone,
        R: SeedableRng,
    {
        self.sub_range_with_rng(from, to, R::from_rng(&mut rand::rng()))
    }

    /// Like [`sub_range`](Self::sub_range), with an explicit RNG for the new
    /// list.
    pub fn sub_range_with_rng<R2: RngCore>(&self, from: &K, to: &K, rng: R2) -> SkipList<K, V, C, R2>
    where
        K: Clone,
        V: Clone,
        C: Clone,
    {
        let mut out = SkipList::build(self.config, self.cmp.clone(), rng);
        for entry in self.iter_from(from) {
            if self.cmp.compare(entry.key(), to) != Ordering::Less {
                break;
            }
            out.insert(entry.key().clone(), entry.value().clone());
        }
        out.current.set(NIL);
        debug!(len = out.len, "extracted sub-range");
        out
    }

    /// Rebuilds the list by inserting every entry, in order, into a fresh list
    /// using `rng`.
    ///
    /// Entries are re-inserted front to back, so each block of equal keys
    /// comes out in the reverse of its original order: recency is taken from
    /// the copy, not from the original insertions.
    pub fn copy_with_rng<R2: RngCore>(&self, rng: R2) -> SkipList<K, V, C, R2>
    where
        K: Clone,
        V: Clone,
        C: Clone,
    {
        let mut out = SkipList::build(self.config, self.cmp.clone(), rng);
        for entry in self.iter() {
            out.insert(entry.key().clone(), entry.value().clone());
        }
        out.current.set(NIL);
        debug!(len = out.len, "copied skip list");
        out
    }

    /// [`copy_with_rng`](Self::copy_with_rng) with an RNG seeded from the
    /// thread RNG.
    ///
    /// This is not `Clone`: the copy is rebuilt by re-insertion, so each block
    /// of equal keys comes out in reverse order and the tower layout differs.
    pub fn duplicate(&self) -> Self
    where
        K: Clone,
        V: Clone,
        C: Clone,
        R: SeedableRng,
    {
        self.copy_with_rng(R::from_rng(&mut rand::rng()))
    }
}

impl<K, V, C, R> SkipList<K, V, C, R> {
    // ========================================================================
    // Queries
    // ========================================================================

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of rows above row 0.
    ///
    /// An empty list has height 0. After an insertion the top row is always
    /// empty, reserved for the next tower that outgrows the list.
    #[inline]
    pub fn height(&self) -> usize {
        self.rows.len() - 1
    }

    /// Returns the configuration the list was built with.
    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the comparator.
    #[inline]
    pub fn comparator(&self) -> &C {
        &self.cmp
    }

    /// Returns `true` if the cursor is on an entry.
    #[inline]
    pub fn has_current(&self) -> bool {
        self.arena.is_real(self.current.get())
    }

    /// Returns the current entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoCurrent`] if there is no current entry.
    pub fn current_entry(&self) -> Result<&Entry<K, V>, Error> {
        self.real_entry(self.current.get())
            .map(|e| self.arena.entry(e))
            .ok_or(Error::NoCurrent)
    }

    /// Returns the number of rows the current entry's tower occupies
    /// (at least 1).
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoCurrent`] if there is no current entry.
    pub fn current_tower_height(&self) -> Result<usize, Error> {
        let cur = self.current.get();
        if !self.arena.is_real(cur) {
            return Err(Error::NoCurrent);
        }
        Ok(self.tower_height(cur))
    }

    /// Replaces the current entry's value, returning the old one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoCurrent`] if there is no current entry.
    pub fn set_value(&mut self, value: V) -> Result<V, Error> {
        self.current_value_mut()
            .map(|slot| mem::replace(slot, value))
    }

    /// Returns a mutable reference to the current entry's value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoCurrent`] if there is no current entry.
    pub fn current_value_mut(&mut self) -> Result<&mut V, Error> {
        let entry = self
            .real_entry(self.current.get())
            .ok_or(Error::NoCurrent)?;
        Ok(self.arena.entry_mut(entry).value_mut())
    }

    /// Returns clones of all entries in order.
    pub fn to_vec(&self) -> Vec<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        self.iter()
            .map(|e| (e.key().clone(), e.value().clone()))
            .collect()
    }

    // ========================================================================
    // Internal helpers
    // ========================================================================

    #[inline]
    fn real_entry(&self, idx: Idx) -> Option<Idx> {
        if idx == NIL {
            return None;
        }
        self.arena.node(idx).entry()
    }

    /// Counts the rows of the tower standing on row-0 node `idx`.
    pub(crate) fn tower_height(&self, mut idx: Idx) -> usize {
        let mut rows = 1;
        while self.arena.above(idx) != NIL {
            idx = self.arena.above(idx);
            rows += 1;
        }
        rows
    }

    #[inline]
    pub(crate) fn arena(&self) -> &Arena<K, V> {
        &self.arena
    }

    #[inline]
    pub(crate) fn rows(&self) -> &[Row] {
        &self.rows
    }

    #[inline]
    pub(crate) fn row0(&self) -> Row {
        self.rows[0]
    }

    #[inline]
    pub(crate) fn top(&self) -> Row {
        self.rows[self.rows.len() - 1]
    }

    #[inline]
    pub(crate) fn current_idx(&self) -> Idx {
        self.current.get()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for SkipList<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut list = SkipList::new();
        list.extend(iter);
        list
    }
}

impl<K, V, C, R> Extend<(K, V)> for SkipList<K, V, C, R>
where
    C: Compare<K>,
    R: RngCore,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C, R> fmt::Debug for SkipList<K, V, C, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}


#[cfg(test)]
mod bench_skipq {
    use super::*;
    use hdrhistogram::Histogram;
    use rand::Rng;
    use std::time::Instant;

    fn print_histogram(name: &str, hist: &Histogram<u64>) {
        println!(
            "{:24} p50: {:5} ns | p99: {:5} ns | p999: {:6} ns | min: {:4} | max: {:6}",
            name,
            hist.value_at_quantile(0.50),
            hist.value_at_quantile(0.99),
            hist.value_at_quantile(0.999),
            hist.min(),
            hist.max(),
        );
    }

    type BenchList = SkipList<u64, u64, Natural, SmallRng>;

    const ITERATIONS: usize = 100_000;

    fn make_list() -> BenchList {
        SkipList::with_rng(Natural, SmallRng::seed_from_u64(12345))
    }

    fn random_keys(seed: u64) -> Vec<u64> {
        let mut rng = SmallRng::seed_from_u64(seed);
        (0..ITERATIONS)
            .map(|_| rng.random_range(0..1_000_000))
            .collect()
    }

    #[test]
    #[ignore]
    fn bench_insert_random() {
        let mut list = make_list();
        let mut hist = Histogram::<u64>::new(3).unwrap();

        for key in random_keys(99999) {
            let start = Instant::now();
            list.insert(key, key);
            hist.record(start.elapsed().as_nanos() as u64).unwrap();
        }

        print_histogram("insert_random", &hist);
    }

    #[test]
    #[ignore]
    fn bench_search_hit() {
        let mut list = make_list();
        let keys = random_keys(99999);
        for &key in &keys {
            list.insert(key, key);
        }
        let mut hist = Histogram::<u64>::new(3).unwrap();

        for key in &keys {
            let start = Instant::now();
            let found = list.search(key);
            hist.record(start.elapsed().as_nanos() as u64).unwrap();
            assert!(found);
        }

        print_histogram("search_hit", &hist);
    }

    #[test]
    #[ignore]
    fn bench_remove_first() {
        let mut list = make_list();
        for key in random_keys(99999) {
            list.insert(key, key);
        }
        let mut hist = Histogram::<u64>::new(3).unwrap();

        while !list.is_empty() {
            let start = Instant::now();
            list.first();
            let _ = list.remove();
            hist.record(start.elapsed().as_nanos() as u64).unwrap();
        }

        print_histogram("remove_first", &hist);
    }
}

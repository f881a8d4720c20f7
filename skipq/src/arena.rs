//! Slab-backed storage for nodes and entries.
//!
//! The arena owns every [`QuadNode`] and every [`Entry`] of one skip list.
//! Indices stay valid until the slot is explicitly freed, so rows and towers
//! link by index and unlinking a node can never leave a dangling pointer.
//! Entries are stored once per tower; each node of the tower refers to the
//! same entry slot.
//!
//! Row-level primitives (creating a row, splicing a node after another,
//! bypassing a node) live here; the search and level bookkeeping live in
//! [`SkipList`](crate::SkipList).

use slab::Slab;

use crate::bound::Bound;
use crate::entry::Entry;
use crate::node::{Idx, NIL, QuadNode, Row};

pub(crate) struct Arena<K, V> {
    nodes: Slab<QuadNode>,
    entries: Slab<Entry<K, V>>,
}

impl<K, V> Arena<K, V> {
    pub(crate) fn new() -> Self {
        Self {
            nodes: Slab::new(),
            entries: Slab::new(),
        }
    }

    // ========================================================================
    // Access
    // ========================================================================

    /// Returns the node at `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is not an allocated node. Every link reachable from a
    /// row is allocated, so this only fires on a broken invariant.
    #[inline]
    pub(crate) fn node(&self, idx: Idx) -> &QuadNode {
        &self.nodes[idx]
    }

    #[inline]
    pub(crate) fn entry(&self, idx: Idx) -> &Entry<K, V> {
        &self.entries[idx]
    }

    #[inline]
    pub(crate) fn entry_mut(&mut self, idx: Idx) -> &mut Entry<K, V> {
        &mut self.entries[idx]
    }

    /// Returns the entry held by node `idx`, `None` for sentinels.
    #[inline]
    pub(crate) fn entry_at(&self, idx: Idx) -> Option<&Entry<K, V>> {
        self.node(idx).entry().map(|e| self.entry(e))
    }

    /// Returns the row key of node `idx`.
    #[inline]
    pub(crate) fn bound(&self, idx: Idx) -> Bound<&K> {
        self.node(idx).slot.map(|e| self.entry(e).key())
    }

    #[inline]
    pub(crate) fn next(&self, idx: Idx) -> Idx {
        self.node(idx).next
    }

    #[inline]
    pub(crate) fn prev(&self, idx: Idx) -> Idx {
        self.node(idx).prev
    }

    #[inline]
    pub(crate) fn above(&self, idx: Idx) -> Idx {
        self.node(idx).above
    }

    #[inline]
    pub(crate) fn below(&self, idx: Idx) -> Idx {
        self.node(idx).below
    }

    /// Returns `true` if `idx` holds a real entry.
    #[inline]
    pub(crate) fn is_real(&self, idx: Idx) -> bool {
        idx != NIL && self.node(idx).slot.is_key()
    }

    #[inline]
    pub(crate) fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub(crate) fn entry_count(&self) -> usize {
        self.entries.len()
    }

    // ========================================================================
    // Rows
    // ========================================================================

    /// Allocates an empty row, stacking its sentinels on `below` if given.
    pub(crate) fn new_row(&mut self, below: Option<Row>) -> Row {
        let head = self.nodes.insert(QuadNode::new(Bound::NegInfinity));
        let tail = self.nodes.insert(QuadNode::new(Bound::PosInfinity));

        self.nodes[head].next = tail;
        self.nodes[tail].prev = head;

        if let Some(below) = below {
            self.nodes[head].below = below.head;
            self.nodes[tail].below = below.tail;
            self.nodes[below.head].above = head;
            self.nodes[below.tail].above = tail;
        }

        Row { head, tail }
    }

    /// Frees an empty row and detaches it from the row below.
    pub(crate) fn free_row(&mut self, row: Row) {
        debug_assert!(self.row_is_empty(row), "freeing a non-empty row");

        let head = self.nodes.remove(row.head);
        let tail = self.nodes.remove(row.tail);

        if head.below != NIL {
            self.nodes[head.below].above = NIL;
        }
        if tail.below != NIL {
            self.nodes[tail.below].above = NIL;
        }
    }

    /// Returns `true` if the row holds only its sentinels.
    #[inline]
    pub(crate) fn row_is_empty(&self, row: Row) -> bool {
        self.next(row.head) == row.tail
    }

    // ========================================================================
    // Nodes
    // ========================================================================

    /// Stores an entry and returns its slot.
    #[inline]
    pub(crate) fn insert_entry(&mut self, entry: Entry<K, V>) -> Idx {
        self.entries.insert(entry)
    }

    /// Frees an entry slot, returning the entry.
    #[inline]
    pub(crate) fn remove_entry(&mut self, idx: Idx) -> Entry<K, V> {
        self.entries.remove(idx)
    }

    /// Allocates a node for entry `entry` and splices it right after `prev`
    /// in `prev`'s row. Towers are built top-down, so the node is hung below
    /// `above` (the same tower one row up) when that is not `NIL`.
    pub(crate) fn splice_after(&mut self, prev: Idx, entry: Idx, above: Idx) -> Idx {
        let next = self.nodes[prev].next;
        debug_assert!(next != NIL, "splice after a row tail");

        let mut node = QuadNode::new(Bound::Key(entry));
        node.prev = prev;
        node.next = next;
        node.above = above;
        let idx = self.nodes.insert(node);

        self.nodes[prev].next = idx;
        self.nodes[next].prev = idx;
        if above != NIL {
            self.nodes[above].below = idx;
        }
        idx
    }

    /// Bypasses node `idx` in its row and frees it.
    ///
    /// Vertical links of the neighbours in the tower are left for the caller,
    /// which unlinks whole towers bottom-up.
    pub(crate) fn unlink(&mut self, idx: Idx) -> QuadNode {
        let node = self.nodes.remove(idx);
        debug_assert!(node.slot.is_key(), "unlinking a sentinel");

        self.nodes[node.prev].next = node.next;
        self.nodes[node.next].prev = node.prev;
        node
    }

    /// Drops every node and entry.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(arena: &Arena<u32, ()>, row: Row) -> Vec<u32> {
        let mut out = Vec::new();
        let mut idx = arena.next(row.head);
        while idx != row.tail {
            out.push(**arena.bound(idx).key().unwrap());
            idx = arena.next(idx);
        }
        out
    }

    #[test]
    fn new_row_links_sentinels() {
        let mut arena: Arena<u32, ()> = Arena::new();
        let row0 = arena.new_row(None);
        let row1 = arena.new_row(Some(row0));

        assert!(arena.row_is_empty(row0));
        assert_eq!(arena.prev(row0.tail), row0.head);
        assert_eq!(arena.above(row0.head), row1.head);
        assert_eq!(arena.above(row0.tail), row1.tail);
        assert_eq!(arena.below(row1.head), row0.head);
        assert_eq!(arena.below(row1.tail), row0.tail);
        assert_eq!(arena.bound(row0.head), Bound::NegInfinity);
        assert_eq!(arena.bound(row0.tail), Bound::PosInfinity);
        assert_eq!(arena.node_count(), 4);
    }

    #[test]
    fn free_row_detaches_from_below() {
        let mut arena: Arena<u32, ()> = Arena::new();
        let row0 = arena.new_row(None);
        let row1 = arena.new_row(Some(row0));

        arena.free_row(row1);
        assert_eq!(arena.above(row0.head), NIL);
        assert_eq!(arena.above(row0.tail), NIL);
        assert_eq!(arena.node_count(), 2);
    }

    #[test]
    fn splice_and_unlink() {
        let mut arena: Arena<u32, ()> = Arena::new();
        let row = arena.new_row(None);

        let e1 = arena.insert_entry(Entry::new(1, ()));
        let e3 = arena.insert_entry(Entry::new(3, ()));
        let e2 = arena.insert_entry(Entry::new(2, ()));

        let n1 = arena.splice_after(row.head, e1, NIL);
        let n3 = arena.splice_after(n1, e3, NIL);
        let n2 = arena.splice_after(n1, e2, NIL);
        assert_eq!(keys(&arena, row), vec![1, 2, 3]);
        assert!(arena.is_real(n2));
        assert!(!arena.is_real(row.tail));

        let removed = arena.unlink(n2);
        assert_eq!(removed.prev, n1);
        assert_eq!(removed.next, n3);
        assert_eq!(keys(&arena, row), vec![1, 3]);
        assert_eq!(arena.prev(n3), n1);

        assert_eq!(arena.remove_entry(e2).into_pair(), (2, ()));
        assert_eq!(arena.entry_count(), 2);
    }

    #[test]
    fn splice_links_tower() {
        let mut arena: Arena<u32, ()> = Arena::new();
        let row0 = arena.new_row(None);
        let row1 = arena.new_row(Some(row0));

        let e = arena.insert_entry(Entry::new(9, ()));
        let high = arena.splice_after(row1.head, e, NIL);
        let low = arena.splice_after(row0.head, e, high);

        assert_eq!(arena.above(low), high);
        assert_eq!(arena.below(high), low);
        assert_eq!(arena.entry_at(high).map(Entry::key), Some(&9));
    }
}

//! Structural dump and invariant checks.

use core::cmp::Ordering;
use core::fmt;
use std::collections::HashMap;

use rand_core::RngCore;

use crate::bound::Bound;
use crate::compare::Compare;
use crate::node::{Idx, NIL};
use crate::skiplist::SkipList;

impl<K, V, C, R> SkipList<K, V, C, R> {
    /// Returns a printable view of every row, top row first.
    ///
    /// Each tower is drawn as a column; the current entry is marked with `>`.
    /// The layout is for humans and may change.
    ///
    /// ```
    /// use skipq::SkipList;
    ///
    /// let mut list = SkipList::new();
    /// list.insert(10, ());
    /// let dump = list.structure().to_string();
    /// assert!(dump.contains("-oo"));
    /// assert!(dump.contains(">10"));
    /// ```
    pub fn structure(&self) -> Structure<'_, K, V, C, R> {
        Structure { list: self }
    }
}

/// Display adapter returned by [`SkipList::structure`].
pub struct Structure<'a, K, V, C, R> {
    list: &'a SkipList<K, V, C, R>,
}

impl<K: fmt::Display, V, C, R> fmt::Display for Structure<'_, K, V, C, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let list = self.list;
        let arena = list.arena();
        let current = list.current_idx();

        // One column per tower: (row-0 node, rows occupied, rendered key).
        let mut columns = Vec::with_capacity(list.len());
        let mut idx = arena.next(list.row0().head);
        while arena.is_real(idx) {
            let label = match arena.bound(idx) {
                Bound::Key(key) => key.to_string(),
                _ => String::new(),
            };
            columns.push((idx, list.tower_height(idx), label));
            idx = arena.next(idx);
        }
        let width = columns.iter().map(|(_, _, l)| l.chars().count()).max().unwrap_or(0);

        writeln!(f, "height {}, {} entries", list.height(), list.len())?;
        for level in (0..list.rows().len()).rev() {
            write!(f, "{:>3}: -oo", level)?;
            for (node, rows, label) in &columns {
                let mark = if level == 0 && *node == current { '>' } else { ' ' };
                if *rows > level {
                    write!(f, "  {}{:<width$}", mark, label, width = width)?;
                } else {
                    write!(f, "   {:<width$}", "", width = width)?;
                }
            }
            writeln!(f, "  +oo")?;
        }
        Ok(())
    }
}

impl<K, V, C, R> SkipList<K, V, C, R>
where
    C: Compare<K>,
    R: RngCore,
{
    /// Walks every row and link, panicking on the first broken invariant.
    ///
    /// Intended for tests and debugging. Runs in O(n) plus the cost of the
    /// row walks.
    ///
    /// # Panics
    ///
    /// Panics if the structure is inconsistent.
    pub fn check_invariants(&self) {
        let arena = self.arena();
        let rows = self.rows();
        assert!(!rows.is_empty(), "row 0 missing");

        // Position of every entry along row 0.
        let mut order: HashMap<Idx, usize> = HashMap::with_capacity(self.len());
        let mut nodes = 0;

        for (level, row) in rows.iter().enumerate() {
            assert!(
                matches!(arena.bound(row.head), Bound::NegInfinity),
                "row {level} head is not -oo"
            );
            assert!(
                matches!(arena.bound(row.tail), Bound::PosInfinity),
                "row {level} tail is not +oo"
            );
            assert_eq!(arena.prev(row.head), NIL, "row {level} head has a prev link");
            assert_eq!(arena.next(row.tail), NIL, "row {level} tail has a next link");

            if level == 0 {
                assert_eq!(arena.below(row.head), NIL, "row 0 has sentinels below");
            } else {
                let under = rows[level - 1];
                assert_eq!(arena.below(row.head), under.head, "row {level} head below");
                assert_eq!(arena.below(row.tail), under.tail, "row {level} tail below");
                assert_eq!(arena.above(under.head), row.head, "row {level} head above");
                assert_eq!(arena.above(under.tail), row.tail, "row {level} tail above");
            }

            let mut prev = row.head;
            let mut idx = arena.next(row.head);
            let mut last_pos = None;
            let mut count = 0;
            while idx != row.tail {
                assert_ne!(idx, NIL, "row {level} is not closed by its tail");
                assert_eq!(arena.prev(idx), prev, "row {level} prev link broken");
                let entry = arena
                    .node(idx)
                    .entry()
                    .unwrap_or_else(|| panic!("sentinel inside row {level}"));

                let pred = arena.bound(prev);
                let here = arena.bound(idx);
                assert_ne!(
                    pred.cmp_with(&here, self.comparator()),
                    Ordering::Greater,
                    "row {level} out of order"
                );

                if level == 0 {
                    assert_eq!(arena.below(idx), NIL, "row 0 node with a node below");
                    order.insert(entry, count);
                } else {
                    let under = arena.below(idx);
                    assert_ne!(under, NIL, "row {level} node without a node below");
                    assert_eq!(arena.above(under), idx, "tower links disagree at row {level}");
                    assert_eq!(arena.node(under).entry(), Some(entry), "tower mixes entries");
                }
                let above = arena.above(idx);
                if above != NIL {
                    assert_eq!(arena.below(above), idx, "tower links disagree at row {level}");
                }

                // Every row keeps row 0's relative order, duplicates included.
                let pos = *order
                    .get(&entry)
                    .unwrap_or_else(|| panic!("row {level} entry missing from row 0"));
                if let Some(last) = last_pos {
                    assert!(pos > last, "row {level} reorders entries");
                }
                last_pos = Some(pos);

                prev = idx;
                idx = arena.next(idx);
                count += 1;
            }
            assert_eq!(arena.prev(row.tail), prev, "row {level} tail prev link broken");

            if level == 0 {
                assert_eq!(count, self.len(), "row 0 length disagrees with len");
            }
            nodes += count + 2;
        }

        assert_eq!(arena.entry_count(), self.len(), "leaked or missing entries");
        assert_eq!(arena.node_count(), nodes, "leaked nodes");

        let top = self.top();
        assert!(arena.row_is_empty(top), "top row is not empty");
        if rows.len() > 1 {
            let under = rows[rows.len() - 2];
            assert!(!arena.row_is_empty(under), "more than one empty row on top");
        }

        let limit = self.config().max_height as usize + 1;
        for &node in order_nodes(self).iter() {
            let rows = self.tower_height(node);
            assert!(rows <= limit, "tower of {rows} rows exceeds {limit}");
        }

        let current = self.current_idx();
        if current != NIL {
            assert!(arena.is_real(current), "cursor on a sentinel");
            assert_eq!(arena.below(current), NIL, "cursor above row 0");
        }
    }
}

/// Row-0 nodes in order.
fn order_nodes<K, V, C, R>(list: &SkipList<K, V, C, R>) -> Vec<Idx> {
    let arena = list.arena();
    let mut out = Vec::with_capacity(list.len());
    let mut idx = arena.next(list.row0().head);
    while arena.is_real(idx) {
        out.push(idx);
        idx = arena.next(idx);
    }
    out
}

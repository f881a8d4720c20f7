//! Quad-linked nodes and level rows.
//!
//! Nodes live in a slab and refer to each other by index. An empty link holds
//! the sentinel [`NIL`] instead of `Option<usize>`, which keeps links one word
//! wide.
//!
//! ```text
//! row 2:  -oo ───────────────────────────► +oo
//!          │                                │
//! row 1:  -oo ──────────► 20 ─────────────► +oo
//!          │               │                │
//! row 0:  -oo ──► 10 ──► 20 ──► 30 ──────► +oo
//! ```
//!
//! Horizontal links (`next`/`prev`) stay inside one row. Vertical links
//! (`above`/`below`) join the nodes of one tower, and the sentinels of
//! adjacent rows.

use crate::bound::Bound;

/// Index of a node or entry in the arena.
pub(crate) type Idx = usize;

/// Reserved "no link" index.
pub(crate) const NIL: Idx = usize::MAX;

/// A node with four directional links.
///
/// Real nodes hold `Bound::Key(entry)` where `entry` indexes the entry slab.
/// All nodes of one tower share the same entry index.
#[derive(Debug, Clone)]
pub(crate) struct QuadNode {
    pub(crate) slot: Bound<Idx>,
    pub(crate) next: Idx,
    pub(crate) prev: Idx,
    pub(crate) above: Idx,
    pub(crate) below: Idx,
}

impl QuadNode {
    #[inline]
    pub(crate) fn new(slot: Bound<Idx>) -> Self {
        Self {
            slot,
            next: NIL,
            prev: NIL,
            above: NIL,
            below: NIL,
        }
    }

    /// Entry index of a real node, `None` for sentinels.
    #[inline]
    pub(crate) fn entry(&self) -> Option<Idx> {
        match self.slot {
            Bound::Key(e) => Some(e),
            _ => None,
        }
    }
}

/// One level of the skip list: the two sentinels bounding it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Row {
    pub(crate) head: Idx,
    pub(crate) tail: Idx,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_node_is_unlinked() {
        let node = QuadNode::new(Bound::Key(4));
        assert_eq!(node.next, NIL);
        assert_eq!(node.prev, NIL);
        assert_eq!(node.above, NIL);
        assert_eq!(node.below, NIL);
        assert_eq!(node.entry(), Some(4));
    }

    #[test]
    fn sentinels_have_no_entry() {
        assert_eq!(QuadNode::new(Bound::NegInfinity).entry(), None);
        assert_eq!(QuadNode::new(Bound::PosInfinity).entry(), None);
    }
}

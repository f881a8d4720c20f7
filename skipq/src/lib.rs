//! A quad-linked skip list: a sorted multimap with a navigation cursor.
//!
//! Entries are kept in key order across a stack of doubly linked rows. Row 0
//! holds every entry; each higher row holds a random subset, roughly half of
//! the row below, so search walks down a "express lane" structure in
//! O(log n) expected steps.
//!
//! ```text
//! row 2:  -oo ──────────────────────────► +oo
//! row 1:  -oo ──────► 20 ───────────────► +oo
//! row 0:  -oo ──► 10 ──► 20 ──► 30 ─────► +oo
//! ```
//!
//! Nodes link in four directions (`next`, `prev`, `above`, `below`) by index
//! into a slab arena, so there are no raw pointers and no reference counting.
//!
//! # Quick Start
//!
//! ```
//! use skipq::SkipList;
//!
//! let mut list = SkipList::new();
//! list.insert("carol", 3);
//! list.insert("alice", 1);
//! list.insert("bob", 2);
//!
//! let names: Vec<_> = list.keys().copied().collect();
//! assert_eq!(names, ["alice", "bob", "carol"]);
//!
//! // Cursor navigation
//! assert!(list.search(&"bob"));
//! list.next();
//! assert_eq!(list.current_entry().unwrap().key(), &"carol");
//!
//! // Remove at the cursor
//! let removed = list.remove().unwrap();
//! assert_eq!(removed.into_pair(), ("carol", 3));
//! ```
//!
//! # Duplicate Keys
//!
//! Equal keys are kept side by side, newest first:
//!
//! ```
//! use skipq::SkipList;
//!
//! let mut list = SkipList::new();
//! list.insert(5, "a");
//! list.insert(5, "b");
//! list.insert(3, "c");
//!
//! let order: Vec<_> = list.values().copied().collect();
//! assert_eq!(order, ["c", "b", "a"]);
//! ```
//!
//! # Custom Ordering
//!
//! Any [`Compare`] implementation orders the keys, including plain closures:
//!
//! ```
//! use rand::SeedableRng;
//! use rand::rngs::SmallRng;
//! use skipq::SkipList;
//!
//! let rng = SmallRng::seed_from_u64(7);
//! let mut list: SkipList<u32, (), _, _> = SkipList::with_rng(|a: &u32, b: &u32| b.cmp(a), rng);
//! list.extend([(1, ()), (3, ()), (2, ())]);
//!
//! assert_eq!(list.keys().copied().collect::<Vec<_>>(), [3, 2, 1]);
//! ```
//!
//! # Complexity
//!
//! | Operation | Expected | Notes |
//! |-----------|----------|-------|
//! | `search` / `get` | O(log n) | moves the cursor / does not |
//! | `insert` | O(log n) | new entry becomes current |
//! | `remove` | O(log n) | removes the current entry |
//! | `first` / `last` / `next` / `prior` | O(1) | |
//! | `sub_range` | O(m log m) | m entries copied |
//!
//! # Logging
//!
//! Level changes and bulk operations emit [`tracing`] events at `trace` and
//! `debug` level. The crate installs no subscriber.

#![warn(missing_docs)]

mod arena;
mod bound;
pub mod compare;
pub mod config;
mod diag;
pub mod entry;
pub mod error;
mod height;
pub mod iter;
mod node;
pub mod skiplist;

pub use compare::{CaseInsensitive, Compare, Natural};
pub use config::{Config, MAX_HEIGHT};
pub use diag::Structure;
pub use entry::Entry;
pub use error::Error;
pub use iter::{Iter, IterRev, Keys, Lookahead, Values};
pub use skiplist::SkipList;

//! Key comparators.
//!
//! The skip list orders keys through a [`Compare`] implementation supplied at
//! construction. [`Natural`] uses `Ord`; any `Fn(&K, &K) -> Ordering` closure
//! also works.

use core::cmp::Ordering;

/// A total order over keys.
///
/// Implementations must be consistent: `compare(a, b)` is the reverse of
/// `compare(b, a)`, and the order is transitive. A comparator that breaks this
/// leaves row order undefined.
pub trait Compare<K: ?Sized> {
    /// Compares two keys.
    fn compare(&self, a: &K, b: &K) -> Ordering;
}

/// Orders keys by their [`Ord`] implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Natural;

impl<K: Ord + ?Sized> Compare<K> for Natural {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

/// Orders string keys ignoring ASCII case.
///
/// ```
/// use skipq::{CaseInsensitive, SkipList};
///
/// let mut list = SkipList::with_comparator(CaseInsensitive);
/// list.insert("beta".to_string(), 2);
/// list.insert("Alpha".to_string(), 1);
///
/// let keys: Vec<_> = list.keys().map(String::as_str).collect();
/// assert_eq!(keys, ["Alpha", "beta"]);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CaseInsensitive;

impl<K: AsRef<str> + ?Sized> Compare<K> for CaseInsensitive {
    fn compare(&self, a: &K, b: &K) -> Ordering {
        let a = a.as_ref().bytes().map(|c| c.to_ascii_lowercase());
        let b = b.as_ref().bytes().map(|c| c.to_ascii_lowercase());
        a.cmp(b)
    }
}

impl<K: ?Sized, F> Compare<K> for F
where
    F: Fn(&K, &K) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self(a, b)
    }
}

//! Row keys with explicit infinities.
//!
//! Every row is closed by a head holding [`Bound::NegInfinity`] and a tail
//! holding [`Bound::PosInfinity`]. Real keys sit strictly between them, so a
//! scan can always look at `next` without a null check and no key value is
//! reserved for the sentinels.

use core::cmp::Ordering;

use crate::compare::Compare;

/// A key extended with negative and positive infinity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Bound<K> {
    /// Less than every key. Held by row heads.
    NegInfinity,
    /// A real key.
    Key(K),
    /// Greater than every key. Held by row tails.
    PosInfinity,
}

impl<K> Bound<K> {
    /// Returns `true` for a real key.
    #[inline]
    pub(crate) fn is_key(&self) -> bool {
        matches!(self, Bound::Key(_))
    }

    /// Returns the real key, if any.
    #[inline]
    pub(crate) fn key(&self) -> Option<&K> {
        match self {
            Bound::Key(k) => Some(k),
            _ => None,
        }
    }

    /// Maps the real key with `f`, keeping the infinities.
    #[inline]
    pub(crate) fn map<T, F: FnOnce(K) -> T>(self, f: F) -> Bound<T> {
        match self {
            Bound::NegInfinity => Bound::NegInfinity,
            Bound::Key(k) => Bound::Key(f(k)),
            Bound::PosInfinity => Bound::PosInfinity,
        }
    }
}

impl<K: ?Sized> Bound<&K> {
    /// Total order over bounds, comparing real keys with `cmp`.
    pub(crate) fn cmp_with<C: Compare<K> + ?Sized>(&self, other: &Self, cmp: &C) -> Ordering {
        match (self, other) {
            (Bound::Key(a), Bound::Key(b)) => cmp.compare(a, b),
            (a, b) => a.rank().cmp(&b.rank()),
        }
    }

    /// Compares this bound against a real key.
    #[inline]
    pub(crate) fn cmp_key<C: Compare<K> + ?Sized>(&self, key: &K, cmp: &C) -> Ordering {
        match self {
            Bound::NegInfinity => Ordering::Less,
            Bound::Key(k) => cmp.compare(k, key),
            Bound::PosInfinity => Ordering::Greater,
        }
    }

    #[inline]
    fn rank(&self) -> u8 {
        match self {
            Bound::NegInfinity => 0,
            Bound::Key(_) => 1,
            Bound::PosInfinity => 2,
        }
    }
}

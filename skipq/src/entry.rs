//! The unit of storage: an immutable key with a mutable value.

use core::fmt;

/// A key-value pair stored in a [`SkipList`](crate::SkipList).
///
/// The key is fixed once the entry is inserted; changing it would break row
/// order. To re-key an entry, remove it and insert a new one.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Entry<K, V> {
    key: K,
    value: V,
}

impl<K, V> Entry<K, V> {
    #[inline]
    pub(crate) fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    /// Returns the key.
    #[inline]
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Returns the value.
    #[inline]
    pub fn value(&self) -> &V {
        &self.value
    }

    #[inline]
    pub(crate) fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    /// Returns the key and value as a pair of references.
    #[inline]
    pub fn pair(&self) -> (&K, &V) {
        (&self.key, &self.value)
    }

    /// Consumes the entry, returning the key and value.
    #[inline]
    pub fn into_pair(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Entry<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}, {:?}]", self.key, self.value)
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for Entry<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.key, self.value)
    }
}

impl<K, V> From<Entry<K, V>> for (K, V) {
    fn from(entry: Entry<K, V>) -> Self {
        entry.into_pair()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors() {
        let mut entry = Entry::new(5, "a".to_string());
        assert_eq!(entry.key(), &5);
        assert_eq!(entry.value(), "a");

        entry.value_mut().push('b');
        assert_eq!(entry.pair(), (&5, &"ab".to_string()));
        assert_eq!(entry.into_pair(), (5, "ab".to_string()));
    }

    #[test]
    fn formatting() {
        let entry = Entry::new(3, "c");
        assert_eq!(entry.to_string(), "[3, c]");
        assert_eq!(format!("{:?}", entry), "[3, \"c\"]");
    }
}

//! Error types for skip list operations.

/// Errors returned by [`SkipList`](crate::SkipList) and its iterators.
///
/// A missing key is not an error: [`SkipList::search`](crate::SkipList::search)
/// reports it by leaving the list without a current entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The operation needs a current entry and the cursor is invalid.
    #[error("no current entry")]
    NoCurrent,

    /// `take_next` was called on an iterator with nothing left.
    #[error("iterator is exhausted")]
    Exhausted,

    /// The configured height cap is outside the supported range.
    #[error("max height {requested} exceeds the supported limit of {limit}")]
    InvalidMaxHeight {
        /// The rejected value.
        requested: u8,
        /// Largest accepted value.
        limit: u8,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(Error::NoCurrent.to_string(), "no current entry");
        assert_eq!(Error::Exhausted.to_string(), "iterator is exhausted");
        assert_eq!(
            Error::InvalidMaxHeight {
                requested: 40,
                limit: 32
            }
            .to_string(),
            "max height 40 exceeds the supported limit of 32"
        );
    }
}

//! Error types for the persistent containers.
//!
//! All failures are reported synchronously at the offending call through
//! [`CollectionError`]; nothing in this crate swallows or retries an error.
//! Plain "not found" outcomes are *not* errors — searches report them as
//! `None` — but the exactly-one-match query family does fail when zero or
//! more than one element qualifies.

use thiserror::Error;

/// Error raised by persistent and transient container operations.
///
/// The variants fall into four groups:
///
/// - **Range errors**: an index or span falls outside the container —
///   [`IndexOutOfRange`](Self::IndexOutOfRange),
///   [`RangeOutOfBounds`](Self::RangeOutOfBounds).
/// - **State errors**: a precondition-bearing operation was invoked while
///   its precondition is unmet — [`Uninitialized`](Self::Uninitialized),
///   [`CapacityMismatch`](Self::CapacityMismatch),
///   [`CapacityTooSmall`](Self::CapacityTooSmall).
/// - **Shape errors**: two sequences cannot be compared element-wise —
///   [`LengthMismatch`](Self::LengthMismatch).
/// - **Exactly-one-match errors**: a query that promises a single element
///   found zero or several — [`NoMatch`](Self::NoMatch),
///   [`AmbiguousMatch`](Self::AmbiguousMatch).
///
/// # Examples
///
/// ```rust
/// use cowslice::{CollectionError, PersistentArray};
///
/// let array = PersistentArray::from_slice(&[1, 2, 3]);
/// let error = array.insert(7, 0).unwrap_err();
/// assert_eq!(
///     error,
///     CollectionError::IndexOutOfRange { index: 7, length: 3 }
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CollectionError {
    /// An index fell outside the valid range of the container.
    #[error("index out of range: {index} (length {length})")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// The container length the index was checked against.
        length: usize,
    },

    /// A span described by a start index and a count fell outside the
    /// container.
    #[error("range out of bounds: start {start}, count {count} (length {length})")]
    RangeOutOfBounds {
        /// The first index of the span.
        start: usize,
        /// The number of elements in the span.
        count: usize,
        /// The container length the span was checked against.
        length: usize,
    },

    /// An operation with a public contract was invoked on an uninitialized
    /// array handle.
    #[error("operation on an uninitialized persistent array")]
    Uninitialized,

    /// Ownership transfer requires the transient's length to equal its
    /// capacity exactly.
    #[error("cannot transfer ownership: length {length} does not equal capacity {capacity}")]
    CapacityMismatch {
        /// The transient's current element count.
        length: usize,
        /// The transient's current logical capacity.
        capacity: usize,
    },

    /// A capacity change would shrink the store below the live element
    /// count.
    #[error("capacity {capacity} is smaller than the current length {length}")]
    CapacityTooSmall {
        /// The requested capacity.
        capacity: usize,
        /// The transient's current element count.
        length: usize,
    },

    /// Two sequences of different lengths cannot be compared element-wise.
    #[error("sequence lengths differ: {left} versus {right}")]
    LengthMismatch {
        /// Length of the left-hand sequence.
        left: usize,
        /// Length of the right-hand sequence.
        right: usize,
    },

    /// A query expecting exactly one element found none.
    #[error("expected exactly one matching element, found none")]
    NoMatch,

    /// A query expecting exactly one element found more than one.
    #[error("expected exactly one matching element, found several")]
    AmbiguousMatch,
}

impl CollectionError {
    /// Builds an [`IndexOutOfRange`](Self::IndexOutOfRange) error.
    #[inline]
    #[must_use]
    pub const fn index_out_of_range(index: usize, length: usize) -> Self {
        Self::IndexOutOfRange { index, length }
    }

    /// Builds a [`RangeOutOfBounds`](Self::RangeOutOfBounds) error.
    #[inline]
    #[must_use]
    pub const fn range_out_of_bounds(start: usize, count: usize, length: usize) -> Self {
        Self::RangeOutOfBounds {
            start,
            count,
            length,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::CollectionError;

    #[test]
    fn test_display_carries_offending_numbers() {
        let error = CollectionError::index_out_of_range(4, 3);
        assert_eq!(error.to_string(), "index out of range: 4 (length 3)");

        let error = CollectionError::range_out_of_bounds(2, 5, 3);
        assert_eq!(
            error.to_string(),
            "range out of bounds: start 2, count 5 (length 3)"
        );
    }

    #[test]
    fn test_errors_are_comparable() {
        assert_eq!(CollectionError::NoMatch, CollectionError::NoMatch);
        assert_ne!(CollectionError::NoMatch, CollectionError::AmbiguousMatch);
    }
}

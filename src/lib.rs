//! # cowslice
//!
//! Persistent (immutable) indexed collections backed by flat
//! copy-on-write stores, with transient builders for batch mutation.
//!
//! ## Overview
//!
//! This library provides value containers that behave like arrays and
//! lists from the caller's perspective but never change after
//! construction: every mutating operation returns a new container sharing
//! no mutable state with the original. It is designed for environments
//! without a usable native persistent-collection facility — in particular
//! it never relies on thread-local caches for correctness.
//!
//! - [`PersistentArray`]: a value handle over an exclusively-owned
//!   fixed-size backing store; all mutation is copy-on-write.
//! - [`TransientArray`]: the array's mutable staging companion with
//!   amortized-growth capacity management and one-time ownership transfer.
//! - [`PersistentList`]: a reference-style analogue over a dynamically
//!   growable store; same contract, simpler growth.
//! - [`TransientList`]: the list's staging companion with a revision
//!   counter per structural change.
//! - [`StructuralView`]: element-wise equality, ordering, and hashing of
//!   any fixed-size view under caller-supplied comparers.
//!
//! ## Feature Flags
//!
//! - `arc`: share backing stores with `Arc` instead of `Rc`, making the
//!   persistent types `Send + Sync`.
//! - `serde`: (de)serialize the persistent containers as plain sequences.
//!
//! ## Example
//!
//! ```rust
//! use cowslice::PersistentArray;
//!
//! let array = PersistentArray::from_slice(&[1, 2, 3]);
//! let changed = array.update(0, 9).unwrap();
//!
//! assert_eq!(changed.to_vec(), vec![9, 2, 3]);
//! assert_eq!(array.to_vec(), vec![1, 2, 3]); // Original unchanged
//!
//! // Batch work goes through a transient:
//! let mut transient = array.transient();
//! transient.push_back(4);
//! transient.push_back(5);
//! transient.set_capacity(transient.len()).unwrap();
//! let extended = transient.move_to_persistent().unwrap();
//! assert_eq!(extended.len(), 5);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

// =============================================================================
// Reference Counter Type Alias
// =============================================================================

/// Reference-counted smart pointer type.
///
/// When the `arc` feature is enabled, this is `std::sync::Arc`, which is
/// thread-safe but has slightly higher overhead.
///
/// When the `arc` feature is disabled (default), this is `std::rc::Rc`,
/// which is faster but not thread-safe.
#[cfg(feature = "arc")]
pub(crate) type ReferenceCounter<T> = std::sync::Arc<T>;

#[cfg(not(feature = "arc"))]
pub(crate) type ReferenceCounter<T> = std::rc::Rc<T>;

mod array;
mod error;
mod list;
mod query;
pub mod structural;

pub use array::PersistentArray;
pub use array::PersistentArrayIntoIterator;
pub use array::PersistentArrayIterator;
pub use array::TransientArray;
pub use error::CollectionError;
pub use list::PersistentList;
pub use list::PersistentListIntoIterator;
pub use list::PersistentListIterator;
pub use list::TransientList;
pub use structural::StructuralView;

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types.
///
/// # Usage
///
/// ```rust
/// use cowslice::prelude::*;
/// ```
pub mod prelude {
    pub use crate::CollectionError;
    pub use crate::PersistentArray;
    pub use crate::PersistentList;
    pub use crate::StructuralView;
    pub use crate::TransientArray;
    pub use crate::TransientList;
}

// =============================================================================
// Tests
// =============================================================================

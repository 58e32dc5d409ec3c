//! Element-wise comparison of fixed-size sequences.
//!
//! Handle equality on the persistent containers compares backing-store
//! identity, never contents. This module is the content-comparison seam:
//! [`StructuralView`] wraps any fixed-size view — a persistent container, a
//! transient, a Rust array, or a plain slice — and compares it to another
//! under a caller-supplied equality, ordering, or hash function. The
//! container types never depend on their element's own trait
//! implementations for this; the comparer is always an argument (with
//! natural-order defaults for convenience).
//!
//! # Examples
//!
//! ```rust
//! use cowslice::{PersistentArray, StructuralView};
//!
//! let array = PersistentArray::from_slice(&[1, 2, 3]);
//! let view = StructuralView::new(array.as_slice());
//!
//! assert!(view.equals(&[1, 2, 3]));
//! assert!(!view.equals(&[1, 2]));
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::hash::{DefaultHasher, Hash, Hasher};

use crate::error::CollectionError;

// =============================================================================
// Constants
// =============================================================================

/// How many trailing elements participate in a structural hash.
///
/// Bounding the hash makes its cost independent of sequence length; the
/// price is that long sequences differing only early collide. This is a
/// deliberate approximation, not a collision-resistant digest.
const HASH_ELEMENT_LIMIT: usize = 8;

/// Fixed odd multiplier for the hash mixing function.
const HASH_MULTIPLIER: u64 = 31;

// =============================================================================
// Free Functions
// =============================================================================

/// Compares two slices element-wise under `eq`.
///
/// A length mismatch is `false`, not an error.
///
/// # Examples
///
/// ```rust
/// use cowslice::structural::structural_equals;
///
/// assert!(structural_equals(&[1, 2, 3], &[1, 2, 3], |a, b| a == b));
/// assert!(!structural_equals(&[1, 2], &[1, 3], |a, b| a == b));
/// ```
pub fn structural_equals<T, F>(left: &[T], right: &[T], mut eq: F) -> bool
where
    F: FnMut(&T, &T) -> bool,
{
    if left.len() != right.len() {
        return false;
    }
    left.iter()
        .zip(right.iter())
        .all(|(first, second)| eq(first, second))
}

/// Compares two slices element-wise under `compare`, short-circuiting on
/// the first non-equal pair.
///
/// # Errors
///
/// [`CollectionError::LengthMismatch`] if the slices differ in length —
/// sequences of different shapes have no element-wise order.
///
/// # Examples
///
/// ```rust
/// use std::cmp::Ordering;
/// use cowslice::structural::structural_compare;
///
/// let ordering = structural_compare(&[1, 2], &[1, 3], Ord::cmp).unwrap();
/// assert_eq!(ordering, Ordering::Less);
/// ```
pub fn structural_compare<T, F>(
    left: &[T],
    right: &[T],
    mut compare: F,
) -> Result<Ordering, CollectionError>
where
    F: FnMut(&T, &T) -> Ordering,
{
    if left.len() != right.len() {
        return Err(CollectionError::LengthMismatch {
            left: left.len(),
            right: right.len(),
        });
    }
    for (first, second) in left.iter().zip(right.iter()) {
        let ordering = compare(first, second);
        if ordering != Ordering::Equal {
            return Ok(ordering);
        }
    }
    Ok(Ordering::Equal)
}

/// Hashes at most the last [`HASH_ELEMENT_LIMIT`] elements of a slice,
/// mixing each per-element hash through a fixed odd multiplier.
pub fn structural_hash<T, F>(elements: &[T], mut hash_element: F) -> u64
where
    F: FnMut(&T) -> u64,
{
    let tail_start = elements.len().saturating_sub(HASH_ELEMENT_LIMIT);
    let mut combined: u64 = 0;
    for element in &elements[tail_start..] {
        combined = combined
            .wrapping_mul(HASH_MULTIPLIER)
            .wrapping_add(hash_element(element));
    }
    combined
}

/// Hashes one element through the standard [`DefaultHasher`].
fn natural_element_hash<T: Hash>(element: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    element.hash(&mut hasher);
    hasher.finish()
}

// =============================================================================
// StructuralView Definition
// =============================================================================

/// A borrowed fixed-size view comparable element-wise under a supplied
/// comparer.
///
/// # Examples
///
/// ```rust
/// use std::cmp::Ordering;
/// use cowslice::StructuralView;
///
/// let view = StructuralView::new(&["a", "b"]);
/// let ordering = view
///     .compare_by(&["a", "c"], |left, right| left.cmp(right))
///     .unwrap();
/// assert_eq!(ordering, Ordering::Less);
/// ```
#[derive(Clone, Copy)]
pub struct StructuralView<'a, T> {
    elements: &'a [T],
}

impl<'a, T> StructuralView<'a, T> {
    /// Wraps a fixed-size view.
    #[inline]
    #[must_use]
    pub const fn new(elements: &'a [T]) -> Self {
        Self { elements }
    }

    /// Returns the number of elements in the view.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the view is empty.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns the underlying slice.
    #[inline]
    #[must_use]
    pub const fn as_slice(&self) -> &'a [T] {
        self.elements
    }

    /// Compares this view to `other` element-wise under `eq`.
    ///
    /// A length mismatch is `false`, not an error.
    pub fn equals_by<F>(&self, other: &[T], eq: F) -> bool
    where
        F: FnMut(&T, &T) -> bool,
    {
        structural_equals(self.elements, other, eq)
    }

    /// Compares this view to `other` element-wise under `compare`,
    /// short-circuiting on the first non-equal pair.
    ///
    /// # Errors
    ///
    /// [`CollectionError::LengthMismatch`] if the lengths differ.
    pub fn compare_by<F>(&self, other: &[T], compare: F) -> Result<Ordering, CollectionError>
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        structural_compare(self.elements, other, compare)
    }

    /// Hashes at most the last eight elements of the view under
    /// `hash_element`, mixing through a fixed odd multiplier.
    pub fn hash_by<F>(&self, hash_element: F) -> u64
    where
        F: FnMut(&T) -> u64,
    {
        structural_hash(self.elements, hash_element)
    }

    /// [`equals_by`](Self::equals_by) under the element's natural
    /// equality.
    #[must_use]
    pub fn equals(&self, other: &[T]) -> bool
    where
        T: PartialEq,
    {
        self.equals_by(other, |left, right| left == right)
    }

    /// [`compare_by`](Self::compare_by) under the element's natural
    /// order.
    ///
    /// # Errors
    ///
    /// [`CollectionError::LengthMismatch`] if the lengths differ.
    pub fn compare(&self, other: &[T]) -> Result<Ordering, CollectionError>
    where
        T: Ord,
    {
        self.compare_by(other, Ord::cmp)
    }

    /// [`hash_by`](Self::hash_by) under the element's natural hash.
    #[must_use]
    pub fn hash(&self) -> u64
    where
        T: Hash,
    {
        self.hash_by(natural_element_hash)
    }
}

impl<T: fmt::Debug> fmt::Debug for StructuralView<'_, T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.elements).finish()
    }
}

// =============================================================================
// Container Conveniences
// =============================================================================

impl<T> crate::PersistentArray<T> {
    /// Wraps the backing store in a [`StructuralView`] for element-wise
    /// comparison.
    ///
    /// # Panics
    ///
    /// Panics if the handle is uninitialized.
    #[must_use]
    #[track_caller]
    pub fn structural(&self) -> StructuralView<'_, T> {
        StructuralView::new(self.as_slice())
    }

    /// Compares this array to any fixed-size view element-wise under the
    /// natural equality.
    ///
    /// # Panics
    ///
    /// Panics if the handle is uninitialized.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cowslice::PersistentArray;
    ///
    /// let first = PersistentArray::from_slice(&[1, 2, 3]);
    /// let second = PersistentArray::from_slice(&[1, 2, 3]);
    ///
    /// assert!(first != second); // Distinct stores
    /// assert!(first.structural_eq(second.as_slice()));
    /// ```
    #[must_use]
    #[track_caller]
    pub fn structural_eq(&self, other: &[T]) -> bool
    where
        T: PartialEq,
    {
        self.structural().equals(other)
    }

    /// Compares this array to any fixed-size view element-wise under the
    /// natural order.
    ///
    /// # Errors
    ///
    /// [`CollectionError::LengthMismatch`] if the lengths differ;
    /// [`CollectionError::Uninitialized`] never occurs here — an
    /// uninitialized handle panics instead.
    ///
    /// # Panics
    ///
    /// Panics if the handle is uninitialized.
    #[track_caller]
    pub fn structural_cmp(&self, other: &[T]) -> Result<Ordering, CollectionError>
    where
        T: Ord,
    {
        self.structural().compare(other)
    }
}

impl<T> crate::PersistentList<T> {
    /// Wraps the backing store in a [`StructuralView`] for element-wise
    /// comparison.
    #[must_use]
    pub fn structural(&self) -> StructuralView<'_, T> {
        StructuralView::new(self.as_slice())
    }

    /// Compares this list to any fixed-size view element-wise under the
    /// natural equality.
    #[must_use]
    pub fn structural_eq(&self, other: &[T]) -> bool
    where
        T: PartialEq,
    {
        self.structural().equals(other)
    }

    /// Compares this list to any fixed-size view element-wise under the
    /// natural order.
    ///
    /// # Errors
    ///
    /// [`CollectionError::LengthMismatch`] if the lengths differ.
    pub fn structural_cmp(&self, other: &[T]) -> Result<Ordering, CollectionError>
    where
        T: Ord,
    {
        self.structural().compare(other)
    }
}

// =============================================================================
// Tests
// =============================================================================

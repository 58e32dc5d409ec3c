//! Persistent (immutable) array over a fixed-size backing store.
//!
//! This module provides [`PersistentArray`], a value handle over an
//! exclusively-owned fixed-size store, and [`TransientArray`], its mutable
//! staging companion.
//!
//! # Overview
//!
//! `PersistentArray` behaves like an array from the caller's perspective but
//! never changes after construction: every mutating operation copies the
//! backing store and returns a fresh handle. It provides:
//!
//! - O(1) random access, length, and handle cloning
//! - O(n) copy-on-write insertion, removal, and update
//! - One-allocation batch removal regardless of how many indices are dropped
//! - Sorting that allocates only when the order actually changes
//!
//! Batch mutation should go through [`TransientArray`], which mutates a
//! private store in place with amortized growth and converts back either by
//! copy ([`TransientArray::persistent`]) or by one-time ownership transfer
//! ([`TransientArray::move_to_persistent`]).
//!
//! # Sentinel states
//!
//! A `PersistentArray` handle has two sentinel states in addition to the
//! ordinary filled state:
//!
//! - **empty** ([`PersistentArray::new`]): a length-0 array; all empty
//!   arrays share one unallocated store.
//! - **uninitialized** ([`PersistentArray::uninit`]): a handle with no
//!   backing store at all, distinct from empty. Contract operations on an
//!   uninitialized handle fail — `Result`-returning operations with
//!   [`CollectionError::Uninitialized`], the rest with a descriptive panic.
//!
//! # Handle equality
//!
//! `==` on `PersistentArray` compares *backing-store identity*, not
//! elements. Two arrays built independently from the same elements are not
//! equal; an array and a zero-change result sharing its store are. This is
//! a deliberate contract: it makes "did this operation allocate?" directly
//! observable. Element-wise comparison lives in [`crate::structural`].
//!
//! # Examples
//!
//! ```rust
//! use cowslice::PersistentArray;
//!
//! let array = PersistentArray::from_slice(&[1, 2, 3]);
//! let inserted = array.insert(1, 9).unwrap();
//!
//! assert_eq!(inserted.to_vec(), vec![1, 9, 2, 3]);
//! assert_eq!(array.to_vec(), vec![1, 2, 3]); // Original unchanged
//! ```

use std::fmt;
use std::iter::{FromIterator, FusedIterator};
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};
use std::rc::Rc;

use smallvec::SmallVec;

use crate::ReferenceCounter;
use crate::error::CollectionError;
use crate::list::PersistentList;

// =============================================================================
// Constants
// =============================================================================

/// Initial logical capacity of a transient that grows from empty.
const DEFAULT_CAPACITY: usize = 8;

/// Inline capacity of the removal-index scratch buffer; removal sets at or
/// below this size never touch the heap.
const REMOVAL_SCRATCH: usize = 16;

/// Panic message for contract operations on an uninitialized handle.
const UNINITIALIZED: &str = "persistent array is uninitialized";

// =============================================================================
// Store Definition
// =============================================================================

/// Backing store of a [`PersistentArray`].
///
/// `Filled` never holds a zero-length slice; provably-empty results
/// normalize to `Empty`, so the shared empty state costs no allocation.
enum Store<T> {
    /// No backing store: the default/uninitialized sentinel.
    Uninit,
    /// The shared empty store.
    Empty,
    /// A non-empty, never-mutated store.
    Filled(ReferenceCounter<[T]>),
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Uninit => Self::Uninit,
            Self::Empty => Self::Empty,
            Self::Filled(elements) => Self::Filled(elements.clone()),
        }
    }
}

// =============================================================================
// PersistentArray Definition
// =============================================================================

/// A persistent (immutable) array over a fixed-size backing store.
///
/// Every mutating operation returns a new array and leaves `self`
/// untouched; handles are therefore freely shareable (across threads with
/// the `arc` feature). Operations that provably change nothing return a
/// handle sharing the original store without allocating.
///
/// # Time Complexity
///
/// | Operation        | Complexity                       |
/// |------------------|----------------------------------|
/// | `new` / `uninit` | O(1)                             |
/// | `get` / `len`    | O(1)                             |
/// | `push_back`      | O(n)                             |
/// | `insert`         | O(n)                             |
/// | `update`         | O(n)                             |
/// | `remove_at`      | O(n)                             |
/// | `remove_all`     | O(n), one allocation             |
/// | `sort_by`        | O(n log n), allocates only when the order changes |
/// | `iter`           | O(1) to create, O(n) to iterate  |
///
/// # Examples
///
/// ```rust
/// use cowslice::PersistentArray;
///
/// let array: PersistentArray<i32> = (1..=5).collect();
/// assert_eq!(array.len(), 5);
/// assert_eq!(array.get(2), Some(&3));
/// ```
pub struct PersistentArray<T> {
    /// The only field: the shared backing store.
    store: Store<T>,
}

impl<T> Clone for PersistentArray<T> {
    /// Clones the handle, sharing the backing store. O(1), never copies
    /// elements.
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<T> PersistentArray<T> {
    /// Creates the empty array.
    ///
    /// All empty arrays share one unallocated store, so this never
    /// allocates and two empty arrays compare equal under handle equality.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cowslice::PersistentArray;
    ///
    /// let array: PersistentArray<i32> = PersistentArray::new();
    /// assert!(array.is_empty());
    /// assert!(!array.is_uninit());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            store: Store::Empty,
        }
    }

    /// Creates an uninitialized handle: no backing store, distinct from
    /// empty.
    ///
    /// Contract operations on an uninitialized handle fail; see the module
    /// documentation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cowslice::PersistentArray;
    ///
    /// let array: PersistentArray<i32> = PersistentArray::uninit();
    /// assert!(array.is_uninit());
    /// assert_eq!(array.get(0), None);
    /// ```
    #[inline]
    #[must_use]
    pub const fn uninit() -> Self {
        Self {
            store: Store::Uninit,
        }
    }

    /// Creates an array containing a single element.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cowslice::PersistentArray;
    ///
    /// let array = PersistentArray::singleton(42);
    /// assert_eq!(array.len(), 1);
    /// assert_eq!(array.get(0), Some(&42));
    /// ```
    #[inline]
    #[must_use]
    pub fn singleton(element: T) -> Self {
        Self::from_vec(vec![element])
    }

    /// Builds an array by taking ownership of a vector.
    ///
    /// An empty input yields the shared empty store, never a fresh
    /// zero-length allocation.
    fn from_vec(elements: Vec<T>) -> Self {
        if elements.is_empty() {
            Self::new()
        } else {
            Self {
                store: Store::Filled(ReferenceCounter::from(elements)),
            }
        }
    }

    /// Returns `true` if this handle is the uninitialized sentinel.
    ///
    /// This is the only observation that never fails on an uninitialized
    /// handle.
    #[inline]
    #[must_use]
    pub const fn is_uninit(&self) -> bool {
        matches!(self.store, Store::Uninit)
    }

    /// Returns the backing store as a slice.
    ///
    /// # Panics
    ///
    /// Panics if the handle is uninitialized.
    #[inline]
    #[must_use]
    #[track_caller]
    pub fn as_slice(&self) -> &[T] {
        match &self.store {
            Store::Uninit => panic!("{UNINITIALIZED}"),
            Store::Empty => &[],
            Store::Filled(elements) => elements,
        }
    }

    /// Fallible counterpart of [`as_slice`](Self::as_slice) used by every
    /// `Result`-returning operation.
    fn slice_or_error(&self) -> Result<&[T], CollectionError> {
        match &self.store {
            Store::Uninit => Err(CollectionError::Uninitialized),
            Store::Empty => Ok(&[]),
            Store::Filled(elements) => Ok(elements),
        }
    }

    /// Returns the number of elements.
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
    /// let array: PersistentArray<i32> = (1..=5).collect();
    /// assert_eq!(array.len(), 5);
    /// ```
    #[inline]
    #[must_use]
    #[track_caller]
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Returns `true` if the array contains no elements.
    ///
    /// # Panics
    ///
    /// Panics if the handle is uninitialized.
    #[inline]
    #[must_use]
    #[track_caller]
    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    /// Returns a reference to the element at `index`, or `None` if `index`
    /// is out of bounds or the handle is uninitialized.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cowslice::PersistentArray;
    ///
    /// let array = PersistentArray::from_slice(&[10, 20, 30]);
    /// assert_eq!(array.get(1), Some(&20));
    /// assert_eq!(array.get(3), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        match &self.store {
            Store::Filled(elements) => elements.get(index),
            _ => None,
        }
    }

    /// Returns a reference to the first element, or `None` if the array is
    /// empty.
    ///
    /// # Panics
    ///
    /// Panics if the handle is uninitialized.
    #[inline]
    #[must_use]
    #[track_caller]
    pub fn first(&self) -> Option<&T> {
        self.as_slice().first()
    }

    /// Returns a reference to the last element, or `None` if the array is
    /// empty.
    ///
    /// # Panics
    ///
    /// Panics if the handle is uninitialized.
    #[inline]
    #[must_use]
    #[track_caller]
    pub fn last(&self) -> Option<&T> {
        self.as_slice().last()
    }

    /// Returns an iterator over the elements.
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
    /// let array = PersistentArray::from_slice(&[1, 2, 3]);
    /// assert_eq!(array.iter().sum::<i32>(), 6);
    /// ```
    #[inline]
    #[track_caller]
    pub fn iter(&self) -> PersistentArrayIterator<'_, T> {
        PersistentArrayIterator {
            inner: self.as_slice().iter(),
        }
    }

    /// Copies the elements into a fresh `Vec`.
    ///
    /// The copy is independent: mutating it never affects this array.
    ///
    /// # Panics
    ///
    /// Panics if the handle is uninitialized.
    #[must_use]
    #[track_caller]
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.as_slice().to_vec()
    }

    /// Copies the elements into a [`PersistentList`].
    ///
    /// # Panics
    ///
    /// Panics if the handle is uninitialized.
    #[must_use]
    #[track_caller]
    pub fn to_list(&self) -> PersistentList<T>
    where
        T: Clone,
    {
        PersistentList::from_slice(self.as_slice())
    }
}

impl<T: Clone> PersistentArray<T> {
    /// Builds an array by copying a slice.
    ///
    /// An empty input yields the shared empty store.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cowslice::PersistentArray;
    ///
    /// let array = PersistentArray::from_slice(&[1, 2, 3]);
    /// assert_eq!(array.to_vec(), vec![1, 2, 3]);
    /// ```
    #[must_use]
    pub fn from_slice(elements: &[T]) -> Self {
        if elements.is_empty() {
            Self::new()
        } else {
            Self {
                store: Store::Filled(ReferenceCounter::from(elements)),
            }
        }
    }

    // -------------------------------------------------------------------------
    // Copy-on-write mutation
    // -------------------------------------------------------------------------

    /// Returns a new array with `element` appended.
    ///
    /// Allocates a store of length `len + 1` and copies the elements.
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
    /// let array = PersistentArray::from_slice(&[1, 2]);
    /// let extended = array.push_back(3);
    ///
    /// assert_eq!(extended.to_vec(), vec![1, 2, 3]);
    /// assert_eq!(array.len(), 2); // Original unchanged
    /// ```
    #[must_use]
    #[track_caller]
    pub fn push_back(&self, element: T) -> Self {
        let slice = self.as_slice();
        let mut elements = Vec::with_capacity(slice.len() + 1);
        elements.extend_from_slice(slice);
        elements.push(element);
        Self::from_vec(elements)
    }

    /// Returns a new array with the contents of `items` appended.
    ///
    /// The result store is sized exactly once to `len + items.len()`.
    /// Appending an empty slice shares the original store.
    ///
    /// # Panics
    ///
    /// Panics if the handle is uninitialized.
    #[must_use]
    #[track_caller]
    pub fn push_back_slice(&self, items: &[T]) -> Self {
        if items.is_empty() {
            return self.clone();
        }
        let slice = self.as_slice();
        let mut elements = Vec::with_capacity(slice.len() + items.len());
        elements.extend_from_slice(slice);
        elements.extend_from_slice(items);
        Self::from_vec(elements)
    }

    /// Returns a new array with every element of `items` appended.
    ///
    /// The source is materialized first so the added count is determined
    /// once and the result store is allocated exactly. An empty source
    /// shares the original store.
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
    /// let array = PersistentArray::from_slice(&[1, 2]);
    /// let extended = array.push_back_many(3..=5);
    /// assert_eq!(extended.to_vec(), vec![1, 2, 3, 4, 5]);
    /// ```
    #[must_use]
    #[track_caller]
    pub fn push_back_many<I>(&self, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let added: Vec<T> = items.into_iter().collect();
        if added.is_empty() {
            return self.clone();
        }
        let slice = self.as_slice();
        let mut elements = Vec::with_capacity(slice.len() + added.len());
        elements.extend_from_slice(slice);
        elements.extend(added);
        Self::from_vec(elements)
    }

    /// Returns a new array holding the elements of `self` followed by the
    /// elements of `other`.
    ///
    /// When either side is empty the other side's store is shared.
    ///
    /// # Panics
    ///
    /// Panics if either handle is uninitialized.
    #[must_use]
    #[track_caller]
    pub fn append(&self, other: &Self) -> Self {
        let right = other.as_slice();
        if right.is_empty() {
            let _ = self.as_slice();
            return self.clone();
        }
        if self.as_slice().is_empty() {
            return other.clone();
        }
        self.push_back_slice(right)
    }

    /// Splices `added` owned elements in at `index`, which the caller has
    /// already validated. Exactly one store allocation.
    fn splice_in<I>(&self, index: usize, added: usize, items: I) -> Self
    where
        I: Iterator<Item = T>,
    {
        let slice = self.as_slice();
        let mut elements = Vec::with_capacity(slice.len() + added);
        elements.extend_from_slice(&slice[..index]);
        elements.extend(items);
        elements.extend_from_slice(&slice[index..]);
        Self::from_vec(elements)
    }

    /// Returns a new array with `element` inserted at `index`.
    ///
    /// `index` may equal `len`, which appends.
    ///
    /// # Errors
    ///
    /// [`CollectionError::IndexOutOfRange`] if `index > len`;
    /// [`CollectionError::Uninitialized`] on an uninitialized handle.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cowslice::PersistentArray;
    ///
    /// let array = PersistentArray::from_slice(&[1, 2, 3]);
    /// let inserted = array.insert(1, 9).unwrap();
    /// assert_eq!(inserted.to_vec(), vec![1, 9, 2, 3]);
    /// ```
    pub fn insert(&self, index: usize, element: T) -> Result<Self, CollectionError> {
        let length = self.slice_or_error()?.len();
        if index > length {
            return Err(CollectionError::index_out_of_range(index, length));
        }
        Ok(self.splice_in(index, 1, std::iter::once(element)))
    }

    /// Returns a new array with the contents of `items` inserted starting
    /// at `index`.
    ///
    /// The result store is sized exactly once. Inserting an empty slice
    /// shares the original store.
    ///
    /// # Errors
    ///
    /// [`CollectionError::IndexOutOfRange`] if `index > len`;
    /// [`CollectionError::Uninitialized`] on an uninitialized handle.
    pub fn insert_slice(&self, index: usize, items: &[T]) -> Result<Self, CollectionError> {
        let length = self.slice_or_error()?.len();
        if index > length {
            return Err(CollectionError::index_out_of_range(index, length));
        }
        if items.is_empty() {
            return Ok(self.clone());
        }
        Ok(self.splice_in(index, items.len(), items.iter().cloned()))
    }

    /// Returns a new array with every element of `items` inserted starting
    /// at `index`.
    ///
    /// The source is materialized first so the added count is determined
    /// once and the result store is allocated exactly.
    ///
    /// # Errors
    ///
    /// [`CollectionError::IndexOutOfRange`] if `index > len`;
    /// [`CollectionError::Uninitialized`] on an uninitialized handle.
    pub fn insert_many<I>(&self, index: usize, items: I) -> Result<Self, CollectionError>
    where
        I: IntoIterator<Item = T>,
    {
        let length = self.slice_or_error()?.len();
        if index > length {
            return Err(CollectionError::index_out_of_range(index, length));
        }
        let added: Vec<T> = items.into_iter().collect();
        if added.is_empty() {
            return Ok(self.clone());
        }
        let count = added.len();
        Ok(self.splice_in(index, count, added.into_iter()))
    }

    /// Returns a new array with the element at `index` replaced by
    /// `element`.
    ///
    /// The result differs from `self` at exactly that position.
    ///
    /// # Errors
    ///
    /// [`CollectionError::IndexOutOfRange`] if `index >= len`;
    /// [`CollectionError::Uninitialized`] on an uninitialized handle.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cowslice::PersistentArray;
    ///
    /// let array = PersistentArray::from_slice(&[1, 2, 3]);
    /// let updated = array.update(1, 9).unwrap();
    ///
    /// assert_eq!(updated.to_vec(), vec![1, 9, 3]);
    /// assert_eq!(array.get(1), Some(&2)); // Original unchanged
    /// ```
    pub fn update(&self, index: usize, element: T) -> Result<Self, CollectionError> {
        let slice = self.slice_or_error()?;
        if index >= slice.len() {
            return Err(CollectionError::index_out_of_range(index, slice.len()));
        }
        let mut elements = slice.to_vec();
        elements[index] = element;
        Ok(Self::from_vec(elements))
    }

    /// Splits off the last element, returning the shortened array and the
    /// element, or `None` if the array is empty.
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
    /// let array = PersistentArray::from_slice(&[1, 2, 3]);
    /// let (rest, last) = array.pop_back().unwrap();
    ///
    /// assert_eq!(last, 3);
    /// assert_eq!(rest.to_vec(), vec![1, 2]);
    /// ```
    #[must_use]
    #[track_caller]
    pub fn pop_back(&self) -> Option<(Self, T)> {
        let slice = self.as_slice();
        let (last, rest) = slice.split_last()?;
        Some((Self::from_slice(rest), last.clone()))
    }

    /// Returns a new array with the element at `index` removed.
    ///
    /// # Errors
    ///
    /// [`CollectionError::IndexOutOfRange`] if `index >= len`;
    /// [`CollectionError::Uninitialized`] on an uninitialized handle.
    pub fn remove_at(&self, index: usize) -> Result<Self, CollectionError> {
        let length = self.slice_or_error()?.len();
        if index >= length {
            return Err(CollectionError::index_out_of_range(index, length));
        }
        self.remove_range(index, 1)
    }

    /// Returns a new array with `count` elements removed starting at
    /// `start`.
    ///
    /// Removing zero elements shares the original store without
    /// allocating.
    ///
    /// # Errors
    ///
    /// [`CollectionError::RangeOutOfBounds`] if the span exceeds the
    /// array; [`CollectionError::Uninitialized`] on an uninitialized
    /// handle.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cowslice::PersistentArray;
    ///
    /// let array = PersistentArray::from_slice(&[1, 2, 3, 4]);
    /// let removed = array.remove_range(1, 2).unwrap();
    /// assert_eq!(removed.to_vec(), vec![1, 4]);
    /// ```
    pub fn remove_range(&self, start: usize, count: usize) -> Result<Self, CollectionError> {
        let slice = self.slice_or_error()?;
        let length = slice.len();
        if start > length || count > length - start {
            return Err(CollectionError::range_out_of_bounds(start, count, length));
        }
        if count == 0 {
            return Ok(self.clone());
        }
        let mut elements = Vec::with_capacity(length - count);
        elements.extend_from_slice(&slice[..start]);
        elements.extend_from_slice(&slice[start + count..]);
        Ok(Self::from_vec(elements))
    }

    /// Returns a new array with the first occurrence of `value` removed,
    /// or a handle sharing the original store if `value` is absent.
    ///
    /// # Panics
    ///
    /// Panics if the handle is uninitialized.
    #[must_use]
    #[track_caller]
    pub fn remove(&self, value: &T) -> Self
    where
        T: PartialEq,
    {
        match self.index_of(value) {
            Some(index) => self
                .remove_range(index, 1)
                .unwrap_or_else(|_| unreachable!("index came from a successful search")),
            None => self.clone(),
        }
    }

    /// Removes the elements at a sorted, duplicate-free set of indices in
    /// one pass.
    ///
    /// Walks the original store once, copying each contiguous keep-span
    /// between consecutive removal points directly into the destination;
    /// adjacent removal indices yield a zero-length keep-span and are
    /// skipped. One allocation, O(n) copying regardless of removal count.
    fn remove_sorted_indices(&self, indices: &[usize]) -> Self {
        let slice = self.as_slice();
        let mut elements = Vec::with_capacity(slice.len() - indices.len());
        let mut kept_from = 0;
        for &index in indices {
            if index > kept_from {
                elements.extend_from_slice(&slice[kept_from..index]);
            }
            kept_from = index + 1;
        }
        elements.extend_from_slice(&slice[kept_from..]);
        Self::from_vec(elements)
    }

    /// Returns a new array without the elements satisfying `predicate`.
    ///
    /// One forward pass collects the indices to drop, then one batch pass
    /// copies the surviving spans: a single allocation however many
    /// elements are removed. When nothing matches, the original store is
    /// shared.
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
    /// let array = PersistentArray::from_slice(&[1, 2, 3, 4, 5]);
    /// let odds = array.remove_all(|element| element % 2 == 0);
    ///
    /// assert_eq!(odds.to_vec(), vec![1, 3, 5]);
    /// assert_eq!(array.len(), 5); // Original unchanged
    /// ```
    #[must_use]
    #[track_caller]
    pub fn remove_all<P>(&self, mut predicate: P) -> Self
    where
        P: FnMut(&T) -> bool,
    {
        let slice = self.as_slice();
        let mut removals: SmallVec<[usize; REMOVAL_SCRATCH]> = SmallVec::new();
        for (index, element) in slice.iter().enumerate() {
            if predicate(element) {
                removals.push(index);
            }
        }
        if removals.is_empty() {
            return self.clone();
        }
        self.remove_sorted_indices(&removals)
    }

    /// Returns a new array without the elements at the given indices.
    ///
    /// The index set is sorted and deduplicated internally, then removed
    /// in one batch pass. An empty set shares the original store.
    ///
    /// # Errors
    ///
    /// [`CollectionError::IndexOutOfRange`] if any index is `>= len`;
    /// [`CollectionError::Uninitialized`] on an uninitialized handle.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cowslice::PersistentArray;
    ///
    /// let array = PersistentArray::from_slice(&[10, 20, 30, 40]);
    /// let removed = array.remove_indices([3, 1, 1]).unwrap();
    /// assert_eq!(removed.to_vec(), vec![10, 30]);
    /// ```
    pub fn remove_indices<I>(&self, indices: I) -> Result<Self, CollectionError>
    where
        I: IntoIterator<Item = usize>,
    {
        let length = self.slice_or_error()?.len();
        let mut sorted: SmallVec<[usize; REMOVAL_SCRATCH]> = indices.into_iter().collect();
        sorted.sort_unstable();
        sorted.dedup();
        match sorted.last() {
            None => Ok(self.clone()),
            Some(&largest) if largest >= length => {
                Err(CollectionError::index_out_of_range(largest, length))
            }
            Some(_) => Ok(self.remove_sorted_indices(&sorted)),
        }
    }

    /// Returns a new array with one occurrence of each of `values`
    /// removed.
    ///
    /// Values with no remaining occurrence are ignored. When nothing is
    /// found, the original store is shared.
    ///
    /// # Panics
    ///
    /// Panics if the handle is uninitialized.
    #[must_use]
    #[track_caller]
    pub fn remove_values(&self, values: &[T]) -> Self
    where
        T: PartialEq,
    {
        let slice = self.as_slice();
        let mut removals: SmallVec<[usize; REMOVAL_SCRATCH]> = SmallVec::new();
        for value in values {
            let found = slice
                .iter()
                .enumerate()
                .find(|(index, element)| *element == value && !removals.contains(index));
            if let Some((index, _)) = found {
                removals.push(index);
            }
        }
        if removals.is_empty() {
            return self.clone();
        }
        removals.sort_unstable();
        self.remove_sorted_indices(&removals)
    }

    /// Returns a sub-array of `count` elements starting at `start`.
    ///
    /// The full range shares the original store; an empty range yields the
    /// shared empty array.
    ///
    /// # Errors
    ///
    /// [`CollectionError::RangeOutOfBounds`] if the span exceeds the
    /// array; [`CollectionError::Uninitialized`] on an uninitialized
    /// handle.
    pub fn slice(&self, start: usize, count: usize) -> Result<Self, CollectionError> {
        let slice = self.slice_or_error()?;
        let length = slice.len();
        if start > length || count > length - start {
            return Err(CollectionError::range_out_of_bounds(start, count, length));
        }
        if count == length {
            return Ok(self.clone());
        }
        Ok(Self::from_slice(&slice[start..start + count]))
    }

    /// Returns a new array with the elements in reverse order.
    ///
    /// Arrays of length 0 or 1 share the original store.
    ///
    /// # Panics
    ///
    /// Panics if the handle is uninitialized.
    #[must_use]
    #[track_caller]
    pub fn reverse(&self) -> Self {
        let slice = self.as_slice();
        if slice.len() <= 1 {
            return self.clone();
        }
        let mut elements = slice.to_vec();
        elements.reverse();
        Self::from_vec(elements)
    }

    /// Returns the shared empty array.
    ///
    /// # Panics
    ///
    /// Panics if the handle is uninitialized.
    #[must_use]
    #[track_caller]
    pub fn clear(&self) -> Self {
        let _ = self.as_slice();
        Self::new()
    }
}

// =============================================================================
// Searching
// =============================================================================

impl<T> PersistentArray<T> {
    /// Returns `true` if the array contains `value`.
    ///
    /// # Panics
    ///
    /// Panics if the handle is uninitialized.
    #[must_use]
    #[track_caller]
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.as_slice().contains(value)
    }

    /// Returns the index of the first occurrence of `value`, or `None`.
    ///
    /// Delegates to the backing slice's linear search.
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
    /// let array = PersistentArray::from_slice(&[1, 2, 3, 2]);
    /// assert_eq!(array.index_of(&2), Some(1));
    /// assert_eq!(array.index_of(&9), None);
    /// ```
    #[must_use]
    #[track_caller]
    pub fn index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.as_slice().iter().position(|element| element == value)
    }

    /// Returns the index of the last occurrence of `value`, or `None`.
    ///
    /// # Panics
    ///
    /// Panics if the handle is uninitialized.
    #[must_use]
    #[track_caller]
    pub fn last_index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.as_slice().iter().rposition(|element| element == value)
    }

    /// Searches for `value` within the span of `count` elements starting
    /// at `start`, returning the absolute index of the first occurrence.
    ///
    /// # Errors
    ///
    /// [`CollectionError::RangeOutOfBounds`] if the span exceeds the
    /// array; [`CollectionError::Uninitialized`] on an uninitialized
    /// handle.
    pub fn index_of_range(
        &self,
        value: &T,
        start: usize,
        count: usize,
    ) -> Result<Option<usize>, CollectionError>
    where
        T: PartialEq,
    {
        let slice = self.slice_or_error()?;
        let length = slice.len();
        if start > length || count > length - start {
            return Err(CollectionError::range_out_of_bounds(start, count, length));
        }
        Ok(slice[start..start + count]
            .iter()
            .position(|element| element == value)
            .map(|position| position + start))
    }

    /// Searches for `value` within the span of `count` elements starting
    /// at `start`, returning the absolute index of the last occurrence.
    ///
    /// # Errors
    ///
    /// [`CollectionError::RangeOutOfBounds`] if the span exceeds the
    /// array; [`CollectionError::Uninitialized`] on an uninitialized
    /// handle.
    pub fn last_index_of_range(
        &self,
        value: &T,
        start: usize,
        count: usize,
    ) -> Result<Option<usize>, CollectionError>
    where
        T: PartialEq,
    {
        let slice = self.slice_or_error()?;
        let length = slice.len();
        if start > length || count > length - start {
            return Err(CollectionError::range_out_of_bounds(start, count, length));
        }
        Ok(slice[start..start + count]
            .iter()
            .rposition(|element| element == value)
            .map(|position| position + start))
    }

    /// Returns the index of the first element satisfying `predicate`.
    ///
    /// This is the caller-supplied-comparer search path: a manual bounded
    /// loop over the backing store.
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
    /// let array = PersistentArray::from_slice(&["a", "bb", "ccc"]);
    /// assert_eq!(array.find_index(|element| element.len() == 2), Some(1));
    /// ```
    #[must_use]
    #[track_caller]
    pub fn find_index<P>(&self, mut predicate: P) -> Option<usize>
    where
        P: FnMut(&T) -> bool,
    {
        let slice = self.as_slice();
        let mut index = 0;
        while index < slice.len() {
            if predicate(&slice[index]) {
                return Some(index);
            }
            index += 1;
        }
        None
    }

    /// Returns the index of the last element satisfying `predicate`.
    ///
    /// # Panics
    ///
    /// Panics if the handle is uninitialized.
    #[must_use]
    #[track_caller]
    pub fn rfind_index<P>(&self, mut predicate: P) -> Option<usize>
    where
        P: FnMut(&T) -> bool,
    {
        let slice = self.as_slice();
        let mut index = slice.len();
        while index > 0 {
            index -= 1;
            if predicate(&slice[index]) {
                return Some(index);
            }
        }
        None
    }

}

// =============================================================================
// Sorting
// =============================================================================

impl<T: Clone> PersistentArray<T> {
    /// Sorts a validated span, sharing the original store when the span is
    /// already non-decreasing.
    fn sort_span<F>(&self, start: usize, count: usize, mut compare: F) -> Self
    where
        F: FnMut(&T, &T) -> std::cmp::Ordering,
    {
        let slice = self.as_slice();
        if count <= 1 {
            return self.clone();
        }
        let span = &slice[start..start + count];
        if span.is_sorted_by(|left, right| compare(left, right) != std::cmp::Ordering::Greater) {
            return self.clone();
        }
        let mut elements = slice.to_vec();
        elements[start..start + count].sort_by(compare);
        Self::from_vec(elements)
    }

    /// Returns a sorted copy of the array under the natural order.
    ///
    /// Arrays of length 0 or 1 never allocate, and a pre-scan detects an
    /// already-sorted array and shares its store — sorting allocates only
    /// when the order actually changes. The sort is stable.
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
    /// let array = PersistentArray::from_slice(&[3, 1, 2]);
    /// assert_eq!(array.sort().to_vec(), vec![1, 2, 3]);
    ///
    /// let sorted = array.sort();
    /// assert!(sorted.sort() == sorted); // Already sorted: same store
    /// ```
    #[must_use]
    #[track_caller]
    pub fn sort(&self) -> Self
    where
        T: Ord,
    {
        self.sort_by(T::cmp)
    }

    /// Returns a copy of the array sorted by `compare`.
    ///
    /// Shares the original store when the array is already in order. The
    /// sort is stable.
    ///
    /// # Panics
    ///
    /// Panics if the handle is uninitialized.
    #[must_use]
    #[track_caller]
    pub fn sort_by<F>(&self, compare: F) -> Self
    where
        F: FnMut(&T, &T) -> std::cmp::Ordering,
    {
        let length = self.as_slice().len();
        self.sort_span(0, length, compare)
    }

    /// Returns a copy of the array with the span of `count` elements
    /// starting at `start` sorted by `compare`.
    ///
    /// Shares the original store when the span is already in order.
    ///
    /// # Errors
    ///
    /// [`CollectionError::RangeOutOfBounds`] if the span exceeds the
    /// array; [`CollectionError::Uninitialized`] on an uninitialized
    /// handle.
    pub fn sort_range_by<F>(
        &self,
        start: usize,
        count: usize,
        compare: F,
    ) -> Result<Self, CollectionError>
    where
        F: FnMut(&T, &T) -> std::cmp::Ordering,
    {
        let length = self.slice_or_error()?.len();
        if start > length || count > length - start {
            return Err(CollectionError::range_out_of_bounds(start, count, length));
        }
        Ok(self.sort_span(start, count, compare))
    }

    /// Copies the elements into a [`TransientArray`] for batch mutation.
    ///
    /// The transient is seeded with capacity equal to its length, so an
    /// unmodified transient is immediately eligible for
    /// [`TransientArray::move_to_persistent`].
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
    /// let array = PersistentArray::from_slice(&[1, 2, 3]);
    /// let mut transient = array.transient();
    /// transient.push_back(4);
    /// transient.remove_at(0).unwrap();
    ///
    /// assert_eq!(transient.persistent().to_vec(), vec![2, 3, 4]);
    /// assert_eq!(array.to_vec(), vec![1, 2, 3]); // Original unchanged
    /// ```
    #[must_use]
    #[track_caller]
    pub fn transient(&self) -> TransientArray<T> {
        let slice = self.as_slice();
        TransientArray {
            elements: slice.to_vec(),
            capacity: slice.len(),
            _marker: PhantomData,
        }
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Default for PersistentArray<T> {
    /// The empty array, not the uninitialized sentinel.
    fn default() -> Self {
        Self::new()
    }
}

/// Handle equality: same backing-store identity, not element-wise
/// equality.
///
/// `Uninit` equals `Uninit`, `Empty` equals `Empty`, and two filled
/// handles are equal exactly when they share one store. Use
/// [`crate::structural`] for element-wise comparison.
impl<T> PartialEq for PersistentArray<T> {
    fn eq(&self, other: &Self) -> bool {
        match (&self.store, &other.store) {
            (Store::Uninit, Store::Uninit) | (Store::Empty, Store::Empty) => true,
            (Store::Filled(left), Store::Filled(right)) => ReferenceCounter::ptr_eq(left, right),
            _ => false,
        }
    }
}

impl<T> Eq for PersistentArray<T> {}

impl<T: fmt::Debug> fmt::Debug for PersistentArray<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.store {
            Store::Uninit => formatter.write_str("<uninitialized>"),
            _ => formatter.debug_list().entries(self.as_slice()).finish(),
        }
    }
}

impl<T> Index<usize> for PersistentArray<T> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if `index` is out of bounds or the handle is uninitialized.
    fn index(&self, index: usize) -> &T {
        &self.as_slice()[index]
    }
}

impl<T> FromIterator<T> for PersistentArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<T> From<Vec<T>> for PersistentArray<T> {
    fn from(elements: Vec<T>) -> Self {
        Self::from_vec(elements)
    }
}

impl<T: Clone> From<&[T]> for PersistentArray<T> {
    fn from(elements: &[T]) -> Self {
        Self::from_slice(elements)
    }
}

impl<T, const N: usize> From<[T; N]> for PersistentArray<T> {
    fn from(elements: [T; N]) -> Self {
        Self::from_vec(Vec::from(elements))
    }
}

// =============================================================================
// Iterators
// =============================================================================

/// Borrowing iterator over a [`PersistentArray`] (and the live prefix of a
/// [`TransientArray`]).
#[derive(Clone)]
pub struct PersistentArrayIterator<'a, T> {
    inner: std::slice::Iter<'a, T>,
}

impl<'a, T> Iterator for PersistentArrayIterator<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for PersistentArrayIterator<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for PersistentArrayIterator<'_, T> {}

impl<T> FusedIterator for PersistentArrayIterator<'_, T> {}

impl<'a, T> IntoIterator for &'a PersistentArray<T> {
    type Item = &'a T;
    type IntoIter = PersistentArrayIterator<'a, T>;

    /// # Panics
    ///
    /// Panics if the handle is uninitialized.
    fn into_iter(self) -> PersistentArrayIterator<'a, T> {
        self.iter()
    }
}

/// Owning iterator over a [`PersistentArray`].
///
/// The store may still be shared with other handles, so elements are
/// cloned out as the iterator advances.
pub struct PersistentArrayIntoIterator<T> {
    store: Store<T>,
    front: usize,
    back: usize,
}

impl<T: Clone> Iterator for PersistentArrayIntoIterator<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.front >= self.back {
            return None;
        }
        let Store::Filled(elements) = &self.store else {
            return None;
        };
        let element = elements[self.front].clone();
        self.front += 1;
        Some(element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<T: Clone> DoubleEndedIterator for PersistentArrayIntoIterator<T> {
    fn next_back(&mut self) -> Option<T> {
        if self.front >= self.back {
            return None;
        }
        let Store::Filled(elements) = &self.store else {
            return None;
        };
        self.back -= 1;
        Some(elements[self.back].clone())
    }
}

impl<T: Clone> ExactSizeIterator for PersistentArrayIntoIterator<T> {}

impl<T: Clone> FusedIterator for PersistentArrayIntoIterator<T> {}

impl<T: Clone> IntoIterator for PersistentArray<T> {
    type Item = T;
    type IntoIter = PersistentArrayIntoIterator<T>;

    /// # Panics
    ///
    /// Panics if the handle is uninitialized.
    fn into_iter(self) -> PersistentArrayIntoIterator<T> {
        let length = self.len();
        PersistentArrayIntoIterator {
            store: self.store,
            front: 0,
            back: length,
        }
    }
}

// =============================================================================
// TransientArray Definition
// =============================================================================

/// Mutable staging companion of [`PersistentArray`].
///
/// A `TransientArray` owns a private store at least as large as its
/// logical length and mutates it in place, growing by doubling when
/// needed. It tracks its own *logical* capacity — the figure the
/// ownership-transfer precondition compares against — rather than
/// trusting the allocator's rounded-up `Vec` capacity.
///
/// Conversion back to a persistent array takes one of two paths:
///
/// - [`persistent`](Self::persistent): a fresh right-sized copy; the
///   transient stays usable. Repeatable.
/// - [`move_to_persistent`](Self::move_to_persistent): hands the owned
///   store over without copying element data, legal only when
///   `len == capacity`; the transient resets to fresh-empty.
///
/// Transients are **not** thread-safe and deliberately do not implement
/// `Send` or `Sync`; confine each one to a single thread.
///
/// # Examples
///
/// ```rust
/// use cowslice::TransientArray;
///
/// let mut transient = TransientArray::new();
/// transient.push_back(1);
/// transient.push_back(2);
/// transient.push_back(3);
///
/// let array = transient.persistent();
/// assert_eq!(array.to_vec(), vec![1, 2, 3]);
/// ```
pub struct TransientArray<T> {
    /// Live elements; `elements.len()` is the logical length.
    elements: Vec<T>,
    /// Logical capacity; `elements.len() <= capacity` always holds.
    capacity: usize,
    /// Marker to ensure `!Send` and `!Sync`.
    _marker: PhantomData<Rc<()>>,
}

static_assertions::assert_not_impl_any!(TransientArray<i32>: Send, Sync);
static_assertions::assert_not_impl_any!(TransientArray<String>: Send, Sync);

impl<T> TransientArray<T> {
    /// Creates an empty transient with zero capacity.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cowslice::TransientArray;
    ///
    /// let transient: TransientArray<i32> = TransientArray::new();
    /// assert_eq!(transient.len(), 0);
    /// assert_eq!(transient.capacity(), 0);
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            elements: Vec::new(),
            capacity: 0,
            _marker: PhantomData,
        }
    }

    /// Creates an empty transient with the given logical capacity.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            elements: Vec::with_capacity(capacity),
            capacity,
            _marker: PhantomData,
        }
    }

    /// Returns the number of live elements.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the transient holds no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns the logical capacity.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the live elements as a slice.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.elements
    }

    /// Returns an iterator over the live elements.
    #[inline]
    pub fn iter(&self) -> PersistentArrayIterator<'_, T> {
        PersistentArrayIterator {
            inner: self.elements.iter(),
        }
    }

    /// Returns a reference to the element at `index`, or `None` if out of
    /// bounds.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.elements.get(index)
    }

    /// Returns a mutable reference to the element at `index`, or `None`
    /// if out of bounds.
    #[inline]
    #[must_use]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.elements.get_mut(index)
    }

    /// Sets the logical capacity.
    ///
    /// Any accepted change right-sizes the owned store, copying the live
    /// prefix. Setting the capacity of an empty transient to zero swaps
    /// in the unallocated empty store.
    ///
    /// # Errors
    ///
    /// [`CollectionError::CapacityTooSmall`] if `capacity` is below the
    /// current length.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cowslice::TransientArray;
    ///
    /// let mut transient: TransientArray<i32> = TransientArray::new();
    /// transient.push_back(1);
    /// transient.set_capacity(1).unwrap();
    /// assert_eq!(transient.capacity(), 1);
    /// assert!(transient.set_capacity(0).is_err());
    /// ```
    pub fn set_capacity(&mut self, capacity: usize) -> Result<(), CollectionError> {
        if capacity < self.elements.len() {
            return Err(CollectionError::CapacityTooSmall {
                capacity,
                length: self.elements.len(),
            });
        }
        if capacity == self.capacity {
            return Ok(());
        }
        let mut resized = Vec::with_capacity(capacity);
        resized.append(&mut self.elements);
        self.elements = resized;
        self.capacity = capacity;
        Ok(())
    }

    /// Grows the logical capacity to hold at least `minimum` elements:
    /// doubling, respecting the requested minimum, starting from
    /// `DEFAULT_CAPACITY`.
    fn ensure_room(&mut self, minimum: usize) {
        if minimum <= self.capacity {
            return;
        }
        let grown = (self.capacity * 2).max(minimum).max(DEFAULT_CAPACITY);
        self.elements.reserve(grown - self.elements.len());
        self.capacity = grown;
    }

    /// Sets the logical length.
    ///
    /// Shrinking truncates, dropping the vacated elements promptly so the
    /// references they hold are released; growing extends the capacity as
    /// needed and fills the new slots with `T::default()`.
    pub fn resize(&mut self, length: usize)
    where
        T: Default,
    {
        if length < self.elements.len() {
            self.elements.truncate(length);
        } else if length > self.elements.len() {
            self.ensure_room(length);
            self.elements.resize_with(length, T::default);
        }
    }

    /// Appends one element.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cowslice::TransientArray;
    ///
    /// let mut transient = TransientArray::new();
    /// transient.push_back(7);
    /// assert_eq!(transient.len(), 1);
    /// ```
    pub fn push_back(&mut self, element: T) {
        self.ensure_room(self.elements.len() + 1);
        self.elements.push(element);
    }

    /// Inserts `element` at `index`, shifting the suffix right.
    ///
    /// # Errors
    ///
    /// [`CollectionError::IndexOutOfRange`] if `index > len`.
    pub fn insert(&mut self, index: usize, element: T) -> Result<(), CollectionError> {
        if index > self.elements.len() {
            return Err(CollectionError::index_out_of_range(
                index,
                self.elements.len(),
            ));
        }
        self.ensure_room(self.elements.len() + 1);
        self.elements.insert(index, element);
        Ok(())
    }

    /// Removes and returns the element at `index`, shifting the suffix
    /// left.
    ///
    /// # Errors
    ///
    /// [`CollectionError::IndexOutOfRange`] if `index >= len`.
    pub fn remove_at(&mut self, index: usize) -> Result<T, CollectionError> {
        if index >= self.elements.len() {
            return Err(CollectionError::index_out_of_range(
                index,
                self.elements.len(),
            ));
        }
        Ok(self.elements.remove(index))
    }

    /// Removes the span of `count` elements starting at `start`.
    ///
    /// # Errors
    ///
    /// [`CollectionError::RangeOutOfBounds`] if the span exceeds the live
    /// elements.
    pub fn remove_range(&mut self, start: usize, count: usize) -> Result<(), CollectionError> {
        let length = self.elements.len();
        if start > length || count > length - start {
            return Err(CollectionError::range_out_of_bounds(start, count, length));
        }
        self.elements.drain(start..start + count);
        Ok(())
    }

    /// Removes every element satisfying `predicate`, returning how many
    /// were removed.
    pub fn remove_all<P>(&mut self, mut predicate: P) -> usize
    where
        P: FnMut(&T) -> bool,
    {
        let before = self.elements.len();
        self.elements.retain(|element| !predicate(element));
        before - self.elements.len()
    }

    /// Replaces the element at `index`.
    ///
    /// # Errors
    ///
    /// [`CollectionError::IndexOutOfRange`] if `index >= len`.
    pub fn set(&mut self, index: usize, element: T) -> Result<(), CollectionError> {
        if index >= self.elements.len() {
            return Err(CollectionError::index_out_of_range(
                index,
                self.elements.len(),
            ));
        }
        self.elements[index] = element;
        Ok(())
    }

    /// Removes every element. Capacity is unchanged.
    pub fn clear(&mut self) {
        self.elements.clear();
    }

    /// Sorts the live elements in place under the natural order. Stable.
    pub fn sort(&mut self)
    where
        T: Ord,
    {
        self.elements.sort();
    }

    /// Sorts the live elements in place by `compare`. Stable.
    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&T, &T) -> std::cmp::Ordering,
    {
        self.elements.sort_by(compare);
    }

    /// Reverses the live elements in place.
    pub fn reverse(&mut self) {
        self.elements.reverse();
    }

    /// Hands the owned store to a new [`PersistentArray`] without copying
    /// element data, then resets the transient to fresh-empty.
    ///
    /// Legal only when `len == capacity` — transferring a store with
    /// unused trailing slots would corrupt the fixed-size contract. Set
    /// the capacity to the length first to take this path.
    ///
    /// # Errors
    ///
    /// [`CollectionError::CapacityMismatch`] if `len != capacity`; the
    /// transient is left untouched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cowslice::TransientArray;
    ///
    /// let mut transient: TransientArray<i32> = (1..=3).collect();
    /// let array = transient.move_to_persistent().unwrap();
    ///
    /// assert_eq!(array.to_vec(), vec![1, 2, 3]);
    /// assert_eq!(transient.len(), 0); // Fresh-empty again
    /// assert_eq!(transient.capacity(), 0);
    /// ```
    pub fn move_to_persistent(&mut self) -> Result<PersistentArray<T>, CollectionError> {
        if self.elements.len() != self.capacity {
            return Err(CollectionError::CapacityMismatch {
                length: self.elements.len(),
                capacity: self.capacity,
            });
        }
        self.capacity = 0;
        let elements = std::mem::take(&mut self.elements);
        Ok(PersistentArray::from_vec(elements))
    }
}

impl<T: Clone> TransientArray<T> {
    /// Appends every element of a fixed-size source, pre-sizing exactly
    /// once.
    pub fn push_back_slice(&mut self, items: &[T]) {
        self.ensure_room(self.elements.len() + items.len());
        self.elements.extend_from_slice(items);
    }

    /// Appends the live elements of another transient.
    pub fn push_back_transient(&mut self, other: &Self) {
        self.push_back_slice(other.as_slice());
    }

    /// Appends the elements of a persistent array.
    ///
    /// # Panics
    ///
    /// Panics if `other` is uninitialized.
    #[track_caller]
    pub fn push_back_persistent(&mut self, other: &PersistentArray<T>) {
        self.push_back_slice(other.as_slice());
    }

    /// Copies the live elements into a fresh right-sized
    /// [`PersistentArray`]. The transient stays usable and can convert
    /// again.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cowslice::TransientArray;
    ///
    /// let mut transient: TransientArray<i32> = (1..=3).collect();
    /// let first = transient.persistent();
    /// transient.push_back(4);
    /// let second = transient.persistent();
    ///
    /// assert_eq!(first.to_vec(), vec![1, 2, 3]);
    /// assert_eq!(second.to_vec(), vec![1, 2, 3, 4]);
    /// ```
    #[must_use]
    pub fn persistent(&self) -> PersistentArray<T> {
        PersistentArray::from_slice(&self.elements)
    }
}

impl<T> Default for TransientArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Extend<T> for TransientArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (low, _) = iter.size_hint();
        self.ensure_room(self.elements.len() + low);
        for element in iter {
            self.push_back(element);
        }
    }
}

impl<T> FromIterator<T> for TransientArray<T> {
    /// Collects into a transient whose capacity equals its length, so it
    /// is immediately eligible for
    /// [`move_to_persistent`](TransientArray::move_to_persistent).
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let elements: Vec<T> = iter.into_iter().collect();
        let capacity = elements.len();
        Self {
            elements,
            capacity,
            _marker: PhantomData,
        }
    }
}

impl<T> Index<usize> for TransientArray<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.elements[index]
    }
}

impl<T> IndexMut<usize> for TransientArray<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.elements[index]
    }
}

impl<T: fmt::Debug> fmt::Debug for TransientArray<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.elements.iter()).finish()
    }
}

impl<'a, T> IntoIterator for &'a TransientArray<T> {
    type Item = &'a T;
    type IntoIter = PersistentArrayIterator<'a, T>;

    fn into_iter(self) -> PersistentArrayIterator<'a, T> {
        self.iter()
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for PersistentArray<T> {
    /// Serializes as a plain sequence of elements.
    ///
    /// # Panics
    ///
    /// Panics if the handle is uninitialized.
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;

        let slice = self.as_slice();
        let mut sequence = serializer.serialize_seq(Some(slice.len()))?;
        for element in slice {
            sequence.serialize_element(element)?;
        }
        sequence.end()
    }
}

#[cfg(feature = "serde")]
impl<'de, T: serde::Deserialize<'de>> serde::Deserialize<'de> for PersistentArray<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let elements = Vec::<T>::deserialize(deserializer)?;
        Ok(Self::from_vec(elements))
    }
}

// =============================================================================
// Tests
// =============================================================================

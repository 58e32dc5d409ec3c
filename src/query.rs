//! Read-only traversal and projection helpers.
//!
//! These helpers walk the backing slice directly instead of composing
//! general-purpose iterator adapters, so a query is one bounded loop with
//! no intermediate state. They exist on both container families with the
//! same semantics.
//!
//! Plain not-found outcomes are `None`; only the exactly-one-match family
//! ([`PersistentArray::single`], [`PersistentArray::single_where`] and the
//! list counterparts) reports failure as an error, because "exactly one"
//! is a contract, not a search.
//!
//! # Examples
//!
//! ```rust
//! use cowslice::PersistentArray;
//!
//! let array = PersistentArray::from_slice(&[1, 2, 3, 4]);
//!
//! assert!(array.any(|element| element % 2 == 0));
//! assert_eq!(array.count_where(|element| element % 2 == 0), 2);
//! assert_eq!(array.fold(0, |sum, element| sum + element), 10);
//! ```

use crate::array::PersistentArray;
use crate::error::CollectionError;
use crate::list::PersistentList;

/// Finds the only element of a slice, or the only element satisfying a
/// predicate.
fn single_in<T, P>(slice: &[T], mut predicate: P) -> Result<&T, CollectionError>
where
    P: FnMut(&T) -> bool,
{
    let mut found = None;
    for element in slice {
        if predicate(element) {
            if found.is_some() {
                return Err(CollectionError::AmbiguousMatch);
            }
            found = Some(element);
        }
    }
    found.ok_or(CollectionError::NoMatch)
}

impl<T> PersistentArray<T> {
    /// Returns the array's only element.
    ///
    /// # Errors
    ///
    /// [`CollectionError::NoMatch`] if the array is empty;
    /// [`CollectionError::AmbiguousMatch`] if it holds more than one
    /// element.
    ///
    /// # Panics
    ///
    /// Panics if the handle is uninitialized.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cowslice::{CollectionError, PersistentArray};
    ///
    /// assert_eq!(PersistentArray::singleton(7).single(), Ok(&7));
    ///
    /// let pair = PersistentArray::from_slice(&[1, 2]);
    /// assert_eq!(pair.single(), Err(CollectionError::AmbiguousMatch));
    /// ```
    #[track_caller]
    pub fn single(&self) -> Result<&T, CollectionError> {
        single_in(self.as_slice(), |_| true)
    }

    /// Returns the only element satisfying `predicate`.
    ///
    /// # Errors
    ///
    /// [`CollectionError::NoMatch`] if no element satisfies `predicate`;
    /// [`CollectionError::AmbiguousMatch`] if several do.
    ///
    /// # Panics
    ///
    /// Panics if the handle is uninitialized.
    #[track_caller]
    pub fn single_where<P>(&self, predicate: P) -> Result<&T, CollectionError>
    where
        P: FnMut(&T) -> bool,
    {
        single_in(self.as_slice(), predicate)
    }

    /// Returns `true` if every element satisfies `predicate`. True for an
    /// empty array.
    ///
    /// # Panics
    ///
    /// Panics if the handle is uninitialized.
    #[must_use]
    #[track_caller]
    pub fn all<P>(&self, mut predicate: P) -> bool
    where
        P: FnMut(&T) -> bool,
    {
        for element in self.as_slice() {
            if !predicate(element) {
                return false;
            }
        }
        true
    }

    /// Returns `true` if any element satisfies `predicate`. False for an
    /// empty array.
    ///
    /// # Panics
    ///
    /// Panics if the handle is uninitialized.
    #[must_use]
    #[track_caller]
    pub fn any<P>(&self, mut predicate: P) -> bool
    where
        P: FnMut(&T) -> bool,
    {
        for element in self.as_slice() {
            if predicate(element) {
                return true;
            }
        }
        false
    }

    /// Counts the elements satisfying `predicate`.
    ///
    /// # Panics
    ///
    /// Panics if the handle is uninitialized.
    #[must_use]
    #[track_caller]
    pub fn count_where<P>(&self, mut predicate: P) -> usize
    where
        P: FnMut(&T) -> bool,
    {
        let mut count = 0;
        for element in self.as_slice() {
            if predicate(element) {
                count += 1;
            }
        }
        count
    }

    /// Folds the elements left-to-right into an accumulator.
    ///
    /// # Panics
    ///
    /// Panics if the handle is uninitialized.
    #[must_use]
    #[track_caller]
    pub fn fold<A, F>(&self, initial: A, mut function: F) -> A
    where
        F: FnMut(A, &T) -> A,
    {
        let mut accumulator = initial;
        for element in self.as_slice() {
            accumulator = function(accumulator, element);
        }
        accumulator
    }

    /// Projects every element into a new array.
    ///
    /// This is also the type-conversion seam: where the source of this
    /// design relied on runtime element-type covariance, Rust callers map
    /// into the destination element type explicitly.
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
    /// let numbers = PersistentArray::from_slice(&[1, 2, 3]);
    /// let doubled = numbers.map(|element| element * 2);
    /// assert_eq!(doubled.to_vec(), vec![2, 4, 6]);
    /// ```
    #[must_use]
    #[track_caller]
    pub fn map<U, F>(&self, mut function: F) -> PersistentArray<U>
    where
        F: FnMut(&T) -> U,
    {
        let slice = self.as_slice();
        let mut projected = Vec::with_capacity(slice.len());
        for element in slice {
            projected.push(function(element));
        }
        PersistentArray::from(projected)
    }

    /// Copies the elements satisfying `predicate` into a new array,
    /// preserving order.
    ///
    /// When every element survives, the original store is shared.
    ///
    /// # Panics
    ///
    /// Panics if the handle is uninitialized.
    #[must_use]
    #[track_caller]
    pub fn filtered<P>(&self, mut predicate: P) -> Self
    where
        T: Clone,
        P: FnMut(&T) -> bool,
    {
        self.remove_all(|element| !predicate(element))
    }
}

impl<T> PersistentList<T> {
    /// Returns the list's only element.
    ///
    /// # Errors
    ///
    /// [`CollectionError::NoMatch`] if the list is empty;
    /// [`CollectionError::AmbiguousMatch`] if it holds more than one
    /// element.
    pub fn single(&self) -> Result<&T, CollectionError> {
        single_in(self.as_slice(), |_| true)
    }

    /// Returns the only element satisfying `predicate`.
    ///
    /// # Errors
    ///
    /// [`CollectionError::NoMatch`] if no element satisfies `predicate`;
    /// [`CollectionError::AmbiguousMatch`] if several do.
    pub fn single_where<P>(&self, predicate: P) -> Result<&T, CollectionError>
    where
        P: FnMut(&T) -> bool,
    {
        single_in(self.as_slice(), predicate)
    }

    /// Returns `true` if every element satisfies `predicate`. True for an
    /// empty list.
    #[must_use]
    pub fn all<P>(&self, mut predicate: P) -> bool
    where
        P: FnMut(&T) -> bool,
    {
        for element in self.as_slice() {
            if !predicate(element) {
                return false;
            }
        }
        true
    }

    /// Returns `true` if any element satisfies `predicate`. False for an
    /// empty list.
    #[must_use]
    pub fn any<P>(&self, mut predicate: P) -> bool
    where
        P: FnMut(&T) -> bool,
    {
        for element in self.as_slice() {
            if predicate(element) {
                return true;
            }
        }
        false
    }

    /// Counts the elements satisfying `predicate`.
    #[must_use]
    pub fn count_where<P>(&self, mut predicate: P) -> usize
    where
        P: FnMut(&T) -> bool,
    {
        let mut count = 0;
        for element in self.as_slice() {
            if predicate(element) {
                count += 1;
            }
        }
        count
    }

    /// Folds the elements left-to-right into an accumulator.
    #[must_use]
    pub fn fold<A, F>(&self, initial: A, mut function: F) -> A
    where
        F: FnMut(A, &T) -> A,
    {
        let mut accumulator = initial;
        for element in self.as_slice() {
            accumulator = function(accumulator, element);
        }
        accumulator
    }

    /// Projects every element into a new list.
    #[must_use]
    pub fn map<U, F>(&self, mut function: F) -> PersistentList<U>
    where
        F: FnMut(&T) -> U,
    {
        let slice = self.as_slice();
        let mut projected = Vec::with_capacity(slice.len());
        for element in slice {
            projected.push(function(element));
        }
        PersistentList::from(projected)
    }

    /// Copies the elements satisfying `predicate` into a new list,
    /// preserving order.
    ///
    /// When every element survives, the original store is shared.
    #[must_use]
    pub fn filtered<P>(&self, mut predicate: P) -> Self
    where
        T: Clone,
        P: FnMut(&T) -> bool,
    {
        self.remove_all(|element| !predicate(element))
    }
}

// =============================================================================
// Tests
// =============================================================================

//! Unit tests for the structural comparison adapter.
//!
//! Element-wise equality, three-way comparison, and bounded hashing over
//! persistent containers, transients, raw arrays, and slices.

use std::cmp::Ordering;

use cowslice::structural::{structural_compare, structural_equals, structural_hash};
use cowslice::{CollectionError, PersistentArray, PersistentList, StructuralView};
use rstest::rstest;

// =============================================================================
// Equality
// =============================================================================

#[rstest]
fn test_structural_equals_on_raw_arrays() {
    assert!(structural_equals(&[1, 2, 3], &[1, 2, 3], |a, b| a == b));
    assert!(!structural_equals(&[1, 2, 3], &[1, 2, 9], |a, b| a == b));
}

#[rstest]
fn test_length_mismatch_is_false_not_an_error() {
    assert!(!structural_equals(&[1, 2, 3], &[1, 2], |a, b| a == b));
    assert!(!structural_equals::<i32, _>(&[], &[0], |a, b| a == b));
}

#[rstest]
fn test_empty_sequences_are_equal() {
    assert!(structural_equals::<i32, _>(&[], &[], |a, b| a == b));
}

#[rstest]
fn test_equals_under_a_custom_comparer() {
    let view = StructuralView::new(&["A", "b"]);
    assert!(view.equals_by(&["a", "B"], |left, right| {
        left.eq_ignore_ascii_case(right)
    }));
    assert!(!view.equals(&["a", "B"]));
}

#[rstest]
fn test_containers_compare_against_raw_fixed_size_views() {
    let array = PersistentArray::from_slice(&[1, 2, 3]);
    let list = PersistentList::from_slice(&[1, 2, 3]);

    assert!(array.structural_eq(&[1, 2, 3]));
    assert!(list.structural_eq(&[1, 2, 3]));
    assert!(array.structural_eq(list.as_slice()));
}

// =============================================================================
// Three-way comparison
// =============================================================================

#[rstest]
fn test_compare_short_circuits_on_the_first_difference() {
    let ordering = structural_compare(&[1, 2], &[1, 3], Ord::cmp).unwrap();
    assert_eq!(ordering, Ordering::Less);

    let ordering = structural_compare(&[5, 0], &[1, 9], Ord::cmp).unwrap();
    assert_eq!(ordering, Ordering::Greater);

    let ordering = structural_compare(&[4, 4], &[4, 4], Ord::cmp).unwrap();
    assert_eq!(ordering, Ordering::Equal);
}

#[rstest]
fn test_compare_of_different_lengths_is_a_shape_error() {
    assert_eq!(
        structural_compare(&[1, 2, 3], &[1, 2], Ord::cmp),
        Err(CollectionError::LengthMismatch { left: 3, right: 2 })
    );
}

#[rstest]
fn test_compare_under_a_custom_comparer() {
    let view = StructuralView::new(&[10, 20]);
    let reversed = view
        .compare_by(&[10, 30], |left, right| right.cmp(left))
        .unwrap();
    assert_eq!(reversed, Ordering::Greater);
}

#[rstest]
fn test_container_convenience_comparison() {
    let array = PersistentArray::from_slice(&[1, 2]);
    assert_eq!(array.structural_cmp(&[1, 3]).unwrap(), Ordering::Less);
    assert!(array.structural_cmp(&[1]).is_err());

    let list = PersistentList::from_slice(&[2, 2]);
    assert_eq!(list.structural_cmp(&[1, 9]).unwrap(), Ordering::Greater);
}

// =============================================================================
// Bounded hashing
// =============================================================================

#[rstest]
fn test_equal_sequences_hash_equal() {
    let first = PersistentArray::from_slice(&[1, 2, 3]);
    let second = PersistentArray::from_slice(&[1, 2, 3]);
    assert_eq!(first.structural().hash(), second.structural().hash());
}

#[rstest]
fn test_hash_is_bounded_to_the_last_eight_elements() {
    let long: Vec<i64> = (0..100).collect();
    let mut early_difference = long.clone();
    early_difference[0] = -1;

    // Differing only before the tail window: identical bounded hashes.
    assert_eq!(
        structural_hash(&long, |element| *element as u64),
        structural_hash(&early_difference, |element| *element as u64),
    );

    let mut late_difference = long.clone();
    late_difference[99] = -1;
    assert_ne!(
        structural_hash(&long, |element| *element as u64),
        structural_hash(&late_difference, |element| *element as u64),
    );
}

#[rstest]
fn test_custom_element_hash_feeds_the_mixer() {
    let view = StructuralView::new(&[1u64, 2, 3]);
    assert_eq!(view.hash_by(|element| *element), 31 * 31 + 2 * 31 + 3);
}

#[rstest]
fn test_view_reports_shape() {
    let view: StructuralView<'_, i32> = StructuralView::new(&[]);
    assert!(view.is_empty());
    assert_eq!(view.len(), 0);

    let array = PersistentArray::from_slice(&[1, 2]);
    assert_eq!(array.structural().len(), 2);
    assert_eq!(array.structural().as_slice(), array.as_slice());
}

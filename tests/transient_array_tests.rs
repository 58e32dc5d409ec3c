//! Unit tests for `TransientArray`.
//!
//! Covers logical-capacity management, amortized growth, the closed add
//! set, in-place edits, and both conversion paths back to a persistent
//! array.

use cowslice::{CollectionError, PersistentArray, TransientArray};
use rstest::rstest;

// =============================================================================
// Construction and capacity
// =============================================================================

#[rstest]
fn test_new_is_empty_with_zero_capacity() {
    let transient: TransientArray<i32> = TransientArray::new();
    assert!(transient.is_empty());
    assert_eq!(transient.capacity(), 0);
}

#[rstest]
fn test_with_capacity_reserves_logical_room() {
    let transient: TransientArray<i32> = TransientArray::with_capacity(5);
    assert_eq!(transient.len(), 0);
    assert_eq!(transient.capacity(), 5);
}

#[rstest]
fn test_first_push_grows_to_the_default_capacity() {
    let mut transient = TransientArray::new();
    transient.push_back(1);
    assert_eq!(transient.capacity(), 8);
}

#[rstest]
fn test_growth_doubles_beyond_the_default() {
    let mut transient = TransientArray::new();
    for value in 0..9 {
        transient.push_back(value);
    }
    assert_eq!(transient.len(), 9);
    assert_eq!(transient.capacity(), 16);
}

#[rstest]
fn test_growth_respects_a_large_requested_minimum() {
    let mut transient: TransientArray<i32> = TransientArray::new();
    transient.push_back_slice(&[0; 40]);
    assert_eq!(transient.len(), 40);
    assert_eq!(transient.capacity(), 40);
}

#[rstest]
fn test_set_capacity_below_len_is_a_state_error() {
    let mut transient: TransientArray<i32> = (1..=3).collect();
    assert_eq!(
        transient.set_capacity(2),
        Err(CollectionError::CapacityTooSmall {
            capacity: 2,
            length: 3
        })
    );
    assert_eq!(transient.len(), 3); // Untouched
}

#[rstest]
fn test_set_capacity_right_sizes() {
    let mut transient: TransientArray<i32> = TransientArray::with_capacity(32);
    transient.push_back(1);
    transient.set_capacity(1).unwrap();
    assert_eq!(transient.capacity(), 1);
    assert_eq!(transient.as_slice(), &[1]);
}

#[rstest]
fn test_set_capacity_to_zero_on_empty_swaps_in_the_empty_store() {
    let mut transient: TransientArray<i32> = TransientArray::with_capacity(8);
    transient.set_capacity(0).unwrap();
    assert_eq!(transient.capacity(), 0);
    assert!(transient.is_empty());
}

// =============================================================================
// Resizing the logical length
// =============================================================================

#[rstest]
fn test_resize_grows_with_defaults() {
    let mut transient: TransientArray<i32> = (1..=2).collect();
    transient.resize(4);
    assert_eq!(transient.as_slice(), &[1, 2, 0, 0]);
    assert!(transient.capacity() >= 4);
}

#[rstest]
fn test_resize_shrinks_by_truncation() {
    let mut transient: TransientArray<String> = ["a", "b", "c"]
        .into_iter()
        .map(std::string::ToString::to_string)
        .collect();
    transient.resize(1);
    assert_eq!(transient.as_slice(), &["a".to_string()]);
}

// =============================================================================
// The closed add set
// =============================================================================

#[rstest]
fn test_push_back_slice_appends_a_fixed_source() {
    let mut transient = TransientArray::new();
    transient.push_back(1);
    transient.push_back_slice(&[2, 3]);
    assert_eq!(transient.as_slice(), &[1, 2, 3]);
}

#[rstest]
fn test_push_back_transient_appends_another_builder() {
    let mut left: TransientArray<i32> = (1..=2).collect();
    let right: TransientArray<i32> = (3..=4).collect();
    left.push_back_transient(&right);
    assert_eq!(left.as_slice(), &[1, 2, 3, 4]);
    assert_eq!(right.len(), 2); // Source untouched
}

#[rstest]
fn test_push_back_persistent_appends_an_array() {
    let mut transient: TransientArray<i32> = (1..=2).collect();
    let array = PersistentArray::from_slice(&[3, 4]);
    transient.push_back_persistent(&array);
    assert_eq!(transient.as_slice(), &[1, 2, 3, 4]);
}

#[rstest]
fn test_extend_appends_an_iterator() {
    let mut transient: TransientArray<i32> = TransientArray::new();
    transient.extend(1..=3);
    assert_eq!(transient.as_slice(), &[1, 2, 3]);
}

// =============================================================================
// In-place edits
// =============================================================================

#[rstest]
fn test_insert_and_remove_at() {
    let mut transient: TransientArray<i32> = (1..=3).collect();
    transient.insert(1, 9).unwrap();
    assert_eq!(transient.as_slice(), &[1, 9, 2, 3]);

    let removed = transient.remove_at(1).unwrap();
    assert_eq!(removed, 9);
    assert_eq!(transient.as_slice(), &[1, 2, 3]);
}

#[rstest]
fn test_insert_past_len_is_a_range_error() {
    let mut transient: TransientArray<i32> = (1..=2).collect();
    assert_eq!(
        transient.insert(5, 9),
        Err(CollectionError::IndexOutOfRange {
            index: 5,
            length: 2
        })
    );
}

#[rstest]
fn test_remove_range_drains_a_span() {
    let mut transient: TransientArray<i32> = (1..=5).collect();
    transient.remove_range(1, 3).unwrap();
    assert_eq!(transient.as_slice(), &[1, 5]);
}

#[rstest]
fn test_remove_all_reports_the_removed_count() {
    let mut transient: TransientArray<i32> = (1..=6).collect();
    let removed = transient.remove_all(|element| element % 2 == 0);
    assert_eq!(removed, 3);
    assert_eq!(transient.as_slice(), &[1, 3, 5]);
}

#[rstest]
fn test_set_and_index_mut_replace_values() {
    let mut transient: TransientArray<i32> = (1..=3).collect();
    transient.set(0, 9).unwrap();
    transient[2] = 7;
    assert_eq!(transient.as_slice(), &[9, 2, 7]);
    assert!(transient.set(3, 0).is_err());
}

#[rstest]
fn test_clear_keeps_capacity() {
    let mut transient: TransientArray<i32> = (1..=3).collect();
    transient.clear();
    assert!(transient.is_empty());
    assert_eq!(transient.capacity(), 3);
}

#[rstest]
fn test_sort_and_reverse_in_place() {
    let mut transient: TransientArray<i32> = [3, 1, 2].into_iter().collect();
    transient.sort();
    assert_eq!(transient.as_slice(), &[1, 2, 3]);
    transient.reverse();
    assert_eq!(transient.as_slice(), &[3, 2, 1]);
    transient.sort_by(|left, right| left.cmp(right));
    assert_eq!(transient.as_slice(), &[1, 2, 3]);
}

// =============================================================================
// Conversion back to persistent
// =============================================================================

#[rstest]
fn test_persistent_is_a_repeatable_copy() {
    let mut transient: TransientArray<i32> = (1..=3).collect();
    let first = transient.persistent();
    transient.push_back(4);
    let second = transient.persistent();

    assert_eq!(first.to_vec(), vec![1, 2, 3]);
    assert_eq!(second.to_vec(), vec![1, 2, 3, 4]);
    assert_eq!(transient.len(), 4); // Still usable
}

#[rstest]
fn test_persistent_equals_the_seeding_array_element_wise() {
    let array = PersistentArray::from_slice(&[1, 2, 3]);
    let transient = array.transient();
    assert!(transient.persistent().structural_eq(array.as_slice()));
}

#[rstest]
fn test_move_to_persistent_requires_len_equal_capacity() {
    let mut transient: TransientArray<i32> = TransientArray::with_capacity(8);
    transient.push_back(1);
    assert_eq!(
        transient.move_to_persistent(),
        Err(CollectionError::CapacityMismatch {
            length: 1,
            capacity: 8
        })
    );
    assert_eq!(transient.as_slice(), &[1]); // Untouched on failure
}

#[rstest]
fn test_move_to_persistent_after_right_sizing() {
    let mut transient: TransientArray<i32> = TransientArray::new();
    transient.extend(1..=5);
    transient.set_capacity(transient.len()).unwrap();

    let array = transient.move_to_persistent().unwrap();
    assert_eq!(array.to_vec(), vec![1, 2, 3, 4, 5]);

    // The transient behaves as fresh-empty afterwards.
    assert!(transient.is_empty());
    assert_eq!(transient.capacity(), 0);
    transient.push_back(7);
    assert_eq!(transient.as_slice(), &[7]);
}

#[rstest]
fn test_move_to_persistent_of_fresh_empty_yields_the_shared_empty() {
    let mut transient: TransientArray<i32> = TransientArray::new();
    let array = transient.move_to_persistent().unwrap();
    assert!(array == PersistentArray::new());
}

#[rstest]
fn test_collected_transient_is_immediately_move_eligible() {
    let mut transient: TransientArray<i32> = (1..=4).collect();
    assert_eq!(transient.len(), transient.capacity());
    assert!(transient.move_to_persistent().is_ok());
}

#[rstest]
fn test_seeding_from_an_array_is_immediately_move_eligible() {
    let array = PersistentArray::from_slice(&[1, 2]);
    let mut transient = array.transient();
    let rebuilt = transient.move_to_persistent().unwrap();
    assert!(rebuilt.structural_eq(array.as_slice()));
    assert!(rebuilt != array); // A fresh store, not the original
}

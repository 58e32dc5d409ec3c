//! Property-based tests for `PersistentList` and `TransientList` laws.
//!
//! Verifies the copy-on-write invariants and the revision-counter
//! contract with randomized inputs.

use cowslice::{PersistentList, TransientList};
use proptest::prelude::*;

// =============================================================================
// Copy-on-write laws
// =============================================================================

proptest! {
    /// Round trip: building from elements and copying back yields the
    /// same elements.
    #[test]
    fn prop_to_vec_round_trip(
        elements in prop::collection::vec(any::<i32>(), 0..60)
    ) {
        let list: PersistentList<i32> = elements.iter().copied().collect();
        prop_assert_eq!(list.to_vec(), elements);
    }

    /// The updated position holds the new value; every other position is
    /// untouched; the original list is unchanged.
    #[test]
    fn prop_update_changes_exactly_one_position(
        elements in prop::collection::vec(any::<i32>(), 1..50),
        position in any::<prop::sample::Index>(),
    ) {
        let list: PersistentList<i32> = elements.iter().copied().collect();
        let index = position.index(list.len());
        let updated = list.update(index, 424_242).unwrap();

        prop_assert_eq!(updated.get(index), Some(&424_242));
        for other in 0..list.len() {
            if other != index {
                prop_assert_eq!(updated.get(other), list.get(other));
            }
        }
        prop_assert_eq!(list.to_vec(), elements);
    }

    /// `remove_all` keeps exactly the complement of the predicate, in
    /// order.
    #[test]
    fn prop_remove_all_keeps_the_complement_in_order(
        elements in prop::collection::vec(any::<i32>(), 0..60)
    ) {
        let list: PersistentList<i32> = elements.iter().copied().collect();
        let survivors = list.remove_all(|element| element % 3 == 0);
        let expected: Vec<i32> = elements
            .iter()
            .copied()
            .filter(|element| element % 3 != 0)
            .collect();
        prop_assert_eq!(survivors.to_vec(), expected);
        prop_assert_eq!(list.to_vec(), elements);
    }

    /// Sorting is idempotent, and sorting an already-sorted list returns
    /// the very same instance.
    #[test]
    fn prop_sort_idempotent_and_identity_on_sorted(
        elements in prop::collection::vec(any::<i32>(), 0..50)
    ) {
        let list: PersistentList<i32> = elements.iter().copied().collect();
        let once = list.sort();
        let twice = once.sort();
        prop_assert!(twice == once);
    }
}

// =============================================================================
// Revision-counter laws
// =============================================================================

proptest! {
    /// The revision counter advances exactly once per successful
    /// structural mutation and is monotonically non-decreasing.
    #[test]
    fn prop_revision_counts_successful_mutations(
        elements in prop::collection::vec(any::<i32>(), 0..40)
    ) {
        let mut transient: TransientList<i32> = TransientList::new();
        let mut expected: u64 = 0;
        for element in elements {
            transient.push_back(element);
            expected += 1;
            prop_assert_eq!(transient.revision(), expected);
        }
        transient.clear();
        expected += 1;
        prop_assert_eq!(transient.revision(), expected);
    }

    /// Batching through the transient yields the same contents as the
    /// equivalent persistent mutations.
    #[test]
    fn prop_transient_batching_matches_persistent_results(
        elements in prop::collection::vec(any::<i32>(), 0..40)
    ) {
        let mut transient: TransientList<i32> = TransientList::new();
        let mut persistent: PersistentList<i32> = PersistentList::new();
        for element in &elements {
            transient.push_back(*element);
            persistent = persistent.push_back(*element);
        }
        prop_assert_eq!(transient.into_persistent().to_vec(), persistent.to_vec());
    }
}

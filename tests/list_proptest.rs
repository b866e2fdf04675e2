//! Property-based tests: a TombList must behave like a plain Vec.

use proptest::prelude::*;
use tomblist::Error;
use tomblist::ListOptions;
use tomblist::TombList;

// =============================================================================
// Test helpers
// =============================================================================

/// A list operation with positions given as fractions of the current length,
/// so most generated operations are in range.
#[derive(Clone, Debug)]
enum ListOp {
    Push(u16),
    Insert { pos_pct: f64, value: u16 },
    RemoveAt { pos_pct: f64 },
    RemoveValue(u16),
    Set { pos_pct: f64, value: u16 },
    Clear,
    Sort,
    Reverse,
    BinarySearch(u16),
}

fn arbitrary_list_op() -> impl Strategy<Value = ListOp> {
    prop_oneof![
        4 => any::<u16>().prop_map(ListOp::Push),
        2 => (0.0..=1.0f64, any::<u16>())
            .prop_map(|(pos_pct, value)| ListOp::Insert { pos_pct, value }),
        4 => (0.0..=1.0f64).prop_map(|pos_pct| ListOp::RemoveAt { pos_pct }),
        1 => (0u16..8).prop_map(ListOp::RemoveValue),
        1 => (0.0..=1.0f64, any::<u16>())
            .prop_map(|(pos_pct, value)| ListOp::Set { pos_pct, value }),
        1 => Just(ListOp::Clear),
        1 => Just(ListOp::Sort),
        1 => Just(ListOp::Reverse),
        1 => (0u16..8).prop_map(ListOp::BinarySearch),
    ]
}

fn arbitrary_options() -> impl Strategy<Value = ListOptions> {
    (0usize..8, 1usize..8, 1usize..12).prop_map(|(capacity, growth, threshold)| {
        ListOptions::new()
            .with_initial_capacity(capacity)
            .with_growth_increment(growth)
            .with_compaction_threshold(threshold)
    })
}

fn scale(pct: f64, len: usize) -> usize {
    return ((pct * len as f64) as usize).min(len);
}

fn apply(list: &mut TombList<u16>, model: &mut Vec<u16>, op: &ListOp) {
    let len = model.len();
    match op {
        ListOp::Push(value) => {
            list.push(*value).unwrap();
            model.push(*value);
        }
        ListOp::Insert { pos_pct, value } => {
            let index = scale(*pos_pct, len);
            list.insert(index, *value).unwrap();
            model.insert(index, *value);
        }
        ListOp::RemoveAt { pos_pct } => {
            if len == 0 {
                assert!(list.remove_at(0).is_err());
                return;
            }
            let index = scale(*pos_pct, len - 1);
            assert_eq!(list.remove_at(index).unwrap(), model.remove(index));
        }
        ListOp::RemoveValue(value) => {
            let found = model.iter().position(|v| v == value);
            if let Some(index) = found {
                model.remove(index);
            }
            assert_eq!(list.remove(value).unwrap(), found.is_some());
        }
        ListOp::Set { pos_pct, value } => {
            if len == 0 {
                return;
            }
            let index = scale(*pos_pct, len - 1);
            assert_eq!(list.set(index, *value).unwrap(), model[index]);
            model[index] = *value;
        }
        ListOp::Clear => {
            list.clear().unwrap();
            model.clear();
        }
        ListOp::Sort => {
            list.sort().unwrap();
            model.sort();
            assert_eq!(list.pending_removals(), 0);
        }
        ListOp::Reverse => {
            list.reverse().unwrap();
            model.reverse();
            assert_eq!(list.pending_removals(), 0);
        }
        ListOp::BinarySearch(needle) => {
            model.sort();
            match list.binary_search(needle).unwrap() {
                Ok(index) => assert_eq!(model[index], *needle),
                Err(insert_at) => assert_eq!(insert_at, model.partition_point(|v| v < needle)),
            }
        }
    }
}

fn build(options: &ListOptions, ops: &[ListOp]) -> (TombList<u16>, Vec<u16>) {
    let mut list = TombList::with_options(options.clone()).unwrap();
    let mut model = Vec::new();
    for op in ops {
        apply(&mut list, &mut model, op);
    }
    return (list, model);
}

// =============================================================================
// Model equivalence
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// Every read agrees with the Vec model after any operation sequence.
    #[test]
    fn matches_vec_model(
        options in arbitrary_options(),
        ops in prop::collection::vec(arbitrary_list_op(), 0..120),
    ) {
        let (list, model) = build(&options, &ops);

        prop_assert_eq!(list.len(), model.len());
        prop_assert_eq!(list.to_vec(), model.clone());
        for (i, value) in model.iter().enumerate() {
            prop_assert_eq!(list.get(i), Ok(value));
        }
        prop_assert_eq!(list.get(model.len()), Err(Error::Index { index: model.len(), len: model.len() }));
        prop_assert_eq!(list.first(), model.first());
        prop_assert_eq!(list.last(), model.last());
    }

    /// Count always equals the number of elements enumeration produces.
    #[test]
    fn len_equals_enumeration(
        options in arbitrary_options(),
        ops in prop::collection::vec(arbitrary_list_op(), 0..120),
    ) {
        let (list, _) = build(&options, &ops);

        prop_assert_eq!(list.iter().count(), list.len());

        let mut cursor = list.cursor();
        let mut walked = 0;
        while cursor.move_next(&list).unwrap() {
            walked += 1;
        }
        prop_assert_eq!(walked, list.len());
    }

    /// Capacity bookkeeping invariants hold after every step.
    #[test]
    fn capacity_invariants(
        options in arbitrary_options(),
        ops in prop::collection::vec(arbitrary_list_op(), 0..120),
    ) {
        let mut list = TombList::with_options(options.clone()).unwrap();
        let mut model = Vec::new();
        for op in &ops {
            apply(&mut list, &mut model, op);
            prop_assert!(list.len() <= list.capacity());
            prop_assert!(list.pending_removals() < list.compaction_threshold());
        }
    }
}

// =============================================================================
// Search properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn index_searches_match_vec(
        options in arbitrary_options(),
        ops in prop::collection::vec(arbitrary_list_op(), 0..80),
        needle in 0u16..8,
    ) {
        let (list, model) = build(&options, &ops);

        prop_assert_eq!(list.contains(&needle), model.contains(&needle));
        prop_assert_eq!(list.index_of(&needle), model.iter().position(|v| *v == needle));
        prop_assert_eq!(list.last_index_of(&needle), model.iter().rposition(|v| *v == needle));
    }

    #[test]
    fn windowed_searches_match_vec(
        ops in prop::collection::vec(arbitrary_list_op(), 1..80),
        start_pct in 0.0..=1.0f64,
        count_pct in 0.0..=1.0f64,
        needle in 0u16..8,
    ) {
        let (list, model) = build(&ListOptions::new().with_compaction_threshold(5), &ops);
        let len = model.len();

        let start = scale(start_pct, len);
        let count = scale(count_pct, len - start);
        let expected = model[start..start + count].iter().position(|v| *v == needle).map(|i| start + i);
        prop_assert_eq!(list.index_of_in(&needle, start, count), Ok(expected));

        if len > 0 {
            let start = scale(start_pct, len - 1);
            let count = scale(count_pct, start + 1);
            let low = start + 1 - count;
            let expected = model[low..=start].iter().rposition(|v| *v == needle).map(|i| low + i);
            let expected = if count == 0 { None } else { expected };
            prop_assert_eq!(list.last_index_of_in(&needle, start, count), Ok(expected));
        }
    }

    /// get_range(0, len) reproduces the enumeration of any non-empty list.
    #[test]
    fn full_range_equals_enumeration(
        options in arbitrary_options(),
        ops in prop::collection::vec(arbitrary_list_op(), 1..80),
    ) {
        let (list, _) = build(&options, &ops);
        prop_assume!(!list.is_empty());

        let range = list.get_range(0, list.len()).unwrap();
        let walked: Vec<u16> = list.iter().copied().collect();
        prop_assert_eq!(range.to_vec(), walked);
    }

    /// binary_search leaves the list sorted and compacted and finds what a
    /// sorted Vec finds.
    #[test]
    fn binary_search_matches_sorted_vec(
        options in arbitrary_options(),
        ops in prop::collection::vec(arbitrary_list_op(), 0..80),
        needle in 0u16..8,
    ) {
        let (mut list, mut model) = build(&options, &ops);
        model.sort();

        let found = list.binary_search(&needle).unwrap();
        prop_assert_eq!(list.to_vec(), model.clone());
        prop_assert_eq!(list.pending_removals(), 0);
        match found {
            Ok(index) => prop_assert_eq!(model[index], needle),
            Err(insert_at) => prop_assert_eq!(insert_at, model.partition_point(|v| *v < needle)),
        }
    }
}

#![cfg(feature = "deque")]
//! Property-based tests for SegmentedDeque.
//!
//! Every law compares the deque against `std::collections::VecDeque`, using
//! small block capacities so that splits and block removal happen often.

use proptest::prelude::*;
use std::collections::VecDeque;
use strata::deque::SegmentedDeque;

// =============================================================================
// Strategies for Generating Test Data
// =============================================================================

#[derive(Clone, Debug)]
enum Operation {
    PushBack(i32),
    PushFront(i32),
    PopBack,
    PopFront,
    Insert(usize, i32),
    Erase(usize),
}

fn operation() -> impl Strategy<Value = Operation> {
    prop_oneof![
        3 => any::<i32>().prop_map(Operation::PushBack),
        3 => any::<i32>().prop_map(Operation::PushFront),
        1 => Just(Operation::PopBack),
        1 => Just(Operation::PopFront),
        3 => (any::<usize>(), any::<i32>()).prop_map(|(position, value)| Operation::Insert(position, value)),
        2 => any::<usize>().prop_map(Operation::Erase),
    ]
}

fn apply<const C: usize>(deque: &mut SegmentedDeque<i32, C>, model: &mut VecDeque<i32>, operation: Operation) {
    match operation {
        Operation::PushBack(value) => {
            deque.push_back(value);
            model.push_back(value);
        }
        Operation::PushFront(value) => {
            deque.push_front(value);
            model.push_front(value);
        }
        Operation::PopBack => {
            assert_eq!(deque.pop_back().ok(), model.pop_back());
        }
        Operation::PopFront => {
            assert_eq!(deque.pop_front().ok(), model.pop_front());
        }
        Operation::Insert(position, value) => {
            let position = position % (model.len() + 1);
            let cursor = deque.cursor_at(position).unwrap();
            let inserted = deque.insert(cursor, value).unwrap();
            model.insert(position, value);
            assert_eq!(deque.position(inserted), Ok(position));
        }
        Operation::Erase(position) => {
            if model.is_empty() {
                assert!(deque.erase(deque.end()).is_err());
                return;
            }
            let position = position % model.len();
            let cursor = deque.cursor_at(position).unwrap();
            let (following, value) = deque.erase(cursor).unwrap();
            assert_eq!(Some(value), model.remove(position));
            assert_eq!(deque.position(following), Ok(position));
        }
    }
}

fn arbitrary_deque(max_size: usize) -> impl Strategy<Value = SegmentedDeque<i32, 4>> {
    prop::collection::vec(any::<i32>(), 0..max_size).prop_map(SegmentedDeque::from)
}

// =============================================================================
// Model Laws
// =============================================================================

proptest! {
    /// Law: any operation history leaves the deque equal to the model.
    #[test]
    fn prop_matches_vec_deque_with_capacity_two(
        operations in prop::collection::vec(operation(), 0..300)
    ) {
        let mut deque: SegmentedDeque<i32, 2> = SegmentedDeque::new();
        let mut model = VecDeque::new();
        for operation in operations {
            apply(&mut deque, &mut model, operation);
            prop_assert_eq!(deque.len(), model.len());
        }
        prop_assert!(deque.iter().eq(model.iter()));
    }

    #[test]
    fn prop_matches_vec_deque_with_capacity_five(
        operations in prop::collection::vec(operation(), 0..300)
    ) {
        let mut deque: SegmentedDeque<i32, 5> = SegmentedDeque::new();
        let mut model = VecDeque::new();
        for operation in operations {
            apply(&mut deque, &mut model, operation);
        }
        for (position, expected) in model.iter().enumerate() {
            prop_assert_eq!(deque.at(position), Ok(expected));
        }
    }
}

// =============================================================================
// Stress Laws
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Law: thousands of interleaved end and positional operations on tiny
    /// blocks keep the deque equal to the model at every step.
    #[test]
    fn prop_interleaved_stress_matches_vec_deque(
        operations in prop::collection::vec(operation(), 1000..3000)
    ) {
        let mut deque: SegmentedDeque<i32, 2> = SegmentedDeque::new();
        let mut model = VecDeque::new();
        for operation in operations {
            apply(&mut deque, &mut model, operation);
            let length = isize::try_from(model.len()).unwrap();
            prop_assert_eq!(deque.len(), model.len());
            prop_assert_eq!(deque.distance(deque.end(), deque.begin()), Ok(length));
            prop_assert!(deque.iter().eq(model.iter()));
        }
    }

    #[test]
    fn prop_interleaved_stress_matches_vec_deque_with_capacity_three(
        operations in prop::collection::vec(operation(), 1000..3000)
    ) {
        let mut deque: SegmentedDeque<i32, 3> = SegmentedDeque::new();
        let mut model = VecDeque::new();
        for operation in operations {
            apply(&mut deque, &mut model, operation);
            prop_assert!(deque.iter().rev().eq(model.iter().rev()));
            prop_assert_eq!(deque.front().ok(), model.front());
            prop_assert_eq!(deque.back().ok(), model.back());
        }
    }
}

// =============================================================================
// Cursor Laws
// =============================================================================

proptest! {
    /// Law: begin() + len() == end() and end() - begin() == len().
    #[test]
    fn prop_begin_plus_len_is_end(deque in arbitrary_deque(60)) {
        let length = isize::try_from(deque.len()).unwrap();
        prop_assert_eq!(deque.advance(deque.begin(), length), Ok(deque.end()));
        prop_assert_eq!(deque.distance(deque.end(), deque.begin()), Ok(length));
    }

    /// Law: next(prev(it)) == it for every cursor after begin().
    #[test]
    fn prop_next_prev_identity(deque in arbitrary_deque(60), offset in 1_usize..=60) {
        prop_assume!(!deque.is_empty());
        let position = offset % deque.len() + 1;
        let cursor = deque.cursor_at(position).unwrap();
        let previous = deque.prev_cursor(cursor).unwrap();
        prop_assert_eq!(deque.next_cursor(previous), Ok(cursor));
    }

    /// Law: advancing by n then by -n returns to the same cursor.
    #[test]
    fn prop_advance_round_trip(deque in arbitrary_deque(60), start in any::<usize>(), step in any::<usize>()) {
        let start = start % (deque.len() + 1);
        let step = step % (deque.len() - start + 1);
        let cursor = deque.cursor_at(start).unwrap();
        let forward = deque.advance(cursor, isize::try_from(step).unwrap()).unwrap();
        prop_assert_eq!(deque.position(forward), Ok(start + step));
        prop_assert_eq!(deque.retreat(forward, step), Ok(cursor));
    }
}

// =============================================================================
// Failure Laws
// =============================================================================

proptest! {
    /// Law: a rejected operation leaves the deque unchanged.
    #[test]
    fn prop_rejected_operations_do_not_mutate(deque in arbitrary_deque(40)) {
        let mut deque = deque;
        let before: Vec<i32> = deque.iter().copied().collect();
        let other: SegmentedDeque<i32, 4> = SegmentedDeque::from(vec![1]);

        prop_assert!(deque.erase(deque.end()).is_err());
        prop_assert!(deque.insert(other.begin(), 0).is_err());
        prop_assert!(deque.at(deque.len()).is_err());

        prop_assert_eq!(deque.len(), before.len());
        prop_assert!(deque.iter().eq(before.iter()));
    }

    /// Law: cloning yields an equal, independent deque.
    #[test]
    fn prop_clone_is_equal_and_independent(deque in arbitrary_deque(40), value: i32) {
        let mut copy = deque.clone();
        prop_assert_eq!(&copy, &deque);
        copy.push_back(value);
        prop_assert_eq!(copy.len(), deque.len() + 1);
    }
}

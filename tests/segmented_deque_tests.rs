#![cfg(feature = "deque")]
//! Unit tests for SegmentedDeque.

use rstest::rstest;
use strata::deque::SegmentedDeque;
use strata::error::ContainerError;

fn contents<T: Clone, const C: usize>(deque: &SegmentedDeque<T, C>) -> Vec<T> {
    deque.iter().cloned().collect()
}

// =============================================================================
// Construction Tests
// =============================================================================

#[rstest]
fn test_new_creates_empty_deque() {
    let deque: SegmentedDeque<i32> = SegmentedDeque::new();
    assert!(deque.is_empty());
    assert_eq!(deque.len(), 0);
    assert_eq!(deque.begin(), deque.end());
}

#[rstest]
fn test_default_creates_empty_deque() {
    let deque: SegmentedDeque<String, 8> = SegmentedDeque::default();
    assert!(deque.is_empty());
}

#[rstest]
fn test_from_array_and_vec_agree() {
    let from_array: SegmentedDeque<i32, 4> = SegmentedDeque::from([1, 2, 3, 4, 5]);
    let from_vec: SegmentedDeque<i32, 4> = SegmentedDeque::from(vec![1, 2, 3, 4, 5]);
    assert_eq!(from_array, from_vec);
    assert_eq!(contents(&from_array), vec![1, 2, 3, 4, 5]);
}

// =============================================================================
// End Operation Tests
// =============================================================================

#[rstest]
fn test_push_and_pop_example_sequence() {
    let mut deque: SegmentedDeque<i32> = SegmentedDeque::new();
    deque.push_back(1);
    deque.push_back(2);
    deque.push_front(0);
    assert_eq!(contents(&deque), vec![0, 1, 2]);

    assert_eq!(deque.pop_front(), Ok(0));
    assert_eq!(contents(&deque), vec![1, 2]);

    let position = deque.advance(deque.begin(), 1).unwrap();
    deque.insert(position, 9).unwrap();
    assert_eq!(contents(&deque), vec![1, 9, 2]);
}

#[rstest]
#[case::front(true)]
#[case::back(false)]
fn test_empty_deque_rejects_end_access(#[case] at_front: bool) {
    let mut deque: SegmentedDeque<i32, 4> = SegmentedDeque::new();
    if at_front {
        assert_eq!(deque.front(), Err(ContainerError::ContainerIsEmpty));
        assert_eq!(deque.front_mut(), Err(ContainerError::ContainerIsEmpty));
        assert_eq!(deque.pop_front(), Err(ContainerError::ContainerIsEmpty));
    } else {
        assert_eq!(deque.back(), Err(ContainerError::ContainerIsEmpty));
        assert_eq!(deque.back_mut(), Err(ContainerError::ContainerIsEmpty));
        assert_eq!(deque.pop_back(), Err(ContainerError::ContainerIsEmpty));
    }
    assert!(deque.is_empty());
}

#[rstest]
fn test_front_and_back_mut_modify_ends() {
    let mut deque: SegmentedDeque<i32, 2> = (1..=5).collect();
    *deque.front_mut().unwrap() = 10;
    *deque.back_mut().unwrap() = 50;
    assert_eq!(deque.front(), Ok(&10));
    assert_eq!(deque.back(), Ok(&50));
}

#[rstest]
fn test_push_front_many_keeps_order() {
    let mut deque: SegmentedDeque<i32, 3> = SegmentedDeque::new();
    for value in (0..20).rev() {
        deque.push_front(value);
    }
    assert_eq!(contents(&deque), (0..20).collect::<Vec<_>>());
    assert_eq!(deque.len(), 20);
}

#[rstest]
fn test_pop_until_empty_then_reuse() {
    let mut deque: SegmentedDeque<i32, 2> = (0..7).collect();
    for expected in (0..7).rev() {
        assert_eq!(deque.pop_back(), Ok(expected));
    }
    assert!(deque.is_empty());
    assert_eq!(deque.begin(), deque.end());
    deque.push_back(42);
    assert_eq!(contents(&deque), vec![42]);
}

#[rstest]
fn test_clear_empties_deque() {
    let mut deque: SegmentedDeque<String, 4> = (0..10).map(|value| value.to_string()).collect();
    deque.clear();
    assert!(deque.is_empty());
    assert_eq!(deque.iter().next(), None);
    deque.push_back("again".to_string());
    assert_eq!(deque.len(), 1);
}

#[rstest]
fn test_clear_rejects_cursors_taken_before() {
    let mut deque: SegmentedDeque<i32, 3> = (0..10).collect();
    let stale = deque.cursor_at(4).unwrap();
    deque.clear();
    deque.extend(20..30);

    assert_eq!(deque.get(stale), Err(ContainerError::InvalidIterator));
    assert_eq!(deque.erase(stale), Err(ContainerError::InvalidIterator));
    assert_eq!(deque.insert(stale, 0), Err(ContainerError::InvalidIterator));
    assert_eq!(deque.len(), 10);
    assert_eq!(deque.front(), Ok(&20));
}

// =============================================================================
// Positional Access Tests
// =============================================================================

#[rstest]
#[case(0, Ok(&0))]
#[case(7, Ok(&7))]
#[case(14, Ok(&14))]
#[case(15, Err(ContainerError::IndexOutOfBounds))]
#[case(100, Err(ContainerError::IndexOutOfBounds))]
fn test_at_matches_position(#[case] position: usize, #[case] expected: Result<&i32, ContainerError>) {
    let deque: SegmentedDeque<i32, 4> = (0..15).collect();
    assert_eq!(deque.at(position), expected);
}

#[rstest]
fn test_index_mut_writes_through() {
    let mut deque: SegmentedDeque<i32, 3> = (0..9).collect();
    deque[4] = 40;
    assert_eq!(deque[4], 40);
    *deque.at_mut(8).unwrap() += 100;
    assert_eq!(deque.back(), Ok(&108));
}

#[rstest]
#[should_panic(expected = "index out of bounds")]
fn test_index_out_of_range_panics() {
    let deque: SegmentedDeque<i32, 3> = (0..3).collect();
    let _ = deque[3];
}

// =============================================================================
// Cursor Tests
// =============================================================================

#[rstest]
fn test_begin_plus_len_is_end() {
    let deque: SegmentedDeque<i32, 3> = (0..10).collect();
    let length = isize::try_from(deque.len()).unwrap();
    assert_eq!(deque.advance(deque.begin(), length), Ok(deque.end()));
    assert_eq!(deque.distance(deque.end(), deque.begin()), Ok(length));
    assert_eq!(deque.retreat(deque.end(), deque.len()), Ok(deque.begin()));
}

#[rstest]
fn test_cursor_walk_visits_every_element() {
    let deque: SegmentedDeque<i32, 3> = (0..10).collect();
    let mut seen = Vec::new();
    let mut cursor = deque.begin();
    while cursor != deque.end() {
        seen.push(*deque.get(cursor).unwrap());
        cursor = deque.next_cursor(cursor).unwrap();
    }
    assert_eq!(seen, contents(&deque));
}

#[rstest]
fn test_next_of_prev_is_identity() {
    let deque: SegmentedDeque<i32, 3> = (0..10).collect();
    let mut cursor = deque.end();
    for _ in 0..deque.len() {
        let previous = deque.prev_cursor(cursor).unwrap();
        assert_eq!(deque.next_cursor(previous), Ok(cursor));
        cursor = previous;
    }
    assert_eq!(cursor, deque.begin());
}

#[rstest]
fn test_cursor_movement_out_of_range_is_rejected() {
    let deque: SegmentedDeque<i32, 3> = (0..5).collect();
    assert_eq!(deque.next_cursor(deque.end()), Err(ContainerError::InvalidIterator));
    assert_eq!(deque.prev_cursor(deque.begin()), Err(ContainerError::InvalidIterator));
    assert_eq!(deque.advance(deque.begin(), 6), Err(ContainerError::InvalidIterator));
    assert_eq!(deque.advance(deque.begin(), -1), Err(ContainerError::InvalidIterator));
    assert_eq!(deque.get(deque.end()), Err(ContainerError::InvalidIterator));
}

#[rstest]
fn test_cursor_from_other_deque_is_rejected() {
    let mut first: SegmentedDeque<i32, 4> = (0..5).collect();
    let second: SegmentedDeque<i32, 4> = (0..5).collect();
    let foreign = second.begin();
    assert_eq!(first.get(foreign), Err(ContainerError::InvalidIterator));
    assert_eq!(first.distance(first.begin(), foreign), Err(ContainerError::InvalidIterator));
    assert_eq!(first.insert(foreign, 9), Err(ContainerError::InvalidIterator));
    assert_eq!(first.erase(foreign), Err(ContainerError::InvalidIterator));
    assert_eq!(contents(&first), vec![0, 1, 2, 3, 4]);
}

#[rstest]
fn test_cursor_survives_move() {
    let deque: SegmentedDeque<i32, 4> = (0..5).collect();
    let cursor = deque.cursor_at(3).unwrap();
    let moved = deque;
    assert_eq!(moved.get(cursor), Ok(&3));
}

#[rstest]
fn test_cursor_of_clone_is_rejected() {
    let deque: SegmentedDeque<i32, 4> = (0..5).collect();
    let copy = deque.clone();
    assert_eq!(copy.get(deque.begin()), Err(ContainerError::InvalidIterator));
    assert_eq!(copy.get(copy.begin()), Ok(&0));
}

// =============================================================================
// Positional Mutation Tests
// =============================================================================

#[rstest]
#[case::front(0)]
#[case::middle(6)]
#[case::end(12)]
fn test_insert_at_position(#[case] position: usize) {
    let mut deque: SegmentedDeque<i32, 4> = (0..12).collect();
    let mut model: Vec<i32> = (0..12).collect();
    let cursor = deque.cursor_at(position).unwrap();
    let inserted = deque.insert(cursor, -1).unwrap();
    model.insert(position, -1);
    assert_eq!(deque.get(inserted), Ok(&-1));
    assert_eq!(deque.position(inserted), Ok(position));
    assert_eq!(contents(&deque), model);
}

#[rstest]
fn test_insert_into_empty_deque_at_end() {
    let mut deque: SegmentedDeque<&str, 4> = SegmentedDeque::new();
    let cursor = deque.insert(deque.end(), "only").unwrap();
    assert_eq!(deque.get(cursor), Ok(&"only"));
    assert_eq!(deque.len(), 1);
}

#[rstest]
fn test_erase_returns_following_cursor() {
    let mut deque: SegmentedDeque<i32, 3> = (0..9).collect();
    let mut cursor = deque.cursor_at(2).unwrap();
    let mut removed = Vec::new();
    for _ in 0..4 {
        let (following, value) = deque.erase(cursor).unwrap();
        removed.push(value);
        cursor = following;
    }
    assert_eq!(removed, vec![2, 3, 4, 5]);
    assert_eq!(deque.get(cursor), Ok(&6));
    assert_eq!(contents(&deque), vec![0, 1, 6, 7, 8]);
}

#[rstest]
fn test_erase_last_element_returns_end() {
    let mut deque: SegmentedDeque<i32, 3> = (0..4).collect();
    let last = deque.prev_cursor(deque.end()).unwrap();
    let (following, value) = deque.erase(last).unwrap();
    assert_eq!(value, 3);
    assert_eq!(following, deque.end());
}

// =============================================================================
// Iteration and Trait Tests
// =============================================================================

#[rstest]
fn test_iter_is_double_ended_and_exact() {
    let deque: SegmentedDeque<i32, 3> = (0..10).collect();
    let mut iter = deque.iter();
    assert_eq!(iter.len(), 10);
    assert_eq!(iter.next(), Some(&0));
    assert_eq!(iter.next_back(), Some(&9));
    assert_eq!(iter.len(), 8);
    assert_eq!(iter.rev().copied().collect::<Vec<_>>(), (1..9).rev().collect::<Vec<_>>());
}

#[rstest]
fn test_iter_mut_and_into_iter() {
    let mut deque: SegmentedDeque<i32, 3> = (0..7).collect();
    for element in &mut deque {
        *element *= 10;
    }
    let collected: Vec<i32> = deque.into_iter().rev().collect();
    assert_eq!(collected, vec![60, 50, 40, 30, 20, 10, 0]);
}

#[rstest]
fn test_clone_is_independent() {
    let original: SegmentedDeque<i32, 3> = (0..6).collect();
    let mut copy = original.clone();
    copy[0] = 100;
    copy.push_back(6);
    assert_eq!(contents(&original), vec![0, 1, 2, 3, 4, 5]);
    assert_eq!(contents(&copy), vec![100, 1, 2, 3, 4, 5, 6]);
}

#[rstest]
fn test_display_and_debug() {
    let deque: SegmentedDeque<i32, 2> = (1..=3).collect();
    assert_eq!(format!("{deque}"), "[1, 2, 3]");
    assert_eq!(format!("{deque:?}"), "[1, 2, 3]");
    let empty: SegmentedDeque<i32, 2> = SegmentedDeque::new();
    assert_eq!(format!("{empty}"), "[]");
}

#[rstest]
fn test_equality_ignores_block_layout() {
    let mut built_front: SegmentedDeque<i32, 3> = SegmentedDeque::new();
    for value in (0..10).rev() {
        built_front.push_front(value);
    }
    let built_back: SegmentedDeque<i32, 3> = (0..10).collect();
    assert_eq!(built_front, built_back);
}

// =============================================================================
// Capacity Variants
// =============================================================================

macro_rules! capacity_variants {
    ($($capacity:literal),*) => {
        paste::paste! {
            $(
                #[rstest]
                fn [<test_mixed_operations_with_capacity_ $capacity>]() {
                    let mut deque: SegmentedDeque<usize, $capacity> = SegmentedDeque::new();
                    let mut model = std::collections::VecDeque::new();
                    for step in 0..300_usize {
                        match step % 5 {
                            0 | 1 => {
                                deque.push_back(step);
                                model.push_back(step);
                            }
                            2 => {
                                deque.push_front(step);
                                model.push_front(step);
                            }
                            3 => {
                                let position = step % (model.len() + 1);
                                let cursor = deque.cursor_at(position).unwrap();
                                deque.insert(cursor, step).unwrap();
                                model.insert(position, step);
                            }
                            _ => {
                                let position = step % model.len();
                                let cursor = deque.cursor_at(position).unwrap();
                                assert_eq!(deque.erase(cursor).map(|(_, value)| value), Ok(model[position]));
                                model.remove(position);
                            }
                        }
                        assert_eq!(deque.len(), model.len());
                    }
                    assert!(deque.iter().eq(model.iter()));
                }
            )*
        }
    };
}

capacity_variants!(2, 3, 7, 64);

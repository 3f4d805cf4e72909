//! Property-based tests for UnrolledDeque.
//!
//! Random operation sequences are applied to an `UnrolledDeque` and to a
//! `VecDeque` model side by side. After every step the contents must agree
//! and the block layout must stay inside the capacity band.

use std::collections::VecDeque;

use proptest::prelude::*;
use unrolled_deque::{DequeError, UnrolledDeque};

// =============================================================================
// Operations
// =============================================================================

#[derive(Debug, Clone)]
enum Operation {
    PushBack(i32),
    PushFront(i32),
    PopBack,
    PopFront,
    Insert(usize, i32),
    Erase(usize),
    Overwrite(usize, i32),
    Clear,
}

fn operation_strategy() -> impl Strategy<Value = Operation> {
    prop_oneof![
        4 => any::<i32>().prop_map(Operation::PushBack),
        4 => any::<i32>().prop_map(Operation::PushFront),
        2 => Just(Operation::PopBack),
        2 => Just(Operation::PopFront),
        4 => (any::<usize>(), any::<i32>()).prop_map(|(index, value)| Operation::Insert(index, value)),
        3 => any::<usize>().prop_map(Operation::Erase),
        1 => (any::<usize>(), any::<i32>()).prop_map(|(index, value)| Operation::Overwrite(index, value)),
        1 => Just(Operation::Clear),
    ]
}

fn operations() -> impl Strategy<Value = Vec<Operation>> {
    prop::collection::vec(operation_strategy(), 0..200)
}

fn offset(index: usize) -> isize {
    isize::try_from(index).unwrap()
}

fn check_layout<const S: usize>(deque: &UnrolledDeque<i32, S>) -> Result<(), TestCaseError> {
    let sizes: Vec<usize> = deque.block_sizes().collect();
    prop_assert_eq!(sizes.len(), deque.block_count());
    prop_assert_eq!(sizes.iter().sum::<usize>(), deque.len());
    prop_assert!(
        sizes.iter().all(|&size| (1..=S).contains(&size)),
        "block sizes out of band: {:?}",
        sizes
    );
    Ok(())
}

fn apply<const S: usize>(
    deque: &mut UnrolledDeque<i32, S>,
    model: &mut VecDeque<i32>,
    operation: &Operation,
) -> Result<(), TestCaseError> {
    match *operation {
        Operation::PushBack(value) => {
            deque.push_back(value);
            model.push_back(value);
        }
        Operation::PushFront(value) => {
            deque.push_front(value);
            model.push_front(value);
        }
        Operation::PopBack => {
            let expected = model.pop_back().ok_or(DequeError::ContainerIsEmpty);
            prop_assert_eq!(deque.pop_back(), expected);
        }
        Operation::PopFront => {
            let expected = model.pop_front().ok_or(DequeError::ContainerIsEmpty);
            prop_assert_eq!(deque.pop_front(), expected);
        }
        Operation::Insert(index, value) => {
            let index = index % (model.len() + 1);
            let position = deque.advance(deque.begin(), offset(index)).unwrap();
            let inserted = deque.insert(position, value).unwrap();
            model.insert(index, value);
            prop_assert_eq!(deque.index_of(inserted), Ok(index));
            prop_assert_eq!(deque.element(inserted), Ok(&value));
        }
        Operation::Erase(index) => {
            if model.is_empty() {
                prop_assert_eq!(deque.erase(deque.begin()), Err(DequeError::InvalidIterator));
            } else {
                let index = index % model.len();
                let position = deque.advance(deque.begin(), offset(index)).unwrap();
                let (removed, following) = deque.remove(position).unwrap();
                prop_assert_eq!(Some(removed), model.remove(index));
                prop_assert_eq!(deque.index_of(following), Ok(index));
            }
        }
        Operation::Overwrite(index, value) => {
            if !model.is_empty() {
                let index = index % model.len();
                *deque.at_mut(index).unwrap() = value;
                model[index] = value;
            }
        }
        Operation::Clear => {
            deque.clear();
            model.clear();
        }
    }
    Ok(())
}

fn run<const S: usize>(operations: &[Operation]) -> Result<(), TestCaseError> {
    let mut deque: UnrolledDeque<i32, S> = UnrolledDeque::new();
    let mut model = VecDeque::new();
    for operation in operations {
        apply(&mut deque, &mut model, operation)?;
        prop_assert_eq!(deque.len(), model.len());
        prop_assert!(deque.iter().eq(model.iter()));
        check_layout(&deque)?;
    }
    Ok(())
}

proptest! {
    // =========================================================================
    // Model Equivalence
    // =========================================================================

    #[test]
    fn prop_matches_vec_deque_with_capacity_one(operations in operations()) {
        run::<1>(&operations)?;
    }

    #[test]
    fn prop_matches_vec_deque_with_capacity_three(operations in operations()) {
        run::<3>(&operations)?;
    }

    #[test]
    fn prop_matches_vec_deque_with_capacity_eight(operations in operations()) {
        run::<8>(&operations)?;
    }

    // =========================================================================
    // Index Consistency
    // =========================================================================

    #[test]
    fn prop_advance_agrees_with_at(values in prop::collection::vec(any::<i32>(), 0..60)) {
        let deque: UnrolledDeque<i32, 4> = values.iter().copied().collect();
        let begin = deque.begin();
        for index in 0..deque.len() {
            let position = deque.advance(begin, offset(index)).unwrap();
            prop_assert_eq!(deque.element(position), deque.at(index));
            prop_assert_eq!(deque.distance(position, begin), Ok(offset(index)));
            prop_assert_eq!(deque.distance(deque.end(), position), Ok(offset(deque.len() - index)));
        }
    }

    #[test]
    fn prop_advance_composes(
        values in prop::collection::vec(any::<i32>(), 1..60),
        first in -70isize..70,
        second in -70isize..70,
    ) {
        let deque: UnrolledDeque<i32, 4> = values.iter().copied().collect();
        let len = offset(deque.len());
        let start = deque.begin();
        let total = first + second;

        let intermediate = deque.advance(start, first).unwrap();
        if (0..=len).contains(&first) && (0..=len).contains(&total) {
            let stepwise = deque.advance(intermediate, second).unwrap();
            prop_assert_eq!(stepwise, deque.advance(start, total).unwrap());
        } else if !(0..=len).contains(&first) {
            prop_assert!(!intermediate.is_valid());
        }
    }

    #[test]
    fn prop_iter_rev_is_reverse(values in prop::collection::vec(any::<i32>(), 0..60)) {
        let deque: UnrolledDeque<i32, 3> = values.iter().copied().collect();
        let backward: Vec<i32> = deque.iter().rev().copied().collect();
        let mut expected = values.clone();
        expected.reverse();
        prop_assert_eq!(backward, expected);
    }

    // =========================================================================
    // Copies
    // =========================================================================

    #[test]
    fn prop_clone_is_equal_and_independent(
        values in prop::collection::vec(any::<i32>(), 1..60),
        replacement: i32,
    ) {
        let original: UnrolledDeque<i32, 4> = values.iter().copied().collect();
        let mut copy = original.clone();
        prop_assert_eq!(&copy, &original);

        *copy.front_mut().unwrap() = replacement;
        prop_assert_eq!(original.front(), Ok(&values[0]));
    }
}

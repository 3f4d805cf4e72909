//! Iterators over an [`UnrolledDeque`](super::UnrolledDeque).

use std::iter::{Flatten, FusedIterator};

use super::UnrolledDeque;
use super::block::{BlockChain, INLINE_RUNS, Location};

/// Front-to-back iterator over references, created by
/// [`UnrolledDeque::iter`].
///
/// Walks the block chain directly and crosses block boundaries by following
/// the chain links.
pub struct Iter<'a, T> {
    chain: &'a BlockChain<T>,
    front: Location,
    back: Location,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(chain: &'a BlockChain<T>, len: usize) -> Self {
        Self {
            chain,
            front: chain.begin(),
            back: Location::END,
            remaining: len,
        }
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        while self.front.slot >= self.chain.size(self.front.block) {
            let block = self.chain.next(self.front.block)?;
            self.front = Location::new(block, 0);
        }
        let element = self.chain.get(self.front)?;
        self.front.slot += 1;
        self.remaining -= 1;
        Some(element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        while self.back.slot == 0 {
            let block = self.chain.previous(self.back.block)?;
            self.back = Location::new(block, self.chain.size(block));
        }
        self.back.slot -= 1;
        self.remaining -= 1;
        self.chain.get(self.back)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

/// Front-to-back iterator over mutable references, created by
/// [`UnrolledDeque::iter_mut`].
pub struct IterMut<'a, T> {
    runs: Flatten<smallvec::IntoIter<[&'a mut [T]; INLINE_RUNS]>>,
    remaining: usize,
}

impl<'a, T> IterMut<'a, T> {
    pub(crate) fn new(runs: smallvec::IntoIter<[&'a mut [T]; INLINE_RUNS]>, len: usize) -> Self {
        Self {
            runs: runs.flatten(),
            remaining: len,
        }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.runs.next()?;
        self.remaining -= 1;
        Some(element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for IterMut<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let element = self.runs.next_back()?;
        self.remaining -= 1;
        Some(element)
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> FusedIterator for IterMut<'_, T> {}

/// Owning iterator, created by [`UnrolledDeque::into_iter`].
pub struct IntoIter<T, const S: usize> {
    deque: UnrolledDeque<T, S>,
}

impl<T, const S: usize> IntoIter<T, S> {
    pub(crate) const fn new(deque: UnrolledDeque<T, S>) -> Self {
        Self { deque }
    }
}

impl<T, const S: usize> Iterator for IntoIter<T, S> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.deque.pop_front().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.deque.len(), Some(self.deque.len()))
    }
}

impl<T, const S: usize> DoubleEndedIterator for IntoIter<T, S> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.deque.pop_back().ok()
    }
}

impl<T, const S: usize> ExactSizeIterator for IntoIter<T, S> {}

impl<T, const S: usize> FusedIterator for IntoIter<T, S> {}

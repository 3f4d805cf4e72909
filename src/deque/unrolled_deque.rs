//! The [`UnrolledDeque`] container.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Index, IndexMut};

use super::DequeError;
use super::block::{BlockChain, BlockId, HEAD, Location, TAIL};
use super::cursor::{Cursor, CursorMut};
use super::iter::{IntoIter, Iter, IterMut};
use super::position::{OwnerId, Position};

/// Default capacity threshold `S` of a block.
pub const DEFAULT_BLOCK_CAPACITY: usize = 500;

/// A double-ended queue stored as an unrolled doubly linked list.
///
/// Elements live in a chain of blocks holding at most `S` elements each.
/// Inserting into a full block splits it; removing from a block merges it
/// with a neighbour when the pair fits in one block. At most one merge is
/// attempted per insert or erase.
///
/// - O(1) amortized `push_front`, `push_back`, `pop_front`, `pop_back`
///   (plus O(S) shifting inside the touched block)
/// - O(n / S + S) indexed access and position arithmetic
/// - O(1) `len` and `is_empty`
///
/// Positions ([`Position`]) can be obtained, moved with integer offsets,
/// compared and handed back to [`insert`](Self::insert) and
/// [`erase`](Self::erase).
///
/// # Examples
///
/// ```rust
/// use unrolled_deque::UnrolledDeque;
///
/// let mut deque: UnrolledDeque<i32> = UnrolledDeque::new();
/// deque.push_back(2);
/// deque.push_back(3);
/// deque.push_front(1);
///
/// assert_eq!(deque.len(), 3);
/// assert_eq!(deque.front(), Ok(&1));
/// assert_eq!(deque.back(), Ok(&3));
/// assert_eq!(deque[1], 2);
///
/// let position = deque.advance(deque.begin(), 1).unwrap();
/// let inserted = deque.insert(position, 10).unwrap();
/// assert_eq!(deque.element(inserted), Ok(&10));
/// assert_eq!(deque.iter().copied().collect::<Vec<_>>(), vec![1, 10, 2, 3]);
/// ```
pub struct UnrolledDeque<T, const S: usize = DEFAULT_BLOCK_CAPACITY> {
    chain: BlockChain<T>,
    len: usize,
    owner: OwnerId,
    epoch: u64,
}

impl<T, const S: usize> UnrolledDeque<T, S> {
    /// Capacity threshold of a single block.
    pub const BLOCK_CAPACITY: usize = S;

    /// Creates a new empty deque.
    #[must_use]
    pub fn new() -> Self {
        const { assert!(S > 0, "block capacity must be positive") };
        Self {
            chain: BlockChain::new(),
            len: 0,
            owner: OwnerId::fresh(),
            epoch: 0,
        }
    }

    /// Returns the number of elements in the deque.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the deque contains no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of blocks currently backing the deque.
    #[inline]
    #[must_use]
    pub const fn block_count(&self) -> usize {
        self.chain.block_count()
    }

    /// Returns the size of every block, front to back.
    ///
    /// ```rust
    /// use unrolled_deque::UnrolledDeque;
    ///
    /// let deque: UnrolledDeque<i32, 4> = (0..5).collect();
    /// assert_eq!(deque.block_sizes().collect::<Vec<_>>(), vec![4, 1]);
    /// ```
    pub fn block_sizes(&self) -> impl Iterator<Item = usize> {
        self.chain.block_ids().map(|id| self.chain.size(id))
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::IndexOutOfBound`] if `index >= len()`.
    pub fn at(&self, index: usize) -> Result<&T, DequeError> {
        let out_of_bound = self.out_of_bound(index);
        if index >= self.len {
            return Err(out_of_bound);
        }
        self.chain
            .get(self.chain.locate(index))
            .ok_or(out_of_bound)
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::IndexOutOfBound`] if `index >= len()`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, DequeError> {
        let out_of_bound = self.out_of_bound(index);
        if index >= self.len {
            return Err(out_of_bound);
        }
        let location = self.chain.locate(index);
        self.chain.get_mut(location).ok_or(out_of_bound)
    }

    /// Returns the element at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.at(index).ok()
    }

    /// Returns the element at `index` mutably, if any.
    #[must_use]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.at_mut(index).ok()
    }

    /// Returns a reference to the first element.
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::ContainerIsEmpty`] if the deque is empty.
    pub fn front(&self) -> Result<&T, DequeError> {
        self.chain
            .get(self.chain.begin())
            .ok_or(DequeError::ContainerIsEmpty)
    }

    /// Returns a mutable reference to the first element.
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::ContainerIsEmpty`] if the deque is empty.
    pub fn front_mut(&mut self) -> Result<&mut T, DequeError> {
        let begin = self.chain.begin();
        self.chain
            .get_mut(begin)
            .ok_or(DequeError::ContainerIsEmpty)
    }

    /// Returns a reference to the last element.
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::ContainerIsEmpty`] if the deque is empty.
    pub fn back(&self) -> Result<&T, DequeError> {
        let last = self.last().ok_or(DequeError::ContainerIsEmpty)?;
        self.chain.get(last).ok_or(DequeError::ContainerIsEmpty)
    }

    /// Returns a mutable reference to the last element.
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::ContainerIsEmpty`] if the deque is empty.
    pub fn back_mut(&mut self) -> Result<&mut T, DequeError> {
        let last = self.last().ok_or(DequeError::ContainerIsEmpty)?;
        self.chain
            .get_mut(last)
            .ok_or(DequeError::ContainerIsEmpty)
    }

    /// Position of the first element, equal to [`end`](Self::end) when empty.
    #[must_use]
    pub fn begin(&self) -> Position {
        self.issue(self.chain.begin())
    }

    /// Position one past the last element.
    #[must_use]
    pub fn end(&self) -> Position {
        self.issue(Location::END)
    }

    /// Moves `position` by `offset` elements; negative offsets move towards
    /// the front.
    ///
    /// Stepping past the end position or before the first element yields
    /// [`Position::INVALID`].
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::InvalidIterator`] if `position` is invalid,
    /// stale or issued by another deque.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use unrolled_deque::{Position, UnrolledDeque};
    ///
    /// let deque: UnrolledDeque<i32, 4> = (0..10).collect();
    /// let last = deque.advance(deque.end(), -1).unwrap();
    /// assert_eq!(deque.element(last), Ok(&9));
    /// assert_eq!(deque.advance(deque.begin(), 10), Ok(deque.end()));
    /// assert_eq!(deque.advance(deque.begin(), -1), Ok(Position::INVALID));
    /// ```
    pub fn advance(&self, position: Position, offset: isize) -> Result<Position, DequeError> {
        let location = self.resolve(position)?;
        let target = if offset >= 0 {
            self.chain.forward(location, offset.unsigned_abs())
        } else {
            self.chain.backward(location, offset.unsigned_abs())
        };
        Ok(target.map_or(Position::INVALID, |location| self.issue(location)))
    }

    /// Returns `lhs - rhs`: the signed number of steps from `rhs` to `lhs`.
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::InvalidIterator`] if either position is invalid,
    /// stale or issued by another deque.
    pub fn distance(&self, lhs: Position, rhs: Position) -> Result<isize, DequeError> {
        let lhs_to_end = self.chain.distance_to_end(self.resolve(lhs)?);
        let rhs_to_end = self.chain.distance_to_end(self.resolve(rhs)?);
        Ok(if rhs_to_end >= lhs_to_end {
            signed(rhs_to_end - lhs_to_end)
        } else {
            -signed(lhs_to_end - rhs_to_end)
        })
    }

    /// Returns the index `position` refers to; the end position maps to
    /// `len()`.
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::InvalidIterator`] if `position` is invalid,
    /// stale or issued by another deque.
    pub fn index_of(&self, position: Position) -> Result<usize, DequeError> {
        let location = self.resolve(position)?;
        Ok(self.len - self.chain.distance_to_end(location))
    }

    /// Returns the element at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::InvalidIterator`] if `position` is invalid,
    /// stale, issued by another deque or at the end.
    pub fn element(&self, position: Position) -> Result<&T, DequeError> {
        let location = self.resolve_element(position)?;
        self.chain
            .get(location)
            .ok_or(DequeError::InvalidIterator)
    }

    /// Returns the element at `position` mutably.
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::InvalidIterator`] if `position` is invalid,
    /// stale, issued by another deque or at the end.
    pub fn element_mut(&mut self, position: Position) -> Result<&mut T, DequeError> {
        let location = self.resolve_element(position)?;
        self.chain
            .get_mut(location)
            .ok_or(DequeError::InvalidIterator)
    }

    /// Inserts `value` before `position` and returns the position of the
    /// inserted element.
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::InvalidIterator`] if `position` is invalid,
    /// stale or issued by another deque. The deque is left untouched.
    pub fn insert(&mut self, position: Position, value: T) -> Result<Position, DequeError> {
        let location = self.resolve(position)?;
        let inserted = self.insert_at(location, value);
        Ok(self.issue(inserted))
    }

    /// Removes the element at `position` and returns the position of the
    /// element that followed it, or [`end`](Self::end) if it was the last.
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::InvalidIterator`] if `position` is invalid,
    /// stale, issued by another deque or at the end. The deque is left
    /// untouched.
    pub fn erase(&mut self, position: Position) -> Result<Position, DequeError> {
        self.remove(position).map(|(_, following)| following)
    }

    /// Like [`erase`](Self::erase), but hands the removed value back.
    ///
    /// # Errors
    ///
    /// Same as [`erase`](Self::erase).
    pub fn remove(&mut self, position: Position) -> Result<(T, Position), DequeError> {
        let location = self.resolve_element(position)?;
        let (value, following) = self.remove_at(location);
        Ok((value, self.issue(following)))
    }

    /// Appends an element to the back of the deque.
    pub fn push_back(&mut self, value: T) {
        self.insert_at(Location::END, value);
    }

    /// Prepends an element to the front of the deque.
    pub fn push_front(&mut self, value: T) {
        let begin = self.chain.begin();
        self.insert_at(begin, value);
    }

    /// Removes and returns the last element.
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::ContainerIsEmpty`] if the deque is empty.
    pub fn pop_back(&mut self) -> Result<T, DequeError> {
        let last = self.last().ok_or(DequeError::ContainerIsEmpty)?;
        Ok(self.remove_at(last).0)
    }

    /// Removes and returns the first element.
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::ContainerIsEmpty`] if the deque is empty.
    pub fn pop_front(&mut self) -> Result<T, DequeError> {
        if self.is_empty() {
            return Err(DequeError::ContainerIsEmpty);
        }
        let begin = self.chain.begin();
        Ok(self.remove_at(begin).0)
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        _debug!(len = self.len, blocks = self.block_count(), "clearing deque");
        self.bump_epoch();
        self.chain.clear();
        self.len = 0;
    }

    /// Returns a front-to-back iterator over references to the elements.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.chain, self.len)
    }

    /// Returns a front-to-back iterator over mutable references to the
    /// elements.
    #[must_use]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        let len = self.len;
        IterMut::new(self.chain.runs_mut(), len)
    }

    /// Returns a read-only cursor at `position`.
    #[must_use]
    pub const fn cursor(&self, position: Position) -> Cursor<'_, T, S> {
        Cursor::new(self, position)
    }

    /// Returns a read-only cursor at the first element.
    #[must_use]
    pub fn cursor_front(&self) -> Cursor<'_, T, S> {
        Cursor::new(self, self.begin())
    }

    /// Returns a read-only cursor at the last element, or at
    /// [`Position::INVALID`] when the deque is empty.
    #[must_use]
    pub fn cursor_back(&self) -> Cursor<'_, T, S> {
        let position = self
            .last()
            .map_or(Position::INVALID, |location| self.issue(location));
        Cursor::new(self, position)
    }

    /// Returns a mutable cursor at `position`.
    #[must_use]
    pub fn cursor_mut(&mut self, position: Position) -> CursorMut<'_, T, S> {
        CursorMut::new(self, position)
    }

    /// Returns a mutable cursor at the first element.
    #[must_use]
    pub fn cursor_front_mut(&mut self) -> CursorMut<'_, T, S> {
        let position = self.begin();
        CursorMut::new(self, position)
    }

    /// Returns a mutable cursor at the end position.
    #[must_use]
    pub fn cursor_end_mut(&mut self) -> CursorMut<'_, T, S> {
        let position = self.end();
        CursorMut::new(self, position)
    }

    /// Checks that `position` was issued by this deque in the current epoch
    /// and still addresses a linked block and slot.
    pub(crate) fn resolve(&self, position: Position) -> Result<Location, DequeError> {
        let locator = position.locator().ok_or(DequeError::InvalidIterator)?;
        let location = locator.location;
        let belongs = locator.owner == self.owner
            && locator.epoch == self.epoch
            && self.chain.contains(location.block)
            && location.block != HEAD;
        let in_run = if location.block == TAIL {
            location.slot == 0
        } else {
            belongs && location.slot < self.chain.size(location.block)
        };
        if belongs && in_run {
            Ok(location)
        } else {
            Err(DequeError::InvalidIterator)
        }
    }

    /// Like [`resolve`](Self::resolve), additionally rejecting the end
    /// position.
    fn resolve_element(&self, position: Position) -> Result<Location, DequeError> {
        let location = self.resolve(position)?;
        if location.block == TAIL {
            return Err(DequeError::InvalidIterator);
        }
        Ok(location)
    }

    const fn issue(&self, location: Location) -> Position {
        Position::new(self.owner, self.epoch, location)
    }

    const fn bump_epoch(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
    }

    const fn out_of_bound(&self, index: usize) -> DequeError {
        DequeError::IndexOutOfBound {
            index,
            len: self.len,
        }
    }

    fn last(&self) -> Option<Location> {
        let block = self.chain.last();
        (block != HEAD).then(|| Location::new(block, self.chain.size(block) - 1))
    }

    /// `before` may absorb `id` when it is a real block and their sizes fit.
    fn absorbing_predecessor(&self, id: BlockId) -> Option<BlockId> {
        let before = self.chain.previous(id)?;
        (before != HEAD && self.chain.size(before) + self.chain.size(id) <= S).then_some(before)
    }

    /// `id` may absorb its successor when both are real and their sizes fit.
    fn absorbs_successor(&self, id: BlockId) -> Option<BlockId> {
        if id == TAIL {
            return None;
        }
        let after = self.chain.next(id)?;
        (after != TAIL && self.chain.size(id) + self.chain.size(after) <= S).then_some(after)
    }

    /// Inserts before an already validated location and rebalances.
    ///
    /// Inserting before the end position always splits the chain-tail
    /// sentinel, which is how new blocks enter the chain at the back.
    fn insert_at(&mut self, location: Location, value: T) -> Location {
        self.bump_epoch();
        self.len += 1;

        let block = location.block;
        self.chain
            .block_mut(block)
            .elements
            .insert(location.slot, value);
        if block != TAIL && self.chain.size(block) <= S {
            return location;
        }

        let created = self.chain.split(block, location.slot + 1);
        if let Some(before) = self.absorbing_predecessor(created) {
            let offset = self.chain.merge(before);
            return Location::new(before, offset + location.slot);
        }
        if self.absorbs_successor(block).is_some() {
            self.chain.merge(block);
        }
        Location::new(created, location.slot)
    }

    /// Removes an already validated element location and rebalances.
    ///
    /// Returns the removed value and the location of the element that
    /// followed it.
    fn remove_at(&mut self, location: Location) -> (T, Location) {
        self.bump_epoch();
        self.len -= 1;

        let block = location.block;
        let value = self.chain.block_mut(block).elements.remove(location.slot);
        let mut following = if location.slot < self.chain.size(block) {
            location
        } else {
            Location::new(self.chain.next(block).unwrap_or(TAIL), 0)
        };

        if let Some(before) = self.absorbing_predecessor(block) {
            let offset = self.chain.merge(before);
            if following.block == block {
                following = Location::new(before, offset + following.slot);
            }
        } else if let Some(after) = self.absorbs_successor(block) {
            let offset = self.chain.merge(block);
            if following.block == after {
                following = Location::new(block, offset + following.slot);
            }
        }

        if self.len == 0 {
            self.chain.clear();
            following = Location::END;
        }
        (value, following)
    }
}

fn signed(steps: usize) -> isize {
    isize::try_from(steps).unwrap_or(isize::MAX)
}

impl<T, const S: usize> Default for UnrolledDeque<T, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, const S: usize> Clone for UnrolledDeque<T, S> {
    fn clone(&self) -> Self {
        Self {
            chain: self.chain.clone(),
            len: self.len,
            owner: OwnerId::fresh(),
            epoch: 0,
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.bump_epoch();
        self.chain.clone_from(&source.chain);
        self.len = source.len;
    }
}

impl<T: fmt::Debug, const S: usize> fmt::Debug for UnrolledDeque<T, S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq, const S: usize> PartialEq for UnrolledDeque<T, S> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq, const S: usize> Eq for UnrolledDeque<T, S> {}

impl<T: Hash, const S: usize> Hash for UnrolledDeque<T, S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len.hash(state);
        for element in self {
            element.hash(state);
        }
    }
}

impl<T, const S: usize> Index<usize> for UnrolledDeque<T, S> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        match self.at(index) {
            Ok(element) => element,
            Err(error) => panic!("{error}"),
        }
    }
}

impl<T, const S: usize> IndexMut<usize> for UnrolledDeque<T, S> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        match self.at_mut(index) {
            Ok(element) => element,
            Err(error) => panic!("{error}"),
        }
    }
}

impl<T, const S: usize> FromIterator<T> for UnrolledDeque<T, S> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut deque = Self::new();
        deque.extend(iter);
        deque
    }
}

impl<T, const S: usize> Extend<T> for UnrolledDeque<T, S> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.push_back(element);
        }
    }
}

impl<'a, T: Copy + 'a, const S: usize> Extend<&'a T> for UnrolledDeque<T, S> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        for element in iter {
            self.push_back(*element);
        }
    }
}

impl<T, const S: usize> IntoIterator for UnrolledDeque<T, S> {
    type Item = T;
    type IntoIter = IntoIter<T, S>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

impl<'a, T, const S: usize> IntoIterator for &'a UnrolledDeque<T, S> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, const S: usize> IntoIterator for &'a mut UnrolledDeque<T, S> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    type Small = UnrolledDeque<i32, 4>;

    fn sizes<const S: usize>(deque: &UnrolledDeque<i32, S>) -> Vec<usize> {
        deque.block_sizes().collect()
    }

    fn contents<const S: usize>(deque: &UnrolledDeque<i32, S>) -> Vec<i32> {
        deque.iter().copied().collect()
    }

    mod construction {
        use super::*;

        #[rstest]
        fn test_new_is_empty() {
            let deque: Small = UnrolledDeque::new();
            assert!(deque.is_empty());
            assert_eq!(deque.len(), 0);
            assert_eq!(deque.block_count(), 0);
            assert_eq!(deque.begin(), deque.end());
        }

        #[rstest]
        fn test_block_capacity_constant() {
            assert_eq!(Small::BLOCK_CAPACITY, 4);
            assert_eq!(UnrolledDeque::<i32>::BLOCK_CAPACITY, DEFAULT_BLOCK_CAPACITY);
        }

        #[rstest]
        fn test_clone_is_deep_and_gets_new_identity() {
            let mut original: Small = (0..10).collect();
            let copy = original.clone();

            *original.at_mut(0).unwrap() = 100;

            assert_eq!(copy.at(0), Ok(&0));
            assert_eq!(sizes(&copy), sizes(&original));
            assert_ne!(copy.begin(), original.begin());
        }

        #[rstest]
        fn test_clone_from_replaces_contents_and_invalidates_positions() {
            let source: Small = (0..6).collect();
            let mut target: Small = (10..13).collect();
            let stale = target.begin();

            target.clone_from(&source);

            assert_eq!(contents(&target), vec![0, 1, 2, 3, 4, 5]);
            assert_eq!(target.element(stale), Err(DequeError::InvalidIterator));
            assert_eq!(target.element(target.begin()), Ok(&0));
        }
    }

    mod rebalancing {
        use super::*;

        #[rstest]
        fn test_push_back_fills_last_block_before_opening_another() {
            let deque: Small = (0..9).collect();
            assert_eq!(sizes(&deque), vec![4, 4, 1]);
        }

        #[rstest]
        fn test_push_front_splits_first_block() {
            let mut deque: Small = UnrolledDeque::new();
            for value in (0..9).rev() {
                deque.push_front(value);
            }
            assert_eq!(sizes(&deque), vec![1, 4, 4]);
            assert_eq!(contents(&deque), (0..9).collect::<Vec<_>>());
        }

        #[rstest]
        fn test_split_overflowing_block_at_insertion_point() {
            let mut deque: Small = (0..8).collect();
            let position = deque.advance(deque.begin(), 2).unwrap();

            let inserted = deque.insert(position, 99).unwrap();

            assert_eq!(sizes(&deque), vec![3, 2, 4]);
            assert_eq!(deque.element(inserted), Ok(&99));
            assert_eq!(deque.index_of(inserted), Ok(2));
            assert_eq!(contents(&deque), vec![0, 1, 99, 2, 3, 4, 5, 6, 7]);
        }

        #[rstest]
        fn test_split_remainder_absorbs_successor_when_it_fits() {
            let mut deque: Small = (0..5).collect();
            let position = deque.advance(deque.begin(), 1).unwrap();

            let inserted = deque.insert(position, 99).unwrap();

            assert_eq!(sizes(&deque), vec![2, 4]);
            assert_eq!(deque.element(inserted), Ok(&99));
            assert_eq!(contents(&deque), vec![0, 99, 1, 2, 3, 4]);
        }

        #[rstest]
        fn test_erase_merges_into_predecessor() {
            let mut deque: Small = (0..8).collect();
            let position = deque.advance(deque.begin(), 2).unwrap();
            deque.insert(position, 99).unwrap();
            assert_eq!(sizes(&deque), vec![3, 2, 4]);

            let target = deque.advance(deque.begin(), 3).unwrap();
            let following = deque.erase(target).unwrap();

            assert_eq!(sizes(&deque), vec![4, 4]);
            assert_eq!(deque.element(following), Ok(&3));
            assert_eq!(deque.index_of(following), Ok(3));
        }

        #[rstest]
        fn test_erase_absorbs_successor() {
            let mut deque: Small = (0..8).collect();
            let position = deque.advance(deque.begin(), 2).unwrap();
            deque.insert(position, 99).unwrap();

            let following = deque.erase(deque.begin()).unwrap();

            assert_eq!(sizes(&deque), vec![4, 4]);
            assert_eq!(deque.element(following), Ok(&1));
            assert_eq!(contents(&deque), vec![1, 99, 2, 3, 4, 5, 6, 7]);
        }

        #[rstest]
        fn test_erase_last_element_returns_end() {
            let mut deque: Small = (0..5).collect();
            let last = deque.advance(deque.end(), -1).unwrap();

            let following = deque.erase(last).unwrap();

            assert_eq!(following, deque.end());
            assert_eq!(sizes(&deque), vec![4]);
        }

        #[rstest]
        fn test_erase_only_element_resets_chain() {
            let mut deque: Small = UnrolledDeque::new();
            deque.push_back(1);

            let following = deque.erase(deque.begin()).unwrap();

            assert!(deque.is_empty());
            assert_eq!(deque.block_count(), 0);
            assert_eq!(following, deque.end());
        }
    }

    mod failures_leave_deque_untouched {
        use super::*;

        #[rstest]
        fn test_insert_with_stale_position() {
            let mut deque: Small = (0..3).collect();
            let stale = deque.begin();
            deque.push_back(3);

            assert_eq!(deque.insert(stale, 9), Err(DequeError::InvalidIterator));
            assert_eq!(contents(&deque), vec![0, 1, 2, 3]);
        }

        #[rstest]
        fn test_erase_end_position() {
            let mut deque: Small = (0..3).collect();
            assert_eq!(deque.erase(deque.end()), Err(DequeError::InvalidIterator));
            assert_eq!(deque.len(), 3);
        }

        #[rstest]
        fn test_erase_foreign_position() {
            let mut deque: Small = (0..3).collect();
            let other: Small = (0..3).collect();
            assert_eq!(deque.erase(other.begin()), Err(DequeError::InvalidIterator));
            assert_eq!(contents(&deque), vec![0, 1, 2]);
        }

        #[rstest]
        fn test_pop_on_empty() {
            let mut deque: Small = UnrolledDeque::new();
            assert_eq!(deque.pop_back(), Err(DequeError::ContainerIsEmpty));
            assert_eq!(deque.pop_front(), Err(DequeError::ContainerIsEmpty));
            assert!(deque.is_empty());
        }
    }

    #[rstest]
    #[should_panic(expected = "index 3 is out of bound for length 3")]
    fn test_index_operator_panics_out_of_bound() {
        let deque: Small = (0..3).collect();
        let _value = deque[3];
    }

    #[rstest]
    fn test_index_mut_operator_writes_through() {
        let mut deque: Small = (0..6).collect();
        deque[5] = 50;
        assert_eq!(deque.back(), Ok(&50));
    }

    #[rstest]
    fn test_debug_lists_elements() {
        let deque: Small = (1..=3).collect();
        assert_eq!(format!("{deque:?}"), "[1, 2, 3]");
    }

    #[rstest]
    fn test_equality_ignores_block_layout() {
        let pushed_back: Small = (0..9).collect();
        let mut pushed_front: Small = UnrolledDeque::new();
        for value in (0..9).rev() {
            pushed_front.push_front(value);
        }
        assert_ne!(sizes(&pushed_back), sizes(&pushed_front));
        assert_eq!(pushed_back, pushed_front);
    }
}

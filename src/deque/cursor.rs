//! Cursors: positions bound to the deque they walk.
//!
//! A [`Cursor`] borrows its deque immutably and offers position arithmetic,
//! comparison and read access. A [`CursorMut`] borrows its deque mutably and
//! can additionally write through, insert and erase. Both fail with
//! [`DequeError::InvalidIterator`] where an invalid position is used, exactly
//! like the position-taking methods on [`UnrolledDeque`].

use std::fmt;

use super::{DequeError, Position, UnrolledDeque};

/// A read-only cursor over an [`UnrolledDeque`].
///
/// # Examples
///
/// ```rust
/// use unrolled_deque::UnrolledDeque;
///
/// let deque: UnrolledDeque<char, 2> = "abcde".chars().collect();
/// let mut cursor = deque.cursor_front();
///
/// cursor.move_next().unwrap();
/// assert_eq!(cursor.get(), Ok(&'b'));
///
/// let fourth = cursor.offset(2).unwrap();
/// assert_eq!(fourth.get(), Ok(&'d'));
/// assert_eq!(fourth.distance(&cursor), Ok(2));
/// ```
pub struct Cursor<'a, T, const S: usize> {
    deque: &'a UnrolledDeque<T, S>,
    position: Position,
}

impl<'a, T, const S: usize> Cursor<'a, T, S> {
    pub(crate) const fn new(deque: &'a UnrolledDeque<T, S>, position: Position) -> Self {
        Self { deque, position }
    }

    /// The position this cursor is at.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Returns `true` if the position is usable with the borrowed deque,
    /// the end position included.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.deque.resolve(self.position).is_ok()
    }

    /// Returns the element under the cursor.
    ///
    /// # Errors
    ///
    /// [`DequeError::InvalidIterator`] if the cursor is invalid or at the end.
    pub fn get(&self) -> Result<&'a T, DequeError> {
        self.deque.element(self.position)
    }

    /// Returns a cursor `offset` elements away. Stepping outside the
    /// sequence yields a cursor at [`Position::INVALID`].
    ///
    /// # Errors
    ///
    /// [`DequeError::InvalidIterator`] if this cursor is invalid.
    pub fn offset(&self, offset: isize) -> Result<Self, DequeError> {
        let position = self.deque.advance(self.position, offset)?;
        Ok(Self::new(self.deque, position))
    }

    /// Moves by `offset` elements in place.
    ///
    /// # Errors
    ///
    /// [`DequeError::InvalidIterator`] if this cursor is invalid.
    pub fn offset_by(&mut self, offset: isize) -> Result<(), DequeError> {
        self.position = self.deque.advance(self.position, offset)?;
        Ok(())
    }

    /// Moves one element towards the back.
    ///
    /// # Errors
    ///
    /// [`DequeError::InvalidIterator`] if this cursor is invalid.
    pub fn move_next(&mut self) -> Result<(), DequeError> {
        self.offset_by(1)
    }

    /// Moves one element towards the front.
    ///
    /// # Errors
    ///
    /// [`DequeError::InvalidIterator`] if this cursor is invalid.
    pub fn move_prev(&mut self) -> Result<(), DequeError> {
        self.offset_by(-1)
    }

    /// Returns `self - other`.
    ///
    /// # Errors
    ///
    /// [`DequeError::InvalidIterator`] if either cursor is invalid or they
    /// walk different deques.
    pub fn distance(&self, other: &Self) -> Result<isize, DequeError> {
        self.deque.distance(self.position, other.position)
    }

    /// Returns the index under the cursor; the end maps to `len()`.
    ///
    /// # Errors
    ///
    /// [`DequeError::InvalidIterator`] if the cursor is invalid.
    pub fn index(&self) -> Result<usize, DequeError> {
        self.deque.index_of(self.position)
    }
}

impl<T, const S: usize> Clone for Cursor<'_, T, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, const S: usize> Copy for Cursor<'_, T, S> {}

impl<T, const S: usize> PartialEq for Cursor<'_, T, S> {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position
    }
}

impl<T, const S: usize> Eq for Cursor<'_, T, S> {}

impl<T, const S: usize> fmt::Debug for Cursor<'_, T, S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Cursor")
            .field("position", &self.position)
            .finish_non_exhaustive()
    }
}

/// A cursor holding a mutable borrow of an [`UnrolledDeque`].
///
/// # Examples
///
/// ```rust
/// use unrolled_deque::UnrolledDeque;
///
/// let mut deque: UnrolledDeque<i32, 2> = (1..=4).collect();
/// let mut cursor = deque.cursor_front_mut();
///
/// cursor.offset_by(2).unwrap();
/// cursor.insert(10).unwrap();
/// *cursor.get_mut().unwrap() += 1;
/// assert_eq!(cursor.erase(), Ok(11));
/// assert_eq!(cursor.get(), Ok(&3));
///
/// assert_eq!(deque.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
/// ```
pub struct CursorMut<'a, T, const S: usize> {
    deque: &'a mut UnrolledDeque<T, S>,
    position: Position,
}

impl<'a, T, const S: usize> CursorMut<'a, T, S> {
    pub(crate) const fn new(deque: &'a mut UnrolledDeque<T, S>, position: Position) -> Self {
        Self { deque, position }
    }

    /// The position this cursor is at.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Returns `true` if the position is usable with the borrowed deque,
    /// the end position included.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.deque.resolve(self.position).is_ok()
    }

    /// Reborrows as a read-only cursor at the same position.
    #[must_use]
    pub fn as_cursor(&self) -> Cursor<'_, T, S> {
        Cursor::new(self.deque, self.position)
    }

    /// Returns the element under the cursor.
    ///
    /// # Errors
    ///
    /// [`DequeError::InvalidIterator`] if the cursor is invalid or at the end.
    pub fn get(&self) -> Result<&T, DequeError> {
        self.deque.element(self.position)
    }

    /// Returns the element under the cursor mutably.
    ///
    /// # Errors
    ///
    /// [`DequeError::InvalidIterator`] if the cursor is invalid or at the end.
    pub fn get_mut(&mut self) -> Result<&mut T, DequeError> {
        self.deque.element_mut(self.position)
    }

    /// Moves by `offset` elements in place. Stepping outside the sequence
    /// leaves the cursor at [`Position::INVALID`].
    ///
    /// # Errors
    ///
    /// [`DequeError::InvalidIterator`] if this cursor is invalid.
    pub fn offset_by(&mut self, offset: isize) -> Result<(), DequeError> {
        self.position = self.deque.advance(self.position, offset)?;
        Ok(())
    }

    /// Moves one element towards the back.
    ///
    /// # Errors
    ///
    /// [`DequeError::InvalidIterator`] if this cursor is invalid.
    pub fn move_next(&mut self) -> Result<(), DequeError> {
        self.offset_by(1)
    }

    /// Moves one element towards the front.
    ///
    /// # Errors
    ///
    /// [`DequeError::InvalidIterator`] if this cursor is invalid.
    pub fn move_prev(&mut self) -> Result<(), DequeError> {
        self.offset_by(-1)
    }

    /// Inserts `value` before the cursor and moves the cursor onto it.
    ///
    /// # Errors
    ///
    /// [`DequeError::InvalidIterator`] if the cursor is invalid.
    pub fn insert(&mut self, value: T) -> Result<(), DequeError> {
        self.position = self.deque.insert(self.position, value)?;
        Ok(())
    }

    /// Removes the element under the cursor and moves the cursor onto the
    /// element that followed it.
    ///
    /// # Errors
    ///
    /// [`DequeError::InvalidIterator`] if the cursor is invalid or at the end.
    pub fn erase(&mut self) -> Result<T, DequeError> {
        let (value, following) = self.deque.remove(self.position)?;
        self.position = following;
        Ok(value)
    }

    /// Returns the index under the cursor; the end maps to `len()`.
    ///
    /// # Errors
    ///
    /// [`DequeError::InvalidIterator`] if the cursor is invalid.
    pub fn index(&self) -> Result<usize, DequeError> {
        self.deque.index_of(self.position)
    }
}

impl<T, const S: usize> fmt::Debug for CursorMut<'_, T, S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("CursorMut")
            .field("position", &self.position)
            .finish_non_exhaustive()
    }
}

//! Block-structured double-ended queue.
//!
//! This module provides [`UnrolledDeque`], a sequence container stored as an
//! unrolled doubly linked list:
//!
//! - a chain of blocks, bracketed by two sentinel blocks that never hold
//!   elements
//! - each block a run of at most `S` elements
//! - split/merge maintenance after every insert and erase keeping blocks
//!   inside that band
//!
//! Positions ([`Position`]) survive being handed around by value. They are
//! validated against the deque that issued them, so a position used after a
//! structural mutation, or with a different deque, is reported as
//! [`DequeError::InvalidIterator`] instead of reading the wrong element.
//!
//! # Examples
//!
//! ```rust
//! use unrolled_deque::{DequeError, UnrolledDeque};
//!
//! let mut deque: UnrolledDeque<i32> = (1..=1000).collect();
//! assert_eq!(deque.at(500), Ok(&501));
//!
//! deque.push_front(0);
//! assert_eq!(deque.at(0), Ok(&0));
//! assert_eq!(deque.at(501), Ok(&501));
//!
//! let copy = deque.clone();
//! *deque.at_mut(0).unwrap() = -1;
//! assert_eq!(copy.at(0), Ok(&0));
//!
//! assert_eq!(
//!     deque.at(deque.len()),
//!     Err(DequeError::IndexOutOfBound { index: 1001, len: 1001 })
//! );
//! ```

mod block;
mod cursor;
mod error;
mod iter;
mod position;
mod unrolled_deque;

pub use cursor::Cursor;
pub use cursor::CursorMut;
pub use error::DequeError;
pub use iter::IntoIter;
pub use iter::Iter;
pub use iter::IterMut;
pub use position::Position;
pub use unrolled_deque::DEFAULT_BLOCK_CAPACITY;
pub use unrolled_deque::UnrolledDeque;

// =============================================================================
// Static Assertions
// =============================================================================

static_assertions::const_assert!(DEFAULT_BLOCK_CAPACITY >= 2);
static_assertions::assert_impl_all!(UnrolledDeque<i32>: Send, Sync, Clone, Default);
static_assertions::assert_impl_all!(UnrolledDeque<String, 8>: Send, Sync, Clone);
static_assertions::assert_impl_all!(Position: Copy, Send, Sync, Eq, std::hash::Hash);
static_assertions::assert_not_impl_any!(UnrolledDeque<std::rc::Rc<i32>>: Send, Sync);
static_assertions::assert_impl_all!(DequeError: std::error::Error, Send, Sync);

//! # unrolled-deque
//!
//! A double-ended queue backed by an unrolled doubly linked list: a chain of
//! capacity-bounded blocks, each holding a run of elements.
//!
//! ## Overview
//!
//! - **Deque**: [`UnrolledDeque`] with amortized O(1) pushes and pops at both
//!   ends, block-skipping indexed access, and insert/erase at any position
//! - **Positions**: [`Position`] handles with integer offset arithmetic and
//!   distance, checked against the deque that issued them
//! - **Cursors**: [`Cursor`] and [`CursorMut`] bundling a position with its
//!   deque
//! - **Iterators**: [`Iter`], [`IterMut`] and [`IntoIter`], all
//!   double-ended and exact-size
//!
//! ## Feature Flags
//!
//! - `tracing`: emit block split/merge events through `tracing`
//!
//! ## Example
//!
//! ```rust
//! use unrolled_deque::prelude::*;
//!
//! let mut deque: UnrolledDeque<&str> = UnrolledDeque::new();
//! deque.push_back("b");
//! deque.push_front("a");
//!
//! assert_eq!(deque.pop_front(), Ok("a"));
//! assert_eq!(deque.pop_back(), Ok("b"));
//! assert_eq!(deque.pop_back(), Err(DequeError::ContainerIsEmpty));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

#[macro_use]
mod macros;

pub mod deque;

pub use deque::{
    Cursor, CursorMut, DEFAULT_BLOCK_CAPACITY, DequeError, IntoIter, Iter, IterMut, Position,
    UnrolledDeque,
};

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use unrolled_deque::prelude::*;
/// ```
pub mod prelude {
    pub use crate::deque::{Cursor, CursorMut, DequeError, Position, UnrolledDeque};
}

//! Error type for deque operations.
//!
//! Every failure is reported before the deque is touched, so an `Err`
//! always leaves the container exactly as it was.

/// Represents the ways a deque operation can be misused.
///
/// # Examples
///
/// ```rust
/// use unrolled_deque::{DequeError, UnrolledDeque};
///
/// let deque: UnrolledDeque<i32> = UnrolledDeque::new();
/// assert_eq!(deque.front(), Err(DequeError::ContainerIsEmpty));
/// assert_eq!(
///     deque.at(3),
///     Err(DequeError::IndexOutOfBound { index: 3, len: 0 })
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DequeError {
    /// Indexed access outside `[0, len)`.
    IndexOutOfBound {
        /// The requested index.
        index: usize,
        /// The number of elements at the time of the request.
        len: usize,
    },
    /// `front`, `back`, `pop_front` or `pop_back` on an empty deque.
    ContainerIsEmpty,
    /// A position that is invalid, stale, at the end where an element is
    /// required, or that belongs to another deque.
    InvalidIterator,
}

impl std::fmt::Display for DequeError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IndexOutOfBound { index, len } => {
                write!(formatter, "index {index} is out of bound for length {len}")
            }
            Self::ContainerIsEmpty => write!(formatter, "container is empty"),
            Self::InvalidIterator => write!(formatter, "invalid iterator"),
        }
    }
}

impl std::error::Error for DequeError {}

//! Position handles into an [`UnrolledDeque`](super::UnrolledDeque).

use std::sync::atomic::{AtomicU64, Ordering};

use super::block::Location;

static NEXT_OWNER: AtomicU64 = AtomicU64::new(0);

/// Identity of one deque instance. Clones receive a fresh identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct OwnerId(u64);

impl OwnerId {
    pub(crate) fn fresh() -> Self {
        Self(NEXT_OWNER.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct Locator {
    pub(crate) owner: OwnerId,
    pub(crate) epoch: u64,
    pub(crate) location: Location,
}

/// A position inside an [`UnrolledDeque`](super::UnrolledDeque).
///
/// A `Position` is a plain `Copy` descriptor: it borrows nothing and owns
/// nothing. It records which deque issued it, the structural epoch of that
/// deque at the time, and the block and slot it points at. Every
/// structural mutation of the deque (insert, erase, push, pop, clear,
/// assignment) starts a new epoch, after which older positions are
/// rejected with [`DequeError::InvalidIterator`](super::DequeError::InvalidIterator).
///
/// Two positions are equal only if they were issued by the same deque in
/// the same epoch and point at the same block and slot.
///
/// # Examples
///
/// ```rust
/// use unrolled_deque::{DequeError, UnrolledDeque};
///
/// let mut deque: UnrolledDeque<i32> = (1..=3).collect();
/// let second = deque.advance(deque.begin(), 1).unwrap();
/// assert_eq!(deque.element(second), Ok(&2));
///
/// deque.push_back(4);
/// assert_eq!(deque.element(second), Err(DequeError::InvalidIterator));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    locator: Option<Locator>,
}

impl Position {
    /// The invalid position. Every operation consuming it fails.
    pub const INVALID: Self = Self { locator: None };

    pub(crate) const fn new(owner: OwnerId, epoch: u64, location: Location) -> Self {
        Self {
            locator: Some(Locator {
                owner,
                epoch,
                location,
            }),
        }
    }

    /// Returns `false` for [`Position::INVALID`], which is what arithmetic
    /// yields when it steps outside the sequence.
    ///
    /// A valid-looking position can still be stale; only the owning deque
    /// can tell.
    #[inline]
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.locator.is_some()
    }

    #[inline]
    pub(crate) const fn locator(&self) -> Option<&Locator> {
        self.locator.as_ref()
    }
}

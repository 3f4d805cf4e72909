//! Block chain storage.
//!
//! A [`BlockChain`] is an arena of [`Block`]s linked into a doubly linked
//! sequence. Two sentinel blocks, [`HEAD`] and [`TAIL`], bracket the real
//! blocks and never hold elements, so walking code never has to special-case
//! an empty chain.
//!
//! Blocks refer to their neighbours through [`BlockId`] handles instead of
//! references. Splitting and merging are therefore plain relinking of
//! handles plus moving element runs between two `Vec`s.

use std::mem;

use smallvec::SmallVec;

/// Number of block runs gathered without a heap allocation by mutable iteration.
pub(crate) const INLINE_RUNS: usize = 8;

/// Handle of a block slot inside a [`BlockChain`] arena.
pub(crate) type BlockId = usize;

/// Chain-head sentinel.
pub(crate) const HEAD: BlockId = 0;

/// Chain-tail sentinel. Slot 0 of this block is the end position.
pub(crate) const TAIL: BlockId = 1;

/// A position inside the chain: a block and a slot within its run.
///
/// For a real block `slot < size`. For [`TAIL`], `slot == 0` denotes the end
/// of the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct Location {
    pub(crate) block: BlockId,
    pub(crate) slot: usize,
}

impl Location {
    pub(crate) const END: Self = Self {
        block: TAIL,
        slot: 0,
    };

    pub(crate) const fn new(block: BlockId, slot: usize) -> Self {
        Self { block, slot }
    }
}

#[derive(Clone)]
pub(crate) struct Block<T> {
    pub(crate) elements: Vec<T>,
    pub(crate) previous: Option<BlockId>,
    pub(crate) next: Option<BlockId>,
}

impl<T> Block<T> {
    const fn sentinel(previous: Option<BlockId>, next: Option<BlockId>) -> Self {
        Self {
            elements: Vec::new(),
            previous,
            next,
        }
    }

    #[inline]
    pub(crate) fn size(&self) -> usize {
        self.elements.len()
    }
}

#[derive(Clone)]
enum Slot<T> {
    Occupied(Block<T>),
    Vacant { next_free: Option<BlockId> },
}

/// Arena-backed doubly linked chain of blocks.
#[derive(Clone)]
pub(crate) struct BlockChain<T> {
    slots: Vec<Slot<T>>,
    free_head: Option<BlockId>,
    real_blocks: usize,
}

impl<T> BlockChain<T> {
    /// Creates the canonical empty chain: `HEAD <-> TAIL`.
    pub(crate) fn new() -> Self {
        Self {
            slots: vec![
                Slot::Occupied(Block::sentinel(None, Some(TAIL))),
                Slot::Occupied(Block::sentinel(Some(HEAD), None)),
            ],
            free_head: None,
            real_blocks: 0,
        }
    }

    /// Number of real blocks between the sentinels.
    #[inline]
    pub(crate) const fn block_count(&self) -> usize {
        self.real_blocks
    }

    /// Returns `true` if `id` addresses a block that is currently linked.
    pub(crate) fn contains(&self, id: BlockId) -> bool {
        matches!(self.slots.get(id), Some(Slot::Occupied(_)))
    }

    pub(crate) fn block(&self, id: BlockId) -> &Block<T> {
        match &self.slots[id] {
            Slot::Occupied(block) => block,
            Slot::Vacant { .. } => unreachable!("block {id} is not linked into the chain"),
        }
    }

    pub(crate) fn block_mut(&mut self, id: BlockId) -> &mut Block<T> {
        match &mut self.slots[id] {
            Slot::Occupied(block) => block,
            Slot::Vacant { .. } => unreachable!("block {id} is not linked into the chain"),
        }
    }

    #[inline]
    pub(crate) fn size(&self, id: BlockId) -> usize {
        self.block(id).size()
    }

    /// Successor of `id`; `None` only for [`TAIL`].
    #[inline]
    pub(crate) fn next(&self, id: BlockId) -> Option<BlockId> {
        self.block(id).next
    }

    /// Predecessor of `id`; `None` only for [`HEAD`].
    #[inline]
    pub(crate) fn previous(&self, id: BlockId) -> Option<BlockId> {
        self.block(id).previous
    }

    /// First real block, or [`TAIL`] when the chain is empty.
    pub(crate) fn first(&self) -> BlockId {
        self.next(HEAD).unwrap_or(TAIL)
    }

    /// Last real block, or [`HEAD`] when the chain is empty.
    pub(crate) fn last(&self) -> BlockId {
        self.previous(TAIL).unwrap_or(HEAD)
    }

    /// Position of the first element, which is [`Location::END`] when empty.
    pub(crate) fn begin(&self) -> Location {
        Location::new(self.first(), 0)
    }

    /// Real block ids in sequence order.
    pub(crate) fn block_ids(&self) -> BlockIds<'_, T> {
        BlockIds {
            chain: self,
            current: self.first(),
        }
    }

    fn allocate(&mut self, block: Block<T>) -> BlockId {
        self.real_blocks += 1;
        match self.free_head {
            Some(id) => {
                let Slot::Vacant { next_free } = &self.slots[id] else {
                    unreachable!("free list points at an occupied slot");
                };
                self.free_head = *next_free;
                self.slots[id] = Slot::Occupied(block);
                id
            }
            None => {
                self.slots.push(Slot::Occupied(block));
                self.slots.len() - 1
            }
        }
    }

    fn release(&mut self, id: BlockId) -> Block<T> {
        debug_assert!(id != HEAD && id != TAIL, "sentinels are never released");
        self.real_blocks -= 1;
        let vacant = Slot::Vacant {
            next_free: self.free_head,
        };
        self.free_head = Some(id);
        match mem::replace(&mut self.slots[id], vacant) {
            Slot::Occupied(block) => block,
            Slot::Vacant { .. } => unreachable!("block {id} released twice"),
        }
    }

    /// Splits `id` before slot `at`.
    ///
    /// A new block holding elements `[0, at)` is linked in as the predecessor
    /// of `id`, which keeps `[at, size)`. Returns the new block.
    pub(crate) fn split(&mut self, id: BlockId, at: usize) -> BlockId {
        let block = self.block_mut(id);
        let remainder = block.elements.split_off(at);
        let front = mem::replace(&mut block.elements, remainder);
        let Some(previous) = block.previous else {
            unreachable!("the chain-head sentinel is never split");
        };

        _trace!(
            block = id,
            front = front.len(),
            remainder = self.size(id),
            "splitting block"
        );

        let created = self.allocate(Block {
            elements: front,
            previous: Some(previous),
            next: Some(id),
        });
        self.block_mut(previous).next = Some(created);
        self.block_mut(id).previous = Some(created);
        created
    }

    /// Appends the successor of `id` onto `id` and releases the successor.
    ///
    /// Returns the size `id` had before absorbing, which is the slot offset
    /// of the absorbed elements.
    pub(crate) fn merge(&mut self, id: BlockId) -> usize {
        let Some(successor) = self.next(id) else {
            unreachable!("the chain-tail sentinel never absorbs a successor");
        };
        debug_assert!(successor != TAIL, "the chain-tail sentinel is never merged");

        let absorbed = self.release(successor);
        if let Some(after) = absorbed.next {
            self.block_mut(after).previous = Some(id);
        }

        let block = self.block_mut(id);
        let offset = block.size();
        block.elements.extend(absorbed.elements);
        block.next = absorbed.next;

        _trace!(block = id, absorbed = successor, size = offset, "merged block");
        offset
    }

    /// Drops every real block and relinks `HEAD <-> TAIL`.
    pub(crate) fn clear(&mut self) {
        *self = Self::new();
    }

    /// Steps from `from` towards [`TAIL`] by `offset` elements.
    ///
    /// Whole blocks are skipped while the remaining offset covers them.
    /// Returns `None` when the walk would overshoot the end position.
    pub(crate) fn forward(&self, from: Location, offset: usize) -> Option<Location> {
        let mut block = from.block;
        let within = self.size(block) - from.slot;
        if offset < within {
            return Some(Location::new(block, from.slot + offset));
        }

        let mut remaining = offset - within;
        while let Some(next) = self.next(block) {
            block = next;
            if next == TAIL || self.size(next) > remaining {
                break;
            }
            remaining -= self.size(next);
        }

        if block == TAIL && remaining > 0 {
            None
        } else {
            Some(Location::new(block, remaining))
        }
    }

    /// Steps from `from` towards [`HEAD`] by `offset` elements.
    ///
    /// Returns `None` when the walk would step before the first element.
    pub(crate) fn backward(&self, from: Location, offset: usize) -> Option<Location> {
        if offset <= from.slot {
            return Some(Location::new(from.block, from.slot - offset));
        }

        let mut block = from.block;
        let mut remaining = offset - (from.slot + 1);
        loop {
            block = self.previous(block)?;
            if block == HEAD || self.size(block) > remaining {
                break;
            }
            remaining -= self.size(block);
        }

        if block == HEAD {
            None
        } else {
            Some(Location::new(block, self.size(block) - 1 - remaining))
        }
    }

    /// Number of forward steps from `from` to the end position.
    pub(crate) fn distance_to_end(&self, from: Location) -> usize {
        let mut steps = self.size(from.block) - from.slot;
        let mut block = from.block;
        while let Some(next) = self.next(block) {
            steps += self.size(next);
            block = next;
        }
        steps
    }

    /// Locates the element at `index`, skipping whole blocks.
    ///
    /// The caller guarantees `index` is below the total element count.
    pub(crate) fn locate(&self, index: usize) -> Location {
        let mut block = self.first();
        let mut remaining = index;
        while block != TAIL && self.size(block) <= remaining {
            remaining -= self.size(block);
            block = self.next(block).unwrap_or(TAIL);
        }
        Location::new(block, remaining)
    }

    pub(crate) fn get(&self, location: Location) -> Option<&T> {
        self.block(location.block).elements.get(location.slot)
    }

    pub(crate) fn get_mut(&mut self, location: Location) -> Option<&mut T> {
        self.block_mut(location.block)
            .elements
            .get_mut(location.slot)
    }

    /// Element runs of every real block, in sequence order.
    pub(crate) fn runs(&self) -> impl Iterator<Item = &[T]> {
        self.block_ids()
            .map(|id| self.block(id).elements.as_slice())
    }

    /// Mutable element runs of every real block, in sequence order.
    ///
    /// Runs are gathered inline for chains of up to [`INLINE_RUNS`] blocks.
    pub(crate) fn runs_mut(&mut self) -> smallvec::IntoIter<[&mut [T]; INLINE_RUNS]> {
        let order: Vec<BlockId> = self.block_ids().collect();
        let mut by_id: Vec<Option<&mut [T]>> = self
            .slots
            .iter_mut()
            .map(|slot| match slot {
                Slot::Occupied(block) => Some(block.elements.as_mut_slice()),
                Slot::Vacant { .. } => None,
            })
            .collect();
        let runs: SmallVec<[&mut [T]; INLINE_RUNS]> = order
            .into_iter()
            .filter_map(|id| by_id[id].take())
            .collect();
        runs.into_iter()
    }
}

/// Iterator over real block ids in sequence order.
pub(crate) struct BlockIds<'a, T> {
    chain: &'a BlockChain<T>,
    current: BlockId,
}

impl<T> Iterator for BlockIds<'_, T> {
    type Item = BlockId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current == TAIL {
            return None;
        }
        let id = self.current;
        self.current = self.chain.next(id).unwrap_or(TAIL);
        Some(id)
    }
}

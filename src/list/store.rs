//! Slot store: the physical backing array behind a [`TombList`](super::TombList).
//!
//! The store keeps three counts apart:
//!
//! - `len`: live slots, what callers see as the list length
//! - `slots.len()`: occupied slots, live plus tombstoned
//! - `capacity`: slots allocated, grown by a fixed increment
//!
//! Removal buries a slot in place and records its physical position in a
//! short sorted list of tombstones. Logical indices are translated to
//! physical positions by walking that list, which never holds more than
//! `compaction_threshold - 1` entries: the removal that reaches the
//! threshold compacts the store, dropping every tombstone and shrinking the
//! allocation to exactly `len` slots.
//!
//! Every structural change (push, insert, remove, clear, compaction,
//! reordering) bumps `version`, which cursors use to fail fast.

use std::cmp::Ordering;

use smallvec::SmallVec;
use tracing::debug;

use super::slot::Slot;
use crate::options::ListOptions;

/// Tombstone positions kept inline before spilling to the heap. Covers the
/// default compaction threshold.
const INLINE_TOMBSTONES: usize = 16;

pub(crate) struct SlotStore<T> {
    slots: Vec<Slot<T>>,
    /// Physical positions of tombstoned slots, ascending.
    tombstones: SmallVec<[usize; INLINE_TOMBSTONES]>,
    capacity: usize,
    len: usize,
    version: u64,
    initial_capacity: usize,
    growth_increment: usize,
    compaction_threshold: usize,
}

impl<T> SlotStore<T> {
    /// Create an empty store. Options must already be validated.
    pub(crate) fn new(options: &ListOptions) -> SlotStore<T> {
        return SlotStore {
            slots: Vec::with_capacity(options.initial_capacity),
            tombstones: SmallVec::new(),
            capacity: options.initial_capacity,
            len: 0,
            version: 0,
            initial_capacity: options.initial_capacity,
            growth_increment: options.growth_increment,
            compaction_threshold: options.compaction_threshold,
        };
    }

    /// Create a store holding exactly `values`, with no spare capacity.
    pub(crate) fn from_values(values: Vec<T>, options: &ListOptions) -> SlotStore<T> {
        let mut slots = Vec::with_capacity(values.len());
        slots.extend(values.into_iter().map(Slot::Live));
        let len = slots.len();
        return SlotStore {
            slots,
            tombstones: SmallVec::new(),
            capacity: len,
            len,
            version: 0,
            initial_capacity: options.initial_capacity,
            growth_increment: options.growth_increment,
            compaction_threshold: options.compaction_threshold,
        };
    }

    pub(crate) fn len(&self) -> usize {
        return self.len;
    }

    pub(crate) fn capacity(&self) -> usize {
        return self.capacity;
    }

    pub(crate) fn pending_removals(&self) -> usize {
        return self.tombstones.len();
    }

    pub(crate) fn compaction_threshold(&self) -> usize {
        return self.compaction_threshold;
    }

    pub(crate) fn version(&self) -> u64 {
        return self.version;
    }

    pub(crate) fn options(&self) -> ListOptions {
        return ListOptions::new()
            .with_initial_capacity(self.initial_capacity)
            .with_growth_increment(self.growth_increment)
            .with_compaction_threshold(self.compaction_threshold);
    }

    pub(crate) fn slots(&self) -> &[Slot<T>] {
        return &self.slots;
    }

    /// Iterate live values in physical order.
    pub(crate) fn live(&self) -> impl DoubleEndedIterator<Item = &T> {
        return self.slots.iter().filter_map(Slot::value);
    }

    fn bump(&mut self) {
        self.version = self.version.wrapping_add(1);
    }

    /// Translate a logical index to a physical position.
    ///
    /// For `logical < len` this is the position of the logical-th live
    /// slot. For `logical == len` it is `slots.len()`, the append position.
    pub(crate) fn physical_index(&self, logical: usize) -> usize {
        let mut physical = logical;
        for &tombstone in &self.tombstones {
            if tombstone <= physical {
                physical += 1;
            } else {
                break;
            }
        }
        return physical;
    }

    pub(crate) fn get(&self, logical: usize) -> Option<&T> {
        if logical >= self.len {
            return None;
        }
        let physical = self.physical_index(logical);
        return self.slots.get(physical).and_then(Slot::value);
    }

    pub(crate) fn get_mut(&mut self, logical: usize) -> Option<&mut T> {
        if logical >= self.len {
            return None;
        }
        let physical = self.physical_index(logical);
        return self.slots.get_mut(physical).and_then(Slot::value_mut);
    }

    /// Make room for one more occupied slot, growing by the fixed increment.
    fn reserve_one(&mut self) {
        if self.slots.len() < self.capacity {
            return;
        }
        let old_capacity = self.capacity;
        self.capacity += self.growth_increment;
        self.slots.reserve_exact(self.capacity - self.slots.len());
        debug!(old_capacity, new_capacity = self.capacity, "grew slot store");
    }

    pub(crate) fn push(&mut self, value: T) {
        self.reserve_one();
        self.slots.push(Slot::Live(value));
        self.len += 1;
        self.bump();
    }

    /// Insert at a logical index in `[0, len]`.
    pub(crate) fn insert(&mut self, logical: usize, value: T) {
        debug_assert!(logical <= self.len);
        self.reserve_one();
        let physical = self.physical_index(logical);
        for tombstone in self.tombstones.iter_mut() {
            if *tombstone >= physical {
                *tombstone += 1;
            }
        }
        self.slots.insert(physical, Slot::Live(value));
        self.len += 1;
        self.bump();
    }

    /// Bury the slot at a logical index, compacting once enough tombstones
    /// have piled up. Returns `None` if the index is out of range.
    pub(crate) fn remove(&mut self, logical: usize) -> Option<T> {
        if logical >= self.len {
            return None;
        }
        let physical = self.physical_index(logical);
        let value = self.slots.get_mut(physical).and_then(Slot::bury)?;
        let at = self.tombstones.partition_point(|&t| t < physical);
        self.tombstones.insert(at, physical);
        self.len -= 1;
        self.bump();

        if self.tombstones.len() >= self.compaction_threshold {
            self.compact();
        }
        return Some(value);
    }

    /// Physically drop every tombstone, preserving survivor order, and shrink
    /// the allocation to exactly `len` slots. Returns the number of slots
    /// reclaimed.
    pub(crate) fn compact(&mut self) -> usize {
        if self.tombstones.is_empty() {
            return 0;
        }
        let reclaimed = self.tombstones.len();
        self.slots.retain(Slot::is_live);
        self.tombstones.clear();
        self.capacity = self.len;
        self.slots.shrink_to(self.capacity);
        self.bump();
        debug!(reclaimed, capacity = self.capacity, "compacted slot store");
        return reclaimed;
    }

    /// Drop every element and return to the initial capacity.
    pub(crate) fn clear(&mut self) {
        let cleared = self.len;
        self.slots = Vec::with_capacity(self.initial_capacity);
        self.tombstones.clear();
        self.capacity = self.initial_capacity;
        self.len = 0;
        self.bump();
        debug!(cleared, capacity = self.capacity, "cleared slot store");
    }

    pub(crate) fn is_sorted_by<F>(&self, mut compare: F) -> bool
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        return self.live().is_sorted_by(|a, b| compare(*a, *b) != Ordering::Greater);
    }

    /// Compact, then stable-sort the live values.
    pub(crate) fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.compact();
        self.slots.sort_by(|a, b| match (a, b) {
            (Slot::Live(a), Slot::Live(b)) => compare(a, b),
            (Slot::Live(_), Slot::Tombstone) => Ordering::Less,
            (Slot::Tombstone, Slot::Live(_)) => Ordering::Greater,
            (Slot::Tombstone, Slot::Tombstone) => Ordering::Equal,
        });
        self.bump();
    }

    /// Compact, then reverse the live values.
    pub(crate) fn reverse(&mut self) {
        self.compact();
        self.slots.reverse();
        self.bump();
    }

    /// Binary search over compacted storage, where physical and logical
    /// positions coincide.
    pub(crate) fn binary_search_by<F>(&mut self, mut probe: F) -> Result<usize, usize>
    where
        F: FnMut(&T) -> Ordering,
    {
        self.compact();
        return self.slots.binary_search_by(|slot| match slot {
            Slot::Live(value) => probe(value),
            Slot::Tombstone => Ordering::Greater,
        });
    }

    pub(crate) fn into_values(self) -> Vec<T> {
        return self.slots.into_iter().filter_map(Slot::into_value).collect();
    }
}

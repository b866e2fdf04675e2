//! Range extraction, searching, and ordering over live elements.
//!
//! Index searches and `get_range` read through the tombstones and never
//! change the list. Sorting, reversing, and binary search work on compacted
//! storage: they purge tombstones first, so they take `&mut self`, cost
//! O(n log n) in the worst case, and bump the structural version.

use std::cmp::Ordering;

use tracing::trace;

use super::TombList;
use super::slot::Slot;
use crate::error::Error;
use crate::error::Result;

impl<T> TombList<T> {
    /// Live values of the logical window `[start, start + count)`, in order.
    /// The window must already be validated.
    fn window(&self, start: usize, count: usize) -> impl DoubleEndedIterator<Item = &T> {
        let from = self.store.physical_index(start);
        let to = if count == 0 {
            from
        } else {
            self.store.physical_index(start + count - 1) + 1
        };
        return self.store.slots()[from..to].iter().filter_map(Slot::value);
    }

    fn check_window(&self, start: usize, count: usize) -> Result<()> {
        let len = self.len();
        if start > len {
            return Err(Error::Index { index: start, len });
        }
        if count > len - start {
            return Err(Error::Range { index: start, count, len });
        }
        return Ok(());
    }

    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        return self.iter().any(|v| v == value);
    }

    /// Logical index of the first element equal to `value`.
    pub fn index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        return self.iter().position(|v| v == value);
    }

    /// Like [`index_of`](TombList::index_of), starting at `start`, which may
    /// equal `len()`.
    pub fn index_of_from(&self, value: &T, start: usize) -> Result<Option<usize>>
    where
        T: PartialEq,
    {
        self.check_window(start, 0)?;
        return self.index_of_in(value, start, self.len() - start);
    }

    /// Like [`index_of`](TombList::index_of), within the `count` elements
    /// starting at `start`.
    pub fn index_of_in(&self, value: &T, start: usize, count: usize) -> Result<Option<usize>>
    where
        T: PartialEq,
    {
        self.check_window(start, count)?;
        let found = self.window(start, count).position(|v| v == value);
        return Ok(found.map(|offset| start + offset));
    }

    /// Logical index of the last element equal to `value`.
    pub fn last_index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        let from_back = self.iter().rev().position(|v| v == value)?;
        return Some(self.len() - 1 - from_back);
    }

    /// Search backward from `start` inclusive. On an empty list only
    /// `start == 0` is accepted and nothing is found.
    pub fn last_index_of_from(&self, value: &T, start: usize) -> Result<Option<usize>>
    where
        T: PartialEq,
    {
        let len = self.len();
        if len == 0 && start == 0 {
            return Ok(None);
        }
        if start >= len {
            return Err(Error::Index { index: start, len });
        }
        return self.last_index_of_in(value, start, start + 1);
    }

    /// Search backward from `start` inclusive over at most `count` elements,
    /// that is the window `[start + 1 - count, start]`.
    pub fn last_index_of_in(&self, value: &T, start: usize, count: usize) -> Result<Option<usize>>
    where
        T: PartialEq,
    {
        let len = self.len();
        if start >= len {
            return Err(Error::Index { index: start, len });
        }
        if count > start + 1 {
            return Err(Error::Range { index: start, count, len });
        }
        if count == 0 {
            return Ok(None);
        }
        let low = start + 1 - count;
        let found = self.window(low, count).rev().position(|v| v == value);
        return Ok(found.map(|from_back| start - from_back));
    }

    /// A new, independent list holding copies of the `count` live elements
    /// starting at logical `index`. `count` must be positive.
    pub fn get_range(&self, index: usize, count: usize) -> Result<TombList<T>>
    where
        T: Clone,
    {
        let len = self.len();
        if count == 0 || index > len || count > len - index {
            return Err(Error::Range { index, count, len });
        }
        let values: Vec<T> = self.window(index, count).cloned().collect();
        trace!(index, count, "copied range into new list");
        return Ok(TombList::copied_from(values, &self.store.options()));
    }

    /// Stable sort of the live elements. Compacts first.
    pub fn sort(&mut self) -> Result<()>
    where
        T: Ord,
    {
        return self.sort_by(T::cmp);
    }

    pub fn sort_by<F>(&mut self, compare: F) -> Result<()>
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.check_reorder("sort")?;
        self.store.sort_by(compare);
        return Ok(());
    }

    /// Reverse the live elements. Compacts first.
    pub fn reverse(&mut self) -> Result<()> {
        self.check_reorder("reverse")?;
        self.store.reverse();
        return Ok(());
    }

    /// Binary search for `value`.
    ///
    /// This is not a pure read: it compacts the list, then sorts it unless
    /// the live elements are already in order. Both are O(n) or worse and
    /// bump the version. The inner result is `Ok(index)` when found and
    /// `Err(insertion_point)` otherwise, as with slices. A read-only list
    /// that is not already sorted fails with [`Error::Unsupported`].
    pub fn binary_search(&mut self, value: &T) -> Result<std::result::Result<usize, usize>>
    where
        T: Ord,
    {
        return self.binary_search_by(|probe| probe.cmp(value), T::cmp);
    }

    /// Binary search with a probe, keeping the list sorted by `order`. The
    /// probe must agree with `order`.
    pub fn binary_search_by<P, F>(
        &mut self,
        probe: P,
        mut order: F,
    ) -> Result<std::result::Result<usize, usize>>
    where
        P: FnMut(&T) -> Ordering,
        F: FnMut(&T, &T) -> Ordering,
    {
        if !self.store.is_sorted_by(&mut order) {
            self.check_reorder("binary_search")?;
            self.store.sort_by(order);
        }
        return Ok(self.store.binary_search_by(probe));
    }
}

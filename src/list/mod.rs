//! Tombstoning list.
//!
//! A [`TombList`] is an index-addressable, growable list whose removals are
//! O(1): `remove_at` buries the slot instead of shifting its successors, and
//! the buried slots are reclaimed in a batch once enough of them pile up.
//! Indices, iteration, and searches only ever see live elements.
//!
//! ```
//! use tomblist::TombList;
//!
//! let mut list = TombList::with_capacity(4);
//! list.push(1).unwrap();
//! list.push(2).unwrap();
//! list.push(3).unwrap();
//!
//! assert_eq!(list.remove_at(1), Ok(2));
//! assert_eq!(list.len(), 2);
//! assert_eq!(list.pending_removals(), 1);
//! assert_eq!(list.to_vec(), vec![1, 3]);
//! ```

mod cursor;
mod search;
mod slot;
mod store;

use std::fmt;

use crate::error::Error;
use crate::error::Result;
use crate::options::Capabilities;
use crate::options::ListOptions;
use store::SlotStore;

pub use cursor::Cursor;
pub use cursor::Iter;

/// A growable list with tombstoned removal and batched compaction.
pub struct TombList<T> {
    store: SlotStore<T>,
    capabilities: Capabilities,
}

impl<T> TombList<T> {
    /// Create an empty list with the default options.
    pub fn new() -> TombList<T> {
        return TombList::from_parts(Vec::new(), &ListOptions::default());
    }

    /// Create an empty list with room for `capacity` elements.
    pub fn with_capacity(capacity: usize) -> TombList<T> {
        let options = ListOptions::new().with_initial_capacity(capacity);
        return TombList::from_parts(Vec::new(), &options);
    }

    /// Create an empty list from explicit options.
    pub fn with_options(options: ListOptions) -> Result<TombList<T>> {
        options.validate()?;
        return Ok(TombList::from_parts(Vec::new(), &options));
    }

    /// Create a list holding `values`, using `options` for its growth and
    /// compaction parameters and its capability flags.
    pub fn from_vec_with_options(values: Vec<T>, options: ListOptions) -> Result<TombList<T>> {
        options.validate()?;
        return Ok(TombList::from_parts(values, &options));
    }

    /// Build a list around `values`. An empty list gets the configured
    /// initial capacity; a non-empty one is sized exactly to its contents.
    pub(crate) fn from_parts(values: Vec<T>, options: &ListOptions) -> TombList<T> {
        let store = if values.is_empty() {
            SlotStore::new(options)
        } else {
            SlotStore::from_values(values, options)
        };
        return TombList {
            store,
            capabilities: options.capabilities,
        };
    }

    /// Build a list holding copies taken from another list, sized exactly to
    /// them even when there are none.
    pub(crate) fn copied_from(values: Vec<T>, options: &ListOptions) -> TombList<T> {
        return TombList {
            store: SlotStore::from_values(values, options),
            capabilities: options.capabilities,
        };
    }

    /// Number of live elements.
    pub fn len(&self) -> usize {
        return self.store.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.store.len() == 0;
    }

    /// Number of slots allocated, live or not.
    pub fn capacity(&self) -> usize {
        return self.store.capacity();
    }

    /// Removed elements whose slots have not been reclaimed yet.
    pub fn pending_removals(&self) -> usize {
        return self.store.pending_removals();
    }

    pub fn compaction_threshold(&self) -> usize {
        return self.store.compaction_threshold();
    }

    /// Structural version, bumped by every change to the element layout.
    pub fn version(&self) -> u64 {
        return self.store.version();
    }

    pub fn capabilities(&self) -> Capabilities {
        return self.capabilities;
    }

    pub fn is_fixed_size(&self) -> bool {
        return self.capabilities.fixed_size;
    }

    pub fn is_read_only(&self) -> bool {
        return self.capabilities.read_only;
    }

    /// Always false; see [`SyncList`](crate::SyncList) for a locked list.
    pub fn is_synchronized(&self) -> bool {
        return false;
    }

    /// The options this list was built with.
    pub fn options(&self) -> ListOptions {
        return self.store.options().with_capabilities(self.capabilities);
    }

    fn check_write(&self, op: &'static str) -> Result<()> {
        if let Some(reason) = self.capabilities.write_restriction() {
            return Err(Error::Unsupported { op, reason });
        }
        return Ok(());
    }

    fn check_reorder(&self, op: &'static str) -> Result<()> {
        if let Some(reason) = self.capabilities.reorder_restriction() {
            return Err(Error::Unsupported { op, reason });
        }
        return Ok(());
    }

    /// Append an element, growing the store by the fixed increment if full.
    pub fn push(&mut self, value: T) -> Result<()> {
        self.check_write("push")?;
        self.store.push(value);
        return Ok(());
    }

    /// Insert an element at `index`, which may equal `len()`.
    pub fn insert(&mut self, index: usize, value: T) -> Result<()> {
        self.check_write("insert")?;
        if index > self.len() {
            return Err(Error::Index { index, len: self.len() });
        }
        self.store.insert(index, value);
        return Ok(());
    }

    /// Remove and return the element at `index`.
    ///
    /// The slot is tombstoned rather than shifted out. When the number of
    /// pending removals reaches the compaction threshold, this call also
    /// compacts the store, which is O(n).
    pub fn remove_at(&mut self, index: usize) -> Result<T> {
        self.check_write("remove_at")?;
        let len = self.len();
        return self.store.remove(index).ok_or(Error::Index { index, len });
    }

    /// Remove the first element equal to `value`. Returns whether one was found.
    pub fn remove(&mut self, value: &T) -> Result<bool>
    where
        T: PartialEq,
    {
        self.check_write("remove")?;
        let Some(index) = self.index_of(value) else {
            return Ok(false);
        };
        self.store.remove(index);
        return Ok(true);
    }

    /// Remove every element and return to the initial capacity.
    pub fn clear(&mut self) -> Result<()> {
        self.check_write("clear")?;
        self.store.clear();
        return Ok(());
    }

    /// Replace the element at `index`, returning the old one.
    pub fn set(&mut self, index: usize, value: T) -> Result<T> {
        self.check_write("set")?;
        let len = self.len();
        let slot = self.store.get_mut(index).ok_or(Error::Index { index, len })?;
        return Ok(std::mem::replace(slot, value));
    }

    pub fn get(&self, index: usize) -> Result<&T> {
        return self.store.get(index).ok_or(Error::Index { index, len: self.len() });
    }

    /// Mutable access to an element; counts as an indexer write.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        self.check_write("get_mut")?;
        let len = self.len();
        return self.store.get_mut(index).ok_or(Error::Index { index, len });
    }

    pub fn first(&self) -> Option<&T> {
        return self.store.live().next();
    }

    pub fn last(&self) -> Option<&T> {
        return self.store.live().next_back();
    }

    /// Append every element of `values`. Fails before appending anything if
    /// the list does not accept writes.
    pub fn try_extend<I>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        self.check_write("extend")?;
        for value in values {
            self.store.push(value);
        }
        return Ok(());
    }

    /// Reclaim every tombstoned slot now, regardless of the threshold.
    /// Returns the number of slots reclaimed.
    pub fn compact(&mut self) -> usize {
        return self.store.compact();
    }

    /// Iterate over live elements in order.
    pub fn iter(&self) -> Iter<'_, T> {
        return Iter::new(self.store.slots(), self.len());
    }

    /// A detached cursor stamped with the current version. See [`Cursor`].
    pub fn cursor(&self) -> Cursor {
        return Cursor::new(self.version());
    }

    /// Copy the live elements into a `Vec`.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        return self.iter().cloned().collect();
    }

    pub fn into_vec(self) -> Vec<T> {
        return self.store.into_values();
    }

    /// A new mutable list holding a copy of `source`'s live elements, sized
    /// exactly to them, with `source`'s growth and compaction parameters.
    pub fn from_list(source: &TombList<T>) -> TombList<T>
    where
        T: Clone,
    {
        return TombList::copied_from(source.to_vec(), &source.store.options());
    }
}

impl<T> Default for TombList<T> {
    fn default() -> Self {
        return TombList::new();
    }
}

impl<T: Clone> Clone for TombList<T> {
    fn clone(&self) -> Self {
        return TombList::copied_from(self.to_vec(), &self.options());
    }
}

impl<T: fmt::Debug> fmt::Debug for TombList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return f.debug_list().entries(self.iter()).finish();
    }
}

impl<T: PartialEq> PartialEq for TombList<T> {
    fn eq(&self, other: &Self) -> bool {
        return self.len() == other.len() && self.iter().eq(other.iter());
    }
}

impl<T: Eq> Eq for TombList<T> {}

impl<T> From<Vec<T>> for TombList<T> {
    fn from(values: Vec<T>) -> Self {
        return TombList::from_parts(values, &ListOptions::default());
    }
}

impl<T> FromIterator<T> for TombList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        return TombList::from(iter.into_iter().collect::<Vec<T>>());
    }
}

impl<T> IntoIterator for TombList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        return self.into_vec().into_iter();
    }
}

impl<'a, T> IntoIterator for &'a TombList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        return self.iter();
    }
}

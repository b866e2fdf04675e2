//! A list behind a coarse-grained lock.
//!
//! [`SyncList`] owns a `parking_lot::Mutex` around a [`TombList`] and takes
//! it for the duration of each call, releasing it on every exit path
//! including errors. Each call is atomic on its own. Sequences of calls are
//! not: a check followed by an insert can interleave with another thread.
//! Use [`SyncList::with_lock`] to run a sequence under one acquisition.
//!
//! ```
//! use std::thread;
//! use tomblist::SyncList;
//!
//! let list: SyncList<u32> = SyncList::new();
//! thread::scope(|s| {
//!     for t in 0..4 {
//!         let list = &list;
//!         s.spawn(move || {
//!             for i in 0..100 {
//!                 list.push(t * 100 + i).unwrap();
//!             }
//!         });
//!     }
//! });
//! assert_eq!(list.len(), 400);
//! ```

use std::cmp::Ordering;
use std::fmt;

use parking_lot::Mutex;

use crate::error::Error;
use crate::error::Result;
use crate::list::Cursor;
use crate::list::TombList;
use crate::options::Capabilities;
use crate::options::ListOptions;

/// A [`TombList`] whose every operation runs under one mutex.
pub struct SyncList<T> {
    inner: Mutex<TombList<T>>,
}

impl<T> SyncList<T> {
    pub fn new() -> SyncList<T> {
        return SyncList::from(TombList::new());
    }

    pub fn with_options(options: ListOptions) -> Result<SyncList<T>> {
        return Ok(SyncList::from(TombList::with_options(options)?));
    }

    /// Always true.
    pub fn is_synchronized(&self) -> bool {
        return true;
    }

    /// Run `f` with the lock held for its whole duration.
    pub fn with_lock<R>(&self, f: impl FnOnce(&mut TombList<T>) -> R) -> R {
        let mut guard = self.inner.lock();
        return f(&mut *guard);
    }

    pub fn into_inner(self) -> TombList<T> {
        return self.inner.into_inner();
    }

    pub fn len(&self) -> usize {
        return self.inner.lock().len();
    }

    pub fn is_empty(&self) -> bool {
        return self.inner.lock().is_empty();
    }

    pub fn capacity(&self) -> usize {
        return self.inner.lock().capacity();
    }

    pub fn pending_removals(&self) -> usize {
        return self.inner.lock().pending_removals();
    }

    pub fn compaction_threshold(&self) -> usize {
        return self.inner.lock().compaction_threshold();
    }

    pub fn version(&self) -> u64 {
        return self.inner.lock().version();
    }

    pub fn capabilities(&self) -> Capabilities {
        return self.inner.lock().capabilities();
    }

    pub fn is_fixed_size(&self) -> bool {
        return self.inner.lock().is_fixed_size();
    }

    pub fn is_read_only(&self) -> bool {
        return self.inner.lock().is_read_only();
    }

    pub fn push(&self, value: T) -> Result<()> {
        return self.inner.lock().push(value);
    }

    pub fn insert(&self, index: usize, value: T) -> Result<()> {
        return self.inner.lock().insert(index, value);
    }

    pub fn remove_at(&self, index: usize) -> Result<T> {
        return self.inner.lock().remove_at(index);
    }

    pub fn remove(&self, value: &T) -> Result<bool>
    where
        T: PartialEq,
    {
        return self.inner.lock().remove(value);
    }

    /// Append every element of `values` under one acquisition. The iterator
    /// runs with the lock held, so it must not touch this list.
    pub fn try_extend<I>(&self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        return self.inner.lock().try_extend(values);
    }

    pub fn clear(&self) -> Result<()> {
        return self.inner.lock().clear();
    }

    pub fn set(&self, index: usize, value: T) -> Result<T> {
        return self.inner.lock().set(index, value);
    }

    pub fn compact(&self) -> usize {
        return self.inner.lock().compact();
    }

    /// A copy of the element at `index`.
    pub fn get(&self, index: usize) -> Result<T>
    where
        T: Clone,
    {
        return self.inner.lock().get(index).cloned();
    }

    pub fn first(&self) -> Option<T>
    where
        T: Clone,
    {
        return self.inner.lock().first().cloned();
    }

    pub fn last(&self) -> Option<T>
    where
        T: Clone,
    {
        return self.inner.lock().last().cloned();
    }

    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        return self.inner.lock().contains(value);
    }

    pub fn index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        return self.inner.lock().index_of(value);
    }

    pub fn index_of_from(&self, value: &T, start: usize) -> Result<Option<usize>>
    where
        T: PartialEq,
    {
        return self.inner.lock().index_of_from(value, start);
    }

    pub fn index_of_in(&self, value: &T, start: usize, count: usize) -> Result<Option<usize>>
    where
        T: PartialEq,
    {
        return self.inner.lock().index_of_in(value, start, count);
    }

    pub fn last_index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        return self.inner.lock().last_index_of(value);
    }

    pub fn last_index_of_from(&self, value: &T, start: usize) -> Result<Option<usize>>
    where
        T: PartialEq,
    {
        return self.inner.lock().last_index_of_from(value, start);
    }

    pub fn last_index_of_in(&self, value: &T, start: usize, count: usize) -> Result<Option<usize>>
    where
        T: PartialEq,
    {
        return self.inner.lock().last_index_of_in(value, start, count);
    }

    /// An independent, unsynchronized copy of a window.
    pub fn get_range(&self, index: usize, count: usize) -> Result<TombList<T>>
    where
        T: Clone,
    {
        return self.inner.lock().get_range(index, count);
    }

    pub fn sort(&self) -> Result<()>
    where
        T: Ord,
    {
        return self.inner.lock().sort();
    }

    pub fn sort_by<F>(&self, compare: F) -> Result<()>
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        return self.inner.lock().sort_by(compare);
    }

    pub fn reverse(&self) -> Result<()> {
        return self.inner.lock().reverse();
    }

    /// See [`TombList::binary_search`]; this also compacts and may sort.
    pub fn binary_search(&self, value: &T) -> Result<std::result::Result<usize, usize>>
    where
        T: Ord,
    {
        return self.inner.lock().binary_search(value);
    }

    pub fn binary_search_by<P, F>(&self, probe: P, order: F) -> Result<std::result::Result<usize, usize>>
    where
        P: FnMut(&T) -> Ordering,
        F: FnMut(&T, &T) -> Ordering,
    {
        return self.inner.lock().binary_search_by(probe, order);
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        return self.inner.lock().to_vec();
    }

    /// A cursor stamped with the current version. Each step takes the lock.
    pub fn cursor(&self) -> SyncCursor<'_, T> {
        let cursor = self.inner.lock().cursor();
        return SyncCursor {
            list: self,
            cursor,
            current: None,
            failure: None,
        };
    }
}

impl<T> From<TombList<T>> for SyncList<T> {
    fn from(list: TombList<T>) -> Self {
        return SyncList {
            inner: Mutex::new(list),
        };
    }
}

impl<T> Default for SyncList<T> {
    fn default() -> Self {
        return SyncList::new();
    }
}

impl<T: fmt::Debug> fmt::Debug for SyncList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let guard = self.inner.lock();
        return f.debug_struct("SyncList").field("items", &*guard).finish();
    }
}

/// Cursor over a [`SyncList`]. Each [`move_next`](SyncCursor::move_next)
/// takes the lock, checks the version stamp, and copies the element out.
pub struct SyncCursor<'a, T> {
    list: &'a SyncList<T>,
    cursor: Cursor,
    current: Option<T>,
    failure: Option<Error>,
}

impl<T: Clone> SyncCursor<'_, T> {
    pub fn move_next(&mut self) -> Result<bool> {
        let guard = self.list.inner.lock();
        self.current = None;
        match self.cursor.move_next(&*guard) {
            Ok(true) => {}
            Ok(false) => return Ok(false),
            Err(error) => {
                self.failure = Some(error.clone());
                return Err(error);
            }
        }
        self.current = Some(self.cursor.current(&*guard)?.clone());
        return Ok(true);
    }

    /// The element copied out by the last successful step. After a step
    /// fails, this reports the same failure.
    pub fn current(&self) -> Result<&T> {
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }
        return self.current.as_ref().ok_or(Error::NoCurrent);
    }

    pub fn index(&self) -> Option<usize> {
        return self.cursor.index();
    }
}

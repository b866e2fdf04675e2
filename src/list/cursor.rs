//! Enumeration over live slots.
//!
//! [`Iter`] is the ordinary borrowing iterator. [`Cursor`] is a detached,
//! position-based enumerator that does not hold a borrow of the list
//! between steps, so the list can change underneath it. It carries the
//! list's structural version from when it was created and refuses to step
//! once the list has moved on, instead of skipping or repeating elements.

use std::iter::FusedIterator;

use tracing::trace;

use super::TombList;
use super::slot::Slot;
use crate::error::Error;
use crate::error::Result;

/// Borrowing iterator over live elements in order.
pub struct Iter<'a, T> {
    slots: std::slice::Iter<'a, Slot<T>>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(slots: &'a [Slot<T>], live: usize) -> Iter<'a, T> {
        return Iter {
            slots: slots.iter(),
            remaining: live,
        };
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        for slot in self.slots.by_ref() {
            if let Some(value) = slot.value() {
                self.remaining -= 1;
                return Some(value);
            }
        }
        return None;
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        return (self.remaining, Some(self.remaining));
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        while let Some(slot) = self.slots.next_back() {
            if let Some(value) = slot.value() {
                self.remaining -= 1;
                return Some(value);
            }
        }
        return None;
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        return Iter {
            slots: self.slots.clone(),
            remaining: self.remaining,
        };
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Position {
    BeforeStart,
    /// Physical position of the current slot.
    At(usize),
    Exhausted,
}

/// A version-stamped cursor over a [`TombList`].
///
/// The cursor starts before the first element. Each [`move_next`] lands on
/// the next live slot; [`current`] reads it. Any structural change to the
/// list after the cursor was created (push, insert, remove, clear,
/// compaction, sort, reverse) makes the next step fail with
/// [`Error::ConcurrentModification`]. Replacing an element in place with
/// `set` is not structural.
///
/// A cursor must only be used with the list that created it.
///
/// [`move_next`]: Cursor::move_next
/// [`current`]: Cursor::current
#[derive(Clone, Debug)]
pub struct Cursor {
    position: Position,
    visited: usize,
    stamp: u64,
}

impl Cursor {
    pub(crate) fn new(stamp: u64) -> Cursor {
        return Cursor {
            position: Position::BeforeStart,
            visited: 0,
            stamp,
        };
    }

    /// The version this cursor expects the list to be at.
    pub fn stamp(&self) -> u64 {
        return self.stamp;
    }

    fn check<T>(&self, list: &TombList<T>) -> Result<()> {
        let found = list.version();
        if found != self.stamp {
            trace!(expected = self.stamp, found, "cursor stepped on a modified list");
            return Err(Error::ConcurrentModification {
                expected: self.stamp,
                found,
            });
        }
        return Ok(());
    }

    /// Advance to the next live element. Returns `Ok(false)` once every live
    /// element has been visited.
    pub fn move_next<T>(&mut self, list: &TombList<T>) -> Result<bool> {
        self.check(list)?;
        let mut next = match self.position {
            Position::BeforeStart => 0,
            Position::At(physical) => physical + 1,
            Position::Exhausted => return Ok(false),
        };
        if self.visited < list.len() {
            let slots = list.store.slots();
            while let Some(slot) = slots.get(next) {
                if slot.is_live() {
                    self.position = Position::At(next);
                    self.visited += 1;
                    return Ok(true);
                }
                next += 1;
            }
        }
        self.position = Position::Exhausted;
        return Ok(false);
    }

    /// The element the last successful [`move_next`](Cursor::move_next)
    /// landed on.
    pub fn current<'a, T>(&self, list: &'a TombList<T>) -> Result<&'a T> {
        self.check(list)?;
        let Position::At(physical) = self.position else {
            return Err(Error::NoCurrent);
        };
        return list
            .store
            .slots()
            .get(physical)
            .and_then(Slot::value)
            .ok_or(Error::NoCurrent);
    }

    /// Logical index of the current element.
    pub fn index(&self) -> Option<usize> {
        return match self.position {
            Position::At(_) => Some(self.visited - 1),
            Position::BeforeStart | Position::Exhausted => None,
        };
    }

    /// Move back before the first element and take the list's current version.
    pub fn reset<T>(&mut self, list: &TombList<T>) {
        self.position = Position::BeforeStart;
        self.visited = 0;
        self.stamp = list.version();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(values: &[u32]) -> TombList<u32> {
        return values.iter().copied().collect();
    }

    #[test]
    fn iter_skips_tombstones_both_ways() {
        let mut list = list(&[1, 2, 3, 4, 5]);
        list.remove_at(1).unwrap();
        list.remove_at(2).unwrap();
        let forward: Vec<_> = list.iter().copied().collect();
        let backward: Vec<_> = list.iter().rev().copied().collect();
        assert_eq!(forward, vec![1, 3, 5]);
        assert_eq!(backward, vec![5, 3, 1]);
        assert_eq!(list.iter().len(), 3);
    }

    #[test]
    fn cursor_walks_live_elements() {
        let mut list = list(&[1, 2, 3]);
        list.remove_at(1).unwrap();

        let mut cursor = list.cursor();
        assert_eq!(cursor.current(&list), Err(Error::NoCurrent));

        let mut seen = Vec::new();
        while cursor.move_next(&list).unwrap() {
            seen.push((cursor.index().unwrap(), *cursor.current(&list).unwrap()));
        }
        assert_eq!(seen, vec![(0, 1), (1, 3)]);
        assert_eq!(cursor.current(&list), Err(Error::NoCurrent));
        assert_eq!(cursor.move_next(&list), Ok(false));
    }

    #[test]
    fn cursor_stops_before_trailing_tombstones() {
        let mut list = list(&[1, 2, 3]);
        list.remove_at(2).unwrap();
        let mut cursor = list.cursor();
        assert_eq!(cursor.move_next(&list), Ok(true));
        assert_eq!(cursor.move_next(&list), Ok(true));
        assert_eq!(cursor.move_next(&list), Ok(false));
    }

    #[test]
    fn empty_list_cursor() {
        let list: TombList<u32> = TombList::new();
        let mut cursor = list.cursor();
        assert_eq!(cursor.move_next(&list), Ok(false));
        assert_eq!(cursor.index(), None);
    }

    #[test]
    fn cursor_fails_fast_after_removal() {
        let mut list = list(&[1, 2, 3]);
        let mut cursor = list.cursor();
        assert_eq!(cursor.move_next(&list), Ok(true));

        list.remove_at(0).unwrap();
        let result = cursor.move_next(&list);
        assert!(matches!(result, Err(Error::ConcurrentModification { .. })));
        assert!(matches!(cursor.current(&list), Err(Error::ConcurrentModification { .. })));
    }

    #[test]
    fn cursor_tolerates_set() {
        let mut list = list(&[1, 2]);
        let mut cursor = list.cursor();
        assert_eq!(cursor.move_next(&list), Ok(true));
        list.set(1, 20).unwrap();
        assert_eq!(cursor.move_next(&list), Ok(true));
        assert_eq!(cursor.current(&list), Ok(&20));
    }

    #[test]
    fn reset_restamps() {
        let mut list = list(&[1, 2]);
        let mut cursor = list.cursor();
        list.push(3).unwrap();
        assert!(cursor.move_next(&list).is_err());
        cursor.reset(&list);
        assert_eq!(cursor.stamp(), list.version());
        assert_eq!(cursor.move_next(&list), Ok(true));
        assert_eq!(cursor.current(&list), Ok(&1));
    }
}

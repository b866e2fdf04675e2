//! Derived views: independent copies with different capabilities.
//!
//! A view is not a window onto its source. Each factory reads the source's
//! live elements through the public read surface, copies them in order into
//! a fresh store sized exactly to them, and applies the requested flags.
//! Later changes to either side are invisible to the other.
//!
//! ```
//! use tomblist::{Error, TombList, view};
//!
//! let mut source: TombList<u32> = TombList::with_capacity(4);
//! source.push(1).unwrap();
//! source.push(2).unwrap();
//! source.push(3).unwrap();
//! source.remove_at(1).unwrap();
//!
//! let mut fixed = view::fixed_size(&source);
//! assert!(matches!(fixed.push(4), Err(Error::Unsupported { .. })));
//! assert_eq!(fixed.to_vec(), vec![1, 3]);
//! ```

use tracing::trace;

use crate::list::TombList;
use crate::options::Capabilities;
use crate::sync::SyncList;

/// Copy `source` with the given capability flags.
pub fn with_capabilities<T: Clone>(source: &TombList<T>, capabilities: Capabilities) -> TombList<T> {
    let options = source.options().with_capabilities(capabilities);
    trace!(len = source.len(), ?capabilities, "creating list view");
    return TombList::copied_from(source.to_vec(), &options);
}

/// A copy that rejects any change to its element count or contents. It can
/// still be sorted and reversed.
pub fn fixed_size<T: Clone>(source: &TombList<T>) -> TombList<T> {
    return with_capabilities(source, Capabilities::FIXED_SIZE);
}

/// A copy that rejects every mutation.
pub fn read_only<T: Clone>(source: &TombList<T>) -> TombList<T> {
    return with_capabilities(source, Capabilities::READ_ONLY);
}

/// A mutable copy behind its own lock.
pub fn synchronized<T: Clone>(source: &TombList<T>) -> SyncList<T> {
    return SyncList::from(with_capabilities(source, Capabilities::MUTABLE));
}

/// A copy behind its own lock with the given flags, for example a
/// synchronized read-only list.
pub fn synchronized_with<T: Clone>(source: &TombList<T>, capabilities: Capabilities) -> SyncList<T> {
    return SyncList::from(with_capabilities(source, capabilities));
}

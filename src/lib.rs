//! Tomblist - an index-addressable list with tombstoned removal.
//!
//! Removing an element buries its slot instead of shifting everything after
//! it. Buried slots stay invisible to indexing, iteration, and search, and
//! are reclaimed in one batch once enough of them pile up, so removal is
//! O(1) amortized at the cost of some temporary memory.
//!
//! # Quick Start
//!
//! ```
//! use tomblist::{TombList, view};
//!
//! let mut list = TombList::with_capacity(4);
//! list.push("a").unwrap();
//! list.push("b").unwrap();
//! list.push("c").unwrap();
//!
//! list.remove_at(1).unwrap();
//! assert_eq!(list.to_vec(), vec!["a", "c"]);
//!
//! // Views are independent copies with restricted capabilities.
//! let frozen = view::read_only(&list);
//! list.push("d").unwrap();
//! assert_eq!(frozen.len(), 2);
//! ```
//!
//! # Costs
//!
//! Most calls are O(1) or O(threshold), but growth and compaction passes
//! copy the whole store. Sorting, reversing, and binary search compact
//! first and are never free reads.

pub mod error;
pub mod list;
pub mod options;
pub mod sync;
pub mod view;

pub use error::Error;
pub use error::Result;
pub use list::Cursor;
pub use list::Iter;
pub use list::TombList;
pub use options::Capabilities;
pub use options::ListOptions;
pub use sync::SyncCursor;
pub use sync::SyncList;

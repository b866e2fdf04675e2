//! Construction options for lists.
//!
//! Options can be built in code or loaded from TOML:
//!
//! ```
//! use tomblist::ListOptions;
//!
//! let options = ListOptions::from_toml_str(r#"
//!     initial_capacity = 4
//!     compaction_threshold = 3
//!
//!     [capabilities]
//!     read_only = true
//! "#).unwrap();
//!
//! assert_eq!(options.initial_capacity, 4);
//! assert_eq!(options.growth_increment, 16);
//! assert!(options.capabilities.read_only);
//! ```

use serde::Deserialize;

use crate::error::Error;
use crate::error::Result;

/// Capacity a list starts with when none is given.
pub const DEFAULT_CAPACITY: usize = 16;

/// Number of slots added each time the store runs out of room.
pub const DEFAULT_GROWTH_INCREMENT: usize = 16;

/// Pending removals that trigger a compaction pass.
pub const DEFAULT_COMPACTION_THRESHOLD: usize = 10;

/// Capability flags fixed at construction.
///
/// Synchronization is not a flag here: a synchronized list is a
/// [`SyncList`](crate::SyncList), which owns its lock.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Capabilities {
    pub fixed_size: bool,
    pub read_only: bool,
}

impl Capabilities {
    /// No restrictions.
    pub const MUTABLE: Capabilities = Capabilities { fixed_size: false, read_only: false };

    /// Rejects every mutation that changes the element count or contents.
    pub const FIXED_SIZE: Capabilities = Capabilities { fixed_size: true, read_only: false };

    /// Rejects every mutation.
    pub const READ_ONLY: Capabilities = Capabilities { fixed_size: false, read_only: true };

    /// The flag that blocks element mutation, if any. Read-only wins when
    /// both are set since it is the stronger restriction.
    pub(crate) fn write_restriction(&self) -> Option<&'static str> {
        if self.read_only {
            return Some("read-only");
        }
        if self.fixed_size {
            return Some("fixed-size");
        }
        return None;
    }

    /// The flag that blocks reordering. Fixed-size lists may be reordered.
    pub(crate) fn reorder_restriction(&self) -> Option<&'static str> {
        if self.read_only {
            return Some("read-only");
        }
        return None;
    }
}

/// Options used to construct a [`TombList`](crate::TombList).
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ListOptions {
    pub initial_capacity: usize,
    pub growth_increment: usize,
    pub compaction_threshold: usize,
    pub capabilities: Capabilities,
}

impl Default for ListOptions {
    fn default() -> Self {
        return ListOptions {
            initial_capacity: DEFAULT_CAPACITY,
            growth_increment: DEFAULT_GROWTH_INCREMENT,
            compaction_threshold: DEFAULT_COMPACTION_THRESHOLD,
            capabilities: Capabilities::MUTABLE,
        };
    }
}

impl ListOptions {
    pub fn new() -> ListOptions {
        return ListOptions::default();
    }

    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> ListOptions {
        self.initial_capacity = initial_capacity;
        return self;
    }

    pub fn with_growth_increment(mut self, growth_increment: usize) -> ListOptions {
        self.growth_increment = growth_increment;
        return self;
    }

    pub fn with_compaction_threshold(mut self, compaction_threshold: usize) -> ListOptions {
        self.compaction_threshold = compaction_threshold;
        return self;
    }

    pub fn with_capabilities(mut self, capabilities: Capabilities) -> ListOptions {
        self.capabilities = capabilities;
        return self;
    }

    /// Parse options from a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<ListOptions> {
        let options: ListOptions = toml::from_str(source)
            .map_err(|e| Error::Config(format!("invalid list options: {}", e)))?;
        options.validate()?;
        return Ok(options);
    }

    /// Check that the growth and compaction parameters can make progress.
    pub fn validate(&self) -> Result<()> {
        if self.growth_increment == 0 {
            return Err(Error::Config("growth_increment must be positive".to_string()));
        }
        if self.compaction_threshold == 0 {
            return Err(Error::Config("compaction_threshold must be positive".to_string()));
        }
        return Ok(());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = ListOptions::new();
        assert_eq!(options.initial_capacity, DEFAULT_CAPACITY);
        assert_eq!(options.growth_increment, DEFAULT_GROWTH_INCREMENT);
        assert_eq!(options.compaction_threshold, DEFAULT_COMPACTION_THRESHOLD);
        assert_eq!(options.capabilities, Capabilities::MUTABLE);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn builder_setters() {
        let options = ListOptions::new()
            .with_initial_capacity(2)
            .with_growth_increment(3)
            .with_compaction_threshold(4)
            .with_capabilities(Capabilities::FIXED_SIZE);

        assert_eq!(options.initial_capacity, 2);
        assert_eq!(options.growth_increment, 3);
        assert_eq!(options.compaction_threshold, 4);
        assert!(options.capabilities.fixed_size);
    }

    #[test]
    fn zero_growth_rejected() {
        let options = ListOptions::new().with_growth_increment(0);
        assert!(matches!(options.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn zero_threshold_rejected() {
        let options = ListOptions::new().with_compaction_threshold(0);
        assert!(matches!(options.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn toml_partial() {
        let options = ListOptions::from_toml_str("growth_increment = 8").unwrap();
        assert_eq!(options.growth_increment, 8);
        assert_eq!(options.initial_capacity, DEFAULT_CAPACITY);
    }

    #[test]
    fn toml_unknown_key_rejected() {
        let result = ListOptions::from_toml_str("synchronized = true");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn toml_invalid_values_rejected() {
        let result = ListOptions::from_toml_str("compaction_threshold = 0");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn read_only_beats_fixed_size() {
        let caps = Capabilities { fixed_size: true, read_only: true };
        assert_eq!(caps.write_restriction(), Some("read-only"));
        assert_eq!(Capabilities::FIXED_SIZE.write_restriction(), Some("fixed-size"));
        assert_eq!(Capabilities::FIXED_SIZE.reorder_restriction(), None);
        assert_eq!(Capabilities::MUTABLE.write_restriction(), None);
    }
}

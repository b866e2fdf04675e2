//! One physical storage cell of the slot store.

/// A slot either holds a live value or is a tombstone left behind by a
/// removal that has not been compacted away yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Slot<T> {
    Live(T),
    Tombstone,
}

impl<T> Slot<T> {
    pub(crate) fn is_live(&self) -> bool {
        return matches!(self, Slot::Live(_));
    }

    pub(crate) fn value(&self) -> Option<&T> {
        return match self {
            Slot::Live(value) => Some(value),
            Slot::Tombstone => None,
        };
    }

    pub(crate) fn value_mut(&mut self) -> Option<&mut T> {
        return match self {
            Slot::Live(value) => Some(value),
            Slot::Tombstone => None,
        };
    }

    /// Take the value out, leaving a tombstone behind.
    pub(crate) fn bury(&mut self) -> Option<T> {
        return match std::mem::replace(self, Slot::Tombstone) {
            Slot::Live(value) => Some(value),
            Slot::Tombstone => None,
        };
    }

    pub(crate) fn into_value(self) -> Option<T> {
        return match self {
            Slot::Live(value) => Some(value),
            Slot::Tombstone => None,
        };
    }
}

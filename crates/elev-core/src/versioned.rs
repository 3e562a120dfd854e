//! Revision-tracked cache wrapper for derived state.

/// Cached data tagged with the input revision it was computed from.
#[derive(Debug, Clone)]
pub struct Versioned<T> {
    pub data: T,
    /// Input revision at the time of computation.
    pub source_revision: u64,
}

impl<T> Versioned<T> {
    pub fn new(data: T, source_revision: u64) -> Self {
        Self {
            data,
            source_revision,
        }
    }

    /// `true` if the inputs changed since this data was computed.
    #[inline]
    pub fn is_stale(&self, current_revision: u64) -> bool {
        self.source_revision != current_revision
    }

    #[inline]
    pub fn is_current(&self, current_revision: u64) -> bool {
        self.source_revision == current_revision
    }
}

//! Request generations for discarding superseded async results.
//!
//! Each request carries a [`GenerationToken`]. Bumping the shared counter
//! makes every outstanding token stale; a completion whose token is stale
//! must not be applied. Nothing is aborted at the network level.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Shared counter that issues tokens.
#[derive(Debug, Clone, Default)]
pub struct Generation {
    counter: Arc<AtomicU64>,
}

impl Generation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> u64 {
        self.counter.load(Ordering::Acquire)
    }

    /// Invalidates outstanding tokens and issues one for the new generation.
    pub fn advance(&self) -> GenerationToken {
        let issued = self.counter.fetch_add(1, Ordering::AcqRel) + 1;
        GenerationToken {
            counter: Arc::clone(&self.counter),
            issued,
        }
    }

    /// Invalidates outstanding tokens without issuing a new one.
    pub fn invalidate(&self) {
        self.counter.fetch_add(1, Ordering::AcqRel);
    }
}

/// Proof of which generation a request belongs to.
#[derive(Debug, Clone)]
pub struct GenerationToken {
    counter: Arc<AtomicU64>,
    issued: u64,
}

impl GenerationToken {
    pub fn issued(&self) -> u64 {
        self.issued
    }

    pub fn is_current(&self) -> bool {
        self.counter.load(Ordering::Acquire) == self.issued
    }
}

//! The logical clock collaborator.
//!
//! Supplies the monotonically non-decreasing height used for
//! `issued_at` stamps and expiration comparisons. The ledger never
//! reads wall time.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use cpd_ledger_core::BlockHeight;

/// Source of the current logical height.
pub trait Clock: Send + Sync {
    /// The current height. Must never decrease between calls.
    fn height(&self) -> BlockHeight;
}

/// A clock advanced by hand.
///
/// Clones share the same underlying height, so a test can hold one
/// clone and advance the clock the ledger sees.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    height: Arc<AtomicU64>,
}

impl ManualClock {
    /// Create a clock starting at height 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clock starting at the given height.
    pub fn starting_at(height: BlockHeight) -> Self {
        Self {
            height: Arc::new(AtomicU64::new(height)),
        }
    }

    /// Advance the height by `blocks`.
    pub fn advance(&self, blocks: u64) {
        self.height.fetch_add(blocks, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn height(&self) -> BlockHeight {
        self.height.load(Ordering::SeqCst)
    }
}

/// A clock pinned at a single height.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedClock(pub BlockHeight);

impl Clock for FixedClock {
    fn height(&self) -> BlockHeight {
        self.0
    }
}

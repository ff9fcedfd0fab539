//! Cooperative cancellation for imposition runs.
//!
//! The driver polls the token before every sheet side; once cancelled, no
//! further sheets are scheduled and the partial output is dropped.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// A thread-safe, cloneable cancellation flag.
///
/// Clones observe the same state, so the caller keeps one clone and hands
/// another to the imposition task.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

//! Progress reporting for long-running adapter operations.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::info;

/// Receives progress updates from `FessSearch::ingest` and `FessSearch::search`.
///
/// Calls arrive from a single task in order: `start`, any number of
/// `advance`, then `finish` once the operation completes successfully.
pub trait ProgressReporter: Send + Sync {
    /// A new operation begins. `unit` is "docs" or "queries".
    fn start(&self, unit: &str, total: u64);

    /// `delta` more items were processed.
    fn advance(&self, delta: u64);

    /// The current operation completed.
    fn finish(&self);
}

/// Discards all progress updates.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProgress;

impl ProgressReporter for NoopProgress {
    fn start(&self, _unit: &str, _total: u64) {}

    fn advance(&self, _delta: u64) {}

    fn finish(&self) {}
}

/// Emits progress as `tracing` events.
#[derive(Debug, Default)]
pub struct TracingProgress {
    total: AtomicU64,
    done: AtomicU64,
}

impl TracingProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Items processed since the last `start`.
    pub fn position(&self) -> u64 {
        self.done.load(Ordering::Relaxed)
    }
}

impl ProgressReporter for TracingProgress {
    fn start(&self, unit: &str, total: u64) {
        self.total.store(total, Ordering::Relaxed);
        self.done.store(0, Ordering::Relaxed);
        info!(unit = %unit, total = total, "Started");
    }

    fn advance(&self, delta: u64) {
        let done = self.done.fetch_add(delta, Ordering::Relaxed) + delta;
        info!(
            done = done,
            total = self.total.load(Ordering::Relaxed),
            "Progress"
        );
    }

    fn finish(&self) {
        info!(done = self.position(), "Finished");
    }
}

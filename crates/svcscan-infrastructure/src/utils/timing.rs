//! Timing instrumentation helpers

use std::time::{Duration, Instant};

/// Tracks the elapsed time of one operation
///
/// # Example
///
/// ```
/// use svcscan_infrastructure::utils::TimedOperation;
///
/// let timer = TimedOperation::start();
/// let elapsed = timer.elapsed();
/// assert!(elapsed <= timer.elapsed());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TimedOperation {
    start: Instant,
}

impl TimedOperation {
    /// Start a new timed operation
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Elapsed time as Duration
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

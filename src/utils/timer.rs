//! Timer utilities
//!
//! Measures the wall-clock runtime of test invocations.

use std::time::{Duration, Instant};

/// Simple timer for measuring elapsed time
#[derive(Debug)]
pub struct Timer {
    start: Instant,
    label: String,
}

impl Timer {
    /// Create and start a new timer
    pub fn start(label: impl Into<String>) -> Self {
        Self {
            start: Instant::now(),
            label: label.into(),
        }
    }

    /// Get elapsed time
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Stop timer and return elapsed time
    pub fn stop(self) -> Duration {
        let elapsed = self.elapsed();
        tracing::debug!("{}: {:.6}s", self.label, elapsed.as_secs_f64());
        elapsed
    }
}

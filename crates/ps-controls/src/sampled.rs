//! Sampling schedule for the control loop.
//!
//! The loop samples, commands and then blocks for `interval` before the next
//! sample. There is no cancellation point inside an iteration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default seconds between samples.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

/// Iterations between diagnostics; about an hour at the default interval.
pub const DEFAULT_DIAGNOSTIC_EVERY: u64 = 720;

/// Sampling configuration for a [`ControlLoop`](crate::ControlLoop).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoopOptions {
    /// Sleep between samples. Zero disables sleeping.
    pub interval: Duration,
    /// Emit a diagnostic every N iterations (0 disables).
    pub diagnostic_every: u64,
    /// Stop after this many iterations. `None` runs until a fault.
    pub max_iterations: Option<u64>,
}

impl Default for LoopOptions {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            diagnostic_every: DEFAULT_DIAGNOSTIC_EVERY,
            max_iterations: None,
        }
    }
}

impl LoopOptions {
    /// A run of `iterations` samples with no sleeping, for offline drivers.
    pub fn bounded(iterations: u64) -> Self {
        Self {
            interval: Duration::ZERO,
            max_iterations: Some(iterations),
            ..Self::default()
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_diagnostic_every(mut self, every: u64) -> Self {
        self.diagnostic_every = every;
        self
    }

    pub fn emits_diagnostic(&self, iteration: u64) -> bool {
        self.diagnostic_every > 0 && iteration % self.diagnostic_every == 0
    }

    pub fn exhausted(&self, iteration: u64) -> bool {
        self.max_iterations.is_some_and(|max| iteration >= max)
    }
}

//! Adapter parameters: event loop control.
//!
//! [`AdapterParams`] groups the static parameters that bound the polling loop
//! in [`SolveTaskUseCase`](crate::use_cases::solve_task::SolveTaskUseCase).
//! These are application-layer concerns, not domain policy.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Event loop control parameters.
///
/// | Parameter | Default | Meaning |
/// |-----------|---------|---------|
/// | `max_num_steps` | 200 | Iteration cap of the loop |
/// | `max_drain` | 200 | Items drained per channel per iteration |
/// | `idle_limit` | 150 | Consecutive idle iterations before giving up |
/// | `poll_interval` | 150 ms | Longest wait between iterations |
/// | `diff_limit` | 50 | Data diff records kept in the result |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdapterParams {
    pub max_num_steps: usize,
    pub max_drain: usize,
    pub idle_limit: usize,
    pub poll_interval: Duration,
    pub diff_limit: usize,
}

impl Default for AdapterParams {
    fn default() -> Self {
        Self {
            max_num_steps: 200,
            max_drain: 200,
            idle_limit: 150,
            poll_interval: Duration::from_millis(150),
            diff_limit: 50,
        }
    }
}

impl AdapterParams {
    // ==================== Builder Methods ====================

    pub fn with_max_num_steps(mut self, max: usize) -> Self {
        self.max_num_steps = max;
        self
    }

    pub fn with_max_drain(mut self, max: usize) -> Self {
        self.max_drain = max;
        self
    }

    pub fn with_idle_limit(mut self, limit: usize) -> Self {
        self.idle_limit = limit;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_diff_limit(mut self, limit: usize) -> Self {
        self.diff_limit = limit;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let params = AdapterParams::default();
        assert_eq!(params.max_num_steps, 200);
        assert_eq!(params.max_drain, 200);
        assert_eq!(params.idle_limit, 150);
        assert_eq!(params.poll_interval, Duration::from_millis(150));
        assert_eq!(params.diff_limit, 50);
    }

    #[test]
    fn test_builder() {
        let params = AdapterParams::default()
            .with_max_num_steps(10)
            .with_idle_limit(3)
            .with_poll_interval(Duration::from_millis(1));

        assert_eq!(params.max_num_steps, 10);
        assert_eq!(params.idle_limit, 3);
        assert_eq!(params.poll_interval, Duration::from_millis(1));
        assert_eq!(params.max_drain, 200);
    }
}

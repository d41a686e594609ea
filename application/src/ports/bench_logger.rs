//! Port for structured bench logging.
//!
//! Defines the [`BenchLogger`] trait for recording run events (task start,
//! executed actions, solve results) to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures the run in
//! a machine-readable format (JSONL).

use serde_json::Value;

/// A structured bench event for logging.
///
/// Each event has a type string and a JSON payload containing
/// event-specific fields. The writer adds the timestamp.
pub struct BenchEvent {
    /// Event type identifier (e.g., "task_started", "action_executed", "solve_result").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl BenchEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging bench events to a structured log.
///
/// The `log` method is synchronous and non-fallible so that a failing log
/// never aborts a run; writers report their own failures.
pub trait BenchLogger: Send + Sync {
    /// Record a bench event.
    fn log(&self, event: BenchEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoBenchLogger;

impl BenchLogger for NoBenchLogger {
    fn log(&self, _event: BenchEvent) {}
}

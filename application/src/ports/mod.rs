//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod bench_logger;
pub mod environment;
pub mod progress;
pub mod workflow;

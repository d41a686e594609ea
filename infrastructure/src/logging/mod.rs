//! Logging infrastructure: structured bench logging.
//!
//! Provides [`JsonlBenchLogger`], a JSONL file writer that implements
//! the [`BenchLogger`](airline_application::BenchLogger) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlBenchLogger;

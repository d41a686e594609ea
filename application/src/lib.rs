//! Application layer for airline-bench
//!
//! This crate contains the command wrappers, the benchmark adapter use case,
//! port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod commands;
pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use commands::{AirlineCommand, CommandRegistry};
pub use config::AdapterParams;
pub use ports::{
    bench_logger::{BenchEvent, BenchLogger, NoBenchLogger},
    environment::{BenchEnvironment, EnvError, UserSimulator},
    progress::{BenchProgressNotifier, NoProgress},
    workflow::{
        WorkflowChannels, WorkflowEndpoints, WorkflowError, WorkflowLauncher, workflow_channels,
    },
};
pub use use_cases::solve_task::{SolveTaskError, SolveTaskUseCase, average_reward};

//! Infrastructure layer for airline-bench
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the local bench environment, the scripted
//! user and workflow, file loaders, configuration and JSONL logging.

pub mod bench;
pub mod config;
pub mod dataset;
pub mod logging;

// Re-export commonly used types
pub use bench::{LocalBenchEnv, ScriptedUserSimulator, ScriptedWorkflow};
pub use config::{
    ConfigLoader, ConfigValidationError, FileAdapterConfig, FileConfig, FileDataConfig,
    FileLoggingConfig, FileOutputConfig, FileOutputFormat, FileTasksConfig,
};
pub use dataset::{DEFAULT_WIKI, LoadError, load_airline_data, load_tasks, load_wiki};
pub use logging::JsonlBenchLogger;

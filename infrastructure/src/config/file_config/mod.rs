//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod adapter;
mod output;
mod paths;

pub use adapter::FileAdapterConfig;
pub use output::{FileOutputConfig, FileOutputFormat};
pub use paths::{FileDataConfig, FileLoggingConfig, FileTasksConfig};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("adapter.max_num_steps cannot be 0")]
    ZeroMaxNumSteps,

    #[error("adapter.max_drain cannot be 0")]
    ZeroMaxDrain,

    #[error("adapter.idle_limit cannot be 0")]
    ZeroIdleLimit,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Adapter loop settings
    pub adapter: FileAdapterConfig,
    /// Airline dataset location
    pub data: FileDataConfig,
    /// Task list location
    pub tasks: FileTasksConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Log file settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the configuration, returning the first problem found.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.adapter.max_num_steps == 0 {
            return Err(ConfigValidationError::ZeroMaxNumSteps);
        }
        if self.adapter.max_drain == 0 {
            return Err(ConfigValidationError::ZeroMaxDrain);
        }
        if self.adapter.idle_limit == 0 {
            return Err(ConfigValidationError::ZeroIdleLimit);
        }
        Ok(())
    }
}

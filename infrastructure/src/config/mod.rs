//! Configuration file loading for airline-bench
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment: `AIRLINE_BENCH_*` (`__` separates sections)
//! 2. `--config <path>` specified file
//! 3. Project root: `./airline-bench.toml` or `./.airline-bench.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/airline-bench/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileAdapterConfig, FileConfig, FileDataConfig, FileLoggingConfig,
    FileOutputConfig, FileOutputFormat, FileTasksConfig,
};
pub use loader::ConfigLoader;

//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave:
//!
//! - [`AdapterParams`]: adapter event loop control (iterations, drain size, idle patience)

pub mod adapter_params;

pub use adapter_params::AdapterParams;

//! Adapter loop configuration from TOML (`[adapter]` section)

use airline_application::AdapterParams;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw adapter configuration from TOML
///
/// ```toml
/// [adapter]
/// max_num_steps = 200
/// max_drain = 200
/// idle_limit = 150
/// poll_interval_ms = 150
/// diff_limit = 50
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAdapterConfig {
    /// Maximum loop iterations per task
    pub max_num_steps: usize,
    /// Maximum items drained from one channel per iteration
    pub max_drain: usize,
    /// Consecutive idle iterations before giving up
    pub idle_limit: usize,
    /// Wait between iterations, in milliseconds
    pub poll_interval_ms: u64,
    /// Maximum data diff records per result
    pub diff_limit: usize,
}

impl Default for FileAdapterConfig {
    fn default() -> Self {
        Self::from(&AdapterParams::default())
    }
}

impl From<&AdapterParams> for FileAdapterConfig {
    fn from(params: &AdapterParams) -> Self {
        Self {
            max_num_steps: params.max_num_steps,
            max_drain: params.max_drain,
            idle_limit: params.idle_limit,
            poll_interval_ms: params.poll_interval.as_millis() as u64,
            diff_limit: params.diff_limit,
        }
    }
}

impl FileAdapterConfig {
    /// Convert to application-layer [`AdapterParams`].
    pub fn to_params(&self) -> AdapterParams {
        AdapterParams::default()
            .with_max_num_steps(self.max_num_steps)
            .with_max_drain(self.max_drain)
            .with_idle_limit(self.idle_limit)
            .with_poll_interval(Duration::from_millis(self.poll_interval_ms))
            .with_diff_limit(self.diff_limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_params() {
        let config = FileAdapterConfig::default();
        assert_eq!(config.max_num_steps, 200);
        assert_eq!(config.max_drain, 200);
        assert_eq!(config.idle_limit, 150);
        assert_eq!(config.poll_interval_ms, 150);
        assert_eq!(config.diff_limit, 50);
        assert_eq!(config.to_params(), AdapterParams::default());
    }

    #[test]
    fn test_partial_section_keeps_defaults() {
        let toml_str = r#"
[adapter]
idle_limit = 20
poll_interval_ms = 10
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        let params = config.adapter.to_params();
        assert_eq!(params.idle_limit, 20);
        assert_eq!(params.poll_interval, Duration::from_millis(10));
        assert_eq!(params.max_num_steps, 200);
    }
}

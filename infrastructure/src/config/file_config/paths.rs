//! Dataset and task file locations (`[data]` and `[tasks]` sections)

use serde::{Deserialize, Serialize};

/// Raw `[data]` configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDataConfig {
    /// Path to the airline dataset JSON
    pub path: Option<String>,
    /// Path to the policy document shown to the agent
    pub wiki: Option<String>,
}

/// Raw `[tasks]` configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTasksConfig {
    /// Path to the task list JSON
    pub path: Option<String>,
}

/// Raw `[logging]` configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Directory for daily-rotated log files; console only when unset
    pub dir: Option<String>,
}

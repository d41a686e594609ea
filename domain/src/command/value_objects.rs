//! Command value objects: the sentinel, errors, and execution outcome.

use crate::tool::ERROR_PREFIX;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Placeholder an upstream extractor emits when it could not find a value.
///
/// Treated exactly like an absent field.
pub const NOT_FOUND: &str = "NOT_FOUND";

/// Failure to accept or route a command invocation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    #[error("invalid value for {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("missing parameter {0}")]
    MissingParameter(String),

    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("unknown command {0}")]
    UnknownCommand(String),
}

impl CommandError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Text form with the tool error prefix.
    pub fn to_wire(&self) -> String {
        format!("{}{}", ERROR_PREFIX, self)
    }
}

/// Result of executing one command against a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandOutcome {
    /// Natural-language response shown to the user.
    pub response: String,
    /// False when validation failed or the tool reported an error.
    pub success: bool,
    /// Tool the command delegated to; `None` when it never got that far.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,
    /// Keyword arguments handed to the tool, sentinel values removed.
    #[serde(default)]
    pub tool_kwargs: Value,
}

impl CommandOutcome {
    pub fn success(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            success: true,
            tool_name: None,
            tool_kwargs: Value::Null,
        }
    }

    pub fn failure(response: impl Into<String>) -> Self {
        Self {
            success: false,
            ..Self::success(response)
        }
    }

    /// Outcome of a command rejected before reaching its tool.
    pub fn rejected(error: &CommandError) -> Self {
        Self::failure(error.to_wire())
    }

    pub fn with_tool(mut self, name: impl Into<String>, kwargs: Value) -> Self {
        self.tool_name = Some(name.into());
        self.tool_kwargs = kwargs;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_command_error_wire() {
        assert_eq!(
            CommandError::MissingParameter("reservation_id".into()).to_wire(),
            "Error: missing parameter reservation_id"
        );
        assert_eq!(
            CommandError::validation("date", "expected YYYY-MM-DD").to_string(),
            "invalid value for date: expected YYYY-MM-DD"
        );
    }

    #[test]
    fn test_outcome_builders() {
        let outcome = CommandOutcome::success("Response: {}")
            .with_tool("get_user_details", json!({"user_id": "mia_li_3668"}));
        assert!(outcome.success);
        assert_eq!(outcome.tool_name.as_deref(), Some("get_user_details"));

        let rejected = CommandOutcome::rejected(&CommandError::UnknownCommand("fly".into()));
        assert!(!rejected.success);
        assert_eq!(rejected.response, "Error: unknown command fly");
        assert!(rejected.tool_name.is_none());
    }
}

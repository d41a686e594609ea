//! Tool domain traits
//!
//! [`AirlineTool`] is the dynamic face of a tool: it takes loosely typed JSON
//! keyword arguments (as recorded in task files and trace events), decodes
//! them into the tool's typed argument struct, and runs the pure function.

use super::entities::ToolDefinition;
use super::value_objects::{ToolError, ToolOutcome};
use crate::airline::AirlineData;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// A pure, single-step mutation (or query) over the airline dataset.
pub trait AirlineTool: Send + Sync {
    /// Canonical tool name
    fn name(&self) -> &'static str;

    /// Function-calling descriptor
    fn definition(&self) -> ToolDefinition;

    /// Decode `kwargs` and run the tool against `data`.
    fn invoke(&self, data: &mut AirlineData, kwargs: &Value) -> ToolOutcome;

    /// Whether invoking this tool ends the conversation.
    fn is_terminal(&self) -> bool {
        false
    }
}

/// Decode keyword arguments into a tool's argument struct.
///
/// `null` is treated as an empty object so tools without arguments accept
/// either form.
pub fn parse_args<T: DeserializeOwned>(tool: &str, kwargs: &Value) -> Result<T, ToolError> {
    let kwargs = if kwargs.is_null() {
        Value::Object(Default::default())
    } else {
        kwargs.clone()
    };
    serde_json::from_value(kwargs).map_err(|e| ToolError::invalid_arguments(tool, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Args {
        reservation_id: String,
    }

    #[derive(Debug, Deserialize)]
    struct NoArgs {}

    #[test]
    fn test_parse_args_ok() {
        let args: Args = parse_args("t", &json!({"reservation_id": "4WQ150"})).unwrap();
        assert_eq!(args.reservation_id, "4WQ150");
    }

    #[test]
    fn test_parse_args_missing_field() {
        let err = parse_args::<Args>("cancel_reservation", &json!({})).unwrap_err();
        match err {
            ToolError::InvalidArguments { tool, reason } => {
                assert_eq!(tool, "cancel_reservation");
                assert!(reason.contains("reservation_id"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_args_null_is_empty_object() {
        assert!(parse_args::<NoArgs>("list_all_airports", &Value::Null).is_ok());
    }
}

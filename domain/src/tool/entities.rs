//! Tool domain entities

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// JSON type of a tool parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    String,
    Integer,
    Number,
    Array,
    Object,
}

impl ParamType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamType::String => "string",
            ParamType::Integer => "integer",
            ParamType::Number => "number",
            ParamType::Array => "array",
            ParamType::Object => "object",
        }
    }
}

/// Function-calling descriptor of a tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique name of the tool (e.g., "cancel_reservation")
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Whether invoking this tool ends the conversation
    pub terminal: bool,
    /// Parameter specifications
    pub parameters: Vec<ToolParameter>,
}

/// Parameter specification for a tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolParameter {
    pub name: String,
    pub description: String,
    pub required: bool,
    pub param_type: ParamType,
    /// Allowed values for enumerated string parameters
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<String>,
    /// Element schema for array parameters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Value>,
}

impl ToolDefinition {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            terminal: false,
            parameters: Vec::new(),
        }
    }

    pub fn terminal(mut self) -> Self {
        self.terminal = true;
        self
    }

    pub fn with_parameter(mut self, param: ToolParameter) -> Self {
        self.parameters.push(param);
        self
    }

    pub fn required_parameters(&self) -> impl Iterator<Item = &ToolParameter> {
        self.parameters.iter().filter(|p| p.required)
    }

    /// Render as an OpenAI-style function schema.
    pub fn to_json_schema(&self) -> Value {
        let mut properties = Map::new();
        for param in &self.parameters {
            properties.insert(param.name.clone(), param.to_json_schema());
        }
        let required: Vec<&str> = self.required_parameters().map(|p| p.name.as_str()).collect();

        json!({
            "type": "function",
            "function": {
                "name": self.name,
                "description": self.description,
                "parameters": {
                    "type": "object",
                    "properties": properties,
                    "required": required,
                },
            },
        })
    }
}

impl ToolParameter {
    pub fn new(name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required,
            param_type: ParamType::String,
            enum_values: Vec::new(),
            items: None,
        }
    }

    pub fn with_type(mut self, param_type: ParamType) -> Self {
        self.param_type = param_type;
        self
    }

    pub fn with_enum(mut self, values: &[&str]) -> Self {
        self.enum_values = values.iter().map(|v| v.to_string()).collect();
        self
    }

    pub fn with_items(mut self, items: Value) -> Self {
        self.param_type = ParamType::Array;
        self.items = Some(items);
        self
    }

    fn to_json_schema(&self) -> Value {
        let mut schema = Map::new();
        schema.insert("type".into(), json!(self.param_type.as_str()));
        schema.insert("description".into(), json!(self.description));
        if !self.enum_values.is_empty() {
            schema.insert("enum".into(), json!(self.enum_values));
        }
        if let Some(items) = &self.items {
            schema.insert("items".into(), items.clone());
        }
        Value::Object(schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_schema_shape() {
        let definition = ToolDefinition::new("cancel_reservation", "Cancel the whole reservation.")
            .with_parameter(ToolParameter::new(
                "reservation_id",
                "The reservation ID, such as 'ZFA04Y'.",
                true,
            ));

        let schema = definition.to_json_schema();
        assert_eq!(schema["type"], "function");
        assert_eq!(schema["function"]["name"], "cancel_reservation");
        assert_eq!(
            schema["function"]["parameters"]["properties"]["reservation_id"]["type"],
            "string"
        );
        assert_eq!(
            schema["function"]["parameters"]["required"],
            json!(["reservation_id"])
        );
    }

    #[test]
    fn test_enum_and_items_are_rendered() {
        let definition = ToolDefinition::new("t", "d")
            .with_parameter(
                ToolParameter::new("cabin", "cabin", true).with_enum(&["economy", "business"]),
            )
            .with_parameter(
                ToolParameter::new("flights", "flights", false).with_items(json!({"type": "object"})),
            );

        let props = &definition.to_json_schema()["function"]["parameters"]["properties"];
        assert_eq!(props["cabin"]["enum"], json!(["economy", "business"]));
        assert_eq!(props["flights"]["type"], "array");
        assert_eq!(props["flights"]["items"]["type"], "object");
    }

    #[test]
    fn test_terminal_flag() {
        assert!(ToolDefinition::new("transfer_to_human_agents", "x").terminal().terminal);
        assert!(!ToolDefinition::new("think", "x").terminal);
    }
}

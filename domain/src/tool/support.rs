//! Conversation-control tools: `think` and `transfer_to_human_agents`.

use super::entities::{ToolDefinition, ToolParameter};
use super::traits::{AirlineTool, parse_args};
use super::value_objects::ToolOutcome;
use crate::airline::AirlineData;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const THINK: &str = "think";
pub const TRANSFER_TO_HUMAN_AGENTS: &str = "transfer_to_human_agents";

pub const TRANSFER_SUCCESSFUL: &str = "Transfer successful";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThinkArgs {
    pub thought: String,
}

/// Scratchpad for the agent; records nothing.
pub fn think(_data: &AirlineData, _args: &ThinkArgs) -> ToolOutcome {
    Ok(String::new())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferToHumanAgentsArgs {
    pub summary: String,
}

pub fn transfer_to_human_agents(
    _data: &AirlineData,
    _args: &TransferToHumanAgentsArgs,
) -> ToolOutcome {
    Ok(TRANSFER_SUCCESSFUL.to_string())
}

pub struct Think;

impl AirlineTool for Think {
    fn name(&self) -> &'static str {
        THINK
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            THINK,
            "Use the tool to think about something. It will not obtain new information or change the database, but just append the thought to the log. Use it when complex reasoning is needed.",
        )
        .with_parameter(ToolParameter::new("thought", "A thought to think about.", true))
    }

    fn invoke(&self, data: &mut AirlineData, kwargs: &Value) -> ToolOutcome {
        think(data, &parse_args(THINK, kwargs)?)
    }
}

pub struct TransferToHumanAgents;

impl AirlineTool for TransferToHumanAgents {
    fn name(&self) -> &'static str {
        TRANSFER_TO_HUMAN_AGENTS
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            TRANSFER_TO_HUMAN_AGENTS,
            "Transfer the user to a human agent, with a summary of the user's issue. Only transfer if the user explicitly asks for a human agent, or if the user's issue cannot be resolved by the agent with the available tools.",
        )
        .terminal()
        .with_parameter(ToolParameter::new(
            "summary",
            "A summary of the user's issue.",
            true,
        ))
    }

    fn invoke(&self, data: &mut AirlineData, kwargs: &Value) -> ToolOutcome {
        transfer_to_human_agents(data, &parse_args(TRANSFER_TO_HUMAN_AGENTS, kwargs)?)
    }

    fn is_terminal(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_think_returns_empty() {
        let mut data = AirlineData::new();
        assert_eq!(
            Think.invoke(&mut data, &json!({"thought": "check baggage"})).unwrap(),
            ""
        );
        assert_eq!(data, AirlineData::new());
    }

    #[test]
    fn test_transfer_is_terminal() {
        let mut data = AirlineData::new();
        assert_eq!(
            TransferToHumanAgents
                .invoke(&mut data, &json!({"summary": "wants a refund"}))
                .unwrap(),
            TRANSFER_SUCCESSFUL
        );
        assert!(TransferToHumanAgents.is_terminal());
        assert!(TransferToHumanAgents.definition().terminal);
        assert!(!Think.is_terminal());
    }
}

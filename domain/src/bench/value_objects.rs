//! Benchmark value objects: trace events, command outputs, env responses and
//! rewards.

use super::entities::Action;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Which side originated a trace event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceDirection {
    /// The agent asked the workflow to run something.
    AgentToWorkflow,
    /// The workflow reports an executed command back.
    WorkflowToAgent,
}

/// One record from the workflow's command trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandTraceEvent {
    pub direction: TraceDirection,
    #[serde(default)]
    pub command_name: Option<String>,
    #[serde(default)]
    pub parameters: Value,
    #[serde(default)]
    pub response_text: Option<String>,
    #[serde(default)]
    pub success: Option<bool>,
}

impl CommandTraceEvent {
    /// Event for a command the workflow executed.
    pub fn executed(
        command_name: impl Into<String>,
        parameters: Value,
        response_text: impl Into<String>,
        success: bool,
    ) -> Self {
        Self {
            direction: TraceDirection::WorkflowToAgent,
            command_name: Some(command_name.into()),
            parameters,
            response_text: Some(response_text.into()),
            success: Some(success),
        }
    }

    /// Event for a request the agent sent to the workflow.
    pub fn requested(command_name: impl Into<String>, parameters: Value) -> Self {
        Self {
            direction: TraceDirection::AgentToWorkflow,
            command_name: Some(command_name.into()),
            parameters,
            response_text: None,
            success: None,
        }
    }

    pub fn is_agent_to_workflow(&self) -> bool {
        self.direction == TraceDirection::AgentToWorkflow
    }

    /// Command name, when present and non-empty.
    pub fn command(&self) -> Option<&str> {
        self.command_name.as_deref().filter(|n| !n.is_empty())
    }
}

/// A single text response inside a [`CommandOutput`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandResponse {
    pub response: String,
}

/// One item on the workflow's output channel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommandOutput {
    pub command_responses: Vec<CommandResponse>,
}

impl CommandOutput {
    pub fn text(response: impl Into<String>) -> Self {
        Self {
            command_responses: vec![CommandResponse {
                response: response.into(),
            }],
        }
    }

    /// Non-blank responses, trimmed, joined by newlines.
    pub fn joined_text(&self) -> Option<String> {
        let texts: Vec<&str> = self
            .command_responses
            .iter()
            .map(|r| r.response.trim())
            .filter(|r| !r.is_empty())
            .collect();
        if texts.is_empty() {
            None
        } else {
            Some(texts.join("\n"))
        }
    }
}

/// An action the adapter observed the workflow execute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutedAction {
    pub name: String,
    pub kwargs: Value,
    pub response_text: Option<String>,
    pub success: Option<bool>,
}

/// Breakdown of a reward.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RewardInfo {
    /// 1.0 when the final dataset hash equals the ground-truth hash.
    pub r_actions: f64,
    pub gt_data_hash: String,
    /// 1.0 when every expected output was found; absent without outputs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r_outputs: Option<f64>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub outputs: BTreeMap<String, bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RewardResult {
    pub reward: f64,
    pub info: RewardInfo,
    /// Ground-truth actions other than respond.
    pub actions: Vec<Action>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reward_info: Option<RewardResult>,
}

/// Result of one environment step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvResponse {
    pub observation: String,
    pub reward: f64,
    pub done: bool,
    pub info: EnvInfo,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_joined_text_trims_and_skips_blank() {
        let output = CommandOutput {
            command_responses: vec![
                CommandResponse {
                    response: "  Which reservation? ".into(),
                },
                CommandResponse {
                    response: "   ".into(),
                },
                CommandResponse {
                    response: "Response: ok".into(),
                },
            ],
        };
        assert_eq!(
            output.joined_text().as_deref(),
            Some("Which reservation?\nResponse: ok")
        );
        assert_eq!(CommandOutput::default().joined_text(), None);
    }

    #[test]
    fn test_trace_event_command_name() {
        let event = CommandTraceEvent::executed("cancel_reservation", json!({}), "ok", true);
        assert_eq!(event.command(), Some("cancel_reservation"));
        assert!(!event.is_agent_to_workflow());

        let blank = CommandTraceEvent {
            command_name: Some(String::new()),
            ..event
        };
        assert_eq!(blank.command(), None);
        assert!(CommandTraceEvent::requested("x", Value::Null).is_agent_to_workflow());
    }

    #[test]
    fn test_reward_info_omits_outputs_when_unused() {
        let info = RewardInfo {
            r_actions: 1.0,
            gt_data_hash: "abc".into(),
            ..Default::default()
        };
        let value = serde_json::to_value(&info).unwrap();
        assert!(value.get("r_outputs").is_none());
        assert!(value.get("outputs").is_none());
    }
}

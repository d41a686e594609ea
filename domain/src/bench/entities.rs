//! Benchmark entities: tasks, actions, and solve results.

use super::diff::DataDiff;
use super::value_objects::{ExecutedAction, RewardResult};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Action name for a message from the agent to the user.
pub const RESPOND_ACTION_NAME: &str = "respond";

/// Keyword holding the message text of a respond action.
pub const RESPOND_ACTION_FIELD_NAME: &str = "content";

/// Marker the user simulator emits when the conversation is over.
pub const STOP_TOKEN: &str = "###STOP###";

/// One step taken against the environment: a tool call or a respond.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub name: String,
    #[serde(default)]
    pub kwargs: Value,
}

impl Action {
    pub fn new(name: impl Into<String>, kwargs: Value) -> Self {
        Self {
            name: name.into(),
            kwargs,
        }
    }

    pub fn respond(content: impl Into<String>) -> Self {
        let content: String = content.into();
        Self::new(RESPOND_ACTION_NAME, json!({ RESPOND_ACTION_FIELD_NAME: content }))
    }

    pub fn is_respond(&self) -> bool {
        self.name == RESPOND_ACTION_NAME
    }

    /// Message text of a respond action.
    pub fn content(&self) -> Option<&str> {
        self.kwargs.get(RESPOND_ACTION_FIELD_NAME)?.as_str()
    }
}

/// One scripted step of the in-process workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScriptStep {
    /// Execute a command with the given parameters.
    Command {
        command: String,
        #[serde(default)]
        params: Value,
    },
    /// Ask the user a question and wait for the reply.
    Ask { ask: String },
}

/// A benchmark task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub user_id: String,
    pub instruction: String,
    /// Ground-truth actions whose end state defines success.
    #[serde(default)]
    pub actions: Vec<Action>,
    /// Strings that must appear in the agent's responses.
    #[serde(default)]
    pub outputs: Vec<String>,
    /// Scripted user replies, in order.
    #[serde(default)]
    pub user_turns: Vec<String>,
    /// Scripted workflow steps.
    #[serde(default)]
    pub script: Vec<ScriptStep>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Details of a completed run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunInfo {
    pub task_index: usize,
    /// Total number of drained trace and output items.
    pub steps: usize,
    /// Loop iterations, drained or idle.
    pub iterations: usize,
    pub executed_actions: Vec<ExecutedAction>,
    pub reward_info: RewardResult,
    pub data_diffs: Vec<DataDiff>,
    pub agent_data_hash: String,
    pub gt_data_hash: String,
}

/// Info attached to a [`SolveResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SolveInfo {
    Completed(Box<RunInfo>),
    Failed { error: String },
}

/// Outcome of solving one task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveResult {
    pub reward: f64,
    pub messages: Vec<Message>,
    pub info: SolveInfo,
}

impl SolveResult {
    /// Zero-reward result carrying only the system prompt and the error.
    pub fn failed(wiki: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            reward: 0.0,
            messages: vec![Message::system(wiki)],
            info: SolveInfo::Failed {
                error: error.into(),
            },
        }
    }

    pub fn run_info(&self) -> Option<&RunInfo> {
        match &self.info {
            SolveInfo::Completed(info) => Some(info),
            SolveInfo::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.info {
            SolveInfo::Failed { error } => Some(error),
            SolveInfo::Completed(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_respond_action() {
        let action = Action::respond("Your flight is booked.");
        assert!(action.is_respond());
        assert_eq!(action.content(), Some("Your flight is booked."));
        assert_eq!(Action::new("think", Value::Null).content(), None);
    }

    #[test]
    fn test_task_parses_with_defaults() {
        let task: Task = serde_json::from_value(json!({
            "user_id": "chen_jackson_3290",
            "instruction": "Cancel reservation 4WQ150.",
            "actions": [{"name": "cancel_reservation", "kwargs": {"reservation_id": "4WQ150"}}]
        }))
        .unwrap();
        assert_eq!(task.actions.len(), 1);
        assert!(task.outputs.is_empty());
        assert!(task.script.is_empty());
    }

    #[test]
    fn test_script_steps_untagged() {
        let steps: Vec<ScriptStep> = serde_json::from_value(json!([
            {"ask": "Which reservation?"},
            {"command": "cancel_reservation", "params": {"reservation_id": "4WQ150"}},
            {"command": "list_all_airports"}
        ]))
        .unwrap();
        assert_eq!(steps[0], ScriptStep::Ask { ask: "Which reservation?".into() });
        assert!(matches!(&steps[1], ScriptStep::Command { command, .. } if command == "cancel_reservation"));
        assert!(matches!(&steps[2], ScriptStep::Command { params: Value::Null, .. }));
    }

    #[test]
    fn test_failed_result_shape() {
        let result = SolveResult::failed("wiki", "workflow did not start");
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["reward"], 0.0);
        assert_eq!(value["messages"].as_array().unwrap().len(), 1);
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["info"], json!({"error": "workflow did not start"}));
        assert_eq!(result.error(), Some("workflow did not start"));
    }
}

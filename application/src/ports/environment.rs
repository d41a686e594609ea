//! Bench environment port
//!
//! Defines the Tau-Bench style environment the adapter steps: it owns the
//! airline dataset and the task list, records every action, forwards
//! respond actions to an embedded [`UserSimulator`], and scores the run.

use airline_domain::tool::ToolRegistry;
use airline_domain::{Action, AirlineData, EnvResponse, RewardResult, Task};
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while stepping the environment
#[derive(Error, Debug)]
pub enum EnvError {
    #[error("Task index {index} out of range ({count} tasks)")]
    TaskOutOfRange { index: usize, count: usize },

    #[error("No task selected, reset the environment first")]
    NoTask,

    #[error("User simulator error: {0}")]
    UserSimulator(String),
}

/// Environment driven by the adapter loop.
///
/// Implementations live in the infrastructure layer.
#[async_trait]
pub trait BenchEnvironment: Send {
    /// Policy document shown to the agent as the system message.
    fn wiki(&self) -> &str;

    fn tasks(&self) -> &[Task];

    /// The task selected by the last [`reset`](Self::reset).
    fn task(&self) -> Option<&Task>;

    fn tools(&self) -> &ToolRegistry;

    /// Current dataset.
    fn data(&self) -> &AirlineData;

    /// A fresh copy of the initial dataset.
    fn load_data(&self) -> AirlineData;

    /// Select a task, reload the dataset and start the user simulator.
    ///
    /// The observation is the user's opening message.
    async fn reset(&mut self, task_index: usize) -> Result<EnvResponse, EnvError>;

    /// Apply one action: a tool call, or a respond to the user.
    async fn step(&mut self, action: Action) -> Result<EnvResponse, EnvError>;

    /// Score the current dataset and responses against the task's ground
    /// truth. The current dataset is left untouched.
    fn calculate_reward(&mut self) -> Result<RewardResult, EnvError>;
}

/// Simulated customer on the other side of the conversation.
#[async_trait]
pub trait UserSimulator: Send {
    /// Start a conversation for `task`, returning the opening message.
    async fn reset(&mut self, task: &Task) -> Result<String, EnvError>;

    /// Reply to an agent message.
    async fn step(&mut self, content: &str) -> Result<String, EnvError>;
}

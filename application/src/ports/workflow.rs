//! Workflow launcher port
//!
//! The conversational workflow runs as its own tokio task and talks to the
//! adapter only through three unbounded channels:
//!
//! ```text
//!            trace (CommandTraceEvent)
//!  workflow ───────────────────────────▶ adapter
//!            output (CommandOutput)
//!           ───────────────────────────▶
//!            user messages (String)
//!           ◀───────────────────────────
//! ```

use airline_domain::{CommandOutput, CommandTraceEvent, Task};
use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio_util::sync::CancellationToken;

/// Errors that can occur when starting a workflow
#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error("Failed to start workflow: {0}")]
    Launch(String),
}

/// Adapter side of a running workflow.
pub struct WorkflowChannels {
    pub trace_rx: UnboundedReceiver<CommandTraceEvent>,
    pub output_rx: UnboundedReceiver<CommandOutput>,
    pub user_tx: UnboundedSender<String>,
    /// Cancelled by the adapter when the loop ends.
    pub cancel: CancellationToken,
}

/// Workflow side of the same channels.
pub struct WorkflowEndpoints {
    pub trace_tx: UnboundedSender<CommandTraceEvent>,
    pub output_tx: UnboundedSender<CommandOutput>,
    pub user_rx: UnboundedReceiver<String>,
    pub cancel: CancellationToken,
}

/// Create a connected channel set.
pub fn workflow_channels() -> (WorkflowChannels, WorkflowEndpoints) {
    let (trace_tx, trace_rx) = mpsc::unbounded_channel();
    let (output_tx, output_rx) = mpsc::unbounded_channel();
    let (user_tx, user_rx) = mpsc::unbounded_channel();
    let cancel = CancellationToken::new();
    (
        WorkflowChannels {
            trace_rx,
            output_rx,
            user_tx,
            cancel: cancel.clone(),
        },
        WorkflowEndpoints {
            trace_tx,
            output_tx,
            user_rx,
            cancel,
        },
    )
}

/// Starts a workflow for a task.
///
/// Implementations live in the infrastructure layer.
#[async_trait]
pub trait WorkflowLauncher: Send + Sync {
    /// Start the workflow with the task's instruction as its first input.
    async fn launch(&self, task: &Task) -> Result<WorkflowChannels, WorkflowError>;
}

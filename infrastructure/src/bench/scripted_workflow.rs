//! Workflow that runs a task's command script in-process.

use airline_application::CommandRegistry;
use airline_application::ports::workflow::{
    WorkflowChannels, WorkflowEndpoints, WorkflowError, WorkflowLauncher, workflow_channels,
};
use airline_domain::{
    AirlineData, CommandOutput, CommandTraceEvent, ScriptStep, Task, TraceDirection,
};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::runtime::Handle;
use tracing::debug;

/// Launches one tokio task per bench task that executes the task's
/// `script` through the [`CommandRegistry`] against its own dataset copy.
///
/// Every command is traced in both directions and its response is sent as
/// an output. An `ask` step sends the question and waits for the user.
pub struct ScriptedWorkflow {
    data: AirlineData,
    commands: Arc<CommandRegistry>,
}

impl ScriptedWorkflow {
    pub fn new(data: AirlineData) -> Self {
        Self {
            data,
            commands: Arc::new(CommandRegistry::airline()),
        }
    }

    pub fn with_commands(mut self, commands: Arc<CommandRegistry>) -> Self {
        self.commands = commands;
        self
    }
}

#[async_trait]
impl WorkflowLauncher for ScriptedWorkflow {
    async fn launch(&self, task: &Task) -> Result<WorkflowChannels, WorkflowError> {
        let handle = Handle::try_current().map_err(|e| WorkflowError::Launch(e.to_string()))?;
        let (channels, endpoints) = workflow_channels();

        let run = ScriptRun {
            data: self.data.clone(),
            commands: Arc::clone(&self.commands),
            script: task.script.clone(),
        };
        handle.spawn(run.execute(endpoints));
        Ok(channels)
    }
}

struct ScriptRun {
    data: AirlineData,
    commands: Arc<CommandRegistry>,
    script: Vec<ScriptStep>,
}

impl ScriptRun {
    async fn execute(mut self, mut endpoints: WorkflowEndpoints) {
        let script = std::mem::take(&mut self.script);
        for step in script {
            if endpoints.cancel.is_cancelled() {
                debug!("Workflow cancelled");
                return;
            }
            let delivered = match step {
                ScriptStep::Command { command, params } => {
                    self.run_command(&endpoints, &command, params)
                }
                ScriptStep::Ask { ask } => Self::ask(&mut endpoints, ask).await,
            };
            if !delivered {
                debug!("Adapter went away, stopping workflow");
                return;
            }
        }
        debug!("Workflow script finished");
    }

    /// Execute one command, tracing the request and the result.
    fn run_command(
        &mut self,
        endpoints: &WorkflowEndpoints,
        command: &str,
        params: serde_json::Value,
    ) -> bool {
        let request = CommandTraceEvent::requested(command, params.clone());
        let outcome = self.commands.execute(command, &mut self.data, &params);
        debug!("Workflow ran {}: success={}", command, outcome.success);

        let result = CommandTraceEvent {
            direction: TraceDirection::WorkflowToAgent,
            // Rejected commands never reached a tool
            command_name: outcome.tool_name.clone(),
            parameters: outcome.tool_kwargs.clone(),
            response_text: Some(outcome.response.clone()),
            success: Some(outcome.success),
        };

        endpoints.trace_tx.send(request).is_ok()
            && endpoints.trace_tx.send(result).is_ok()
            && endpoints
                .output_tx
                .send(CommandOutput::text(outcome.response))
                .is_ok()
    }

    /// Send a question and wait for the reply or cancellation.
    async fn ask(endpoints: &mut WorkflowEndpoints, question: String) -> bool {
        if endpoints.output_tx.send(CommandOutput::text(question)).is_err() {
            return false;
        }
        tokio::select! {
            _ = endpoints.cancel.cancelled() => false,
            reply = endpoints.user_rx.recv() => match reply {
                Some(reply) => {
                    debug!("Workflow received user reply: {}", reply);
                    true
                }
                None => false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SAMPLE_DATA: &str = include_str!("../../../data/airline.json");

    fn workflow() -> ScriptedWorkflow {
        ScriptedWorkflow::new(serde_json::from_str(SAMPLE_DATA).unwrap())
    }

    fn task(script: serde_json::Value) -> Task {
        serde_json::from_value(json!({
            "user_id": "chen_jackson_3290",
            "instruction": "Cancel 4WQ150.",
            "script": script
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_command_is_traced_and_output() {
        let mut channels = workflow()
            .launch(&task(json!([
                {"command": "cancel_reservation", "params": {"reservation_id": "4WQ150"}}
            ])))
            .await
            .unwrap();

        let request = channels.trace_rx.recv().await.unwrap();
        assert!(request.is_agent_to_workflow());

        let result = channels.trace_rx.recv().await.unwrap();
        assert_eq!(result.command(), Some("cancel_reservation"));
        assert_eq!(result.parameters, json!({"reservation_id": "4WQ150"}));
        assert_eq!(result.success, Some(true));

        let output = channels.output_rx.recv().await.unwrap();
        assert!(output.joined_text().unwrap().starts_with("Cancellation result:"));

        // Script done: the workflow drops its senders
        assert!(channels.trace_rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_rejected_command_has_no_tool() {
        let mut channels = workflow()
            .launch(&task(json!([
                {"command": "cancel_reservation", "params": {"reservation_id": "bad id"}}
            ])))
            .await
            .unwrap();

        channels.trace_rx.recv().await.unwrap();
        let result = channels.trace_rx.recv().await.unwrap();
        assert_eq!(result.command(), None);
        assert_eq!(result.success, Some(false));
    }

    #[tokio::test]
    async fn test_ask_waits_for_user() {
        let mut channels = workflow()
            .launch(&task(json!([
                {"ask": "Which reservation?"},
                {"command": "get_reservation_details", "params": {"reservation_id": "4WQ150"}}
            ])))
            .await
            .unwrap();

        let question = channels.output_rx.recv().await.unwrap();
        assert_eq!(question.joined_text().as_deref(), Some("Which reservation?"));
        tokio::task::yield_now().await;
        assert!(channels.trace_rx.try_recv().is_err());

        channels.user_tx.send("4WQ150".to_string()).unwrap();
        let request = channels.trace_rx.recv().await.unwrap();
        assert_eq!(request.command(), Some("get_reservation_details"));
    }

    #[tokio::test]
    async fn test_cancel_stops_waiting_workflow() {
        let mut channels = workflow()
            .launch(&task(json!([
                {"ask": "Which reservation?"},
                {"command": "cancel_reservation", "params": {"reservation_id": "4WQ150"}}
            ])))
            .await
            .unwrap();

        channels.output_rx.recv().await.unwrap();
        channels.cancel.cancel();

        assert!(channels.trace_rx.recv().await.is_none());
        assert!(channels.output_rx.recv().await.is_none());
    }
}

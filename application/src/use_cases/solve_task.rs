//! Solve Task use case
//!
//! Drives one benchmark task: starts the workflow, mirrors its command
//! trace and outputs into the environment, then scores the final dataset
//! against a replay of the task's ground-truth actions.
//!
//! ```text
//! RUNNING ─▶ DRAIN_TRACE ─▶ DRAIN_OUTPUTS ─▶ IDLE_CHECK ─┬─▶ RUNNING
//!                                                        ├─▶ DONE
//!                                                        └─▶ TIMEOUT
//! ```

use crate::config::AdapterParams;
use crate::ports::bench_logger::{BenchEvent, BenchLogger, NoBenchLogger};
use crate::ports::environment::{BenchEnvironment, EnvError};
use crate::ports::progress::{BenchProgressNotifier, NoProgress};
use crate::ports::workflow::{WorkflowChannels, WorkflowError, WorkflowLauncher};
use airline_domain::{
    Action, AirlineData, CommandOutput, CommandTraceEvent, ExecutedAction, Message, RunInfo,
    SolveInfo, SolveResult, Task, collect_diffs, hash_value,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc::error::TryRecvError;
use tracing::{debug, error, info, warn};

/// Errors that can occur while solving a task
#[derive(Error, Debug)]
pub enum SolveTaskError {
    #[error("Environment error: {0}")]
    Environment(#[from] EnvError),

    #[error("Workflow error: {0}")]
    Workflow(#[from] WorkflowError),
}

/// Mutable state of one adapter loop.
#[derive(Default)]
struct LoopState {
    actions: Vec<ExecutedAction>,
    texts: Vec<String>,
    steps: usize,
    iterations: usize,
    pending_trace: Option<CommandTraceEvent>,
    pending_output: Option<CommandOutput>,
    trace_closed: bool,
    output_closed: bool,
    done: bool,
}

impl LoopState {
    fn workflow_finished(&self) -> bool {
        self.trace_closed && self.output_closed
    }

    fn aggregated_text(&self) -> Option<String> {
        let joined = self.texts.join("\n");
        let trimmed = joined.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

/// Use case for solving benchmark tasks with a workflow
pub struct SolveTaskUseCase<W: WorkflowLauncher + 'static> {
    launcher: Arc<W>,
    params: AdapterParams,
    logger: Arc<dyn BenchLogger>,
}

impl<W: WorkflowLauncher + 'static> SolveTaskUseCase<W> {
    pub fn new(launcher: Arc<W>, params: AdapterParams) -> Self {
        Self {
            launcher,
            params,
            logger: Arc::new(NoBenchLogger),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn BenchLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn params(&self) -> &AdapterParams {
        &self.params
    }

    /// Solve one task with default (no-op) progress
    pub async fn execute(&self, env: &mut dyn BenchEnvironment, task_index: usize) -> SolveResult {
        self.execute_with_progress(env, task_index, &NoProgress).await
    }

    /// Solve one task with progress callbacks.
    ///
    /// Never fails: errors become a zero-reward result carrying the message.
    pub async fn execute_with_progress(
        &self,
        env: &mut dyn BenchEnvironment,
        task_index: usize,
        progress: &dyn BenchProgressNotifier,
    ) -> SolveResult {
        let result = match self.solve(env, task_index, progress).await {
            Ok(result) => result,
            Err(e) => {
                error!("Task {} failed: {}", task_index, e);
                SolveResult::failed(env.wiki(), e.to_string())
            }
        };

        self.logger.log(BenchEvent::new(
            "solve_result",
            json!({ "task_index": task_index, "result": &result }),
        ));
        progress.on_task_complete(task_index, &result);
        result
    }

    /// Solve several tasks in order, one at a time.
    pub async fn execute_all(
        &self,
        env: &mut dyn BenchEnvironment,
        task_indices: &[usize],
        progress: &dyn BenchProgressNotifier,
    ) -> Vec<SolveResult> {
        progress.on_run_start(task_indices.len());

        let mut results = Vec::with_capacity(task_indices.len());
        for &index in task_indices {
            results.push(self.execute_with_progress(env, index, progress).await);
        }

        let average = average_reward(&results);
        info!(
            "Solved {} tasks, average reward {:.3}",
            results.len(),
            average
        );
        progress.on_run_complete(average);
        results
    }

    async fn solve(
        &self,
        env: &mut dyn BenchEnvironment,
        task_index: usize,
        progress: &dyn BenchProgressNotifier,
    ) -> Result<SolveResult, SolveTaskError> {
        env.reset(task_index).await?;
        let task = env.task().cloned().ok_or(EnvError::NoTask)?;

        info!("Solving task {}: {}", task_index, task.instruction);
        progress.on_task_start(task_index, &task.instruction);
        self.logger.log(BenchEvent::new(
            "task_started",
            json!({
                "task_index": task_index,
                "user_id": &task.user_id,
                "instruction": &task.instruction,
            }),
        ));

        let mut channels = self.launcher.launch(&task).await?;
        let outcome = self.drive(&mut channels, env, task_index, progress).await;
        channels.cancel.cancel();
        let state = outcome?;

        let agent_value = env.data().to_value();
        let gt_value = replay_ground_truth(&*env, &task).to_value();
        let data_diffs = collect_diffs(&agent_value, &gt_value, self.params.diff_limit);
        let agent_data_hash = hash_value(&agent_value);
        let gt_data_hash = hash_value(&gt_value);
        if !data_diffs.is_empty() {
            debug!(
                "Task {}: {} difference(s) from ground truth, first at {}",
                task_index,
                data_diffs.len(),
                data_diffs[0].path()
            );
        }

        let reward_info = env.calculate_reward()?;
        info!(
            "Task {} finished: reward {:.1} after {} steps ({} iterations)",
            task_index, reward_info.reward, state.steps, state.iterations
        );

        let mut messages = vec![
            Message::system(env.wiki()),
            Message::user(task.instruction.clone()),
        ];
        if let Some(text) = state.aggregated_text() {
            messages.push(Message::assistant(text));
        }

        Ok(SolveResult {
            reward: reward_info.reward,
            messages,
            info: SolveInfo::Completed(Box::new(RunInfo {
                task_index,
                steps: state.steps,
                iterations: state.iterations,
                executed_actions: state.actions,
                reward_info,
                data_diffs,
                agent_data_hash,
                gt_data_hash,
            })),
        })
    }

    /// The adapter loop: drain, check for idleness, wait.
    async fn drive(
        &self,
        channels: &mut WorkflowChannels,
        env: &mut dyn BenchEnvironment,
        task_index: usize,
        progress: &dyn BenchProgressNotifier,
    ) -> Result<LoopState, SolveTaskError> {
        let mut state = LoopState::default();
        let mut idle = 0;

        while state.iterations < self.params.max_num_steps {
            state.iterations += 1;

            let mut processed = self
                .drain_trace(channels, env, &mut state, task_index, progress)
                .await?;
            processed += self.drain_outputs(channels, env, &mut state).await?;
            state.steps += processed;

            if processed == 0 {
                idle += 1;
            } else {
                idle = 0;
            }

            if state.done {
                debug!("Task {}: environment reported done", task_index);
                // Commands traced before the final output still count
                state.steps += self
                    .drain_trace(channels, env, &mut state, task_index, progress)
                    .await?;
                return Ok(state);
            }
            if idle >= self.params.idle_limit {
                debug!(
                    "Task {}: no activity for {} iterations",
                    task_index, idle
                );
                return Ok(state);
            }
            if state.workflow_finished() {
                debug!("Task {}: workflow closed its channels", task_index);
                return Ok(state);
            }

            self.wait_for_activity(channels, &mut state).await;
        }

        warn!(
            "Task {}: stopped after {} iterations",
            task_index, state.iterations
        );
        Ok(state)
    }

    /// Record executed commands and mirror them into the environment.
    async fn drain_trace(
        &self,
        channels: &mut WorkflowChannels,
        env: &mut dyn BenchEnvironment,
        state: &mut LoopState,
        task_index: usize,
        progress: &dyn BenchProgressNotifier,
    ) -> Result<usize, SolveTaskError> {
        let mut processed = 0;
        while processed < self.params.max_drain {
            let event = match state.pending_trace.take() {
                Some(event) => event,
                None => match channels.trace_rx.try_recv() {
                    Ok(event) => event,
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        state.trace_closed = true;
                        break;
                    }
                },
            };
            processed += 1;

            if event.is_agent_to_workflow() {
                continue;
            }
            if let Some(text) = event.response_text.as_deref().filter(|t| !t.trim().is_empty()) {
                state.texts.push(text.to_string());
            }
            let Some(name) = event.command() else {
                continue;
            };

            let kwargs = if event.parameters.is_null() {
                json!({})
            } else {
                event.parameters.clone()
            };
            let action = ExecutedAction {
                name: name.to_string(),
                kwargs: kwargs.clone(),
                response_text: event.response_text.clone(),
                success: event.success,
            };
            debug!("Task {}: executed {} {}", task_index, name, kwargs);
            progress.on_action(task_index, &action);
            self.logger.log(BenchEvent::new(
                "action_executed",
                json!({ "task_index": task_index, "action": &action }),
            ));
            state.actions.push(action);

            let response = env.step(Action::new(name, kwargs)).await?;
            if response.done {
                debug!("Task {}: tool {} ended the episode", task_index, name);
            }
        }
        Ok(processed)
    }

    /// Forward agent messages to the user and relay the replies.
    async fn drain_outputs(
        &self,
        channels: &mut WorkflowChannels,
        env: &mut dyn BenchEnvironment,
        state: &mut LoopState,
    ) -> Result<usize, SolveTaskError> {
        let mut processed = 0;
        while processed < self.params.max_drain {
            let output = match state.pending_output.take() {
                Some(output) => output,
                None => match channels.output_rx.try_recv() {
                    Ok(output) => output,
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        state.output_closed = true;
                        break;
                    }
                },
            };
            processed += 1;

            let Some(text) = output.joined_text() else {
                continue;
            };
            state.texts.push(text.clone());

            let response = env.step(Action::respond(text)).await?;
            if !response.observation.is_empty() {
                if channels.user_tx.send(response.observation.clone()).is_err() {
                    debug!("Workflow no longer accepts user messages");
                }
                state.texts.push(response.observation);
            }
            if response.done {
                state.done = true;
                break;
            }
        }
        Ok(processed)
    }

    /// Wait up to the poll interval for either channel, keeping what arrives.
    async fn wait_for_activity(&self, channels: &mut WorkflowChannels, state: &mut LoopState) {
        let trace_open = !state.trace_closed;
        let output_open = !state.output_closed;
        tokio::select! {
            Some(event) = channels.trace_rx.recv(), if trace_open => {
                state.pending_trace = Some(event);
            }
            Some(output) = channels.output_rx.recv(), if output_open => {
                state.pending_output = Some(output);
            }
            _ = tokio::time::sleep(self.params.poll_interval) => {}
        }
    }
}

/// Replay the task's ground-truth actions on a fresh dataset.
fn replay_ground_truth(env: &dyn BenchEnvironment, task: &Task) -> AirlineData {
    let mut data = env.load_data();
    for (name, e) in env.tools().replay(&mut data, &task.actions) {
        debug!("Ground-truth action {} failed: {}", name, e);
    }
    data
}

/// Mean reward, 0.0 for no results.
pub fn average_reward(results: &[SolveResult]) -> f64 {
    if results.is_empty() {
        return 0.0;
    }
    results.iter().map(|r| r.reward).sum::<f64>() / results.len() as f64
}

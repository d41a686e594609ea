//! Progress notification port
//!
//! Defines the interface for reporting progress while solving tasks.

use airline_domain::{ExecutedAction, SolveResult};

/// Callback for progress updates during a bench run
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (progress bar, plain log, etc.)
pub trait BenchProgressNotifier: Send + Sync {
    /// Called once before the first task
    fn on_run_start(&self, _total_tasks: usize) {}

    /// Called when a task starts
    fn on_task_start(&self, task_index: usize, instruction: &str);

    /// Called for every action observed on the trace channel
    fn on_action(&self, _task_index: usize, _action: &ExecutedAction) {}

    /// Called when a task finishes, successfully or not
    fn on_task_complete(&self, task_index: usize, result: &SolveResult);

    /// Called once after the last task
    fn on_run_complete(&self, _average_reward: f64) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl BenchProgressNotifier for NoProgress {
    fn on_task_start(&self, _task_index: usize, _instruction: &str) {}
    fn on_task_complete(&self, _task_index: usize, _result: &SolveResult) {}
}

//! Local benchmark collaborators
//!
//! - [`LocalBenchEnv`]: Tau-Bench style environment over the airline tools
//! - [`ScriptedUserSimulator`]: replays a task's scripted user turns
//! - [`ScriptedWorkflow`]: runs a task's command script as a tokio task

mod local_env;
mod scripted_user;
mod scripted_workflow;

pub use local_env::LocalBenchEnv;
pub use scripted_user::ScriptedUserSimulator;
pub use scripted_workflow::ScriptedWorkflow;

#[cfg(test)]
mod tests {
    use super::*;
    use airline_application::{AdapterParams, SolveTaskUseCase};
    use airline_domain::{AirlineData, Task};
    use std::sync::Arc;
    use std::time::Duration;

    const SAMPLE_DATA: &str = include_str!("../../../data/airline.json");
    const SAMPLE_TASKS: &str = include_str!("../../../data/tasks.json");

    #[tokio::test]
    async fn test_sample_tasks_are_solved() {
        let data: AirlineData = serde_json::from_str(SAMPLE_DATA).unwrap();
        let tasks: Vec<Task> = serde_json::from_str(SAMPLE_TASKS).unwrap();
        let count = tasks.len();

        let mut env = LocalBenchEnv::new(data.clone(), tasks, "policy", ScriptedUserSimulator::new());
        let params = AdapterParams::default().with_poll_interval(Duration::from_millis(5));
        let use_case = SolveTaskUseCase::new(Arc::new(ScriptedWorkflow::new(data)), params);

        for index in 0..count {
            let result = use_case.execute(&mut env, index).await;
            let info = result.run_info().unwrap_or_else(|| panic!("task {index}: {:?}", result.error()));
            assert_eq!(result.reward, 1.0, "task {index}: {:?}", info.data_diffs);
            assert!(!info.executed_actions.is_empty());
            assert_eq!(info.agent_data_hash, info.gt_data_hash);
        }
    }

    #[tokio::test]
    async fn test_missing_command_scores_zero() {
        let data: AirlineData = serde_json::from_str(SAMPLE_DATA).unwrap();
        let mut tasks: Vec<Task> = serde_json::from_str(SAMPLE_TASKS).unwrap();
        // Drop the cancellation from the first script
        tasks[0].script.pop();

        let mut env = LocalBenchEnv::new(data.clone(), tasks, "policy", ScriptedUserSimulator::new());
        let params = AdapterParams::default().with_poll_interval(Duration::from_millis(5));
        let use_case = SolveTaskUseCase::new(Arc::new(ScriptedWorkflow::new(data)), params);

        let result = use_case.execute(&mut env, 0).await;

        assert_eq!(result.reward, 0.0);
        let info = result.run_info().unwrap();
        assert!(info.data_diffs.iter().any(|d| d.path().starts_with("reservations.4WQ150")));
    }
}

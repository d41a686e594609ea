//! In-process Tau-Bench style environment over the airline tools.

use airline_application::ports::environment::{BenchEnvironment, EnvError, UserSimulator};
use airline_domain::tool::ToolRegistry;
use airline_domain::{
    Action, AirlineData, EnvInfo, EnvResponse, RESPOND_ACTION_NAME, RewardInfo, RewardResult,
    STOP_TOKEN, Task, render_outcome,
};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Environment owning the airline dataset, the task list and a user
/// simulator.
///
/// `step` records every action; `respond` actions go to the user simulator
/// and tool actions run against the dataset. When an action ends the
/// episode the reward is computed and attached to the response.
pub struct LocalBenchEnv<U: UserSimulator> {
    initial: AirlineData,
    data: AirlineData,
    tasks: Vec<Task>,
    wiki: String,
    tools: ToolRegistry,
    user: U,
    current: Option<usize>,
    actions: Vec<Action>,
}

impl<U: UserSimulator> LocalBenchEnv<U> {
    pub fn new(data: AirlineData, tasks: Vec<Task>, wiki: impl Into<String>, user: U) -> Self {
        Self {
            data: data.clone(),
            initial: data,
            tasks,
            wiki: wiki.into(),
            tools: ToolRegistry::airline(),
            user,
            current: None,
            actions: Vec::new(),
        }
    }

    /// Actions recorded since the last reset.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    fn response(observation: String, done: bool, source: &str) -> EnvResponse {
        EnvResponse {
            observation,
            reward: 0.0,
            done,
            info: EnvInfo {
                source: Some(source.to_string()),
                reward_info: None,
            },
        }
    }

    /// Whether every expected output appears in some respond content,
    /// compared case-insensitively with commas removed.
    fn check_outputs(&self, outputs: &[String]) -> BTreeMap<String, bool> {
        let normalize = |s: &str| s.to_lowercase().replace(',', "");
        let responses: Vec<String> = self
            .actions
            .iter()
            .filter(|a| a.is_respond())
            .filter_map(|a| a.content())
            .map(normalize)
            .collect();

        outputs
            .iter()
            .map(|expected| {
                let needle = normalize(expected);
                let found = responses.iter().any(|r| r.contains(&needle));
                (expected.clone(), found)
            })
            .collect()
    }
}

#[async_trait]
impl<U: UserSimulator> BenchEnvironment for LocalBenchEnv<U> {
    fn wiki(&self) -> &str {
        &self.wiki
    }

    fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    fn task(&self) -> Option<&Task> {
        self.tasks.get(self.current?)
    }

    fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    fn data(&self) -> &AirlineData {
        &self.data
    }

    fn load_data(&self) -> AirlineData {
        self.initial.clone()
    }

    async fn reset(&mut self, task_index: usize) -> Result<EnvResponse, EnvError> {
        let count = self.tasks.len();
        let task = self
            .tasks
            .get(task_index)
            .ok_or(EnvError::TaskOutOfRange {
                index: task_index,
                count,
            })?;

        let observation = self.user.reset(task).await?;
        self.current = Some(task_index);
        self.data = self.initial.clone();
        self.actions.clear();
        debug!("Environment reset to task {}", task_index);

        Ok(Self::response(observation, false, "user"))
    }

    async fn step(&mut self, action: Action) -> Result<EnvResponse, EnvError> {
        if self.current.is_none() {
            return Err(EnvError::NoTask);
        }
        self.actions.push(action.clone());

        let mut response = if action.is_respond() {
            let content = action.content().unwrap_or_default();
            let reply = self.user.step(content).await?;
            let done = reply.contains(STOP_TOKEN);
            Self::response(reply, done, "user")
        } else if self.tools.contains(&action.name) {
            let outcome = self.tools.invoke(&action.name, &mut self.data, &action.kwargs);
            let done = self.tools.is_terminal(&action.name);
            Self::response(render_outcome(&outcome), done, &action.name)
        } else {
            Self::response(
                format!("Unknown action {}", action.name),
                false,
                &action.name,
            )
        };

        if response.done {
            let reward = self.calculate_reward()?;
            info!("Episode done with reward {:.1}", reward.reward);
            response.reward = reward.reward;
            response.info.reward_info = Some(reward);
        }
        Ok(response)
    }

    fn calculate_reward(&mut self) -> Result<RewardResult, EnvError> {
        let task = self.task().cloned().ok_or(EnvError::NoTask)?;

        let agent_hash = self.data.data_hash();
        let mut gt_data = self.load_data();
        for (name, e) in self.tools.replay(&mut gt_data, &task.actions) {
            debug!("Ground-truth action {} failed: {}", name, e);
        }
        let gt_data_hash = gt_data.data_hash();

        let r_actions = if agent_hash == gt_data_hash { 1.0 } else { 0.0 };
        let mut info = RewardInfo {
            r_actions,
            gt_data_hash,
            r_outputs: None,
            outputs: BTreeMap::new(),
        };
        let mut reward = r_actions;

        if !task.outputs.is_empty() {
            info.outputs = self.check_outputs(&task.outputs);
            let r_outputs = if info.outputs.values().all(|found| *found) {
                1.0
            } else {
                0.0
            };
            info.r_outputs = Some(r_outputs);
            if r_outputs < 1.0 {
                reward = 0.0;
            }
        }

        Ok(RewardResult {
            reward,
            info,
            actions: task
                .actions
                .into_iter()
                .filter(|a| a.name != RESPOND_ACTION_NAME)
                .collect(),
        })
    }
}

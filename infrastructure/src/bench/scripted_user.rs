//! User simulator that replays scripted turns.

use airline_application::ports::environment::{EnvError, UserSimulator};
use airline_domain::{STOP_TOKEN, Task};
use async_trait::async_trait;
use std::collections::VecDeque;

/// Replies with the task's `user_turns` in order, then [`STOP_TOKEN`].
#[derive(Debug, Default)]
pub struct ScriptedUserSimulator {
    turns: VecDeque<String>,
}

impl ScriptedUserSimulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Turns not yet spoken.
    pub fn remaining(&self) -> usize {
        self.turns.len()
    }
}

#[async_trait]
impl UserSimulator for ScriptedUserSimulator {
    async fn reset(&mut self, task: &Task) -> Result<String, EnvError> {
        self.turns = task.user_turns.iter().cloned().collect();
        Ok(task.instruction.clone())
    }

    async fn step(&mut self, _content: &str) -> Result<String, EnvError> {
        Ok(self
            .turns
            .pop_front()
            .unwrap_or_else(|| STOP_TOKEN.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_replies_in_order_then_stops() {
        let task: Task = serde_json::from_value(json!({
            "user_id": "mia_li_3668",
            "instruction": "Ask for a certificate.",
            "user_turns": ["I'm mia_li_3668.", "Thanks."]
        }))
        .unwrap();
        let mut user = ScriptedUserSimulator::new();

        assert_eq!(user.reset(&task).await.unwrap(), "Ask for a certificate.");
        assert_eq!(user.remaining(), 2);
        assert_eq!(user.step("Your user id?").await.unwrap(), "I'm mia_li_3668.");
        assert_eq!(user.step("Done.").await.unwrap(), "Thanks.");
        assert_eq!(user.step("Anything else?").await.unwrap(), STOP_TOKEN);
        assert_eq!(user.step("Hello?").await.unwrap(), STOP_TOKEN);

        user.reset(&task).await.unwrap();
        assert_eq!(user.remaining(), 2);
    }
}

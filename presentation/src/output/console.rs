//! Console output formatter for bench results

use airline_domain::command::CommandSignature;
use airline_domain::{
    CommandOutcome, DataDiff, OutputFormat, SolveResult, ToolDefinition,
};
use colored::Colorize;

/// Formats bench results and catalogs for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format a whole run in the requested format
    pub fn format_run(task_indices: &[usize], results: &[SolveResult], format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => Self::format_json(results),
            OutputFormat::Full => {
                let mut output = Self::header("Airline Bench Results");
                output.push('\n');
                for (index, result) in task_indices.iter().zip(results) {
                    output.push_str(&Self::format_full(*index, result));
                }
                output.push_str(&Self::average_line(results));
                output.push_str(&Self::footer());
                output
            }
            OutputFormat::Summary => {
                let mut output = String::new();
                for (index, result) in task_indices.iter().zip(results) {
                    output.push_str(&Self::format_summary_line(*index, result));
                    output.push('\n');
                }
                output.push_str(&Self::average_line(results));
                output
            }
        }
    }

    /// Per-task detail
    pub fn format_full(task_index: usize, result: &SolveResult) -> String {
        let mut output = Self::section_header(&format!("Task {}", task_index));

        output.push_str(&format!(
            "{} {}\n",
            "Reward:".cyan().bold(),
            Self::reward(result.reward)
        ));

        let Some(info) = result.run_info() else {
            output.push_str(&format!(
                "{} {}\n",
                "Error:".red().bold(),
                result.error().unwrap_or("Unknown")
            ));
            return output;
        };

        output.push_str(&format!(
            "{} {} ({} iterations)\n",
            "Steps:".cyan().bold(),
            info.steps,
            info.iterations
        ));

        let reward = &info.reward_info.info;
        output.push_str(&format!(
            "{} r_actions={:.1}",
            "Breakdown:".cyan().bold(),
            reward.r_actions
        ));
        if let Some(r_outputs) = reward.r_outputs {
            output.push_str(&format!(" r_outputs={:.1}", r_outputs));
        }
        output.push('\n');
        for (expected, found) in &reward.outputs {
            let mark = if *found { "v".green() } else { "x".red() };
            output.push_str(&format!("  {} output {:?}\n", mark, expected));
        }

        output.push_str(&format!("\n{}\n", "Executed actions:".cyan().bold()));
        if info.executed_actions.is_empty() {
            output.push_str(&format!("  {}\n", "(none)".dimmed()));
        }
        for action in &info.executed_actions {
            let mark = match action.success {
                Some(false) => "x".red(),
                _ => "v".green(),
            };
            output.push_str(&format!("  {} {} {}\n", mark, action.name.bold(), action.kwargs));
        }

        if !info.data_diffs.is_empty() {
            output.push_str(&format!(
                "\n{} {} vs {}\n",
                "Data diffs:".yellow().bold(),
                Self::short_hash(&info.agent_data_hash),
                Self::short_hash(&info.gt_data_hash)
            ));
            for diff in &info.data_diffs {
                output.push_str(&format!("  * {}\n", Self::format_diff(diff)));
            }
        }

        output
    }

    /// One line per task
    pub fn format_summary_line(task_index: usize, result: &SolveResult) -> String {
        match result.run_info() {
            Some(info) => format!(
                "task {:>3}  reward {}  actions {:>2}  diffs {:>2}",
                task_index,
                Self::reward(result.reward),
                info.executed_actions.len(),
                info.data_diffs.len()
            ),
            None => format!(
                "task {:>3}  reward {}  {} {}",
                task_index,
                Self::reward(result.reward),
                "error:".red(),
                result.error().unwrap_or("Unknown")
            ),
        }
    }

    /// Format results as JSON
    pub fn format_json(results: &[SolveResult]) -> String {
        serde_json::to_string_pretty(results).unwrap_or_else(|_| "[]".to_string())
    }

    /// Tool descriptors as a JSON array of function schemas
    pub fn format_tools(definitions: &[ToolDefinition]) -> String {
        let schemas: Vec<_> = definitions.iter().map(|d| d.to_json_schema()).collect();
        serde_json::to_string_pretty(&schemas).unwrap_or_else(|_| "[]".to_string())
    }

    /// Command signatures with fields and utterances
    pub fn format_commands(signatures: &[CommandSignature]) -> String {
        let mut output = String::new();
        for signature in signatures {
            output.push_str(&format!(
                "{} {}\n",
                signature.name.yellow().bold(),
                format!("-> {}", signature.output).dimmed()
            ));
            output.push_str(&format!("  {}\n", signature.description));
            for field in &signature.inputs {
                let required = if field.optional { "" } else { " (required)" };
                output.push_str(&format!(
                    "    {}{}: {}\n",
                    field.name.cyan(),
                    required,
                    field.constraint.describe()
                ));
            }
            for utterance in &signature.utterances {
                output.push_str(&format!("    {} {}\n", ">".dimmed(), utterance.italic()));
            }
            output.push('\n');
        }
        output
    }

    /// Response of a single command execution
    pub fn format_outcome(outcome: &CommandOutcome) -> String {
        let status = if outcome.success {
            "ok".green().bold()
        } else {
            "failed".red().bold()
        };
        let mut output = format!("{} {}\n", status, outcome.response);
        if let Some(tool) = &outcome.tool_name {
            output.push_str(&format!(
                "{}\n",
                format!("tool {} {}", tool, outcome.tool_kwargs).dimmed()
            ));
        }
        output
    }

    fn format_diff(diff: &DataDiff) -> String {
        match diff {
            DataDiff::Value { path, agent, gt } => {
                format!("{}: {} != {}", path.bold(), agent.red(), gt.green())
            }
            DataDiff::Length {
                path,
                agent_len,
                gt_len,
            } => format!("{}: length {} != {}", path.bold(), agent_len, gt_len),
        }
    }

    fn average_line(results: &[SolveResult]) -> String {
        let average = airline_application::average_reward(results);
        format!(
            "{} {:.3} over {} tasks\n",
            "Average reward:".cyan().bold(),
            average,
            results.len()
        )
    }

    fn reward(reward: f64) -> colored::ColoredString {
        let text = format!("{:.1}", reward);
        if reward >= 1.0 { text.green() } else { text.red() }
    }

    fn short_hash(hash: &str) -> &str {
        &hash[..hash.len().min(12)]
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use airline_domain::tool::ToolRegistry;
    use airline_domain::{RewardInfo, RewardResult, RunInfo, SolveInfo};

    fn completed(reward: f64) -> SolveResult {
        SolveResult {
            reward,
            messages: vec![],
            info: SolveInfo::Completed(Box::new(RunInfo {
                task_index: 0,
                steps: 4,
                iterations: 3,
                executed_actions: vec![],
                reward_info: RewardResult {
                    reward,
                    info: RewardInfo::default(),
                    actions: vec![],
                },
                data_diffs: vec![DataDiff::Value {
                    path: "reservations.4WQ150.status".into(),
                    agent: "<missing>".into(),
                    gt: "cancelled".into(),
                }],
                agent_data_hash: "a".repeat(64),
                gt_data_hash: "b".repeat(64),
            })),
        }
    }

    #[test]
    fn test_summary_lists_tasks_and_average() {
        colored::control::set_override(false);
        let results = vec![completed(1.0), SolveResult::failed("wiki", "boom")];
        let output = ConsoleFormatter::format_run(&[0, 1], &results, OutputFormat::Summary);
        assert!(output.contains("task   0  reward 1.0  actions  0  diffs  1"));
        assert!(output.contains("error: boom"));
        assert!(output.contains("Average reward: 0.500 over 2 tasks"));
    }

    #[test]
    fn test_full_shows_diffs() {
        colored::control::set_override(false);
        let output = ConsoleFormatter::format_full(2, &completed(0.0));
        assert!(output.contains("Task 2"));
        assert!(output.contains("reservations.4WQ150.status: <missing> != cancelled"));
        assert!(output.contains("(none)"));
    }

    #[test]
    fn test_json_is_an_array() {
        let output = ConsoleFormatter::format_run(&[0], &[completed(1.0)], OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value[0]["reward"], 1.0);
        assert_eq!(value[0]["info"]["steps"], 4);
    }

    #[test]
    fn test_tools_are_function_schemas() {
        let output = ConsoleFormatter::format_tools(&ToolRegistry::airline().definitions());
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 14);
    }
}

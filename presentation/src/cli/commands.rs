//! CLI command definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for bench results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Per-task detail with actions, reward breakdown and data diffs
    Full,
    /// One line per task and the average reward
    Summary,
    /// Solve results as JSON
    Json,
}

impl From<OutputFormat> for airline_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => Self::Full,
            OutputFormat::Summary => Self::Summary,
            OutputFormat::Json => Self::Json,
        }
    }
}

/// CLI arguments for airline-bench
#[derive(Parser, Debug)]
#[command(name = "airline-bench")]
#[command(author, version, about = "Airline reservation tools and a Tau-Bench style adapter")]
#[command(long_about = r#"
airline-bench runs airline customer-service tasks through a scripted workflow
and scores the resulting reservation database against each task's ground truth.

Configuration is merged from (lowest to highest priority):
1. Built-in defaults
2. ~/.config/airline-bench/config.toml   Global config
3. ./airline-bench.toml                  Project-level config
4. --config <path>                       Explicit config file
5. AIRLINE_BENCH_* environment variables (e.g. AIRLINE_BENCH_ADAPTER__IDLE_LIMIT=20)

Example:
  airline-bench run --data data/airline.json --tasks data/tasks.json
  airline-bench run --task 0 --task 2 --output full
  airline-bench exec cancel_reservation --params '{"reservation_id": "4WQ150"}'
  airline-bench tools
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Solve bench tasks with the scripted workflow and user
    Run(RunArgs),
    /// Print all tool descriptors as JSON schemas
    Tools,
    /// Print command signatures and example utterances
    Commands,
    /// Run one command against a dataset and print the response
    Exec(ExecArgs),
}

#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Airline dataset JSON
    #[arg(long, value_name = "PATH")]
    pub data: Option<PathBuf>,

    /// Task list JSON
    #[arg(long, value_name = "PATH")]
    pub tasks: Option<PathBuf>,

    /// Task indices to run (all tasks when omitted)
    #[arg(long = "task", value_name = "N")]
    pub task: Vec<usize>,

    /// Append solve results to this JSONL file
    #[arg(long, value_name = "PATH")]
    pub results: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,
}

#[derive(Args, Debug)]
pub struct ExecArgs {
    /// Command name (see `airline-bench commands`)
    pub command: String,

    /// Airline dataset JSON
    #[arg(long, value_name = "PATH")]
    pub data: Option<PathBuf>,

    /// Command parameters as a JSON object
    #[arg(long, value_name = "JSON", default_value = "{}")]
    pub params: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_with_tasks() {
        let cli = Cli::parse_from([
            "airline-bench",
            "-vv",
            "run",
            "--tasks",
            "tasks.json",
            "--task",
            "0",
            "--task",
            "3",
            "--output",
            "json",
        ]);
        assert_eq!(cli.verbose, 2);
        let Some(Command::Run(args)) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.task, vec![0, 3]);
        assert_eq!(args.output, Some(OutputFormat::Json));
        assert!(args.data.is_none());
    }

    #[test]
    fn test_parse_exec() {
        let cli = Cli::parse_from([
            "airline-bench",
            "exec",
            "cancel_reservation",
            "--params",
            r#"{"reservation_id": "4WQ150"}"#,
            "--no-config",
        ]);
        assert!(cli.no_config);
        let Some(Command::Exec(args)) = cli.command else {
            panic!("expected exec");
        };
        assert_eq!(args.command, "cancel_reservation");
    }

    #[test]
    fn test_output_format_maps_to_domain() {
        assert_eq!(
            airline_domain::OutputFormat::from(OutputFormat::Full),
            airline_domain::OutputFormat::Full
        );
    }
}

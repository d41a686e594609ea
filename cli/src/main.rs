//! CLI entrypoint for airline-bench
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use airline_application::{CommandRegistry, NoProgress, SolveTaskUseCase};
use airline_domain::tool::ToolRegistry;
use airline_infrastructure::{
    ConfigLoader, FileConfig, JsonlBenchLogger, LocalBenchEnv, ScriptedUserSimulator,
    ScriptedWorkflow, load_airline_data, load_tasks, load_wiki,
};
use airline_presentation::{
    Cli, Command, ConsoleFormatter, ExecArgs, OutputConfig, ProgressReporter, RunArgs,
    SimpleProgress,
};
use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

const DEFAULT_DATA_PATH: &str = "data/airline.json";
const DEFAULT_TASKS_PATH: &str = "data/tasks.json";
const LOG_FILE_PREFIX: &str = "airline-bench.log";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?
    };
    config.validate().context("Invalid configuration")?;

    let _guard = init_tracing(cli.verbose, config.logging.dir.as_deref().map(Path::new));
    info!("Starting airline-bench");

    match cli.command {
        Some(Command::Run(ref args)) => run(args, &config, &cli).await,
        None => run(&RunArgs::default(), &config, &cli).await,
        Some(Command::Tools) => {
            let definitions = ToolRegistry::airline().definitions();
            println!("{}", ConsoleFormatter::format_tools(&definitions));
            Ok(())
        }
        Some(Command::Commands) => {
            let signatures = CommandRegistry::airline().signatures();
            print!("{}", ConsoleFormatter::format_commands(&signatures));
            Ok(())
        }
        Some(Command::Exec(ref args)) => exec(args, &config),
    }
}

/// Initialize logging: `-v` count wins, then `RUST_LOG`, then `warn`.
///
/// With a log directory, a daily-rotated file receives the same events.
fn init_tracing(verbose: u8, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let console = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let file = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer);
            tracing_subscriber::registry()
                .with(filter)
                .with(console)
                .with(file)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(console)
                .init();
            None
        }
    }
}

fn resolve_path(flag: Option<&PathBuf>, configured: Option<&String>, default: &str) -> PathBuf {
    flag.cloned()
        .or_else(|| configured.map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(default))
}

async fn run(args: &RunArgs, config: &FileConfig, cli: &Cli) -> Result<()> {
    let data_path = resolve_path(args.data.as_ref(), config.data.path.as_ref(), DEFAULT_DATA_PATH);
    let tasks_path = resolve_path(
        args.tasks.as_ref(),
        config.tasks.path.as_ref(),
        DEFAULT_TASKS_PATH,
    );

    let data = load_airline_data(&data_path)?;
    let tasks = load_tasks(&tasks_path)?;
    let wiki = load_wiki(config.data.wiki.as_deref().map(Path::new))?;

    let indices: Vec<usize> = if args.task.is_empty() {
        (0..tasks.len()).collect()
    } else {
        args.task.clone()
    };

    let output = OutputConfig::resolve(
        args.output.map(Into::into),
        config.output.format,
        config.output.color,
        cli.quiet,
    );
    output.apply();

    // === Dependency Injection ===
    let mut env = LocalBenchEnv::new(data.clone(), tasks, wiki, ScriptedUserSimulator::new());
    let workflow = Arc::new(ScriptedWorkflow::new(data));
    let mut use_case = SolveTaskUseCase::new(workflow, config.adapter.to_params());

    let results_path = args
        .results
        .clone()
        .or_else(|| config.output.results_path.as_ref().map(PathBuf::from));
    if let Some(path) = results_path {
        match JsonlBenchLogger::new(&path) {
            Some(logger) => {
                info!("Appending results to {}", logger.path().display());
                use_case = use_case.with_logger(Arc::new(logger));
            }
            None => warn!("Results will not be saved to {}", path.display()),
        }
    }

    info!(
        "Running {} task(s) from {}",
        indices.len(),
        tasks_path.display()
    );

    // Log lines would tear a progress bar apart
    let results = if output.show_progress && cli.verbose > 0 {
        use_case.execute_all(&mut env, &indices, &SimpleProgress).await
    } else if output.show_progress {
        let progress = ProgressReporter::new();
        use_case.execute_all(&mut env, &indices, &progress).await
    } else {
        use_case.execute_all(&mut env, &indices, &NoProgress).await
    };

    print!(
        "{}",
        ConsoleFormatter::format_run(&indices, &results, output.format)
    );
    Ok(())
}

fn exec(args: &ExecArgs, config: &FileConfig) -> Result<()> {
    let data_path = resolve_path(args.data.as_ref(), config.data.path.as_ref(), DEFAULT_DATA_PATH);
    let mut data = load_airline_data(&data_path)?;
    let params: serde_json::Value =
        serde_json::from_str(&args.params).context("--params must be a JSON object")?;

    let outcome = CommandRegistry::airline().execute(&args.command, &mut data, &params);
    print!("{}", ConsoleFormatter::format_outcome(&outcome));
    Ok(())
}

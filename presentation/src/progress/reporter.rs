//! Progress reporting for bench runs

use airline_application::ports::progress::BenchProgressNotifier;
use airline_domain::{ExecutedAction, SolveResult};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;

/// Reports progress during a bench run with a progress bar
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn run_style() -> Option<ProgressStyle> {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .ok()
            .map(|style| style.progress_chars("=>-"))
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(guard) = self.bar.lock()
            && let Some(bar) = guard.as_ref()
        {
            f(bar);
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

fn reward_mark(result: &SolveResult) -> colored::ColoredString {
    if result.error().is_some() {
        "!".red()
    } else if result.reward >= 1.0 {
        "v".green()
    } else {
        "x".red()
    }
}

impl BenchProgressNotifier for ProgressReporter {
    fn on_run_start(&self, total_tasks: usize) {
        let bar = ProgressBar::new(total_tasks as u64);
        if let Some(style) = Self::run_style() {
            bar.set_style(style);
        }
        bar.set_prefix("Solving tasks");
        bar.set_message("Starting...");

        if let Ok(mut guard) = self.bar.lock() {
            *guard = Some(bar);
        }
    }

    fn on_task_start(&self, task_index: usize, _instruction: &str) {
        self.with_bar(|bar| bar.set_message(format!("task {}", task_index)));
    }

    fn on_action(&self, task_index: usize, action: &ExecutedAction) {
        self.with_bar(|bar| bar.set_message(format!("task {}: {}", task_index, action.name)));
    }

    fn on_task_complete(&self, task_index: usize, result: &SolveResult) {
        self.with_bar(|bar| {
            bar.set_message(format!("{} task {}", reward_mark(result), task_index));
            bar.inc(1);
        });
    }

    fn on_run_complete(&self, average_reward: f64) {
        if let Ok(mut guard) = self.bar.lock()
            && let Some(bar) = guard.take()
        {
            bar.finish_with_message(format!("average reward {:.3}", average_reward).green().to_string());
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl BenchProgressNotifier for SimpleProgress {
    fn on_run_start(&self, total_tasks: usize) {
        println!("{} {} ({} tasks)", "->".cyan(), "Solving".bold(), total_tasks);
    }

    fn on_task_start(&self, task_index: usize, instruction: &str) {
        println!("  {} task {}: {}", "->".cyan(), task_index, instruction.dimmed());
    }

    fn on_action(&self, _task_index: usize, action: &ExecutedAction) {
        println!("     {} {}", "*".dimmed(), action.name);
    }

    fn on_task_complete(&self, task_index: usize, result: &SolveResult) {
        println!(
            "  {} task {} reward {:.1}",
            reward_mark(result),
            task_index,
            result.reward
        );
    }

    fn on_run_complete(&self, _average_reward: f64) {
        println!();
    }
}

//! # SchedSim Host
//!
//! Wires the boundaries together: load the task list from a file, run the
//! dispatch engine to completion, replay the trace through the console
//! presenter, and report the final tally. All scheduling logic lives in
//! `sim_dispatch`; this crate only moves data between the edges.

use sim_dispatch::{DispatchEngine, SimulationReport, MAX_TASKS};
use std::path::PathBuf;
use std::time::Duration;
use task_loader::{load_task_list, LoadError};
use thiserror::Error;
use trace_console::ConsolePresenter;

/// Host configuration assembled from the command line
#[derive(Debug, Clone)]
pub struct HostConfig {
    /// Path of the task list file
    pub input: PathBuf,
    /// Wall-clock delay per simulated tick during replay, if any
    pub pace: Option<Duration>,
    /// Whether to colorize the trace
    pub color: bool,
}

impl HostConfig {
    /// Creates a config for an input path with no pacing and color on
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            pace: None,
            color: true,
        }
    }
}

/// Errors that abort the host
#[derive(Debug, Error)]
pub enum HostError {
    /// The task list could not be loaded
    #[error(transparent)]
    Load(#[from] LoadError),
}

/// Loads, simulates, and presents one run
///
/// Non-fatal boundary conditions (capacity overrun, skipped lines, rejected
/// priorities) go to stderr once each; the trace and tally go to stdout.
pub fn run_host(config: &HostConfig) -> Result<SimulationReport, HostError> {
    let list = load_task_list(&config.input)?;

    if list.capacity_exceeded {
        eprintln!(
            "Warning: task list exceeds the {} task capacity; extra tasks ignored",
            MAX_TASKS
        );
    }
    if list.skipped_lines > 0 {
        eprintln!(
            "Warning: {} malformed line(s) skipped in {}",
            list.skipped_lines,
            config.input.display()
        );
    }

    println!("Loaded {} tasks. Starting scheduler...", list.len());

    let outcome = DispatchEngine::new(&list.specs).run();

    for warning in &outcome.warnings {
        eprintln!("Warning: {}", warning);
    }

    let mut presenter = ConsolePresenter::new().with_color(config.color);
    if let Some(pace) = config.pace {
        presenter = presenter.with_pacing(pace);
    }
    presenter.present(&outcome);

    Ok(outcome.report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    fn temp_input(name: &str, contents: &str) -> PathBuf {
        let path = env::temp_dir().join(format!("schedsimd_{}_{}.txt", name, std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_run_host_happy_path() {
        let path = temp_input("happy", "0, 0, 3\n0, 1, 1\n");
        let config = HostConfig {
            input: path.clone(),
            pace: None,
            color: false,
        };

        let report = run_host(&config).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(report.total_tasks, 2);
        assert_eq!(report.completed, 2);
    }

    #[test]
    fn test_run_host_empty_input() {
        let path = temp_input("empty", "");
        let report = run_host(&HostConfig::new(&path)).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(report.total_tasks, 0);
        assert_eq!(report.ticks_elapsed, 0);
    }

    #[test]
    fn test_run_host_missing_file() {
        let config = HostConfig::new("/definitely/not/here/tasks.txt");
        let err = run_host(&config).unwrap_err();
        assert!(matches!(err, HostError::Load(_)));
    }

    #[test]
    fn test_config_defaults() {
        let config = HostConfig::new("tasks.txt");
        assert!(config.pace.is_none());
        assert!(config.color);
    }
}

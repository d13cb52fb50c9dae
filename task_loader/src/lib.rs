//! # Task List Loader
//!
//! Input boundary for the simulator: reads a textual task list where each
//! line is `arrival_time, priority, burst_time` (comma-separated integers,
//! optional surrounding whitespace) and turns it into the ordered spec list
//! the engine consumes.
//!
//! ## Philosophy
//!
//! - **Best-effort parsing**: lines that do not match the pattern are
//!   skipped, not fatal — but the skip count is surfaced so callers can
//!   report it.
//! - **Capacity is a loader concern**: the engine receives an
//!   already-bounded collection; overruns are truncated here and flagged
//!   once.
//! - **Priority stays raw**: out-of-range priorities pass through to the
//!   engine, which rejects them at admission.

use sched_types::TaskSpec;
use sim_dispatch::MAX_TASKS;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors surfaced by the loader
#[derive(Debug, Error)]
pub enum LoadError {
    /// The input source could not be read; fatal, no simulation attempted
    #[error("task source unavailable: {path}: {source}")]
    SourceUnavailable {
        /// Path that failed to open
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// The loader's output: ordered specs plus boundary observations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskList {
    /// Task specs in input order, at most [`MAX_TASKS`] of them
    pub specs: Vec<TaskSpec>,
    /// True if the source held more tasks than the capacity bound;
    /// the run proceeds with the truncated set
    pub capacity_exceeded: bool,
    /// Number of lines that did not match the expected pattern
    pub skipped_lines: usize,
}

impl TaskList {
    /// Returns the number of loaded tasks
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Returns true if no tasks were loaded
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

/// Loads a task list from a file
///
/// Returns [`LoadError::SourceUnavailable`] if the file cannot be read;
/// everything else is best-effort and reported on the [`TaskList`].
pub fn load_task_list(path: &Path) -> Result<TaskList, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::SourceUnavailable {
        path: path.display().to_string(),
        source,
    })?;
    Ok(parse_task_list(&text))
}

/// Parses a task list from text, one task per line
pub fn parse_task_list(input: &str) -> TaskList {
    let mut specs = Vec::new();
    let mut capacity_exceeded = false;
    let mut skipped_lines = 0;

    for line in input.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let Some(spec) = parse_line(line) else {
            skipped_lines += 1;
            continue;
        };
        if specs.len() >= MAX_TASKS {
            capacity_exceeded = true;
            continue;
        }
        specs.push(spec);
    }

    TaskList {
        specs,
        capacity_exceeded,
        skipped_lines,
    }
}

/// Parses one `arrival, priority, burst` line
///
/// Arrival and burst must be non-negative; priority is any integer and is
/// validated later, at admission.
fn parse_line(line: &str) -> Option<TaskSpec> {
    let mut fields = line.split(',');
    let arrival = fields.next()?.trim().parse::<u64>().ok()?;
    let priority = fields.next()?.trim().parse::<i64>().ok()?;
    let burst = fields.next()?.trim().parse::<u64>().ok()?;
    if fields.next().is_some() {
        return None;
    }
    Some(TaskSpec::new(arrival, priority, burst))
}

//! # Trace Console (Presenter)
//!
//! Renders the engine's trace as colored console lines. This is a thin
//! presentation boundary: it consumes already-produced events and has no
//! influence on scheduling — including the optional wall-clock pacing,
//! which merely slows down the replay of a finished trace.
//!
//! Each task gets a color from a small ANSI palette (id modulo palette
//! size) so transitions between tasks are easy to spot in the output.

use sched_types::TaskId;
use sim_dispatch::{
    EventKind, SimulationOutcome, SimulationReport, TraceEvent, CPU_LIMIT_TICKS, TICK_UNIT_SECS,
};
use std::thread;
use std::time::Duration;

/// ANSI color codes assigned to tasks, cycled by id
pub const COLOR_PALETTE: [&str; 6] = [
    "\x1b[31m", // red
    "\x1b[32m", // green
    "\x1b[33m", // yellow
    "\x1b[34m", // blue
    "\x1b[35m", // magenta
    "\x1b[36m", // cyan
];

/// ANSI reset code
pub const COLOR_RESET: &str = "\x1b[0m";

/// Returns the palette color for a task id
pub fn task_color(id: TaskId) -> &'static str {
    COLOR_PALETTE[(id.get() as usize - 1) % COLOR_PALETTE.len()]
}

/// Returns the human-readable label for an event kind
pub fn event_label(kind: EventKind) -> String {
    match kind {
        EventKind::RtStarted => "REAL-TIME task STARTED".to_string(),
        EventKind::RtFinished => "REAL-TIME task FINISHED".to_string(),
        EventKind::RtLimitTerminated => format!(
            "REAL-TIME task reached the {} s CPU limit, terminated",
            CPU_LIMIT_TICKS
        ),
        EventKind::UserStarted => "User task STARTED".to_string(),
        EventKind::UserResumed => "User task RESUMED".to_string(),
        EventKind::UserFinished => "User task FINISHED".to_string(),
        EventKind::UserLimitTerminated => format!(
            "User task reached the {} s CPU limit, terminated",
            CPU_LIMIT_TICKS
        ),
        EventKind::UserDemoted => "User task SUSPENDED, demoted one queue level".to_string(),
        EventKind::Idle => "No runnable task, CPU idle".to_string(),
    }
}

/// Renders one trace event as a console line
pub fn render_event(event: &TraceEvent, color: bool) -> String {
    match event.task {
        Some(snapshot) => {
            let line = format!(
                "[Time {:>2}] Task {} (priority={}, remaining={} s): {}",
                event.time,
                snapshot.id.get(),
                snapshot.priority,
                snapshot.remaining,
                event_label(event.kind),
            );
            if color {
                format!("{}{}{}", task_color(snapshot.id), line, COLOR_RESET)
            } else {
                line
            }
        }
        None => format!("[Time {:>2}] {}.", event.time, event_label(event.kind)),
    }
}

/// Renders the final tally line
pub fn render_report(report: &SimulationReport) -> String {
    format!(
        "All tasks completed. Total tasks: {}, ticks elapsed: {} ({} completed, {} limit-terminated, {} rejected, {} idle ticks)",
        report.total_tasks,
        report.ticks_elapsed,
        report.completed,
        report.limit_terminated,
        report.rejected,
        report.idle_ticks,
    )
}

/// Console presenter for a simulation outcome
///
/// Pacing, when enabled, sleeps between rendered ticks to make the replay
/// human-watchable; the trace itself is computed before any sleeping.
#[derive(Debug, Clone)]
pub struct ConsolePresenter {
    color: bool,
    pacing: Option<Duration>,
}

impl ConsolePresenter {
    /// Creates a presenter with color enabled and no pacing
    pub fn new() -> Self {
        Self {
            color: true,
            pacing: None,
        }
    }

    /// Enables or disables ANSI colors
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Sets a wall-clock delay inserted whenever simulated time advances
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = Some(pacing);
        self
    }

    /// Sets pacing to real time: one wall-clock tick unit per simulated tick
    pub fn with_real_time_pacing(self) -> Self {
        self.with_pacing(Duration::from_secs(TICK_UNIT_SECS))
    }

    /// Prints the whole trace and the final tally to stdout
    pub fn present(&self, outcome: &SimulationOutcome) {
        if outcome.report.total_tasks == 0 {
            println!("No tasks to run.");
            return;
        }
        let mut last_time = None;
        for event in &outcome.events {
            if let (Some(pacing), Some(last)) = (self.pacing, last_time) {
                if event.time > last {
                    thread::sleep(pacing);
                }
            }
            last_time = Some(event.time);
            println!("{}", render_event(event, self.color));
        }
        println!("{}", render_report(&outcome.report));
    }
}

impl Default for ConsolePresenter {
    fn default() -> Self {
        Self::new()
    }
}

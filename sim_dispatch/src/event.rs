//! Structured trace events and warnings
//!
//! The engine reports everything that happens as produced values: trace
//! events for expected outcomes (starts, finishes, demotions, idle ticks)
//! and warnings for conditions worth surfacing without being errors. The
//! presenter decides how, or whether, to render them.

use sched_types::{Priority, Task, TaskId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of trace event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    /// Real-time task acquired the CPU
    RtStarted,
    /// Real-time task completed its burst
    RtFinished,
    /// Real-time task hit the CPU-time cap with work left over
    RtLimitTerminated,
    /// User task executed its first tick
    UserStarted,
    /// User task picked up again after an earlier demotion
    UserResumed,
    /// User task completed its burst
    UserFinished,
    /// User task hit the CPU-time cap with work left over
    UserLimitTerminated,
    /// User task did not finish its tick's work and moved one level down
    UserDemoted,
    /// Nothing was runnable this tick
    Idle,
}

/// Task fields captured at the instant an event was emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSnapshot {
    /// Which task the event is about
    pub id: TaskId,
    /// Priority after the transition the event describes
    pub priority: Priority,
    /// Remaining required ticks at the time of the event
    pub remaining: u64,
}

/// One entry of the execution trace
///
/// `task` is `None` exactly for [`EventKind::Idle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceEvent {
    /// Simulated time the event is reported at
    pub time: u64,
    /// What happened
    pub kind: EventKind,
    /// The task involved, if any
    pub task: Option<TaskSnapshot>,
}

impl TraceEvent {
    /// Creates an idle-tick event
    pub fn idle(time: u64) -> Self {
        Self {
            time,
            kind: EventKind::Idle,
            task: None,
        }
    }

    /// Creates a task event snapshotting the record's current fields
    pub fn for_task(time: u64, kind: EventKind, task: &Task) -> Self {
        Self {
            time,
            kind,
            task: Some(TaskSnapshot {
                id: task.id,
                priority: task.priority,
                remaining: task.remaining_time,
            }),
        }
    }
}

/// Conditions reported by the engine without aborting the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Warning {
    /// A task carried a raw priority outside 0..=3 and was rejected at
    /// admission; it executed zero ticks and counts as finished
    InvalidPriority {
        /// The rejected task
        task_id: TaskId,
        /// The out-of-range raw value
        raw: i64,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::InvalidPriority { task_id, raw } => {
                write!(f, "{}: invalid priority {}, task rejected", task_id, raw)
            }
        }
    }
}

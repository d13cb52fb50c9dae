//! The schedulable unit of work and its lifecycle

use crate::{Priority, TaskId};
use serde::{Deserialize, Serialize};

/// Task lifecycle state
///
/// `Waiting -> Ready -> Running -> Finished`, driven exclusively by the
/// dispatch engine. `Finished` is terminal; no transition leaves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskState {
    /// Arrival time not yet reached
    Waiting,
    /// Enqueued, waiting for the CPU
    Ready,
    /// Executing this tick (or, for a real-time holder, across ticks)
    Running,
    /// Completed, limit-terminated, or rejected at admission
    Finished,
}

impl TaskState {
    /// Returns true for the terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskState::Finished)
    }
}

/// One line of the input task list, before admission
///
/// The priority is kept raw here: validation is an admission concern of the
/// engine, not a parsing concern of the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSpec {
    /// Tick at which the task becomes eligible to run
    pub arrival_time: u64,
    /// Raw priority as written in the input
    pub priority: i64,
    /// Total required CPU ticks
    pub burst_time: u64,
}

impl TaskSpec {
    /// Creates a task spec
    pub fn new(arrival_time: u64, priority: i64, burst_time: u64) -> Self {
        Self {
            arrival_time,
            priority,
            burst_time,
        }
    }
}

/// A task record in the registry arena
///
/// Mutable runtime fields (`priority`, `remaining_time`, `cpu_time_used`,
/// `state`) are only ever touched by the dispatch engine. All counters are
/// unsigned with saturating updates, so "remaining time below zero" is
/// unrepresentable rather than clamped after the fact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// 1-based input-order identity
    pub id: TaskId,
    /// Tick at which the task becomes eligible
    pub arrival_time: u64,
    /// Current priority class; user levels demote, real-time never moves
    pub priority: Priority,
    /// Total required CPU ticks, fixed at creation
    pub burst_time: u64,
    /// Ticks left to completion
    pub remaining_time: u64,
    /// Cumulative ticks actually executed
    pub cpu_time_used: u64,
    /// Lifecycle state
    pub state: TaskState,
}

impl Task {
    /// Builds the record for registry slot `index` from an input spec
    pub fn from_spec(index: usize, spec: &TaskSpec) -> Self {
        Self {
            id: TaskId::from_index(index),
            arrival_time: spec.arrival_time,
            priority: Priority::from_raw(spec.priority),
            burst_time: spec.burst_time,
            remaining_time: spec.burst_time,
            cpu_time_used: 0,
            state: TaskState::Waiting,
        }
    }

    /// Returns true until the task has executed its first tick
    pub fn is_first_run(&self) -> bool {
        self.remaining_time == self.burst_time
    }

    /// Applies one unit of simulated CPU time
    pub fn run_one_tick(&mut self) {
        self.remaining_time = self.remaining_time.saturating_sub(1);
        self.cpu_time_used = self.cpu_time_used.saturating_add(1);
    }

    /// Returns true once the cumulative CPU-time cap is reached
    pub fn reached_cpu_limit(&self, limit: u64) -> bool {
        self.cpu_time_used >= limit
    }
}

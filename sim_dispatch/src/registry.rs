//! Task registry arena
//!
//! Tasks live in a flat, input-ordered arena. Queues hold [`TaskId`]s that
//! map straight onto arena slots, never copies of the records, so there is
//! exactly one source of truth for every mutable field.

use crate::engine::MAX_TASKS;
use sched_types::{Task, TaskId, TaskSpec, TaskState};

/// Fixed collection of task records for one simulation run
///
/// The registry performs no validation beyond the capacity bound; the
/// loader reports capacity overruns to its caller, and priority validation
/// happens at admission inside the engine.
#[derive(Debug, Clone)]
pub struct TaskRegistry {
    tasks: Vec<Task>,
}

impl TaskRegistry {
    /// Builds the arena from input specs, in input order
    ///
    /// Specs beyond [`MAX_TASKS`] are ignored; the loader is responsible for
    /// reporting that condition before the engine ever sees the list.
    pub fn from_specs(specs: &[TaskSpec]) -> Self {
        let tasks = specs
            .iter()
            .take(MAX_TASKS)
            .enumerate()
            .map(|(index, spec)| Task::from_spec(index, spec))
            .collect();
        Self { tasks }
    }

    /// Returns the number of tasks in the arena
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns true if the arena is empty
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Returns the task record for an id
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.get(id.index())
    }

    /// Returns the mutable task record for an id
    pub fn get_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.get_mut(id.index())
    }

    /// Iterates over all task records in input order
    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    /// Returns the ids of tasks still in [`TaskState::Waiting`] whose
    /// arrival time has elapsed at `now`
    pub fn due_arrivals(&self, now: u64) -> Vec<TaskId> {
        self.tasks
            .iter()
            .filter(|task| task.state == TaskState::Waiting && task.arrival_time <= now)
            .map(|task| task.id)
            .collect()
    }
}

//! Run queues
//!
//! Simple FIFO queues over `VecDeque` for deterministic ordering. Queues
//! hold task ids, enqueued at the back and dequeued from the front; no
//! reordering criterion other than arrival exists anywhere.

use sched_types::{TaskId, UserLevel};
use std::collections::VecDeque;

/// FIFO queue of task ids
#[derive(Debug, Clone, Default)]
pub struct RunQueue {
    queue: VecDeque<TaskId>,
}

impl RunQueue {
    /// Creates an empty queue
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    /// Appends a task at the tail
    pub fn enqueue(&mut self, id: TaskId) {
        self.queue.push_back(id);
    }

    /// Removes and returns the head
    pub fn dequeue(&mut self) -> Option<TaskId> {
        self.queue.pop_front()
    }

    /// Returns true if the queue holds no tasks
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Returns the number of queued tasks
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Iterates over queued ids, head first
    pub fn iter(&self) -> impl Iterator<Item = &TaskId> {
        self.queue.iter()
    }
}

/// The three user-class feedback queues
///
/// Index 0 is the highest level (raw priority 1). Selection scans highest
/// first; demoted tasks join the tail of their new level, which yields
/// round-robin behavior at the lowest level.
#[derive(Debug, Clone, Default)]
pub struct UserQueues {
    levels: [RunQueue; 3],
}

impl UserQueues {
    /// Creates three empty level queues
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a task at the tail of its level's queue
    pub fn enqueue(&mut self, level: UserLevel, id: TaskId) {
        self.levels[level.queue_index()].enqueue(id);
    }

    /// Removes the head of the highest non-empty level
    pub fn dequeue_highest(&mut self) -> Option<TaskId> {
        for level in UserLevel::ALL {
            if let Some(id) = self.levels[level.queue_index()].dequeue() {
                return Some(id);
            }
        }
        None
    }

    /// Returns true if every level queue is empty
    pub fn is_empty(&self) -> bool {
        self.levels.iter().all(RunQueue::is_empty)
    }

    /// Returns the total number of queued tasks across levels
    pub fn len(&self) -> usize {
        self.levels.iter().map(RunQueue::len).sum()
    }

    /// Returns the queue for one level
    pub fn level(&self, level: UserLevel) -> &RunQueue {
        &self.levels[level.queue_index()]
    }
}

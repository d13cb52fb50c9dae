//! Unique identifiers for simulation entities

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Error for a task id of zero, which the 1-based scheme cannot represent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidTaskId;

impl fmt::Display for InvalidTaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task ids are 1-based; 0 is not a valid id")
    }
}

impl std::error::Error for InvalidTaskId {}

/// Unique identifier for a task
///
/// Task ids are positive integers assigned in input order, starting at 1.
/// They double as a stable handle into the registry arena: id N lives in
/// slot N - 1. Zero is unrepresentable: construction and deserialization
/// both go through [`TryFrom<u32>`], which rejects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct TaskId(u32);

impl TryFrom<u32> for TaskId {
    type Error = InvalidTaskId;

    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        if raw == 0 {
            return Err(InvalidTaskId);
        }
        Ok(Self(raw))
    }
}

impl From<TaskId> for u32 {
    fn from(id: TaskId) -> Self {
        id.0
    }
}

impl TaskId {
    /// Creates a task id from a 0-based registry slot index
    pub fn from_index(index: usize) -> Self {
        Self(index as u32 + 1)
    }

    /// Returns the 0-based registry slot this id refers to
    pub fn index(&self) -> usize {
        (self.0 - 1) as usize
    }

    /// Returns the raw 1-based id
    pub fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Task({})", self.0)
    }
}

/// Unique identifier for a simulation run
///
/// Each run of the dispatch engine is stamped with a fresh run id so that
/// traces and reports from different runs can be told apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(Uuid);

impl RunId {
    /// Creates a new random run ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a run ID from an existing UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "run:{}", self.0)
    }
}

//! The two-tier priority model
//!
//! Raw priorities in the input are integers:
//!
//! - `0`: real-time task, served strict-FCFS ahead of all user work
//! - `1`–`3`: user task in the three-level feedback queue (1 is highest)
//! - anything else: invalid, rejected at admission
//!
//! Real-time priority is fixed for the task's lifetime. A user task's level
//! only ever moves down (demotion), saturating at the lowest level, where
//! the feedback queue degenerates into round-robin.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three user-class feedback levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum UserLevel {
    /// Highest user level (raw priority 1)
    High,
    /// Middle user level (raw priority 2)
    Medium,
    /// Lowest user level (raw priority 3); round-robin floor
    Low,
}

impl UserLevel {
    /// All levels, highest first — the scan order of the dispatcher
    pub const ALL: [UserLevel; 3] = [UserLevel::High, UserLevel::Medium, UserLevel::Low];

    /// Creates a level from a raw priority in 1..=3
    pub fn from_raw(raw: i64) -> Option<Self> {
        match raw {
            1 => Some(UserLevel::High),
            2 => Some(UserLevel::Medium),
            3 => Some(UserLevel::Low),
            _ => None,
        }
    }

    /// Returns the raw priority value (1..=3)
    pub fn as_raw(&self) -> i64 {
        match self {
            UserLevel::High => 1,
            UserLevel::Medium => 2,
            UserLevel::Low => 3,
        }
    }

    /// Returns the 0-based queue index for this level
    pub fn queue_index(&self) -> usize {
        (self.as_raw() - 1) as usize
    }

    /// Returns the next level down, saturating at [`UserLevel::Low`]
    pub fn demoted(&self) -> Self {
        match self {
            UserLevel::High => UserLevel::Medium,
            UserLevel::Medium => UserLevel::Low,
            UserLevel::Low => UserLevel::Low,
        }
    }
}

/// Priority class of a task
///
/// `Invalid` carries the raw out-of-range value through to admission, where
/// the engine rejects the task with a warning. Keeping it representable (as
/// opposed to failing in the loader) matches the contract that priority
/// validation is an admission concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    /// Real-time class (raw 0); fixed for the task's lifetime
    RealTime,
    /// User class at one of three feedback levels (raw 1..=3)
    User(UserLevel),
    /// Out-of-range raw value; never enqueued
    Invalid(i64),
}

impl Priority {
    /// Classifies a raw input priority
    pub fn from_raw(raw: i64) -> Self {
        match raw {
            0 => Priority::RealTime,
            _ => match UserLevel::from_raw(raw) {
                Some(level) => Priority::User(level),
                None => Priority::Invalid(raw),
            },
        }
    }

    /// Returns the raw priority value
    pub fn as_raw(&self) -> i64 {
        match self {
            Priority::RealTime => 0,
            Priority::User(level) => level.as_raw(),
            Priority::Invalid(raw) => *raw,
        }
    }

    /// Returns true for the real-time class
    pub fn is_real_time(&self) -> bool {
        matches!(self, Priority::RealTime)
    }

    /// Returns the user level, if this is a user-class priority
    pub fn user_level(&self) -> Option<UserLevel> {
        match self {
            Priority::User(level) => Some(*level),
            _ => None,
        }
    }

    /// Returns the priority after one demotion step
    ///
    /// Only user-class priorities move; real-time priority is invariant.
    pub fn demoted(&self) -> Self {
        match self {
            Priority::User(level) => Priority::User(level.demoted()),
            other => *other,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_raw())
    }
}

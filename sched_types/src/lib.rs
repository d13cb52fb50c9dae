//! # Scheduler Core Types
//!
//! This crate defines the fundamental types shared by the SchedSim
//! simulation: task identity, priority classes, and the task record itself.
//!
//! ## Philosophy
//!
//! - **Explicit over implicit**: priority classes are typed, not bare ints.
//! - **Single source of truth**: queues reference tasks by id; the task
//!   record lives in exactly one place (the registry arena).
//! - **Determinism first**: nothing in this crate reads clocks or randomness,
//!   with the single exception of the run identifier stamped on reports.
//!
//! ## Key Types
//!
//! - [`TaskId`]: 1-based, input-order task identity
//! - [`RunId`]: unique identifier for one simulation run
//! - [`Priority`] / [`UserLevel`]: the two-tier priority model
//! - [`Task`] / [`TaskSpec`] / [`TaskState`]: the schedulable unit

pub mod ids;
pub mod priority;
pub mod task;

pub use ids::{InvalidTaskId, RunId, TaskId};
pub use priority::{Priority, UserLevel};
pub use task::{Task, TaskSpec, TaskState};

//! # Simulated Dispatch Engine
//!
//! This crate implements the two-tier CPU scheduler: a strict-priority FCFS
//! lane for real-time tasks layered over a three-level feedback queue for
//! user tasks, driven forward one tick at a time.
//!
//! ## Philosophy
//!
//! - **Determinism first**: same task list => same trace, tick for tick.
//!   No clocks, no randomness, no hidden yields.
//! - **Explicit ticks**: time only advances when [`DispatchEngine::tick`]
//!   is called; a tick is an atomic unit of simulation.
//! - **Produced events, not callbacks**: the engine emits a structured
//!   [`TraceEvent`] stream; presentation is someone else's concern.
//! - **Inspectable**: all scheduler state is accessible for tests.
//!
//! ## Scheduling discipline
//!
//! Per tick: admit arrivals, acquire a real-time holder if the CPU is free,
//! execute the holder (uninterruptible) or else the head of the highest
//! non-empty user queue for exactly one unit, then evaluate the outcome:
//! finish, limit-terminate, or demote-and-requeue. A tick with nothing
//! runnable is an observable idle tick, not an error.

pub mod engine;
pub mod event;
pub mod queues;
pub mod registry;

pub use engine::{
    DispatchEngine, SimulationOutcome, SimulationReport, CPU_LIMIT_TICKS, MAX_TASKS,
    TICK_UNIT_SECS,
};
pub use event::{EventKind, TaskSnapshot, TraceEvent, Warning};
pub use queues::{RunQueue, UserQueues};
pub use registry::TaskRegistry;

//! Cross-cutting scheduler properties
//!
//! These tests assert guarantees that must hold for every input, checked
//! over a handful of deliberately awkward task mixes: conservation of
//! tasks, monotone counters, real-time non-preemption, bounded demotion,
//! the CPU-time cap, and idle-tick correctness.

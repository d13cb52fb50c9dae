//! # Scheduler Scenario Tests
//!
//! This crate pins the observable behavior of the dispatch engine so it
//! does not drift accidentally over time.
//!
//! ## Structure
//!
//! - [`scenarios`]: golden end-to-end traces for canonical inputs, driven
//!   through the loader exactly as a real run would be
//! - [`properties`]: cross-cutting guarantees (conservation, monotonicity,
//!   non-preemption, demotion bounds, the CPU-time cap, idle correctness)

pub mod properties;
pub mod scenarios;

/// Common helpers for driving full simulations in tests
pub mod test_helpers {
    use sched_types::TaskSpec;
    use sim_dispatch::{DispatchEngine, SimulationOutcome};
    use task_loader::parse_task_list;

    /// Runs a simulation from raw task-list text, through the loader
    pub fn run_list(input: &str) -> SimulationOutcome {
        let list = parse_task_list(input);
        DispatchEngine::new(&list.specs).run()
    }

    /// Runs a simulation from `(arrival, priority, burst)` triples
    pub fn run_specs(specs: &[(u64, i64, u64)]) -> SimulationOutcome {
        DispatchEngine::new(&to_specs(specs)).run()
    }

    /// Builds an engine without running it, for step-wise inspection
    pub fn engine(specs: &[(u64, i64, u64)]) -> DispatchEngine {
        DispatchEngine::new(&to_specs(specs))
    }

    fn to_specs(specs: &[(u64, i64, u64)]) -> Vec<TaskSpec> {
        specs
            .iter()
            .map(|&(arrival, priority, burst)| TaskSpec::new(arrival, priority, burst))
            .collect()
    }
}

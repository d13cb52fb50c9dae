//! The dispatch engine
//!
//! One engine value owns all scheduling state for a run: the task registry,
//! the real-time queue, the three user queues, the CPU holder, and the
//! clock. Nothing is global; construct an engine, tick it (or [`run`] it to
//! completion), and read the trace off the outcome.
//!
//! [`run`]: DispatchEngine::run

use crate::event::{EventKind, TraceEvent, Warning};
use crate::queues::{RunQueue, UserQueues};
use crate::registry::TaskRegistry;
use sched_types::{Priority, RunId, TaskId, TaskSpec, TaskState};
use serde::{Deserialize, Serialize};

/// Hard cap on cumulative executed ticks per task
///
/// Applies uniformly to real-time and user tasks, independent of burst time.
pub const CPU_LIMIT_TICKS: u64 = 20;

/// Simulated seconds represented by one tick
pub const TICK_UNIT_SECS: u64 = 1;

/// Upper bound on the task collection size (a deployment constant of the
/// surrounding system, not of the algorithm)
pub const MAX_TASKS: usize = 128;

/// Final tally of one simulation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Identity of this run
    pub run_id: RunId,
    /// Number of tasks in the registry (rejected ones included)
    pub total_tasks: usize,
    /// Ticks elapsed until every task finished
    pub ticks_elapsed: u64,
    /// Tasks that completed their full burst
    pub completed: usize,
    /// Tasks force-finished at the CPU-time cap
    pub limit_terminated: usize,
    /// Tasks rejected at admission for an out-of-range priority
    pub rejected: usize,
    /// Ticks on which nothing was runnable
    pub idle_ticks: u64,
}

/// Everything a run produces: the ordered trace, warnings, and the tally
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationOutcome {
    /// Trace events in execution order
    pub events: Vec<TraceEvent>,
    /// Non-fatal conditions encountered during the run
    pub warnings: Vec<Warning>,
    /// Final tally
    pub report: SimulationReport,
}

/// Two-tier tick-driven scheduler
///
/// Real-time tasks (priority 0) run strict-FCFS and hold the CPU without
/// preemption until they finish or hit the CPU-time cap. User tasks
/// (priorities 1..=3) share the remaining ticks through a three-level
/// feedback queue: one tick per dispatch, demote on every non-completing
/// tick, round-robin at the lowest level.
pub struct DispatchEngine {
    run_id: RunId,
    registry: TaskRegistry,
    rt_queue: RunQueue,
    user_queues: UserQueues,
    /// Real-time task currently holding the CPU, if any
    rt_holder: Option<TaskId>,
    current_time: u64,
    finished: usize,
    completed: usize,
    limit_terminated: usize,
    rejected: usize,
    idle_ticks: u64,
    events: Vec<TraceEvent>,
    warnings: Vec<Warning>,
}

impl DispatchEngine {
    /// Creates an engine over an already-bounded task collection
    ///
    /// The loader enforces the [`MAX_TASKS`] capacity and reports overruns;
    /// the registry truncates again so the bound holds regardless of caller.
    pub fn new(specs: &[TaskSpec]) -> Self {
        Self {
            run_id: RunId::new(),
            registry: TaskRegistry::from_specs(specs),
            rt_queue: RunQueue::new(),
            user_queues: UserQueues::new(),
            rt_holder: None,
            current_time: 0,
            finished: 0,
            completed: 0,
            limit_terminated: 0,
            rejected: 0,
            idle_ticks: 0,
            events: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Runs the simulation to completion and returns the outcome
    pub fn run(mut self) -> SimulationOutcome {
        while !self.is_complete() {
            self.tick();
        }
        self.into_outcome()
    }

    /// Performs one atomic simulation tick
    ///
    /// Admission, real-time acquisition, selection, one unit of execution,
    /// outcome evaluation, then the time advance — in that order, with no
    /// suspension points in between.
    pub fn tick(&mut self) {
        let now = self.current_time;

        self.admit_arrivals(now);
        self.acquire_real_time(now);

        if let Some(id) = self.rt_holder {
            self.execute_real_time(id, now);
        } else if let Some(id) = self.user_queues.dequeue_highest() {
            self.execute_user(id, now);
        } else {
            // Observable idle tick: time still advances below.
            self.events.push(TraceEvent::idle(now));
            self.idle_ticks += 1;
        }

        self.current_time = now + 1;
    }

    /// Returns true once every task has reached a terminal state
    pub fn is_complete(&self) -> bool {
        self.finished >= self.registry.len()
    }

    /// Consumes the engine and returns the outcome accumulated so far
    pub fn into_outcome(self) -> SimulationOutcome {
        SimulationOutcome {
            events: self.events,
            warnings: self.warnings,
            report: SimulationReport {
                run_id: self.run_id,
                total_tasks: self.registry.len(),
                ticks_elapsed: self.current_time,
                completed: self.completed,
                limit_terminated: self.limit_terminated,
                rejected: self.rejected,
                idle_ticks: self.idle_ticks,
            },
        }
    }

    /// Moves due tasks out of `Waiting` into their class queue
    ///
    /// Out-of-range priorities are rejected here: the task is never
    /// enqueued, a warning is recorded, and it counts as finished so the
    /// termination check stays reachable.
    fn admit_arrivals(&mut self, now: u64) {
        for id in self.registry.due_arrivals(now) {
            let Some(task) = self.registry.get_mut(id) else {
                continue;
            };
            match task.priority {
                Priority::RealTime => {
                    task.state = TaskState::Ready;
                    self.rt_queue.enqueue(id);
                }
                Priority::User(level) => {
                    task.state = TaskState::Ready;
                    self.user_queues.enqueue(level, id);
                }
                Priority::Invalid(raw) => {
                    task.state = TaskState::Finished;
                    self.warnings.push(Warning::InvalidPriority { task_id: id, raw });
                    self.finished += 1;
                    self.rejected += 1;
                }
            }
        }
    }

    /// Hands the CPU to the next real-time task if it is free
    ///
    /// A holder keeps the CPU across ticks; later real-time arrivals wait
    /// FIFO behind it.
    fn acquire_real_time(&mut self, now: u64) {
        if self.rt_holder.is_some() {
            return;
        }
        if let Some(id) = self.rt_queue.dequeue() {
            self.rt_holder = Some(id);
            if let Some(task) = self.registry.get_mut(id) {
                task.state = TaskState::Running;
                self.events
                    .push(TraceEvent::for_task(now, EventKind::RtStarted, task));
            }
        }
    }

    /// Executes one tick of the real-time holder
    fn execute_real_time(&mut self, id: TaskId, now: u64) {
        let Some(task) = self.registry.get_mut(id) else {
            return;
        };
        task.run_one_tick();

        if task.remaining_time == 0 || task.reached_cpu_limit(CPU_LIMIT_TICKS) {
            task.state = TaskState::Finished;
            let kind = if task.reached_cpu_limit(CPU_LIMIT_TICKS) && task.remaining_time > 0 {
                EventKind::RtLimitTerminated
            } else {
                EventKind::RtFinished
            };
            // Completions are reported at the end of the consumed tick.
            self.events.push(TraceEvent::for_task(now + 1, kind, task));
            match kind {
                EventKind::RtLimitTerminated => self.limit_terminated += 1,
                _ => self.completed += 1,
            }
            self.finished += 1;
            self.rt_holder = None;
        }
        // Otherwise the holder stays Running and keeps the CPU; no event.
    }

    /// Executes one tick of a user task dequeued from the feedback queues
    fn execute_user(&mut self, id: TaskId, now: u64) {
        let Some(task) = self.registry.get_mut(id) else {
            return;
        };
        task.state = TaskState::Running;

        let start_kind = if task.is_first_run() {
            EventKind::UserStarted
        } else {
            EventKind::UserResumed
        };
        self.events
            .push(TraceEvent::for_task(now, start_kind, task));

        task.run_one_tick();

        if task.remaining_time == 0 || task.reached_cpu_limit(CPU_LIMIT_TICKS) {
            task.state = TaskState::Finished;
            let kind = if task.reached_cpu_limit(CPU_LIMIT_TICKS) && task.remaining_time > 0 {
                EventKind::UserLimitTerminated
            } else {
                EventKind::UserFinished
            };
            self.events.push(TraceEvent::for_task(now + 1, kind, task));
            match kind {
                EventKind::UserLimitTerminated => self.limit_terminated += 1,
                _ => self.completed += 1,
            }
            self.finished += 1;
        } else {
            // Not done: drop one level and rejoin at the tail.
            task.priority = task.priority.demoted();
            task.state = TaskState::Ready;
            self.events
                .push(TraceEvent::for_task(now + 1, EventKind::UserDemoted, task));
            match task.priority.user_level() {
                Some(level) => self.user_queues.enqueue(level, id),
                // A demoted task is user-class by construction; losing it
                // here would stall the run forever.
                None => unreachable!("demoted task {} has no user level", id),
            }
        }
    }

    /// Returns this run's identity
    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    /// Returns the current simulated time in ticks
    pub fn current_time(&self) -> u64 {
        self.current_time
    }

    /// Returns the real-time task currently holding the CPU
    pub fn rt_holder(&self) -> Option<TaskId> {
        self.rt_holder
    }

    /// Returns the task registry
    pub fn registry(&self) -> &TaskRegistry {
        &self.registry
    }

    /// Returns the real-time queue
    pub fn rt_queue(&self) -> &RunQueue {
        &self.rt_queue
    }

    /// Returns the user feedback queues
    pub fn user_queues(&self) -> &UserQueues {
        &self.user_queues
    }

    /// Returns the state of a task
    pub fn task_state(&self, id: TaskId) -> Option<TaskState> {
        self.registry.get(id).map(|task| task.state)
    }

    /// Returns the trace accumulated so far
    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    /// Returns the warnings accumulated so far
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sched_types::{Priority, UserLevel};

    fn engine(specs: &[(u64, i64, u64)]) -> DispatchEngine {
        let specs: Vec<TaskSpec> = specs
            .iter()
            .map(|&(arrival, priority, burst)| TaskSpec::new(arrival, priority, burst))
            .collect();
        DispatchEngine::new(&specs)
    }

    fn id(n: usize) -> TaskId {
        TaskId::from_index(n)
    }

    #[test]
    fn test_engine_creation() {
        let engine = engine(&[(0, 1, 2)]);
        assert_eq!(engine.current_time(), 0);
        assert_eq!(engine.rt_holder(), None);
        assert!(engine.events().is_empty());
        assert!(!engine.is_complete());
    }

    #[test]
    fn test_empty_task_list_is_immediately_complete() {
        let engine = engine(&[]);
        assert!(engine.is_complete());

        let outcome = engine.run();
        assert!(outcome.events.is_empty());
        assert_eq!(outcome.report.ticks_elapsed, 0);
        assert_eq!(outcome.report.total_tasks, 0);
        assert_eq!(outcome.report.idle_ticks, 0);
    }

    #[test]
    fn test_admission_routes_by_class() {
        let mut engine = engine(&[(0, 0, 3), (0, 2, 3), (5, 1, 3)]);
        engine.tick();

        // The rt task was admitted and immediately acquired.
        assert_eq!(engine.rt_holder(), Some(id(0)));
        // The user task sits in the Medium queue; it never ran this tick.
        assert_eq!(engine.user_queues().level(UserLevel::Medium).len(), 1);
        // The future arrival is still waiting.
        assert_eq!(engine.task_state(id(2)), Some(TaskState::Waiting));
    }

    #[test]
    fn test_rt_task_holds_cpu_to_completion() {
        let mut engine = engine(&[(0, 0, 3), (0, 1, 1)]);

        engine.tick();
        engine.tick();
        assert_eq!(engine.rt_holder(), Some(id(0)));
        // The user task never got the CPU while the holder was live.
        assert_eq!(engine.registry().get(id(1)).unwrap().cpu_time_used, 0);

        engine.tick();
        assert_eq!(engine.rt_holder(), None);
        assert_eq!(engine.task_state(id(0)), Some(TaskState::Finished));
    }

    #[test]
    fn test_later_rt_arrival_queues_behind_holder() {
        let mut engine = engine(&[(0, 0, 3), (1, 0, 2)]);

        engine.tick();
        engine.tick();
        // The second rt task arrived at tick 1 but must wait FIFO.
        assert_eq!(engine.rt_holder(), Some(id(0)));
        assert_eq!(engine.rt_queue().len(), 1);

        engine.tick();
        assert_eq!(engine.task_state(id(0)), Some(TaskState::Finished));

        // Next tick the queued rt task takes over.
        engine.tick();
        assert_eq!(engine.rt_holder(), Some(id(1)));
    }

    #[test]
    fn test_rt_start_and_finish_events() {
        let outcome = engine(&[(0, 0, 3)]).run();

        assert_eq!(outcome.events.len(), 2);
        assert_eq!(outcome.events[0].kind, EventKind::RtStarted);
        assert_eq!(outcome.events[0].time, 0);
        assert_eq!(outcome.events[0].task.unwrap().remaining, 3);
        assert_eq!(outcome.events[1].kind, EventKind::RtFinished);
        assert_eq!(outcome.events[1].time, 3);
        assert_eq!(outcome.events[1].task.unwrap().remaining, 0);
        assert_eq!(outcome.report.ticks_elapsed, 3);
    }

    #[test]
    fn test_rt_limit_termination() {
        let outcome = engine(&[(0, 0, 25)]).run();

        let last = outcome.events.last().unwrap();
        assert_eq!(last.kind, EventKind::RtLimitTerminated);
        assert_eq!(last.time, CPU_LIMIT_TICKS);
        assert_eq!(last.task.unwrap().remaining, 5);
        assert_eq!(outcome.report.limit_terminated, 1);
        assert_eq!(outcome.report.completed, 0);
    }

    #[test]
    fn test_user_task_demotes_and_requeues() {
        let mut engine = engine(&[(0, 1, 2)]);

        engine.tick();
        let task = engine.registry().get(id(0)).unwrap();
        assert_eq!(task.priority, Priority::User(UserLevel::Medium));
        assert_eq!(task.state, TaskState::Ready);
        assert_eq!(engine.user_queues().level(UserLevel::Medium).len(), 1);

        engine.tick();
        assert_eq!(engine.task_state(id(0)), Some(TaskState::Finished));
        assert!(engine.is_complete());
    }

    #[test]
    fn test_user_demotion_saturates_at_low() {
        let mut engine = engine(&[(0, 3, 5)]);

        for _ in 0..3 {
            engine.tick();
            let task = engine.registry().get(id(0)).unwrap();
            assert_eq!(task.priority, Priority::User(UserLevel::Low));
        }
    }

    #[test]
    fn test_demoted_task_is_requeued_not_lost() {
        // A task at the round-robin floor demotes in place on every
        // non-completing tick; it must rejoin a queue each time and the
        // run must still drain.
        let mut engine = engine(&[(0, 3, 4)]);

        for _ in 0..3 {
            engine.tick();
            assert_eq!(engine.user_queues().len(), 1);
            assert_eq!(engine.task_state(id(0)), Some(TaskState::Ready));
        }

        engine.tick();
        assert!(engine.user_queues().is_empty());
        assert_eq!(engine.task_state(id(0)), Some(TaskState::Finished));
        assert!(engine.is_complete());
    }

    #[test]
    fn test_user_started_vs_resumed_events() {
        let outcome = engine(&[(0, 1, 2)]).run();

        let kinds: Vec<EventKind> = outcome.events.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                EventKind::UserStarted,
                EventKind::UserDemoted,
                EventKind::UserResumed,
                EventKind::UserFinished,
            ]
        );
        // Demotion reports the post-demotion priority.
        assert_eq!(
            outcome.events[1].task.unwrap().priority,
            Priority::User(UserLevel::Medium)
        );
    }

    #[test]
    fn test_same_level_tasks_run_fifo() {
        let outcome = engine(&[(0, 1, 1), (0, 1, 1)]).run();

        assert_eq!(outcome.events[0].task.unwrap().id, id(0));
        assert_eq!(outcome.events[0].kind, EventKind::UserStarted);
        assert_eq!(outcome.events[1].kind, EventKind::UserFinished);
        assert_eq!(outcome.events[2].task.unwrap().id, id(1));
        assert_eq!(outcome.report.ticks_elapsed, 2);
    }

    #[test]
    fn test_idle_ticks_before_late_arrival() {
        let outcome = engine(&[(2, 1, 1)]).run();

        assert_eq!(outcome.events[0], TraceEvent::idle(0));
        assert_eq!(outcome.events[1], TraceEvent::idle(1));
        assert_eq!(outcome.events[2].kind, EventKind::UserStarted);
        assert_eq!(outcome.report.idle_ticks, 2);
        assert_eq!(outcome.report.ticks_elapsed, 3);
    }

    #[test]
    fn test_rt_preempts_all_user_queues() {
        // User task arrives first, rt task one tick later; once the rt task
        // is admitted it executes every tick until done.
        let mut engine = engine(&[(0, 1, 5), (1, 0, 2)]);

        engine.tick(); // user runs tick 0
        engine.tick(); // rt admitted + runs tick 1
        engine.tick(); // rt runs tick 2 and finishes

        let user = engine.registry().get(id(0)).unwrap();
        assert_eq!(user.cpu_time_used, 1);
        assert_eq!(engine.task_state(id(1)), Some(TaskState::Finished));
    }

    #[test]
    fn test_invalid_priority_rejected_and_counted() {
        let outcome = engine(&[(0, 4, 3), (0, 1, 1)]).run();

        assert_eq!(outcome.warnings.len(), 1);
        assert_eq!(
            outcome.warnings[0],
            Warning::InvalidPriority {
                task_id: id(0),
                raw: 4
            }
        );
        assert_eq!(outcome.report.rejected, 1);
        assert_eq!(outcome.report.completed, 1);
        // The rejected task appears in no trace event.
        assert!(outcome
            .events
            .iter()
            .all(|e| e.task.map_or(true, |s| s.id != id(0))));
        // And the run still terminates.
        assert_eq!(outcome.report.ticks_elapsed, 1);
    }

    #[test]
    fn test_invalid_priority_only_task_terminates() {
        let outcome = engine(&[(0, -1, 3)]).run();
        assert_eq!(outcome.report.total_tasks, 1);
        assert_eq!(outcome.report.rejected, 1);
        // The rejection tick has nothing runnable, so it is an observable
        // idle tick, not an empty trace.
        assert_eq!(outcome.events, vec![TraceEvent::idle(0)]);
        assert_eq!(outcome.report.idle_ticks, 1);
        assert_eq!(outcome.report.ticks_elapsed, 1);
    }

    #[test]
    fn test_cpu_limit_user_task() {
        let outcome = engine(&[(0, 2, 25)]).run();

        let last = outcome.events.last().unwrap();
        assert_eq!(last.kind, EventKind::UserLimitTerminated);
        assert_eq!(last.time, CPU_LIMIT_TICKS);
        assert_eq!(last.task.unwrap().remaining, 5);
        assert_eq!(outcome.report.ticks_elapsed, CPU_LIMIT_TICKS);
    }

    #[test]
    fn test_burst_exactly_at_limit_finishes_naturally() {
        let outcome = engine(&[(0, 0, 20)]).run();
        let last = outcome.events.last().unwrap();
        assert_eq!(last.kind, EventKind::RtFinished);
        assert_eq!(last.task.unwrap().remaining, 0);
    }

    #[test]
    fn test_zero_burst_task_consumes_one_tick() {
        let outcome = engine(&[(0, 1, 0)]).run();
        let kinds: Vec<EventKind> = outcome.events.iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![EventKind::UserStarted, EventKind::UserFinished]);
        assert_eq!(outcome.report.ticks_elapsed, 1);
    }

    #[test]
    fn test_deterministic_traces() {
        let specs = [(0, 1, 3), (1, 0, 2), (1, 3, 4), (2, 2, 1)];
        let first = engine(&specs).run();
        let second = engine(&specs).run();
        assert_eq!(first.events, second.events);
        assert_eq!(first.report.ticks_elapsed, second.report.ticks_elapsed);
    }

    #[test]
    fn test_report_tallies_add_up() {
        let outcome = engine(&[(0, 0, 2), (0, 1, 25), (0, 9, 1)]).run();
        let report = outcome.report;
        assert_eq!(report.total_tasks, 3);
        assert_eq!(
            report.completed + report.limit_terminated + report.rejected,
            report.total_tasks
        );
    }

    #[test]
    fn test_outcome_serde_round_trip() {
        let outcome = engine(&[(0, 1, 2), (0, 0, 1)]).run();
        let json = serde_json::to_string(&outcome).unwrap();
        let back: SimulationOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(outcome, back);
    }
}

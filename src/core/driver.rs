use average::Estimate;

use super::{
    event::ScheduleEvent,
    observer::Observer,
    state::{Pid, ProcessRecord, SimCtx, Ticks},
};
use crate::scheduler::Scheduler;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessOutcome {
    pub id: Pid,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    pub completion_time: Ticks,
    pub waiting_time: Ticks,
    // Set only by prediction-based policies
    pub predicted_burst: Option<Ticks>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    pub policy: &'static str,
    pub schedule: Vec<ScheduleEvent>,
    pub average_waiting_time: f64,
    pub outcomes: Vec<ProcessOutcome>,
}

impl SimulationResult {
    pub fn total_waiting_time(&self) -> Ticks {
        self.outcomes.iter().map(|o| o.waiting_time).sum()
    }
}

/// Runs one scheduling policy over one workload.
pub struct SchedCore<S: Scheduler> {
    pub scheduler: S,
}

impl<S: Scheduler> SchedCore<S> {
    pub fn new(scheduler: S) -> Self {
        Self { scheduler }
    }

    /// Every call builds a fresh context from the immutable records, so
    /// repeated runs never observe each other's mutable state.
    pub fn run(&mut self, records: &[ProcessRecord], observer: &mut dyn Observer) -> SimulationResult {
        let mut ctx = SimCtx::new(records, observer);
        self.scheduler.run(&mut ctx);

        let policy = self.scheduler.name();
        let outcomes: Vec<ProcessOutcome> = ctx
            .procs
            .iter()
            .map(|p| {
                let completion_time = p.completion_time.unwrap_or_else(|| {
                    panic!("{policy} finished with pid {} unfinished", p.record.id)
                });
                ProcessOutcome {
                    id: p.record.id,
                    arrival_time: p.record.arrival_time,
                    burst_time: p.record.burst_time,
                    completion_time,
                    waiting_time: completion_time - p.record.arrival_time - p.record.burst_time,
                    predicted_burst: p.predicted_burst,
                }
            })
            .collect();
        debug_assert_eq!(
            outcomes.iter().map(|o| o.waiting_time).sum::<Ticks>(),
            ctx.total_waiting
        );

        SimulationResult {
            policy,
            average_waiting_time: average_waiting(&outcomes),
            schedule: ctx.schedule,
            outcomes,
        }
    }
}

// Empty workloads average to zero rather than dividing by zero
fn average_waiting(outcomes: &[ProcessOutcome]) -> f64 {
    if outcomes.is_empty() {
        return 0.0;
    }
    outcomes
        .iter()
        .map(|o| o.waiting_time as f64)
        .collect::<average::Mean>()
        .estimate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::observer::NullObserver, scheduler::FcfsScheduler};

    #[test]
    fn empty_workload_averages_to_zero() {
        let mut core = SchedCore::new(FcfsScheduler);
        let result = core.run(&[], &mut NullObserver);

        assert!(result.schedule.is_empty());
        assert!(result.outcomes.is_empty());
        assert_eq!(result.average_waiting_time, 0.0);
    }

    struct Stalled;

    impl Scheduler for Stalled {
        fn name(&self) -> &'static str {
            "stalled"
        }

        fn run(&mut self, ctx: &mut SimCtx<'_>) {
            ctx.admit_arrived();
        }
    }

    #[test]
    #[should_panic(expected = "stalled finished with pid 4 unfinished")]
    fn unfinished_process_is_reported() {
        let records = [ProcessRecord::new(4, 0, 2)];
        SchedCore::new(Stalled).run(&records, &mut NullObserver);
    }

    #[test]
    fn outcomes_follow_record_order() {
        let records = [ProcessRecord::new(7, 0, 2), ProcessRecord::new(3, 1, 1)];
        let result = SchedCore::new(FcfsScheduler).run(&records, &mut NullObserver);

        let ids: Vec<Pid> = result.outcomes.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![7, 3]);
        assert_eq!(result.outcomes[1].completion_time, 3);
        assert_eq!(result.total_waiting_time(), 1);
        assert_eq!(result.policy, "FCFS");
    }
}

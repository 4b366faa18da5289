use super::workload::Workload;
use crate::{
    config::SimConfig,
    core::{LogObserver, NullObserver, Observer, ProcessRecord, SchedCore, SimulationResult},
    error::SimError,
    scheduler::{FcfsScheduler, RoundRobinScheduler, Scheduler, SjfScheduler, SrtfScheduler},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Policy {
    Fcfs,
    RoundRobin,
    Srtf,
    Sjf,
}

impl Policy {
    pub const ALL: [Policy; 4] = [Policy::Fcfs, Policy::RoundRobin, Policy::Srtf, Policy::Sjf];

    pub fn name(self) -> &'static str {
        match self {
            Policy::Fcfs => "FCFS",
            Policy::RoundRobin => "RR",
            Policy::Srtf => "SRTF",
            Policy::Sjf => "SJF",
        }
    }

    pub fn file_name(self) -> String {
        format!("{}.txt", self.name())
    }
}

/// Runs every policy over one workload, each on its own copy of the
/// process table.
pub struct Sim {
    workload: Workload,
    config: SimConfig,
    trace: bool,
}

impl Sim {
    pub fn new(workload: Workload, config: SimConfig) -> Result<Self, SimError> {
        config.validate()?;
        if let Err(position) = workload.horizon() {
            return Err(SimError::InputFormat {
                line: position,
                reason: "simulated time would overflow".into(),
            });
        }
        Ok(Self {
            workload,
            config,
            trace: false,
        })
    }

    /// Forward admission/dispatch/completion events to the `log` facade.
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    pub fn run(&self, policy: Policy) -> SimulationResult {
        let mut log_observer = LogObserver::new(policy.name());
        let mut null_observer = NullObserver;
        let observer: &mut dyn Observer = if self.trace {
            &mut log_observer
        } else {
            &mut null_observer
        };
        self.run_observed(policy, observer)
    }

    pub fn run_observed(&self, policy: Policy, observer: &mut dyn Observer) -> SimulationResult {
        log::info!(
            "simulating {} over {} processes",
            policy.name(),
            self.workload.len()
        );

        let records = self.workload.records();
        let result = match policy {
            Policy::Fcfs => run_with(FcfsScheduler, records, observer),
            Policy::RoundRobin => run_with(
                RoundRobinScheduler::new(self.config.time_quantum),
                records,
                observer,
            ),
            Policy::Srtf => run_with(SrtfScheduler, records, observer),
            Policy::Sjf => run_with(
                SjfScheduler::new(self.config.alpha, self.config.initial_guess),
                records,
                observer,
            ),
        };

        log::info!(
            "{}: {} switches, average waiting time {:.2}",
            result.policy,
            result.schedule.len(),
            result.average_waiting_time
        );
        result
    }

    /// All policies in the fixed order FCFS, RR, SRTF, SJF.
    pub fn run_all(&self) -> Vec<(Policy, SimulationResult)> {
        Policy::ALL
            .into_iter()
            .map(|policy| (policy, self.run(policy)))
            .collect()
    }
}

fn run_with<S: Scheduler>(
    scheduler: S,
    records: &[ProcessRecord],
    observer: &mut dyn Observer,
) -> SimulationResult {
    SchedCore::new(scheduler).run(records, observer)
}

use super::{event::TraceEvent, state::Ticks};
use crate::core::Pid;

/// Hook invoked by the simulation context at admission, dispatch, execution,
/// completion and idle gaps.
pub trait Observer {
    fn observe(&mut self, now: Ticks, event: TraceEvent);
}

#[derive(Debug, Default)]
pub struct NullObserver;

impl Observer for NullObserver {
    fn observe(&mut self, _now: Ticks, _event: TraceEvent) {}
}

/// Forwards every trace event to the `log` facade under the policy's name.
#[derive(Debug)]
pub struct LogObserver {
    policy: &'static str,
}

impl LogObserver {
    pub fn new(policy: &'static str) -> Self {
        Self { policy }
    }
}

impl Observer for LogObserver {
    fn observe(&mut self, now: Ticks, event: TraceEvent) {
        match event {
            TraceEvent::Completed { pid, waiting } => {
                log::debug!("[{}] t={} pid {} completed, waited {}", self.policy, now, pid, waiting)
            }
            TraceEvent::Dispatched { pid } => {
                log::debug!("[{}] t={} switch to pid {}", self.policy, now, pid)
            }
            other => log::trace!("[{}] t={} {:?}", self.policy, now, other),
        }
    }
}

/// Keeps the whole trace in memory.
#[derive(Debug, Default)]
pub struct Recorder {
    pub events: Vec<(Ticks, TraceEvent)>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total ticks executed by `pid` across all of its slices.
    pub fn executed(&self, pid: Pid) -> Ticks {
        self.events
            .iter()
            .filter_map(|(_, event)| match event {
                TraceEvent::Executed { pid: p, ticks } if *p == pid => Some(*ticks),
                _ => None,
            })
            .sum()
    }

    /// Execution slices in time order as `(start, pid, ticks)`.
    pub fn slices(&self) -> Vec<(Ticks, Pid, Ticks)> {
        self.events
            .iter()
            .filter_map(|(now, event)| match event {
                TraceEvent::Executed { pid, ticks } => Some((*now, *pid, *ticks)),
                _ => None,
            })
            .collect()
    }
}

impl Observer for Recorder {
    fn observe(&mut self, now: Ticks, event: TraceEvent) {
        if let Some((last, _)) = self.events.last() {
            debug_assert!(*last <= now, "Trace went backwards: {last} -> {now}");
        }
        self.events.push((now, event));
    }
}

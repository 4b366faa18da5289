use std::fmt;

use crate::core::{Pid, Ticks};

/// The CPU switches to (or resumes) `pid` at `time`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleEvent {
    pub time: Ticks,
    pub pid: Pid,
}

impl ScheduleEvent {
    pub fn new(time: Ticks, pid: Pid) -> Self {
        Self { time, pid }
    }
}

impl fmt::Display for ScheduleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.time, self.pid)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceEvent {
    Admitted {
        pid: Pid,
    },
    Dispatched {
        pid: Pid,
    },
    Executed {
        pid: Pid,
        ticks: Ticks,
    },
    Completed {
        pid: Pid,
        waiting: Ticks,
    },
    // No process ready until `until`
    Idle {
        until: Ticks,
    },
}

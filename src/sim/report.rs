use std::{fmt::Write as _, fs, path::Path};

use super::driver::Policy;
use crate::{core::SimulationResult, error::SimError};

/// One `(time, pid)` line per switch, then the average waiting time.
pub fn render(result: &SimulationResult) -> String {
    let mut out = String::new();
    for event in &result.schedule {
        let _ = writeln!(out, "{event}");
    }
    let _ = writeln!(
        out,
        "average waiting time {:.2}",
        result.average_waiting_time
    );
    out
}

pub fn write_report(
    dir: impl AsRef<Path>,
    policy: Policy,
    result: &SimulationResult,
) -> Result<(), SimError> {
    let path = dir.as_ref().join(policy.file_name());
    fs::write(&path, render(result))?;
    log::debug!("wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ScheduleEvent;

    #[test]
    fn renders_schedule_then_average() {
        let result = SimulationResult {
            policy: "FCFS",
            schedule: vec![
                ScheduleEvent::new(0, 1),
                ScheduleEvent::new(5, 2),
                ScheduleEvent::new(8, 3),
            ],
            average_waiting_time: 10.0 / 3.0,
            outcomes: Vec::new(),
        };
        assert_eq!(
            render(&result),
            "(0, 1)\n(5, 2)\n(8, 3)\naverage waiting time 3.33\n"
        );
    }

    #[test]
    fn empty_result_renders_zero_average() {
        let result = SimulationResult {
            policy: "RR",
            schedule: Vec::new(),
            average_waiting_time: 0.0,
            outcomes: Vec::new(),
        };
        assert_eq!(render(&result), "average waiting time 0.00\n");
    }
}

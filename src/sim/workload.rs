use rand::prelude::*;
use std::{fs, path::Path};

use crate::{
    core::{Pid, ProcessRecord, Ticks},
    error::SimError,
};

/// Arrival-sorted process list shared read-only by every policy run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Workload {
    records: Vec<ProcessRecord>,
}

impl Workload {
    /// Stable sort by arrival; equal arrivals keep their input order.
    pub fn new(mut records: Vec<ProcessRecord>) -> Self {
        records.sort_by_key(|r| r.arrival_time);
        Self { records }
    }

    pub fn records(&self) -> &[ProcessRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Latest possible completion time, or the 1-based position of the first
    /// record that pushes it past `Ticks::MAX`.
    pub fn horizon(&self) -> Result<Ticks, usize> {
        let mut horizon = Horizon::default();
        for (index, record) in self.records.iter().enumerate() {
            horizon.extend(record).ok_or(index + 1)?;
        }
        Ok(horizon.end())
    }
}

/// Every policy here is work-conserving, so no process completes later than
/// the latest arrival plus the sum of all bursts.
#[derive(Debug, Default, Clone, Copy)]
struct Horizon {
    max_arrival: Ticks,
    total_burst: Ticks,
}

impl Horizon {
    fn extend(&mut self, record: &ProcessRecord) -> Option<Ticks> {
        let max_arrival = self.max_arrival.max(record.arrival_time);
        let total_burst = self.total_burst.checked_add(record.burst_time)?;
        let end = max_arrival.checked_add(total_burst)?;
        self.max_arrival = max_arrival;
        self.total_burst = total_burst;
        Some(end)
    }

    fn end(&self) -> Ticks {
        self.max_arrival + self.total_burst
    }
}

/// Parse `id arrival burst` lines, preserving input order.
pub fn parse_workload(input: &str) -> Result<Vec<ProcessRecord>, SimError> {
    let mut records = Vec::new();
    let mut horizon = Horizon::default();

    for (index, line) in input.lines().enumerate() {
        let line_no = index + 1;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            continue;
        }
        if tokens.len() != 3 {
            return Err(SimError::InputFormat {
                line: line_no,
                reason: format!("expected 3 fields, found {}", tokens.len()),
            });
        }

        let field = |token: &str, name: &str| -> Result<u64, SimError> {
            token.parse::<u64>().map_err(|_| SimError::InputFormat {
                line: line_no,
                reason: format!("{name} `{token}` is not a non-negative integer"),
            })
        };
        let id: Pid = field(tokens[0], "id")?;
        let arrival_time: Ticks = field(tokens[1], "arrival time")?;
        let burst_time: Ticks = field(tokens[2], "burst time")?;
        if burst_time == 0 {
            return Err(SimError::InputFormat {
                line: line_no,
                reason: "burst time must be positive".into(),
            });
        }

        let record = ProcessRecord::new(id, arrival_time, burst_time);
        if horizon.extend(&record).is_none() {
            return Err(SimError::InputFormat {
                line: line_no,
                reason: "simulated time would overflow".into(),
            });
        }
        records.push(record);
    }

    Ok(records)
}

pub fn read_workload(path: impl AsRef<Path>) -> Result<Vec<ProcessRecord>, SimError> {
    let input = fs::read_to_string(path)?;
    parse_workload(&input)
}

/// Synthetic workload: each tick a process arrives with probability
/// `p_arrival`, short with probability `p_short`.
pub fn bernoulli_workload(
    ticks: Ticks,
    p_arrival: f64,
    p_short: f64,
    short_ticks: Ticks,
    long_ticks: Ticks,
    seed: u64,
) -> Vec<ProcessRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut records = Vec::new();

    for t in 0..ticks {
        if rng.random::<f64>() < p_arrival {
            let burst_time = if rng.random::<f64>() < p_short {
                short_ticks
            } else {
                long_ticks
            };

            records.push(ProcessRecord::new(records.len() as Pid + 1, t, burst_time));
        }
    }

    records
}

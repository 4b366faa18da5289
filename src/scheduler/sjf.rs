use rustc_hash::FxHashMap;

use super::{Scheduler, SimCtx};
use crate::core::{Pid, Priority, ProcessRecord, ReadyQueue, Ticks};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Sample {
    prediction: Ticks,
    burst: Ticks,
}

/// Exponentially smoothed burst-time estimates keyed by process id.
#[derive(Debug)]
pub struct Predictor {
    alpha: f64,
    initial_guess: Ticks,
    history: FxHashMap<Pid, Sample>,
}

impl Predictor {
    pub fn new(alpha: f64, initial_guess: Ticks) -> Self {
        Self {
            alpha,
            initial_guess,
            history: FxHashMap::default(),
        }
    }

    /// Predict the burst of `record` from the previous burst and prediction
    /// seen for the same id, then remember this one for the next sighting.
    pub fn predict(&mut self, record: &ProcessRecord) -> Ticks {
        let prediction = match self.history.get(&record.id) {
            Some(last) => self.smooth(last.burst, last.prediction),
            None => self.initial_guess,
        };
        self.history.insert(
            record.id,
            Sample {
                prediction,
                burst: record.burst_time,
            },
        );
        prediction
    }

    pub fn last_prediction(&self, pid: Pid) -> Option<Ticks> {
        self.history.get(&pid).map(|s| s.prediction)
    }

    // Halves round to even
    fn smooth(&self, burst: Ticks, prediction: Ticks) -> Ticks {
        let estimate = self.alpha * burst as f64 + (1.0 - self.alpha) * prediction as f64;
        estimate.round_ties_even() as Ticks
    }
}

/// Non-preemptive shortest-job-first ordered by predicted, not actual, burst.
pub struct SjfScheduler {
    alpha: f64,
    initial_guess: Ticks,
}

impl SjfScheduler {
    pub fn new(alpha: f64, initial_guess: Ticks) -> Self {
        assert!(
            (0.0..=1.0).contains(&alpha),
            "Smoothing factor must lie in [0, 1]"
        );
        Self {
            alpha,
            initial_guess,
        }
    }
}

impl Scheduler for SjfScheduler {
    fn name(&self) -> &'static str {
        "SJF"
    }

    fn run(&mut self, ctx: &mut SimCtx<'_>) {
        // History never outlives a run
        let mut predictor = Predictor::new(self.alpha, self.initial_guess);
        let mut ready = ReadyQueue::new_priq();

        loop {
            for slot in ctx.admit_arrived() {
                let record = ctx.proc(slot).record;
                let prediction = predictor.predict(&record);
                ctx.proc_mut(slot).predicted_burst = Some(prediction);
                ready.push_priq(
                    slot,
                    Priority {
                        key: prediction,
                        arrival_time: record.arrival_time,
                        pid: record.id,
                        slot,
                    },
                );
            }

            let Some(slot) = ready.pop() else {
                match ctx.next_arrival() {
                    Some(arrival) => {
                        ctx.idle_until(arrival);
                        continue;
                    }
                    None => break,
                }
            };

            // Runs for its actual burst; the prediction only orders selection
            let burst = ctx.proc(slot).record.burst_time;
            ctx.dispatch(slot);
            ctx.execute(slot, burst);
            ctx.complete(slot);
        }
    }
}

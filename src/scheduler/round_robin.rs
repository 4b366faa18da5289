use super::{Scheduler, SimCtx};
use crate::core::{ReadyQueue, Ticks};

pub struct RoundRobinScheduler {
    quantum: Ticks,
}

impl RoundRobinScheduler {
    pub fn new(quantum: Ticks) -> Self {
        assert!(quantum > 0, "Round-robin requires a positive time quantum");
        Self { quantum }
    }

    fn admit(ctx: &mut SimCtx<'_>, ready: &mut ReadyQueue) {
        for slot in ctx.admit_arrived() {
            ready.push_fifo(slot);
        }
    }
}

impl Scheduler for RoundRobinScheduler {
    fn name(&self) -> &'static str {
        "RR"
    }

    fn run(&mut self, ctx: &mut SimCtx<'_>) {
        let mut ready = ReadyQueue::new_fifo();

        loop {
            if ready.is_empty() {
                match ctx.next_arrival() {
                    Some(arrival) => ctx.idle_until(arrival),
                    None => break,
                }
                Self::admit(ctx, &mut ready);
                continue;
            }

            let Some(slot) = ready.pop() else { break };
            ctx.dispatch(slot);
            ctx.execute(slot, self.quantum);

            // Arrivals during the slice queue ahead of the preempted process
            Self::admit(ctx, &mut ready);

            if ctx.proc(slot).is_completed() {
                ctx.complete(slot);
            } else {
                ready.push_fifo(slot);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{NullObserver, ProcessRecord, Recorder, ScheduleEvent, SchedCore};

    #[test]
    fn arrival_during_slice_runs_before_requeued_process() {
        let records = [ProcessRecord::new(1, 0, 4), ProcessRecord::new(2, 1, 2)];
        let result = SchedCore::new(RoundRobinScheduler::new(2)).run(&records, &mut NullObserver);

        assert_eq!(
            result.schedule,
            vec![
                ScheduleEvent::new(0, 1),
                ScheduleEvent::new(2, 2),
                ScheduleEvent::new(4, 1),
            ]
        );
        let waits: Vec<Ticks> = result.outcomes.iter().map(|o| o.waiting_time).collect();
        assert_eq!(waits, vec![2, 1]);
        assert_eq!(result.average_waiting_time, 1.5);
    }

    #[test]
    fn short_final_slice_uses_remaining_time() {
        let records = [ProcessRecord::new(1, 0, 5)];
        let mut rec = Recorder::new();
        let result = SchedCore::new(RoundRobinScheduler::new(2)).run(&records, &mut rec);

        assert_eq!(rec.slices(), vec![(0, 1, 2), (2, 1, 2), (4, 1, 1)]);
        assert_eq!(result.outcomes[0].completion_time, 5);
        assert_eq!(result.average_waiting_time, 0.0);
    }

    #[test]
    fn idle_gap_before_first_and_later_arrivals() {
        let records = [ProcessRecord::new(1, 3, 1), ProcessRecord::new(2, 10, 3)];
        let result = SchedCore::new(RoundRobinScheduler::new(2)).run(&records, &mut NullObserver);

        assert_eq!(
            result.schedule,
            vec![
                ScheduleEvent::new(3, 1),
                ScheduleEvent::new(10, 2),
                ScheduleEvent::new(12, 2),
            ]
        );
        assert_eq!(result.average_waiting_time, 0.0);
    }

    #[test]
    fn every_process_admitted_exactly_once() {
        let records = [
            ProcessRecord::new(1, 0, 3),
            ProcessRecord::new(2, 0, 3),
            ProcessRecord::new(3, 1, 1),
        ];
        let mut rec = Recorder::new();
        let result = SchedCore::new(RoundRobinScheduler::new(2)).run(&records, &mut rec);

        // 0:p1 2:p2 4:p3 5:p1 6:p2
        let pids: Vec<u64> = result.schedule.iter().map(|e| e.pid).collect();
        assert_eq!(pids, vec![1, 2, 3, 1, 2]);
        for r in &records {
            assert_eq!(rec.executed(r.id), r.burst_time);
        }
    }
}

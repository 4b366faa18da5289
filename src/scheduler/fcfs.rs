use super::{Scheduler, SimCtx};

pub struct FcfsScheduler;

impl Scheduler for FcfsScheduler {
    fn name(&self) -> &'static str {
        "FCFS"
    }

    fn run(&mut self, ctx: &mut SimCtx<'_>) {
        for slot in 0..ctx.procs.len() {
            let record = ctx.proc(slot).record;
            ctx.idle_until(record.arrival_time);
            ctx.admit_arrived();

            ctx.dispatch(slot);
            ctx.execute(slot, record.burst_time);
            ctx.complete(slot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{NullObserver, ProcessRecord, ScheduleEvent, SchedCore};

    #[test]
    fn runs_in_arrival_order() {
        let records = [
            ProcessRecord::new(1, 0, 5),
            ProcessRecord::new(2, 1, 3),
            ProcessRecord::new(3, 2, 8),
        ];
        let result = SchedCore::new(FcfsScheduler).run(&records, &mut NullObserver);

        assert_eq!(
            result.schedule,
            vec![
                ScheduleEvent::new(0, 1),
                ScheduleEvent::new(5, 2),
                ScheduleEvent::new(8, 3),
            ]
        );
        assert_eq!(result.total_waiting_time(), 10);
        assert!((result.average_waiting_time - 10.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn idle_gap_advances_clock_to_arrival() {
        let records = [ProcessRecord::new(1, 0, 2), ProcessRecord::new(2, 6, 1)];
        let result = SchedCore::new(FcfsScheduler).run(&records, &mut NullObserver);

        assert_eq!(
            result.schedule,
            vec![ScheduleEvent::new(0, 1), ScheduleEvent::new(6, 2)]
        );
        assert_eq!(result.average_waiting_time, 0.0);
        assert!(result.outcomes.iter().all(|o| o.predicted_burst.is_none()));
    }
}

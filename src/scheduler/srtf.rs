use super::{Scheduler, SimCtx};
use crate::core::{Priority, ReadyQueue, Slot, Ticks};

/// Preemptive shortest-remaining-time-first. Preemption is decided per tick;
/// since only an arrival can change the order, the selected process runs in
/// one step up to the next arrival.
pub struct SrtfScheduler;

impl SrtfScheduler {
    fn push(ctx: &SimCtx<'_>, ready: &mut ReadyQueue, slot: Slot) {
        let proc = ctx.proc(slot);
        ready.push_priq(
            slot,
            Priority {
                key: proc.remaining_time,
                arrival_time: proc.record.arrival_time,
                pid: proc.record.id,
                slot,
            },
        );
    }
}

impl Scheduler for SrtfScheduler {
    fn name(&self) -> &'static str {
        "SRTF"
    }

    fn run(&mut self, ctx: &mut SimCtx<'_>) {
        let mut ready = ReadyQueue::new_priq();
        // Process that held the CPU during the previous slice
        let mut running: Option<Slot> = None;

        loop {
            // All simultaneous arrivals are queued before the next selection
            for slot in ctx.admit_arrived() {
                Self::push(ctx, &mut ready, slot);
            }

            let Some(slot) = ready.pop() else {
                match ctx.next_arrival() {
                    Some(arrival) => {
                        ctx.idle_until(arrival);
                        running = None;
                        continue;
                    }
                    None => break,
                }
            };

            if running != Some(slot) {
                ctx.dispatch(slot);
            }
            // Admission left only arrivals strictly after `now`
            let slice = ctx
                .next_arrival()
                .map_or(Ticks::MAX, |arrival| arrival - ctx.now);
            ctx.execute(slot, slice);

            if ctx.proc(slot).is_completed() {
                ctx.complete(slot);
                running = None;
            } else {
                Self::push(ctx, &mut ready, slot);
                running = Some(slot);
            }
        }
    }
}

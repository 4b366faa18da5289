use keyed_priority_queue::KeyedPriorityQueue;
use std::{cmp::Ordering, collections::VecDeque};

use super::{
    event::{ScheduleEvent, TraceEvent},
    observer::Observer,
};

// Index into the per-run process table
pub type Slot = usize;
pub type Pid = u64;
pub type Ticks = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessRecord {
    pub id: Pid,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
}

impl ProcessRecord {
    pub fn new(id: Pid, arrival_time: Ticks, burst_time: Ticks) -> Self {
        Self {
            id,
            arrival_time,
            burst_time,
        }
    }
}

/// Mutable scheduling state of one process, owned by exactly one run.
#[derive(Debug, Clone)]
pub struct ProcState {
    pub record: ProcessRecord,
    pub remaining_time: Ticks,
    pub predicted_burst: Option<Ticks>,
    pub executed: Ticks,
    pub completion_time: Option<Ticks>,
}

impl ProcState {
    fn fresh(record: ProcessRecord) -> Self {
        Self {
            record,
            remaining_time: record.burst_time,
            predicted_burst: None,
            executed: 0,
            completion_time: None,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.remaining_time == 0
    }
}

/// Total order for priority ready queues: key, then arrival, then pid, then slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Priority {
    pub key: Ticks,
    pub arrival_time: Ticks,
    pub pid: Pid,
    pub slot: Slot,
}

impl Priority {
    fn tuple(&self) -> (Ticks, Ticks, Pid, Slot) {
        (self.key, self.arrival_time, self.pid, self.slot)
    }
}

// KeyedPriorityQueue is a max-heap, so we need to flip-flop Priority's Ord
impl PartialOrd for Priority {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Priority {
    fn cmp(&self, other: &Self) -> Ordering {
        other.tuple().cmp(&self.tuple())
    }
}

#[derive(Debug)]
pub enum ReadyQueue {
    Fifo {
        slots: VecDeque<Slot>,
    },
    Priq {
        slots: KeyedPriorityQueue<Slot, Priority>,
    },
}

impl ReadyQueue {
    pub fn new_fifo() -> Self {
        Self::Fifo {
            slots: VecDeque::new(),
        }
    }

    pub fn new_priq() -> Self {
        Self::Priq {
            slots: KeyedPriorityQueue::new(),
        }
    }

    pub fn contains(&self, slot: Slot) -> bool {
        match self {
            Self::Fifo { slots } => slots.contains(&slot),
            Self::Priq { slots } => slots.get_priority(&slot).is_some(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Fifo { slots } => slots.len(),
            Self::Priq { slots } => slots.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn push_fifo(&mut self, slot: Slot) {
        debug_assert!(!self.contains(slot), "Slot {slot} already enqueued");
        match self {
            Self::Fifo { slots } => slots.push_back(slot),
            Self::Priq { .. } => panic!("Attempted FIFO push on a priority queue"),
        }
    }

    pub fn push_priq(&mut self, slot: Slot, priority: Priority) {
        debug_assert!(!self.contains(slot), "Slot {slot} already enqueued");
        match self {
            Self::Priq { slots } => {
                slots.push(slot, priority);
            }
            Self::Fifo { .. } => panic!("Attempted priority push on a FIFO queue"),
        }
    }

    pub fn pop(&mut self) -> Option<Slot> {
        match self {
            Self::Fifo { slots } => slots.pop_front(),
            Self::Priq { slots } => slots.pop().map(|(slot, _)| slot),
        }
    }
}

/// Per-run simulation context: clock, private process table copy, admission
/// cursor and the schedule being accumulated.
pub struct SimCtx<'a> {
    pub now: Ticks,
    pub procs: Vec<ProcState>,
    pub schedule: Vec<ScheduleEvent>,
    pub total_waiting: Ticks,
    observer: &'a mut dyn Observer,

    // Next slot to admit; procs are sorted by arrival
    cursor: Slot,
}

impl<'a> SimCtx<'a> {
    pub fn new(records: &[ProcessRecord], observer: &'a mut dyn Observer) -> Self {
        debug_assert!(
            records
                .windows(2)
                .all(|w| w[0].arrival_time <= w[1].arrival_time),
            "Process records must be sorted by arrival time"
        );

        Self {
            now: 0,
            procs: records.iter().copied().map(ProcState::fresh).collect(),
            schedule: Vec::new(),
            total_waiting: 0,
            observer,
            cursor: 0,
        }
    }

    pub fn proc(&self, slot: Slot) -> &ProcState {
        &self.procs[slot]
    }

    pub fn proc_mut(&mut self, slot: Slot) -> &mut ProcState {
        &mut self.procs[slot]
    }

    pub fn all_admitted(&self) -> bool {
        self.cursor >= self.procs.len()
    }

    pub fn next_arrival(&self) -> Option<Ticks> {
        self.procs.get(self.cursor).map(|p| p.record.arrival_time)
    }

    /// Move the cursor past every process with `arrival_time <= now` and return
    /// the newly admitted slots in arrival order.
    pub fn admit_arrived(&mut self) -> Vec<Slot> {
        let start = self.cursor;
        let now = self.now;
        let arrived = self.procs[start..]
            .iter()
            .take_while(|p| p.record.arrival_time <= now)
            .count(); // Contiguous, since procs are sorted

        self.cursor += arrived;
        for slot in start..self.cursor {
            let pid = self.procs[slot].record.id;
            self.observer.observe(now, TraceEvent::Admitted { pid });
        }
        (start..self.cursor).collect()
    }

    pub fn advance_time(&mut self, delta: Ticks) {
        let next = self.now.checked_add(delta);
        debug_assert!(next.is_some(), "Clock overflow: {} + {delta}", self.now);
        self.now = next.expect("Clock overflow past Ticks::MAX");
    }

    /// Jump the clock forward over an idle gap. Never moves backwards.
    pub fn idle_until(&mut self, time: Ticks) {
        if self.now < time {
            self.observer.observe(self.now, TraceEvent::Idle { until: time });
            self.now = time;
        }
    }

    pub fn dispatch(&mut self, slot: Slot) {
        let pid = self.procs[slot].record.id;
        debug_assert!(
            !self.procs[slot].is_completed(),
            "Completed process {pid} cannot be dispatched"
        );
        debug_assert!(
            self.schedule.last().is_none_or(|e| e.time <= self.now),
            "Schedule must be non-decreasing in time"
        );

        self.schedule.push(ScheduleEvent::new(self.now, pid));
        self.observer.observe(self.now, TraceEvent::Dispatched { pid });
    }

    /// Run `slot` for up to `ticks`, advancing the clock. Returns the ticks
    /// actually consumed.
    pub fn execute(&mut self, slot: Slot, ticks: Ticks) -> Ticks {
        let start = self.now;
        let proc = &mut self.procs[slot];
        let ran = ticks.min(proc.remaining_time);
        proc.remaining_time -= ran;
        proc.executed += ran;
        let pid = proc.record.id;

        self.advance_time(ran);
        self.observer
            .observe(start, TraceEvent::Executed { pid, ticks: ran });
        ran
    }

    /// Record completion at the current clock and accrue the waiting time.
    pub fn complete(&mut self, slot: Slot) -> Ticks {
        let now = self.now;
        let proc = &mut self.procs[slot];
        debug_assert!(
            proc.is_completed(),
            "Process {} completed with {} ticks remaining",
            proc.record.id,
            proc.remaining_time
        );

        proc.completion_time = Some(now);
        let waiting = now - proc.record.arrival_time - proc.record.burst_time;
        let pid = proc.record.id;

        self.total_waiting += waiting;
        self.observer
            .observe(now, TraceEvent::Completed { pid, waiting });
        waiting
    }

    pub fn all_completed(&self) -> bool {
        self.procs.iter().all(ProcState::is_completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::observer::NullObserver;

    fn prio(key: Ticks, arrival_time: Ticks, pid: Pid, slot: Slot) -> Priority {
        Priority {
            key,
            arrival_time,
            pid,
            slot,
        }
    }

    #[test]
    fn priq_pops_smallest_key_first() {
        let mut q = ReadyQueue::new_priq();
        q.push_priq(0, prio(7, 0, 1, 0));
        q.push_priq(1, prio(3, 1, 2, 1));
        q.push_priq(2, prio(5, 2, 3, 2));

        assert_eq!(q.pop(), Some(1));
        assert_eq!(q.pop(), Some(2));
        assert_eq!(q.pop(), Some(0));
        assert_eq!(q.pop(), None);
    }

    #[test]
    fn priq_breaks_ties_by_arrival_then_pid() {
        let mut q = ReadyQueue::new_priq();
        q.push_priq(0, prio(4, 3, 9, 0));
        q.push_priq(1, prio(4, 1, 8, 1));
        q.push_priq(2, prio(4, 1, 2, 2));

        assert_eq!(q.pop(), Some(2));
        assert_eq!(q.pop(), Some(1));
        assert_eq!(q.pop(), Some(0));
    }

    #[test]
    fn fifo_preserves_insertion_order() {
        let mut q = ReadyQueue::new_fifo();
        q.push_fifo(2);
        q.push_fifo(0);
        assert!(q.contains(0));
        assert_eq!(q.len(), 2);
        assert_eq!(q.pop(), Some(2));
        assert_eq!(q.pop(), Some(0));
        assert!(q.is_empty());
    }

    #[test]
    fn admit_arrived_takes_all_simultaneous_arrivals() {
        let records = [
            ProcessRecord::new(1, 0, 3),
            ProcessRecord::new(2, 0, 1),
            ProcessRecord::new(3, 4, 2),
        ];
        let mut obs = NullObserver;
        let mut ctx = SimCtx::new(&records, &mut obs);

        assert_eq!(ctx.admit_arrived(), vec![0, 1]);
        assert!(ctx.admit_arrived().is_empty());
        assert_eq!(ctx.next_arrival(), Some(4));

        ctx.idle_until(4);
        assert_eq!(ctx.admit_arrived(), vec![2]);
        assert!(ctx.all_admitted());
    }

    #[test]
    fn execute_never_overruns_remaining_time() {
        let records = [ProcessRecord::new(1, 0, 3)];
        let mut obs = NullObserver;
        let mut ctx = SimCtx::new(&records, &mut obs);

        assert_eq!(ctx.execute(0, 2), 2);
        assert_eq!(ctx.execute(0, 2), 1);
        assert_eq!(ctx.now, 3);
        assert!(ctx.proc(0).is_completed());
        assert_eq!(ctx.proc(0).executed, 3);
        assert_eq!(ctx.complete(0), 0);
    }

    #[test]
    #[should_panic(expected = "Clock overflow")]
    fn clock_overflow_is_not_silent() {
        let mut obs = NullObserver;
        let mut ctx = SimCtx::new(&[], &mut obs);
        ctx.advance_time(Ticks::MAX);
        ctx.advance_time(1);
    }

    #[test]
    fn idle_until_never_moves_clock_backwards() {
        let mut obs = NullObserver;
        let mut ctx = SimCtx::new(&[], &mut obs);
        ctx.advance_time(5);
        ctx.idle_until(3);
        assert_eq!(ctx.now, 5);
    }
}

pub mod driver;
pub mod event;
pub mod observer;
pub mod state;

pub use driver::{ProcessOutcome, SchedCore, SimulationResult};
pub use event::{ScheduleEvent, TraceEvent};
pub use observer::{LogObserver, NullObserver, Observer, Recorder};
pub use state::{Pid, Priority, ProcState, ProcessRecord, ReadyQueue, SimCtx, Slot, Ticks};

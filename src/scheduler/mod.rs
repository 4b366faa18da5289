pub mod fcfs;
pub mod round_robin;
pub mod sjf;
pub mod srtf;

use crate::core::SimCtx;
pub use fcfs::FcfsScheduler;
pub use round_robin::RoundRobinScheduler;
pub use sjf::{Predictor, SjfScheduler};
pub use srtf::SrtfScheduler;

pub trait Scheduler {
    fn name(&self) -> &'static str;

    /// Drive `ctx` until every process has completed.
    fn run(&mut self, ctx: &mut SimCtx<'_>);
}

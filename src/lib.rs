pub mod config;
pub mod core;
pub mod error;
pub mod scheduler;
pub mod sim;

pub use config::SimConfig;
pub use crate::core::{ProcessRecord, ScheduleEvent, SimulationResult};
pub use error::SimError;
pub use scheduler::Scheduler;
pub use sim::{Policy, Sim, Workload};

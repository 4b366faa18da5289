pub mod driver;
pub mod report;
pub mod workload;

pub use driver::{Policy, Sim};
pub use report::{render, write_report};
pub use workload::{Workload, bernoulli_workload, parse_workload, read_workload};

use crate::{core::Ticks, error::SimError};

pub const RR_QUANTUM_DFL: Ticks = 2;
pub const SJF_ALPHA_DFL: f64 = 0.5;
pub const SJF_INITIAL_GUESS_DFL: Ticks = 5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimConfig {
    pub time_quantum: Ticks,
    pub alpha: f64,
    pub initial_guess: Ticks,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            time_quantum: RR_QUANTUM_DFL,
            alpha: SJF_ALPHA_DFL,
            initial_guess: SJF_INITIAL_GUESS_DFL,
        }
    }
}

impl SimConfig {
    /// Checked once before any policy runs.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.time_quantum == 0 {
            return Err(SimError::Configuration(
                "time quantum must be positive".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.alpha) {
            return Err(SimError::Configuration(format!(
                "alpha must lie in [0, 1], got {}",
                self.alpha
            )));
        }
        if self.initial_guess == 0 {
            return Err(SimError::Configuration(
                "initial burst guess must be positive".into(),
            ));
        }
        Ok(())
    }
}

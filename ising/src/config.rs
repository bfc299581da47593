use crate::driver::ObserveEvery;
use crate::error::{validate_size, validate_temperature, Result};
use serde::{Deserialize, Serialize};

/// Parameters of a single simulation run
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RunConfig {
    /// Lattice side length
    #[serde(default = "default_size")]
    pub size: usize,
    /// Temperature in units of J/k_B; 0 means a zero-temperature quench
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// Number of Metropolis trials (default: 100 * size²)
    #[serde(default)]
    pub total_trials: Option<u64>,
    /// Observation cadence: auto, never, every_trial or a positive integer
    #[serde(default)]
    pub observe_every: ObserveEvery,
    /// Seed for the random source; runs with the same seed are identical
    #[serde(default)]
    pub seed: Option<u64>,
}

// Default value functions
fn default_size() -> usize {
    50
}
fn default_temperature() -> f64 {
    2.27
}

impl Default for RunConfig {
    fn default() -> Self {
        Self::new(default_size(), default_temperature())
    }
}

impl RunConfig {
    pub fn new(size: usize, temperature: f64) -> Self {
        Self {
            size,
            temperature,
            total_trials: None,
            observe_every: ObserveEvery::Auto,
            seed: None,
        }
    }

    pub fn with_total_trials(mut self, total_trials: u64) -> Self {
        self.total_trials = Some(total_trials);
        self
    }

    pub fn with_observe_every(mut self, observe_every: ObserveEvery) -> Self {
        self.observe_every = observe_every;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Configured trial count, or 100 trials per site
    pub fn total_trials(&self) -> u64 {
        self.total_trials
            .unwrap_or_else(|| 100 * (self.size * self.size) as u64)
    }

    /// Check size and temperature before anything is allocated
    pub fn validate(&self) -> Result<()> {
        validate_size(self.size)?;
        validate_temperature(self.temperature)?;
        Ok(())
    }
}

//! Error types for the Ising simulation core.

use thiserror::Error;

/// Error type an observer hands back to abort a run.
pub type ObserverError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum IsingError {
    #[error("invalid lattice size {0}: the side length must be at least 1")]
    InvalidSize(usize),

    #[error("invalid temperature {0}: expected a finite value >= 0")]
    InvalidTemperature(f64),

    #[error("invalid spin value {0}: spins are either +1 or -1")]
    InvalidSpin(i8),

    #[error("lattice rows must form a square: row {row} has {len} sites, expected {expected}")]
    InvalidShape {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("invalid observation cadence '{0}': expected auto, never, every_trial or a positive integer")]
    InvalidCadence(String),

    /// Raised by an observer and returned as-is.
    #[error(transparent)]
    Observer(ObserverError),
}

pub type Result<T> = std::result::Result<T, IsingError>;

/// Reject temperatures that are negative, infinite or NaN. Zero is a valid quench.
pub fn validate_temperature(temperature: f64) -> Result<f64> {
    if temperature.is_finite() && temperature >= 0.0 {
        Ok(temperature)
    } else {
        Err(IsingError::InvalidTemperature(temperature))
    }
}

pub fn validate_size(size: usize) -> Result<usize> {
    if size >= 1 {
        Ok(size)
    } else {
        Err(IsingError::InvalidSize(size))
    }
}

use color_eyre::eyre::{eyre, Result};
use ising::error::validate_temperature;
use serde::{Deserialize, Serialize};

/// Temperature applied to each batch of the host loop
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(tag = "type")]
pub enum TemperatureSchedule {
    /// Same temperature for every batch
    #[serde(rename = "constant")]
    Constant { temperature: f64 },
    /// Linear from `from` at the first batch to `to` at the last
    #[serde(rename = "ramp")]
    Ramp { from: f64, to: f64 },
    /// One temperature per batch; the last one repeats
    #[serde(rename = "steps")]
    Steps { temperatures: Vec<f64> },
}

impl TemperatureSchedule {
    /// Temperature for `batch` (0-based) out of `batches`
    pub fn temperature_at(&self, batch: u64, batches: u64) -> f64 {
        match self {
            TemperatureSchedule::Constant { temperature } => *temperature,
            TemperatureSchedule::Ramp { from, to } => {
                if batches <= 1 {
                    return *from;
                }
                let fraction = batch.min(batches - 1) as f64 / (batches - 1) as f64;
                from + (to - from) * fraction
            }
            TemperatureSchedule::Steps { temperatures } => {
                let index = (batch as usize).min(temperatures.len().saturating_sub(1));
                temperatures.get(index).copied().unwrap_or(f64::NAN)
            }
        }
    }

    /// Reject schedules that would hand the core an invalid temperature
    pub fn validate(&self) -> Result<()> {
        let temperatures = match self {
            TemperatureSchedule::Constant { temperature } => vec![*temperature],
            TemperatureSchedule::Ramp { from, to } => vec![*from, *to],
            TemperatureSchedule::Steps { temperatures } => {
                if temperatures.is_empty() {
                    return Err(eyre!("Temperature schedule 'steps' needs at least one value"));
                }
                temperatures.clone()
            }
        };
        for temperature in temperatures {
            validate_temperature(temperature)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_constant() {
        let schedule = TemperatureSchedule::Constant { temperature: 2.27 };
        assert_relative_eq!(schedule.temperature_at(0, 10), 2.27);
        assert_relative_eq!(schedule.temperature_at(9, 10), 2.27);
    }

    #[test]
    fn test_ramp_hits_both_ends() {
        let schedule = TemperatureSchedule::Ramp { from: 4.0, to: 1.0 };
        assert_relative_eq!(schedule.temperature_at(0, 4), 4.0);
        assert_relative_eq!(schedule.temperature_at(1, 4), 3.0);
        assert_relative_eq!(schedule.temperature_at(3, 4), 1.0);
        assert_relative_eq!(schedule.temperature_at(0, 1), 4.0);
    }

    #[test]
    fn test_steps_repeat_last_value() {
        let schedule = TemperatureSchedule::Steps {
            temperatures: vec![5.0, 2.0, 0.5],
        };
        assert_relative_eq!(schedule.temperature_at(0, 10), 5.0);
        assert_relative_eq!(schedule.temperature_at(2, 10), 0.5);
        assert_relative_eq!(schedule.temperature_at(7, 10), 0.5);
    }

    #[test]
    fn test_validate() {
        assert!(TemperatureSchedule::Constant { temperature: 0.0 }.validate().is_ok());
        assert!(TemperatureSchedule::Ramp { from: 3.0, to: -1.0 }.validate().is_err());
        assert!(TemperatureSchedule::Steps { temperatures: vec![] }.validate().is_err());
        assert!(TemperatureSchedule::Steps {
            temperatures: vec![1.0, f64::NAN]
        }
        .validate()
        .is_err());
    }

    #[test]
    fn test_parse_yaml() {
        let schedule: TemperatureSchedule =
            serde_yml::from_str("type: steps\ntemperatures: [3.0, 2.27, 1.0]\n").unwrap();
        assert_eq!(
            schedule,
            TemperatureSchedule::Steps {
                temperatures: vec![3.0, 2.27, 1.0]
            }
        );
    }
}

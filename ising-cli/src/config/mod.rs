//! Configuration management for the Ising host
//!
//! The YAML file has three optional sections: `run` (the core run
//! parameters), `host` (batching and the temperature schedule) and `render`
//! (text frame output). Command-line flags override file values.

mod args;

pub use args::Args;

use crate::app::TemperatureSchedule;
use color_eyre::eyre::{eyre, Result, WrapErr};
use ising::RunConfig;
use serde::{Deserialize, Serialize};

/// Main configuration structure for a host run
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub run: RunConfig,
    #[serde(default)]
    pub host: HostParams,
    #[serde(default)]
    pub render: RenderParams,
}

/// Batching of the host loop
#[derive(Debug, Deserialize, Serialize)]
pub struct HostParams {
    pub trials_per_batch: Option<u64>,
    pub batches: Option<u64>,
    /// Per-batch temperatures; absent means `run.temperature` throughout
    pub schedule: Option<TemperatureSchedule>,
}

impl Default for HostParams {
    fn default() -> Self {
        HostParams {
            trials_per_batch: Some(1000),
            batches: None,
            schedule: None,
        }
    }
}

impl HostParams {
    /// Apply default values to any missing parameters
    pub fn with_defaults(mut self) -> Self {
        let defaults = Self::default();
        if self.trials_per_batch.is_none() {
            self.trials_per_batch = defaults.trials_per_batch;
        }
        self
    }
}

/// Text frame rendering
#[derive(Debug, Deserialize, Serialize)]
pub struct RenderParams {
    pub enabled: Option<bool>,
    /// Character drawn for a +1 spin
    pub up: Option<char>,
    /// Character drawn for a -1 spin
    pub down: Option<char>,
    /// Frame output file (default stdout)
    pub frames: Option<String>,
}

impl Default for RenderParams {
    fn default() -> Self {
        RenderParams {
            enabled: Some(true),
            up: Some('#'),
            down: Some('.'),
            frames: None,
        }
    }
}

impl RenderParams {
    /// Apply default values to any missing parameters
    pub fn with_defaults(mut self) -> Self {
        let defaults = Self::default();
        if self.enabled.is_none() {
            self.enabled = defaults.enabled;
        }
        if self.up.is_none() {
            self.up = defaults.up;
        }
        if self.down.is_none() {
            self.down = defaults.down;
        }
        self
    }
}

impl Config {
    /// Apply defaults to all configuration sections
    pub fn with_defaults(mut self) -> Self {
        self.host = self.host.with_defaults();
        self.render = self.render.with_defaults();
        self
    }

    /// Let command-line flags override values from the file
    pub fn apply_args(mut self, args: &Args) -> Self {
        if let Some(size) = args.size {
            self.run.size = size;
        }
        if let Some(temperature) = args.temperature {
            self.run.temperature = temperature;
            self.host.schedule = None;
        }
        if let Some(seed) = args.seed {
            self.run.seed = Some(seed);
        }
        if let Some(observe_every) = args.observe_every {
            self.run.observe_every = observe_every;
        }
        self.host.trials_per_batch = args.trials_per_batch.or(self.host.trials_per_batch);
        self.host.batches = args.batches.or(self.host.batches);
        self.render.frames = args.frames.clone().or(self.render.frames.take());
        if args.no_render {
            self.render.enabled = Some(false);
        }
        self
    }

    pub fn trials_per_batch(&self) -> u64 {
        self.host.trials_per_batch.unwrap_or(1000)
    }

    /// Configured batch count, or enough batches to cover `run.total_trials()`
    pub fn batches(&self) -> u64 {
        self.host
            .batches
            .unwrap_or_else(|| self.run.total_trials().div_ceil(self.trials_per_batch().max(1)))
    }

    /// Trials in `batch` (0-based)
    ///
    /// With an explicit batch count every batch is full. Otherwise the last
    /// batch is cut short so the run totals exactly `run.total_trials()`.
    pub fn batch_trials(&self, batch: u64) -> u64 {
        let per_batch = self.trials_per_batch();
        if self.host.batches.is_some() {
            return per_batch;
        }
        let done = batch.saturating_mul(per_batch);
        self.run.total_trials().saturating_sub(done).min(per_batch)
    }

    /// Reject settings the host loop cannot run with
    pub fn validate(&self) -> Result<()> {
        self.run.validate().wrap_err("Invalid run configuration")?;
        if self.trials_per_batch() == 0 {
            return Err(eyre!("trials_per_batch must be at least 1"));
        }
        self.schedule().validate()
    }

    /// The schedule in effect, falling back to a constant `run.temperature`
    pub fn schedule(&self) -> TemperatureSchedule {
        self.host
            .schedule
            .clone()
            .unwrap_or(TemperatureSchedule::Constant {
                temperature: self.run.temperature,
            })
    }

    pub fn is_render_enabled(&self) -> bool {
        self.render.enabled.unwrap_or(true)
    }

    pub fn render_chars(&self) -> (char, char) {
        (self.render.up.unwrap_or('#'), self.render.down.unwrap_or('.'))
    }
}

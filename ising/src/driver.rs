//! Sampling loop: trial selection, observation cadence and run orchestration.

use crate::config::RunConfig;
use crate::error::{validate_temperature, IsingError, ObserverError, Result};
use crate::lattice::Lattice;
use crate::metropolis::{Metropolis, Trial};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU64;
use std::str::FromStr;
use tracing::{debug, trace};

/// How often the observer sees the lattice during a batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CadenceRepr", into = "CadenceRepr")]
pub enum ObserveEvery {
    /// `size²/2` trials below size 100, `size²` from there on
    #[default]
    Auto,
    /// Only the mandatory observations (initial and final)
    Never,
    EveryTrial,
    Every(NonZeroU64),
}

impl ObserveEvery {
    /// Observation period in trials, or `None` when intermediate observations are off
    pub fn period(self, size: usize) -> Option<u64> {
        match self {
            ObserveEvery::Auto => {
                let sites = (size * size) as u64;
                let period = if size < 100 { sites / 2 } else { sites };
                // size 1 would give a period of 0
                Some(period.max(1))
            }
            ObserveEvery::Never => None,
            ObserveEvery::EveryTrial => Some(1),
            ObserveEvery::Every(n) => Some(n.get()),
        }
    }
}

impl FromStr for ObserveEvery {
    type Err = IsingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(ObserveEvery::Auto),
            "never" => Ok(ObserveEvery::Never),
            "every-trial" | "every_trial" => Ok(ObserveEvery::EveryTrial),
            other => other
                .parse::<u64>()
                .ok()
                .and_then(NonZeroU64::new)
                .map(ObserveEvery::Every)
                .ok_or_else(|| IsingError::InvalidCadence(s.to_string())),
        }
    }
}

impl fmt::Display for ObserveEvery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObserveEvery::Auto => write!(f, "auto"),
            ObserveEvery::Never => write!(f, "never"),
            ObserveEvery::EveryTrial => write!(f, "every_trial"),
            ObserveEvery::Every(n) => write!(f, "{}", n),
        }
    }
}

/// Serialized form: a positive integer or one of the keywords
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum CadenceRepr {
    Period(u64),
    Keyword(String),
}

impl TryFrom<CadenceRepr> for ObserveEvery {
    type Error = IsingError;

    fn try_from(repr: CadenceRepr) -> Result<Self> {
        match repr {
            CadenceRepr::Period(n) => NonZeroU64::new(n)
                .map(ObserveEvery::Every)
                .ok_or_else(|| IsingError::InvalidCadence(n.to_string())),
            CadenceRepr::Keyword(s) => s.parse(),
        }
    }
}

impl From<ObserveEvery> for CadenceRepr {
    fn from(every: ObserveEvery) -> Self {
        match every {
            ObserveEvery::Every(n) => CadenceRepr::Period(n.get()),
            other => CadenceRepr::Keyword(other.to_string()),
        }
    }
}

/// Read-only hook the rendering side uses to redraw the lattice
///
/// Called synchronously: the next trial waits until `observe` returns. An
/// error aborts the run and is handed back to the caller unchanged.
pub trait Observer {
    fn observe(&mut self, lattice: &Lattice, trial: u64) -> std::result::Result<(), ObserverError>;
}

impl<F> Observer for F
where
    F: FnMut(&Lattice, u64) -> std::result::Result<(), ObserverError>,
{
    fn observe(&mut self, lattice: &Lattice, trial: u64) -> std::result::Result<(), ObserverError> {
        self(lattice, trial)
    }
}

/// Counters for one call to [`Simulation::advance`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchStats {
    pub trials: u64,
    pub accepted: u64,
}

impl BatchStats {
    pub fn acceptance_ratio(&self) -> f64 {
        if self.trials == 0 {
            0.0
        } else {
            self.accepted as f64 / self.trials as f64
        }
    }
}

/// Owned simulation context: the lattice, its random source and run counters
///
/// A host that animates the lattice keeps one `Simulation` and calls
/// [`advance`](Self::advance) in bounded batches, choosing a temperature for
/// each batch.
#[derive(Debug, Clone)]
pub struct Simulation<R: Rng = StdRng> {
    lattice: Lattice,
    rng: R,
    sampler: Metropolis,
    trials_completed: u64,
    accepted: u64,
}

impl Simulation<StdRng> {
    /// Random start; reproducible when `seed` is given
    pub fn new(size: usize, seed: Option<u64>) -> Result<Self> {
        let rng = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        Self::with_rng(size, rng)
    }
}

impl<R: Rng> Simulation<R> {
    /// Random start drawn from the injected source
    pub fn with_rng(size: usize, mut rng: R) -> Result<Self> {
        let lattice = Lattice::random(size, &mut rng)?;
        Ok(Self::from_lattice(lattice, rng))
    }

    pub fn from_lattice(lattice: Lattice, rng: R) -> Self {
        Self {
            lattice,
            rng,
            sampler: Metropolis::new(),
            trials_completed: 0,
            accepted: 0,
        }
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    pub fn into_lattice(self) -> Lattice {
        self.lattice
    }

    /// Trials executed over the lifetime of this simulation
    pub fn trials_completed(&self) -> u64 {
        self.trials_completed
    }

    /// Accepted flips over the lifetime of this simulation
    pub fn accepted(&self) -> u64 {
        self.accepted
    }

    /// Run a single trial on a uniformly chosen site
    pub fn step(&mut self, temperature: f64) -> Result<Trial> {
        let temperature = validate_temperature(temperature)?;
        Ok(self.step_unchecked(temperature))
    }

    fn step_unchecked(&mut self, temperature: f64) -> Trial {
        let size = self.lattice.size();
        let row = self.rng.gen_range(0..size);
        let col = self.rng.gen_range(0..size);
        let trial = self
            .sampler
            .trial(&mut self.lattice, row, col, temperature, &mut self.rng);

        self.trials_completed += 1;
        if trial.accepted {
            self.accepted += 1;
        }
        trial
    }

    /// Execute `trials` Metropolis trials at a fixed temperature
    ///
    /// Trial indices count over the lifetime of the simulation, so a host
    /// calling this in batches sees one continuous sequence. The observer, if
    /// any, is called after every trial whose index is a multiple of the
    /// cadence period, and once more after the last trial of the batch unless
    /// the cadence already landed there. The initial state is not observed
    /// here; see [`run`].
    pub fn advance(
        &mut self,
        temperature: f64,
        trials: u64,
        observe_every: ObserveEvery,
        mut observer: Option<&mut (dyn Observer + '_)>,
    ) -> Result<BatchStats> {
        let temperature = validate_temperature(temperature)?;
        let period = observe_every.period(self.lattice.size());
        let mut stats = BatchStats::default();
        let mut last_observed = None;

        for _ in 0..trials {
            let index = self.trials_completed;
            let trial = self.step_unchecked(temperature);
            stats.trials += 1;
            if trial.accepted {
                stats.accepted += 1;
            }

            if let (Some(obs), Some(period)) = (observer.as_deref_mut(), period) {
                if index % period == 0 {
                    trace!("observing trial {}", index);
                    obs.observe(&self.lattice, index)
                        .map_err(IsingError::Observer)?;
                    last_observed = Some(index);
                }
            }
        }

        let last = (trials > 0).then(|| self.trials_completed - 1);
        if let (Some(obs), Some(last)) = (observer, last) {
            if last_observed != Some(last) {
                obs.observe(&self.lattice, last)
                    .map_err(IsingError::Observer)?;
            }
        }

        debug!(
            "batch finished: T={} trials={} accepted={} ({:.3})",
            temperature,
            stats.trials,
            stats.accepted,
            stats.acceptance_ratio()
        );
        Ok(stats)
    }
}

/// Run a fresh simulation from a random start and return the final lattice
///
/// Sequence: validate the configuration, build the lattice, observe the
/// initial state (index 0), then execute `total_trials` trials with the
/// configured cadence and a final observation.
pub fn run(config: &RunConfig, observer: Option<&mut (dyn Observer + '_)>) -> Result<Lattice> {
    let rng = config
        .seed
        .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
    run_with_rng(config, rng, observer)
}

/// [`run`] with an injected random source; `config.seed` is ignored
pub fn run_with_rng<R: Rng>(
    config: &RunConfig,
    rng: R,
    mut observer: Option<&mut (dyn Observer + '_)>,
) -> Result<Lattice> {
    config.validate()?;
    let mut simulation = Simulation::with_rng(config.size, rng)?;

    if let Some(obs) = observer.as_deref_mut() {
        obs.observe(simulation.lattice(), 0)
            .map_err(IsingError::Observer)?;
    }

    simulation.advance(
        config.temperature,
        config.total_trials(),
        config.observe_every,
        observer,
    )?;
    Ok(simulation.into_lattice())
}

//! Two-dimensional Ising ferromagnet sampled with the Metropolis algorithm.
//!
//! The crate is organised leaf first:
//!
//! - [`lattice`]: the L x L grid of ±1 spins
//! - [`energy`]: flip energies with periodic boundaries
//! - [`metropolis`]: the single-spin-flip acceptance rule
//! - [`driver`]: the sampling loop and the observer hook used for rendering
//!
//! ```no_run
//! use ising::{run, Lattice, ObserverError, RunConfig};
//!
//! let config = RunConfig::new(32, 1.5).with_seed(7);
//! let mut print = |lattice: &Lattice, trial: u64| -> Result<(), ObserverError> {
//!     println!("trial {trial}: {} sites", lattice.size() * lattice.size());
//!     Ok(())
//! };
//! let final_state = run(&config, Some(&mut print))?;
//! assert_eq!(final_state.size(), 32);
//! # Ok::<(), ising::IsingError>(())
//! ```

pub mod analysis;
pub mod config;
pub mod driver;
pub mod energy;
pub mod error;
pub mod lattice;
pub mod metropolis;

pub use config::RunConfig;
pub use driver::{run, run_with_rng, BatchStats, ObserveEvery, Observer, Simulation};
pub use energy::{EnergyModel, NearestNeighbor};
pub use error::{IsingError, ObserverError, Result};
pub use lattice::{Lattice, Spin, DOWN, UP};
pub use metropolis::{acceptance_probability, Metropolis, Trial};

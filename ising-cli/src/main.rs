//! Ising host command-line interface
//!
//! Runs the Metropolis core in batches, following a temperature schedule,
//! and renders the lattice as text frames.

use color_eyre::eyre::Result;

mod app;
mod config;
mod io;

use app::IsingApplication;

fn main() -> Result<()> {
    color_eyre::install()?;
    IsingApplication::from_cli()?.run()
}

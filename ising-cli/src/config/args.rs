//! Command-line argument parsing for the Ising host

use clap::{ArgAction, Parser};
use ising::ObserveEvery;

/// 2D Ising model Metropolis simulation with text rendering
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to an optional YAML configuration file
    #[arg(short, long)]
    pub config_file: Option<String>,

    /// Override lattice side length
    #[arg(long)]
    pub size: Option<usize>,

    /// Run every batch at this temperature (replaces any schedule)
    #[arg(short, long)]
    pub temperature: Option<f64>,

    /// Override trials per batch
    #[arg(long)]
    pub trials_per_batch: Option<u64>,

    /// Override number of batches; each then runs the full trials per batch
    #[arg(long)]
    pub batches: Option<u64>,

    /// Seed the random source for a reproducible run
    #[arg(long)]
    pub seed: Option<u64>,

    /// Frame cadence inside a batch: auto, never, every-trial or a trial count
    #[arg(long)]
    pub observe_every: Option<ObserveEvery>,

    /// Write rendered frames to this file (default stdout)
    #[arg(short, long)]
    pub frames: Option<String>,

    /// Do not render frames, only log batch summaries
    #[arg(long)]
    pub no_render: bool,

    /// Write the log to this file instead of stdout
    #[arg(long)]
    pub log_file: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

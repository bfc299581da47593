use crate::config::Config;
use color_eyre::eyre::Result;
use ising::analysis::phase;
use ising::{IsingError, Observer, Simulation};
use std::time::Instant;
use tracing::info;

/// Totals of a finished host loop
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HostSummary {
    pub batches: u64,
    pub trials: u64,
    pub accepted: u64,
    pub seconds: f64,
}

/// Drive the core in bounded batches, one temperature per batch
///
/// The initial lattice is handed to the renderer before the first batch.
/// Frames follow `run.observe_every` over the whole run, trial indices
/// continuing from batch to batch, and every batch ends with a frame, which
/// is how the lattice keeps animating between batches.
pub fn run_host(
    config: &Config,
    mut renderer: Option<&mut (dyn Observer + '_)>,
) -> Result<HostSummary> {
    config.validate()?;
    let schedule = config.schedule();

    let batches = config.batches();
    let trials_per_batch = config.trials_per_batch();
    let mut simulation = Simulation::new(config.run.size, config.run.seed)?;

    info!(
        "Lattice {}x{}, {} batches of {} trials, observe every {}",
        config.run.size, config.run.size, batches, trials_per_batch, config.run.observe_every
    );
    match config.run.seed {
        Some(seed) => info!("Random source seeded with {}", seed),
        None => info!("Random source seeded from system entropy"),
    }

    if let Some(renderer) = renderer.as_deref_mut() {
        renderer
            .observe(simulation.lattice(), 0)
            .map_err(IsingError::Observer)?;
    }

    let start = Instant::now();
    for batch in 0..batches {
        let temperature = schedule.temperature_at(batch, batches);
        let stats = simulation.advance(
            temperature,
            config.batch_trials(batch),
            config.run.observe_every,
            renderer.as_deref_mut(),
        )?;

        let elapsed = start.elapsed().as_secs_f64();
        info!(
            "Batch {}/{}: T = {:.3} ({:?}), accepted {}/{} ({:.1}%), {:.0} trials/s",
            batch + 1,
            batches,
            temperature,
            phase(temperature),
            stats.accepted,
            stats.trials,
            100.0 * stats.acceptance_ratio(),
            simulation.trials_completed() as f64 / elapsed.max(f64::EPSILON)
        );
    }

    Ok(HostSummary {
        batches,
        trials: simulation.trials_completed(),
        accepted: simulation.accepted(),
        seconds: start.elapsed().as_secs_f64(),
    })
}

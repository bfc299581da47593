use ising::analysis::{critical_temperature, phase};
use ising::{run, Lattice, ObserveEvery, ObserverError, RunConfig};

/// 2D Ising lattice snapshots across the phase transition
///
/// This example runs a fresh simulation at a handful of temperatures and
/// prints the final configuration of each, so the ordered domains below T_c
/// and the salt-and-pepper disorder above it can be compared by eye.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let size = 24;
    let sweeps = 200;
    let t_c = critical_temperature();

    println!("2D Ising model, {}x{} lattice, {} sweeps per temperature", size, size, sweeps);
    println!("Critical temperature T_c = {:.4}\n", t_c);

    for temperature in [0.0, 1.0, 2.0, t_c, 3.0, 5.0] {
        let config = RunConfig::new(size, temperature)
            .with_total_trials((sweeps * size * size) as u64)
            .with_observe_every(ObserveEvery::Never)
            .with_seed(2013);

        let mut frames = 0;
        let mut count = |_: &Lattice, _: u64| -> Result<(), ObserverError> {
            frames += 1;
            Ok(())
        };
        let lattice = run(&config, Some(&mut count))?;

        println!(
            "T = {:.3} ({:?}), {} frames observed",
            temperature,
            phase(temperature),
            frames
        );
        for row in lattice.rows() {
            let line: String = row.map(|s| if s > 0 { '#' } else { '.' }).collect();
            println!("  {}", line);
        }
        println!();
    }

    Ok(())
}

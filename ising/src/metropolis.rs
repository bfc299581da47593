use crate::energy::{EnergyModel, NearestNeighbor};
use crate::lattice::Lattice;
use rand::Rng;

/// Outcome of one proposed single-spin flip. Not retained after it is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trial {
    pub row: usize,
    pub col: usize,
    /// Energy change the flip would cause (or caused, if accepted)
    pub delta_energy: f64,
    pub accepted: bool,
}

/// Probability of accepting a flip with energy change `ediff`: min(1, exp(-ediff/T))
///
/// At T = 0 every energy-increasing move is rejected (zero-temperature quench).
pub fn acceptance_probability(ediff: f64, temperature: f64) -> f64 {
    if ediff <= 0.0 {
        1.0
    } else if temperature == 0.0 {
        0.0
    } else {
        (-ediff / temperature).exp()
    }
}

/// Single-spin-flip Metropolis sampler
#[derive(Debug, Clone, Default)]
pub struct Metropolis<E = NearestNeighbor> {
    model: E,
}

impl Metropolis<NearestNeighbor> {
    pub fn new() -> Self {
        Self::with_model(NearestNeighbor)
    }
}

impl<E: EnergyModel> Metropolis<E> {
    pub fn with_model(model: E) -> Self {
        Self { model }
    }

    /// Propose flipping (row, col) and apply it if the Metropolis rule accepts
    ///
    /// Favorable or neutral moves (`ediff <= 0`) are accepted without touching
    /// `rng`. Otherwise one uniform number `u` in [0, 1) is drawn and the flip
    /// happens iff `u < exp(-ediff / T)`. `temperature` must already be
    /// validated (finite, >= 0).
    pub fn trial<R: Rng + ?Sized>(
        &self,
        lattice: &mut Lattice,
        row: usize,
        col: usize,
        temperature: f64,
        rng: &mut R,
    ) -> Trial {
        debug_assert!(
            temperature >= 0.0,
            "negative temperature {} reached the sampler",
            temperature
        );
        let delta_energy = self.model.delta_energy(lattice, row, col);

        let accepted = if delta_energy <= 0.0 {
            true
        } else if temperature == 0.0 {
            false
        } else {
            rng.gen::<f64>() < acceptance_probability(delta_energy, temperature)
        };

        if accepted {
            lattice.flip(row, col);
        }

        Trial {
            row,
            col,
            delta_energy,
            accepted,
        }
    }

    /// Returns whether the flip at (row, col) was applied
    pub fn propose_and_resolve<R: Rng + ?Sized>(
        &self,
        lattice: &mut Lattice,
        row: usize,
        col: usize,
        temperature: f64,
        rng: &mut R,
    ) -> bool {
        self.trial(lattice, row, col, temperature, rng).accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::{DOWN, UP};
    use approx::assert_relative_eq;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Scores every flip with a fixed energy change
    struct Fixed(f64);

    impl EnergyModel for Fixed {
        fn delta_energy(&self, _: &Lattice, _: usize, _: usize) -> f64 {
            self.0
        }
    }

    #[test]
    fn test_acceptance_probability() {
        assert_relative_eq!(acceptance_probability(-8.0, 2.0), 1.0);
        assert_relative_eq!(acceptance_probability(0.0, 0.0), 1.0);
        assert_relative_eq!(acceptance_probability(4.0, 2.0), (-2.0f64).exp());
        assert_relative_eq!(acceptance_probability(8.0, 0.0), 0.0);
    }

    #[test]
    fn test_favorable_flip_is_always_accepted() {
        // StepRng::new(u64::MAX, 0) makes gen::<f64>() return its largest value,
        // which would reject any probabilistic move.
        let mut rng = StepRng::new(u64::MAX, 0);
        let sampler = Metropolis::new();
        for temperature in [0.0, 0.5, 2.27, 10.0] {
            let mut lattice = Lattice::uniform(3, UP).unwrap();
            lattice.flip(1, 1);
            assert!(sampler.propose_and_resolve(&mut lattice, 1, 1, temperature, &mut rng));
            assert_eq!(lattice.get(1, 1), UP);
        }
    }

    #[test]
    fn test_neutral_flip_is_always_accepted() {
        let mut rng = StepRng::new(u64::MAX, 0);
        let sampler = Metropolis::with_model(Fixed(0.0));
        let mut lattice = Lattice::uniform(2, UP).unwrap();
        let trial = sampler.trial(&mut lattice, 0, 1, 1.0, &mut rng);
        assert!(trial.accepted);
        assert_eq!(lattice.get(0, 1), DOWN);
    }

    #[test]
    fn test_unfavorable_flip_follows_the_draw() {
        let sampler = Metropolis::new();

        // gen::<f64>() == 0.0 is below any positive acceptance probability
        let mut low = StepRng::new(0, 0);
        let mut lattice = Lattice::uniform(3, UP).unwrap();
        assert!(sampler.propose_and_resolve(&mut lattice, 0, 0, 1.0, &mut low));
        assert_eq!(lattice.get(0, 0), DOWN);

        // gen::<f64>() close to 1 is above exp(-8)
        let mut high = StepRng::new(u64::MAX, 0);
        let mut lattice = Lattice::uniform(3, UP).unwrap();
        let trial = sampler.trial(&mut lattice, 0, 0, 1.0, &mut high);
        assert!(!trial.accepted);
        assert_relative_eq!(trial.delta_energy, 8.0);
        assert_eq!(lattice.get(0, 0), UP);
    }

    #[test]
    fn test_zero_temperature_never_raises_energy() {
        let mut rng = StepRng::new(0, 0);
        let sampler = Metropolis::new();
        let mut lattice = Lattice::uniform(4, DOWN).unwrap();
        for (i, j) in lattice.sites().collect::<Vec<_>>() {
            assert!(!sampler.propose_and_resolve(&mut lattice, i, j, 0.0, &mut rng));
        }
        assert_eq!(lattice, Lattice::uniform(4, DOWN).unwrap());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "negative temperature")]
    fn test_negative_temperature_is_a_contract_violation() {
        let mut rng = StepRng::new(0, 0);
        let mut lattice = Lattice::uniform(3, UP).unwrap();
        Metropolis::new().trial(&mut lattice, 0, 0, -1.0, &mut rng);
    }

    #[test]
    fn test_acceptance_rate_matches_boltzmann_factor() {
        let mut rng = StdRng::seed_from_u64(2024);
        let sampler = Metropolis::with_model(Fixed(4.0));
        let temperature = 2.0;
        let mut lattice = Lattice::uniform(1, UP).unwrap();
        let n = 200_000;
        let accepted = (0..n)
            .filter(|_| sampler.propose_and_resolve(&mut lattice, 0, 0, temperature, &mut rng))
            .count();
        let rate = accepted as f64 / n as f64;
        assert_relative_eq!(rate, (-2.0f64).exp(), epsilon = 0.005);
    }
}

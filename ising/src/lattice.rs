use crate::error::{validate_size, IsingError, Result};
use itertools::{iproduct, Itertools};
use nalgebra::DMatrix;
use rand::Rng;

/// A single site's magnetic moment, always +1 or -1.
pub type Spin = i8;

pub const UP: Spin = 1;
pub const DOWN: Spin = -1;

/// Square lattice of spins (L x L)
///
/// The grid never changes shape after construction and every site holds
/// exactly one of [`UP`] or [`DOWN`]. Accessors take in-range coordinates;
/// periodic wrapping is handled by the energy model, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lattice {
    size: usize,
    spins: DMatrix<Spin>,
}

impl Lattice {
    /// Create a lattice with each spin drawn independently, up or down with probability 0.5
    ///
    /// Sites are filled in row-major order from `rng`, so a seeded source
    /// always yields the same starting configuration.
    pub fn random<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Result<Self> {
        let size = validate_size(size)?;
        let spins = DMatrix::from_row_iterator(
            size,
            size,
            (0..size * size).map(|_| if rng.gen_bool(0.5) { UP } else { DOWN }),
        );
        Ok(Self { size, spins })
    }

    /// Create a lattice with every spin set to `spin` (ordered state)
    pub fn uniform(size: usize, spin: Spin) -> Result<Self> {
        let size = validate_size(size)?;
        let spin = validate_spin(spin)?;
        Ok(Self {
            size,
            spins: DMatrix::from_element(size, size, spin),
        })
    }

    /// Build a lattice from explicit rows, e.g. a hand-written test configuration
    pub fn from_rows(rows: &[Vec<Spin>]) -> Result<Self> {
        let size = validate_size(rows.len())?;
        if let Some((row, r)) = rows.iter().find_position(|r| r.len() != size) {
            return Err(IsingError::InvalidShape {
                row,
                len: r.len(),
                expected: size,
            });
        }
        for &spin in rows.iter().flatten() {
            validate_spin(spin)?;
        }
        let spins = DMatrix::from_row_iterator(size, size, rows.iter().flatten().copied());
        Ok(Self { size, spins })
    }

    /// Side length of the lattice
    pub fn size(&self) -> usize {
        self.size
    }

    /// Spin at (row, col). Panics if either index is out of range.
    pub fn get(&self, row: usize, col: usize) -> Spin {
        self.spins[(row, col)]
    }

    /// Negate the spin at (row, col) and return its new value
    pub fn flip(&mut self, row: usize, col: usize) -> Spin {
        let spin = &mut self.spins[(row, col)];
        *spin = -*spin;
        *spin
    }

    /// Backing matrix, indexed `(row, col)`
    pub fn spins(&self) -> &DMatrix<Spin> {
        &self.spins
    }

    /// Spins of one row, left to right
    pub fn row(&self, row: usize) -> impl Iterator<Item = Spin> + '_ {
        (0..self.size).map(move |col| self.spins[(row, col)])
    }

    /// Rows top to bottom, for renderers
    pub fn rows(&self) -> impl Iterator<Item = impl Iterator<Item = Spin> + '_> + '_ {
        (0..self.size).map(move |r| self.row(r))
    }

    /// Every (row, col) coordinate in row-major order
    pub fn sites(&self) -> impl Iterator<Item = (usize, usize)> {
        iproduct!(0..self.size, 0..self.size)
    }
}

fn validate_spin(spin: Spin) -> Result<Spin> {
    match spin {
        UP | DOWN => Ok(spin),
        other => Err(IsingError::InvalidSpin(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_lattice_holds_only_unit_spins() {
        let mut rng = StdRng::seed_from_u64(7);
        let lattice = Lattice::random(16, &mut rng).unwrap();
        assert_eq!(lattice.size(), 16);
        assert!(lattice.spins().iter().all(|&s| s == UP || s == DOWN));
    }

    #[test]
    fn test_random_lattice_is_roughly_balanced() {
        let mut rng = StdRng::seed_from_u64(11);
        let lattice = Lattice::random(64, &mut rng).unwrap();
        let up = lattice.spins().iter().filter(|&&s| s == UP).count();
        let fraction = up as f64 / (64 * 64) as f64;
        assert!((0.45..0.55).contains(&fraction), "up fraction {fraction}");
    }

    #[test]
    fn test_zero_size_is_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            Lattice::random(0, &mut rng),
            Err(IsingError::InvalidSize(0))
        ));
        assert!(matches!(
            Lattice::uniform(0, UP),
            Err(IsingError::InvalidSize(0))
        ));
    }

    #[test]
    fn test_flip_negates_and_returns_new_value() {
        let mut lattice = Lattice::uniform(3, UP).unwrap();
        assert_eq!(lattice.flip(2, 1), DOWN);
        assert_eq!(lattice.get(2, 1), DOWN);
        assert_eq!(lattice.flip(2, 1), UP);
        assert_eq!(lattice.get(2, 1), UP);
    }

    #[test]
    fn test_from_rows_keeps_row_major_layout() {
        let lattice = Lattice::from_rows(&[vec![1, -1], vec![-1, -1]]).unwrap();
        assert_eq!(lattice.get(0, 0), UP);
        assert_eq!(lattice.get(0, 1), DOWN);
        assert_eq!(lattice.get(1, 0), DOWN);
        let rows: Vec<Vec<Spin>> = lattice.rows().map(|r| r.collect()).collect();
        assert_eq!(rows, vec![vec![1, -1], vec![-1, -1]]);
    }

    #[test]
    fn test_from_rows_rejects_bad_input() {
        assert!(matches!(
            Lattice::from_rows(&[vec![1, 1], vec![1]]),
            Err(IsingError::InvalidShape { row: 1, len: 1, expected: 2 })
        ));
        assert!(matches!(
            Lattice::from_rows(&[vec![1, 0], vec![1, 1]]),
            Err(IsingError::InvalidSpin(0))
        ));
        assert!(matches!(
            Lattice::from_rows(&[]),
            Err(IsingError::InvalidSize(0))
        ));
        assert!(matches!(
            Lattice::uniform(2, 3),
            Err(IsingError::InvalidSpin(3))
        ));
    }

    #[test]
    fn test_sites_cover_the_grid() {
        let lattice = Lattice::uniform(3, DOWN).unwrap();
        let sites: Vec<_> = lattice.sites().collect();
        assert_eq!(sites.len(), 9);
        assert_eq!(sites[0], (0, 0));
        assert_eq!(sites[1], (0, 1));
        assert_eq!(sites[8], (2, 2));
    }
}

use crate::lattice::Lattice;

/// Scores a proposed single-spin flip against the current lattice
///
/// Implementations must not mutate the lattice: the sampler decides
/// whether the flip happens.
pub trait EnergyModel {
    /// Energy change that flipping (row, col) would cause
    fn delta_energy(&self, lattice: &Lattice, row: usize, col: usize) -> f64;
}

/// Nearest-neighbor ferromagnet with J = 1 and no external field
///
/// H = -Σ⟨ij⟩ s_i s_j over the four nearest neighbors of each site, with
/// periodic boundaries. Temperatures are in units of J/k_B.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NearestNeighbor;

impl EnergyModel for NearestNeighbor {
    fn delta_energy(&self, lattice: &Lattice, row: usize, col: usize) -> f64 {
        let spin = lattice.get(row, col) as i32;
        // ΔE = 2 * s_i * Σ neighbors
        (2 * spin * neighbor_sum(lattice, row, col)) as f64
    }
}

impl NearestNeighbor {
    /// Total energy of the configuration
    pub fn total_energy(&self, lattice: &Lattice) -> f64 {
        let size = lattice.size();
        let bonds: i32 = lattice
            .sites()
            .map(|(i, j)| {
                let spin = lattice.get(i, j) as i32;
                // Only right and down, so every bond is counted once
                let right = lattice.get(i, (j + 1) % size) as i32;
                let down = lattice.get((i + 1) % size, j) as i32;
                spin * (right + down)
            })
            .sum();
        -(bonds as f64)
    }
}

/// The four periodic neighbors of (row, col): up, down, left, right
///
/// Every site gets exactly four entries. On tiny lattices some entries
/// coincide (size 2) or point back at the site itself (size 1).
pub fn neighbors(size: usize, row: usize, col: usize) -> [(usize, usize); 4] {
    let up = (row + size - 1) % size;
    let down = (row + 1) % size;
    let left = (col + size - 1) % size;
    let right = (col + 1) % size;
    [(up, col), (down, col), (row, left), (row, right)]
}

/// Sum of the four periodic neighbor spins of (row, col)
pub fn neighbor_sum(lattice: &Lattice, row: usize, col: usize) -> i32 {
    neighbors(lattice.size(), row, col)
        .iter()
        .map(|&(i, j)| lattice.get(i, j) as i32)
        .sum()
}

/// Critical temperature of the square-lattice Ising model (exact result)
/// T_c = 2J / (k_B * ln(1 + √2)) ≈ 2.269 J/k_B
pub fn critical_temperature() -> f64 {
    2.0 / (1.0 + 2.0_f64.sqrt()).ln()
}

/// Which side of the transition a temperature sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Below T_c: domains grow and the lattice orders
    Ordered,
    /// Above T_c: spins stay disordered
    Disordered,
}

pub fn phase(temperature: f64) -> Phase {
    if temperature < critical_temperature() {
        Phase::Ordered
    } else {
        Phase::Disordered
    }
}

//! Exact reference values for the square-lattice Ising model.

use super::spin_lattice::LatticeParams;

/// Onsager critical temperature in units of J/k_B
/// T_c = 2J / (k_B * ln(1 + √2)) ≈ 2.269
pub fn critical_temperature() -> f64 {
    2.0 / (1.0 + 2.0_f64.sqrt()).ln()
}

/// Number of nearest neighbors on the square lattice
pub const COORDINATION_NUMBER: usize = 4;

/// Energy per site of the fully aligned ground state
pub fn ground_state_energy_per_site(params: &LatticeParams) -> f64 {
    // z/2 bonds per site, each worth -J, plus the field term for spins along H
    -(COORDINATION_NUMBER as f64 / 2.0) * params.coupling - params.moment * params.field.abs()
}

/// Magnetization per site of the fully aligned ground state
pub fn ground_state_magnetization_per_site(params: &LatticeParams) -> f64 {
    params.moment
}

//! Ising MC - Monte Carlo simulation of the 2D Ising model in Rust
//!
//! This crate provides a periodic square spin lattice together with
//! single-spin Metropolis and Wolff cluster updates, and a driver that
//! reports equilibrium averages of energy and magnetization.

pub mod error;
pub mod lattice;
pub mod sampling;
pub mod io;

// Re-export commonly used types at crate root
pub use error::IsingError;
pub use lattice::{Lattice, LatticeParams};
pub use sampling::{
    Algorithm, Cluster, ClusterBuilder, MCMCResults, MCMCSimulation, Metropolis, MonteCarloUpdate,
    StepOutcome, Wolff,
};
pub use io::{read_simulation_config, EnergyLog, SimulationConfig};

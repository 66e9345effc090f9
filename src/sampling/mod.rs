//! Sampling module - Monte Carlo updates and the simulation driver.

mod algorithm;
mod cluster;
mod metropolis;
mod simulation;
mod statistics;
mod traits;
mod wolff;

pub use algorithm::{Algorithm, Updater};
pub use cluster::{bond_probability, Cluster, ClusterBuilder};
pub use metropolis::Metropolis;
pub use simulation::{MCMCResults, MCMCSimulation};
pub use statistics::{autocorrelation_time, blocking_error};
pub use traits::{acceptance_probability, Evaluation, MonteCarloUpdate, Proposal, StepOutcome};
pub use wolff::Wolff;

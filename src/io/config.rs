//! YAML configuration for a simulation run.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::IsingError;
use crate::lattice::LatticeParams;
use crate::sampling::Algorithm;

/// Initial spin configuration.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StartState {
    /// Independent ±1 per site
    #[default]
    Random,
    /// All spins up
    Ordered,
}

/// Everything needed to set up and run one simulation.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub dims: usize,
    pub side: usize,
    pub temperature: f64,
    pub field: f64,
    pub coupling: f64,
    pub moment: f64,
    pub algorithm: Algorithm,
    pub n_steps: usize,
    pub n_equilibration: usize,
    /// RNG seed; a fresh entropy seed when absent
    pub seed: Option<u64>,
    pub start: StartState,
    /// Directory receiving the per-step energy log
    pub output_dir: PathBuf,
    /// Log progress every this many steps, 0 disables it
    pub progress_interval: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            dims: 2,
            side: 16,
            temperature: 2.269,
            field: 0.0,
            coupling: 1.0,
            moment: 1.0,
            algorithm: Algorithm::Metropolis,
            n_steps: 10_000,
            n_equilibration: 1_000,
            seed: None,
            start: StartState::Random,
            output_dir: PathBuf::from("."),
            progress_interval: 0,
        }
    }
}

impl SimulationConfig {
    pub fn lattice_params(&self) -> LatticeParams {
        LatticeParams::new(self.temperature)
            .with_field(self.field)
            .with_coupling(self.coupling)
            .with_moment(self.moment)
    }

    /// Checks that do not need a lattice; lattice parameters are checked when
    /// the lattice is built.
    pub fn validate(&self) -> Result<(), IsingError> {
        if self.dims != 2 {
            return Err(IsingError::UnsupportedDimension(self.dims));
        }
        validate_steps(self.n_steps, self.n_equilibration)
    }
}

/// A run needs at least one step left after equilibration.
pub fn validate_steps(n_steps: usize, n_equilibration: usize) -> Result<(), IsingError> {
    if n_steps == 0 || n_equilibration >= n_steps {
        return Err(IsingError::InvalidStepConfiguration { n_steps, n_equilibration });
    }
    Ok(())
}

/// Read a simulation config from a YAML file.
pub fn read_simulation_config(filename: impl AsRef<Path>) -> Result<SimulationConfig, IsingError> {
    let file = std::fs::File::open(filename)?;
    let reader = std::io::BufReader::new(file);
    let config: SimulationConfig = serde_yaml::from_reader(reader)?;
    Ok(config)
}

// example of yaml file
// side: 32
// temperature: 2.0
// field: 0.0
// algorithm: Wolff
// n_steps: 20000
// n_equilibration: 2000
// seed: 7

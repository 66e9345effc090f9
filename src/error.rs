//! Error type shared by the lattice, the samplers and the config layer.

use thiserror::Error;

/// Failures raised before or at the start of a simulation run.
#[derive(Debug, Error)]
pub enum IsingError {
    /// Only the square (2D) lattice is implemented.
    #[error("only the 2-dimensional Ising model is implemented, got {0} dimensions")]
    UnsupportedDimension(usize),

    #[error("unsupported algorithm `{0}` (expected Metropolis or Wolff)")]
    UnsupportedAlgorithm(String),

    /// No step would survive equilibration, so there is nothing to average.
    #[error(
        "invalid step configuration: {n_equilibration} equilibration steps \
         leave nothing to average out of {n_steps} total"
    )]
    InvalidStepConfiguration { n_steps: usize, n_equilibration: usize },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse configuration: {0}")]
    Config(#[from] serde_yaml::Error),
}

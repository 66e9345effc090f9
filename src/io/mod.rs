//! IO module - configuration, energy log and logging setup.

mod config;
mod energy_log;
mod output;

pub use config::{read_simulation_config, validate_steps, SimulationConfig, StartState};
pub use energy_log::EnergyLog;
pub use output::setup_output;

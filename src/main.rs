use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing::info;

use ising_mc::io::{read_simulation_config, setup_output, EnergyLog, SimulationConfig};
use ising_mc::MCMCSimulation;

/// Monte Carlo simulation of the 2D Ising model
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// YAML configuration file; built-in defaults when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Spins along an edge
    #[arg(long)]
    side: Option<usize>,

    #[arg(short, long)]
    temperature: Option<f64>,

    /// Magnitude of the external magnetic field
    #[arg(long, allow_negative_numbers = true)]
    field: Option<f64>,

    /// Metropolis or Wolff
    #[arg(short, long)]
    algorithm: Option<String>,

    /// Total Monte Carlo steps
    #[arg(long)]
    steps: Option<usize>,

    /// Steps discarded before averaging
    #[arg(long)]
    equilibration: Option<usize>,

    #[arg(long)]
    seed: Option<u64>,

    /// Directory for the per-step energy log
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Write log messages to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl Args {
    fn apply_overrides(&self, config: &mut SimulationConfig) -> Result<()> {
        if let Some(side) = self.side {
            config.side = side;
        }
        if let Some(temperature) = self.temperature {
            config.temperature = temperature;
        }
        if let Some(field) = self.field {
            config.field = field;
        }
        if let Some(name) = &self.algorithm {
            config.algorithm = name.parse()?;
        }
        if let Some(steps) = self.steps {
            config.n_steps = steps;
        }
        if let Some(equilibration) = self.equilibration {
            config.n_equilibration = equilibration;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    setup_output(args.output.as_deref()).wrap_err("Unable to set up log output")?;

    let mut config = match &args.config {
        Some(path) => {
            info!("Reading configuration from: {}", path.display());
            read_simulation_config(path)
                .wrap_err_with(|| format!("Unable to read configuration file: {}", path.display()))?
        }
        None => SimulationConfig::default(),
    };
    args.apply_overrides(&mut config)?;
    config.validate().wrap_err("Invalid simulation configuration")?;
    info!("Configuration loaded:\n{:?}", config);

    let mut simulation = MCMCSimulation::from_config(&config)?;
    let log_path = EnergyLog::path_for(&config.output_dir, config.algorithm);
    let mut log = EnergyLog::create(&config.output_dir, config.algorithm)
        .wrap_err_with(|| format!("Unable to create energy log: {}", log_path.display()))?;

    let results = simulation
        .run_with_log(config.algorithm, config.n_steps, config.n_equilibration, &mut log)
        .wrap_err("Simulation run failed")?;
    info!("Energy log written to: {}", log_path.display());

    println!("{results}");
    Ok(())
}

//! Simulation driver: runs a chain of updates and averages observables.

use std::fmt;
use std::io::Write;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::error::IsingError;
use crate::io::{validate_steps, EnergyLog, SimulationConfig, StartState};
use crate::lattice::{analysis, Lattice};
use super::algorithm::Algorithm;
use super::statistics::{autocorrelation_time, blocking_error, RunStatistics};
use super::traits::MonteCarloUpdate;

/// Results of a Monte Carlo run.
#[derive(Debug, Clone)]
pub struct MCMCResults {
    pub algorithm: Algorithm,
    pub temperature: f64,
    pub field: f64,
    pub n_sites: usize,
    pub n_steps: usize,
    pub n_equilibration: usize,
    /// Mean energy over the production steps
    pub energy: f64,
    /// Blocking estimate of the error on `energy`
    pub energy_error: f64,
    pub autocorrelation_time: f64,
    pub magnetization: f64,
    pub abs_magnetization: f64,
    pub specific_heat: f64,
    pub susceptibility: f64,
    /// Mean |M| per site relative to the saturated ground state
    pub relative_order: f64,
    pub rejected: usize,
    /// Mean number of spins a proposal covered (cluster size for Wolff)
    pub mean_proposal_size: f64,
    /// Energy after every step, equilibration included
    pub energies: Vec<f64>,
}

impl MCMCResults {
    fn from_statistics(
        stats: &RunStatistics,
        algorithm: Algorithm,
        lattice: &Lattice,
        n_equilibration: usize,
    ) -> Self {
        let temperature = lattice.temperature();
        let n_sites = lattice.count();
        let production = stats.production_energies();
        let tau = autocorrelation_time(production);
        let saturated = analysis::ground_state_magnetization_per_site(lattice.params());
        let abs_magnetization = stats.mean_abs_magnetization();
        let relative_order = if saturated == 0.0 {
            0.0
        } else {
            abs_magnetization / (n_sites as f64 * saturated.abs())
        };

        Self {
            algorithm,
            temperature,
            field: lattice.params().field,
            n_sites,
            n_steps: stats.n_steps(),
            n_equilibration,
            energy: stats.mean_energy(),
            energy_error: blocking_error(production, tau),
            autocorrelation_time: tau,
            magnetization: stats.mean_magnetization(),
            abs_magnetization,
            specific_heat: stats.energy_variance() / (temperature * temperature * n_sites as f64),
            susceptibility: stats.magnetization_variance() / (temperature * n_sites as f64),
            relative_order,
            rejected: stats.n_rejected(),
            mean_proposal_size: stats.mean_proposal_size(),
            energies: stats.energies().to_vec(),
        }
    }

    pub fn accepted(&self) -> usize {
        self.n_steps - self.rejected
    }

    pub fn acceptance_rate(&self) -> f64 {
        self.accepted() as f64 / self.n_steps as f64
    }

    /// Temperature in units of the Onsager critical temperature.
    pub fn reduced_temperature(&self) -> f64 {
        self.temperature / analysis::critical_temperature()
    }
}

impl fmt::Display for MCMCResults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} Simulation Results", self.algorithm)?;
        writeln!(f, "----------------------------------------")?;
        writeln!(f, "temperature:         {}", self.temperature)?;
        writeln!(f, "T / T_c:             {:.4}", self.reduced_temperature())?;
        writeln!(f, "avg. energy:         {:.6} ± {:.6}", self.energy, self.energy_error)?;
        writeln!(f, "field strength:      {}", self.field)?;
        writeln!(f, "avg. magnetization:  {:.6}", self.magnetization)?;
        writeln!(f, "avg. |magnetization|: {:.6}", self.abs_magnetization)?;
        writeln!(f, "|m| / m_sat:         {:.4}", self.relative_order)?;
        writeln!(f, "specific heat:       {:.6}", self.specific_heat)?;
        writeln!(f, "susceptibility:      {:.6}", self.susceptibility)?;
        writeln!(f, "rejected moves:      {} of {}", self.rejected, self.n_steps)?;
        writeln!(f, "autocorrelation time: {:.2} steps", self.autocorrelation_time)?;
        if self.algorithm == Algorithm::Wolff {
            writeln!(f, "mean cluster size:   {:.2}", self.mean_proposal_size)?;
        }
        Ok(())
    }
}

/// Monte Carlo driver owning one lattice and one random stream.
pub struct MCMCSimulation {
    lattice: Lattice,
    rng: StdRng,
    progress_interval: usize,
}

impl MCMCSimulation {
    pub fn new(lattice: Lattice, rng: StdRng) -> Self {
        Self {
            lattice,
            rng,
            progress_interval: 0,
        }
    }

    /// Build the lattice and random stream described by `config`.
    pub fn from_config(config: &SimulationConfig) -> Result<Self, IsingError> {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let params = config.lattice_params();
        let lattice = match config.start {
            StartState::Random => Lattice::new(config.dims, config.side, params, &mut rng)?,
            StartState::Ordered => {
                if config.dims != 2 {
                    return Err(IsingError::UnsupportedDimension(config.dims));
                }
                Lattice::ordered(config.side, params)?
            }
        };
        Ok(Self::new(lattice, rng).with_progress_interval(config.progress_interval))
    }

    /// Log progress every `interval` steps; 0 turns progress logging off.
    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval;
        self
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    /// Run `n_steps` updates, discarding the first `n_equilibration` from the averages.
    pub fn run(
        &mut self,
        algorithm: Algorithm,
        n_steps: usize,
        n_equilibration: usize,
    ) -> Result<MCMCResults, IsingError> {
        self.run_with_log(algorithm, n_steps, n_equilibration, &mut EnergyLog::discard())
    }

    /// Same as [`run`](Self::run), writing every step's energy to `log`.
    ///
    /// A failed write aborts the run; the lattice keeps the last committed
    /// configuration.
    pub fn run_with_log<W: Write>(
        &mut self,
        algorithm: Algorithm,
        n_steps: usize,
        n_equilibration: usize,
        log: &mut EnergyLog<W>,
    ) -> Result<MCMCResults, IsingError> {
        validate_steps(n_steps, n_equilibration)?;
        info!(
            "Starting {} run: {}x{} lattice, T={}, H={}, {} steps ({} equilibration)",
            algorithm,
            self.lattice.side(),
            self.lattice.side(),
            self.lattice.temperature(),
            self.lattice.params().field,
            n_steps,
            n_equilibration
        );

        let mut updater = algorithm.updater(self.lattice.count());
        let mut stats = RunStatistics::new(n_steps, n_equilibration);

        for step in 0..n_steps {
            let outcome = updater.step(&mut self.lattice, &mut self.rng);
            let magnetization = self.lattice.magnetization();
            stats.record(step, &outcome, magnetization);
            log.record(step, outcome.energy)?;

            if self.progress_interval > 0 && (step + 1) % self.progress_interval == 0 {
                debug!(
                    "step {}/{}: energy={}, magnetization={}, rejected={}",
                    step + 1,
                    n_steps,
                    outcome.energy,
                    magnetization,
                    stats.n_rejected()
                );
            }
        }
        log.flush()?;

        let results =
            MCMCResults::from_statistics(&stats, algorithm, &self.lattice, n_equilibration);
        info!(
            "Finished {} run: <E>={:.6}, <M>={:.6}, rejected {}",
            algorithm, results.energy, results.magnetization, results.rejected
        );
        Ok(results)
    }
}

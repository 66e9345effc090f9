//! Running sums and error estimates for a single Monte Carlo run.

use super::traits::StepOutcome;

/// Per-run accumulators. Steps before `n_equilibration` are logged but not
/// averaged.
///
/// The mean accessors assume at least one production step was recorded,
/// which the driver guarantees by validating the step counts first.
#[derive(Debug, Clone)]
pub(crate) struct RunStatistics {
    n_equilibration: usize,
    n_averaged: usize,
    n_rejected: usize,
    flipped_sum: usize,
    energy_sum: f64,
    energy_sq_sum: f64,
    magnetization_sum: f64,
    magnetization_sq_sum: f64,
    abs_magnetization_sum: f64,
    energies: Vec<f64>,
}

impl RunStatistics {
    pub fn new(n_steps: usize, n_equilibration: usize) -> Self {
        Self {
            n_equilibration,
            n_averaged: 0,
            n_rejected: 0,
            flipped_sum: 0,
            energy_sum: 0.0,
            energy_sq_sum: 0.0,
            magnetization_sum: 0.0,
            magnetization_sq_sum: 0.0,
            abs_magnetization_sum: 0.0,
            energies: Vec::with_capacity(n_steps),
        }
    }

    /// Record step `step` and the magnetization it left behind.
    pub fn record(&mut self, step: usize, outcome: &StepOutcome, magnetization: f64) {
        if !outcome.accepted {
            self.n_rejected += 1;
        }
        self.flipped_sum += outcome.proposal_size;
        self.energies.push(outcome.energy);

        if step >= self.n_equilibration {
            self.n_averaged += 1;
            self.energy_sum += outcome.energy;
            self.energy_sq_sum += outcome.energy * outcome.energy;
            self.magnetization_sum += magnetization;
            self.magnetization_sq_sum += magnetization * magnetization;
            self.abs_magnetization_sum += magnetization.abs();
        }
    }

    pub fn n_steps(&self) -> usize {
        self.energies.len()
    }

    pub fn n_averaged(&self) -> usize {
        self.n_averaged
    }

    pub fn n_rejected(&self) -> usize {
        self.n_rejected
    }

    /// Energy of every recorded step, equilibration included.
    pub fn energies(&self) -> &[f64] {
        &self.energies
    }

    /// Energies that enter the averages.
    pub fn production_energies(&self) -> &[f64] {
        &self.energies[self.n_equilibration.min(self.energies.len())..]
    }

    /// Mean number of spins covered by a proposal.
    pub fn mean_proposal_size(&self) -> f64 {
        if self.energies.is_empty() {
            return 0.0;
        }
        self.flipped_sum as f64 / self.energies.len() as f64
    }

    fn mean(&self, sum: f64) -> f64 {
        debug_assert!(self.n_averaged > 0, "averages need at least one production step");
        sum / self.n_averaged as f64
    }

    pub fn mean_energy(&self) -> f64 {
        self.mean(self.energy_sum)
    }

    pub fn mean_magnetization(&self) -> f64 {
        self.mean(self.magnetization_sum)
    }

    pub fn mean_abs_magnetization(&self) -> f64 {
        self.mean(self.abs_magnetization_sum)
    }

    /// <E²> - <E>²
    pub fn energy_variance(&self) -> f64 {
        let mean = self.mean_energy();
        (self.mean(self.energy_sq_sum) - mean * mean).max(0.0)
    }

    /// <M²> - <M>²
    pub fn magnetization_variance(&self) -> f64 {
        let mean = self.mean_magnetization();
        (self.mean(self.magnetization_sq_sum) - mean * mean).max(0.0)
    }
}

/// Normalized autocovariance of mean-centered samples at `lag`.
fn autocovariance(centered: &[f64], lag: usize, variance: f64) -> f64 {
    let pairs = centered.len() - lag;
    let sum: f64 = centered.iter().zip(&centered[lag..]).map(|(a, b)| a * b).sum();
    sum / (pairs as f64 * variance)
}

/// Integrated autocorrelation time, summing lags up to the first negative
/// autocovariance.
pub fn autocorrelation_time(samples: &[f64]) -> f64 {
    let n = samples.len();
    if n < 2 {
        return 1.0;
    }
    let mean = samples.iter().sum::<f64>() / n as f64;
    let centered: Vec<f64> = samples.iter().map(|&x| x - mean).collect();
    let variance = centered.iter().map(|d| d * d).sum::<f64>() / n as f64;
    if variance == 0.0 {
        return 1.0;
    }

    let tail: f64 = (1..n / 2)
        .map(|lag| autocovariance(&centered, lag, variance))
        .take_while(|&rho| rho >= 0.0)
        .sum();
    1.0 + 2.0 * tail
}

/// Standard error of the mean using blocks of about twice the autocorrelation time.
pub fn blocking_error(samples: &[f64], autocorrelation_time: f64) -> f64 {
    let block_size = ((2.0 * autocorrelation_time).ceil() as usize).max(1);
    let n_blocks = samples.len() / block_size;

    if n_blocks < 2 {
        return 0.0;
    }

    let block_means: Vec<f64> = samples
        .chunks_exact(block_size)
        .map(|block| block.iter().sum::<f64>() / block_size as f64)
        .collect();

    let mean = block_means.iter().sum::<f64>() / n_blocks as f64;
    let variance = block_means.iter()
        .map(|&x| (x - mean).powi(2))
        .sum::<f64>() / (n_blocks - 1) as f64;

    (variance / n_blocks as f64).sqrt()
}

//! Traits for Monte Carlo lattice updates.

use rand::Rng;

use crate::lattice::Lattice;
use super::cluster::Cluster;

/// A candidate lattice change, not yet applied.
#[derive(Debug, Clone)]
pub enum Proposal {
    /// Flip a single spin
    Site(usize),
    /// Flip a whole cluster as a unit
    Cluster(Cluster),
}

impl Proposal {
    /// Sites that the move would flip.
    pub fn sites(&self) -> &[usize] {
        match self {
            Proposal::Site(i) => std::slice::from_ref(i),
            Proposal::Cluster(cluster) => cluster.sites(),
        }
    }
}

/// Energies before and after a tentative move.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Evaluation {
    pub old_energy: f64,
    pub new_energy: f64,
}

impl Evaluation {
    pub fn delta_e(&self) -> f64 {
        self.new_energy - self.old_energy
    }
}

/// What a single Monte Carlo step did to the lattice.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StepOutcome {
    pub accepted: bool,
    /// Energy of the configuration left behind by the step
    pub energy: f64,
    /// Number of spins the proposal covered
    pub proposal_size: usize,
}

/// Boltzmann acceptance probability min(1, exp(-β ΔE)).
pub fn acceptance_probability(delta_e: f64, beta: f64) -> f64 {
    if delta_e <= 0.0 {
        1.0
    } else {
        (-beta * delta_e).exp()
    }
}

/// One Monte Carlo update: propose, evaluate, accept or reject, commit.
pub trait MonteCarloUpdate {
    /// Pick a candidate move for the current lattice state.
    fn propose<R: Rng + ?Sized>(&mut self, lattice: &Lattice, rng: &mut R) -> Proposal;

    /// Energy change of `proposal`. Flips the proposed sites, measures, and
    /// flips them back, so the lattice is unchanged on return.
    fn evaluate(&self, lattice: &mut Lattice, proposal: &Proposal) -> Evaluation {
        let old_energy = lattice.energy();
        for &i in proposal.sites() {
            lattice.flip(i);
        }
        let new_energy = lattice.energy();
        for &i in proposal.sites() {
            lattice.flip(i);
        }
        Evaluation { old_energy, new_energy }
    }

    /// Metropolis criterion. At most one uniform draw is made, and the
    /// decision it yields is the only one used for the step.
    fn accept<R: Rng + ?Sized>(&self, evaluation: &Evaluation, beta: f64, rng: &mut R) -> bool {
        let delta_e = evaluation.delta_e();
        delta_e <= 0.0 || rng.gen::<f64>() < acceptance_probability(delta_e, beta)
    }

    /// Apply an accepted proposal to the lattice.
    fn commit(&self, lattice: &mut Lattice, proposal: &Proposal, accepted: bool) {
        if accepted {
            for &i in proposal.sites() {
                lattice.flip(i);
            }
        }
    }

    /// Run a full step on `lattice`.
    fn step<R: Rng + ?Sized>(&mut self, lattice: &mut Lattice, rng: &mut R) -> StepOutcome {
        let proposal = self.propose(lattice, rng);
        let evaluation = self.evaluate(lattice, &proposal);
        let accepted = self.accept(&evaluation, lattice.beta(), rng);
        self.commit(lattice, &proposal, accepted);

        let energy = if accepted { evaluation.new_energy } else { evaluation.old_energy };
        StepOutcome {
            accepted,
            energy,
            proposal_size: proposal.sites().len(),
        }
    }
}

//! Single-spin-flip Metropolis update.

use rand::Rng;
use rand_distr::{Distribution, Uniform};

use crate::lattice::Lattice;
use super::traits::{MonteCarloUpdate, Proposal};

/// Proposes flipping one uniformly chosen spin of a lattice with `count` sites.
#[derive(Debug, Clone)]
pub struct Metropolis {
    site: Uniform<usize>,
}

impl Metropolis {
    pub fn new(count: usize) -> Self {
        Self {
            site: Uniform::new(0, count),
        }
    }
}

impl MonteCarloUpdate for Metropolis {
    fn propose<R: Rng + ?Sized>(&mut self, _lattice: &Lattice, rng: &mut R) -> Proposal {
        Proposal::Site(self.site.sample(rng))
    }
}

//! Wolff cluster update.

use rand::Rng;
use rand_distr::{Distribution, Uniform};

use crate::lattice::Lattice;
use super::cluster::ClusterBuilder;
use super::traits::{MonteCarloUpdate, Proposal};

/// Proposes flipping a cluster grown from a uniformly chosen seed.
#[derive(Debug, Clone)]
pub struct Wolff {
    seed: Uniform<usize>,
    builder: ClusterBuilder,
}

impl Wolff {
    pub fn new(count: usize) -> Self {
        Self {
            seed: Uniform::new(0, count),
            builder: ClusterBuilder::new(count),
        }
    }
}

impl MonteCarloUpdate for Wolff {
    fn propose<R: Rng + ?Sized>(&mut self, lattice: &Lattice, rng: &mut R) -> Proposal {
        let seed = self.seed.sample(rng);
        let cluster = self.builder.grow(lattice, seed, lattice.temperature(), rng);
        Proposal::Cluster(cluster)
    }
}

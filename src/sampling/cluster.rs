//! Wolff cluster growth.

use rand::Rng;

use crate::lattice::{Lattice, KB};

/// A set of same-spin sites that flip together.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    seed: usize,
    sites: Vec<usize>,
}

impl Cluster {
    pub fn seed(&self) -> usize {
        self.seed
    }

    /// Member sites in discovery order, seed first.
    pub fn sites(&self) -> &[usize] {
        &self.sites
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    /// Always false; the seed is a member of every cluster.
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    pub fn contains(&self, site: usize) -> bool {
        self.sites.contains(&site)
    }
}

/// Probability that a bond between two aligned spins freezes,
/// P = 1 - exp(-2J / (k_B T)). Zero for non-ferromagnetic coupling.
pub fn bond_probability(coupling: f64, temperature: f64) -> f64 {
    (1.0 - (-2.0 * coupling / (KB * temperature)).exp()).max(0.0)
}

/// Grows clusters with an explicit stack and a reusable visited arena.
#[derive(Debug, Clone, Default)]
pub struct ClusterBuilder {
    visited: Vec<bool>,
    stack: Vec<usize>,
}

impl ClusterBuilder {
    pub fn new(count: usize) -> Self {
        Self {
            visited: vec![false; count],
            stack: Vec::new(),
        }
    }

    /// Grow a cluster from `seed` at the given temperature.
    ///
    /// Each aligned, not yet visited neighbor of a member joins when a
    /// uniform draw falls below the bond probability. Sites across a spin
    /// boundary never join.
    pub fn grow<R: Rng + ?Sized>(
        &mut self,
        lattice: &Lattice,
        seed: usize,
        temperature: f64,
        rng: &mut R,
    ) -> Cluster {
        if self.visited.len() != lattice.count() {
            self.visited = vec![false; lattice.count()];
        }
        let add_probability = bond_probability(lattice.params().coupling, temperature);
        let seed_spin = lattice.get(seed);
        let mut sites = Vec::new();

        self.visited[seed] = true;
        self.stack.push(seed);

        while let Some(site) = self.stack.pop() {
            sites.push(site);
            for nb in lattice.neighbors(site) {
                if self.visited[nb] || lattice.get(nb) != seed_spin {
                    continue;
                }
                if rng.gen::<f64>() < add_probability {
                    self.visited[nb] = true;
                    self.stack.push(nb);
                }
            }
        }

        // leave the arena clean for the next step
        for &site in &sites {
            self.visited[site] = false;
        }

        Cluster { seed, sites }
    }
}

//! Lattice module - spin configuration, periodic topology and observables.

mod spin_lattice;
pub mod analysis;

pub use spin_lattice::{Lattice, LatticeParams, KB};

//! Periodic square lattice of Ising spins.
//!
//! Spins live in an `L x L` matrix whose row is the `x` coordinate and whose
//! column is the `y` coordinate. nalgebra stores matrices column-major, so
//! the linear matrix index is exactly the site index `x + L * y`.

use std::fmt;

use nalgebra::DMatrix;
use rand::Rng;

use crate::error::IsingError;

/// Boltzmann constant in reduced units.
pub const KB: f64 = 1.0;

/// Simulation-wide scalars, fixed once the lattice is built.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LatticeParams {
    /// Temperature in units of J/k_B
    pub temperature: f64,
    /// Coupling constant J
    pub coupling: f64,
    /// External magnetic field H
    pub field: f64,
    /// Magnetic moment per spin
    pub moment: f64,
}

impl LatticeParams {
    /// Unit coupling and moment, no external field.
    pub fn new(temperature: f64) -> Self {
        Self {
            temperature,
            coupling: 1.0,
            field: 0.0,
            moment: 1.0,
        }
    }

    pub fn with_field(mut self, field: f64) -> Self {
        self.field = field;
        self
    }

    pub fn with_coupling(mut self, coupling: f64) -> Self {
        self.coupling = coupling;
        self
    }

    pub fn with_moment(mut self, moment: f64) -> Self {
        self.moment = moment;
        self
    }

    fn validate(&self) -> Result<(), IsingError> {
        if !(self.temperature.is_finite() && self.temperature > 0.0) {
            return Err(IsingError::InvalidParameter(format!(
                "temperature must be positive and finite, got {}",
                self.temperature
            )));
        }
        for (name, value) in [
            ("coupling", self.coupling),
            ("field", self.field),
            ("moment", self.moment),
        ] {
            if !value.is_finite() {
                return Err(IsingError::InvalidParameter(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// 2D Ising lattice with periodic boundary conditions.
#[derive(Debug, Clone)]
pub struct Lattice {
    side: usize,
    spins: DMatrix<i8>,
    params: LatticeParams,
    beta: f64,
}

impl Lattice {
    /// Create a lattice with a uniformly random +1/-1 spin on every site.
    ///
    /// `dims` is kept explicit so callers asking for anything other than a
    /// square lattice get an error instead of a silently wrong model.
    pub fn new<R: Rng + ?Sized>(
        dims: usize,
        side: usize,
        params: LatticeParams,
        rng: &mut R,
    ) -> Result<Self, IsingError> {
        if dims != 2 {
            return Err(IsingError::UnsupportedDimension(dims));
        }
        let spins = DMatrix::from_fn(side, side, |_, _| {
            if rng.gen_bool(0.5) { 1i8 } else { -1i8 }
        });
        Self::build(side, spins, params)
    }

    /// Create a lattice with all spins up (ordered state).
    pub fn ordered(side: usize, params: LatticeParams) -> Result<Self, IsingError> {
        Self::build(side, DMatrix::from_element(side, side, 1i8), params)
    }

    /// Create a lattice from explicit spins given in site order `x + side * y`.
    pub fn from_spins(
        side: usize,
        spins: Vec<i8>,
        params: LatticeParams,
    ) -> Result<Self, IsingError> {
        if spins.len() != side * side {
            return Err(IsingError::InvalidParameter(format!(
                "expected {} spins for a {side}x{side} lattice, got {}",
                side * side,
                spins.len()
            )));
        }
        if let Some(bad) = spins.iter().find(|&&s| s != 1 && s != -1) {
            return Err(IsingError::InvalidParameter(format!(
                "spins must be +1 or -1, got {bad}"
            )));
        }
        Self::build(side, DMatrix::from_vec(side, side, spins), params)
    }

    fn build(side: usize, spins: DMatrix<i8>, params: LatticeParams) -> Result<Self, IsingError> {
        if side < 2 {
            return Err(IsingError::InvalidParameter(format!(
                "lattice edge must hold at least 2 spins, got {side}"
            )));
        }
        params.validate()?;
        Ok(Self {
            side,
            spins,
            params,
            beta: 1.0 / (KB * params.temperature),
        })
    }

    /// Spins along one edge.
    pub fn side(&self) -> usize {
        self.side
    }

    /// Total number of sites, `side^2`.
    pub fn count(&self) -> usize {
        self.side * self.side
    }

    pub fn params(&self) -> &LatticeParams {
        &self.params
    }

    pub fn temperature(&self) -> f64 {
        self.params.temperature
    }

    /// Inverse temperature 1/(k_B T).
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Left, right, up and down neighbors of site `i` with periodic wraparound.
    ///
    /// For `side == 2` left and right (and up and down) coincide.
    pub fn neighbors(&self, i: usize) -> [usize; 4] {
        let l = self.side;
        let (x, y) = (i % l, i / l);
        let left = (x + l - 1) % l;
        let right = (x + 1) % l;
        let up = (y + l - 1) % l;
        let down = (y + 1) % l;
        [left + l * y, right + l * y, x + l * up, x + l * down]
    }

    /// Spin at site `i`.
    #[inline]
    pub fn get(&self, i: usize) -> i8 {
        self.spins[i]
    }

    /// Negate the spin at site `i`.
    #[inline]
    pub fn flip(&mut self, i: usize) {
        self.spins[i] = -self.spins[i];
    }

    /// Reverse every spin.
    pub fn flip_all(&mut self) {
        for i in 0..self.count() {
            self.flip(i);
        }
    }

    /// Spins in site order.
    pub fn spins(&self) -> &[i8] {
        self.spins.as_slice()
    }

    /// Total energy, recomputed from scratch.
    ///
    /// Each bond is visited from both endpoints, hence the half factor on
    /// the coupling term.
    pub fn energy(&self) -> f64 {
        let LatticeParams { coupling, field, moment, .. } = self.params;
        let mut energy = 0.0;
        for i in 0..self.count() {
            let spin = self.get(i) as f64;
            energy -= moment * field * spin;
            let neighbor_sum: f64 =
                self.neighbors(i).iter().map(|&j| self.get(j) as f64).sum();
            energy -= 0.5 * coupling * spin * neighbor_sum;
        }
        energy
    }

    /// Total magnetization `moment * sum(spins)`.
    pub fn magnetization(&self) -> f64 {
        self.params.moment * self.spins.iter().map(|&s| s as f64).sum::<f64>()
    }
}

impl fmt::Display for Lattice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.side {
            for x in 0..self.side {
                let symbol = if self.spins[(x, y)] > 0 { '+' } else { '-' };
                write!(f, "{symbol}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn random_lattice(side: usize, params: LatticeParams, seed: u64) -> Lattice {
        let mut rng = StdRng::seed_from_u64(seed);
        Lattice::new(2, side, params, &mut rng).unwrap()
    }

    #[test]
    fn test_lattice_creation() {
        let lattice = random_lattice(10, LatticeParams::new(2.0), 1);
        assert_eq!(lattice.side(), 10);
        assert_eq!(lattice.count(), 100);
        assert_eq!(lattice.spins().len(), 100);
        assert_relative_eq!(lattice.beta(), 0.5);
        assert!(lattice.spins().iter().all(|&s| s == 1 || s == -1));
    }

    #[test]
    fn test_unsupported_dimension() {
        let mut rng = StdRng::seed_from_u64(0);
        for dims in [1, 3, 4] {
            let err = Lattice::new(dims, 4, LatticeParams::new(1.0), &mut rng).unwrap_err();
            assert!(matches!(err, IsingError::UnsupportedDimension(d) if d == dims));
        }
    }

    #[test]
    fn test_rejects_bad_parameters() {
        assert!(Lattice::ordered(1, LatticeParams::new(1.0)).is_err());
        assert!(Lattice::ordered(4, LatticeParams::new(0.0)).is_err());
        assert!(Lattice::ordered(4, LatticeParams::new(-1.0)).is_err());
        assert!(Lattice::ordered(4, LatticeParams::new(f64::NAN)).is_err());
        assert!(Lattice::from_spins(2, vec![1, -1, 0, 1], LatticeParams::new(1.0)).is_err());
        assert!(Lattice::from_spins(2, vec![1, -1, 1], LatticeParams::new(1.0)).is_err());
    }

    #[test]
    fn test_ordered_state() {
        let lattice = Lattice::ordered(5, LatticeParams::new(1.0)).unwrap();
        assert_relative_eq!(lattice.magnetization(), 25.0);
        assert_relative_eq!(lattice.energy() / 25.0, -2.0, epsilon = 1e-10);
    }

    #[test]
    fn test_row_major_neighbors() {
        let lattice = Lattice::ordered(4, LatticeParams::new(1.0)).unwrap();
        // site 5 = (1, 1)
        assert_eq!(lattice.neighbors(5), [4, 6, 1, 9]);
        // site 0 = (0, 0) wraps on both axes
        assert_eq!(lattice.neighbors(0), [3, 1, 12, 4]);
        // site 15 = (3, 3)
        assert_eq!(lattice.neighbors(15), [14, 12, 11, 3]);
    }

    #[test]
    fn test_neighbor_closure_and_symmetry() {
        for side in [2, 3, 5, 8] {
            let lattice = Lattice::ordered(side, LatticeParams::new(1.0)).unwrap();
            for i in 0..lattice.count() {
                let nbs = lattice.neighbors(i);
                assert_eq!(nbs.len(), 4);
                for &j in &nbs {
                    assert!(j < lattice.count());
                    assert!(lattice.neighbors(j).contains(&i));
                }
                if side > 2 {
                    let mut sorted = nbs.to_vec();
                    sorted.sort_unstable();
                    sorted.dedup();
                    assert_eq!(sorted.len(), 4);
                }
            }
        }
    }

    #[test]
    fn test_flip_is_involution() {
        let mut lattice = random_lattice(6, LatticeParams::new(2.0), 7);
        let before = lattice.spins().to_vec();
        lattice.flip(17);
        assert_eq!(lattice.get(17), -before[17]);
        lattice.flip(17);
        assert_eq!(lattice.spins(), before.as_slice());
    }

    #[test]
    fn test_single_flip_energy() {
        let mut lattice = Lattice::ordered(3, LatticeParams::new(1.0)).unwrap();
        let initial = lattice.energy();
        lattice.flip(4);
        // one spin against four aligned neighbors costs 8J
        assert_relative_eq!(lattice.energy() - initial, 8.0, epsilon = 1e-10);
    }

    #[test]
    fn test_two_by_two_energy_bounds() {
        let params = LatticeParams::new(2.0);
        let mut lattice = Lattice::ordered(2, params).unwrap();
        assert_relative_eq!(lattice.energy(), -8.0);
        // checkerboard: every bond is unsatisfied
        lattice.flip(0);
        lattice.flip(3);
        assert_relative_eq!(lattice.energy(), 8.0);
    }

    #[test]
    fn test_global_reversal_symmetry() {
        let mut lattice = random_lattice(6, LatticeParams::new(2.0), 11);
        let energy = lattice.energy();
        lattice.flip_all();
        assert_relative_eq!(lattice.energy(), energy, epsilon = 1e-10);

        let params = LatticeParams::new(2.0).with_field(0.7).with_moment(1.5);
        let mut lattice = random_lattice(6, params, 12);
        let spin_sum: f64 = lattice.spins().iter().map(|&s| s as f64).sum();
        let field_term = -params.moment * params.field * spin_sum;
        let bond_term = lattice.energy() - field_term;
        lattice.flip_all();
        assert_relative_eq!(lattice.energy(), bond_term - field_term, epsilon = 1e-10);
    }

    #[test]
    fn test_field_and_moment_scale_magnetization() {
        let params = LatticeParams::new(1.0).with_field(0.5).with_moment(2.0).with_coupling(0.0);
        let lattice = Lattice::ordered(3, params).unwrap();
        assert_relative_eq!(lattice.magnetization(), 18.0);
        assert_relative_eq!(lattice.energy(), -9.0);
    }

    #[test]
    fn test_display() {
        let lattice = Lattice::from_spins(2, vec![1, -1, -1, 1], LatticeParams::new(1.0)).unwrap();
        assert_eq!(lattice.to_string(), "+-\n-+\n");
    }
}

//! Closed set of update algorithms and their runtime dispatch.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::IsingError;
use crate::lattice::Lattice;
use super::metropolis::Metropolis;
use super::traits::{MonteCarloUpdate, Proposal};
use super::wolff::Wolff;

/// Which update the driver runs.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Algorithm {
    Metropolis,
    Wolff,
}

impl Algorithm {
    /// Name of the per-step energy log written for this algorithm.
    pub fn log_file_name(&self) -> &'static str {
        match self {
            Algorithm::Metropolis => "metropolis_energy",
            Algorithm::Wolff => "wolff_energy",
        }
    }

    /// Build the stateful updater for a lattice with `count` sites.
    pub fn updater(&self, count: usize) -> Updater {
        match self {
            Algorithm::Metropolis => Updater::Metropolis(Metropolis::new(count)),
            Algorithm::Wolff => Updater::Wolff(Wolff::new(count)),
        }
    }
}

impl FromStr for Algorithm {
    type Err = IsingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "metropolis" => Ok(Algorithm::Metropolis),
            "wolff" => Ok(Algorithm::Wolff),
            _ => Err(IsingError::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

impl TryFrom<String> for Algorithm {
    type Error = IsingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Metropolis => write!(f, "Metropolis"),
            Algorithm::Wolff => write!(f, "Wolff"),
        }
    }
}

/// Updater state for one run, dispatching to the chosen algorithm.
#[derive(Debug, Clone)]
pub enum Updater {
    Metropolis(Metropolis),
    Wolff(Wolff),
}

impl MonteCarloUpdate for Updater {
    fn propose<R: Rng + ?Sized>(&mut self, lattice: &Lattice, rng: &mut R) -> Proposal {
        match self {
            Updater::Metropolis(metropolis) => metropolis.propose(lattice, rng),
            Updater::Wolff(wolff) => wolff.propose(lattice, rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_algorithm_names() {
        assert_eq!("Metropolis".parse::<Algorithm>().unwrap(), Algorithm::Metropolis);
        assert_eq!("wolff".parse::<Algorithm>().unwrap(), Algorithm::Wolff);
        assert_eq!(" WOLFF ".parse::<Algorithm>().unwrap(), Algorithm::Wolff);
    }

    #[test]
    fn test_unknown_algorithm_is_rejected() {
        let err = "Swendsen-Wang".parse::<Algorithm>().unwrap_err();
        assert!(matches!(err, IsingError::UnsupportedAlgorithm(name) if name == "Swendsen-Wang"));
    }

    #[test]
    fn test_yaml_round_trip() {
        let algorithm: Algorithm = serde_yaml::from_str("Wolff").unwrap();
        assert_eq!(algorithm, Algorithm::Wolff);
        assert!(serde_yaml::from_str::<Algorithm>("heatbath").is_err());
        assert_eq!(serde_yaml::to_string(&Algorithm::Metropolis).unwrap().trim(), "Metropolis");
    }

    #[test]
    fn test_log_file_names() {
        assert_eq!(Algorithm::Metropolis.log_file_name(), "metropolis_energy");
        assert_eq!(Algorithm::Wolff.log_file_name(), "wolff_energy");
    }

    #[test]
    fn test_updater_matches_algorithm() {
        assert!(matches!(Algorithm::Metropolis.updater(4), Updater::Metropolis(_)));
        assert!(matches!(Algorithm::Wolff.updater(4), Updater::Wolff(_)));
    }
}

use crate::core::error::ConfigurationError;
use crate::core::models::chain::BondAxis;
use nalgebra::{Unit, Vector3};

/// Default separation between bonded anchors of neighboring beads, in nm.
pub const DEFAULT_BOND_LENGTH: f64 = 0.01;
pub const DEFAULT_SEED: u64 = 21;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinorAxis {
    /// Bead length along the minor axis in nm.
    pub length: f64,
    pub axis: Unit<Vector3<f64>>,
}

/// Physical parameters of a polydisperse system of ellipsoid chains.
///
/// `n_chains[i]` chains of `chain_lengths[i]` beads are built for every `i`.
/// Lengths are in nanometres, masses in amu and density in g/cm³.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemConfig {
    pub n_chains: Vec<usize>,
    pub chain_lengths: Vec<usize>,
    pub bead_mass: f64,
    pub bead_length: f64,
    pub density: f64,
    pub bond_length: f64,
    pub major_axis: Unit<Vector3<f64>>,
    pub minor_axis: Option<MinorAxis>,
    pub bond_axis: BondAxis,
    pub seed: u64,
}

#[derive(Default)]
pub struct SystemConfigBuilder {
    n_chains: Option<Vec<usize>>,
    chain_lengths: Option<Vec<usize>>,
    bead_mass: Option<f64>,
    bead_length: Option<f64>,
    density: Option<f64>,
    bond_length: Option<f64>,
    major_axis: Option<Vector3<f64>>,
    minor_axis: Option<(f64, Vector3<f64>)>,
    bond_axis: Option<BondAxis>,
    seed: Option<u64>,
}

impl SystemConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn n_chains(mut self, counts: Vec<usize>) -> Self {
        self.n_chains = Some(counts);
        self
    }
    pub fn chain_lengths(mut self, lengths: Vec<usize>) -> Self {
        self.chain_lengths = Some(lengths);
        self
    }
    /// Shorthand for a monodisperse system.
    pub fn chains(self, count: usize, length: usize) -> Self {
        self.n_chains(vec![count]).chain_lengths(vec![length])
    }
    pub fn bead_mass(mut self, mass: f64) -> Self {
        self.bead_mass = Some(mass);
        self
    }
    pub fn bead_length(mut self, length: f64) -> Self {
        self.bead_length = Some(length);
        self
    }
    pub fn density(mut self, density: f64) -> Self {
        self.density = Some(density);
        self
    }
    pub fn bond_length(mut self, length: f64) -> Self {
        self.bond_length = Some(length);
        self
    }
    pub fn major_axis(mut self, axis: Vector3<f64>) -> Self {
        self.major_axis = Some(axis);
        self
    }
    pub fn minor_axis(mut self, length: f64, axis: Vector3<f64>) -> Self {
        self.minor_axis = Some((length, axis));
        self
    }
    pub fn bond_axis(mut self, axis: BondAxis) -> Self {
        self.bond_axis = Some(axis);
        self
    }
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn build(self) -> Result<SystemConfig, ConfigurationError> {
        let n_chains = self
            .n_chains
            .ok_or(ConfigurationError::MissingParameter("n_chains"))?;
        let chain_lengths = self
            .chain_lengths
            .ok_or(ConfigurationError::MissingParameter("chain_lengths"))?;
        if n_chains.len() != chain_lengths.len() {
            return Err(ConfigurationError::MismatchedLengths {
                n_chains: n_chains.len(),
                chain_lengths: chain_lengths.len(),
            });
        }
        if n_chains.is_empty() || n_chains.iter().all(|&n| n == 0) {
            return Err(ConfigurationError::EmptyChainList);
        }

        let config = SystemConfig {
            n_chains,
            chain_lengths,
            bead_mass: self
                .bead_mass
                .ok_or(ConfigurationError::MissingParameter("bead_mass"))?,
            bead_length: self
                .bead_length
                .ok_or(ConfigurationError::MissingParameter("bead_length"))?,
            density: self
                .density
                .ok_or(ConfigurationError::MissingParameter("density"))?,
            bond_length: self.bond_length.unwrap_or(DEFAULT_BOND_LENGTH),
            major_axis: match self.major_axis {
                Some(axis) => normalize("major_axis", axis)?,
                None => Vector3::x_axis(),
            },
            minor_axis: match self.minor_axis {
                Some((length, axis)) => Some(MinorAxis {
                    length,
                    axis: normalize("minor_axis", axis)?,
                }),
                None => None,
            },
            bond_axis: self.bond_axis.unwrap_or_default(),
            seed: self.seed.unwrap_or(DEFAULT_SEED),
        };

        positive("bead_mass", config.bead_mass)?;
        positive("bead_length", config.bead_length)?;
        positive("density", config.density)?;
        if !(config.bond_length >= 0.0) || !config.bond_length.is_finite() {
            return Err(ConfigurationError::InvalidParameter {
                name: "bond_length",
                value: config.bond_length,
            });
        }
        if let Some(minor) = config.minor_axis {
            positive("minor_length", minor.length)?;
        }
        Ok(config)
    }
}

/// Zero or non-finite directions are rejected; the reported value is the norm.
fn normalize(
    name: &'static str,
    axis: Vector3<f64>,
) -> Result<Unit<Vector3<f64>>, ConfigurationError> {
    let norm = axis.norm();
    if !norm.is_finite() {
        return Err(ConfigurationError::InvalidParameter { name, value: norm });
    }
    Unit::try_new(axis, f64::EPSILON)
        .ok_or(ConfigurationError::InvalidParameter { name, value: norm })
}

fn positive(name: &'static str, value: f64) -> Result<(), ConfigurationError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigurationError::InvalidParameter { name, value })
    }
}

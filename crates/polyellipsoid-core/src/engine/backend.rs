use super::error::EngineError;
use super::forces::{BondTable, PairTable};
use super::rigid::RigidBodyDefinition;
use crate::assembly::snapshot::Snapshot;
use nalgebra::Vector3;
use std::fmt;
use std::path::PathBuf;

pub const TRAJECTORY_FILE: &str = "sim_traj.gsd";
pub const SCALAR_LOG_FILE: &str = "sim_traj.txt";

/// Thermodynamic quantities written to the scalar log next to the step
/// counter, throughput and per-force energies.
pub const LOG_QUANTITIES: [&str; 6] = [
    "kinetic_temperature",
    "potential_energy",
    "kinetic_energy",
    "volume",
    "pressure",
    "pressure_tensor",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParticleFilter {
    All,
    RigidCenters,
}

impl fmt::Display for ParticleFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParticleFilter::All => write!(f, "all"),
            ParticleFilter::RigidCenters => write!(f, "rigid-centers"),
        }
    }
}

/// Constant-temperature integration method.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thermostat {
    pub kt: f64,
    pub tau: f64,
    pub filter: ParticleFilter,
}

/// Linear 0 → 1 ramp starting at `t_start` and lasting `t_ramp` steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ramp {
    pub t_start: u64,
    pub t_ramp: u64,
}

impl Ramp {
    pub fn value(&self, timestep: u64) -> f64 {
        let elapsed = timestep.saturating_sub(self.t_start);
        if timestep < self.t_start {
            0.0
        } else if elapsed >= self.t_ramp {
            1.0
        } else {
            elapsed as f64 / self.t_ramp as f64
        }
    }
}

/// Interpolates the box from `initial` to `target` along `ramp`, applied
/// every `period` steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxResize {
    pub initial: Vector3<f64>,
    pub target: Vector3<f64>,
    pub ramp: Ramp,
    pub period: u64,
}

impl BoxResize {
    pub fn box_at(&self, timestep: u64) -> Vector3<f64> {
        self.initial.lerp(&self.target, self.ramp.value(timestep))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntegratorSettings {
    pub dt: f64,
    pub integrate_rotational_dof: bool,
    /// Seed for momentum thermalization.
    pub seed: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriterKind {
    /// Binary frames of the full state; `dynamic` lists per-frame quantities
    /// beyond positions and orientations.
    Trajectory { dynamic: Vec<String> },
    /// Tabulated scalar quantities.
    ScalarLog { quantities: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriterSpec {
    pub kind: WriterKind,
    pub path: PathBuf,
    pub period: u64,
    pub overwrite: bool,
}

impl WriterSpec {
    pub fn trajectory(period: u64) -> Self {
        Self {
            kind: WriterKind::Trajectory {
                dynamic: vec!["momentum".to_string()],
            },
            path: PathBuf::from(TRAJECTORY_FILE),
            period,
            overwrite: true,
        }
    }

    pub fn scalar_log(period: u64) -> Self {
        let quantities = ["timestep", "tps"]
            .into_iter()
            .chain(LOG_QUANTITIES)
            .chain(["pair_energy", "bond_energy"])
            .map(String::from)
            .collect();
        Self {
            kind: WriterKind::ScalarLog { quantities },
            path: PathBuf::from(SCALAR_LOG_FILE),
            period,
            overwrite: true,
        }
    }
}

/// The molecular-dynamics backend driven by a [`Simulation`](super::simulation::Simulation).
///
/// Implementations own the integrator state. Every operation either succeeds
/// or reports an [`EngineError`]; callers never retry.
pub trait Engine {
    fn load_snapshot(&mut self, snapshot: &Snapshot) -> Result<(), EngineError>;

    fn set_forces(&mut self, pairs: &PairTable, bonds: &BondTable) -> Result<(), EngineError>;

    fn create_rigid_bodies(&mut self, body: &RigidBodyDefinition) -> Result<(), EngineError>;

    fn configure_integrator(&mut self, settings: &IntegratorSettings) -> Result<(), EngineError>;

    fn add_writer(&mut self, writer: &WriterSpec) -> Result<(), EngineError>;

    /// Installs `resize`, replacing any previous box resize.
    fn set_box_resize(&mut self, resize: &BoxResize) -> Result<(), EngineError>;

    /// Makes `thermostat` the sole integration method.
    fn set_method(&mut self, thermostat: &Thermostat) -> Result<(), EngineError>;

    /// Changes the temperature of the installed method in place.
    fn set_method_kt(&mut self, kt: f64) -> Result<(), EngineError>;

    fn thermalize(&mut self, filter: ParticleFilter, kt: f64) -> Result<(), EngineError>;

    fn run(&mut self, steps: u64) -> Result<(), EngineError>;

    fn box_lengths(&self) -> Vector3<f64>;

    fn timestep(&self) -> u64;
}

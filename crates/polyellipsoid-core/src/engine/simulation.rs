use super::backend::{
    BoxResize, Engine, IntegratorSettings, ParticleFilter, Ramp, Thermostat, WriterSpec,
};
use super::config::SimulationConfig;
use super::error::EngineError;
use super::forces::{BondTable, PairTable};
use super::rigid::{RigidBodyDefinition, inject_moments_of_inertia};
use super::schedule::AnnealSchedule;
use crate::assembly::snapshot::Snapshot;
use crate::assembly::system::System;
use crate::core::error::ConfigurationError;
use nalgebra::Vector3;
use tracing::{debug, info, instrument};

/// Temperature of the thermostat an anneal installs when none exists yet.
pub const DEFAULT_ANNEAL_KT: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    Shrinking,
    AtTemperature,
}

/// Sequences shrink, quench and anneal runs on an engine it exclusively owns.
///
/// The engine holds at most one integration method. A thermostat created by
/// any phase is kept and only has its temperature changed by later phases.
#[derive(Debug)]
pub struct Simulation<E: Engine> {
    engine: E,
    config: SimulationConfig,
    snapshot: Snapshot,
    target_box: Option<Vector3<f64>>,
    phase: Phase,
    ran_shrink: bool,
    method: Option<Thermostat>,
}

impl<E: Engine> Simulation<E> {
    /// Loads the assembled system into `engine` and sets up forces, the rigid
    /// constraint, the integrator and the output writers.
    #[instrument(skip_all, name = "simulation_setup")]
    pub fn new(system: &System, engine: E, config: SimulationConfig) -> Result<Self, EngineError> {
        let snapshot = system
            .snapshot()
            .cloned()
            .ok_or(ConfigurationError::MissingStructure)?;
        Self::from_snapshot(
            snapshot,
            system.target_box(),
            system.config().bond_length,
            engine,
            config,
        )
    }

    pub fn from_snapshot(
        mut snapshot: Snapshot,
        target_box: Option<Vector3<f64>>,
        bond_length: f64,
        mut engine: E,
        config: SimulationConfig,
    ) -> Result<Self, EngineError> {
        let pairs = PairTable::gay_berne(
            snapshot.types(),
            config.gay_berne,
            config.r_cut,
            config.nlist_buffer,
        );
        let bonds = BondTable::harmonic(snapshot.bond_types(), config.bond_k, bond_length);
        let body = RigidBodyDefinition::from_snapshot(&snapshot)?;
        inject_moments_of_inertia(&mut snapshot);

        engine.load_snapshot(&snapshot)?;
        engine.set_forces(&pairs, &bonds)?;
        engine.create_rigid_bodies(&body)?;
        engine.configure_integrator(&IntegratorSettings {
            dt: config.dt,
            integrate_rotational_dof: true,
            seed: config.seed,
        })?;
        engine.add_writer(&WriterSpec::trajectory(config.output.trajectory_period))?;
        engine.add_writer(&WriterSpec::scalar_log(config.output.log_period))?;

        info!(
            "Simulation ready: {} rigid bodies of {} constituents, {} particle types",
            snapshot.n_rigid_centers(),
            body.n_constituents(),
            snapshot.types().len()
        );

        Ok(Self {
            engine,
            config,
            snapshot,
            target_box,
            phase: Phase::Uninitialized,
            ran_shrink: false,
            method: None,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn ran_shrink(&self) -> bool {
        self.ran_shrink
    }

    pub fn method(&self) -> Option<&Thermostat> {
        self.method.as_ref()
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Ramps the box to the system's target box over `n_steps` at `kt`,
    /// resizing every `shrink_period` steps.
    #[instrument(skip_all, name = "shrink", fields(kt = kt, n_steps = n_steps))]
    pub fn shrink(&mut self, kt: f64, n_steps: u64, shrink_period: u64) -> Result<(), EngineError> {
        check_kt(kt)?;
        if shrink_period == 0 {
            return Err(ConfigurationError::InvalidParameter {
                name: "shrink_period",
                value: 0.0,
            }
            .into());
        }
        let target = self
            .target_box
            .ok_or(ConfigurationError::MissingTargetBox)?;
        // The final step lands the box exactly on the target.
        let total_steps = n_steps
            .checked_add(1)
            .ok_or(ConfigurationError::InvalidParameter {
                name: "n_steps",
                value: n_steps as f64,
            })?;

        let resize = BoxResize {
            initial: self.engine.box_lengths(),
            target,
            ramp: Ramp {
                t_start: self.engine.timestep(),
                t_ramp: n_steps,
            },
            period: shrink_period,
        };
        debug!(
            "Box resize ({:.4}, {:.4}, {:.4}) -> ({:.4}, {:.4}, {:.4}) nm",
            resize.initial.x,
            resize.initial.y,
            resize.initial.z,
            target.x,
            target.y,
            target.z
        );
        self.engine.set_box_resize(&resize)?;

        let thermostat = self.thermostat(kt);
        self.engine.set_method(&thermostat)?;
        self.method = Some(thermostat);
        self.phase = Phase::Shrinking;

        self.engine.thermalize(ParticleFilter::RigidCenters, kt)?;
        self.engine.run(total_steps)?;
        self.ran_shrink = true;
        info!("Shrink finished after {} steps", total_steps);
        Ok(())
    }

    /// Runs `n_steps` at a single temperature.
    #[instrument(skip_all, name = "quench", fields(kt = kt, n_steps = n_steps))]
    pub fn quench(&mut self, kt: f64, n_steps: u64) -> Result<(), EngineError> {
        check_kt(kt)?;
        self.set_temperature(kt)?;
        self.phase = Phase::AtTemperature;
        self.engine.thermalize(ParticleFilter::RigidCenters, kt)?;
        self.engine.run(n_steps)?;
        info!("Quench at kT = {} finished after {} steps", kt, n_steps);
        Ok(())
    }

    /// Follows `schedule` segment by segment, re-thermalizing at each
    /// temperature.
    #[instrument(skip_all, name = "anneal", fields(segments = schedule.len()))]
    pub fn anneal(&mut self, schedule: &AnnealSchedule) -> Result<(), EngineError> {
        if schedule.is_empty() {
            return Err(ConfigurationError::EmptySchedule.into());
        }
        if self.method.is_none() {
            let thermostat = self.thermostat(DEFAULT_ANNEAL_KT);
            self.engine.set_method(&thermostat)?;
            self.method = Some(thermostat);
        }
        self.phase = Phase::AtTemperature;

        for segment in schedule.segments() {
            self.set_temperature(segment.kt)?;
            self.engine
                .thermalize(ParticleFilter::RigidCenters, segment.kt)?;
            self.engine.run(segment.steps)?;
            debug!("Annealed {} steps at kT = {}", segment.steps, segment.kt);
        }
        info!("Anneal finished after {} steps", schedule.total_steps());
        Ok(())
    }

    fn thermostat(&self, kt: f64) -> Thermostat {
        Thermostat {
            kt,
            tau: self.config.tau,
            filter: ParticleFilter::RigidCenters,
        }
    }

    /// Changes the temperature of the existing method, or installs one.
    fn set_temperature(&mut self, kt: f64) -> Result<(), EngineError> {
        match self.method.as_mut() {
            Some(method) => {
                self.engine.set_method_kt(kt)?;
                method.kt = kt;
            }
            None => {
                let thermostat = self.thermostat(kt);
                self.engine.set_method(&thermostat)?;
                self.method = Some(thermostat);
            }
        }
        Ok(())
    }
}

fn check_kt(kt: f64) -> Result<(), ConfigurationError> {
    if kt >= 0.0 && kt.is_finite() {
        Ok(())
    } else {
        Err(ConfigurationError::InvalidParameter {
            name: "kt",
            value: kt,
        })
    }
}

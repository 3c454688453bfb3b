use super::backend::{
    BoxResize, Engine, IntegratorSettings, ParticleFilter, Thermostat, WriterSpec,
};
use super::error::EngineError;
use super::forces::{BondTable, PairTable};
use super::rigid::RigidBodyDefinition;
use crate::assembly::snapshot::Snapshot;
use nalgebra::Vector3;

#[derive(Debug, Clone, PartialEq)]
pub enum EngineCall {
    LoadSnapshot { n_particles: usize },
    SetForces,
    CreateRigidBodies { n_constituents: usize },
    ConfigureIntegrator(IntegratorSettings),
    AddWriter(WriterSpec),
    SetBoxResize(BoxResize),
    SetMethod(Thermostat),
    SetMethodKt(f64),
    Thermalize { filter: ParticleFilter, kt: f64 },
    Run(u64),
}

/// In-memory engine that records every call and tracks just enough state
/// (box, timestep, methods) to check phase sequencing.
#[derive(Debug, Default)]
pub struct RecordingEngine {
    pub calls: Vec<EngineCall>,
    pub methods: Vec<Thermostat>,
    pub box_resize: Option<BoxResize>,
    pub loaded: Option<Snapshot>,
    pub pairs: Option<PairTable>,
    pub bonds: Option<BondTable>,
    pub rigid_body: Option<RigidBodyDefinition>,
    pub writers: Vec<WriterSpec>,
    pub fail_on: Option<&'static str>,
    box_lengths: Vector3<f64>,
    timestep: u64,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the named operation fail with a backend error.
    pub fn failing_on(operation: &'static str) -> Self {
        Self {
            fail_on: Some(operation),
            ..Self::default()
        }
    }

    pub fn runs(&self) -> Vec<u64> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                EngineCall::Run(steps) => Some(*steps),
                _ => None,
            })
            .collect()
    }

    /// Calls recorded after the first `start` calls.
    pub fn calls_since(&self, start: usize) -> &[EngineCall] {
        &self.calls[start..]
    }

    pub fn count(&self, matches: impl Fn(&EngineCall) -> bool) -> usize {
        self.calls.iter().filter(|c| matches(c)).count()
    }

    fn check(&self, operation: &'static str) -> Result<(), EngineError> {
        match self.fail_on {
            Some(op) if op == operation => Err(EngineError::Backend {
                operation,
                message: "injected failure".to_string(),
            }),
            _ => Ok(()),
        }
    }
}

impl Engine for RecordingEngine {
    fn load_snapshot(&mut self, snapshot: &Snapshot) -> Result<(), EngineError> {
        self.check("load_snapshot")?;
        self.box_lengths = snapshot.box_lengths();
        self.loaded = Some(snapshot.clone());
        self.calls.push(EngineCall::LoadSnapshot {
            n_particles: snapshot.n_particles(),
        });
        Ok(())
    }

    fn set_forces(&mut self, pairs: &PairTable, bonds: &BondTable) -> Result<(), EngineError> {
        self.check("set_forces")?;
        self.pairs = Some(pairs.clone());
        self.bonds = Some(bonds.clone());
        self.calls.push(EngineCall::SetForces);
        Ok(())
    }

    fn create_rigid_bodies(&mut self, body: &RigidBodyDefinition) -> Result<(), EngineError> {
        self.check("create_rigid_bodies")?;
        self.rigid_body = Some(body.clone());
        self.calls.push(EngineCall::CreateRigidBodies {
            n_constituents: body.n_constituents(),
        });
        Ok(())
    }

    fn configure_integrator(&mut self, settings: &IntegratorSettings) -> Result<(), EngineError> {
        self.check("configure_integrator")?;
        self.calls.push(EngineCall::ConfigureIntegrator(*settings));
        Ok(())
    }

    fn add_writer(&mut self, writer: &WriterSpec) -> Result<(), EngineError> {
        self.check("add_writer")?;
        self.writers.push(writer.clone());
        self.calls.push(EngineCall::AddWriter(writer.clone()));
        Ok(())
    }

    fn set_box_resize(&mut self, resize: &BoxResize) -> Result<(), EngineError> {
        self.check("set_box_resize")?;
        self.box_resize = Some(*resize);
        self.calls.push(EngineCall::SetBoxResize(*resize));
        Ok(())
    }

    fn set_method(&mut self, thermostat: &Thermostat) -> Result<(), EngineError> {
        self.check("set_method")?;
        self.methods = vec![*thermostat];
        self.calls.push(EngineCall::SetMethod(*thermostat));
        Ok(())
    }

    fn set_method_kt(&mut self, kt: f64) -> Result<(), EngineError> {
        self.check("set_method_kt")?;
        let method = self.methods.first_mut().ok_or(EngineError::Backend {
            operation: "set_method_kt",
            message: "no integration method installed".to_string(),
        })?;
        method.kt = kt;
        self.calls.push(EngineCall::SetMethodKt(kt));
        Ok(())
    }

    fn thermalize(&mut self, filter: ParticleFilter, kt: f64) -> Result<(), EngineError> {
        self.check("thermalize")?;
        self.calls.push(EngineCall::Thermalize { filter, kt });
        Ok(())
    }

    fn run(&mut self, steps: u64) -> Result<(), EngineError> {
        self.check("run")?;
        self.timestep += steps;
        if let Some(resize) = &self.box_resize {
            self.box_lengths = resize.box_at(self.timestep);
        }
        self.calls.push(EngineCall::Run(steps));
        Ok(())
    }

    fn box_lengths(&self) -> Vector3<f64> {
        self.box_lengths
    }

    fn timestep(&self) -> u64 {
        self.timestep
    }
}

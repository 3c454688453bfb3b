use super::error::EngineError;
use crate::assembly::snapshot::{RIGID_CENTER_TYPE, RigidCenterId, Snapshot};
use crate::core::error::ConfigurationError;
use crate::core::utils::geometry;
use nalgebra::{Point3, UnitQuaternion, Vector3};

/// Constituent layout of the rigid body type shared by every bead.
#[derive(Debug, Clone, PartialEq)]
pub struct RigidBodyDefinition {
    pub center_type: String,
    pub constituent_types: Vec<String>,
    /// Constituent positions relative to the body center.
    pub positions: Vec<Vector3<f64>>,
    pub orientations: Vec<UnitQuaternion<f64>>,
    pub charges: Vec<f64>,
    pub diameters: Vec<f64>,
}

impl RigidBodyDefinition {
    /// Reads the body layout off the first rigid center; all beads share it.
    pub fn from_snapshot(snapshot: &Snapshot) -> Result<Self, EngineError> {
        let first = snapshot
            .rigid_centers()
            .next()
            .ok_or(ConfigurationError::MissingStructure)?;

        let mut body = Self {
            center_type: RIGID_CENTER_TYPE.to_string(),
            constituent_types: Vec::new(),
            positions: snapshot.relative_positions(first),
            orientations: Vec::new(),
            charges: Vec::new(),
            diameters: Vec::new(),
        };
        for constituent in snapshot.constituents_of(first) {
            let i = constituent.index();
            body.constituent_types.push(snapshot.type_name(i).to_string());
            body.orientations.push(snapshot.orientations()[i]);
            body.charges.push(snapshot.charges()[i]);
            body.diameters.push(snapshot.diameters()[i]);
        }
        if body.positions.is_empty() {
            return Err(EngineError::Internal(
                "rigid center has no constituents".to_string(),
            ));
        }
        Ok(body)
    }

    pub fn n_constituents(&self) -> usize {
        self.positions.len()
    }
}

/// Principal moments of inertia of `center`'s constituents about the center.
pub fn body_moment_of_inertia(snapshot: &Snapshot, center: RigidCenterId) -> Vector3<f64> {
    let points: Vec<Point3<f64>> = snapshot
        .relative_positions(center)
        .into_iter()
        .map(Point3::from)
        .collect();
    let masses: Vec<f64> = snapshot
        .constituents_of(center)
        .map(|c| snapshot.masses()[c.index()])
        .collect();
    geometry::moment_of_inertia(&points, &masses, &Point3::origin()).unwrap_or_else(Vector3::zeros)
}

/// Writes every rigid center's moment of inertia into the snapshot.
pub fn inject_moments_of_inertia(snapshot: &mut Snapshot) {
    for center in snapshot.rigid_centers() {
        let moit = body_moment_of_inertia(snapshot, center);
        snapshot.set_moment_of_inertia(center, moit);
    }
}

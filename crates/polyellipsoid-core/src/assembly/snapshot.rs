use crate::core::error::ConfigurationError;
use crate::core::models::ids::ParticleId;
use crate::core::models::structure::MolecularStructure;
use crate::core::models::topology::BondKind;
use crate::core::utils::geometry;
use nalgebra::{Point3, UnitQuaternion, Vector3};
use serde::Serialize;
use slotmap::SecondaryMap;
use std::ops::Range;

/// Particle type of every rigid center.
pub const RIGID_CENTER_TYPE: &str = "R";
pub const DEFAULT_DIAMETER: f64 = 1.0;

/// Index of a rigid center; centers occupy `[0, n_rigid_centers)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RigidCenterId(usize);

/// Index of a constituent particle; constituents follow the centers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ConstituentId(usize);

impl RigidCenterId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl ConstituentId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BondType {
    pub name: String,
    pub kind: BondKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SnapshotBond {
    pub type_id: usize,
    pub members: [usize; 2],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SnapshotAngle {
    pub type_id: usize,
    pub members: [usize; 3],
}

/// Rigid-body particle state handed to the engine.
///
/// Per-particle arrays share one index space: rigid centers first, then the
/// constituents of each bead as one contiguous group in bead order. The
/// constituent-to-center lookup is stored, not derived from offsets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    box_lengths: Vector3<f64>,
    types: Vec<String>,
    positions: Vec<Point3<f64>>,
    orientations: Vec<UnitQuaternion<f64>>,
    masses: Vec<f64>,
    moments_of_inertia: Vec<Vector3<f64>>,
    bodies: Vec<usize>,
    type_ids: Vec<usize>,
    charges: Vec<f64>,
    diameters: Vec<f64>,
    bond_types: Vec<BondType>,
    bonds: Vec<SnapshotBond>,
    angle_types: Vec<String>,
    angles: Vec<SnapshotAngle>,
    #[serde(skip)]
    groups: Vec<Range<usize>>,
    #[serde(skip)]
    owners: Vec<RigidCenterId>,
}

impl Snapshot {
    /// Converts an assembled structure: one rigid center of mass `bead_mass` per
    /// bead, placed at the centroid of that bead's constituents.
    pub fn from_structure(
        structure: &MolecularStructure,
        bead_mass: f64,
    ) -> Result<Self, ConfigurationError> {
        let box_lengths = structure
            .box_lengths()
            .ok_or(ConfigurationError::MissingStructure)?;
        let n_rigid = structure.n_beads();
        let n_total = n_rigid + structure.n_particles();

        let mut snapshot = Self {
            box_lengths,
            types: vec![RIGID_CENTER_TYPE.to_string()],
            positions: Vec::with_capacity(n_total),
            orientations: vec![UnitQuaternion::identity(); n_total],
            masses: Vec::with_capacity(n_total),
            moments_of_inertia: vec![Vector3::zeros(); n_total],
            bodies: Vec::with_capacity(n_total),
            type_ids: Vec::with_capacity(n_total),
            charges: vec![0.0; n_total],
            diameters: vec![DEFAULT_DIAMETER; n_total],
            bond_types: Vec::new(),
            bonds: Vec::with_capacity(structure.bonds().len()),
            angle_types: Vec::new(),
            angles: Vec::with_capacity(structure.angles().len()),
            groups: Vec::with_capacity(n_rigid),
            owners: Vec::with_capacity(structure.n_particles()),
        };

        for (center_index, (bead_id, _)) in structure.beads_iter().enumerate() {
            let positions = structure.bead_positions(bead_id).unwrap_or_default();
            let center = geometry::centroid(&positions).unwrap_or_else(Point3::origin);
            snapshot.positions.push(center);
            snapshot.masses.push(bead_mass);
            snapshot.bodies.push(center_index);
            snapshot.type_ids.push(0);
        }

        let mut global_index: SecondaryMap<ParticleId, usize> = SecondaryMap::new();
        for (center_index, (_, bead)) in structure.beads_iter().enumerate() {
            let start = snapshot.positions.len();
            for &particle_id in bead.particles() {
                let Some(particle) = structure.particle(particle_id) else {
                    continue;
                };
                let type_id = snapshot.intern_type(particle.kind.type_name());
                global_index.insert(particle_id, snapshot.positions.len());
                snapshot.positions.push(particle.position);
                snapshot.masses.push(particle.mass);
                snapshot.bodies.push(center_index);
                snapshot.type_ids.push(type_id);
                snapshot.owners.push(RigidCenterId(center_index));
            }
            snapshot.groups.push(start..snapshot.positions.len());
        }

        for bond in structure.bonds() {
            let (Some(&i), Some(&j)) = (
                global_index.get(bond.particle1_id),
                global_index.get(bond.particle2_id),
            ) else {
                continue;
            };
            let name = format!(
                "{}-{}",
                snapshot.type_name(i),
                snapshot.type_name(j)
            );
            let type_id = snapshot.intern_bond_type(name, bond.kind);
            snapshot.bonds.push(SnapshotBond {
                type_id,
                members: [i, j],
            });
        }

        for angle in structure.angles() {
            let (Some(&a), Some(&b), Some(&c)) = (
                global_index.get(angle.end1_id),
                global_index.get(angle.vertex_id),
                global_index.get(angle.end2_id),
            ) else {
                continue;
            };
            let name = format!(
                "{}-{}-{}",
                snapshot.type_name(a),
                snapshot.type_name(b),
                snapshot.type_name(c)
            );
            let type_id = match snapshot.angle_types.iter().position(|t| *t == name) {
                Some(id) => id,
                None => {
                    snapshot.angle_types.push(name);
                    snapshot.angle_types.len() - 1
                }
            };
            snapshot.angles.push(SnapshotAngle {
                type_id,
                members: [a, b, c],
            });
        }

        Ok(snapshot)
    }

    fn intern_type(&mut self, name: &str) -> usize {
        match self.types.iter().position(|t| t == name) {
            Some(id) => id,
            None => {
                self.types.push(name.to_string());
                self.types.len() - 1
            }
        }
    }

    fn intern_bond_type(&mut self, name: String, kind: BondKind) -> usize {
        match self.bond_types.iter().position(|t| t.name == name) {
            Some(id) => id,
            None => {
                self.bond_types.push(BondType { name, kind });
                self.bond_types.len() - 1
            }
        }
    }

    pub fn type_name(&self, particle_index: usize) -> &str {
        &self.types[self.type_ids[particle_index]]
    }

    pub fn n_particles(&self) -> usize {
        self.positions.len()
    }

    pub fn n_rigid_centers(&self) -> usize {
        self.groups.len()
    }

    pub fn rigid_centers(&self) -> impl Iterator<Item = RigidCenterId> + use<> {
        (0..self.groups.len()).map(RigidCenterId)
    }

    pub fn constituents(&self) -> impl Iterator<Item = ConstituentId> + use<> {
        (self.groups.len()..self.positions.len()).map(ConstituentId)
    }

    pub fn constituents_of(
        &self,
        center: RigidCenterId,
    ) -> impl Iterator<Item = ConstituentId> + use<> {
        self.groups
            .get(center.0)
            .cloned()
            .unwrap_or(0..0)
            .map(ConstituentId)
    }

    pub fn owner_of(&self, constituent: ConstituentId) -> Option<RigidCenterId> {
        let offset = constituent.0.checked_sub(self.groups.len())?;
        self.owners.get(offset).copied()
    }

    pub fn center_position(&self, center: RigidCenterId) -> Point3<f64> {
        self.positions[center.0]
    }

    /// Constituent positions of `center`'s body relative to the center.
    pub fn relative_positions(&self, center: RigidCenterId) -> Vec<Vector3<f64>> {
        let origin = self.center_position(center);
        self.constituents_of(center)
            .map(|c| self.positions[c.0] - origin)
            .collect()
    }

    pub(crate) fn set_moment_of_inertia(&mut self, center: RigidCenterId, moit: Vector3<f64>) {
        self.moments_of_inertia[center.0] = moit;
    }

    pub fn box_lengths(&self) -> Vector3<f64> {
        self.box_lengths
    }

    pub fn types(&self) -> &[String] {
        &self.types
    }

    pub fn positions(&self) -> &[Point3<f64>] {
        &self.positions
    }

    pub fn orientations(&self) -> &[UnitQuaternion<f64>] {
        &self.orientations
    }

    pub fn masses(&self) -> &[f64] {
        &self.masses
    }

    pub fn moments_of_inertia(&self) -> &[Vector3<f64>] {
        &self.moments_of_inertia
    }

    pub fn bodies(&self) -> &[usize] {
        &self.bodies
    }

    pub fn type_ids(&self) -> &[usize] {
        &self.type_ids
    }

    pub fn charges(&self) -> &[f64] {
        &self.charges
    }

    pub fn diameters(&self) -> &[f64] {
        &self.diameters
    }

    pub fn bond_types(&self) -> &[BondType] {
        &self.bond_types
    }

    pub fn bonds(&self) -> &[SnapshotBond] {
        &self.bonds
    }

    pub fn angle_types(&self) -> &[String] {
        &self.angle_types
    }

    pub fn angles(&self) -> &[SnapshotAngle] {
        &self.angles
    }
}

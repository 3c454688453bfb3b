use super::ids::ParticleId;
use serde::Serialize;

/// Whether a bond holds a bead together or links two beads of a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BondKind {
    /// Bond between two constituents of the same bead.
    #[default]
    Internal,
    /// Bond between the anchors of consecutive beads.
    Backbone,
}

/// Bond between two particles addressed by their position in a bead or chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocalBond {
    pub i: usize,
    pub j: usize,
    pub kind: BondKind,
}

impl LocalBond {
    pub fn new(i: usize, j: usize, kind: BondKind) -> Self {
        Self { i, j, kind }
    }

    pub fn offset(&self, by: usize) -> Self {
        Self::new(self.i + by, self.j + by, self.kind)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bond {
    pub particle1_id: ParticleId,
    pub particle2_id: ParticleId,
    pub kind: BondKind,
}

impl Bond {
    pub fn new(particle1_id: ParticleId, particle2_id: ParticleId, kind: BondKind) -> Self {
        Self {
            particle1_id,
            particle2_id,
            kind,
        }
    }
}

/// Angle spanned by two bonds sharing `vertex_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Angle {
    pub end1_id: ParticleId,
    pub vertex_id: ParticleId,
    pub end2_id: ParticleId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::KeyData;

    fn dummy_particle_id(n: u64) -> ParticleId {
        ParticleId::from(KeyData::from_ffi(n))
    }

    #[test]
    fn bond_kind_defaults_to_internal() {
        assert_eq!(BondKind::default(), BondKind::Internal);
    }

    #[test]
    fn local_bond_offset_shifts_both_ends() {
        let bond = LocalBond::new(0, 1, BondKind::Internal).offset(6);
        assert_eq!((bond.i, bond.j), (6, 7));
        assert_eq!(bond.kind, BondKind::Internal);
    }

    #[test]
    fn bond_keeps_endpoint_order() {
        let a = dummy_particle_id(1);
        let b = dummy_particle_id(2);
        let bond = Bond::new(a, b, BondKind::Backbone);
        assert_eq!(bond.particle1_id, a);
        assert_eq!(bond.particle2_id, b);
        assert_eq!(bond.kind, BondKind::Backbone);
    }
}

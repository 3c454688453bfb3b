use super::chain::Chain;
use super::ids::{BeadId, ChainId, ParticleId};
use super::particle::ParticleKind;
use super::topology::{Angle, Bond};
use crate::core::utils::geometry::{self, BoundingBox};
use itertools::Itertools;
use nalgebra::{Point3, Vector3};
use slotmap::{SecondaryMap, SlotMap};

/// A particle placed in the assembled structure.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedParticle {
    pub kind: ParticleKind,
    /// Position in nanometres.
    pub position: Point3<f64>,
    /// Mass in amu.
    pub mass: f64,
    /// The bead (rigid body) this particle belongs to.
    pub bead_id: BeadId,
}

/// One bead of the assembled structure; every bead is one rigid body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RigidBead {
    pub chain_id: ChainId,
    pub(crate) particles: Vec<ParticleId>,
}

impl RigidBead {
    pub fn particles(&self) -> &[ParticleId] {
        &self.particles
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlacedChain {
    pub(crate) beads: Vec<BeadId>,
}

impl PlacedChain {
    pub fn beads(&self) -> &[BeadId] {
        &self.beads
    }
}

/// Chains placed together in one simulation volume, labeled by rigid body.
///
/// Beads keep their insertion order, which is the order particles end up in
/// the engine snapshot.
#[derive(Debug, Clone, Default)]
pub struct MolecularStructure {
    /// Primary storage for particles.
    particles: SlotMap<ParticleId, PlacedParticle>,
    /// One entry per rigid body.
    beads: SlotMap<BeadId, RigidBead>,
    chains: SlotMap<ChainId, PlacedChain>,
    /// Bead insertion order; slot map iteration order is not stable.
    bead_order: Vec<BeadId>,
    bonds: Vec<Bond>,
    /// Filled by [`identify_angles`](Self::identify_angles).
    angles: Vec<Angle>,
    /// Bonded neighbors of each particle.
    bond_adjacency: SecondaryMap<ParticleId, Vec<ParticleId>>,
    /// Simulation box in nanometres, once assembled.
    box_lengths: Option<Vector3<f64>>,
}

impl MolecularStructure {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a particle by its stable ID.
    pub fn particle(&self, id: ParticleId) -> Option<&PlacedParticle> {
        self.particles.get(id)
    }

    pub fn bead(&self, id: BeadId) -> Option<&RigidBead> {
        self.beads.get(id)
    }

    pub fn chain(&self, id: ChainId) -> Option<&PlacedChain> {
        self.chains.get(id)
    }

    /// Beads in insertion order.
    pub fn beads_iter(&self) -> impl Iterator<Item = (BeadId, &RigidBead)> {
        self.bead_order.iter().map(|&id| (id, &self.beads[id]))
    }

    /// Particles in bead order, each bead keeping its constituent order.
    pub fn particles_iter(&self) -> impl Iterator<Item = (ParticleId, &PlacedParticle)> {
        self.beads_iter()
            .flat_map(|(_, bead)| bead.particles.iter())
            .map(|&id| (id, &self.particles[id]))
    }

    pub fn n_particles(&self) -> usize {
        self.particles.len()
    }

    pub fn n_beads(&self) -> usize {
        self.beads.len()
    }

    pub fn n_chains(&self) -> usize {
        self.chains.len()
    }

    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    pub fn angles(&self) -> &[Angle] {
        &self.angles
    }

    pub fn box_lengths(&self) -> Option<Vector3<f64>> {
        self.box_lengths
    }

    /// Records the box the structure was assembled in.
    pub fn set_box_lengths(&mut self, lengths: Vector3<f64>) {
        self.box_lengths = Some(lengths);
    }

    /// Copies `chain` into the structure, shifted by `offset`.
    pub fn add_chain(&mut self, chain: &Chain, offset: &Vector3<f64>) -> ChainId {
        let chain_id = self.chains.insert(PlacedChain::default());

        let mut local_to_id = Vec::with_capacity(chain.particles().len());
        for bead_index in 0..chain.n_beads() {
            let bead_id = self.beads.insert(RigidBead {
                chain_id,
                particles: Vec::with_capacity(chain.bead_size()),
            });
            self.bead_order.push(bead_id);
            self.chains[chain_id].beads.push(bead_id);

            for particle in chain.bead_particles(bead_index).unwrap_or_default() {
                let particle_id = self.particles.insert(PlacedParticle {
                    kind: particle.kind,
                    position: particle.position + offset,
                    mass: particle.mass,
                    bead_id,
                });
                self.bond_adjacency.insert(particle_id, Vec::new());
                self.beads[bead_id].particles.push(particle_id);
                local_to_id.push(particle_id);
            }
        }

        for bond in chain.bonds() {
            self.add_bond(Bond::new(local_to_id[bond.i], local_to_id[bond.j], bond.kind));
        }

        chain_id
    }

    fn add_bond(&mut self, bond: Bond) {
        if let Some(neighbors) = self.bond_adjacency.get(bond.particle1_id) {
            if neighbors.contains(&bond.particle2_id) {
                return;
            }
        }
        self.bond_adjacency[bond.particle1_id].push(bond.particle2_id);
        self.bond_adjacency[bond.particle2_id].push(bond.particle1_id);
        self.bonds.push(bond);
    }

    /// Rebuilds the angle list from bond connectivity: one angle per pair of
    /// bonds sharing a particle.
    pub fn identify_angles(&mut self) -> usize {
        let angles: Vec<Angle> = self
            .particles_iter()
            .flat_map(|(vertex_id, _)| {
                self.bond_adjacency[vertex_id]
                    .iter()
                    .tuple_combinations()
                    .map(move |(&end1_id, &end2_id)| Angle {
                        end1_id,
                        vertex_id,
                        end2_id,
                    })
            })
            .collect();
        self.angles = angles;
        self.angles.len()
    }

    pub fn positions(&self) -> impl Iterator<Item = &Point3<f64>> {
        self.particles_iter().map(|(_, p)| &p.position)
    }

    pub fn bounding_box(&self) -> Option<BoundingBox> {
        geometry::bounding_box(self.positions())
    }

    pub fn translate(&mut self, by: &Vector3<f64>) {
        for (_, particle) in self.particles.iter_mut() {
            particle.position += by;
        }
    }

    /// Moves the structure so its bounding-box center lands on `target`.
    pub fn translate_to(&mut self, target: &Point3<f64>) {
        if let Some(bb) = self.bounding_box() {
            let shift = target - bb.center();
            self.translate(&shift);
        }
    }

    pub fn bead_positions(&self, bead_id: BeadId) -> Option<Vec<Point3<f64>>> {
        let bead = self.beads.get(bead_id)?;
        Some(
            bead.particles
                .iter()
                .map(|&id| self.particles[id].position)
                .collect(),
        )
    }
}

use super::bead::{Bead, BeadLayout, HEAD_INDEX, LEFT_INDEX, RIGHT_INDEX, TAIL_INDEX};
use super::particle::Particle;
use super::topology::{BondKind, LocalBond};
use crate::core::error::ConfigurationError;
use crate::core::utils::geometry::{self, BoundingBox};
use nalgebra::{Point3, Unit, Vector3};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Which pair of constituents links consecutive beads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BondAxis {
    /// Head of one bead to the tail of the next.
    #[default]
    Major,
    /// Left of one bead to the right of the next.
    Minor,
}

#[derive(Debug, Error)]
#[error("Invalid bond axis string")]
pub struct ParseBondAxisError;

impl FromStr for BondAxis {
    type Err = ParseBondAxisError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "major" => Ok(BondAxis::Major),
            "minor" => Ok(BondAxis::Minor),
            _ => Err(ParseBondAxisError),
        }
    }
}

impl fmt::Display for BondAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                BondAxis::Major => "major",
                BondAxis::Minor => "minor",
            }
        )
    }
}

/// Bonding anchors of a bead template and the directions they face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchors {
    /// Anchor bonded to the next bead.
    pub exit: usize,
    /// Anchor bonded to the previous bead.
    pub entry: usize,
    pub exit_orientation: Unit<Vector3<f64>>,  // Faces away from the bead center
    pub entry_orientation: Unit<Vector3<f64>>, // Opposite of `exit_orientation`
}

impl BondAxis {
    /// Resolves the anchor slots of `bead` for this bonding axis.
    ///
    /// Bonding along the minor axis of a three-particle bead is an error.
    pub fn anchors(&self, bead: &Bead) -> Result<Anchors, ConfigurationError> {
        match (self, bead.shape().layout) {
            (BondAxis::Major, _) => {
                let axis = bead.shape().major_axis;
                Ok(Anchors {
                    exit: HEAD_INDEX,
                    entry: TAIL_INDEX,
                    exit_orientation: axis,
                    entry_orientation: Unit::new_unchecked(-axis.into_inner()),
                })
            }
            (BondAxis::Minor, BeadLayout::FiveParticle { minor_axis, .. }) => Ok(Anchors {
                exit: LEFT_INDEX,
                entry: RIGHT_INDEX,
                exit_orientation: minor_axis,
                entry_orientation: Unit::new_unchecked(-minor_axis.into_inner()),
            }),
            (BondAxis::Minor, BeadLayout::ThreeParticle) => {
                Err(ConfigurationError::MissingMinorAxis)
            }
        }
    }
}

/// A linear polymer of identical beads.
///
/// Particles are stored flat, bead by bead in construction order, each bead
/// keeping its own constituent order. Bond indices refer to that flat list.
#[derive(Debug, Clone, PartialEq)]
pub struct Chain {
    pub(crate) particles: Vec<Particle>, // All constituents, bead after bead
    pub(crate) bonds: Vec<LocalBond>,    // Internal and backbone bonds
    pub(crate) bead_size: usize,         // Constituents per bead
    pub(crate) n_beads: usize,
    pub(crate) anchors: Anchors,
    pub(crate) separation: f64, // Anchor-to-anchor gap in nm
}

impl Chain {
    /// Repeats `template` `length` times so that each bead's entry anchor sits
    /// `separation` nanometres beyond the previous bead's exit anchor.
    pub fn build(
        template: &Bead,
        length: usize,
        separation: f64,
        bond_axis: BondAxis,
    ) -> Result<Self, ConfigurationError> {
        if length < 1 {
            return Err(ConfigurationError::NonPositiveChainLength(length));
        }
        if !separation.is_finite() || separation < 0.0 {
            return Err(ConfigurationError::InvalidParameter {
                name: "separation",
                value: separation,
            });
        }
        let anchors = bond_axis.anchors(template)?;

        let exit_pos = template.particles()[anchors.exit].position;
        let entry_pos = template.particles()[anchors.entry].position;
        let step = (exit_pos - entry_pos) + anchors.exit_orientation.into_inner() * separation;

        let bead_size = template.n_particles();
        let mut particles = Vec::with_capacity(bead_size * length);
        let mut bonds = Vec::with_capacity((template.bonds().len() + 1) * length);

        for i in 0..length {
            let offset = step * i as f64;
            let base = i * bead_size;
            particles.extend(template.particles().iter().map(|p| Particle {
                position: p.position + offset,
                ..p.clone()
            }));
            bonds.extend(template.bonds().iter().map(|b| b.offset(base)));
            if i > 0 {
                bonds.push(LocalBond::new(
                    base - bead_size + anchors.exit,
                    base + anchors.entry,
                    BondKind::Backbone,
                ));
            }
        }

        Ok(Self {
            particles,
            bonds,
            bead_size,
            n_beads: length,
            anchors,
            separation,
        })
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn bonds(&self) -> &[LocalBond] {
        &self.bonds
    }

    pub fn n_beads(&self) -> usize {
        self.n_beads
    }

    pub fn bead_size(&self) -> usize {
        self.bead_size
    }

    pub fn anchors(&self) -> &Anchors {
        &self.anchors
    }

    pub fn separation(&self) -> f64 {
        self.separation
    }

    /// Constituents of the bead at `bead_index`, in slot order.
    pub fn bead_particles(&self, bead_index: usize) -> Option<&[Particle]> {
        let start = bead_index.checked_mul(self.bead_size)?;
        self.particles.get(start..start + self.bead_size)
    }

    pub fn positions(&self) -> impl Iterator<Item = &Point3<f64>> {
        self.particles.iter().map(|p| &p.position)
    }

    pub fn bounding_box(&self) -> Option<BoundingBox> {
        geometry::bounding_box(self.positions())
    }

    /// Total mass in amu.
    pub fn mass(&self) -> f64 {
        self.particles.iter().map(|p| p.mass).sum()
    }

    pub fn translate(&mut self, by: &Vector3<f64>) {
        for particle in self.particles.iter_mut() {
            particle.position += by;
        }
    }
}

use super::particle::{Particle, ParticleKind};
use super::topology::{BondKind, LocalBond};
use nalgebra::{Point3, Unit, Vector3};

// Constituent slots inside a bead; left and right exist only on five-particle beads.
pub const HEAD_INDEX: usize = 0;
pub const CENTER_INDEX: usize = 1;
pub const TAIL_INDEX: usize = 2;
pub const LEFT_INDEX: usize = 3;
pub const RIGHT_INDEX: usize = 4;

/// Arrangement of constituents inside a bead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BeadLayout {
    /// Head, center and tail along the major axis.
    ThreeParticle,
    /// Adds left and right constituents along a minor axis.
    FiveParticle {
        /// Length along the minor axis in nanometres.
        minor_length: f64,
        /// Unit direction of the left constituent.
        minor_axis: Unit<Vector3<f64>>,
    },
}

impl BeadLayout {
    pub fn n_particles(&self) -> usize {
        match self {
            BeadLayout::ThreeParticle => 3,
            BeadLayout::FiveParticle { .. } => 5,
        }
    }
}

/// Everything needed to build one bead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeadShape {
    /// Total bead mass in amu, split evenly over the constituents.
    pub mass: f64,
    /// Length along the major axis in nanometres.
    pub major_length: f64,
    /// Unit direction of the head constituent.
    pub major_axis: Unit<Vector3<f64>>,
    pub layout: BeadLayout,
}

impl BeadShape {
    pub fn new(mass: f64, major_length: f64, major_axis: Unit<Vector3<f64>>) -> Self {
        Self {
            mass,
            major_length,
            major_axis,
            layout: BeadLayout::ThreeParticle,
        }
    }

    /// Switches to the five-particle layout.
    pub fn with_minor_axis(mut self, minor_length: f64, minor_axis: Unit<Vector3<f64>>) -> Self {
        self.layout = BeadLayout::FiveParticle {
            minor_length,
            minor_axis,
        };
        self
    }

    pub fn n_particles(&self) -> usize {
        self.layout.n_particles()
    }
}

/// A rigid ellipsoid bead centered on the origin of its own frame.
///
/// Constituents are stored in a fixed order: head, center, tail, then left and
/// right for five-particle beads. The single internal bond joins the center to
/// the head.
#[derive(Debug, Clone, PartialEq)]
pub struct Bead {
    pub(crate) shape: BeadShape,        // Shape the bead was built from
    pub(crate) particles: Vec<Particle>, // Constituents in slot order
    pub(crate) bonds: Vec<LocalBond>,    // Internal bonds, indexed by slot
}

impl Bead {
    /// Places the constituents symmetrically about the origin and splits the
    /// mass evenly between them.
    pub fn build(shape: &BeadShape) -> Self {
        let n = shape.n_particles();
        let mass = shape.mass / n as f64;
        let half_major = shape.major_axis.into_inner() * (shape.major_length / 2.0);

        let mut particles = Vec::with_capacity(n);
        particles.push(Particle::new(
            ParticleKind::Head,
            Point3::from(half_major),
            mass,
        ));
        particles.push(Particle::new(ParticleKind::Center, Point3::origin(), mass));
        particles.push(Particle::new(
            ParticleKind::Tail,
            Point3::from(-half_major),
            mass,
        ));

        if let BeadLayout::FiveParticle {
            minor_length,
            minor_axis,
        } = shape.layout
        {
            let half_minor = minor_axis.into_inner() * (minor_length / 2.0);
            particles.push(Particle::new(
                ParticleKind::Left,
                Point3::from(half_minor),
                mass,
            ));
            particles.push(Particle::new(
                ParticleKind::Right,
                Point3::from(-half_minor),
                mass,
            ));
        }

        Self {
            shape: *shape,
            particles,
            bonds: vec![LocalBond::new(CENTER_INDEX, HEAD_INDEX, BondKind::Internal)],
        }
    }

    pub fn shape(&self) -> &BeadShape {
        &self.shape
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn bonds(&self) -> &[LocalBond] {
        &self.bonds
    }

    pub fn n_particles(&self) -> usize {
        self.particles.len()
    }

    /// Total mass in amu.
    pub fn mass(&self) -> f64 {
        self.particles.iter().map(|p| p.mass).sum()
    }

    /// The constituent of `kind`, if this layout has one.
    pub fn particle(&self, kind: ParticleKind) -> Option<&Particle> {
        self.particles.iter().find(|p| p.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-12;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    #[test]
    fn three_particle_bead_has_expected_order_and_positions() {
        let bead = Bead::build(&BeadShape::new(100.0, 2.0, Vector3::x_axis()));

        let kinds: Vec<_> = bead.particles().iter().map(|p| p.kind.type_name()).collect();
        assert_eq!(kinds, vec!["CH", "CC", "CT"]);
        assert_eq!(bead.particles()[HEAD_INDEX].position, Point3::new(1.0, 0.0, 0.0));
        assert_eq!(bead.particles()[CENTER_INDEX].position, Point3::origin());
        assert_eq!(bead.particles()[TAIL_INDEX].position, Point3::new(-1.0, 0.0, 0.0));
        assert_eq!(bead.bonds().len(), 1);
    }

    #[test]
    fn mass_is_split_evenly() {
        let bead = Bead::build(&BeadShape::new(90.0, 1.0, Vector3::x_axis()));
        for particle in bead.particles() {
            assert!(f64_approx_equal(particle.mass, 30.0));
        }
        assert!(f64_approx_equal(bead.mass(), 90.0));
    }

    #[test]
    fn head_and_tail_follow_an_arbitrary_major_axis() {
        let axis = Unit::new_normalize(Vector3::new(0.0, 3.0, 4.0));
        let bead = Bead::build(&BeadShape::new(10.0, 2.0, axis));
        let head = bead.particle(ParticleKind::Head).unwrap().position;
        let tail = bead.particle(ParticleKind::Tail).unwrap().position;
        assert!(f64_approx_equal(head.y, 0.6));
        assert!(f64_approx_equal(head.z, 0.8));
        assert!(f64_approx_equal(head.coords.norm(), 1.0));
        assert_eq!(head.coords, -tail.coords);
    }

    #[test]
    fn five_particle_bead_adds_minor_axis_constituents() {
        let shape = BeadShape::new(100.0, 2.0, Vector3::x_axis()).with_minor_axis(1.0, Vector3::y_axis());
        let bead = Bead::build(&shape);

        assert_eq!(bead.n_particles(), 5);
        let kinds: Vec<_> = bead.particles().iter().map(|p| p.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ParticleKind::Head,
                ParticleKind::Center,
                ParticleKind::Tail,
                ParticleKind::Left,
                ParticleKind::Right
            ]
        );
        assert_eq!(bead.particles()[LEFT_INDEX].position, Point3::new(0.0, 0.5, 0.0));
        assert_eq!(bead.particles()[RIGHT_INDEX].position, Point3::new(0.0, -0.5, 0.0));
        for particle in bead.particles() {
            assert!(f64_approx_equal(particle.mass, 20.0));
        }
    }

    #[test]
    fn constituents_are_antisymmetric_about_center() {
        let shape = BeadShape::new(50.0, 1.5, Vector3::z_axis()).with_minor_axis(0.7, Vector3::x_axis());
        let bead = Bead::build(&shape);
        let sum = bead
            .particles()
            .iter()
            .fold(Vector3::zeros(), |acc, p| acc + p.position.coords);
        assert!(sum.norm() < TOLERANCE);
    }

    #[test]
    fn single_internal_bond_joins_center_and_head() {
        let shape = BeadShape::new(50.0, 1.0, Vector3::x_axis()).with_minor_axis(0.5, Vector3::y_axis());
        let bead = Bead::build(&shape);
        assert_eq!(
            bead.bonds(),
            &[LocalBond::new(CENTER_INDEX, HEAD_INDEX, BondKind::Internal)]
        );
    }

    #[test]
    fn construction_is_deterministic() {
        let shape = BeadShape::new(42.0, 1.2, Vector3::y_axis());
        assert_eq!(Bead::build(&shape), Bead::build(&shape));
    }
}

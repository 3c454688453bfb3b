use nalgebra::Point3;

/// Species of a constituent particle inside a bead.
///
/// The species name doubles as the particle type handed to the engine, so the
/// string forms are fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ParticleKind {
    /// Constituent at the positive end of the major axis.
    Head,
    /// Constituent at the bead center.
    Center,
    /// Constituent at the negative end of the major axis.
    Tail,
    /// Constituent at the positive end of the minor axis.
    Left,
    /// Constituent at the negative end of the minor axis.
    Right,
}

impl ParticleKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            ParticleKind::Head => "CH",
            ParticleKind::Center => "CC",
            ParticleKind::Tail => "CT",
            ParticleKind::Left => "CL",
            ParticleKind::Right => "CR",
        }
    }
}

/// A point mass belonging to a bead.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub kind: ParticleKind,
    /// Position in nanometres.
    pub position: Point3<f64>,
    /// Mass in amu.
    pub mass: f64,
}

impl Particle {
    pub fn new(kind: ParticleKind, position: Point3<f64>, mass: f64) -> Self {
        Self {
            kind,
            position,
            mass,
        }
    }
}

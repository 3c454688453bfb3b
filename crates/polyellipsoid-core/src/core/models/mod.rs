//! # Core Models Module
//!
//! Data structures describing ellipsoid polymer systems before they are handed to an engine.
//!
//! ## Key Components
//!
//! - [`particle`] - Constituent point masses and their species
//! - [`bead`] - Rigid ellipsoid beads built from three or five constituents
//! - [`chain`] - Linear polymers of beads bonded head-to-tail
//! - [`structure`] - The assembled, rigid-body-labeled structure of a whole system
//! - [`topology`] - Bonds and angles between particles
//! - [`ids`] - Arena keys for particles, beads and chains
//!
//! ## Usage
//!
//! ```ignore
//! use polyellipsoid::core::models::bead::{Bead, BeadShape};
//! use polyellipsoid::core::models::chain::{BondAxis, Chain};
//!
//! let bead = Bead::build(&BeadShape::new(100.0, 1.0, Vector3::x_axis()));
//! let chain = Chain::build(&bead, 10, 0.01, BondAxis::Major)?;
//! ```

pub mod bead;
pub mod chain;
pub mod ids;
pub mod particle;
pub mod structure;
pub mod topology;

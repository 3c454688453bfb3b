//! # Core Module
//!
//! Fundamental building blocks shared by the assembly and engine layers.
//!
//! - **Molecular Representation** ([`models`]) - Particles, beads, chains and the assembled structure
//! - **Geometry** ([`utils`]) - Centroids, bounding boxes and moments of inertia
//! - **Units** ([`units`]) - Conversion constants used by the density solver
//! - **Errors** ([`error`]) - The configuration error raised at every validation point

pub mod error;
pub mod models;
pub mod units;
pub mod utils;

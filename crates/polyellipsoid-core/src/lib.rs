//! # polyellipsoid Core Library
//!
//! Builds coarse-grained polymer systems made of rigid ellipsoidal beads and drives
//! molecular-dynamics runs of them through an external integrator.
//!
//! ## Architectural Philosophy
//!
//! The library follows a strict three-layer architecture, leaf-first:
//!
//! - **[`core`]: The Foundation.** Stateless data models (particles, beads, chains, the
//!   assembled `MolecularStructure`), geometry helpers and unit constants.
//!
//! - **[`assembly`]: Building Systems.** Turns physical parameters into a packed or stacked
//!   structure sized to a target density, and converts it into a rigid-body `Snapshot`.
//!
//! - **[`engine`]: Driving Simulations.** Wraps an injected [`engine::backend::Engine`]
//!   handle, wires forces and the rigid-body constraint, and sequences the shrink, quench
//!   and anneal phases.

pub mod assembly;
pub mod core;
pub mod engine;

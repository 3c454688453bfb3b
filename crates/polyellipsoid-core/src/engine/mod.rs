//! Drives an external molecular-dynamics engine through shrink, quench and
//! anneal phases.
//!
//! The engine itself is abstracted by [`backend::Engine`]; this module only
//! prepares what it needs (force tables, the rigid body layout, writers) and
//! sequences the runs.

pub mod backend;
pub mod config;
pub mod error;
pub mod forces;
pub mod rigid;
pub mod schedule;
pub mod simulation;
#[cfg(test)]
pub(crate) mod testing;

pub mod config;
pub mod density;
pub mod error;
pub mod lattice;
pub mod packing;
pub mod snapshot;
pub mod system;

use thiserror::Error;

/// Invalid parameter combinations, raised at the point of misuse.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid value {value} for parameter '{name}'")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("n_chains and chain_lengths must be equal in length ({n_chains} vs {chain_lengths})")]
    MismatchedLengths { n_chains: usize, chain_lengths: usize },

    #[error("At least one chain species is required")]
    EmptyChainList,

    #[error("Chain length must be at least 1, got {0}")]
    NonPositiveChainLength(usize),

    #[error("Bonding along the minor axis requires a five-particle bead")]
    MissingMinorAxis,

    #[error(
        "Stacking builds an {n} x {n} lattice with 2 chains per unit cell and needs {expected} chains, got {actual}"
    )]
    LatticeChainCount {
        n: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Anneal schedule must contain at least one segment")]
    EmptySchedule,

    #[error("All three box edges are fixed; the density cannot be matched")]
    OverConstrainedBox,

    #[error("The target box has not been set")]
    MissingTargetBox,

    #[error("The system has not been assembled; call pack or stack first")]
    MissingStructure,
}

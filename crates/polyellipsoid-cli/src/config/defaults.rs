use polyellipsoid::assembly::config::{DEFAULT_BOND_LENGTH, DEFAULT_SEED};
use polyellipsoid::assembly::packing::{DEFAULT_EDGE, DEFAULT_OVERLAP};
use polyellipsoid::assembly::system::DEFAULT_BOX_EXPAND_FACTOR;
use polyellipsoid::core::models::chain::BondAxis;

pub struct DefaultsConfig {
    pub bond_length: f64,
    pub major_axis: [f64; 3],
    pub bond_axis: String,
    pub seed: u64,
    pub box_expand_factor: f64,
    pub overlap: f64,
    pub edge: f64,
    pub fix_orientation: bool,
    pub x_axis_adjust: f64,
    pub pretty: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            bond_length: DEFAULT_BOND_LENGTH,
            major_axis: [1.0, 0.0, 0.0],
            bond_axis: BondAxis::default().to_string(),
            seed: DEFAULT_SEED,
            box_expand_factor: DEFAULT_BOX_EXPAND_FACTOR,
            overlap: DEFAULT_OVERLAP,
            edge: DEFAULT_EDGE,
            fix_orientation: true,
            x_axis_adjust: 1.0,
            pretty: true,
        }
    }
}

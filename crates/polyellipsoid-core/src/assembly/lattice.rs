use crate::core::error::ConfigurationError;
use crate::core::models::chain::Chain;
use crate::core::models::structure::MolecularStructure;
use nalgebra::{Point3, Vector3};
use tracing::{debug, instrument};

/// The simulation box is this many times the lattice bounding box.
pub const BOUNDING_BOX_SCALE: f64 = 3.0;

/// An n x n lattice with two chains per unit cell. Lengths are in nanometres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatticeParams {
    /// Spacing between unit cells along y.
    pub y: f64,
    /// Spacing between layers along z.
    pub z: f64,
    /// Unit cells per lattice direction.
    pub n: usize,
    /// Offset of the second chain in a cell, applied as `vector ⊙ (0, y, z)`.
    pub vector: Vector3<f64>,
    /// Scale applied to the x edge before it is fixed in the target box.
    pub x_axis_adjust: f64,
}

impl LatticeParams {
    pub fn new(y: f64, z: f64, n: usize, vector: Vector3<f64>) -> Self {
        Self {
            y,
            z,
            n,
            vector,
            x_axis_adjust: 1.0,
        }
    }

    pub fn with_x_axis_adjust(mut self, adjust: f64) -> Self {
        self.x_axis_adjust = adjust;
        self
    }

    pub fn required_chains(&self) -> usize {
        2 * self.n * self.n
    }
}

#[derive(Debug, Clone)]
pub struct StackedLattice {
    pub structure: MolecularStructure,
    /// Box length along x to hold fixed when solving the target box.
    pub x_constraint: f64,
}

pub fn validate_chain_count(
    params: &LatticeParams,
    n_chains: usize,
) -> Result<(), ConfigurationError> {
    let expected = params.required_chains();
    if params.n == 0 || n_chains != expected {
        return Err(ConfigurationError::LatticeChainCount {
            n: params.n,
            expected,
            actual: n_chains,
        });
    }
    Ok(())
}

/// Layers chains on the lattice: cell `j` of layer `i` sits at `(0, y·j, z·i)`,
/// and the structure is centered in a box three times its bounding box.
#[instrument(skip_all, name = "lattice_stacking", fields(n = params.n))]
pub fn stack_chains(
    chains: &[Chain],
    params: &LatticeParams,
) -> Result<StackedLattice, ConfigurationError> {
    validate_chain_count(params, chains.len())?;
    if !(params.x_axis_adjust > 0.0) {
        return Err(ConfigurationError::InvalidParameter {
            name: "x_axis_adjust",
            value: params.x_axis_adjust,
        });
    }

    let cell_offset = params
        .vector
        .component_mul(&Vector3::new(0.0, params.y, params.z));

    let mut structure = MolecularStructure::new();
    let mut cells = chains.chunks_exact(2);
    for i in 0..params.n {
        for j in 0..params.n {
            let Some(pair) = cells.next() else {
                break;
            };
            let origin = Vector3::new(0.0, params.y * j as f64, params.z * i as f64);
            structure.add_chain(&pair[0], &origin);
            structure.add_chain(&pair[1], &(origin + cell_offset));
        }
    }

    let bounding = structure
        .bounding_box()
        .map(|bb| bb.lengths())
        .unwrap_or_else(Vector3::zeros);
    let box_lengths = bounding * BOUNDING_BOX_SCALE;
    for k in 0..3 {
        if !(box_lengths[k] > 0.0) {
            return Err(ConfigurationError::InvalidParameter {
                name: "lattice_box_length",
                value: box_lengths[k],
            });
        }
    }

    structure.set_box_lengths(box_lengths);
    structure.translate_to(&Point3::from(box_lengths / 2.0));
    let x_constraint = box_lengths.x * params.x_axis_adjust;
    debug!(
        "Stacked {} chains; box ({:.4}, {:.4}, {:.4}) nm, x constraint {:.4} nm",
        chains.len(),
        box_lengths.x,
        box_lengths.y,
        box_lengths.z,
        x_constraint
    );

    Ok(StackedLattice {
        structure,
        x_constraint,
    })
}

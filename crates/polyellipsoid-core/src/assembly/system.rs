use super::config::SystemConfig;
use super::density::{BoxConstraints, calculate_box_length};
use super::error::AssemblyError;
use super::lattice::{LatticeParams, stack_chains};
use super::packing::{DEFAULT_EDGE, DEFAULT_OVERLAP, Packer, PackingParams, RandomInsertionPacker};
use super::snapshot::Snapshot;
use crate::core::error::ConfigurationError;
use crate::core::models::bead::{Bead, BeadShape};
use crate::core::models::chain::Chain;
use crate::core::models::structure::MolecularStructure;
use nalgebra::Vector3;
use tracing::{info, instrument};

pub const DEFAULT_BOX_EXPAND_FACTOR: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PackOptions {
    /// The packing box is the target box scaled by this factor.
    pub box_expand_factor: f64,
    pub overlap: f64,
    pub edge: f64,
    pub fix_orientation: bool,
}

impl Default for PackOptions {
    fn default() -> Self {
        Self {
            box_expand_factor: DEFAULT_BOX_EXPAND_FACTOR,
            overlap: DEFAULT_OVERLAP,
            edge: DEFAULT_EDGE,
            fix_orientation: true,
        }
    }
}

/// A polydisperse collection of ellipsoid chains and the box they should
/// occupy at the configured density.
#[derive(Debug, Clone)]
pub struct System {
    config: SystemConfig,
    chains: Vec<Chain>,
    n_beads: usize,
    system_mass: f64,
    target_box: Option<Vector3<f64>>,
    structure: Option<MolecularStructure>,
    snapshot: Option<Snapshot>,
}

impl System {
    pub fn new(config: SystemConfig) -> Result<Self, ConfigurationError> {
        if config.n_chains.len() != config.chain_lengths.len() {
            return Err(ConfigurationError::MismatchedLengths {
                n_chains: config.n_chains.len(),
                chain_lengths: config.chain_lengths.len(),
            });
        }
        if config.n_chains.iter().sum::<usize>() == 0 {
            return Err(ConfigurationError::EmptyChainList);
        }

        let mut shape = BeadShape::new(config.bead_mass, config.bead_length, config.major_axis);
        if let Some(minor) = config.minor_axis {
            shape = shape.with_minor_axis(minor.length, minor.axis);
        }
        let template = Bead::build(&shape);

        let mut chains = Vec::new();
        let mut n_beads = 0;
        for (&count, &length) in config.n_chains.iter().zip(&config.chain_lengths) {
            let chain = Chain::build(&template, length, config.bond_length, config.bond_axis)?;
            n_beads += count * length;
            chains.extend(std::iter::repeat_n(chain, count));
        }
        let system_mass = config.bead_mass * n_beads as f64;

        info!(
            "System of {} chains, {} beads, {:.3} amu",
            chains.len(),
            n_beads,
            system_mass
        );

        Ok(Self {
            config,
            chains,
            n_beads,
            system_mass,
            target_box: None,
            structure: None,
            snapshot: None,
        })
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    pub fn chains(&self) -> &[Chain] {
        &self.chains
    }

    pub fn n_beads(&self) -> usize {
        self.n_beads
    }

    /// Total mass in amu.
    pub fn system_mass(&self) -> f64 {
        self.system_mass
    }

    pub fn target_box(&self) -> Option<Vector3<f64>> {
        self.target_box
    }

    pub fn structure(&self) -> Option<&MolecularStructure> {
        self.structure.as_ref()
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    /// Solves and stores the box that holds the whole system at the
    /// configured density.
    pub fn set_target_box(
        &mut self,
        constraints: &BoxConstraints,
    ) -> Result<Vector3<f64>, ConfigurationError> {
        let lengths = calculate_box_length(self.system_mass, self.config.density, constraints)?;
        self.target_box = Some(lengths);
        Ok(lengths)
    }

    /// Packs with the built-in random insertion packer seeded from the config.
    pub fn pack(&mut self, options: &PackOptions) -> Result<&Snapshot, AssemblyError> {
        let mut packer = RandomInsertionPacker::new(self.config.seed);
        self.pack_with(&mut packer, options)
    }

    #[instrument(skip_all, name = "pack_system")]
    pub fn pack_with<P: Packer + ?Sized>(
        &mut self,
        packer: &mut P,
        options: &PackOptions,
    ) -> Result<&Snapshot, AssemblyError> {
        if !(options.box_expand_factor > 0.0) || !options.box_expand_factor.is_finite() {
            return Err(ConfigurationError::InvalidParameter {
                name: "box_expand_factor",
                value: options.box_expand_factor,
            }
            .into());
        }
        let target = match self.target_box {
            Some(target) => target,
            None => self.set_target_box(&BoxConstraints::none())?,
        };

        let params = PackingParams {
            box_lengths: target * options.box_expand_factor,
            overlap: options.overlap,
            edge: options.edge,
            fix_orientation: options.fix_orientation,
        };
        let counts = vec![1; self.chains.len()];
        let structure = packer.fill_box(&self.chains, &counts, &params)?;
        info!(
            "Packed {} chains into a ({:.3}, {:.3}, {:.3}) nm box",
            structure.n_chains(),
            params.box_lengths.x,
            params.box_lengths.y,
            params.box_lengths.z
        );
        Ok(self.finish(structure)?)
    }

    /// Places the chains on an n x n lattice and fixes the target box x edge
    /// from the lattice extent.
    #[instrument(skip_all, name = "stack_system")]
    pub fn stack(&mut self, params: &LatticeParams) -> Result<&Snapshot, AssemblyError> {
        let lattice = stack_chains(&self.chains, params)?;
        self.set_target_box(&BoxConstraints::none().with_x(lattice.x_constraint))?;
        info!("Stacked {} chains on a {}x{} lattice", self.chains.len(), params.n, params.n);
        Ok(self.finish(lattice.structure)?)
    }

    fn finish(&mut self, mut structure: MolecularStructure) -> Result<&Snapshot, ConfigurationError> {
        let n_angles = structure.identify_angles();
        let snapshot = Snapshot::from_structure(&structure, self.config.bead_mass)?;
        info!(
            "Snapshot ready: {} rigid centers, {} particles, {} bonds, {} angles",
            snapshot.n_rigid_centers(),
            snapshot.n_particles(),
            snapshot.bonds().len(),
            n_angles
        );
        self.structure = Some(structure);
        Ok(self.snapshot.insert(snapshot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembly::config::SystemConfigBuilder;
    use crate::assembly::packing::PackingError;
    use crate::assembly::snapshot::RIGID_CENTER_TYPE;

    fn config(n_chains: Vec<usize>, lengths: Vec<usize>) -> SystemConfig {
        SystemConfigBuilder::new()
            .n_chains(n_chains)
            .chain_lengths(lengths)
            .bead_mass(100.0)
            .bead_length(1.0)
            .density(0.1)
            .build()
            .unwrap()
    }

    fn relative_eq(a: f64, b: f64) -> bool {
        ((a - b) / b).abs() < 1e-6
    }

    #[test]
    fn small_system_has_expected_mass_and_cubic_box() {
        let mut system = System::new(config(vec![2], vec![4])).unwrap();
        assert_eq!(system.n_beads(), 8);
        assert_eq!(system.system_mass(), 800.0);
        assert_eq!(system.target_box(), None);

        let target = system.set_target_box(&BoxConstraints::none()).unwrap();
        let expected = (800.0 * 1.66053906660e-24 / 0.1_f64).cbrt() * 1e7;
        for k in 0..3 {
            assert!(relative_eq(target[k], expected));
        }
        assert!(relative_eq(target.x, 2.368_352_6));
        assert_eq!(system.target_box(), Some(target));
    }

    #[test]
    fn polydisperse_counts_sum_over_groups() {
        let system = System::new(config(vec![2, 3], vec![4, 1])).unwrap();
        assert_eq!(system.n_beads(), 11);
        assert_eq!(system.chains().len(), 5);
        assert_eq!(system.system_mass(), 1100.0);
    }

    #[test]
    fn zero_length_chain_is_rejected() {
        let result = System::new(config(vec![1], vec![0]));
        assert!(matches!(
            result,
            Err(ConfigurationError::NonPositiveChainLength(0))
        ));
    }

    #[test]
    fn pack_builds_snapshot_with_rigid_centers_first() {
        let mut system = System::new(config(vec![2], vec![4])).unwrap();
        let snapshot = system.pack(&PackOptions::default()).unwrap().clone();

        assert_eq!(snapshot.n_rigid_centers(), 8);
        assert_eq!(snapshot.n_particles(), 8 + 8 * 3);
        assert_eq!(snapshot.types()[0], RIGID_CENTER_TYPE);
        for center in snapshot.rigid_centers() {
            assert_eq!(snapshot.bodies()[center.index()], center.index());
        }
        for constituent in snapshot.constituents() {
            let owner = snapshot.owner_of(constituent).unwrap();
            assert_eq!(snapshot.bodies()[constituent.index()], owner.index());
        }

        let target = system.target_box().unwrap();
        assert_eq!(snapshot.box_lengths(), target * DEFAULT_BOX_EXPAND_FACTOR);
        let structure = system.structure().unwrap();
        assert_eq!(structure.n_chains(), 2);
        // CH of every inner bead joins CC and the next CT: 3 angles per 4-bead chain.
        assert_eq!(structure.angles().len(), 6);
    }

    #[test]
    fn pack_reports_packer_failures() {
        struct FailingPacker;
        impl Packer for FailingPacker {
            fn fill_box(
                &mut self,
                _chains: &[Chain],
                _counts: &[usize],
                _params: &PackingParams,
            ) -> Result<MolecularStructure, PackingError> {
                Err(PackingError::NoPlacement {
                    chain: 0,
                    attempts: 1,
                })
            }
        }

        let mut system = System::new(config(vec![1], vec![2])).unwrap();
        let result = system.pack_with(&mut FailingPacker, &PackOptions::default());
        assert!(matches!(result, Err(AssemblyError::Packing(_))));
        assert!(system.snapshot().is_none());
    }

    #[test]
    fn stack_requires_two_n_squared_chains() {
        let mut system = System::new(config(vec![7], vec![2])).unwrap();
        let params = LatticeParams::new(1.0, 1.0, 2, Vector3::new(0.0, 0.5, 0.5));
        let result = system.stack(&params);
        assert!(matches!(
            result,
            Err(AssemblyError::Configuration(
                ConfigurationError::LatticeChainCount {
                    n: 2,
                    expected: 8,
                    actual: 7
                }
            ))
        ));
    }

    #[test]
    fn stack_fixes_the_target_x_edge() {
        let mut system = System::new(config(vec![8], vec![2])).unwrap();
        let params = LatticeParams::new(1.0, 1.0, 2, Vector3::new(0.0, 0.5, 0.5))
            .with_x_axis_adjust(0.5);
        let snapshot_box = system.stack(&params).unwrap().box_lengths();

        let target = system.target_box().unwrap();
        assert!((target.x - snapshot_box.x * 0.5).abs() < 1e-9);
        assert!((target.y - target.z).abs() < 1e-9);
        let volume_cm3 = target.x * target.y * target.z * 1e-21;
        let expected = system.system_mass() * 1.66053906660e-24 / 0.1;
        assert!(((volume_cm3 - expected) / expected).abs() < 1e-9);
    }
}

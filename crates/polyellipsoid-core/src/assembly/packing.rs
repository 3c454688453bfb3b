use super::config::DEFAULT_SEED;
use crate::core::models::chain::Chain;
use crate::core::models::structure::MolecularStructure;
use kiddo::{KdTree, SquaredEuclidean};
use nalgebra::{Point3, Rotation3, Unit, Vector3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;
use tracing::{debug, instrument, warn};

pub const DEFAULT_OVERLAP: f64 = 0.5;
pub const DEFAULT_EDGE: f64 = 0.5;
pub const DEFAULT_MAX_ATTEMPTS: usize = 10_000;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PackingError {
    #[error("No overlap-free placement found for chain {chain} after {attempts} attempts")]
    NoPlacement { chain: usize, attempts: usize },

    #[error("Chain {chain} does not fit inside the packing box with the requested edge margin")]
    ChainTooLarge { chain: usize },

    #[error("Got {counts} replication counts for {chains} chains")]
    CountMismatch { chains: usize, counts: usize },
}

/// Geometry of a packing request. Lengths are in nanometres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PackingParams {
    pub box_lengths: Vector3<f64>,
    /// Minimum distance between particles of different chains.
    pub overlap: f64,
    /// Minimum distance between any particle and the box faces.
    pub edge: f64,
    /// Place chains as built, without rotating them.
    pub fix_orientation: bool,
}

impl PackingParams {
    pub fn new(box_lengths: Vector3<f64>) -> Self {
        Self {
            box_lengths,
            overlap: DEFAULT_OVERLAP,
            edge: DEFAULT_EDGE,
            fix_orientation: true,
        }
    }
}

/// Places copies of chains into a box without overlap.
pub trait Packer {
    fn fill_box(
        &mut self,
        chains: &[Chain],
        counts: &[usize],
        params: &PackingParams,
    ) -> Result<MolecularStructure, PackingError>;
}

/// Random sequential insertion with a bounded number of attempts per chain.
///
/// Failure is reported, never retried with a larger box.
#[derive(Debug, Clone)]
pub struct RandomInsertionPacker {
    rng: StdRng,
    max_attempts: usize,
}

impl Default for RandomInsertionPacker {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl RandomInsertionPacker {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    fn random_rotation(&mut self) -> Rotation3<f64> {
        let axis = Vector3::new(
            self.rng.gen_range(-1.0..1.0),
            self.rng.gen_range(-1.0..1.0),
            self.rng.gen_range(-1.0..1.0),
        );
        match Unit::try_new(axis, 1e-6) {
            Some(axis) => {
                Rotation3::from_axis_angle(&axis, self.rng.gen_range(0.0..std::f64::consts::TAU))
            }
            None => Rotation3::identity(),
        }
    }
}

impl Packer for RandomInsertionPacker {
    #[instrument(skip_all, name = "random_insertion_packing")]
    fn fill_box(
        &mut self,
        chains: &[Chain],
        counts: &[usize],
        params: &PackingParams,
    ) -> Result<MolecularStructure, PackingError> {
        if chains.len() != counts.len() {
            return Err(PackingError::CountMismatch {
                chains: chains.len(),
                counts: counts.len(),
            });
        }

        let mut placed_particles = PlacedParticles::new(params.overlap);
        let mut structure = MolecularStructure::new();
        let mut placed = 0usize;

        for (chain, &count) in chains.iter().zip(counts) {
            for _ in 0..count {
                let mut candidate = chain.clone();
                if !params.fix_orientation {
                    let rotation = self.random_rotation();
                    let pivot = candidate
                        .bounding_box()
                        .map(|bb| bb.center())
                        .unwrap_or_else(Point3::origin);
                    for particle in candidate.particles.iter_mut() {
                        particle.position = pivot + rotation * (particle.position - pivot);
                    }
                }

                let bb = candidate
                    .bounding_box()
                    .ok_or(PackingError::ChainTooLarge { chain: placed })?;
                let low = Vector3::repeat(params.edge) - bb.min.coords;
                let high = params.box_lengths - Vector3::repeat(params.edge) - bb.max.coords;
                if (0..3).any(|k| low[k] > high[k]) {
                    return Err(PackingError::ChainTooLarge { chain: placed });
                }

                let positions: Vec<Point3<f64>> = candidate.positions().copied().collect();
                let mut accepted = None;
                for attempt in 0..self.max_attempts {
                    let offset = Vector3::from_fn(|k, _| {
                        if high[k] > low[k] {
                            self.rng.gen_range(low[k]..=high[k])
                        } else {
                            low[k]
                        }
                    });
                    if positions.iter().all(|p| placed_particles.is_free(&(p + offset))) {
                        debug!(chain = placed, attempt, "Placed chain.");
                        accepted = Some(offset);
                        break;
                    }
                }

                let Some(offset) = accepted else {
                    warn!(
                        chain = placed,
                        attempts = self.max_attempts,
                        "Packing failed; a larger box expansion factor may help."
                    );
                    return Err(PackingError::NoPlacement {
                        chain: placed,
                        attempts: self.max_attempts,
                    });
                };

                for p in &positions {
                    placed_particles.insert(&(p + offset));
                }
                structure.add_chain(&candidate, &offset);
                placed += 1;
            }
        }

        structure.set_box_lengths(params.box_lengths);
        Ok(structure)
    }
}

/// Accepted particle positions, searched for the nearest neighbor of each
/// candidate particle.
struct PlacedParticles {
    tree: KdTree<f64, 3>,
    // Tilted frame so collinear particles never share a coordinate on a tree axis.
    frame: Rotation3<f64>,
    min_distance_sq: f64,
}

impl PlacedParticles {
    fn new(min_distance: f64) -> Self {
        let min_distance = min_distance.max(0.0);
        Self {
            tree: KdTree::new(),
            frame: Rotation3::from_euler_angles(0.31, 0.73, 1.17),
            min_distance_sq: min_distance * min_distance,
        }
    }

    fn key(&self, p: &Point3<f64>) -> [f64; 3] {
        let q = self.frame * p;
        [q.x, q.y, q.z]
    }

    fn insert(&mut self, p: &Point3<f64>) {
        let key = self.key(p);
        let item = self.tree.size() as u64;
        self.tree.add(&key, item);
    }

    fn is_free(&self, p: &Point3<f64>) -> bool {
        if self.tree.size() == 0 {
            return true;
        }
        let nearest = self.tree.nearest_one::<SquaredEuclidean>(&self.key(p));
        nearest.distance >= self.min_distance_sq
    }
}

use super::config::GayBerneParams;
use crate::assembly::snapshot::{BondType, RIGID_CENTER_TYPE};
use crate::core::models::topology::BondKind;

impl GayBerneParams {
    pub const ZERO: Self = Self {
        epsilon: 0.0,
        lperp: 0.0,
        lpar: 0.0,
    };
}

#[derive(Debug, Clone, PartialEq)]
pub struct PairEntry {
    pub types: (String, String),
    pub params: GayBerneParams,
}

/// Anisotropic pair coefficients for every unordered pair of particle types.
///
/// Only rigid centers interact; every pair involving a constituent type has
/// zero coefficients.
#[derive(Debug, Clone, PartialEq)]
pub struct PairTable {
    pub r_cut: f64,
    /// Neighbor-list skin.
    pub buffer: f64,
    entries: Vec<PairEntry>,
}

impl PairTable {
    pub fn gay_berne(types: &[String], params: GayBerneParams, r_cut: f64, buffer: f64) -> Self {
        let mut entries = Vec::with_capacity(types.len() * (types.len() + 1) / 2);
        for (i, a) in types.iter().enumerate() {
            for b in &types[i..] {
                let params = if a == RIGID_CENTER_TYPE && b == RIGID_CENTER_TYPE {
                    params
                } else {
                    GayBerneParams::ZERO
                };
                entries.push(PairEntry {
                    types: (a.clone(), b.clone()),
                    params,
                });
            }
        }
        Self {
            r_cut,
            buffer,
            entries,
        }
    }

    pub fn entries(&self) -> &[PairEntry] {
        &self.entries
    }

    /// Coefficients for `a`–`b` in either order.
    pub fn get(&self, a: &str, b: &str) -> Option<&GayBerneParams> {
        self.entries
            .iter()
            .find(|e| (e.types.0 == a && e.types.1 == b) || (e.types.0 == b && e.types.1 == a))
            .map(|e| &e.params)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HarmonicParams {
    pub k: f64,
    pub r0: f64,
}

/// Harmonic coefficients keyed by bond type name.
///
/// Backbone bonds hold neighboring beads `bond_length` apart. Bonds inside a
/// bead are already fixed by the rigid constraint and carry no stiffness.
#[derive(Debug, Clone, PartialEq)]
pub struct BondTable {
    entries: Vec<(String, HarmonicParams)>,
}

impl BondTable {
    pub fn harmonic(bond_types: &[BondType], bond_k: f64, bond_length: f64) -> Self {
        let mut table = Self {
            entries: Vec::with_capacity(bond_types.len() * 2),
        };
        for bond_type in bond_types {
            let params = match bond_type.kind {
                BondKind::Backbone => HarmonicParams {
                    k: bond_k,
                    r0: bond_length,
                },
                BondKind::Internal => HarmonicParams { k: 0.0, r0: 0.0 },
            };
            table.insert(bond_type.name.clone(), params);
            // Both spellings of the pair so the lookup is order independent.
            if let Some((a, b)) = bond_type.name.split_once('-') {
                table.insert(format!("{b}-{a}"), params);
            }
        }
        table
    }

    fn insert(&mut self, name: String, params: HarmonicParams) {
        if !self.entries.iter().any(|(n, _)| *n == name) {
            self.entries.push((name, params));
        }
    }

    pub fn entries(&self) -> &[(String, HarmonicParams)] {
        &self.entries
    }

    pub fn get(&self, name: &str) -> Option<&HarmonicParams> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, params)| params)
    }
}

//! Unit conversion constants.
//!
//! Every length handled by this crate is in nanometres, every mass in atomic mass units and
//! every density in g/cm³. These constants are the only place conversions happen.

/// Grams per atomic mass unit.
pub const AMU_TO_G: f64 = 1.660_539_066_60e-24;

/// Nanometres per centimetre.
pub const CM_TO_NM: f64 = 1.0e7;

/// Nanometres per angstrom, for callers holding lengths in angstroms.
pub const ANGSTROM_TO_NM: f64 = 0.1;

#[inline]
pub fn amu_to_grams(mass_amu: f64) -> f64 {
    mass_amu * AMU_TO_G
}

#[inline]
pub fn cm_to_nm(length_cm: f64) -> f64 {
    length_cm * CM_TO_NM
}

#[inline]
pub fn nm_to_cm(length_nm: f64) -> f64 {
    length_nm / CM_TO_NM
}

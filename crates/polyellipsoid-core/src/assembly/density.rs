use crate::core::error::ConfigurationError;
use crate::core::units::{amu_to_grams, cm_to_nm, nm_to_cm};
use nalgebra::Vector3;
use tracing::debug;

/// Box edges held fixed while the remaining edges are solved for density.
/// Values are in nanometres.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoxConstraints {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
}

impl BoxConstraints {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_x(mut self, length: f64) -> Self {
        self.x = Some(length);
        self
    }

    pub fn with_y(mut self, length: f64) -> Self {
        self.y = Some(length);
        self
    }

    pub fn with_z(mut self, length: f64) -> Self {
        self.z = Some(length);
        self
    }

    pub fn as_array(&self) -> [Option<f64>; 3] {
        [self.x, self.y, self.z]
    }

    pub fn n_fixed(&self) -> usize {
        self.as_array().iter().filter(|c| c.is_some()).count()
    }
}

/// Solves the box edge lengths (nm) that give `system_mass` (amu) the requested
/// `density` (g/cm³).
///
/// Unconstrained boxes are cubic. With one fixed edge the two free edges are
/// equal; with two fixed edges the third absorbs the remaining volume.
pub fn calculate_box_length(
    system_mass: f64,
    density: f64,
    constraints: &BoxConstraints,
) -> Result<Vector3<f64>, ConfigurationError> {
    if !(system_mass > 0.0) || !system_mass.is_finite() {
        return Err(ConfigurationError::InvalidParameter {
            name: "system_mass",
            value: system_mass,
        });
    }
    if !(density > 0.0) || !density.is_finite() {
        return Err(ConfigurationError::InvalidParameter {
            name: "density",
            value: density,
        });
    }
    for fixed in constraints.as_array().into_iter().flatten() {
        if !(fixed > 0.0) || !fixed.is_finite() {
            return Err(ConfigurationError::InvalidParameter {
                name: "box_constraint",
                value: fixed,
            });
        }
    }

    let mass_g = amu_to_grams(system_mass);
    let volume_cm3 = mass_g / density;

    let fixed_cm: Vec<f64> = constraints
        .as_array()
        .into_iter()
        .flatten()
        .map(nm_to_cm)
        .collect();

    let free_length_cm = match fixed_cm.len() {
        0 => volume_cm3.cbrt(),
        1 => (volume_cm3 / fixed_cm[0]).sqrt(),
        2 => volume_cm3 / (fixed_cm[0] * fixed_cm[1]),
        _ => return Err(ConfigurationError::OverConstrainedBox),
    };
    let free_length = cm_to_nm(free_length_cm);

    let [x, y, z] = constraints.as_array().map(|c| c.unwrap_or(free_length));
    debug!(
        system_mass,
        density,
        n_fixed = fixed_cm.len(),
        "Solved box lengths: ({x:.6}, {y:.6}, {z:.6}) nm"
    );
    Ok(Vector3::new(x, y, z))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::units::{AMU_TO_G, CM_TO_NM};

    fn volume_nm3(mass: f64, density: f64) -> f64 {
        mass * AMU_TO_G / density * CM_TO_NM.powi(3)
    }

    fn relative_error(a: f64, b: f64) -> f64 {
        ((a - b) / b).abs()
    }

    #[test]
    fn unconstrained_box_is_cubic_and_matches_density() {
        let lengths = calculate_box_length(800.0, 0.1, &BoxConstraints::none()).unwrap();
        assert_eq!(lengths.x, lengths.y);
        assert_eq!(lengths.y, lengths.z);
        let expected = (800.0 * AMU_TO_G / 0.1_f64).cbrt() * CM_TO_NM;
        assert!(relative_error(lengths.x, expected) < 1e-12);
        assert!(relative_error(lengths.product(), volume_nm3(800.0, 0.1)) < 1e-9);
    }

    #[test]
    fn one_fixed_edge_splits_the_rest_evenly() {
        let constraints = BoxConstraints::none().with_x(10.0);
        let lengths = calculate_box_length(5000.0, 0.8, &constraints).unwrap();
        assert_eq!(lengths.x, 10.0);
        assert!(relative_error(lengths.y, lengths.z) < 1e-15);
        assert!(relative_error(lengths.product(), volume_nm3(5000.0, 0.8)) < 1e-9);
    }

    #[test]
    fn two_fixed_edges_solve_the_third() {
        let constraints = BoxConstraints::none().with_x(3.0).with_z(4.0);
        let lengths = calculate_box_length(12000.0, 1.2, &constraints).unwrap();
        assert_eq!(lengths.x, 3.0);
        assert_eq!(lengths.z, 4.0);
        assert!(relative_error(lengths.product(), volume_nm3(12000.0, 1.2)) < 1e-9);
    }

    #[test]
    fn every_constraint_subset_preserves_volume() {
        let options = [None, Some(2.5)];
        for x in options {
            for y in options {
                for z in [None, Some(7.0)] {
                    let constraints = BoxConstraints { x, y, z };
                    if constraints.n_fixed() == 3 {
                        continue;
                    }
                    let lengths = calculate_box_length(2500.0, 0.5, &constraints).unwrap();
                    assert!(relative_error(lengths.product(), volume_nm3(2500.0, 0.5)) < 1e-9);
                }
            }
        }
    }

    #[test]
    fn calculation_is_idempotent() {
        let constraints = BoxConstraints::none().with_y(6.0);
        let first = calculate_box_length(1234.0, 0.9, &constraints).unwrap();
        let second = calculate_box_length(1234.0, 0.9, &constraints).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn fully_fixed_box_is_rejected() {
        let constraints = BoxConstraints::none().with_x(1.0).with_y(1.0).with_z(1.0);
        assert_eq!(
            calculate_box_length(100.0, 1.0, &constraints),
            Err(ConfigurationError::OverConstrainedBox)
        );
    }

    #[test]
    fn non_positive_inputs_are_rejected() {
        assert!(matches!(
            calculate_box_length(0.0, 1.0, &BoxConstraints::none()),
            Err(ConfigurationError::InvalidParameter { name: "system_mass", .. })
        ));
        assert!(matches!(
            calculate_box_length(100.0, -1.0, &BoxConstraints::none()),
            Err(ConfigurationError::InvalidParameter { name: "density", .. })
        ));
        assert!(matches!(
            calculate_box_length(100.0, 1.0, &BoxConstraints::none().with_z(0.0)),
            Err(ConfigurationError::InvalidParameter { name: "box_constraint", .. })
        ));
    }
}

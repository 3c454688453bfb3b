use crate::cli::TargetBoxArgs;
use crate::config;
use crate::error::Result;
use nalgebra::Vector3;
use polyellipsoid::assembly::system::System;
use tracing::info;

pub fn run(args: TargetBoxArgs) -> Result<()> {
    let lengths = solve(&args)?;
    println!(
        "Target box (nm): {:.6} {:.6} {:.6}",
        lengths.x, lengths.y, lengths.z
    );
    Ok(())
}

pub fn solve(args: &TargetBoxArgs) -> Result<Vector3<f64>> {
    let app_config = config::build_config(&args.config, &args.set_values, &args.fixed, None)?;
    let mut system = System::new(app_config.system)?;
    let lengths = system.set_target_box(&app_config.constraints)?;
    info!(
        "{} beads, {:.3} amu -> box ({:.4}, {:.4}, {:.4}) nm",
        system.n_beads(),
        system.system_mass(),
        lengths.x,
        lengths.y,
        lengths.z
    );
    Ok(lengths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::FixedEdges;
    use crate::error::CliError;
    use polyellipsoid::core::error::ConfigurationError;
    use std::fs;
    use std::path::Path;

    fn write_config(dir: &Path) -> std::path::PathBuf {
        let path = dir.join("system.toml");
        fs::write(
            &path,
            "[system]\nn-chains = [2]\nchain-lengths = [4]\nbead-mass = 100.0\nbead-length = 1.0\ndensity = 0.1\n",
        )
        .unwrap();
        path
    }

    #[test]
    fn cubic_box_matches_density() {
        let dir = tempfile::tempdir().unwrap();
        let args = TargetBoxArgs {
            config: write_config(dir.path()),
            fixed: FixedEdges::default(),
            set_values: Vec::new(),
        };
        let lengths = solve(&args).unwrap();
        assert!((lengths.x - 2.368_352_6).abs() < 1e-6);
        assert_eq!(lengths.x, lengths.y);
        assert_eq!(lengths.y, lengths.z);
    }

    #[test]
    fn fully_fixed_box_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let args = TargetBoxArgs {
            config: write_config(dir.path()),
            fixed: FixedEdges {
                fix_x: Some(1.0),
                fix_y: Some(1.0),
                fix_z: Some(1.0),
            },
            set_values: Vec::new(),
        };
        assert!(matches!(
            solve(&args),
            Err(CliError::InvalidSystem(ConfigurationError::OverConstrainedBox))
        ));
    }
}

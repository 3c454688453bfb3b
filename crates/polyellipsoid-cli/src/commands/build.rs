use crate::cli::BuildArgs;
use crate::config::{self, AssemblyStrategy};
use crate::error::{CliError, Result};
use polyellipsoid::assembly::snapshot::Snapshot;
use polyellipsoid::assembly::system::System;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use tracing::info;

#[derive(Serialize)]
struct BuildReport<'a> {
    n_beads: usize,
    system_mass: f64,
    target_box: Option<[f64; 3]>,
    snapshot: &'a Snapshot,
}

pub fn run(args: BuildArgs) -> Result<()> {
    let app_config =
        config::build_config(&args.config, &args.set_values, &args.fixed, args.seed)?;
    let mut system = System::new(app_config.system)?;

    match &app_config.assembly {
        AssemblyStrategy::Pack(options) => {
            system.set_target_box(&app_config.constraints)?;
            info!("Packing {} chains...", system.chains().len());
            system.pack(options)?;
        }
        AssemblyStrategy::Stack(params) => {
            info!("Stacking {} chains on an {}x{} lattice...", system.chains().len(), params.n, params.n);
            system.stack(params)?;
        }
    }

    let snapshot = system
        .snapshot()
        .ok_or_else(|| CliError::Other(anyhow::anyhow!("assembly produced no snapshot")))?;
    let report = BuildReport {
        n_beads: system.n_beads(),
        system_mass: system.system_mass(),
        target_box: system.target_box().map(|b| [b.x, b.y, b.z]),
        snapshot,
    };

    let mut writer = BufWriter::new(File::create(&args.output)?);
    if app_config.pretty {
        serde_json::to_writer_pretty(&mut writer, &report)?;
    } else {
        serde_json::to_writer(&mut writer, &report)?;
    }
    writeln!(writer)?;
    writer.flush()?;

    println!(
        "Wrote {} particles ({} rigid bodies) to {}",
        snapshot.n_particles(),
        snapshot.n_rigid_centers(),
        args.output.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::FixedEdges;
    use polyellipsoid::assembly::error::AssemblyError;
    use polyellipsoid::core::error::ConfigurationError;
    use serde_json::Value;
    use std::fs;
    use std::path::{Path, PathBuf};

    const SYSTEM: &str = "[system]\nn-chains = [2]\nchain-lengths = [4]\nbead-mass = 100.0\nbead-length = 1.0\ndensity = 0.1\n";

    fn args(dir: &Path, content: &str) -> BuildArgs {
        let config = dir.join("system.toml");
        fs::write(&config, content).unwrap();
        BuildArgs {
            config,
            output: dir.join("snapshot.json"),
            seed: None,
            fixed: FixedEdges::default(),
            set_values: Vec::new(),
        }
    }

    fn read_report(path: &PathBuf) -> Value {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn pack_writes_snapshot_json() {
        let dir = tempfile::tempdir().unwrap();
        let args = args(dir.path(), SYSTEM);
        let output = args.output.clone();
        run(args).unwrap();

        let report = read_report(&output);
        assert_eq!(report["n_beads"], 8);
        assert_eq!(report["system_mass"], 800.0);
        let snapshot = &report["snapshot"];
        assert_eq!(snapshot["positions"].as_array().unwrap().len(), 8 + 24);
        assert_eq!(snapshot["types"][0], "R");
        assert_eq!(snapshot["bodies"][8], 0);
        assert_eq!(snapshot["bond_types"][1]["kind"], "backbone");
    }

    #[test]
    fn stack_writes_snapshot_json() {
        let dir = tempfile::tempdir().unwrap();
        let content = format!(
            "{}\n[assembly]\ntype = \"stack\"\ny = 1.0\nz = 1.0\nn = 1\nvector = [0.0, 0.5, 0.5]\n\n[output]\npretty = false\n",
            SYSTEM
        );
        let args = args(dir.path(), &content);
        let output = args.output.clone();
        run(args).unwrap();

        let raw = fs::read_to_string(&output).unwrap();
        assert_eq!(raw.lines().count(), 1);
        let report = read_report(&output);
        assert!(report["target_box"].is_array());
    }

    #[test]
    fn wrong_lattice_size_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let content = format!(
            "{}\n[assembly]\ntype = \"stack\"\ny = 1.0\nz = 1.0\nn = 2\nvector = [0.0, 0.5, 0.5]\n",
            SYSTEM
        );
        let result = run(args(dir.path(), &content));
        assert!(matches!(
            result,
            Err(CliError::Assembly(AssemblyError::Configuration(
                ConfigurationError::LatticeChainCount { .. }
            )))
        ));
    }

    #[test]
    fn stack_with_fixed_edge_is_rejected_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let content = format!(
            "{}\n[assembly]\ntype = \"stack\"\ny = 1.0\nz = 1.0\nn = 1\nvector = [0.0, 0.5, 0.5]\n",
            SYSTEM
        );
        let mut args = args(dir.path(), &content);
        args.fixed.fix_y = Some(5.0);
        let output = args.output.clone();

        assert!(matches!(run(args), Err(CliError::Config(_))));
        assert!(!output.exists());
    }
}

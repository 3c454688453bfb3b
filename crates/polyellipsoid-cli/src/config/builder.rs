use super::defaults::DefaultsConfig;
use super::file::{FileAssemblyConfig, FileConfig, FileSystemConfig};
use super::models::{AppConfig, AssemblyStrategy};
use crate::cli::FixedEdges;
use crate::error::{CliError, Result};
use crate::utils::parser;
use nalgebra::Vector3;
use polyellipsoid::assembly::config::{SystemConfig, SystemConfigBuilder};
use polyellipsoid::assembly::density::BoxConstraints;
use polyellipsoid::assembly::lattice::LatticeParams;
use polyellipsoid::assembly::system::PackOptions;
use polyellipsoid::core::models::chain::BondAxis;
use std::path::Path;
use std::str::FromStr;

/// Reads `config_path`, applies `--set` overrides and CLI flags, and fills
/// everything left unset from [`DefaultsConfig`].
pub fn build_config(
    config_path: &Path,
    set_values: &[String],
    fixed: &FixedEdges,
    seed: Option<u64>,
) -> Result<AppConfig> {
    let file_config = FileConfig::from_file(config_path)?;
    merge(file_config, set_values, fixed, seed)
}

fn merge(
    file_config: FileConfig,
    set_values: &[String],
    fixed: &FixedEdges,
    seed: Option<u64>,
) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();
    let mut file_config = apply_set_values(file_config, set_values)?;

    let system_file = file_config.system.take().unwrap_or_default();
    let system = build_system_config(system_file, seed, &defaults)?;

    let box_file = file_config.target_box.unwrap_or_default();
    let constraints = BoxConstraints {
        x: fixed.fix_x.or(box_file.x),
        y: fixed.fix_y.or(box_file.y),
        z: fixed.fix_z.or(box_file.z),
    };

    let assembly = match file_config.assembly.take() {
        None => AssemblyStrategy::Pack(PackOptions::default()),
        Some(FileAssemblyConfig::Pack {
            box_expand_factor,
            overlap,
            edge,
            fix_orientation,
        }) => AssemblyStrategy::Pack(PackOptions {
            box_expand_factor: box_expand_factor.unwrap_or(defaults.box_expand_factor),
            overlap: overlap.unwrap_or(defaults.overlap),
            edge: edge.unwrap_or(defaults.edge),
            fix_orientation: fix_orientation.unwrap_or(defaults.fix_orientation),
        }),
        Some(FileAssemblyConfig::Stack {
            y,
            z,
            n,
            vector,
            x_axis_adjust,
        }) => AssemblyStrategy::Stack(
            LatticeParams::new(y, z, n, Vector3::from(vector))
                .with_x_axis_adjust(x_axis_adjust.unwrap_or(defaults.x_axis_adjust)),
        ),
    };

    if matches!(assembly, AssemblyStrategy::Stack(_)) && constraints.n_fixed() > 0 {
        return Err(CliError::Config(
            "Fixed target box edges only apply to the pack strategy; stacking sets the x edge from the lattice."
                .to_string(),
        ));
    }

    let pretty = file_config
        .output
        .and_then(|o| o.pretty)
        .unwrap_or(defaults.pretty);

    Ok(AppConfig {
        system,
        constraints,
        assembly,
        pretty,
    })
}

fn build_system_config(
    file: FileSystemConfig,
    seed: Option<u64>,
    defaults: &DefaultsConfig,
) -> Result<SystemConfig> {
    let bond_axis_name = file.bond_axis.as_deref().unwrap_or(&defaults.bond_axis);
    let bond_axis = BondAxis::from_str(bond_axis_name).map_err(|_| {
        CliError::Config(format!(
            "Invalid bond-axis '{}'. Expected 'major' or 'minor'.",
            bond_axis_name
        ))
    })?;

    let mut builder = SystemConfigBuilder::new()
        .bond_length(file.bond_length.unwrap_or(defaults.bond_length))
        .major_axis(Vector3::from(file.major_axis.unwrap_or(defaults.major_axis)))
        .bond_axis(bond_axis)
        .seed(seed.or(file.seed).unwrap_or(defaults.seed));
    if let Some(n_chains) = file.n_chains {
        builder = builder.n_chains(n_chains);
    }
    if let Some(lengths) = file.chain_lengths {
        builder = builder.chain_lengths(lengths);
    }
    if let Some(mass) = file.bead_mass {
        builder = builder.bead_mass(mass);
    }
    if let Some(length) = file.bead_length {
        builder = builder.bead_length(length);
    }
    if let Some(density) = file.density {
        builder = builder.density(density);
    }
    match (file.minor_length, file.minor_axis) {
        (Some(length), Some(axis)) => builder = builder.minor_axis(length, Vector3::from(axis)),
        (None, None) => {}
        _ => {
            return Err(CliError::Config(
                "`minor-length` and `minor-axis` must be given together.".to_string(),
            ));
        }
    }

    builder.build().map_err(|e| CliError::Config(e.to_string()))
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for raw in set_values {
        let set = parser::parse_set_value(raw).map_err(|e| CliError::Argument(e.to_string()))?;
        let (key, value) = (set.key, set.value);
        match set.section {
            "system" => {
                let system = config.system.get_or_insert_with(Default::default);
                match key {
                    "bead-mass" => system.bead_mass = Some(parse_value(key, value)?),
                    "bead-length" => system.bead_length = Some(parse_value(key, value)?),
                    "density" => system.density = Some(parse_value(key, value)?),
                    "bond-length" => system.bond_length = Some(parse_value(key, value)?),
                    "bond-axis" => system.bond_axis = Some(value.to_string()),
                    "seed" => system.seed = Some(parse_value(key, value)?),
                    _ => return Err(unsupported(raw)),
                }
            }
            "target-box" => {
                let target = config.target_box.get_or_insert_with(Default::default);
                let edge = Some(parse_value(key, value)?);
                match key {
                    "x" => target.x = edge,
                    "y" => target.y = edge,
                    "z" => target.z = edge,
                    _ => return Err(unsupported(raw)),
                }
            }
            "output" if key == "pretty" => {
                config.output.get_or_insert_with(Default::default).pretty =
                    Some(parse_value(key, value)?);
            }
            _ => return Err(unsupported(raw)),
        }
    }
    Ok(config)
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid value for {}: {}", key, value)))
}

fn unsupported(raw: &str) -> CliError {
    CliError::Config(format!("Unsupported configuration key for --set: '{}'", raw))
}

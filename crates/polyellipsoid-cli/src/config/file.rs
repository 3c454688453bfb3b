use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileSystemConfig {
    #[serde(rename = "n-chains")]
    pub n_chains: Option<Vec<usize>>,
    #[serde(rename = "chain-lengths")]
    pub chain_lengths: Option<Vec<usize>>,
    #[serde(rename = "bead-mass")]
    pub bead_mass: Option<f64>,
    #[serde(rename = "bead-length")]
    pub bead_length: Option<f64>,
    pub density: Option<f64>,
    #[serde(rename = "bond-length")]
    pub bond_length: Option<f64>,
    #[serde(rename = "major-axis")]
    pub major_axis: Option<[f64; 3]>,
    #[serde(rename = "minor-length")]
    pub minor_length: Option<f64>,
    #[serde(rename = "minor-axis")]
    pub minor_axis: Option<[f64; 3]>,
    #[serde(rename = "bond-axis")]
    pub bond_axis: Option<String>,
    pub seed: Option<u64>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", tag = "type", deny_unknown_fields)]
pub enum FileAssemblyConfig {
    #[serde(rename_all = "kebab-case")]
    Pack {
        box_expand_factor: Option<f64>,
        overlap: Option<f64>,
        edge: Option<f64>,
        fix_orientation: Option<bool>,
    },
    #[serde(rename_all = "kebab-case")]
    Stack {
        y: f64,
        z: f64,
        n: usize,
        vector: [f64; 3],
        x_axis_adjust: Option<f64>,
    },
}

#[derive(Deserialize, Debug, Default, Clone, Copy)]
#[serde(deny_unknown_fields)]
pub struct FileTargetBoxConfig {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone, Copy)]
#[serde(deny_unknown_fields)]
pub struct FileOutputConfig {
    pub pretty: Option<bool>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub system: Option<FileSystemConfig>,
    pub assembly: Option<FileAssemblyConfig>,
    #[serde(rename = "target-box")]
    pub target_box: Option<FileTargetBoxConfig>,
    pub output: Option<FileOutputConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    pub fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

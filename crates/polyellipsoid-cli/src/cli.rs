use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "polyellipsoid CLI - build coarse-grained systems of rigid ellipsoid polymer chains at a target density.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Assemble a packed or stacked system and write its rigid-body snapshot as JSON.
    Build(BuildArgs),
    /// Print the box that holds the configured system at its target density.
    TargetBox(TargetBoxArgs),
}

/// Box edges (nm) held fixed when solving for the target density.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct FixedEdges {
    /// Fix the box length along x.
    #[arg(long, value_name = "NM")]
    pub fix_x: Option<f64>,
    /// Fix the box length along y.
    #[arg(long, value_name = "NM")]
    pub fix_y: Option<f64>,
    /// Fix the box length along z.
    #[arg(long, value_name = "NM")]
    pub fix_z: Option<f64>,
}

/// Arguments for the `build` subcommand.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Path to the system configuration file in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub config: PathBuf,

    /// Path for the output snapshot (JSON).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Override the random seed used by the packer.
    #[arg(long, value_name = "INT")]
    pub seed: Option<u64>,

    #[command(flatten)]
    pub fixed: FixedEdges,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S system.density=0.5
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `target-box` subcommand.
#[derive(Args, Debug)]
pub struct TargetBoxArgs {
    /// Path to the system configuration file in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub config: PathBuf,

    #[command(flatten)]
    pub fixed: FixedEdges,

    /// Set a specific configuration value, overriding the config file.
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_arguments_parse() {
        let cli = Cli::parse_from([
            "polyellipsoid",
            "-vv",
            "build",
            "-c",
            "system.toml",
            "-o",
            "out.json",
            "--fix-x",
            "12.5",
            "-S",
            "system.density=0.5",
        ]);
        assert_eq!(cli.verbose, 2);
        let Commands::Build(args) = cli.command else {
            panic!("expected the build subcommand");
        };
        assert_eq!(args.config, PathBuf::from("system.toml"));
        assert_eq!(args.output, PathBuf::from("out.json"));
        assert_eq!(args.fixed.fix_x, Some(12.5));
        assert_eq!(args.fixed.fix_y, None);
        assert_eq!(args.set_values, vec!["system.density=0.5"]);
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        let result =
            Cli::try_parse_from(["polyellipsoid", "-q", "-v", "target-box", "-c", "a.toml"]);
        assert!(result.is_err());
    }
}

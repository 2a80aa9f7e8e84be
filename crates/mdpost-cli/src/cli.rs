use clap::{Args, Parser, Subcommand};
use mdpost::engine::config::UniformDensityPolicy;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Kun Xi, Shizhuo Cheng",
    version,
    about = "mdpost - post-processing for molecular dynamics runs: ligand center-of-mass traces and grid-based spatial density annotation.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score every atom of a PDB file by the occupancy of its grid cell and
    /// the six face-adjacent cells, written into the B-factor column.
    Density(DensityArgs),
    /// Align a trajectory and write the per-frame center of a selected atom
    /// group as a pseudo-atom PDB trace.
    Com(ComArgs),
}

/// Arguments for the `density` subcommand.
#[derive(Args, Debug)]
pub struct DensityArgs {
    /// Path to the input PDB file.
    #[arg(value_name = "PDB_FILE")]
    pub pdb_file: PathBuf,

    /// Edge length of a grid cell, in the PDB's length unit.
    #[arg(value_name = "STEP", allow_negative_numbers = true)]
    pub step: f64,

    /// Path for the annotated PDB file [default: new_<PDB_FILE name> in the current directory].
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// What to do when every grid cell has the same density (zero, midpoint, error).
    #[arg(long, value_name = "POLICY")]
    pub on_uniform: Option<UniformDensityPolicy>,

    /// Path to an optional configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S density.on-uniform=midpoint
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `com` subcommand.
#[derive(Args, Debug)]
pub struct ComArgs {
    /// XTC trajectory file [default: traj.xtc].
    #[arg(short, long, value_name = "PATH")]
    pub trajectory: Option<PathBuf>,

    /// GRO topology file matching the trajectory [default: temp.gro].
    #[arg(short = 'p', long, value_name = "PATH")]
    pub topology: Option<PathBuf>,

    /// Index file whose first line lists the 1-based atom ids to average [default: index.ndx].
    #[arg(short = 'n', long, value_name = "PATH")]
    pub index: Option<PathBuf>,

    /// Path for the center-of-mass trace [default: comlig.pdb].
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Factor applied to every center [default: 10.0, nm to Angstrom].
    #[arg(long, value_name = "FLOAT", allow_negative_numbers = true)]
    pub scale: Option<f64>,

    /// Frame all other frames are superposed onto [default: 0].
    #[arg(short, long, value_name = "INT")]
    pub reference_frame: Option<usize>,

    /// Skip trajectory alignment and use raw frame coordinates.
    #[arg(long, conflicts_with = "reference_frame")]
    pub no_align: bool,

    /// Path to an optional configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S com.scale=1.0
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn density_takes_two_positionals() {
        let cli = Cli::parse_from(["mdpost", "density", "complex.pdb", "2.5"]);
        let Commands::Density(args) = cli.command else {
            panic!("expected the density subcommand");
        };
        assert_eq!(args.pdb_file, PathBuf::from("complex.pdb"));
        assert_eq!(args.step, 2.5);
        assert!(args.output.is_none());
        assert!(args.on_uniform.is_none());
    }

    #[test]
    fn density_parses_policy_and_negative_step() {
        let cli = Cli::parse_from([
            "mdpost",
            "density",
            "complex.pdb",
            "-1",
            "--on-uniform",
            "midpoint",
        ]);
        let Commands::Density(args) = cli.command else {
            panic!("expected the density subcommand");
        };
        assert_eq!(args.step, -1.0);
        assert_eq!(args.on_uniform, Some(UniformDensityPolicy::Midpoint));
    }

    #[test]
    fn density_rejects_unknown_policy() {
        let result = Cli::try_parse_from([
            "mdpost",
            "density",
            "complex.pdb",
            "1.0",
            "--on-uniform",
            "average",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn com_flags_are_optional() {
        let cli = Cli::parse_from(["mdpost", "-vv", "com"]);
        assert_eq!(cli.verbose, 2);
        let Commands::Com(args) = cli.command else {
            panic!("expected the com subcommand");
        };
        assert!(args.trajectory.is_none());
        assert!(args.reference_frame.is_none());
        assert!(!args.no_align);
        assert!(args.set_values.is_empty());
    }

    #[test]
    fn no_align_conflicts_with_reference_frame() {
        let result =
            Cli::try_parse_from(["mdpost", "com", "--no-align", "--reference-frame", "3"]);
        assert!(result.is_err());
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["mdpost", "-q", "-v", "com"]).is_err());
    }
}

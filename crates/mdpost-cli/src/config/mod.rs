//! Resolution of run settings from, in decreasing priority: command-line
//! flags, `-S` overrides, the `--config` TOML file and built-in defaults.

pub mod defaults;
pub mod file;

use crate::cli::{ComArgs, DensityArgs};
use crate::error::{CliError, Result};
use defaults::{DENSITY_OUTPUT_PREFIX, DefaultsConfig};
use file::FileConfig;
use mdpost::engine::config::{
    ComConfig, ComConfigBuilder, DensityConfig, DensityConfigBuilder, UniformDensityPolicy,
};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Everything the `density` command needs to run.
#[derive(Debug, Clone, PartialEq)]
pub struct DensitySettings {
    pub input: PathBuf,
    pub output: PathBuf,
    pub core: DensityConfig,
}

/// Everything the `com` command needs to run.
#[derive(Debug, Clone, PartialEq)]
pub struct ComSettings {
    pub trajectory: PathBuf,
    pub topology: PathBuf,
    pub index: PathBuf,
    pub output: PathBuf,
    pub core: ComConfig,
}

/// `new_<file name>` in the current directory.
fn default_density_output(input: &Path) -> Result<PathBuf> {
    let name = input.file_name().ok_or_else(|| {
        CliError::Argument(format!("'{}' does not name a file", input.display()))
    })?;
    Ok(PathBuf::from(format!(
        "{}{}",
        DENSITY_OUTPUT_PREFIX,
        name.to_string_lossy()
    )))
}

fn loaded(config_path: Option<&Path>, set_values: &[String]) -> Result<FileConfig> {
    let mut file_config = FileConfig::load(config_path)?;
    file_config.apply_set_values(set_values)?;
    debug!("Effective file configuration: {:?}", file_config);
    Ok(file_config)
}

pub fn resolve_density(args: &DensityArgs) -> Result<DensitySettings> {
    let file_config = loaded(args.config.as_deref(), &args.set_values)?;
    let defaults = DefaultsConfig::default();
    let file_density = file_config.density.unwrap_or_default();

    let on_uniform = match (args.on_uniform, file_density.on_uniform) {
        (Some(policy), _) => policy,
        (None, Some(name)) => name
            .parse::<UniformDensityPolicy>()
            .map_err(|e| CliError::Config(e.to_string()))?,
        (None, None) => defaults.on_uniform,
    };

    let core = DensityConfigBuilder::new()
        .step(args.step)
        .uniform_policy(on_uniform)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    let output = match args.output.clone().or(file_density.output) {
        Some(path) => path,
        None => default_density_output(&args.pdb_file)?,
    };

    Ok(DensitySettings {
        input: args.pdb_file.clone(),
        output,
        core,
    })
}

pub fn resolve_com(args: &ComArgs) -> Result<ComSettings> {
    let file_config = loaded(args.config.as_deref(), &args.set_values)?;
    let defaults = DefaultsConfig::default();
    let file_com = file_config.com.unwrap_or_default();

    let pick = |cli: &Option<PathBuf>, file: Option<PathBuf>, default: &str| {
        cli.clone()
            .or(file)
            .unwrap_or_else(|| PathBuf::from(default))
    };

    let mut builder =
        ComConfigBuilder::new().scale(args.scale.or(file_com.scale).unwrap_or(defaults.scale));
    builder = if args.no_align {
        builder.no_alignment()
    } else if let Some(frame) = args.reference_frame {
        builder.align_to_frame(frame)
    } else if !file_com.align.unwrap_or(defaults.align) {
        builder.no_alignment()
    } else {
        builder.align_to_frame(
            file_com
                .reference_frame
                .unwrap_or(defaults.reference_frame),
        )
    };
    let core = builder
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(ComSettings {
        trajectory: pick(&args.trajectory, file_com.trajectory, &defaults.trajectory),
        topology: pick(&args.topology, file_com.topology, &defaults.topology),
        index: pick(&args.index, file_com.index, &defaults.index),
        output: pick(&args.output, file_com.output, &defaults.com_output),
        core,
    })
}

use crate::cli::ComArgs;
use crate::config;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use mdpost::{
    core::io::{gro::GroFile, ndx::IndexFile, traits::StructureFile, xtc::XtcFile},
    engine::progress::ProgressReporter,
    workflows::{self, com::ComTrace},
};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

pub fn run(args: ComArgs) -> Result<()> {
    let settings = config::resolve_com(&args)?;

    info!("Loading atom selection from {:?}", &settings.index);
    let selection = IndexFile::read_from_path(&settings.index)
        .map_err(|e| CliError::file(&settings.index, e))?;

    info!("Loading topology from {:?}", &settings.topology);
    let (topology, gro_metadata) = GroFile::read_from_path(&settings.topology)
        .map_err(|e| CliError::file(&settings.topology, e))?;
    info!(
        "Topology '{}' has {} atoms.",
        gro_metadata.title.trim(),
        topology.len()
    );

    info!("Loading trajectory from {:?}", &settings.trajectory);
    let trajectory = XtcFile::read_from_path(&settings.trajectory)
        .map_err(|e| CliError::file(&settings.trajectory, e))?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!(
        "Computing the center of {} selected atoms over {} frames...",
        selection.len(),
        trajectory.len()
    );
    let trace = workflows::com::run(
        trajectory,
        &topology,
        &selection,
        &settings.core,
        &reporter,
    )?;

    write_trace(&trace, &settings.output)?;

    println!(
        "✓ {} frame center(s) written to: {}",
        trace.len(),
        settings.output.display()
    );
    Ok(())
}

fn write_trace(trace: &ComTrace, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|e| CliError::file(path, e))?;
    let mut writer = BufWriter::new(file);
    trace
        .write_pdb(&mut writer)
        .map_err(|e| CliError::file(path, e))?;
    writer.flush().map_err(|e| CliError::file(path, e))
}

use crate::cli::DensityArgs;
use crate::config;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use mdpost::{
    core::io::{
        pdb::{self, PdbFile},
        traits::{StructureFile, WritableStructureFile},
    },
    core::models::atom::RecordKind,
    engine::progress::ProgressReporter,
    workflows,
};
use tracing::info;

pub fn run(args: DensityArgs) -> Result<()> {
    let settings = config::resolve_density(&args)?;

    info!("Loading input structure from {:?}", &settings.input);
    let (structure, metadata) = PdbFile::read_from_path(&settings.input)
        .map_err(|e| CliError::file(&settings.input, e))?;
    let total_records = structure.len();
    let (mut structure, metadata) = pdb::retain_kind(structure, metadata, RecordKind::Atom)
        .map_err(|e| CliError::file(&settings.input, e))?;
    info!(
        "Kept {} ATOM record(s) of {} coordinate record(s).",
        structure.len(),
        total_records
    );

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!("Annotating {} atoms with grid density...", structure.len());
    let report = workflows::annotate::run(&mut structure, &settings.core, &reporter)?;

    PdbFile::write_to_path(&structure, &metadata, &settings.output)
        .map_err(|e| CliError::file(&settings.output, e))?;

    let [nx, ny, nz] = report.grid_dims;
    println!(
        "✓ Grid {}x{}x{} (step {}), raw density {} to {}. Written to: {}",
        nx,
        ny,
        nz,
        report.step,
        report.raw_min,
        report.raw_max,
        settings.output.display()
    );
    Ok(())
}

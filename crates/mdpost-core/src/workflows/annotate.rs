use crate::core::models::structure::Structure;
use crate::core::utils::geometry::BoundingBox;
use crate::engine::config::{DensityConfig, UniformDensityPolicy};
use crate::engine::density::{self, NormalizedDensity};
use crate::engine::error::EngineError;
use crate::engine::grid::SpatialGrid;
use crate::engine::progress::{Progress, ProgressReporter};
use tracing::{info, instrument, warn};

/// Summary of one annotation run.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationReport {
    pub bounding_box: BoundingBox,
    pub step: f64,
    pub grid_dims: [usize; 3],
    pub num_atoms: usize,
    /// Lowest raw (pre-normalization) cell density.
    pub raw_min: u64,
    /// Highest raw cell density.
    pub raw_max: u64,
    /// `true` when every cell had the same raw density and the uniform policy applied.
    pub uniform: bool,
}

/// Overwrites every atom's B-factor with the normalized neighbor density of its grid cell.
///
/// # Errors
///
/// Returns [`EngineError::EmptyStructure`] for a structure without atoms,
/// [`EngineError::GridTooLarge`] when the step is too fine for the structure's
/// extent, and [`EngineError::UniformDensity`] when every cell scores the same
/// under [`UniformDensityPolicy::Error`].
#[instrument(skip_all, name = "annotate_workflow")]
pub fn run(
    structure: &mut Structure,
    config: &DensityConfig,
    reporter: &ProgressReporter,
) -> Result<AnnotationReport, EngineError> {
    let positions = structure.positions();
    let bounding_box = BoundingBox::from_points(&positions).ok_or(EngineError::EmptyStructure)?;
    for (axis, label) in ["x", "y", "z"].iter().enumerate() {
        let (min, max) = bounding_box.axis_range(axis);
        info!("{} range: {:.3} to {:.3}", label, min, max);
    }
    info!("Grid step: {}", config.step);

    // === Phase 1: Grid construction and atom assignment ===
    reporter.report(Progress::PhaseStart { name: "Gridding" });
    let mut grid = SpatialGrid::new(&bounding_box, config.step)?;
    let [nx, ny, nz] = grid.dims();
    info!(
        nx,
        ny,
        nz,
        cells = grid.num_cells(),
        "Grid built over bounding box."
    );
    reporter.report(Progress::Message(format!(
        "Grid of {} x {} x {} cells",
        nx, ny, nz
    )));
    reporter.for_each_step(positions.iter(), |position| {
        grid.insert(position);
        Ok::<(), EngineError>(())
    })?;
    reporter.report(Progress::PhaseFinish);

    // === Phase 2: Density and normalization ===
    reporter.report(Progress::PhaseStart { name: "Density" });
    let raw = density::neighbor_density(&grid);
    let normalized = density::normalize(&raw, config.uniform_policy)?;
    log_density_range(&normalized, config.uniform_policy);
    if normalized.is_uniform() {
        reporter.report(Progress::Message(format!(
            "Uniform density {}; scored by the '{}' policy",
            normalized.raw_min, config.uniform_policy
        )));
    }

    let scores = density::atom_scores(&grid, &normalized);
    structure.set_b_factors(&scores)?;
    reporter.report(Progress::PhaseFinish);

    info!(atoms = structure.len(), "Density annotation complete.");
    Ok(AnnotationReport {
        bounding_box,
        step: config.step,
        grid_dims: grid.dims(),
        num_atoms: structure.len(),
        raw_min: normalized.raw_min,
        raw_max: normalized.raw_max,
        uniform: normalized.is_uniform(),
    })
}

fn log_density_range(normalized: &NormalizedDensity, policy: UniformDensityPolicy) {
    info!(
        "Raw density min: {}, max: {}",
        normalized.raw_min, normalized.raw_max
    );
    if normalized.is_uniform() {
        warn!(
            "Every grid cell has density {}; all atoms are scored by the '{}' policy.",
            normalized.raw_min, policy
        );
    }
}

use crate::core::io::format::format_position;
use crate::core::io::pdb::{self, PdbError};
use crate::core::models::selection::AtomSelection;
use crate::core::models::structure::Structure;
use crate::core::models::trajectory::Trajectory;
use crate::engine::alignment::align_trajectory;
use crate::engine::com::{selection_center, validate_selection};
use crate::engine::config::ComConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use nalgebra::Point3;
use std::io::Write;
use tracing::{debug, info, instrument};

/// Per-frame centers of a selection, in frame order and output units.
#[derive(Debug, Clone, PartialEq)]
pub struct ComTrace {
    pub centers: Vec<Point3<f64>>,
    /// Frame the trajectory was aligned to, if alignment ran.
    pub reference_frame: Option<usize>,
}

impl ComTrace {
    pub fn len(&self) -> usize {
        self.centers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.centers.is_empty()
    }

    /// Writes the trace as `HEX` pseudo-atom records closed by `TER`.
    pub fn write_pdb(&self, writer: &mut impl Write) -> Result<(), PdbError> {
        pdb::write_trace(&self.centers, writer)
    }
}

/// Reduces every frame of `trajectory` to the scaled centroid of `selection`.
///
/// `topology` fixes the expected atom count; every frame must match it. When
/// the config names a reference frame, all frames are first superposed onto
/// it over all atoms. Every center is checked against the output field width
/// before the trace is returned, so writing it cannot fail on formatting.
///
/// # Errors
///
/// Returns an [`EngineError`] for an empty trajectory, an atom count that
/// disagrees with the topology, an invalid selection, a failed
/// superposition, or a center that cannot be formatted.
#[instrument(skip_all, name = "com_workflow")]
pub fn run(
    mut trajectory: Trajectory,
    topology: &Structure,
    selection: &AtomSelection,
    config: &ComConfig,
    reporter: &ProgressReporter,
) -> Result<ComTrace, EngineError> {
    // === Phase 0: Validation ===
    if trajectory.is_empty() {
        return Err(EngineError::EmptyTrajectory);
    }
    let num_atoms = topology.len();
    if let Some((frame, found)) = trajectory
        .frames()
        .iter()
        .enumerate()
        .map(|(index, frame)| (index, frame.num_atoms()))
        .find(|&(_, found)| found != num_atoms)
    {
        return Err(EngineError::AtomCountMismatch {
            frame,
            expected: num_atoms,
            found,
        });
    }
    validate_selection(selection, num_atoms)?;
    info!(
        frames = trajectory.len(),
        atoms = num_atoms,
        selected = selection.len(),
        "Trajectory loaded."
    );

    // === Phase 1: Alignment (optional) ===
    if let Some(reference) = config.reference_frame {
        reporter.report(Progress::PhaseStart { name: "Alignment" });
        info!(reference, "Superposing all frames onto the reference frame.");
        align_trajectory(&mut trajectory, reference)?;
        reporter.report(Progress::PhaseFinish);
    } else {
        info!("Alignment disabled; using raw frame coordinates.");
    }

    // === Phase 2: Per-frame centers ===
    reporter.report(Progress::PhaseStart { name: "Centers" });
    let mut centers = Vec::with_capacity(trajectory.len());
    reporter.for_each_step(trajectory.frames().iter(), |frame| {
        let center = selection_center(frame, selection, config.scale)?;
        format_position(&center)?;
        debug!(step = frame.step, time = frame.time, "Center: {:?}", center);
        centers.push(center);
        Ok::<(), EngineError>(())
    })?;
    reporter.report(Progress::PhaseFinish);

    info!(frames = centers.len(), "Center-of-mass trace complete.");
    Ok(ComTrace {
        centers,
        reference_frame: config.reference_frame,
    })
}

use super::error::EngineError;
use crate::core::models::selection::AtomSelection;
use crate::core::models::trajectory::Frame;
use crate::core::utils::geometry::centroid;
use nalgebra::Point3;

/// Checks that a selection is non-empty and addresses only existing atoms.
pub fn validate_selection(selection: &AtomSelection, num_atoms: usize) -> Result<(), EngineError> {
    match selection.max_index() {
        None => Err(EngineError::EmptySelection),
        Some(max) if max >= num_atoms => Err(EngineError::SelectionOutOfRange {
            atom: max + 1,
            num_atoms,
        }),
        Some(_) => Ok(()),
    }
}

/// Unweighted centroid of the selected atoms in one frame, multiplied by `scale`.
///
/// The selection must already have been validated against the frame's atom count.
pub fn selection_center(
    frame: &Frame,
    selection: &AtomSelection,
    scale: f64,
) -> Result<Point3<f64>, EngineError> {
    let selected: Vec<Point3<f64>> = selection
        .indices()
        .iter()
        .map(|&index| {
            frame
                .positions
                .get(index)
                .copied()
                .ok_or(EngineError::SelectionOutOfRange {
                    atom: index + 1,
                    num_atoms: frame.num_atoms(),
                })
        })
        .collect::<Result<_, _>>()?;
    let center = centroid(&selected).ok_or(EngineError::EmptySelection)?;
    Ok(center * scale)
}

use super::error::EngineError;
use crate::core::models::trajectory::Trajectory;
use crate::core::utils::geometry::{calculate_rmsd, superpose};
use tracing::trace;

/// Superposes every frame of `trajectory` onto frame `reference_index`.
///
/// The fit uses all atoms with equal weights. The reference frame itself is
/// left untouched, so it stays bit-identical.
///
/// # Errors
///
/// Fails on an empty trajectory, an out-of-range reference, or a frame whose
/// fit cannot be computed.
pub fn align_trajectory(
    trajectory: &mut Trajectory,
    reference_index: usize,
) -> Result<(), EngineError> {
    if trajectory.is_empty() {
        return Err(EngineError::EmptyTrajectory);
    }
    let reference = trajectory
        .frame(reference_index)
        .ok_or(EngineError::ReferenceFrameOutOfRange {
            index: reference_index,
            num_frames: trajectory.len(),
        })?
        .positions
        .clone();

    for (index, frame) in trajectory.frames_mut().iter_mut().enumerate() {
        if index == reference_index {
            continue;
        }
        if frame.positions.len() != reference.len() {
            return Err(EngineError::AtomCountMismatch {
                frame: index,
                expected: reference.len(),
                found: frame.positions.len(),
            });
        }
        let fit = superpose(&frame.positions, &reference)
            .ok_or(EngineError::Superposition { frame: index })?;
        for position in frame.positions.iter_mut() {
            *position = fit.apply(position);
        }
        if let Some(rmsd) = calculate_rmsd(&frame.positions, &reference) {
            trace!(frame = index, rmsd, "Frame superposed onto reference");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::trajectory::Frame;
    use nalgebra::{Point3, Rotation3, Translation3, Unit, Vector3};

    fn reference_positions() -> Vec<Point3<f64>> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.5, 0.0, 0.0),
            Point3::new(0.0, 2.0, 0.5),
            Point3::new(0.3, 0.1, 2.2),
        ]
    }

    fn moved(points: &[Point3<f64>], angle: f64, shift: Vector3<f64>) -> Vec<Point3<f64>> {
        let rotation =
            Rotation3::from_axis_angle(&Unit::new_normalize(Vector3::new(0.2, 1.0, 0.4)), angle);
        let translation = Translation3::from(shift);
        points.iter().map(|p| translation * (rotation * p)).collect()
    }

    fn trajectory_of(frames: Vec<Vec<Point3<f64>>>) -> Trajectory {
        Trajectory::new(
            frames
                .into_iter()
                .enumerate()
                .map(|(i, positions)| Frame::new(i as u64, i as f64, positions))
                .collect(),
        )
    }

    #[test]
    fn rigid_copies_collapse_onto_the_reference() {
        let reference = reference_positions();
        let mut trajectory = trajectory_of(vec![
            reference.clone(),
            moved(&reference, 0.7, Vector3::new(3.0, 0.0, -1.0)),
            moved(&reference, -2.1, Vector3::new(-5.0, 4.0, 9.0)),
        ]);

        align_trajectory(&mut trajectory, 0).unwrap();

        assert_eq!(trajectory.frame(0).unwrap().positions, reference);
        for frame in trajectory.frames() {
            let rmsd = calculate_rmsd(&frame.positions, &reference).unwrap();
            assert!(rmsd < 1e-9, "rmsd {} after alignment", rmsd);
        }
    }

    #[test]
    fn any_frame_can_be_the_reference() {
        let base = reference_positions();
        let target = moved(&base, 1.3, Vector3::new(1.0, 1.0, 1.0));
        let mut trajectory = trajectory_of(vec![base, target.clone()]);

        align_trajectory(&mut trajectory, 1).unwrap();

        let rmsd = calculate_rmsd(&trajectory.frame(0).unwrap().positions, &target).unwrap();
        assert!(rmsd < 1e-9);
    }

    #[test]
    fn empty_trajectory_is_rejected() {
        let mut trajectory = Trajectory::new(Vec::new());
        assert!(matches!(
            align_trajectory(&mut trajectory, 0),
            Err(EngineError::EmptyTrajectory)
        ));
    }

    #[test]
    fn reference_out_of_range_is_rejected() {
        let mut trajectory = trajectory_of(vec![reference_positions()]);
        assert!(matches!(
            align_trajectory(&mut trajectory, 4),
            Err(EngineError::ReferenceFrameOutOfRange {
                index: 4,
                num_frames: 1
            })
        ));
    }
}

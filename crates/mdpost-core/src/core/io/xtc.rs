use crate::core::models::trajectory::{Frame, Trajectory};
use molly::XTCReader;
use nalgebra::Point3;
use std::fs::File;
use std::io;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrajectoryError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Trajectory contains no frames")]
    Empty,
    #[error("Frame {frame} has {found} atoms, expected {expected}")]
    InconsistentAtomCount {
        frame: usize,
        expected: usize,
        found: usize,
    },
}

/// Reader for GROMACS XTC trajectories.
///
/// Decompression is delegated to `molly`; this type converts the decoded
/// frames into [`Trajectory`] values (positions in nm, as stored).
pub struct XtcFile;

impl XtcFile {
    /// Reads every frame of an XTC file into memory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or decoded, contains no
    /// frames, or its frames disagree on the atom count.
    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Trajectory, TrajectoryError> {
        let file = File::open(path)?;
        let mut reader = XTCReader::new(file);
        let frames = reader.read_all_frames()?;

        let trajectory = Trajectory::new(
            frames
                .iter()
                .map(|frame| {
                    let positions = frame
                        .positions
                        .chunks_exact(3)
                        .map(|c| Point3::new(c[0] as f64, c[1] as f64, c[2] as f64))
                        .collect();
                    Frame::new(frame.step as u64, frame.time as f64, positions)
                })
                .collect(),
        );

        Self::validate(&trajectory)?;
        Ok(trajectory)
    }

    fn validate(trajectory: &Trajectory) -> Result<(), TrajectoryError> {
        let expected = trajectory.num_atoms().ok_or(TrajectoryError::Empty)?;
        if let Some((frame, found)) = trajectory.find_inconsistent_frame() {
            return Err(TrajectoryError::InconsistentAtomCount {
                frame,
                expected,
                found,
            });
        }
        Ok(())
    }
}

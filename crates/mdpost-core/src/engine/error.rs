use thiserror::Error;

use super::config::ConfigError;
use crate::core::io::format::CoordinateFormatError;
use crate::core::models::structure::AnnotationLengthError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Cannot build a grid over an empty structure")]
    EmptyStructure,

    #[error("Grid step {step} needs more than {limit} cells; use a larger step")]
    GridTooLarge { step: f64, limit: usize },

    #[error("All grid cells have the same density ({value}); normalization is undefined")]
    UniformDensity { value: u64 },

    #[error("Trajectory contains no frames")]
    EmptyTrajectory,

    #[error("Reference frame {index} is out of range for a trajectory of {num_frames} frames")]
    ReferenceFrameOutOfRange { index: usize, num_frames: usize },

    #[error("Atom selection is empty")]
    EmptySelection,

    #[error("Selected atom {atom} is out of range for a system of {num_atoms} atoms")]
    SelectionOutOfRange { atom: usize, num_atoms: usize },

    #[error("Frame {frame} has {found} atoms, but the topology has {expected}")]
    AtomCountMismatch {
        frame: usize,
        expected: usize,
        found: usize,
    },

    #[error("Superposition of frame {frame} onto the reference failed")]
    Superposition { frame: usize },

    #[error(transparent)]
    Annotation(#[from] AnnotationLengthError),

    #[error("Output formatting failed: {0}")]
    Format(#[from] CoordinateFormatError),
}

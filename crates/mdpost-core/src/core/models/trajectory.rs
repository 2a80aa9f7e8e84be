use nalgebra::Point3;

/// A single time-sampled snapshot of all atom positions.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// The integration step the frame was written at.
    pub step: u64,
    /// Simulation time in picoseconds.
    pub time: f64,
    /// Atom positions in nanometers, indexed by zero-based atom index.
    pub positions: Vec<Point3<f64>>,
}

impl Frame {
    pub fn new(step: u64, time: f64, positions: Vec<Point3<f64>>) -> Self {
        Self {
            step,
            time,
            positions,
        }
    }

    pub fn num_atoms(&self) -> usize {
        self.positions.len()
    }
}

/// A time-ordered sequence of frames over a fixed set of atoms.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trajectory {
    frames: Vec<Frame>,
}

impl Trajectory {
    pub fn new(frames: Vec<Frame>) -> Self {
        Self { frames }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn frames_mut(&mut self) -> &mut [Frame] {
        &mut self.frames
    }

    pub fn frame(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    /// The atom count of the first frame, or `None` for an empty trajectory.
    pub fn num_atoms(&self) -> Option<usize> {
        self.frames.first().map(Frame::num_atoms)
    }

    /// Returns the index and atom count of the first frame whose atom count
    /// differs from the first frame's.
    pub fn find_inconsistent_frame(&self) -> Option<(usize, usize)> {
        let expected = self.num_atoms()?;
        self.frames
            .iter()
            .enumerate()
            .find(|(_, frame)| frame.num_atoms() != expected)
            .map(|(index, frame)| (index, frame.num_atoms()))
    }
}

use crate::core::utils::geometry::BoundingBox;
use crate::engine::error::EngineError;
use nalgebra::Point3;

/// Integer coordinates `(i, j, k)` of a grid cell.
pub type CellIndex = [usize; 3];

/// Upper bound on the number of cells a single grid may allocate.
pub const MAX_GRID_CELLS: usize = 1 << 25;

/// Number of cells along an axis spanning `[min, max)` in increments of `step`.
///
/// This is the length of the half-open stepping `min, min + step, ...` that
/// stays strictly below `max`. A zero-extent axis still gets one cell. Returns
/// `None` when the count exceeds [`MAX_GRID_CELLS`].
fn cells_along_axis(min: f64, max: f64, step: f64) -> Option<usize> {
    let count = ((max - min) / step).ceil();
    if count.is_nan() || count < 1.0 {
        Some(1)
    } else if count <= MAX_GRID_CELLS as f64 {
        Some(count as usize)
    } else {
        None
    }
}

/// Floor of the exact quotient `offset / step` for `offset >= 0`, `step > 0`.
///
/// `(offset / step).floor()` can round up across an integer boundary (e.g.
/// `1.0 / 0.1`), so the quotient is rebuilt from the remainder first.
fn floor_div(offset: f64, step: f64) -> f64 {
    let remainder = offset % step;
    let quotient = (offset - remainder) / step;
    let floored = quotient.floor();
    if quotient - floored > 0.5 {
        floored + 1.0
    } else {
        floored
    }
}

/// A uniform 3D partition of a bounding box into cubic cells of edge `step`.
///
/// Cells are stored densely in one row-major vector (`k` varies fastest) and
/// each cell owns the row indices of the atoms assigned to it. Every inserted
/// atom lives in exactly one cell.
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialGrid {
    origin: Point3<f64>,
    step: f64,
    dims: [usize; 3],
    strides: [usize; 3],
    cells: Vec<Vec<usize>>,
    assignments: Vec<usize>,
}

impl SpatialGrid {
    /// Creates an empty grid whose first cell starts at the box minimum.
    ///
    /// `step` must be positive and finite; configuration builders validate it.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::GridTooLarge`] if the box needs more than
    /// [`MAX_GRID_CELLS`] cells at this step.
    pub fn new(bbox: &BoundingBox, step: f64) -> Result<Self, EngineError> {
        let too_large = || EngineError::GridTooLarge {
            step,
            limit: MAX_GRID_CELLS,
        };
        let mut dims = [1; 3];
        for (axis, dim) in dims.iter_mut().enumerate() {
            let (min, max) = bbox.axis_range(axis);
            *dim = cells_along_axis(min, max, step).ok_or_else(too_large)?;
        }
        let num_cells = dims[0]
            .checked_mul(dims[1])
            .and_then(|n| n.checked_mul(dims[2]))
            .filter(|&n| n <= MAX_GRID_CELLS)
            .ok_or_else(too_large)?;

        Ok(Self {
            origin: bbox.min,
            step,
            dims,
            strides: [dims[1] * dims[2], dims[2], 1],
            cells: vec![Vec::new(); num_cells],
            assignments: Vec::new(),
        })
    }

    /// Builds a grid over the points' bounding box and assigns every point.
    ///
    /// Point `n` is recorded under atom index `n`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::EmptyStructure`] if `points` is empty and
    /// [`EngineError::GridTooLarge`] if the step is too fine for their extent.
    pub fn from_points(points: &[Point3<f64>], step: f64) -> Result<Self, EngineError> {
        let bbox = BoundingBox::from_points(points).ok_or(EngineError::EmptyStructure)?;
        let mut grid = Self::new(&bbox, step)?;
        for point in points {
            grid.insert(point);
        }
        Ok(grid)
    }

    /// Cell coordinates of a point, clamped into the grid.
    ///
    /// Points on the upper boundary (and anything beyond it) land in the last
    /// cell of that axis; points below the origin land in the first.
    pub fn cell_of(&self, point: &Point3<f64>) -> CellIndex {
        [0, 1, 2].map(|axis| {
            let offset = point[axis] - self.origin[axis];
            let raw = if offset > 0.0 {
                floor_div(offset, self.step)
            } else {
                0.0
            };
            (raw as usize).min(self.dims[axis] - 1)
        })
    }

    /// Assigns the next atom index to the cell containing `point` and returns
    /// that cell's flat index.
    pub fn insert(&mut self, point: &Point3<f64>) -> usize {
        let flat = self.flatten(self.cell_of(point));
        let atom_index = self.assignments.len();
        self.cells[flat].push(atom_index);
        self.assignments.push(flat);
        flat
    }

    pub fn dims(&self) -> [usize; 3] {
        self.dims
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    pub fn num_atoms(&self) -> usize {
        self.assignments.len()
    }

    pub fn flatten(&self, [i, j, k]: CellIndex) -> usize {
        i * self.strides[0] + j * self.strides[1] + k * self.strides[2]
    }

    pub fn unflatten(&self, flat: usize) -> CellIndex {
        [
            flat / self.strides[0],
            (flat % self.strides[0]) / self.strides[1],
            flat % self.strides[1],
        ]
    }

    /// Atom indices owned by a cell.
    pub fn cell_atoms(&self, flat: usize) -> &[usize] {
        &self.cells[flat]
    }

    pub fn occupancy(&self, flat: usize) -> usize {
        self.cell_atoms(flat).len()
    }

    /// Flat cell index an atom was assigned to.
    pub fn cell_of_atom(&self, atom_index: usize) -> Option<usize> {
        self.assignments.get(atom_index).copied()
    }

    /// Flat indices of a cell's face-adjacent neighbors that lie inside the grid.
    pub fn face_neighbors(&self, flat: usize) -> impl Iterator<Item = usize> + '_ {
        let index = self.unflatten(flat);
        (0..3).flat_map(move |axis| {
            let below = (index[axis] > 0).then(|| flat - self.strides[axis]);
            let above = (index[axis] + 1 < self.dims[axis]).then(|| flat + self.strides[axis]);
            below.into_iter().chain(above)
        })
    }
}

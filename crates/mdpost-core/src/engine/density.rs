use super::config::UniformDensityPolicy;
use super::error::EngineError;
use super::grid::SpatialGrid;

/// Upper end of the normalized density scale.
pub const NORMALIZED_MAX: f64 = 100.0;

/// Raw density of every cell: its own occupancy plus the occupancy of each
/// face-adjacent neighbor that exists.
///
/// Indexed by flat cell index. Edge and corner cells simply have fewer
/// neighbors to add.
pub fn neighbor_density(grid: &SpatialGrid) -> Vec<u64> {
    (0..grid.num_cells())
        .map(|flat| {
            let own = grid.occupancy(flat) as u64;
            own + grid
                .face_neighbors(flat)
                .map(|neighbor| grid.occupancy(neighbor) as u64)
                .sum::<u64>()
        })
        .collect()
}

/// Min-max normalized cell densities.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedDensity {
    pub values: Vec<f64>,
    pub raw_min: u64,
    pub raw_max: u64,
}

impl NormalizedDensity {
    pub fn is_uniform(&self) -> bool {
        self.raw_min == self.raw_max
    }
}

/// Rescales raw densities linearly onto `[0, 100]`.
///
/// The lowest raw value maps to 0 and the highest to 100. When all values are
/// equal the mapping is undefined and `policy` decides the outcome.
///
/// # Errors
///
/// Returns [`EngineError::EmptyStructure`] for an empty input, and
/// [`EngineError::UniformDensity`] for uniform input under
/// [`UniformDensityPolicy::Error`].
pub fn normalize(
    raw: &[u64],
    policy: UniformDensityPolicy,
) -> Result<NormalizedDensity, EngineError> {
    let raw_min = *raw.iter().min().ok_or(EngineError::EmptyStructure)?;
    let raw_max = *raw.iter().max().ok_or(EngineError::EmptyStructure)?;

    let values = if raw_min == raw_max {
        let fill = match policy {
            UniformDensityPolicy::Zero => 0.0,
            UniformDensityPolicy::Midpoint => NORMALIZED_MAX / 2.0,
            UniformDensityPolicy::Error => {
                return Err(EngineError::UniformDensity { value: raw_min });
            }
        };
        vec![fill; raw.len()]
    } else {
        let span = (raw_max - raw_min) as f64;
        raw.iter()
            .map(|&value| (value - raw_min) as f64 / span * NORMALIZED_MAX)
            .collect()
    };

    Ok(NormalizedDensity {
        values,
        raw_min,
        raw_max,
    })
}

/// Per-atom view of a normalized density field.
///
/// Each atom receives the normalized score of the cell it was assigned to.
pub fn atom_scores(grid: &SpatialGrid, density: &NormalizedDensity) -> Vec<f64> {
    (0..grid.num_atoms())
        .filter_map(|atom| grid.cell_of_atom(atom))
        .map(|flat| density.values[flat])
        .collect()
}

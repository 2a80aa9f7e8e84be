use nalgebra::{Matrix3, Point3, Rotation3, Vector3};

/// Axis-aligned bounding box of a point set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl BoundingBox {
    /// Computes the per-axis minimum and maximum, or `None` for an empty set.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point3<f64>>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        Some(iter.fold(
            Self {
                min: first,
                max: first,
            },
            |bbox, p| Self {
                min: bbox.min.inf(p),
                max: bbox.max.sup(p),
            },
        ))
    }

    /// The `(min, max)` pair along one axis (0 = x, 1 = y, 2 = z).
    pub fn axis_range(&self, axis: usize) -> (f64, f64) {
        (self.min[axis], self.max[axis])
    }
}

/// Unweighted mean of a point set, or `None` if the set is empty.
pub fn centroid(points: &[Point3<f64>]) -> Option<Point3<f64>> {
    if points.is_empty() {
        return None;
    }
    let sum = points
        .iter()
        .fold(Vector3::zeros(), |acc, p| acc + p.coords);
    Some(Point3::from(sum / points.len() as f64))
}

/// A rigid-body transform that maps a mobile point set onto a reference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Superposition {
    pub rotation: Rotation3<f64>,
    pub mobile_centroid: Point3<f64>,
    pub reference_centroid: Point3<f64>,
}

impl Superposition {
    /// Moves a point from the mobile frame into the reference frame.
    pub fn apply(&self, point: &Point3<f64>) -> Point3<f64> {
        self.reference_centroid + self.rotation * (point - self.mobile_centroid)
    }
}

/// Least-squares rigid superposition (Kabsch) of `mobile` onto `reference`.
///
/// Points are paired by position in the slices and weighted equally. Returns
/// `None` when the slices are empty, differ in length, or the SVD fails.
pub fn superpose(mobile: &[Point3<f64>], reference: &[Point3<f64>]) -> Option<Superposition> {
    if mobile.len() != reference.len() {
        return None;
    }
    let mobile_centroid = centroid(mobile)?;
    let reference_centroid = centroid(reference)?;

    let covariance = mobile
        .iter()
        .zip(reference)
        .fold(Matrix3::zeros(), |acc, (p, q)| {
            acc + (p - mobile_centroid) * (q - reference_centroid).transpose()
        });

    let svd = covariance.svd(true, true);
    let u = svd.u?;
    let v = svd.v_t?.transpose();

    // Singular values come sorted in decreasing order; flip the weakest axis on reflection.
    let handedness = if (v * u.transpose()).determinant() < 0.0 {
        -1.0
    } else {
        1.0
    };
    let correction = Matrix3::from_diagonal(&Vector3::new(1.0, 1.0, handedness));
    let rotation = Rotation3::from_matrix_unchecked(v * correction * u.transpose());

    Some(Superposition {
        rotation,
        mobile_centroid,
        reference_centroid,
    })
}

pub fn calculate_rmsd(coords1: &[Point3<f64>], coords2: &[Point3<f64>]) -> Option<f64> {
    if coords1.len() != coords2.len() || coords1.is_empty() {
        return None;
    }
    let n = coords1.len() as f64;
    let squared_dist_sum: f64 = coords1
        .iter()
        .zip(coords2.iter())
        .map(|(p1, p2)| (p1 - p2).norm_squared())
        .sum();
    Some((squared_dist_sum / n).sqrt())
}

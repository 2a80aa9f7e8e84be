use nalgebra::Point3;
use thiserror::Error;

/// Width of a fixed-width PDB coordinate field.
pub const COORDINATE_FIELD_WIDTH: usize = 8;

const FULL_PRECISION_LOWER: f64 = -999.999;
const FULL_PRECISION_UPPER: f64 = 9999.999;
const DEGRADED_PRECISION_LOWER: f64 = -9999.999;

#[derive(Debug, Error, Clone, PartialEq)]
#[error("coordinate \"{value}\" could not be represented in a width-8 field")]
pub struct CoordinateFormatError {
    pub value: f64,
}

/// Renders a coordinate into an 8-character field with three decimals.
///
/// Values in `(-999.999, 9999.999)` are rendered as `%8.3f`. Negative values
/// with four integer digits, `(-9999.999, -999.999]`, lose their last decimal
/// to make room for the sign. Everything else, including NaN and infinities,
/// cannot be represented and is an error.
///
/// # Errors
///
/// Returns [`CoordinateFormatError`] if the value exceeds the field capacity
/// even after dropping a decimal.
pub fn format_coordinate(value: f64) -> Result<String, CoordinateFormatError> {
    if value > FULL_PRECISION_LOWER && value < FULL_PRECISION_UPPER {
        return Ok(format!("{:8.3}", value));
    }
    if value > DEGRADED_PRECISION_LOWER && value <= FULL_PRECISION_LOWER {
        let rendered = format!("{:8.3}", value);
        return Ok(rendered[..COORDINATE_FIELD_WIDTH].to_string());
    }
    Err(CoordinateFormatError { value })
}

/// Renders a point as three consecutive coordinate fields.
///
/// # Errors
///
/// Returns the error of the first component that cannot be represented.
pub fn format_position(position: &Point3<f64>) -> Result<String, CoordinateFormatError> {
    Ok(format!(
        "{}{}{}",
        format_coordinate(position.x)?,
        format_coordinate(position.y)?,
        format_coordinate(position.z)?
    ))
}

//! # Engine Module
//!
//! Numerical building blocks of the two post-processing pipelines.
//!
//! - **Configuration** ([`config`]) - Validated run parameters for both pipelines
//! - **Spatial Grid** ([`grid`]) - Uniform 3D partition of a point set with atom-to-cell assignment
//! - **Density** ([`density`]) - Face-neighbor occupancy scores and their [0, 100] normalization
//! - **Alignment** ([`alignment`]) - Rigid-body superposition of trajectory frames onto a reference frame
//! - **Center of Mass** ([`com`]) - Per-frame selection centroids
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events
//! - **Error Handling** ([`error`]) - Engine-specific error types

pub mod alignment;
pub mod com;
pub mod config;
pub mod density;
pub mod error;
pub mod grid;
pub mod progress;

//! # Workflows Module
//!
//! End-to-end pipelines built from the engine primitives. Each workflow takes
//! already-loaded inputs and a validated configuration, reports progress
//! through a [`ProgressReporter`](crate::engine::progress::ProgressReporter),
//! and leaves file output to the caller.
//!
//! - **Density annotation** ([`annotate`]) - grid the atoms of a structure,
//!   score each cell by neighbor-weighted occupancy and write the normalized
//!   score into every atom's B-factor.
//! - **Center-of-mass trace** ([`com`]) - align a trajectory and reduce each
//!   frame to the centroid of a fixed atom selection.

pub mod annotate;
pub mod com;

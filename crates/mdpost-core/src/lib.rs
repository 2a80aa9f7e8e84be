//! # mdpost Core Library
//!
//! Post-processing routines for molecular dynamics runs: per-frame ligand
//! center-of-mass traces and grid-based spatial density annotation of
//! structure files.
//!
//! ## Architecture
//!
//! The library follows a three-layer layout.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Structure`, `Trajectory`),
//!   file readers and writers (PDB, GRO, XTC, index files) and geometric helpers
//!   such as bounding boxes and rigid-body superposition.
//!
//! - **[`engine`]: The Numerics.** Validated configuration, the uniform spatial
//!   grid, neighbor-weighted density and its normalization, trajectory alignment
//!   and selection centroids, plus progress reporting and error types.
//!
//! - **[`workflows`]: The Public API.** Complete procedures (`annotate`, `com`)
//!   that tie the `engine` and `core` together and are what the CLI calls.

pub mod core;
pub mod engine;
pub mod workflows;

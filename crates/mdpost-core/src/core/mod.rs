//! # Core Module
//!
//! Fundamental building blocks shared by both post-processing pipelines.
//!
//! - **Molecular Representation** ([`models`]) - Atom records, structure tables and trajectories
//! - **File I/O** ([`io`]) - PDB, GRO, XTC and index file readers/writers, fixed-width formatting
//! - **Geometry** ([`utils`]) - Bounding boxes, centroids and rigid-body superposition

pub mod io;
pub mod models;
pub mod utils;

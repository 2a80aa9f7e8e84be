//! Provides input/output functionality for molecular file formats.
//!
//! Structure formats (PDB, GRO) share the [`traits::StructureFile`] interface.
//! Trajectories are read from XTC files, atom selections from plain index files,
//! and [`format`] holds the fixed-width coordinate rendering used by the
//! center-of-mass trace writer.

pub mod format;
pub mod gro;
pub mod ndx;
pub mod pdb;
pub mod traits;
pub mod xtc;

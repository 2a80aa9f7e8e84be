//! # Core Models Module
//!
//! Plain data structures describing what the pipelines read and write.
//!
//! - [`atom`] - A single atom record: position, annotation (B-factor) and descriptive columns
//! - [`structure`] - An ordered table of atom records; row index is atom identity
//! - [`trajectory`] - Time-ordered frames of atom positions
//! - [`selection`] - A fixed set of atom indices shared by every frame
//!
//! ```ignore
//! use mdpost::core::models::{atom::AtomRecord, structure::Structure};
//!
//! let mut structure = Structure::new();
//! structure.push(AtomRecord::new(1, "CA", "ALA", Point3::new(0.0, 0.0, 0.0)));
//! assert_eq!(structure.len(), 1);
//! ```

pub mod atom;
pub mod selection;
pub mod structure;
pub mod trajectory;

use nalgebra::Point3;
use std::str::FromStr;

/// Distinguishes standard polymer atoms from heteroatoms in structure files.
///
/// Only [`RecordKind::Atom`] rows take part in density annotation; heteroatom
/// rows are kept by readers so callers can decide what to do with them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum RecordKind {
    /// A standard `ATOM` record.
    #[default]
    Atom,
    /// A `HETATM` record (ligands, ions, solvent).
    Hetero,
}

impl RecordKind {
    /// The six-character record name as written in PDB files.
    pub fn record_name(self) -> &'static str {
        match self {
            RecordKind::Atom => "ATOM",
            RecordKind::Hetero => "HETATM",
        }
    }
}

impl FromStr for RecordKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ATOM" => Ok(RecordKind::Atom),
            "HETATM" => Ok(RecordKind::Hetero),
            _ => Err(()),
        }
    }
}

/// One row of a structure table.
///
/// The record carries everything the pipelines compute with (the position and
/// the annotation slot) plus the descriptive columns needed to write the row
/// back out. Identity is the row index inside the owning
/// [`Structure`](super::structure::Structure), not the serial number, which
/// is only echoed to the output.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomRecord {
    /// Whether the row came from an `ATOM` or a `HETATM` record.
    pub kind: RecordKind,
    /// The serial number as found in the input file.
    pub serial: usize,
    /// The atom name without surrounding whitespace (e.g. "CA").
    pub name: String,
    /// The residue name (e.g. "ALA", "LIG").
    pub residue_name: String,
    /// The chain identifier, a blank when the format has none.
    pub chain_id: char,
    /// The residue sequence number.
    pub residue_number: isize,
    /// The 3D coordinates, in the length unit of the source file.
    pub position: Point3<f64>,
    /// The occupancy column.
    pub occupancy: f64,
    /// The per-atom annotation slot (temperature factor column).
    pub b_factor: f64,
    /// The element symbol, empty when absent.
    pub element: String,
}

impl AtomRecord {
    /// Creates an `ATOM` record with unit occupancy and a zero annotation.
    pub fn new(serial: usize, name: &str, residue_name: &str, position: Point3<f64>) -> Self {
        Self {
            kind: RecordKind::Atom,
            serial,
            name: name.to_string(),
            residue_name: residue_name.to_string(),
            chain_id: ' ',
            residue_number: 1,
            position,
            occupancy: 1.0,
            b_factor: 0.0,
            element: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_has_expected_default_fields() {
        let atom = AtomRecord::new(7, "CA", "ALA", Point3::new(1.0, 2.0, 3.0));

        assert_eq!(atom.kind, RecordKind::Atom);
        assert_eq!(atom.serial, 7);
        assert_eq!(atom.name, "CA");
        assert_eq!(atom.residue_name, "ALA");
        assert_eq!(atom.chain_id, ' ');
        assert_eq!(atom.position, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(atom.occupancy, 1.0);
        assert_eq!(atom.b_factor, 0.0);
        assert!(atom.element.is_empty());
    }

    #[test]
    fn record_kind_parses_pdb_record_names() {
        assert_eq!(RecordKind::from_str("ATOM"), Ok(RecordKind::Atom));
        assert_eq!(RecordKind::from_str("ATOM  "), Ok(RecordKind::Atom));
        assert_eq!(RecordKind::from_str("hetatm"), Ok(RecordKind::Hetero));
        assert_eq!(RecordKind::from_str("TER"), Err(()));
    }

    #[test]
    fn record_name_round_trips_through_from_str() {
        for kind in [RecordKind::Atom, RecordKind::Hetero] {
            assert_eq!(RecordKind::from_str(kind.record_name()), Ok(kind));
        }
    }
}

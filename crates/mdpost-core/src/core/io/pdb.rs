use crate::core::io::format::{CoordinateFormatError, format_position};
use crate::core::io::traits::{StructureFile, WritableStructureFile};
use crate::core::models::atom::{AtomRecord, RecordKind};
use crate::core::models::structure::Structure;
use nalgebra::Point3;
use std::io::{self, BufRead, Write};
use std::str::FromStr;
use thiserror::Error;

/// Residue label of the pseudo-atoms in a center-of-mass trace.
pub const TRACE_RESIDUE_NAME: &str = "HEX";
/// Atom label of the pseudo-atoms in a center-of-mass trace.
pub const TRACE_ATOM_NAME: &str = "H";

const MIN_COORDINATE_LINE_LEN: usize = 54;

/// Raw column data of one atom row that the structure table does not model.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PdbAtomIoData {
    /// Columns 13-16 exactly as read, so atom-name alignment survives a rewrite.
    pub name_field: String,
    pub alt_loc: char,
    pub insertion_code: char,
    /// Everything after column 66 (segment id, element, charge).
    pub raw_suffix: String,
}

/// Per-row raw column data, aligned with the rows of the read [`Structure`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PdbMetadata {
    pub atom_io_data: Vec<PdbAtomIoData>,
}

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: PdbParseErrorKind },
    #[error("Inconsistent data: {0}")]
    Inconsistency(String),
    #[error("Missing required record: {0}")]
    MissingRecord(String),
    #[error(transparent)]
    Format(#[from] CoordinateFormatError),
}

#[derive(Debug, Error)]
pub enum PdbParseErrorKind {
    #[error("Invalid integer format in columns {columns} (value: '{value}')")]
    InvalidInt { columns: String, value: String },
    #[error("Invalid float format in columns {columns} (value: '{value}')")]
    InvalidFloat { columns: String, value: String },
    #[error("Line is too short for ATOM/HETATM record (must be at least 54 chars)")]
    LineTooShort,
}

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end).unwrap_or("").trim()
}

fn column_char(line: &str, index: usize) -> char {
    line.get(index..index + 1)
        .and_then(|s| s.chars().next())
        .unwrap_or(' ')
}

fn parse_float(line: &str, line_num: usize, start: usize, end: usize) -> Result<f64, PdbError> {
    let value = slice_and_trim(line, start, end);
    value.parse().map_err(|_| PdbError::Parse {
        line: line_num,
        kind: PdbParseErrorKind::InvalidFloat {
            columns: format!("{}-{}", start + 1, end),
            value: value.into(),
        },
    })
}

fn parse_optional_float(
    line: &str,
    line_num: usize,
    start: usize,
    end: usize,
    default: f64,
) -> Result<f64, PdbError> {
    if slice_and_trim(line, start, end).is_empty() {
        Ok(default)
    } else {
        parse_float(line, line_num, start, end)
    }
}

fn parse_int<T: FromStr>(
    line: &str,
    line_num: usize,
    start: usize,
    end: usize,
) -> Result<T, PdbError> {
    let value = slice_and_trim(line, start, end);
    value.parse().map_err(|_| PdbError::Parse {
        line: line_num,
        kind: PdbParseErrorKind::InvalidInt {
            columns: format!("{}-{}", start + 1, end),
            value: value.into(),
        },
    })
}

/// Reader and writer for the coordinate section of PDB files.
///
/// Only `ATOM` and `HETATM` records are read; every other record is skipped
/// and is not reproduced on write.
pub struct PdbFile;

impl StructureFile for PdbFile {
    type Metadata = PdbMetadata;
    type Error = PdbError;

    fn read_from(reader: &mut impl BufRead) -> Result<(Structure, Self::Metadata), Self::Error> {
        let mut structure = Structure::new();
        let mut metadata = PdbMetadata::default();

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line = line.trim_end_matches(['\r', '\n']);
            let line_num = line_num + 1;

            let Ok(kind) = RecordKind::from_str(slice_and_trim(line, 0, 6)) else {
                continue;
            };
            if line.len() < MIN_COORDINATE_LINE_LEN {
                return Err(PdbError::Parse {
                    line: line_num,
                    kind: PdbParseErrorKind::LineTooShort,
                });
            }

            let serial: usize = parse_int(line, line_num, 6, 11)?;
            let residue_number: isize = parse_int(line, line_num, 22, 26)?;
            let x = parse_float(line, line_num, 30, 38)?;
            let y = parse_float(line, line_num, 38, 46)?;
            let z = parse_float(line, line_num, 46, 54)?;
            let occupancy = parse_optional_float(line, line_num, 54, 60, 1.0)?;
            let b_factor = parse_optional_float(line, line_num, 60, 66, 0.0)?;

            structure.push(AtomRecord {
                kind,
                serial,
                name: slice_and_trim(line, 12, 16).to_string(),
                residue_name: slice_and_trim(line, 17, 20).to_string(),
                chain_id: column_char(line, 21),
                residue_number,
                position: Point3::new(x, y, z),
                occupancy,
                b_factor,
                element: slice_and_trim(line, 76, 78).to_string(),
            });
            metadata.atom_io_data.push(PdbAtomIoData {
                name_field: format!("{:<4}", line.get(12..16).unwrap_or("")),
                alt_loc: column_char(line, 16),
                insertion_code: column_char(line, 26),
                raw_suffix: line.get(66..).unwrap_or("").trim_end().to_string(),
            });
        }

        if structure.is_empty() {
            return Err(PdbError::MissingRecord("ATOM/HETATM records".into()));
        }
        Ok((structure, metadata))
    }
}

impl WritableStructureFile for PdbFile {
    fn write_to(
        structure: &Structure,
        metadata: &Self::Metadata,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error> {
        if metadata.atom_io_data.len() != structure.len() {
            return Err(PdbError::Inconsistency(format!(
                "metadata describes {} atoms but the structure holds {}",
                metadata.atom_io_data.len(),
                structure.len()
            )));
        }

        for (atom, io_data) in structure.atoms().iter().zip(&metadata.atom_io_data) {
            writeln!(
                writer,
                "{:<6}{:>5} {:<4}{}{:>3} {}{:>4}{}   {:>8.3}{:>8.3}{:>8.3}{:>6.2}{:>6.2}{}",
                atom.kind.record_name(),
                atom.serial,
                io_data.name_field,
                io_data.alt_loc,
                atom.residue_name,
                atom.chain_id,
                atom.residue_number,
                io_data.insertion_code,
                atom.position.x,
                atom.position.y,
                atom.position.z,
                atom.occupancy,
                atom.b_factor,
                io_data.raw_suffix
            )?;
        }
        Ok(())
    }
}

/// Keeps only the rows of the given record kind, in both the table and its metadata.
///
/// # Errors
///
/// Returns [`PdbError::Inconsistency`] if the metadata is not aligned with the structure.
pub fn retain_kind(
    structure: Structure,
    metadata: PdbMetadata,
    kind: RecordKind,
) -> Result<(Structure, PdbMetadata), PdbError> {
    if metadata.atom_io_data.len() != structure.len() {
        return Err(PdbError::Inconsistency(format!(
            "metadata describes {} atoms but the structure holds {}",
            metadata.atom_io_data.len(),
            structure.len()
        )));
    }
    let (atoms, io_data): (Vec<_>, Vec<_>) = structure
        .into_iter()
        .zip(metadata.atom_io_data)
        .filter(|(atom, _)| atom.kind == kind)
        .unzip();
    Ok((
        atoms.into_iter().collect(),
        PdbMetadata {
            atom_io_data: io_data,
        },
    ))
}

/// Writes one pseudo-atom record per point followed by a `TER` record.
///
/// Serial and residue numbers both count frames from 1.
///
/// # Errors
///
/// Returns [`PdbError::Format`] if a coordinate does not fit its field.
pub fn write_trace(points: &[Point3<f64>], writer: &mut impl Write) -> Result<(), PdbError> {
    for (i, point) in points.iter().enumerate() {
        let serial = i + 1;
        writeln!(
            writer,
            "ATOM  {:>5}  {}  {}{:>5}    {}  1.00  0.00           C",
            serial,
            TRACE_ATOM_NAME,
            TRACE_RESIDUE_NAME,
            serial,
            format_position(point)?
        )?;
    }
    writeln!(writer, "TER")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const SAMPLE_PDB: &str = "\
HEADER    TEST STRUCTURE
ATOM      1  N   ALA A   1      11.104   6.134  -6.504  1.00  0.00           N
ATOM      2  CA  ALA A   1      11.639   6.071  -5.147  1.00 12.50           C
HETATM    3  O   HOH A 101       2.000   3.000   4.000  1.00  0.00           O
ATOM      4 HD11 LEU A   2      12.000   7.000  -4.000  0.50  0.00           H
TER
END
";

    fn read_sample() -> (Structure, PdbMetadata) {
        PdbFile::read_from(&mut Cursor::new(SAMPLE_PDB)).unwrap()
    }

    #[test]
    fn reads_atom_and_hetatm_records() {
        let (structure, metadata) = read_sample();
        assert_eq!(structure.len(), 4);
        assert_eq!(metadata.atom_io_data.len(), 4);

        let ca = structure.atom(1).unwrap();
        assert_eq!(ca.kind, RecordKind::Atom);
        assert_eq!(ca.serial, 2);
        assert_eq!(ca.name, "CA");
        assert_eq!(ca.residue_name, "ALA");
        assert_eq!(ca.chain_id, 'A');
        assert_eq!(ca.residue_number, 1);
        assert_eq!(ca.position, Point3::new(11.639, 6.071, -5.147));
        assert_eq!(ca.b_factor, 12.5);
        assert_eq!(ca.element, "C");

        let water = structure.atom(2).unwrap();
        assert_eq!(water.kind, RecordKind::Hetero);
        assert_eq!(water.residue_number, 101);
        assert_eq!(structure.atom(3).unwrap().occupancy, 0.5);
    }

    #[test]
    fn missing_occupancy_and_b_factor_take_defaults() {
        let line = "ATOM      1  CA  GLY A   1       1.000   2.000   3.000\n";
        let (structure, _) = PdbFile::read_from(&mut Cursor::new(line)).unwrap();
        let atom = structure.atom(0).unwrap();
        assert_eq!(atom.occupancy, 1.0);
        assert_eq!(atom.b_factor, 0.0);
        assert!(atom.element.is_empty());
    }

    #[test]
    fn short_atom_line_is_rejected_with_line_number() {
        let input = "REMARK ok\nATOM      1  CA  GLY A   1       1.000   2.000\n";
        let err = PdbFile::read_from(&mut Cursor::new(input)).unwrap_err();
        assert!(matches!(
            err,
            PdbError::Parse {
                line: 2,
                kind: PdbParseErrorKind::LineTooShort
            }
        ));
    }

    #[test]
    fn malformed_coordinate_is_reported_with_columns() {
        let input = "ATOM      1  CA  GLY A   1       1.000   abc     3.000  1.00  0.00\n";
        let err = PdbFile::read_from(&mut Cursor::new(input)).unwrap_err();
        match err {
            PdbError::Parse {
                line,
                kind: PdbParseErrorKind::InvalidFloat { columns, .. },
            } => {
                assert_eq!(line, 1);
                assert_eq!(columns, "39-46");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn file_without_atoms_is_an_error() {
        let err = PdbFile::read_from(&mut Cursor::new("HEADER\nEND\n")).unwrap_err();
        assert!(matches!(err, PdbError::MissingRecord(_)));
    }

    #[test]
    fn rewrite_reproduces_atom_lines_and_drops_other_records() {
        let (structure, metadata) = read_sample();
        let mut out = Vec::<u8>::new();
        PdbFile::write_to(&structure, &metadata, &mut out).unwrap();
        let written = String::from_utf8(out).unwrap();

        let expected: Vec<&str> = SAMPLE_PDB
            .lines()
            .filter(|l| l.starts_with("ATOM") || l.starts_with("HETATM"))
            .collect();
        assert_eq!(written.lines().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn rewrite_places_b_factor_in_columns_61_to_66() {
        let (mut structure, metadata) = read_sample();
        structure.set_b_factors(&[100.0, 33.333, 0.0, 0.0]).unwrap();

        let mut out = Vec::<u8>::new();
        PdbFile::write_to(&structure, &metadata, &mut out).unwrap();
        let written = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = written.lines().collect();

        assert_eq!(&lines[0][60..66], "100.00");
        assert_eq!(&lines[1][60..66], " 33.33");
        assert_eq!(&lines[0][76..78], " N");
    }

    #[test]
    fn retain_kind_keeps_rows_and_metadata_aligned() {
        let (structure, metadata) = read_sample();
        let (atoms, atom_metadata) = retain_kind(structure, metadata, RecordKind::Atom).unwrap();

        assert_eq!(atoms.len(), 3);
        assert_eq!(atom_metadata.atom_io_data.len(), 3);
        assert!(atoms.atoms().iter().all(|a| a.kind == RecordKind::Atom));
        assert_eq!(atom_metadata.atom_io_data[2].name_field, "HD11");
    }

    #[test]
    fn write_rejects_misaligned_metadata() {
        let (structure, _) = read_sample();
        let err = PdbFile::write_to(&structure, &PdbMetadata::default(), &mut Vec::<u8>::new())
            .unwrap_err();
        assert!(matches!(err, PdbError::Inconsistency(_)));
    }

    #[test]
    fn trace_has_one_record_per_point_and_terminator() {
        let points = [Point3::new(10.0, 0.0, 0.0), Point3::new(-1.5, 2.25, 3.0)];
        let mut out = Vec::<u8>::new();
        write_trace(&points, &mut out).unwrap();
        let written = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = written.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "ATOM      1  H  HEX    1      10.000   0.000   0.000  1.00  0.00           C"
        );
        assert_eq!(
            lines[1],
            "ATOM      2  H  HEX    2      -1.500   2.250   3.000  1.00  0.00           C"
        );
        assert_eq!(lines[2], "TER");
    }

    #[test]
    fn trace_with_small_coordinates_reads_back_as_pdb() {
        let mut out = Vec::<u8>::new();
        write_trace(&[Point3::new(1.0, 2.0, 3.0)], &mut out).unwrap();
        let written = String::from_utf8(out).unwrap();
        let (structure, _) = PdbFile::read_from(&mut Cursor::new(written)).unwrap();
        assert_eq!(structure.atom(0).unwrap().position, Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn trace_with_unrepresentable_coordinate_fails() {
        let err = write_trace(&[Point3::new(12345.6789, 0.0, 0.0)], &mut Vec::<u8>::new())
            .unwrap_err();
        assert!(matches!(err, PdbError::Format(_)));
    }
}

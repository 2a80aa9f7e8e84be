use crate::core::io::traits::StructureFile;
use crate::core::models::atom::AtomRecord;
use crate::core::models::structure::Structure;
use nalgebra::Point3;
use std::io::{self, BufRead};
use thiserror::Error;

const COORDINATE_START: usize = 20;
const DEFAULT_FIELD_WIDTH: usize = 8;

/// Title and box line of a GRO file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroMetadata {
    pub title: String,
    /// Box vector components in nm: three for rectangular boxes, nine for triclinic ones.
    pub box_vectors: Vec<f64>,
}

#[derive(Debug, Error)]
pub enum GroError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: GroParseErrorKind },
    #[error("Missing required record: {0}")]
    MissingRecord(String),
}

#[derive(Debug, Error)]
pub enum GroParseErrorKind {
    #[error("Invalid atom count (value: '{0}')")]
    InvalidAtomCount(String),
    #[error("Invalid integer format in columns {columns} (value: '{value}')")]
    InvalidInt { columns: String, value: String },
    #[error("Invalid float format in columns {columns} (value: '{value}')")]
    InvalidFloat { columns: String, value: String },
    #[error("Line is too short for an atom record")]
    LineTooShort,
    #[error("Invalid box vector (value: '{0}')")]
    InvalidBox(String),
}

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end).unwrap_or("").trim()
}

/// Width of one coordinate field, taken from the spacing of the decimal points.
///
/// GRO files written with extra precision widen every coordinate field, so
/// the width is derived from the first atom line rather than assumed.
fn coordinate_field_width(line: &str) -> usize {
    let Some(coords) = line.get(COORDINATE_START..) else {
        return DEFAULT_FIELD_WIDTH;
    };
    let Some(first_dot) = coords.find('.') else {
        return DEFAULT_FIELD_WIDTH;
    };
    coords[first_dot + 1..]
        .find('.')
        .map_or(DEFAULT_FIELD_WIDTH, |offset| offset + 1)
}

/// Reader for GROMACS GRO structure files.
///
/// Coordinates stay in nanometers; velocities are ignored.
pub struct GroFile;

impl GroFile {
    fn parse_atom_line(line: &str, line_num: usize, width: usize) -> Result<AtomRecord, GroError> {
        let coords_end = COORDINATE_START + 3 * width;
        if line.len() < coords_end {
            return Err(GroError::Parse {
                line: line_num,
                kind: GroParseErrorKind::LineTooShort,
            });
        }

        let parse_int = |start: usize, end: usize| -> Result<usize, GroError> {
            let value = slice_and_trim(line, start, end);
            value.parse().map_err(|_| GroError::Parse {
                line: line_num,
                kind: GroParseErrorKind::InvalidInt {
                    columns: format!("{}-{}", start + 1, end),
                    value: value.into(),
                },
            })
        };
        let parse_float = |start: usize| -> Result<f64, GroError> {
            let value = slice_and_trim(line, start, start + width);
            value.parse().map_err(|_| GroError::Parse {
                line: line_num,
                kind: GroParseErrorKind::InvalidFloat {
                    columns: format!("{}-{}", start + 1, start + width),
                    value: value.into(),
                },
            })
        };

        let residue_number = parse_int(0, 5)?;
        let serial = parse_int(15, 20)?;
        let x = parse_float(COORDINATE_START)?;
        let y = parse_float(COORDINATE_START + width)?;
        let z = parse_float(COORDINATE_START + 2 * width)?;

        let mut atom = AtomRecord::new(
            serial,
            slice_and_trim(line, 10, 15),
            slice_and_trim(line, 5, 10),
            Point3::new(x, y, z),
        );
        atom.residue_number = residue_number as isize;
        Ok(atom)
    }

    fn parse_box(line: &str, line_num: usize) -> Result<Vec<f64>, GroError> {
        let values = line
            .split_whitespace()
            .map(|v| v.parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| GroError::Parse {
                line: line_num,
                kind: GroParseErrorKind::InvalidBox(line.trim().into()),
            })?;
        if values.len() != 3 && values.len() != 9 {
            return Err(GroError::Parse {
                line: line_num,
                kind: GroParseErrorKind::InvalidBox(line.trim().into()),
            });
        }
        Ok(values)
    }
}

impl StructureFile for GroFile {
    type Metadata = GroMetadata;
    type Error = GroError;

    fn read_from(reader: &mut impl BufRead) -> Result<(Structure, Self::Metadata), Self::Error> {
        let mut lines = reader.lines();
        let title = lines
            .next()
            .ok_or_else(|| GroError::MissingRecord("title line".into()))??;
        let count_line = lines
            .next()
            .ok_or_else(|| GroError::MissingRecord("atom count line".into()))??;
        let num_atoms: usize = count_line.trim().parse().map_err(|_| GroError::Parse {
            line: 2,
            kind: GroParseErrorKind::InvalidAtomCount(count_line.trim().into()),
        })?;

        let mut structure = Structure::with_capacity(num_atoms);
        let mut width = DEFAULT_FIELD_WIDTH;
        for i in 0..num_atoms {
            let line_num = i + 3;
            let line = lines.next().ok_or_else(|| {
                GroError::MissingRecord(format!("atom record {} of {}", i + 1, num_atoms))
            })??;
            if i == 0 {
                width = coordinate_field_width(&line);
            }
            structure.push(Self::parse_atom_line(&line, line_num, width)?);
        }

        let box_line = lines
            .next()
            .ok_or_else(|| GroError::MissingRecord("box vector line".into()))??;
        let box_vectors = Self::parse_box(&box_line, num_atoms + 3)?;

        Ok((
            structure,
            GroMetadata {
                title: title.trim_end().to_string(),
                box_vectors,
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const SAMPLE_GRO: &str = "\
Ligand in water t=   0.00000
    3
    1LIG     C1    1   1.000   2.000   3.000  0.1000 -0.2000  0.3000
    1LIG     O2    2   1.100   2.100   3.100
    2SOL     OW    3   0.500   0.600   0.700
   5.00000   5.00000   5.00000
";

    #[test]
    fn reads_atoms_title_and_box() {
        let (structure, metadata) = GroFile::read_from(&mut Cursor::new(SAMPLE_GRO)).unwrap();

        assert_eq!(metadata.title, "Ligand in water t=   0.00000");
        assert_eq!(metadata.box_vectors, vec![5.0, 5.0, 5.0]);
        assert_eq!(structure.len(), 3);

        let first = structure.atom(0).unwrap();
        assert_eq!(first.serial, 1);
        assert_eq!(first.name, "C1");
        assert_eq!(first.residue_name, "LIG");
        assert_eq!(first.residue_number, 1);
        assert_eq!(first.position, Point3::new(1.0, 2.0, 3.0));

        let water = structure.atom(2).unwrap();
        assert_eq!(water.residue_name, "SOL");
        assert_eq!(water.residue_number, 2);
    }

    #[test]
    fn detects_high_precision_coordinate_fields() {
        let input = "\
hi-res
    1
    1LIG     C1    1   1.00000   2.50000  -3.25000
   1.00000   1.00000   1.00000
";
        let (structure, _) = GroFile::read_from(&mut Cursor::new(input)).unwrap();
        assert_eq!(structure.atom(0).unwrap().position, Point3::new(1.0, 2.5, -3.25));
    }

    #[test]
    fn truncated_file_reports_missing_atom() {
        let input = "title\n    2\n    1LIG     C1    1   1.000   2.000   3.000\n";
        let err = GroFile::read_from(&mut Cursor::new(input)).unwrap_err();
        assert!(matches!(err, GroError::MissingRecord(_)));
    }

    #[test]
    fn invalid_atom_count_is_rejected() {
        let err = GroFile::read_from(&mut Cursor::new("title\nmany\n")).unwrap_err();
        assert!(matches!(
            err,
            GroError::Parse {
                line: 2,
                kind: GroParseErrorKind::InvalidAtomCount(_)
            }
        ));
    }

    #[test]
    fn invalid_box_line_is_rejected() {
        let input = "title\n    1\n    1LIG     C1    1   1.000   2.000   3.000\n 5.0 5.0\n";
        let err = GroFile::read_from(&mut Cursor::new(input)).unwrap_err();
        assert!(matches!(
            err,
            GroError::Parse {
                line: 4,
                kind: GroParseErrorKind::InvalidBox(_)
            }
        ));
    }
}

use crate::core::models::selection::AtomSelection;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IndexFileError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Index file is empty")]
    Empty,
    #[error("Invalid atom identifier '{0}' (expected a positive integer)")]
    InvalidIdentifier(String),
}

/// Reads atom selections from plain index files.
///
/// Only the first line is consulted: a whitespace-separated list of 1-based
/// atom identifiers. Later lines are ignored.
pub struct IndexFile;

impl IndexFile {
    /// Parses the selection from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns [`IndexFileError::Empty`] if the first line holds no identifiers,
    /// and [`IndexFileError::InvalidIdentifier`] for tokens that are not
    /// positive integers.
    pub fn read_from(reader: &mut impl BufRead) -> Result<AtomSelection, IndexFileError> {
        let mut first_line = String::new();
        reader.read_line(&mut first_line)?;

        let ids = first_line
            .split_whitespace()
            .map(|token| match token.parse::<usize>() {
                Ok(id) if id > 0 => Ok(id),
                _ => Err(IndexFileError::InvalidIdentifier(token.to_string())),
            })
            .collect::<Result<Vec<_>, _>>()?;

        if ids.is_empty() {
            return Err(IndexFileError::Empty);
        }
        AtomSelection::from_one_based(&ids).ok_or(IndexFileError::Empty)
    }

    /// Parses the selection from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or its first line is invalid.
    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<AtomSelection, IndexFileError> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    #[test]
    fn reads_first_line_as_one_based_ids() {
        let selection = IndexFile::read_from(&mut Cursor::new("  3 4\t5 \n99 100\n")).unwrap();
        assert_eq!(selection.indices(), &[2, 3, 4]);
    }

    #[test]
    fn empty_first_line_is_an_error() {
        let err = IndexFile::read_from(&mut Cursor::new("\n1 2\n")).unwrap_err();
        assert!(matches!(err, IndexFileError::Empty));
        let err = IndexFile::read_from(&mut Cursor::new("")).unwrap_err();
        assert!(matches!(err, IndexFileError::Empty));
    }

    #[test]
    fn non_numeric_and_zero_ids_are_rejected() {
        let err = IndexFile::read_from(&mut Cursor::new("1 two 3\n")).unwrap_err();
        assert!(matches!(err, IndexFileError::InvalidIdentifier(ref t) if t == "two"));
        let err = IndexFile::read_from(&mut Cursor::new("0 1\n")).unwrap_err();
        assert!(matches!(err, IndexFileError::InvalidIdentifier(ref t) if t == "0"));
        let err = IndexFile::read_from(&mut Cursor::new("-1\n")).unwrap_err();
        assert!(matches!(err, IndexFileError::InvalidIdentifier(_)));
    }

    #[test]
    fn reads_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "1 2").unwrap();
        let selection = IndexFile::read_from_path(file.path()).unwrap();
        assert_eq!(selection.indices(), &[0, 1]);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = IndexFile::read_from_path(dir.path().join("absent.ndx")).unwrap_err();
        assert!(matches!(err, IndexFileError::Io(_)));
    }
}

use super::atom::AtomRecord;
use nalgebra::Point3;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Expected one annotation value per atom ({expected}), got {found}")]
pub struct AnnotationLengthError {
    pub expected: usize,
    pub found: usize,
}

/// An ordered table of atom records read from a single structure file.
///
/// Rows keep the order of the source file, and a row's index is the identity
/// used by every algorithm in the crate (grid cells, selections, write-back).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Structure {
    atoms: Vec<AtomRecord>,
}

impl Structure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            atoms: Vec::with_capacity(capacity),
        }
    }

    /// Appends a record and returns its row index.
    pub fn push(&mut self, atom: AtomRecord) -> usize {
        self.atoms.push(atom);
        self.atoms.len() - 1
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn atoms(&self) -> &[AtomRecord] {
        &self.atoms
    }

    pub fn atom(&self, index: usize) -> Option<&AtomRecord> {
        self.atoms.get(index)
    }

    /// Collects the positions of all rows, in row order.
    pub fn positions(&self) -> Vec<Point3<f64>> {
        self.atoms.iter().map(|atom| atom.position).collect()
    }

    /// Overwrites the annotation slot of every row.
    ///
    /// # Errors
    ///
    /// Returns [`AnnotationLengthError`] and leaves every row untouched if
    /// `values` does not hold exactly one value per row.
    pub fn set_b_factors(&mut self, values: &[f64]) -> Result<(), AnnotationLengthError> {
        if values.len() != self.atoms.len() {
            return Err(AnnotationLengthError {
                expected: self.atoms.len(),
                found: values.len(),
            });
        }
        for (atom, &value) in self.atoms.iter_mut().zip(values) {
            atom.b_factor = value;
        }
        Ok(())
    }
}

impl FromIterator<AtomRecord> for Structure {
    fn from_iter<I: IntoIterator<Item = AtomRecord>>(iter: I) -> Self {
        Self {
            atoms: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Structure {
    type Item = AtomRecord;
    type IntoIter = std::vec::IntoIter<AtomRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.atoms.into_iter()
    }
}

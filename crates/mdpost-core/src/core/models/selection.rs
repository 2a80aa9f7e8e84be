/// A fixed, ordered set of atoms, stored as zero-based indices.
///
/// Index files list atoms by 1-based identifiers; conversion happens once on
/// construction so every consumer works with zero-based indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AtomSelection {
    indices: Vec<usize>,
}

impl AtomSelection {
    /// Builds a selection from zero-based indices.
    pub fn from_indices(indices: Vec<usize>) -> Self {
        Self { indices }
    }

    /// Builds a selection from 1-based atom identifiers, or `None` if any identifier is 0.
    pub fn from_one_based(ids: &[usize]) -> Option<Self> {
        ids.iter()
            .map(|&id| id.checked_sub(1))
            .collect::<Option<Vec<_>>>()
            .map(Self::from_indices)
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// The largest referenced index, if any.
    pub fn max_index(&self) -> Option<usize> {
        self.indices.iter().copied().max()
    }
}

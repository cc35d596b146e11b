use super::ids::AtomIdx;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Selected {
    All,
    Subset(BTreeSet<AtomIdx>),
}

/// The subset of a molecule's atoms that takes part in an operation.
///
/// Selecting everything is the common case and is stored without an explicit
/// index set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomSelection {
    n_atoms: usize,
    selected: Selected,
}

impl AtomSelection {
    /// Selects every atom of a molecule with `n_atoms` atoms.
    pub fn all(n_atoms: usize) -> Self {
        Self {
            n_atoms,
            selected: Selected::All,
        }
    }

    /// Selects no atoms.
    pub fn none(n_atoms: usize) -> Self {
        Self {
            n_atoms,
            selected: Selected::Subset(BTreeSet::new()),
        }
    }

    /// Selects the given atoms. Indices past the end of the molecule are ignored.
    pub fn from_indices(n_atoms: usize, indices: impl IntoIterator<Item = AtomIdx>) -> Self {
        let subset: BTreeSet<AtomIdx> = indices
            .into_iter()
            .filter(|idx| idx.0 < n_atoms)
            .collect();

        if subset.len() == n_atoms {
            Self::all(n_atoms)
        } else {
            Self {
                n_atoms,
                selected: Selected::Subset(subset),
            }
        }
    }

    pub fn n_atoms(&self) -> usize {
        self.n_atoms
    }

    pub fn selected_all(&self) -> bool {
        match &self.selected {
            Selected::All => true,
            Selected::Subset(subset) => subset.len() == self.n_atoms,
        }
    }

    pub fn n_selected(&self) -> usize {
        match &self.selected {
            Selected::All => self.n_atoms,
            Selected::Subset(subset) => subset.len(),
        }
    }

    pub fn is_selected(&self, idx: AtomIdx) -> bool {
        match &self.selected {
            Selected::All => idx.0 < self.n_atoms,
            Selected::Subset(subset) => subset.contains(&idx),
        }
    }

    /// Iterates over the selected atoms in ascending index order.
    pub fn selected_atoms(&self) -> Box<dyn Iterator<Item = AtomIdx> + '_> {
        match &self.selected {
            Selected::All => Box::new((0..self.n_atoms).map(AtomIdx)),
            Selected::Subset(subset) => Box::new(subset.iter().copied()),
        }
    }
}

use super::ids::AtomIdx;
use super::info::MoleculeInfo;
use super::molecule::Molecule;
use super::property::PropertyMap;
use super::selection::AtomSelection;

/// A molecule seen through a selection mask and a property map.
#[derive(Debug, Clone)]
pub struct MoleculeView<'a> {
    molecule: &'a Molecule,
    selection: AtomSelection,
    properties: PropertyMap,
}

impl<'a> MoleculeView<'a> {
    /// A view of the whole molecule with default property names.
    pub fn full(molecule: &'a Molecule) -> Self {
        Self {
            molecule,
            selection: AtomSelection::all(molecule.n_atoms()),
            properties: PropertyMap::default(),
        }
    }

    /// A view of only the given atoms. Indices outside the molecule are ignored.
    pub fn with_selection(
        molecule: &'a Molecule,
        atoms: impl IntoIterator<Item = AtomIdx>,
    ) -> Self {
        Self {
            molecule,
            selection: AtomSelection::from_indices(molecule.n_atoms(), atoms),
            properties: PropertyMap::default(),
        }
    }

    pub fn with_properties(mut self, properties: PropertyMap) -> Self {
        self.properties = properties;
        self
    }

    pub fn molecule(&self) -> &'a Molecule {
        self.molecule
    }

    pub fn info(&self) -> &'a MoleculeInfo {
        self.molecule.info()
    }

    pub fn selection(&self) -> &AtomSelection {
        &self.selection
    }

    pub fn properties(&self) -> &PropertyMap {
        &self.properties
    }
}

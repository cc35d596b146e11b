use super::atom::Atom;
use super::ids::AtomIdx;
use super::info::MoleculeInfo;
use super::topology::{Bond, BondOrder};

/// A molecule's atom identities together with its bond graph.
///
/// Matchers only read the [`MoleculeInfo`]; the bonds are the structural
/// context a substructure search works on.
#[derive(Debug, Clone, Default)]
pub struct Molecule {
    /// Ordered atoms and their lookup tables.
    info: MoleculeInfo,
    /// List of all bonds in the molecule.
    bonds: Vec<Bond>,
    /// Cached adjacency list for bond connectivity, indexed by atom position.
    adjacency: Vec<Vec<AtomIdx>>,
}

impl Molecule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a molecule without bonds from an existing atom list.
    pub fn from_info(info: MoleculeInfo) -> Self {
        let adjacency = vec![Vec::new(); info.n_atoms()];
        Self {
            info,
            bonds: Vec::new(),
            adjacency,
        }
    }

    pub fn info(&self) -> &MoleculeInfo {
        &self.info
    }

    pub fn n_atoms(&self) -> usize {
        self.info.n_atoms()
    }

    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    /// Appends an atom and returns its index.
    pub fn add_atom(&mut self, atom: Atom) -> AtomIdx {
        self.adjacency.push(Vec::new());
        self.info.push_atom(atom)
    }

    /// Adds a bond between two atoms.
    ///
    /// Adding a bond that already exists succeeds without creating a
    /// duplicate.
    ///
    /// # Return
    ///
    /// Returns `None` if either atom does not exist or both ends are the same atom.
    pub fn add_bond(&mut self, atom1: AtomIdx, atom2: AtomIdx, order: BondOrder) -> Option<()> {
        let n_atoms = self.n_atoms();
        if atom1.0 >= n_atoms || atom2.0 >= n_atoms || atom1 == atom2 {
            return None;
        }

        if self.adjacency[atom1.0].contains(&atom2) {
            return Some(());
        }

        self.bonds.push(Bond::new(atom1, atom2, order));
        self.adjacency[atom1.0].push(atom2);
        self.adjacency[atom2.0].push(atom1);
        Some(())
    }

    /// Returns the atoms directly bonded to `atom`, or `None` if it does not exist.
    pub fn bonded_neighbors(&self, atom: AtomIdx) -> Option<&[AtomIdx]> {
        self.adjacency.get(atom.0).map(Vec::as_slice)
    }
}

impl From<MoleculeInfo> for Molecule {
    fn from(info: MoleculeInfo) -> Self {
        Self::from_info(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_ethanol_heavy_atoms() -> Molecule {
        let mut mol = Molecule::new();
        let c1 = mol.add_atom(Atom::new("C1"));
        let c2 = mol.add_atom(Atom::new("C2"));
        let o = mol.add_atom(Atom::new("O"));
        mol.add_bond(c1, c2, BondOrder::Single).unwrap();
        mol.add_bond(c2, o, BondOrder::Single).unwrap();
        mol
    }

    #[test]
    fn molecule_creation_and_access() {
        let mol = create_ethanol_heavy_atoms();
        assert_eq!(mol.n_atoms(), 3);
        assert_eq!(mol.bonds().len(), 2);
        assert_eq!(mol.info().name(AtomIdx(2)), Some("O"));
    }

    #[test]
    fn bonded_neighbors_returns_correct_neighbors() {
        let mol = create_ethanol_heavy_atoms();
        assert_eq!(mol.bonded_neighbors(AtomIdx(0)).unwrap(), &[AtomIdx(1)]);
        let c2 = mol.bonded_neighbors(AtomIdx(1)).unwrap();
        assert_eq!(c2.len(), 2);
        assert!(c2.contains(&AtomIdx(0)));
        assert!(c2.contains(&AtomIdx(2)));
        assert!(mol.bonded_neighbors(AtomIdx(3)).is_none());
    }

    #[test]
    fn add_bond_is_idempotent() {
        let mut mol = create_ethanol_heavy_atoms();
        assert!(mol.add_bond(AtomIdx(1), AtomIdx(0), BondOrder::Double).is_some());
        assert_eq!(mol.bonds().len(), 2);
        assert_eq!(mol.bonded_neighbors(AtomIdx(0)).unwrap().len(), 1);
    }

    #[test]
    fn add_bond_rejects_unknown_atoms_and_self_bonds() {
        let mut mol = create_ethanol_heavy_atoms();
        assert!(mol.add_bond(AtomIdx(0), AtomIdx(7), BondOrder::Single).is_none());
        assert!(mol.add_bond(AtomIdx(1), AtomIdx(1), BondOrder::Single).is_none());
        assert_eq!(mol.bonds().len(), 2);
    }

    #[test]
    fn from_info_creates_unbonded_molecule() {
        let mol = Molecule::from(MoleculeInfo::from_names(["A", "B"]));
        assert_eq!(mol.n_atoms(), 2);
        assert!(mol.bonds().is_empty());
        assert_eq!(mol.bonded_neighbors(AtomIdx(1)).unwrap().len(), 0);
    }
}

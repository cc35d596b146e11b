use super::atom::Atom;
use super::identifier::{AtomIdentifier, ResolveError};
use super::ids::AtomIdx;
use std::collections::HashMap;

/// The ordered atom list of a molecule together with its lookup tables.
///
/// This is the identity layer of a topology: atoms are addressed by their
/// position, and can be looked up by name or serial number. Names and
/// numbers need not be unique; lookups that hit several atoms are reported
/// as ambiguous rather than silently picking one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MoleculeInfo {
    atoms: Vec<Atom>,
    name_map: HashMap<String, Vec<AtomIdx>>,
    number_map: HashMap<i64, Vec<AtomIdx>>,
}

impl MoleculeInfo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the info from an ordered list of atoms.
    pub fn from_atoms(atoms: impl IntoIterator<Item = Atom>) -> Self {
        let mut info = Self::new();
        for atom in atoms {
            info.push_atom(atom);
        }
        info
    }

    /// Convenience constructor for a topology described only by atom names.
    pub fn from_names<S: AsRef<str>>(names: impl IntoIterator<Item = S>) -> Self {
        Self::from_atoms(names.into_iter().map(|name| Atom::new(name.as_ref())))
    }

    /// Appends an atom and returns its index.
    pub fn push_atom(&mut self, atom: Atom) -> AtomIdx {
        let idx = AtomIdx(self.atoms.len());

        self.name_map.entry(atom.name.clone()).or_default().push(idx);
        if let Some(number) = atom.number {
            self.number_map.entry(number).or_default().push(idx);
        }

        self.atoms.push(atom);
        idx
    }

    pub fn n_atoms(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn atom(&self, idx: AtomIdx) -> Option<&Atom> {
        self.atoms.get(idx.0)
    }

    pub fn name(&self, idx: AtomIdx) -> Option<&str> {
        self.atom(idx).map(|atom| atom.name.as_str())
    }

    pub fn atoms_iter(&self) -> impl Iterator<Item = (AtomIdx, &Atom)> {
        self.atoms
            .iter()
            .enumerate()
            .map(|(i, atom)| (AtomIdx(i), atom))
    }

    /// Resolves an identifier to exactly one atom of this molecule.
    ///
    /// # Errors
    ///
    /// Returns a [`ResolveError`] if the identifier is null, matches no atom,
    /// matches more than one atom, or is an index past the end of the list.
    pub fn resolve(&self, identifier: &AtomIdentifier) -> Result<AtomIdx, ResolveError> {
        match identifier {
            AtomIdentifier::Index(idx) => {
                if idx.0 < self.atoms.len() {
                    Ok(*idx)
                } else {
                    Err(ResolveError::OutOfRange {
                        index: *idx,
                        n_atoms: self.atoms.len(),
                    })
                }
            }
            AtomIdentifier::Name(name) => {
                if identifier.is_null() {
                    return Err(ResolveError::Null);
                }
                Self::single(identifier, self.name_map.get(name))
            }
            AtomIdentifier::Number(number) => {
                Self::single(identifier, self.number_map.get(number))
            }
        }
    }

    /// Shorthand for resolving an atom by name.
    pub fn resolve_name(&self, name: &str) -> Result<AtomIdx, ResolveError> {
        self.resolve(&AtomIdentifier::name(name))
    }

    fn single(
        identifier: &AtomIdentifier,
        hits: Option<&Vec<AtomIdx>>,
    ) -> Result<AtomIdx, ResolveError> {
        match hits.map(Vec::as_slice) {
            Some([idx]) => Ok(*idx),
            Some(many) if many.len() > 1 => Err(ResolveError::Ambiguous {
                identifier: identifier.clone(),
                count: many.len(),
            }),
            _ => Err(ResolveError::NotFound(identifier.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_info() -> MoleculeInfo {
        MoleculeInfo::from_atoms([
            Atom::new("C1").with_number(10),
            Atom::new("C2").with_number(11),
            Atom::new("H").with_number(12),
            Atom::new("H").with_number(13),
        ])
    }

    #[test]
    fn push_atom_returns_sequential_indices() {
        let mut info = MoleculeInfo::new();
        assert_eq!(info.push_atom(Atom::new("N")), AtomIdx(0));
        assert_eq!(info.push_atom(Atom::new("CA")), AtomIdx(1));
        assert_eq!(info.n_atoms(), 2);
        assert_eq!(info.name(AtomIdx(1)), Some("CA"));
        assert_eq!(info.name(AtomIdx(2)), None);
    }

    #[test]
    fn resolve_finds_unique_names_and_numbers() {
        let info = create_test_info();
        assert_eq!(info.resolve_name("C2"), Ok(AtomIdx(1)));
        assert_eq!(info.resolve(&AtomIdentifier::number(10)), Ok(AtomIdx(0)));
        assert_eq!(info.resolve(&AtomIdentifier::index(3)), Ok(AtomIdx(3)));
    }

    #[test]
    fn resolve_reports_ambiguous_names() {
        let info = create_test_info();
        assert_eq!(
            info.resolve_name("H"),
            Err(ResolveError::Ambiguous {
                identifier: AtomIdentifier::name("H"),
                count: 2,
            })
        );
    }

    #[test]
    fn resolve_reports_missing_and_out_of_range_atoms() {
        let info = create_test_info();
        assert!(matches!(
            info.resolve_name("O"),
            Err(ResolveError::NotFound(_))
        ));
        assert!(matches!(
            info.resolve(&AtomIdentifier::number(99)),
            Err(ResolveError::NotFound(_))
        ));
        assert_eq!(
            info.resolve(&AtomIdentifier::index(4)),
            Err(ResolveError::OutOfRange {
                index: AtomIdx(4),
                n_atoms: 4,
            })
        );
        assert_eq!(info.resolve_name(" "), Err(ResolveError::Null));
    }

    #[test]
    fn from_names_builds_ordered_atoms() {
        let info = MoleculeInfo::from_names(["C1", "C2", "C3"]);
        let names: Vec<_> = info.atoms_iter().map(|(_, a)| a.name.as_str()).collect();
        assert_eq!(names, vec!["C1", "C2", "C3"]);
    }
}

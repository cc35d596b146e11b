use super::error::MatchError;
use super::map::CorrespondenceMap;
use super::matcher::Matcher;
use super::search::SubstructureSearch;
use crate::core::models::ids::AtomIdx;
use crate::core::models::info::MoleculeInfo;
use crate::core::models::view::MoleculeView;
use std::fmt;

/// Matches atom `i` of one molecule to atom `i` of the other.
///
/// This is the only strategy that never reorders atoms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexMatcher;

impl IndexMatcher {
    pub const TYPE_NAME: &'static str = "atommatch::IndexMatcher";

    fn identity(n_atoms: usize) -> CorrespondenceMap {
        let mut map = CorrespondenceMap::with_capacity(n_atoms);
        for i in 0..n_atoms {
            map.insert(AtomIdx(i), AtomIdx(i));
        }
        map
    }
}

impl Matcher for IndexMatcher {
    fn match_info(
        &self,
        mol0: &MoleculeInfo,
        mol1: &MoleculeInfo,
    ) -> Result<CorrespondenceMap, MatchError> {
        Ok(Self::identity(mol0.n_atoms().min(mol1.n_atoms())))
    }

    fn match_views_with(
        &self,
        view0: &MoleculeView<'_>,
        view1: &MoleculeView<'_>,
        _search: &dyn SubstructureSearch,
    ) -> Result<CorrespondenceMap, MatchError> {
        let sel0 = view0.selection();
        let sel1 = view1.selection();

        if sel0.selected_all() && sel1.selected_all() {
            return Ok(Self::identity(sel0.n_selected().min(sel1.n_selected())));
        }

        let n_atoms1 = view1.info().n_atoms();

        Ok(sel0
            .selected_atoms()
            .filter(|idx| idx.0 < n_atoms1 && sel1.is_selected(*idx))
            .map(|idx| (idx, idx))
            .collect())
    }

    fn changes_order(&self, _mol0: &MoleculeInfo, _mol1: &MoleculeInfo) -> bool {
        false
    }
}

impl fmt::Display for IndexMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IndexMatcher()")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::molecule::Molecule;
    use crate::matching::map::pairs;
    use crate::matching::search::UnavailableSearch;

    fn molecule(n_atoms: usize) -> Molecule {
        MoleculeInfo::from_names((0..n_atoms).map(|i| format!("A{i}"))).into()
    }

    #[test]
    fn equal_sized_molecules_map_to_identity() {
        let mol = molecule(4);
        let map = IndexMatcher.match_info(mol.info(), mol.info()).unwrap();
        assert_eq!(map, pairs(&[(0, 0), (1, 1), (2, 2), (3, 3)]));
    }

    #[test]
    fn longer_molecule_is_truncated() {
        let mol0 = molecule(5);
        let mol1 = molecule(3);
        let expected = pairs(&[(0, 0), (1, 1), (2, 2)]);

        assert_eq!(
            IndexMatcher.match_info(mol0.info(), mol1.info()).unwrap(),
            expected
        );
        assert_eq!(
            IndexMatcher
                .match_views_with(
                    &MoleculeView::full(&mol0),
                    &MoleculeView::full(&mol1),
                    &UnavailableSearch
                )
                .unwrap(),
            expected
        );
    }

    #[test]
    fn partial_selection_only_matches_atoms_selected_on_both_sides() {
        let mol0 = molecule(5);
        let mol1 = molecule(4);
        let view0 = MoleculeView::with_selection(&mol0, [AtomIdx(0), AtomIdx(2), AtomIdx(4)]);
        let view1 = MoleculeView::with_selection(&mol1, [AtomIdx(2), AtomIdx(3)]);

        let map = IndexMatcher
            .match_views_with(&view0, &view1, &UnavailableSearch)
            .unwrap();
        assert_eq!(map, pairs(&[(2, 2)]));
    }

    #[test]
    fn selected_atoms_past_the_end_of_the_other_molecule_are_skipped() {
        let mol0 = molecule(6);
        let mol1 = molecule(3);
        let view0 = MoleculeView::with_selection(&mol0, [AtomIdx(1), AtomIdx(5)]);
        let view1 = MoleculeView::full(&mol1);

        let map = IndexMatcher
            .match_views_with(&view0, &view1, &UnavailableSearch)
            .unwrap();
        assert_eq!(map, pairs(&[(1, 1)]));
    }

    #[test]
    fn index_matcher_never_changes_order() {
        let mol = molecule(2);
        assert!(!IndexMatcher.changes_order(mol.info(), mol.info()));
        assert!(!IndexMatcher.is_null());
    }
}

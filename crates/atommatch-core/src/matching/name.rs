use super::error::MatchError;
use super::map::CorrespondenceMap;
use super::matcher::Matcher;
use super::search::SubstructureSearch;
use crate::core::models::identifier::ResolveError;
use crate::core::models::ids::AtomIdx;
use crate::core::models::info::MoleculeInfo;
use crate::core::models::view::MoleculeView;
use std::fmt;
use tracing::trace;

/// Matches atoms that carry the same name in both molecules.
///
/// A name produces a correspondence only if it identifies exactly one atom in
/// each molecule; missing and repeated names are skipped. Uniqueness is judged
/// over the whole molecule, so a name repeated in `mol0` yields no pair even
/// when the target name is unique or a selection hides the other copies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NameMatcher;

impl NameMatcher {
    pub const TYPE_NAME: &'static str = "atommatch::NameMatcher";
}

impl Matcher for NameMatcher {
    fn match_info(
        &self,
        mol0: &MoleculeInfo,
        mol1: &MoleculeInfo,
    ) -> Result<CorrespondenceMap, MatchError> {
        let mut map = CorrespondenceMap::new();

        for (idx0, atom) in mol0.atoms_iter() {
            match resolve_pair(mol0, mol1, idx0, &atom.name) {
                Ok(idx1) => {
                    map.insert(idx0, idx1);
                }
                Err(e) => trace!("Skipping atom {}: {}", idx0, e),
            }
        }

        Ok(map)
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
            return self.match_info(view0.info(), view1.info());
        }

        let info0 = view0.info();
        let info1 = view1.info();
        let mut map = CorrespondenceMap::new();

        for idx0 in sel0.selected_atoms() {
            let Some(name) = info0.name(idx0) else {
                continue;
            };

            match resolve_pair(info0, info1, idx0, name) {
                Ok(idx1) if sel1.is_selected(idx1) => {
                    map.insert(idx0, idx1);
                }
                Ok(idx1) => trace!("Skipping atom {}: partner {} is not selected", idx0, idx1),
                Err(e) => trace!("Skipping atom {}: {}", idx0, e),
            }
        }

        Ok(map)
    }
}

/// Resolves `name` in `mol1`, provided it also identifies `idx0` uniquely in `mol0`.
fn resolve_pair(
    mol0: &MoleculeInfo,
    mol1: &MoleculeInfo,
    idx0: AtomIdx,
    name: &str,
) -> Result<AtomIdx, ResolveError> {
    let own = mol0.resolve_name(name)?;
    debug_assert_eq!(own, idx0);
    mol1.resolve_name(name)
}

impl fmt::Display for NameMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NameMatcher()")
    }
}

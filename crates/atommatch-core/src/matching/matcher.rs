use super::error::MatchError;
use super::id_list::IdListMatcher;
use super::index::IndexMatcher;
use super::map::CorrespondenceMap;
use super::mcs::McsMatcher;
use super::multi::MultiMatcher;
use super::name::NameMatcher;
use super::search::{SubstructureSearch, UnavailableSearch};
use crate::core::models::info::MoleculeInfo;
use crate::core::models::view::MoleculeView;
use std::fmt;
use std::ops::Add;
use tracing::{debug, instrument};

/// The contract shared by every matching strategy.
///
/// A matcher is an immutable configuration value. Matching is a pure function
/// of that configuration and the two molecules passed in; the returned map is
/// injective and only contains atoms that took part in the match.
pub trait Matcher: fmt::Display {
    /// Matches two whole molecules, ignoring any selection.
    fn match_info(
        &self,
        mol0: &MoleculeInfo,
        mol1: &MoleculeInfo,
    ) -> Result<CorrespondenceMap, MatchError>;

    /// Matches two views. Only selected atoms take part; a correspondence whose
    /// partner is not selected in the other view is dropped.
    fn match_views_with(
        &self,
        view0: &MoleculeView<'_>,
        view1: &MoleculeView<'_>,
        search: &dyn SubstructureSearch,
    ) -> Result<CorrespondenceMap, MatchError>;

    /// Returns whether applying this matcher may reorder atoms relative to
    /// their original sequence. Callers use this to decide whether an
    /// identity copy is safe.
    fn changes_order(&self, _mol0: &MoleculeInfo, _mol1: &MoleculeInfo) -> bool {
        true
    }

    /// Returns `true` if the matcher carries no matching information.
    fn is_null(&self) -> bool {
        false
    }
}

/// Any of the matching strategies provided by this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AtomMatcher {
    Index(IndexMatcher),
    Name(NameMatcher),
    IdList(IdListMatcher),
    Mcs(McsMatcher),
    Multi(MultiMatcher),
}

impl AtomMatcher {
    fn inner(&self) -> &dyn Matcher {
        match self {
            Self::Index(m) => m,
            Self::Name(m) => m,
            Self::IdList(m) => m,
            Self::Mcs(m) => m,
            Self::Multi(m) => m,
        }
    }

    /// The stable type name of the strategy, also used as the codec tag.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Index(_) => IndexMatcher::TYPE_NAME,
            Self::Name(_) => NameMatcher::TYPE_NAME,
            Self::IdList(_) => IdListMatcher::TYPE_NAME,
            Self::Mcs(_) => McsMatcher::TYPE_NAME,
            Self::Multi(_) => MultiMatcher::TYPE_NAME,
        }
    }

    pub fn is_multi(&self) -> bool {
        matches!(self, Self::Multi(_))
    }

    /// Matches two views without a substructure search. MCS matching in this
    /// form fails with [`SearchError::Unavailable`](super::error::SearchError::Unavailable).
    pub fn match_views(
        &self,
        view0: &MoleculeView<'_>,
        view1: &MoleculeView<'_>,
    ) -> Result<CorrespondenceMap, MatchError> {
        self.match_views_with(view0, view1, &UnavailableSearch)
    }
}

impl Matcher for AtomMatcher {
    #[instrument(skip_all, name = "match_info", fields(matcher = self.type_name()))]
    fn match_info(
        &self,
        mol0: &MoleculeInfo,
        mol1: &MoleculeInfo,
    ) -> Result<CorrespondenceMap, MatchError> {
        let map = self.inner().match_info(mol0, mol1)?;
        debug!(
            "Matched {} of {} atoms onto {} atoms.",
            map.len(),
            mol0.n_atoms(),
            mol1.n_atoms()
        );
        Ok(map)
    }

    #[instrument(skip_all, name = "match_views", fields(matcher = self.type_name()))]
    fn match_views_with(
        &self,
        view0: &MoleculeView<'_>,
        view1: &MoleculeView<'_>,
        search: &dyn SubstructureSearch,
    ) -> Result<CorrespondenceMap, MatchError> {
        let map = self.inner().match_views_with(view0, view1, search)?;
        debug!(
            "Matched {} of {} selected atoms onto {} selected atoms.",
            map.len(),
            view0.selection().n_selected(),
            view1.selection().n_selected()
        );
        Ok(map)
    }

    fn changes_order(&self, mol0: &MoleculeInfo, mol1: &MoleculeInfo) -> bool {
        self.inner().changes_order(mol0, mol1)
    }

    fn is_null(&self) -> bool {
        self.inner().is_null()
    }
}

impl fmt::Display for AtomMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.inner(), f)
    }
}

impl From<IndexMatcher> for AtomMatcher {
    fn from(m: IndexMatcher) -> Self {
        Self::Index(m)
    }
}

impl From<NameMatcher> for AtomMatcher {
    fn from(m: NameMatcher) -> Self {
        Self::Name(m)
    }
}

impl From<IdListMatcher> for AtomMatcher {
    fn from(m: IdListMatcher) -> Self {
        Self::IdList(m)
    }
}

impl From<McsMatcher> for AtomMatcher {
    fn from(m: McsMatcher) -> Self {
        Self::Mcs(m)
    }
}

impl From<MultiMatcher> for AtomMatcher {
    fn from(m: MultiMatcher) -> Self {
        Self::Multi(m)
    }
}

/// `a + b` builds a flat [`MultiMatcher`] that tries `a` first, then `b`.
impl Add for AtomMatcher {
    type Output = AtomMatcher;

    fn add(self, rhs: AtomMatcher) -> AtomMatcher {
        MultiMatcher::combine(self, rhs).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_names_are_distinct() {
        let matchers: Vec<AtomMatcher> = vec![
            IndexMatcher.into(),
            NameMatcher.into(),
            IdListMatcher::default().into(),
            McsMatcher::new().into(),
            MultiMatcher::default().into(),
        ];
        let mut names: Vec<_> = matchers.iter().map(AtomMatcher::type_name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 5);
    }

    #[test]
    fn only_index_matcher_preserves_order() {
        let info = MoleculeInfo::from_names(["A", "B"]);
        assert!(!AtomMatcher::from(IndexMatcher).changes_order(&info, &info));
        assert!(AtomMatcher::from(NameMatcher).changes_order(&info, &info));
        assert!(AtomMatcher::from(McsMatcher::new()).changes_order(&info, &info));
    }

    #[test]
    fn add_builds_flat_multi_matcher() {
        let combined = AtomMatcher::from(NameMatcher) + IndexMatcher.into();
        let combined = combined + AtomMatcher::from(NameMatcher);
        match combined {
            AtomMatcher::Multi(multi) => {
                assert_eq!(multi.matchers().len(), 3);
                assert!(multi.matchers().iter().all(|m| !m.is_multi()));
            }
            other => panic!("expected a multi matcher, got {other}"),
        }
    }

    #[test]
    fn display_delegates_to_variant() {
        assert_eq!(AtomMatcher::from(IndexMatcher).to_string(), "IndexMatcher()");
        assert_eq!(AtomMatcher::from(NameMatcher).to_string(), "NameMatcher()");
    }
}

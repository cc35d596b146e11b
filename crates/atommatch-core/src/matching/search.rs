use super::error::SearchError;
use super::map::CorrespondenceMap;
use super::matcher::AtomMatcher;
use crate::core::models::view::MoleculeView;
use std::time::Duration;

/// A maximum-common-substructure solver.
///
/// The matchers in this crate never search bond graphs themselves; the
/// [`McsMatcher`](super::mcs::McsMatcher) validates its configuration and
/// hands the two views to an implementation of this trait. Implementations
/// must give up once `timeout` has elapsed, and must only return pairs of
/// atoms that are selected in the respective views.
pub trait SubstructureSearch {
    /// Finds the maximum common substructure of the two views.
    ///
    /// # Arguments
    ///
    /// * `view0`, `view1` - The molecules to compare, with their selections and property maps.
    /// * `timeout` - Wall-clock budget of the search.
    /// * `match_light_atoms` - Whether hydrogens take part in the search.
    fn find_mcs(
        &self,
        view0: &MoleculeView<'_>,
        view1: &MoleculeView<'_>,
        timeout: Duration,
        match_light_atoms: bool,
    ) -> Result<CorrespondenceMap, SearchError>;

    /// Like [`find_mcs`](Self::find_mcs), but seeds the search with the
    /// correspondences found by `prematcher`.
    fn find_mcs_with_prematcher(
        &self,
        view0: &MoleculeView<'_>,
        view1: &MoleculeView<'_>,
        prematcher: &AtomMatcher,
        timeout: Duration,
        match_light_atoms: bool,
    ) -> Result<CorrespondenceMap, SearchError>;
}

/// A search that is never available. Used when the caller has no solver.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableSearch;

impl SubstructureSearch for UnavailableSearch {
    fn find_mcs(
        &self,
        _view0: &MoleculeView<'_>,
        _view1: &MoleculeView<'_>,
        _timeout: Duration,
        _match_light_atoms: bool,
    ) -> Result<CorrespondenceMap, SearchError> {
        Err(SearchError::Unavailable)
    }

    fn find_mcs_with_prematcher(
        &self,
        _view0: &MoleculeView<'_>,
        _view1: &MoleculeView<'_>,
        _prematcher: &AtomMatcher,
        _timeout: Duration,
        _match_light_atoms: bool,
    ) -> Result<CorrespondenceMap, SearchError> {
        Err(SearchError::Unavailable)
    }
}

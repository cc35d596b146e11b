use super::error::MatchError;
use super::map::CorrespondenceMap;
use super::matcher::{AtomMatcher, Matcher};
use super::search::SubstructureSearch;
use crate::core::models::atom::Atom;
use crate::core::models::ids::AtomIdx;
use crate::core::models::info::MoleculeInfo;
use crate::core::models::view::MoleculeView;
use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_MCS_TIMEOUT: Duration = Duration::from_secs(1);

/// Longest timeout a matcher holds. Whole seconds up to 2^53 are exact as
/// `f64`, so the stored timeout survives encoding.
pub const MAX_MCS_TIMEOUT: Duration = Duration::from_secs(1 << 53);

/// Matches atoms through a maximum-common-substructure search.
///
/// The search itself is done by a [`SubstructureSearch`]; this matcher only
/// holds its settings. An optional prematcher seeds the search with known
/// correspondences. MCS matching needs bond information, so it is only
/// available for views, not for bare atom lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct McsMatcher {
    prematcher: Option<Box<AtomMatcher>>,
    timeout: Duration,
    match_light_atoms: bool,
}

impl Default for McsMatcher {
    fn default() -> Self {
        Self {
            prematcher: None,
            timeout: DEFAULT_MCS_TIMEOUT,
            match_light_atoms: false,
        }
    }
}

impl McsMatcher {
    pub const TYPE_NAME: &'static str = "atommatch::McsMatcher";

    /// A matcher with a one second timeout that ignores light atoms.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the search timeout, capped at [`MAX_MCS_TIMEOUT`].
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout.min(MAX_MCS_TIMEOUT);
        self
    }

    pub fn with_prematcher(mut self, prematcher: impl Into<AtomMatcher>) -> Self {
        self.prematcher = Some(Box::new(prematcher.into()));
        self
    }

    pub fn with_light_atoms(mut self, match_light_atoms: bool) -> Self {
        self.match_light_atoms = match_light_atoms;
        self
    }

    pub fn prematcher(&self) -> Option<&AtomMatcher> {
        self.prematcher.as_deref()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Whether light atoms (e.g. hydrogen) take part in the search.
    pub fn matching_light_atoms(&self) -> bool {
        self.match_light_atoms
    }

    /// The prematcher to seed the search with, if it carries any information.
    fn effective_prematcher(&self) -> Option<&AtomMatcher> {
        self.prematcher().filter(|m| !m.is_null())
    }

    fn validate(&self) -> Result<(), MatchError> {
        if self.timeout.is_zero() {
            return Err(MatchError::InvalidConfiguration(
                "MCS timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Matcher for McsMatcher {
    fn match_info(
        &self,
        _mol0: &MoleculeInfo,
        _mol1: &MoleculeInfo,
    ) -> Result<CorrespondenceMap, MatchError> {
        Err(MatchError::Unsupported {
            matcher: "McsMatcher",
            operation: "matching without bond information",
        })
    }

    fn match_views_with(
        &self,
        view0: &MoleculeView<'_>,
        view1: &MoleculeView<'_>,
        search: &dyn SubstructureSearch,
    ) -> Result<CorrespondenceMap, MatchError> {
        self.validate()?;

        let found = match self.effective_prematcher() {
            Some(prematcher) => {
                debug!(
                    "Running MCS search seeded by {} (timeout {:?}, light atoms: {}).",
                    prematcher, self.timeout, self.match_light_atoms
                );
                search.find_mcs_with_prematcher(
                    view0,
                    view1,
                    prematcher,
                    self.timeout,
                    self.match_light_atoms,
                )?
            }
            None => {
                debug!(
                    "Running unseeded MCS search (timeout {:?}, light atoms: {}).",
                    self.timeout, self.match_light_atoms
                );
                search.find_mcs(view0, view1, self.timeout, self.match_light_atoms)?
            }
        };

        let n_found = found.len();
        let map: CorrespondenceMap = found
            .into_iter()
            .filter(|&(idx0, idx1)| self.admits(view0, idx0) && self.admits(view1, idx1))
            .collect();

        if map.len() < n_found {
            warn!(
                "Substructure search returned {} pair(s) outside the selections or on excluded light atoms; they were dropped.",
                n_found - map.len()
            );
        }

        Ok(map)
    }
}

impl McsMatcher {
    /// Whether `idx` may appear in a result: it must be selected, and light
    /// atoms only count when they take part in the search.
    fn admits(&self, view: &MoleculeView<'_>, idx: AtomIdx) -> bool {
        if !view.selection().is_selected(idx) {
            return false;
        }
        self.match_light_atoms || !view.info().atom(idx).is_some_and(Atom::is_light)
    }
}

impl fmt::Display for McsMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.effective_prematcher() {
            None => write!(
                f,
                "McsMatcher( timeout = {} s, match_light_atoms = {} )",
                self.timeout.as_secs_f64(),
                self.match_light_atoms
            ),
            Some(prematcher) => write!(
                f,
                "McsMatcher( prematcher = {}, timeout = {} s, match_light_atoms = {} )",
                prematcher,
                self.timeout.as_secs_f64(),
                self.match_light_atoms
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::molecule::Molecule;
    use crate::matching::error::SearchError;
    use crate::matching::id_list::IdListMatcher;
    use crate::matching::index::IndexMatcher;
    use crate::matching::map::pairs;
    use crate::matching::name::NameMatcher;
    use std::cell::RefCell;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Plain {
            timeout: Duration,
            light: bool,
        },
        Seeded {
            prematcher: AtomMatcher,
            timeout: Duration,
            light: bool,
        },
    }

    /// Records how it was called and answers with a canned result.
    struct RecordingSearch {
        calls: RefCell<Vec<Call>>,
        result: Result<CorrespondenceMap, SearchError>,
    }

    impl RecordingSearch {
        fn returning(result: Result<CorrespondenceMap, SearchError>) -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                result,
            }
        }
    }

    impl SubstructureSearch for RecordingSearch {
        fn find_mcs(
            &self,
            _view0: &MoleculeView<'_>,
            _view1: &MoleculeView<'_>,
            timeout: Duration,
            match_light_atoms: bool,
        ) -> Result<CorrespondenceMap, SearchError> {
            self.calls.borrow_mut().push(Call::Plain {
                timeout,
                light: match_light_atoms,
            });
            self.result.clone()
        }

        fn find_mcs_with_prematcher(
            &self,
            _view0: &MoleculeView<'_>,
            _view1: &MoleculeView<'_>,
            prematcher: &AtomMatcher,
            timeout: Duration,
            match_light_atoms: bool,
        ) -> Result<CorrespondenceMap, SearchError> {
            self.calls.borrow_mut().push(Call::Seeded {
                prematcher: prematcher.clone(),
                timeout,
                light: match_light_atoms,
            });
            self.result.clone()
        }
    }

    fn benzene_like() -> Molecule {
        Molecule::from(MoleculeInfo::from_names(["C1", "C2", "C3", "H1"]))
    }

    #[test]
    fn default_settings() {
        let matcher = McsMatcher::new();
        assert_eq!(matcher.timeout(), Duration::from_secs(1));
        assert!(!matcher.matching_light_atoms());
        assert!(matcher.prematcher().is_none());
        assert!(!matcher.is_null());
    }

    #[test]
    fn unseeded_search_receives_settings_verbatim() {
        let mol = benzene_like();
        let search = RecordingSearch::returning(Ok(pairs(&[(0, 1), (1, 0)])));
        let matcher = McsMatcher::new()
            .with_timeout(Duration::from_millis(2500))
            .with_light_atoms(true);

        let map = matcher
            .match_views_with(&MoleculeView::full(&mol), &MoleculeView::full(&mol), &search)
            .unwrap();

        assert_eq!(map, pairs(&[(0, 1), (1, 0)]));
        assert_eq!(
            search.calls.into_inner(),
            vec![Call::Plain {
                timeout: Duration::from_millis(2500),
                light: true,
            }]
        );
    }

    #[test]
    fn prematcher_selects_the_seeded_search() {
        let mol = benzene_like();
        let search = RecordingSearch::returning(Ok(pairs(&[(2, 2)])));
        let matcher = McsMatcher::new().with_prematcher(NameMatcher);

        matcher
            .match_views_with(&MoleculeView::full(&mol), &MoleculeView::full(&mol), &search)
            .unwrap();

        assert_eq!(
            search.calls.into_inner(),
            vec![Call::Seeded {
                prematcher: NameMatcher.into(),
                timeout: DEFAULT_MCS_TIMEOUT,
                light: false,
            }]
        );
    }

    #[test]
    fn null_prematcher_is_ignored() {
        let mol = benzene_like();
        let search = RecordingSearch::returning(Ok(CorrespondenceMap::new()));
        let matcher = McsMatcher::new().with_prematcher(IdListMatcher::default());

        matcher
            .match_views_with(&MoleculeView::full(&mol), &MoleculeView::full(&mol), &search)
            .unwrap();

        let calls = search.calls.into_inner();
        assert!(matches!(calls.as_slice(), [Call::Plain { .. }]));
        assert!(!matcher.to_string().contains("prematcher"));
    }

    #[test]
    fn pairs_outside_the_selections_are_dropped() {
        let mol = benzene_like();
        let search = RecordingSearch::returning(Ok(pairs(&[(0, 0), (1, 3), (3, 1)])));
        let view0 = MoleculeView::with_selection(&mol, [AtomIdx(0), AtomIdx(1), AtomIdx(2)]);
        let view1 = MoleculeView::with_selection(&mol, [AtomIdx(0), AtomIdx(1), AtomIdx(2)]);

        let map = McsMatcher::new()
            .match_views_with(&view0, &view1, &search)
            .unwrap();
        assert_eq!(map, pairs(&[(0, 0)]));
    }

    #[test]
    fn light_atom_pairs_are_kept_only_when_requested() {
        let mol = benzene_like();
        let view = MoleculeView::full(&mol);
        let found = pairs(&[(0, 0), (3, 3), (2, 3)]);

        let search = RecordingSearch::returning(Ok(found.clone()));
        let heavy_only = McsMatcher::new()
            .match_views_with(&view, &view, &search)
            .unwrap();
        assert_eq!(heavy_only, pairs(&[(0, 0)]));

        let search = RecordingSearch::returning(Ok(found.clone()));
        let with_light = McsMatcher::new()
            .with_light_atoms(true)
            .match_views_with(&view, &view, &search)
            .unwrap();
        assert_eq!(with_light, found);
    }

    #[test]
    fn oversized_timeouts_are_capped() {
        let matcher = McsMatcher::new().with_timeout(Duration::MAX);
        assert_eq!(matcher.timeout(), MAX_MCS_TIMEOUT);
        assert_eq!(
            MAX_MCS_TIMEOUT.as_secs_f64(),
            MAX_MCS_TIMEOUT.as_secs() as f64
        );
    }

    #[test]
    fn search_failures_propagate() {
        let mol = benzene_like();
        let search = RecordingSearch::returning(Err(SearchError::TimedOut(DEFAULT_MCS_TIMEOUT)));

        let err = McsMatcher::new()
            .match_views_with(&MoleculeView::full(&mol), &MoleculeView::full(&mol), &search)
            .unwrap_err();
        assert_eq!(err, MatchError::Search(SearchError::TimedOut(DEFAULT_MCS_TIMEOUT)));
    }

    #[test]
    fn zero_timeout_is_rejected_before_searching() {
        let mol = benzene_like();
        let search = RecordingSearch::returning(Ok(CorrespondenceMap::new()));

        let err = McsMatcher::new()
            .with_timeout(Duration::ZERO)
            .match_views_with(&MoleculeView::full(&mol), &MoleculeView::full(&mol), &search)
            .unwrap_err();
        assert!(matches!(err, MatchError::InvalidConfiguration(_)));
        assert!(search.calls.into_inner().is_empty());
    }

    #[test]
    fn bare_atom_lists_are_unsupported() {
        let info = MoleculeInfo::from_names(["C1"]);
        assert!(matches!(
            McsMatcher::new().match_info(&info, &info),
            Err(MatchError::Unsupported { .. })
        ));
    }

    #[test]
    fn display_mentions_prematcher_and_settings() {
        let matcher = McsMatcher::new()
            .with_prematcher(IndexMatcher)
            .with_timeout(Duration::from_millis(500));
        assert_eq!(
            matcher.to_string(),
            "McsMatcher( prematcher = IndexMatcher(), timeout = 0.5 s, match_light_atoms = false )"
        );
    }
}

use super::error::{MatchError, Side};
use super::map::CorrespondenceMap;
use super::matcher::{AtomMatcher, Matcher};
use super::search::SubstructureSearch;
use crate::core::models::ids::AtomIdx;
use crate::core::models::info::MoleculeInfo;
use crate::core::models::view::MoleculeView;
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, error, trace};

/// Tries several matchers in order, each filling in atoms the earlier ones left
/// unmatched.
///
/// The child list is always flat: building a `MultiMatcher` out of other
/// `MultiMatcher`s splices their children in. Null children carry no
/// information and are dropped on construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultiMatcher {
    matchers: Vec<AtomMatcher>,
}

impl MultiMatcher {
    pub const TYPE_NAME: &'static str = "atommatch::MultiMatcher";

    pub fn new(matchers: impl IntoIterator<Item = AtomMatcher>) -> Self {
        let mut multi = Self::default();
        for matcher in matchers {
            multi.push(matcher);
        }
        multi
    }

    /// Wraps a single matcher, adopting its children if it is already a `MultiMatcher`.
    pub fn from_matcher(matcher: AtomMatcher) -> Self {
        Self::new([matcher])
    }

    /// Builds a matcher that tries `first`, then `second`.
    pub fn combine(first: AtomMatcher, second: AtomMatcher) -> Self {
        Self::new([first, second])
    }

    fn push(&mut self, matcher: AtomMatcher) {
        match matcher {
            AtomMatcher::Multi(multi) => self.matchers.extend(multi.matchers),
            other if other.is_null() => trace!("Dropping null matcher {}", other),
            other => self.matchers.push(other),
        }
    }

    pub fn matchers(&self) -> &[AtomMatcher] {
        &self.matchers
    }

    /// Runs the children in order and merges their results.
    ///
    /// A pair is kept only if neither its source nor its target was claimed by
    /// an earlier pair. The walk stops as soon as either side is fully matched.
    fn merge(
        &self,
        n_selected0: usize,
        n_selected1: usize,
        mut run: impl FnMut(&AtomMatcher) -> Result<CorrespondenceMap, MatchError>,
    ) -> Result<CorrespondenceMap, MatchError> {
        let mut map = CorrespondenceMap::new();
        let mut found1: HashSet<AtomIdx> = HashSet::new();

        for (i, matcher) in self.matchers.iter().enumerate() {
            let partial = run(matcher)?;
            let before = map.len();

            for (idx0, idx1) in partial {
                if !(map.contains_key(idx0) || found1.contains(&idx1)) {
                    map.insert(idx0, idx1);
                    found1.insert(idx1);
                }
            }

            debug!(
                "Matcher {} ({}) added {} pair(s).",
                i,
                matcher.type_name(),
                map.len() - before
            );

            if map.len() == n_selected0 || found1.len() == n_selected1 {
                debug!("Every selected atom of one molecule is matched, stopping early.");
                break;
            }

            check_bound(Side::First, map.len(), n_selected0)?;
            check_bound(Side::Second, found1.len(), n_selected1)?;
        }

        Ok(map)
    }
}

fn check_bound(side: Side, matched: usize, selected: usize) -> Result<(), MatchError> {
    if matched > selected {
        error!(
            "A sub-matcher broke injectivity: {} atoms of the {} molecule matched, {} selected.",
            matched, side, selected
        );
        return Err(MatchError::ExcessMatches {
            side,
            matched,
            selected,
        });
    }
    Ok(())
}

impl Matcher for MultiMatcher {
    fn match_info(
        &self,
        mol0: &MoleculeInfo,
        mol1: &MoleculeInfo,
    ) -> Result<CorrespondenceMap, MatchError> {
        match self.matchers.as_slice() {
            [] => Ok(CorrespondenceMap::new()),
            [only] => only.match_info(mol0, mol1),
            _ => self.merge(mol0.n_atoms(), mol1.n_atoms(), |m| m.match_info(mol0, mol1)),
        }
    }

    fn match_views_with(
        &self,
        view0: &MoleculeView<'_>,
        view1: &MoleculeView<'_>,
        search: &dyn SubstructureSearch,
    ) -> Result<CorrespondenceMap, MatchError> {
        match self.matchers.as_slice() {
            [] => Ok(CorrespondenceMap::new()),
            [only] => only.match_views_with(view0, view1, search),
            _ => self.merge(
                view0.selection().n_selected(),
                view1.selection().n_selected(),
                |m| m.match_views_with(view0, view1, search),
            ),
        }
    }

    fn is_null(&self) -> bool {
        self.matchers.is_empty()
    }
}

impl fmt::Display for MultiMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return write!(f, "MultiMatcher::null");
        }

        let parts: Vec<String> = self.matchers.iter().map(ToString::to_string).collect();
        write!(f, "MultiMatcher{{ {} }}", parts.join(" + "))
    }
}

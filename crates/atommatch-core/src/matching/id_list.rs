use super::error::{MatchError, MatcherBuildError};
use super::map::CorrespondenceMap;
use super::matcher::Matcher;
use super::search::SubstructureSearch;
use crate::core::models::identifier::AtomIdentifier;
use crate::core::models::ids::AtomIdx;
use crate::core::models::info::MoleculeInfo;
use crate::core::models::view::MoleculeView;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::str::FromStr;
use tracing::trace;

/// Matches atoms through an explicit, ordered list of identifier pairs.
///
/// Earlier pairs take priority: a pair is ignored if either of its atoms was
/// already claimed by a previous pair. Pairs whose identifiers cannot be
/// resolved are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdListMatcher {
    pairs: Vec<(AtomIdentifier, AtomIdentifier)>,
}

impl IdListMatcher {
    pub const TYPE_NAME: &'static str = "atommatch::IdListMatcher";

    /// Builds the matcher from identifier pairs, dropping pairs with a null side.
    pub fn from_identifier_pairs(
        pairs: impl IntoIterator<Item = (AtomIdentifier, AtomIdentifier)>,
    ) -> Self {
        Self {
            pairs: pairs
                .into_iter()
                .filter(|(id0, id1)| !(id0.is_null() || id1.is_null()))
                .collect(),
        }
    }

    /// Builds the matcher from pairs of atom names, dropping pairs with an empty name.
    pub fn from_name_pairs<S: AsRef<str>>(pairs: impl IntoIterator<Item = (S, S)>) -> Self {
        Self::from_identifier_pairs(pairs.into_iter().map(|(name0, name1)| {
            (
                AtomIdentifier::name(name0.as_ref()),
                AtomIdentifier::name(name1.as_ref()),
            )
        }))
    }

    /// Builds the matcher from pairs of atom indices.
    pub fn from_index_pairs(pairs: impl IntoIterator<Item = (usize, usize)>) -> Self {
        Self::from_identifier_pairs(
            pairs
                .into_iter()
                .map(|(idx0, idx1)| (AtomIdentifier::index(idx0), AtomIdentifier::index(idx1))),
        )
    }

    /// Builds the matcher from an identifier map.
    ///
    /// The map is walked in sorted key order so the pair list is deterministic.
    ///
    /// # Errors
    ///
    /// Returns [`MatcherBuildError::DuplicateTarget`] if two sources map to the same target.
    pub fn from_identifier_map(
        map: &HashMap<AtomIdentifier, AtomIdentifier>,
    ) -> Result<Self, MatcherBuildError> {
        let sorted: BTreeMap<_, _> = map.iter().collect();
        Self::from_unique_pairs(
            sorted
                .into_iter()
                .map(|(id0, id1)| (id0.clone(), id1.clone()))
                .collect(),
        )
    }

    /// Builds the matcher from a name-to-name map. See [`from_identifier_map`](Self::from_identifier_map).
    pub fn from_name_map(map: &HashMap<String, String>) -> Result<Self, MatcherBuildError> {
        let sorted: BTreeMap<_, _> = map.iter().collect();
        Self::from_unique_pairs(
            sorted
                .into_iter()
                .map(|(name0, name1)| (AtomIdentifier::name(name0), AtomIdentifier::name(name1)))
                .collect(),
        )
    }

    /// Builds the matcher from an index-to-index map. See [`from_identifier_map`](Self::from_identifier_map).
    pub fn from_index_map(map: &HashMap<usize, usize>) -> Result<Self, MatcherBuildError> {
        let sorted: BTreeMap<_, _> = map.iter().collect();
        Self::from_unique_pairs(
            sorted
                .into_iter()
                .map(|(&idx0, &idx1)| (AtomIdentifier::index(idx0), AtomIdentifier::index(idx1)))
                .collect(),
        )
    }

    /// Parses the compact `"a0:b0,a1:b1"` syntax.
    ///
    /// Pairs are comma separated and the two names of a pair colon separated,
    /// with surrounding whitespace trimmed. Entries that do not consist of
    /// exactly two names are dropped. A repeated source name replaces the
    /// earlier entry, so the text behaves like a name map.
    ///
    /// # Errors
    ///
    /// Returns [`MatcherBuildError::DuplicateTarget`] if two names map to the same name.
    pub fn from_compact(text: &str) -> Result<Self, MatcherBuildError> {
        let mut entries: Vec<(String, String)> = Vec::new();

        for word in text.split(',') {
            let atoms: Vec<&str> = word.split(':').collect();
            let [name0, name1] = atoms.as_slice() else {
                continue;
            };
            let (name0, name1) = (name0.trim(), name1.trim());

            match entries.iter_mut().find(|(existing, _)| existing == name0) {
                Some(entry) => entry.1 = name1.to_string(),
                None => entries.push((name0.to_string(), name1.to_string())),
            }
        }

        Self::from_unique_pairs(
            entries
                .into_iter()
                .map(|(name0, name1)| (AtomIdentifier::Name(name0), AtomIdentifier::Name(name1)))
                .collect(),
        )
    }

    fn from_unique_pairs(
        pairs: Vec<(AtomIdentifier, AtomIdentifier)>,
    ) -> Result<Self, MatcherBuildError> {
        let pairs: Vec<_> = pairs
            .into_iter()
            .filter(|(id0, id1)| !id0.is_null() && !id1.is_null())
            .collect();

        let mut seen_targets = HashSet::with_capacity(pairs.len());
        for (_, target) in &pairs {
            if !seen_targets.insert(target) {
                let sources = pairs
                    .iter()
                    .filter(|(_, other)| other == target)
                    .map(|(source, _)| source.clone())
                    .collect();
                return Err(MatcherBuildError::DuplicateTarget {
                    sources,
                    target: target.clone(),
                });
            }
        }

        Ok(Self { pairs })
    }

    pub fn pairs(&self) -> &[(AtomIdentifier, AtomIdentifier)] {
        &self.pairs
    }

    fn ensure_not_null(&self) -> Result<(), MatchError> {
        if self.pairs.is_empty() {
            Err(MatchError::NullMatcher(self.to_string()))
        } else {
            Ok(())
        }
    }

    /// First-match-wins walk over the pair list.
    fn collect_matches(
        &self,
        mol0: &MoleculeInfo,
        mol1: &MoleculeInfo,
        selected0: impl Fn(AtomIdx) -> bool,
        selected1: impl Fn(AtomIdx) -> bool,
        n_selected0: usize,
        n_selected1: usize,
    ) -> CorrespondenceMap {
        let mut map = CorrespondenceMap::new();
        let mut found1 = HashSet::new();

        for (id0, id1) in &self.pairs {
            if map.len() >= n_selected0 || found1.len() >= n_selected1 {
                trace!("Every selected atom is matched, skipping remaining pairs.");
                break;
            }

            let idx0 = match mol0.resolve(id0) {
                Ok(idx0) if selected0(idx0) && !map.contains_key(idx0) => idx0,
                Ok(_) => continue,
                Err(e) => {
                    trace!("Skipping pair {} <=> {}: {}", id0, id1, e);
                    continue;
                }
            };

            match mol1.resolve(id1) {
                Ok(idx1) if selected1(idx1) && !found1.contains(&idx1) => {
                    map.insert(idx0, idx1);
                    found1.insert(idx1);
                }
                Ok(_) => {}
                Err(e) => trace!("Skipping pair {} <=> {}: {}", id0, id1, e),
            }
        }

        map
    }
}

impl FromStr for IdListMatcher {
    type Err = MatcherBuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_compact(s)
    }
}

impl Matcher for IdListMatcher {
    fn match_info(
        &self,
        mol0: &MoleculeInfo,
        mol1: &MoleculeInfo,
    ) -> Result<CorrespondenceMap, MatchError> {
        self.ensure_not_null()?;
        Ok(self.collect_matches(
            mol0,
            mol1,
            |_| true,
            |_| true,
            mol0.n_atoms(),
            mol1.n_atoms(),
        ))
    }

    fn match_views_with(
        &self,
        view0: &MoleculeView<'_>,
        view1: &MoleculeView<'_>,
        _search: &dyn SubstructureSearch,
    ) -> Result<CorrespondenceMap, MatchError> {
        self.ensure_not_null()?;
        let sel0 = view0.selection();
        let sel1 = view1.selection();
        Ok(self.collect_matches(
            view0.info(),
            view1.info(),
            |idx| sel0.is_selected(idx),
            |idx| sel1.is_selected(idx),
            sel0.n_selected(),
            sel1.n_selected(),
        ))
    }

    fn is_null(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl fmt::Display for IdListMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return write!(f, "IdListMatcher::null");
        }

        let matches: Vec<String> = self
            .pairs
            .iter()
            .map(|(id0, id1)| format!("{} <=> {}", id0, id1))
            .collect();
        write!(f, "IdListMatcher( {} )", matches.join(", "))
    }
}

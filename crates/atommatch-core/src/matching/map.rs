use crate::core::models::ids::AtomIdx;
use std::collections::hash_map;
use std::collections::{HashMap, HashSet};

/// A partial mapping from atoms of molecule 0 to atoms of molecule 1.
///
/// Every matcher returns one of these. Keys are unique by construction; the
/// matchers themselves guarantee that values are unique too. The map is never
/// required to be total, and iteration order carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorrespondenceMap {
    pairs: HashMap<AtomIdx, AtomIdx>,
}

impl CorrespondenceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            pairs: HashMap::with_capacity(capacity),
        }
    }

    /// Inserts a pair, returning the previous partner of `from` if there was one.
    pub fn insert(&mut self, from: AtomIdx, to: AtomIdx) -> Option<AtomIdx> {
        self.pairs.insert(from, to)
    }

    pub fn get(&self, from: AtomIdx) -> Option<AtomIdx> {
        self.pairs.get(&from).copied()
    }

    pub fn contains_key(&self, from: AtomIdx) -> bool {
        self.pairs.contains_key(&from)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (AtomIdx, AtomIdx)> + '_ {
        self.pairs.iter().map(|(&k, &v)| (k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = AtomIdx> + '_ {
        self.pairs.keys().copied()
    }

    pub fn values(&self) -> impl Iterator<Item = AtomIdx> + '_ {
        self.pairs.values().copied()
    }

    /// Returns the pairs sorted by source atom, for stable display.
    pub fn sorted_pairs(&self) -> Vec<(AtomIdx, AtomIdx)> {
        let mut pairs: Vec<_> = self.iter().collect();
        pairs.sort_unstable();
        pairs
    }

    /// Returns `true` if no two source atoms share a target atom.
    pub fn is_injective(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.pairs.len());
        self.pairs.values().all(|to| seen.insert(*to))
    }

    pub fn into_inner(self) -> HashMap<AtomIdx, AtomIdx> {
        self.pairs
    }
}

impl From<HashMap<AtomIdx, AtomIdx>> for CorrespondenceMap {
    fn from(pairs: HashMap<AtomIdx, AtomIdx>) -> Self {
        Self { pairs }
    }
}

impl FromIterator<(AtomIdx, AtomIdx)> for CorrespondenceMap {
    fn from_iter<I: IntoIterator<Item = (AtomIdx, AtomIdx)>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for CorrespondenceMap {
    type Item = (AtomIdx, AtomIdx);
    type IntoIter = hash_map::IntoIter<AtomIdx, AtomIdx>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.into_iter()
    }
}

#[cfg(test)]
pub(crate) fn pairs(items: &[(usize, usize)]) -> CorrespondenceMap {
    items
        .iter()
        .map(|&(from, to)| (AtomIdx(from), AtomIdx(to)))
        .collect()
}

use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of an atom in the ordered atom list of its molecule.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct AtomIdx(pub usize);

impl AtomIdx {
    pub fn value(self) -> usize {
        self.0
    }
}

impl From<usize> for AtomIdx {
    fn from(value: usize) -> Self {
        Self(value)
    }
}

impl fmt::Display for AtomIdx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

use super::ids::AtomIdx;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Identifies a single atom by one of its identity attributes.
///
/// An identifier is resolved against a [`MoleculeInfo`](super::info::MoleculeInfo)
/// to a concrete [`AtomIdx`]. Resolution either yields exactly one atom or
/// fails; an identifier that matches several atoms is treated as a failure.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AtomIdentifier {
    /// Position of the atom in the molecule's atom list.
    Index(AtomIdx),
    /// Name of the atom.
    Name(String),
    /// Serial number of the atom.
    Number(i64),
}

impl AtomIdentifier {
    pub fn index(idx: usize) -> Self {
        Self::Index(AtomIdx(idx))
    }

    pub fn name(name: &str) -> Self {
        Self::Name(name.to_string())
    }

    pub fn number(number: i64) -> Self {
        Self::Number(number)
    }

    /// Returns `true` if this identifier carries no identifying information.
    ///
    /// Only blank names are null; every index and number identifies something,
    /// even if it is out of range for a given molecule.
    pub fn is_null(&self) -> bool {
        match self {
            Self::Name(name) => name.trim().is_empty(),
            Self::Index(_) | Self::Number(_) => false,
        }
    }
}

impl From<AtomIdx> for AtomIdentifier {
    fn from(idx: AtomIdx) -> Self {
        Self::Index(idx)
    }
}

impl fmt::Display for AtomIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(idx) => write!(f, "AtomIdx({})", idx),
            Self::Name(name) => write!(f, "AtomName('{}')", name),
            Self::Number(number) => write!(f, "AtomNum({})", number),
        }
    }
}

/// Reasons an [`AtomIdentifier`] could not be resolved to a single atom.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("Cannot resolve a null atom identifier")]
    Null,

    #[error("No atom matches {0}")]
    NotFound(AtomIdentifier),

    #[error("{identifier} matches {count} atoms, expected exactly one")]
    Ambiguous {
        identifier: AtomIdentifier,
        count: usize,
    },

    #[error("Atom index {index} is out of range for a molecule with {n_atoms} atoms")]
    OutOfRange { index: AtomIdx, n_atoms: usize },
}

use super::ids::AtomIdx;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Bond multiplicity as written in topology files. Matching ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BondOrder {
    #[default]
    Single,
    Double,
    Triple,
    Aromatic,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown bond order '{0}' (expected single, double, triple, aromatic or one of - = # :)")]
pub struct ParseBondOrderError(pub String);

impl FromStr for BondOrder {
    type Err = ParseBondOrderError;

    /// Accepts the word, its digit, or the SMILES bond symbol.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" | "1" | "-" => Ok(Self::Single),
            "double" | "2" | "=" => Ok(Self::Double),
            "triple" | "3" | "#" => Ok(Self::Triple),
            "aromatic" | "ar" | ":" => Ok(Self::Aromatic),
            _ => Err(ParseBondOrderError(s.to_string())),
        }
    }
}

impl fmt::Display for BondOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Single => "single",
            Self::Double => "double",
            Self::Triple => "triple",
            Self::Aromatic => "aromatic",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bond {
    pub atom1: AtomIdx,
    pub atom2: AtomIdx,
    pub order: BondOrder,
}

impl Bond {
    pub fn new(atom1: AtomIdx, atom2: AtomIdx, order: BondOrder) -> Self {
        Self {
            atom1,
            atom2,
            order,
        }
    }
}

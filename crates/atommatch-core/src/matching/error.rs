use crate::core::models::identifier::AtomIdentifier;
use std::time::Duration;
use thiserror::Error;

/// Failures reported by a [`SubstructureSearch`](super::search::SubstructureSearch).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("No common substructure satisfies the structural constraints")]
    NoCommonSubstructure,

    #[error("Substructure search timed out after {0:?}")]
    TimedOut(Duration),

    #[error("No substructure search is available")]
    Unavailable,

    #[error("Substructure search failed: {0}")]
    Failed(String),
}

/// Which molecule of a match call a count refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    First,
    Second,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::First => write!(f, "first"),
            Self::Second => write!(f, "second"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("Cannot match with a null matcher: {0}")]
    NullMatcher(String),

    #[error("{matcher} does not support {operation}")]
    Unsupported {
        matcher: &'static str,
        operation: &'static str,
    },

    #[error("Invalid matcher configuration: {0}")]
    InvalidConfiguration(String),

    #[error(transparent)]
    Search(#[from] SearchError),

    #[error(
        "Internal logic error: {matched} atoms of the {side} molecule matched, but only {selected} are selected"
    )]
    ExcessMatches {
        side: Side,
        matched: usize,
        selected: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatcherBuildError {
    #[error(
        "Trying to match multiple atoms ({}) to the same atom ({target}). Please ensure the mapping is one-to-one.",
        format_sources(.sources)
    )]
    DuplicateTarget {
        sources: Vec<AtomIdentifier>,
        target: AtomIdentifier,
    },
}

fn format_sources(sources: &[AtomIdentifier]) -> String {
    sources
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_target_message_lists_all_sources() {
        let err = MatcherBuildError::DuplicateTarget {
            sources: vec![AtomIdentifier::name("C1"), AtomIdentifier::name("C2")],
            target: AtomIdentifier::name("CA"),
        };
        let message = err.to_string();
        assert!(message.contains("AtomName('C1'), AtomName('C2')"));
        assert!(message.contains("AtomName('CA')"));
    }

    #[test]
    fn search_errors_convert_into_match_errors() {
        let err: MatchError = SearchError::TimedOut(Duration::from_secs(2)).into();
        assert_eq!(err, MatchError::Search(SearchError::TimedOut(Duration::from_secs(2))));
        assert!(err.to_string().contains("timed out"));
    }

    #[test]
    fn excess_matches_reports_side_and_counts() {
        let err = MatchError::ExcessMatches {
            side: Side::Second,
            matched: 4,
            selected: 3,
        };
        assert!(err.to_string().contains("4 atoms of the second molecule"));
    }
}

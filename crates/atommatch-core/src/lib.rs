//! # atommatch
//!
//! Atom-correspondence matching between two molecular topologies.
//!
//! Given two molecules, a matcher produces a map from atom indices of the
//! first molecule to atom indices of the second. Several strategies are
//! provided and can be chained so later ones fill in what earlier ones left
//! unmatched.
//!
//! ## Architectural Philosophy
//!
//! - **[`core`]: The Foundation.** Stateless data models (`MoleculeInfo`,
//!   `Molecule`, `MoleculeView`) plus TOML configuration and the binary codec
//!   for matcher settings.
//!
//! - **[`matching`]: The Strategies.** The [`Matcher`](matching::matcher::Matcher)
//!   capability, the closed [`AtomMatcher`](matching::matcher::AtomMatcher) family
//!   (index, name, identifier list, MCS and multi matchers), the resulting
//!   [`CorrespondenceMap`](matching::map::CorrespondenceMap), and the
//!   [`SubstructureSearch`](matching::search::SubstructureSearch) seam through which
//!   a maximum-common-substructure engine is plugged in.
//!
//! ## Example
//!
//! ```ignore
//! use atommatch::core::models::info::MoleculeInfo;
//! use atommatch::matching::matcher::{AtomMatcher, Matcher};
//! use atommatch::matching::{index::IndexMatcher, name::NameMatcher};
//!
//! let mol0 = MoleculeInfo::from_names(["N", "CA", "C"]);
//! let mol1 = MoleculeInfo::from_names(["CA", "N", "O"]);
//!
//! let matcher = AtomMatcher::from(NameMatcher) + IndexMatcher.into();
//! let map = matcher.match_info(&mol0, &mol1)?;
//! ```

pub mod core;
pub mod matching;

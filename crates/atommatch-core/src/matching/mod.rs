//! # Matching Module
//!
//! The atom-correspondence strategies and the types they share.
//!
//! Every strategy implements [`Matcher`](matcher::Matcher) and is wrapped by the
//! closed [`AtomMatcher`](matcher::AtomMatcher) enum, which is what callers hold
//! and what the codec persists. A match returns a
//! [`CorrespondenceMap`](map::CorrespondenceMap): a partial, injective mapping
//! from atom indices of the first molecule to atom indices of the second.
//!
//! ## Strategies
//!
//! - [`index`] - atom `i` to atom `i`; the only order-preserving strategy
//! - [`name`] - atoms with the same name
//! - [`id_list`] - an explicit, prioritised list of identifier pairs
//! - [`mcs`] - maximum common substructure, delegated to a [`search::SubstructureSearch`]
//! - [`multi`] - ordered fallback over several strategies
//!
//! ## Usage
//!
//! ```ignore
//! use atommatch::matching::{matcher::{AtomMatcher, Matcher}, name::NameMatcher, index::IndexMatcher};
//!
//! let matcher = AtomMatcher::from(NameMatcher) + IndexMatcher.into();
//! let map = matcher.match_info(mol0.info(), mol1.info())?;
//! ```

pub mod error;
pub mod id_list;
pub mod index;
pub mod map;
pub mod matcher;
pub mod mcs;
pub mod multi;
pub mod name;
pub mod search;

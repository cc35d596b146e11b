//! # Core Module
//!
//! The data the matchers work on and the ways matcher settings are stored.
//!
//! ## Architecture
//!
//! - **Molecular Representation** ([`models`]) - Atoms, identifiers, bond graphs, selections and views
//! - **Binary I/O** ([`io`]) - Versioned binary encoding of matcher configurations
//! - **Configuration** ([`config`]) - TOML descriptions of matchers and their loading
//!
//! Nothing in this module performs matching itself; see [`crate::matching`].

pub mod config;
pub mod io;
pub mod models;

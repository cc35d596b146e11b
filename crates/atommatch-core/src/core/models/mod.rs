//! # Core Models Module
//!
//! Data structures describing the molecules a matcher works on.
//!
//! ## Key Components
//!
//! - [`ids`] - The [`AtomIdx`](ids::AtomIdx) position type used as key and value of every correspondence
//! - [`atom`] - Identity attributes of a single atom (name, serial number, element)
//! - [`identifier`] - [`AtomIdentifier`](identifier::AtomIdentifier), a tagged way to point at one atom
//! - [`info`] - The ordered atom list of a molecule with name and number lookup
//! - [`topology`] - Bonds and bond orders
//! - [`molecule`] - Atom identities plus the bond graph
//! - [`selection`] - Selection masks over a molecule's atoms
//! - [`property`] - Property-name overrides handed to structural searches
//! - [`view`] - A molecule seen through a selection and a property map
//!
//! ## Usage
//!
//! ```ignore
//! use atommatch::core::models::{info::MoleculeInfo, molecule::Molecule, view::MoleculeView};
//!
//! let mol = Molecule::from(MoleculeInfo::from_names(["C1", "C2", "O"]));
//! let view = MoleculeView::full(&mol);
//! assert_eq!(view.selection().n_selected(), 3);
//! ```

pub mod atom;
pub mod identifier;
pub mod ids;
pub mod info;
pub mod molecule;
pub mod property;
pub mod selection;
pub mod topology;
pub mod view;

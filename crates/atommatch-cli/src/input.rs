use crate::error::{CliError, Result};
use anyhow::{Context, anyhow};
use atommatch::core::models::atom::Atom;
use atommatch::core::models::ids::AtomIdx;
use atommatch::core::models::info::MoleculeInfo;
use atommatch::core::models::molecule::Molecule;
use atommatch::core::models::topology::BondOrder;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, trace};

/// A molecule as described in a topology file.
///
/// ```toml
/// bonds = [[0, 1], { atoms = [1, 2], order = "=" }]
///
/// [[atoms]]
/// name = "C1"
/// element = "C"
///
/// [[atoms]]
/// name = "C2"
/// number = 2
/// ```
#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct TopologyFile {
    #[serde(default)]
    bonds: Vec<BondEntry>,
    atoms: Vec<Atom>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BondEntry {
    Pair(usize, usize),
    Detailed {
        atoms: (usize, usize),
        /// A word, digit or bond symbol; see [`BondOrder`]'s `FromStr`.
        #[serde(default)]
        order: Option<String>,
    },
}

impl BondEntry {
    fn parts(&self) -> anyhow::Result<(usize, usize, BondOrder)> {
        match self {
            Self::Pair(a, b) => Ok((*a, *b, BondOrder::default())),
            Self::Detailed {
                atoms: (a, b),
                order,
            } => {
                let order = order
                    .as_deref()
                    .map(str::parse::<BondOrder>)
                    .transpose()?
                    .unwrap_or_default();
                Ok((*a, *b, order))
            }
        }
    }
}

pub fn load_molecule(path: &Path) -> Result<Molecule> {
    let content = std::fs::read_to_string(path)?;
    parse_molecule(&content).map_err(|source| CliError::FileParsing {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_molecule(content: &str) -> anyhow::Result<Molecule> {
    let file: TopologyFile = toml::from_str(content).context("invalid topology TOML")?;
    let mut molecule = Molecule::from_info(MoleculeInfo::from_atoms(file.atoms));

    for (i, entry) in file.bonds.iter().enumerate() {
        let (a, b, order) = entry
            .parts()
            .with_context(|| format!("bond {} has an invalid order", i))?;
        molecule
            .add_bond(AtomIdx(a), AtomIdx(b), order)
            .ok_or_else(|| {
                anyhow!(
                    "bond {} ({}-{}) must join two different atoms out of {}",
                    i,
                    a,
                    b,
                    molecule.n_atoms()
                )
            })?;
        trace!("Bond {}: {}-{} ({}).", i, a, b, order);
    }

    debug!(
        "Loaded topology with {} atoms and {} bonds.",
        molecule.n_atoms(),
        molecule.bonds().len()
    );
    Ok(molecule)
}

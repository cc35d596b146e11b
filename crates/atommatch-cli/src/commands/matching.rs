use crate::cli::{MatchArgs, MatcherSource, OutputFormat, Strategy};
use crate::error::{CliError, Result};
use crate::input::load_molecule;
use atommatch::core::config::MatcherConfig;
use atommatch::core::models::ids::AtomIdx;
use atommatch::core::models::molecule::Molecule;
use atommatch::core::models::view::MoleculeView;
use atommatch::matching::id_list::IdListMatcher;
use atommatch::matching::index::IndexMatcher;
use atommatch::matching::map::CorrespondenceMap;
use atommatch::matching::matcher::AtomMatcher;
use atommatch::matching::name::NameMatcher;
use serde::Serialize;
use std::io::Write;
use tracing::info;

#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
struct MatchReport {
    matcher: String,
    matched: usize,
    pairs: Vec<PairRecord>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
struct PairRecord {
    first: usize,
    second: usize,
    first_name: String,
    second_name: String,
}

pub fn run(args: MatchArgs, out: &mut impl Write) -> Result<()> {
    let mol0 = load_molecule(&args.first)?;
    let mol1 = load_molecule(&args.second)?;
    let matcher = build_matcher(&args.matcher)?;
    info!("Matching with {}.", matcher);

    let view0 = make_view(&mol0, args.select0.as_deref(), "--select0")?;
    let view1 = make_view(&mol1, args.select1.as_deref(), "--select1")?;

    let map = matcher.match_views(&view0, &view1)?;
    info!("Matched {} atom pair(s).", map.len());

    let report = build_report(&matcher, &mol0, &mol1, &map);
    match args.format {
        OutputFormat::Text => write_text(out, &report)?,
        OutputFormat::Toml => {
            write!(out, "{}", toml::to_string(&report)?)?;
        }
    }
    Ok(())
}

fn build_matcher(source: &MatcherSource) -> Result<AtomMatcher> {
    if let Some(path) = &source.config {
        return Ok(MatcherConfig::load(path)?.into_matcher()?);
    }
    if let Some(names) = &source.names {
        return Ok(IdListMatcher::from_compact(names)?.into());
    }
    Ok(match source.strategy.unwrap_or(Strategy::Name) {
        Strategy::Index => IndexMatcher.into(),
        Strategy::Name => NameMatcher.into(),
    })
}

fn make_view<'a>(
    molecule: &'a Molecule,
    selection: Option<&[usize]>,
    flag: &str,
) -> Result<MoleculeView<'a>> {
    let Some(indices) = selection else {
        return Ok(MoleculeView::full(molecule));
    };

    if let Some(&bad) = indices.iter().find(|&&i| i >= molecule.n_atoms()) {
        return Err(CliError::Argument(format!(
            "{} index {} is out of range for a molecule with {} atoms",
            flag,
            bad,
            molecule.n_atoms()
        )));
    }
    Ok(MoleculeView::with_selection(
        molecule,
        indices.iter().map(|&i| AtomIdx(i)),
    ))
}

fn build_report(
    matcher: &AtomMatcher,
    mol0: &Molecule,
    mol1: &Molecule,
    map: &CorrespondenceMap,
) -> MatchReport {
    let name_of = |mol: &Molecule, idx: AtomIdx| mol.info().name(idx).unwrap_or("?").to_string();
    let pairs = map
        .sorted_pairs()
        .into_iter()
        .map(|(idx0, idx1)| PairRecord {
            first: idx0.value(),
            second: idx1.value(),
            first_name: name_of(mol0, idx0),
            second_name: name_of(mol1, idx1),
        })
        .collect();

    MatchReport {
        matcher: matcher.to_string(),
        matched: map.len(),
        pairs,
    }
}

fn write_text(out: &mut impl Write, report: &MatchReport) -> Result<()> {
    writeln!(out, "# matcher: {}", report.matcher)?;
    writeln!(out, "# {} atom pair(s)", report.matched)?;
    for pair in &report.pairs {
        writeln!(
            out,
            "{:>5} {:<4} -> {:>5} {}",
            pair.first, pair.first_name, pair.second, pair.second_name
        )?;
    }
    Ok(())
}

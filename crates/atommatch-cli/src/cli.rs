use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "atommatch - find atom correspondences between two molecular topologies.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Match the atoms of two topology files and print the correspondence.
    Match(MatchArgs),
    /// Write a matcher configuration in its binary form.
    Encode(EncodeArgs),
    /// Decode a binary matcher file and describe it.
    Inspect(InspectArgs),
}

/// Arguments for the `match` subcommand.
#[derive(Args, Debug)]
pub struct MatchArgs {
    /// Topology file (TOML) of the first molecule.
    #[arg(long, required = true, value_name = "PATH")]
    pub first: PathBuf,

    /// Topology file (TOML) of the second molecule.
    #[arg(long, required = true, value_name = "PATH")]
    pub second: PathBuf,

    #[command(flatten)]
    pub matcher: MatcherSource,

    /// Restrict matching to these atom indices of the first molecule.
    #[arg(long, value_name = "IDX,...", value_delimiter = ',')]
    pub select0: Option<Vec<usize>>,

    /// Restrict matching to these atom indices of the second molecule.
    #[arg(long, value_name = "IDX,...", value_delimiter = ',')]
    pub select1: Option<Vec<usize>>,

    /// Output format of the correspondence.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Where the matcher comes from. Without any of these, atoms are matched by name.
#[derive(Args, Debug, Clone)]
#[group(required = false, multiple = false)]
pub struct MatcherSource {
    /// Matcher configuration file (TOML).
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Explicit name pairs, e.g. "C1:CA, C2:CB".
    #[arg(long, value_name = "PAIRS")]
    pub names: Option<String>,

    /// A built-in strategy.
    #[arg(long, value_enum)]
    pub strategy: Option<Strategy>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Atom i matches atom i.
    Index,
    /// Atoms with the same name match.
    Name,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Toml,
}

/// Arguments for the `encode` subcommand.
#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Matcher configuration file (TOML).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub config: PathBuf,

    /// Path of the binary file to write.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,
}

/// Arguments for the `inspect` subcommand.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Binary matcher file written by `encode`.
    #[arg(required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// `text` prints the matcher description, `toml` an equivalent configuration file.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

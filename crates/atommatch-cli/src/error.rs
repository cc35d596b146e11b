use atommatch::core::config::ConfigError;
use atommatch::core::io::stream::CodecError;
use atommatch::matching::error::{MatchError, MatcherBuildError};
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Match(#[from] MatchError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid atom list: {0}")]
    Build(#[from] MatcherBuildError),

    #[error("Failed to decode matcher file '{path}': {source}", path = path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: CodecError,
    },

    #[error("Failed to encode {matcher}: {source}")]
    Encode {
        matcher: String,
        #[source]
        source: CodecError,
    },

    #[error("Failed to parse file '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to format output: {0}")]
    Output(#[from] toml::ser::Error),

    #[error("Failed to install the log subscriber: {0}")]
    Logging(#[from] tracing_subscriber::util::TryInitError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    Argument(String),
}

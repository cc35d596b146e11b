use crate::core::models::identifier::AtomIdentifier;
use crate::matching::error::MatcherBuildError;
use crate::matching::id_list::IdListMatcher;
use crate::matching::index::IndexMatcher;
use crate::matching::matcher::AtomMatcher;
use crate::matching::mcs::{DEFAULT_MCS_TIMEOUT, McsMatcher};
use crate::matching::multi::MultiMatcher;
use crate::matching::name::NameMatcher;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error in {origin}: {source}")]
    Toml {
        origin: String,
        source: toml::de::Error,
    },
    #[error("TOML serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error(transparent)]
    Build(#[from] MatcherBuildError),
    #[error("Invalid matcher configuration: {0}")]
    Invalid(String),
}

/// A matcher description as written in a TOML file.
///
/// ```toml
/// [matcher]
/// type = "multi"
///
/// [[matcher.matchers]]
/// type = "id-list"
/// names = "C1:CA, C2:CB"
///
/// [[matcher.matchers]]
/// type = "mcs"
/// timeout-secs = 5.0
/// prematcher = { type = "name" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct MatcherConfig {
    pub matcher: MatcherSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", deny_unknown_fields)]
pub enum MatcherSpec {
    Index,
    Name,
    /// At most one of the four forms may be given. None at all is a null matcher.
    #[serde(rename_all = "kebab-case")]
    IdList {
        /// Compact `"a0:b0, a1:b1"` name pairs.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        names: Option<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        pairs: Vec<(String, String)>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        indices: Vec<(usize, usize)>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        identifiers: Vec<(AtomIdentifier, AtomIdentifier)>,
    },
    #[serde(rename_all = "kebab-case")]
    Mcs {
        #[serde(default = "default_timeout_secs")]
        timeout_secs: f64,
        #[serde(default)]
        match_light_atoms: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        prematcher: Option<Box<MatcherSpec>>,
    },
    Multi {
        #[serde(default)]
        matchers: Vec<MatcherSpec>,
    },
}

fn default_timeout_secs() -> f64 {
    DEFAULT_MCS_TIMEOUT.as_secs_f64()
}

impl MatcherConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::Toml {
            origin: format!("'{}'", path.to_string_lossy()),
            source: e,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Toml {
            origin: "inline configuration".to_string(),
            source: e,
        })
    }

    pub fn from_matcher(matcher: &AtomMatcher) -> Self {
        Self {
            matcher: MatcherSpec::from(matcher),
        }
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    pub fn into_matcher(self) -> Result<AtomMatcher, ConfigError> {
        self.matcher.build()
    }
}

impl MatcherSpec {
    /// Builds the matcher this description stands for.
    pub fn build(&self) -> Result<AtomMatcher, ConfigError> {
        let matcher: AtomMatcher = match self {
            Self::Index => IndexMatcher.into(),
            Self::Name => NameMatcher.into(),
            Self::IdList {
                names,
                pairs,
                indices,
                identifiers,
            } => {
                let forms = usize::from(names.is_some())
                    + usize::from(!pairs.is_empty())
                    + usize::from(!indices.is_empty())
                    + usize::from(!identifiers.is_empty());
                if forms > 1 {
                    return Err(ConfigError::Invalid(
                        "an id-list takes only one of 'names', 'pairs', 'indices' or 'identifiers'"
                            .to_string(),
                    ));
                }

                let id_list = if let Some(names) = names {
                    IdListMatcher::from_compact(names)?
                } else if !pairs.is_empty() {
                    IdListMatcher::from_name_pairs(pairs.iter().map(|(a, b)| (a, b)))
                } else if !indices.is_empty() {
                    IdListMatcher::from_index_pairs(indices.iter().copied())
                } else {
                    IdListMatcher::from_identifier_pairs(identifiers.iter().cloned())
                };
                id_list.into()
            }
            Self::Mcs {
                timeout_secs,
                match_light_atoms,
                prematcher,
            } => {
                let timeout = Duration::try_from_secs_f64(*timeout_secs)
                    .ok()
                    .filter(|t| !t.is_zero())
                    .ok_or_else(|| {
                        ConfigError::Invalid(format!(
                            "MCS timeout must be a positive number of seconds, got {}",
                            timeout_secs
                        ))
                    })?;

                let mut matcher = McsMatcher::new()
                    .with_timeout(timeout)
                    .with_light_atoms(*match_light_atoms);
                if let Some(prematcher) = prematcher {
                    matcher = matcher.with_prematcher(prematcher.build()?);
                }
                matcher.into()
            }
            Self::Multi { matchers } => MultiMatcher::new(
                matchers
                    .iter()
                    .map(MatcherSpec::build)
                    .collect::<Result<Vec<_>, _>>()?,
            )
            .into(),
        };

        debug!("Built {} from configuration.", matcher);
        Ok(matcher)
    }
}

impl From<&AtomMatcher> for MatcherSpec {
    fn from(matcher: &AtomMatcher) -> Self {
        match matcher {
            AtomMatcher::Index(_) => Self::Index,
            AtomMatcher::Name(_) => Self::Name,
            AtomMatcher::IdList(m) => Self::IdList {
                names: None,
                pairs: Vec::new(),
                indices: Vec::new(),
                identifiers: m.pairs().to_vec(),
            },
            AtomMatcher::Mcs(m) => Self::Mcs {
                timeout_secs: m.timeout().as_secs_f64(),
                match_light_atoms: m.matching_light_atoms(),
                prematcher: m.prematcher().map(|p| Box::new(Self::from(p))),
            },
            AtomMatcher::Multi(m) => Self::Multi {
                matchers: m.matchers().iter().map(Self::from).collect(),
            },
        }
    }
}

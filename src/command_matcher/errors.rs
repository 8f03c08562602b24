//! Error types for the command matcher

use thiserror::Error;

/// Failures raised while configuring a matcher
///
/// Lookups never fail; an unknown alias is reported as `None`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MatcherError {
    #[error("separator must not be empty")]
    EmptySeparator,

    #[error("invalid matcher configuration: {0}")]
    Config(String),
}

impl From<toml::de::Error> for MatcherError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

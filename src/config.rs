//! 匹配器配置
//!
//! 从 TOML 文件加载分隔符等配置

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::command_matcher::MatcherError;

/// Separator used when none is configured
pub const DEFAULT_SEPARATOR: &str = " ";

/// Matcher configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Token separator for `match_text`
    pub separator: String,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }
}

impl MatcherConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, MatcherError> {
        let config: MatcherConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read matcher config: {:?}", path))?;

        let config = Self::from_toml_str(&content)
            .with_context(|| format!("failed to parse matcher config: {:?}", path))?;

        log::info!("[MatcherConfig] loaded from {:?}", path);
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), MatcherError> {
        if self.separator.is_empty() {
            return Err(MatcherError::EmptySeparator);
        }
        Ok(())
    }
}

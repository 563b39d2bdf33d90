use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::display::MatchPolicy;

/// Environment variable naming a config file when `--config` is not given.
pub const CONFIG_ENV: &str = "EXACT_REFRESH_CONFIG";

/// Settings that may be kept in a JSON file instead of repeated on every call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolConfig {
    pub match_policy: MatchPolicy,
    pub list_format: ListFormat,
}

/// Output of the `list` command
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListFormat {
    #[default]
    Text,
    Json,
}

impl ToolConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("parsing config")
    }

    pub fn load_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;

        Self::from_json(&text).with_context(|| format!("in config file {}", path.display()))
    }

    /// Load from `explicit`, else from `$EXACT_REFRESH_CONFIG`, else defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));

        match path {
            Some(path) => {
                log::debug!("Loading config from {}", path.display());
                Self::load_file(&path)
            }
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(ToolConfig::from_json("{}").unwrap(), ToolConfig::default());
    }

    #[test]
    fn test_parse_values() {
        let config =
            ToolConfig::from_json(r#"{ "match_policy": "unique", "list_format": "json" }"#)
                .unwrap();
        assert_eq!(config.match_policy, MatchPolicy::Unique);
        assert_eq!(config.list_format, ListFormat::Json);
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        assert!(ToolConfig::from_json(r#"{ "refresh": 60 }"#).is_err());
        assert!(ToolConfig::from_json(r#"{ "match_policy": "best" }"#).is_err());
    }

    #[test]
    fn test_missing_file_names_the_path() {
        let err = ToolConfig::load_file(Path::new("/nonexistent/exact-refresh.json")).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/exact-refresh.json"));
    }
}

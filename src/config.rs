//! Run configuration read from `vpsdb-check.yaml`.
//!
//! Every key is optional; missing keys fall back to the built-in defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::catalog::{OutputFormat, DEFAULT_DATABASE_PATH};
use crate::rules::{RuleId, RuleSettings};

pub const DEFAULT_CONFIG_PATH: &str = "vpsdb-check.yaml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CheckConfig {
    pub database: PathBuf,
    pub exempt_authors: Vec<String>,
    pub redundant_feature_tags: Vec<String>,
    pub rules: Vec<RuleId>,
    pub pretty: bool,
}

impl Default for CheckConfig {
    fn default() -> Self {
        let settings = RuleSettings::default();
        Self {
            database: PathBuf::from(DEFAULT_DATABASE_PATH),
            exempt_authors: settings.exempt_authors,
            redundant_feature_tags: settings.redundant_feature_tags,
            rules: RuleId::ALL.to_vec(),
            pretty: true,
        }
    }
}

impl CheckConfig {
    pub fn rule_settings(&self) -> RuleSettings {
        RuleSettings {
            exempt_authors: self.exempt_authors.clone(),
            redundant_feature_tags: self.redundant_feature_tags.clone(),
        }
    }

    pub fn output_format(&self) -> OutputFormat {
        if self.pretty {
            OutputFormat::Pretty
        } else {
            OutputFormat::Compact
        }
    }
}

pub fn load_config(path: impl AsRef<Path>) -> Result<CheckConfig, ConfigError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn parse_config(raw: &str) -> Result<CheckConfig, serde_yaml::Error> {
    // An empty file deserializes as unit, not as an empty mapping.
    if raw.trim().is_empty() {
        return Ok(CheckConfig::default());
    }
    serde_yaml::from_str(raw)
}

/// An explicit path must exist; otherwise the default file is used when
/// present, and built-in defaults when not.
pub fn resolve_config(explicit: Option<&Path>) -> Result<CheckConfig, ConfigError> {
    match explicit {
        Some(path) => load_config(path),
        None if Path::new(DEFAULT_CONFIG_PATH).is_file() => load_config(DEFAULT_CONFIG_PATH),
        None => Ok(CheckConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = parse_config("").expect("parse");
        assert_eq!(config, CheckConfig::default());
        assert_eq!(config.exempt_authors, vec!["Zen Studios".to_string()]);
        assert_eq!(config.rules, RuleId::ALL.to_vec());
        assert_eq!(config.output_format(), OutputFormat::Pretty);
    }

    #[test]
    fn partial_config_overrides_only_given_keys() {
        let config = parse_config(
            "database: ../db/vpsdb.json\nrules: [orphaned-pup-packs]\npretty: false\n",
        )
        .expect("parse");
        assert_eq!(config.database, PathBuf::from("../db/vpsdb.json"));
        assert_eq!(config.rules, vec![RuleId::OrphanedPupPacks]);
        assert_eq!(config.output_format(), OutputFormat::Compact);
        assert_eq!(config.rule_settings(), RuleSettings::default());
    }

    #[test]
    fn unknown_key_and_unknown_rule_are_rejected() {
        assert!(parse_config("databse: x.json\n").is_err());
        assert!(parse_config("rules: [tables-missing-stuff]\n").is_err());
    }

    #[test]
    fn missing_explicit_config_is_a_read_error() {
        let err = resolve_config(Some(Path::new("/nonexistent/vpsdb-check.yaml")))
            .expect_err("missing file");
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}

//! Configuration loading
//!
//! Read from ~/.marquee/config.toml; a missing file means defaults, a
//! malformed file is an error surfaced at startup. CLI flags override
//! whatever was loaded.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::paths;

/// Which data source the client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// POST /watched and /recommend on a running backend.
    Backend,
    /// GET watched.json / recommendations.json exported snapshots.
    Snapshot,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Backend => write!(f, "backend"),
            SourceKind::Snapshot => write!(f, "snapshot"),
        }
    }
}

impl FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "backend" => Ok(SourceKind::Backend),
            "snapshot" => Ok(SourceKind::Snapshot),
            other => Err(format!("unknown source '{other}' (expected 'backend' or 'snapshot')")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the backend (or of the directory serving the snapshots).
    pub backend_url: String,
    pub source: SourceKind,
    pub theme: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: "http://127.0.0.1:5000".to_string(),
            source: SourceKind::Backend,
            theme: "marquee".to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

impl Config {
    /// Load from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&paths::config_file())
    }

    /// Load from an explicit path. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "source = \"snapshot\"\n").unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.source, SourceKind::Snapshot);
        assert_eq!(config.backend_url, Config::default().backend_url);
    }

    #[test]
    fn test_round_trips_through_toml() {
        let config = Config {
            backend_url: "http://example.test:8080".to_string(),
            source: SourceKind::Snapshot,
            theme: "midnight".to_string(),
        };
        let text = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "backend_url = [not toml").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_source_kind_from_str() {
        assert_eq!("backend".parse::<SourceKind>(), Ok(SourceKind::Backend));
        assert_eq!("snapshot".parse::<SourceKind>(), Ok(SourceKind::Snapshot));
        assert!("filesystem".parse::<SourceKind>().is_err());
    }
}

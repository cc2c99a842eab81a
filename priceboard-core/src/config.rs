//! TOML configuration shared by the CLI and the TUI.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid TOML in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Settings from `priceboard.toml`. Every field has a default so the file
/// is optional; command-line flags override whatever is loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the imported source documents.
    pub data_dir: PathBuf,
    /// Where the TUI persists its UI state. Defaults to the platform
    /// config directory when absent.
    pub state_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            state_path: None,
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// With an explicit path the file must exist and parse. With `None`,
    /// `./priceboard.toml` is used if present, defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let conventional = PathBuf::from("priceboard.toml");
                if !conventional.exists() {
                    return Ok(Config::default());
                }
                conventional
            }
        };
        let data = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        toml::from_str(&data).map_err(|source| ConfigError::Parse { path, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_no_file() {
        let config = Config::load(None).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert!(config.state_path.is_none());
    }

    #[test]
    fn loads_partial_file_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("priceboard.toml");
        std::fs::write(&path, "data_dir = \"/tmp/pb\"\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/pb"));
        assert!(config.state_path.is_none());
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("priceboard.toml");
        std::fs::write(&path, "data_dir = [broken").unwrap();

        assert!(matches!(
            Config::load(Some(&path)),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        assert!(matches!(
            Config::load(Some(Path::new("/nonexistent/priceboard.toml"))),
            Err(ConfigError::Read { .. })
        ));
    }
}

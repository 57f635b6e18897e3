//! CLI configuration

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Default config file location
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("kinship")
        .join("config.toml")
}

/// Configuration for the CLI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the three record files
    pub data_dir: Option<PathBuf>,
    pub person_file: String,
    pub fathers_file: String,
    pub mothers_file: String,
    /// Output format: table or json
    pub format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            person_file: "person.txt".to_string(),
            fathers_file: "fathers.txt".to_string(),
            mothers_file: "mothers.txt".to_string(),
            format: "table".to_string(),
        }
    }
}

impl Config {
    /// Load from an explicit path, or from the default location if it exists.
    ///
    /// An explicit path must exist; a missing default file yields defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (config_file_path(), false),
        };

        if !path.exists() {
            if required {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_toml(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = Config::from_toml("data_dir = \"/tmp/family\"\nformat = \"json\"\n").unwrap();

        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/family")));
        assert_eq!(config.format, "json");
        assert_eq!(config.person_file, "person.txt");
        assert_eq!(config.mothers_file, "mothers.txt");
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let missing = Path::new("/definitely/not/here/kinship.toml");
        assert!(Config::load(Some(missing)).is_err());
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        assert!(Config::from_toml("format = [").is_err());
    }
}

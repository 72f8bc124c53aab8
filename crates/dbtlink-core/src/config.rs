//! Configuration schema (dbtlink.toml)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory containing profiles.yml (overridden by `--profiles-dir` / `DBT_PROFILES_DIR`)
    #[serde(default)]
    pub profiles_dir: Option<PathBuf>,

    /// Profile to use when dbt_project.yml is absent
    #[serde(default)]
    pub profile: Option<String>,

    /// Target to use instead of the profile's default
    #[serde(default)]
    pub target: Option<String>,

    /// Mask passwords, tokens and private keys in printed credentials and reports
    #[serde(default = "default_redact_secrets")]
    pub redact_secrets: bool,

    /// Project root path (for resolving relative paths)
    #[serde(skip)]
    pub project_root: PathBuf,
}

fn default_redact_secrets() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            profiles_dir: None,
            profile: None,
            target: None,
            redact_secrets: default_redact_secrets(),
            project_root: std::env::current_dir().unwrap_or_default(),
        }
    }
}

impl Config {
    /// Default config file name
    pub const FILE_NAME: &'static str = "dbtlink.toml";

    /// Load config from TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(format!("{}: {}", path.display(), e)))?;

        let mut config = Self::from_toml(&contents)?;

        // Set project root to parent of config file
        if let Some(parent) = path.parent() {
            config.project_root = parent.to_path_buf();
        }

        Ok(config)
    }

    /// Load config from TOML string
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml)
            .map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Save config to TOML file
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let toml = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(path, toml)
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// profiles_dir resolved against the project root
    pub fn resolved_profiles_dir(&self) -> Option<PathBuf> {
        self.profiles_dir.as_ref().map(|dir| {
            if dir.is_relative() {
                self.project_root.join(dir)
            } else {
                dir.clone()
            }
        })
    }
}

/// Config error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_redacts() {
        let config = Config::default();
        assert!(config.redact_secrets);
        assert!(config.profiles_dir.is_none());
    }

    #[test]
    fn parse_full_config() {
        let config = Config::from_toml(
            r#"
            profiles_dir = "config/dbt"
            profile = "jaffle_shop"
            target = "prod"
            redact_secrets = false
            "#,
        )
        .unwrap();

        assert_eq!(config.profile.as_deref(), Some("jaffle_shop"));
        assert_eq!(config.target.as_deref(), Some("prod"));
        assert!(!config.redact_secrets);
    }

    #[test]
    fn empty_config_keeps_defaults() {
        let config = Config::from_toml("").unwrap();
        assert!(config.redact_secrets);
        assert!(config.profile.is_none());
    }

    #[test]
    fn relative_profiles_dir_uses_project_root() {
        let mut config = Config::from_toml("profiles_dir = \"dbt\"").unwrap();
        config.project_root = PathBuf::from("/work/project");
        assert_eq!(config.resolved_profiles_dir(), Some(PathBuf::from("/work/project/dbt")));
    }

    #[test]
    fn invalid_toml_is_parse_error() {
        let err = Config::from_toml("redact_secrets = \"maybe\"").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn config_toml_roundtrip() {
        let mut config = Config::default();
        config.profile = Some("analytics".to_string());
        let toml = toml::to_string(&config).unwrap();
        let parsed = Config::from_toml(&toml).unwrap();
        assert_eq!(parsed.profile, config.profile);
        assert_eq!(parsed.redact_secrets, config.redact_secrets);
    }
}

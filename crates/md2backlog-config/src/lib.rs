//! Configuration management for md2backlog.
//!
//! Parses `md2backlog.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! ```toml
//! [convert]
//! gfm = true
//!
//! [output]
//! trailing_newline = false
//! ```
//!
//! CLI settings can be applied during load via [`CliSettings`].

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override GFM extensions flag.
    pub gfm: Option<bool>,
    /// Override trailing newline flag.
    pub trailing_newline: Option<bool>,
}

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "md2backlog.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Conversion settings.
    pub convert: ConvertConfig,
    /// Output settings.
    pub output: OutputConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Conversion configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// Enable GitHub Flavored Markdown extensions (tables, strikethrough,
    /// task lists).
    pub gfm: bool,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self { gfm: true }
    }
}

/// Output configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Append a line terminator to non-empty output.
    pub trailing_newline: bool,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `md2backlog.toml` in the current directory and
    /// its parents, falling back to defaults when none exists.
    ///
    /// CLI settings are applied after loading, allowing CLI arguments to take
    /// precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let discovered = match config_path {
            Some(_) => None,
            None => std::env::current_dir()
                .ok()
                .and_then(|cwd| Self::discover_config(&cwd)),
        };
        Self::load_resolved(config_path, discovered.as_deref(), cli_settings)
    }

    fn load_resolved(
        config_path: Option<&Path>,
        discovered: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(path) = discovered {
            Self::load_from_file(path)?
        } else {
            tracing::debug!("No configuration file found, using defaults");
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(gfm) = settings.gfm {
            self.convert.gfm = gfm;
        }
        if let Some(trailing_newline) = settings.trailing_newline {
            self.output.trailing_newline = trailing_newline;
        }
    }

    /// Search for config file in `start` and its parents.
    fn discover_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.is_file() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.config_path = Some(path.to_path_buf());
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn write_config(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join(CONFIG_FILENAME);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.convert.gfm);
        assert!(!config.output.trailing_newline);
        assert_eq!(config.config_path, None);
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.convert.gfm);
        assert!(!config.output.trailing_newline);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r"
[convert]
gfm = false

[output]
trailing_newline = true
";
        let config: Config = toml::from_str(toml).unwrap();
        assert!(!config.convert.gfm);
        assert!(config.output.trailing_newline);
    }

    #[test]
    fn test_parse_partial_section_keeps_defaults() {
        let config: Config = toml::from_str("[output]\ntrailing_newline = true\n").unwrap();
        assert!(config.convert.gfm);
        assert!(config.output.trailing_newline);
    }

    #[test]
    fn test_parse_invalid_type() {
        let result: Result<Config, _> = toml::from_str("[convert]\ngfm = \"yes\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = TempDir::new().unwrap();
        let path = write_config(dir.path(), "[convert]\ngfm = false\n");

        let config = Config::load(Some(&path), None).unwrap();

        assert!(!config.convert.gfm);
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_explicit_path_not_found() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.toml");

        let err = Config::load(Some(&missing), None).unwrap_err();

        assert!(matches!(err, ConfigError::NotFound(path) if path == missing));
    }

    #[test]
    fn test_load_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = write_config(dir.path(), "[convert\n");

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("TOML parse error"));
    }

    #[test]
    fn test_discover_config_in_parent() {
        let dir = TempDir::new().unwrap();
        let path = write_config(dir.path(), "");
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(Config::discover_config(&nested), Some(path));
    }

    #[test]
    fn test_discover_config_ignores_directory_with_config_name() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join(CONFIG_FILENAME);
        std::fs::create_dir_all(&nested).unwrap();
        let found = Config::discover_config(&nested);
        assert_ne!(found, Some(nested));
    }

    #[test]
    fn test_load_discovered_file() {
        let dir = TempDir::new().unwrap();
        let path = write_config(dir.path(), "[output]\ntrailing_newline = true\n");

        let config = Config::load_resolved(None, Some(&path), None).unwrap();

        assert!(config.output.trailing_newline);
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let config = Config::load_resolved(None, None, None).unwrap();
        assert!(config.convert.gfm);
        assert_eq!(config.config_path, None);
    }

    #[test]
    fn test_apply_cli_settings_gfm() {
        let mut config = Config::default();
        let overrides = CliSettings {
            gfm: Some(false),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert!(!config.convert.gfm);
        assert!(!config.output.trailing_newline); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_trailing_newline() {
        let mut config = Config::default();
        let overrides = CliSettings {
            trailing_newline: Some(true),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert!(config.output.trailing_newline);
        assert!(config.convert.gfm); // Unchanged
    }

    #[test]
    fn test_cli_settings_override_file() {
        let dir = TempDir::new().unwrap();
        let path = write_config(dir.path(), "[convert]\ngfm = true\n");
        let overrides = CliSettings {
            gfm: Some(false),
            ..Default::default()
        };

        let config = Config::load(Some(&path), Some(&overrides)).unwrap();

        assert!(!config.convert.gfm);
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default();
        config.apply_cli_settings(&CliSettings::default());
        assert!(config.convert.gfm);
        assert!(!config.output.trailing_newline);
    }
}

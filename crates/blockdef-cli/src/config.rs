//! Configuration management for the CLI
//!
//! Configuration is read from, in order of preference:
//! - The file named by `--config` or `BLOCKDEF_CONFIG`
//! - `.blockdef.toml`, `.blockdef.yaml` or `.blockdef.json` in the working directory
//! - `config.toml` in the user configuration directory
//!
//! Command-line arguments override individual values afterwards.

use crate::cli::{ConfigFormat, OutputFormat};
use crate::error::{Error, Result};
use blockdef_schemas::{ValidationConfig, ValidationMode};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Project configuration file names, in lookup order
pub const PROJECT_CONFIG_FILES: [&str; 3] = [".blockdef.toml", ".blockdef.yaml", ".blockdef.json"];

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Validation settings
    pub validation: ValidationSettings,

    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingSettings,
}

/// Validation configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationSettings {
    /// Default validation mode
    pub mode: ValidationMode,

    /// Extension names definitions may reference (unrestricted when absent)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub known_extensions: Option<Vec<String>>,

    /// Mutator names definitions may reference (unrestricted when absent)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub known_mutators: Option<Vec<String>>,

    /// Stop at the first failing file
    pub fail_fast: bool,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format
    pub format: OutputFormat,

    /// Use colored output by default
    pub color: bool,

    /// Show progress indicators
    pub progress: bool,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (compact, full, json)
    pub format: String,

    /// Log file path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Human,
            color: true,
            progress: true,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "compact".to_string(),
            file: None,
        }
    }
}

impl ValidationSettings {
    /// Library configuration for these settings, with an optional mode override
    pub fn to_validation_config(&self, mode: Option<ValidationMode>) -> ValidationConfig {
        let mut config = ValidationConfig::with_mode(mode.unwrap_or(self.mode));
        config.fail_fast = self.fail_fast;
        if let Some(names) = &self.known_extensions {
            config = config.with_known_extensions(names.clone());
        }
        if let Some(names) = &self.known_mutators {
            config = config.with_known_mutators(names.clone());
        }
        config
    }
}

impl Config {
    /// Load configuration from a file, choosing the format by extension
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;

        match extension(path).as_deref() {
            Some("toml") => toml::from_str(&content)
                .map_err(|e| Error::config(format!("{}: {}", path.display(), e))),
            Some("yaml" | "yml") => Ok(serde_yaml::from_str(&content)?),
            Some("json") => Ok(serde_json::from_str(&content)?),
            _ => Err(Error::config(format!(
                "Unsupported config file '{}': expected .toml, .yaml, .yml or .json",
                path.display()
            ))),
        }
    }

    /// Load configuration from a specific file or default locations
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        match file {
            Some(path) => Self::from_file(path),
            None => match Self::find_config_file() {
                Some(path) => {
                    tracing::debug!(path = %path.display(), "using configuration file");
                    Self::from_file(&path)
                }
                None => Ok(Self::default()),
            },
        }
    }

    /// The configuration file that would be loaded without `--config`
    pub fn find_config_file() -> Option<PathBuf> {
        Self::find_project_config().or_else(|| Self::user_config_path().filter(|path| path.exists()))
    }

    /// First project configuration file in the working directory
    pub fn find_project_config() -> Option<PathBuf> {
        PROJECT_CONFIG_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Location of the user configuration file
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("blockdef").join("config.toml"))
    }

    /// Render the configuration in the given format
    pub fn render(&self, format: ConfigFormat) -> Result<String> {
        match format {
            ConfigFormat::Toml => toml::to_string_pretty(self)
                .map_err(|e| Error::config(format!("Failed to serialize as TOML: {}", e))),
            ConfigFormat::Json => Ok(serde_json::to_string_pretty(self)?),
            ConfigFormat::Yaml => Ok(serde_yaml::to_string(self)?),
        }
    }

    /// Save configuration to a file, choosing the format by extension
    pub fn save(&self, path: &Path) -> Result<()> {
        let format = match extension(path).as_deref() {
            Some("yaml" | "yml") => ConfigFormat::Yaml,
            Some("json") => ConfigFormat::Json,
            _ => ConfigFormat::Toml,
        };
        let content = self.render(format)?;

        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.validation.mode, ValidationMode::Strict);
        assert_eq!(config.output.format, OutputFormat::Human);
        assert_eq!(config.logging.format, "compact");
    }

    #[test]
    fn test_partial_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".blockdef.toml");
        std::fs::write(
            &path,
            r#"
[validation]
mode = "partial"
known_mutators = ["controls_if_mutator"]

[output]
format = "json-pretty"
"#,
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.validation.mode, ValidationMode::Partial);
        assert_eq!(
            config.validation.known_mutators,
            Some(vec!["controls_if_mutator".to_string()])
        );
        assert_eq!(config.output.format, OutputFormat::JsonPretty);
        assert!(config.output.color);
        assert_eq!(config.logging, LoggingSettings::default());
    }

    #[test]
    fn test_yaml_and_json() {
        let dir = tempdir().unwrap();
        let yaml = dir.path().join("config.yaml");
        std::fs::write(&yaml, "validation:\n  mode: basic\n  fail_fast: true\n").unwrap();
        let config = Config::from_file(&yaml).unwrap();
        assert_eq!(config.validation.mode, ValidationMode::Basic);
        assert!(config.validation.fail_fast);

        let json = dir.path().join("config.json");
        std::fs::write(&json, r#"{"logging": {"level": "debug"}}"#).unwrap();
        assert_eq!(Config::from_file(&json).unwrap().logging.level, "debug");
    }

    #[test]
    fn test_invalid_files() {
        let dir = tempdir().unwrap();
        let ini = dir.path().join("config.ini");
        std::fs::write(&ini, "mode=strict").unwrap();
        assert!(matches!(Config::from_file(&ini), Err(Error::Config(_))));

        let bad_mode = dir.path().join("config.toml");
        std::fs::write(&bad_mode, "[validation]\nmode = \"lenient\"\n").unwrap();
        assert!(matches!(Config::from_file(&bad_mode), Err(Error::Config(_))));

        assert!(matches!(
            Config::from_file(&dir.path().join("absent.toml")),
            Err(Error::FileNotFound { .. })
        ));
    }

    #[test]
    fn test_save_round_trip() {
        let dir = tempdir().unwrap();
        let mut config = Config::default();
        config.validation.known_extensions = Some(vec!["parent_tooltip_when_inline".into()]);

        for name in ["nested/config.toml", "config.yaml", "config.json"] {
            let path = dir.path().join(name);
            config.save(&path).unwrap();
            assert_eq!(Config::from_file(&path).unwrap(), config);
        }
    }

    #[test]
    fn test_validation_config() {
        let mut settings = ValidationSettings::default();
        settings.known_mutators = Some(vec!["m".into()]);
        settings.fail_fast = true;

        let config = settings.to_validation_config(Some(ValidationMode::Basic));
        assert_eq!(config.mode, ValidationMode::Basic);
        assert!(config.fail_fast);
        assert_eq!(config.known_mutators, Some(vec!["m".to_string()]));
        assert!(config.known_extensions.is_none());

        assert_eq!(settings.to_validation_config(None).mode, ValidationMode::Strict);
    }
}

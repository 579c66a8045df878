//! Configuration module
//!
//! Loads runner configuration from a YAML or JSON file and layers
//! environment overrides on top. Command-line flags are applied last by the
//! binary.

mod env;

pub use env::{print_env_help, EnvConfig};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::output::{ReportLayout, SummaryFormat};
use crate::utils::LogLevel;

/// Configuration file locations (in order of precedence)
const CONFIG_LOCATIONS: &[&str] = &["./stfu.yaml", "./stfu.yml", "./stfu.json", "./.stfu.yaml"];

/// Runner configuration
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Force verbose or quiet reports; each group's own setting when unset
    pub verbose: Option<bool>,

    /// Diagnostic log level
    pub log_level: LogLevel,

    /// Report column layout
    pub layout: ReportLayout,

    /// Summary printed after the report, if any
    pub summary: Option<SummaryFormat>,
}

impl AppConfig {
    /// Find a configuration file in the standard locations
    pub fn find() -> Option<PathBuf> {
        CONFIG_LOCATIONS
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Load configuration from the given file, a standard location, or
    /// defaults, then apply environment overrides
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        let env = EnvConfig::load();

        let path = path
            .map(Path::to_path_buf)
            .or_else(|| env.config_file.as_ref().map(PathBuf::from))
            .or_else(Self::find);

        let mut config = match path {
            Some(path) => Self::load(&path)?,
            None => Self::default(),
        };

        config.apply_env(&env)?;
        Ok(config)
    }

    /// Load configuration from file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = if is_yaml_file(path) {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML config: {}", path.display()))?
        } else {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))?
        };

        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides
    pub fn apply_env(&mut self, env: &EnvConfig) -> Result<()> {
        if let Some(verbose) = env.verbose {
            self.verbose = Some(verbose);
        }
        if let Some(level) = &env.log_level {
            self.log_level = LogLevel::from_str(level)
                .with_context(|| format!("Invalid log level in environment: {level}"))?;
        }
        if let Some(width) = env.name_width {
            self.layout.name_width = width;
        }
        if let Some(width) = env.wrap_width {
            self.layout.wrap_width = width;
        }
        if let Some(format) = &env.summary {
            self.summary = Some(
                SummaryFormat::from_str(format)
                    .with_context(|| format!("Invalid summary format in environment: {format}"))?,
            );
        }

        self.validate()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.layout.wrap_width == 0 {
            anyhow::bail!("Wrap width must be greater than zero");
        }
        Ok(())
    }
}

fn is_yaml_file(path: &Path) -> bool {
    path.extension()
        .map(|e| e == "yaml" || e == "yml")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.verbose, None);
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.layout.name_width, 20);
        assert_eq!(config.layout.wrap_width, 75);
        assert_eq!(config.summary, None);
    }

    #[test]
    fn test_load_yaml_partial() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stfu.yaml");
        std::fs::write(
            &path,
            "verbose: false\nlog_level: debug\nlayout:\n  wrap_width: 60\nsummary: json\n",
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.verbose, Some(false));
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.layout.wrap_width, 60);
        assert_eq!(config.layout.name_width, 20);
        assert_eq!(config.summary, Some(SummaryFormat::Json));
    }

    #[test]
    fn test_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stfu.json");

        let config = AppConfig {
            verbose: Some(true),
            summary: Some(SummaryFormat::Text),
            ..AppConfig::default()
        };
        std::fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

        assert_eq!(AppConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = AppConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn test_zero_wrap_width_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stfu.yml");
        std::fs::write(&path, "layout:\n  wrap_width: 0\n").unwrap();

        assert!(AppConfig::load(&path).is_err());
    }

    #[test]
    fn test_apply_env_overrides() {
        let env = EnvConfig {
            verbose: Some(true),
            log_level: Some("info".into()),
            name_width: Some(30),
            summary: Some("json-pretty".into()),
            ..EnvConfig::default()
        };

        let mut config = AppConfig::default();
        config.apply_env(&env).unwrap();

        assert_eq!(config.verbose, Some(true));
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.layout.name_width, 30);
        assert_eq!(config.summary, Some(SummaryFormat::JsonPretty));
    }

    #[test]
    fn test_apply_env_rejects_bad_values() {
        let env = EnvConfig {
            log_level: Some("loud".into()),
            ..EnvConfig::default()
        };
        assert!(AppConfig::default().apply_env(&env).is_err());
    }
}

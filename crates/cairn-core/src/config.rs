// Rust guideline compliant 2026-07-31

//! Configuration management for Cairn.

use crate::models::Severity;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// JSON output format.
    Json,
    /// Human-readable table format.
    #[default]
    Table,
    /// Plain text format.
    Plain,
}

/// Configuration for Cairn behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Issues root directory, relative to the repository root.
    #[serde(default = "default_issues_dir")]
    pub issues_dir: String,

    /// Workflow DSL file, relative to the repository root.
    #[serde(default = "default_workflow_file")]
    pub workflow_file: String,

    /// Severity assigned to new issues when none is given.
    #[serde(default)]
    pub default_severity: Severity,

    /// Default output format for commands.
    #[serde(default)]
    pub output_format: OutputFormat,
}

fn default_issues_dir() -> String {
    ".cairn/issues".to_string()
}

fn default_workflow_file() -> String {
    ".cairn/workflow.mmd".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            issues_dir: default_issues_dir(),
            workflow_file: default_workflow_file(),
            default_severity: Severity::default(),
            output_format: OutputFormat::default(),
        }
    }
}

impl Config {
    /// Loads configuration from file and environment variables.
    ///
    /// Configuration is loaded in the following order (later overrides
    /// earlier):
    /// 1. Default values
    /// 2. Configuration file at `<cairn_dir>/config.toml`
    /// 3. Environment variables with `CAIRN_` prefix
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be
    /// read or parsed, or if values fail validation.
    pub fn load(cairn_dir: &Path) -> Result<Self> {
        let mut config = Self::default();

        let config_path = cairn_dir.join("config.toml");
        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            config = toml::from_str(&content)
                .map_err(|e| crate::Error::Parse(format!("Invalid config file: {}", e)))?;
        }

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Applies environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `CAIRN_ISSUES_DIR` - Issues root directory
    /// - `CAIRN_WORKFLOW_FILE` - Workflow DSL file path
    /// - `CAIRN_DEFAULT_SEVERITY` - Severity for new issues
    /// - `CAIRN_OUTPUT_FORMAT` - Output format (json/table/plain)
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("CAIRN_ISSUES_DIR") {
            self.issues_dir = val;
        }

        if let Ok(val) = std::env::var("CAIRN_WORKFLOW_FILE") {
            self.workflow_file = val;
        }

        if let Ok(val) = std::env::var("CAIRN_DEFAULT_SEVERITY") {
            self.default_severity = val.parse()?;
        }

        if let Ok(val) = std::env::var("CAIRN_OUTPUT_FORMAT") {
            self.output_format = match val.as_str() {
                "json" => OutputFormat::Json,
                "table" => OutputFormat::Table,
                "plain" => OutputFormat::Plain,
                _ => {
                    return Err(crate::Error::Parse(
                        "CAIRN_OUTPUT_FORMAT must be json, table, or plain".to_string(),
                    ))
                }
            };
        }

        Ok(())
    }

    /// Validates the configuration values.
    fn validate(&self) -> Result<()> {
        if self.issues_dir.trim().is_empty() {
            return Err(crate::Error::Parse(
                "issues_dir must not be empty".to_string(),
            ));
        }

        if self.workflow_file.trim().is_empty() {
            return Err(crate::Error::Parse(
                "workflow_file must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Saves the configuration to `<cairn_dir>/config.toml`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, cairn_dir: &Path) -> Result<()> {
        let config_path = cairn_dir.join("config.toml");
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::Parse(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn clear_all_env_vars() {
        std::env::remove_var("CAIRN_ISSUES_DIR");
        std::env::remove_var("CAIRN_WORKFLOW_FILE");
        std::env::remove_var("CAIRN_DEFAULT_SEVERITY");
        std::env::remove_var("CAIRN_OUTPUT_FORMAT");
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.issues_dir, ".cairn/issues");
        assert_eq!(config.workflow_file, ".cairn/workflow.mmd");
        assert_eq!(config.default_severity, Severity::Medium);
        assert_eq!(config.output_format, OutputFormat::Table);
    }

    #[test]
    fn test_config_load_missing_file() {
        clear_all_env_vars();
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load(temp_dir.path()).unwrap();
        assert_eq!(config.issues_dir, ".cairn/issues");
    }

    #[test]
    fn test_config_load_from_file() {
        clear_all_env_vars();
        let temp_dir = TempDir::new().unwrap();
        let content = r#"
issues_dir = "tracker/issues"
workflow_file = "tracker/states.mmd"
default_severity = "high"
output_format = "json"
"#;
        std::fs::write(temp_dir.path().join("config.toml"), content).unwrap();

        let config = Config::load(temp_dir.path()).unwrap();
        assert_eq!(config.issues_dir, "tracker/issues");
        assert_eq!(config.workflow_file, "tracker/states.mmd");
        assert_eq!(config.default_severity, Severity::High);
        assert_eq!(config.output_format, OutputFormat::Json);
    }

    #[test]
    fn test_config_validation_empty_issues_dir() {
        clear_all_env_vars();
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("config.toml"), "issues_dir = \"\"").unwrap();

        let result = Config::load(temp_dir.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_config_env_override_issues_dir() {
        clear_all_env_vars();
        let temp_dir = TempDir::new().unwrap();

        std::env::set_var("CAIRN_ISSUES_DIR", "elsewhere/issues");
        let config = Config::load(temp_dir.path()).unwrap();
        assert_eq!(config.issues_dir, "elsewhere/issues");

        clear_all_env_vars();
    }

    #[test]
    fn test_config_env_override_severity() {
        clear_all_env_vars();
        let temp_dir = TempDir::new().unwrap();

        std::env::set_var("CAIRN_DEFAULT_SEVERITY", "critical");
        let config = Config::load(temp_dir.path()).unwrap();
        assert_eq!(config.default_severity, Severity::Critical);

        clear_all_env_vars();
    }

    #[test]
    fn test_config_env_invalid_severity() {
        clear_all_env_vars();
        let temp_dir = TempDir::new().unwrap();

        std::env::set_var("CAIRN_DEFAULT_SEVERITY", "urgent");
        let result = Config::load(temp_dir.path());
        assert!(result.is_err());

        clear_all_env_vars();
    }

    #[test]
    fn test_config_env_invalid_format() {
        clear_all_env_vars();
        let temp_dir = TempDir::new().unwrap();

        std::env::set_var("CAIRN_OUTPUT_FORMAT", "yaml");
        let result = Config::load(temp_dir.path());
        assert!(result.is_err());

        clear_all_env_vars();
    }

    #[test]
    fn test_config_save_and_load() {
        clear_all_env_vars();
        let temp_dir = TempDir::new().unwrap();

        let original = Config {
            issues_dir: "work/issues".to_string(),
            workflow_file: "work/flow.mmd".to_string(),
            default_severity: Severity::Low,
            output_format: OutputFormat::Plain,
        };

        original.save(temp_dir.path()).unwrap();
        let loaded = Config::load(temp_dir.path()).unwrap();

        assert_eq!(original.issues_dir, loaded.issues_dir);
        assert_eq!(original.workflow_file, loaded.workflow_file);
        assert_eq!(original.default_severity, loaded.default_severity);
        assert_eq!(original.output_format, loaded.output_format);

        clear_all_env_vars();
    }

    #[test]
    fn test_config_file_overridden_by_env() {
        clear_all_env_vars();
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join("config.toml"),
            "issues_dir = \"from-file\"",
        )
        .unwrap();

        std::env::set_var("CAIRN_ISSUES_DIR", "from-env");
        let config = Config::load(temp_dir.path()).unwrap();
        assert_eq!(config.issues_dir, "from-env");

        clear_all_env_vars();
    }
}

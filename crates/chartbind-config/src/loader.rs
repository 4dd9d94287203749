//! Settings loading utilities

use crate::Settings;
use chartbind_common::{ChartBindError, FailurePolicy, Result as ChartBindResult};
use std::env;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Settings loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading the settings file
    #[error("Failed to read settings file: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML settings: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// Settings validation error
    #[error("Settings validation failed: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        var: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<ConfigError> for ChartBindError {
    fn from(err: ConfigError) -> Self {
        ChartBindError::config(err.to_string())
    }
}

/// Settings loader for the library
pub struct SettingsLoader;

impl SettingsLoader {
    /// Load settings from a YAML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Settings, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let mut settings: Settings = serde_yaml::from_str(&content)?;

        Self::apply_env_overrides(&mut settings)?;

        settings.validate_all().map_err(ConfigError::ValidationError)?;

        Ok(settings)
    }

    /// Load settings from environment variables and well-known files
    pub fn load() -> ChartBindResult<Settings> {
        let settings = if let Ok(config_path) = env::var("CHARTBIND_CONFIG_PATH") {
            debug!(path = %config_path, "loading settings from CHARTBIND_CONFIG_PATH");
            Self::load_config(&config_path)?
        } else if Path::new("chartbind.yaml").exists() {
            debug!("loading settings from chartbind.yaml");
            Self::load_config("chartbind.yaml")?
        } else if Path::new("chartbind.yml").exists() {
            debug!("loading settings from chartbind.yml");
            Self::load_config("chartbind.yml")?
        } else {
            // No settings file found, use defaults with env overrides
            debug!("no settings file found, using defaults");
            let mut settings = Settings::default();
            Self::apply_env_overrides(&mut settings)?;
            settings.validate_all().map_err(ConfigError::ValidationError)?;
            settings
        };

        Ok(settings)
    }

    /// Load settings from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> ChartBindResult<Settings> {
        Ok(Self::load_config(path)?)
    }

    /// Apply environment variable overrides to settings
    fn apply_env_overrides(settings: &mut Settings) -> Result<(), ConfigError> {
        // Binding overrides
        if let Ok(attribute) = env::var("CHARTBIND_MARKER_ATTRIBUTE") {
            settings.binding.marker_attribute = attribute;
        }

        if let Ok(policy) = env::var("CHARTBIND_FAILURE_POLICY") {
            settings.binding.failure_policy =
                policy.parse::<FailurePolicy>().map_err(|e| ConfigError::EnvParseError {
                    var: "CHARTBIND_FAILURE_POLICY".to_string(),
                    source: Box::new(e),
                })?;
        }

        // Demo overrides
        if let Ok(enabled) = env::var("CHARTBIND_DEMO_ENABLED") {
            settings.demo.enabled = enabled.parse().map_err(|e| ConfigError::EnvParseError {
                var: "CHARTBIND_DEMO_ENABLED".to_string(),
                source: Box::new(e),
            })?;
        }

        if let Ok(element_id) = env::var("CHARTBIND_DEMO_ELEMENT") {
            settings.demo.element_id = element_id;
        }

        // Logging overrides
        if let Ok(level) = env::var("LOG_LEVEL") {
            settings.logging.level = level;
        }

        if let Ok(file) = env::var("LOG_FILE") {
            settings.logging.file = Some(file);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::NamedTempFile;

    // Tests below read and mutate process environment variables.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn clear_chartbind_env() {
        env::remove_var("CHARTBIND_CONFIG_PATH");
        env::remove_var("CHARTBIND_MARKER_ATTRIBUTE");
        env::remove_var("CHARTBIND_FAILURE_POLICY");
        env::remove_var("CHARTBIND_DEMO_ENABLED");
        env::remove_var("CHARTBIND_DEMO_ELEMENT");
        env::remove_var("LOG_LEVEL");
        env::remove_var("LOG_FILE");
    }

    /// Create a temporary YAML settings file for testing
    fn create_test_settings_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes()).expect("Failed to write to temp file");
        file
    }

    #[test]
    fn test_load_valid_yaml_settings() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_chartbind_env();

        let yaml_content = "binding:\n  marker_attribute: 'data-bss-chart'\n  failure_policy: isolate\ndemo:\n  enabled: true\n  element_id: 'my'\nlogging:\n  level: 'info'\n  file: null\n  pretty: true";

        let temp_file = create_test_settings_file(yaml_content);
        let settings = SettingsLoader::load_config(temp_file.path()).expect("Failed to load settings");

        assert_eq!(settings.binding.marker_attribute, "data-bss-chart");
        assert_eq!(settings.binding.failure_policy, FailurePolicy::Isolate);
        assert_eq!(settings.demo.element_id, "my");
    }

    #[test]
    fn test_invalid_yaml() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_chartbind_env();

        let invalid_yaml = "binding:\n  marker_attribute: [unclosed array";

        let temp_file = create_test_settings_file(invalid_yaml);
        let result = SettingsLoader::load_config(temp_file.path());

        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), ConfigError::ParseError(_)));
    }

    #[test]
    fn test_validation_error() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_chartbind_env();

        let invalid_settings = "binding:\n  marker_attribute: 'not-a-data-attribute'\n  failure_policy: isolate\ndemo:\n  enabled: true\n  element_id: 'my'\nlogging:\n  level: 'info'\n  file: null\n  pretty: true";

        let temp_file = create_test_settings_file(invalid_settings);
        let result = SettingsLoader::load_config(temp_file.path());

        assert!(result.is_err(), "Expected validation error but settings loaded successfully");
        assert!(matches!(result.unwrap_err(), ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_environment_variable_overrides() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_chartbind_env();

        env::set_var("CHARTBIND_MARKER_ATTRIBUTE", "data-graph");
        env::set_var("CHARTBIND_FAILURE_POLICY", "abort");
        env::set_var("CHARTBIND_DEMO_ELEMENT", "votes");
        env::set_var("LOG_LEVEL", "debug");

        let yaml_content = "binding:\n  marker_attribute: 'data-chart'\n  failure_policy: isolate\ndemo:\n  enabled: true\n  element_id: 'my'\nlogging:\n  level: 'info'\n  file: null\n  pretty: true";

        let temp_file = create_test_settings_file(yaml_content);
        let settings = SettingsLoader::load_config(temp_file.path()).expect("Failed to load settings");

        // Environment variables should override YAML values
        assert_eq!(settings.binding.marker_attribute, "data-graph");
        assert_eq!(settings.binding.failure_policy, FailurePolicy::Abort);
        assert_eq!(settings.demo.element_id, "votes");
        assert_eq!(settings.logging.level, "debug");

        clear_chartbind_env();
    }

    #[test]
    fn test_env_parse_error() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_chartbind_env();

        env::set_var("CHARTBIND_DEMO_ENABLED", "not_a_bool");

        let yaml_content = "binding:\n  marker_attribute: 'data-chart'\n  failure_policy: isolate\ndemo:\n  enabled: true\n  element_id: 'my'\nlogging:\n  level: 'info'\n  file: null\n  pretty: true";

        let temp_file = create_test_settings_file(yaml_content);
        let result = SettingsLoader::load_config(temp_file.path());

        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), ConfigError::EnvParseError { .. }));

        clear_chartbind_env();
    }

    #[test]
    fn test_missing_settings_file() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_chartbind_env();

        let result = SettingsLoader::load_config("/nonexistent/path/chartbind.yaml");
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), ConfigError::IoError(_)));
    }

    #[test]
    fn test_load_defaults_with_fallback() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_chartbind_env();

        // No settings file in the working directory, so this falls back to defaults
        let settings = SettingsLoader::load().expect("Failed to load default settings");

        assert_eq!(settings.binding.marker_attribute, "data-chart");
        assert_eq!(settings.binding.failure_policy, FailurePolicy::Isolate);
        assert!(settings.demo.enabled);
    }
}

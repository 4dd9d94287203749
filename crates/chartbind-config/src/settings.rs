//! Application settings structures

use chartbind_common::FailurePolicy;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Main settings structure for chart bootstrapping
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Settings {
    /// Discovery-and-bind settings
    #[validate]
    pub binding: BindingSettings,

    /// Demo chart settings
    #[validate]
    pub demo: DemoSettings,

    /// Logging settings
    #[validate]
    pub logging: LoggingSettings,
}

/// Settings for the discovery-and-bind step
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BindingSettings {
    /// Attribute marking elements that carry a chart configuration payload
    #[validate(custom(function = "crate::validation::validate_marker_attribute", message = "Marker attribute must look like data-name"))]
    pub marker_attribute: String,

    /// What to do when binding one element fails
    pub failure_policy: FailurePolicy,
}

/// Settings for the fixed demo chart
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DemoSettings {
    /// Whether the demo chart is installed at all
    pub enabled: bool,

    /// Identifier of the element the demo chart renders into
    #[validate(custom(function = "crate::validation::validate_element_id", message = "Demo element id must be a valid identifier"))]
    pub element_id: String,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error)
    #[validate(custom(function = "crate::validation::validate_log_level", message = "Log level must be one of: trace, debug, info, warn, error"))]
    pub level: String,

    /// Optional log file path
    pub file: Option<String>,

    /// Whether to use pretty console output
    pub pretty: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            binding: BindingSettings::default(),
            demo: DemoSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl Settings {
    /// Comprehensive validation of the entire settings tree
    pub fn validate_all(&self) -> Result<(), validator::ValidationErrors> {
        self.validate()
    }
}

impl Default for BindingSettings {
    fn default() -> Self {
        Self {
            marker_attribute: "data-chart".to_string(),
            failure_policy: FailurePolicy::Isolate,
        }
    }
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            element_id: "my".to_string(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            pretty: true,
        }
    }
}

impl From<&LoggingSettings> for chartbind_common::LoggingConfig {
    fn from(settings: &LoggingSettings) -> Self {
        Self {
            level: settings.level.clone(),
            pretty_format: settings.pretty,
            file_path: settings.file.clone(),
            ..Self::default()
        }
    }
}

//! Validation utilities and regex patterns

use regex::Regex;
use std::sync::LazyLock;
use validator::ValidationError;

/// Regex pattern for marker attribute names (e.g., data-chart, data-bss-chart)
pub static MARKER_ATTRIBUTE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^data-[a-z][a-z0-9-]*$").expect("Invalid marker attribute regex pattern")
});

/// Validate a marker attribute name
pub fn validate_marker_attribute(attribute: &str) -> Result<(), ValidationError> {
    if attribute.is_empty() {
        return Err(ValidationError::new("empty_marker_attribute"));
    }

    if MARKER_ATTRIBUTE_REGEX.is_match(attribute) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_marker_attribute"))
    }
}

/// Validate an element identifier (non-empty, no whitespace)
pub fn validate_element_id(id: &str) -> Result<(), ValidationError> {
    if id.is_empty() {
        return Err(ValidationError::new("empty_element_id"));
    }

    if id.chars().any(char::is_whitespace) {
        return Err(ValidationError::new("element_id_contains_whitespace"));
    }

    Ok(())
}

/// Validate a log level string
pub fn validate_log_level(level: &str) -> Result<(), ValidationError> {
    match level {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ValidationError::new("invalid_log_level")),
    }
}

//! Typed chart configuration as embedded in marker attributes.
//!
//! The wire shape is the Chart.js-style option object: a `type` tag, a
//! `data` block with labels and datasets, and an optional `options`
//! block. Field names are camelCase on the wire.

use chartbind_common::{ChartBindError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported chart kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// Vertical bar chart
    Bar,
    /// Line chart
    Line,
    /// Pie chart
    Pie,
    /// Scatter plot
    Scatter,
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bar => write!(f, "bar"),
            Self::Line => write!(f, "line"),
            Self::Pie => write!(f, "pie"),
            Self::Scatter => write!(f, "scatter"),
        }
    }
}

/// Complete configuration for one chart widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    /// The kind of chart to construct
    #[serde(rename = "type")]
    pub kind: ChartKind,
    /// Labels and datasets
    pub data: ChartData,
    /// Rendering options
    #[serde(default)]
    pub options: ChartOptions,
}

/// Labels plus the datasets plotted against them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    /// Category labels; position i names the same category in every
    /// dataset value and color list
    #[serde(default)]
    pub labels: Vec<String>,
    /// The datasets to plot
    pub datasets: Vec<Dataset>,
}

/// A single dataset within a chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    /// Legend label for this dataset
    #[serde(default)]
    pub label: Option<String>,
    /// One value per category label
    pub data: Vec<f64>,
    /// Border width in pixels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_width: Option<u32>,
    /// Per-category fill colors, index-aligned with the labels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Vec<String>>,
}

/// Chart rendering options
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartOptions {
    /// Axis configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scales: Option<ScaleOptions>,
}

/// Per-axis configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScaleOptions {
    /// The value axis
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<AxisOptions>,
}

/// Options for a single axis
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisOptions {
    /// Whether the axis starts at zero instead of the data minimum
    #[serde(default)]
    pub begin_at_zero: bool,
}

impl ChartConfig {
    /// Deserializes a configuration from an attribute payload.
    ///
    /// Malformed payloads surface as [`ChartBindError::Deserialization`].
    pub fn from_json(payload: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(payload)?;
        Ok(config)
    }

    /// Serializes the configuration back to its wire form.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Checks the index-alignment invariants of the configuration.
    ///
    /// Every dataset must carry one value per label, and a per-category
    /// color list must match the label count as well.
    pub fn validate(&self) -> Result<()> {
        if self.data.datasets.is_empty() {
            return Err(ChartBindError::validation_field(
                "chart must declare at least one dataset",
                "data.datasets",
            ));
        }

        let label_count = self.data.labels.len();
        for (index, dataset) in self.data.datasets.iter().enumerate() {
            if dataset.data.len() != label_count {
                return Err(ChartBindError::validation_field(
                    format!(
                        "dataset {} has {} values for {} labels",
                        index,
                        dataset.data.len(),
                        label_count
                    ),
                    "data.datasets.data",
                ));
            }

            if let Some(colors) = &dataset.background_color {
                if colors.len() != label_count {
                    return Err(ChartBindError::validation_field(
                        format!(
                            "dataset {} has {} colors for {} labels",
                            index,
                            colors.len(),
                            label_count
                        ),
                        "data.datasets.backgroundColor",
                    ));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn votes_payload() -> &'static str {
        r#"{
            "type": "bar",
            "data": {
                "labels": ["Red", "Blue"],
                "datasets": [{
                    "label": "Number of Votes",
                    "data": [12, 19],
                    "borderWidth": 1,
                    "backgroundColor": ["red", "blue"]
                }]
            },
            "options": {
                "scales": {
                    "y": {
                        "beginAtZero": true
                    }
                }
            }
        }"#
    }

    #[test]
    fn test_parse_chart_js_payload() {
        let config = ChartConfig::from_json(votes_payload()).unwrap();

        assert_eq!(config.kind, ChartKind::Bar);
        assert_eq!(config.data.labels, vec!["Red", "Blue"]);

        let dataset = &config.data.datasets[0];
        assert_eq!(dataset.label.as_deref(), Some("Number of Votes"));
        assert_eq!(dataset.data, vec![12.0, 19.0]);
        assert_eq!(dataset.border_width, Some(1));
        assert_eq!(
            dataset.background_color.as_deref(),
            Some(&["red".to_string(), "blue".to_string()][..])
        );

        let y = config.options.scales.unwrap().y.unwrap();
        assert!(y.begin_at_zero);
    }

    #[test]
    fn test_options_default_when_missing() {
        let payload = r#"{"type": "line", "data": {"labels": ["a"], "datasets": [{"data": [1]}]}}"#;
        let config = ChartConfig::from_json(payload).unwrap();

        assert_eq!(config.kind, ChartKind::Line);
        assert!(config.options.scales.is_none());
        assert!(config.data.datasets[0].border_width.is_none());
    }

    #[test]
    fn test_malformed_payload_is_deserialization_error() {
        let result = ChartConfig::from_json("{not json at all");
        assert!(matches!(
            result.unwrap_err(),
            ChartBindError::Deserialization(_)
        ));
    }

    #[test]
    fn test_unknown_chart_kind_is_rejected() {
        let payload = r#"{"type": "hologram", "data": {"labels": [], "datasets": []}}"#;
        let result = ChartConfig::from_json(payload);
        assert!(matches!(
            result.unwrap_err(),
            ChartBindError::Deserialization(_)
        ));
    }

    #[test]
    fn test_missing_type_is_rejected() {
        let payload = r#"{"data": {"labels": [], "datasets": []}}"#;
        assert!(ChartConfig::from_json(payload).is_err());
    }

    #[test]
    fn test_validate_accepts_aligned_lists() {
        let config = ChartConfig::from_json(votes_payload()).unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_datasets() {
        let payload = r#"{"type": "bar", "data": {"labels": ["a"], "datasets": []}}"#;
        let config = ChartConfig::from_json(payload).unwrap();

        let error = config.validate().unwrap_err();
        assert!(matches!(error, ChartBindError::Validation { .. }));
        assert!(error.to_string().contains("at least one dataset"));
    }

    #[test]
    fn test_validate_rejects_misaligned_values() {
        let payload =
            r#"{"type": "bar", "data": {"labels": ["a", "b"], "datasets": [{"data": [1]}]}}"#;
        let config = ChartConfig::from_json(payload).unwrap();

        let error = config.validate().unwrap_err();
        assert!(error.to_string().contains("1 values for 2 labels"));
    }

    #[test]
    fn test_validate_rejects_misaligned_colors() {
        let payload = r#"{
            "type": "bar",
            "data": {
                "labels": ["a", "b"],
                "datasets": [{"data": [1, 2], "backgroundColor": ["red"]}]
            }
        }"#;
        let config = ChartConfig::from_json(payload).unwrap();

        let error = config.validate().unwrap_err();
        assert!(error.to_string().contains("1 colors for 2 labels"));
    }

    #[test]
    fn test_wire_form_roundtrip_preserves_camel_case() {
        let config = ChartConfig::from_json(votes_payload()).unwrap();
        let json = config.to_json().unwrap();

        assert!(json.contains("\"type\":\"bar\""));
        assert!(json.contains("\"borderWidth\":1"));
        assert!(json.contains("\"backgroundColor\""));
        assert!(json.contains("\"beginAtZero\":true"));

        let reparsed = ChartConfig::from_json(&json).unwrap();
        assert_eq!(reparsed, config);
    }
}

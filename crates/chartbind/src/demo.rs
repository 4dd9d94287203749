//! The fixed demonstration bar chart.

use crate::chart::{AxisOptions, ChartConfig, ChartData, ChartKind, ChartOptions, Dataset, ScaleOptions};
use crate::document::{Document, WidgetHandle};
use crate::widget::WidgetFactory;
use chartbind_common::{ChartBindError, Result, WidgetId};
use tracing::info;

/// Reserved identifier of the element the demo chart renders into.
pub const DEMO_ELEMENT_ID: &str = "my";

const DEMO_LABELS: [&str; 6] = ["Red", "Blue", "Yellow", "Green", "Purple", "Orange"];
const DEMO_VALUES: [f64; 6] = [12.0, 19.0, 3.0, 5.0, 2.0, 50.0];
const DEMO_COLORS: [&str; 6] = ["red", "blue", "yellow", "green", "purple", "orange"];
const DEMO_DATASET_LABEL: &str = "Number of Votes";

/// Builds the literal configuration of the demo bar chart.
pub fn demo_chart_config() -> ChartConfig {
    ChartConfig {
        kind: ChartKind::Bar,
        data: ChartData {
            labels: DEMO_LABELS.iter().map(ToString::to_string).collect(),
            datasets: vec![Dataset {
                label: Some(DEMO_DATASET_LABEL.to_string()),
                data: DEMO_VALUES.to_vec(),
                border_width: Some(1),
                background_color: Some(DEMO_COLORS.iter().map(ToString::to_string).collect()),
            }],
        },
        options: ChartOptions {
            scales: Some(ScaleOptions {
                y: Some(AxisOptions { begin_at_zero: true }),
            }),
        },
    }
}

/// Installs the demo chart into the element with the reserved id.
pub async fn install_demo_chart(
    document: &mut Document,
    factory: &dyn WidgetFactory,
) -> Result<WidgetId> {
    install_demo_chart_at(document, factory, DEMO_ELEMENT_ID).await
}

/// Installs the demo chart into the element with the given id.
///
/// Fails with [`ChartBindError::ElementNotFound`] before touching the
/// document when the target element is absent.
pub async fn install_demo_chart_at(
    document: &mut Document,
    factory: &dyn WidgetFactory,
    element_id: &str,
) -> Result<WidgetId> {
    if document.element_by_id(element_id).is_none() {
        return Err(ChartBindError::element_not_found(element_id));
    }

    let config = demo_chart_config();
    let widget_id = document.allocate_widget_id();
    let element = document
        .element_by_id_mut(element_id)
        .ok_or_else(|| ChartBindError::element_not_found(element_id))?;

    let widget = factory.create(element, &config).await?;
    element.attach_widget(WidgetHandle::new(widget_id, widget));

    info!(%widget_id, element = element_id, "installed demo chart");
    Ok(widget_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_config_shape() {
        let config = demo_chart_config();

        assert_eq!(config.kind, ChartKind::Bar);
        assert_eq!(
            config.data.labels,
            vec!["Red", "Blue", "Yellow", "Green", "Purple", "Orange"]
        );

        let dataset = &config.data.datasets[0];
        assert_eq!(dataset.label.as_deref(), Some("Number of Votes"));
        assert_eq!(dataset.data, vec![12.0, 19.0, 3.0, 5.0, 2.0, 50.0]);
        assert_eq!(dataset.border_width, Some(1));
        assert_eq!(
            dataset.background_color.as_deref().unwrap(),
            &["red", "blue", "yellow", "green", "purple", "orange"]
        );

        let y = config.options.scales.as_ref().unwrap().y.as_ref().unwrap();
        assert!(y.begin_at_zero);
    }

    #[test]
    fn test_demo_config_lists_are_aligned() {
        let config = demo_chart_config();
        assert!(config.validate().is_ok());

        let dataset = &config.data.datasets[0];
        assert_eq!(config.data.labels.len(), dataset.data.len());
        assert_eq!(
            config.data.labels.len(),
            dataset.background_color.as_ref().unwrap().len()
        );
    }
}

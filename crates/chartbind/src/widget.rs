//! Widget and factory traits, the seam to the external rendering component.

use crate::chart::ChartConfig;
use crate::document::Element;
use async_trait::async_trait;
use chartbind_common::Result;

/// A constructed rendering widget.
///
/// The widget itself is a black box; this trait only exposes the
/// lifecycle calls a stored handle exists for.
pub trait Widget: Send + Sync {
    /// Redraws the widget with a new configuration.
    fn update(&mut self, config: &ChartConfig) -> Result<()>;

    /// Tears the widget down, releasing whatever the rendering
    /// component holds for it.
    fn destroy(&mut self);
}

/// Constructor for rendering widgets.
///
/// Implementations wrap whatever rendering component the host embeds;
/// the binder only needs a target element and its parsed configuration.
#[async_trait]
pub trait WidgetFactory: Send + Sync {
    /// Constructs a widget for the given element and configuration.
    async fn create(&self, target: &Element, config: &ChartConfig) -> Result<Box<dyn Widget>>;

    /// Name of this factory, for diagnostics.
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ChartKind;

    struct NullWidget;

    impl Widget for NullWidget {
        fn update(&mut self, _config: &ChartConfig) -> Result<()> {
            Ok(())
        }

        fn destroy(&mut self) {}
    }

    struct NullFactory;

    #[async_trait]
    impl WidgetFactory for NullFactory {
        async fn create(
            &self,
            _target: &Element,
            _config: &ChartConfig,
        ) -> Result<Box<dyn Widget>> {
            Ok(Box::new(NullWidget))
        }

        fn name(&self) -> &'static str {
            "null"
        }
    }

    #[tokio::test]
    async fn test_factory_constructs_boxed_widget() {
        let factory = NullFactory;
        let element = Element::new("div");
        let config = ChartConfig::from_json(
            r#"{"type": "bar", "data": {"labels": ["a"], "datasets": [{"data": [1]}]}}"#,
        )
        .unwrap();

        let mut widget = factory.create(&element, &config).await.unwrap();
        assert_eq!(config.kind, ChartKind::Bar);
        assert!(widget.update(&config).is_ok());
        widget.destroy();
    }
}

//! Discovery-and-bind: scan the document for marked elements and
//! construct a widget for each.

use crate::chart::ChartConfig;
use crate::document::{Document, ElementPath, WidgetHandle};
use crate::widget::WidgetFactory;
use chartbind_common::{ChartBindError, ElementId, FailurePolicy, Result, WidgetId};
use tracing::{debug, info, warn};

/// Attribute the binder scans for when none is configured.
pub const DEFAULT_MARKER_ATTRIBUTE: &str = "data-chart";

/// One successfully bound chart.
#[derive(Debug)]
pub struct BoundChart {
    /// Id of the constructed widget.
    pub widget_id: WidgetId,
    /// Id of the target element, when it has one.
    pub element_id: Option<ElementId>,
    /// Path of the target element in the document.
    pub path: ElementPath,
}

/// One element that failed to bind under the isolate policy.
#[derive(Debug)]
pub struct BindFailure {
    /// Position of the element in the matched batch.
    pub index: usize,
    /// Id of the target element, when it has one.
    pub element_id: Option<ElementId>,
    /// The error that stopped this element's binding.
    pub error: ChartBindError,
}

/// Outcome of one discovery-and-bind run.
#[derive(Debug, Default)]
pub struct BindReport {
    /// Charts bound, in document order.
    pub bound: Vec<BoundChart>,
    /// Elements that failed, in document order.
    pub failures: Vec<BindFailure>,
}

impl BindReport {
    /// Number of widgets constructed in this run.
    pub fn bound_count(&self) -> usize {
        self.bound.len()
    }

    /// Whether every matched element bound successfully.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Scans a document for marked elements and binds widgets to them.
#[derive(Debug, Clone)]
pub struct Binder {
    marker_attribute: String,
    failure_policy: FailurePolicy,
}

impl Binder {
    /// Creates a binder with an explicit marker attribute and policy.
    pub fn new(marker_attribute: impl Into<String>, failure_policy: FailurePolicy) -> Self {
        Self {
            marker_attribute: marker_attribute.into(),
            failure_policy,
        }
    }

    /// The attribute this binder scans for.
    pub fn marker_attribute(&self) -> &str {
        &self.marker_attribute
    }

    /// The policy applied when one element fails to bind.
    pub fn failure_policy(&self) -> FailurePolicy {
        self.failure_policy
    }

    /// Binds a widget to every element carrying the marker attribute.
    ///
    /// Matched elements are materialized up front and processed
    /// sequentially in document order. Under
    /// [`FailurePolicy::Isolate`] a failing element is recorded in the
    /// report and the rest of the batch still binds; under
    /// [`FailurePolicy::Abort`] the first failure propagates and the
    /// remaining elements are skipped.
    pub async fn bind(
        &self,
        document: &mut Document,
        factory: &dyn WidgetFactory,
    ) -> Result<BindReport> {
        let paths = document.marked_paths(&self.marker_attribute);
        debug!(
            matched = paths.len(),
            attribute = %self.marker_attribute,
            "discovered chart placeholders"
        );

        let mut report = BindReport::default();
        for (index, path) in paths.iter().enumerate() {
            match self.bind_one(document, path, factory).await {
                Ok(entry) => report.bound.push(entry),
                Err(error) => match self.failure_policy {
                    FailurePolicy::Isolate => {
                        warn!(%error, index, "failed to bind chart element, continuing");
                        let element_id = document
                            .element_at(path)
                            .and_then(|element| element.id())
                            .map(ElementId::new);
                        report.failures.push(BindFailure {
                            index,
                            element_id,
                            error,
                        });
                    }
                    FailurePolicy::Abort => {
                        warn!(%error, index, "failed to bind chart element, aborting batch");
                        return Err(error);
                    }
                },
            }
        }

        info!(
            bound = report.bound.len(),
            failed = report.failures.len(),
            factory = factory.name(),
            "chart binding finished"
        );
        Ok(report)
    }

    async fn bind_one(
        &self,
        document: &mut Document,
        path: &ElementPath,
        factory: &dyn WidgetFactory,
    ) -> Result<BoundChart> {
        let widget_id = document.allocate_widget_id();
        let element = document
            .element_at_mut(path)
            .ok_or_else(|| ChartBindError::new("marked element vanished during binding"))?;

        let payload = element
            .attribute(&self.marker_attribute)
            .ok_or_else(|| ChartBindError::new("marker attribute vanished during binding"))?
            .to_string();

        let config = ChartConfig::from_json(&payload)?;
        config.validate()?;

        let widget = factory.create(element, &config).await?;
        let element_id = element.id().map(ElementId::new);
        let replaced = element.attach_widget(WidgetHandle::new(widget_id, widget));
        if let Some(old_id) = replaced {
            debug!(%widget_id, %old_id, "replaced previously bound widget");
        }

        debug!(%widget_id, kind = %config.kind, "bound chart widget");
        Ok(BoundChart {
            widget_id,
            element_id,
            path: path.clone(),
        })
    }
}

impl Default for Binder {
    fn default() -> Self {
        Self::new(DEFAULT_MARKER_ATTRIBUTE, FailurePolicy::Isolate)
    }
}

/// Explicit initialization entry point: binds every marked element in
/// the document with the default binder.
pub async fn initialize_charts(
    document: &mut Document,
    factory: &dyn WidgetFactory,
) -> Result<BindReport> {
    Binder::default().bind(document, factory).await
}

//! Settings-wired front door running both load-time operations behind
//! one readiness point.

use crate::binder::{BindReport, Binder};
use crate::demo::install_demo_chart_at;
use crate::document::Document;
use crate::widget::WidgetFactory;
use chartbind_common::{FailurePolicy, Result, WidgetId};
use chartbind_config::Settings;
use tracing::warn;

/// Outcome of a full bootstrap run.
#[derive(Debug)]
pub struct BootstrapOutcome {
    /// Report of the discovery-and-bind step.
    pub report: BindReport,
    /// Widget id of the demo chart, when the demo is enabled and bound.
    pub demo_widget: Option<WidgetId>,
}

/// Runs discovery-and-bind followed by the demo chart installation.
///
/// Both operations execute behind the caller's single readiness point,
/// discovery first, so the demo target is subject to the same document
/// state as every other element.
#[derive(Debug, Clone)]
pub struct Bootstrap {
    binder: Binder,
    demo_enabled: bool,
    demo_element_id: String,
    failure_policy: FailurePolicy,
}

impl Bootstrap {
    /// Builds a bootstrap from loaded settings.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            binder: Binder::new(
                settings.binding.marker_attribute.clone(),
                settings.binding.failure_policy,
            ),
            demo_enabled: settings.demo.enabled,
            demo_element_id: settings.demo.element_id.clone(),
            failure_policy: settings.binding.failure_policy,
        }
    }

    /// Runs both operations against the document.
    ///
    /// A demo failure follows the configured failure policy: under
    /// [`FailurePolicy::Isolate`] it is logged and the bind report is
    /// still returned; under [`FailurePolicy::Abort`] it propagates.
    pub async fn run(
        &self,
        document: &mut Document,
        factory: &dyn WidgetFactory,
    ) -> Result<BootstrapOutcome> {
        let report = self.binder.bind(document, factory).await?;

        let demo_widget = if self.demo_enabled {
            match install_demo_chart_at(document, factory, &self.demo_element_id).await {
                Ok(widget_id) => Some(widget_id),
                Err(error) => match self.failure_policy {
                    FailurePolicy::Isolate => {
                        warn!(%error, element = %self.demo_element_id, "demo chart installation failed");
                        None
                    }
                    FailurePolicy::Abort => return Err(error),
                },
            }
        } else {
            None
        };

        Ok(BootstrapOutcome {
            report,
            demo_widget,
        })
    }
}

impl Default for Bootstrap {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

//! # chartbind
//!
//! Chart widget bootstrapping for document trees.
//!
//! Elements carrying a marker attribute embed a Chart.js-style JSON
//! payload; the binder discovers them, deserializes the payload into a
//! validated [`ChartConfig`], constructs a widget for each through a
//! caller-supplied [`WidgetFactory`], and stores the resulting handle
//! on the element. A second, independent operation installs a fixed
//! demonstration bar chart into one element looked up by identifier.
//!
//! Rendering itself is out of scope: the factory wraps whatever
//! rendering component the host embeds.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod binder;
pub mod bootstrap;
pub mod chart;
pub mod demo;
pub mod document;
pub mod widget;

pub use binder::{
    initialize_charts, BindFailure, BindReport, Binder, BoundChart, DEFAULT_MARKER_ATTRIBUTE,
};
pub use bootstrap::{Bootstrap, BootstrapOutcome};
pub use chart::{
    AxisOptions, ChartConfig, ChartData, ChartKind, ChartOptions, Dataset, ScaleOptions,
};
pub use demo::{demo_chart_config, install_demo_chart, install_demo_chart_at, DEMO_ELEMENT_ID};
pub use document::{Document, Element, ElementPath, WidgetHandle};
pub use widget::{Widget, WidgetFactory};

// The error and policy types travel with the operations that raise them.
pub use chartbind_common::{ChartBindError, ElementId, FailurePolicy, Result, WidgetId};

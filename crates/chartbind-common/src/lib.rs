//! Common utilities and types for the chartbind workspace

pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use error::{ChartBindError, Result};
pub use logging::{init_default_logging, init_dev_logging, init_logging, LoggingConfig};
pub use types::{ElementId, FailurePolicy, WidgetId};

//! chart-widgets: notebook widget models for Visa Chart Components.
//!
//! Each widget holds the declarative state of one chart (type tag, data,
//! accessors, titles, accessibility and renderer config) and mirrors it to a
//! front-end view over the Jupyter widget comm protocol. Rendering happens
//! entirely in the front-end; this crate normalizes tabular input into row
//! records and keeps both sides in sync.

pub mod api;
pub mod core;
pub mod error;
pub mod protocol;
pub mod sink;
pub mod telemetry;
pub mod version;

pub use api::{ChartVariant, ChartWidget, WidgetOptions};
pub use core::{DataInput, DataSet, Record, Table};
pub use error::{WidgetError, WidgetResult};
pub use version::{VERSION_INFO, VersionInfo};

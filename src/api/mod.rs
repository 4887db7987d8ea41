//! Chart widget state model.

mod data_controller;
pub mod fields;
mod observer;
mod options;
mod registry;
mod remote;
mod sync_dispatch;
mod value;
mod variant;
mod widget;

pub use data_controller::normalize_data;
pub use observer::{ChangeOrigin, FieldChange, FieldObserver};
pub use options::{
    DEFAULT_FRONTEND_MODULE, DEFAULT_MODEL_NAME, DEFAULT_VIEW_NAME, FrontendModule,
    WIDGET_COMM_TARGET, WidgetOptions,
};
pub use registry::{FieldKind, FieldSpec, SyncPolicy, SyncRegistry};
pub use value::{DataValue, FieldValue};
pub use variant::{
    AccessorSpec, ChartDescriptor, ChartDescriptorBuilder, ChartVariant, DataFieldSpec,
    DataPolicy, LocalFieldSpec,
};
pub use widget::{ChartWidget, CommState};

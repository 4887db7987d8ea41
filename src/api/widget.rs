use indexmap::{IndexMap, IndexSet};
use serde_json::{Map, Value, json};
use tracing::debug;
use uuid::Uuid;

use crate::error::WidgetResult;
use crate::protocol::{EmbeddedWidgetState, WIDGET_VIEW_MIME, WidgetView};
use crate::sink::StateSink;

use super::fields;
use super::observer::FieldObserver;
use super::options::WidgetOptions;
use super::registry::SyncRegistry;
use super::value::{DataValue, FieldValue};
use super::variant::{ChartDescriptor, ChartVariant};

/// Lifecycle of the comm channel backing a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommState {
    /// Constructed with `auto_open` disabled; nothing sent yet.
    Pending,
    Open,
    /// Closed by either side. Local changes are kept but no longer sent.
    Closed,
}

/// Declarative state of one chart, mirrored to a front-end view.
///
/// Every declared field is observable and, unless local-only, pushed to the
/// sink on change. Remote updates are written back through the same
/// validation as local assignments.
pub struct ChartWidget<S: StateSink> {
    pub(super) descriptor: ChartDescriptor,
    pub(super) options: WidgetOptions,
    pub(super) registry: SyncRegistry,
    pub(super) values: IndexMap<String, FieldValue>,
    pub(super) comm_id: String,
    pub(super) comm: CommState,
    pub(super) held: Option<IndexSet<String>>,
    pub(super) observers: Vec<Box<dyn FieldObserver>>,
    pub(super) sink: S,
}

impl<S: StateSink> ChartWidget<S> {
    /// Builds a widget for a built-in chart with default options.
    pub fn new(variant: ChartVariant, sink: S) -> Self {
        Self::from_parts(variant.descriptor(), WidgetOptions::default(), sink)
    }

    pub fn with_options(variant: ChartVariant, options: WidgetOptions, sink: S) -> Self {
        Self::from_parts(variant.descriptor(), options, sink)
    }

    /// Builds a widget for a custom descriptor.
    pub fn with_descriptor(
        descriptor: ChartDescriptor,
        options: WidgetOptions,
        sink: S,
    ) -> WidgetResult<Self> {
        descriptor.validate()?;
        Ok(Self::from_parts(descriptor, options, sink))
    }

    fn from_parts(descriptor: ChartDescriptor, options: WidgetOptions, sink: S) -> Self {
        let registry = SyncRegistry::build(&descriptor, &options.frontend);
        let values = registry
            .iter()
            .map(|(name, spec)| (name.to_owned(), spec.default.clone()))
            .collect();
        let comm_id = options
            .comm_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().simple().to_string());
        let auto_open = options.auto_open;

        let mut widget = Self {
            descriptor,
            options,
            registry,
            values,
            comm_id,
            comm: CommState::Pending,
            held: None,
            observers: Vec::new(),
            sink,
        };
        debug!(
            chart_type = widget.chart_type(),
            comm_id = %widget.comm_id,
            fields = widget.registry.len(),
            "constructed chart widget"
        );
        if auto_open {
            widget.open();
        }
        widget
    }

    #[must_use]
    pub fn chart_type(&self) -> &str {
        self.descriptor.tag()
    }

    #[must_use]
    pub fn descriptor(&self) -> &ChartDescriptor {
        &self.descriptor
    }

    #[must_use]
    pub fn options(&self) -> &WidgetOptions {
        &self.options
    }

    #[must_use]
    pub fn registry(&self) -> &SyncRegistry {
        &self.registry
    }

    #[must_use]
    pub fn comm_id(&self) -> &str {
        &self.comm_id
    }

    #[must_use]
    pub fn comm_state(&self) -> CommState {
        self.comm
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.comm == CommState::Open
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    /// Value of a text field (accessor, title or identity field).
    #[must_use]
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_text)
    }

    #[must_use]
    pub fn accessor(&self, name: &str) -> Option<&str> {
        self.descriptor.accessor_default(name)?;
        self.text(name)
    }

    #[must_use]
    pub fn main_title(&self) -> &str {
        self.text(fields::MAIN_TITLE).unwrap_or_default()
    }

    #[must_use]
    pub fn sub_title(&self) -> &str {
        self.text(fields::SUB_TITLE).unwrap_or_default()
    }

    #[must_use]
    pub fn accessibility(&self) -> Option<&Map<String, Value>> {
        self.get(fields::ACCESSIBILITY).and_then(FieldValue::as_mapping)
    }

    #[must_use]
    pub fn config(&self) -> Option<&Map<String, Value>> {
        self.get(fields::CONFIG).and_then(FieldValue::as_mapping)
    }

    /// Content of the primary data field.
    #[must_use]
    pub fn data(&self) -> Option<&DataValue> {
        self.data_field(self.descriptor.primary_data_field())
    }

    #[must_use]
    pub fn data_field(&self, name: &str) -> Option<&DataValue> {
        self.get(name).and_then(FieldValue::as_data)
    }

    /// Full synchronized state, in advertised field order.
    #[must_use]
    pub fn state(&self) -> Map<String, Value> {
        self.state_of(self.registry.synced_names())
    }

    pub(super) fn state_of<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> Map<String, Value> {
        names
            .into_iter()
            .filter_map(|name| {
                self.values
                    .get(name)
                    .map(|value| (name.to_owned(), value.to_json()))
            })
            .collect()
    }

    /// Entry for this widget in a saved widget-state document.
    #[must_use]
    pub fn embed_state(&self) -> EmbeddedWidgetState {
        let frontend = &self.options.frontend;
        EmbeddedWidgetState {
            model_name: frontend.model_name.clone(),
            model_module: frontend.module.clone(),
            model_module_version: frontend.module_version.clone(),
            state: self.state(),
        }
    }

    /// Display bundle referencing this widget's model.
    #[must_use]
    pub fn mime_bundle(&self) -> Value {
        json!({
            "text/plain": format!("{}(chartType={:?})", self.options.frontend.model_name, self.chart_type()),
            WIDGET_VIEW_MIME: WidgetView::new(self.comm_id.clone()),
        })
    }

    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}

use serde_json::{Map, Value};
use tracing::debug;

use crate::core::{DataInput, json_type_name};
use crate::error::{WidgetError, WidgetResult};
use crate::sink::StateSink;

use super::fields;
use super::observer::ChangeOrigin;
use super::registry::{FieldKind, FieldSpec};
use super::value::{DataValue, FieldValue};
use super::variant::DataPolicy;
use super::ChartWidget;

const DATA_EXPECTATION: &str = "a table or a sequence of records";

impl<S: StateSink> ChartWidget<S> {
    /// Replaces the primary data field (`data`, or `linkData` for alluvial diagrams).
    pub fn set_data(&mut self, input: impl Into<DataInput>) -> WidgetResult<()> {
        let name = self.descriptor.primary_data_field().to_owned();
        self.set_data_field(&name, input)
    }

    pub fn set_link_data(&mut self, input: impl Into<DataInput>) -> WidgetResult<()> {
        self.set_data_field(fields::LINK_DATA, input)
    }

    pub fn set_node_data(&mut self, input: impl Into<DataInput>) -> WidgetResult<()> {
        self.set_data_field(fields::NODE_DATA, input)
    }

    /// Replaces a declared data field, applying that field's policy.
    ///
    /// On error the previous value is kept and nothing is sent.
    pub fn set_data_field(&mut self, name: &str, input: impl Into<DataInput>) -> WidgetResult<()> {
        let spec = self.writable_spec(name)?;
        let FieldKind::Data(policy) = spec.kind else {
            return Err(WidgetError::TypeMismatch {
                field: name.to_owned(),
                expected: kind_expectation(spec.kind),
                found: "data input".to_owned(),
            });
        };
        let input = input.into();
        debug!(comm_id = %self.comm_id, field = name, input = input.kind(), ?policy, "assign data field");
        let value = normalize_data(name, policy, input)?;
        self.commit(name, FieldValue::Data(value), ChangeOrigin::Local);
        Ok(())
    }

    /// Assigns any writable field from a JSON value.
    ///
    /// Data fields go through the same normalization as `set_data_field`.
    pub fn set_field(&mut self, name: &str, value: Value) -> WidgetResult<()> {
        let kind = self.writable_spec(name)?.kind;
        let value = coerce_field(name, kind, value)?;
        self.commit(name, value, ChangeOrigin::Local);
        Ok(())
    }

    pub fn set_accessor(&mut self, name: &str, column: impl Into<String>) -> WidgetResult<()> {
        if self.descriptor.accessor_default(name).is_none() {
            return Err(WidgetError::UnknownField(name.to_owned()));
        }
        self.set_field(name, Value::String(column.into()))
    }

    pub fn set_main_title(&mut self, title: impl Into<String>) -> WidgetResult<()> {
        self.set_field(fields::MAIN_TITLE, Value::String(title.into()))
    }

    pub fn set_sub_title(&mut self, title: impl Into<String>) -> WidgetResult<()> {
        self.set_field(fields::SUB_TITLE, Value::String(title.into()))
    }

    pub fn set_accessibility(&mut self, accessibility: Map<String, Value>) -> WidgetResult<()> {
        self.set_field(fields::ACCESSIBILITY, Value::Object(accessibility))
    }

    pub fn set_config(&mut self, config: Map<String, Value>) -> WidgetResult<()> {
        self.set_field(fields::CONFIG, Value::Object(config))
    }

    pub(super) fn writable_spec(&self, name: &str) -> WidgetResult<&FieldSpec> {
        let spec = self
            .registry
            .get(name)
            .ok_or_else(|| WidgetError::UnknownField(name.to_owned()))?;
        if spec.read_only {
            return Err(WidgetError::ReadOnlyField(name.to_owned()));
        }
        Ok(spec)
    }
}

/// Applies a data field policy to a resolved input.
pub fn normalize_data(field: &str, policy: DataPolicy, input: DataInput) -> WidgetResult<DataValue> {
    match (policy, input) {
        (_, DataInput::Records(records)) => Ok(DataValue::Records(records)),
        (DataPolicy::Normalize, DataInput::Table(table)) => {
            Ok(DataValue::Records(table.to_records()))
        }
        (DataPolicy::PassThrough, DataInput::Table(table)) => Ok(DataValue::Table(table)),
        (_, DataInput::Unsupported { type_name }) => Err(WidgetError::TypeMismatch {
            field: field.to_owned(),
            expected: DATA_EXPECTATION,
            found: type_name,
        }),
    }
}

pub(super) fn coerce_field(name: &str, kind: FieldKind, value: Value) -> WidgetResult<FieldValue> {
    let mismatch = |value: &Value| WidgetError::TypeMismatch {
        field: name.to_owned(),
        expected: kind_expectation(kind),
        found: json_type_name(value).to_owned(),
    };
    match (kind, value) {
        (FieldKind::Text, Value::String(text)) => Ok(FieldValue::Text(text)),
        (FieldKind::Mapping, Value::Object(mapping)) => Ok(FieldValue::Mapping(mapping)),
        (FieldKind::Data(policy), value) => {
            normalize_data(name, policy, DataInput::from(value)).map(FieldValue::Data)
        }
        (FieldKind::Any, value) => Ok(FieldValue::Json(value)),
        (_, value) => Err(mismatch(&value)),
    }
}

fn kind_expectation(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Text => "a string",
        FieldKind::Mapping => "an object",
        FieldKind::Data(_) => DATA_EXPECTATION,
        FieldKind::Any => "any value",
    }
}

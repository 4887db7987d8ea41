use indexmap::IndexMap;
use serde_json::Map;

use super::fields;
use super::options::FrontendModule;
use super::value::{DataValue, FieldValue};
use super::variant::{ChartDescriptor, DataPolicy};

/// Whether a field change is mirrored to the front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyncPolicy {
    LocalOnly,
    PushOnChange,
}

/// Value shape a field accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Text,
    Mapping,
    Data(DataPolicy),
    Any,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub kind: FieldKind,
    pub policy: SyncPolicy,
    pub read_only: bool,
    pub default: FieldValue,
}

impl FieldSpec {
    fn synced(kind: FieldKind, default: FieldValue) -> Self {
        Self {
            kind,
            policy: SyncPolicy::PushOnChange,
            read_only: false,
            default,
        }
    }

    fn identity(value: &str) -> Self {
        Self {
            kind: FieldKind::Text,
            policy: SyncPolicy::PushOnChange,
            read_only: true,
            default: FieldValue::Text(value.to_owned()),
        }
    }

    #[must_use]
    pub fn is_synced(&self) -> bool {
        self.policy == SyncPolicy::PushOnChange
    }
}

/// Field name to sync policy, built once per descriptor.
///
/// Iteration order is the order fields are advertised in `comm_open`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SyncRegistry {
    fields: IndexMap<String, FieldSpec>,
}

impl SyncRegistry {
    #[must_use]
    pub fn build(descriptor: &ChartDescriptor, frontend: &FrontendModule) -> Self {
        let mut registry = Self::default();

        registry.insert(fields::MODEL_MODULE, FieldSpec::identity(&frontend.module));
        registry.insert(
            fields::MODEL_MODULE_VERSION,
            FieldSpec::identity(&frontend.module_version),
        );
        registry.insert(fields::MODEL_NAME, FieldSpec::identity(&frontend.model_name));
        registry.insert(fields::VIEW_MODULE, FieldSpec::identity(&frontend.module));
        registry.insert(
            fields::VIEW_MODULE_VERSION,
            FieldSpec::identity(&frontend.module_version),
        );
        registry.insert(fields::VIEW_NAME, FieldSpec::identity(&frontend.view_name));
        registry.insert(fields::CHART_TYPE, FieldSpec::identity(descriptor.tag()));

        for field in descriptor.data_fields() {
            registry.insert(
                &field.name,
                FieldSpec::synced(
                    FieldKind::Data(field.policy),
                    FieldValue::Data(DataValue::default()),
                ),
            );
        }
        for accessor in descriptor.accessors() {
            registry.insert(
                &accessor.name,
                FieldSpec::synced(FieldKind::Text, FieldValue::Text(accessor.default.to_string())),
            );
        }

        registry.insert(
            fields::MAIN_TITLE,
            FieldSpec::synced(FieldKind::Text, FieldValue::Text(String::new())),
        );
        registry.insert(
            fields::SUB_TITLE,
            FieldSpec::synced(FieldKind::Text, FieldValue::Text(String::new())),
        );
        registry.insert(
            fields::ACCESSIBILITY,
            FieldSpec::synced(FieldKind::Mapping, FieldValue::Mapping(Map::new())),
        );
        registry.insert(
            fields::CONFIG,
            FieldSpec::synced(FieldKind::Mapping, FieldValue::Mapping(Map::new())),
        );

        for field in descriptor.local_fields() {
            registry.insert(
                &field.name,
                FieldSpec {
                    kind: FieldKind::Any,
                    policy: SyncPolicy::LocalOnly,
                    read_only: false,
                    default: FieldValue::Json(field.default.clone()),
                },
            );
        }

        registry
    }

    fn insert(&mut self, name: &str, spec: FieldSpec) {
        self.fields.insert(name.to_owned(), spec);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldSpec)> {
        self.fields.iter().map(|(name, spec)| (name.as_str(), spec))
    }

    /// Names of fields mirrored to the front-end, in advertised order.
    pub fn synced_names(&self) -> impl Iterator<Item = &str> {
        self.iter()
            .filter(|(_, spec)| spec.is_synced())
            .map(|(name, _)| name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::variant::ChartVariant;

    #[test]
    fn identity_fields_are_read_only_and_synced() {
        let registry =
            SyncRegistry::build(&ChartVariant::PieChart.descriptor(), &FrontendModule::default());
        for name in [fields::CHART_TYPE, fields::MODEL_NAME, fields::VIEW_MODULE_VERSION] {
            let spec = registry.get(name).expect("identity field");
            assert!(spec.read_only);
            assert!(spec.is_synced());
        }
    }

    #[test]
    fn local_fields_are_not_advertised() {
        let descriptor = ChartDescriptor::builder("gauge")
            .data_field("data", DataPolicy::Normalize)
            .local_field("notes", serde_json::Value::Null)
            .build()
            .expect("descriptor");
        let registry = SyncRegistry::build(&descriptor, &FrontendModule::default());
        assert!(registry.contains("notes"));
        assert!(registry.synced_names().all(|name| name != "notes"));
    }
}

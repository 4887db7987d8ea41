use serde_json::{Map, Value, json};

use crate::core::{DataSet, Table};

/// Content of a data field after its policy has been applied.
#[derive(Debug, Clone, PartialEq)]
pub enum DataValue {
    Records(DataSet),
    /// Only pass-through fields hold a raw table.
    Table(Table),
}

impl DataValue {
    #[must_use]
    pub fn as_records(&self) -> Option<&DataSet> {
        match self {
            Self::Records(records) => Some(records),
            Self::Table(_) => None,
        }
    }

    #[must_use]
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Self::Table(table) => Some(table),
            Self::Records(_) => None,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Records(records) => records.len(),
            Self::Table(table) => table.height(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Wire form: records as an array, tables as `{"columns", "rows"}`.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Records(records) => records.to_value(),
            Self::Table(table) => json!({
                "columns": table.column_names(),
                "rows": table.rows(),
            }),
        }
    }
}

impl Default for DataValue {
    fn default() -> Self {
        Self::Records(DataSet::default())
    }
}

/// Value held by one widget field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Mapping(Map<String, Value>),
    Data(DataValue),
    /// Untyped value of a local-only field.
    Json(Value),
}

impl FieldValue {
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_mapping(&self) -> Option<&Map<String, Value>> {
        match self {
            Self::Mapping(mapping) => Some(mapping),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_data(&self) -> Option<&DataValue> {
        match self {
            Self::Data(data) => Some(data),
            _ => None,
        }
    }

    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Text(text) => Value::String(text.clone()),
            Self::Mapping(mapping) => Value::Object(mapping.clone()),
            Self::Data(data) => data.to_json(),
            Self::Json(value) => value.clone(),
        }
    }
}

use serde_json::Value;

use crate::core::record::{DataSet, Record};
use crate::core::table::Table;

/// Shape of a value offered to a data field, resolved once at the boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum DataInput {
    /// Rows and named columns; normalized fields convert it to records.
    Table(Table),
    /// Already row-oriented; stored unchanged.
    Records(DataSet),
    /// Anything else. Carries the offending type for the error message.
    Unsupported { type_name: String },
}

impl DataInput {
    #[must_use]
    pub fn unsupported(type_name: impl Into<String>) -> Self {
        Self::Unsupported {
            type_name: type_name.into(),
        }
    }

    /// Short description of the input shape, used in logs.
    #[must_use]
    pub fn kind(&self) -> &str {
        match self {
            Self::Table(_) => "table",
            Self::Records(_) => "records",
            Self::Unsupported { type_name } => type_name,
        }
    }

    /// Wraps a polars data frame, converting it to a `Table` first.
    #[cfg(feature = "polars")]
    pub fn from_frame(
        frame: &polars::prelude::DataFrame,
    ) -> crate::error::WidgetResult<Self> {
        Ok(Self::Table(Table::try_from(frame)?))
    }
}

/// Name of a JSON value's kind, as reported in type mismatches.
#[must_use]
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl From<Table> for DataInput {
    fn from(table: Table) -> Self {
        Self::Table(table)
    }
}

impl From<&Table> for DataInput {
    fn from(table: &Table) -> Self {
        Self::Table(table.clone())
    }
}

impl From<DataSet> for DataInput {
    fn from(records: DataSet) -> Self {
        Self::Records(records)
    }
}

impl From<Vec<Value>> for DataInput {
    fn from(rows: Vec<Value>) -> Self {
        Self::Records(DataSet::new(rows))
    }
}

impl From<Vec<Record>> for DataInput {
    fn from(records: Vec<Record>) -> Self {
        Self::Records(DataSet::from_records(records))
    }
}

/// JSON arrays are record sequences. An object is a table only in its wire
/// form (`{"columns": [...], "rows": [[...]]}`); every other JSON kind is
/// unsupported.
impl From<Value> for DataInput {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(rows) => Self::Records(DataSet::new(rows)),
            Value::Object(map) => match serde_json::from_value::<Table>(Value::Object(map)) {
                Ok(table) => Self::Table(table),
                Err(_) => Self::unsupported("object"),
            },
            other => Self::unsupported(json_type_name(&other)),
        }
    }
}

macro_rules! unsupported_scalar_input {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl From<$ty> for DataInput {
                fn from(_: $ty) -> Self {
                    Self::unsupported($name)
                }
            }
        )*
    };
}

unsupported_scalar_input! {
    i32 => "i32",
    i64 => "i64",
    u32 => "u32",
    u64 => "u64",
    f64 => "f64",
    bool => "bool",
    &str => "&str",
    String => "String",
}

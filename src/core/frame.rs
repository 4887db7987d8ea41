//! Polars data frames as table-like input.

use polars::prelude::{AnyValue, DataFrame};
use serde_json::{Number, Value};

use crate::core::table::Table;
use crate::error::{WidgetError, WidgetResult};

impl TryFrom<&DataFrame> for Table {
    type Error = WidgetError;

    fn try_from(frame: &DataFrame) -> WidgetResult<Self> {
        let columns = frame.get_columns();
        let mut table = Table::new(columns.iter().map(|column| column.name().to_string()))?;

        for row_index in 0..frame.height() {
            let mut row = Vec::with_capacity(columns.len());
            for column in columns {
                row.push(any_value_to_json(column.get(row_index)?));
            }
            table.push_row(row)?;
        }
        Ok(table)
    }
}

impl TryFrom<DataFrame> for Table {
    type Error = WidgetError;

    fn try_from(frame: DataFrame) -> WidgetResult<Self> {
        Table::try_from(&frame)
    }
}

fn any_value_to_json(value: AnyValue<'_>) -> Value {
    match value {
        AnyValue::Null => Value::Null,
        AnyValue::Boolean(v) => Value::Bool(v),
        AnyValue::String(v) => Value::String(v.to_owned()),
        AnyValue::StringOwned(v) => Value::String(v.to_string()),
        AnyValue::UInt8(v) => Value::from(v),
        AnyValue::UInt16(v) => Value::from(v),
        AnyValue::UInt32(v) => Value::from(v),
        AnyValue::UInt64(v) => Value::from(v),
        AnyValue::Int8(v) => Value::from(v),
        AnyValue::Int16(v) => Value::from(v),
        AnyValue::Int32(v) => Value::from(v),
        AnyValue::Int64(v) => Value::from(v),
        AnyValue::Float32(v) => float_to_json(f64::from(v)),
        AnyValue::Float64(v) => float_to_json(v),
        // Dates and other logical types travel as their display form; the
        // front-end parses ISO-like date strings itself.
        other => Value::String(other.to_string()),
    }
}

fn float_to_json(v: f64) -> Value {
    Number::from_f64(v).map_or(Value::Null, Value::Number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;
    use serde_json::json;

    #[test]
    fn frame_rows_become_table_rows_in_order() {
        let frame = df!(
            "label" => ["a", "b", "c"],
            "value" => [1_i64, 2, 3]
        )
        .expect("frame");

        let table = Table::try_from(&frame).expect("table");
        assert_eq!(table.column_names(), ["label", "value"]);
        assert_eq!(table.height(), 3);
        assert_eq!(table.rows()[2], vec![json!("c"), json!(3)]);
    }

    #[test]
    fn non_finite_floats_become_null() {
        let frame = df!("v" => [f64::NAN, 1.5]).expect("frame");
        let table = Table::try_from(&frame).expect("table");
        assert_eq!(table.rows()[0], vec![Value::Null]);
        assert_eq!(table.rows()[1], vec![json!(1.5)]);
    }
}

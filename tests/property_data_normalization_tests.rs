use chart_widgets::api::{ChartVariant, ChartWidget, DataValue};
use chart_widgets::core::Table;
use chart_widgets::sink::NullSink;
use proptest::prelude::*;
use serde_json::{Value, json};

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|v| json!(v)),
        (-1.0e9f64..1.0e9).prop_map(|v| json!(v)),
        "[a-z]{0,8}".prop_map(Value::String),
    ]
}

fn table() -> impl Strategy<Value = Table> {
    (1usize..6, 0usize..24).prop_flat_map(|(width, height)| {
        prop::collection::vec(prop::collection::vec(scalar(), width), height).prop_map(
            move |rows| {
                let mut table =
                    Table::new((0..width).map(|i| format!("col{i}"))).expect("unique columns");
                for row in rows {
                    table.push_row(row).expect("row width matches");
                }
                table
            },
        )
    })
}

fn variant() -> impl Strategy<Value = ChartVariant> {
    prop::sample::select(ChartVariant::ALL.to_vec())
}

proptest! {
    #[test]
    fn table_rows_map_one_to_one_onto_records(variant in variant(), table in table()) {
        let mut widget = ChartWidget::new(variant, NullSink::default());
        widget.set_data(table.clone()).expect("table accepted");

        let records = widget.data().and_then(DataValue::as_records).expect("records");
        prop_assert_eq!(records.len(), table.height());
        for (record, row) in records.records().zip(table.rows()) {
            let keys: Vec<&String> = record.keys().collect();
            let columns: Vec<&String> = table.column_names().iter().collect();
            prop_assert_eq!(keys, columns);
            let values: Vec<&Value> = record.values().collect();
            let expected: Vec<&Value> = row.iter().collect();
            prop_assert_eq!(values, expected);
        }
    }

    #[test]
    fn record_sequences_are_kept_verbatim(
        rows in prop::collection::vec(
            prop::collection::btree_map("[a-z]{1,6}", scalar(), 0..5)
                .prop_map(|map| Value::Object(map.into_iter().collect())),
            0..16,
        )
    ) {
        let mut widget = ChartWidget::new(ChartVariant::BarChart, NullSink::default());
        widget.set_data(rows.clone()).expect("records accepted");
        let records = widget.data().and_then(DataValue::as_records).expect("records");
        prop_assert_eq!(records.as_slice(), rows.as_slice());
    }

    #[test]
    fn scalar_assignments_never_replace_data(value in scalar(), table in table()) {
        let mut widget = ChartWidget::new(ChartVariant::StackedBarChart, NullSink::default());
        widget.set_data(table).expect("table accepted");
        let before = widget.data().cloned();

        prop_assert!(widget.set_data(value).is_err());
        prop_assert_eq!(widget.data().cloned(), before);
    }
}

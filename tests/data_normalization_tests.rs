use chart_widgets::api::{ChartVariant, ChartWidget, DataValue};
use chart_widgets::core::{DataInput, DataSet, Table};
use chart_widgets::error::WidgetError;
use chart_widgets::sink::RecordingSink;
use serde_json::{Value, json};

fn widget(variant: ChartVariant) -> ChartWidget<RecordingSink> {
    ChartWidget::new(variant, RecordingSink::default())
}

fn sales_table() -> Table {
    Table::new(["label", "value", "group"])
        .expect("table")
        .with_row(vec![json!("Q1"), json!(10), json!("east")])
        .expect("row 1")
        .with_row(vec![json!("Q2"), json!(20.5), json!("west")])
        .expect("row 2")
        .with_row(vec![json!("Q3"), Value::Null, json!("east")])
        .expect("row 3")
}

#[test]
fn table_becomes_records_in_row_order() {
    let mut widget = widget(ChartVariant::BarChart);
    widget.set_data(sales_table()).expect("set table");

    let records = widget
        .data()
        .and_then(DataValue::as_records)
        .expect("normalized records");
    assert_eq!(
        records.as_slice(),
        [
            json!({"label": "Q1", "value": 10, "group": "east"}),
            json!({"label": "Q2", "value": 20.5, "group": "west"}),
            json!({"label": "Q3", "value": null, "group": "east"}),
        ]
    );
}

#[test]
fn normalized_records_keep_column_order() {
    let mut widget = widget(ChartVariant::LineChart);
    widget.set_data(sales_table()).expect("set table");

    let records = widget.data().and_then(DataValue::as_records).expect("records");
    for record in records.records() {
        let keys: Vec<&str> = record.keys().map(String::as_str).collect();
        assert_eq!(keys, ["label", "value", "group"]);
    }
}

#[test]
fn record_sequence_passes_through_unchanged() {
    let rows = vec![
        json!({"item": "a", "value": 3}),
        json!({"value": 4, "item": "b", "extra": true}),
    ];
    let mut widget = widget(ChartVariant::ScatterPlot);
    widget.set_data(rows.clone()).expect("set records");

    let records = widget.data().and_then(DataValue::as_records).expect("records");
    assert_eq!(records.as_slice(), rows.as_slice());
}

#[test]
fn empty_table_yields_empty_records() {
    let mut widget = widget(ChartVariant::HeatMap);
    widget
        .set_data(Table::new(["date", "category", "value"]).expect("table"))
        .expect("set empty table");
    assert_eq!(widget.data(), Some(&DataValue::Records(DataSet::default())));
}

#[test]
fn scalar_inputs_are_type_mismatches() {
    let mut widget = widget(ChartVariant::BarChart);

    let err = widget.set_data(42_i64).expect_err("integer rejected");
    match err {
        WidgetError::TypeMismatch { field, found, .. } => {
            assert_eq!(field, "data");
            assert_eq!(found, "i64");
        }
        other => panic!("unexpected error: {other}"),
    }

    let err = widget.set_data("label,value").expect_err("string rejected");
    assert!(err.to_string().contains("&str"));

    let err = widget
        .set_data(json!({"label": ["a"], "value": [1]}))
        .expect_err("json object rejected");
    assert!(err.to_string().contains("object"));
}

#[test]
fn rejected_input_keeps_previous_data_and_sends_nothing() {
    let mut widget = widget(ChartVariant::PieChart);
    widget
        .set_data(vec![json!({"label": "a", "value": 1})])
        .expect("set records");
    let before = widget.data().cloned();
    let sent = widget.sink().len();

    assert!(widget.set_data(DataInput::unsupported("Series")).is_err());
    assert!(widget.set_field("data", json!(7)).is_err());

    assert_eq!(widget.data().cloned(), before);
    assert_eq!(widget.sink().len(), sent);
}

#[test]
fn set_field_on_data_applies_the_same_validation() {
    let mut widget = widget(ChartVariant::DumbbellPlot);
    widget
        .set_field("data", json!([{"label": "x", "value": 1}]))
        .expect("json array accepted");
    assert_eq!(widget.data().map(DataValue::len), Some(1));

    let err = widget.set_field("data", json!("x")).expect_err("string rejected");
    assert!(matches!(err, WidgetError::TypeMismatch { .. }));
}

#[test]
fn reassignment_after_construction_is_validated_each_time() {
    let mut widget = widget(ChartVariant::CirclePacking);
    widget.set_data(sales_table()).expect("first table");
    widget
        .set_data(vec![json!({"node": "root"})])
        .expect("then records");
    assert!(widget.set_data(1.5_f64).is_err());
    assert_eq!(
        widget.data().and_then(DataValue::as_records).map(DataSet::len),
        Some(1)
    );
}

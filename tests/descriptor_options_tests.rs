use chart_widgets::api::{
    ChartDescriptor, ChartVariant, ChartWidget, DataPolicy, FrontendModule, WidgetOptions,
};
use chart_widgets::protocol::{EmbedManifest, WIDGET_VIEW_MIME};
use chart_widgets::sink::RecordingSink;
use serde_json::json;

#[test]
fn custom_descriptor_drives_a_generic_widget() {
    let descriptor = ChartDescriptor::builder("level-indicator")
        .data_field("data", DataPolicy::Normalize)
        .accessor("valueAccessor", "value")
        .accessor("targetAccessor", "")
        .local_field("notes", json!(null))
        .build()
        .expect("descriptor");

    let options = WidgetOptions::default().with_comm_id("custom");
    let mut widget = ChartWidget::with_descriptor(descriptor, options, RecordingSink::default())
        .expect("widget");
    assert_eq!(widget.chart_type(), "level-indicator");
    assert_eq!(widget.accessor("valueAccessor"), Some("value"));

    let sent = widget.sink().len();
    widget
        .set_field("notes", json!({"draft": true}))
        .expect("local field");
    assert_eq!(widget.sink().len(), sent);
    assert!(!widget.state().contains_key("notes"));
    assert_eq!(
        widget.get("notes").map(|value| value.to_json()),
        Some(json!({"draft": true}))
    );
}

#[test]
fn frontend_identity_comes_from_options() {
    let frontend = FrontendModule::default()
        .with_module("@acme/charts-widget", "0.9.0")
        .with_names("AcmeModel", "AcmeView");
    let options = WidgetOptions::default()
        .with_comm_id("acme")
        .with_frontend(frontend);
    let widget =
        ChartWidget::with_options(ChartVariant::PieChart, options, RecordingSink::default());

    let state = widget.state();
    assert_eq!(state.get("_model_module"), Some(&json!("@acme/charts-widget")));
    assert_eq!(state.get("_view_module_version"), Some(&json!("0.9.0")));
    assert_eq!(state.get("_model_name"), Some(&json!("AcmeModel")));
    assert_eq!(state.get("_view_name"), Some(&json!("AcmeView")));
}

#[test]
fn options_load_from_partial_json() {
    let options = WidgetOptions::from_json_str(r#"{"comm_id": "cfg", "auto_open": false}"#)
        .expect("options");
    assert_eq!(options.comm_id.as_deref(), Some("cfg"));
    assert!(!options.auto_open);
    assert_eq!(options.target_name, "jupyter.widget");
    assert_eq!(options.frontend, FrontendModule::default());
}

#[test]
fn generated_comm_ids_are_unique() {
    let a = ChartWidget::new(ChartVariant::BarChart, RecordingSink::default());
    let b = ChartWidget::new(ChartVariant::BarChart, RecordingSink::default());
    assert_ne!(a.comm_id(), b.comm_id());
    assert_eq!(a.comm_id().len(), 32);
}

#[test]
fn embed_manifest_collects_widget_states() {
    let mut bar = ChartWidget::with_options(
        ChartVariant::BarChart,
        WidgetOptions::default().with_comm_id("bar"),
        RecordingSink::default(),
    );
    bar.set_main_title("Embedded").expect("title");
    let pie = ChartWidget::with_options(
        ChartVariant::PieChart,
        WidgetOptions::default().with_comm_id("pie"),
        RecordingSink::default(),
    );

    let mut manifest = EmbedManifest::new();
    manifest.insert(bar.comm_id(), bar.embed_state());
    manifest.insert(pie.comm_id(), pie.embed_state());

    let value: serde_json::Value =
        serde_json::from_str(&manifest.to_json_pretty().expect("json")).expect("parse");
    assert_eq!(value["version_major"], json!(2));
    assert_eq!(value["state"]["bar"]["model_name"], json!("ChartModel"));
    assert_eq!(value["state"]["bar"]["state"]["mainTitle"], json!("Embedded"));
    assert_eq!(value["state"]["pie"]["state"]["chartType"], json!("pie-chart"));
}

#[test]
fn mime_bundle_references_the_model() {
    let widget = ChartWidget::with_options(
        ChartVariant::HeatMap,
        WidgetOptions::default().with_comm_id("view-1"),
        RecordingSink::default(),
    );
    let bundle = widget.mime_bundle();
    assert_eq!(bundle[WIDGET_VIEW_MIME]["model_id"], json!("view-1"));
    assert_eq!(bundle[WIDGET_VIEW_MIME]["version_major"], json!(2));
    assert!(bundle["text/plain"].as_str().is_some_and(|text| text.contains("heat-map")));
}

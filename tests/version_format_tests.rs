use chart_widgets::version::{ReleaseStage, VERSION_INFO, VersionInfo, package_version};

#[test]
fn final_release_formats_without_suffix() {
    let version = VersionInfo::from_parts(2, 1, 0, "final", 0).expect("final");
    assert_eq!(version.to_string(), "2.1.0");
}

#[test]
fn pre_release_stages_append_suffix_and_serial() {
    let cases = [
        ((2, 1, 0, "alpha", 2), "2.1.0a2"),
        ((2, 1, 0, "beta", 3), "2.1.0b3"),
        ((2, 1, 0, "candidate", 1), "2.1.0rc1"),
        ((10, 0, 12, "beta", 0), "10.0.12b0"),
    ];
    for ((major, minor, patch, stage, serial), expected) in cases {
        let version =
            VersionInfo::from_parts(major, minor, patch, stage, serial).expect("known stage");
        assert_eq!(version.to_string(), expected);
        assert_eq!(VersionInfo::parse(expected).expect("parse back"), version);
    }
}

#[test]
fn final_serial_is_not_printed() {
    let version = VersionInfo::new(2, 1, 0, ReleaseStage::Final, 9);
    assert_eq!(version.to_string(), "2.1.0");
}

#[test]
fn unknown_stage_name_is_rejected() {
    assert!(VersionInfo::from_parts(2, 1, 0, "gamma", 1).is_err());
}

#[test]
fn package_version_is_embedded_in_widgets() {
    use chart_widgets::api::{ChartVariant, ChartWidget};
    use chart_widgets::sink::NullSink;

    assert_eq!(package_version(), VERSION_INFO.to_string());
    let widget = ChartWidget::new(ChartVariant::LineChart, NullSink::default());
    assert_eq!(widget.text("_model_module_version"), Some(package_version().as_str()));
    assert_eq!(widget.text("_view_module_version"), Some(package_version().as_str()));
}

#[test]
fn compatibility_follows_major_version() {
    let current = VersionInfo::new(2, 1, 0, ReleaseStage::Final, 0);
    assert!(current.is_compatible_with(&VersionInfo::new(2, 4, 1, ReleaseStage::Final, 0)));
    assert!(!current.is_compatible_with(&VersionInfo::new(3, 0, 0, ReleaseStage::Final, 0)));

    let early = VersionInfo::new(0, 3, 0, ReleaseStage::Beta, 1);
    assert!(!early.is_compatible_with(&VersionInfo::new(0, 4, 0, ReleaseStage::Final, 0)));
}

use tips_dash::api::{
    CONTROL_CATALOG_JSON_SCHEMA_V1, ControlId, ControlValue, DISPATCH_OUTCOME_JSON_SCHEMA_V1,
    DispatchOutcome, RawControlValue, Widget, control_catalog, pie_column_enabled,
};
use tips_dash::core::{DeviationKind, Dimension};
use tips_dash::{ControlChanged, Dashboard, DashboardConfig};

const TIPS_CSV: &str = include_str!("fixtures/tips.csv");

fn tips() -> tips_dash::core::Dataset {
    tips_dash::core::Dataset::from_csv_reader(TIPS_CSV.as_bytes()).expect("fixture loads")
}

#[test]
fn outcome_contract_round_trips() {
    let dataset = tips();
    let dashboard = Dashboard::new(&dataset, DashboardConfig::default()).expect("dashboard");
    let outcome = dashboard.render_all().expect("render");

    let json = outcome.to_json_contract_v1_pretty().expect("serialize");
    let value: serde_json::Value = serde_json::from_str(&json).expect("json");
    assert_eq!(
        value["schema_version"],
        serde_json::json!(DISPATCH_OUTCOME_JSON_SCHEMA_V1)
    );
    assert_eq!(value["outcome"]["views"][0]["view"], "table");
    assert_eq!(value["outcome"]["views"][0]["status"]["state"], "rendered");

    let parsed = DispatchOutcome::from_json_compat_str(&json).expect("parse");
    assert_eq!(parsed.trigger, outcome.trigger);
    assert_eq!(parsed.controls, outcome.controls);
    assert_eq!(parsed.views.len(), outcome.views.len());
    for (parsed, original) in parsed.views.iter().zip(&outcome.views) {
        assert_eq!(parsed.view, original.view);
        assert_eq!(parsed.status, original.status);
        assert_eq!(parsed.texts, original.texts);
        let traces = |update: &tips_dash::api::ViewUpdate| {
            update.chart.as_ref().map(|chart| chart.traces.len())
        };
        assert_eq!(traces(parsed), traces(original));
    }
}

#[test]
fn bare_outcome_is_accepted() {
    let dataset = tips();
    let mut dashboard = Dashboard::new(&dataset, DashboardConfig::default()).expect("dashboard");
    let outcome = dashboard
        .handle(&ControlChanged::new(
            ControlId::PieHue,
            RawControlValue::text("smoker"),
        ))
        .expect("pie hue");
    let bare = serde_json::to_string(&outcome).expect("serialize");
    let parsed = DispatchOutcome::from_json_compat_str(&bare).expect("parse bare");
    assert_eq!(parsed, outcome);
}

#[test]
fn unsupported_schema_version_is_rejected() {
    let payload = r#"{"schema_version": 99, "outcome": {"views": []}}"#;
    assert!(DispatchOutcome::from_json_compat_str(payload).is_err());
}

#[test]
fn control_events_use_wire_ids() {
    let event: ControlChanged =
        serde_json::from_str(r#"{"control": "total_bill-range-slider", "value": [5.0, 25.0]}"#)
            .expect("range event");
    assert_eq!(event.control, ControlId::TotalBillRange);
    assert_eq!(event.value, RawControlValue::Pair([5.0, 25.0]));

    let event: ControlChanged =
        serde_json::from_str(r#"{"control": "ddl-hue-pie-plot", "value": "time"}"#)
            .expect("hue event");
    assert_eq!(event.control, ControlId::PieHue);
    assert_eq!(event.value, RawControlValue::text("time"));
}

#[test]
fn partial_config_falls_back_to_defaults() {
    let config = DashboardConfig::from_json_str(
        r#"{"categorical_legend_hue": "day", "layout": {"table_height": 320.0}}"#,
    )
    .expect("config");
    assert_eq!(config.categorical_legend_hue, Dimension::Day);
    assert_eq!(config.boundary_deviation, DeviationKind::Sample);
    assert_eq!(config.layout.table_height, 320.0);
    assert_eq!(
        config.layout.histogram_width,
        DashboardConfig::default().layout.histogram_width
    );

    let round_trip =
        DashboardConfig::from_json_str(&config.to_json_pretty().expect("serialize"))
            .expect("parse");
    assert_eq!(round_trip, config);
}

#[test]
fn invalid_config_is_rejected() {
    let err = DashboardConfig::from_json_str(r#"{"layout": {"histogram_opacity": 1.5}}"#)
        .expect_err("opacity out of range");
    assert!(err.to_string().contains("histogram_opacity"));
}

#[test]
fn catalog_contract_lists_every_control() {
    let dataset = tips();
    let dashboard = Dashboard::new(&dataset, DashboardConfig::default()).expect("dashboard");
    let json = dashboard
        .control_catalog_json_contract_v1_pretty()
        .expect("catalog");
    let value: serde_json::Value = serde_json::from_str(&json).expect("json");
    assert_eq!(
        value["schema_version"],
        serde_json::json!(CONTROL_CATALOG_JSON_SCHEMA_V1)
    );
    let ids: Vec<&str> = value["controls"]
        .as_array()
        .expect("controls array")
        .iter()
        .map(|control| control["id"].as_str().expect("id"))
        .collect();
    let expected: Vec<&str> = ControlId::ALL.iter().map(|control| control.id()).collect();
    assert_eq!(ids, expected);
}

#[test]
fn catalog_defaults_follow_the_dataset() {
    let dataset = tips();
    let catalog = control_catalog(&dataset);

    let range = catalog
        .iter()
        .find(|descriptor| descriptor.id == ControlId::TotalBillRange)
        .expect("range control");
    match (&range.widget, range.default) {
        (Widget::RangeSlider { min, max, .. }, ControlValue::Range(default)) => {
            assert_eq!((*min, *max), (3.07, 50.81));
            assert_eq!((default.lo, default.hi), (3.07, 50.81));
        }
        other => panic!("unexpected range descriptor {other:?}"),
    }

    let size = catalog
        .iter()
        .find(|descriptor| descriptor.id == ControlId::ScatterSize)
        .expect("size control");
    assert_eq!(size.default, ControlValue::Size(1));
    assert!(matches!(&size.widget, Widget::Slider { marks, .. } if marks == &[1, 2, 3, 4, 5, 6]));

    let pie_column = catalog
        .iter()
        .find(|descriptor| descriptor.id == ControlId::PieColumn)
        .expect("pie column control");
    assert!(pie_column.disabled);

    let pie_estimator = catalog
        .iter()
        .find(|descriptor| descriptor.id == ControlId::PieEstimator)
        .expect("pie estimator control");
    let ControlValue::Estimator(default_estimator) = pie_estimator.default else {
        panic!("unexpected estimator default {:?}", pie_estimator.default);
    };
    assert_eq!(pie_column.disabled, !pie_column_enabled(default_estimator));
}

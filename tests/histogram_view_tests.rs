use approx::assert_relative_eq;
use tips_dash::api::{ControlId, ControlSnapshot, ControlValue, DashboardConfig};
use tips_dash::core::{Dataset, DeviationKind, Dimension, NormalRange, NumericColumn, SubplotGrid};
use tips_dash::render::{Color, SubplotCell, Trace};
use tips_dash::views::{histogram_panels, histogram_view};

const TIPS_CSV: &str = include_str!("fixtures/tips.csv");

fn tips() -> Dataset {
    Dataset::from_csv_reader(TIPS_CSV.as_bytes()).expect("fixture loads")
}

fn controls(column: NumericColumn, hue: Dimension) -> ControlSnapshot {
    ControlSnapshot::default()
        .with(ControlId::HistogramColumn, ControlValue::Column(column))
        .with(ControlId::HistogramHue, ControlValue::Dimension(hue))
}

#[test]
fn boundary_uses_sample_deviation_by_default() {
    let range = NormalRange::for_column(&tips(), NumericColumn::TotalBill, DeviationKind::default())
        .expect("range");
    let mean = (range.min + range.max) / 2.0;
    assert_relative_eq!(mean, 22.518_934_426_229_5, epsilon = 1e-9);
    assert_relative_eq!(range.max - mean, 8.643_145_271_066_1, epsilon = 1e-9);
}

#[test]
fn population_deviation_is_narrower() {
    let dataset = tips();
    let sample = NormalRange::for_column(&dataset, NumericColumn::Tip, DeviationKind::Sample)
        .expect("sample");
    let population =
        NormalRange::for_column(&dataset, NumericColumn::Tip, DeviationKind::Population)
            .expect("population");
    assert_relative_eq!(sample.min + sample.max, population.min + population.max, epsilon = 1e-9);
    assert!(population.max < sample.max);
    assert!(population.min > sample.min);
}

#[test]
fn panels_partition_every_category_exactly() {
    let dataset = tips();
    let range = NormalRange::for_column(&dataset, NumericColumn::Tip, DeviationKind::Sample)
        .expect("range");
    for hue in Dimension::ALL {
        let panels = histogram_panels(&dataset, NumericColumn::Tip, hue, range).expect("panels");
        assert_eq!(panels.len(), hue.category_count());
        for (index, panel) in panels.iter().enumerate() {
            let in_category = dataset.rows_in_category(hue, index).count();
            assert_eq!(panel.normal.len() + panel.not_normal.len(), in_category);
            assert!(panel.normal.iter().all(|&value| range.contains(value)));
            assert!(panel.not_normal.iter().all(|&value| !range.contains(value)));
        }
    }
}

#[test]
fn value_on_the_boundary_counts_as_normal() {
    let dataset = Dataset::from_csv_reader(
        "total_bill,tip,sex,smoker,day,time,size\n\
         10,1,Female,No,Sun,Dinner,2\n\
         20,2,Male,No,Sun,Dinner,2\n\
         30,3,Male,Yes,Sat,Dinner,2\n"
            .as_bytes(),
    )
    .expect("dataset");
    let range = NormalRange::for_column(&dataset, NumericColumn::TotalBill, DeviationKind::Sample)
        .expect("range");
    assert_eq!((range.min, range.max), (10.0, 30.0));

    let panels = histogram_panels(&dataset, NumericColumn::TotalBill, Dimension::Sex, range)
        .expect("panels");
    assert_eq!(panels[0].normal, [10.0]);
    assert_eq!(panels[1].normal, [20.0, 30.0]);
    assert!(panels.iter().all(|panel| panel.not_normal.is_empty()));
}

#[test]
fn day_uses_a_two_by_two_grid() {
    let output = histogram_view(
        &tips(),
        &controls(NumericColumn::TotalBill, Dimension::Day),
        &DashboardConfig::default(),
    )
    .expect("view");
    let layout = &output.chart.layout;
    assert_eq!(layout.grid, Some(SubplotGrid::new(2, 2)));
    assert_eq!(layout.title.as_deref(), Some("Histogram Total_bill"));
    let cells: Vec<(SubplotCell, &str)> = layout
        .subplots
        .iter()
        .map(|subplot| (subplot.cell, subplot.title.as_str()))
        .collect();
    assert_eq!(
        cells,
        [
            (SubplotCell { row: 1, col: 1 }, "Thur"),
            (SubplotCell { row: 1, col: 2 }, "Fri"),
            (SubplotCell { row: 2, col: 1 }, "Sat"),
            (SubplotCell { row: 2, col: 2 }, "Sun"),
        ]
    );
    assert_eq!(output.chart.traces.len(), 8);
    output.chart.validate().expect("valid chart");
}

#[test]
fn binary_dimensions_use_one_row() {
    let output = histogram_view(
        &tips(),
        &controls(NumericColumn::Tip, Dimension::Smoker),
        &DashboardConfig::default(),
    )
    .expect("view");
    assert_eq!(output.chart.layout.grid, Some(SubplotGrid::new(1, 2)));
    assert_eq!(output.chart.layout.subplots[0].y_axis.title, "Total Transaction");
    assert_eq!(output.chart.layout.subplots[0].x_axis.title, "Tip");

    let traces: Vec<(&str, Color)> = output
        .chart
        .traces
        .iter()
        .map(|trace| match trace {
            Trace::Histogram(histogram) => (histogram.name.as_str(), histogram.color),
            other => panic!("unexpected trace {other:?}"),
        })
        .collect();
    assert_eq!(
        traces,
        [
            ("Normal", Color::GREEN),
            ("Not Normal", Color::RED),
            ("Normal", Color::GREEN),
            ("Not Normal", Color::RED),
        ]
    );
}

#[test]
fn texts_report_the_boundary() {
    let dataset = tips();
    let output = histogram_view(
        &dataset,
        &controls(NumericColumn::TotalBill, Dimension::Sex),
        &DashboardConfig::default(),
    )
    .expect("view");
    let range =
        NormalRange::for_column(&dataset, NumericColumn::TotalBill, DeviationKind::Sample)
            .expect("range");
    assert_eq!(
        output.texts,
        vec![
            format!("Min boundary: {}", range.min),
            format!("Max boundary: {}", range.max),
        ]
    );
}

#[test]
fn single_row_cannot_form_a_sample_boundary() {
    let dataset = Dataset::from_csv_reader(
        "total_bill,tip,sex,smoker,day,time,size\n12,2,Male,No,Sun,Dinner,2\n".as_bytes(),
    )
    .expect("dataset");
    let err = histogram_view(
        &dataset,
        &controls(NumericColumn::Tip, Dimension::Sex),
        &DashboardConfig::default(),
    )
    .expect_err("needs two rows");
    assert!(err.is_domain());
}

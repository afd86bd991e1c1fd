use tips_dash::api::{ControlId, ControlSnapshot, ControlValue, DashboardConfig};
use tips_dash::core::{Dataset, Dimension};
use tips_dash::render::{Color, ColorPalette, HoverMode, Trace};
use tips_dash::views::{rows_with_size, scatter_groups, scatter_view};

const TIPS_CSV: &str = include_str!("fixtures/tips.csv");

fn tips() -> Dataset {
    Dataset::from_csv_reader(TIPS_CSV.as_bytes()).expect("fixture loads")
}

fn controls(hue: Dimension, size: u32) -> ControlSnapshot {
    ControlSnapshot::default()
        .with(ControlId::ScatterHue, ControlValue::Dimension(hue))
        .with(ControlId::ScatterSize, ControlValue::Size(size))
}

#[test]
fn groups_partition_rows_of_the_selected_size() {
    let dataset = tips();
    for hue in Dimension::ALL {
        for size in 1..=6 {
            let groups = scatter_groups(&dataset, hue, size, ColorPalette).expect("groups");
            assert_eq!(groups.len(), hue.category_count());
            let total: usize = groups.iter().map(|group| group.points.len()).sum();
            assert_eq!(total, rows_with_size(&dataset, size), "{hue} size {size}");
        }
    }
}

#[test]
fn size_two_split_by_sex() {
    let groups = scatter_groups(&tips(), Dimension::Sex, 2, ColorPalette).expect("groups");
    assert_eq!(groups[0].category, "Female");
    assert_eq!(groups[0].points.len(), 57);
    assert_eq!(groups[0].color, Color::from_hex("#ff3fd8").expect("hex"));
    assert_eq!(groups[1].category, "Male");
    assert_eq!(groups[1].points.len(), 99);
    assert_eq!(groups[1].color, Color::from_hex("#4290ff").expect("hex"));
}

#[test]
fn absent_size_yields_empty_groups() {
    let dataset = tips();
    let groups = scatter_groups(&dataset, Dimension::Day, 9, ColorPalette).expect("groups");
    assert_eq!(groups.len(), 4);
    assert!(groups.iter().all(|group| group.points.is_empty()));

    let output =
        scatter_view(&dataset, &controls(Dimension::Day, 9), &DashboardConfig::default())
            .expect("view");
    assert_eq!(output.texts, vec!["Data count: 0".to_owned()]);
    assert_eq!(output.chart.traces.len(), 4);
}

#[test]
fn view_builds_one_trace_per_category() {
    let dataset = tips();
    let config = DashboardConfig::default();
    let output = scatter_view(&dataset, &controls(Dimension::Smoker, 1), &config).expect("view");

    assert_eq!(output.texts, vec!["Data count: 4".to_owned()]);
    assert_eq!(output.chart.layout.hover_mode, Some(HoverMode::Closest));
    let names: Vec<&str> = output
        .chart
        .traces
        .iter()
        .map(|trace| match trace {
            Trace::Scatter(scatter) => {
                assert_eq!(scatter.x.len(), scatter.y.len());
                assert_eq!(scatter.marker_size, config.layout.scatter_marker_size);
                assert_eq!(scatter.outline.color, Color::WHITE);
                scatter.name.as_str()
            }
            other => panic!("unexpected trace {other:?}"),
        })
        .collect();
    assert_eq!(names, ["Yes", "No"]);
    output.chart.validate().expect("valid chart");
}

#[test]
fn points_carry_bill_and_tip() {
    let dataset = tips();
    let groups = scatter_groups(&dataset, Dimension::Sex, 2, ColorPalette).expect("groups");
    let first_female = dataset
        .records()
        .iter()
        .find(|record| record.size == 2 && record.sex.label() == "Female")
        .expect("female party of two");
    assert_eq!(groups[0].points[0], (first_female.total_bill, first_female.tip));
}

use crate::api::{ControlId, ControlSnapshot, DashboardConfig};
use crate::core::{Dataset, Dimension};
use crate::error::DashboardResult;
use crate::render::{
    AxisSpec, ChartLayout, ChartSpec, Color, ColorPalette, HoverMode, Outline, ScatterTrace, Trace,
};

use super::ViewOutput;

/// `(total_bill, tip)` points of one hue category.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterGroup {
    pub category: &'static str,
    pub color: Color,
    pub points: Vec<(f64, f64)>,
}

/// Number of rows whose party size equals `size`, regardless of hue.
#[must_use]
pub fn rows_with_size(dataset: &Dataset, size: u32) -> usize {
    dataset
        .records()
        .iter()
        .filter(|record| record.size == size)
        .count()
}

/// One group per `hue` category, in enumeration order, empty groups included.
pub fn scatter_groups(
    dataset: &Dataset,
    hue: Dimension,
    size: u32,
    palette: ColorPalette,
) -> DashboardResult<Vec<ScatterGroup>> {
    hue.labels()
        .iter()
        .enumerate()
        .map(|(index, &category)| {
            let points = dataset
                .rows_in_category(hue, index)
                .filter(|record| record.size == size)
                .map(|record| (record.total_bill, record.tip))
                .collect();
            Ok(ScatterGroup {
                category,
                color: palette.color(hue, index)?,
                points,
            })
        })
        .collect()
}

pub fn scatter_view(
    dataset: &Dataset,
    controls: &ControlSnapshot,
    config: &DashboardConfig,
) -> DashboardResult<ViewOutput> {
    let hue = controls.dimension(ControlId::ScatterHue)?;
    let size = controls.size(ControlId::ScatterSize)?;
    let groups = scatter_groups(dataset, hue, size, ColorPalette)?;

    let layout = ChartLayout {
        x_axis: Some(AxisSpec::titled("Total Bill")),
        y_axis: Some(AxisSpec::titled("Tip")),
        margin: Some(config.layout.margins),
        hover_mode: Some(HoverMode::Closest),
        ..ChartLayout::default()
    };
    let chart = groups.into_iter().fold(ChartSpec::new(layout), |chart, group| {
        let (x, y): (Vec<f64>, Vec<f64>) = group.points.into_iter().unzip();
        chart.with_trace(Trace::Scatter(ScatterTrace {
            name: group.category.to_owned(),
            color: group.color,
            x,
            y,
            marker_size: config.layout.scatter_marker_size,
            outline: Outline::new(Color::WHITE, 0.5),
        }))
    });

    Ok(ViewOutput {
        chart,
        texts: vec![format!("Data count: {}", rows_with_size(dataset, size))],
    })
}

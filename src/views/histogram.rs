use crate::api::{ControlId, ControlSnapshot, DashboardConfig};
use crate::core::{Dataset, Dimension, NormalRange, NumericColumn};
use crate::error::{DashboardError, DashboardResult};
use crate::render::{
    AxisSpec, ChartLayout, ChartSpec, Color, HistogramTrace, SubplotCell, SubplotSpec, Trace,
};

use super::ViewOutput;

const NORMAL_NAME: &str = "Normal";
const NOT_NORMAL_NAME: &str = "Not Normal";
const COUNT_AXIS_TITLE: &str = "Total Transaction";

/// Values of one hue category split at the normal range, placed in one grid cell.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramPanel {
    pub category: &'static str,
    pub cell: SubplotCell,
    pub normal: Vec<f64>,
    pub not_normal: Vec<f64>,
}

/// Partitions every row of each `hue` category into normal / not-normal values.
///
/// Panels follow enumeration order and fill the dimension's grid row-major.
pub fn histogram_panels(
    dataset: &Dataset,
    column: NumericColumn,
    hue: Dimension,
    range: NormalRange,
) -> DashboardResult<Vec<HistogramPanel>> {
    let grid = hue.subplot_grid();
    hue.labels()
        .iter()
        .enumerate()
        .map(|(index, &category)| {
            let (row, col) = grid.cell(index).ok_or_else(|| {
                DashboardError::InvalidData(format!(
                    "`{hue}` has more categories than its {}x{} subplot grid",
                    grid.rows, grid.cols
                ))
            })?;
            let (normal, not_normal): (Vec<f64>, Vec<f64>) = dataset
                .rows_in_category(hue, index)
                .map(|record| record.value(column))
                .partition(|&value| range.contains(value));
            Ok(HistogramPanel {
                category,
                cell: SubplotCell { row, col },
                normal,
                not_normal,
            })
        })
        .collect()
}

pub fn histogram_view(
    dataset: &Dataset,
    controls: &ControlSnapshot,
    config: &DashboardConfig,
) -> DashboardResult<ViewOutput> {
    let column = controls.column(ControlId::HistogramColumn)?;
    let hue = controls.dimension(ControlId::HistogramHue)?;
    let range = NormalRange::for_column(dataset, column, config.boundary_deviation)?;
    let panels = histogram_panels(dataset, column, hue, range)?;
    let axis_title = column.capitalized();

    let mut layout = ChartLayout {
        title: Some(format!("Histogram {axis_title}")),
        grid: Some(hue.subplot_grid()),
        height: Some(config.layout.histogram_height),
        width: Some(config.layout.histogram_width),
        ..ChartLayout::default()
    };
    let mut traces = Vec::with_capacity(panels.len() * 2);
    for panel in panels {
        layout.subplots.push(SubplotSpec {
            cell: panel.cell,
            title: panel.category.to_owned(),
            x_axis: AxisSpec::titled(axis_title.clone()),
            y_axis: AxisSpec::titled(COUNT_AXIS_TITLE),
        });
        for (name, color, values) in [
            (NORMAL_NAME, Color::GREEN, panel.normal),
            (NOT_NORMAL_NAME, Color::RED, panel.not_normal),
        ] {
            traces.push(Trace::Histogram(HistogramTrace {
                name: name.to_owned(),
                color,
                x: values,
                opacity: config.layout.histogram_opacity,
                subplot: panel.cell,
            }));
        }
    }

    Ok(ViewOutput {
        chart: ChartSpec { traces, layout },
        texts: vec![
            format!("Min boundary: {}", range.min),
            format!("Max boundary: {}", range.max),
        ],
    })
}

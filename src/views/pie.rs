use crate::api::{ControlId, ControlSnapshot, DashboardConfig};
use crate::core::{Dataset, Dimension, Estimator, NumericColumn};
use crate::error::{DashboardError, DashboardResult};
use crate::render::{ChartLayout, ChartSpec, Color, ColorPalette, Outline, PieTrace, Trace};

use super::ViewOutput;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PieSlice {
    pub label: &'static str,
    pub value: f64,
    pub color: Color,
}

/// One slice per `hue` category holding `estimator(column)` over that category's rows.
///
/// `column` is only read when the estimator needs one; `count` counts rows.
pub fn pie_slices(
    dataset: &Dataset,
    hue: Dimension,
    estimator: Estimator,
    column: Option<NumericColumn>,
    palette: ColorPalette,
) -> DashboardResult<Vec<PieSlice>> {
    let column = match (estimator.requires_column(), column) {
        (true, Some(column)) => Some(column),
        (true, None) => {
            return Err(DashboardError::Config {
                control: ControlId::PieColumn.id(),
            });
        }
        (false, _) => None,
    };

    hue.labels()
        .iter()
        .enumerate()
        .map(|(index, &label)| {
            let rows = dataset.rows_in_category(hue, index);
            let values: Vec<f64> = match column {
                Some(column) => rows.map(|record| record.value(column)).collect(),
                None => rows.map(|_| 1.0).collect(),
            };
            Ok(PieSlice {
                label,
                value: estimator.apply(&values)?,
                color: palette.color(hue, index)?,
            })
        })
        .collect()
}

pub fn pie_view(
    dataset: &Dataset,
    controls: &ControlSnapshot,
    config: &DashboardConfig,
) -> DashboardResult<ViewOutput> {
    let hue = controls.dimension(ControlId::PieHue)?;
    let estimator = controls.estimator(ControlId::PieEstimator)?;
    let column = if estimator.requires_column() {
        Some(controls.column(ControlId::PieColumn)?)
    } else {
        None
    };
    let slices = pie_slices(dataset, hue, estimator, column, ColorPalette)?;

    let layout = ChartLayout {
        margin: Some(config.layout.margins),
        legend: Some(config.layout.pie_legend),
        ..ChartLayout::default()
    };
    let chart = ChartSpec::new(layout).with_trace(Trace::Pie(PieTrace {
        labels: slices.iter().map(|slice| slice.label.to_owned()).collect(),
        values: slices.iter().map(|slice| slice.value).collect(),
        colors: slices.iter().map(|slice| slice.color).collect(),
        outline: Outline::new(Color::BLACK, config.layout.pie_outline_width),
        text_info: "value".to_owned(),
        hover_info: "label+percent".to_owned(),
    }));

    Ok(ViewOutput {
        chart,
        texts: Vec::new(),
    })
}

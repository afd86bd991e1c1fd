use serde::{Deserialize, Serialize};

use crate::core::SubplotGrid;
use crate::error::{DashboardError, DashboardResult};
use crate::render::{CellStyle, Color, Outline};

/// Renderer-agnostic description of one chart: traces plus layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ChartSpec {
    pub traces: Vec<Trace>,
    pub layout: ChartLayout,
}

/// One drawable series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Trace {
    Scatter(ScatterTrace),
    Bar(CategoryTrace),
    Violin(CategoryTrace),
    Box(CategoryTrace),
    Pie(PieTrace),
    Histogram(HistogramTrace),
    Table(TableTrace),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterTrace {
    pub name: String,
    pub color: Color,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub marker_size: f64,
    pub outline: Outline,
}

/// Series over categorical x positions.
///
/// Bars carry one aggregated `y` per x label; violins and boxes carry one raw
/// sample per entry and leave the distribution shape to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTrace {
    pub name: String,
    pub color: Color,
    pub x: Vec<String>,
    pub y: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieTrace {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub colors: Vec<Color>,
    pub outline: Outline,
    pub text_info: String,
    pub hover_info: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramTrace {
    pub name: String,
    pub color: Color,
    pub x: Vec<f64>,
    pub opacity: f64,
    pub subplot: SubplotCell,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableTrace {
    pub header_style: CellStyle,
    pub cell_style: CellStyle,
    pub columns: Vec<TableColumn>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableColumn {
    pub name: String,
    pub cells: Vec<TableCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TableCell {
    Integer(u32),
    Number(f64),
    Text(String),
}

/// 1-based `(row, col)` of a subplot in the layout grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubplotCell {
    pub row: usize,
    pub col: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisSpec {
    pub title: String,
}

impl AxisSpec {
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub left: f64,
    pub bottom: f64,
    pub top: f64,
    pub right: f64,
}

/// Legend anchor in normalized paper coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LegendPosition {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoverMode {
    Closest,
}

/// How traces sharing an x category are placed next to each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupMode {
    Group,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubplotSpec {
    pub cell: SubplotCell,
    pub title: String,
    pub x_axis: AxisSpec,
    pub y_axis: AxisSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ChartLayout {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_axis: Option<AxisSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_axis: Option<AxisSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin: Option<Margins>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legend: Option<LegendPosition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hover_mode: Option<HoverMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_mode: Option<GroupMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid: Option<SubplotGrid>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subplots: Vec<SubplotSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
}

impl ChartSpec {
    #[must_use]
    pub fn new(layout: ChartLayout) -> Self {
        Self {
            traces: Vec::new(),
            layout,
        }
    }

    #[must_use]
    pub fn with_trace(mut self, trace: Trace) -> Self {
        self.traces.push(trace);
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.traces.is_empty()
    }

    pub fn validate(&self) -> DashboardResult<()> {
        for dimension in [self.layout.height, self.layout.width].into_iter().flatten() {
            if !dimension.is_finite() || dimension <= 0.0 {
                return Err(DashboardError::InvalidData(
                    "chart height/width must be finite and > 0".to_owned(),
                ));
            }
        }
        for trace in &self.traces {
            trace.validate(self.layout.grid)?;
        }
        Ok(())
    }
}

impl Trace {
    fn validate(&self, grid: Option<SubplotGrid>) -> DashboardResult<()> {
        match self {
            Self::Scatter(trace) => {
                ensure_same_len("scatter x/y", trace.x.len(), trace.y.len())?;
                ensure_finite("scatter", trace.x.iter().chain(&trace.y))?;
                trace.outline.validate()
            }
            Self::Bar(trace) | Self::Violin(trace) | Self::Box(trace) => {
                ensure_same_len("category x/y", trace.x.len(), trace.y.len())?;
                ensure_finite("category", &trace.y)
            }
            Self::Pie(trace) => {
                ensure_same_len("pie labels/values", trace.labels.len(), trace.values.len())?;
                ensure_same_len("pie labels/colors", trace.labels.len(), trace.colors.len())?;
                ensure_finite("pie", &trace.values)?;
                trace.outline.validate()
            }
            Self::Histogram(trace) => {
                ensure_finite("histogram", &trace.x)?;
                if !(0.0..=1.0).contains(&trace.opacity) {
                    return Err(DashboardError::InvalidData(
                        "histogram opacity must be in [0, 1]".to_owned(),
                    ));
                }
                let grid = grid.unwrap_or(SubplotGrid::new(1, 1));
                let SubplotCell { row, col } = trace.subplot;
                if row == 0 || col == 0 || row > grid.rows || col > grid.cols {
                    return Err(DashboardError::InvalidData(format!(
                        "histogram subplot ({row}, {col}) lies outside a {}x{} grid",
                        grid.rows, grid.cols
                    )));
                }
                Ok(())
            }
            Self::Table(trace) => {
                trace.header_style.validate()?;
                trace.cell_style.validate()?;
                let rows = trace.columns.first().map_or(0, |column| column.cells.len());
                for column in &trace.columns {
                    ensure_same_len("table column", rows, column.cells.len())?;
                }
                Ok(())
            }
        }
    }
}

fn ensure_same_len(what: &str, left: usize, right: usize) -> DashboardResult<()> {
    if left != right {
        return Err(DashboardError::InvalidData(format!(
            "{what} lengths differ: {left} vs {right}"
        )));
    }
    Ok(())
}

fn ensure_finite<'a>(what: &str, values: impl IntoIterator<Item = &'a f64>) -> DashboardResult<()> {
    if values.into_iter().any(|value| !value.is_finite()) {
        return Err(DashboardError::InvalidData(format!(
            "{what} values must be finite"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatched_scatter_lengths_fail_validation() {
        let spec = ChartSpec::default().with_trace(Trace::Scatter(ScatterTrace {
            name: "Female".to_owned(),
            color: Color::BLACK,
            x: vec![1.0, 2.0],
            y: vec![1.0],
            marker_size: 10.0,
            outline: Outline::new(Color::WHITE, 0.5),
        }));
        let err = spec.validate().expect_err("length mismatch");
        assert!(format!("{err}").contains("scatter x/y"));
    }

    #[test]
    fn histogram_outside_grid_fails_validation() {
        let layout = ChartLayout {
            grid: Some(SubplotGrid::new(1, 2)),
            ..ChartLayout::default()
        };
        let spec = ChartSpec::new(layout).with_trace(Trace::Histogram(HistogramTrace {
            name: "Normal".to_owned(),
            color: Color::GREEN,
            x: vec![1.0],
            opacity: 0.7,
            subplot: SubplotCell { row: 2, col: 1 },
        }));
        assert!(spec.validate().is_err());
    }

    #[test]
    fn table_cells_serialize_untagged() {
        let cells = vec![
            TableCell::Number(16.99),
            TableCell::Integer(2),
            TableCell::Text("Female".to_owned()),
        ];
        let json = serde_json::to_string(&cells).expect("json");
        assert_eq!(json, r#"[16.99,2,"Female"]"#);
    }
}

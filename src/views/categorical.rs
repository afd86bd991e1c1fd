use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::api::{ControlId, ControlSnapshot, DashboardConfig};
use crate::core::{Dataset, Dimension, aggregate};
use crate::error::DashboardResult;
use crate::render::{
    AxisSpec, CategoryTrace, ChartLayout, ChartSpec, ColorPalette, GroupMode, HoverMode, Trace,
};

use super::ViewOutput;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlotKind {
    Bar,
    Violin,
    Box,
}

impl PlotKind {
    pub const ALL: [Self; 3] = [Self::Bar, Self::Violin, Self::Box];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Bar => "bar",
            Self::Violin => "violin",
            Self::Box => "box",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Bar => "Bar",
            Self::Violin => "Violin",
            Self::Box => "Box",
        }
    }
}

impl FromStr for PlotKind {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(input.trim()))
            .ok_or_else(|| format!("unknown plot kind `{input}`"))
    }
}

impl fmt::Display for PlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// `total_bill` values of one `(x category, hue category)` combination.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryGroup {
    pub x_index: usize,
    pub hue_index: usize,
    pub x_label: &'static str,
    pub hue_label: &'static str,
    pub values: Vec<f64>,
}

/// Every `(x, hue)` combination ordered by x category, then hue category.
///
/// Values keep dataset order within a group; empty combinations are kept.
#[must_use]
pub fn category_groups(dataset: &Dataset, x: Dimension, hue: Dimension) -> Vec<CategoryGroup> {
    let hue_count = hue.category_count();
    let mut groups: Vec<CategoryGroup> = x
        .labels()
        .iter()
        .enumerate()
        .flat_map(|(x_index, &x_label)| {
            hue.labels()
                .iter()
                .enumerate()
                .map(move |(hue_index, &hue_label)| CategoryGroup {
                    x_index,
                    hue_index,
                    x_label,
                    hue_label,
                    values: Vec::new(),
                })
        })
        .collect();

    for record in dataset.records() {
        let slot = record.category_index(x) * hue_count + record.category_index(hue);
        groups[slot].values.push(record.total_bill);
    }
    groups
}

fn category_trace(
    kind: PlotKind,
    groups: &[CategoryGroup],
    hue: Dimension,
    hue_index: usize,
    palette: ColorPalette,
) -> DashboardResult<Trace> {
    let mut x = Vec::new();
    let mut y = Vec::new();
    for group in groups.iter().filter(|group| group.hue_index == hue_index) {
        match kind {
            PlotKind::Bar => {
                if group.values.is_empty() {
                    continue;
                }
                x.push(group.x_label.to_owned());
                y.push(aggregate::mean(&group.values)?);
            }
            PlotKind::Violin | PlotKind::Box => {
                x.extend(group.values.iter().map(|_| group.x_label.to_owned()));
                y.extend_from_slice(&group.values);
            }
        }
    }

    let trace = CategoryTrace {
        name: hue.labels()[hue_index].to_owned(),
        color: palette.color(hue, hue_index)?,
        x,
        y,
    };
    Ok(match kind {
        PlotKind::Bar => Trace::Bar(trace),
        PlotKind::Violin => Trace::Violin(trace),
        PlotKind::Box => Trace::Box(trace),
    })
}

pub fn categorical_view(
    dataset: &Dataset,
    controls: &ControlSnapshot,
    config: &DashboardConfig,
) -> DashboardResult<ViewOutput> {
    let kind = controls.plot_kind(ControlId::CategoricalKind)?;
    let x = controls.dimension(ControlId::CategoricalX)?;
    let hue = config.categorical_legend_hue;
    let groups = category_groups(dataset, x, hue);

    let layout = ChartLayout {
        x_axis: Some(AxisSpec::titled(x.capitalized())),
        y_axis: Some(AxisSpec::titled("US$")),
        margin: Some(config.layout.margins),
        legend: Some(config.layout.categorical_legend),
        hover_mode: Some(HoverMode::Closest),
        group_mode: Some(GroupMode::Group),
        ..ChartLayout::default()
    };
    let mut chart = ChartSpec::new(layout);
    for hue_index in 0..hue.category_count() {
        chart = chart.with_trace(category_trace(kind, &groups, hue, hue_index, ColorPalette)?);
    }

    Ok(ViewOutput {
        chart,
        texts: Vec::new(),
    })
}

//! One pure transform per dashboard view.
//!
//! Each transform maps `(dataset, control snapshot, config)` to a fresh
//! `ViewOutput` and never mutates its inputs. Lower-level helpers that work on
//! typed arguments are public as well so callers can test or reuse them
//! without building a snapshot.

mod categorical;
mod histogram;
mod pie;
mod scatter;
mod table;

pub use categorical::{CategoryGroup, PlotKind, categorical_view, category_groups};
pub use histogram::{HistogramPanel, histogram_panels, histogram_view};
pub use pie::{PieSlice, pie_slices, pie_view};
pub use scatter::{ScatterGroup, rows_with_size, scatter_groups, scatter_view};
pub use table::{TABLE_COLUMNS, filter_by_total_bill, table_view};

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::api::{ControlId, ControlSnapshot, DashboardConfig};
use crate::core::Dataset;
use crate::error::DashboardResult;
use crate::render::ChartSpec;

/// Chart plus the display strings rendered next to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ViewOutput {
    pub chart: ChartSpec,
    pub texts: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewId {
    Table,
    Scatter,
    Categorical,
    Pie,
    Histogram,
}

impl ViewId {
    pub const ALL: [Self; 5] = [
        Self::Table,
        Self::Scatter,
        Self::Categorical,
        Self::Pie,
        Self::Histogram,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Scatter => "scatter",
            Self::Categorical => "categorical",
            Self::Pie => "pie",
            Self::Histogram => "histogram",
        }
    }

    /// Controls whose values this view reads.
    #[must_use]
    pub fn inputs(self) -> &'static [ControlId] {
        match self {
            Self::Table => &[ControlId::TotalBillRange],
            Self::Scatter => &[ControlId::ScatterHue, ControlId::ScatterSize],
            Self::Categorical => &[ControlId::CategoricalKind, ControlId::CategoricalX],
            Self::Pie => &[
                ControlId::PieHue,
                ControlId::PieEstimator,
                ControlId::PieColumn,
            ],
            Self::Histogram => &[ControlId::HistogramColumn, ControlId::HistogramHue],
        }
    }

    pub fn evaluate(
        self,
        dataset: &Dataset,
        controls: &ControlSnapshot,
        config: &DashboardConfig,
    ) -> DashboardResult<ViewOutput> {
        match self {
            Self::Table => table_view(dataset, controls, config),
            Self::Scatter => scatter_view(dataset, controls, config),
            Self::Categorical => categorical_view(dataset, controls, config),
            Self::Pie => pie_view(dataset, controls, config),
            Self::Histogram => histogram_view(dataset, controls, config),
        }
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

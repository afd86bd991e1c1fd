use serde::{Deserialize, Serialize};

use crate::core::aggregate;
use crate::core::dataset::Dataset;
use crate::core::types::NumericColumn;
use crate::error::DashboardResult;

/// Which standard deviation spans the normal range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviationKind {
    /// Divide by `N - 1`.
    #[default]
    Sample,
    /// Divide by `N`.
    Population,
}

/// Inclusive `[mean - stddev, mean + stddev]` range of one numeric column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalRange {
    pub min: f64,
    pub max: f64,
}

impl NormalRange {
    /// Builds the range over the whole, unfiltered column.
    pub fn for_column(
        dataset: &Dataset,
        column: NumericColumn,
        deviation: DeviationKind,
    ) -> DashboardResult<Self> {
        Self::from_values(&dataset.column(column), deviation)
    }

    /// Sample deviation needs two values: a one-row column is a domain error
    /// under [`DeviationKind::Sample`], while [`DeviationKind::Population`]
    /// collapses it to `min == max == mean`.
    pub fn from_values(values: &[f64], deviation: DeviationKind) -> DashboardResult<Self> {
        let mean = aggregate::mean(values)?;
        let spread = match deviation {
            DeviationKind::Sample => aggregate::sample_std(values)?,
            DeviationKind::Population => aggregate::std(values)?,
        };
        Ok(Self {
            min: mean - spread,
            max: mean + spread,
        })
    }

    /// `true` when `value` lies inside the range, bounds included.
    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

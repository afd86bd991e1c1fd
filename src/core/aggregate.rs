//! Pure numeric reducers and the estimator registry built on top of them.
//!
//! `count` and `sum` accept empty input (yielding `0`); `mean` and the
//! deviations need at least one value and fail with a domain error otherwise.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, DashboardResult};

pub type Reducer = fn(&[f64]) -> DashboardResult<f64>;

#[allow(clippy::unnecessary_wraps)]
pub fn count(values: &[f64]) -> DashboardResult<f64> {
    Ok(values.len() as f64)
}

#[allow(clippy::unnecessary_wraps)]
pub fn sum(values: &[f64]) -> DashboardResult<f64> {
    Ok(values.iter().sum())
}

pub fn mean(values: &[f64]) -> DashboardResult<f64> {
    if values.is_empty() {
        return Err(DashboardError::Domain { reducer: "mean" });
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation (divides by `N`).
pub fn std(values: &[f64]) -> DashboardResult<f64> {
    if values.is_empty() {
        return Err(DashboardError::Domain { reducer: "std" });
    }
    let mean = mean(values)?;
    let variance =
        values.iter().map(|value| (value - mean).powi(2)).sum::<f64>() / values.len() as f64;
    Ok(variance.sqrt())
}

/// Sample standard deviation (divides by `N - 1`); needs two or more values.
pub fn sample_std(values: &[f64]) -> DashboardResult<f64> {
    if values.len() < 2 {
        return Err(DashboardError::Domain {
            reducer: "sample_std",
        });
    }
    let mean = mean(values)?;
    let variance = values.iter().map(|value| (value - mean).powi(2)).sum::<f64>()
        / (values.len() - 1) as f64;
    Ok(variance.sqrt())
}

/// User-selectable aggregation for the pie view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Estimator {
    Count,
    Sum,
    Mean,
    Std,
}

/// Registry entry: the reducer plus whether a column must be chosen for it.
#[derive(Debug, Clone, Copy)]
pub struct EstimatorEntry {
    pub reducer: Reducer,
    pub requires_column: bool,
}

impl Estimator {
    pub const ALL: [Self; 4] = [Self::Count, Self::Sum, Self::Mean, Self::Std];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Count => "count",
            Self::Sum => "sum",
            Self::Mean => "mean",
            Self::Std => "std",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Count => "Count",
            Self::Sum => "Sum",
            Self::Mean => "Mean",
            Self::Std => "Standard Deviation",
        }
    }

    #[must_use]
    pub fn entry(self) -> EstimatorEntry {
        match self {
            Self::Count => EstimatorEntry {
                reducer: count,
                requires_column: false,
            },
            Self::Sum => EstimatorEntry {
                reducer: sum,
                requires_column: true,
            },
            Self::Mean => EstimatorEntry {
                reducer: mean,
                requires_column: true,
            },
            Self::Std => EstimatorEntry {
                reducer: std,
                requires_column: true,
            },
        }
    }

    #[must_use]
    pub fn requires_column(self) -> bool {
        self.entry().requires_column
    }

    pub fn apply(self, values: &[f64]) -> DashboardResult<f64> {
        (self.entry().reducer)(values)
    }
}

impl FromStr for Estimator {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|estimator| estimator.name().eq_ignore_ascii_case(input.trim()))
            .ok_or_else(|| format!("unknown estimator `{input}`"))
    }
}

impl fmt::Display for Estimator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Checks that every estimator name offered to users resolves to a registry entry.
pub fn validate_estimator_options(option_names: &[&str]) -> DashboardResult<()> {
    for name in option_names {
        if name.parse::<Estimator>().is_err() {
            return Err(DashboardError::InvalidData(format!(
                "estimator option `{name}` has no registry entry"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn reducers_match_reference_values() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(count(&values).expect("count"), 8.0);
        assert_eq!(sum(&values).expect("sum"), 40.0);
        assert_eq!(mean(&values).expect("mean"), 5.0);
        assert_relative_eq!(std(&values).expect("std"), 2.0);
        assert_relative_eq!(
            sample_std(&values).expect("sample std"),
            (32.0f64 / 7.0).sqrt()
        );
    }

    #[test]
    fn mean_and_std_reject_empty_input() {
        assert!(mean(&[]).expect_err("empty mean").is_domain());
        assert!(std(&[]).expect_err("empty std").is_domain());
        assert!(sample_std(&[1.0]).expect_err("single sample").is_domain());
        assert_eq!(count(&[]).expect("count"), 0.0);
        assert_eq!(sum(&[]).expect("sum"), 0.0);
    }

    #[test]
    fn only_count_skips_column_selection() {
        assert!(!Estimator::Count.requires_column());
        assert!(Estimator::Sum.requires_column());
        assert!(Estimator::Mean.requires_column());
        assert!(Estimator::Std.requires_column());
    }

    #[test]
    fn registry_rejects_unknown_option_names() {
        assert!(validate_estimator_options(&["count", "sum", "mean", "std"]).is_ok());
        assert!(validate_estimator_options(&["median"]).is_err());
    }
}

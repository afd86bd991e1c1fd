use serde::{Deserialize, Serialize};

use crate::core::{DeviationKind, Dimension};
use crate::error::{DashboardError, DashboardResult};
use crate::render::{LegendPosition, Margins};

/// Public dashboard bootstrap configuration.
///
/// Serializable so hosts can persist/load setup without inventing their own
/// format. Every field falls back to its default when absent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Secondary grouping key of the categorical view.
    #[serde(default = "default_categorical_legend_hue")]
    pub categorical_legend_hue: Dimension,
    #[serde(default)]
    pub boundary_deviation: DeviationKind,
    /// Abort dispatch on a missing control binding instead of skipping the view.
    #[serde(default = "default_strict_wiring")]
    pub strict_wiring: bool,
    #[serde(default)]
    pub layout: LayoutDefaults,
}

/// Fixed sizes and positions shared by the view layouts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutDefaults {
    #[serde(default = "default_margins")]
    pub margins: Margins,
    #[serde(default = "default_table_height")]
    pub table_height: f64,
    #[serde(default = "default_histogram_height")]
    pub histogram_height: f64,
    #[serde(default = "default_histogram_width")]
    pub histogram_width: f64,
    #[serde(default = "default_histogram_opacity")]
    pub histogram_opacity: f64,
    #[serde(default = "default_scatter_marker_size")]
    pub scatter_marker_size: f64,
    #[serde(default = "default_pie_outline_width")]
    pub pie_outline_width: f64,
    #[serde(default = "default_pie_legend")]
    pub pie_legend: LegendPosition,
    #[serde(default = "default_categorical_legend")]
    pub categorical_legend: LegendPosition,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            categorical_legend_hue: default_categorical_legend_hue(),
            boundary_deviation: DeviationKind::default(),
            strict_wiring: default_strict_wiring(),
            layout: LayoutDefaults::default(),
        }
    }
}

impl Default for LayoutDefaults {
    fn default() -> Self {
        Self {
            margins: default_margins(),
            table_height: default_table_height(),
            histogram_height: default_histogram_height(),
            histogram_width: default_histogram_width(),
            histogram_opacity: default_histogram_opacity(),
            scatter_marker_size: default_scatter_marker_size(),
            pie_outline_width: default_pie_outline_width(),
            pie_legend: default_pie_legend(),
            categorical_legend: default_categorical_legend(),
        }
    }
}

impl DashboardConfig {
    #[must_use]
    pub fn with_categorical_legend_hue(mut self, hue: Dimension) -> Self {
        self.categorical_legend_hue = hue;
        self
    }

    #[must_use]
    pub fn with_boundary_deviation(mut self, deviation: DeviationKind) -> Self {
        self.boundary_deviation = deviation;
        self
    }

    #[must_use]
    pub fn with_strict_wiring(mut self, strict: bool) -> Self {
        self.strict_wiring = strict;
        self
    }

    pub fn validate(self) -> DashboardResult<()> {
        let layout = self.layout;
        for (name, value) in [
            ("table_height", layout.table_height),
            ("histogram_height", layout.histogram_height),
            ("histogram_width", layout.histogram_width),
            ("scatter_marker_size", layout.scatter_marker_size),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(DashboardError::InvalidData(format!(
                    "layout `{name}` must be finite and > 0"
                )));
            }
        }
        if !(0.0..=1.0).contains(&layout.histogram_opacity) {
            return Err(DashboardError::InvalidData(
                "layout `histogram_opacity` must be in [0, 1]".to_owned(),
            ));
        }
        if !layout.pie_outline_width.is_finite() || layout.pie_outline_width < 0.0 {
            return Err(DashboardError::InvalidData(
                "layout `pie_outline_width` must be finite and >= 0".to_owned(),
            ));
        }
        Ok(())
    }

    pub fn from_json_str(input: &str) -> DashboardResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| DashboardError::InvalidData(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> DashboardResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| DashboardError::InvalidData(format!("failed to serialize config: {e}")))
    }
}

fn default_categorical_legend_hue() -> Dimension {
    Dimension::Sex
}

fn default_strict_wiring() -> bool {
    cfg!(debug_assertions)
}

fn default_margins() -> Margins {
    Margins {
        left: 40.0,
        bottom: 40.0,
        top: 10.0,
        right: 10.0,
    }
}

fn default_table_height() -> f64 {
    500.0
}

fn default_histogram_height() -> f64 {
    600.0
}

fn default_histogram_width() -> f64 {
    900.0
}

fn default_histogram_opacity() -> f64 {
    0.7
}

fn default_scatter_marker_size() -> f64 {
    10.0
}

fn default_pie_outline_width() -> f64 {
    2.0
}

fn default_pie_legend() -> LegendPosition {
    LegendPosition { x: 0.0, y: 1.0 }
}

fn default_categorical_legend() -> LegendPosition {
    LegendPosition { x: 0.0, y: 1.2 }
}

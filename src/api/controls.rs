use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::{Dataset, Dimension, Estimator, NumericColumn};
use crate::error::{DashboardError, DashboardResult};
use crate::views::PlotKind;

/// Every control the presentation shell exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ControlId {
    #[serde(rename = "total_bill-range-slider")]
    TotalBillRange,
    #[serde(rename = "ddl-hue-scatter-plot")]
    ScatterHue,
    #[serde(rename = "size-scatter-slider")]
    ScatterSize,
    #[serde(rename = "ddl-jenis-plot-category")]
    CategoricalKind,
    #[serde(rename = "ddl-x-plot-category")]
    CategoricalX,
    #[serde(rename = "ddl-hue-pie-plot")]
    PieHue,
    #[serde(rename = "ddl-esti-pie-plot")]
    PieEstimator,
    #[serde(rename = "ddl-col-pie-plot")]
    PieColumn,
    #[serde(rename = "ddl-col-histogram-plot")]
    HistogramColumn,
    #[serde(rename = "ddl-hue-histogram-plot")]
    HistogramHue,
}

/// Shape of value a control carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlKind {
    Range,
    Size,
    Dimension,
    PlotKind,
    Estimator,
    Column,
}

impl ControlId {
    pub const ALL: [Self; 10] = [
        Self::TotalBillRange,
        Self::ScatterHue,
        Self::ScatterSize,
        Self::CategoricalKind,
        Self::CategoricalX,
        Self::PieHue,
        Self::PieEstimator,
        Self::PieColumn,
        Self::HistogramColumn,
        Self::HistogramHue,
    ];

    /// Wire identifier used by the presentation shell.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::TotalBillRange => "total_bill-range-slider",
            Self::ScatterHue => "ddl-hue-scatter-plot",
            Self::ScatterSize => "size-scatter-slider",
            Self::CategoricalKind => "ddl-jenis-plot-category",
            Self::CategoricalX => "ddl-x-plot-category",
            Self::PieHue => "ddl-hue-pie-plot",
            Self::PieEstimator => "ddl-esti-pie-plot",
            Self::PieColumn => "ddl-col-pie-plot",
            Self::HistogramColumn => "ddl-col-histogram-plot",
            Self::HistogramHue => "ddl-hue-histogram-plot",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::TotalBillRange => "Total Bill",
            Self::ScatterHue | Self::PieHue | Self::HistogramHue => "Hue",
            Self::ScatterSize => "Size",
            Self::CategoricalKind => "Kind",
            Self::CategoricalX => "X Axis",
            Self::PieEstimator => "Estimator",
            Self::PieColumn | Self::HistogramColumn => "Column",
        }
    }

    #[must_use]
    pub fn kind(self) -> ControlKind {
        match self {
            Self::TotalBillRange => ControlKind::Range,
            Self::ScatterSize => ControlKind::Size,
            Self::ScatterHue | Self::CategoricalX | Self::PieHue | Self::HistogramHue => {
                ControlKind::Dimension
            }
            Self::CategoricalKind => ControlKind::PlotKind,
            Self::PieEstimator => ControlKind::Estimator,
            Self::PieColumn | Self::HistogramColumn => ControlKind::Column,
        }
    }

    /// Converts raw shell input into a typed value for this control.
    pub fn parse_value(self, raw: &RawControlValue) -> DashboardResult<ControlValue> {
        let control = self.id();
        let invalid = |reason: &str| DashboardError::InvalidControlValue {
            control,
            reason: reason.to_owned(),
        };
        let unknown = |value: &str| DashboardError::UnknownCategory {
            control,
            value: value.to_owned(),
        };

        match (self.kind(), raw) {
            (ControlKind::Range, RawControlValue::Pair([lo, hi])) => ValueRange::new(*lo, *hi)
                .map(ControlValue::Range)
                .map_err(|_| invalid("range bounds must be finite with lo <= hi")),
            (ControlKind::Size, RawControlValue::Number(size)) => {
                let whole = size.is_finite() && size.fract() == 0.0;
                if !whole || *size < 1.0 || *size > f64::from(u32::MAX) {
                    return Err(invalid("size must be a whole number >= 1"));
                }
                Ok(ControlValue::Size(*size as u32))
            }
            (ControlKind::Dimension, RawControlValue::Text(text)) => text
                .parse::<Dimension>()
                .map(ControlValue::Dimension)
                .map_err(|_| unknown(text)),
            (ControlKind::PlotKind, RawControlValue::Text(text)) => text
                .parse::<PlotKind>()
                .map(ControlValue::PlotKind)
                .map_err(|_| unknown(text)),
            (ControlKind::Estimator, RawControlValue::Text(text)) => text
                .parse::<Estimator>()
                .map(ControlValue::Estimator)
                .map_err(|_| unknown(text)),
            (ControlKind::Column, RawControlValue::Text(text)) => text
                .parse::<NumericColumn>()
                .map(ControlValue::Column)
                .map_err(|_| unknown(text)),
            (kind, other) => Err(invalid(&format!(
                "expected a {kind:?} value, got {other}"
            ))),
        }
    }
}

impl FromStr for ControlId {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|control| control.id() == input.trim())
            .ok_or_else(|| format!("unknown control `{input}`"))
    }
}

impl fmt::Display for ControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Inclusive numeric range carried by a range slider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub lo: f64,
    pub hi: f64,
}

impl ValueRange {
    pub fn new(lo: f64, hi: f64) -> DashboardResult<Self> {
        if !lo.is_finite() || !hi.is_finite() || lo > hi {
            return Err(DashboardError::InvalidData(
                "range bounds must be finite with lo <= hi".to_owned(),
            ));
        }
        Ok(Self { lo, hi })
    }

    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        value >= self.lo && value <= self.hi
    }
}

/// Untyped value as emitted by the presentation shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawControlValue {
    Number(f64),
    Pair([f64; 2]),
    Text(String),
}

impl RawControlValue {
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }
}

impl fmt::Display for RawControlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "number {value}"),
            Self::Pair([lo, hi]) => write!(f, "range [{lo}, {hi}]"),
            Self::Text(text) => write!(f, "text `{text}`"),
        }
    }
}

/// Typed, validated control value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ControlValue {
    Range(ValueRange),
    Size(u32),
    Dimension(Dimension),
    PlotKind(PlotKind),
    Estimator(Estimator),
    Column(NumericColumn),
}

impl ControlValue {
    #[must_use]
    pub fn kind(self) -> ControlKind {
        match self {
            Self::Range(_) => ControlKind::Range,
            Self::Size(_) => ControlKind::Size,
            Self::Dimension(_) => ControlKind::Dimension,
            Self::PlotKind(_) => ControlKind::PlotKind,
            Self::Estimator(_) => ControlKind::Estimator,
            Self::Column(_) => ControlKind::Column,
        }
    }
}

/// Current value of every bound control, keyed by control id.
///
/// Serialized as a plain `control-id -> value` map; deserialization applies
/// the same kind check as [`ControlSnapshot::set`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(
    try_from = "IndexMap<ControlId, ControlValue>",
    into = "IndexMap<ControlId, ControlValue>"
)]
pub struct ControlSnapshot {
    values: IndexMap<ControlId, ControlValue>,
}

impl ControlSnapshot {
    /// Snapshot with every control at its catalog default.
    #[must_use]
    pub fn defaults(dataset: &Dataset) -> Self {
        let values = control_catalog(dataset)
            .into_iter()
            .map(|descriptor| (descriptor.id, descriptor.default))
            .collect();
        Self { values }
    }

    /// Binds `value` to `control`, rejecting values of the wrong kind.
    pub fn set(&mut self, control: ControlId, value: ControlValue) -> DashboardResult<()> {
        if value.kind() != control.kind() {
            return Err(DashboardError::InvalidControlValue {
                control: control.id(),
                reason: format!("expected a {:?} value, got {:?}", control.kind(), value.kind()),
            });
        }
        self.values.insert(control, value);
        Ok(())
    }

    /// Builder form of [`ControlSnapshot::set`]; a value of the wrong kind is logged and dropped.
    #[must_use]
    pub fn with(mut self, control: ControlId, value: ControlValue) -> Self {
        if let Err(err) = self.set(control, value) {
            warn!(control = %control, error = %err, "ignoring control value of the wrong kind");
        }
        self
    }

    /// Parses raw input and binds it; on failure the previous value is kept.
    pub fn assign(
        &mut self,
        control: ControlId,
        raw: &RawControlValue,
    ) -> DashboardResult<ControlValue> {
        let value = control.parse_value(raw)?;
        self.set(control, value)?;
        Ok(value)
    }

    pub fn remove(&mut self, control: ControlId) -> Option<ControlValue> {
        self.values.shift_remove(&control)
    }

    #[must_use]
    pub fn get(&self, control: ControlId) -> Option<ControlValue> {
        self.values.get(&control).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn require(&self, control: ControlId) -> DashboardResult<ControlValue> {
        self.get(control).ok_or(DashboardError::Config {
            control: control.id(),
        })
    }

    fn mismatch(control: ControlId, value: ControlValue) -> DashboardError {
        DashboardError::InvalidControlValue {
            control: control.id(),
            reason: format!("bound value has kind {:?}", value.kind()),
        }
    }

    pub fn range(&self, control: ControlId) -> DashboardResult<ValueRange> {
        match self.require(control)? {
            ControlValue::Range(range) => Ok(range),
            other => Err(Self::mismatch(control, other)),
        }
    }

    pub fn size(&self, control: ControlId) -> DashboardResult<u32> {
        match self.require(control)? {
            ControlValue::Size(size) => Ok(size),
            other => Err(Self::mismatch(control, other)),
        }
    }

    pub fn dimension(&self, control: ControlId) -> DashboardResult<Dimension> {
        match self.require(control)? {
            ControlValue::Dimension(dimension) => Ok(dimension),
            other => Err(Self::mismatch(control, other)),
        }
    }

    pub fn plot_kind(&self, control: ControlId) -> DashboardResult<PlotKind> {
        match self.require(control)? {
            ControlValue::PlotKind(kind) => Ok(kind),
            other => Err(Self::mismatch(control, other)),
        }
    }

    pub fn estimator(&self, control: ControlId) -> DashboardResult<Estimator> {
        match self.require(control)? {
            ControlValue::Estimator(estimator) => Ok(estimator),
            other => Err(Self::mismatch(control, other)),
        }
    }

    pub fn column(&self, control: ControlId) -> DashboardResult<NumericColumn> {
        match self.require(control)? {
            ControlValue::Column(column) => Ok(column),
            other => Err(Self::mismatch(control, other)),
        }
    }
}

impl TryFrom<IndexMap<ControlId, ControlValue>> for ControlSnapshot {
    type Error = DashboardError;

    fn try_from(values: IndexMap<ControlId, ControlValue>) -> Result<Self, Self::Error> {
        let mut snapshot = Self::default();
        for (control, value) in values {
            snapshot.set(control, value)?;
        }
        Ok(snapshot)
    }
}

impl From<ControlSnapshot> for IndexMap<ControlId, ControlValue> {
    fn from(snapshot: ControlSnapshot) -> Self {
        snapshot.values
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropdownOption {
    pub label: String,
    pub value: String,
}

impl DropdownOption {
    fn new(label: &str, value: &str) -> Self {
        Self {
            label: label.to_owned(),
            value: value.to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Widget {
    Dropdown { options: Vec<DropdownOption> },
    Slider { min: u32, max: u32, marks: Vec<u32> },
    RangeSlider { min: f64, max: f64, step: f64 },
}

/// Everything the shell needs to draw one control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlDescriptor {
    pub id: ControlId,
    pub label: String,
    pub widget: Widget,
    pub default: ControlValue,
    pub disabled: bool,
}

fn hue_options(dimensions: &[Dimension]) -> Vec<DropdownOption> {
    dimensions
        .iter()
        .map(|dimension| DropdownOption::new(&dimension.capitalized(), dimension.name()))
        .collect()
}

fn column_options() -> Vec<DropdownOption> {
    NumericColumn::ALL
        .iter()
        .map(|column| DropdownOption::new(column.label(), column.name()))
        .collect()
}

const PIE_ESTIMATOR_DEFAULT: Estimator = Estimator::Count;

/// Describes every control with its options and default value.
#[must_use]
pub fn control_catalog(dataset: &Dataset) -> Vec<ControlDescriptor> {
    let (bill_min, bill_max) = dataset.total_bill_range().unwrap_or((0.0, 0.0));
    let sizes = dataset.distinct_sizes();
    let size_min = sizes.first().copied().unwrap_or(1);
    let size_max = sizes.last().copied().unwrap_or(size_min);
    let hue_order = [Dimension::Sex, Dimension::Smoker, Dimension::Day, Dimension::Time];
    let x_order = [Dimension::Smoker, Dimension::Sex, Dimension::Day, Dimension::Time];

    ControlId::ALL
        .into_iter()
        .map(|id| {
            let (widget, default) = match id {
                ControlId::TotalBillRange => (
                    Widget::RangeSlider {
                        min: bill_min,
                        max: bill_max,
                        step: 1.0,
                    },
                    ControlValue::Range(ValueRange {
                        lo: bill_min,
                        hi: bill_max,
                    }),
                ),
                ControlId::ScatterSize => (
                    Widget::Slider {
                        min: size_min,
                        max: size_max,
                        marks: sizes.clone(),
                    },
                    ControlValue::Size(size_min),
                ),
                ControlId::ScatterHue | ControlId::PieHue | ControlId::HistogramHue => (
                    Widget::Dropdown {
                        options: hue_options(&hue_order),
                    },
                    ControlValue::Dimension(Dimension::Sex),
                ),
                ControlId::CategoricalX => (
                    Widget::Dropdown {
                        options: hue_options(&x_order),
                    },
                    ControlValue::Dimension(Dimension::Sex),
                ),
                ControlId::CategoricalKind => (
                    Widget::Dropdown {
                        options: PlotKind::ALL
                            .iter()
                            .map(|kind| DropdownOption::new(kind.label(), kind.name()))
                            .collect(),
                    },
                    ControlValue::PlotKind(PlotKind::Bar),
                ),
                ControlId::PieEstimator => (
                    Widget::Dropdown {
                        options: Estimator::ALL
                            .iter()
                            .map(|estimator| {
                                DropdownOption::new(estimator.label(), estimator.name())
                            })
                            .collect(),
                    },
                    ControlValue::Estimator(PIE_ESTIMATOR_DEFAULT),
                ),
                ControlId::PieColumn | ControlId::HistogramColumn => (
                    Widget::Dropdown {
                        options: column_options(),
                    },
                    ControlValue::Column(NumericColumn::TotalBill),
                ),
            };
            let disabled =
                id == ControlId::PieColumn && !super::pie_column_enabled(PIE_ESTIMATOR_DEFAULT);
            ControlDescriptor {
                id,
                label: id.label().to_owned(),
                widget,
                default,
                disabled,
            }
        })
        .collect()
}

/// Estimator names offered by the pie estimator dropdown.
#[must_use]
pub fn estimator_option_names(catalog: &[ControlDescriptor]) -> Vec<&str> {
    catalog
        .iter()
        .filter(|descriptor| descriptor.id == ControlId::PieEstimator)
        .flat_map(|descriptor| match &descriptor.widget {
            Widget::Dropdown { options } => options.iter().map(|o| o.value.as_str()).collect(),
            _ => Vec::new(),
        })
        .collect()
}

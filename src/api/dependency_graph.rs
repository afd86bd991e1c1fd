use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::Estimator;
use crate::error::{DashboardError, DashboardResult};
use crate::views::ViewId;

use super::{ControlId, ControlSnapshot};

/// Control property computed from other controls rather than set by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DerivedControl {
    /// Enabled flag of the pie column selector.
    PieColumnEnabled,
}

/// Something that re-evaluates when a control changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum Consumer {
    View(ViewId),
    Control(DerivedControl),
}

/// New enablement state for a control, forwarded to the presentation shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlStateUpdate {
    pub control: ControlId,
    pub enabled: bool,
}

/// The pie column selector only matters for estimators that read a column.
#[must_use]
pub fn pie_column_enabled(estimator: Estimator) -> bool {
    estimator.requires_column()
}

impl DerivedControl {
    pub const ALL: [Self; 1] = [Self::PieColumnEnabled];

    #[must_use]
    pub fn target(self) -> ControlId {
        match self {
            Self::PieColumnEnabled => ControlId::PieColumn,
        }
    }

    #[must_use]
    pub fn inputs(self) -> &'static [ControlId] {
        match self {
            Self::PieColumnEnabled => &[ControlId::PieEstimator],
        }
    }

    pub fn evaluate(self, controls: &ControlSnapshot) -> DashboardResult<ControlStateUpdate> {
        match self {
            Self::PieColumnEnabled => {
                let estimator = controls.estimator(ControlId::PieEstimator)?;
                Ok(ControlStateUpdate {
                    control: self.target(),
                    enabled: pie_column_enabled(estimator),
                })
            }
        }
    }
}

const WIRING: &[(ControlId, &[Consumer])] = &[
    (ControlId::TotalBillRange, &[Consumer::View(ViewId::Table)]),
    (ControlId::ScatterHue, &[Consumer::View(ViewId::Scatter)]),
    (ControlId::ScatterSize, &[Consumer::View(ViewId::Scatter)]),
    (
        ControlId::CategoricalKind,
        &[Consumer::View(ViewId::Categorical)],
    ),
    (ControlId::CategoricalX, &[Consumer::View(ViewId::Categorical)]),
    (ControlId::PieHue, &[Consumer::View(ViewId::Pie)]),
    (
        ControlId::PieEstimator,
        &[
            Consumer::Control(DerivedControl::PieColumnEnabled),
            Consumer::View(ViewId::Pie),
        ],
    ),
    (ControlId::PieColumn, &[Consumer::View(ViewId::Pie)]),
    (
        ControlId::HistogramColumn,
        &[Consumer::View(ViewId::Histogram)],
    ),
    (ControlId::HistogramHue, &[Consumer::View(ViewId::Histogram)]),
];

/// Trigger control -> consumers that must re-evaluate when it changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyGraph {
    consumers: IndexMap<ControlId, SmallVec<[Consumer; 2]>>,
}

impl Default for DependencyGraph {
    fn default() -> Self {
        Self::standard()
    }
}

impl DependencyGraph {
    /// The dashboard's fixed wiring.
    #[must_use]
    pub fn standard() -> Self {
        Self::from_table(WIRING)
    }

    #[must_use]
    pub fn from_table(table: &[(ControlId, &[Consumer])]) -> Self {
        let mut consumers: IndexMap<ControlId, SmallVec<[Consumer; 2]>> = IndexMap::new();
        for (control, targets) in table {
            let entry = consumers.entry(*control).or_default();
            for target in *targets {
                if !entry.contains(target) {
                    entry.push(*target);
                }
            }
        }
        Self { consumers }
    }

    /// Consumers of `control`, derived controls first, in declaration order.
    #[must_use]
    pub fn consumers(&self, control: ControlId) -> &[Consumer] {
        self.consumers
            .get(&control)
            .map(|targets| targets.as_slice())
            .unwrap_or(&[])
    }

    /// Controls whose changes re-evaluate `consumer`.
    #[must_use]
    pub fn triggers_of(&self, consumer: Consumer) -> Vec<ControlId> {
        self.consumers
            .iter()
            .filter(|(_, targets)| targets.contains(&consumer))
            .map(|(control, _)| *control)
            .collect()
    }

    /// Checks the table against what every view and derived control declares it reads.
    pub fn validate(&self) -> DashboardResult<()> {
        for control in ControlId::ALL {
            if self.consumers(control).is_empty() {
                return Err(DashboardError::InvalidData(format!(
                    "control `{control}` has no consumers"
                )));
            }
        }

        let declared = ViewId::ALL
            .into_iter()
            .map(|view| (Consumer::View(view), view.inputs()))
            .chain(
                DerivedControl::ALL
                    .into_iter()
                    .map(|derived| (Consumer::Control(derived), derived.inputs())),
            );
        for (consumer, inputs) in declared {
            let mut triggers = self.triggers_of(consumer);
            let mut expected = inputs.to_vec();
            triggers.sort_unstable();
            expected.sort_unstable();
            if triggers != expected {
                return Err(DashboardError::InvalidData(format!(
                    "{consumer:?} is wired to {triggers:?} but reads {expected:?}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_wiring_matches_declared_inputs() {
        DependencyGraph::standard().validate().expect("wiring");
    }

    #[test]
    fn missing_view_input_is_reported() {
        let table: &[(ControlId, &[Consumer])] = &[
            (ControlId::TotalBillRange, &[Consumer::View(ViewId::Table)]),
            (ControlId::ScatterHue, &[Consumer::View(ViewId::Scatter)]),
        ];
        assert!(DependencyGraph::from_table(table).validate().is_err());
    }

    #[test]
    fn estimator_change_updates_selector_before_pie() {
        let graph = DependencyGraph::standard();
        assert_eq!(
            graph.consumers(ControlId::PieEstimator),
            &[
                Consumer::Control(DerivedControl::PieColumnEnabled),
                Consumer::View(ViewId::Pie),
            ]
        );
    }
}

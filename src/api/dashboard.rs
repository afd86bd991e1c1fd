use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::{Dataset, aggregate};
use crate::error::{DashboardError, DashboardResult};
use crate::render::{ChartSpec, ColorPalette};
use crate::views::ViewId;

use super::{
    Consumer, ControlId, ControlSnapshot, ControlStateUpdate, DashboardConfig, DependencyGraph,
    DerivedControl, Presenter, RawControlValue, control_catalog, estimator_option_names,
};

/// Event emitted by the presentation shell when the user edits a control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlChanged {
    pub control: ControlId,
    pub value: RawControlValue,
}

impl ControlChanged {
    #[must_use]
    pub fn new(control: ControlId, value: RawControlValue) -> Self {
        Self { control, value }
    }
}

/// How a view came out of one evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ViewStatus {
    Rendered,
    /// An aggregation had nothing to reduce; the shell shows an empty chart.
    Placeholder { reason: String },
    /// A control binding was missing or unusable; the view keeps whatever it showed before.
    Unrendered { reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewUpdate {
    pub view: ViewId,
    pub status: ViewStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart: Option<ChartSpec>,
    #[serde(default)]
    pub texts: Vec<String>,
}

/// Everything recomputed for one event (or for a full render).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DispatchOutcome {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger: Option<ControlId>,
    #[serde(default)]
    pub controls: Vec<ControlStateUpdate>,
    #[serde(default)]
    pub views: Vec<ViewUpdate>,
}

impl DispatchOutcome {
    #[must_use]
    pub fn view(&self, view: ViewId) -> Option<&ViewUpdate> {
        self.views.iter().find(|update| update.view == view)
    }

    #[must_use]
    pub fn control_state(&self, control: ControlId) -> Option<bool> {
        self.controls
            .iter()
            .find(|update| update.control == control)
            .map(|update| update.enabled)
    }
}

/// Event dispatcher over a borrowed, read-only dataset.
///
/// One event is processed to completion before the next: the control
/// snapshot is swapped as a whole, then every subscribed consumer re-runs.
#[derive(Debug, Clone)]
pub struct Dashboard<'a> {
    dataset: &'a Dataset,
    config: DashboardConfig,
    controls: ControlSnapshot,
    graph: DependencyGraph,
}

impl<'a> Dashboard<'a> {
    /// Validates static tables and starts from the catalog defaults.
    pub fn new(dataset: &'a Dataset, config: DashboardConfig) -> DashboardResult<Self> {
        config.validate()?;
        ColorPalette.validate()?;
        let catalog = control_catalog(dataset);
        aggregate::validate_estimator_options(&estimator_option_names(&catalog))?;
        let graph = DependencyGraph::standard();
        graph.validate()?;

        debug!(
            rows = dataset.len(),
            strict_wiring = config.strict_wiring,
            "dashboard initialized"
        );
        Ok(Self {
            dataset,
            config,
            controls: ControlSnapshot::defaults(dataset),
            graph,
        })
    }

    /// Replaces the whole control snapshot.
    #[must_use]
    pub fn with_controls(mut self, controls: ControlSnapshot) -> Self {
        self.controls = controls;
        self
    }

    #[must_use]
    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    #[must_use]
    pub fn controls(&self) -> &ControlSnapshot {
        &self.controls
    }

    #[must_use]
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    #[must_use]
    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    /// Applies one control change and re-evaluates its consumers.
    ///
    /// A rejected value leaves the snapshot untouched and returns the error.
    pub fn handle(&mut self, event: &ControlChanged) -> DashboardResult<DispatchOutcome> {
        let mut next = self.controls.clone();
        if let Err(err) = next.assign(event.control, &event.value) {
            warn!(
                control = %event.control,
                error = %err,
                "rejected control value, keeping previous value"
            );
            return Err(err);
        }
        self.controls = next;

        let consumers = self.graph.consumers(event.control);
        debug!(
            control = %event.control,
            consumers = consumers.len(),
            "control changed"
        );
        self.evaluate(Some(event.control), consumers)
    }

    /// Handles `event` and forwards the outcome to `presenter`.
    pub fn dispatch_to<P: Presenter>(
        &mut self,
        event: &ControlChanged,
        presenter: &mut P,
    ) -> DashboardResult<DispatchOutcome> {
        let outcome = self.handle(event)?;
        presenter.present(&outcome)?;
        Ok(outcome)
    }

    /// Evaluates every derived control and every view, as for a first page load.
    pub fn render_all(&self) -> DashboardResult<DispatchOutcome> {
        let consumers: Vec<Consumer> = DerivedControl::ALL
            .into_iter()
            .map(Consumer::Control)
            .chain(ViewId::ALL.into_iter().map(Consumer::View))
            .collect();
        self.evaluate(None, &consumers)
    }

    pub fn render_view(&self, view: ViewId) -> DashboardResult<ViewUpdate> {
        let result = view.evaluate(self.dataset, &self.controls, &self.config);
        match result {
            Ok(output) => {
                trace!(view = %view, traces = output.chart.traces.len(), "view rendered");
                Ok(ViewUpdate {
                    view,
                    status: ViewStatus::Rendered,
                    chart: Some(output.chart),
                    texts: output.texts,
                })
            }
            Err(err) if err.is_domain() => {
                warn!(view = %view, error = %err, "rendering placeholder chart");
                Ok(ViewUpdate {
                    view,
                    status: ViewStatus::Placeholder {
                        reason: err.to_string(),
                    },
                    chart: Some(ChartSpec::default()),
                    texts: Vec::new(),
                })
            }
            Err(err) if err.is_config() && self.config.strict_wiring => Err(err),
            // Any other failure stays confined to this view.
            Err(err) => Ok(Self::unrendered(view, &err)),
        }
    }

    fn unrendered(view: ViewId, err: &DashboardError) -> ViewUpdate {
        warn!(view = %view, error = %err, "leaving view unrendered");
        ViewUpdate {
            view,
            status: ViewStatus::Unrendered {
                reason: err.to_string(),
            },
            chart: None,
            texts: Vec::new(),
        }
    }

    fn evaluate(
        &self,
        trigger: Option<ControlId>,
        consumers: &[Consumer],
    ) -> DashboardResult<DispatchOutcome> {
        let mut outcome = DispatchOutcome {
            trigger,
            ..DispatchOutcome::default()
        };
        for consumer in consumers {
            match *consumer {
                Consumer::Control(derived) => match derived.evaluate(&self.controls) {
                    Ok(update) => outcome.controls.push(update),
                    Err(err) if err.is_config() && self.config.strict_wiring => return Err(err),
                    Err(err) => {
                        warn!(derived = ?derived, error = %err, "skipping derived control");
                    }
                },
                Consumer::View(view) => outcome.views.push(self.render_view(view)?),
            }
        }
        Ok(outcome)
    }
}

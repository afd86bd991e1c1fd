use indexmap::IndexMap;

use crate::error::DashboardResult;
use crate::views::ViewId;

use super::{ControlId, ControlStateUpdate, DispatchOutcome, ViewStatus, ViewUpdate};

/// Contract implemented by the presentation shell.
///
/// Shells receive fully computed view updates and control states so widget
/// code stays isolated from dataset and transform logic.
pub trait Presenter {
    fn present_view(&mut self, update: &ViewUpdate) -> DashboardResult<()>;

    fn set_control_enabled(&mut self, update: ControlStateUpdate) -> DashboardResult<()>;

    /// Forwards control states first, then views, in outcome order.
    fn present(&mut self, outcome: &DispatchOutcome) -> DashboardResult<()> {
        for update in &outcome.controls {
            self.set_control_enabled(*update)?;
        }
        for update in &outcome.views {
            self.present_view(update)?;
        }
        Ok(())
    }
}

/// Headless presenter used by tests and the render binary.
///
/// It still validates chart specs so tests catch malformed output before a
/// real shell is attached.
#[derive(Debug, Default)]
pub struct NullPresenter {
    pub views_presented: usize,
    pub placeholders: usize,
    pub last_texts: IndexMap<ViewId, Vec<String>>,
    pub control_enabled: IndexMap<ControlId, bool>,
}

impl Presenter for NullPresenter {
    fn present_view(&mut self, update: &ViewUpdate) -> DashboardResult<()> {
        if let Some(chart) = &update.chart {
            chart.validate()?;
        }
        if matches!(update.status, ViewStatus::Placeholder { .. }) {
            self.placeholders += 1;
        }
        self.views_presented += 1;
        self.last_texts.insert(update.view, update.texts.clone());
        Ok(())
    }

    fn set_control_enabled(&mut self, update: ControlStateUpdate) -> DashboardResult<()> {
        self.control_enabled.insert(update.control, update.enabled);
        Ok(())
    }
}

//! Control wiring and event dispatch for the dashboard.

mod controls;
mod dashboard;
mod dashboard_config;
mod dependency_graph;
mod json_contract;
mod presenter;

pub use controls::{
    ControlDescriptor, ControlId, ControlKind, ControlSnapshot, ControlValue, DropdownOption,
    RawControlValue, ValueRange, Widget, control_catalog, estimator_option_names,
};
pub use dashboard::{ControlChanged, Dashboard, DispatchOutcome, ViewStatus, ViewUpdate};
pub use dashboard_config::{DashboardConfig, LayoutDefaults};
pub use dependency_graph::{
    Consumer, ControlStateUpdate, DependencyGraph, DerivedControl, pie_column_enabled,
};
pub use json_contract::{
    CONTROL_CATALOG_JSON_SCHEMA_V1, ControlCatalogJsonContractV1,
    DISPATCH_OUTCOME_JSON_SCHEMA_V1, DispatchOutcomeJsonContractV1,
};
pub use presenter::{NullPresenter, Presenter};

//! tips-dash: reactive view transforms for an interactive tips dashboard.
//!
//! The crate maps a read-only dataset and a snapshot of control values to
//! renderer-agnostic chart specifications, and wires which controls feed
//! which views. Widgets, chart rendering and page serving stay with the host.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;
pub mod views;

pub use api::{ControlChanged, Dashboard, DashboardConfig};
pub use error::{DashboardError, DashboardResult};

//! Presentation-side handlers built on the ranking core

pub mod dashboard;

pub use dashboard::{build_view, Dashboard, DashboardSettings, DashboardView, PassportCard, PassportPanel};

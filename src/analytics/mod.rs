#[cfg(feature = "desktop")]
pub mod commands;
mod service;

pub use service::{AnalyticsReport, AnalyticsService, DashboardStats, GoalProgressReport};

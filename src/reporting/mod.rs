//! Analysis and reporting
//!
//! This module handles HTML dashboard generation and structured logging
//! for the application.

pub mod dashboard;
pub mod logging;

// Re-export commonly used items
pub use dashboard::{DashboardData, DashboardError, HtmlDashboard};

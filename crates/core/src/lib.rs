//! Core data model, configuration, and CSV data store for the influencer
//! campaign dashboard.

pub mod config;
pub mod error;
pub mod store;
pub mod types;

pub use config::{AppConfig, DataFiles, ReportSettings};
pub use error::{DashboardError, DashboardResult};
pub use store::{DataStore, SourceFingerprint};

//! Influencer performance reporting: revenue rollup, the denormalized
//! performance view, selector filtering, and dashboard aggregates.

pub mod aggregator;
pub mod dashboard;
pub mod export;
pub mod filter;
pub mod format;
pub mod performance;
pub mod session;

pub use aggregator::{aggregate_revenue, RevenueTotals};
pub use dashboard::DashboardReport;
pub use export::ExportFormat;
pub use filter::{apply_filters, FilterOptions, FilterSelection, Selector};
pub use performance::{roas, PerformanceRecord, PerformanceView};
pub use session::ReportingSession;

#[cfg(test)]
mod testing;

//! Export of a filtered record set as CSV or JSON.

use crate::performance::PerformanceRecord;
use influencer_core::{DashboardError, DashboardResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl FromStr for ExportFormat {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(DashboardError::Config(format!(
                "unsupported export format '{other}'"
            ))),
        }
    }
}

pub fn export(records: &[PerformanceRecord], format: ExportFormat) -> DashboardResult<String> {
    match format {
        ExportFormat::Csv => export_csv(records),
        ExportFormat::Json => export_json(records),
    }
}

/// Header row plus one line per record. Influencers without a payout have
/// an empty `basis` cell.
pub fn export_csv(records: &[PerformanceRecord]) -> DashboardResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    if records.is_empty() {
        writer.write_record(CSV_HEADER)?;
    }
    for record in records {
        writer.serialize(record)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| DashboardError::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| DashboardError::Internal(e.into()))
}

pub fn export_json(records: &[PerformanceRecord]) -> DashboardResult<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

// Matches the field order of `PerformanceRecord`.
const CSV_HEADER: [&str; 13] = [
    "influencer_id",
    "name",
    "category",
    "gender",
    "follower_count",
    "platform",
    "basis",
    "rate",
    "orders",
    "total_payout",
    "total_revenue",
    "total_orders",
    "roas",
];

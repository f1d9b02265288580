//! Dashboard aggregates over a filtered record set: KPIs, the ranked ROAS
//! table, and grouped series for bar charts.

use crate::filter::FilterSelection;
use crate::format::{format_count, format_currency, format_ratio};
use crate::performance::PerformanceRecord;
use chrono::{DateTime, Utc};
use influencer_core::ReportSettings;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Label used in the basis distribution for records without a payout row.
pub const NO_PAYOUT_LABEL: &str = "none";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KpiSummary {
    pub total_spend: f64,
    pub total_revenue: f64,
    pub overall_roas: f64,
    pub influencer_count: usize,
}

impl KpiSummary {
    pub fn from_records(records: &[PerformanceRecord]) -> Self {
        let total_spend: f64 = records.iter().map(|r| r.total_payout).sum();
        let total_revenue: f64 = records.iter().map(|r| r.total_revenue).sum();
        Self {
            total_spend,
            total_revenue,
            overall_roas: if total_spend > 0.0 {
                total_revenue / total_spend
            } else {
                0.0
            },
            influencer_count: records.len(),
        }
    }

    /// Display tiles in dashboard order.
    pub fn tiles(&self, currency_symbol: &str) -> Vec<KpiTile> {
        vec![
            KpiTile::new(
                "Total Spend (Payouts)",
                format_currency(self.total_spend, currency_symbol),
            ),
            KpiTile::new(
                "Total Revenue",
                format_currency(self.total_revenue, currency_symbol),
            ),
            KpiTile::new("Overall Incremental ROAS", format_ratio(self.overall_roas)),
            KpiTile::new(
                "Total Influencers",
                format_count(self.influencer_count as u64),
            ),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiTile {
    pub label: String,
    pub value: String,
}

impl KpiTile {
    fn new(label: &str, value: String) -> Self {
        Self {
            label: label.to_string(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopRoasRow {
    pub name: String,
    pub category: String,
    pub platform: String,
    pub total_revenue: f64,
    pub total_payout: f64,
    pub roas: f64,
}

impl From<&PerformanceRecord> for TopRoasRow {
    fn from(r: &PerformanceRecord) -> Self {
        Self {
            name: r.name.clone(),
            category: r.category.clone(),
            platform: r.platform.clone(),
            total_revenue: r.total_revenue,
            total_payout: r.total_payout,
            roas: r.roas,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSeries {
    pub title: String,
    pub points: Vec<SeriesPoint>,
}

impl BarSeries {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn max_value(&self) -> f64 {
        self.points.iter().map(|p| p.value).fold(0.0, f64::max)
    }
}

/// Everything the renderer needs for one filter selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardReport {
    pub selection: FilterSelection,
    pub kpis: KpiSummary,
    pub tiles: Vec<KpiTile>,
    pub top_roas: Vec<TopRoasRow>,
    pub revenue_by_platform: BarSeries,
    pub revenue_by_category: BarSeries,
    pub payout_basis: BarSeries,
    pub records: Vec<PerformanceRecord>,
    pub generated_at: DateTime<Utc>,
}

impl DashboardReport {
    pub fn build(
        records: Vec<PerformanceRecord>,
        selection: FilterSelection,
        settings: &ReportSettings,
    ) -> Self {
        let kpis = KpiSummary::from_records(&records);
        let report = Self {
            tiles: kpis.tiles(&settings.currency_symbol),
            top_roas: top_by_roas(&records, settings.top_n),
            revenue_by_platform: revenue_by(&records, "Revenue by Platform", |r| &r.platform),
            revenue_by_category: revenue_by(&records, "Revenue by Influencer Category", |r| {
                &r.category
            }),
            payout_basis: basis_distribution(&records),
            kpis,
            selection,
            records,
            generated_at: Utc::now(),
        };
        debug!(
            rows = report.records.len(),
            top_rows = report.top_roas.len(),
            "Dashboard report built"
        );
        report
    }
}

/// Highest ROAS first; equal ROAS keeps record order.
pub fn top_by_roas(records: &[PerformanceRecord], n: usize) -> Vec<TopRoasRow> {
    let mut ranked: Vec<&PerformanceRecord> = records.iter().collect();
    ranked.sort_by(|a, b| b.roas.total_cmp(&a.roas));
    ranked.into_iter().take(n).map(TopRoasRow::from).collect()
}

/// Revenue summed per key, sorted by key.
pub fn revenue_by<F>(records: &[PerformanceRecord], title: &str, key: F) -> BarSeries
where
    F: Fn(&PerformanceRecord) -> &str,
{
    let mut sums: BTreeMap<&str, f64> = BTreeMap::new();
    for record in records {
        *sums.entry(key(record)).or_insert(0.0) += record.total_revenue;
    }
    BarSeries {
        title: title.to_string(),
        points: sums
            .into_iter()
            .map(|(label, value)| SeriesPoint {
                label: label.to_string(),
                value,
            })
            .collect(),
    }
}

/// Record count per payout basis, most frequent first.
pub fn basis_distribution(records: &[PerformanceRecord]) -> BarSeries {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for record in records {
        let label = record.basis.map_or(NO_PAYOUT_LABEL, |b| b.as_str());
        match counts.iter_mut().find(|(l, _)| *l == label) {
            Some((_, count)) => *count += 1,
            None => counts.push((label, 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    BarSeries {
        title: "Payout Basis Distribution".to_string(),
        points: counts
            .into_iter()
            .map(|(label, count)| SeriesPoint {
                label: label.to_string(),
                value: count as f64,
            })
            .collect(),
    }
}

//! Terminal rendering of a dashboard report.

use influencer_reporting::dashboard::{BarSeries, DashboardReport, TopRoasRow};
use influencer_reporting::filter::FilterOptions;
use influencer_reporting::format::{format_amount, format_count, format_currency};
use influencer_reporting::PerformanceRecord;
use std::fmt::Write;
use tabled::settings::Style;
use tabled::{Table, Tabled};

const BAR_WIDTH: usize = 30;

#[derive(Tabled)]
struct KpiRow {
    #[tabled(rename = "KPI")]
    label: String,
    #[tabled(rename = "Value")]
    value: String,
}

#[derive(Tabled)]
struct TopRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Platform")]
    platform: String,
    #[tabled(rename = "Revenue")]
    revenue: String,
    #[tabled(rename = "Payout")]
    payout: String,
    #[tabled(rename = "ROAS")]
    roas: String,
}

impl From<&TopRoasRow> for TopRow {
    fn from(r: &TopRoasRow) -> Self {
        Self {
            name: r.name.clone(),
            category: r.category.clone(),
            platform: r.platform.clone(),
            revenue: format_amount(r.total_revenue),
            payout: format_amount(r.total_payout),
            roas: format!("{:.2}", r.roas),
        }
    }
}

#[derive(Tabled)]
struct SeriesRow {
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "")]
    bar: String,
}

#[derive(Tabled)]
struct RecordRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Gender")]
    gender: String,
    #[tabled(rename = "Followers")]
    followers: String,
    #[tabled(rename = "Platform")]
    platform: String,
    #[tabled(rename = "Basis")]
    basis: String,
    #[tabled(rename = "Rate")]
    rate: String,
    #[tabled(rename = "Orders")]
    orders: u64,
    #[tabled(rename = "Payout")]
    payout: String,
    #[tabled(rename = "Revenue")]
    revenue: String,
    #[tabled(rename = "Tracked Orders")]
    tracked_orders: u64,
    #[tabled(rename = "ROAS")]
    roas: String,
}

impl From<&PerformanceRecord> for RecordRow {
    fn from(r: &PerformanceRecord) -> Self {
        Self {
            id: r.influencer_id,
            name: r.name.clone(),
            category: r.category.clone(),
            gender: r.gender.clone(),
            followers: format_count(r.follower_count),
            platform: r.platform.clone(),
            basis: r.basis.map_or_else(|| "-".to_string(), |b| b.to_string()),
            rate: format_amount(r.rate),
            orders: r.orders,
            payout: format_amount(r.total_payout),
            revenue: format_amount(r.total_revenue),
            tracked_orders: r.total_orders,
            roas: format!("{:.2}", r.roas),
        }
    }
}

/// Render the full dashboard as plain text.
pub fn render_report(report: &DashboardReport, currency_symbol: &str) -> String {
    let mut out = String::new();
    let selection = &report.selection;

    let _ = writeln!(out, "Influencer Campaign Dashboard");
    let _ = writeln!(
        out,
        "Campaign: {} | Platform: {} | Category: {}",
        selection.campaign, selection.platform, selection.category
    );
    let _ = writeln!(out);

    section(&mut out, "Key Performance Indicators");
    let kpis = report.tiles.iter().map(|t| KpiRow {
        label: t.label.clone(),
        value: t.value.clone(),
    });
    table(&mut out, kpis);

    section(&mut out, "Top Influencers by ROAS");
    if report.top_roas.is_empty() {
        let _ = writeln!(out, "  (no influencers match the current filters)\n");
    } else {
        table(&mut out, report.top_roas.iter().map(TopRow::from));
    }

    for series in [
        &report.revenue_by_platform,
        &report.revenue_by_category,
    ] {
        bar_chart(&mut out, series, |v| format_currency(v, currency_symbol));
    }
    bar_chart(&mut out, &report.payout_basis, |v| format_count(v as u64));

    section(&mut out, "All Influencer Data");
    if report.records.is_empty() {
        let _ = writeln!(out, "  (empty)\n");
    } else {
        table(&mut out, report.records.iter().map(RecordRow::from));
    }
    out
}

pub fn render_options(options: &FilterOptions) -> String {
    let mut out = String::new();
    for (title, values) in [
        ("Campaigns", &options.campaigns),
        ("Platforms", &options.platforms),
        ("Categories", &options.categories),
    ] {
        let _ = writeln!(out, "{title}:");
        for value in values {
            let _ = writeln!(out, "  {value}");
        }
    }
    out
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out, "### {title}");
}

fn table<T: Tabled>(out: &mut String, rows: impl IntoIterator<Item = T>) {
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    for line in table.to_string().lines() {
        let _ = writeln!(out, "  {line}");
    }
    let _ = writeln!(out);
}

fn bar_chart(out: &mut String, series: &BarSeries, fmt_value: impl Fn(f64) -> String) {
    section(out, &series.title);
    if series.is_empty() {
        let _ = writeln!(out, "  (no data)\n");
        return;
    }
    let max = series.max_value();
    let rows = series.points.iter().map(|p| SeriesRow {
        label: p.label.clone(),
        value: fmt_value(p.value),
        bar: bar(p.value, max),
    });
    table(out, rows);
}

fn bar(value: f64, max: f64) -> String {
    if max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    let len = ((value / max) * BAR_WIDTH as f64).round().max(1.0) as usize;
    "█".repeat(len)
}

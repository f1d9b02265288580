//! Reporting session: owns the loaded store and the base performance view,
//! and replays filter + reporting on each selection.

use crate::dashboard::DashboardReport;
use crate::filter::{apply_filters, FilterOptions, FilterSelection};
use crate::performance::PerformanceView;
use influencer_core::{
    AppConfig, DashboardResult, DataFiles, DataStore, ReportSettings, SourceFingerprint,
};
use std::path::PathBuf;
use tracing::info;

pub struct ReportingSession {
    data_dir: PathBuf,
    files: DataFiles,
    settings: ReportSettings,
    store: DataStore,
    view: PerformanceView,
    options: FilterOptions,
    fingerprint: SourceFingerprint,
}

impl ReportingSession {
    /// Load the source files and build the base view.
    pub fn open(config: &AppConfig) -> DashboardResult<Self> {
        let fingerprint = SourceFingerprint::capture(&config.data_dir, &config.files);
        let store = DataStore::load(&config.data_dir, &config.files)?;
        let view = PerformanceView::build(&store);
        let options = FilterOptions::from_store(&store);

        Ok(Self {
            data_dir: config.data_dir.clone(),
            files: config.files.clone(),
            settings: config.report.clone(),
            store,
            view,
            options,
            fingerprint,
        })
    }

    /// Reload only when a source file changed since the last load. Returns
    /// whether a reload happened. On error the previous data stays in place.
    pub fn refresh(&mut self) -> DashboardResult<bool> {
        let current = SourceFingerprint::capture(&self.data_dir, &self.files);
        if current == self.fingerprint {
            return Ok(false);
        }

        let store = DataStore::load(&self.data_dir, &self.files)?;
        self.view = PerformanceView::build(&store);
        self.options = FilterOptions::from_store(&store);
        self.store = store;
        self.fingerprint = current;

        metrics::counter!("dashboard.session.reloads").increment(1);
        info!(records = self.view.len(), "Source files changed, performance view rebuilt");
        Ok(true)
    }

    /// Filter a copy of the base view and compute the dashboard aggregates.
    pub fn render(&self, selection: &FilterSelection) -> DashboardReport {
        let filtered = apply_filters(&self.view, &self.store.tracking, selection);
        metrics::counter!("dashboard.renders").increment(1);
        metrics::gauge!("dashboard.filtered_rows").set(filtered.len() as f64);
        info!(
            campaign = %selection.campaign,
            platform = %selection.platform,
            category = %selection.category,
            active_filters = selection.active_filters(),
            rows = filtered.len(),
            "Rendering dashboard"
        );
        DashboardReport::build(filtered, selection.clone(), &self.settings)
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    pub fn view(&self) -> &PerformanceView {
        &self.view
    }
}

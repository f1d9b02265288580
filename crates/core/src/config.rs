use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Root dashboard configuration. Loaded from an optional TOML file and
/// environment variables with the prefix `INFLUENCER_DASHBOARD__`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default)]
    pub files: DataFiles,
    #[serde(default)]
    pub report: ReportSettings,
}

/// Names of the four source files, relative to `data_dir`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct DataFiles {
    #[serde(default = "default_influencers_file")]
    pub influencers: String,
    #[serde(default = "default_posts_file")]
    pub posts: String,
    #[serde(default = "default_tracking_file")]
    pub tracking: String,
    #[serde(default = "default_payouts_file")]
    pub payouts: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ReportSettings {
    /// Row limit of the ranked ROAS table.
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

// Default functions
fn default_data_dir() -> PathBuf {
    PathBuf::from(".")
}
fn default_influencers_file() -> String {
    "influencers.csv".to_string()
}
fn default_posts_file() -> String {
    "posts.csv".to_string()
}
fn default_tracking_file() -> String {
    "tracking_data.csv".to_string()
}
fn default_payouts_file() -> String {
    "payouts.csv".to_string()
}
fn default_top_n() -> usize {
    10
}
fn default_currency_symbol() -> String {
    "₹".to_string()
}

impl Default for DataFiles {
    fn default() -> Self {
        Self {
            influencers: default_influencers_file(),
            posts: default_posts_file(),
            tracking: default_tracking_file(),
            payouts: default_payouts_file(),
        }
    }
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            files: DataFiles::default(),
            report: ReportSettings::default(),
        }
    }
}

impl DataFiles {
    /// Full paths in load order: influencers, posts, tracking, payouts.
    pub fn paths(&self, dir: &Path) -> [PathBuf; 4] {
        [
            dir.join(&self.influencers),
            dir.join(&self.posts),
            dir.join(&self.tracking),
            dir.join(&self.payouts),
        ]
    }
}

impl AppConfig {
    /// Load configuration from an optional config file, then environment
    /// variables. Environment values win over the file.
    pub fn load(file: Option<&Path>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path).required(true));
        } else {
            builder = builder.add_source(config::File::with_name("dashboard").required(false));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix("INFLUENCER_DASHBOARD")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        config.try_deserialize()
    }
}

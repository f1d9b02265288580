//! Influencer Dashboard — campaign ROI reporting over influencer, post,
//! tracking, and payout CSV files.

mod render;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use influencer_core::AppConfig;
use influencer_reporting::{ExportFormat, FilterSelection, ReportingSession, Selector};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "influencer-dashboard")]
#[command(about = "Track and visualize the ROI of influencer marketing campaigns")]
#[command(version)]
struct Cli {
    /// Config file (TOML). Defaults to ./dashboard.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the source CSV files (overrides config)
    #[arg(long, global = true, env = "INFLUENCER_DASHBOARD__DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the dashboard for a filter selection (default)
    Report {
        #[command(flatten)]
        filters: FilterArgs,

        /// Rows in the top-ROAS table (overrides config)
        #[arg(long)]
        top_n: Option<usize>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// List the values offered by each selector
    Options,

    /// Write the filtered record set to a file
    Export {
        #[command(flatten)]
        filters: FilterArgs,

        #[arg(long)]
        output: PathBuf,

        /// csv or json
        #[arg(long, default_value = "csv")]
        format: ExportFormat,
    },

    /// Re-render whenever the source files change
    Watch {
        #[command(flatten)]
        filters: FilterArgs,

        #[arg(long, default_value_t = 5)]
        interval_secs: u64,
    },
}

#[derive(Args, Debug, Clone, Default)]
struct FilterArgs {
    /// Campaign/brand, or "All"
    #[arg(long)]
    campaign: Option<String>,

    /// Platform, or "All"
    #[arg(long)]
    platform: Option<String>,

    /// Influencer category, or "All"
    #[arg(long)]
    category: Option<String>,
}

impl FilterArgs {
    fn selection(&self) -> FilterSelection {
        FilterSelection {
            campaign: Selector::from(self.campaign.clone()),
            platform: Selector::from(self.platform.clone()),
            category: Selector::from(self.category.clone()),
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    Text,
    Json,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Table,
    Json,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    let mut config = match cli.config.as_deref() {
        Some(path) => AppConfig::load(Some(path))
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => AppConfig::load(None).unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load config, using defaults");
            AppConfig::default()
        }),
    };
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }

    let command = cli.command.unwrap_or(Command::Report {
        filters: FilterArgs::default(),
        top_n: None,
        format: OutputFormat::Table,
    });
    if let Command::Report {
        top_n: Some(top_n), ..
    } = &command
    {
        config.report.top_n = *top_n;
    }

    info!(
        data_dir = %config.data_dir.display(),
        top_n = config.report.top_n,
        "Configuration loaded"
    );

    let session = ReportingSession::open(&config)
        .with_context(|| format!("failed to load data from {}", config.data_dir.display()))?;

    match command {
        Command::Report {
            filters, format, ..
        } => {
            let report = session.render(&filters.selection());
            match format {
                OutputFormat::Table => {
                    print!("{}", render::render_report(&report, &config.report.currency_symbol))
                }
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            }
        }
        Command::Options => print!("{}", render::render_options(session.options())),
        Command::Export {
            filters,
            output,
            format,
        } => {
            let report = session.render(&filters.selection());
            let body = influencer_reporting::export::export(&report.records, format)?;
            std::fs::write(&output, body)
                .with_context(|| format!("failed to write {}", output.display()))?;
            info!(
                path = %output.display(),
                rows = report.records.len(),
                "Filtered records exported"
            );
        }
        Command::Watch {
            filters,
            interval_secs,
        } => watch(session, filters.selection(), interval_secs, &config).await?,
    }

    Ok(())
}

async fn watch(
    mut session: ReportingSession,
    selection: FilterSelection,
    interval_secs: u64,
    config: &AppConfig,
) -> anyhow::Result<()> {
    let symbol = &config.report.currency_symbol;
    print!("{}", render::render_report(&session.render(&selection), symbol));

    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs.max(1)));
    interval.tick().await;
    info!(interval_secs, "Watching source files for changes");

    loop {
        tokio::select! {
            _ = interval.tick() => {
                match session.refresh() {
                    Ok(true) => {
                        let report = session.render(&selection);
                        print!("{}", render::render_report(&report, symbol));
                    }
                    Ok(false) => {}
                    Err(e) => warn!(error = %e, "Reload failed, keeping previous data"),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Stopping watch");
                break;
            }
        }
    }
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "influencer_dashboard=info,influencer_reporting=info,influencer_core=info".into()
    });
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}

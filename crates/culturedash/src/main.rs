use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Args, Parser, Subcommand, ValueEnum};
use culturedash_core::export::export_parquet;
use culturedash_core::{Dashboard, DashboardConfig, Dataset, Snapshot};
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod render;

use render::View;

#[derive(Parser, Debug)]
#[command(author, version, about = "Culture funding, tourism, heritage and training dashboard", long_about = None)]
struct Cli {
    /// Dashboard configuration; built-in defaults apply when the file is absent
    #[arg(long, global = true, default_value = "culturedash.toml")]
    config: PathBuf,

    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Json)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogFormat {
    Json,
    Text,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render dashboard views in the terminal
    Show(ShowArgs),
    /// Print the derived metrics of every view as JSON
    Metrics,
    /// Write the normalized datasets as Parquet files
    Export(ExportArgs),
    /// Load and normalize every dataset and report what was found
    Check,
}

#[derive(Args, Debug)]
struct ShowArgs {
    #[arg(long, value_enum, default_value_t = View::All)]
    view: View,
}

#[derive(Args, Debug)]
struct ExportArgs {
    /// Output directory, created if missing
    #[arg(short, long)]
    out: PathBuf,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    let config = DashboardConfig::load_or_default(&cli.config)
        .with_context(|| format!("failed to load config {}", cli.config.display()))?;

    match cli.command {
        Command::Show(args) => {
            let dashboard = load_dashboard(&config)?;
            let mut out = String::new();
            render::write_views(&mut out, &dashboard, args.view)?;
            print!("{out}");
        }
        Command::Metrics => {
            let dashboard = load_dashboard(&config)?;
            let mut report = dashboard.metrics_json();
            report["generatedAt"] = json!(Utc::now().to_rfc3339());
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Export(args) => {
            let snapshot = load_snapshot(&config)?;
            let written = export_parquet(&snapshot, &args.out)
                .with_context(|| format!("failed to export into {}", args.out.display()))?;
            for path in written {
                println!("{}", path.display());
            }
        }
        Command::Check => {
            let dashboard = load_dashboard(&config)?;
            let mut out = String::new();
            render::write_check(&mut out, &config, &dashboard)?;
            print!("{out}");

            let failures = dashboard.failures();
            if !failures.is_empty() {
                let views: Vec<&str> = failures.iter().map(|(view, _)| *view).collect();
                bail!("metrics unavailable for: {}", views.join(", "));
            }
        }
    }

    Ok(())
}

fn init_tracing(format: LogFormat) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}

fn load_snapshot(config: &DashboardConfig) -> Result<Snapshot> {
    let snapshot = Snapshot::load(config).context("failed to load datasets")?;
    for dataset in Dataset::ALL {
        info!(%dataset, rows = snapshot.dataset_len(dataset), "dataset ready");
    }
    Ok(snapshot)
}

fn load_dashboard(config: &DashboardConfig) -> Result<Dashboard> {
    Ok(Dashboard::build(load_snapshot(config)?))
}

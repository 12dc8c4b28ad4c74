use std::{path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use kline_cruncher::{config, run_batch};
use partition_store::{PartitionKey, PartitionStore, partition::parse_date};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "Kline indicator batch")]
struct Cli {
    /// Batch config (TOML). Defaults apply when omitted.
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,
    /// Batch date; today (local time) when omitted.
    #[arg(long, value_name = "MM-DD-YYYY", global = true)]
    date: Option<String>,
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Compute indicators for every configured symbol × timeframe.
    Run,
    /// Create (if needed) and print a partition directory.
    Resolve {
        #[arg(long)]
        category: String,
        #[arg(long, default_value = "Date")]
        mode: String,
        #[arg(long)]
        symbol: Option<String>,
        #[arg(long)]
        timeframe: Option<String>,
    },
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let cfg = match &cli.config {
        Some(path) => config::load_config_path(path)?,
        None => config::default_config(),
    };
    let date = match &cli.date {
        Some(s) => parse_date(s).context("--date")?,
        None => Local::now().date_naive(),
    };
    let store = PartitionStore::new(&cfg.storage_root);

    match cli.cmd {
        Cmd::Run => {
            info!(
                root = %store.root().display(),
                units = cfg.symbols.len() * cfg.timeframes.len(),
                "batch starting"
            );
            let report = run_batch(&store, &cfg, date);
            for err in &report.failed {
                error!(unit = %err.unit, error = %err.source, "unit failed");
            }
            if !report.is_success() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Cmd::Resolve {
            category,
            mode,
            symbol,
            timeframe,
        } => {
            let key = PartitionKey::parse(
                &category,
                &mode,
                Some(date),
                symbol.as_deref(),
                timeframe.as_deref(),
            )?;
            let dir = store.resolve_partition(&key)?;
            println!("{}", dir.display());
        }
    }

    Ok(ExitCode::SUCCESS)
}

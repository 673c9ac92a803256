use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod app;
mod commands;
mod config;
mod events;
mod render;

use crate::config::load_settings;

/// Page through the artwork catalog and build a cross-page selection.
#[derive(Parser, Debug)]
struct Args {
    /// Configuration file (defaults to ./browser.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    endpoint: Option<String>,
    #[arg(long)]
    total_records: Option<usize>,
    /// 1-based page to open first.
    #[arg(long, default_value_t = 1)]
    start_page: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(endpoint) = args.endpoint {
        settings.endpoint = endpoint;
    }
    if let Some(total_records) = args.total_records {
        settings.total_records = total_records;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if args.start_page == 0 {
        bail!("--start-page is 1-based");
    }

    app::run(&settings, args.start_page - 1).await
}

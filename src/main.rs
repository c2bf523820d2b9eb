use anyhow::{Context, Result};
use clap::Parser;
use paddock::{DatasetLoader, LoaderConfig};
use std::{env, io::Write};
use tokio::time::Instant;
use tracing::{info, Level};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(author, version, about = "Load the F1 standings dataset and report what was read")]
struct Args {
    /// HTTP(S) origin or directory holding the data directory
    #[arg(short, long)]
    base: Option<String>,
    /// Data directory under the base
    #[arg(long)]
    data_dir: Option<String>,
    /// Print the whole dataset as JSON instead of a summary
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(log_level.parse().unwrap_or(Level::INFO.into())),
        )
        .with_writer(std::io::stderr)
        .init();

    // ─── 2) resolve config ───────────────────────────────────────────
    let args = Args::parse();
    // PADDOCK_BASE / PADDOCK_DATA_DIR, then flags on top
    let mut config = LoaderConfig::from_env();
    if let Some(base) = args.base {
        config.base = base;
    }
    if let Some(dir) = args.data_dir {
        config.data_dir = dir;
    }
    info!(base = %config.base, data_dir = %config.data_dir, "startup");

    // ─── 3) load ─────────────────────────────────────────────────────
    let start = Instant::now();
    let dataset = DatasetLoader::new(config.clone())
        .load()
        .await
        .with_context(|| format!("loading dataset from {}", config.base))?;
    info!(elapsed = ?start.elapsed(), "loaded");

    // ─── 4) report ───────────────────────────────────────────────────
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if args.json {
        serde_json::to_writer_pretty(&mut out, &dataset)?;
        writeln!(out)?;
        return Ok(());
    }

    for (resource, rows) in dataset.counts() {
        writeln!(out, "{:<28} {:>6} rows", resource, rows)?;
    }
    writeln!(out, "{:<28} {:>6} keys", "race key map", dataset.race_key_map.len())?;

    let unresolved = dataset.unresolved();
    if unresolved > 0 {
        writeln!(out, "{} standings reference unknown ids", unresolved)?;
    }
    Ok(())
}

//! Job Board Server
//!
//! Serves the job finder, saved-jobs list and application form over a
//! small REST API using Axum. Jobs come from the remote feed via `ingest`;
//! saved jobs live in memory for the lifetime of the process.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use ingest::JobClient;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;

mod config;
mod listing;
mod routes;

use crate::config::BoardConfig;
use crate::routes::AppState;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML config file (defaults to ./jobboard.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    log_file_path: Option<String>,
}

/// Installs the global subscriber. The returned guard must stay alive for
/// file logging to flush.
fn init_tracing(log_file_path: Option<&str>) -> Option<WorkerGuard> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let Some(log_path) = log_file_path else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
        return None;
    };

    let log_path = Path::new(log_path);
    let file_appender = tracing_appender::rolling::never(
        log_path.parent().unwrap_or(Path::new(".")),
        log_path
            .file_name()
            .unwrap_or(std::ffi::OsStr::new("jobboard.log")),
    );
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(true)
                .with_writer(std::io::stdout),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking),
        )
        .init();

    Some(guard)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let _log_guard = init_tracing(args.log_file_path.as_deref());

    info!("🚀 Starting Job Board Server...");

    let config = BoardConfig::load(args.config.as_deref())?;
    let state = Arc::new(AppState::new(JobClient::new(
        config.source.endpoint.clone(),
    )));

    // Warm the finder listing; the first request retries if this fails.
    match state.listing.refresh().await {
        Ok(jobs) => info!("📊 Loaded {} jobs", jobs.len()),
        Err(err) => warn!(error = %err, "⚠️  Initial job fetch failed"),
    }

    let app = routes::router(state);

    let addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("🌐 Server running at http://{}", addr);
    info!("   Try: curl 'http://{}/jobs?q=developer'", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

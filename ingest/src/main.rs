//! Job feed fetcher
//!
//! Downloads the job feed, normalizes it and prints the records as JSON.

use clap::Parser;
use common::filter_jobs;
use ingest::{JobClient, DEFAULT_ENDPOINT};
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Job feed URL
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Only print jobs matching this search term
    #[arg(long, short)]
    query: Option<String>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let client = JobClient::new(args.endpoint);
    let jobs = client.fetch_jobs().await?;

    let selected = filter_jobs(&jobs, args.query.as_deref().unwrap_or_default());
    info!(total = jobs.len(), matching = selected.len(), "📊 Jobs ready");

    let output = if args.pretty {
        serde_json::to_string_pretty(&selected)?
    } else {
        serde_json::to_string(&selected)?
    };
    println!("{output}");

    Ok(())
}

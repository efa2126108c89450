// ABOUTME: CLI for running the Gleaner fetch engine against a source description.
// ABOUTME: Loads a JSON config from file or stdin, runs the engine, and prints JSON results.

use std::fs;
use std::io::{self, Read};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use gleaner_fetch::{Config, Fetcher};

/// Fetch configured HTML/RSS sources and output the resolved results as JSON.
#[derive(Parser, Debug)]
#[command(name = "gleaner-cli")]
#[command(about = "Run declarative HTML/RSS fetch jobs and print JSON", long_about = None)]
struct Args {
    /// Path to a JSON source description. Use "-" to read from stdin.
    config: String,

    /// Output compact JSON instead of pretty.
    #[arg(long, default_value_t = false)]
    compact: bool,

    /// Per-request timeout in seconds.
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Concurrent fetches per batch.
    #[arg(long)]
    concurrency: Option<usize>,

    /// Maximum follow depth (unbounded when omitted).
    #[arg(long)]
    max_depth: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();

    let bytes = load_bytes(&args.config)?;
    let config: Config =
        serde_json::from_slice(&bytes).context("failed to parse source description")?;

    let mut builder = Fetcher::builder();
    if let Some(secs) = args.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    if let Some(concurrency) = args.concurrency {
        builder = builder.concurrency(concurrency);
    }
    if args.max_depth.is_some() {
        builder = builder.max_depth(args.max_depth);
    }
    let fetcher = builder.build();

    let results = fetcher.run(&config).await;

    if args.compact {
        println!("{}", serde_json::to_string(&results)?);
    } else {
        println!("{}", serde_json::to_string_pretty(&results)?);
    }

    Ok(())
}

fn load_bytes(target: &str) -> Result<Vec<u8>> {
    if target == "-" {
        let mut buf = Vec::new();
        io::stdin().read_to_end(&mut buf)?;
        return Ok(buf);
    }
    fs::read(target).with_context(|| format!("failed to read {}", target))
}

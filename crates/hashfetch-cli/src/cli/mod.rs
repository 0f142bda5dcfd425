//! CLI for hashfetch.

mod output;

use anyhow::Result;
use clap::Parser;
use hashfetch_core::config;
use hashfetch_core::dispatch::{self, DEFAULT_PARALLELISM};
use hashfetch_core::fetch::FetchClient;
use std::io;
use std::sync::Arc;

use output::{write_result, RunSummary};

/// Fetch addresses in parallel and print an MD5 fingerprint of each response body.
#[derive(Debug, Parser)]
#[command(name = "hashfetch")]
#[command(about = "Fetch addresses in parallel and print an MD5 fingerprint of each response body", long_about = None)]
pub struct Cli {
    /// Parallel requests count [default: 10, or `parallel` from config.toml]. Values <= 0 use the default.
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub parallel: Option<i64>,

    /// Addresses to fetch. `http://` is assumed when no scheme is given.
    #[arg(value_name = "ADDRESS")]
    pub addresses: Vec<String>,
}

impl Cli {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_default()?;
        tracing::debug!("loaded config: {:?}", cfg);

        let requested = cli.parallel.unwrap_or(cfg.parallel);
        if requested <= 0 {
            tracing::debug!(
                requested,
                "non-positive parallel count, using {}",
                DEFAULT_PARALLELISM
            );
        }

        let client = Arc::new(FetchClient::new(cfg.client_options()));
        let mut handle = dispatch::dispatch(client, cli.addresses, requested);

        let mut summary = RunSummary::default();
        while let Some(res) = handle.recv().await {
            summary.record(&res);
            write_result(&mut io::stdout().lock(), &res)?;
        }

        tracing::info!(
            ok = summary.ok,
            failed = summary.failed,
            peak_in_flight = handle.peak_in_flight(),
            "batch finished"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests;

use hashfetch_core::logging;

mod cli;

use crate::cli::Cli;

#[tokio::main]
async fn main() {
    // Initialize logging as early as possible; stderr if the state dir is unusable.
    if let Err(err) = logging::init_logging() {
        logging::init_logging_stderr();
        tracing::warn!("file logging unavailable: {:#}", err);
    }

    // Per-address failures are printed, not fatal: only setup errors exit non-zero.
    if let Err(err) = Cli::run_from_args().await {
        eprintln!("hashfetch error: {:#}", err);
        std::process::exit(1);
    }
}

//! Bounded concurrent dispatch of fetch-and-hash tasks.
//!
//! One task per address, admitted through a fixed-size permit pool. Each
//! task normalizes its address, fetches it on the blocking pool, hashes the
//! body and writes one [`FetchResult`] to the shared output channel. Every
//! sender is dropped only after its owner has updated the counters, so the
//! channel closes after the last result is written and counted.

mod handle;
mod result;
mod state;

pub use handle::DispatchHandle;
pub use result::FetchResult;
pub use state::DispatchState;

use std::sync::Arc;
use tokio::sync::{mpsc, OwnedSemaphorePermit, Semaphore};

use crate::address::normalize_address;
use crate::fetch::{FetchClient, FetchError};
use crate::fingerprint::Fingerprint;
use state::DispatchStats;

/// Parallelism used when the requested bound is zero or negative.
pub const DEFAULT_PARALLELISM: usize = 10;

/// A finished task waits here until the consumer reads its result; its
/// permit is already released at that point.
const RESULT_CHANNEL_CAPACITY: usize = 1;

/// Maps a requested bound to the one actually used: anything `<= 0` becomes
/// [`DEFAULT_PARALLELISM`].
pub fn effective_parallelism(requested: i64) -> usize {
    match usize::try_from(requested) {
        Ok(n) if n > 0 => n,
        _ => DEFAULT_PARALLELISM,
    }
}

/// Starts fetching `addresses` with at most `parallel` requests in flight
/// and returns the result stream immediately.
///
/// Must be called from within a tokio runtime.
pub fn dispatch(client: Arc<FetchClient>, addresses: Vec<String>, parallel: i64) -> DispatchHandle {
    let total = addresses.len();
    let (tx, rx) = mpsc::channel(RESULT_CHANNEL_CAPACITY);
    let stats = Arc::new(DispatchStats::new(total));
    stats.start();

    if total == 0 {
        drop(tx);
        stats.admission_done();
        return DispatchHandle::new(rx, stats);
    }

    let permits = effective_parallelism(parallel).min(total);
    tracing::info!(total, permits, "dispatching fetches");
    tokio::spawn(admit(client, addresses, permits, tx, Arc::clone(&stats)));
    DispatchHandle::new(rx, stats)
}

/// Admission loop: one permit per task, waiting whenever the pool is empty.
async fn admit(
    client: Arc<FetchClient>,
    addresses: Vec<String>,
    permits: usize,
    tx: mpsc::Sender<FetchResult>,
    stats: Arc<DispatchStats>,
) {
    let pool = Arc::new(Semaphore::new(permits));
    for address in addresses {
        let permit = match Arc::clone(&pool).acquire_owned().await {
            Ok(p) => p,
            Err(e) => {
                // The pool is never closed; reaching this is a dispatcher bug.
                tracing::error!("permit pool closed during admission: {}", e);
                break;
            }
        };
        stats.task_launched();
        tokio::spawn(run_task(
            Arc::clone(&client),
            address,
            permit,
            tx.clone(),
            Arc::clone(&stats),
        ));
    }
    stats.admission_done();
    drop(tx);
}

async fn run_task(
    client: Arc<FetchClient>,
    address: String,
    permit: OwnedSemaphorePermit,
    tx: mpsc::Sender<FetchResult>,
    stats: Arc<DispatchStats>,
) {
    let address = normalize_address(&address);
    let outcome = fetch_and_hash(client, address.clone()).await;
    stats.fetch_finished();
    drop(permit);

    match &outcome {
        Ok(fp) => tracing::debug!(address = %address, fingerprint = %fp, "task done"),
        Err(e) => tracing::warn!("{}", e),
    }

    // A dropped handle means nobody is listening; the result is discarded.
    let _ = tx.send(FetchResult { address, outcome }).await;
    stats.task_completed();
    drop(tx);
}

async fn fetch_and_hash(client: Arc<FetchClient>, address: String) -> Result<Fingerprint, FetchError> {
    let worker_address = address.clone();
    let joined = tokio::task::spawn_blocking(move || {
        client
            .fetch(&worker_address)
            .map(|body| Fingerprint::of(&body))
    })
    .await;
    match joined {
        Ok(outcome) => outcome,
        Err(e) => Err(FetchError::Worker {
            address,
            message: e.to_string(),
        }),
    }
}

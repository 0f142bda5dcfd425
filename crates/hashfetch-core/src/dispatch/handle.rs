//! Consumer side of a dispatch.

use std::sync::Arc;
use tokio::sync::mpsc;

use super::result::FetchResult;
use super::state::{DispatchState, DispatchStats};

/// Receives results in completion order. The stream ends after exactly one
/// result per submitted address.
#[derive(Debug)]
pub struct DispatchHandle {
    rx: mpsc::Receiver<FetchResult>,
    stats: Arc<DispatchStats>,
}

impl DispatchHandle {
    pub(super) fn new(rx: mpsc::Receiver<FetchResult>, stats: Arc<DispatchStats>) -> Self {
        Self { rx, stats }
    }

    /// Next finished result, or `None` once every address has been reported.
    ///
    /// # Panics
    ///
    /// Panics if the stream closes before every address has a result, which
    /// only happens if the dispatcher itself is broken (e.g. its permit pool
    /// was closed).
    pub async fn recv(&mut self) -> Option<FetchResult> {
        let next = self.rx.recv().await;
        if next.is_none() {
            let completed = self.stats.completed();
            assert_eq!(
                completed,
                self.stats.total(),
                "result stream closed after {} of {} results",
                completed,
                self.stats.total()
            );
        }
        next
    }

    /// Drains the stream, preserving completion order.
    ///
    /// # Panics
    ///
    /// Same condition as [`DispatchHandle::recv`].
    pub async fn collect(mut self) -> Vec<FetchResult> {
        let mut out = Vec::with_capacity(self.stats.total());
        while let Some(res) = self.recv().await {
            out.push(res);
        }
        out
    }

    /// Number of addresses submitted.
    pub fn total(&self) -> usize {
        self.stats.total()
    }

    pub fn state(&self) -> DispatchState {
        self.stats.state()
    }

    pub fn launched(&self) -> usize {
        self.stats.launched()
    }

    pub fn completed(&self) -> usize {
        self.stats.completed()
    }

    /// Highest number of fetches that were in flight at the same time.
    pub fn peak_in_flight(&self) -> usize {
        self.stats.peak_in_flight()
    }
}

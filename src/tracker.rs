//! Poll loop controller
//!
//! ```text
//! STARTING -> POLLING <-> WAITING -> STOPPED
//! ```
//!
//! Each cycle fetches every identifier, compares against the previous
//! successful cycle, renders the table and appends a CSV row. A failed cycle
//! is reported and retried after the same interval as a normal one, forever.
//! The shutdown future passed to [`Tracker::run`] stops the loop at any await
//! point (fetch or sleep).

use crate::{
    config::TrackerConfig,
    delta::compare,
    error::{CycleError, ProviderError},
    history::HistoryLog,
    presenter::Presenter,
    provider::PriceProvider,
    store::PriceMemory,
    types::Snapshot,
};
use chrono::Local;
use std::future::Future;
use std::sync::Arc;
use tokio::time::{sleep, timeout};

/// Why [`Tracker::run`] returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Run-once mode finished its successful cycle
    Completed,
    /// The shutdown signal fired
    Interrupted,
}

/// Drives fetch, compare, render and log on a fixed interval
pub struct Tracker {
    provider: Arc<dyn PriceProvider>,
    presenter: Presenter,
    history: HistoryLog,
    ids: Vec<String>,
    config: TrackerConfig,
}

impl Tracker {
    pub fn new(
        provider: Arc<dyn PriceProvider>,
        presenter: Presenter,
        history: HistoryLog,
        ids: Vec<String>,
        config: TrackerConfig,
    ) -> Self {
        Self {
            provider,
            presenter,
            history,
            ids,
            config,
        }
    }

    /// Runs until run-once completes or `shutdown` resolves
    pub async fn run<F>(mut self, shutdown: F) -> StopReason
    where
        F: Future<Output = ()>,
    {
        tracing::info!(
            provider = self.provider.provider_name(),
            coins = self.ids.len(),
            interval_secs = self.config.interval.as_secs(),
            run_once = self.config.run_once,
            "Starting price tracker"
        );

        let reason = tokio::select! {
            _ = self.poll_loop() => StopReason::Completed,
            _ = shutdown => StopReason::Interrupted,
        };

        if reason == StopReason::Interrupted {
            if let Err(e) = self.presenter.farewell() {
                tracing::warn!(error = %e, "Failed to write farewell");
            }
        }

        tracing::info!(reason = ?reason, "Price tracker stopped");
        reason
    }

    /// POLLING/WAITING loop; returns only in run-once mode
    async fn poll_loop(&mut self) {
        let mut memory = PriceMemory::new();

        loop {
            match self.poll_once(&memory).await {
                Ok(next) => {
                    memory = next;
                    if self.config.run_once {
                        return;
                    }
                    if let Err(e) = self.presenter.next_update(self.config.interval) {
                        tracing::warn!(error = %e, "Failed to write status line");
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        transient = e.is_transient(),
                        retry_in_secs = self.config.interval.as_secs(),
                        "Price cycle failed, retrying"
                    );
                    if let Err(e) = self.presenter.cycle_failed(&e, self.config.interval) {
                        tracing::warn!(error = %e, "Failed to report cycle failure");
                    }
                }
            }

            sleep(self.config.interval).await;
        }
    }

    /// Runs one POLLING step against `previous`
    ///
    /// On success returns the memory for the next cycle: the current snapshot
    /// with missing prices dropped. On error the caller keeps `previous`.
    pub async fn poll_once(&mut self, previous: &PriceMemory) -> Result<PriceMemory, CycleError> {
        let quotes = timeout(self.config.timeout, self.provider.fetch_prices(&self.ids))
            .await
            .map_err(|_| ProviderError::Timeout)??;

        let snapshot = Snapshot::from_quotes(&self.ids, &quotes);
        let rows = compare(&self.ids, &snapshot, previous);

        tracing::debug!(
            received = quotes.len(),
            requested = self.ids.len(),
            "Fetched snapshot"
        );

        self.presenter.render_table(&rows)?;
        self.history.append(&snapshot)?;
        self.presenter.last_updated(Local::now().naive_local())?;

        Ok(PriceMemory::remember(&snapshot))
    }
}

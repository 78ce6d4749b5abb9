//! Per-funding polling read model.
//!
//! Fixed-interval re-fetch is the only mechanism for observing writes made
//! by other clients. Each tick fully replaces the published snapshot with
//! whatever the store returns at that instant; nothing is merged or diffed.
//! The subscription surface hides the polling so a push-based change feed
//! could replace it without touching subscribers.

use log::error;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::contributions::Contribution;
use crate::errors::Result;
use crate::fundings::Funding;
use crate::storage::FundingStore;

/// Refresh interval between polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Published state of one watched funding.
#[derive(Debug, Clone, PartialEq)]
pub struct FundingSnapshot {
    pub funding: Option<Funding>,
    pub contributions: Vec<Contribution>,
    pub is_loading: bool,
}

impl FundingSnapshot {
    fn loading() -> Self {
        Self {
            funding: None,
            contributions: Vec::new(),
            is_loading: true,
        }
    }
}

/// Watches one funding id, republishing `(funding, contributions)` to
/// subscribers on a fixed interval until stopped.
pub struct FundingWatcher {
    store: Arc<dyn FundingStore>,
    funding_id: String,
    tx: watch::Sender<FundingSnapshot>,
    handle: JoinHandle<()>,
}

impl FundingWatcher {
    /// Starts watching with the default 2 second poll interval.
    pub fn spawn(store: Arc<dyn FundingStore>, funding_id: impl Into<String>) -> Self {
        Self::spawn_with_interval(store, funding_id, DEFAULT_POLL_INTERVAL)
    }

    /// Starts watching with a caller-chosen poll interval.
    ///
    /// The first fetch happens immediately; until it lands, subscribers see
    /// a loading snapshot.
    pub fn spawn_with_interval(
        store: Arc<dyn FundingStore>,
        funding_id: impl Into<String>,
        poll_interval: Duration,
    ) -> Self {
        let funding_id = funding_id.into();
        let (tx, _rx) = watch::channel(FundingSnapshot::loading());

        let task_store = store.clone();
        let task_tx = tx.clone();
        let task_id = funding_id.clone();
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(poll_interval);
            loop {
                ticker.tick().await;
                match fetch_snapshot(task_store.as_ref(), &task_id).await {
                    Ok(snapshot) => {
                        task_tx.send_replace(snapshot);
                    }
                    // Keep the previous snapshot; the next tick retries.
                    Err(e) => error!("Refresh of funding {} failed: {}", task_id, e),
                }
            }
        });

        Self {
            store,
            funding_id,
            tx,
            handle,
        }
    }

    /// Returns a receiver that observes every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<FundingSnapshot> {
        self.tx.subscribe()
    }

    /// Fetches and publishes a snapshot now, outside the poll schedule.
    pub async fn refresh(&self) -> Result<FundingSnapshot> {
        let snapshot = fetch_snapshot(self.store.as_ref(), &self.funding_id).await?;
        self.tx.send_replace(snapshot.clone());
        Ok(snapshot)
    }

    /// Stops polling. No further snapshots are published.
    pub fn stop(&self) {
        self.handle.abort();
    }
}

impl Drop for FundingWatcher {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn fetch_snapshot(store: &dyn FundingStore, funding_id: &str) -> Result<FundingSnapshot> {
    let funding = store.get_funding(funding_id).await?;
    let contributions = store.get_contributions(funding_id).await?;
    Ok(FundingSnapshot {
        funding,
        contributions,
        is_loading: false,
    })
}

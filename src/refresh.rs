//! Refresh worker: pulls the ledger, derives a snapshot, paces the UI.

use crate::engine::{PetEngine, PetSnapshot};
use crate::ledger::{LedgerError, LedgerSource};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Pause applied after each successful derivation so downstream consumers
/// see a settled snapshot rather than a flickering one.
pub const DEFAULT_REFRESH_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Error)]
pub enum RefreshError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Drives one full derivation pass: fetch transactions and clock from the
/// ledger, run the engine, then hold for the presentation delay.
///
/// The worker owns no state between passes. Every call to [`refresh`]
/// recomputes the snapshot from the ledger's current view, so a caller can
/// invoke it in a loop without accumulating drift.
///
/// [`refresh`]: SnapshotWorker::refresh
#[derive(Clone)]
pub struct SnapshotWorker {
    ledger: Arc<dyn LedgerSource>,
    engine: PetEngine,
    delay: Duration,
}

impl SnapshotWorker {
    pub fn new(ledger: Arc<dyn LedgerSource>, engine: PetEngine) -> Self {
        Self {
            ledger,
            engine,
            delay: DEFAULT_REFRESH_DELAY,
        }
    }

    /// Override the presentation delay. Tests pass `Duration::ZERO`.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub async fn refresh(&self) -> Result<PetSnapshot, RefreshError> {
        let txs = self.ledger.transactions().await?;
        let now = self.ledger.now().await?;

        let snapshot = self.engine.snapshot(&txs, now);

        tracing::info!(
            "Refreshed snapshot: stage {} from {} transactions",
            snapshot.stage,
            txs.len()
        );

        tokio::time::sleep(self.delay).await;

        Ok(snapshot)
    }
}

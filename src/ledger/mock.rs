//! Mock ledger source for testing without a wallet backend.

use async_trait::async_trait;

use super::{LedgerError, LedgerSource};
use crate::domain::{Address, Timestamp, TransactionRecord, TxId, UNITS_PER_COIN};

/// Mock ledger that returns predefined transactions and a fixed clock.
#[derive(Debug, Clone)]
pub struct MockLedger {
    txs: Vec<TransactionRecord>,
    now: Timestamp,
    outage: Option<String>,
}

impl MockLedger {
    /// Create an empty mock ledger with the clock at zero.
    pub fn new() -> Self {
        Self {
            txs: Vec::new(),
            now: Timestamp::new(0),
            outage: None,
        }
    }

    /// Set the time returned by the clock oracle.
    pub fn with_now(mut self, now: Timestamp) -> Self {
        self.now = now;
        self
    }

    /// Add a fully-formed transaction record.
    pub fn with_transaction(mut self, tx: TransactionRecord) -> Self {
        self.txs.push(tx);
        self
    }

    /// Add multiple transaction records.
    pub fn with_transactions(mut self, txs: Vec<TransactionRecord>) -> Self {
        self.txs.extend(txs);
        self
    }

    /// Add an outgoing payment of `coins` whole coins with a synthetic
    /// identifier derived from the payment fields.
    pub fn with_payment(
        self,
        counterparty: &Address,
        coins: i64,
        at: Timestamp,
        depth: u32,
    ) -> Self {
        let txid = Self::synthetic_txid(counterparty, coins, at);
        self.with_transaction(
            TransactionRecord::new(txid, at, depth, -(coins * UNITS_PER_COIN))
                .with_counterparty(counterparty.clone()),
        )
    }

    /// Make every call fail, simulating a wallet backend outage.
    pub fn with_outage(mut self, reason: impl Into<String>) -> Self {
        self.outage = Some(reason.into());
        self
    }

    /// Deterministic synthetic identifier for generated payments.
    pub fn synthetic_txid(counterparty: &Address, coins: i64, at: Timestamp) -> TxId {
        use sha2::{Digest, Sha256};

        let mut hasher = Sha256::new();
        hasher.update(counterparty.as_str());
        hasher.update(coins.to_le_bytes());
        hasher.update(at.as_i64().to_le_bytes());
        let hash = hasher.finalize();
        TxId::new(hex::encode(&hash[..16]))
    }
}

impl Default for MockLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LedgerSource for MockLedger {
    async fn transactions(&self) -> Result<Vec<TransactionRecord>, LedgerError> {
        match &self.outage {
            Some(reason) => Err(LedgerError::Unavailable(reason.clone())),
            None => Ok(self.txs.clone()),
        }
    }

    async fn now(&self) -> Result<Timestamp, LedgerError> {
        match &self.outage {
            Some(reason) => Err(LedgerError::Unavailable(reason.clone())),
            None => Ok(self.now),
        }
    }
}

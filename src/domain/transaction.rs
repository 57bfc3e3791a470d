//! Ledger transaction record as supplied by the wallet backend.

use crate::domain::{Address, Timestamp, TxId};
use serde::{Deserialize, Serialize};

/// Semantic purpose of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TxPurpose {
    /// Ordinary value transfer.
    Payment,
    /// Replacement raising the fee of an earlier transaction. Carries no
    /// value of its own and is excluded from all valuation.
    FeeBump,
}

/// A single wallet transaction as observed on the ledger.
///
/// The record is read-only input. `value` is the net effect on the wallet in
/// base units, negative for outgoing transfers and inclusive of any fee the
/// wallet paid; `fee` is that fee's positive magnitude when known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Stable opaque identifier.
    pub txid: TxId,
    /// Last update time of the transaction.
    pub time: Timestamp,
    /// Confirmation depth in blocks; 0 = unconfirmed.
    pub depth: u32,
    /// Signed net value relative to the wallet, in base units.
    pub value: i64,
    /// Fee paid by the wallet, in base units, when known.
    pub fee: Option<i64>,
    /// Semantic purpose flag.
    pub purpose: TxPurpose,
    /// Resolved counterparty: the destination for outgoing transfers, the
    /// wallet's own receiving address for incoming ones. Absent when the
    /// backend could not resolve one.
    pub counterparty: Option<Address>,
    /// Address-book label for the counterparty, when one exists.
    pub counterparty_label: Option<String>,
    /// True when every input and output belongs to this wallet.
    pub self_transfer: bool,
}

impl TransactionRecord {
    /// Create a plain payment record with no fee and no counterparty.
    pub fn new(txid: TxId, time: Timestamp, depth: u32, value: i64) -> Self {
        TransactionRecord {
            txid,
            time,
            depth,
            value,
            fee: None,
            purpose: TxPurpose::Payment,
            counterparty: None,
            counterparty_label: None,
            self_transfer: false,
        }
    }

    /// Set the fee magnitude.
    pub fn with_fee(mut self, fee: i64) -> Self {
        self.fee = Some(fee);
        self
    }

    /// Set the resolved counterparty address.
    pub fn with_counterparty(mut self, address: Address) -> Self {
        self.counterparty = Some(address);
        self
    }

    /// Set the counterparty's address-book label.
    pub fn with_counterparty_label(mut self, label: impl Into<String>) -> Self {
        self.counterparty_label = Some(label.into());
        self
    }

    /// Set the semantic purpose.
    pub fn with_purpose(mut self, purpose: TxPurpose) -> Self {
        self.purpose = purpose;
        self
    }

    /// Mark the transaction as entirely wallet-internal.
    pub fn with_self_transfer(mut self) -> Self {
        self.self_transfer = true;
        self
    }

    /// True when this record must be excluded from valuation.
    pub fn is_fee_bump(&self) -> bool {
        self.purpose == TxPurpose::FeeBump
    }
}

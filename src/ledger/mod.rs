//! Ledger source abstraction supplying transactions and the time oracle.

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

use crate::domain::{Timestamp, TransactionRecord};

pub mod mock;

pub use mock::MockLedger;

/// Source of the wallet's transaction history.
///
/// Implementations wrap the wallet backend; the derivation engine consumes
/// whatever ordering the source supplies, and the first-match lifecycle
/// rule depends on that ordering being stable between calls.
#[async_trait]
pub trait LedgerSource: Send + Sync + fmt::Debug {
    /// The wallet's ordered, finite transaction sequence.
    async fn transactions(&self) -> Result<Vec<TransactionRecord>, LedgerError>;

    /// Current time as the ledger sees it.
    async fn now(&self) -> Result<Timestamp, LedgerError>;
}

/// Error type for ledger source operations.
#[derive(Debug, Clone, Error)]
pub enum LedgerError {
    /// The backing wallet service cannot be reached.
    #[error("ledger backend unavailable: {0}")]
    Unavailable(String),
    /// The backend returned a record the source could not interpret.
    #[error("malformed ledger record: {0}")]
    Malformed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ledger_error_display() {
        let err = LedgerError::Unavailable("wallet locked".to_string());
        assert_eq!(err.to_string(), "ledger backend unavailable: wallet locked");

        let err = LedgerError::Malformed("negative depth".to_string());
        assert_eq!(err.to_string(), "malformed ledger record: negative depth");
    }
}

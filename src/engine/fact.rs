//! Per-pass memoization of normalized transaction facts.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::{Address, Direction, TransactionRecord, TxId, UNITS_PER_COIN};

/// Normalized facts derived once per transaction identifier.
///
/// Confirmation depth and update time are deliberately absent: both are
/// mutable external facts and are read from the record at each use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionFact {
    /// Fee-adjusted net magnitude in base units.
    pub magnitude: i64,
    /// Direction relative to the wallet.
    pub direction: Direction,
    /// True when every input and output belongs to the wallet.
    pub self_transfer: bool,
    /// True when the transaction is outgoing with a non-zero fee.
    pub fee_visible: bool,
    /// Counterparty address; `None` reads as unknown downstream.
    pub counterparty: Option<Address>,
    /// Address-book label for the counterparty.
    pub counterparty_label: Option<String>,
}

impl TransactionFact {
    fn derive(tx: &TransactionRecord) -> Self {
        // An outgoing record's raw value includes the fee it paid; adding
        // the positive fee magnitude back yields the transfer amount the
        // exact-match constants are denominated in.
        let adjusted = match tx.fee {
            Some(fee) => tx.value + fee,
            None => tx.value,
        };
        let direction = Direction::from_net_value(adjusted);
        let fee_visible = direction.is_outgoing() && tx.fee.map(|fee| fee != 0).unwrap_or(false);
        TransactionFact {
            magnitude: adjusted.saturating_abs(),
            direction,
            self_transfer: tx.self_transfer,
            fee_visible,
            counterparty: tx.counterparty.clone(),
            counterparty_label: tx.counterparty_label.clone(),
        }
    }

    /// The amount the address/amount constants match against: whole coins
    /// for outgoing transfers, raw base units for incoming ones.
    pub fn hit_amount(&self) -> i64 {
        match self.direction {
            Direction::Outgoing => self.magnitude / UNITS_PER_COIN,
            Direction::Incoming => self.magnitude,
        }
    }
}

/// Fact cache owned by a single snapshot pass.
///
/// Facts are computed at most once per identifier and are immutable for the
/// rest of the pass. A pass must build a fresh cache: depth changes between
/// passes, and stale facts from an earlier pass must never leak forward.
#[derive(Debug, Default)]
pub struct FactPass {
    facts: HashMap<TxId, TransactionFact>,
}

impl FactPass {
    /// Create an empty cache for one pass.
    pub fn new() -> Self {
        FactPass {
            facts: HashMap::new(),
        }
    }

    /// The fact for a transaction, deriving and caching it on first sight.
    ///
    /// Fee-bump records carry no value of their own and yield no fact.
    pub fn fact_for(&mut self, tx: &TransactionRecord) -> Option<&TransactionFact> {
        if tx.is_fee_bump() {
            return None;
        }
        Some(
            self.facts
                .entry(tx.txid.clone())
                .or_insert_with(|| TransactionFact::derive(tx)),
        )
    }

    /// Number of distinct transactions seen this pass.
    pub fn len(&self) -> usize {
        self.facts.len()
    }

    /// True when no fact has been derived yet.
    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Timestamp, TxPurpose};

    fn outgoing(txid: &str, coins: i64) -> TransactionRecord {
        TransactionRecord::new(
            TxId::new(txid.to_string()),
            Timestamp::new(1_000),
            1,
            -(coins * UNITS_PER_COIN),
        )
    }

    #[test]
    fn test_fee_adjustment_recovers_transfer_amount() {
        // 1 coin sent plus a 100 base-unit fee.
        let tx = TransactionRecord::new(
            TxId::new("a1".to_string()),
            Timestamp::new(0),
            0,
            -(UNITS_PER_COIN + 100),
        )
        .with_fee(100);

        let mut pass = FactPass::new();
        let fact = pass.fact_for(&tx).unwrap();
        assert_eq!(fact.magnitude, UNITS_PER_COIN);
        assert_eq!(fact.direction, Direction::Outgoing);
        assert!(fact.fee_visible);
        assert_eq!(fact.hit_amount(), 1);
    }

    #[test]
    fn test_outgoing_hit_amount_is_whole_coins() {
        let tx = outgoing("b2", 3_300_000);
        let mut pass = FactPass::new();
        let fact = pass.fact_for(&tx).unwrap();
        assert_eq!(fact.hit_amount(), 3_300_000);
    }

    #[test]
    fn test_outgoing_hit_amount_truncates_dust() {
        let tx = TransactionRecord::new(
            TxId::new("c3".to_string()),
            Timestamp::new(0),
            0,
            -(3_300_000 * UNITS_PER_COIN + 5),
        );
        let mut pass = FactPass::new();
        let fact = pass.fact_for(&tx).unwrap();
        assert_eq!(fact.hit_amount(), 3_300_000);
    }

    #[test]
    fn test_incoming_hit_amount_is_raw_base_units() {
        let tx = TransactionRecord::new(TxId::new("d4".to_string()), Timestamp::new(0), 0, 250_000);
        let mut pass = FactPass::new();
        let fact = pass.fact_for(&tx).unwrap();
        assert_eq!(fact.direction, Direction::Incoming);
        assert_eq!(fact.hit_amount(), 250_000);
    }

    #[test]
    fn test_fee_visible_requires_outgoing_nonzero_fee() {
        let mut pass = FactPass::new();

        let no_fee = outgoing("e5", 1);
        assert!(!pass.fact_for(&no_fee).unwrap().fee_visible);

        let zero_fee = outgoing("e6", 1).with_fee(0);
        assert!(!pass.fact_for(&zero_fee).unwrap().fee_visible);

        let incoming_with_fee =
            TransactionRecord::new(TxId::new("e7".to_string()), Timestamp::new(0), 0, 500)
                .with_fee(10);
        assert!(!pass.fact_for(&incoming_with_fee).unwrap().fee_visible);
    }

    #[test]
    fn test_fee_bump_yields_no_fact() {
        let tx = outgoing("f8", 1).with_purpose(TxPurpose::FeeBump);
        let mut pass = FactPass::new();
        assert!(pass.fact_for(&tx).is_none());
        assert!(pass.is_empty());
    }

    #[test]
    fn test_first_derivation_wins_within_a_pass() {
        let first = outgoing("aa11", 5);
        // Same identifier presented again with a different value; the
        // cached fact must be returned untouched.
        let second = outgoing("aa11", 9);

        let mut pass = FactPass::new();
        let magnitude = pass.fact_for(&first).unwrap().magnitude;
        let again = pass.fact_for(&second).unwrap().magnitude;
        assert_eq!(magnitude, again);
        assert_eq!(pass.len(), 1);
    }

    #[test]
    fn test_fresh_pass_rederives() {
        let tx = outgoing("bb22", 7);
        let mut first_pass = FactPass::new();
        first_pass.fact_for(&tx).unwrap();

        let mut second_pass = FactPass::new();
        assert!(second_pass.is_empty());
        let fact = second_pass.fact_for(&tx).unwrap();
        assert_eq!(fact.hit_amount(), 7);
    }
}

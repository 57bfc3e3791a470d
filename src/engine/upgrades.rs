//! Upgrade outcomes derived from transaction identifier text.

use tracing::debug;

use crate::config::EngineConfig;
use crate::domain::{Decimal, TransactionRecord, TxId};

use super::fact::FactPass;

/// Deterministic pseudo-random upgrade roll.
///
/// An identifier shorter than five characters always fails; otherwise the
/// roll succeeds iff at least three of the first five characters are ASCII
/// decimal digits.
pub fn is_upgrade_successful(txid: &TxId) -> bool {
    let text = txid.as_str();
    if text.chars().count() < 5 {
        return false;
    }
    let digits = text
        .chars()
        .take(5)
        .filter(|c| c.is_ascii_digit())
        .count();
    digits >= 3
}

/// Count successful upgrades among confirmed planet-address payments of the
/// exact upgrade amount.
pub fn count_upgrade_successes(
    config: &EngineConfig,
    txs: &[TransactionRecord],
    facts: &mut FactPass,
) -> u32 {
    let mut successes = 0u32;
    for tx in txs {
        let Some(fact) = facts.fact_for(tx) else {
            continue;
        };
        let Some(addr) = fact.counterparty.as_ref() else {
            continue;
        };
        if !config.is_planet_address(addr)
            || !config.is_upgrade_amount(fact.hit_amount())
            || tx.depth < config.min_depth
        {
            continue;
        }
        if is_upgrade_successful(&tx.txid) {
            successes += 1;
        }
    }
    debug!(successes, "counted upgrade successes");
    successes
}

/// Base affinity boosted by the per-success bonus rate.
pub fn boosted_affinity(base: u64, successes: u32, bonus_rate: Decimal) -> Decimal {
    Decimal::from(base) * (Decimal::one() + bonus_rate * Decimal::from(successes))
}

//! Feed-address scan: counts, cooldown timing, and the base affinity score.

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::domain::{PetStage, Timestamp, TransactionRecord};

use super::fact::FactPass;

/// Feeding state derived from the allow-list scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedingStatus {
    /// Number of transactions paid to feed addresses.
    pub feed_count: u32,
    /// Latest feed time by value, not by sequence position.
    pub last_feed_at: Option<Timestamp>,
    /// Last feed time plus the cooldown.
    pub next_feed_at: Option<Timestamp>,
    /// feed_count × the stage's Mining value.
    pub affinity: u64,
}

impl FeedingStatus {
    /// The never-fed state; also used for sentinel stages.
    pub fn empty() -> Self {
        FeedingStatus {
            feed_count: 0,
            last_feed_at: None,
            next_feed_at: None,
            affinity: 0,
        }
    }
}

/// Scan the sequence for feed-address payments.
///
/// Sentinel stages cannot be fed and always come back empty. There is no
/// confirmation gate here: a pending feed counts immediately.
pub fn track_feeding(
    config: &EngineConfig,
    stage: PetStage,
    txs: &[TransactionRecord],
    facts: &mut FactPass,
) -> FeedingStatus {
    if !stage.is_feedable() {
        return FeedingStatus::empty();
    }

    let mut feed_count = 0u32;
    let mut last_feed_at: Option<Timestamp> = None;
    for tx in txs {
        let Some(fact) = facts.fact_for(tx) else {
            continue;
        };
        let Some(addr) = fact.counterparty.as_ref() else {
            continue;
        };
        if config.is_feed_address(addr) {
            feed_count += 1;
            last_feed_at = Some(last_feed_at.map_or(tx.time, |prev| prev.max(tx.time)));
        }
    }

    let next_feed_at = last_feed_at.map(|last| last.plus_ms(config.feed_cooldown_ms));
    let affinity = u64::from(feed_count) * u64::from(config.mining_value(stage));
    FeedingStatus {
        feed_count,
        last_feed_at,
        next_feed_at,
        affinity,
    }
}

//! Pure derivation engine: ordered transactions in, one snapshot out.

use std::collections::BTreeMap;

use tracing::debug;

use crate::config::EngineConfig;
use crate::domain::{Decimal, PetAttribute, PetStage, Timestamp, TransactionRecord};

pub mod fact;
pub mod feeding;
pub mod lifecycle;
pub mod planets;
pub mod snapshot;
pub mod upgrades;

pub use fact::{FactPass, TransactionFact};
pub use feeding::FeedingStatus;
pub use planets::{PlanetHolding, PlanetTotals};
pub use snapshot::{EconomySnapshot, FeedTip, PetSnapshot};

/// Derives pet and planet state from a wallet's transaction history.
///
/// The engine owns an immutable constant set and nothing else; every
/// invocation of [`PetEngine::snapshot`] recomputes the full result from
/// the transactions it is handed, with a fresh fact cache per pass.
#[derive(Debug, Clone, Default)]
pub struct PetEngine {
    config: EngineConfig,
}

impl PetEngine {
    /// Create an engine over a constant set.
    pub fn new(config: EngineConfig) -> Self {
        PetEngine { config }
    }

    /// The injected constant set.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Derive one immutable snapshot from the ordered transaction sequence
    /// and the current time.
    ///
    /// Pure and total: identical input always yields an identical snapshot,
    /// and no transaction content can make the derivation fail.
    pub fn snapshot(&self, txs: &[TransactionRecord], now: Timestamp) -> PetSnapshot {
        let mut facts = FactPass::new();

        let stage = lifecycle::resolve_stage(&self.config, txs, &mut facts);
        if stage.is_destroyed() {
            return snapshot::assemble(
                stage,
                FeedingStatus::empty(),
                PlanetTotals::empty(),
                0,
                Decimal::zero(),
            );
        }

        let feeding = feeding::track_feeding(&self.config, stage, txs, &mut facts);
        let successes = upgrades::count_upgrade_successes(&self.config, txs, &mut facts);
        let effective_affinity =
            upgrades::boosted_affinity(feeding.affinity, successes, self.config.upgrade_bonus_rate);
        let totals =
            planets::compute_planet_totals(&self.config, effective_affinity, now, txs, &mut facts);

        debug!(txs = txs.len(), cached = facts.len(), "pass complete");
        snapshot::assemble(stage, feeding, totals, successes, effective_affinity)
    }

    /// The full attribute sheet for a stage, for the attributes panel.
    pub fn attribute_sheet(&self, stage: PetStage) -> BTreeMap<PetAttribute, u32> {
        self.config.attributes.sheet_for(stage)
    }
}

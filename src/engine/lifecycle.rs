use tracing::debug;

use crate::config::EngineConfig;
use crate::domain::{PetStage, TransactionRecord};

use super::fact::FactPass;

/// Resolve the pet's lifecycle stage for this pass.
///
/// Destruction takes precedence over everything else; otherwise the first
/// origin-address transaction in the given sequence decides the stage.
pub fn resolve_stage(
    config: &EngineConfig,
    txs: &[TransactionRecord],
    facts: &mut FactPass,
) -> PetStage {
    if destruction_observed(config, txs, facts) {
        debug!("destruction transaction observed, stage is terminal");
        return PetStage::Destroyed;
    }
    let stage = generation_stage(config, txs, facts);
    debug!(stage = %stage, "resolved pet stage");
    stage
}

/// True if any transaction pays the exact destroy amount to the destroy
/// address.
fn destruction_observed(
    config: &EngineConfig,
    txs: &[TransactionRecord],
    facts: &mut FactPass,
) -> bool {
    txs.iter().any(|tx| {
        facts.fact_for(tx).is_some_and(|fact| {
            fact.counterparty
                .as_ref()
                .is_some_and(|addr| config.is_destroy_hit(addr, fact.hit_amount()))
        })
    })
}

/// First origin-address transaction wins; its amount decides the stage, and
/// an unrecognized amount at that first match still ends the scan.
fn generation_stage(
    config: &EngineConfig,
    txs: &[TransactionRecord],
    facts: &mut FactPass,
) -> PetStage {
    for tx in txs {
        let Some(fact) = facts.fact_for(tx) else {
            continue;
        };
        let Some(addr) = fact.counterparty.as_ref() else {
            continue;
        };
        if config.is_origin_address(addr) {
            return config.stage_for_origin_amount(fact.hit_amount());
        }
    }
    PetStage::Unclassified
}

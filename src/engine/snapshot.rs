//! Immutable pass output: the composed snapshot and the feeding tip.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{Decimal, PetStage, Timestamp};

use super::feeding::FeedingStatus;
use super::planets::{PlanetHolding, PlanetTotals};

/// Feeding-tip state for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedTip {
    /// The pet has never been fed.
    NeedsFeeding,
    /// Earliest moment the next feeding becomes eligible.
    NextFeedAt(Timestamp),
}

impl std::fmt::Display for FeedTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedTip::NeedsFeeding => write!(f, "please feed your pet"),
            FeedTip::NextFeedAt(at) => write!(f, "{}", at.format_minutes_utc()),
        }
    }
}

/// Aggregated economy outputs for one pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EconomySnapshot {
    /// Confirmed Normal-tier holdings.
    pub normal_count: u32,
    /// Confirmed Super-tier holdings.
    pub super_count: u32,
    /// Confirmed Top-tier holdings.
    pub top_count: u32,
    /// Sum of confirmed face amounts (whole coins).
    pub total_resource: i64,
    /// Accrued income across confirmed holdings.
    pub total_income: Decimal,
    /// Pool dividend; non-zero only at the ownership cap.
    pub total_dividend: Decimal,
    /// Purchase-button enablement.
    pub may_purchase_more: bool,
    /// Successful upgrade count.
    pub upgrade_successes: u32,
    /// Success percentage shown by the shell; numerically equal to the
    /// success count.
    pub upgrade_success_percent: u32,
    /// Affinity after the upgrade boost, as used by the formulas.
    pub effective_affinity: Decimal,
    /// Every amount-matched purchase, confirmed or not.
    pub holdings: Vec<PlanetHolding>,
}

impl EconomySnapshot {
    /// The all-zero economy, used for destroyed pets and fresh wallets.
    pub fn empty() -> Self {
        EconomySnapshot {
            normal_count: 0,
            super_count: 0,
            top_count: 0,
            total_resource: 0,
            total_income: Decimal::zero(),
            total_dividend: Decimal::zero(),
            may_purchase_more: true,
            upgrade_successes: 0,
            upgrade_success_percent: 0,
            effective_affinity: Decimal::zero(),
            holdings: Vec::new(),
        }
    }

    /// Confirmed holdings across all tiers.
    pub fn confirmed_count(&self) -> u32 {
        self.normal_count + self.super_count + self.top_count
    }

    /// Income rendered with the two-decimal money policy.
    pub fn income_text(&self) -> String {
        self.total_income.to_money_string()
    }

    /// Dividend rendered with the two-decimal money policy.
    pub fn dividend_text(&self) -> String {
        self.total_dividend.to_money_string()
    }
}

/// One immutable derivation result.
///
/// Recomputed from scratch on every pass; two passes over identical input
/// at an identical time serialize to identical bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetSnapshot {
    /// Lifecycle stage.
    pub stage: PetStage,
    /// Feeding state; empty for sentinel stages.
    pub feeding: FeedingStatus,
    /// Tip for the feeding panel; absent for a destroyed pet.
    pub feed_tip: Option<FeedTip>,
    /// Planet economics and upgrade outcomes.
    pub economy: EconomySnapshot,
}

/// Compose the pass outputs into the final snapshot.
pub fn assemble(
    stage: PetStage,
    feeding: FeedingStatus,
    totals: PlanetTotals,
    upgrade_successes: u32,
    effective_affinity: Decimal,
) -> PetSnapshot {
    let feed_tip = if stage.is_destroyed() {
        None
    } else {
        Some(match feeding.next_feed_at {
            Some(at) => FeedTip::NextFeedAt(at),
            None => FeedTip::NeedsFeeding,
        })
    };

    let economy = EconomySnapshot {
        normal_count: totals.normal_count,
        super_count: totals.super_count,
        top_count: totals.top_count,
        total_resource: totals.total_resource,
        total_income: totals.total_income,
        total_dividend: totals.total_dividend,
        may_purchase_more: totals.may_purchase_more,
        upgrade_successes,
        upgrade_success_percent: upgrade_successes,
        effective_affinity,
        holdings: totals.holdings,
    };

    debug!(
        stage = %stage,
        feed_count = feeding.feed_count,
        confirmed = economy.confirmed_count(),
        "assembled snapshot"
    );
    PetSnapshot {
        stage,
        feeding,
        feed_tip,
        economy,
    }
}

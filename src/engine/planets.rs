//! Planet holdings, income accrual, the ownership cap, and the dividend.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::EngineConfig;
use crate::domain::{Decimal, PlanetTier, Timestamp, TransactionRecord, TxId};

use super::fact::FactPass;

/// Divisor for prorating yearly rates.
const DAYS_PER_YEAR: i64 = 365;

/// One observed planet purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanetHolding {
    /// Tier decided by the exact face amount.
    pub tier: PlanetTier,
    /// Purchase time.
    pub acquired_at: Timestamp,
    /// Days held as of this pass; 1 on the acquisition day.
    pub owned_days: i64,
    /// True once the purchase has reached the minimum depth. Only confirmed
    /// holdings count toward totals, the cap, and income.
    pub confirmed: bool,
    /// Purchase transaction identifier.
    pub txid: TxId,
}

/// Aggregated planet economics for one pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanetTotals {
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
    /// False once confirmed holdings reach the cap.
    pub may_purchase_more: bool,
    /// Every amount-matched purchase, confirmed or not, in sequence order.
    pub holdings: Vec<PlanetHolding>,
}

impl PlanetTotals {
    /// Totals for a wallet with no planet purchases.
    pub fn empty() -> Self {
        PlanetTotals {
            normal_count: 0,
            super_count: 0,
            top_count: 0,
            total_resource: 0,
            total_income: Decimal::zero(),
            total_dividend: Decimal::zero(),
            may_purchase_more: true,
            holdings: Vec::new(),
        }
    }

    /// Confirmed holdings across all tiers.
    pub fn confirmed_count(&self) -> u32 {
        self.normal_count + self.super_count + self.top_count
    }
}

/// Classify planet purchases and aggregate the pass totals.
///
/// Income accrues per confirmed holding as
/// `face × effectiveAffinity × ownedDays × yearlyRate / 365`. The dividend
/// multiplier starts at 1 and gains each confirmed holding's tier weight;
/// at the cap the dividend is `effectiveAffinity × multiplier / 365`.
pub fn compute_planet_totals(
    config: &EngineConfig,
    effective_affinity: Decimal,
    now: Timestamp,
    txs: &[TransactionRecord],
    facts: &mut FactPass,
) -> PlanetTotals {
    let mut totals = PlanetTotals::empty();
    let mut multiplier = Decimal::one();
    let days_per_year = Decimal::from(DAYS_PER_YEAR);

    for tx in txs {
        let Some(fact) = facts.fact_for(tx) else {
            continue;
        };
        let Some(addr) = fact.counterparty.as_ref() else {
            continue;
        };
        if !config.is_planet_address(addr) {
            continue;
        }
        // Not every planet-address payment is a purchase; upgrades and
        // unrecognized amounts create no holding.
        let Some(tier) = config.planet_tier_for(fact.hit_amount()) else {
            continue;
        };

        let confirmed = tx.depth >= config.min_depth;
        let owned_days = tx.time.whole_days_until(now) + 1;
        if confirmed {
            match tier {
                PlanetTier::Normal => totals.normal_count += 1,
                PlanetTier::Super => totals.super_count += 1,
                PlanetTier::Top => totals.top_count += 1,
            }
            let face = config.tier_face_amount(tier);
            totals.total_resource += face;
            let accrued = Decimal::from(face)
                * effective_affinity
                * Decimal::from(owned_days)
                * config.yearly_income_rate
                / days_per_year;
            totals.total_income = totals.total_income + accrued;
            multiplier = multiplier + config.tier_weight(tier);
        }

        totals.holdings.push(PlanetHolding {
            tier,
            acquired_at: tx.time,
            owned_days,
            confirmed,
            txid: tx.txid.clone(),
        });
    }

    if totals.confirmed_count() >= config.ownership_cap {
        totals.may_purchase_more = false;
        totals.total_dividend = effective_affinity * multiplier / days_per_year;
    }

    debug!(
        confirmed = totals.confirmed_count(),
        observed = totals.holdings.len(),
        may_purchase_more = totals.may_purchase_more,
        "aggregated planet holdings"
    );
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MS_PER_DAY, UNITS_PER_COIN};

    fn purchase(txid: &str, config: &EngineConfig, coins: i64, depth: u32) -> TransactionRecord {
        TransactionRecord::new(
            TxId::new(txid.to_string()),
            Timestamp::new(0),
            depth,
            -(coins * UNITS_PER_COIN),
        )
        .with_counterparty(config.planet_address.clone())
    }

    fn affinity(value: u64) -> Decimal {
        Decimal::from(value)
    }

    #[test]
    fn test_no_purchases_is_empty() {
        let config = EngineConfig::default();
        let mut facts = FactPass::new();
        let totals =
            compute_planet_totals(&config, affinity(10), Timestamp::new(1_000), &[], &mut facts);
        assert_eq!(totals, PlanetTotals::empty());
    }

    #[test]
    fn test_unmatched_amount_creates_no_holding() {
        let config = EngineConfig::default();
        let txs = vec![
            purchase("odd1", &config, 999_999, 3),
            purchase("odd2", &config, config.upgrade_amount, 3),
        ];
        let mut facts = FactPass::new();
        let totals =
            compute_planet_totals(&config, affinity(10), Timestamp::new(1_000), &txs, &mut facts);
        assert!(totals.holdings.is_empty());
        assert_eq!(totals.confirmed_count(), 0);
    }

    #[test]
    fn test_unconfirmed_holding_is_observed_but_not_counted() {
        let config = EngineConfig::default();
        let txs = vec![purchase("pend", &config, 1_000_000, 0)];
        let mut facts = FactPass::new();
        let totals =
            compute_planet_totals(&config, affinity(10), Timestamp::new(1_000), &txs, &mut facts);
        assert_eq!(totals.holdings.len(), 1);
        assert!(!totals.holdings[0].confirmed);
        assert_eq!(totals.normal_count, 0);
        assert_eq!(totals.total_resource, 0);
        assert!(totals.total_income.is_zero());
        assert!(totals.may_purchase_more);
    }

    #[test]
    fn test_same_day_purchase_counts_one_day() {
        let config = EngineConfig::default();
        let txs = vec![purchase("day1", &config, 1_000_000, 1)];
        let mut facts = FactPass::new();
        let totals = compute_planet_totals(
            &config,
            affinity(10),
            Timestamp::new(MS_PER_DAY - 1),
            &txs,
            &mut facts,
        );
        assert_eq!(totals.holdings[0].owned_days, 1);
    }

    #[test]
    fn test_income_accrual_formula() {
        let config = EngineConfig::default();
        let txs = vec![purchase("inc1", &config, 1_000_000, 2)];
        let mut facts = FactPass::new();
        // 365 whole days elapsed, so the holding is on day 366.
        let now = Timestamp::new(365 * MS_PER_DAY);
        let totals = compute_planet_totals(&config, affinity(10), now, &txs, &mut facts);

        let expected = Decimal::from(1_000_000_i64)
            * affinity(10)
            * Decimal::from(366_i64)
            * config.yearly_income_rate
            / Decimal::from(365_i64);
        assert_eq!(totals.total_income, expected);
        assert_eq!(totals.total_resource, 1_000_000);
        assert_eq!(totals.normal_count, 1);
        assert!(totals.total_dividend.is_zero());
        assert!(totals.may_purchase_more);
    }

    #[test]
    fn test_tier_counts_and_resource_mix() {
        let config = EngineConfig::default();
        let txs = vec![
            purchase("n1", &config, 1_000_000, 1),
            purchase("s1", &config, 10_000_000, 1),
            purchase("t1", &config, 100_000_000, 1),
        ];
        let mut facts = FactPass::new();
        let totals =
            compute_planet_totals(&config, affinity(0), Timestamp::new(0), &txs, &mut facts);
        assert_eq!(totals.normal_count, 1);
        assert_eq!(totals.super_count, 1);
        assert_eq!(totals.top_count, 1);
        assert_eq!(totals.total_resource, 111_000_000);
        // Zero affinity zeroes income arithmetically.
        assert!(totals.total_income.is_zero());
    }

    #[test]
    fn test_cap_unlocks_dividend_and_blocks_purchases() {
        let config = EngineConfig::default();
        let txs: Vec<_> = (0..10)
            .map(|i| purchase(&format!("cap{i}"), &config, 1_000_000, 1))
            .collect();
        let mut facts = FactPass::new();
        let totals =
            compute_planet_totals(&config, affinity(10), Timestamp::new(0), &txs, &mut facts);
        assert_eq!(totals.normal_count, 10);
        assert!(!totals.may_purchase_more);

        // Multiplier: 1 + 10 × 0.1 = 2.
        let expected = affinity(10) * Decimal::from_str_canonical("2").unwrap()
            / Decimal::from(365_i64);
        assert_eq!(totals.total_dividend, expected);
        assert!(totals.total_dividend.is_positive());
    }

    #[test]
    fn test_unconfirmed_purchases_do_not_reach_the_cap() {
        let config = EngineConfig::default();
        let mut txs: Vec<_> = (0..9)
            .map(|i| purchase(&format!("c{i}"), &config, 1_000_000, 1))
            .collect();
        txs.push(purchase("pending", &config, 1_000_000, 0));
        let mut facts = FactPass::new();
        let totals =
            compute_planet_totals(&config, affinity(10), Timestamp::new(0), &txs, &mut facts);
        assert_eq!(totals.confirmed_count(), 9);
        assert_eq!(totals.holdings.len(), 10);
        assert!(totals.may_purchase_more);
        assert!(totals.total_dividend.is_zero());
    }
}

//! Determinism and serialized-contract tests for the derivation engine.
//!
//! The same ordered input must produce byte-identical snapshots, pass after
//! pass, under the production constants and under alternate constant sets.

use petstar::domain::UNITS_PER_COIN;
use petstar::{
    Address, EngineConfig, PetEngine, PetStage, Timestamp, TransactionRecord, TxId,
};

fn pay(txid: &str, to: &Address, coins: i64, at_ms: i64, depth: u32) -> TransactionRecord {
    TransactionRecord::new(
        TxId::new(txid.to_string()),
        Timestamp::new(at_ms),
        depth,
        -(coins * UNITS_PER_COIN),
    )
    .with_counterparty(to.clone())
}

/// A wallet history that exercises every phase: classification, feeding,
/// upgrades, confirmed and pending planets, and a near-miss destroy payment.
fn busy_wallet(config: &EngineConfig) -> Vec<TransactionRecord> {
    vec![
        pay("o1", &config.origin_address, config.origin_amounts.gen0, 0, 5),
        pay("f1", &config.feed_addresses[0], config.feed_amount, 50_000, 4),
        pay("f2", &config.feed_addresses[7], config.feed_amount, 40_000, 4),
        pay("u1", &config.planet_address, config.upgrade_amount, 60_000, 2),
        pay("90210", &config.planet_address, config.upgrade_amount, 70_000, 2),
        pay("p1", &config.planet_address, config.planet_normal_amount, 80_000, 2),
        pay("p2", &config.planet_address, config.planet_super_amount, 90_000, 0),
        pay("d1", &config.destroy_address, config.destroy_amount - 1, 95_000, 2),
    ]
}

#[test]
fn test_same_input_twice_is_byte_identical() {
    let engine = PetEngine::new(EngineConfig::default());
    let txs = busy_wallet(engine.config());
    let now = Timestamp::new(200_000);

    let first = serde_json::to_string(&engine.snapshot(&txs, now)).unwrap();
    let second = serde_json::to_string(&engine.snapshot(&txs, now)).unwrap();
    assert_eq!(first, second, "snapshots must be byte-identical");
}

#[test]
fn test_two_engines_agree_on_the_same_input() {
    let a = PetEngine::new(EngineConfig::default());
    let b = PetEngine::new(EngineConfig::default());
    let txs = busy_wallet(a.config());
    let now = Timestamp::new(200_000);

    assert_eq!(a.snapshot(&txs, now), b.snapshot(&txs, now));
}

#[test]
fn test_snapshot_field_names_are_stable() {
    let engine = PetEngine::new(EngineConfig::default());
    let txs = busy_wallet(engine.config());
    let snap = engine.snapshot(&txs, Timestamp::new(200_000));

    let json = serde_json::to_value(&snap).unwrap();
    assert_eq!(json["stage"], "gen0");
    assert!(json["feeding"]["feed_count"].is_u64());
    assert!(json["feeding"]["last_feed_at"].is_i64());
    assert!(json["feeding"]["affinity"].is_u64());
    assert!(json["economy"]["normal_count"].is_u64());
    assert!(json["economy"]["total_resource"].is_i64());
    assert!(json["economy"]["total_income"].is_number());
    assert!(json["economy"]["may_purchase_more"].is_boolean());
    assert!(json["economy"]["holdings"].is_array());
    assert_eq!(json["economy"]["holdings"][0]["tier"], "normal");
}

#[test]
fn test_alternate_constants_load_over_defaults() {
    let config = EngineConfig::from_json_str(
        r#"{
            "ownership_cap": 3,
            "feed_cooldown_ms": 60000
        }"#,
    )
    .unwrap();
    assert_eq!(config.ownership_cap, 3);
    assert_eq!(config.feed_cooldown_ms, 60_000);
    // Untouched fields keep the production values.
    assert_eq!(config.origin_amounts, EngineConfig::default().origin_amounts);

    let engine = PetEngine::new(config);
    let cfg = engine.config().clone();
    let txs = vec![
        pay("o1", &cfg.origin_address, cfg.origin_amounts.gen3, 0, 5),
        pay("p1", &cfg.planet_address, cfg.planet_normal_amount, 1_000, 2),
        pay("p2", &cfg.planet_address, cfg.planet_normal_amount, 2_000, 2),
        pay("p3", &cfg.planet_address, cfg.planet_normal_amount, 3_000, 2),
    ];
    let snap = engine.snapshot(&txs, Timestamp::new(10_000));

    assert_eq!(snap.stage, PetStage::Gen3);
    assert_eq!(snap.economy.normal_count, 3);
    assert!(!snap.economy.may_purchase_more);
}

#[test]
fn test_rejected_constant_sets_name_the_field() {
    // A cap of zero can never admit a purchase.
    let err = EngineConfig::from_json_str(r#"{"ownership_cap": 0}"#).unwrap_err();
    assert!(err.to_string().contains("ownership_cap"));

    // Overlapping face amounts would make tiers ambiguous.
    let err = EngineConfig::from_json_str(
        r#"{"planet_normal_amount": 5000, "planet_super_amount": 5000}"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("planet"));
}

#[test]
fn test_reordered_input_changes_only_order_sensitive_fields() {
    let engine = PetEngine::new(EngineConfig::default());
    let config = engine.config().clone();
    let now = Timestamp::new(200_000);

    // Two feeds and two planets, forward and reversed.
    let forward = vec![
        pay("o1", &config.origin_address, config.origin_amounts.gen1, 0, 5),
        pay("f1", &config.feed_addresses[0], config.feed_amount, 10_000, 4),
        pay("f2", &config.feed_addresses[1], config.feed_amount, 20_000, 4),
        pay("p1", &config.planet_address, config.planet_normal_amount, 30_000, 2),
        pay("p2", &config.planet_address, config.planet_super_amount, 40_000, 2),
    ];
    let mut reversed = forward.clone();
    reversed[1..].reverse();

    let a = engine.snapshot(&forward, now);
    let b = engine.snapshot(&reversed, now);

    // Counts, timing, and money are sequence-independent; the running-max
    // last feed time in particular survives the reversal.
    assert_eq!(a.stage, b.stage);
    assert_eq!(a.feeding, b.feeding);
    assert_eq!(a.economy.normal_count, b.economy.normal_count);
    assert_eq!(a.economy.super_count, b.economy.super_count);
    assert_eq!(a.economy.total_resource, b.economy.total_resource);
    assert_eq!(a.economy.total_income, b.economy.total_income);

    // Holdings preserve input order, so the listings differ.
    assert_eq!(a.economy.holdings[0].txid, TxId::new("p1".to_string()));
    assert_eq!(b.economy.holdings[0].txid, TxId::new("p2".to_string()));
}

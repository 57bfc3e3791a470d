use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::domain::{
    Address, AttributeCurve, AttributeTable, Decimal, PetAttribute, PetStage, PlanetTier,
};

/// Production origin address (pet generation purchases).
const MAINNET_ORIGIN_ADDRESS: &str = "AZrBpp4UymXF5dEa7u2kPbnEksnSXoioLi";
/// Production destruction address.
const MAINNET_DESTROY_ADDRESS: &str = "AbewbnvCn9M9Drz1Z4i9Vfr4nATDf7Wsr3";
/// Production planet-purchase address.
const MAINNET_PLANET_ADDRESS: &str = "AP6ujp2pxsefXhczhKgyQVtgxYjfyjgZUz";

/// Production feed-address allow-list.
const MAINNET_FEED_ADDRESSES: [&str; 23] = [
    "AafiiGE9mtE7wT6N8oVTvNSnDJAJS3dMqq",
    "AND2ri13bpY2g1m8XkrwHpCB977D4TqRVw",
    "ANg4ww3464Si6QVCd2LzRAYvu69ZCzz7Wz",
    "Ac4UpCXkEYTRVUN4t2fD3UYh8TBz3w2Dsj",
    "AZFGo6CbhCSXPWyHfnbBMTaG4wrT5Q9tPx",
    "AXm5xYSeKbX12JnBT2QpMkkd11yQz7wBXt",
    "AM43rGjDZ6fP7ZJvZcFvtGVnaB52MTKXbz",
    "AanXYUBw3dvSd4EX2L3TVro56A1bFmG4xZ",
    "AQq5z6J1N4hoc9KCKBC6b9keEu8cFTXrbB",
    "ATKhArGh8AxCrMDzDkCCzU2PpYpGzsMegY",
    "AKRJLsSzj3Gz9CAXpt7pHyEh2YvGdxViQX",
    "AKuiytqn3VhAbYAzNbWyNxbRXTLSBB7mNT",
    "AMoGCKopSiwQDoXEFCqRfouVrn2KJjBXSr",
    "AbiRwBgW71KeWaHnPXRUL3vRDK81X1uDyv",
    "AexmHuQcnGn7PdY2xWxsfTApQAvoGWWjmg",
    "ANtXUQdDcA6oP24jpu3fMtsaCDDzDqrKyz",
    "ALuk7N4CQp8gAwjBDjCu531MYV591E58Cv",
    "AamiujKCndhrwzpZ9MZZmn6YdDDWXCm6bz",
    "AQchsrt2m7rwFjvjdsr6Fko6bhSfaikNTv",
    "AHiw2dXMABB3YWkp5jnPU67s2iksjpxs2W",
    "AX7Dzuym7yJNrosntcCmj9NRV7i5cpURAH",
    "AdmZ7mCLVCgaFzga2iCbzfqse6RakoBzbj",
    "Ae2VLGHcjeHHtc28j1kgAu9VaHuxVTGqT8",
];

/// Origin payment amounts (whole coins) keyed by the stage they grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OriginAmounts {
    pub gen_minus_one: i64,
    pub gen0: i64,
    pub gen1: i64,
    pub gen2: i64,
    pub gen3: i64,
}

impl Default for OriginAmounts {
    fn default() -> Self {
        OriginAmounts {
            gen_minus_one: 1_000_000_000,
            gen0: 100_000_000,
            gen1: 10_000_000,
            gen2: 1_000_000,
            gen3: 100_000,
        }
    }
}

/// Immutable constant set injected into the engine at construction.
///
/// `Default` is the production set; alternate sets (testnets, unit tests)
/// load from JSON, with missing fields falling back to the defaults.
///
/// All matching amounts are denominated in whole coins, the unit outgoing
/// transaction values are normalized to before matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Address whose payments decide the pet's generation stage.
    pub origin_address: Address,
    /// Address whose exact-amount payment destroys the pet.
    pub destroy_address: Address,
    /// Exact destruction amount (whole coins).
    pub destroy_amount: i64,
    /// Address receiving planet purchases and upgrade payments.
    pub planet_address: Address,
    /// Allow-list of feeding addresses.
    pub feed_addresses: Vec<Address>,
    /// Canonical feed payment face (whole coins); informs payment intents,
    /// matching is by address only.
    pub feed_amount: i64,
    /// Origin payment amounts per generation.
    pub origin_amounts: OriginAmounts,
    /// Normal planet face amount (whole coins).
    pub planet_normal_amount: i64,
    /// Super planet face amount (whole coins).
    pub planet_super_amount: i64,
    /// Top planet face amount (whole coins).
    pub planet_top_amount: i64,
    /// Normal planet dividend weight.
    pub planet_normal_weight: Decimal,
    /// Super planet dividend weight.
    pub planet_super_weight: Decimal,
    /// Top planet dividend weight.
    pub planet_top_weight: Decimal,
    /// Exact upgrade payment amount (whole coins).
    pub upgrade_amount: i64,
    /// Affinity boost per successful upgrade.
    pub upgrade_bonus_rate: Decimal,
    /// Yearly income accrual rate per coin of face amount.
    pub yearly_income_rate: Decimal,
    /// Maximum confirmed planet holdings per wallet.
    pub ownership_cap: u32,
    /// Minimum confirmation depth for holdings and upgrades to count.
    pub min_depth: u32,
    /// Feeding cooldown in milliseconds.
    pub feed_cooldown_ms: i64,
    /// Stage-indexed attribute table; the Mining row drives affinity.
    pub attributes: AttributeTable,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            origin_address: Address::new(MAINNET_ORIGIN_ADDRESS.to_string()),
            destroy_address: Address::new(MAINNET_DESTROY_ADDRESS.to_string()),
            destroy_amount: 3_300_000,
            planet_address: Address::new(MAINNET_PLANET_ADDRESS.to_string()),
            feed_addresses: MAINNET_FEED_ADDRESSES
                .iter()
                .map(|addr| Address::new((*addr).to_string()))
                .collect(),
            feed_amount: 10_000,
            origin_amounts: OriginAmounts::default(),
            planet_normal_amount: 1_000_000,
            planet_super_amount: 10_000_000,
            planet_top_amount: 100_000_000,
            planet_normal_weight: Decimal::from_scaled(1, 1),
            planet_super_weight: Decimal::from_scaled(5, 1),
            planet_top_weight: Decimal::one(),
            upgrade_amount: 20_000,
            upgrade_bonus_rate: Decimal::from_scaled(1, 2),
            yearly_income_rate: Decimal::from_scaled(1, 6),
            ownership_cap: 10,
            min_depth: 1,
            feed_cooldown_ms: 18 * 60 * 60 * 1000,
            attributes: production_attribute_table(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid constant-set JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl EngineConfig {
    /// Load a constant set from JSON; absent fields keep production values.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.ownership_cap == 0 {
            return Err(ConfigError::InvalidValue(
                "ownership_cap".to_string(),
                "must be at least 1".to_string(),
            ));
        }
        if self.feed_cooldown_ms <= 0 {
            return Err(ConfigError::InvalidValue(
                "feed_cooldown_ms".to_string(),
                "must be positive".to_string(),
            ));
        }
        let faces = [
            self.planet_normal_amount,
            self.planet_super_amount,
            self.planet_top_amount,
        ];
        if faces[0] == faces[1] || faces[0] == faces[2] || faces[1] == faces[2] {
            return Err(ConfigError::InvalidValue(
                "planet face amounts".to_string(),
                "must be pairwise distinct".to_string(),
            ));
        }
        if faces.contains(&self.upgrade_amount) {
            return Err(ConfigError::InvalidValue(
                "upgrade_amount".to_string(),
                "must differ from every planet face amount".to_string(),
            ));
        }
        Ok(self)
    }

    /// Stage granted by an exact origin payment amount; unknown amounts
    /// leave the pet Unclassified.
    pub fn stage_for_origin_amount(&self, amount: i64) -> PetStage {
        let amounts = &self.origin_amounts;
        if amount == amounts.gen_minus_one {
            PetStage::GenMinusOne
        } else if amount == amounts.gen0 {
            PetStage::Gen0
        } else if amount == amounts.gen1 {
            PetStage::Gen1
        } else if amount == amounts.gen2 {
            PetStage::Gen2
        } else if amount == amounts.gen3 {
            PetStage::Gen3
        } else {
            PetStage::Unclassified
        }
    }

    /// Planet tier for an exact face amount, if any.
    pub fn planet_tier_for(&self, amount: i64) -> Option<PlanetTier> {
        if amount == self.planet_normal_amount {
            Some(PlanetTier::Normal)
        } else if amount == self.planet_super_amount {
            Some(PlanetTier::Super)
        } else if amount == self.planet_top_amount {
            Some(PlanetTier::Top)
        } else {
            None
        }
    }

    /// Face amount (whole coins) for a tier.
    pub fn tier_face_amount(&self, tier: PlanetTier) -> i64 {
        match tier {
            PlanetTier::Normal => self.planet_normal_amount,
            PlanetTier::Super => self.planet_super_amount,
            PlanetTier::Top => self.planet_top_amount,
        }
    }

    /// Dividend weight for a tier.
    pub fn tier_weight(&self, tier: PlanetTier) -> Decimal {
        match tier {
            PlanetTier::Normal => self.planet_normal_weight,
            PlanetTier::Super => self.planet_super_weight,
            PlanetTier::Top => self.planet_top_weight,
        }
    }

    /// True if the address is in the feeding allow-list.
    pub fn is_feed_address(&self, address: &Address) -> bool {
        self.feed_addresses.iter().any(|a| a == address)
    }

    /// True for the exact destruction address-and-amount pair.
    pub fn is_destroy_hit(&self, address: &Address, amount: i64) -> bool {
        *address == self.destroy_address && amount == self.destroy_amount
    }

    /// True if the address is the pet origin address.
    pub fn is_origin_address(&self, address: &Address) -> bool {
        *address == self.origin_address
    }

    /// True if the address is the planet-purchase address.
    pub fn is_planet_address(&self, address: &Address) -> bool {
        *address == self.planet_address
    }

    /// True for the exact upgrade payment amount.
    pub fn is_upgrade_amount(&self, amount: i64) -> bool {
        amount == self.upgrade_amount
    }

    /// Mining value for a stage, the per-feed affinity increment.
    pub fn mining_value(&self, stage: PetStage) -> u32 {
        self.attributes.value(PetAttribute::Mining, stage)
    }
}

fn production_attribute_table() -> AttributeTable {
    let mut rows = BTreeMap::new();
    rows.insert(
        PetAttribute::Strength,
        AttributeCurve::new(2000, 1500, 1000, 500, 100),
    );
    rows.insert(
        PetAttribute::Agility,
        AttributeCurve::new(2000, 1500, 1000, 500, 100),
    );
    rows.insert(
        PetAttribute::Intellect,
        AttributeCurve::new(2000, 1500, 1000, 500, 100),
    );
    rows.insert(
        PetAttribute::Command,
        AttributeCurve::new(200, 150, 100, 100, 100),
    );
    rows.insert(PetAttribute::Block, AttributeCurve::new(20, 15, 10, 10, 10));
    rows.insert(
        PetAttribute::CriticalHit,
        AttributeCurve::new(20, 15, 10, 10, 10),
    );
    rows.insert(PetAttribute::Movement, AttributeCurve::new(5, 3, 2, 2, 2));
    rows.insert(PetAttribute::JumpRange, AttributeCurve::new(5, 3, 2, 2, 2));
    rows.insert(PetAttribute::AttackRange, AttributeCurve::new(5, 3, 2, 2, 2));
    rows.insert(PetAttribute::QuickCast, AttributeCurve::new(5, 3, 2, 2, 2));
    rows.insert(PetAttribute::Technology, AttributeCurve::new(10, 8, 5, 5, 5));
    rows.insert(PetAttribute::Superpower, AttributeCurve::new(10, 8, 5, 5, 5));
    rows.insert(PetAttribute::Teamwork, AttributeCurve::new(15, 10, 5, 5, 5));
    rows.insert(PetAttribute::Mining, AttributeCurve::new(20, 15, 10, 5, 1));
    AttributeTable::new(rows)
}

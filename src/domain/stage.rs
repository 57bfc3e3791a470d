//! Pet lifecycle stages, planet tiers, and the stage-indexed attribute table.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Pet lifecycle stage.
///
/// Five generations plus two sentinels. `Destroyed` is terminal and
/// suppresses feeding and economy computation for the pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PetStage {
    /// Generation -1, the scarcest origin tier.
    GenMinusOne,
    /// Generation 0.
    Gen0,
    /// Generation 1.
    Gen1,
    /// Generation 2.
    Gen2,
    /// Generation 3, the most common origin tier.
    Gen3,
    /// No origin transaction matched a known tier amount.
    Unclassified,
    /// A destruction transaction was observed; terminal.
    Destroyed,
}

impl PetStage {
    /// Wire code used by the presentation layer (-1..3, 99, 444).
    pub fn code(&self) -> i32 {
        match self {
            PetStage::GenMinusOne => -1,
            PetStage::Gen0 => 0,
            PetStage::Gen1 => 1,
            PetStage::Gen2 => 2,
            PetStage::Gen3 => 3,
            PetStage::Unclassified => 99,
            PetStage::Destroyed => 444,
        }
    }

    /// True for the generation stages; sentinels cannot be fed.
    pub fn is_feedable(&self) -> bool {
        !matches!(self, PetStage::Unclassified | PetStage::Destroyed)
    }

    /// True once a destruction transaction has been observed.
    pub fn is_destroyed(&self) -> bool {
        matches!(self, PetStage::Destroyed)
    }
}

impl std::fmt::Display for PetStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PetStage::GenMinusOne => write!(f, "gen-1"),
            PetStage::Gen0 => write!(f, "gen0"),
            PetStage::Gen1 => write!(f, "gen1"),
            PetStage::Gen2 => write!(f, "gen2"),
            PetStage::Gen3 => write!(f, "gen3"),
            PetStage::Unclassified => write!(f, "unclassified"),
            PetStage::Destroyed => write!(f, "destroyed"),
        }
    }
}

/// Planet holding tier, decided by exact face-amount match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanetTier {
    /// Lowest face amount.
    Normal,
    /// Middle face amount.
    Super,
    /// Highest face amount.
    Top,
}

impl std::fmt::Display for PlanetTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlanetTier::Normal => write!(f, "normal"),
            PlanetTier::Super => write!(f, "super"),
            PlanetTier::Top => write!(f, "top"),
        }
    }
}

/// Pet attribute identifiers, one per row of the attribute table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PetAttribute {
    Strength,
    Agility,
    Intellect,
    Command,
    Block,
    CriticalHit,
    Movement,
    JumpRange,
    AttackRange,
    QuickCast,
    Technology,
    Superpower,
    Teamwork,
    /// The affinity row: feeding multiplies this value into the economy.
    Mining,
}

/// Per-generation values for one attribute row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeCurve {
    pub gen_minus_one: u32,
    pub gen0: u32,
    pub gen1: u32,
    pub gen2: u32,
    pub gen3: u32,
}

impl AttributeCurve {
    /// Build a curve from generation -1 through generation 3 values.
    pub const fn new(gen_minus_one: u32, gen0: u32, gen1: u32, gen2: u32, gen3: u32) -> Self {
        AttributeCurve {
            gen_minus_one,
            gen0,
            gen1,
            gen2,
            gen3,
        }
    }

    /// Value for a stage; sentinel stages always read 0.
    pub fn value_for(&self, stage: PetStage) -> u32 {
        match stage {
            PetStage::GenMinusOne => self.gen_minus_one,
            PetStage::Gen0 => self.gen0,
            PetStage::Gen1 => self.gen1,
            PetStage::Gen2 => self.gen2,
            PetStage::Gen3 => self.gen3,
            PetStage::Unclassified | PetStage::Destroyed => 0,
        }
    }
}

/// Stage-indexed attribute lookup table.
///
/// BTreeMap for deterministic iteration order. Missing rows read 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeTable(pub BTreeMap<PetAttribute, AttributeCurve>);

impl AttributeTable {
    /// Build a table from attribute rows.
    pub fn new(rows: BTreeMap<PetAttribute, AttributeCurve>) -> Self {
        AttributeTable(rows)
    }

    /// Look up one attribute value for a stage; 0 for missing rows and
    /// sentinel stages.
    pub fn value(&self, attribute: PetAttribute, stage: PetStage) -> u32 {
        self.0
            .get(&attribute)
            .map(|curve| curve.value_for(stage))
            .unwrap_or(0)
    }

    /// The full attribute sheet for a stage, for the attributes panel.
    pub fn sheet_for(&self, stage: PetStage) -> BTreeMap<PetAttribute, u32> {
        self.0
            .iter()
            .map(|(attribute, curve)| (*attribute, curve.value_for(stage)))
            .collect()
    }
}

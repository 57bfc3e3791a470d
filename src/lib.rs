pub mod config;
pub mod domain;
pub mod engine;
pub mod ledger;
pub mod refresh;

pub use config::{ConfigError, EngineConfig, OriginAmounts};
pub use domain::{
    Address, AttributeTable, Decimal, Direction, PetAttribute, PetStage, PlanetTier, Timestamp,
    TransactionRecord, TxId, TxPurpose,
};
pub use engine::{
    EconomySnapshot, FeedTip, FeedingStatus, PetEngine, PetSnapshot, PlanetHolding, PlanetTotals,
};
pub use ledger::{LedgerError, LedgerSource, MockLedger};
pub use refresh::{RefreshError, SnapshotWorker, DEFAULT_REFRESH_DELAY};

//! Domain types for the pet/planet derivation engine.
//!
//! This module provides:
//! - Lossless numeric handling via the Decimal wrapper
//! - Domain primitives: Timestamp, Address, TxId, Direction
//! - The ledger TransactionRecord input type
//! - Pet stages, planet tiers, and the stage-indexed attribute table

pub mod decimal;
pub mod primitives;
pub mod stage;
pub mod transaction;

pub use decimal::Decimal;
pub use primitives::{Address, Direction, Timestamp, TxId, MS_PER_DAY, UNITS_PER_COIN};
pub use stage::{AttributeCurve, AttributeTable, PetAttribute, PetStage, PlanetTier};
pub use transaction::{TransactionRecord, TxPurpose};

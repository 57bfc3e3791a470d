//! Domain primitives: Timestamp, Address, TxId, Direction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Base units per whole coin (the ledger's smallest denomination).
pub const UNITS_PER_COIN: i64 = 100_000_000;

/// Milliseconds in one whole day.
pub const MS_PER_DAY: i64 = 86_400_000;

/// Time in milliseconds since Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(pub i64);

impl Timestamp {
    /// Create a Timestamp from milliseconds.
    pub fn new(ms: i64) -> Self {
        Timestamp(ms)
    }

    /// Get the underlying milliseconds value.
    pub fn as_i64(&self) -> i64 {
        self.0
    }

    /// Whole days elapsed from this instant until `later`, clamped at zero
    /// when `later` precedes it.
    pub fn whole_days_until(&self, later: Timestamp) -> i64 {
        (later.0 - self.0).max(0) / MS_PER_DAY
    }

    /// This instant shifted forward by `ms` milliseconds.
    pub fn plus_ms(&self, ms: i64) -> Timestamp {
        Timestamp(self.0 + ms)
    }

    /// Render as "YYYY-MM-DD HH:MM" in UTC; out-of-range instants fall back
    /// to the raw millisecond value.
    pub fn format_minutes_utc(&self) -> String {
        match DateTime::<Utc>::from_timestamp_millis(self.0) {
            Some(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
            None => self.0.to_string(),
        }
    }
}

/// Wallet or counterparty address (base58 string).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Address(pub String);

impl Address {
    /// Create an Address from a string.
    pub fn new(addr: String) -> Self {
        Address(addr)
    }

    /// Get the address as a string reference.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Transaction identifier (opaque, stable; cache key and upgrade-roll input).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TxId(pub String);

impl TxId {
    /// Create a TxId from a string.
    pub fn new(id: String) -> Self {
        TxId(id)
    }

    /// Get the identifier as a string reference.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TxId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Transfer direction relative to the wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Value leaving the wallet.
    Outgoing,
    /// Value entering the wallet (or a zero-value transfer).
    Incoming,
}

impl Direction {
    /// Derive the direction from a signed net value.
    pub fn from_net_value(value: i64) -> Self {
        if value < 0 {
            Direction::Outgoing
        } else {
            Direction::Incoming
        }
    }

    /// True for value leaving the wallet.
    pub fn is_outgoing(&self) -> bool {
        matches!(self, Direction::Outgoing)
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Outgoing => write!(f, "outgoing"),
            Direction::Incoming => write!(f, "incoming"),
        }
    }
}

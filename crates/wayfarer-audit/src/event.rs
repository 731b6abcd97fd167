//! Audit entry and log types.
//!
//! Every trip gets its own chain. An `AuditEntry` is one link: a
//! `RecommendationRecord` plus its position and hashes. A `TripChain` is
//! sealed once the caller finalizes the trip-day; nothing may be appended to
//! a sealed chain.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use wayfarer_contracts::record::RecommendationRecord;

/// The `prev_hash` of the first entry in every trip chain. 64 hex zeros.
pub const GENESIS_HASH: &str = "0000000000000000000000000000000000000000000000000000000000000000";

/// One link in a trip's recommendation chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Position within the trip's chain, starting at 0.
    pub sequence: u64,
    pub record: RecommendationRecord,
    pub prev_hash: String,
    /// See [`crate::chain::hash_entry`] for what this commits to.
    pub this_hash: String,
}

/// All recommendations recorded for one trip, in write order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripChain {
    pub trip_id: String,
    pub entries: Vec<AuditEntry>,
    /// Set by `finalize`. A sealed chain rejects further records.
    #[serde(default)]
    pub sealed_at: Option<DateTime<Utc>>,
}

impl TripChain {
    pub fn new(trip_id: impl Into<String>) -> Self {
        Self {
            trip_id: trip_id.into(),
            entries: Vec::new(),
            sealed_at: None,
        }
    }

    /// The hash the next entry must link to.
    pub fn head(&self) -> &str {
        self.entries.last().map_or(GENESIS_HASH, |e| e.this_hash.as_str())
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed_at.is_some()
    }
}

/// A point-in-time copy of every trip chain, ordered by trip id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLog {
    pub trips: Vec<TripChain>,
    pub exported_at: DateTime<Utc>,
}

impl AuditLog {
    pub fn entry_count(&self) -> usize {
        self.trips.iter().map(|t| t.entries.len()).sum()
    }

    pub fn trip(&self, trip_id: &str) -> Option<&TripChain> {
        self.trips.iter().find(|t| t.trip_id == trip_id)
    }
}

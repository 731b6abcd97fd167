//! Recommendation digests and chain checks.
//!
//! The digest is built field by field rather than from the record's JSON, so
//! what a hash commits to is spelled out here and does not drift with serde
//! attributes. Every variable-length field is written as an 8-byte
//! little-endian length followed by its bytes; that keeps `["a", "", "b"]`
//! and `["a", "b"]` apart, so dropping a separator action is detectable.
//!
//! Digest input, in order:
//!
//! | Field | Encoding |
//! |---|---|
//! | trip id | length-prefixed UTF-8 |
//! | sequence | u64 LE |
//! | previous hash | length-prefixed ASCII hex |
//! | record id | 16 raw bytes |
//! | user id, date, agent, recorded at | length-prefixed UTF-8 (date empty when absent) |
//! | priority | length-prefixed lowercase name |
//! | approval required | one byte, 0 or 1 |
//! | decision, rationale | length-prefixed UTF-8 |
//! | output actions | u64 LE count, then each length-prefixed |
//! | input signals | length-prefixed compact JSON object, keys sorted |

use std::fmt;

use sha2::{Digest, Sha256};

use wayfarer_contracts::record::RecommendationRecord;

use crate::event::{AuditEntry, GENESIS_HASH};

/// Where and how a trip chain stopped verifying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainBreak {
    /// `sequence` is not the entry's index in the chain.
    OutOfSequence { index: usize, sequence: u64 },
    /// `prev_hash` does not match the previous entry's hash.
    BrokenLink { sequence: u64 },
    /// The entry's content no longer matches its stored hash.
    AlteredContent { sequence: u64 },
    /// The entry belongs to a different trip than the chain holding it.
    ForeignTrip { sequence: u64, trip_id: String },
}

impl fmt::Display for ChainBreak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainBreak::OutOfSequence { index, sequence } => {
                write!(f, "entry {index} carries sequence {sequence}")
            }
            ChainBreak::BrokenLink { sequence } => {
                write!(f, "entry {sequence} does not link to its predecessor")
            }
            ChainBreak::AlteredContent { sequence } => {
                write!(f, "entry {sequence} was altered after it was written")
            }
            ChainBreak::ForeignTrip { sequence, trip_id } => {
                write!(f, "entry {sequence} belongs to trip {trip_id}")
            }
        }
    }
}

fn field(hasher: &mut Sha256, bytes: &[u8]) {
    hasher.update((bytes.len() as u64).to_le_bytes());
    hasher.update(bytes);
}

/// SHA-256 of one entry in `trip_id`'s chain, as 64 lowercase hex characters.
pub fn hash_entry(
    trip_id: &str,
    sequence: u64,
    record: &RecommendationRecord,
    prev_hash: &str,
) -> String {
    let rec = &record.recommendation;
    let mut hasher = Sha256::new();

    field(&mut hasher, trip_id.as_bytes());
    hasher.update(sequence.to_le_bytes());
    field(&mut hasher, prev_hash.as_bytes());

    hasher.update(record.record_id.as_bytes());
    field(&mut hasher, record.user_id.as_bytes());
    let date = record.date.map(|d| d.to_string()).unwrap_or_default();
    field(&mut hasher, date.as_bytes());
    field(&mut hasher, record.agent.as_str().as_bytes());
    field(&mut hasher, record.recorded_at.to_rfc3339().as_bytes());

    field(&mut hasher, rec.priority().as_str().as_bytes());
    hasher.update([u8::from(rec.approval_required())]);
    field(&mut hasher, rec.decision().as_bytes());
    field(&mut hasher, rec.rationale().as_bytes());

    hasher.update((rec.output_actions().len() as u64).to_le_bytes());
    for action in rec.output_actions() {
        field(&mut hasher, action.as_bytes());
    }

    let signals: serde_json::Map<String, serde_json::Value> =
        rec.input_signals().iter().map(|(k, v)| (k.clone(), v.clone())).collect();
    field(&mut hasher, serde_json::Value::Object(signals).to_string().as_bytes());

    hex::encode(hasher.finalize())
}

/// The first problem in `entries`, read as `trip_id`'s chain. An empty chain
/// is valid.
pub fn check_chain(trip_id: &str, entries: &[AuditEntry]) -> Result<(), ChainBreak> {
    let mut expected_prev = GENESIS_HASH;

    for (index, entry) in entries.iter().enumerate() {
        if entry.sequence != index as u64 {
            return Err(ChainBreak::OutOfSequence {
                index,
                sequence: entry.sequence,
            });
        }
        if entry.record.trip_id != trip_id {
            return Err(ChainBreak::ForeignTrip {
                sequence: entry.sequence,
                trip_id: entry.record.trip_id.clone(),
            });
        }
        if entry.prev_hash != expected_prev {
            return Err(ChainBreak::BrokenLink { sequence: entry.sequence });
        }
        if entry.this_hash != hash_entry(trip_id, entry.sequence, &entry.record, &entry.prev_hash) {
            return Err(ChainBreak::AlteredContent { sequence: entry.sequence });
        }
        expected_prev = entry.this_hash.as_str();
    }

    Ok(())
}

pub fn verify_chain(trip_id: &str, entries: &[AuditEntry]) -> bool {
    check_chain(trip_id, entries).is_ok()
}

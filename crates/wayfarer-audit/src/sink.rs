//! In-memory `RecommendationSink` keeping one hash chain per trip.
//!
//! `record` appends to the trip's chain. `finalize` seals it: later records
//! for that trip are refused, so a finalized trip-day cannot quietly grow.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use tracing::{debug, info, warn};

use wayfarer_contracts::{
    agent::AgentKind,
    error::{WayfarerError, WayfarerResult},
    record::RecommendationRecord,
};
use wayfarer_core::RecommendationSink;

use crate::{
    chain::{check_chain, hash_entry, ChainBreak},
    event::{AuditEntry, AuditLog, TripChain},
};

/// Append-only recommendation log, chained per trip.
///
/// Cloning shares the same chains, so one sink can be handed to several
/// concurrent callers.
#[derive(Clone, Default)]
pub struct HashChainSink {
    pub(crate) trips: Arc<Mutex<BTreeMap<String, TripChain>>>,
}

impl HashChainSink {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> WayfarerResult<MutexGuard<'_, BTreeMap<String, TripChain>>> {
        self.trips.lock().map_err(|e| WayfarerError::AuditWriteFailed {
            reason: format!("audit chain lock poisoned: {}", e),
        })
    }

    /// Entries across every trip.
    pub fn len(&self) -> usize {
        self.lock()
            .map_or(0, |trips| trips.values().map(|t| t.entries.len()).sum())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn export_log(&self) -> WayfarerResult<AuditLog> {
        let trips = self.lock()?;
        Ok(AuditLog {
            trips: trips.values().cloned().collect(),
            exported_at: Utc::now(),
        })
    }

    /// The first broken chain, by trip id, if any.
    pub fn first_break(&self) -> WayfarerResult<Option<(String, ChainBreak)>> {
        let trips = self.lock()?;
        Ok(trips.values().find_map(|chain| {
            check_chain(&chain.trip_id, &chain.entries)
                .err()
                .map(|brk| (chain.trip_id.clone(), brk))
        }))
    }

    /// False if any entry of any trip was altered after it was written.
    pub fn verify_integrity(&self) -> bool {
        matches!(self.first_break(), Ok(None))
    }

    /// Every record produced by `agent`, trips in id order, entries in
    /// write order.
    pub fn records_for(&self, agent: AgentKind) -> WayfarerResult<Vec<RecommendationRecord>> {
        let trips = self.lock()?;
        Ok(trips
            .values()
            .flat_map(|chain| chain.entries.iter())
            .filter(|e| e.record.agent == agent)
            .map(|e| e.record.clone())
            .collect())
    }
}

impl RecommendationSink for HashChainSink {
    fn record(&self, record: &RecommendationRecord) -> WayfarerResult<()> {
        let mut trips = self.lock()?;
        let chain = trips
            .entry(record.trip_id.clone())
            .or_insert_with(|| TripChain::new(record.trip_id.clone()));

        if chain.is_sealed() {
            warn!(
                trip_id = %record.trip_id,
                agent = %record.agent,
                "record refused: trip is sealed"
            );
            return Err(WayfarerError::AuditWriteFailed {
                reason: format!("trip {} is already finalized", record.trip_id),
            });
        }

        let sequence = chain.entries.len() as u64;
        let prev_hash = chain.head().to_string();
        let this_hash = hash_entry(&chain.trip_id, sequence, record, &prev_hash);

        debug!(
            trip_id = %record.trip_id,
            agent = %record.agent,
            priority = %record.recommendation.priority(),
            sequence,
            "recommendation recorded"
        );

        chain.entries.push(AuditEntry {
            sequence,
            record: record.clone(),
            prev_hash,
            this_hash,
        });
        Ok(())
    }

    fn finalize(&self, trip_id: &str) -> WayfarerResult<()> {
        let mut trips = self.lock()?;
        let Some(chain) = trips.get_mut(trip_id) else {
            return Err(WayfarerError::AuditWriteFailed {
                reason: format!("nothing recorded for trip {}", trip_id),
            });
        };

        if chain.sealed_at.is_none() {
            chain.sealed_at = Some(Utc::now());
        }
        info!(
            trip_id = %trip_id,
            entries = chain.entries.len(),
            terminal_hash = %chain.head(),
            "trip chain sealed"
        );
        Ok(())
    }
}

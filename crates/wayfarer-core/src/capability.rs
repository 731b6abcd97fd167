//! Reference implementations of the injected look-up capabilities.
//!
//! `IntentHeuristicHistory` and `PlannedOnlySpend` are placeholders: they
//! guess from today's plan instead of querying real history. Production
//! callers should inject implementations backed by their own records.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use wayfarer_contracts::{context::health::ActivityType, error::WayfarerResult};

use crate::traits::{ActivityHistory, HistoryQuery, SpendSource};

// ── Activity history ─────────────────────────────────────────────────────────

/// Treats today's intent as the only evidence: one active day unless the day
/// is a rest day, one golf day when the day is a golf day.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntentHeuristicHistory;

#[async_trait]
impl ActivityHistory for IntentHeuristicHistory {
    async fn consecutive_active_days(&self, query: &HistoryQuery<'_>) -> WayfarerResult<u32> {
        Ok(u32::from(query.todays_intent != ActivityType::Rest))
    }

    async fn consecutive_golf_days(&self, query: &HistoryQuery<'_>) -> WayfarerResult<u32> {
        Ok(u32::from(query.todays_intent == ActivityType::Golf))
    }
}

/// Fixed counts supplied by a caller that already knows the history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordedHistory {
    pub active_days: u32,
    pub golf_days: u32,
}

impl RecordedHistory {
    pub fn new(active_days: u32, golf_days: u32) -> Self {
        Self { active_days, golf_days }
    }
}

#[async_trait]
impl ActivityHistory for RecordedHistory {
    async fn consecutive_active_days(&self, _query: &HistoryQuery<'_>) -> WayfarerResult<u32> {
        Ok(self.active_days)
    }

    async fn consecutive_golf_days(&self, _query: &HistoryQuery<'_>) -> WayfarerResult<u32> {
        Ok(self.golf_days)
    }
}

// ── Spend ────────────────────────────────────────────────────────────────────

/// Reports no actual spend for any category.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlannedOnlySpend;

#[async_trait]
impl SpendSource for PlannedOnlySpend {
    async fn category_actuals(
        &self,
        _trip_id: &str,
        _as_of: NaiveDate,
        categories: &[String],
    ) -> WayfarerResult<BTreeMap<String, Decimal>> {
        Ok(categories.iter().map(|c| (c.clone(), Decimal::ZERO)).collect())
    }
}

/// Actual spend recorded by the caller, keyed by category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordedSpend {
    actuals: BTreeMap<String, Decimal>,
}

impl RecordedSpend {
    pub fn new(actuals: BTreeMap<String, Decimal>) -> Self {
        Self { actuals }
    }
}

#[async_trait]
impl SpendSource for RecordedSpend {
    async fn category_actuals(
        &self,
        trip_id: &str,
        _as_of: NaiveDate,
        categories: &[String],
    ) -> WayfarerResult<BTreeMap<String, Decimal>> {
        let found: BTreeMap<String, Decimal> = categories
            .iter()
            .filter_map(|c| self.actuals.get(c).map(|amount| (c.clone(), *amount)))
            .collect();
        debug!(
            trip_id = %trip_id,
            requested = categories.len(),
            found = found.len(),
            "recorded spend looked up"
        );
        Ok(found)
    }
}

//! Core trait definitions.
//!
//! - `Agent`: stateless, deterministic rule evaluation
//! - `ActivityHistory`: injected look-up of prior active/golf days
//! - `SpendSource`: injected look-up of actual spend per category
//! - `RecommendationSink`: external persistence for produced recommendations
//!
//! Nothing in the decision core performs I/O itself. Implementations of the
//! capability and sink traits are supplied by the caller.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use wayfarer_contracts::{
    agent::AgentKind, context::health::ActivityType, error::WayfarerResult,
    recommendation::AgentRecommendation, record::RecommendationRecord,
};

/// A stateless rule evaluator mapping a context to one recommendation.
///
/// Implementations hold no per-call state, so one instance may serve any
/// number of concurrent calls. Given the same context, `analyze` must always
/// return the same recommendation.
#[async_trait]
pub trait Agent: Send + Sync {
    /// The closed context type this agent reads.
    type Context: Send + Sync;

    fn kind(&self) -> AgentKind;

    /// Evaluate `ctx`.
    ///
    /// Fails with `MissingContext` when a required field is absent. That
    /// failure is final for this call.
    async fn analyze(&self, ctx: &Self::Context) -> WayfarerResult<AgentRecommendation>;
}

/// A look-up of the traveler's recent activity, anchored on the day being planned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryQuery<'a> {
    pub user_id: &'a str,
    pub as_of: NaiveDate,
    /// The primary intent of the day being planned.
    pub todays_intent: ActivityType,
}

/// Where the orchestrator learns how many consecutive days came before today.
#[async_trait]
pub trait ActivityHistory: Send + Sync {
    /// Consecutive days with a non-rest intent leading up to `query.as_of`.
    async fn consecutive_active_days(&self, query: &HistoryQuery<'_>) -> WayfarerResult<u32>;

    /// Consecutive days with golf as the intent leading up to `query.as_of`.
    async fn consecutive_golf_days(&self, query: &HistoryQuery<'_>) -> WayfarerResult<u32>;
}

/// Where the orchestrator learns what has actually been spent per category.
#[async_trait]
pub trait SpendSource: Send + Sync {
    /// Actual spend for each of `categories`.
    ///
    /// Categories the source knows nothing about may be omitted; the
    /// orchestrator treats an omitted category as zero actual spend.
    async fn category_actuals(
        &self,
        trip_id: &str,
        as_of: NaiveDate,
        categories: &[String],
    ) -> WayfarerResult<BTreeMap<String, Decimal>>;
}

/// External, append-only store for recommendations.
pub trait RecommendationSink: Send + Sync {
    /// Append one record. Records are never modified once written.
    fn record(&self, record: &RecommendationRecord) -> WayfarerResult<()>;

    /// Mark a trip-day as complete. Implementations may flush or seal here.
    fn finalize(&self, trip_id: &str) -> WayfarerResult<()>;
}

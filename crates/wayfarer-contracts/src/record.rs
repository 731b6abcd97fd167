//! Records handed to a recommendation sink for later review.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{agent::AgentKind, context::ContextEnvelope, recommendation::AgentRecommendation};

/// One recommendation, keyed by trip, date, and the agent that produced it.
///
/// The decision core never writes these anywhere; it only builds them for a
/// caller-supplied sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRecord {
    pub record_id: Uuid,
    pub trip_id: String,
    pub user_id: String,
    pub date: Option<NaiveDate>,
    pub agent: AgentKind,
    pub recommendation: AgentRecommendation,
    pub recorded_at: DateTime<Utc>,
}

impl RecommendationRecord {
    /// A fresh record with a random id, stamped `recorded_at`.
    pub fn new(
        envelope: &ContextEnvelope,
        agent: AgentKind,
        recommendation: AgentRecommendation,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            record_id: Uuid::new_v4(),
            trip_id: envelope.trip_id.clone(),
            user_id: envelope.user_id.clone(),
            date: envelope.date,
            agent,
            recommendation,
            recorded_at,
        }
    }
}

//! The full result of one coordinated turn.

use chrono::Utc;
use serde::Serialize;

use wayfarer_contracts::{
    agent::AgentKind,
    context::ContextEnvelope,
    recommendation::{AgentRecommendation, SpecialistReport},
    record::RecommendationRecord,
};

/// Every specialist recommendation plus the coordinated decision.
///
/// Only `decision` is acted on. The specialist recommendations are kept so
/// a sink can record why the decision came out the way it did.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExperienceReport {
    pub envelope: ContextEnvelope,
    pub specialists: SpecialistReport,
    pub decision: AgentRecommendation,
    pub deciding_agent: AgentKind,
    pub rule_id: String,
}

impl ExperienceReport {
    /// One record per specialist, then one for the orchestrator's decision.
    pub fn records(&self) -> Vec<RecommendationRecord> {
        let recorded_at = Utc::now();
        self.specialists
            .iter()
            .map(|(agent, rec)| (agent, rec.clone()))
            .chain(std::iter::once((AgentKind::TravelExperience, self.decision.clone())))
            .map(|(agent, recommendation)| {
                RecommendationRecord::new(&self.envelope, agent, recommendation, recorded_at)
            })
            .collect()
    }
}

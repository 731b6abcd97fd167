//! The travel experience agent.
//!
//! One turn runs:
//!
//!   Validate → Capabilities → Derive → Fan-out (4 specialists) → Join → Coordinate
//!
//! The fan-out is an all-or-nothing barrier. All four specialists run to
//! completion; if any of them failed, the turn fails and no decision is
//! produced from the survivors.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use wayfarer_agents::{
    BudgetControlAgent, GolfOperationsAgent, HealthRecoveryAgent, TransportLogisticsAgent,
};
use wayfarer_contracts::{
    agent::AgentKind,
    context::experience::TravelExperienceContext,
    error::{WayfarerError, WayfarerResult},
    recommendation::{AgentRecommendation, SpecialistReport},
};
use wayfarer_core::{
    require_complete, ActivityHistory, Agent, IntentHeuristicHistory, PlannedOnlySpend, SpendSource,
};
use wayfarer_policy::CoordinationPolicy;

use crate::{derive::derive, report::ExperienceReport};

/// Coordinates the four specialists for one traveler-day.
///
/// Holds no per-call state. One instance can be shared behind an `Arc` and
/// serve any number of concurrent turns.
pub struct TravelExperienceAgent {
    health: HealthRecoveryAgent,
    golf: GolfOperationsAgent,
    budget: BudgetControlAgent,
    transport: TransportLogisticsAgent,
    history: Arc<dyn ActivityHistory>,
    spend: Arc<dyn SpendSource>,
    policy: CoordinationPolicy,
}

impl Default for TravelExperienceAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl TravelExperienceAgent {
    /// An orchestrator using the placeholder capabilities: history guessed
    /// from today's intent, zero actual spend.
    pub fn new() -> Self {
        Self::with_capabilities(Arc::new(IntentHeuristicHistory), Arc::new(PlannedOnlySpend))
    }

    pub fn with_capabilities(
        history: Arc<dyn ActivityHistory>,
        spend: Arc<dyn SpendSource>,
    ) -> Self {
        Self {
            health: HealthRecoveryAgent::new(),
            golf: GolfOperationsAgent::new(),
            budget: BudgetControlAgent::new(),
            transport: TransportLogisticsAgent::new(),
            history,
            spend,
            policy: CoordinationPolicy::standard(),
        }
    }

    /// Run one turn and return every specialist recommendation alongside the
    /// coordinated decision.
    pub async fn coordinate(
        &self,
        ctx: &TravelExperienceContext,
    ) -> WayfarerResult<ExperienceReport> {
        require_complete(AgentKind::TravelExperience, ctx)?;
        let as_of = ctx.envelope.date.ok_or_else(|| WayfarerError::MissingContext {
            agent: AgentKind::TravelExperience,
            fields: vec!["date".to_string()],
        })?;

        debug!(
            trip_id = %ctx.envelope.trip_id,
            date = %as_of,
            intent = ctx.current_itinerary.primary_intent.as_str(),
            "travel experience turn starting"
        );

        // ── Derive ───────────────────────────────────────────────────────────
        let subs = derive(ctx, as_of, self.history.as_ref(), self.spend.as_ref()).await?;

        // ── Fan-out & join ───────────────────────────────────────────────────
        let (health, golf, budget, transport) = tokio::join!(
            self.health.analyze(&subs.health),
            self.golf.analyze(&subs.golf),
            self.budget.analyze(&subs.budget),
            self.transport.analyze(&subs.transport),
        );

        // Field order fixes the order failures are reported in.
        let specialists = SpecialistReport {
            health: attribute(AgentKind::HealthRecovery, health)?,
            golf: attribute(AgentKind::GolfOperations, golf)?,
            budget: attribute(AgentKind::BudgetControl, budget)?,
            transport: attribute(AgentKind::TransportLogistics, transport)?,
        };
        debug!(
            trip_id = %ctx.envelope.trip_id,
            health = %specialists.health.priority(),
            golf = %specialists.golf.priority(),
            budget = %specialists.budget.priority(),
            transport = %specialists.transport.priority(),
            "all specialists completed"
        );

        // ── Coordinate ───────────────────────────────────────────────────────
        let coordination = self.policy.decide(&specialists)?;
        info!(
            trip_id = %ctx.envelope.trip_id,
            rule_id = %coordination.rule_id,
            agent = %coordination.deciding_agent,
            priority = %coordination.recommendation.priority(),
            approval_required = coordination.recommendation.approval_required(),
            "travel experience decision"
        );

        Ok(ExperienceReport {
            envelope: ctx.envelope.clone(),
            specialists,
            decision: coordination.recommendation,
            deciding_agent: coordination.deciding_agent,
            rule_id: coordination.rule_id,
        })
    }
}

fn attribute(
    agent: AgentKind,
    result: WayfarerResult<AgentRecommendation>,
) -> WayfarerResult<AgentRecommendation> {
    result.map_err(|e| {
        warn!(agent = %agent, error = %e, "specialist failed; aborting turn");
        WayfarerError::agent_failed(agent, e)
    })
}

#[async_trait]
impl Agent for TravelExperienceAgent {
    type Context = TravelExperienceContext;

    fn kind(&self) -> AgentKind {
        AgentKind::TravelExperience
    }

    async fn analyze(&self, ctx: &TravelExperienceContext) -> WayfarerResult<AgentRecommendation> {
        Ok(self.coordinate(ctx).await?.decision)
    }
}

//! Coordination engine.
//!
//! Evaluation algorithm:
//!
//! 1. Iterate the ladder in declaration order.
//! 2. For the first rule whose condition holds, adopt that agent's
//!    recommendation and stop.
//! 3. If no rule matched, synthesize a low-priority "proceed as planned"
//!    recommendation that lists every specialist's decision.
//!
//! Scores are never blended. Exactly one agent's decision is surfaced per
//! turn; the other three are carried along only as signals.

use serde::Serialize;
use tracing::{debug, info};

use wayfarer_contracts::{
    agent::AgentKind,
    error::WayfarerResult,
    recommendation::{AgentRecommendation, InputSignals, Priority, SpecialistReport},
};

use crate::rule::{CoordinationRule, COORDINATION_LADDER, PROCEED_AS_PLANNED};

/// The outcome of one coordination pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Coordination {
    pub rule_id: String,
    /// The specialist whose decision was adopted, or
    /// `AgentKind::TravelExperience` when the plan stands.
    pub deciding_agent: AgentKind,
    pub recommendation: AgentRecommendation,
}

/// Applies the fixed coordination ladder to a specialist report.
#[derive(Debug, Clone, Copy)]
pub struct CoordinationPolicy {
    rules: &'static [CoordinationRule],
}

impl Default for CoordinationPolicy {
    fn default() -> Self {
        Self::standard()
    }
}

impl CoordinationPolicy {
    /// The health > logistics > budget > golf ladder.
    pub fn standard() -> Self {
        Self {
            rules: &COORDINATION_LADDER,
        }
    }

    pub fn rules(&self) -> &'static [CoordinationRule] {
        self.rules
    }

    pub fn decide(&self, report: &SpecialistReport) -> WayfarerResult<Coordination> {
        for rule in self.rules {
            if !rule.condition.matches(report) {
                continue;
            }

            let agent = rule.condition.agent();
            let Some(source) = report.get(agent) else {
                continue;
            };
            debug!(rule_id = rule.id, agent = %agent, "coordination rule matched");
            let recommendation = adopt(rule, agent, source, report)?;
            info!(
                rule_id = rule.id,
                agent = %agent,
                priority = %recommendation.priority(),
                "coordinated decision adopted"
            );
            return Ok(Coordination {
                rule_id: rule.id.to_string(),
                deciding_agent: agent,
                recommendation,
            });
        }

        debug!("no coordination rule matched; proceeding as planned");
        Ok(Coordination {
            rule_id: PROCEED_AS_PLANNED.to_string(),
            deciding_agent: AgentKind::TravelExperience,
            recommendation: proceed_as_planned(report)?,
        })
    }
}

fn adopt(
    rule: &CoordinationRule,
    agent: AgentKind,
    source: &AgentRecommendation,
    report: &SpecialistReport,
) -> WayfarerResult<AgentRecommendation> {
    let rationale = match rule.note {
        Some(note) => format!("{} {note}", source.rationale()),
        None => source.rationale().to_string(),
    };

    Ok(AgentRecommendation::new(
        source.decision(),
        rationale,
        source.priority(),
        source.approval_required() || rule.force_approval,
    )?
    .with_signals(source.input_signals().clone())
    .with_signals(coordination_signals(report, rule.id, agent))
    .with_actions(source.output_actions().iter().cloned()))
}

fn proceed_as_planned(report: &SpecialistReport) -> WayfarerResult<AgentRecommendation> {
    Ok(AgentRecommendation::new(
        "Proceed with planned itinerary",
        "No agent raised an issue that overrides today's plan.",
        Priority::Low,
        false,
    )?
    .with_signals(coordination_signals(
        report,
        PROCEED_AS_PLANNED,
        AgentKind::TravelExperience,
    ))
    .with_actions(
        report
            .iter()
            .map(|(agent, rec)| format!("{}: {}", agent.label(), rec.decision())),
    ))
}

/// Which rule fired, who decided, and where every specialist stood.
fn coordination_signals(
    report: &SpecialistReport,
    rule_id: &str,
    agent: AgentKind,
) -> InputSignals {
    let mut signals = InputSignals::new();
    signals.insert("coordination_rule".into(), rule_id.into());
    signals.insert("deciding_agent".into(), agent.as_str().into());
    let priorities: serde_json::Map<String, serde_json::Value> = report
        .iter()
        .map(|(kind, rec)| (kind.as_str().to_string(), rec.priority().as_str().into()))
        .collect();
    signals.insert("specialist_priorities".into(), priorities.into());
    signals
}

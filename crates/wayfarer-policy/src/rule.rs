//! Coordination rule types and the fixed ladder.
//!
//! Rules are evaluated in declaration order. The first rule whose condition
//! holds decides the turn; later rules are not evaluated. When no rule
//! matches, the engine falls back to proceeding with the plan as written.
//!
//! The ladder is compiled in. It is not loaded from configuration and cannot
//! be reordered at runtime.

use serde::Serialize;

use wayfarer_contracts::{
    agent::AgentKind,
    recommendation::{Priority, SpecialistReport},
};

/// What a rule looks at in the specialist report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case", tag = "kind")]
pub enum RuleCondition {
    /// The agent's priority is `min` or more severe.
    PriorityAtLeast { agent: AgentKind, min: Priority },
    /// The agent asked for human approval.
    ApprovalRequired { agent: AgentKind },
}

impl RuleCondition {
    /// The specialist this condition reads.
    pub fn agent(&self) -> AgentKind {
        match self {
            RuleCondition::PriorityAtLeast { agent, .. }
            | RuleCondition::ApprovalRequired { agent } => *agent,
        }
    }

    pub fn matches(&self, report: &SpecialistReport) -> bool {
        let Some(rec) = report.get(self.agent()) else {
            return false;
        };
        match self {
            RuleCondition::PriorityAtLeast { min, .. } => rec.priority() >= *min,
            RuleCondition::ApprovalRequired { .. } => rec.approval_required(),
        }
    }
}

/// One rung of the coordination ladder.
///
/// A matching rule adopts the recommendation of the agent its condition
/// reads. Decision and actions are taken verbatim; `note`, when present, is
/// appended to the rationale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CoordinationRule {
    /// Stable identifier written to the audit trail.
    pub id: &'static str,
    pub description: &'static str,
    pub condition: RuleCondition,
    pub note: Option<&'static str>,
    /// Adopt with `approval_required = true` whatever the agent said.
    pub force_approval: bool,
}

/// Rule id reported when no rung matched and the plan stands.
pub const PROCEED_AS_PLANNED: &str = "proceed-as-planned";

/// Health, then logistics, then budget, then golf.
pub const COORDINATION_LADDER: [CoordinationRule; 4] = [
    CoordinationRule {
        id: "health-first",
        description: "A high or critical health recommendation overrides everything else",
        condition: RuleCondition::PriorityAtLeast {
            agent: AgentKind::HealthRecovery,
            min: Priority::High,
        },
        note: Some("Other agent recommendations are deferred until recovery needs are met."),
        force_approval: false,
    },
    CoordinationRule {
        id: "transport-reliability",
        description: "A high or critical transport recommendation reshapes the schedule",
        condition: RuleCondition::PriorityAtLeast {
            agent: AgentKind::TransportLogistics,
            min: Priority::High,
        },
        note: Some("Schedule adjusted for transport reliability."),
        force_approval: false,
    },
    CoordinationRule {
        id: "budget-critical",
        description: "A critical budget overrun must be confirmed by the traveler",
        condition: RuleCondition::PriorityAtLeast {
            agent: AgentKind::BudgetControl,
            min: Priority::Critical,
        },
        note: Some("Spending must be reviewed before other plans proceed."),
        force_approval: true,
    },
    CoordinationRule {
        id: "golf-approval",
        description: "A golf change that needs approval is surfaced as-is",
        condition: RuleCondition::ApprovalRequired {
            agent: AgentKind::GolfOperations,
        },
        note: None,
        force_approval: false,
    },
];

//! The recommendation contract every agent produces.
//!
//! An `AgentRecommendation` can only be built through `AgentRecommendation::new`,
//! which enforces the priority/approval invariant. Deserialization goes through
//! the same check, so a stored recommendation cannot violate it either.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    agent::AgentKind,
    error::{WayfarerError, WayfarerResult},
};

/// Severity of a recommendation, strictly ordered `Low < Medium < High < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    /// High and critical recommendations always need a human to confirm.
    pub fn requires_approval(&self) -> bool {
        matches!(self, Priority::High | Priority::Critical)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Critical => "critical",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of the inputs that drove a decision.
///
/// Ordered by key so a recommendation always serializes to the same bytes.
pub type InputSignals = BTreeMap<String, serde_json::Value>;

/// The structured output of a single agent call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RecommendationParts")]
pub struct AgentRecommendation {
    /// Short imperative: the action to take.
    decision: String,

    /// Human-readable justification. Names the thresholds that fired.
    rationale: String,

    /// Inputs that drove the decision. Present even when empty.
    input_signals: InputSignals,

    /// Ordered next steps. An empty string is a section break, not noise;
    /// renderers split on it.
    output_actions: Vec<String>,

    /// A human must confirm before anything is executed. Always `true` for
    /// high and critical priority.
    approval_required: bool,

    priority: Priority,
}

impl AgentRecommendation {
    /// Build a recommendation with no signals and no actions yet.
    ///
    /// # Errors
    ///
    /// `InconsistentRecommendation` when a high or critical priority is
    /// paired with `approval_required = false`. Low and medium accept either
    /// flag.
    pub fn new(
        decision: impl Into<String>,
        rationale: impl Into<String>,
        priority: Priority,
        approval_required: bool,
    ) -> WayfarerResult<Self> {
        if priority.requires_approval() && !approval_required {
            return Err(WayfarerError::InconsistentRecommendation {
                priority,
                reason: "high and critical recommendations must require approval".to_string(),
            });
        }

        Ok(Self {
            decision: decision.into(),
            rationale: rationale.into(),
            input_signals: InputSignals::new(),
            output_actions: Vec::new(),
            approval_required,
            priority,
        })
    }

    pub fn with_signal(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.input_signals.insert(key.into(), value.into());
        self
    }

    pub fn with_signals(mut self, signals: InputSignals) -> Self {
        self.input_signals.extend(signals);
        self
    }

    /// Append one action. Empty strings are kept; they mark section breaks.
    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.output_actions.push(action.into());
        self
    }

    pub fn with_actions<I, S>(mut self, actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.output_actions.extend(actions.into_iter().map(Into::into));
        self
    }

    pub fn decision(&self) -> &str {
        &self.decision
    }

    pub fn rationale(&self) -> &str {
        &self.rationale
    }

    pub fn input_signals(&self) -> &InputSignals {
        &self.input_signals
    }

    pub fn output_actions(&self) -> &[String] {
        &self.output_actions
    }

    pub fn approval_required(&self) -> bool {
        self.approval_required
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }
}

/// Wire shape of `AgentRecommendation`, validated on the way in.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecommendationParts {
    decision: String,
    rationale: String,
    #[serde(default)]
    input_signals: InputSignals,
    #[serde(default)]
    output_actions: Vec<String>,
    approval_required: bool,
    priority: Priority,
}

impl TryFrom<RecommendationParts> for AgentRecommendation {
    type Error = WayfarerError;

    fn try_from(parts: RecommendationParts) -> Result<Self, Self::Error> {
        Ok(AgentRecommendation::new(
            parts.decision,
            parts.rationale,
            parts.priority,
            parts.approval_required,
        )?
        .with_signals(parts.input_signals)
        .with_actions(parts.output_actions))
    }
}

/// The four specialist recommendations collected in one orchestrator turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialistReport {
    pub health: AgentRecommendation,
    pub golf: AgentRecommendation,
    pub budget: AgentRecommendation,
    pub transport: AgentRecommendation,
}

impl SpecialistReport {
    /// Look up one specialist's recommendation.
    ///
    /// Returns `None` for `AgentKind::TravelExperience`, which is never a
    /// specialist.
    pub fn get(&self, agent: AgentKind) -> Option<&AgentRecommendation> {
        match agent {
            AgentKind::HealthRecovery => Some(&self.health),
            AgentKind::GolfOperations => Some(&self.golf),
            AgentKind::BudgetControl => Some(&self.budget),
            AgentKind::TransportLogistics => Some(&self.transport),
            AgentKind::TravelExperience => None,
        }
    }

    /// Iterate `(agent, recommendation)` in fixed specialist order.
    pub fn iter(&self) -> impl Iterator<Item = (AgentKind, &AgentRecommendation)> {
        [
            (AgentKind::HealthRecovery, &self.health),
            (AgentKind::GolfOperations, &self.golf),
            (AgentKind::BudgetControl, &self.budget),
            (AgentKind::TransportLogistics, &self.transport),
        ]
        .into_iter()
    }
}

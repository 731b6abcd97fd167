//! Agent identity.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which agent produced a recommendation.
///
/// Used in error attribution, coordination rules, and audit record keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AgentKind {
    HealthRecovery,
    GolfOperations,
    BudgetControl,
    TransportLogistics,
    /// The orchestrator (travel experience agent).
    TravelExperience,
}

impl AgentKind {
    /// The four specialists, in the order errors are reported after fan-out.
    pub const SPECIALISTS: [AgentKind; 4] = [
        AgentKind::HealthRecovery,
        AgentKind::GolfOperations,
        AgentKind::BudgetControl,
        AgentKind::TransportLogistics,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AgentKind::HealthRecovery => "health-recovery",
            AgentKind::GolfOperations => "golf-operations",
            AgentKind::BudgetControl => "budget-control",
            AgentKind::TransportLogistics => "transport-logistics",
            AgentKind::TravelExperience => "travel-experience",
        }
    }

    /// Short label used when summarising several agents in one line.
    pub fn label(&self) -> &'static str {
        match self {
            AgentKind::HealthRecovery => "Health",
            AgentKind::GolfOperations => "Golf",
            AgentKind::BudgetControl => "Budget",
            AgentKind::TransportLogistics => "Transport",
            AgentKind::TravelExperience => "Experience",
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

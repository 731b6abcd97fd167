//! Error types for the wayfarer decision core.
//!
//! All fallible operations return `WayfarerResult<T>`. Every variant carries
//! enough context to tell the caller which agent and which field caused it.

use thiserror::Error;

use crate::{agent::AgentKind, recommendation::Priority};

/// The unified error type for the wayfarer crates.
#[derive(Debug, Error)]
pub enum WayfarerError {
    /// A required context field was absent when an agent was invoked.
    ///
    /// Fatal to that agent call. Never retried, never defaulted.
    #[error("missing required context for agent '{agent}': {}", fields.join(", "))]
    MissingContext {
        agent: AgentKind,
        fields: Vec<String>,
    },

    /// A recommendation was constructed with a priority/approval pairing the
    /// recommendation contract forbids.
    #[error("inconsistent {priority} recommendation: {reason}")]
    InconsistentRecommendation { priority: Priority, reason: String },

    /// A specialist failed during the orchestrator's fan-out, so the whole
    /// turn failed.
    #[error("agent '{agent}' failed, turn aborted: {source}")]
    AgentFailed {
        agent: AgentKind,
        #[source]
        source: Box<WayfarerError>,
    },

    /// An injected look-up capability (activity history, spend ledger) failed.
    #[error("capability '{capability}' failed: {reason}")]
    CapabilityFailed { capability: String, reason: String },

    /// The recommendation sink could not append a record.
    #[error("audit write failed: {reason}")]
    AuditWriteFailed { reason: String },

    /// A configuration or context file is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },
}

/// Coarse classification of a `WayfarerError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Aggregation,
    Contract,
    Capability,
    Audit,
    Config,
}

impl WayfarerError {
    /// Wrap a specialist failure so it stays attributable after aggregation.
    pub fn agent_failed(agent: AgentKind, source: WayfarerError) -> Self {
        Self::AgentFailed {
            agent,
            source: Box::new(source),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingContext { .. } => ErrorKind::Validation,
            Self::InconsistentRecommendation { .. } => ErrorKind::Contract,
            Self::AgentFailed { .. } => ErrorKind::Aggregation,
            Self::CapabilityFailed { .. } => ErrorKind::Capability,
            Self::AuditWriteFailed { .. } => ErrorKind::Audit,
            Self::ConfigError { .. } => ErrorKind::Config,
        }
    }

    /// The agent this error is attributed to, if any.
    ///
    /// For `AgentFailed` this is the specialist that failed, not the
    /// orchestrator that aggregated it.
    pub fn agent(&self) -> Option<AgentKind> {
        match self {
            Self::MissingContext { agent, .. } | Self::AgentFailed { agent, .. } => Some(*agent),
            _ => None,
        }
    }
}

/// Convenience alias used throughout the wayfarer crates.
pub type WayfarerResult<T> = Result<T, WayfarerError>;

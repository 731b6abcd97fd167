//! # wayfarer-agents
//!
//! The four specialist agents. Each is a stateless, deterministic rule
//! evaluator: a decision ladder over fixed thresholds, evaluated top-down,
//! first match wins.
//!
//! | Agent | Decides |
//! |---|---|
//! | [`HealthRecoveryAgent`] | rest day, moderated load, or a proactive wellness slot |
//! | [`GolfOperationsAgent`] | skip, weather substitution, or course choice (Vietnam only) |
//! | [`BudgetControlAgent`] | overrun escalation, reallocation, unused prepaid value |
//! | [`TransportLogisticsAgent`] | buffer requirement and risk mitigation for a transfer |
//!
//! Agents never talk to each other. Coordination is the orchestrator's job.

pub mod budget;
pub mod golf;
pub mod health;
pub mod transport;

pub use budget::BudgetControlAgent;
pub use golf::GolfOperationsAgent;
pub use health::HealthRecoveryAgent;
pub use transport::TransportLogisticsAgent;

//! # wayfarer-core
//!
//! The seams of the wayfarer decision core.
//!
//! This crate provides:
//! - The `Agent` trait every specialist and the orchestrator implement
//! - The injected look-up capabilities (`ActivityHistory`, `SpendSource`)
//!   the orchestrator consults before building sub-contexts
//! - The `RecommendationSink` boundary for external persistence
//! - `require_complete`, the presence check every agent runs first

pub mod capability;
pub mod traits;
pub mod validate;

pub use capability::{IntentHeuristicHistory, PlannedOnlySpend, RecordedHistory, RecordedSpend};
pub use traits::{ActivityHistory, Agent, HistoryQuery, RecommendationSink, SpendSource};
pub use validate::require_complete;

//! # wayfarer-policy
//!
//! The coordination ladder the orchestrator applies to its four specialist
//! recommendations.
//!
//! ## Ladder
//!
//! | Rule | Adopts | When |
//! |---|---|---|
//! | `health-first` | Health | health priority is high or critical |
//! | `transport-reliability` | Transport | transport priority is high or critical |
//! | `budget-critical` | Budget (approval forced) | budget priority is critical |
//! | `golf-approval` | Golf | golf requires approval |
//! | `proceed-as-planned` | none, synthesized | nothing above matched |
//!
//! First match wins. The ladder is strict and non-numeric.

pub mod engine;
pub mod rule;

pub use engine::{Coordination, CoordinationPolicy};
pub use rule::{CoordinationRule, RuleCondition, COORDINATION_LADDER, PROCEED_AS_PLANNED};

// ── Tests ─────────────────────────────────────────────────────────────────────

//! # wayfarer-contracts
//!
//! Shared types and contracts for the wayfarer travel decision core.
//!
//! Every crate in the workspace imports from here. No business logic lives in
//! this crate, only data definitions, presence checks, and error types.

pub mod agent;
pub mod context;
pub mod error;
pub mod recommendation;
pub mod record;

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use super::*;
    use agent::AgentKind;
    use context::{
        budget::{BudgetContext, CategorySpend, TripBudget},
        golf::GolfContext,
        health::HealthContext,
        transport::TransportContext,
        ContextEnvelope, RequiredFields,
    };
    use error::{ErrorKind, WayfarerError};
    use recommendation::{AgentRecommendation, Priority};

    fn envelope() -> ContextEnvelope {
        ContextEnvelope::new("trip-1", "user-1", NaiveDate::from_ymd_opt(2026, 3, 14).unwrap())
    }

    // ── Priority ─────────────────────────────────────────────────────────────

    #[test]
    fn priority_is_strictly_ordered() {
        assert!(Priority::Low < Priority::Medium);
        assert!(Priority::Medium < Priority::High);
        assert!(Priority::High < Priority::Critical);
    }

    #[test]
    fn priority_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Priority::Critical).unwrap(), "\"critical\"");
        let decoded: Priority = serde_json::from_str("\"medium\"").unwrap();
        assert_eq!(decoded, Priority::Medium);
    }

    // ── AgentRecommendation invariant ────────────────────────────────────────

    #[test]
    fn high_without_approval_is_rejected() {
        let result = AgentRecommendation::new("Skip golf", "tired", Priority::High, false);
        match result {
            Err(WayfarerError::InconsistentRecommendation { priority, .. }) => {
                assert_eq!(priority, Priority::High);
            }
            other => panic!("expected InconsistentRecommendation, got {:?}", other),
        }
    }

    #[test]
    fn critical_without_approval_is_rejected() {
        assert!(AgentRecommendation::new("Rest", "exhausted", Priority::Critical, false).is_err());
    }

    #[test]
    fn low_and_medium_accept_either_flag() {
        for priority in [Priority::Low, Priority::Medium] {
            assert!(AgentRecommendation::new("d", "r", priority, false).is_ok());
            assert!(AgentRecommendation::new("d", "r", priority, true).is_ok());
        }
    }

    #[test]
    fn deserialization_enforces_invariant() {
        let json = r#"{
            "decision": "Cancel everything",
            "rationale": "forged",
            "inputSignals": {},
            "outputActions": [],
            "approvalRequired": false,
            "priority": "critical"
        }"#;
        let result: Result<AgentRecommendation, _> = serde_json::from_str(json);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("must require approval"), "unexpected error: {err}");
    }

    #[test]
    fn empty_actions_are_preserved_as_separators() {
        let rec = AgentRecommendation::new("d", "r", Priority::Medium, false)
            .unwrap()
            .with_actions(["first", "", "second"]);
        assert_eq!(rec.output_actions(), ["first", "", "second"]);

        let json = serde_json::to_string(&rec).unwrap();
        let back: AgentRecommendation = serde_json::from_str(&json).unwrap();
        assert_eq!(back.output_actions(), ["first", "", "second"]);
    }

    #[test]
    fn signals_serialize_in_key_order() {
        let a = AgentRecommendation::new("d", "r", Priority::Low, false)
            .unwrap()
            .with_signal("zeta", 1)
            .with_signal("alpha", 2);
        let b = AgentRecommendation::new("d", "r", Priority::Low, false)
            .unwrap()
            .with_signal("alpha", 2)
            .with_signal("zeta", 1);

        let a_json = serde_json::to_string(&a).unwrap();
        assert_eq!(a_json, serde_json::to_string(&b).unwrap());
        assert!(a_json.find("alpha").unwrap() < a_json.find("zeta").unwrap());
    }

    #[test]
    fn empty_signals_are_still_serialized() {
        let rec = AgentRecommendation::new("d", "r", Priority::Low, false).unwrap();
        let json = serde_json::to_string(&rec).unwrap();
        assert!(json.contains("\"inputSignals\":{}"));
    }

    // ── Required fields ──────────────────────────────────────────────────────

    #[test]
    fn envelope_reports_blank_identifiers() {
        let env = ContextEnvelope {
            trip_id: "  ".to_string(),
            user_id: String::new(),
            date: None,
        };
        assert_eq!(env.missing_fields(), vec!["trip_id", "user_id", "date"]);
    }

    #[test]
    fn health_requires_active_day_count() {
        let ctx = HealthContext {
            envelope: envelope(),
            ..Default::default()
        };
        assert_eq!(ctx.missing_fields(), vec!["consecutive_active_days"]);
    }

    #[test]
    fn golf_requires_location_and_day_count() {
        let ctx = GolfContext {
            envelope: envelope(),
            location: Some(" ".to_string()),
            ..Default::default()
        };
        assert_eq!(ctx.missing_fields(), vec!["location", "consecutive_golf_days"]);
    }

    #[test]
    fn budget_requires_budget_and_spend() {
        let ctx = BudgetContext {
            envelope: envelope(),
            ..Default::default()
        };
        assert_eq!(ctx.missing_fields(), vec!["budget", "category_spend"]);
    }

    #[test]
    fn transport_requires_current_location_only() {
        let ctx = TransportContext {
            envelope: envelope(),
            current_location: Some("Hanoi".to_string()),
            ..Default::default()
        };
        assert!(ctx.missing_fields().is_empty());
    }

    // ── CategorySpend ────────────────────────────────────────────────────────

    #[test]
    fn variance_ratio_guards_zero_plan() {
        let spend = CategorySpend::new(Decimal::ZERO, Decimal::new(250, 0));
        assert_eq!(spend.variance(), Decimal::new(250, 0));
        assert_eq!(spend.variance_ratio(), Decimal::ZERO);
    }

    #[test]
    fn variance_ratio_is_exact() {
        let spend = CategorySpend::new(Decimal::new(5000, 0), Decimal::new(5500, 0));
        assert_eq!(spend.variance_ratio(), Decimal::new(10, 2));
    }

    #[test]
    fn variance_ratio_saturates_instead_of_overflowing() {
        let tiny_plan = Decimal::new(1, 4);
        let huge = Decimal::from_i128_with_scale(10_i128.pow(25), 0);
        assert_eq!(CategorySpend::new(tiny_plan, huge).variance_ratio(), Decimal::MAX);
        assert_eq!(CategorySpend::new(Decimal::MAX, Decimal::MIN).variance(), Decimal::MIN);
    }

    #[test]
    fn remaining_saturates() {
        let budget = TripBudget {
            total: Decimal::MIN,
            spent: Decimal::MAX,
            categories: Default::default(),
        };
        assert_eq!(budget.remaining(), Decimal::MIN);
    }

    // ── Errors ───────────────────────────────────────────────────────────────

    #[test]
    fn missing_context_names_agent_and_fields() {
        let err = WayfarerError::MissingContext {
            agent: AgentKind::GolfOperations,
            fields: vec!["location".to_string(), "consecutive_golf_days".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("golf-operations"));
        assert!(msg.contains("location, consecutive_golf_days"));
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn agent_failed_keeps_specialist_attribution() {
        let inner = WayfarerError::MissingContext {
            agent: AgentKind::BudgetControl,
            fields: vec!["budget".to_string()],
        };
        let err = WayfarerError::agent_failed(AgentKind::BudgetControl, inner);
        assert_eq!(err.kind(), ErrorKind::Aggregation);
        assert_eq!(err.agent(), Some(AgentKind::BudgetControl));
        let msg = err.to_string();
        assert!(msg.contains("budget-control"));
        assert!(msg.contains("budget"));
    }

    #[test]
    fn config_error_display() {
        let err = WayfarerError::ConfigError {
            reason: "missing context file".to_string(),
        };
        assert!(err.to_string().contains("configuration error"));
        assert_eq!(err.kind(), ErrorKind::Config);
    }
}

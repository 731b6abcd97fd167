//! # wayfarer-experience
//!
//! The travel experience orchestrator.
//!
//! [`TravelExperienceAgent`] takes one `TravelExperienceContext`, asks its
//! injected capabilities for the traveler's recent history and actual spend,
//! derives a closed context per specialist, runs all four specialists
//! concurrently, and applies the fixed coordination ladder from
//! `wayfarer-policy` to produce a single decision.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use wayfarer_core::{RecordedHistory, RecordedSpend};
//! use wayfarer_experience::TravelExperienceAgent;
//!
//! let txa = TravelExperienceAgent::with_capabilities(
//!     Arc::new(RecordedHistory::new(4, 1)),
//!     Arc::new(RecordedSpend::new(actuals)),
//! );
//! let report = txa.coordinate(&ctx).await?;
//! for record in report.records() {
//!     sink.record(&record)?;
//! }
//! ```

pub mod derive;
pub mod orchestrator;
pub mod report;

pub use derive::{planned_activity, SubContexts};
pub use orchestrator::TravelExperienceAgent;
pub use report::ExperienceReport;

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Arc;

    use async_trait::async_trait;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use wayfarer_contracts::{
        agent::AgentKind,
        context::{
            budget::TripBudget,
            experience::{
                BudgetStatus, DailyItinerary, TravelExperienceContext, TravelerFeedback, Trip,
            },
            golf::{CourseClimate, CourseDifficulty, GolfCourse},
            health::{ActivityType, MobilityLevel, WellnessProfile},
            transport::{TransferLeg, TransportType},
            ContextEnvelope,
        },
        error::{ErrorKind, WayfarerError, WayfarerResult},
        recommendation::Priority,
    };
    use wayfarer_core::{
        ActivityHistory, Agent, HistoryQuery, PlannedOnlySpend, RecordedHistory, RecordedSpend,
    };

    use super::*;

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
    }

    fn context(
        location: &str,
        intent: ActivityType,
        sleep: u8,
        energy: u8,
    ) -> TravelExperienceContext {
        let mut categories = BTreeMap::new();
        categories.insert("golf".to_string(), Decimal::new(5000, 0));
        categories.insert("dining".to_string(), Decimal::new(3000, 0));
        categories.insert("transport".to_string(), Decimal::new(1500, 0));

        TravelExperienceContext {
            envelope: ContextEnvelope::new("trip-1", "user-1", day()),
            trip: Trip {
                trip_id: "trip-1".to_string(),
                name: "Central Vietnam golf week".to_string(),
                travelers: vec!["user-1".to_string()],
                start_date: NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2026, 3, 20).unwrap(),
                budget: TripBudget {
                    total: Decimal::new(12000, 0),
                    spent: Decimal::new(4000, 0),
                    categories,
                },
            },
            current_itinerary: DailyItinerary {
                date: day(),
                location: location.to_string(),
                primary_intent: intent,
                blocks: Vec::new(),
                transfers: Vec::new(),
                available_courses: vec![
                    GolfCourse {
                        name: "BRG Da Nang Golf Resort".to_string(),
                        travel_time_minutes: 20,
                        difficulty: CourseDifficulty::Intermediate,
                        climate: CourseClimate::Coastal,
                    },
                    GolfCourse {
                        name: "Ba Na Hills Golf Club".to_string(),
                        travel_time_minutes: 40,
                        difficulty: CourseDifficulty::Championship,
                        climate: CourseClimate::Mountain,
                    },
                ],
            },
            traveler_feedback: TravelerFeedback {
                sleep_quality: Some(sleep),
                energy_rating: Some(energy),
                notes: None,
            },
            weather: None,
            wellness_profile: None,
            budget_status: BudgetStatus::default(),
        }
    }

    fn recorded(
        active_days: u32,
        golf_days: u32,
        actuals: &[(&str, i64)],
    ) -> TravelExperienceAgent {
        let actuals = actuals
            .iter()
            .map(|(name, amount)| (name.to_string(), Decimal::new(*amount, 0)))
            .collect();
        TravelExperienceAgent::with_capabilities(
            Arc::new(RecordedHistory::new(active_days, golf_days)),
            Arc::new(RecordedSpend::new(actuals)),
        )
    }

    struct BrokenHistory;

    #[async_trait]
    impl ActivityHistory for BrokenHistory {
        async fn consecutive_active_days(&self, _query: &HistoryQuery<'_>) -> WayfarerResult<u32> {
            Err(WayfarerError::CapabilityFailed {
                capability: "activity-history".to_string(),
                reason: "history store unreachable".to_string(),
            })
        }

        async fn consecutive_golf_days(&self, _query: &HistoryQuery<'_>) -> WayfarerResult<u32> {
            Ok(0)
        }
    }

    // ── Derivation ────────────────────────────────────────────────────────────

    #[test]
    fn planned_activity_by_intent() {
        let golf = planned_activity(ActivityType::Golf);
        assert_eq!(golf.estimated_steps, 10_000);
        assert_eq!(planned_activity(ActivityType::Culture).estimated_steps, 6_000);
        assert_eq!(planned_activity(ActivityType::Rest).estimated_steps, 3_000);
        assert_eq!(planned_activity(ActivityType::Leisure).estimated_steps, 3_000);
    }

    #[tokio::test]
    async fn derive_zips_planned_categories_with_actuals() {
        let ctx = context("Hanoi", ActivityType::Leisure, 5, 5);
        let mut actuals = BTreeMap::new();
        actuals.insert("golf".to_string(), Decimal::new(6200, 0));
        let history = RecordedHistory::new(2, 0);
        let spend = RecordedSpend::new(actuals);
        let subs = derive::derive(&ctx, day(), &history, &spend).await.unwrap();

        let spend = subs.budget.category_spend.unwrap();
        assert_eq!(spend.len(), 3);
        assert_eq!(spend["golf"].actual, Decimal::new(6200, 0));
        assert_eq!(spend["dining"].actual, Decimal::ZERO);
        assert_eq!(subs.health.consecutive_active_days, Some(2));
        assert_eq!(subs.transport.next_destination, None);
        assert_eq!(subs.transport.planned_segments, Some(0));
    }

    #[tokio::test]
    async fn derive_takes_first_transfer_and_mobility_notes() {
        let mut ctx = context("Hoi An", ActivityType::Transit, 5, 5);
        ctx.wellness_profile = Some(WellnessProfile {
            mobility_level: MobilityLevel::Limited,
            ..Default::default()
        });
        ctx.current_itinerary.transfers = vec![
            TransferLeg {
                destination: "Da Nang Airport".to_string(),
                transport_type: TransportType::PrivateCar,
                departure_time: Some("06:15".to_string()),
                arrival_time: Some("07:00".to_string()),
                luggage_count: 4,
                notes: vec!["needs step-free access".to_string()],
            },
            TransferLeg {
                destination: "Hanoi".to_string(),
                transport_type: TransportType::Flight,
                departure_time: Some("09:30".to_string()),
                arrival_time: Some("10:50".to_string()),
                luggage_count: 4,
                notes: Vec::new(),
            },
        ];
        let subs = derive::derive(&ctx, day(), &RecordedHistory::default(), &PlannedOnlySpend)
            .await
            .unwrap();

        let transport = subs.transport;
        assert_eq!(transport.next_destination.as_deref(), Some("Da Nang Airport"));
        assert_eq!(transport.transport_type, Some(TransportType::PrivateCar));
        assert_eq!(transport.luggage_count, 4);
        assert_eq!(transport.planned_segments, Some(2));
        assert_eq!(
            transport.mobility_considerations,
            vec!["limited mobility".to_string(), "needs step-free access".to_string()]
        );
    }

    // ── Scenarios ─────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn health_critical_overrides_golf_and_budget() {
        let mut ctx = context("Da Nang, Vietnam", ActivityType::Golf, 2, 3);
        ctx.current_itinerary.transfers.push(TransferLeg {
            destination: "Ba Na Hills Golf Club".to_string(),
            transport_type: TransportType::PrivateCar,
            departure_time: Some("05:30".to_string()),
            arrival_time: None,
            luggage_count: 5,
            notes: Vec::new(),
        });
        let txa = recorded(4, 2, &[("golf", 6200)]);

        let report = txa.coordinate(&ctx).await.unwrap();
        assert_eq!(report.specialists.golf.priority(), Priority::High);
        assert_eq!(report.specialists.budget.priority(), Priority::Critical);
        assert_eq!(report.specialists.transport.priority(), Priority::Medium);
        assert_eq!(report.deciding_agent, AgentKind::HealthRecovery);
        assert_eq!(report.decision.decision(), report.specialists.health.decision());
        assert_eq!(report.decision.priority(), Priority::Critical);
        assert!(report.decision.approval_required());
    }

    #[tokio::test]
    async fn critical_budget_decides_when_health_is_fine() {
        let ctx = context("Bangkok, Thailand", ActivityType::Leisure, 5, 5);
        let report = recorded(1, 0, &[("golf", 6200)]).coordinate(&ctx).await.unwrap();
        assert_eq!(report.rule_id, "budget-critical");
        assert_eq!(report.decision.decision(), "Critical budget overrun: golf");
        assert!(report.decision.approval_required());
    }

    #[tokio::test]
    async fn golf_skip_surfaces_when_nothing_outranks_it() {
        let ctx = context("Da Nang, Vietnam", ActivityType::Culture, 5, 5);
        let report = recorded(1, 2, &[]).coordinate(&ctx).await.unwrap();
        assert_eq!(report.specialists.health.priority(), Priority::Low);
        assert_eq!(report.rule_id, "golf-approval");
        assert_eq!(report.decision.decision(), "Skip golf today");
        assert_eq!(report.decision.priority(), Priority::High);
    }

    #[tokio::test]
    async fn quiet_day_proceeds_as_planned() {
        let ctx = context("Bangkok, Thailand", ActivityType::Leisure, 5, 5);
        let txa = TravelExperienceAgent::new();
        let report = txa.coordinate(&ctx).await.unwrap();

        for (_, rec) in report.specialists.iter() {
            assert_eq!(rec.priority(), Priority::Low);
        }
        assert!(!report.specialists.golf.approval_required());
        assert_eq!(report.decision.decision(), "Proceed with planned itinerary");
        assert_eq!(report.decision.priority(), Priority::Low);
        assert!(!report.decision.approval_required());

        let actions = report.decision.output_actions();
        assert_eq!(actions.len(), 4);
        for (agent, rec) in report.specialists.iter() {
            assert!(actions.contains(&format!("{}: {}", agent.label(), rec.decision())));
        }
    }

    #[tokio::test]
    async fn placeholder_history_moderates_a_golf_day() {
        // 10,000 estimated steps on a golf day is over the default 8,000 target.
        let ctx = context("Hanoi", ActivityType::Golf, 5, 5);
        let report = TravelExperienceAgent::new().coordinate(&ctx).await.unwrap();
        assert_eq!(report.decision.decision(), "Moderate today's activity");
        assert_eq!(report.rule_id, "health-first");
    }

    // ── Determinism & records ─────────────────────────────────────────────────

    #[tokio::test]
    async fn analyze_is_byte_identical_across_calls() {
        let ctx = context("Da Nang, Vietnam", ActivityType::Golf, 3, 4);
        let txa = recorded(3, 1, &[("dining", 3350)]);
        let first = serde_json::to_string(&txa.analyze(&ctx).await.unwrap()).unwrap();
        let second = serde_json::to_string(&txa.analyze(&ctx).await.unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn records_cover_every_agent() {
        let ctx = context("Hanoi", ActivityType::Culture, 4, 4);
        let report = TravelExperienceAgent::new().coordinate(&ctx).await.unwrap();
        let records = report.records();
        let agents: Vec<AgentKind> = records.iter().map(|r| r.agent).collect();
        assert_eq!(
            agents,
            [
                AgentKind::HealthRecovery,
                AgentKind::GolfOperations,
                AgentKind::BudgetControl,
                AgentKind::TransportLogistics,
                AgentKind::TravelExperience,
            ]
        );
        assert!(records.iter().all(|r| r.trip_id == "trip-1" && r.date == Some(day())));
        assert_eq!(records[4].recommendation, report.decision);
    }

    // ── Failures ──────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn specialist_failure_fails_the_whole_turn() {
        let mut ctx = context("Hanoi", ActivityType::Leisure, 5, 5);
        ctx.current_itinerary.location = "  ".to_string();
        let err = TravelExperienceAgent::new().coordinate(&ctx).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Aggregation);
        // Golf and transport both lack a location; golf is reported first.
        assert_eq!(err.agent(), Some(AgentKind::GolfOperations));
        assert!(err.to_string().contains("location"));
        match err {
            WayfarerError::AgentFailed { source, .. } => {
                assert_eq!(source.kind(), ErrorKind::Validation);
            }
            other => panic!("expected AgentFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn missing_envelope_fails_before_fan_out() {
        let mut ctx = context("Hanoi", ActivityType::Leisure, 5, 5);
        ctx.envelope.user_id.clear();
        let err = TravelExperienceAgent::new().analyze(&ctx).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.agent(), Some(AgentKind::TravelExperience));
    }

    #[tokio::test]
    async fn capability_failure_fails_the_turn() {
        let ctx = context("Hanoi", ActivityType::Leisure, 5, 5);
        let history: Arc<dyn ActivityHistory> = Arc::new(BrokenHistory);
        let txa = TravelExperienceAgent::with_capabilities(history, Arc::new(PlannedOnlySpend));
        let err = txa.coordinate(&ctx).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Capability);
        assert!(err.to_string().contains("history store unreachable"));
    }

    // ── Concurrency ───────────────────────────────────────────────────────────

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn one_instance_serves_concurrent_turns() {
        let txa = Arc::new(TravelExperienceAgent::new());
        let cases = [
            ("Hanoi", ActivityType::Golf, 5u8),
            ("Bangkok", ActivityType::Leisure, 5),
            ("Da Nang", ActivityType::Culture, 1),
            ("Tokyo", ActivityType::Rest, 3),
        ];

        let mut handles = Vec::new();
        for _ in 0..4 {
            for (location, intent, sleep) in cases {
                let txa = Arc::clone(&txa);
                let ctx = context(location, intent, sleep, 4);
                handles.push(tokio::spawn(async move {
                    let decision = txa.analyze(&ctx).await.unwrap();
                    (location, decision)
                }));
            }
        }

        let mut seen: BTreeMap<&str, String> = BTreeMap::new();
        for handle in handles {
            let (location, decision) = handle.await.unwrap();
            let json = serde_json::to_string(&decision).unwrap();
            let first = seen.entry(location).or_insert_with(|| json.clone());
            assert_eq!(*first, json, "decision for {location} changed between concurrent turns");
        }
        assert_eq!(seen.len(), 4);
    }
}

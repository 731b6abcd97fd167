//! Health & recovery agent.
//!
//! Ladder, first match wins:
//!
//! 1. Full rest day: sleep < 3, energy < 2, or 5+ consecutive active days
//! 2. Moderate activity: planned activity over the step target or too heavy
//!    for current energy or streak
//! 3. Proactive wellness: 3+ active days, or sleep or energy at exactly 3
//! 4. No intervention

use async_trait::async_trait;
use tracing::{debug, warn};

use wayfarer_contracts::{
    agent::AgentKind,
    context::health::{
        ActivityType, HealthContext, MobilityLevel, PhysicalLoad, DEFAULT_STEPS_TARGET,
    },
    error::WayfarerResult,
    recommendation::{AgentRecommendation, InputSignals, Priority},
};
use wayfarer_core::{require_complete, Agent};

const REST_SLEEP_BELOW: u8 = 3;
const REST_ENERGY_BELOW: u8 = 2;
const REST_ACTIVE_DAYS: u32 = 5;
const HIGH_LOAD_ENERGY_BELOW: u8 = 4;
const STREAK_ACTIVE_DAYS: u32 = 3;
const WATCH_RATING: u8 = 3;

/// Evaluates sleep, energy, and activity streak for fatigue risk.
#[derive(Debug, Clone, Copy, Default)]
pub struct HealthRecoveryAgent;

impl HealthRecoveryAgent {
    pub fn new() -> Self {
        Self
    }

    /// Synchronous form of [`Agent::analyze`].
    pub fn evaluate(&self, ctx: &HealthContext) -> WayfarerResult<AgentRecommendation> {
        require_complete(AgentKind::HealthRecovery, ctx)?;

        let days = ctx.consecutive_active_days.unwrap_or_default();
        let sleep = ctx.sleep_quality;
        let energy = ctx.energy_rating;
        let steps_target = ctx
            .wellness_profile
            .as_ref()
            .map_or(DEFAULT_STEPS_TARGET, |p| p.steps_target);
        let signals = signals(ctx, steps_target);

        // ── 1. Full rest day ─────────────────────────────────────────────────
        let mut rest_triggers = Vec::new();
        if let Some(s) = sleep.filter(|s| *s < REST_SLEEP_BELOW) {
            rest_triggers.push(format!("sleep quality {s}/5 is below {REST_SLEEP_BELOW}"));
        }
        if let Some(e) = energy.filter(|e| *e < REST_ENERGY_BELOW) {
            rest_triggers.push(format!("energy {e}/5 is below {REST_ENERGY_BELOW}"));
        }
        if days >= REST_ACTIVE_DAYS {
            rest_triggers.push(format!(
                "{days} consecutive active days reaches the {REST_ACTIVE_DAYS}-day limit"
            ));
        }

        if !rest_triggers.is_empty() {
            warn!(
                trip_id = %ctx.envelope.trip_id,
                triggers = rest_triggers.len(),
                "forcing full rest day"
            );
            return Ok(AgentRecommendation::new(
                "Force full rest day",
                format!("Full rest required: {}.", rest_triggers.join("; ")),
                Priority::Critical,
                true,
            )?
            .with_signals(signals)
            .with_actions([
                "Cancel all scheduled activities for today",
                "Book a spa or massage session",
                "Allow a late wake-up with no morning commitments",
                "Keep movement to light pool or lounge time only",
                "Schedule an early dinner and an early bedtime",
            ]));
        }

        // ── 2. Moderate activity ─────────────────────────────────────────────
        if let Some(activity) = &ctx.planned_activity {
            let high_load = activity.physical_load == PhysicalLoad::High;
            let mut triggers = Vec::new();
            if activity.estimated_steps > steps_target {
                triggers.push(format!(
                    "planned {} steps exceeds the {} step target",
                    activity.estimated_steps, steps_target
                ));
            }
            if let Some(e) = energy.filter(|e| high_load && *e < HIGH_LOAD_ENERGY_BELOW) {
                triggers.push(format!("high physical load with energy at {e}/5"));
            }
            if high_load && days >= STREAK_ACTIVE_DAYS {
                triggers.push(format!("high physical load after {days} consecutive active days"));
            }

            if !triggers.is_empty() {
                debug!(trip_id = %ctx.envelope.trip_id, "moderating planned activity");
                let mut rec = AgentRecommendation::new(
                    "Moderate today's activity",
                    format!(
                        "Planned {} activity is too demanding: {}.",
                        activity.activity_type.as_str(),
                        triggers.join("; ")
                    ),
                    Priority::High,
                    true,
                )?
                .with_signals(signals)
                .with_actions([
                    format!("Keep walking under {steps_target} steps"),
                    "Use a private car for anything beyond a short walk".to_string(),
                    "Add a midday rest break".to_string(),
                ]);
                if activity.activity_type == ActivityType::Culture {
                    rec = rec.with_actions([
                        "",
                        "Prefer seated, climate-controlled venues over walking tours",
                    ]);
                }
                return Ok(rec);
            }
        }

        // ── 3. Proactive wellness ────────────────────────────────────────────
        let mut watch = Vec::new();
        if days >= STREAK_ACTIVE_DAYS {
            watch.push(format!("{days} consecutive active days"));
        }
        if energy == Some(WATCH_RATING) {
            watch.push(format!("energy at {WATCH_RATING}/5"));
        }
        if sleep == Some(WATCH_RATING) {
            watch.push(format!("sleep quality at {WATCH_RATING}/5"));
        }

        if !watch.is_empty() {
            debug!(trip_id = %ctx.envelope.trip_id, "inserting proactive wellness block");
            return Ok(AgentRecommendation::new(
                "Insert proactive wellness activity",
                format!("Early fatigue signs: {}.", watch.join("; ")),
                Priority::Medium,
                false,
            )?
            .with_signals(signals)
            .with_actions([
                "Reserve a 60-90 minute spa slot",
                "Block the afternoon for pool time or relaxation",
                "Keep the evening free of commitments",
                "Plan a light dinner",
                "Protect an 8-hour sleep window tonight",
            ]));
        }

        // ── 4. No intervention ───────────────────────────────────────────────
        Ok(AgentRecommendation::new(
            "No health intervention needed",
            format!(
                "Recovery indicators are within normal range after {days} consecutive active days."
            ),
            Priority::Low,
            false,
        )?
        .with_signals(signals))
    }
}

fn signals(ctx: &HealthContext, steps_target: u32) -> InputSignals {
    let mut signals = InputSignals::new();
    signals.insert("sleep_quality".into(), ctx.sleep_quality.into());
    signals.insert("energy_rating".into(), ctx.energy_rating.into());
    signals.insert("consecutive_active_days".into(), ctx.consecutive_active_days.into());
    signals.insert("steps_target".into(), steps_target.into());
    let mobility = ctx
        .wellness_profile
        .as_ref()
        .map_or(MobilityLevel::Full, |p| p.mobility_level);
    signals.insert("mobility_level".into(), mobility.as_str().into());
    if let Some(activity) = &ctx.planned_activity {
        signals.insert("activity_type".into(), activity.activity_type.as_str().into());
        signals.insert("physical_load".into(), activity.physical_load.as_str().into());
        signals.insert("estimated_steps".into(), activity.estimated_steps.into());
    }
    signals
}

#[async_trait]
impl Agent for HealthRecoveryAgent {
    type Context = HealthContext;

    fn kind(&self) -> AgentKind {
        AgentKind::HealthRecovery
    }

    async fn analyze(&self, ctx: &HealthContext) -> WayfarerResult<AgentRecommendation> {
        self.evaluate(ctx)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use wayfarer_contracts::{
        context::{
            health::{PlannedActivity, WellnessProfile},
            ContextEnvelope,
        },
        error::WayfarerError,
    };

    use super::*;

    fn ctx(sleep: Option<u8>, energy: Option<u8>, days: u32) -> HealthContext {
        HealthContext {
            envelope: ContextEnvelope::new(
                "trip-1",
                "user-1",
                NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
            ),
            sleep_quality: sleep,
            energy_rating: energy,
            consecutive_active_days: Some(days),
            planned_activity: None,
            wellness_profile: None,
        }
    }

    fn activity(kind: ActivityType, load: PhysicalLoad, steps: u32) -> Option<PlannedActivity> {
        Some(PlannedActivity {
            activity_type: kind,
            physical_load: load,
            estimated_steps: steps,
        })
    }

    // ── Branch 1 ─────────────────────────────────────────────────────────────

    #[test]
    fn poor_sleep_forces_rest_day() {
        let rec = HealthRecoveryAgent.evaluate(&ctx(Some(2), Some(3), 4)).unwrap();
        assert_eq!(rec.decision(), "Force full rest day");
        assert_eq!(rec.priority(), Priority::Critical);
        assert!(rec.approval_required());
        assert!(rec.rationale().contains("sleep quality 2/5"));
        assert!(rec.output_actions().iter().any(|a| a.contains("Cancel all")));
    }

    #[test]
    fn exhausted_energy_forces_rest_day() {
        let rec = HealthRecoveryAgent.evaluate(&ctx(Some(4), Some(1), 0)).unwrap();
        assert_eq!(rec.priority(), Priority::Critical);
        assert!(rec.rationale().contains("energy 1/5"));
    }

    #[test]
    fn five_active_days_forces_rest_day() {
        let rec = HealthRecoveryAgent.evaluate(&ctx(None, None, 5)).unwrap();
        assert_eq!(rec.priority(), Priority::Critical);
        assert!(rec.rationale().contains("5 consecutive active days"));
    }

    #[test]
    fn missing_ratings_do_not_trigger_rest() {
        let rec = HealthRecoveryAgent.evaluate(&ctx(None, None, 0)).unwrap();
        assert_eq!(rec.priority(), Priority::Low);
        assert!(rec.output_actions().is_empty());
    }

    // ── Branch 2 ─────────────────────────────────────────────────────────────

    #[test]
    fn steps_over_target_moderates() {
        let mut c = ctx(Some(4), Some(4), 1);
        c.planned_activity = activity(ActivityType::Leisure, PhysicalLoad::Medium, 9000);
        let rec = HealthRecoveryAgent.evaluate(&c).unwrap();
        assert_eq!(rec.decision(), "Moderate today's activity");
        assert_eq!(rec.priority(), Priority::High);
        assert!(rec.approval_required());
        assert!(rec.rationale().contains("9000 steps"));
    }

    #[test]
    fn custom_steps_target_is_respected() {
        let mut c = ctx(Some(4), Some(4), 1);
        c.planned_activity = activity(ActivityType::Leisure, PhysicalLoad::Medium, 9000);
        c.wellness_profile = Some(WellnessProfile {
            steps_target: 12000,
            ..Default::default()
        });
        let rec = HealthRecoveryAgent.evaluate(&c).unwrap();
        assert_eq!(rec.priority(), Priority::Low);
        assert_eq!(rec.input_signals()["steps_target"], 12000);
    }

    #[test]
    fn high_load_with_modest_energy_moderates() {
        let mut c = ctx(Some(4), Some(3), 0);
        c.planned_activity = activity(ActivityType::Golf, PhysicalLoad::High, 5000);
        let rec = HealthRecoveryAgent.evaluate(&c).unwrap();
        assert_eq!(rec.priority(), Priority::High);
        assert!(rec.rationale().contains("energy at 3/5"));
    }

    #[test]
    fn high_load_after_streak_moderates() {
        let mut c = ctx(Some(5), Some(5), 3);
        c.planned_activity = activity(ActivityType::Golf, PhysicalLoad::High, 5000);
        let rec = HealthRecoveryAgent.evaluate(&c).unwrap();
        assert_eq!(rec.priority(), Priority::High);
        assert!(rec.rationale().contains("3 consecutive active days"));
    }

    #[test]
    fn cultural_activity_gets_seated_venues_after_separator() {
        let mut c = ctx(Some(4), Some(4), 0);
        c.planned_activity = activity(ActivityType::Culture, PhysicalLoad::Medium, 10000);
        let rec = HealthRecoveryAgent.evaluate(&c).unwrap();
        let actions = rec.output_actions();
        let sep = actions.iter().position(|a| a.is_empty()).expect("separator present");
        assert!(actions[sep + 1].contains("climate-controlled"));
    }

    // ── Branch 3 ─────────────────────────────────────────────────────────────

    #[test]
    fn streak_without_planned_activity_inserts_wellness() {
        let rec = HealthRecoveryAgent.evaluate(&ctx(Some(4), Some(4), 3)).unwrap();
        assert_eq!(rec.decision(), "Insert proactive wellness activity");
        assert_eq!(rec.priority(), Priority::Medium);
        assert!(!rec.approval_required());
        assert!(rec.output_actions().iter().any(|a| a.contains("8-hour sleep")));
    }

    #[test]
    fn middling_sleep_inserts_wellness() {
        let rec = HealthRecoveryAgent.evaluate(&ctx(Some(3), Some(5), 0)).unwrap();
        assert_eq!(rec.priority(), Priority::Medium);
        assert!(rec.rationale().contains("sleep quality at 3/5"));
    }

    // ── Branch 4 & validation ────────────────────────────────────────────────

    #[test]
    fn healthy_traveler_needs_nothing() {
        let mut c = ctx(Some(5), Some(5), 1);
        c.planned_activity = activity(ActivityType::Culture, PhysicalLoad::Medium, 6000);
        let rec = HealthRecoveryAgent.evaluate(&c).unwrap();
        assert_eq!(rec.decision(), "No health intervention needed");
        assert_eq!(rec.priority(), Priority::Low);
        assert!(!rec.approval_required());
    }

    #[test]
    fn missing_active_days_is_a_validation_error() {
        let mut c = ctx(Some(5), Some(5), 0);
        c.consecutive_active_days = None;
        match HealthRecoveryAgent.evaluate(&c) {
            Err(WayfarerError::MissingContext { agent, fields }) => {
                assert_eq!(agent, AgentKind::HealthRecovery);
                assert_eq!(fields, vec!["consecutive_active_days"]);
            }
            other => panic!("expected MissingContext, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn analyze_matches_evaluate() {
        let c = ctx(Some(2), Some(3), 4);
        let via_trait = HealthRecoveryAgent.analyze(&c).await.unwrap();
        assert_eq!(via_trait, HealthRecoveryAgent.evaluate(&c).unwrap());
    }
}

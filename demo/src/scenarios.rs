//! Built-in demonstration scenarios.
//!
//! Scenarios 1-4 call one specialist directly; scenario 5 runs a full
//! orchestrator turn. Each returns the records it produced so the caller can
//! push them into a sink.

use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;

use wayfarer_agents::{
    BudgetControlAgent, GolfOperationsAgent, HealthRecoveryAgent, TransportLogisticsAgent,
};
use wayfarer_contracts::{
    agent::AgentKind,
    context::{
        budget::{BudgetContext, CategorySpend, TripBudget},
        experience::{BudgetStatus, DailyItinerary, TravelExperienceContext, TravelerFeedback, Trip},
        golf::{CourseClimate, CourseDifficulty, GolfContext, GolfCourse, WeatherForecast},
        health::{ActivityType, HealthContext},
        transport::{TransportContext, TransportType},
        ContextEnvelope,
    },
    error::WayfarerResult,
    recommendation::AgentRecommendation,
    record::RecommendationRecord,
};
use wayfarer_core::Agent;
use wayfarer_experience::TravelExperienceAgent;

/// What one scenario produced.
pub struct ScenarioOutcome {
    pub title: &'static str,
    pub decision: AgentRecommendation,
    pub records: Vec<RecommendationRecord>,
}

pub const SCENARIO_COUNT: u8 = 5;

pub async fn run(number: u8) -> WayfarerResult<ScenarioOutcome> {
    match number {
        1 => {
            let decision = HealthRecoveryAgent.analyze(&exhausted()).await?;
            single("Exhausted traveler", AgentKind::HealthRecovery, decision)
        }
        2 => {
            let decision = GolfOperationsAgent.analyze(&hot_day()).await?;
            single("Hot day in Da Nang", AgentKind::GolfOperations, decision)
        }
        3 => {
            let decision = BudgetControlAgent.analyze(&golf_overrun()).await?;
            single("Golf spend overrun", AgentKind::BudgetControl, decision)
        }
        4 => {
            let decision = TransportLogisticsAgent.analyze(&heavy_luggage()).await?;
            single("Heavy luggage transfer", AgentKind::TransportLogistics, decision)
        }
        _ => quiet_day().await,
    }
}

fn single(
    title: &'static str,
    agent: AgentKind,
    decision: AgentRecommendation,
) -> WayfarerResult<ScenarioOutcome> {
    let record = RecommendationRecord::new(&envelope(), agent, decision.clone(), Utc::now());
    Ok(ScenarioOutcome {
        title,
        decision,
        records: vec![record],
    })
}

async fn quiet_day() -> WayfarerResult<ScenarioOutcome> {
    let report = TravelExperienceAgent::new().coordinate(&quiet_day_context()).await?;
    Ok(ScenarioOutcome {
        title: "Quiet day, proceed as planned",
        records: report.records(),
        decision: report.decision,
    })
}

// ── Contexts ──────────────────────────────────────────────────────────────────

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 14).unwrap_or_default()
}

fn envelope() -> ContextEnvelope {
    ContextEnvelope::new("trip-demo", "traveler-01", day())
}

fn exhausted() -> HealthContext {
    HealthContext {
        envelope: envelope(),
        sleep_quality: Some(2),
        energy_rating: Some(3),
        consecutive_active_days: Some(4),
        ..Default::default()
    }
}

fn course(name: &str, minutes: u32, climate: CourseClimate) -> GolfCourse {
    GolfCourse {
        name: name.to_string(),
        travel_time_minutes: minutes,
        difficulty: CourseDifficulty::Championship,
        climate,
    }
}

fn hot_day() -> GolfContext {
    GolfContext {
        envelope: envelope(),
        location: Some("Da Nang, Vietnam".to_string()),
        energy_level: Some(4),
        consecutive_golf_days: Some(0),
        weather_forecast: Some(WeatherForecast {
            condition: "hot and humid".to_string(),
            temperature: 34.0,
            humidity: 82.0,
            rainfall: None,
        }),
        available_courses: vec![
            course("BRG Da Nang Golf Resort", 20, CourseClimate::Coastal),
            course("Ba Na Hills Golf Club", 40, CourseClimate::Mountain),
        ],
    }
}

fn golf_overrun() -> BudgetContext {
    let spend: BTreeMap<String, CategorySpend> = [
        ("golf", 5000, 6200),
        ("dining", 2500, 1800),
        ("wellness", 800, 300),
    ]
    .into_iter()
    .map(|(name, planned, actual)| {
        let spend = CategorySpend::new(Decimal::new(planned, 0), Decimal::new(actual, 0));
        (name.to_string(), spend)
    })
    .collect();
    BudgetContext {
        envelope: envelope(),
        budget: Some(TripBudget {
            total: Decimal::new(14000, 0),
            spent: Decimal::new(8300, 0),
            categories: spend.iter().map(|(k, v)| (k.clone(), v.planned)).collect(),
        }),
        category_spend: Some(spend),
        ..Default::default()
    }
}

fn heavy_luggage() -> TransportContext {
    TransportContext {
        envelope: envelope(),
        current_location: Some("Hoi An".to_string()),
        next_destination: Some("Da Nang Airport".to_string()),
        transport_type: Some(TransportType::PrivateCar),
        departure_time: Some("09:00".to_string()),
        arrival_time: Some("09:45".to_string()),
        luggage_count: 4,
        mobility_considerations: Vec::new(),
        planned_segments: Some(1),
    }
}

fn quiet_day_context() -> TravelExperienceContext {
    let mut categories = BTreeMap::new();
    categories.insert("dining".to_string(), Decimal::new(2500, 0));
    categories.insert("lodging".to_string(), Decimal::new(4500, 0));
    TravelExperienceContext {
        envelope: envelope(),
        trip: Trip {
            trip_id: "trip-demo".to_string(),
            name: "Bangkok long weekend".to_string(),
            travelers: vec!["traveler-01".to_string()],
            start_date: day(),
            end_date: day(),
            budget: TripBudget {
                total: Decimal::new(7000, 0),
                spent: Decimal::new(2000, 0),
                categories,
            },
        },
        current_itinerary: DailyItinerary {
            date: day(),
            location: "Bangkok, Thailand".to_string(),
            primary_intent: ActivityType::Leisure,
            blocks: Vec::new(),
            transfers: Vec::new(),
            available_courses: Vec::new(),
        },
        traveler_feedback: TravelerFeedback {
            sleep_quality: Some(5),
            energy_rating: Some(5),
            notes: None,
        },
        weather: None,
        wellness_profile: None,
        budget_status: BudgetStatus::default(),
    }
}

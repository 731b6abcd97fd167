//! Building each specialist's closed context from the orchestrator's context.
//!
//! The two history-dependent inputs (consecutive active and golf days) and
//! the per-category actual spend come from injected capabilities. Everything
//! else is read straight off the day's itinerary, feedback, and trip.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use wayfarer_contracts::{
    context::{
        budget::{BudgetContext, CategorySpend},
        experience::TravelExperienceContext,
        golf::GolfContext,
        health::{ActivityType, HealthContext, MobilityLevel, PhysicalLoad, PlannedActivity},
        transport::TransportContext,
    },
    error::{WayfarerError, WayfarerResult},
};
use wayfarer_core::{ActivityHistory, HistoryQuery, SpendSource};

/// The four contexts handed to the specialists in one turn.
#[derive(Debug, Clone, PartialEq)]
pub struct SubContexts {
    pub health: HealthContext,
    pub golf: GolfContext,
    pub budget: BudgetContext,
    pub transport: TransportContext,
}

/// Physical load and step estimate for a day built around `intent`.
pub fn planned_activity(intent: ActivityType) -> PlannedActivity {
    let (physical_load, estimated_steps) = match intent {
        ActivityType::Golf => (PhysicalLoad::High, 10_000),
        ActivityType::Culture => (PhysicalLoad::Medium, 6_000),
        _ => (PhysicalLoad::Low, 3_000),
    };
    PlannedActivity {
        activity_type: intent,
        physical_load,
        estimated_steps,
    }
}

/// Query the capabilities and build every sub-context.
///
/// Only the first transfer of the day feeds the transport context; the
/// number of transfers becomes its segment count.
///
/// # Errors
///
/// `CapabilityFailed` naming `activity-history` or `spend-source` when a
/// look-up fails. No specialist has run at that point.
pub async fn derive(
    ctx: &TravelExperienceContext,
    as_of: NaiveDate,
    history: &dyn ActivityHistory,
    spend: &dyn SpendSource,
) -> WayfarerResult<SubContexts> {
    let itinerary = &ctx.current_itinerary;
    let feedback = &ctx.traveler_feedback;
    let query = HistoryQuery {
        user_id: &ctx.envelope.user_id,
        as_of,
        todays_intent: itinerary.primary_intent,
    };

    let active_days = history
        .consecutive_active_days(&query)
        .await
        .map_err(|e| capability_failed("activity-history", e))?;
    let golf_days = history
        .consecutive_golf_days(&query)
        .await
        .map_err(|e| capability_failed("activity-history", e))?;

    let categories: Vec<String> = ctx.trip.budget.categories.keys().cloned().collect();
    let actuals = spend
        .category_actuals(&ctx.envelope.trip_id, as_of, &categories)
        .await
        .map_err(|e| capability_failed("spend-source", e))?;
    let category_spend: BTreeMap<String, CategorySpend> = ctx
        .trip
        .budget
        .categories
        .iter()
        .map(|(name, planned)| {
            let actual = actuals.get(name).copied().unwrap_or(Decimal::ZERO);
            (name.clone(), CategorySpend::new(*planned, actual))
        })
        .collect();

    debug!(
        trip_id = %ctx.envelope.trip_id,
        active_days,
        golf_days,
        categories = category_spend.len(),
        transfers = itinerary.transfers.len(),
        "sub-contexts derived"
    );

    let health = HealthContext {
        envelope: ctx.envelope.clone(),
        sleep_quality: feedback.sleep_quality,
        energy_rating: feedback.energy_rating,
        consecutive_active_days: Some(active_days),
        planned_activity: Some(planned_activity(itinerary.primary_intent)),
        wellness_profile: ctx.wellness_profile.clone(),
    };

    let golf = GolfContext {
        envelope: ctx.envelope.clone(),
        location: Some(itinerary.location.clone()),
        energy_level: feedback.energy_rating,
        consecutive_golf_days: Some(golf_days),
        weather_forecast: ctx.weather.clone(),
        available_courses: itinerary.available_courses.clone(),
    };

    let budget = BudgetContext {
        envelope: ctx.envelope.clone(),
        budget: Some(ctx.trip.budget.clone()),
        category_spend: Some(category_spend),
        upcoming_expenses: ctx.budget_status.upcoming_expenses.clone(),
        unused_prepaid: ctx.budget_status.unused_prepaid.clone(),
    };

    let transfer = itinerary.transfers.first();
    let mut mobility_considerations = Vec::new();
    if let Some(level) = ctx
        .wellness_profile
        .as_ref()
        .map(|p| p.mobility_level)
        .filter(|level| *level != MobilityLevel::Full)
    {
        mobility_considerations.push(format!("{} mobility", level.as_str()));
    }
    if let Some(leg) = transfer {
        mobility_considerations.extend(leg.notes.iter().cloned());
    }

    let transport = TransportContext {
        envelope: ctx.envelope.clone(),
        current_location: Some(itinerary.location.clone()),
        next_destination: transfer.map(|leg| leg.destination.clone()),
        transport_type: transfer.map(|leg| leg.transport_type),
        departure_time: transfer.and_then(|leg| leg.departure_time.clone()),
        arrival_time: transfer.and_then(|leg| leg.arrival_time.clone()),
        luggage_count: transfer.map_or(0, |leg| leg.luggage_count),
        mobility_considerations,
        planned_segments: Some(u32::try_from(itinerary.transfers.len()).unwrap_or(u32::MAX)),
    };

    Ok(SubContexts {
        health,
        golf,
        budget,
        transport,
    })
}

fn capability_failed(capability: &str, err: WayfarerError) -> WayfarerError {
    match err {
        WayfarerError::CapabilityFailed { .. } => err,
        other => WayfarerError::CapabilityFailed {
            capability: capability.to_string(),
            reason: other.to_string(),
        },
    }
}

//! The orchestrator's context and the externally owned entities it carries.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{
    budget::{PrepaidItem, TripBudget, UpcomingExpense},
    golf::{GolfCourse, WeatherForecast},
    health::{ActivityType, WellnessProfile},
    transport::TransferLeg,
    ContextEnvelope, RequiredFields,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    pub trip_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub travelers: Vec<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub budget: TripBudget,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleBlock {
    pub start: String,
    pub end: String,
    pub title: String,
    pub activity_type: ActivityType,
}

/// One day of the trip as currently planned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyItinerary {
    pub date: NaiveDate,
    pub location: String,
    pub primary_intent: ActivityType,
    #[serde(default)]
    pub blocks: Vec<ScheduleBlock>,
    /// Transfers scheduled for the day, in departure order.
    #[serde(default)]
    pub transfers: Vec<TransferLeg>,
    #[serde(default)]
    pub available_courses: Vec<GolfCourse>,
}

/// What the traveler reported this morning.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TravelerFeedback {
    /// 1-5.
    #[serde(default)]
    pub sleep_quality: Option<u8>,
    /// 1-5.
    #[serde(default)]
    pub energy_rating: Option<u8>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Budget information that is not part of the plan itself.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BudgetStatus {
    #[serde(default)]
    pub upcoming_expenses: Vec<UpcomingExpense>,
    #[serde(default)]
    pub unused_prepaid: Vec<PrepaidItem>,
}

/// Everything the orchestrator needs for one day's decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelExperienceContext {
    pub envelope: ContextEnvelope,
    pub trip: Trip,
    pub current_itinerary: DailyItinerary,
    #[serde(default)]
    pub traveler_feedback: TravelerFeedback,
    #[serde(default)]
    pub weather: Option<WeatherForecast>,
    #[serde(default)]
    pub wellness_profile: Option<WellnessProfile>,
    #[serde(default)]
    pub budget_status: BudgetStatus,
}

impl RequiredFields for TravelExperienceContext {
    fn missing_fields(&self) -> Vec<&'static str> {
        self.envelope.missing_fields()
    }
}

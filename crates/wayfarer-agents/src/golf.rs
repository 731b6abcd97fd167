//! Golf operations agent.
//!
//! Only operates in the Vietnam golf region. Everywhere else it returns a
//! low-priority no-op. Within the region:
//!
//! 1. Skip golf: back-to-back rounds, or low energy after yesterday's round
//! 2. Weather substitute: heavy rain, extreme heat, or hot and humid
//! 3. Course choice: preferred repeat course, else by travel time

use async_trait::async_trait;
use tracing::debug;

use wayfarer_contracts::{
    agent::AgentKind,
    context::golf::{CourseClimate, GolfContext, GolfCourse, WeatherForecast},
    error::WayfarerResult,
    recommendation::{AgentRecommendation, InputSignals, Priority},
};
use wayfarer_core::{require_complete, Agent};

/// Lowercase location substrings that place a day inside the golf region.
const GOLF_REGION_CITIES: [&str; 5] = ["hanoi", "da nang", "hoi an", "ho chi minh", "saigon"];

/// Courses travelers ask to play again. Checked before travel time.
const PREFERRED_COURSES: [&str; 2] = ["Ba Na Hills Golf Club", "Montgomerie Links Vietnam"];

const MAX_GOLF_DAYS: u32 = 2;
const LOW_ENERGY_BELOW: u8 = 4;
const HEAVY_RAIN_MM: f64 = 10.0;

// Heat rules, all strict: above 35°C, or above 32°C with humidity above 80%.
// A 34°C day at 78% humidity meets neither and keeps its tee time.
const EXTREME_HEAT_C: f64 = 35.0;
const HOT_C: f64 = 32.0;
const HUMID_PCT: f64 = 80.0;

/// Plans the day's golf around fatigue, weather, and course logistics.
#[derive(Debug, Clone, Copy, Default)]
pub struct GolfOperationsAgent;

impl GolfOperationsAgent {
    pub fn new() -> Self {
        Self
    }

    /// True when `location` names a city in the supported golf region.
    pub fn in_golf_region(location: &str) -> bool {
        let location = location.to_lowercase();
        GOLF_REGION_CITIES.iter().any(|city| location.contains(city))
    }

    /// Synchronous form of [`Agent::analyze`].
    pub fn evaluate(&self, ctx: &GolfContext) -> WayfarerResult<AgentRecommendation> {
        require_complete(AgentKind::GolfOperations, ctx)?;

        let location = ctx.location.as_deref().unwrap_or_default();
        let golf_days = ctx.consecutive_golf_days.unwrap_or_default();
        let energy = ctx.energy_level;
        let signals = signals(ctx, location);

        if !Self::in_golf_region(location) {
            debug!(location = %location, "outside golf region, no golf operations");
            return Ok(AgentRecommendation::new(
                "No golf operations for this location",
                format!(
                    "Golf operations cover Hanoi, Da Nang, Hoi An and Ho Chi Minh City; \
                     '{location}' is outside that region."
                ),
                Priority::Low,
                false,
            )?
            .with_signals(signals));
        }

        // ── 1. Skip golf ─────────────────────────────────────────────────────
        let low_energy = energy.is_some_and(|e| e < LOW_ENERGY_BELOW);
        if golf_days >= MAX_GOLF_DAYS || (golf_days >= 1 && low_energy) {
            let rationale = if golf_days >= MAX_GOLF_DAYS {
                format!("Fatigue from back-to-back rounds: {golf_days} consecutive golf days.")
            } else {
                format!(
                    "Energy too low after yesterday's round: energy {}/5 after {golf_days} \
                     consecutive golf day.",
                    energy.unwrap_or_default()
                )
            };
            debug!(golf_days, "skipping golf");
            return Ok(AgentRecommendation::new("Skip golf today", rationale, Priority::High, true)?
                .with_signals(signals)
                .with_actions([
                    "Release today's tee time",
                    "Replace the round with a recovery activity such as spa or pool time",
                    "Offer a rebooking slot later in the trip",
                ]));
        }

        // ── 2. Weather substitution ──────────────────────────────────────────
        if let Some(weather) = &ctx.weather_forecast {
            if let Some(rec) = weather_substitution(weather, &ctx.available_courses, &signals)? {
                return Ok(rec);
            }
        }

        // ── 3. Course choice ─────────────────────────────────────────────────
        let Some((course, reason)) = choose_course(&ctx.available_courses, low_energy) else {
            return Ok(AgentRecommendation::new(
                "Insufficient course data",
                format!(
                    "No available courses are listed for {location}; no course can be recommended."
                ),
                Priority::Low,
                false,
            )?
            .with_signals(signals));
        };

        debug!(course = %course.name, reason, "recommending course");
        Ok(AgentRecommendation::new(
            format!("Play {}", course.name),
            format!("{} is the best fit today: {reason}.", course.name),
            Priority::Medium,
            false,
        )?
        .with_signals(signals)
        .with_actions([
            format!("Course: {}", course.name),
            "Book a tee time before 10:00".to_string(),
            "Confirm caddie and cart".to_string(),
            format!("Travel time: {} minutes", course.travel_time_minutes),
        ]))
    }
}

/// Weather branch. `Ok(None)` when the forecast is playable.
fn weather_substitution(
    weather: &WeatherForecast,
    courses: &[GolfCourse],
    signals: &InputSignals,
) -> WayfarerResult<Option<AgentRecommendation>> {
    if let Some(rain) = weather.rainfall.filter(|r| *r > HEAVY_RAIN_MM) {
        debug!(rainfall = rain, "heavy rain, converting golf day");
        let rec = AgentRecommendation::new(
            "Convert golf day to spa and culture",
            format!("Heavy rain forecast: {rain}mm expected, above the {HEAVY_RAIN_MM}mm limit."),
            Priority::High,
            true,
        )?
        .with_signals(signals.clone())
        .with_actions([
            "Cancel today's tee time and request a rain credit",
            "Book a spa session or an indoor cultural visit instead",
            "Reschedule the round for the next dry day",
        ]);
        return Ok(Some(rec));
    }

    let extreme = weather.temperature > EXTREME_HEAT_C;
    let humid_heat = weather.temperature > HOT_C && weather.humidity > HUMID_PCT;
    if !(extreme || humid_heat) {
        return Ok(None);
    }

    let rationale = if extreme {
        format!("Heat risk: {}°C forecast, above {EXTREME_HEAT_C}°C.", weather.temperature)
    } else {
        format!(
            "Heat risk: {}°C with {}% humidity, above {HOT_C}°C and {HUMID_PCT}% together.",
            weather.temperature, weather.humidity
        )
    };

    let rec = match courses.iter().find(|c| c.climate == CourseClimate::Mountain) {
        Some(course) => AgentRecommendation::new(
            format!("Switch to {} for cooler mountain conditions", course.name),
            rationale,
            Priority::High,
            true,
        )?
        .with_signals(signals.clone())
        .with_actions([
            format!("Move the round to {}", course.name),
            "Book the earliest available tee time".to_string(),
            "Add a hydration break every three holes".to_string(),
            format!("Travel time: {} minutes", course.travel_time_minutes),
        ]),
        None => AgentRecommendation::new(
            "Move tee time earlier to avoid the heat",
            rationale,
            Priority::High,
            true,
        )?
        .with_signals(signals.clone())
        .with_actions([
            "Rebook the tee time before 07:30",
            "Add a hydration break every three holes",
        ]),
    };
    debug!(temperature = weather.temperature, humidity = weather.humidity, "heat substitution");
    Ok(Some(rec))
}

/// Preferred repeat course first; otherwise shortest travel when energy is
/// low, else the first listed course.
fn choose_course(courses: &[GolfCourse], low_energy: bool) -> Option<(&GolfCourse, &'static str)> {
    if let Some(course) = courses
        .iter()
        .find(|c| PREFERRED_COURSES.iter().any(|p| p.eq_ignore_ascii_case(&c.name)))
    {
        return Some((course, "a preferred course to play again"));
    }
    if low_energy {
        return courses
            .iter()
            .min_by_key(|c| c.travel_time_minutes)
            .map(|c| (c, "shortest travel time while energy is low"));
    }
    courses.first().map(|c| (c, "first available course"))
}

fn signals(ctx: &GolfContext, location: &str) -> InputSignals {
    let mut signals = InputSignals::new();
    signals.insert("location".into(), location.into());
    signals.insert("in_golf_region".into(), GolfOperationsAgent::in_golf_region(location).into());
    signals.insert("energy_level".into(), ctx.energy_level.into());
    signals.insert("consecutive_golf_days".into(), ctx.consecutive_golf_days.into());
    signals.insert("available_courses".into(), ctx.available_courses.len().into());
    if let Some(weather) = &ctx.weather_forecast {
        signals.insert("weather_condition".into(), weather.condition.as_str().into());
        signals.insert("temperature".into(), weather.temperature.into());
        signals.insert("humidity".into(), weather.humidity.into());
        signals.insert("rainfall".into(), weather.rainfall.into());
    }
    signals
}

#[async_trait]
impl Agent for GolfOperationsAgent {
    type Context = GolfContext;

    fn kind(&self) -> AgentKind {
        AgentKind::GolfOperations
    }

    async fn analyze(&self, ctx: &GolfContext) -> WayfarerResult<AgentRecommendation> {
        self.evaluate(ctx)
    }
}

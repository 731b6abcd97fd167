//! Golf operations inputs: location, fatigue, weather, and candidate courses.

use serde::{Deserialize, Serialize};

use super::{is_blank, ContextEnvelope, RequiredFields};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourseDifficulty {
    Beginner,
    Intermediate,
    Advanced,
    Championship,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourseClimate {
    Mountain,
    Coastal,
    Tropical,
    Temperate,
}

/// A bookable course, as described by the external course catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GolfCourse {
    pub name: String,
    pub travel_time_minutes: u32,
    pub difficulty: CourseDifficulty,
    pub climate: CourseClimate,
}

/// Forecast for the day. Temperature in °C, humidity in %, rainfall in mm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherForecast {
    pub condition: String,
    pub temperature: f64,
    pub humidity: f64,
    #[serde(default)]
    pub rainfall: Option<f64>,
}

/// Input to the golf operations agent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GolfContext {
    pub envelope: ContextEnvelope,
    /// Required.
    #[serde(default)]
    pub location: Option<String>,
    /// Self-reported energy, 1-5.
    #[serde(default)]
    pub energy_level: Option<u8>,
    /// Required.
    #[serde(default)]
    pub consecutive_golf_days: Option<u32>,
    #[serde(default)]
    pub weather_forecast: Option<WeatherForecast>,
    #[serde(default)]
    pub available_courses: Vec<GolfCourse>,
}

impl RequiredFields for GolfContext {
    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = self.envelope.missing_fields();
        if is_blank(&self.location) {
            missing.push("location");
        }
        if self.consecutive_golf_days.is_none() {
            missing.push("consecutive_golf_days");
        }
        missing
    }
}

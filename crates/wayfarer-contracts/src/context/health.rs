//! Health & recovery inputs and the wellness profile they read from.

use serde::{Deserialize, Serialize};

use super::{ContextEnvelope, RequiredFields};

/// Default daily step target when no wellness profile is supplied.
pub const DEFAULT_STEPS_TARGET: u32 = 8000;

/// What kind of activity a day or schedule block is built around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    Golf,
    Culture,
    Wellness,
    Leisure,
    Transit,
    Rest,
}

impl ActivityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::Golf => "golf",
            ActivityType::Culture => "culture",
            ActivityType::Wellness => "wellness",
            ActivityType::Leisure => "leisure",
            ActivityType::Transit => "transit",
            ActivityType::Rest => "rest",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhysicalLoad {
    Low,
    Medium,
    High,
}

impl PhysicalLoad {
    pub fn as_str(&self) -> &'static str {
        match self {
            PhysicalLoad::Low => "low",
            PhysicalLoad::Medium => "medium",
            PhysicalLoad::High => "high",
        }
    }
}

/// The activity planned for the day being evaluated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedActivity {
    pub activity_type: ActivityType,
    pub physical_load: PhysicalLoad,
    pub estimated_steps: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnergyLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MobilityLevel {
    #[default]
    Full,
    Limited,
    Assisted,
}

impl MobilityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            MobilityLevel::Full => "full",
            MobilityLevel::Limited => "limited",
            MobilityLevel::Assisted => "assisted",
        }
    }
}

fn default_steps_target() -> u32 {
    DEFAULT_STEPS_TARGET
}

/// Traveler wellness constraints supplied by an external wellness source.
///
/// The decision core reads only `steps_target` and `mobility_level`; the
/// remaining fields pass through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellnessProfile {
    #[serde(default)]
    pub sleep_quality: Option<u8>,
    #[serde(default)]
    pub energy_level: Option<EnergyLevel>,
    #[serde(default = "default_steps_target")]
    pub steps_target: u32,
    #[serde(default)]
    pub mobility_level: MobilityLevel,
    #[serde(default)]
    pub dietary_restrictions: Vec<String>,
    #[serde(default)]
    pub medical_conditions: Vec<String>,
}

impl Default for WellnessProfile {
    fn default() -> Self {
        Self {
            sleep_quality: None,
            energy_level: None,
            steps_target: DEFAULT_STEPS_TARGET,
            mobility_level: MobilityLevel::Full,
            dietary_restrictions: Vec::new(),
            medical_conditions: Vec::new(),
        }
    }
}

/// Input to the health & recovery agent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HealthContext {
    pub envelope: ContextEnvelope,
    /// Self-reported sleep quality, 1-5.
    #[serde(default)]
    pub sleep_quality: Option<u8>,
    /// Self-reported energy, 1-5.
    #[serde(default)]
    pub energy_rating: Option<u8>,
    /// Required.
    #[serde(default)]
    pub consecutive_active_days: Option<u32>,
    #[serde(default)]
    pub planned_activity: Option<PlannedActivity>,
    #[serde(default)]
    pub wellness_profile: Option<WellnessProfile>,
}

impl RequiredFields for HealthContext {
    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = self.envelope.missing_fields();
        if self.consecutive_active_days.is_none() {
            missing.push("consecutive_active_days");
        }
        missing
    }
}

//! Transport & logistics inputs.

use serde::{Deserialize, Serialize};

use super::{is_blank, ContextEnvelope, RequiredFields};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportType {
    Flight,
    Train,
    PrivateCar,
    Taxi,
}

impl TransportType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportType::Flight => "flight",
            TransportType::Train => "train",
            TransportType::PrivateCar => "private_car",
            TransportType::Taxi => "taxi",
        }
    }
}

/// One scheduled transfer on a day's itinerary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferLeg {
    pub destination: String,
    pub transport_type: TransportType,
    #[serde(default)]
    pub departure_time: Option<String>,
    #[serde(default)]
    pub arrival_time: Option<String>,
    #[serde(default)]
    pub luggage_count: u32,
    /// Accessibility notes specific to this leg.
    #[serde(default)]
    pub notes: Vec<String>,
}

/// Input to the transport & logistics agent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TransportContext {
    pub envelope: ContextEnvelope,
    /// Required.
    #[serde(default)]
    pub current_location: Option<String>,
    #[serde(default)]
    pub next_destination: Option<String>,
    #[serde(default)]
    pub transport_type: Option<TransportType>,
    /// `HH:MM`, `HH:MM:SS`, or an ISO date-time.
    #[serde(default)]
    pub departure_time: Option<String>,
    #[serde(default)]
    pub arrival_time: Option<String>,
    #[serde(default)]
    pub luggage_count: u32,
    #[serde(default)]
    pub mobility_considerations: Vec<String>,
    /// Transport segments scheduled for the same day.
    #[serde(default)]
    pub planned_segments: Option<u32>,
}

impl RequiredFields for TransportContext {
    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = self.envelope.missing_fields();
        if is_blank(&self.current_location) {
            missing.push("current_location");
        }
        missing
    }
}

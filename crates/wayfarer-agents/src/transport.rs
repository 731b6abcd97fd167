//! Transport & logistics agent.
//!
//! Works out the buffer a transfer needs and which risks apply to it.
//!
//! The buffer is reported but never judged insufficient: this agent has no
//! view of when the preceding activity ends, so adequacy cannot be checked
//! here. `buffer_verified` in the signals is always `false` to make that
//! visible to whoever reads the audit trail.

use async_trait::async_trait;
use chrono::{NaiveDateTime, NaiveTime, Timelike};
use tracing::debug;

use wayfarer_contracts::{
    agent::AgentKind,
    context::transport::{TransportContext, TransportType},
    error::WayfarerResult,
    recommendation::{AgentRecommendation, InputSignals, Priority},
};
use wayfarer_core::{require_complete, Agent};

/// Lowercase country names used to tell international from domestic flights.
const KNOWN_COUNTRIES: [&str; 3] = ["vietnam", "japan", "korea"];

const INTERNATIONAL_FLIGHT_BUFFER_MIN: u32 = 120;
const DOMESTIC_FLIGHT_BUFFER_MIN: u32 = 90;
const GOLF_TRANSFER_BUFFER_MIN: u32 = 45;
const STANDARD_BUFFER_MIN: u32 = 15;

const HEAVY_LUGGAGE_OVER: u32 = 3;
const MAX_SEGMENTS: u32 = 2;
const EARLY_DEPARTURE_HOUR: u32 = 7;

/// A risk found on a transfer. Each maps to its own block of mitigations.
#[derive(Debug, Clone, PartialEq, Eq)]
enum TransportRisk {
    HeavyLuggage(u32),
    Mobility(Vec<String>),
    ManySegments(u32),
    EarlyDeparture(u32),
}

impl TransportRisk {
    fn describe(&self) -> String {
        match self {
            TransportRisk::HeavyLuggage(n) => {
                format!("{n} pieces of heavy luggage may slow movement")
            }
            TransportRisk::Mobility(notes) => {
                format!("mobility considerations: {}", notes.join(", "))
            }
            TransportRisk::ManySegments(n) => {
                format!("{n} transport segments in one day raise fatigue and delay risk")
            }
            TransportRisk::EarlyDeparture(h) => {
                let cutoff = EARLY_DEPARTURE_HOUR;
                format!("departure before {cutoff}:00 (hour {h}) puts sleep quality at risk")
            }
        }
    }

    fn mitigations(&self) -> Vec<String> {
        match self {
            TransportRisk::HeavyLuggage(_) => vec![
                "Arrange a porter at both ends of the transfer".to_string(),
                "Consider shipping extra bags ahead to the next hotel".to_string(),
            ],
            TransportRisk::Mobility(_) => vec![
                "Pre-book wheelchair assistance".to_string(),
                "Request priority boarding".to_string(),
            ],
            TransportRisk::ManySegments(_) => vec![
                "Schedule rest periods between segments".to_string(),
                "Consider an overnight break to split the journey".to_string(),
            ],
            TransportRisk::EarlyDeparture(_) => vec![
                "Protect a full sleep window by going to bed early".to_string(),
                "Pack the night before".to_string(),
                "Arrange express checkout".to_string(),
            ],
        }
    }
}

/// Plans buffers and risk mitigation for the day's transfer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransportLogisticsAgent;

impl TransportLogisticsAgent {
    pub fn new() -> Self {
        Self
    }

    /// Minimum idle time before departure, in minutes.
    ///
    /// | Transfer | Buffer |
    /// |---|---|
    /// | flight between two different known countries | 120 |
    /// | any other flight | 90 |
    /// | private car to a golf course | 45 |
    /// | everything else | 15 |
    ///
    /// An endpoint naming no known country makes a flight domestic.
    pub fn required_buffer_minutes(
        transport_type: Option<TransportType>,
        from: &str,
        to: &str,
    ) -> u32 {
        match transport_type {
            Some(TransportType::Flight) if is_international(from, to) => {
                INTERNATIONAL_FLIGHT_BUFFER_MIN
            }
            Some(TransportType::Flight) => DOMESTIC_FLIGHT_BUFFER_MIN,
            Some(TransportType::PrivateCar) if is_golf_destination(to) => GOLF_TRANSFER_BUFFER_MIN,
            _ => STANDARD_BUFFER_MIN,
        }
    }

    /// Synchronous form of [`Agent::analyze`].
    pub fn evaluate(&self, ctx: &TransportContext) -> WayfarerResult<AgentRecommendation> {
        require_complete(AgentKind::TransportLogistics, ctx)?;

        let from = ctx.current_location.as_deref().unwrap_or_default();
        let Some(to) = ctx.next_destination.as_deref().filter(|d| !d.trim().is_empty()) else {
            debug!(trip_id = %ctx.envelope.trip_id, "no transfer scheduled");
            return Ok(AgentRecommendation::new(
                "No transport scheduled",
                format!("No onward destination from {from} today."),
                Priority::Low,
                false,
            )?
            .with_signal("current_location", from));
        };

        let buffer = Self::required_buffer_minutes(ctx.transport_type, from, to);
        let mode = ctx.transport_type.map_or("unspecified", |t| t.as_str());
        let departure_hour = ctx.departure_time.as_deref().and_then(parse_hour);

        let mut signals = InputSignals::new();
        signals.insert("current_location".into(), from.into());
        signals.insert("next_destination".into(), to.into());
        signals.insert("transport_type".into(), mode.into());
        signals.insert("required_buffer_minutes".into(), buffer.into());
        signals.insert("buffer_verified".into(), false.into());
        signals.insert("international".into(), is_international(from, to).into());
        signals.insert("luggage_count".into(), ctx.luggage_count.into());
        signals.insert(
            "mobility_considerations".into(),
            ctx.mobility_considerations.clone().into(),
        );
        signals.insert("planned_segments".into(), ctx.planned_segments.into());
        signals.insert("departure_hour".into(), departure_hour.into());

        let risks = identify_risks(ctx, departure_hour);

        if !risks.is_empty() {
            debug!(trip_id = %ctx.envelope.trip_id, risks = risks.len(), "transport risks found");
            let mut rec = AgentRecommendation::new(
                format!("Mitigate transport risks for {from} to {to}"),
                format!(
                    "Required buffer is {buffer} minutes. Risks: {}.",
                    risks.iter().map(TransportRisk::describe).collect::<Vec<_>>().join("; ")
                ),
                Priority::Medium,
                false,
            )?
            .with_signals(signals)
            .with_action(format!("Keep a {buffer}-minute buffer before departure"));
            for risk in &risks {
                rec = rec.with_action("").with_actions(risk.mitigations());
            }
            return Ok(rec);
        }

        debug!(trip_id = %ctx.envelope.trip_id, "transfer plan confirmed");
        Ok(AgentRecommendation::new(
            format!("Confirm {mode} from {from} to {to}"),
            format!("No transport risks identified; a {buffer}-minute buffer applies."),
            Priority::Low,
            false,
        )?
        .with_signals(signals)
        .with_actions([
            format!("Route: {from} to {to}"),
            format!("Type: {mode}"),
            format!("Departure: {}", ctx.departure_time.as_deref().unwrap_or("not set")),
            format!("Arrival: {}", ctx.arrival_time.as_deref().unwrap_or("not set")),
            format!("Buffer: {buffer} minutes"),
        ]))
    }
}

fn identify_risks(ctx: &TransportContext, departure_hour: Option<u32>) -> Vec<TransportRisk> {
    let mut risks = Vec::new();
    if ctx.luggage_count > HEAVY_LUGGAGE_OVER {
        risks.push(TransportRisk::HeavyLuggage(ctx.luggage_count));
    }
    if !ctx.mobility_considerations.is_empty() {
        risks.push(TransportRisk::Mobility(ctx.mobility_considerations.clone()));
    }
    if let Some(segments) = ctx.planned_segments.filter(|s| *s > MAX_SEGMENTS) {
        risks.push(TransportRisk::ManySegments(segments));
    }
    if let Some(hour) = departure_hour.filter(|h| *h < EARLY_DEPARTURE_HOUR) {
        risks.push(TransportRisk::EarlyDeparture(hour));
    }
    risks
}

fn country_of(location: &str) -> Option<&'static str> {
    let location = location.to_lowercase();
    KNOWN_COUNTRIES.iter().copied().find(|c| location.contains(c))
}

/// Both ends name a known country and the countries differ.
fn is_international(from: &str, to: &str) -> bool {
    matches!((country_of(from), country_of(to)), (Some(a), Some(b)) if a != b)
}

fn is_golf_destination(to: &str) -> bool {
    let to = to.to_lowercase();
    to.contains("golf") || to.contains("course")
}

/// Hour of a departure given as `HH:MM`, `HH:MM:SS`, or an ISO date-time.
fn parse_hour(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S").map(|dt| dt.time()))
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M").map(|dt| dt.time()))
        .ok()
        .map(|t| t.hour())
}

#[async_trait]
impl Agent for TransportLogisticsAgent {
    type Context = TransportContext;

    fn kind(&self) -> AgentKind {
        AgentKind::TransportLogistics
    }

    async fn analyze(&self, ctx: &TransportContext) -> WayfarerResult<AgentRecommendation> {
        self.evaluate(ctx)
    }
}

//! Closed, per-agent context types.
//!
//! Every agent receives a `ContextEnvelope` plus only the fields it documents.
//! Contexts are read-only to agents. Fields an agent cannot work without are
//! modelled as `Option` so that a caller-supplied context with a gap is
//! reported as `MissingContext` instead of being silently defaulted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub mod budget;
pub mod experience;
pub mod golf;
pub mod health;
pub mod transport;

/// Identity fields every agent context carries.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContextEnvelope {
    #[serde(default)]
    pub trip_id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

impl ContextEnvelope {
    pub fn new(trip_id: impl Into<String>, user_id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            trip_id: trip_id.into(),
            user_id: user_id.into(),
            date: Some(date),
        }
    }
}

/// Presence check over a context's required fields.
pub trait RequiredFields {
    /// Names of required fields that are absent or blank. Empty when complete.
    fn missing_fields(&self) -> Vec<&'static str>;
}

impl RequiredFields for ContextEnvelope {
    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.trip_id.trim().is_empty() {
            missing.push("trip_id");
        }
        if self.user_id.trim().is_empty() {
            missing.push("user_id");
        }
        if self.date.is_none() {
            missing.push("date");
        }
        missing
    }
}

/// True when an optional string is absent or only whitespace.
pub(crate) fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |s| s.trim().is_empty())
}

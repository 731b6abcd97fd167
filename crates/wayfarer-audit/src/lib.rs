//! # wayfarer-audit
//!
//! Reference `RecommendationSink`: an append-only log of recommendation
//! records with one SHA-256 hash chain per trip.
//!
//! The decision core never writes here itself. A caller takes the records
//! from an `ExperienceReport` and hands them to the sink, then finalizes the
//! trip to seal its chain.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use wayfarer_audit::HashChainSink;
//! use wayfarer_core::RecommendationSink;
//!
//! let sink = HashChainSink::new();
//! for record in report.records() {
//!     sink.record(&record)?;
//! }
//! sink.finalize(&report.envelope.trip_id)?;
//!
//! assert!(sink.verify_integrity());
//! ```

pub mod chain;
pub mod event;
pub mod sink;

pub use chain::{check_chain, hash_entry, verify_chain, ChainBreak};
pub use event::{AuditEntry, AuditLog, TripChain, GENESIS_HASH};
pub use sink::HashChainSink;

// ── Tests ─────────────────────────────────────────────────────────────────────

//! wayfarer: travel decision core demo CLI
//!
//! Runs the built-in scenarios, or plans one day from a TOML day file, and
//! records every recommendation in a hash-chained audit sink.
//!
//! Usage:
//!   cargo run -p demo -- scenarios
//!   cargo run -p demo -- scenarios --only 2
//!   cargo run -p demo -- --config demo/wayfarer.toml plan --context demo/day.toml
//!   cargo run -p demo -- --json plan --context demo/day.toml

mod config;
mod scenarios;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use wayfarer_audit::HashChainSink;
use wayfarer_contracts::{
    error::{WayfarerError, WayfarerResult},
    recommendation::AgentRecommendation,
    record::RecommendationRecord,
};
use wayfarer_core::{
    ActivityHistory, IntentHeuristicHistory, PlannedOnlySpend, RecommendationSink, RecordedHistory,
    RecordedSpend, SpendSource,
};
use wayfarer_experience::TravelExperienceAgent;

use crate::config::{DayFile, DemoConfig};

// ── CLI definition ────────────────────────────────────────────────────────────

/// wayfarer: rule-based travel decisions with a fixed coordination ladder.
#[derive(Parser)]
#[command(
    name = "wayfarer",
    about = "wayfarer travel decision core demo",
    long_about = "Runs wayfarer scenarios or plans a day from a TOML file, showing each\n\
                  specialist's recommendation, the coordinated decision, and audit chain integrity."
)]
struct Cli {
    /// Optional TOML config (logging filter, audit settings).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print recommendations as JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the built-in scenarios.
    Scenarios {
        /// Run only this scenario (1-5).
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
        only: Option<u8>,
    },
    /// Coordinate one day described by a TOML day file.
    Plan {
        #[arg(long)]
        context: PathBuf,
    },
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match DemoConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("wayfarer: {}", e);
            std::process::exit(2);
        }
    };

    // RUST_LOG wins over the config file's filter.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter)),
        )
        .with_target(false)
        .compact()
        .init();

    let sink = HashChainSink::new();

    let result = match cli.command {
        Command::Scenarios { only } => run_scenarios(only, cli.json, &config, &sink).await,
        Command::Plan { context } => run_plan(&context, cli.json, &config, &sink).await,
    };

    if let Err(e) = result.and_then(|()| report_audit(&config, &sink)) {
        eprintln!("wayfarer: {}", e);
        std::process::exit(1);
    }
}

// ── Commands ──────────────────────────────────────────────────────────────────

async fn run_scenarios(
    only: Option<u8>,
    json: bool,
    config: &DemoConfig,
    sink: &HashChainSink,
) -> WayfarerResult<()> {
    let numbers: Vec<u8> = match only {
        Some(n) => vec![n],
        None => (1..=scenarios::SCENARIO_COUNT).collect(),
    };

    for n in numbers {
        let outcome = scenarios::run(n).await?;
        if !json {
            println!("── Scenario {}: {} ──", n, outcome.title);
        }
        print_recommendation(&outcome.decision, json);
        record_all(config, sink, &outcome.records)?;
    }
    Ok(())
}

async fn run_plan(
    path: &std::path::Path,
    json: bool,
    config: &DemoConfig,
    sink: &HashChainSink,
) -> WayfarerResult<()> {
    let day = DayFile::load(path)?;
    info!(
        path = %path.display(),
        trip_id = %day.context.envelope.trip_id,
        recorded_history = day.history.is_some(),
        recorded_actuals = day.actuals.is_some(),
        "day file loaded"
    );

    let history: Arc<dyn ActivityHistory> = match day.history {
        Some(h) => Arc::new(RecordedHistory::new(h.active_days, h.golf_days)),
        None => Arc::new(IntentHeuristicHistory),
    };
    let spend: Arc<dyn SpendSource> = match day.actuals {
        Some(actuals) => Arc::new(RecordedSpend::new(actuals)),
        None => Arc::new(PlannedOnlySpend),
    };

    let txa = TravelExperienceAgent::with_capabilities(history, spend);
    let report = txa.coordinate(&day.context).await?;

    if json {
        let rendered =
            serde_json::to_string_pretty(&report).map_err(|e| WayfarerError::ConfigError {
                reason: format!("failed to render report as JSON: {}", e),
            })?;
        println!("{}", rendered);
    } else {
        for (agent, rec) in report.specialists.iter() {
            println!("  {:<10} {:<8} {}", agent.label(), rec.priority().as_str(), rec.decision());
        }
        println!();
        println!("Decided by {} (rule {}):", report.deciding_agent, report.rule_id);
        print_recommendation(&report.decision, false);
    }

    record_all(config, sink, &report.records())?;
    if config.audit.enabled {
        sink.finalize(&report.envelope.trip_id)?;
    }
    Ok(())
}

// ── Output ────────────────────────────────────────────────────────────────────

fn print_recommendation(rec: &AgentRecommendation, json: bool) {
    if json {
        match serde_json::to_string(rec) {
            Ok(line) => println!("{}", line),
            Err(e) => eprintln!("wayfarer: failed to render recommendation: {}", e),
        }
        return;
    }

    let approval = if rec.approval_required() { "approval required" } else { "no approval needed" };
    println!("{} [{}; {}]", rec.decision(), rec.priority(), approval);
    println!("  {}", rec.rationale());
    // Blank actions are section breaks.
    for action in rec.output_actions() {
        if action.is_empty() {
            println!();
        } else {
            println!("  - {}", action);
        }
    }
    println!();
}

fn record_all(
    config: &DemoConfig,
    sink: &HashChainSink,
    records: &[RecommendationRecord],
) -> WayfarerResult<()> {
    if !config.audit.enabled {
        return Ok(());
    }
    for record in records {
        sink.record(record)?;
    }
    Ok(())
}

fn report_audit(config: &DemoConfig, sink: &HashChainSink) -> WayfarerResult<()> {
    if !config.audit.enabled {
        return Ok(());
    }

    let log = sink.export_log()?;
    if config.audit.print_chain {
        for chain in &log.trips {
            let state = if chain.is_sealed() { "sealed" } else { "open" };
            println!("  trip {} ({})", chain.trip_id, state);
            for entry in &chain.entries {
                println!(
                    "    #{:<3} {:<20} {:<8} {}",
                    entry.sequence,
                    entry.record.agent.as_str(),
                    entry.record.recommendation.priority().as_str(),
                    entry.this_hash
                );
            }
        }
    }

    if let Some((trip_id, brk)) = sink.first_break()? {
        return Err(WayfarerError::AuditWriteFailed {
            reason: format!("audit chain for trip {} failed verification: {}", trip_id, brk),
        });
    }
    for chain in &log.trips {
        eprintln!(
            "Audit chain verified: trip {}, {} entries, head {}",
            chain.trip_id,
            chain.entries.len(),
            chain.head()
        );
    }
    Ok(())
}

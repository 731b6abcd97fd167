//! Budget control agent.
//!
//! Ladder, first match wins:
//!
//! 1. Critical overrun: any category more than 20% over plan
//! 2. Alert overrun: any category more than 10% over plan
//! 3. Unused prepaid: no overruns, but prepaid value is sitting unused
//! 4. On track
//!
//! Both thresholds are strict: a category exactly 10% over is on track, and
//! exactly 20% over is an alert, not critical.

use std::collections::BTreeMap;

use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use wayfarer_contracts::{
    agent::AgentKind,
    context::budget::{BudgetContext, CategorySpend, TripBudget},
    error::WayfarerResult,
    recommendation::{AgentRecommendation, InputSignals, Priority},
};
use wayfarer_core::{require_complete, Agent};

/// 0.10
const ALERT_RATIO: Decimal = Decimal::from_parts(10, 0, 0, false, 2);
/// 0.20
const CRITICAL_RATIO: Decimal = Decimal::from_parts(20, 0, 0, false, 2);

/// Watches per-category spend against the plan.
#[derive(Debug, Clone, Copy, Default)]
pub struct BudgetControlAgent;

/// One category's standing, computed once per call.
#[derive(Debug, Clone)]
struct CategoryVariance<'a> {
    name: &'a str,
    spend: CategorySpend,
    ratio: Decimal,
}

impl CategoryVariance<'_> {
    /// Unspent planned amount. Zero when at or over plan.
    fn surplus(&self) -> Decimal {
        self.spend.planned.saturating_sub(self.spend.actual).max(Decimal::ZERO)
    }
}

impl BudgetControlAgent {
    pub fn new() -> Self {
        Self
    }

    /// Synchronous form of [`Agent::analyze`].
    pub fn evaluate(&self, ctx: &BudgetContext) -> WayfarerResult<AgentRecommendation> {
        require_complete(AgentKind::BudgetControl, ctx)?;

        let budget = ctx.budget.clone().unwrap_or_default();
        let spend = ctx.category_spend.clone().unwrap_or_default();
        let variances: Vec<CategoryVariance<'_>> = spend
            .iter()
            .map(|(name, s)| CategoryVariance {
                name,
                spend: *s,
                ratio: s.variance_ratio(),
            })
            .collect();
        let signals = signals(&budget, &variances);

        let critical: Vec<&CategoryVariance<'_>> =
            variances.iter().filter(|v| v.ratio > CRITICAL_RATIO).collect();
        let alert: Vec<&CategoryVariance<'_>> =
            variances.iter().filter(|v| v.ratio > ALERT_RATIO).collect();

        // ── 1. Critical overrun ──────────────────────────────────────────────
        if !critical.is_empty() {
            warn!(
                trip_id = %ctx.envelope.trip_id,
                categories = critical.len(),
                "critical budget overrun"
            );
            return critical_overrun(&critical, &variances, signals);
        }

        // ── 2. Alert overrun ─────────────────────────────────────────────────
        if !alert.is_empty() {
            debug!(trip_id = %ctx.envelope.trip_id, categories = alert.len(), "budget alert");
            return alert_overrun(ctx, &alert, &variances, signals);
        }

        // ── 3. Unused prepaid value ──────────────────────────────────────────
        if !ctx.unused_prepaid.is_empty() {
            let unused = ctx
                .unused_prepaid
                .iter()
                .fold(Decimal::ZERO, |total, item| total.saturating_add(item.amount));
            debug!(trip_id = %ctx.envelope.trip_id, unused = %unused, "unused prepaid value");
            let mut rec = AgentRecommendation::new(
                "Review unused prepaid value",
                format!(
                    "{unused} in prepaid bookings across {} item(s) is unused.",
                    ctx.unused_prepaid.len()
                ),
                Priority::Medium,
                false,
            )?
            .with_signals(signals)
            .with_signal("unused_prepaid_total", unused.to_string());
            for item in &ctx.unused_prepaid {
                let category = item
                    .category
                    .as_deref()
                    .map(|c| format!(" ({c})"))
                    .unwrap_or_default();
                rec = rec.with_action(format!(
                    "Unused: {}{category}: {}",
                    item.description, item.amount
                ));
            }
            return Ok(rec.with_actions([
                "",
                "Check whether each prepaid item can still be used on this trip",
                "Otherwise reallocate equivalent value to upcoming activities",
            ]));
        }

        // ── 4. On track ──────────────────────────────────────────────────────
        let on_track = variances.iter().filter(|v| v.ratio.abs() <= ALERT_RATIO).count();
        Ok(AgentRecommendation::new(
            "Budget on track",
            format!(
                "Total {}, spent {}, remaining {}; {on_track} of {} categories within 10% of plan.",
                budget.total,
                budget.spent,
                budget.remaining(),
                variances.len()
            ),
            Priority::Low,
            false,
        )?
        .with_signals(signals)
        .with_signal("on_track_categories", on_track))
    }
}

fn critical_overrun(
    critical: &[&CategoryVariance<'_>],
    all: &[CategoryVariance<'_>],
    signals: InputSignals,
) -> WayfarerResult<AgentRecommendation> {
    let names: Vec<&str> = critical.iter().map(|v| v.name).collect();
    let mut rec = AgentRecommendation::new(
        format!("Critical budget overrun: {}", names.join(", ")),
        format!(
            "{} more than 20% over plan: {}.",
            if critical.len() == 1 { "One category is" } else { "Categories are" },
            critical
                .iter()
                .map(|v| format!("{} at {}%", v.name, percent(v.ratio)))
                .collect::<Vec<_>>()
                .join(", ")
        ),
        Priority::Critical,
        true,
    )?
    .with_signals(signals);

    for v in critical {
        rec = rec.with_action(format!(
            "{}: planned {}, actual {}, over by {}",
            v.name,
            v.spend.planned,
            v.spend.actual,
            v.spend.variance()
        ));
    }

    let mut sources: Vec<&CategoryVariance<'_>> =
        all.iter().filter(|v| v.surplus() > Decimal::ZERO).collect();
    sources.sort_by(|a, b| b.surplus().cmp(&a.surplus()));
    if !sources.is_empty() {
        rec = rec.with_actions(["", "Potential reallocation sources:"]);
        for v in sources {
            rec = rec.with_action(format!("{}: {} available", v.name, v.surplus()));
        }
    }

    Ok(rec.with_actions([
        "",
        "Urgent review required before any further spend in these categories",
    ]))
}

fn alert_overrun(
    ctx: &BudgetContext,
    alert: &[&CategoryVariance<'_>],
    all: &[CategoryVariance<'_>],
    signals: InputSignals,
) -> WayfarerResult<AgentRecommendation> {
    let names: Vec<&str> = alert.iter().map(|v| v.name).collect();

    // Remaining surplus per source, drawn down as transfers are proposed so
    // one category is never promised twice.
    let mut available: BTreeMap<&str, Decimal> = all
        .iter()
        .filter(|v| v.surplus() > Decimal::ZERO)
        .map(|v| (v.name, v.surplus()))
        .collect();

    let mut transfers = Vec::new();
    let mut uncovered = Vec::new();
    for v in alert {
        let needed = v.spend.variance();
        let source = available
            .iter()
            .filter(|(_, surplus)| **surplus >= needed)
            .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(name, _)| *name);
        match source {
            Some(from) => {
                if let Some(surplus) = available.get_mut(from) {
                    *surplus -= needed;
                }
                transfers.push(format!("Transfer {needed} from {from} to {}", v.name));
            }
            None => uncovered.push(v.name),
        }
    }

    let mut rec = AgentRecommendation::new(
        format!("Rebalance budget: {}", names.join(", ")),
        format!(
            "Spend is more than 10% over plan in {}.",
            alert
                .iter()
                .map(|v| {
                    format!("{} ({}%, over by {})", v.name, percent(v.ratio), v.spend.variance())
                })
                .collect::<Vec<_>>()
                .join(", ")
        ),
        Priority::High,
        true,
    )?
    .with_signals(signals)
    .with_actions(transfers);

    if !uncovered.is_empty() {
        rec = rec.with_actions([
            String::new(),
            format!("No category has enough surplus to cover {}", uncovered.join(", ")),
            "Trim upcoming discretionary spend instead".to_string(),
        ]);
        for expense in ctx.upcoming_expenses.iter().filter(|e| e.discretionary) {
            rec = rec.with_action(format!(
                "Consider dropping: {} ({}, {})",
                expense.description, expense.category, expense.amount
            ));
        }
    }
    Ok(rec)
}

/// `ratio` as a percentage with at most one decimal place. Saturates.
fn percent(ratio: Decimal) -> Decimal {
    ratio.saturating_mul(Decimal::ONE_HUNDRED).round_dp(1).normalize()
}

fn signals(budget: &TripBudget, variances: &[CategoryVariance<'_>]) -> InputSignals {
    let mut signals = InputSignals::new();
    signals.insert("budget_total".into(), budget.total.to_string().into());
    signals.insert("budget_spent".into(), budget.spent.to_string().into());
    signals.insert("budget_remaining".into(), budget.remaining().to_string().into());
    signals.insert("categories".into(), variances.len().into());
    let ratios: serde_json::Map<String, serde_json::Value> = variances
        .iter()
        .map(|v| (v.name.to_string(), v.ratio.round_dp(4).normalize().to_string().into()))
        .collect();
    signals.insert("variance_ratio".into(), ratios.into());
    signals
}

#[async_trait]
impl Agent for BudgetControlAgent {
    type Context = BudgetContext;

    fn kind(&self) -> AgentKind {
        AgentKind::BudgetControl
    }

    async fn analyze(&self, ctx: &BudgetContext) -> WayfarerResult<AgentRecommendation> {
        self.evaluate(ctx)
    }
}

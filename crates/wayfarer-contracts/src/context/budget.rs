//! Budget control inputs. All amounts are exact decimals.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{ContextEnvelope, RequiredFields};

/// The trip's budget as planned, with the running total spent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TripBudget {
    pub total: Decimal,
    #[serde(default)]
    pub spent: Decimal,
    /// Planned amount per category.
    #[serde(default)]
    pub categories: BTreeMap<String, Decimal>,
}

impl TripBudget {
    /// `total - spent`, saturating at the representable range.
    pub fn remaining(&self) -> Decimal {
        self.total.saturating_sub(self.spent)
    }
}

/// Planned versus actual spend in one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CategorySpend {
    pub planned: Decimal,
    pub actual: Decimal,
}

impl CategorySpend {
    pub fn new(planned: Decimal, actual: Decimal) -> Self {
        Self { planned, actual }
    }

    /// `actual - planned`; positive means over budget.
    pub fn variance(&self) -> Decimal {
        self.actual.saturating_sub(self.planned)
    }

    /// `variance / planned`, or zero when nothing was planned.
    ///
    /// A ratio too large for `Decimal` saturates to `Decimal::MAX` (or `MIN`
    /// when under plan), which still lands in the right tier.
    pub fn variance_ratio(&self) -> Decimal {
        if self.planned.is_zero() {
            return Decimal::ZERO;
        }
        let variance = self.variance();
        match variance.checked_div(self.planned) {
            Some(ratio) => ratio,
            None if variance.is_sign_negative() == self.planned.is_sign_negative() => Decimal::MAX,
            None => Decimal::MIN,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpcomingExpense {
    pub description: String,
    pub amount: Decimal,
    pub category: String,
    #[serde(default)]
    pub discretionary: bool,
}

/// Something already paid for that has not been used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrepaidItem {
    pub description: String,
    pub amount: Decimal,
    #[serde(default)]
    pub category: Option<String>,
}

/// Input to the budget control agent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BudgetContext {
    pub envelope: ContextEnvelope,
    /// Required.
    #[serde(default)]
    pub budget: Option<TripBudget>,
    /// Required.
    #[serde(default)]
    pub category_spend: Option<BTreeMap<String, CategorySpend>>,
    #[serde(default)]
    pub upcoming_expenses: Vec<UpcomingExpense>,
    #[serde(default)]
    pub unused_prepaid: Vec<PrepaidItem>,
}

impl RequiredFields for BudgetContext {
    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = self.envelope.missing_fields();
        if self.budget.is_none() {
            missing.push("budget");
        }
        if self.category_spend.is_none() {
            missing.push("category_spend");
        }
        missing
    }
}

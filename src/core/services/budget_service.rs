//! Per-category spending limits compared against monthly expense totals.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::analytics::{category_totals, monthly_bucket};
use crate::core::services::ServiceResult;
use crate::domain::{CategoryName, Transaction};
use crate::ledger::Ledger;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BudgetStatus {
    UnderBudget,
    OnTrack,
    OverBudget,
}

impl BudgetStatus {
    pub fn classify(spent: Decimal, budget: Decimal) -> Self {
        match spent.cmp(&budget) {
            std::cmp::Ordering::Greater => Self::OverBudget,
            std::cmp::Ordering::Equal => Self::OnTrack,
            std::cmp::Ordering::Less => Self::UnderBudget,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::UnderBudget => "under budget",
            Self::OnTrack => "on track",
            Self::OverBudget => "over budget",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryBudgetStatus {
    pub category: String,
    pub budget: Decimal,
    pub spent: Decimal,
    pub remaining: Decimal,
    pub status: BudgetStatus,
}

/// Stateless budgeting utilities that operate over [`Ledger`] snapshots.
pub struct BudgetService;

impl BudgetService {
    pub fn set(ledger: &mut Ledger, category: &str, amount: Decimal) -> ServiceResult<()> {
        let name = CategoryName::new(category)?;
        ledger.set_budget(name, amount)?;
        Ok(())
    }

    /// Every budgeted category against its expense total in the month of `reference`.
    ///
    /// Categories are reported in name order; one without expenses that month
    /// shows zero spent. Names match exactly, the same way [`Self::exceeds`]
    /// and [`category_totals`] compare them.
    pub fn statuses(ledger: &Ledger, reference: NaiveDate) -> Vec<CategoryBudgetStatus> {
        let expenses: Vec<&Transaction> = monthly_bucket(ledger.transactions(), reference)
            .into_iter()
            .filter(|txn| txn.is_expense())
            .collect();
        let totals = category_totals(&expenses);

        ledger
            .budgets()
            .map(|(category, budget)| {
                let spent = totals
                    .iter()
                    .find(|total| total.category == category.as_str())
                    .map(|total| total.total)
                    .unwrap_or(Decimal::ZERO);
                CategoryBudgetStatus {
                    category: category.to_string(),
                    budget,
                    spent,
                    remaining: budget.saturating_sub(spent),
                    status: BudgetStatus::classify(spent, budget),
                }
            })
            .collect()
    }

    /// True when a single transaction is larger than its category's budget.
    ///
    /// Uses the same case-sensitive category match as [`Self::statuses`].
    pub fn exceeds(ledger: &Ledger, transaction: &Transaction) -> bool {
        ledger
            .budget(transaction.category.as_str())
            .is_some_and(|budget| transaction.amount > budget)
    }
}

use serde::{Deserialize, Serialize};

use crate::domain::{Category, Cents, Ledger};

/// Snapshot of income against tracked spending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialSummary {
    pub monthly_income: Cents,
    pub total_expenses: Cents,
    pub remaining_balance: Cents,
    pub expense_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BudgetStatus {
    WithinBudget,
    OverBudget { by: Cents },
}

impl FinancialSummary {
    pub fn from_ledger(ledger: &Ledger) -> Self {
        Self {
            monthly_income: ledger.monthly_income(),
            total_expenses: ledger.total_expenses(),
            remaining_balance: ledger.remaining_balance(),
            expense_count: ledger.len(),
        }
    }

    pub fn status(&self) -> BudgetStatus {
        if self.remaining_balance >= 0 {
            BudgetStatus::WithinBudget
        } else {
            BudgetStatus::OverBudget {
                by: self.remaining_balance.saturating_neg(),
            }
        }
    }

    /// A summary is only meaningful once an income is set and something was spent.
    pub fn is_reportable(&self) -> bool {
        self.monthly_income > 0 && self.expense_count > 0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryReport {
    pub categories: Vec<CategorySummary>,
    pub total: Cents,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: Category,
    pub total: Cents,
    pub count: usize,
    pub average: Cents,
    pub percentage: f64,
}

impl CategoryReport {
    /// Per-category breakdown, largest total first, ties broken by label.
    pub fn from_ledger(ledger: &Ledger) -> Self {
        let totals = ledger.category_totals();
        let total: Cents = totals.values().sum();

        let mut categories: Vec<CategorySummary> = totals
            .into_iter()
            .map(|(category, category_total)| {
                let count = ledger
                    .records()
                    .iter()
                    .filter(|r| r.category == category)
                    .count();
                CategorySummary {
                    average: category_total / count.max(1) as Cents,
                    percentage: percentage_of(category_total, total),
                    category,
                    total: category_total,
                    count,
                }
            })
            .collect();

        categories.sort_by(|a, b| {
            b.total
                .cmp(&a.total)
                .then_with(|| a.category.as_str().cmp(b.category.as_str()))
        });

        Self { categories, total }
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Largest single category total, used to scale charts.
    pub fn max_total(&self) -> Cents {
        self.categories.iter().map(|c| c.total).max().unwrap_or(0)
    }
}

fn percentage_of(part: Cents, total: Cents) -> f64 {
    if total <= 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

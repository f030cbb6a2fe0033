use crate::application::{BudgetStatus, CategoryReport, FinancialSummary};
use crate::domain::{Cents, ExpenseRecord, format_money};

const CHART_TITLE: &str = "Expense Breakdown by Category";
const BAR: char = '█';

/// Expense table in storage order.
pub fn render_expense_table(records: &[ExpenseRecord], symbol: &str) -> String {
    if records.is_empty() {
        return "No expenses recorded yet.\n".to_string();
    }

    let mut out = format!(
        "{:<12} {:<15} {:>16}  {}\n",
        "DATE", "CATEGORY", "AMOUNT", "DESCRIPTION"
    );
    out.push_str(&"-".repeat(60));
    out.push('\n');

    for record in records {
        out.push_str(&format!(
            "{:<12} {:<15} {:>16}  {}\n",
            record.date.format("%Y-%m-%d").to_string(),
            record.category.as_str(),
            format_money(record.amount_cents, symbol),
            record.description
        ));
    }
    out
}

pub fn render_summary(summary: &FinancialSummary, symbol: &str) -> String {
    let budget = match summary.status() {
        BudgetStatus::WithinBudget => "Within Budget".to_string(),
        BudgetStatus::OverBudget { by } => format!("Over Budget: {}", format_money(by, symbol)),
    };

    format!(
        "Financial Summary\n\
         \x20 Total Monthly Income:      {}\n\
         \x20 Total Expenses (Tracked):  {}\n\
         \x20 Remaining Savings Goal:    {} ({})\n",
        format_money(summary.monthly_income, symbol),
        format_money(summary.total_expenses, symbol),
        format_money(summary.remaining_balance, symbol),
        budget
    )
}

/// One-line totals shown after every change to the ledger.
pub fn render_status_line(summary: &FinancialSummary, symbol: &str) -> String {
    format!(
        "{} expense(s), total {}, remaining {}\n",
        summary.expense_count,
        format_money(summary.total_expenses, symbol),
        format_money(summary.remaining_balance, symbol)
    )
}

/// Horizontal bar chart of category totals. Bars are scaled so the largest
/// total spans `width` cells; non-positive totals get no bar.
pub fn render_bar_chart(report: &CategoryReport, symbol: &str, width: usize) -> String {
    let label_width = report
        .categories
        .iter()
        .map(|c| c.category.as_str().chars().count())
        .max()
        .unwrap_or(0);
    let max_total = report.max_total();

    let mut out = format!("{}\n\n", CHART_TITLE);
    for summary in &report.categories {
        let bar: String = std::iter::repeat_n(BAR, bar_length(summary.total, max_total, width))
            .collect();
        out.push_str(&format!(
            "{:<label_width$}  {} {}\n",
            summary.category.as_str(),
            bar,
            format_money(summary.total, symbol)
        ));
    }
    out.push_str(&format!("\nTotal Amount Spent: {}\n", format_money(report.total, symbol)));
    out
}

fn bar_length(total: Cents, max_total: Cents, width: usize) -> usize {
    if total <= 0 || max_total <= 0 {
        return 0;
    }
    let scaled = (i128::from(total) * width as i128 + i128::from(max_total) / 2) / i128::from(max_total);
    // Anything spent stays visible
    (scaled as usize).max(1)
}

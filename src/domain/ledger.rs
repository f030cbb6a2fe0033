use std::collections::HashMap;

use chrono::NaiveDate;

use super::{Category, Cents, ExpenseRecord, FlatTable, FormatError, LedgerError, COLUMNS};

/// Largest sum of absolute amounts one ledger may hold. Keeps every total,
/// category total and balance derived from the records inside `Cents`.
pub const MAX_TRACKED_TOTAL: Cents = Cents::MAX / 4;

/// The expenses of one session plus the monthly income they are measured against.
///
/// Records are only ever appended (`add_expense`) or replaced wholesale
/// (`import_flat`, `replace_records`); all summary figures are derived on demand.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    records: Vec<ExpenseRecord>,
    monthly_income: Cents,
    /// Sum of absolute amounts, never above `MAX_TRACKED_TOTAL`
    tracked: Cents,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records in insertion (display and export) order.
    pub fn records(&self) -> &[ExpenseRecord] {
        &self.records
    }

    pub fn monthly_income(&self) -> Cents {
        self.monthly_income
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append a new expense. The amount must be strictly positive, and the
    /// ledger total must stay within `MAX_TRACKED_TOTAL`.
    pub fn add_expense(
        &mut self,
        date: NaiveDate,
        category: Category,
        amount_cents: Cents,
        description: impl Into<String>,
    ) -> Result<&ExpenseRecord, LedgerError> {
        if amount_cents <= 0 {
            return Err(LedgerError::Validation {
                amount: amount_cents,
            });
        }

        let tracked = add_tracked(self.tracked, amount_cents)
            .ok_or(LedgerError::TotalTooLarge { amount: amount_cents })?;

        let record = ExpenseRecord::new(date, category, amount_cents, description);
        tracing::debug!(
            date = %record.date,
            category = %record.category,
            amount_cents = record.amount_cents,
            "expense added"
        );
        self.records.push(record);
        self.tracked = tracked;
        Ok(&self.records[self.records.len() - 1])
    }

    /// Overwrite the monthly income. Returns true if the stored value changed.
    pub fn set_income(&mut self, income: Cents) -> bool {
        if self.monthly_income == income {
            return false;
        }
        tracing::debug!(from = self.monthly_income, to = income, "monthly income updated");
        self.monthly_income = income;
        true
    }

    pub fn total_expenses(&self) -> Cents {
        self.records.iter().map(|r| r.amount_cents).sum()
    }

    /// Income minus expenses. Negative when over budget.
    /// Saturates at the bounds of `Cents` for extreme incomes.
    pub fn remaining_balance(&self) -> Cents {
        self.monthly_income.saturating_sub(self.total_expenses())
    }

    /// Sum of amounts per category. Categories without records are absent.
    pub fn category_totals(&self) -> HashMap<Category, Cents> {
        let mut totals: HashMap<Category, Cents> = HashMap::new();

        for record in &self.records {
            *totals.entry(record.category.clone()).or_insert(0) += record.amount_cents;
        }

        totals
    }

    /// Serialize all records into the flat four-column format, in storage order.
    pub fn export_flat(&self) -> FlatTable {
        let mut table = FlatTable::with_columns();
        table.rows = self.records.iter().map(ExpenseRecord::to_row).collect();
        table
    }

    /// Replace all records with the rows of `table`.
    ///
    /// The header must match exactly. Every row is parsed before anything is
    /// replaced, so a failure leaves the ledger untouched. Amounts are taken
    /// as-is: imported data is not held to the positive-amount rule of
    /// `add_expense`. The monthly income is not affected.
    pub fn import_flat(&mut self, table: &FlatTable) -> Result<usize, LedgerError> {
        let batch = parse_table(table)?;
        Ok(self.replace_records(batch))
    }

    /// Replace all records with an already parsed batch. Returns the new record count.
    pub fn replace_records(&mut self, batch: ExpenseBatch) -> usize {
        let non_positive = batch.non_positive();
        if non_positive > 0 {
            tracing::warn!(
                count = non_positive,
                "imported expenses include zero or negative amounts"
            );
        }

        self.records = batch.records;
        self.tracked = batch.tracked;
        self.records.len()
    }
}

/// Records parsed from a flat table, ready to replace a ledger's contents.
///
/// Only built by `parse_table`, so the amounts always fit the ledger limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseBatch {
    records: Vec<ExpenseRecord>,
    tracked: Cents,
}

impl ExpenseBatch {
    pub fn records(&self) -> &[ExpenseRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of zero or negative amounts, which `add_expense` would have refused.
    pub fn non_positive(&self) -> usize {
        self.records.iter().filter(|r| r.amount_cents <= 0).count()
    }
}

/// Parse a flat table into records without touching any ledger.
pub fn parse_table(table: &FlatTable) -> Result<ExpenseBatch, FormatError> {
    if !table.has_expected_header() {
        return Err(FormatError::HeaderMismatch {
            expected: COLUMNS.join(","),
            found: table.header.join(","),
        });
    }

    let mut records = Vec::with_capacity(table.len());
    let mut tracked: Cents = 0;
    for (index, row) in table.rows.iter().enumerate() {
        // +2 for the header line and 1-based numbering
        let line = index + 2;
        let record = ExpenseRecord::from_row(row, line)?;
        tracked = add_tracked(tracked, record.amount_cents)
            .ok_or(FormatError::TotalTooLarge { line })?;
        records.push(record);
    }

    Ok(ExpenseBatch { records, tracked })
}

fn add_tracked(tracked: Cents, amount: Cents) -> Option<Cents> {
    tracked
        .checked_add(amount.checked_abs()?)
        .filter(|total| *total <= MAX_TRACKED_TOTAL)
}

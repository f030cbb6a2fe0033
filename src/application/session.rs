use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use chrono::NaiveDate;
use tempfile::NamedTempFile;

use crate::domain::{Category, Cents, ExpenseRecord, Ledger, format_cents};
use crate::io::{Exporter, ImportOptions, ImportResult, Importer};

use super::{AppError, CategoryReport, FinancialSummary};

/// One user's tracking session.
///
/// Owns the ledger for as long as the session lives; there is no shared or
/// global state. This is the primary interface for any client (CLI, tests, ...).
/// Clients mutate through the methods below and pull fresh snapshots
/// (`summary`, `category_report`, `ledger`) after every call to render them.
#[derive(Debug, Default)]
pub struct Session {
    ledger: Ledger,
}

impl Session {
    /// Start a session with no expenses and zero income.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Record a new expense. Non-positive amounts are rejected.
    pub fn add_expense(
        &mut self,
        date: NaiveDate,
        category: Category,
        amount_cents: Cents,
        description: impl Into<String>,
    ) -> Result<&ExpenseRecord, AppError> {
        Ok(self
            .ledger
            .add_expense(date, category, amount_cents, description)?)
    }

    /// Set the monthly income. Returns true if the value changed.
    pub fn set_income(&mut self, income_cents: Cents) -> Result<bool, AppError> {
        if income_cents < 0 {
            return Err(AppError::NegativeIncome(format_cents(income_cents)));
        }
        Ok(self.ledger.set_income(income_cents))
    }

    /// Write the expense table to a CSV file. Returns the number of records written.
    ///
    /// The table goes to a temporary file next to `path` that is renamed over
    /// it once complete, so a failed save never leaves a partial file behind.
    pub fn save(&self, path: &Path) -> Result<usize, AppError> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut file = NamedTempFile::new_in(dir).map_err(|e| AppError::io(path, e))?;
        let count = Exporter::new(&self.ledger).export_expenses_csv(BufWriter::new(&mut file))?;
        file.as_file().sync_all().map_err(|e| AppError::io(path, e))?;
        file.persist(path).map_err(|e| AppError::io(path, e.error))?;

        tracing::info!(path = %path.display(), count, "expenses saved");
        Ok(count)
    }

    /// Replace all expenses with the contents of a CSV file.
    /// On any failure the current expenses are kept.
    pub fn load(&mut self, path: &Path) -> Result<ImportResult, AppError> {
        self.import_file(path, ImportOptions::default())
    }

    /// Check that a CSV file would load, without touching the current expenses.
    pub fn validate(&mut self, path: &Path) -> Result<ImportResult, AppError> {
        self.import_file(
            path,
            ImportOptions {
                validate_only: true,
            },
        )
    }

    fn import_file(
        &mut self,
        path: &Path,
        options: ImportOptions,
    ) -> Result<ImportResult, AppError> {
        let validate_only = options.validate_only;
        let file = File::open(path).map_err(|e| AppError::io(path, e))?;
        let result = Importer::new(&mut self.ledger).import_csv(BufReader::new(file), options)?;

        tracing::info!(
            path = %path.display(),
            imported = result.imported,
            validate_only,
            "expense file read"
        );
        Ok(result)
    }

    pub fn summary(&self) -> FinancialSummary {
        FinancialSummary::from_ledger(&self.ledger)
    }

    pub fn category_report(&self) -> CategoryReport {
        CategoryReport::from_ledger(&self.ledger)
    }
}

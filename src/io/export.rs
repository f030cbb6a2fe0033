use std::io::Write;

use crate::application::{AppError, CategoryReport};
use crate::domain::{Ledger, format_cents};

/// Exporter for writing ledger data as CSV
pub struct Exporter<'a> {
    ledger: &'a Ledger,
}

impl<'a> Exporter<'a> {
    pub fn new(ledger: &'a Ledger) -> Self {
        Self { ledger }
    }

    /// Export the expense table in the flat `Date,Category,Amount,Description`
    /// format. Returns the number of records written.
    pub fn export_expenses_csv<W: Write>(&self, writer: W) -> Result<usize, AppError> {
        let table = self.ledger.export_flat();
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(&table.header)?;
        for row in &table.rows {
            csv_writer.write_record(row)?;
        }

        csv_writer.flush().map_err(csv::Error::from)?;
        Ok(table.len())
    }

    /// Export per-category totals. Returns the number of categories written.
    pub fn export_categories_csv<W: Write>(&self, writer: W) -> Result<usize, AppError> {
        let report = CategoryReport::from_ledger(self.ledger);
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["Category", "Total", "Count", "Average", "Percentage"])?;

        for summary in &report.categories {
            csv_writer.write_record([
                summary.category.to_string(),
                format_cents(summary.total),
                summary.count.to_string(),
                format_cents(summary.average),
                format!("{:.2}", summary.percentage),
            ])?;
        }

        csv_writer.flush().map_err(csv::Error::from)?;
        Ok(report.categories.len())
    }
}

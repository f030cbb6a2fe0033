use std::io::Read;

use crate::application::AppError;
use crate::domain::{FlatTable, FormatError, Ledger, parse_table};

/// Result of an import operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportResult {
    pub imported: usize,
    /// Rows with a zero or negative amount. These are accepted, but a manual
    /// entry with the same amount would have been rejected.
    pub non_positive: usize,
}

/// Options for import operations
#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    /// Parse and check the file without replacing any records
    pub validate_only: bool,
}

/// Importer for loading expense files into a ledger
pub struct Importer<'a> {
    ledger: &'a mut Ledger,
}

impl<'a> Importer<'a> {
    pub fn new(ledger: &'a mut Ledger) -> Self {
        Self { ledger }
    }

    /// Import expenses from CSV, replacing every existing record.
    /// Nothing is replaced unless the whole file parses.
    pub fn import_csv<R: Read>(
        &mut self,
        reader: R,
        options: ImportOptions,
    ) -> Result<ImportResult, AppError> {
        let table = read_table(reader)?;
        let batch = parse_table(&table)?;

        let result = ImportResult {
            imported: batch.len(),
            non_positive: batch.non_positive(),
        };

        if !options.validate_only {
            self.ledger.replace_records(batch);
        }

        Ok(result)
    }
}

/// Read a CSV stream into a flat table without interpreting the columns.
///
/// Records may have any number of fields here so that a short or long row is
/// reported by line number when the table is parsed.
pub fn read_table<R: Read>(reader: R) -> Result<FlatTable, AppError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let header = csv_reader
        .headers()
        .map_err(classify_csv_error)?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for result in csv_reader.records() {
        let record = result.map_err(classify_csv_error)?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(FlatTable { header, rows })
}

// OS-level read failures stay CSV/IO errors; anything else means the content
// itself is not valid CSV.
fn classify_csv_error(err: csv::Error) -> AppError {
    if err.is_io_error() {
        AppError::Csv(err)
    } else {
        FormatError::Malformed(err.to_string()).into()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::{Category, LedgerError};

    const VALID_CSV: &str = "Date,Category,Amount,Description\n\
                             2024-01-01,Food,100.0,lunch\n\
                             2024-01-02,Transport,50.0,bus\n";

    #[test]
    fn test_read_table() {
        let table = read_table(VALID_CSV.as_bytes()).unwrap();

        assert!(table.has_expected_header());
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[1], ["2024-01-02", "Transport", "50.0", "bus"]);
    }

    #[test]
    fn test_import_csv() {
        let mut ledger = Ledger::new();

        let result = Importer::new(&mut ledger)
            .import_csv(VALID_CSV.as_bytes(), ImportOptions::default())
            .unwrap();

        assert_eq!(
            result,
            ImportResult {
                imported: 2,
                non_positive: 0
            }
        );
        assert_eq!(ledger.total_expenses(), 15000);
        assert_eq!(
            ledger.records()[0].date,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
        assert_eq!(ledger.records()[1].category, Category::Transport);
    }

    #[test]
    fn test_import_validate_only_keeps_records() {
        let mut ledger = Ledger::new();

        let result = Importer::new(&mut ledger)
            .import_csv(
                VALID_CSV.as_bytes(),
                ImportOptions {
                    validate_only: true,
                },
            )
            .unwrap();

        assert_eq!(result.imported, 2);
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_import_counts_non_positive_amounts() {
        let csv = "Date,Category,Amount,Description\n\
                   2024-01-01,Food,0,\n\
                   2024-01-02,Other,-12.5,refund\n\
                   2024-01-03,Food,3,\n";
        let mut ledger = Ledger::new();

        let result = Importer::new(&mut ledger)
            .import_csv(csv.as_bytes(), ImportOptions::default())
            .unwrap();

        assert_eq!(result.imported, 3);
        assert_eq!(result.non_positive, 2);
        assert_eq!(ledger.total_expenses(), -950);
    }

    #[test]
    fn test_import_missing_column() {
        let csv = "Date,Category,Description\n2024-01-01,Food,lunch\n";
        let mut ledger = Ledger::new();

        let err = Importer::new(&mut ledger)
            .import_csv(csv.as_bytes(), ImportOptions::default())
            .unwrap_err();

        assert!(matches!(
            err,
            AppError::Ledger(LedgerError::Format(FormatError::HeaderMismatch { .. }))
        ));
    }

    #[test]
    fn test_import_short_row_reports_line() {
        let csv = "Date,Category,Amount,Description\n\
                   2024-01-01,Food,10,\n\
                   2024-01-02,Food\n";
        let mut ledger = Ledger::new();

        let err = Importer::new(&mut ledger)
            .import_csv(csv.as_bytes(), ImportOptions::default())
            .unwrap_err();

        assert!(matches!(
            err,
            AppError::Ledger(LedgerError::Format(FormatError::FieldCount {
                line: 3,
                expected: 4,
                found: 2
            }))
        ));
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_import_empty_input_is_header_mismatch() {
        let mut ledger = Ledger::new();

        let err = Importer::new(&mut ledger)
            .import_csv("".as_bytes(), ImportOptions::default())
            .unwrap_err();

        assert!(matches!(
            err,
            AppError::Ledger(LedgerError::Format(FormatError::HeaderMismatch { .. }))
        ));
    }

    #[test]
    fn test_import_invalid_utf8_is_malformed() {
        let mut bytes = b"Date,Category,Amount,Description\n2024-01-01,".to_vec();
        bytes.extend_from_slice(&[0xff, 0xfe]);
        bytes.extend_from_slice(b",1,\n");
        let mut ledger = Ledger::new();

        let err = Importer::new(&mut ledger)
            .import_csv(bytes.as_slice(), ImportOptions::default())
            .unwrap_err();

        assert!(matches!(
            err,
            AppError::Ledger(LedgerError::Format(FormatError::Malformed(_)))
        ));
    }
}

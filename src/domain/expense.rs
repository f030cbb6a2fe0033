use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::{Category, Cents, FormatError, format_cents, parse_cents};

/// Column names of the flat expense format, in order.
pub const COLUMNS: [&str; 4] = ["Date", "Category", "Amount", "Description"];

/// Date format used when writing the `Date` column.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single expense. Records are immutable once stored in a ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    /// Calendar day the money was spent
    pub date: NaiveDate,
    pub category: Category,
    /// Amount in cents. Positive for manual entries; imported data may carry
    /// zero or negative values.
    pub amount_cents: Cents,
    /// Free text, may be empty
    pub description: String,
}

impl ExpenseRecord {
    pub fn new(
        date: NaiveDate,
        category: Category,
        amount_cents: Cents,
        description: impl Into<String>,
    ) -> Self {
        Self {
            date,
            category,
            amount_cents,
            description: description.into(),
        }
    }

    /// Serialize into the four flat columns.
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.date.format(DATE_FORMAT).to_string(),
            self.category.to_string(),
            format_cents(self.amount_cents),
            self.description.clone(),
        ]
    }

    /// Parse a data row. `line` is only used for error reporting.
    pub fn from_row(row: &[String], line: usize) -> Result<Self, FormatError> {
        let [date, category, amount, description] = row else {
            return Err(FormatError::FieldCount {
                line,
                expected: COLUMNS.len(),
                found: row.len(),
            });
        };

        let date = parse_date(date).ok_or_else(|| FormatError::InvalidDate {
            line,
            value: date.clone(),
        })?;
        let category =
            Category::from_label(category).ok_or(FormatError::EmptyCategory { line })?;
        let amount_cents = parse_cents(amount).map_err(|_| FormatError::InvalidAmount {
            line,
            value: amount.clone(),
        })?;

        Ok(Self::new(date, category, amount_cents, description.as_str()))
    }
}

/// Parse a stored date. Besides plain `YYYY-MM-DD`, files written by other
/// tools may carry a time part, which is dropped.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    if let Ok(date) = NaiveDate::parse_from_str(s, DATE_FORMAT) {
        return Some(date);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.date());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.date());
    }
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
}

/// Rows of the flat expense format: a header plus data rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl FlatTable {
    /// An empty table carrying the expected header.
    pub fn with_columns() -> Self {
        Self {
            header: COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn has_expected_header(&self) -> bool {
        self.header.iter().map(String::as_str).eq(COLUMNS)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|f| f.to_string()).collect()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    #[test]
    fn test_to_row() {
        let record = ExpenseRecord::new(date("2024-01-01"), Category::Food, 10000, "lunch");
        assert_eq!(record.to_row(), row(&["2024-01-01", "Food", "100.00", "lunch"]));
    }

    #[test]
    fn test_from_row() {
        let record = ExpenseRecord::from_row(&row(&["2024-03-09", "Rent", "1200.5", ""]), 2).unwrap();
        assert_eq!(record.date, date("2024-03-09"));
        assert!(matches!(record.category, Category::Custom(_)));
        assert_eq!(record.category.as_str(), "Rent");
        assert_eq!(record.amount_cents, 120050);
        assert_eq!(record.description, "");
    }

    #[test]
    fn test_from_row_accepts_non_positive_amounts() {
        let record = ExpenseRecord::from_row(&row(&["2024-03-09", "Other", "-5", "refund"]), 2).unwrap();
        assert_eq!(record.amount_cents, -500);

        let record = ExpenseRecord::from_row(&row(&["2024-03-09", "Other", "0", ""]), 2).unwrap();
        assert_eq!(record.amount_cents, 0);
    }

    #[test]
    fn test_from_row_errors() {
        assert_eq!(
            ExpenseRecord::from_row(&row(&["2024-01-01", "Food", "1"]), 4),
            Err(FormatError::FieldCount {
                line: 4,
                expected: 4,
                found: 3
            })
        );
        assert_eq!(
            ExpenseRecord::from_row(&row(&["01/02/2024", "Food", "1", ""]), 2),
            Err(FormatError::InvalidDate {
                line: 2,
                value: "01/02/2024".to_string()
            })
        );
        assert_eq!(
            ExpenseRecord::from_row(&row(&["2024-01-01", "", "1", ""]), 3),
            Err(FormatError::EmptyCategory { line: 3 })
        );
        assert_eq!(
            ExpenseRecord::from_row(&row(&["2024-01-01", "Food", "NaN", ""]), 5),
            Err(FormatError::InvalidAmount {
                line: 5,
                value: "NaN".to_string()
            })
        );
    }

    #[test]
    fn test_parse_date_formats() {
        assert_eq!(parse_date("2024-01-15"), Some(date("2024-01-15")));
        assert_eq!(parse_date("2024-01-15 00:00:00"), Some(date("2024-01-15")));
        assert_eq!(parse_date("2024-01-15T18:30:00"), Some(date("2024-01-15")));
        assert_eq!(parse_date("2024-01-15T18:30:00+02:00"), Some(date("2024-01-15")));
        assert_eq!(parse_date("yesterday"), None);
    }

    #[test]
    fn test_header_check() {
        let mut table = FlatTable::with_columns();
        assert!(table.has_expected_header());

        table.header = row(&["Date", "Category", "Description"]);
        assert!(!table.has_expected_header());

        table.header = row(&["date", "category", "amount", "description"]);
        assert!(!table.has_expected_header());

        table.header = row(&["Date", "Amount", "Category", "Description"]);
        assert!(!table.has_expected_header());
    }
}

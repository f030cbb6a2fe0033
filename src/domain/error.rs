use thiserror::Error;

use super::{Cents, format_cents};

/// Failures reported by ledger mutations. All of them leave the ledger unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Expense amount must be greater than zero (got {})", amount_text(.amount))]
    Validation { amount: Cents },

    #[error("Expense amount {} would take the tracked total past its limit", amount_text(.amount))]
    TotalTooLarge { amount: Cents },

    #[error("Invalid expense file: {0}")]
    Format(#[from] FormatError),
}

/// Why a flat expense table could not be read.
/// Line numbers are 1-based file lines; the header is line 1.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("expected columns [{expected}], found [{found}]")]
    HeaderMismatch { expected: String, found: String },

    #[error("line {line}: expected {expected} fields, found {found}")]
    FieldCount {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: invalid date '{value}'")]
    InvalidDate { line: usize, value: String },

    #[error("line {line}: invalid amount '{value}'")]
    InvalidAmount { line: usize, value: String },

    #[error("line {line}: category cannot be empty")]
    EmptyCategory { line: usize },

    #[error("line {line}: amounts add up to more than a ledger can track")]
    TotalTooLarge { line: usize },

    #[error("malformed CSV: {0}")]
    Malformed(String),
}

fn amount_text(amount: &Cents) -> String {
    format_cents(*amount)
}

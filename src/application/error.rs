use std::path::PathBuf;

use thiserror::Error;

use crate::domain::{FormatError, LedgerError};

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("Monthly income cannot be negative: {0}")]
    NegativeIncome(String),

    #[error("Failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl AppError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<FormatError> for AppError {
    fn from(err: FormatError) -> Self {
        AppError::Ledger(LedgerError::Format(err))
    }
}

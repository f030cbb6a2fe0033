// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use chrono::NaiveDate;
use expense_tracker::Session;
use expense_tracker::domain::{Category, Cents};

/// Helper to parse a date string into a NaiveDate
pub fn parse_date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
}

/// Test fixture: a month of typical spending
pub struct SampleExpenses;

impl SampleExpenses {
    pub const ENTRIES: [(&'static str, Category, Cents, &'static str); 6] = [
        ("2024-01-01", Category::Food, 10000, "lunch"),
        ("2024-01-02", Category::Transport, 5000, "bus"),
        ("2024-01-05", Category::Utilities, 240000, "electricity, water"),
        ("2024-01-09", Category::Entertainment, 79950, "concert \"front row\""),
        ("2024-01-12", Category::Food, 3275, ""),
        ("2024-01-20", Category::Other, 1, "rounding test"),
    ];

    pub fn total() -> Cents {
        Self::ENTRIES.iter().map(|(_, _, amount, _)| amount).sum()
    }

    /// Add every sample entry to the session
    pub fn add_all(session: &mut Session) -> Result<()> {
        for (date, category, amount, description) in Self::ENTRIES {
            session.add_expense(parse_date(date), category, amount, description)?;
        }
        Ok(())
    }
}

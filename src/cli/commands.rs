use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::domain::{Category, Cents, parse_cents};

/// A single line typed into the session.
#[derive(Parser, Debug)]
#[command(name = "expense-tracker", no_binary_name = true)]
#[command(override_usage = "<COMMAND> [ARGS]")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: SessionCommand,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum SessionCommand {
    /// Add an expense
    Add {
        /// Amount spent (e.g., "250.00" or "250")
        #[arg(allow_hyphen_values = true)]
        amount: String,

        /// Category: Food, Transport, Entertainment, Utilities, Other
        #[arg(short, long, default_value = "Food", value_parser = parse_preset)]
        category: Category,

        /// Date of the expense (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Description of the expense
        #[arg(short = 'm', long, default_value = "")]
        description: String,
    },

    /// Set your total monthly income
    Income {
        /// Income amount (e.g., "50000" or "50000.00")
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },

    /// Show the expense table
    #[command(alias = "ls")]
    List,

    /// Show income, total expenses and remaining savings
    Summary {
        /// Output format: table, json
        #[arg(long, value_enum, default_value_t = SummaryFormat::Table)]
        format: SummaryFormat,
    },

    /// Chart expenses by category
    #[command(alias = "visualize")]
    Chart {
        /// Output format: table, json, csv
        #[arg(long, value_enum, default_value_t = ReportFormat::Table)]
        format: ReportFormat,

        /// Width of the longest bar, in characters (1-200)
        #[arg(short, long, default_value_t = 40, value_parser = clap::value_parser!(u16).range(1..=200))]
        width: u16,
    },

    /// Save expenses to a CSV file
    Save {
        /// Output file (defaults to the session file)
        path: Option<PathBuf>,
    },

    /// Load expenses from a CSV file, replacing the current ones
    Load {
        /// Input file (defaults to the session file)
        path: Option<PathBuf>,
    },

    /// Check that a CSV file can be loaded, without loading it
    Check {
        /// Input file (defaults to the session file)
        path: Option<PathBuf>,
    },

    /// End the session
    #[command(alias = "exit")]
    Quit,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryFormat {
    Table,
    Json,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Table,
    Json,
    Csv,
}

fn parse_preset(s: &str) -> Result<Category, String> {
    Category::from_preset(s).ok_or_else(|| {
        format!(
            "unknown category '{}'. Valid categories: {}",
            s,
            Category::PRESETS.map(String::from).join(", ")
        )
    })
}

/// Parse a monthly income argument: a non-negative amount.
pub fn parse_income(s: &str) -> Result<Cents, String> {
    let cents = parse_cents(s).map_err(|e| e.to_string())?;
    if cents < 0 {
        return Err("income cannot be negative".to_string());
    }
    Ok(cents)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<SessionCommand, clap::Error> {
        CommandLine::try_parse_from(args).map(|line| line.command)
    }

    #[test]
    fn test_parse_add_defaults() {
        let command = parse(&["add", "100"]).unwrap();

        assert_eq!(
            command,
            SessionCommand::Add {
                amount: "100".to_string(),
                category: Category::Food,
                date: None,
                description: String::new(),
            }
        );
    }

    #[test]
    fn test_parse_add_full() {
        let command = parse(&[
            "add", "50", "-c", "transport", "-d", "2024-01-02", "-m", "bus",
        ])
        .unwrap();

        assert_eq!(
            command,
            SessionCommand::Add {
                amount: "50".to_string(),
                category: Category::Transport,
                date: Some("2024-01-02".to_string()),
                description: "bus".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_add_negative_amount() {
        let command = parse(&["add", "-5", "-c", "Food"]).unwrap();

        assert!(matches!(command, SessionCommand::Add { amount, .. } if amount == "-5"));
    }

    #[test]
    fn test_parse_add_unknown_category() {
        let err = parse(&["add", "5", "-c", "Rent"]).unwrap_err();

        assert!(err.to_string().contains("Valid categories: Food, Transport"));
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!(parse(&["exit"]).unwrap(), SessionCommand::Quit);
        assert_eq!(parse(&["ls"]).unwrap(), SessionCommand::List);
        assert!(matches!(
            parse(&["visualize"]).unwrap(),
            SessionCommand::Chart { .. }
        ));
    }

    #[test]
    fn test_parse_formats() {
        assert_eq!(
            parse(&["summary", "--format", "json"]).unwrap(),
            SessionCommand::Summary {
                format: SummaryFormat::Json
            }
        );
        assert!(parse(&["summary", "--format", "csv"]).is_err());
        assert_eq!(
            parse(&["chart", "--format", "csv", "-w", "20"]).unwrap(),
            SessionCommand::Chart {
                format: ReportFormat::Csv,
                width: 20
            }
        );
    }

    #[test]
    fn test_parse_chart_width_is_bounded() {
        assert!(matches!(
            parse(&["chart"]).unwrap(),
            SessionCommand::Chart { width: 40, .. }
        ));
        assert!(matches!(
            parse(&["chart", "-w", "200"]).unwrap(),
            SessionCommand::Chart { width: 200, .. }
        ));
        assert!(parse(&["chart", "-w", "0"]).is_err());
        assert!(parse(&["chart", "-w", "201"]).is_err());
        assert!(parse(&["chart", "--width", "10000000000"]).is_err());
    }

    #[test]
    fn test_parse_income() {
        assert_eq!(parse_income("1000"), Ok(100000));
        assert_eq!(parse_income("0"), Ok(0));
        assert!(parse_income("-1").is_err());
        assert!(parse_income("lots").is_err());
    }
}

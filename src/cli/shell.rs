use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;

use crate::application::{AppError, Session};
use crate::domain::{Category, LedgerError, format_money, parse_cents, parse_date};
use crate::io::Exporter;

use super::commands::{CommandLine, ReportFormat, SessionCommand, SummaryFormat};
use super::render;
use super::tokenize::split_line;

/// Interactive front end of a session: reads command lines, applies them to
/// the session and renders the results to `out`.
///
/// A failing command is reported and the session carries on. Only failures to
/// write output are returned to the caller.
pub struct Shell<W: Write> {
    session: Session,
    out: W,
    default_file: PathBuf,
    currency: String,
}

impl<W: Write> Shell<W> {
    pub fn new(session: Session, out: W, default_file: PathBuf, currency: String) -> Self {
        Self {
            session,
            out,
            default_file,
            currency,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Read and execute lines until `quit` or end of input.
    pub fn run<R: BufRead>(&mut self, input: R, prompt: bool) -> Result<()> {
        let mut lines = input.lines();
        loop {
            if prompt {
                write!(self.out, "> ")?;
                self.out.flush()?;
            }
            let Some(line) = lines.next() else {
                break;
            };
            if !self.execute_line(&line?)? {
                break;
            }
        }
        Ok(())
    }

    /// Execute one input line. Returns false when the session should end.
    pub fn execute_line(&mut self, line: &str) -> Result<bool> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(true);
        }

        let args = match split_line(line) {
            Ok(args) => args,
            Err(e) => {
                writeln!(self.out, "Error: {}", e)?;
                return Ok(true);
            }
        };

        let command = match CommandLine::try_parse_from(args) {
            Ok(parsed) => parsed.command,
            Err(e) => {
                // Covers `help` and `--help` as well as usage errors
                write!(self.out, "{}", e.render())?;
                return Ok(true);
            }
        };

        self.execute(command)
    }

    /// Execute a parsed command. Returns false when the session should end.
    pub fn execute(&mut self, command: SessionCommand) -> Result<bool> {
        tracing::debug!(?command, "executing session command");

        let result = match command {
            SessionCommand::Quit => return Ok(false),
            SessionCommand::Add {
                amount,
                category,
                date,
                description,
            } => self.add(&amount, category, date.as_deref(), description),
            SessionCommand::Income { amount } => self.income(&amount),
            SessionCommand::List => self.list(),
            SessionCommand::Summary { format } => self.summary(format),
            SessionCommand::Chart { format, width } => self.chart(format, usize::from(width)),
            SessionCommand::Save { path } => self.save(path),
            SessionCommand::Load { path } => self.load(path),
            SessionCommand::Check { path } => self.check(path),
        };

        if let Err(err) = result {
            self.report_error(&err)?;
        }
        Ok(true)
    }

    fn report_error(&mut self, err: &anyhow::Error) -> Result<()> {
        match err.downcast_ref::<AppError>() {
            Some(AppError::Ledger(LedgerError::Validation { .. })) => {
                tracing::debug!(error = %err, "expense rejected");
                writeln!(self.out, "Warning: {}", err)?;
            }
            _ => {
                tracing::debug!(error = %err, "command failed");
                writeln!(self.out, "Error: {}", err)?;
            }
        }
        Ok(())
    }

    fn add(
        &mut self,
        amount: &str,
        category: Category,
        date: Option<&str>,
        description: String,
    ) -> Result<()> {
        let amount_cents =
            parse_cents(amount).context("Invalid amount format. Use '250.00' or '250'")?;
        let date = match date {
            Some(date_str) => parse_input_date(date_str)?,
            None => Local::now().date_naive(),
        };

        let record = self
            .session
            .add_expense(date, category, amount_cents, description)?;
        let message = format!(
            "Expense added! {} {} on {}",
            record.category,
            format_money(record.amount_cents, &self.currency),
            record.date
        );

        writeln!(self.out, "{}", message)?;
        self.write_status_line()
    }

    fn income(&mut self, amount: &str) -> Result<()> {
        let income_cents =
            parse_cents(amount).context("Invalid income format. Use '50000.00' or '50000'")?;

        if self.session.set_income(income_cents)? {
            writeln!(
                self.out,
                "Monthly income set to {}",
                format_money(income_cents, &self.currency)
            )?;
        } else {
            writeln!(
                self.out,
                "Monthly income unchanged ({})",
                format_money(income_cents, &self.currency)
            )?;
        }
        self.write_status_line()
    }

    fn list(&mut self) -> Result<()> {
        let table = render::render_expense_table(self.session.ledger().records(), &self.currency);
        write!(self.out, "{}", table)?;
        Ok(())
    }

    fn summary(&mut self, format: SummaryFormat) -> Result<()> {
        let summary = self.session.summary();

        match format {
            SummaryFormat::Json => {
                let json = serde_json::json!({
                    "monthly_income": summary.monthly_income,
                    "total_expenses": summary.total_expenses,
                    "remaining_balance": summary.remaining_balance,
                    "expense_count": summary.expense_count,
                    "budget": summary.status(),
                });
                writeln!(self.out, "{}", serde_json::to_string_pretty(&json)?)?;
            }
            SummaryFormat::Table if !summary.is_reportable() => {
                writeln!(
                    self.out,
                    "Set a monthly income and add expenses to see your financial summary."
                )?;
            }
            SummaryFormat::Table => {
                write!(self.out, "{}", render::render_summary(&summary, &self.currency))?;
            }
        }
        Ok(())
    }

    fn chart(&mut self, format: ReportFormat, width: usize) -> Result<()> {
        let report = self.session.category_report();

        match format {
            ReportFormat::Table if report.is_empty() => {
                writeln!(self.out, "No expenses to visualize")?;
            }
            ReportFormat::Table => {
                let chart = render::render_bar_chart(&report, &self.currency, width);
                write!(self.out, "{}", chart)?;
            }
            ReportFormat::Json => {
                writeln!(self.out, "{}", serde_json::to_string_pretty(&report)?)?;
            }
            ReportFormat::Csv => {
                Exporter::new(self.session.ledger()).export_categories_csv(&mut self.out)?;
            }
        }
        Ok(())
    }

    fn save(&mut self, path: Option<PathBuf>) -> Result<()> {
        let path = path.unwrap_or_else(|| self.default_file.clone());
        let count = self.session.save(&path)?;

        writeln!(
            self.out,
            "Expenses saved to {} ({} records)",
            path.display(),
            count
        )?;
        Ok(())
    }

    fn load(&mut self, path: Option<PathBuf>) -> Result<()> {
        let path = path.unwrap_or_else(|| self.default_file.clone());
        let result = self.session.load(&path)?;

        writeln!(
            self.out,
            "Expenses loaded from {} ({} records)",
            path.display(),
            result.imported
        )?;
        self.write_non_positive_note(result.non_positive)?;
        self.write_status_line()
    }

    fn check(&mut self, path: Option<PathBuf>) -> Result<()> {
        let path = path.unwrap_or_else(|| self.default_file.clone());
        let result = self.session.validate(&path)?;

        writeln!(
            self.out,
            "{} is a valid expense file ({} records)",
            path.display(),
            result.imported
        )?;
        self.write_non_positive_note(result.non_positive)
    }

    fn write_non_positive_note(&mut self, count: usize) -> Result<()> {
        if count > 0 {
            writeln!(
                self.out,
                "Note: {} expense(s) have a zero or negative amount",
                count
            )?;
        }
        Ok(())
    }

    fn write_status_line(&mut self) -> Result<()> {
        let line = render::render_status_line(&self.session.summary(), &self.currency);
        write!(self.out, "{}", line)?;
        Ok(())
    }
}

fn parse_input_date(s: &str) -> Result<NaiveDate> {
    parse_date(s).with_context(|| format!("Invalid date format '{}'. Use YYYY-MM-DD", s))
}

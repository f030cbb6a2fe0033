use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::application::Session;
use crate::domain::Cents;

pub mod commands;
pub mod render;
pub mod shell;
pub mod tokenize;

pub use commands::{SessionCommand, parse_income};
pub use shell::Shell;

/// Expense Tracker - monthly expenses against your income
#[derive(Parser, Debug)]
#[command(name = "expense-tracker")]
#[command(about = "Track monthly expenses and savings in an interactive session")]
#[command(version)]
pub struct Cli {
    /// CSV file used by `save` and `load` when no path is given
    #[arg(short, long, default_value = "expenses.csv")]
    pub file: PathBuf,

    /// Monthly income to start the session with (e.g., "50000" or "50000.00")
    #[arg(long, value_parser = parse_income)]
    pub income: Option<Cents>,

    /// Load expenses from this CSV file when the session starts
    #[arg(long)]
    pub load: Option<PathBuf>,

    /// Currency symbol used when displaying amounts
    #[arg(long, default_value = "₹")]
    pub currency: String,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Run a session over stdin/stdout until `quit` or end of input.
    pub fn run(self) -> Result<()> {
        let stdin = io::stdin();
        let interactive = stdin.is_terminal();
        if interactive {
            println!("Expense & Savings Tracker. Type 'help' for commands, 'quit' to leave.");
        }

        let mut shell = self.into_shell(io::stdout().lock())?;
        shell.run(stdin.lock(), interactive)
    }

    /// Build the session shell, applying the startup income and file.
    pub fn into_shell<W: io::Write>(self, out: W) -> Result<Shell<W>> {
        let mut session = Session::new();
        if let Some(income) = self.income {
            session.set_income(income)?;
        }

        let mut shell = Shell::new(session, out, self.file, self.currency);
        if let Some(path) = self.load {
            shell.execute(SessionCommand::Load { path: Some(path) })?;
        }
        Ok(shell)
    }
}

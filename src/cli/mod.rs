use std::fs::File;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::{Env, Target};

use crate::application::{Bank, BankError, Level, Logger};
use crate::storage::FileSystem;

/// Support Bank - load transaction files and inspect account balances
#[derive(Parser, Debug)]
#[command(name = "support-bank")]
#[command(about = "Load transactions from CSV, JSON or XML files and report account balances")]
#[command(version)]
pub struct Cli {
    /// Transaction files to load before the prompt opens
    pub files: Vec<PathBuf>,

    /// Log informational messages as well as warnings and errors
    #[arg(short, long)]
    pub verbose: bool,

    /// Write log messages to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// One line typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Load(String),
    ListAll,
    List(String),
    Exit,
    Unknown,
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim_end_matches(['\r', '\n']);
        if let Some(path) = line.strip_prefix("load ") {
            Command::Load(path.to_string())
        } else if line == "list all" {
            Command::ListAll
        } else if let Some(name) = line.strip_prefix("list ") {
            Command::List(name.to_string())
        } else if line == "exit" {
            Command::Exit
        } else {
            Command::Unknown
        }
    }
}

impl Cli {
    /// Install env_logger as the `log` sink. `RUST_LOG` overrides the default filter.
    pub fn init_logging(&self) -> Result<()> {
        let default_filter = if self.verbose { "info" } else { "warn" };
        let mut builder =
            env_logger::Builder::from_env(Env::default().default_filter_or(default_filter));

        if let Some(path) = &self.log_file {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file '{}'", path.display()))?;
            builder.target(Target::Pipe(Box::new(file)));
        }

        builder.try_init().context("Failed to initialise logging")?;
        Ok(())
    }

    pub fn run(self) -> Result<()> {
        self.init_logging()?;

        let mut bank: Bank = Bank::default();
        let stdin = io::stdin();
        let stdout = io::stdout();
        let mut out = stdout.lock();

        for path in &self.files {
            load(&mut bank, path, &mut out)?;
        }

        serve_customer(&mut bank, stdin.lock(), &mut out)
    }
}

/// Run the interactive prompt until `exit` or end of input.
pub fn serve_customer<F, L, R, W>(bank: &mut Bank<F, L>, mut input: R, out: &mut W) -> Result<()>
where
    F: FileSystem,
    L: Logger,
    R: BufRead,
    W: Write,
{
    bank.logger().log(Level::Info, "Support Bank starting.");
    writeln!(out, "Welcome to the Support Bank!")?;

    let mut line = String::new();
    loop {
        writeln!(out)?;
        writeln!(out, "Available commands:")?;
        writeln!(out, "> load <filepath>")?;
        writeln!(out, "> list all")?;
        writeln!(out, "> list <name>")?;
        writeln!(out, "> exit")?;
        writeln!(out, "Please enter a command:")?;
        write!(out, "> ")?;
        out.flush()?;

        line.clear();
        let read = input.read_line(&mut line).context("Failed to read command")?;
        let command = if read == 0 {
            Command::Exit
        } else {
            Command::parse(&line)
        };

        match command {
            Command::Load(path) => load(bank, Path::new(&path), out)?,
            Command::ListAll => {
                writeln!(out, "Attempting to list all accounts...")?;
                bank.list_all_accounts_and_balances(out)?;
            }
            Command::List(name) => {
                writeln!(out, "Attempting to list all transactions for '{}'...", name)?;
                bank.list_all_transactions_for_account(&name, out)?;
            }
            Command::Exit => {
                writeln!(out, "Thanks for using the Support Bank. Goodbye!")?;
                return Ok(());
            }
            Command::Unknown => {
                writeln!(out, "Your command was not understood. Please try again.")?;
            }
        }
    }
}

/// Load one file. A file that cannot be loaded has already been reported to
/// the user, so only output failures end the session.
fn load<F, L, W>(bank: &mut Bank<F, L>, path: &Path, out: &mut W) -> Result<()>
where
    F: FileSystem,
    L: Logger,
    W: Write,
{
    writeln!(out, "Attempting to load transactions from '{}'...", path.display())?;
    match bank.load_transactions_from_file(path, out) {
        Ok(_) => Ok(()),
        Err(BankError::FileUnavailable { .. } | BankError::UnsupportedFormat { .. }) => Ok(()),
        Err(e) => Err(e.into()),
    }
}

use std::io::{self, Read, Write};
use std::path::Path;

use crate::domain::{Balance, Ledger, Transaction, compute_balance};
use crate::io::{DecodeOutcome, Format};
use crate::storage::{FileSystem, OsFileSystem};

use super::reporting::{
    ACCOUNT_HEADER_ROW, ACCOUNT_HEADER_RULE, NO_ACCOUNTS, NO_TRANSACTIONS, TRANSACTION_HEADER_ROW,
    TRANSACTION_HEADER_RULE, account_balances, account_transactions,
};
use super::{BankError, Level, LogFacade, Logger};

pub const UNABLE_TO_LOAD_FILE: &str = "Unable to load file.";
pub const UNSUPPORTED_FILE_EXTENSION: &str =
    "Unsupported file extension (should be .csv, .json or .xml).";
pub const LOADING_COMPLETE: &str = "Loading complete.";

/// Outcome of a load that got as far as decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadSummary {
    pub format: Format,
    pub loaded: usize,
    pub failed: usize,
}

/// A bank session: the ledger plus the collaborators used to fill and query it.
///
/// User-facing text goes to the writer passed to each operation, diagnostics go
/// to the logger the bank was built with.
pub struct Bank<F = OsFileSystem, L = LogFacade> {
    ledger: Ledger,
    files: F,
    logger: L,
}

impl Default for Bank {
    fn default() -> Self {
        Self::new(OsFileSystem, LogFacade)
    }
}

impl<L: Logger> Bank<OsFileSystem, L> {
    /// Bank reading from the local disk.
    pub fn with_logger(logger: L) -> Self {
        Self::new(OsFileSystem, logger)
    }
}

impl<F: FileSystem, L: Logger> Bank<F, L> {
    pub fn new(files: F, logger: L) -> Self {
        Self {
            ledger: Ledger::new(),
            files,
            logger,
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn transactions(&self) -> &[Transaction] {
        self.ledger.transactions()
    }

    pub fn logger(&self) -> &L {
        &self.logger
    }

    /// Net balance of one account over everything loaded so far.
    pub fn balance(&self, account: &str) -> Balance {
        compute_balance(account, self.ledger.transactions())
    }

    /// Load transactions from `path` and append them to the ledger.
    ///
    /// Records that fail to parse are reported one by one and skipped. If the
    /// file cannot be opened or has an unsupported extension nothing is
    /// appended and the error is returned after being reported.
    pub fn load_transactions_from_file<W: Write>(
        &mut self,
        path: impl AsRef<Path>,
        out: &mut W,
    ) -> Result<LoadSummary, BankError> {
        let path = path.as_ref();

        let (format, contents) = {
            let mut reader = match self.files.open(path) {
                Ok(reader) => reader,
                Err(source) => return self.unavailable(path, source, out),
            };

            let format = match Format::from_path(path) {
                Some(format) => format,
                None => {
                    let error = BankError::UnsupportedFormat {
                        path: path.to_path_buf(),
                    };
                    return self.fail(error, UNSUPPORTED_FILE_EXTENSION, out);
                }
            };

            let mut contents = Vec::new();
            if let Err(source) = reader.read_to_end(&mut contents) {
                return self.unavailable(path, source, out);
            }
            (format, contents)
        };
        let outcomes: Vec<DecodeOutcome> = format.decoder().decode(&mut contents.as_slice());

        let mut loaded = Vec::with_capacity(outcomes.len());
        let mut failed = 0;
        for outcome in outcomes {
            match outcome {
                Ok(transaction) => loaded.push(transaction),
                Err(e) => {
                    failed += 1;
                    let message = e.to_string();
                    self.logger.log(Level::Error, &message);
                    writeln!(out, "{}", message)?;
                }
            }
        }

        let summary = LoadSummary {
            format,
            loaded: loaded.len(),
            failed,
        };
        self.ledger.append(loaded);

        self.logger.log(
            Level::Info,
            &format!(
                "Loaded {} transactions from {} file '{}' ({} skipped)",
                summary.loaded,
                format,
                path.display(),
                summary.failed
            ),
        );
        writeln!(out, "{}", LOADING_COMPLETE)?;

        Ok(summary)
    }

    /// Print every account with its balance. Returns the number of accounts shown.
    pub fn list_all_accounts_and_balances<W: Write>(
        &self,
        out: &mut W,
    ) -> Result<usize, BankError> {
        if self.ledger.is_empty() {
            self.logger.log(
                Level::Warn,
                "No accounts to show: no transactions have been loaded",
            );
            writeln!(out, "{}", NO_ACCOUNTS)?;
            return Ok(0);
        }

        let accounts = account_balances(&self.ledger);
        writeln!(out, "{}", ACCOUNT_HEADER_ROW)?;
        writeln!(out, "{}", ACCOUNT_HEADER_RULE)?;
        for account in &accounts {
            writeln!(out, "{}", account)?;
        }

        Ok(accounts.len())
    }

    /// Print every transaction involving `account`, in load order.
    /// Returns the number of transactions shown.
    pub fn list_all_transactions_for_account<W: Write>(
        &self,
        account: &str,
        out: &mut W,
    ) -> Result<usize, BankError> {
        let transactions = account_transactions(&self.ledger, account);
        if transactions.is_empty() {
            self.logger.log(
                Level::Warn,
                &format!("No transactions to show for account '{}'", account),
            );
            writeln!(out, "{}", NO_TRANSACTIONS)?;
            return Ok(0);
        }

        writeln!(out, "{}", TRANSACTION_HEADER_ROW)?;
        writeln!(out, "{}", TRANSACTION_HEADER_RULE)?;
        for transaction in &transactions {
            writeln!(out, "{}", transaction)?;
        }

        Ok(transactions.len())
    }

    fn unavailable<T, W: Write>(
        &self,
        path: &Path,
        source: io::Error,
        out: &mut W,
    ) -> Result<T, BankError> {
        let error = BankError::FileUnavailable {
            path: path.to_path_buf(),
            source,
        };
        self.fail(error, UNABLE_TO_LOAD_FILE, out)
    }

    fn fail<T, W: Write>(
        &self,
        error: BankError,
        message: &str,
        out: &mut W,
    ) -> Result<T, BankError> {
        self.logger.log(Level::Error, &error.to_string());
        writeln!(out, "{}", message)?;
        Err(error)
    }
}

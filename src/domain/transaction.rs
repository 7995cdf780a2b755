use std::fmt;

use chrono::NaiveDate;

use super::{Cents, format_cents};

/// Date format used when a transaction is shown to the user.
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

/// A transaction moves an amount from one named account to another.
/// Transactions are never mutated once they enter the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Transaction {
    /// Calendar day the transaction took place
    pub date: NaiveDate,
    /// Sending account (balance decreases)
    pub from: String,
    /// Receiving account (balance increases)
    pub to: String,
    /// Free text description
    pub narrative: String,
    /// Amount in cents
    pub amount: Cents,
}

impl Transaction {
    pub fn new(
        date: NaiveDate,
        from: impl Into<String>,
        to: impl Into<String>,
        narrative: impl Into<String>,
        amount: Cents,
    ) -> Self {
        Self {
            date,
            from: from.into(),
            to: to.into(),
            narrative: narrative.into(),
            amount,
        }
    }

    /// Returns true if the account sent or received this transaction
    pub fn involves(&self, account: &str) -> bool {
        self.from == account || self.to == account
    }
}

/// Renders a report row: date, padded names and narrative, two-decimal amount.
impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {:<10} | {:<10} | {:<35} | {}",
            self.date.format(DISPLAY_DATE_FORMAT),
            self.from,
            self.to,
            self.narrative,
            format_cents(self.amount)
        )
    }
}

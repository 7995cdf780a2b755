use std::fmt;

use super::{Balance, format_cents};

/// An account is any name that appears as a sender or recipient.
/// It carries no state of its own; the balance is derived from the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub name: String,
    pub balance: Balance,
}

impl Account {
    pub fn new(name: impl Into<String>, balance: Balance) -> Self {
        Self {
            name: name.into(),
            balance,
        }
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<10} | {}", self.name, format_cents(self.balance))
    }
}

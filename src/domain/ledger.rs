use std::collections::BTreeMap;

use super::{Balance, Transaction};

/// Session-scoped, append-only list of transactions in load order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append transactions after the existing ones, keeping their order.
    pub fn append(&mut self, transactions: impl IntoIterator<Item = Transaction>) {
        self.transactions.extend(transactions);
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

/// Compute the balance for a single account from a list of transactions.
/// Balance = sum of incoming transactions - sum of outgoing transactions
pub fn compute_balance(account: &str, transactions: &[Transaction]) -> Balance {
    transactions.iter().fold(0, |mut balance, transaction| {
        let amount = Balance::from(transaction.amount);
        if transaction.to == account {
            balance += amount;
        }
        if transaction.from == account {
            balance -= amount;
        }
        balance
    })
}

/// Compute balances for every account named in a list of transactions.
/// Returns a map of account name -> balance, ordered by name.
pub fn compute_all_balances(transactions: &[Transaction]) -> BTreeMap<&str, Balance> {
    let mut balances: BTreeMap<&str, Balance> = BTreeMap::new();

    for transaction in transactions {
        let amount = Balance::from(transaction.amount);
        *balances.entry(transaction.from.as_str()).or_insert(0) -= amount;
        *balances.entry(transaction.to.as_str()).or_insert(0) += amount;
    }

    balances
}

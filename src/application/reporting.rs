use crate::domain::{Account, Ledger, Transaction, compute_all_balances};

pub const ACCOUNT_HEADER_ROW: &str = "Name       | Balance";
pub const ACCOUNT_HEADER_RULE: &str = "---------- | -------";
pub const NO_ACCOUNTS: &str = "No accounts to show.";

pub const TRANSACTION_HEADER_ROW: &str =
    "Date       | From       | To         | Narrative                           | Amount";
pub const TRANSACTION_HEADER_RULE: &str =
    "---------- | ---------- | ---------- | ----------------------------------- | ------";
pub const NO_TRANSACTIONS: &str = "No transactions to show.";

/// Every account named in the ledger with its net balance, ordered by name.
pub fn account_balances(ledger: &Ledger) -> Vec<Account> {
    compute_all_balances(ledger.transactions())
        .into_iter()
        .map(|(name, balance)| Account::new(name, balance))
        .collect()
}

/// Transactions sent or received by `account`, in ledger order.
pub fn account_transactions<'a>(ledger: &'a Ledger, account: &str) -> Vec<&'a Transaction> {
    ledger
        .transactions()
        .iter()
        .filter(|transaction| transaction.involves(account))
        .collect()
}

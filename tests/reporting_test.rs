mod common;

use anyhow::Result;
use common::{
    ACCOUNT_HOLDERS, Fixture, output_lines, standard_transactions, to_csv, to_json, to_xml,
};
use support_bank::application::Level;
use support_bank::application::reporting::{
    ACCOUNT_HEADER_ROW, ACCOUNT_HEADER_RULE, NO_ACCOUNTS, NO_TRANSACTIONS, TRANSACTION_HEADER_ROW,
    TRANSACTION_HEADER_RULE,
};
use support_bank::domain::{Account, format_cents};

#[test]
fn test_balances_after_standard_load() -> Result<()> {
    let fixture = Fixture::new()?;
    let path = fixture.write("test.csv", &to_csv(&standard_transactions()))?;
    let mut bank = fixture.bank();
    bank.load_transactions_from_file(&path, &mut std::io::sink())?;

    let balances: Vec<String> = ACCOUNT_HOLDERS
        .iter()
        .map(|name| format_cents(bank.balance(name)))
        .collect();

    assert_eq!(
        balances,
        vec!["-10.00", "6.50", "-4.95", "0.45", "13.00", "-5.00"]
    );
    Ok(())
}

#[test]
fn test_list_all_accounts() -> Result<()> {
    let fixture = Fixture::new()?;
    let path = fixture.write("test.json", &to_json(&standard_transactions()))?;
    let mut bank = fixture.bank();
    bank.load_transactions_from_file(&path, &mut std::io::sink())?;
    let mut out = Vec::new();

    let shown = bank.list_all_accounts_and_balances(&mut out)?;

    assert_eq!(shown, ACCOUNT_HOLDERS.len());
    let lines = output_lines(&out);
    assert_eq!(lines.len(), 2 + ACCOUNT_HOLDERS.len());
    assert_eq!(lines[0], ACCOUNT_HEADER_ROW);
    assert_eq!(lines[1], ACCOUNT_HEADER_RULE);
    assert!(lines.contains(&Account::new(ACCOUNT_HOLDERS[1], 1000 - 350).to_string()));
    assert!(lines.contains(&Account::new(ACCOUNT_HOLDERS[2], 350 - 45 - 800).to_string()));
    assert!(lines.contains(&"Eve W      | 13.00".to_string()));
    assert_eq!(fixture.logger.count(Level::Warn), 0);
    Ok(())
}

#[test]
fn test_list_all_accounts_when_empty() -> Result<()> {
    let fixture = Fixture::new()?;
    let bank = fixture.bank();
    let mut out = Vec::new();

    let shown = bank.list_all_accounts_and_balances(&mut out)?;

    assert_eq!(shown, 0);
    assert_eq!(output_lines(&out), vec![NO_ACCOUNTS]);
    assert_eq!(fixture.logger.count(Level::Warn), 1);
    assert_eq!(fixture.logger.count(Level::Error), 0);
    Ok(())
}

#[test]
fn test_list_transactions_for_account() -> Result<()> {
    let fixture = Fixture::new()?;
    let transactions = standard_transactions();
    let path = fixture.write("test.xml", &to_xml(&transactions))?;
    let mut bank = fixture.bank();
    bank.load_transactions_from_file(&path, &mut std::io::sink())?;
    let selected = ACCOUNT_HOLDERS[2];
    let relevant: Vec<String> = transactions
        .iter()
        .filter(|t| t.from == selected || t.to == selected)
        .map(|t| t.to_string())
        .collect();
    let mut out = Vec::new();

    let shown = bank.list_all_transactions_for_account(selected, &mut out)?;

    assert_eq!(shown, 3);
    let lines = output_lines(&out);
    assert_eq!(lines.len(), 2 + relevant.len());
    assert_eq!(lines[0], TRANSACTION_HEADER_ROW);
    assert_eq!(lines[1], TRANSACTION_HEADER_RULE);
    assert_eq!(&lines[2..], relevant.as_slice());
    assert_eq!(
        lines[2],
        "10/09/2020 | Bob J      | Charlie T  | Cherries                            | 3.50"
    );
    Ok(())
}

#[test]
fn test_list_transactions_for_unknown_account() -> Result<()> {
    let fixture = Fixture::new()?;
    let path = fixture.write("test.csv", &to_csv(&standard_transactions()))?;
    let mut bank = fixture.bank();
    bank.load_transactions_from_file(&path, &mut std::io::sink())?;
    let mut out = Vec::new();

    let shown = bank.list_all_transactions_for_account("Mallory W", &mut out)?;

    assert_eq!(shown, 0);
    assert_eq!(output_lines(&out), vec![NO_TRANSACTIONS]);
    assert_eq!(fixture.logger.count(Level::Warn), 1);
    assert_eq!(fixture.logger.count(Level::Error), 0);
    Ok(())
}

#[test]
fn test_rows_round_trip_through_every_format() -> Result<()> {
    let fixture = Fixture::new()?;
    let transactions = standard_transactions();
    let expected_rows: Vec<String> = transactions
        .iter()
        .filter(|t| t.to == ACCOUNT_HOLDERS[4])
        .map(|t| t.to_string())
        .collect();

    for (name, contents) in [
        ("round.csv", to_csv(&transactions)),
        ("round.json", to_json(&transactions)),
        ("round.xml", to_xml(&transactions)),
    ] {
        let path = fixture.write(name, &contents)?;
        let mut bank = fixture.bank();
        bank.load_transactions_from_file(&path, &mut std::io::sink())?;
        let mut out = Vec::new();

        bank.list_all_transactions_for_account(ACCOUNT_HOLDERS[4], &mut out)?;

        assert_eq!(&output_lines(&out)[2..], expected_rows.as_slice(), "{}", name);
    }
    Ok(())
}

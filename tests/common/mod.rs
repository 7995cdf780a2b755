// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use support_bank::application::{Bank, RecordingLogger};
use support_bank::domain::{Transaction, format_cents};
use support_bank::io::to_ole_serial;
use support_bank::storage::OsFileSystem;
use tempfile::TempDir;

pub const ACCOUNT_HOLDERS: [&str; 6] = [
    "Alice S",
    "Bob J",
    "Charlie T",
    "David B",
    "Eve W",
    "Frank W",
];

/// Helper to parse a date string into NaiveDate
pub fn parse_date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
}

/// Test fixture: five transactions touching all six account holders
pub fn standard_transactions() -> Vec<Transaction> {
    vec![
        Transaction::new(
            parse_date("2019-08-06"),
            ACCOUNT_HOLDERS[0],
            ACCOUNT_HOLDERS[1],
            "Apples",
            1000,
        ),
        Transaction::new(
            parse_date("2020-09-10"),
            ACCOUNT_HOLDERS[1],
            ACCOUNT_HOLDERS[2],
            "Cherries",
            350,
        ),
        Transaction::new(
            parse_date("2021-10-20"),
            ACCOUNT_HOLDERS[2],
            ACCOUNT_HOLDERS[3],
            "Grapes",
            45,
        ),
        Transaction::new(
            parse_date("2022-11-25"),
            ACCOUNT_HOLDERS[2],
            ACCOUNT_HOLDERS[4],
            "Lemons, limes",
            800,
        ),
        Transaction::new(
            parse_date("2023-12-30"),
            ACCOUNT_HOLDERS[5],
            ACCOUNT_HOLDERS[4],
            "Peaches",
            500,
        ),
    ]
}

pub const CSV_HEADER: &str = "Date,From,To,Narrative,Amount";

pub fn csv_row(transaction: &Transaction) -> String {
    let narrative = if transaction.narrative.contains(',') {
        format!("\"{}\"", transaction.narrative)
    } else {
        transaction.narrative.clone()
    };
    format!(
        "{},{},{},{},{}",
        transaction.date.format("%d/%m/%Y"),
        transaction.from,
        transaction.to,
        narrative,
        format_cents(transaction.amount)
    )
}

pub fn to_csv(transactions: &[Transaction]) -> String {
    let mut lines = vec![CSV_HEADER.to_string()];
    lines.extend(transactions.iter().map(csv_row));
    lines.join("\n")
}

pub fn to_json(transactions: &[Transaction]) -> String {
    let elements: Vec<String> = transactions
        .iter()
        .map(|t| {
            format!(
                "{{\"date\":\"{}\",\"fromAccount\":\"{}\",\"toAccount\":\"{}\",\"narrative\":\"{}\",\"amount\":{}}}",
                t.date.format("%Y-%m-%d"),
                t.from,
                t.to,
                t.narrative,
                format_cents(t.amount)
            )
        })
        .collect();
    format!("[{}]", elements.join(","))
}

pub fn to_xml(transactions: &[Transaction]) -> String {
    let records: String = transactions
        .iter()
        .map(|t| {
            format!(
                "<SupportTransaction Date=\"{}\"><Description>{}</Description><Value>{}</Value>\
                 <Parties><From>{}</From><To>{}</To></Parties></SupportTransaction>",
                to_ole_serial(t.date),
                t.narrative,
                format_cents(t.amount),
                t.from,
                t.to
            )
        })
        .collect();
    format!(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?><TransactionList>{}</TransactionList>",
        records
    )
}

/// A directory of real files plus a bank reading from disk
pub struct Fixture {
    pub dir: TempDir,
    pub logger: RecordingLogger,
}

impl Fixture {
    pub fn new() -> Result<Self> {
        Ok(Self {
            dir: TempDir::new()?,
            logger: RecordingLogger::new(),
        })
    }

    /// Write `contents` to `name` inside the fixture directory
    pub fn write(&self, name: &str, contents: &str) -> Result<PathBuf> {
        let path = self.dir.path().join(name);
        fs::write(&path, contents)?;
        Ok(path)
    }

    /// Path inside the fixture directory that does not exist
    pub fn missing(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn bank(&self) -> Bank<OsFileSystem, &RecordingLogger> {
        Bank::with_logger(&self.logger)
    }
}

/// Non-empty, trimmed lines of captured output
pub fn output_lines(out: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(out)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

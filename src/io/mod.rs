//! Decoding of transaction files.
//!
//! Every supported format implements [`Decoder`], which turns a byte stream into one
//! [`DecodeOutcome`] per record. A malformed record never stops the stream; it shows
//! up as a [`RecordError`] in its place.

mod csv;
mod json;
mod xml;

use std::fmt;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::{Cents, ParseCentsError, Transaction, parse_cents};

pub use self::csv::CsvDecoder;
pub use self::json::JsonDecoder;
pub use self::xml::{XmlDecoder, parse_ole_date, to_ole_serial};

/// Result of decoding a single record.
pub type DecodeOutcome = Result<Transaction, RecordError>;

/// Turns the contents of a transaction file into decode outcomes.
pub trait Decoder {
    fn decode(&self, reader: &mut dyn Read) -> Vec<DecodeOutcome>;
}

/// Where in a file a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordPosition {
    /// 1-based line number (CSV)
    Line(u64),
    /// 0-based element index (JSON, XML)
    Index(usize),
    /// The document as a whole could not be read
    Document,
}

impl fmt::Display for RecordPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordPosition::Line(line) => write!(f, "on line {}", line),
            RecordPosition::Index(index) => write!(f, "at index {}", index),
            RecordPosition::Document => write!(f, "in document"),
        }
    }
}

/// A record that could not be turned into a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unable to parse transaction {position}: {reason}")]
pub struct RecordError {
    pub position: RecordPosition,
    pub reason: RecordErrorKind,
}

impl RecordError {
    pub fn new(position: RecordPosition, reason: RecordErrorKind) -> Self {
        Self { position, reason }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordErrorKind {
    #[error("invalid date '{0}'")]
    InvalidDate(String),

    #[error(transparent)]
    InvalidAmount(#[from] ParseCentsError),

    #[error("missing {0}")]
    MissingField(&'static str),

    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    #[error("malformed record: {0}")]
    Malformed(String),
}

/// Supported transaction file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Csv,
    Json,
    Xml,
}

impl Format {
    /// Pick the format from a path's extension, ignoring ASCII case.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?;
        [Format::Csv, Format::Json, Format::Xml]
            .into_iter()
            .find(|format| extension.eq_ignore_ascii_case(format.extension()))
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Format::Csv => "csv",
            Format::Json => "json",
            Format::Xml => "xml",
        }
    }

    pub fn decoder(&self) -> Box<dyn Decoder> {
        match self {
            Format::Csv => Box::new(CsvDecoder),
            Format::Json => Box::new(JsonDecoder),
            Format::Xml => Box::new(XmlDecoder),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".{}", self.extension())
    }
}

/// Field values of one record, before validation.
struct RawRecord<'a> {
    date: Result<NaiveDate, RecordErrorKind>,
    from: Option<&'a str>,
    to: Option<&'a str>,
    narrative: Option<&'a str>,
    amount: Option<&'a str>,
}

impl RawRecord<'_> {
    /// Validate all fields and build the transaction.
    fn into_transaction(self) -> Result<Transaction, RecordErrorKind> {
        let date = self.date?;
        let from = required(self.from, "from account")?;
        let to = required(self.to, "to account")?;
        let amount_text = self.amount.ok_or(RecordErrorKind::MissingField("amount"))?;
        let amount: Cents = parse_cents(amount_text)?;
        let narrative = self.narrative.unwrap_or_default();
        Ok(Transaction::new(date, from, to, narrative, amount))
    }
}

fn required<'a>(value: Option<&'a str>, field: &'static str) -> Result<&'a str, RecordErrorKind> {
    match value.map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(RecordErrorKind::MissingField(field)),
    }
}

fn parse_date(value: &str, format: &str) -> Result<NaiveDate, RecordErrorKind> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, format)
        .map_err(|_| RecordErrorKind::InvalidDate(value.to_string()))
}

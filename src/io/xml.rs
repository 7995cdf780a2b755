use std::io::Read;

use chrono::{NaiveDate, TimeDelta};
use quick_xml::Reader;
use quick_xml::events::Event;
use serde::Deserialize;

use super::{DecodeOutcome, Decoder, RawRecord, RecordError, RecordErrorKind, RecordPosition};
use crate::domain::Transaction;

/// Day zero of OLE Automation date serials.
fn ole_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1899, 12, 30).expect("1899-12-30 is a valid date")
}

/// Decodes XML transaction lists:
///
/// ```xml
/// <TransactionList>
///   <SupportTransaction Date="43683">
///     <Description>Apples</Description>
///     <Value>10.00</Value>
///     <Parties><From>Alice S</From><To>Bob J</To></Parties>
///   </SupportTransaction>
/// </TransactionList>
/// ```
///
/// `Date` is an OLE Automation serial: whole days since 1899-12-30.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlDecoder;

// Every field is optional text so that missing values are reported by name.
#[derive(Debug, Deserialize)]
struct XmlTransaction {
    #[serde(rename = "@Date")]
    date: Option<String>,
    #[serde(rename = "Description")]
    description: Option<String>,
    #[serde(rename = "Value")]
    value: Option<String>,
    #[serde(rename = "Parties")]
    parties: Option<XmlParties>,
}

#[derive(Debug, Default, Deserialize)]
struct XmlParties {
    #[serde(rename = "From")]
    from: Option<String>,
    #[serde(rename = "To")]
    to: Option<String>,
}

const RECORD_ELEMENT: &[u8] = b"SupportTransaction";

impl Decoder for XmlDecoder {
    fn decode(&self, reader: &mut dyn Read) -> Vec<DecodeOutcome> {
        let mut text = String::new();
        if let Err(e) = reader.read_to_string(&mut text) {
            return vec![Err(document_error(e.to_string()))];
        }

        // Each record is cut out of the document and deserialized on its own
        let mut outcomes = Vec::new();
        let mut xml = Reader::from_str(&text);
        let mut in_root = false;
        let mut seen_root = false;
        loop {
            let event = match xml.read_event() {
                Ok(event) => event,
                Err(e) => {
                    outcomes.push(Err(document_error(e.to_string())));
                    return outcomes;
                }
            };
            let tag_end = xml.buffer_position() as usize;

            match event {
                Event::Start(_) if !seen_root => {
                    in_root = true;
                    seen_root = true;
                }
                Event::Start(element) => {
                    // `<` + tag + `>`
                    let tag_start = tag_end - element.len() - 2;
                    let is_record = in_root && element.local_name().as_ref() == RECORD_ELEMENT;
                    if let Err(e) = xml.read_to_end(element.name()) {
                        outcomes.push(Err(document_error(e.to_string())));
                        return outcomes;
                    }
                    if is_record {
                        let element_end = xml.buffer_position() as usize;
                        let index = outcomes.len();
                        outcomes.push(decode_element(&text[tag_start..element_end], index));
                    }
                }
                Event::Empty(_) if !seen_root => seen_root = true,
                Event::Empty(element) => {
                    if in_root && element.local_name().as_ref() == RECORD_ELEMENT {
                        // `<` + tag + `/>`
                        let tag_start = tag_end - element.len() - 3;
                        let index = outcomes.len();
                        outcomes.push(decode_element(&text[tag_start..tag_end], index));
                    }
                }
                Event::End(_) => in_root = false,
                Event::Eof => break,
                _ => {}
            }
        }

        if !seen_root {
            outcomes.push(Err(document_error("no root element".to_string())));
        }
        outcomes
    }
}

fn document_error(message: String) -> RecordError {
    RecordError::new(RecordPosition::Document, RecordErrorKind::Malformed(message))
}

fn decode_element(element: &str, index: usize) -> DecodeOutcome {
    quick_xml::de::from_str::<XmlTransaction>(element)
        .map_err(|e| RecordErrorKind::Malformed(e.to_string()))
        .and_then(decode_record)
        .map_err(|reason| RecordError::new(RecordPosition::Index(index), reason))
}

fn decode_record(record: XmlTransaction) -> Result<Transaction, RecordErrorKind> {
    let date = record
        .date
        .as_deref()
        .ok_or(RecordErrorKind::MissingField("date"))
        .and_then(parse_ole_date);
    let parties = record.parties.unwrap_or_default();

    RawRecord {
        date,
        from: parties.from.as_deref(),
        to: parties.to.as_deref(),
        narrative: record.description.as_deref(),
        amount: record.value.as_deref(),
    }
    .into_transaction()
}

/// Convert an OLE Automation serial to a calendar date.
/// Any fractional (time of day) part is ignored.
pub fn parse_ole_date(serial: &str) -> Result<NaiveDate, RecordErrorKind> {
    let invalid = || RecordErrorKind::InvalidDate(serial.to_string());
    let trimmed = serial.trim();
    let (days, fraction) = trimmed.split_once('.').unwrap_or((trimmed, ""));
    if !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let days: i64 = days.parse().map_err(|_| invalid())?;
    TimeDelta::try_days(days)
        .and_then(|delta| ole_epoch().checked_add_signed(delta))
        .ok_or_else(invalid)
}

/// Inverse of [`parse_ole_date`].
pub fn to_ole_serial(date: NaiveDate) -> i64 {
    (date - ole_epoch()).num_days()
}

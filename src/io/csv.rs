use std::io::Read;

use csv::{ReaderBuilder, StringRecord};

use super::{
    DecodeOutcome, Decoder, RawRecord, RecordError, RecordErrorKind, RecordPosition, parse_date,
};
use crate::domain::Transaction;

const DATE_FORMAT: &str = "%d/%m/%Y";
const FIELD_COUNT: usize = 5;

/// Decodes comma-separated files with a header row and the columns
/// `Date,From,To,Narrative,Amount`. Dates are written day/month/year.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvDecoder;

impl Decoder for CsvDecoder {
    fn decode(&self, reader: &mut dyn Read) -> Vec<DecodeOutcome> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let mut outcomes = Vec::new();
        for (row, result) in csv_reader.records().enumerate() {
            // +2 for the header and 1-based lines, unless the reader knows better
            let fallback_line = row as u64 + 2;

            let outcome = match result {
                Ok(record) => {
                    let line = record.position().map_or(fallback_line, |p| p.line());
                    decode_record(&record)
                        .map_err(|reason| RecordError::new(RecordPosition::Line(line), reason))
                }
                Err(e) => {
                    let line = e.position().map_or(fallback_line, |p| p.line());
                    Err(RecordError::new(
                        RecordPosition::Line(line),
                        RecordErrorKind::Malformed(e.to_string()),
                    ))
                }
            };
            outcomes.push(outcome);
        }

        outcomes
    }
}

fn decode_record(record: &StringRecord) -> Result<Transaction, RecordErrorKind> {
    if record.len() != FIELD_COUNT {
        return Err(RecordErrorKind::FieldCount {
            expected: FIELD_COUNT,
            found: record.len(),
        });
    }

    RawRecord {
        date: parse_date(&record[0], DATE_FORMAT),
        from: record.get(1),
        to: record.get(2),
        narrative: record.get(3),
        amount: record.get(4),
    }
    .into_transaction()
}

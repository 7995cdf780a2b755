use std::io::Read;

use serde::Deserialize;
use serde_json::{Number, Value};

use super::{
    DecodeOutcome, Decoder, RawRecord, RecordError, RecordErrorKind, RecordPosition, parse_date,
};
use crate::domain::Transaction;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Decodes a JSON array of transaction objects:
/// `[{"date":"2019-08-06","fromAccount":"..","toAccount":"..","narrative":"..","amount":10.0}]`
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDecoder;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonTransaction {
    date: String,
    from_account: String,
    to_account: String,
    #[serde(default)]
    narrative: String,
    amount: Number,
}

impl Decoder for JsonDecoder {
    fn decode(&self, reader: &mut dyn Read) -> Vec<DecodeOutcome> {
        // Elements are kept as raw values so one bad element cannot fail the others
        let elements: Vec<Value> = match serde_json::from_reader(reader) {
            Ok(elements) => elements,
            Err(e) => {
                return vec![Err(RecordError::new(
                    RecordPosition::Document,
                    RecordErrorKind::Malformed(e.to_string()),
                ))];
            }
        };

        elements
            .into_iter()
            .enumerate()
            .map(|(index, element)| {
                decode_element(element)
                    .map_err(|reason| RecordError::new(RecordPosition::Index(index), reason))
            })
            .collect()
    }
}

fn decode_element(element: Value) -> Result<Transaction, RecordErrorKind> {
    let record: JsonTransaction = serde_json::from_value(element)
        .map_err(|e| RecordErrorKind::Malformed(e.to_string()))?;
    let amount = record.amount.to_string();

    RawRecord {
        date: parse_date(&record.date, DATE_FORMAT),
        from: Some(&record.from_account),
        to: Some(&record.to_account),
        narrative: Some(&record.narrative),
        amount: Some(&amount),
    }
    .into_transaction()
}

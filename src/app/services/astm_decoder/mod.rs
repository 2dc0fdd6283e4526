//! ASTM E1394 message decoder
//!
//! Maps the record types actually consumed from analyzer traffic (H, P, O,
//! R, L) onto the protocol-neutral [`ParsedMessage`]. Decoding never
//! fails: short records resolve to empty fields and unrecognized lines are
//! skipped, because instrument firmware routinely deviates from the
//! standard.

use crate::app::models::{ParsedMessage, Protocol, ResultRecord};
use crate::app::services::tokenizer::{positional_map, tokenize};
use crate::constants::astm;
use tracing::debug;

#[cfg(test)]
mod tests;

/// ASTM record types consumed by the integration core
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AstmRecordType {
    Header,
    Patient,
    Order,
    Result,
    Terminator,
}

impl AstmRecordType {
    /// Classify a record by the first character of its type field.
    ///
    /// Lowercase and unknown types return `None` and the line is skipped,
    /// mirroring the literal single-character dispatch instruments expect.
    pub fn from_field(field: &str) -> Option<Self> {
        match field.chars().next()? {
            'H' => Some(AstmRecordType::Header),
            'P' => Some(AstmRecordType::Patient),
            'O' => Some(AstmRecordType::Order),
            'R' => Some(AstmRecordType::Result),
            'L' => Some(AstmRecordType::Terminator),
            _ => None,
        }
    }
}

/// Decode a raw ASTM message body into a [`ParsedMessage`]
pub fn decode(raw: &str) -> ParsedMessage {
    let records = tokenize(raw, Protocol::Astm);
    let mut parsed = ParsedMessage::default();

    for fields in &records {
        let type_field = fields.first().map(String::as_str).unwrap_or("");
        let Some(record_type) = AstmRecordType::from_field(type_field) else {
            debug!("Skipping unrecognized ASTM record type {:?}", type_field);
            continue;
        };

        match record_type {
            AstmRecordType::Header => {
                parsed.header = positional_map(fields, astm::HEADER_FIELDS, 0);
            }
            AstmRecordType::Patient => {
                parsed.patient = positional_map(fields, astm::PATIENT_FIELDS, 0);
            }
            AstmRecordType::Order => {
                parsed.order = positional_map(fields, astm::ORDER_FIELDS, 0);
            }
            AstmRecordType::Result => {
                parsed.results.push(result_record(fields));
            }
            AstmRecordType::Terminator => {
                parsed.terminator = positional_map(fields, astm::TERMINATOR_FIELDS, 0);
                // L ends the message; anything after it is ignored
                break;
            }
        }
    }

    parsed
}

/// Build one result record from an `R` line
fn result_record(fields: &[String]) -> ResultRecord {
    let mut map = positional_map(fields, astm::RESULT_FIELDS, 0);
    let observation_identifier = map.remove("universal_test_id").unwrap_or_default();
    let value = map.remove("data_or_measurement_value").unwrap_or_default();
    map.remove("record_type_id");

    ResultRecord {
        observation_identifier,
        value,
        extra: map,
    }
}

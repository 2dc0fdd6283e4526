//! Data models for analyzer result integration
//!
//! This module contains the core data structures for representing raw and
//! decoded analyzer messages, the specimen/parameter records owned by the
//! specimen store, and the outcome reported back to the ingestion endpoint.

use crate::constants::{astm, hl7};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Wire protocols spoken by the supported analyzer instruments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Protocol {
    /// ASTM E1394-style delimited records (H/P/O/R/L)
    Astm,
    /// HL7 v2-style pipe-delimited segments (MSH/PID/OBR/OBX)
    Hl7,
}

impl Protocol {
    /// Name of the order-map field carrying the sample identifier.
    ///
    /// The two standards place the sample key in differently named fields
    /// (`O` field 2 vs `OBR` field 3); this asymmetry is intrinsic and
    /// preserved through the decoded form.
    pub fn sample_id_field(&self) -> &'static str {
        match self {
            Protocol::Astm => astm::SAMPLE_ID_FIELD,
            Protocol::Hl7 => hl7::SAMPLE_ID_FIELD,
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Protocol::Astm => write!(f, "ASTM"),
            Protocol::Hl7 => write!(f, "HL7"),
        }
    }
}

impl FromStr for Protocol {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ASTM" => Ok(Protocol::Astm),
            "HL7" => Ok(Protocol::Hl7),
            other => Err(crate::Error::configuration(format!(
                "Unknown protocol '{other}'. Supported protocols: ASTM, HL7"
            ))),
        }
    }
}

/// Raw message body as received from an instrument, never mutated
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawMessage {
    pub protocol: Protocol,
    pub body: String,
    /// When the ingestion endpoint handed the message over, kept for audit
    pub received_at: DateTime<Utc>,
}

impl RawMessage {
    pub fn new(protocol: Protocol, body: impl Into<String>) -> Self {
        Self {
            protocol,
            body: body.into(),
            received_at: Utc::now(),
        }
    }
}

/// One reported analyte from a result record (`R` line or `OBX` segment)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// Compound observation code, components joined by `^`
    pub observation_identifier: String,
    /// Raw textual result exactly as transmitted; numeric interpretation
    /// is deferred to the value normalizer
    pub value: String,
    /// Remaining positional fields of the record (units, ranges, flags)
    pub extra: HashMap<String, String>,
}

/// Protocol-neutral decoded form of an analyzer message.
///
/// Field access is total: positions the instrument did not send decode to
/// empty strings, and maps for records that never appeared stay empty.
/// Short or malformed messages therefore decode without error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsedMessage {
    /// Sender/receiver/version metadata, best effort
    pub header: HashMap<String, String>,
    /// Patient-record fields as sent; traceability only, never matched on
    pub patient: HashMap<String, String>,
    /// Order fields carrying the protocol-specific sample identifier
    pub order: HashMap<String, String>,
    /// One entry per reported analyte, in transmission order
    pub results: Vec<ResultRecord>,
    /// ASTM end-marker fields; empty for HL7
    pub terminator: HashMap<String, String>,
}

impl ParsedMessage {
    /// Whether an order record (`O`/`OBR`) was decoded at all
    pub fn has_order(&self) -> bool {
        !self.order.is_empty()
    }

    /// The sample identifier under the protocol-specific order key,
    /// empty string if absent
    pub fn sample_id(&self, protocol: Protocol) -> &str {
        self.order
            .get(protocol.sample_id_field())
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// A specimen awaiting results, owned by the specimen store.
///
/// The integration core reads these for the duration of one request and
/// never caches them across requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Specimen {
    pub id: i64,
    /// The identifier instruments report the sample under
    pub assession_number: String,
    /// Physically received in the lab; only received specimens match
    pub is_received: bool,
    /// Set once the first machine-sourced value has been written
    pub has_machine_integration: bool,
    pub received_at: Option<DateTime<Utc>>,
}

/// A test parameter awaiting a value on a specimen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestParameter {
    pub id: i64,
    pub specimen_id: i64,
    /// Machine-matchable code ("mcode"); compared case-sensitively against
    /// the extracted observation identifier
    pub code: String,
    pub value: Option<String>,
    /// Decimal places to round reported values to; unset leaves values
    /// untouched
    pub precision: Option<u32>,
}

/// Outcome of one integration request, translated by the ingestion
/// endpoint into its transport response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntegrationOutcome {
    /// Resolved sample id; may be partially resolved for rejected messages
    pub sample_id: Option<String>,
    /// Human-readable processing status for audit/logging
    pub status: String,
    /// Every `(parameter code, normalized value)` pair written, in order
    pub written: Vec<(String, String)>,
}

impl IntegrationOutcome {
    /// Whether at least one parameter value was written
    pub fn wrote_values(&self) -> bool {
        !self.written.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_parsing() {
        assert_eq!(Protocol::from_str("astm").unwrap(), Protocol::Astm);
        assert_eq!(Protocol::from_str(" HL7 ").unwrap(), Protocol::Hl7);
        assert!(Protocol::from_str("fhir").is_err());
    }

    #[test]
    fn test_protocol_sample_id_field_asymmetry() {
        assert_eq!(Protocol::Astm.sample_id_field(), "specimen_id");
        assert_eq!(Protocol::Hl7.sample_id_field(), "filler_order_number");
    }

    #[test]
    fn test_parsed_message_sample_id_is_total() {
        let parsed = ParsedMessage::default();
        assert!(!parsed.has_order());
        assert_eq!(parsed.sample_id(Protocol::Astm), "");
        assert_eq!(parsed.sample_id(Protocol::Hl7), "");
    }
}

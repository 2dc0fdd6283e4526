//! HL7 v2 message decoder
//!
//! Maps the segments actually consumed from analyzer traffic (MSH, PID,
//! OBR, OBX) onto the protocol-neutral [`ParsedMessage`]. Every segment
//! name resolves to a sequence of field maps, so a message with one OBX
//! and a message with twelve decode through the same shape. Unrecognized
//! segments are kept under generic `field_N` names for traceability.
//!
//! Like the ASTM decoder, decoding never fails: short segments resolve to
//! empty fields and malformed lines are skipped.

use crate::app::models::{ParsedMessage, Protocol, ResultRecord};
use crate::app::services::tokenizer::{positional_map, segment_lines, split_fields};
use crate::constants::hl7;
use std::collections::HashMap;
use tracing::debug;

#[cfg(test)]
mod tests;

/// HL7 segment names consumed by the integration core
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hl7SegmentName {
    Msh,
    Pid,
    Obr,
    Obx,
    Other(String),
}

impl Hl7SegmentName {
    pub fn classify(name: &str) -> Self {
        match name {
            "MSH" => Hl7SegmentName::Msh,
            "PID" => Hl7SegmentName::Pid,
            "OBR" => Hl7SegmentName::Obr,
            "OBX" => Hl7SegmentName::Obx,
            other => Hl7SegmentName::Other(other.to_string()),
        }
    }
}

/// Decoded segments keyed by segment name.
///
/// Every slot is a sequence: length 0 when the segment never appeared,
/// length 1 for a single occurrence, length N for repeats (typically OBX).
/// Callers never have to distinguish a scalar from a sequence.
#[derive(Debug, Clone, Default)]
pub struct Hl7Segments {
    segments: HashMap<String, Vec<HashMap<String, String>>>,
}

impl Hl7Segments {
    /// First occurrence of a segment, if any
    pub fn first(&self, name: &str) -> Option<&HashMap<String, String>> {
        self.segments.get(name).and_then(|v| v.first())
    }

    /// All occurrences of a segment, in transmission order
    pub fn all(&self, name: &str) -> &[HashMap<String, String>] {
        self.segments.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of occurrences of a segment
    pub fn count(&self, name: &str) -> usize {
        self.segments.get(name).map(Vec::len).unwrap_or(0)
    }

    fn push(&mut self, name: String, fields: HashMap<String, String>) {
        self.segments.entry(name).or_default().push(fields);
    }
}

/// Decode a raw HL7 message body into its segment maps
pub fn decode_segments(raw: &str) -> Hl7Segments {
    let mut segments = Hl7Segments::default();

    for line in segment_lines(raw, Protocol::Hl7) {
        if line.starts_with("MSH") {
            segments.push("MSH".to_string(), decode_msh(&line));
            continue;
        }

        let fields = split_fields(&line);
        let name = fields.first().map(String::as_str).unwrap_or("");
        if name.is_empty() {
            debug!("Skipping HL7 line with empty segment name");
            continue;
        }

        let map = match Hl7SegmentName::classify(name) {
            Hl7SegmentName::Msh => unreachable!("MSH handled above"),
            Hl7SegmentName::Pid => positional_map(&fields, hl7::PID_FIELDS, 1),
            Hl7SegmentName::Obr => positional_map(&fields, hl7::OBR_FIELDS, 1),
            Hl7SegmentName::Obx => positional_map(&fields, hl7::OBX_FIELDS, 1),
            Hl7SegmentName::Other(_) => generic_map(&fields),
        };
        segments.push(name.to_string(), map);
    }

    segments
}

/// Decode a raw HL7 message body into a [`ParsedMessage`]
pub fn decode(raw: &str) -> ParsedMessage {
    let segments = decode_segments(raw);

    let results = segments
        .all("OBX")
        .iter()
        .map(|obx| result_record(obx.clone()))
        .collect();

    ParsedMessage {
        header: segments.first("MSH").cloned().unwrap_or_default(),
        patient: segments.first("PID").cloned().unwrap_or_default(),
        order: segments.first("OBR").cloned().unwrap_or_default(),
        results,
        // HL7 has no terminator record
        terminator: HashMap::new(),
    }
}

/// Decode the MSH segment.
///
/// MSH-1 is the field separator itself, so it cannot come out of the
/// field split; it is read positionally as the character after `MSH` and
/// the rest of the segment is split on it.
fn decode_msh(line: &str) -> HashMap<String, String> {
    let separator = line.chars().nth(3).unwrap_or('|');
    let rest = line
        .char_indices()
        .nth(4)
        .map(|(i, _)| &line[i..])
        .unwrap_or("");

    let fields: Vec<String> = rest.split(separator).map(str::to_string).collect();
    let mut map = positional_map(&fields, hl7::MSH_FIELDS, 0);
    map.insert(hl7::MSH_FIELD_SEPARATOR.to_string(), separator.to_string());
    map
}

/// Fallback map for unrecognized segment names
fn generic_map(fields: &[String]) -> HashMap<String, String> {
    fields
        .iter()
        .skip(1)
        .enumerate()
        .map(|(i, value)| (format!("field_{}", i + 1), value.clone()))
        .collect()
}

/// Build one result record from an OBX field map
fn result_record(mut map: HashMap<String, String>) -> ResultRecord {
    let observation_identifier = map.remove("observation_identifier").unwrap_or_default();
    let value = map.remove("observation_value").unwrap_or_default();

    ResultRecord {
        observation_identifier,
        value,
        extra: map,
    }
}

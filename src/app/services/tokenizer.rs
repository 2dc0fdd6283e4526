//! Field tokenizer for raw analyzer messages
//!
//! Splits a raw message body into segment lines and lines into delimited
//! fields. Instrument firmware is not always protocol-compliant, so the
//! contract is best effort throughout: lines that fail tokenization are
//! skipped, never raised as errors.

use crate::app::models::Protocol;
use crate::constants::{ASTM_NOISE_LINE_MAX_LEN, FIELD_DELIMITER, SEGMENT_DELIMITER};
use tracing::debug;

/// Split a raw message into cleaned segment lines.
///
/// Both protocols delimit records with `\r` in this system. Empty lines
/// are dropped after trimming. For ASTM, a single leading ASCII digit is
/// the frame sequence number and is stripped, and anything at or below
/// three characters is transport noise and discarded.
pub fn segment_lines(raw: &str, protocol: Protocol) -> Vec<String> {
    raw.split(SEGMENT_DELIMITER)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| match protocol {
            Protocol::Astm => clean_astm_line(line),
            Protocol::Hl7 => Some(line.to_string()),
        })
        .collect()
}

/// Split one segment line into its `|`-delimited fields.
///
/// Field `[0]` is the record/segment type discriminator.
pub fn split_fields(line: &str) -> Vec<String> {
    line.split(FIELD_DELIMITER).map(str::to_string).collect()
}

/// Tokenize a raw message into per-line field sequences
pub fn tokenize(raw: &str, protocol: Protocol) -> Vec<Vec<String>> {
    segment_lines(raw, protocol)
        .iter()
        .map(|line| split_fields(line))
        .collect()
}

/// Strip the frame sequence digit and drop noise lines
fn clean_astm_line(line: &str) -> Option<String> {
    let line = match line.chars().next() {
        Some(first) if first.is_ascii_digit() => &line[first.len_utf8()..],
        _ => line,
    };
    let line = line.trim();
    if line.len() <= ASTM_NOISE_LINE_MAX_LEN {
        debug!("Discarding noise line: {:?}", line);
        return None;
    }
    Some(line.to_string())
}

/// Map positional fields onto names, absent positions defaulting to empty.
///
/// `offset` is the index of the field that maps to `names[0]`; ASTM tables
/// include the record type at index 0 (offset 0) while HL7 tables start at
/// the field after the segment name (offset 1).
pub fn positional_map(
    fields: &[String],
    names: &[&str],
    offset: usize,
) -> std::collections::HashMap<String, String> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let value = fields
                .get(i + offset)
                .map(String::as_str)
                .unwrap_or("")
                .to_string();
            (name.to_string(), value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_lines_split_on_carriage_return() {
        let raw = "MSH|^~\\&|ANALYZER\rPID|1\rOBX|1|NM|GLU||98.2";
        let lines = segment_lines(raw, Protocol::Hl7);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("MSH"));
        assert!(lines[2].starts_with("OBX"));
    }

    #[test]
    fn test_segment_lines_drop_empty_lines() {
        let raw = "\r\rH|\\^&|||Analyzer\r\r";
        let lines = segment_lines(raw, Protocol::Astm);
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn test_astm_frame_digit_stripped_once() {
        let raw = "1H|\\^&|||Analyzer";
        let lines = segment_lines(raw, Protocol::Astm);
        assert_eq!(lines, vec!["H|\\^&|||Analyzer".to_string()]);

        // Only the first digit is a frame number; a second digit stays
        let raw = "22|field|data";
        let lines = segment_lines(raw, Protocol::Astm);
        assert_eq!(lines, vec!["2|field|data".to_string()]);
    }

    #[test]
    fn test_astm_noise_lines_discarded() {
        // After stripping the frame digit these are at or below 3 chars
        let raw = "1L|1\rETX\r5\r";
        let lines = segment_lines(raw, Protocol::Astm);
        assert!(lines.is_empty());
    }

    #[test]
    fn test_hl7_lines_keep_leading_digits() {
        let raw = "2DX|something long enough";
        let lines = segment_lines(raw, Protocol::Hl7);
        assert_eq!(lines, vec!["2DX|something long enough".to_string()]);
    }

    #[test]
    fn test_split_fields() {
        let fields = split_fields("R|1|^GLU|98.2|mg/dL");
        assert_eq!(fields, vec!["R", "1", "^GLU", "98.2", "mg/dL"]);
    }

    #[test]
    fn test_split_fields_preserves_trailing_empties() {
        let fields = split_fields("O|1|SID001||");
        assert_eq!(fields.len(), 5);
        assert_eq!(fields[3], "");
        assert_eq!(fields[4], "");
    }

    #[test]
    fn test_positional_map_short_fields_default_empty() {
        let fields = split_fields("R|1|^GLU");
        let map = positional_map(&fields, &["record_type_id", "seq", "test", "value"], 0);
        assert_eq!(map["record_type_id"], "R");
        assert_eq!(map["test"], "^GLU");
        assert_eq!(map["value"], "");
    }

    #[test]
    fn test_positional_map_with_offset() {
        let fields = split_fields("OBX|1|NM|GLU");
        let map = positional_map(&fields, &["set_id", "value_type", "identifier"], 1);
        assert_eq!(map["set_id"], "1");
        assert_eq!(map["identifier"], "GLU");
    }
}

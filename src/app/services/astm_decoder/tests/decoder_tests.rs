//! Decoder tests covering full messages, leniency on short records and
//! the repeat/terminator rules

use super::super::{AstmRecordType, decode};

fn sample_message() -> String {
    [
        "1H|\\^&|||cobas c311|||||host||P|1|20240115093000",
        "2P|1|",
        "3O|1|SID001||^^^GLU|R||20240115090000",
        "4R|1|^GLU|98.2|mg/dL||N||F",
        "5R|2|^NA^^mmol/L|141|mmol/L||N||F",
        "6L|1|N",
    ]
    .join("\r")
}

#[test]
fn test_decode_full_message() {
    let parsed = decode(&sample_message());

    assert_eq!(parsed.header["record_type_id"], "H");
    assert_eq!(parsed.header["sender_name_or_id"], "cobas c311");
    assert_eq!(parsed.header["date_time_of_message"], "20240115093000");

    assert_eq!(parsed.patient["sequence_number"], "1");

    assert_eq!(parsed.order["specimen_id"], "SID001");
    assert_eq!(parsed.order["universal_test_id"], "^^^GLU");

    assert_eq!(parsed.results.len(), 2);
    assert_eq!(parsed.results[0].observation_identifier, "^GLU");
    assert_eq!(parsed.results[0].value, "98.2");
    assert_eq!(parsed.results[0].extra["units"], "mg/dL");
    assert_eq!(parsed.results[1].observation_identifier, "^NA^^mmol/L");
    assert_eq!(parsed.results[1].value, "141");

    assert_eq!(parsed.terminator["termination_code"], "N");
}

#[test]
fn test_decode_short_records_yield_empty_fields() {
    // Header with only four fields; the rest of the 14-name table must
    // resolve to empty strings, never an error
    let parsed = decode("1H|\\^&|msg1\r3O|1|SID9\r4R|1|^K\r6L|1");

    assert_eq!(parsed.header["message_control_id"], "msg1");
    assert_eq!(parsed.header["date_time_of_message"], "");
    assert_eq!(parsed.order["specimen_id"], "SID9");
    assert_eq!(parsed.order["specimen_institution"], "");
    assert_eq!(parsed.results.len(), 1);
    assert_eq!(parsed.results[0].value, "");
}

#[test]
fn test_decode_never_panics_on_garbage() {
    for garbage in [
        "",
        "\r\r\r",
        "||||",
        "1",
        "completely unstructured text with no delimiters at all",
        "9Z|what|is|this",
        "1H",
    ] {
        let parsed = decode(garbage);
        assert!(parsed.results.is_empty());
    }
}

#[test]
fn test_repeated_result_records_all_kept() {
    // The same analyte twice in one message yields two records, in order
    let parsed = decode("3O|1|SID001\r4R|1|^GLU|98.2\r5R|2|^GLU|99.0\r6L|1");
    assert_eq!(parsed.results.len(), 2);
    assert_eq!(parsed.results[0].value, "98.2");
    assert_eq!(parsed.results[1].value, "99.0");
}

#[test]
fn test_lines_after_terminator_ignored() {
    let parsed = decode("3O|1|SID001\r6L|1|N\r7R|1|^GLU|98.2");
    assert!(parsed.results.is_empty());
    assert_eq!(parsed.terminator["termination_code"], "N");
}

#[test]
fn test_unrecognized_record_types_skipped() {
    let parsed = decode("1H|\\^&|||inst\r2C|1|comment record\r3O|1|SID001\r6L|1");
    assert_eq!(parsed.order["specimen_id"], "SID001");
    assert!(parsed.results.is_empty());
}

#[test]
fn test_record_type_classification() {
    assert_eq!(AstmRecordType::from_field("H"), Some(AstmRecordType::Header));
    assert_eq!(
        AstmRecordType::from_field("L"),
        Some(AstmRecordType::Terminator)
    );
    assert_eq!(AstmRecordType::from_field("h"), None);
    assert_eq!(AstmRecordType::from_field(""), None);
    assert_eq!(AstmRecordType::from_field("X"), None);
}

#[test]
fn test_message_without_order_decodes_empty_order() {
    let parsed = decode("1H|\\^&|||inst\r4R|1|^GLU|98.2\r6L|1");
    assert!(!parsed.has_order());
    assert_eq!(parsed.results.len(), 1);
}

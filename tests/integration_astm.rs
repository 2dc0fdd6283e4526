//! Integration tests for the ASTM path
//!
//! These tests drive the public pipeline end to end: raw wire bytes in,
//! store writes and outcome statuses out.

use lis_bridge::app::adapters::memory_store::InMemorySpecimenStore;
use lis_bridge::app::services::astm_decoder;
use lis_bridge::{IntegrationConfig, Integrator, Protocol, RawMessage, Specimen, TestParameter};

fn received_specimen(id: i64, assession: &str) -> Specimen {
    Specimen {
        id,
        assession_number: assession.to_string(),
        is_received: true,
        has_machine_integration: false,
        received_at: None,
    }
}

fn parameter(id: i64, specimen_id: i64, code: &str, precision: Option<u32>) -> TestParameter {
    TestParameter {
        id,
        specimen_id,
        code: code.to_string(),
        value: None,
        precision,
    }
}

/// A realistic multi-record capture from a chemistry analyzer
fn glucose_message() -> String {
    [
        "1H|\\^&|||cobas c311^Roche|||||host||P|1|20240115093000",
        "2P|1|",
        "3O|1|SID001||^^^GLU|R||20240115090000",
        "4R|1|^GLU|98.2|mg/dL||N||F||oper1",
        "5L|1|N",
    ]
    .join("\r")
}

#[tokio::test]
async fn test_scenario_matched_sample_written() {
    let store = InMemorySpecimenStore::new();
    store.insert_specimen(received_specimen(1, "SID001"));
    store.insert_parameter(parameter(10, 1, "GLU", Some(1)));

    let integrator = Integrator::with_defaults(store);
    let raw = RawMessage::new(Protocol::Astm, glucose_message());

    let outcome = integrator.process(&raw).await.expect("store should not fail");

    assert_eq!(outcome.sample_id.as_deref(), Some("SID001"));
    assert!(outcome.status.contains("GLU:98.2"));
    assert_eq!(
        integrator.store().parameter(10).unwrap().value.as_deref(),
        Some("98.2")
    );
    assert!(integrator.store().specimen(1).unwrap().has_machine_integration);
}

#[tokio::test]
async fn test_scenario_unknown_sample_reported_not_raised() {
    let store = InMemorySpecimenStore::new();
    store.insert_specimen(received_specimen(1, "OTHER999"));

    let integrator = Integrator::with_defaults(store);
    let raw = RawMessage::new(Protocol::Astm, glucose_message());

    let outcome = integrator.process(&raw).await.expect("store should not fail");

    assert_eq!(outcome.sample_id.as_deref(), Some("SID001"));
    assert_eq!(
        outcome.status,
        "Not processed — matching sample does not exist"
    );
    assert!(!outcome.wrote_values());
}

#[tokio::test]
async fn test_reprocessing_same_message_writes_again() {
    // At-least-once semantics: the second delivery of an identical message
    // writes the same final value again instead of being rejected
    let store = InMemorySpecimenStore::new();
    store.insert_specimen(received_specimen(1, "SID001"));
    store.insert_parameter(parameter(10, 1, "GLU", Some(1)));

    let integrator = Integrator::with_defaults(store);
    let raw = RawMessage::new(Protocol::Astm, glucose_message());

    let first = integrator.process(&raw).await.unwrap();
    let second = integrator.process(&raw).await.unwrap();

    assert!(first.wrote_values());
    assert!(second.wrote_values());
    assert_eq!(first.written, second.written);
    assert_eq!(
        integrator.store().parameter(10).unwrap().value.as_deref(),
        Some("98.2")
    );
}

#[tokio::test]
async fn test_decode_is_total_on_truncated_capture() {
    // A capture cut off mid-transmission still decodes; missing fields are
    // empty strings and the pipeline reports rather than raises
    let truncated = "1H|\\^&\r3O|1|";
    let parsed = astm_decoder::decode(truncated);
    assert_eq!(parsed.order.get("specimen_id").map(String::as_str), Some(""));

    let integrator = Integrator::with_defaults(InMemorySpecimenStore::new());
    let raw = RawMessage::new(Protocol::Astm, truncated);
    let outcome = integrator.process(&raw).await.unwrap();
    assert_eq!(
        outcome.status,
        "Not processed — sample id and values not available"
    );
}

#[tokio::test]
async fn test_precision_zero_renders_integer_form() {
    let store = InMemorySpecimenStore::new();
    store.insert_specimen(received_specimen(1, "SID001"));
    store.insert_parameter(parameter(10, 1, "NA mmol/L", Some(0)));

    let integrator = Integrator::with_defaults(store);
    let body = "3O|1|SID001\r4R|1|^NA^^mmol/L|141.4|mmol/L\r5L|1|N";
    let raw = RawMessage::new(Protocol::Astm, body);

    let outcome = integrator.process(&raw).await.unwrap();

    // ASTM identifier rule joins the non-empty components with spaces
    assert_eq!(
        outcome.written,
        vec![("NA mmol/L".to_string(), "141".to_string())]
    );
    assert_eq!(
        integrator.store().parameter(10).unwrap().value.as_deref(),
        Some("141")
    );
}

#[tokio::test]
async fn test_best_effort_mode_end_to_end() {
    let store = InMemorySpecimenStore::new();
    store.insert_specimen(received_specimen(1, "SID001"));
    store.insert_parameter(parameter(10, 1, "GLU", Some(1)));

    let integrator = Integrator::new(store, IntegrationConfig::best_effort());
    let raw = RawMessage::new(Protocol::Astm, glucose_message());

    let outcome = integrator.process(&raw).await.unwrap();
    assert!(outcome.wrote_values());
    assert_eq!(
        integrator.store().parameter(10).unwrap().value.as_deref(),
        Some("98.2")
    );
}

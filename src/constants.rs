//! Application constants for the LIS bridge
//!
//! This module contains the wire-format delimiters, the positional
//! field-name tables for both supported protocols, and the fixed status
//! strings reported on integration outcomes.

// =============================================================================
// Wire Delimiters
// =============================================================================

/// Record/segment delimiter used by both protocols in this system
pub const SEGMENT_DELIMITER: char = '\r';

/// Field delimiter within a record or segment
pub const FIELD_DELIMITER: char = '|';

/// Component delimiter within a compound field (e.g. observation identifiers)
pub const COMPONENT_DELIMITER: char = '^';

/// ASTM lines at or below this trimmed length are discarded as framing noise
pub const ASTM_NOISE_LINE_MAX_LEN: usize = 3;

// =============================================================================
// ASTM E1394 Record Field Tables
// =============================================================================

/// Positional field names for ASTM records, index 0 being the record type
/// discriminator. Instruments routinely send fewer fields than the table
/// defines; absent positions decode to the empty string.
pub mod astm {
    /// `H` (message header) record fields
    pub const HEADER_FIELDS: &[&str] = &[
        "record_type_id",
        "delimiter_definition",
        "message_control_id",
        "access_password",
        "sender_name_or_id",
        "sender_street_address",
        "reserved_field",
        "sender_telephone_number",
        "characteristics_of_sender",
        "receiver_id",
        "comment_or_special_instructions",
        "processing_id",
        "version_number",
        "date_time_of_message",
    ];

    /// `P` (patient) record fields - intentionally minimal, patient identity
    /// is never used for sample matching
    pub const PATIENT_FIELDS: &[&str] = &["record_type_id", "sequence_number"];

    /// `O` (test order) record fields; `specimen_id` at index 2 is the
    /// sample key used downstream
    pub const ORDER_FIELDS: &[&str] = &[
        "record_type_id",
        "sequence_number",
        "specimen_id",
        "instrument_specimen_id",
        "universal_test_id",
        "priority",
        "requested_date_time",
        "specimen_collection_date_time",
        "collection_end_time",
        "collection_volume",
        "collector_id",
        "action_code",
        "danger_code",
        "relevant_clinical_information",
        "date_specimen_received",
        "specimen_descriptor",
        "specimen_type",
        "specimen_source",
        "ordering_physician",
        "physician_telephone",
        "user_field_1",
        "user_field_2",
        "laboratory_field_1",
        "laboratory_field_2",
        "date_time_results_reported",
        "instrument_charge",
        "instrument_section_id",
        "report_type",
        "reserved_field",
        "location_of_collection",
        "nosocomial_infection_flag",
        "specimen_service",
        "specimen_institution",
    ];

    /// `R` (result) record fields; `universal_test_id` at index 2 and
    /// `data_or_measurement_value` at index 3 feed the result records
    pub const RESULT_FIELDS: &[&str] = &[
        "record_type_id",
        "sequence_number",
        "universal_test_id",
        "data_or_measurement_value",
        "units",
        "reference_ranges",
        "result_abnormal_flag",
        "nature_of_abnormality",
        "result_status",
        "date_of_change_in_instrument",
        "operator_identification",
        "date_time_test_started",
        "date_time_test_completed",
    ];

    /// `L` (message terminator) record fields
    pub const TERMINATOR_FIELDS: &[&str] =
        &["record_type_id", "sequence_number", "termination_code"];

    /// Name of the order field carrying the sample key
    pub const SAMPLE_ID_FIELD: &str = "specimen_id";
}

// =============================================================================
// HL7 v2 Segment Field Tables
// =============================================================================

/// Positional field names for HL7 segments. Unlike the ASTM tables these
/// start at field 1 (the token after the segment name); the segment name
/// itself is the map key, not a field. Short segments decode to empty
/// strings for the missing positions.
pub mod hl7 {
    /// `MSH` fields 2..19. MSH-1 (the field separator) is read positionally
    /// from the raw segment and inserted under `field_separator`.
    pub const MSH_FIELDS: &[&str] = &[
        "encoding_characters",
        "sending_application",
        "sending_facility",
        "receiving_application",
        "receiving_facility",
        "date_time_of_message",
        "security",
        "message_type",
        "message_control_id",
        "processing_id",
        "version_id",
        "sequence_number",
        "continuation_pointer",
        "accept_acknowledgment_type",
        "application_acknowledgment_type",
        "country_code",
        "character_set",
        "principal_language_of_message",
    ];

    /// Key under which the positionally-read MSH-1 separator is stored
    pub const MSH_FIELD_SEPARATOR: &str = "field_separator";

    /// `PID` fields 1..30 - traceability only, never used for matching
    pub const PID_FIELDS: &[&str] = &[
        "set_id",
        "patient_id",
        "patient_identifier_list",
        "alternate_patient_id",
        "patient_name",
        "mothers_maiden_name",
        "date_time_of_birth",
        "administrative_sex",
        "patient_alias",
        "race",
        "patient_address",
        "county_code",
        "phone_number_home",
        "phone_number_business",
        "primary_language",
        "marital_status",
        "religion",
        "patient_account_number",
        "ssn_number",
        "drivers_license_number",
        "mothers_identifier",
        "ethnic_group",
        "birth_place",
        "multiple_birth_indicator",
        "birth_order",
        "citizenship",
        "veterans_military_status",
        "nationality",
        "patient_death_date_time",
        "patient_death_indicator",
    ];

    /// `OBR` fields 1..43; `filler_order_number` (OBR-3) is the sample key
    /// used downstream
    pub const OBR_FIELDS: &[&str] = &[
        "set_id",
        "placer_order_number",
        "filler_order_number",
        "universal_service_identifier",
        "priority",
        "requested_date_time",
        "observation_date_time",
        "observation_end_date_time",
        "collection_volume",
        "collector_identifier",
        "specimen_action_code",
        "danger_code",
        "relevant_clinical_information",
        "specimen_received_date_time",
        "specimen_source",
        "ordering_provider",
        "order_callback_phone_number",
        "placer_field_1",
        "placer_field_2",
        "filler_field_1",
        "filler_field_2",
        "results_rpt_status_change_date_time",
        "charge_to_practice",
        "diagnostic_serv_sect_id",
        "result_status",
        "parent_result",
        "quantity_timing",
        "result_copies_to",
        "parent",
        "transportation_mode",
        "reason_for_study",
        "principal_result_interpreter",
        "assistant_result_interpreter",
        "technician",
        "transcriptionist",
        "scheduled_date_time",
        "number_of_sample_containers",
        "transport_logistics_of_collected_sample",
        "collectors_comment",
        "transport_arrangement_responsibility",
        "transport_arranged",
        "escort_required",
        "planned_patient_transport_comment",
    ];

    /// `OBX` fields 1..19; `observation_identifier` (OBX-3) and
    /// `observation_value` (OBX-5) feed the result records
    pub const OBX_FIELDS: &[&str] = &[
        "set_id",
        "value_type",
        "observation_identifier",
        "observation_sub_id",
        "observation_value",
        "units",
        "references_range",
        "abnormal_flags",
        "probability",
        "nature_of_abnormal_test",
        "observation_result_status",
        "effective_date_of_reference_range",
        "user_defined_access_checks",
        "date_time_of_the_observation",
        "producers_id",
        "responsible_observer",
        "observation_method",
        "equipment_instance_identifier",
        "date_time_of_the_analysis",
    ];

    /// Name of the order field carrying the sample key
    pub const SAMPLE_ID_FIELD: &str = "filler_order_number";
}

// =============================================================================
// Outcome Status Strings
// =============================================================================

/// Fixed human-readable status strings reported on integration outcomes.
/// These are part of the interface contract with the ingestion endpoint
/// and must not be reworded casually.
pub mod status {
    /// No O/OBR record decoded from the message
    pub const ORDER_NOT_AVAILABLE: &str = "Not processed — order record not available";

    /// Order decoded but sample id empty or no result records present
    pub const SAMPLE_OR_VALUES_NOT_AVAILABLE: &str =
        "Not processed — sample id and values not available";

    /// No received specimen carries the reported assession number
    pub const SAMPLE_NOT_FOUND: &str = "Not processed — matching sample does not exist";

    /// Sample matched but none of the reported analytes map to a tracked parameter
    pub const NO_TRACKED_PARAMETERS: &str = "Processed — no tracked parameters in message";

    /// Prefix for the successful status listing every written code:value pair
    pub const PROCESSED_PREFIX: &str = "Processed — ";
}

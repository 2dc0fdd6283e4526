//! Sample matching against pending specimens
//!
//! Resolves a decoded message's sample identifier to the received
//! specimens awaiting results and pairs each reported analyte with the
//! test parameters configured to track it. Match failures are recoverable
//! outcomes the orchestrator turns into status strings; only store
//! failures propagate as errors.

use crate::app::models::{ParsedMessage, Protocol, TestParameter};
use crate::app::services::identifier::extract_code;
use crate::app::services::specimen_store::SpecimenStore;
use thiserror::Error;
use tracing::debug;

#[cfg(test)]
mod tests;

/// Recoverable reasons a message could not be matched to a specimen
#[derive(Debug, Error)]
pub enum MatchError {
    /// No order record (`O`/`OBR`) was decoded from the message
    #[error("order record not decoded from message")]
    MissingOrderSegment,

    /// Order decoded but the sample id is empty or no results were reported
    #[error("sample id or result values not available")]
    MissingSampleOrValues { sample_id: Option<String> },

    /// No received specimen carries the reported assession number
    #[error("no received specimen with assession number '{sample_id}'")]
    SampleNotFound { sample_id: String },

    /// Store failure during lookup; propagated, not recoverable
    #[error(transparent)]
    Store(#[from] crate::Error),
}

/// One pending parameter write produced by a match
#[derive(Debug, Clone, PartialEq)]
pub struct PendingWrite {
    pub specimen_id: i64,
    pub parameter: TestParameter,
    /// Raw value as transmitted; normalization happens at write time
    pub raw_value: String,
}

/// A resolved sample and its pending write set
#[derive(Debug, Clone)]
pub struct MatchedSample {
    pub sample_id: String,
    /// Writes in message order. Empty when the sample matched but none of
    /// the reported analytes map to a tracked parameter.
    pub writes: Vec<PendingWrite>,
}

/// Match a decoded message against the specimen store.
///
/// Analytes the report template does not track are skipped silently;
/// instruments routinely report more than the lab charts. Code comparison
/// is exact and case-sensitive against the configured parameter code.
pub async fn match_message<S: SpecimenStore>(
    parsed: &ParsedMessage,
    protocol: Protocol,
    store: &S,
) -> std::result::Result<MatchedSample, MatchError> {
    if !parsed.has_order() {
        return Err(MatchError::MissingOrderSegment);
    }

    let sample_id = parsed.sample_id(protocol).to_string();
    if sample_id.is_empty() || parsed.results.is_empty() {
        let partial = (!sample_id.is_empty()).then_some(sample_id);
        return Err(MatchError::MissingSampleOrValues { sample_id: partial });
    }

    let specimens = store.find_received_by_assession(&sample_id).await?;
    if specimens.is_empty() {
        return Err(MatchError::SampleNotFound { sample_id });
    }

    let mut specimen_parameters: Vec<(i64, Vec<TestParameter>)> =
        Vec::with_capacity(specimens.len());
    for specimen in &specimens {
        let parameters = store.test_parameters_for(specimen.id).await?;
        specimen_parameters.push((specimen.id, parameters));
    }

    let mut writes = Vec::new();
    for result in &parsed.results {
        let code = extract_code(&result.observation_identifier, protocol);
        let mut matched_any = false;

        for (specimen_id, parameters) in &specimen_parameters {
            for parameter in parameters.iter().filter(|p| p.code == code) {
                matched_any = true;
                writes.push(PendingWrite {
                    specimen_id: *specimen_id,
                    parameter: parameter.clone(),
                    raw_value: result.value.clone(),
                });
            }
        }

        if !matched_any {
            debug!(
                "No tracked parameter for reported analyte '{}' on sample '{}'",
                code, sample_id
            );
        }
    }

    Ok(MatchedSample { sample_id, writes })
}

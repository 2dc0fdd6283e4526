//! Integration orchestration
//!
//! Sequences the full pipeline for one analyzer message: decode, match
//! against pending specimens, normalize each matched value, persist
//! through the specimen store and flag the written specimens. Match
//! failures become human-readable statuses on the outcome; only store
//! failures propagate as errors to the caller.

use crate::app::models::{IntegrationOutcome, ParsedMessage, Protocol, RawMessage};
use crate::app::services::sample_matcher::{self, MatchError};
use crate::app::services::specimen_store::{ParameterValueWrite, SpecimenStore};
use crate::app::services::{astm_decoder, hl7_decoder, normalizer};
use crate::config::IntegrationConfig;
use crate::constants::status;
use crate::Result;
use std::collections::HashSet;
use tracing::{debug, info, warn};

#[cfg(test)]
mod tests;

/// Decode a message body with the decoder selected by protocol
pub fn decode_message(protocol: Protocol, body: &str) -> ParsedMessage {
    match protocol {
        Protocol::Astm => astm_decoder::decode(body),
        Protocol::Hl7 => hl7_decoder::decode(body),
    }
}

/// Orchestrator for analyzer result integration
///
/// One instance serves many requests; all per-message state lives on the
/// call stack, so concurrent postings only contend inside the store.
#[derive(Debug)]
pub struct Integrator<S> {
    store: S,
    config: IntegrationConfig,
}

impl<S: SpecimenStore> Integrator<S> {
    pub fn new(store: S, config: IntegrationConfig) -> Self {
        Self { store, config }
    }

    /// Create an integrator with the default (atomic-write) configuration
    pub fn with_defaults(store: S) -> Self {
        Self::new(store, IntegrationConfig::default())
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &IntegrationConfig {
        &self.config
    }

    /// Process one raw analyzer message end to end.
    ///
    /// Returns `Err` only for store failures; every domain-level mismatch
    /// (unknown sample, missing order, untracked analytes) resolves to an
    /// outcome whose status describes what happened. Earlier best-effort
    /// writes are not rolled back when a later write fails.
    pub async fn process(&self, raw: &RawMessage) -> Result<IntegrationOutcome> {
        let parsed = decode_message(raw.protocol, &raw.body);
        debug!(
            "Decoded {} message: {} result record(s), sample id {:?}",
            raw.protocol,
            parsed.results.len(),
            parsed.sample_id(raw.protocol)
        );

        let matched = match sample_matcher::match_message(&parsed, raw.protocol, &self.store).await
        {
            Ok(matched) => matched,
            Err(MatchError::Store(e)) => return Err(e),
            Err(e @ MatchError::MissingOrderSegment) => {
                warn!("Message rejected: {}", e);
                return Ok(not_processed(None, status::ORDER_NOT_AVAILABLE));
            }
            Err(MatchError::MissingSampleOrValues { sample_id }) => {
                warn!("Message rejected: sample id or values missing");
                return Ok(not_processed(
                    sample_id,
                    status::SAMPLE_OR_VALUES_NOT_AVAILABLE,
                ));
            }
            Err(MatchError::SampleNotFound { sample_id }) => {
                warn!("No received specimen for sample '{}'", sample_id);
                return Ok(not_processed(Some(sample_id), status::SAMPLE_NOT_FOUND));
            }
        };

        if matched.writes.is_empty() {
            info!(
                "Sample '{}' matched but no reported analyte is tracked",
                matched.sample_id
            );
            return Ok(not_processed(
                Some(matched.sample_id),
                status::NO_TRACKED_PARAMETERS,
            ));
        }

        // Normalize in message order; warnings never abort the batch
        let mut written: Vec<(String, String)> = Vec::with_capacity(matched.writes.len());
        let mut batch: Vec<ParameterValueWrite> = Vec::with_capacity(matched.writes.len());
        for write in &matched.writes {
            let normalized = normalizer::normalize(write.parameter.precision, &write.raw_value);
            if let Some(warning) = &normalized.warning {
                warn!(
                    "Normalization warning for parameter '{}' on sample '{}': {}",
                    write.parameter.code, matched.sample_id, warning
                );
            }
            batch.push(ParameterValueWrite {
                parameter_id: write.parameter.id,
                value: normalized.value.clone(),
            });
            written.push((write.parameter.code.clone(), normalized.value));
        }

        if self.config.atomic_writes {
            self.store.write_parameter_values(&batch).await?;
        } else {
            for write in &batch {
                self.store
                    .write_parameter_value(write.parameter_id, &write.value)
                    .await?;
            }
        }

        // Flag each written specimen exactly once
        let mut flagged = HashSet::new();
        for write in &matched.writes {
            if flagged.insert(write.specimen_id) {
                self.store.mark_machine_integrated(write.specimen_id).await?;
            }
        }

        let pairs: Vec<String> = written
            .iter()
            .map(|(code, value)| format!("{code}:{value}"))
            .collect();
        let outcome = IntegrationOutcome {
            sample_id: Some(matched.sample_id),
            status: format!("{}{}", status::PROCESSED_PREFIX, pairs.join(", ")),
            written,
        };
        info!(
            "Integrated sample {:?}: {} parameter value(s) written",
            outcome.sample_id,
            outcome.written.len()
        );
        Ok(outcome)
    }
}

fn not_processed(sample_id: Option<String>, status: &str) -> IntegrationOutcome {
    IntegrationOutcome {
        sample_id,
        status: status.to_string(),
        written: Vec::new(),
    }
}

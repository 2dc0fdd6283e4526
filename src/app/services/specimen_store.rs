//! Specimen store boundary
//!
//! The integration core does not own persistence. Specimens and their
//! test parameters live behind this trait, and the store calls are the
//! pipeline's only suspension points. Implementations own whatever
//! atomicity they need for concurrent postings (two devices, or one
//! device retrying, may report the same sample at once); the core holds
//! no cross-request state and takes no locks.

use crate::Result;
use crate::app::models::{Specimen, TestParameter};
use std::future::Future;

/// One parameter value to persist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterValueWrite {
    pub parameter_id: i64,
    pub value: String,
}

/// Read/write access to specimens awaiting analyzer results
pub trait SpecimenStore: Send + Sync {
    /// Specimens whose assession number equals `assession_number` and
    /// which have been physically received
    fn find_received_by_assession(
        &self,
        assession_number: &str,
    ) -> impl Future<Output = Result<Vec<Specimen>>> + Send;

    /// Test parameters linked to a specimen
    fn test_parameters_for(
        &self,
        specimen_id: i64,
    ) -> impl Future<Output = Result<Vec<TestParameter>>> + Send;

    /// Write a single parameter value. Last write wins; the store does not
    /// merge or reject repeated writes.
    fn write_parameter_value(
        &self,
        parameter_id: i64,
        value: &str,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Write a batch of parameter values atomically: either every write in
    /// the batch is applied or none is.
    fn write_parameter_values(
        &self,
        writes: &[ParameterValueWrite],
    ) -> impl Future<Output = Result<()>> + Send;

    /// Flag a specimen as carrying machine-sourced results
    fn mark_machine_integrated(&self, specimen_id: i64) -> impl Future<Output = Result<()>> + Send;
}

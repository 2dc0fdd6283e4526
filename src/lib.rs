//! LIS Bridge Library
//!
//! A Rust library for ingesting result messages pushed by laboratory
//! analyzer instruments and writing the reported values back into pending
//! specimens.
//!
//! This library provides tools for:
//! - Decoding ASTM E1394-style delimited records (H/P/O/R/L)
//! - Decoding HL7 v2-style pipe-delimited segments (MSH/PID/OBR/OBX)
//! - Matching decoded sample identifiers against received specimens
//! - Normalizing reported values to each parameter's configured precision
//! - Orchestrating decode, match, persist and status reporting
//! - Instrument-tolerant decoding with comprehensive error handling

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod astm_decoder;
        pub mod hl7_decoder;
        pub mod identifier;
        pub mod integrator;
        pub mod normalizer;
        pub mod sample_matcher;
        pub mod specimen_store;
        pub mod tokenizer;
    }
    pub mod adapters {
        pub mod memory_store;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{
    IntegrationOutcome, ParsedMessage, Protocol, RawMessage, ResultRecord, Specimen, TestParameter,
};
pub use app::services::integrator::Integrator;
pub use config::IntegrationConfig;

/// Result type alias for the LIS bridge
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for analyzer integration operations
///
/// Decode-level problems are deliberately NOT represented here: short or
/// malformed wire records resolve to empty fields or skipped lines, and an
/// unmatched sample is reported as a status on the outcome. These variants
/// cover genuine failures of the surrounding machinery.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Specimen store operation failed
    #[error("Specimen store error: {message}")]
    Store { message: String },

    /// Specimen not found in the store
    #[error("Specimen not found: id = {specimen_id}")]
    SpecimenNotFound { specimen_id: i64 },

    /// Test parameter not found in the store
    #[error("Test parameter not found: id = {parameter_id}")]
    ParameterNotFound { parameter_id: i64 },

    /// JSON serialization or deserialization failed
    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a specimen store error
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    /// Create a specimen not found error
    pub fn specimen_not_found(specimen_id: i64) -> Self {
        Self::SpecimenNotFound { specimen_id }
    }

    /// Create a test parameter not found error
    pub fn parameter_not_found(parameter_id: i64) -> Self {
        Self::ParameterNotFound { parameter_id }
    }

    /// Create a serialization error with context
    pub fn serialization(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            message: "JSON serialization failed".to_string(),
            source: error,
        }
    }
}

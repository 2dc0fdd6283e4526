//! Configuration management and validation.
//!
//! Provides the configuration structure controlling how decoded results
//! are written back to the specimen store.

use serde::{Deserialize, Serialize};

/// Configuration for the integration pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntegrationConfig {
    /// Commit the whole per-message write set atomically through the
    /// store's batch write. When false, each parameter is written
    /// independently: a failure aborts the remaining writes but earlier
    /// commits are not rolled back. The non-atomic mode exists for
    /// compatibility with deployments that expect best-effort delivery.
    pub atomic_writes: bool,

    /// Maximum accepted decimal precision on a test parameter. Values
    /// above this indicate a misconfigured parameter rather than a real
    /// analyzer scale.
    pub max_precision: u32,
}

impl Default for IntegrationConfig {
    fn default() -> Self {
        Self {
            atomic_writes: true,
            max_precision: 6,
        }
    }
}

impl IntegrationConfig {
    /// Create a configuration preserving the legacy best-effort write
    /// behavior (per-parameter independent writes, no rollback)
    pub fn best_effort() -> Self {
        Self {
            atomic_writes: false,
            ..Self::default()
        }
    }

    /// Validate the configuration for consistency
    pub fn validate(&self) -> crate::Result<()> {
        if self.max_precision > 12 {
            return Err(crate::Error::configuration(format!(
                "max_precision {} exceeds supported range (0-12)",
                self.max_precision
            )));
        }
        Ok(())
    }
}

//! In-memory specimen store
//!
//! Backs the CLI (via JSON snapshots) and the test suites. A production
//! deployment implements [`SpecimenStore`] over its own database; this
//! adapter keeps the same contract, including the atomic batch write
//! (every parameter id is validated before any value is applied).

use crate::app::models::{Specimen, TestParameter};
use crate::app::services::specimen_store::{ParameterValueWrite, SpecimenStore};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// Serializable snapshot of the store contents
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub specimens: Vec<Specimen>,
    pub parameters: Vec<TestParameter>,
}

#[derive(Debug, Default)]
struct State {
    specimens: HashMap<i64, Specimen>,
    parameters: HashMap<i64, TestParameter>,
}

/// Mutex-guarded in-memory implementation of [`SpecimenStore`]
#[derive(Debug, Default)]
pub struct InMemorySpecimenStore {
    state: Mutex<State>,
}

impl InMemorySpecimenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a snapshot
    pub fn from_snapshot(snapshot: StoreSnapshot) -> Self {
        let store = Self::new();
        for specimen in snapshot.specimens {
            store.insert_specimen(specimen);
        }
        for parameter in snapshot.parameters {
            store.insert_parameter(parameter);
        }
        store
    }

    /// Load a store from a JSON snapshot file
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io(format!("Failed to read store file {}", path.display()), e)
        })?;
        let snapshot: StoreSnapshot = serde_json::from_str(&content).map_err(|e| {
            Error::serialization(format!("Invalid store file {}", path.display()), e)
        })?;
        Ok(Self::from_snapshot(snapshot))
    }

    /// Save the store contents back to a JSON snapshot file
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let snapshot = self.snapshot();
        let content = serde_json::to_string_pretty(&snapshot)?;
        std::fs::write(path, content).map_err(|e| {
            Error::io(format!("Failed to write store file {}", path.display()), e)
        })
    }

    /// Current contents as a snapshot, ordered by id for stable output
    pub fn snapshot(&self) -> StoreSnapshot {
        let state = match self.lock() {
            Ok(state) => state,
            Err(_) => return StoreSnapshot::default(),
        };
        let mut specimens: Vec<Specimen> = state.specimens.values().cloned().collect();
        let mut parameters: Vec<TestParameter> = state.parameters.values().cloned().collect();
        specimens.sort_by_key(|s| s.id);
        parameters.sort_by_key(|p| p.id);
        StoreSnapshot {
            specimens,
            parameters,
        }
    }

    pub fn insert_specimen(&self, specimen: Specimen) {
        if let Ok(mut state) = self.lock() {
            state.specimens.insert(specimen.id, specimen);
        }
    }

    pub fn insert_parameter(&self, parameter: TestParameter) {
        if let Ok(mut state) = self.lock() {
            state.parameters.insert(parameter.id, parameter);
        }
    }

    /// Fetch a specimen by id
    pub fn specimen(&self, specimen_id: i64) -> Option<Specimen> {
        self.lock().ok()?.specimens.get(&specimen_id).cloned()
    }

    /// Fetch a parameter by id
    pub fn parameter(&self, parameter_id: i64) -> Option<TestParameter> {
        self.lock().ok()?.parameters.get(&parameter_id).cloned()
    }

    fn lock(&self) -> std::result::Result<MutexGuard<'_, State>, Error> {
        self.state
            .lock()
            .map_err(|_| Error::store("specimen store lock poisoned"))
    }
}

impl SpecimenStore for InMemorySpecimenStore {
    async fn find_received_by_assession(&self, assession_number: &str) -> Result<Vec<Specimen>> {
        let state = self.lock()?;
        let mut matches: Vec<Specimen> = state
            .specimens
            .values()
            .filter(|s| s.is_received && s.assession_number == assession_number)
            .cloned()
            .collect();
        matches.sort_by_key(|s| s.id);
        Ok(matches)
    }

    async fn test_parameters_for(&self, specimen_id: i64) -> Result<Vec<TestParameter>> {
        let state = self.lock()?;
        let mut parameters: Vec<TestParameter> = state
            .parameters
            .values()
            .filter(|p| p.specimen_id == specimen_id)
            .cloned()
            .collect();
        parameters.sort_by_key(|p| p.id);
        Ok(parameters)
    }

    async fn write_parameter_value(&self, parameter_id: i64, value: &str) -> Result<()> {
        let mut state = self.lock()?;
        let parameter = state
            .parameters
            .get_mut(&parameter_id)
            .ok_or_else(|| Error::parameter_not_found(parameter_id))?;
        parameter.value = Some(value.to_string());
        Ok(())
    }

    async fn write_parameter_values(&self, writes: &[ParameterValueWrite]) -> Result<()> {
        let mut state = self.lock()?;

        // Validate the whole batch before applying anything
        for write in writes {
            if !state.parameters.contains_key(&write.parameter_id) {
                return Err(Error::parameter_not_found(write.parameter_id));
            }
        }

        for write in writes {
            if let Some(parameter) = state.parameters.get_mut(&write.parameter_id) {
                parameter.value = Some(write.value.clone());
            }
        }
        Ok(())
    }

    async fn mark_machine_integrated(&self, specimen_id: i64) -> Result<()> {
        let mut state = self.lock()?;
        let specimen = state
            .specimens
            .get_mut(&specimen_id)
            .ok_or_else(|| Error::specimen_not_found(specimen_id))?;
        specimen.has_machine_integration = true;
        Ok(())
    }
}

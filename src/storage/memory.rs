//! Process-local in-memory store

use super::{SimulationRecord, SimulationStore, StoreError};
use crate::engine::CalculationResults;
use crate::simulation::SimulationSubmission;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

/// In-memory store; contents live as long as the process
///
/// Writes take an exclusive lock, so there is at most one writer at a time.
#[derive(Debug, Default)]
pub struct MemStore {
    records: RwLock<HashMap<Uuid, SimulationRecord>>,
    capacity: Option<usize>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that refuses new records once `capacity` is reached
    pub fn with_capacity_limit(capacity: usize) -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            capacity: Some(capacity),
        }
    }
}

impl SimulationStore for MemStore {
    fn create(
        &self,
        submission: SimulationSubmission,
        results: Option<CalculationResults>,
    ) -> Result<SimulationRecord, StoreError> {
        let mut records = self.records.write().map_err(|_| StoreError::Poisoned)?;
        if let Some(capacity) = self.capacity {
            if records.len() >= capacity {
                log::warn!("rejecting simulation: store at capacity ({capacity})");
                return Err(StoreError::CapacityExceeded(capacity));
            }
        }

        let record = SimulationRecord {
            id: Uuid::new_v4(),
            submission: submission.normalized(),
            results,
            created_at: Utc::now(),
        };
        records.insert(record.id, record.clone());
        log::info!("stored simulation {} ({} records)", record.id, records.len());
        Ok(record)
    }

    fn get(&self, id: &Uuid) -> Result<Option<SimulationRecord>, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::Poisoned)?;
        Ok(records.get(id).cloned())
    }

    fn len(&self) -> Result<usize, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::Poisoned)?;
        Ok(records.len())
    }
}

//! Simulation record storage
//!
//! Records are written once and read back by identifier. The store is an
//! explicit object handed to whoever needs it; there is no global instance.

mod memory;

pub use memory::MemStore;

use crate::engine::CalculationResults;
use crate::simulation::SimulationSubmission;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store lock poisoned")]
    Poisoned,

    #[error("store is full ({0} records)")]
    CapacityExceeded(usize),
}

/// A persisted simulation
///
/// Holds the submitted fields (blank values stored as null), the identifier,
/// the creation time and an optional results payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRecord {
    pub id: Uuid,
    #[serde(flatten)]
    pub submission: SimulationSubmission,
    pub results: Option<CalculationResults>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Storage backend for simulation records
pub trait SimulationStore: Send + Sync {
    /// Persist a new submission under a freshly generated identifier
    fn create(
        &self,
        submission: SimulationSubmission,
        results: Option<CalculationResults>,
    ) -> Result<SimulationRecord, StoreError>;

    /// Fetch a record, `None` if the identifier is unknown
    fn get(&self, id: &Uuid) -> Result<Option<SimulationRecord>, StoreError>;

    /// Number of stored records
    fn len(&self) -> Result<usize, StoreError>;

    fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

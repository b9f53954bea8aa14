//! Name generation gateway interface.
//!
//! The gateway returns names without ids; [`assign_ids`] makes them unique
//! within the batch so they can be used as vote keys.

use async_trait::async_trait;

use crate::candidate::{GeneratedName, NameCandidate, Species};
use crate::error::Result;

/// Source of candidate names for a species.
///
/// Any failure is reported as a single `PawError::GenerationFailure`; callers
/// do not distinguish error subtypes. Returns zero or more entries.
#[async_trait]
pub trait NameGateway: Send + Sync {
    async fn generate(&self, species: Species) -> Result<Vec<GeneratedName>>;
}

/// Assigns `name-{index}-{batch_millis}` ids in batch order.
pub fn assign_ids(names: Vec<GeneratedName>, batch_millis: i64) -> Vec<NameCandidate> {
    names
        .into_iter()
        .enumerate()
        .map(|(index, name)| name.into_candidate(format!("name-{index}-{batch_millis}")))
        .collect()
}

/// Like [`assign_ids`], stamped with the current time.
pub fn assign_ids_now(names: Vec<GeneratedName>) -> Vec<NameCandidate> {
    assign_ids(names, chrono::Utc::now().timestamp_millis())
}

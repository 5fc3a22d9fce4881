//! Batch lifecycle service.
//!
//! A batch is one execution run of all active indicators belonging to a
//! batch owner. It opens in Started status and ends exactly once, as
//! Stopped on success or Failed on error.

use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::{Batch, RunStatus};
use crate::repositories::{BatchOwnerRepository, BatchRepository};

#[derive(Clone)]
pub struct BatchTracker {
    batches: BatchRepository,
    owners: BatchOwnerRepository,
}

impl BatchTracker {
    pub fn new(batches: BatchRepository, owners: BatchOwnerRepository) -> Self {
        Self { batches, owners }
    }

    /// Opens a new batch for the owner in Started status.
    ///
    /// # Errors
    /// - `AppError::NotFound` - If the batch owner does not exist
    pub fn start(&self, batch_owner_id: i32) -> AppResult<Batch> {
        let owner = self.owners.get_by_id(batch_owner_id)?;
        let batch = self.batches.create(owner.id, RunStatus::Started)?;

        info!(batch_id = batch.id, batch_owner_id, "Batch started");
        Ok(batch)
    }

    /// Closes the owner's current batch as successfully completed.
    pub fn stop(&self, batch_owner_id: i32) -> AppResult<Batch> {
        self.finish(batch_owner_id, RunStatus::Stopped)
    }

    /// Closes the owner's current batch as failed.
    ///
    /// Callable from error paths; the transition rules are the same as for
    /// `stop`, so a batch can only fail while it is Started.
    pub fn fail(&self, batch_owner_id: i32) -> AppResult<Batch> {
        self.finish(batch_owner_id, RunStatus::Failed)
    }

    fn finish(&self, batch_owner_id: i32, target: RunStatus) -> AppResult<Batch> {
        let latest = self
            .batches
            .latest_for_owner(batch_owner_id)?
            .ok_or(AppError::NoActiveBatch { batch_owner_id })?;

        let current = RunStatus::from_id(latest.status_id).ok_or_else(|| AppError::Internal {
            source: anyhow::anyhow!(
                "batch {} carries unknown status id {}",
                latest.id,
                latest.status_id
            ),
        })?;

        if !current.can_transition_to(target) {
            return Err(AppError::InvalidTransition {
                entity: "Batch".to_string(),
                from: current.to_string(),
                to: target.to_string(),
            });
        }

        let updated = self.batches.update_status(latest.id, target)?;
        info!(batch_id = updated.id, batch_owner_id, status = %target, "Batch closed");
        Ok(updated)
    }
}

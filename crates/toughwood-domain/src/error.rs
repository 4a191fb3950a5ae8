//! Errors raised at the collaborator boundary

use crate::model::entity::EntityId;
use serde::Serialize;
use thiserror::Error;

/// Failure reported by a world collaborator while applying a side effect
///
/// Lookups never produce this: a missing entity is an expected state and is
/// expressed as `None`. These errors come from damage, impulse and block
/// updates that the host refused or could not carry out.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum DirectoryError {
    #[error("Entity not found: {id}")]
    EntityNotFound { id: EntityId },

    #[error("Host rejected update for {id}: {reason}")]
    Rejected { id: EntityId, reason: String },

    #[error("Block at {pos} cannot be updated: {reason}")]
    BlockRejected { pos: String, reason: String },

    #[error("World unavailable: {reason}")]
    Unavailable { reason: String },
}

//! EntityDirectory - The host's entity registry, as seen by the engine

use crate::error::DirectoryError;
use crate::model::entity::{ActorState, EntityId, EntityKind, Location, PlayerState};
use glam::DVec3;

/// Entity lookup and side effects supplied by the host
///
/// This is a PORT in hexagonal architecture. Implementations must be safe
/// to call from the tick path while the event path is also running.
pub trait EntityDirectory: Send + Sync {
    /// Find a non-player actor by id
    fn find_actor(&self, id: &EntityId) -> Option<ActorState>;

    /// Find a player by id
    fn find_player(&self, id: &EntityId) -> Option<PlayerState>;

    /// Closest alive, online player in the same world within `max_distance`
    fn nearest_player(&self, origin: &Location, max_distance: f64) -> Option<PlayerState>;

    /// Every actor of `kind` across all loaded regions
    fn actors_of_kind(&self, kind: &EntityKind) -> Vec<ActorState>;

    /// Damage `target` by `amount`, attributed to `attributed_to`
    fn apply_damage(
        &self,
        target: &EntityId,
        amount: f64,
        attributed_to: &EntityId,
    ) -> Result<(), DirectoryError>;

    /// Add `impulse` to the entity's current velocity
    fn apply_impulse(&self, entity: &EntityId, impulse: DVec3) -> Result<(), DirectoryError>;

    /// Current velocity of any entity
    fn current_velocity(&self, entity: &EntityId) -> Result<DVec3, DirectoryError>;
}

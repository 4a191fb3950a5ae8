//! AggroRecord - One aggressive actor and whom it is after
//!
//! Records are owned by the [`AggroRegistry`](crate::service::registry::AggroRegistry).
//! Everyone else works with copies.

use super::entity::EntityId;

/// One discrete simulation step
///
/// Signed so that tick arithmetic never underflows near zero.
pub type Tick = i64;

/// Aggression state of a single actor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggroRecord {
    /// The aggressive actor (immutable)
    actor_id: EntityId,
    /// Pursued target; `None` means "seek the nearest player"
    target_id: Option<EntityId>,
    /// Tick the record was created (immutable)
    start_tick: Tick,
    /// Tick of the most recent attack; `None` until the first one
    last_attack_tick: Option<Tick>,
    /// Incarnation number assigned by the registry on insert
    generation: u64,
}

impl AggroRecord {
    /// Create a new record that has never attacked
    pub fn new(actor_id: EntityId, target_id: Option<EntityId>, start_tick: Tick) -> Self {
        Self {
            actor_id,
            target_id,
            start_tick,
            last_attack_tick: None,
            generation: 0,
        }
    }

    pub(crate) fn with_generation(mut self, generation: u64) -> Self {
        self.generation = generation;
        self
    }

    // ========== Getters ==========

    pub fn actor_id(&self) -> &EntityId {
        &self.actor_id
    }

    pub fn target_id(&self) -> Option<&EntityId> {
        self.target_id.as_ref()
    }

    pub fn start_tick(&self) -> Tick {
        self.start_tick
    }

    pub fn last_attack_tick(&self) -> Option<Tick> {
        self.last_attack_tick
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    // ========== Time Checks ==========

    /// Duration-based expiry. A non-positive duration never expires.
    pub fn has_expired(&self, now: Tick, duration: Tick) -> bool {
        duration > 0 && now - self.start_tick > duration
    }

    /// Whether the attack cooldown has elapsed at `now`
    ///
    /// A record that never attacked may attack immediately.
    pub fn can_attack(&self, now: Tick, interval: Tick) -> bool {
        match self.last_attack_tick {
            None => true,
            Some(last) => now - last >= interval,
        }
    }

    // ========== Mutations ==========

    pub(crate) fn set_target(&mut self, target_id: EntityId) {
        self.target_id = Some(target_id);
    }

    /// Record an attack; the attack tick never moves backwards
    pub(crate) fn record_attack(&mut self, now: Tick) {
        self.last_attack_tick = Some(self.last_attack_tick.map_or(now, |last| last.max(now)));
    }
}

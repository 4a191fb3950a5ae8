//! In-Memory World
//!
//! A simple in-memory world implementing `EntityDirectory` and `CropField`.
//! Useful for testing, demos, and hosts that mirror their state into it.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use glam::DVec3;
use toughwood_domain::error::DirectoryError;
use toughwood_domain::model::crop::{BlockPos, CropState};
use toughwood_domain::model::entity::{ActorState, EntityId, EntityKind, Location, PlayerState};
use toughwood_domain::port::crop_field::CropField;
use toughwood_domain::port::directory::EntityDirectory;

/// Health a player joins with
pub const PLAYER_MAX_HEALTH: f64 = 20.0;

/// Fraction of horizontal velocity kept after each physics step
pub const GROUND_DRAG: f64 = 0.5;

/// Most recent damage events kept; older ones are dropped
pub const DAMAGE_LOG_CAPACITY: usize = 1024;

/// One damage application, as recorded by the world
#[derive(Debug, Clone, PartialEq)]
pub struct DamageEvent {
    pub target: EntityId,
    pub amount: f64,
    pub attributed_to: EntityId,
}

#[derive(Debug, Default)]
struct WorldState {
    actors: HashMap<EntityId, ActorState>,
    players: HashMap<EntityId, PlayerState>,
    player_velocity: HashMap<EntityId, DVec3>,
    health: HashMap<EntityId, f64>,
    crops: HashMap<BlockPos, CropState>,
    damage_log: VecDeque<DamageEvent>,
}

/// In-memory world
///
/// Thread-safe implementation using RwLock. Clones share the same world.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWorld {
    state: Arc<RwLock<WorldState>>,
}

impl InMemoryWorld {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, WorldState>, DirectoryError> {
        self.state.read().map_err(|_| DirectoryError::Unavailable {
            reason: "Failed to acquire read lock".to_string(),
        })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, WorldState>, DirectoryError> {
        self.state.write().map_err(|_| DirectoryError::Unavailable {
            reason: "Failed to acquire write lock".to_string(),
        })
    }

    // ========== Population ==========

    /// Spawn a villager and return its id
    pub fn spawn_villager(&self, location: Location) -> EntityId {
        let id = EntityId::random();
        self.spawn_actor(ActorState::new(id, EntityKind::Villager, location));
        id
    }

    pub fn spawn_actor(&self, actor: ActorState) {
        if let Ok(mut state) = self.write() {
            state.actors.insert(actor.id, actor);
        }
    }

    /// Connect a player and return their id
    pub fn join_player(&self, name: impl Into<String>, location: Location) -> EntityId {
        let id = EntityId::random();
        self.add_player(PlayerState::new(id, name, location));
        id
    }

    pub fn add_player(&self, player: PlayerState) {
        if let Ok(mut state) = self.write() {
            state.health.insert(player.id, PLAYER_MAX_HEALTH);
            state.players.insert(player.id, player);
        }
    }

    /// Remove an actor from the world entirely
    pub fn despawn(&self, id: &EntityId) {
        if let Ok(mut state) = self.write() {
            state.actors.remove(id);
        }
    }

    /// Mark an actor or player dead
    pub fn kill(&self, id: &EntityId) {
        if let Ok(mut state) = self.write() {
            if let Some(actor) = state.actors.get_mut(id) {
                actor.alive = false;
            }
            if let Some(player) = state.players.get_mut(id) {
                player.alive = false;
            }
        }
    }

    pub fn set_online(&self, id: &EntityId, online: bool) {
        if let Ok(mut state) = self.write() {
            if let Some(player) = state.players.get_mut(id) {
                player.online = online;
            }
        }
    }

    /// Teleport an actor or player
    pub fn move_to(&self, id: &EntityId, location: Location) {
        if let Ok(mut state) = self.write() {
            if let Some(actor) = state.actors.get_mut(id) {
                actor.location = location;
            } else if let Some(player) = state.players.get_mut(id) {
                player.location = location;
            }
        }
    }

    pub fn place_crop(&self, pos: BlockPos, crop: CropState) {
        if let Ok(mut state) = self.write() {
            state.crops.insert(pos, crop);
        }
    }

    // ========== Inspection ==========

    pub fn health(&self, id: &EntityId) -> Option<f64> {
        self.read().ok()?.health.get(id).copied()
    }

    /// Recent damage events, oldest first
    pub fn damage_log(&self) -> Vec<DamageEvent> {
        self.read()
            .map(|s| s.damage_log.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Take every logged damage event, leaving the log empty
    pub fn drain_damage_log(&self) -> Vec<DamageEvent> {
        self.write()
            .map(|mut s| Vec::from(std::mem::take(&mut s.damage_log)))
            .unwrap_or_default()
    }

    pub fn actor_count(&self) -> usize {
        self.read().map(|s| s.actors.len()).unwrap_or(0)
    }

    // ========== Physics ==========

    /// Move every actor and player by its velocity, then apply ground drag
    ///
    /// Vertical velocity is discarded: everything stays on flat ground.
    pub fn step(&self) {
        let Ok(mut state) = self.write() else {
            return;
        };
        let WorldState {
            actors,
            players,
            player_velocity,
            ..
        } = &mut *state;

        for actor in actors.values_mut().filter(|a| a.alive) {
            actor.location.position += DVec3::new(actor.velocity.x, 0.0, actor.velocity.z);
            actor.velocity *= GROUND_DRAG;
        }
        for (id, velocity) in player_velocity.iter_mut() {
            if let Some(player) = players.get_mut(id) {
                player.location.position += DVec3::new(velocity.x, 0.0, velocity.z);
            }
            *velocity *= GROUND_DRAG;
        }
    }
}

impl EntityDirectory for InMemoryWorld {
    fn find_actor(&self, id: &EntityId) -> Option<ActorState> {
        self.read().ok()?.actors.get(id).cloned()
    }

    fn find_player(&self, id: &EntityId) -> Option<PlayerState> {
        self.read().ok()?.players.get(id).cloned()
    }

    fn nearest_player(&self, origin: &Location, max_distance: f64) -> Option<PlayerState> {
        let state = self.read().ok()?;
        state
            .players
            .values()
            .filter(|p| p.is_targetable())
            .filter_map(|p| origin.distance(&p.location).map(|d| (d, p)))
            .filter(|(d, _)| *d <= max_distance)
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, p)| p.clone())
    }

    fn actors_of_kind(&self, kind: &EntityKind) -> Vec<ActorState> {
        self.read()
            .map(|s| s.actors.values().filter(|a| a.kind == *kind).cloned().collect())
            .unwrap_or_default()
    }

    fn apply_damage(
        &self,
        target: &EntityId,
        amount: f64,
        attributed_to: &EntityId,
    ) -> Result<(), DirectoryError> {
        let mut state = self.write()?;
        let health = state
            .health
            .get_mut(target)
            .ok_or(DirectoryError::EntityNotFound { id: *target })?;
        *health = (*health - amount).max(0.0);
        let dead = *health <= 0.0;

        if state.damage_log.len() >= DAMAGE_LOG_CAPACITY {
            state.damage_log.pop_front();
        }
        state.damage_log.push_back(DamageEvent {
            target: *target,
            amount,
            attributed_to: *attributed_to,
        });
        if dead {
            if let Some(player) = state.players.get_mut(target) {
                player.alive = false;
            }
        }
        Ok(())
    }

    fn apply_impulse(&self, entity: &EntityId, impulse: DVec3) -> Result<(), DirectoryError> {
        let mut state = self.write()?;
        if let Some(actor) = state.actors.get_mut(entity) {
            actor.velocity += impulse;
            return Ok(());
        }
        if state.players.contains_key(entity) {
            *state.player_velocity.entry(*entity).or_insert(DVec3::ZERO) += impulse;
            return Ok(());
        }
        Err(DirectoryError::EntityNotFound { id: *entity })
    }

    fn current_velocity(&self, entity: &EntityId) -> Result<DVec3, DirectoryError> {
        let state = self.read()?;
        if let Some(actor) = state.actors.get(entity) {
            return Ok(actor.velocity);
        }
        if state.players.contains_key(entity) {
            return Ok(state.player_velocity.get(entity).copied().unwrap_or(DVec3::ZERO));
        }
        Err(DirectoryError::EntityNotFound { id: *entity })
    }
}

impl CropField for InMemoryWorld {
    fn crop_at(&self, pos: &BlockPos) -> Option<CropState> {
        self.read().ok()?.crops.get(pos).cloned()
    }

    fn set_crop_age(&self, pos: &BlockPos, age: u8) -> Result<(), DirectoryError> {
        let mut state = self.write()?;
        let crop = state.crops.get_mut(pos).ok_or_else(|| DirectoryError::BlockRejected {
            pos: pos.to_string(),
            reason: "no ageable block".to_string(),
        })?;
        crop.age = age.min(crop.max_age);
        Ok(())
    }
}

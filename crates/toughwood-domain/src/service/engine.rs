//! AggroEngine - One simulation step for every aggressive actor
//!
//! Per record, in no particular order:
//! 1. Resolve the actor; evict if it is gone or dead
//! 2. Evict if the configured duration has elapsed
//! 3. Resolve the target, falling back to the nearest player in range
//! 4. Steer toward the target and attack when close enough and off cooldown
//!
//! Records are processed independently. A failed side effect on one record
//! is reported in its [`RecordOutcome`] and never stops the batch.
//!
//! The engine is stateless. All state lives in the
//! [`AggroRegistry`](crate::service::registry::AggroRegistry).

use glam::DVec3;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::DirectoryError;
use crate::model::aggro::{AggroRecord, Tick};
use crate::model::entity::{ActorState, EntityId, PlayerState};
use crate::model::settings::AggroSettings;
use crate::port::directory::EntityDirectory;
use crate::service::registry::AggroRegistry;

/// Below this distance the actor does not steer
pub const STEERING_EPSILON: f64 = 1e-4;

/// Floor for the vertical steering component, enough to climb one block
pub const MIN_VERTICAL_IMPULSE: f64 = 0.05;

/// Magnitude of the knockback applied to a hit target
pub const KNOCKBACK_STRENGTH: f64 = 0.3;

/// Why a record was removed by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EvictionReason {
    /// The actor is no longer in the world
    ActorMissing,
    /// The actor is dead
    ActorDead,
    /// `aggro-duration-ticks` elapsed
    Expired,
}

/// What happened to one record during a tick
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum RecordOutcome {
    /// Removed from the registry
    Evicted { reason: EvictionReason },
    /// Eviction skipped because the record was replaced mid-tick
    Superseded,
    /// No target could be resolved; the actor holds position
    Holding,
    /// Steered toward `target`, attacking if `attacked`
    Pursued {
        target: EntityId,
        distance: f64,
        attacked: bool,
    },
    /// Pursued, but at least one side effect failed
    ApplicationFailed {
        target: EntityId,
        attacked: bool,
        errors: Vec<DirectoryError>,
    },
}

/// One record's line in a [`TickReport`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordReport {
    pub actor: EntityId,
    #[serde(flatten)]
    pub outcome: RecordOutcome,
}

/// Everything the engine did during one tick
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickReport {
    pub tick: Tick,
    /// The feature was disabled and the registry was cleared
    pub cleared: bool,
    pub records: Vec<RecordReport>,
}

impl TickReport {
    fn cleared(tick: Tick) -> Self {
        Self {
            tick,
            cleared: true,
            records: Vec::new(),
        }
    }

    /// Outcome for `actor`, if it was processed this tick
    pub fn outcome_for(&self, actor: &EntityId) -> Option<&RecordOutcome> {
        self.records
            .iter()
            .find(|r| r.actor == *actor)
            .map(|r| &r.outcome)
    }

    /// Number of attacks that landed (or were attempted) this tick
    pub fn attacks(&self) -> usize {
        self.records
            .iter()
            .filter(|r| {
                matches!(
                    r.outcome,
                    RecordOutcome::Pursued { attacked: true, .. }
                        | RecordOutcome::ApplicationFailed { attacked: true, .. }
                )
            })
            .count()
    }

    /// Number of records evicted this tick
    pub fn evictions(&self) -> usize {
        self.records
            .iter()
            .filter(|r| matches!(r.outcome, RecordOutcome::Evicted { .. }))
            .count()
    }
}

/// The per-tick aggression algorithm
#[derive(Debug, Clone, Copy, Default)]
pub struct AggroEngine;

impl AggroEngine {
    pub fn new() -> Self {
        Self
    }

    /// Advance every record by one tick
    pub fn tick(
        &self,
        now: Tick,
        settings: &AggroSettings,
        registry: &AggroRegistry,
        directory: &dyn EntityDirectory,
    ) -> TickReport {
        if !settings.enabled {
            registry.clear();
            return TickReport::cleared(now);
        }

        let records = registry
            .snapshot()
            .into_iter()
            .map(|record| RecordReport {
                actor: *record.actor_id(),
                outcome: self.process(now, settings, registry, directory, &record),
            })
            .collect();

        TickReport {
            tick: now,
            cleared: false,
            records,
        }
    }

    fn process(
        &self,
        now: Tick,
        settings: &AggroSettings,
        registry: &AggroRegistry,
        directory: &dyn EntityDirectory,
        record: &AggroRecord,
    ) -> RecordOutcome {
        // 1. Actor
        let actor = match directory.find_actor(record.actor_id()) {
            None => return evict(registry, record, EvictionReason::ActorMissing, settings),
            Some(actor) if !actor.alive => {
                return evict(registry, record, EvictionReason::ActorDead, settings)
            }
            Some(actor) => actor,
        };

        // 2. Duration
        if record.has_expired(now, settings.aggro_duration_ticks) {
            return evict(registry, record, EvictionReason::Expired, settings);
        }

        // 3. Target
        let Some(target) = self.resolve_target(settings, registry, directory, record, &actor) else {
            return RecordOutcome::Holding;
        };

        // 4. Steering and attack
        self.pursue(now, settings, registry, directory, record, &actor, &target)
    }

    fn resolve_target(
        &self,
        settings: &AggroSettings,
        registry: &AggroRegistry,
        directory: &dyn EntityDirectory,
        record: &AggroRecord,
        actor: &ActorState,
    ) -> Option<PlayerState> {
        let current = record
            .target_id()
            .and_then(|id| directory.find_player(id))
            .filter(|p| p.is_targetable() && p.location.world == actor.location.world);

        if current.is_some() {
            return current;
        }

        let nearest = directory.nearest_player(&actor.location, settings.follow_range)?;
        if record.target_id() != Some(&nearest.id) {
            registry.update(record, |r| r.set_target(nearest.id));
            if settings.debug {
                info!(
                    "[AggroEngine] {} now targeting {} ({})",
                    actor.id, nearest.name, nearest.id
                );
            }
        }
        Some(nearest)
    }

    #[allow(clippy::too_many_arguments)]
    fn pursue(
        &self,
        now: Tick,
        settings: &AggroSettings,
        registry: &AggroRegistry,
        directory: &dyn EntityDirectory,
        record: &AggroRecord,
        actor: &ActorState,
        target: &PlayerState,
    ) -> RecordOutcome {
        let mut errors = Vec::new();

        let displacement = actor.location.displacement_to(&target.location);
        let distance = displacement.length();

        if distance > STEERING_EPSILON {
            let impulse = steering_impulse(displacement / distance, settings.follow_speed);
            if let Err(e) = directory.apply_impulse(&actor.id, impulse) {
                debug!("[AggroEngine] Failed to steer {}: {}", actor.id, e);
                errors.push(e);
            }
        }

        let attacked = distance <= settings.attack_range
            && record.can_attack(now, settings.attack_interval_ticks);

        if attacked {
            if let Err(e) = directory.apply_damage(&target.id, settings.damage_per_attack, &actor.id) {
                debug!("[AggroEngine] Failed to damage {} from {}: {}", target.id, actor.id, e);
                errors.push(e);
            }

            let knockback = displacement.normalize_or_zero() * KNOCKBACK_STRENGTH;
            if knockback != DVec3::ZERO {
                if let Err(e) = directory.apply_impulse(&target.id, knockback) {
                    debug!("[AggroEngine] Failed to knock back {}: {}", target.id, e);
                    errors.push(e);
                }
            }

            registry.update(record, |r| r.record_attack(now));
        }

        if errors.is_empty() {
            RecordOutcome::Pursued {
                target: target.id,
                distance,
                attacked,
            }
        } else {
            RecordOutcome::ApplicationFailed {
                target: target.id,
                attacked,
                errors,
            }
        }
    }
}

/// Impulse of magnitude `speed` along `direction`, vertical part floored
pub fn steering_impulse(direction: DVec3, speed: f64) -> DVec3 {
    DVec3::new(
        direction.x * speed,
        (direction.y * speed).max(MIN_VERTICAL_IMPULSE),
        direction.z * speed,
    )
}

fn evict(
    registry: &AggroRegistry,
    record: &AggroRecord,
    reason: EvictionReason,
    settings: &AggroSettings,
) -> RecordOutcome {
    if !registry.evict(record) {
        return RecordOutcome::Superseded;
    }
    if settings.debug {
        info!("[AggroEngine] {} evicted: {:?}", record.actor_id(), reason);
    }
    RecordOutcome::Evicted { reason }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::entity::{EntityKind, Location};
    use crate::model::settings::TriggerMode;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Scripted world: entities are plain maps, side effects are recorded
    #[derive(Default)]
    struct ScriptedDirectory {
        actors: Mutex<HashMap<EntityId, ActorState>>,
        players: Mutex<HashMap<EntityId, PlayerState>>,
        damage: Mutex<Vec<(EntityId, f64, EntityId)>>,
        impulses: Mutex<Vec<(EntityId, DVec3)>>,
        fail_damage: bool,
        fail_impulse: bool,
    }

    impl ScriptedDirectory {
        fn add_villager(&self, at: DVec3) -> EntityId {
            let id = EntityId::random();
            let actor = ActorState::new(id, EntityKind::Villager, Location::new("world", at));
            self.actors.lock().unwrap().insert(id, actor);
            id
        }

        fn add_player(&self, name: &str, at: DVec3) -> EntityId {
            let id = EntityId::random();
            let player = PlayerState::new(id, name, Location::new("world", at));
            self.players.lock().unwrap().insert(id, player);
            id
        }

        fn with_player<F: FnOnce(&mut PlayerState)>(&self, id: &EntityId, f: F) {
            f(self.players.lock().unwrap().get_mut(id).unwrap());
        }

        fn with_actor<F: FnOnce(&mut ActorState)>(&self, id: &EntityId, f: F) {
            f(self.actors.lock().unwrap().get_mut(id).unwrap());
        }

        fn damage_count(&self) -> usize {
            self.damage.lock().unwrap().len()
        }

        fn impulses_for(&self, id: &EntityId) -> Vec<DVec3> {
            self.impulses
                .lock()
                .unwrap()
                .iter()
                .filter(|(e, _)| e == id)
                .map(|(_, v)| *v)
                .collect()
        }
    }

    impl EntityDirectory for ScriptedDirectory {
        fn find_actor(&self, id: &EntityId) -> Option<ActorState> {
            self.actors.lock().unwrap().get(id).cloned()
        }

        fn find_player(&self, id: &EntityId) -> Option<PlayerState> {
            self.players.lock().unwrap().get(id).cloned()
        }

        fn nearest_player(&self, origin: &Location, max_distance: f64) -> Option<PlayerState> {
            self.players
                .lock()
                .unwrap()
                .values()
                .filter(|p| p.is_targetable())
                .filter_map(|p| origin.distance(&p.location).map(|d| (d, p)))
                .filter(|(d, _)| *d <= max_distance)
                .min_by(|a, b| a.0.total_cmp(&b.0))
                .map(|(_, p)| p.clone())
        }

        fn actors_of_kind(&self, kind: &EntityKind) -> Vec<ActorState> {
            self.actors
                .lock()
                .unwrap()
                .values()
                .filter(|a| a.kind == *kind)
                .cloned()
                .collect()
        }

        fn apply_damage(
            &self,
            target: &EntityId,
            amount: f64,
            attributed_to: &EntityId,
        ) -> Result<(), DirectoryError> {
            self.damage.lock().unwrap().push((*target, amount, *attributed_to));
            if self.fail_damage {
                return Err(DirectoryError::Rejected {
                    id: *target,
                    reason: "invulnerable".to_string(),
                });
            }
            Ok(())
        }

        fn apply_impulse(&self, entity: &EntityId, impulse: DVec3) -> Result<(), DirectoryError> {
            if self.fail_impulse {
                return Err(DirectoryError::Unavailable {
                    reason: "entity frozen".to_string(),
                });
            }
            self.impulses.lock().unwrap().push((*entity, impulse));
            Ok(())
        }

        fn current_velocity(&self, entity: &EntityId) -> Result<DVec3, DirectoryError> {
            self.find_actor(entity)
                .map(|a| a.velocity)
                .ok_or(DirectoryError::EntityNotFound { id: *entity })
        }
    }

    fn run(
        engine: &AggroEngine,
        from: Tick,
        to: Tick,
        settings: &AggroSettings,
        registry: &AggroRegistry,
        directory: &ScriptedDirectory,
    ) -> Vec<TickReport> {
        (from..=to)
            .map(|t| engine.tick(t, settings, registry, directory))
            .collect()
    }

    // ============== Eviction ==============

    #[test]
    fn test_dead_actor_is_evicted_and_stays_gone() {
        let engine = AggroEngine::new();
        let registry = AggroRegistry::new();
        let dir = ScriptedDirectory::default();
        let villager = dir.add_villager(DVec3::ZERO);
        registry.upsert(villager, None, 0);

        dir.with_actor(&villager, |a| a.alive = false);
        let report = engine.tick(1, &AggroSettings::default(), &registry, &dir);

        assert_eq!(
            report.outcome_for(&villager),
            Some(&RecordOutcome::Evicted {
                reason: EvictionReason::ActorDead
            })
        );

        dir.with_actor(&villager, |a| a.alive = true);
        engine.tick(2, &AggroSettings::default(), &registry, &dir);
        assert!(!registry.contains(&villager));
    }

    #[test]
    fn test_missing_actor_is_evicted() {
        let engine = AggroEngine::new();
        let registry = AggroRegistry::new();
        let dir = ScriptedDirectory::default();
        let ghost = EntityId::random();
        registry.upsert(ghost, None, 0);

        let report = engine.tick(1, &AggroSettings::default(), &registry, &dir);
        assert_eq!(report.evictions(), 1);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_duration_boundary_is_strict() {
        let engine = AggroEngine::new();
        let registry = AggroRegistry::new();
        let dir = ScriptedDirectory::default();
        let villager = dir.add_villager(DVec3::ZERO);
        let settings = AggroSettings::default();
        registry.upsert(villager, None, 100);

        engine.tick(700, &settings, &registry, &dir);
        assert!(registry.contains(&villager));

        let report = engine.tick(701, &settings, &registry, &dir);
        assert_eq!(
            report.outcome_for(&villager),
            Some(&RecordOutcome::Evicted {
                reason: EvictionReason::Expired
            })
        );
        assert!(!registry.contains(&villager));
    }

    #[test]
    fn test_unlimited_duration_keeps_targetless_record() {
        let engine = AggroEngine::new();
        let registry = AggroRegistry::new();
        let dir = ScriptedDirectory::default();
        let villager = dir.add_villager(DVec3::ZERO);
        let settings = AggroSettings {
            aggro_duration_ticks: 0,
            ..AggroSettings::default()
        };
        registry.upsert(villager, None, 0);

        let reports = run(&engine, 1, 5_000, &settings, &registry, &dir);
        assert!(reports
            .iter()
            .all(|r| r.outcome_for(&villager) == Some(&RecordOutcome::Holding)));
        assert!(registry.contains(&villager));
    }

    #[test]
    fn test_disabled_clears_registry() {
        let engine = AggroEngine::new();
        let registry = AggroRegistry::new();
        let dir = ScriptedDirectory::default();
        for _ in 0..3 {
            registry.upsert(dir.add_villager(DVec3::ZERO), None, 0);
        }

        let report = engine.tick(1, &AggroSettings::default().with_enabled(false), &registry, &dir);
        assert!(report.cleared);
        assert!(registry.is_empty());
    }

    // ============== Targeting ==============

    #[test]
    fn test_offline_target_falls_back_to_nearest() {
        let engine = AggroEngine::new();
        let registry = AggroRegistry::new();
        let dir = ScriptedDirectory::default();
        let villager = dir.add_villager(DVec3::ZERO);
        let attacker = dir.add_player("Alex", DVec3::new(5.0, 0.0, 0.0));
        let bystander = dir.add_player("Steve", DVec3::new(10.0, 0.0, 0.0));
        registry.upsert(villager, Some(attacker), 100);

        dir.with_player(&attacker, |p| p.online = false);
        let report = engine.tick(101, &AggroSettings::default(), &registry, &dir);

        assert!(matches!(
            report.outcome_for(&villager),
            Some(RecordOutcome::Pursued { target, .. }) if *target == bystander
        ));
        assert_eq!(registry.get(&villager).unwrap().target_id(), Some(&bystander));
    }

    #[test]
    fn test_no_target_in_range_holds_position() {
        let engine = AggroEngine::new();
        let registry = AggroRegistry::new();
        let dir = ScriptedDirectory::default();
        let villager = dir.add_villager(DVec3::ZERO);
        let attacker = dir.add_player("Alex", DVec3::new(5.0, 0.0, 0.0));
        dir.add_player("Far", DVec3::new(100.0, 0.0, 0.0));
        registry.upsert(villager, Some(attacker), 100);

        dir.with_player(&attacker, |p| p.alive = false);
        let report = engine.tick(101, &AggroSettings::default(), &registry, &dir);

        assert_eq!(report.outcome_for(&villager), Some(&RecordOutcome::Holding));
        assert!(registry.contains(&villager));
        assert!(dir.impulses_for(&villager).is_empty());
    }

    #[test]
    fn test_always_mode_without_players_holds() {
        let engine = AggroEngine::new();
        let registry = AggroRegistry::new();
        let dir = ScriptedDirectory::default();
        let villager = dir.add_villager(DVec3::ZERO);
        registry.upsert(villager, None, 0);

        let settings = AggroSettings::default().with_trigger(TriggerMode::Always);
        let report = engine.tick(1, &settings, &registry, &dir);
        assert_eq!(report.outcome_for(&villager), Some(&RecordOutcome::Holding));
    }

    // ============== Steering ==============

    #[test]
    fn test_steering_impulse_points_at_target() {
        let engine = AggroEngine::new();
        let registry = AggroRegistry::new();
        let dir = ScriptedDirectory::default();
        let villager = dir.add_villager(DVec3::ZERO);
        let player = dir.add_player("Alex", DVec3::new(10.0, 0.0, 0.0));
        registry.upsert(villager, Some(player), 0);

        engine.tick(1, &AggroSettings::default(), &registry, &dir);

        let impulses = dir.impulses_for(&villager);
        assert_eq!(impulses.len(), 1);
        assert!((impulses[0].x - 0.5).abs() < 1e-9);
        assert!((impulses[0].y - MIN_VERTICAL_IMPULSE).abs() < 1e-9);
        assert!(impulses[0].z.abs() < 1e-9);
    }

    #[test]
    fn test_no_steering_at_zero_distance() {
        let engine = AggroEngine::new();
        let registry = AggroRegistry::new();
        let dir = ScriptedDirectory::default();
        let villager = dir.add_villager(DVec3::ZERO);
        let player = dir.add_player("Alex", DVec3::ZERO);
        registry.upsert(villager, Some(player), 0);

        let report = engine.tick(1, &AggroSettings::default(), &registry, &dir);

        assert!(dir.impulses_for(&villager).is_empty());
        // Attack still lands, but there is no direction to knock back along
        assert_eq!(report.attacks(), 1);
        assert!(dir.impulses_for(&player).is_empty());
    }

    #[test]
    fn test_vertical_component_keeps_upward_climb() {
        let impulse = steering_impulse(DVec3::new(0.0, 1.0, 0.0), 0.5);
        assert_eq!(impulse.y, 0.5);

        let downhill = steering_impulse(DVec3::new(0.6, -0.8, 0.0), 0.5);
        assert_eq!(downhill.y, MIN_VERTICAL_IMPULSE);
    }

    // ============== Attacks ==============

    #[test]
    fn test_attack_cooldown_over_many_ticks() {
        let engine = AggroEngine::new();
        let registry = AggroRegistry::new();
        let dir = ScriptedDirectory::default();
        let villager = dir.add_villager(DVec3::ZERO);
        let player = dir.add_player("Alex", DVec3::new(1.0, 0.0, 0.0));
        let settings = AggroSettings::default();
        registry.upsert(villager, Some(player), 0);

        // Ticks 0..=49 span five full intervals of 10; the first tick attacks
        let reports = run(&engine, 0, 49, &settings, &registry, &dir);
        let attacks: usize = reports.iter().map(|r| r.attacks()).sum();

        assert_eq!(attacks, 5);
        assert_eq!(dir.damage_count(), 5);
        assert_eq!(registry.get(&villager).unwrap().last_attack_tick(), Some(40));
    }

    #[test]
    fn test_attack_is_attributed_and_knocks_back() {
        let engine = AggroEngine::new();
        let registry = AggroRegistry::new();
        let dir = ScriptedDirectory::default();
        let villager = dir.add_villager(DVec3::ZERO);
        let player = dir.add_player("Alex", DVec3::new(0.0, 0.0, 1.0));
        registry.upsert(villager, Some(player), 0);

        engine.tick(0, &AggroSettings::default(), &registry, &dir);

        assert_eq!(dir.damage.lock().unwrap()[0], (player, 2.0, villager));
        let knockback = dir.impulses_for(&player);
        assert_eq!(knockback.len(), 1);
        assert!((knockback[0].length() - KNOCKBACK_STRENGTH).abs() < 1e-9);
        assert!(knockback[0].z > 0.0);
    }

    #[test]
    fn test_out_of_range_does_not_attack() {
        let engine = AggroEngine::new();
        let registry = AggroRegistry::new();
        let dir = ScriptedDirectory::default();
        let villager = dir.add_villager(DVec3::ZERO);
        let player = dir.add_player("Alex", DVec3::new(1.6, 0.0, 0.0));
        registry.upsert(villager, Some(player), 0);

        let report = engine.tick(0, &AggroSettings::default(), &registry, &dir);
        assert_eq!(report.attacks(), 0);
        assert_eq!(dir.damage_count(), 0);
    }

    #[test]
    fn test_damage_failure_is_reported_and_isolated() {
        let engine = AggroEngine::new();
        let registry = AggroRegistry::new();
        let dir = ScriptedDirectory {
            fail_damage: true,
            ..Default::default()
        };
        let first = dir.add_villager(DVec3::ZERO);
        let second = dir.add_villager(DVec3::new(50.0, 0.0, 0.0));
        let player = dir.add_player("Alex", DVec3::new(1.0, 0.0, 0.0));
        let other = dir.add_player("Steve", DVec3::new(60.0, 0.0, 0.0));
        registry.upsert(first, Some(player), 0);
        registry.upsert(second, Some(other), 0);

        let report = engine.tick(0, &AggroSettings::default(), &registry, &dir);

        assert!(matches!(
            report.outcome_for(&first),
            Some(RecordOutcome::ApplicationFailed { attacked: true, errors, .. }) if errors.len() == 1
        ));
        assert!(matches!(
            report.outcome_for(&second),
            Some(RecordOutcome::Pursued { attacked: false, .. })
        ));
        // The failed attack still starts the cooldown and keeps the record
        assert!(registry.contains(&first));
        assert_eq!(registry.get(&first).unwrap().last_attack_tick(), Some(0));
    }

    #[test]
    fn test_steering_failure_is_reported_and_record_kept() {
        let engine = AggroEngine::new();
        let registry = AggroRegistry::new();
        let dir = ScriptedDirectory {
            fail_impulse: true,
            ..Default::default()
        };
        let villager = dir.add_villager(DVec3::ZERO);
        let player = dir.add_player("Alex", DVec3::new(10.0, 0.0, 0.0));
        registry.upsert(villager, Some(player), 0);

        let report = engine.tick(0, &AggroSettings::default(), &registry, &dir);

        match report.outcome_for(&villager) {
            Some(RecordOutcome::ApplicationFailed { target, attacked, errors }) => {
                assert_eq!(*target, player);
                assert!(!attacked);
                assert_eq!(errors.len(), 1);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert!(registry.contains(&villager));
        assert_eq!(registry.get(&villager).unwrap().target_id(), Some(&player));
        assert_eq!(dir.damage_count(), 0);
    }

    #[test]
    fn test_replacement_during_tick_is_not_clobbered() {
        let engine = AggroEngine::new();
        let registry = AggroRegistry::new();
        let dir = ScriptedDirectory::default();
        let villager = dir.add_villager(DVec3::ZERO);
        let stale = registry.upsert(villager, None, 0);
        registry.upsert(villager, None, 50);

        // Walking the stale copy as if the snapshot had been taken earlier
        let outcome = engine.process(700, &AggroSettings::default(), &registry, &dir, &stale);

        assert_eq!(outcome, RecordOutcome::Superseded);
        assert_eq!(registry.get(&villager).unwrap().start_tick(), 50);
    }
}

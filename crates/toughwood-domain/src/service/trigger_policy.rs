//! TriggerPolicy - Maps stimuli to registry mutations
//!
//! | Stimulus         | Mode                 | Effect                         |
//! |------------------|----------------------|--------------------------------|
//! | `DamagedBy`      | `retaliate`          | upsert(victim, attacker)       |
//! | `InteractedWith` | `toggle-on-interact` | remove if aggressive, else upsert(actor, player) |
//! | (start-up)       | `always`             | upsert(actor, none) for every eligible actor |
//!
//! Everything else, and everything while disabled, is a no-op.

use tracing::info;

use crate::model::aggro::{AggroRecord, Tick};
use crate::model::entity::{EntityId, EntityKind};
use crate::model::settings::{AggroSettings, TriggerMode};
use crate::model::stimulus::Stimulus;
use crate::port::directory::EntityDirectory;
use crate::service::registry::AggroRegistry;

/// A single change to the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// Mark `actor` aggressive, optionally toward `target`
    Upsert { actor: EntityId, target: Option<EntityId> },
    /// Clear aggression for `actor`
    Remove { actor: EntityId },
}

impl Mutation {
    pub fn actor(&self) -> &EntityId {
        match self {
            Mutation::Upsert { actor, .. } | Mutation::Remove { actor } => actor,
        }
    }
}

/// Decides what a stimulus does to the registry
#[derive(Debug, Clone)]
pub struct TriggerPolicy {
    eligible: EntityKind,
}

impl Default for TriggerPolicy {
    fn default() -> Self {
        Self::new(EntityKind::Villager)
    }
}

impl TriggerPolicy {
    /// Create a policy for actors of `eligible` kind
    pub fn new(eligible: EntityKind) -> Self {
        Self { eligible }
    }

    pub fn eligible_kind(&self) -> &EntityKind {
        &self.eligible
    }

    /// Pure decision: what should `stimulus` do, given current membership?
    pub fn decide(
        &self,
        stimulus: &Stimulus,
        settings: &AggroSettings,
        is_aggressive: bool,
    ) -> Option<Mutation> {
        if !settings.enabled {
            return None;
        }

        match stimulus {
            Stimulus::DamagedBy { victim, attacker } => {
                if settings.trigger != TriggerMode::Retaliate {
                    return None;
                }
                if victim.kind != self.eligible || !attacker.is_player() {
                    return None;
                }
                Some(Mutation::Upsert {
                    actor: victim.id,
                    target: Some(attacker.id),
                })
            }
            Stimulus::InteractedWith { actor, player } => {
                if settings.trigger != TriggerMode::ToggleOnInteract {
                    return None;
                }
                if actor.kind != self.eligible {
                    return None;
                }
                if is_aggressive {
                    Some(Mutation::Remove { actor: actor.id })
                } else {
                    Some(Mutation::Upsert {
                        actor: actor.id,
                        target: Some(*player),
                    })
                }
            }
        }
    }

    /// Start-up mutations: in `always` mode, every eligible actor without a target
    pub fn initial(&self, settings: &AggroSettings, directory: &dyn EntityDirectory) -> Vec<Mutation> {
        if !settings.enabled || settings.trigger != TriggerMode::Always {
            return Vec::new();
        }

        directory
            .actors_of_kind(&self.eligible)
            .into_iter()
            .filter(|actor| actor.alive)
            .map(|actor| Mutation::Upsert {
                actor: actor.id,
                target: None,
            })
            .collect()
    }

    /// Decide and apply in one step
    ///
    /// Returns the mutation that was applied, if any.
    pub fn handle(
        &self,
        stimulus: &Stimulus,
        settings: &AggroSettings,
        registry: &AggroRegistry,
        directory: &dyn EntityDirectory,
        now: Tick,
    ) -> Option<Mutation> {
        let actor = match stimulus {
            Stimulus::DamagedBy { victim, .. } => victim.id,
            Stimulus::InteractedWith { actor, .. } => actor.id,
        };
        let mutation = self.decide(stimulus, settings, registry.contains(&actor))?;
        self.apply(&mutation, settings, registry, directory, now)
            .then_some(mutation)
    }

    /// Apply a mutation to the registry
    ///
    /// Upserts for actors the directory cannot find alive are dropped.
    pub fn apply(
        &self,
        mutation: &Mutation,
        settings: &AggroSettings,
        registry: &AggroRegistry,
        directory: &dyn EntityDirectory,
        now: Tick,
    ) -> bool {
        match mutation {
            Mutation::Upsert { actor, target } => {
                let alive = directory.find_actor(actor).map(|a| a.alive).unwrap_or(false);
                if !alive {
                    return false;
                }
                let record = registry.upsert(*actor, *target, now);
                if settings.debug {
                    trace_upsert(&record, directory);
                }
                true
            }
            Mutation::Remove { actor } => {
                let removed = registry.remove(actor).is_some();
                if settings.debug && removed {
                    info!("[AggroRegistry] {} {} aggro removed", self.eligible, actor);
                }
                removed
            }
        }
    }
}

fn trace_upsert(record: &AggroRecord, directory: &dyn EntityDirectory) {
    let target = record
        .target_id()
        .map(|id| {
            directory
                .find_player(id)
                .map(|p| p.name)
                .unwrap_or_else(|| id.to_string())
        })
        .unwrap_or_else(|| "NEAREST".to_string());
    info!(
        "[AggroRegistry] {} marked aggressive toward {} at tick {}",
        record.actor_id(),
        target,
        record.start_tick()
    );
}

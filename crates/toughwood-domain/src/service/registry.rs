//! AggroRegistry - Concurrent map from actor to aggression record
//!
//! The registry is the sole owner of every [`AggroRecord`]. Callers get
//! copies. Writes that originate from a copy (engine write-backs) name the
//! generation they read and are dropped if the record was replaced in the
//! meantime.
//!
//! Sharded locking (`DashMap`) lets the event path insert and remove while
//! a tick is walking a snapshot.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;

use crate::model::aggro::{AggroRecord, Tick};
use crate::model::entity::EntityId;

#[derive(Debug, Default)]
pub struct AggroRegistry {
    records: DashMap<EntityId, AggroRecord>,
    next_generation: AtomicU64,
}

impl AggroRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the record for `actor_id`
    ///
    /// A replacement starts over: new start tick, fresh attack cooldown.
    /// Returns a copy of the stored record.
    pub fn upsert(&self, actor_id: EntityId, target_id: Option<EntityId>, tick: Tick) -> AggroRecord {
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed) + 1;
        let record = AggroRecord::new(actor_id, target_id, tick).with_generation(generation);
        self.records.insert(actor_id, record.clone());
        record
    }

    /// Remove the record for `actor_id`, if any
    pub fn remove(&self, actor_id: &EntityId) -> Option<AggroRecord> {
        self.records.remove(actor_id).map(|(_, record)| record)
    }

    pub fn contains(&self, actor_id: &EntityId) -> bool {
        self.records.contains_key(actor_id)
    }

    /// Copy of the current record for `actor_id`
    pub fn get(&self, actor_id: &EntityId) -> Option<AggroRecord> {
        self.records.get(actor_id).map(|r| r.value().clone())
    }

    /// Copies of every record
    ///
    /// Weakly consistent: concurrent inserts and removals may or may not be
    /// reflected, but each actor appears at most once.
    pub fn snapshot(&self) -> Vec<AggroRecord> {
        self.records.iter().map(|entry| entry.value().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&self) {
        self.records.clear();
    }

    /// Remove `record` only if it has not been replaced since it was copied
    pub fn evict(&self, record: &AggroRecord) -> bool {
        self.records
            .remove_if(record.actor_id(), |_, current| current.generation() == record.generation())
            .is_some()
    }

    /// Apply `f` to the stored record if it is still the same incarnation
    pub(crate) fn update<F>(&self, record: &AggroRecord, f: F) -> bool
    where
        F: FnOnce(&mut AggroRecord),
    {
        match self.records.get_mut(record.actor_id()) {
            Some(mut current) if current.generation() == record.generation() => {
                f(current.value_mut());
                true
            }
            _ => false,
        }
    }
}

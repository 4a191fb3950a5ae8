//! Entity - Identity and state snapshots of world entities
//!
//! The host owns the live entities. The domain only ever sees immutable
//! snapshots ([`ActorState`], [`PlayerState`]) and refers to entities by
//! [`EntityId`].

use glam::DVec3;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of an entity in the host world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(Uuid);

impl EntityId {
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Fresh random (v4) identifier
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for EntityId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for EntityId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of a world entity
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntityKind {
    /// The non-player actor that can turn aggressive
    Villager,
    /// A connected player
    Player,
    /// Anything else the host reports
    Other(String),
}

impl core::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            EntityKind::Villager => write!(f, "villager"),
            EntityKind::Player => write!(f, "player"),
            EntityKind::Other(name) => write!(f, "{}", name),
        }
    }
}

/// An entity as named by an incoming event: who it is and what it is
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityRef {
    pub id: EntityId,
    pub kind: EntityKind,
}

impl EntityRef {
    pub fn new(id: EntityId, kind: EntityKind) -> Self {
        Self { id, kind }
    }

    pub fn villager(id: EntityId) -> Self {
        Self::new(id, EntityKind::Villager)
    }

    pub fn player(id: EntityId) -> Self {
        Self::new(id, EntityKind::Player)
    }

    pub fn is_player(&self) -> bool {
        self.kind == EntityKind::Player
    }
}

/// A position inside a named world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub world: String,
    pub position: DVec3,
}

impl Location {
    pub fn new(world: impl Into<String>, position: DVec3) -> Self {
        Self {
            world: world.into(),
            position,
        }
    }

    /// Straight-line distance, `None` when the locations are in different worlds
    pub fn distance(&self, other: &Location) -> Option<f64> {
        if self.world != other.world {
            return None;
        }
        Some(self.position.distance(other.position))
    }

    /// Displacement from `self` to `other` (ignores the world)
    pub fn displacement_to(&self, other: &Location) -> DVec3 {
        other.position - self.position
    }
}

/// Snapshot of a non-player actor
#[derive(Debug, Clone, PartialEq)]
pub struct ActorState {
    pub id: EntityId,
    pub kind: EntityKind,
    pub location: Location,
    pub velocity: DVec3,
    pub alive: bool,
}

impl ActorState {
    pub fn new(id: EntityId, kind: EntityKind, location: Location) -> Self {
        Self {
            id,
            kind,
            location,
            velocity: DVec3::ZERO,
            alive: true,
        }
    }
}

/// Snapshot of a player
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    pub id: EntityId,
    pub name: String,
    pub location: Location,
    pub alive: bool,
    pub online: bool,
}

impl PlayerState {
    pub fn new(id: EntityId, name: impl Into<String>, location: Location) -> Self {
        Self {
            id,
            name: name.into(),
            location,
            alive: true,
            online: true,
        }
    }

    /// A player can be pursued only while alive and connected
    pub fn is_targetable(&self) -> bool {
        self.alive && self.online
    }
}

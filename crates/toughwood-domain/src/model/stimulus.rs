//! Stimulus - External events that may change who is aggressive

use super::entity::{EntityId, EntityRef};

/// An event delivered by the host's event layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stimulus {
    /// `victim` took damage from `attacker`
    DamagedBy { victim: EntityRef, attacker: EntityRef },
    /// `player` right-clicked `actor`
    InteractedWith { actor: EntityRef, player: EntityId },
}

impl Stimulus {
    pub fn damaged_by(victim: EntityRef, attacker: EntityRef) -> Self {
        Stimulus::DamagedBy { victim, attacker }
    }

    pub fn interacted_with(actor: EntityRef, player: EntityId) -> Self {
        Stimulus::InteractedWith { actor, player }
    }
}

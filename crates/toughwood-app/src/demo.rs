//! Demo world - A small village to run the services against

use glam::DVec3;
use toughwood_adapter::InMemoryWorld;
use toughwood_domain::model::crop::{BlockFace, BlockPos, CropState, HeldItem};
use toughwood_domain::model::entity::{EntityId, EntityRef, Location};
use toughwood_domain::model::settings::TriggerMode;
use toughwood_domain::model::stimulus::Stimulus;

pub const WORLD: &str = "world";
const GROUND: f64 = 64.0;

/// Who lives in the demo village
pub struct DemoWorld {
    pub world: InMemoryWorld,
    pub villagers: Vec<EntityId>,
    pub alex: EntityId,
    pub steve: EntityId,
    pub farmland: BlockPos,
}

fn at(x: f64, z: f64) -> Location {
    Location::new(WORLD, DVec3::new(x, GROUND, z))
}

impl DemoWorld {
    /// Three villagers around the well, two players nearby
    pub fn build() -> Self {
        let world = InMemoryWorld::new();
        let villagers = vec![
            world.spawn_villager(at(0.0, 0.0)),
            world.spawn_villager(at(6.0, 2.0)),
            world.spawn_villager(at(-4.0, 8.0)),
        ];
        let alex = world.join_player("Alex", at(3.0, 1.0));
        let steve = world.join_player("Steve", at(18.0, -6.0));
        let farmland = BlockPos::new(WORLD, 10, 63, 10);

        Self {
            world,
            villagers,
            alex,
            steve,
            farmland,
        }
    }

    /// The opening move for a trigger mode: Alex hits or clicks the first villager
    pub fn provocation(&self, trigger: TriggerMode) -> Option<Stimulus> {
        let target = EntityRef::villager(self.villagers[0]);
        match trigger {
            TriggerMode::Retaliate => Some(Stimulus::damaged_by(target, EntityRef::player(self.alex))),
            TriggerMode::ToggleOnInteract => Some(Stimulus::interacted_with(target, self.alex)),
            TriggerMode::Always => None,
        }
    }

    /// Steve sows wheat: the host places the crop, the plugin hears the click
    pub fn sow_wheat(&self) -> (HeldItem, BlockPos, BlockFace) {
        let crop_pos = self.farmland.relative(BlockFace::Up);
        self.world.place_crop(crop_pos, CropState::new("WHEAT", 0, 7));
        (HeldItem::new("WHEAT_SEEDS"), self.farmland.clone(), BlockFace::Up)
    }

    pub fn player_name(&self, id: &EntityId) -> &'static str {
        if *id == self.alex {
            "Alex"
        } else if *id == self.steve {
            "Steve"
        } else {
            "unknown"
        }
    }
}

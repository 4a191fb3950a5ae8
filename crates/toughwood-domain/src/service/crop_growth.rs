//! CropGrowth - Instant wheat maturation after planting
//!
//! Planting is detected from a right-click on a block face while holding
//! wheat seeds. After a fixed delay the planted block is checked again and,
//! if it is still wheat, set to its maximum age.

use crate::error::DirectoryError;
use crate::model::aggro::Tick;
use crate::model::crop::{BlockFace, BlockPos, HeldItem};
use crate::model::settings::CropSettings;
use crate::port::crop_field::CropField;

/// A seed that will be matured once its delay elapses
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlantedSeed {
    pub pos: BlockPos,
    pub delay_ticks: Tick,
}

/// Result of a maturation check
#[derive(Debug, Clone, PartialEq)]
pub enum CropOutcome {
    /// Age set to the maximum
    Matured { age: u8 },
    /// Already at maximum age
    AlreadyRipe,
    /// The block is no longer wheat (trampled, harvested, replaced)
    NotWheat,
    /// The field refused the update
    Failed(DirectoryError),
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CropGrowth;

impl CropGrowth {
    pub fn new() -> Self {
        Self
    }

    /// Does this right-click plant wheat? If so, where and when to mature it
    pub fn on_block_interact(
        &self,
        settings: &CropSettings,
        item: Option<&HeldItem>,
        clicked: &BlockPos,
        face: BlockFace,
    ) -> Option<PlantedSeed> {
        if !settings.enabled {
            return None;
        }
        if !item?.is_wheat_seeds() {
            return None;
        }
        Some(PlantedSeed {
            pos: clicked.relative(face),
            delay_ticks: settings.delay_ticks.max(0),
        })
    }

    /// Re-check the block and ripen it
    pub fn mature(&self, field: &dyn CropField, pos: &BlockPos) -> CropOutcome {
        let Some(crop) = field.crop_at(pos) else {
            return CropOutcome::NotWheat;
        };
        if !crop.is_wheat() {
            return CropOutcome::NotWheat;
        }
        if crop.is_ripe() {
            return CropOutcome::AlreadyRipe;
        }
        match field.set_crop_age(pos, crop.max_age) {
            Ok(()) => CropOutcome::Matured { age: crop.max_age },
            Err(e) => CropOutcome::Failed(e),
        }
    }
}

//! CropField - Block access for fast wheat growth

use crate::error::DirectoryError;
use crate::model::crop::{BlockPos, CropState};

/// Read and update ageable blocks
pub trait CropField: Send + Sync {
    /// Ageable state at `pos`, `None` if the block is not ageable
    fn crop_at(&self, pos: &BlockPos) -> Option<CropState>;

    /// Set the age of the ageable block at `pos`
    fn set_crop_age(&self, pos: &BlockPos, age: u8) -> Result<(), DirectoryError>;
}

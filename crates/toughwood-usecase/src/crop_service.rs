//! CropGrowthService - Delayed ripening of freshly planted wheat

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use toughwood_domain::model::crop::{BlockFace, BlockPos, HeldItem};
use toughwood_domain::port::crop_field::CropField;
use toughwood_domain::port::settings::SettingsSource;
use toughwood_domain::service::crop_growth::{CropGrowth, CropOutcome};

pub struct CropGrowthService {
    growth: CropGrowth,
    field: Arc<dyn CropField>,
    settings: Arc<dyn SettingsSource>,
    tick_interval: Duration,
}

impl CropGrowthService {
    pub fn new(
        field: Arc<dyn CropField>,
        settings: Arc<dyn SettingsSource>,
        tick_interval: Duration,
    ) -> Self {
        Self {
            growth: CropGrowth::new(),
            field,
            settings,
            tick_interval,
        }
    }

    /// Handle a right-click on `clicked`'s `face`
    ///
    /// If this plants wheat, schedules the maturation check and returns its
    /// handle. Must be called from within a tokio runtime.
    pub fn on_block_interact(
        &self,
        item: Option<&HeldItem>,
        clicked: &BlockPos,
        face: BlockFace,
    ) -> Option<JoinHandle<CropOutcome>> {
        let settings = self.settings.crops();
        let seed = self.growth.on_block_interact(&settings, item, clicked, face)?;

        let ticks = u32::try_from(seed.delay_ticks).unwrap_or(u32::MAX);
        let delay = self.tick_interval.saturating_mul(ticks);
        let growth = self.growth;
        let field = Arc::clone(&self.field);

        Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let outcome = growth.mature(field.as_ref(), &seed.pos);
            match &outcome {
                CropOutcome::Matured { age } => debug!("Wheat at {} matured to age {}", seed.pos, age),
                CropOutcome::Failed(e) => warn!("Failed to grow wheat instantly at {}: {}", seed.pos, e),
                CropOutcome::AlreadyRipe | CropOutcome::NotWheat => {}
            }
            outcome
        }))
    }
}

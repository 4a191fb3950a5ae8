//! SharedSettings - Settings that can be swapped at runtime

use std::sync::{Arc, RwLock};

use toughwood_domain::model::settings::{AggroSettings, CropSettings};
use toughwood_domain::port::settings::SettingsSource;

/// Mutable settings holder
///
/// Clones share the same snapshots, so a handle kept by an operator console
/// can flip `enabled` while the tick loop is running.
#[derive(Debug, Clone, Default)]
pub struct SharedSettings {
    aggro: Arc<RwLock<AggroSettings>>,
    crops: Arc<RwLock<CropSettings>>,
}

impl SharedSettings {
    pub fn new(aggro: AggroSettings, crops: CropSettings) -> Self {
        Self {
            aggro: Arc::new(RwLock::new(aggro)),
            crops: Arc::new(RwLock::new(crops)),
        }
    }

    /// Copy the current snapshots of another source
    pub fn from_source(source: &dyn SettingsSource) -> Self {
        Self::new(source.aggro(), source.crops())
    }

    /// Replace both snapshots with the current ones of `source`
    ///
    /// Every clone observes the new values from its next read.
    pub fn refresh_from(&self, source: &dyn SettingsSource) {
        self.set_aggro(source.aggro());
        self.set_crops(source.crops());
    }

    pub fn set_aggro(&self, settings: AggroSettings) {
        if let Ok(mut aggro) = self.aggro.write() {
            *aggro = settings;
        }
    }

    /// Edit the aggro snapshot in place
    pub fn update_aggro<F: FnOnce(&mut AggroSettings)>(&self, f: F) {
        if let Ok(mut aggro) = self.aggro.write() {
            f(&mut aggro);
        }
    }

    pub fn set_crops(&self, settings: CropSettings) {
        if let Ok(mut crops) = self.crops.write() {
            *crops = settings;
        }
    }
}

impl SettingsSource for SharedSettings {
    fn aggro(&self) -> AggroSettings {
        self.aggro.read().map(|s| s.clone()).unwrap_or_default()
    }

    fn crops(&self) -> CropSettings {
        self.crops.read().map(|s| s.clone()).unwrap_or_default()
    }
}

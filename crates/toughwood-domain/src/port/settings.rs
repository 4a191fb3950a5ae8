//! SettingsSource - Read-only configuration snapshots

use crate::model::settings::{AggroSettings, CropSettings};

/// Provider of configuration snapshots
///
/// Called at the start of every tick and on every stimulus, so
/// implementations should hand out a cached snapshot rather than re-read
/// files.
pub trait SettingsSource: Send + Sync {
    fn aggro(&self) -> AggroSettings;

    fn crops(&self) -> CropSettings {
        CropSettings::default()
    }
}

/// Fixed settings, useful when the host has no configuration layer
impl SettingsSource for AggroSettings {
    fn aggro(&self) -> AggroSettings {
        self.clone()
    }
}

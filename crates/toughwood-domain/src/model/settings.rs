//! Settings - Typed configuration snapshots
//!
//! These mirror the `villager-aggro` and `fast-wheat` sections of the
//! plugin configuration. Every field has a documented default; readers fall
//! back to it when a value is missing or malformed.

use super::aggro::Tick;
use serde::{Deserialize, Serialize};

/// Which stimuli turn an actor aggressive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TriggerMode {
    /// Actors attacked by a player pursue that player
    #[default]
    Retaliate,
    /// Right-clicking an actor toggles its aggression
    ToggleOnInteract,
    /// Every eligible actor is aggressive from start-up
    Always,
}

impl TriggerMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerMode::Retaliate => "retaliate",
            TriggerMode::ToggleOnInteract => "toggle-on-interact",
            TriggerMode::Always => "always",
        }
    }

    /// Parse a configured value, falling back to [`TriggerMode::Retaliate`]
    pub fn parse_lenient(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl core::str::FromStr for TriggerMode {
    type Err = UnknownTriggerMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("retaliate") {
            Ok(TriggerMode::Retaliate)
        } else if s.eq_ignore_ascii_case("toggle-on-interact") {
            Ok(TriggerMode::ToggleOnInteract)
        } else if s.eq_ignore_ascii_case("always") {
            Ok(TriggerMode::Always)
        } else {
            Err(UnknownTriggerMode(s.to_string()))
        }
    }
}

impl core::fmt::Display for TriggerMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A trigger string that names no known mode
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown trigger mode '{0}'. Expected one of: retaliate, toggle-on-interact, always")]
pub struct UnknownTriggerMode(pub String);

/// Snapshot of the `villager-aggro` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AggroSettings {
    /// Master switch (default: true)
    pub enabled: bool,

    /// Trigger mode (default: retaliate)
    pub trigger: TriggerMode,

    /// Radius for nearest-player search (default: 32)
    pub follow_range: f64,

    /// Velocity impulse per tick toward the target (default: 0.5)
    pub follow_speed: f64,

    /// Distance at which attacks land (default: 1.5)
    pub attack_range: f64,

    /// Damage per attack (default: 2.0)
    pub damage_per_attack: f64,

    /// Minimum ticks between attacks (default: 10)
    pub attack_interval_ticks: Tick,

    /// Lifetime of a record in ticks; `<= 0` means unlimited (default: 600)
    pub aggro_duration_ticks: Tick,

    /// Trace registry mutations at info level (default: false)
    pub debug: bool,
}

impl Default for AggroSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            trigger: TriggerMode::Retaliate,
            follow_range: 32.0,
            follow_speed: 0.5,
            attack_range: 1.5,
            damage_per_attack: 2.0,
            attack_interval_ticks: 10,
            aggro_duration_ticks: 600,
            debug: false,
        }
    }
}

impl AggroSettings {
    /// Builder: set the trigger mode
    pub fn with_trigger(mut self, trigger: TriggerMode) -> Self {
        self.trigger = trigger;
        self
    }

    /// Builder: enable or disable the feature
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// Snapshot of the `fast-wheat` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CropSettings {
    /// Master switch (default: true)
    pub enabled: bool,

    /// Ticks between planting and maturation (default: 20)
    pub delay_ticks: Tick,
}

impl Default for CropSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            delay_ticks: 20,
        }
    }
}

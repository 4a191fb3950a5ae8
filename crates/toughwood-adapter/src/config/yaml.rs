//! YamlSettings - Settings read from the plugin's `config.yml`
//!
//! ```yaml
//! villager-aggro:
//!   enabled: true
//!   trigger: retaliate        # retaliate | toggle-on-interact | always
//!   follow-range: 32
//!   follow-speed: 0.5
//!   attack-range: 1.5
//!   damage-per-attack: 2.0
//!   attack-interval-ticks: 10
//!   aggro-duration-ticks: 600
//!   debug: false
//! fast-wheat:
//!   enabled: true
//!   delay-ticks: 20
//! ```
//!
//! Each field is read on its own. A missing or mistyped value falls back to
//! that field's default without affecting the others.

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde_yaml::Value;
use thiserror::Error;
use tracing::debug;
use toughwood_domain::model::settings::{AggroSettings, CropSettings, TriggerMode};
use toughwood_domain::port::settings::SettingsSource;

pub const AGGRO_SECTION: &str = "villager-aggro";
pub const CROP_SECTION: &str = "fast-wheat";

/// Errors loading a configuration document
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration root must be a mapping")]
    NotAMapping,

    #[error("No file to reload from")]
    NoPath,
}

#[derive(Debug, Clone, Default)]
struct Snapshots {
    aggro: AggroSettings,
    crops: CropSettings,
}

/// YAML-backed settings source
///
/// The document is parsed on load and on [`YamlSettings::reload`]; snapshots
/// handed to the engine are cached copies.
#[derive(Debug)]
pub struct YamlSettings {
    path: Option<PathBuf>,
    snapshots: RwLock<Snapshots>,
}

impl YamlSettings {
    /// Parse settings from a YAML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            path: None,
            snapshots: RwLock::new(parse(content)?),
        })
    }

    /// Load settings from a YAML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self {
            path: Some(path.to_path_buf()),
            snapshots: RwLock::new(parse(&content)?),
        })
    }

    /// Re-read the file this source was loaded from
    ///
    /// On error the previous snapshots stay in effect.
    pub fn reload(&self) -> Result<(), ConfigError> {
        let path = self.path.as_ref().ok_or(ConfigError::NoPath)?;
        let content = std::fs::read_to_string(path)?;
        let fresh = parse(&content)?;
        if let Ok(mut snapshots) = self.snapshots.write() {
            *snapshots = fresh;
        }
        debug!("Reloaded settings from {}", path.display());
        Ok(())
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl SettingsSource for YamlSettings {
    fn aggro(&self) -> AggroSettings {
        self.snapshots.read().map(|s| s.aggro.clone()).unwrap_or_default()
    }

    fn crops(&self) -> CropSettings {
        self.snapshots.read().map(|s| s.crops.clone()).unwrap_or_default()
    }
}

fn parse(content: &str) -> Result<Snapshots, ConfigError> {
    let document: Value = serde_yaml::from_str(content)?;
    match document {
        Value::Null => Ok(Snapshots::default()),
        Value::Mapping(_) => Ok(Snapshots {
            aggro: read_aggro(&Section::new(&document, AGGRO_SECTION)),
            crops: read_crops(&Section::new(&document, CROP_SECTION)),
        }),
        _ => Err(ConfigError::NotAMapping),
    }
}

fn read_aggro(section: &Section<'_>) -> AggroSettings {
    let d = AggroSettings::default();
    AggroSettings {
        enabled: section.bool("enabled", d.enabled),
        trigger: section
            .string("trigger")
            .map(TriggerMode::parse_lenient)
            .unwrap_or(d.trigger),
        follow_range: section.f64("follow-range", d.follow_range),
        follow_speed: section.f64("follow-speed", d.follow_speed),
        attack_range: section.f64("attack-range", d.attack_range),
        damage_per_attack: section.f64("damage-per-attack", d.damage_per_attack),
        attack_interval_ticks: section.i64("attack-interval-ticks", d.attack_interval_ticks),
        aggro_duration_ticks: section.i64("aggro-duration-ticks", d.aggro_duration_ticks),
        debug: section.bool("debug", d.debug),
    }
}

fn read_crops(section: &Section<'_>) -> CropSettings {
    let d = CropSettings::default();
    CropSettings {
        enabled: section.bool("enabled", d.enabled),
        delay_ticks: section.i64("delay-ticks", d.delay_ticks),
    }
}

/// Lenient field reader over one top-level section
struct Section<'a> {
    values: Option<&'a Value>,
}

impl<'a> Section<'a> {
    fn new(document: &'a Value, name: &str) -> Self {
        Self {
            values: document.get(name).filter(|v| v.is_mapping()),
        }
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        self.values?.get(key)
    }

    fn bool(&self, key: &str, default: bool) -> bool {
        self.get(key).and_then(Value::as_bool).unwrap_or(default)
    }

    fn f64(&self, key: &str, default: f64) -> f64 {
        self.get(key)
            .and_then(Value::as_f64)
            .filter(|v| v.is_finite())
            .unwrap_or(default)
    }

    /// Integers; floats are truncated
    fn i64(&self, key: &str, default: i64) -> i64 {
        match self.get(key) {
            Some(v) => v
                .as_i64()
                .or_else(|| v.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
                .unwrap_or(default),
            None => default,
        }
    }

    fn string(&self, key: &str) -> Option<&'a str> {
        self.get(key).and_then(Value::as_str)
    }
}

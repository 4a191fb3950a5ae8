//! # Toughwood Adapter Layer
//!
//! Implementations of the domain ports (Hexagonal Architecture adapters).
//!
//! ## Structure
//!
//! - `directory/` - World adapters (`EntityDirectory`, `CropField`)
//! - `config/` - Settings sources (`SettingsSource`)

pub mod config;
pub mod directory;

pub use config::{shared::SharedSettings, yaml::{ConfigError, YamlSettings}};
pub use directory::in_memory::InMemoryWorld;

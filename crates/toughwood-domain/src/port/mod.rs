//! Ports - What the domain needs from the host
//!
//! ```text
//! Domain Layer          │  Adapter Layer
//! ──────────────────────┼────────────────────────
//! trait EntityDirectory │  InMemoryWorld
//! trait SettingsSource  │  YamlSettings, SharedSettings
//! trait CropField       │  InMemoryWorld
//! ```
//!
//! All lookups are synchronous in-memory queries. Ports never block on I/O.

pub mod crop_field;
pub mod directory;
pub mod settings;

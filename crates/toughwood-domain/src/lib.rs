//! # Toughwood Domain Layer
//!
//! The simulation core behind the Toughwood gameplay modifiers.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Domain Layer (This Crate)                     │
//! │  ┌─────────────────────────────────────────────────────────────┐│
//! │  │  model/   - Identifiers, entity states, settings, records   ││
//! │  │  port/    - Collaborator traits (world, settings, crops)    ││
//! │  │  service/ - AggroRegistry, TriggerPolicy, AggroEngine,      ││
//! │  │             CropGrowth                                      ││
//! │  └─────────────────────────────────────────────────────────────┘│
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Stimuli flow through [`TriggerPolicy`] into the [`AggroRegistry`].
//! Each tick the [`AggroEngine`] walks a registry snapshot, resolves
//! actors and targets through an [`EntityDirectory`], and reports what
//! happened to every record in a [`TickReport`].
//!
//! Nothing here blocks, spawns or sleeps. Scheduling lives in the
//! usecase layer.

pub mod error;
pub mod model;
pub mod port;
pub mod service;

// Re-export commonly used types
pub use error::DirectoryError;

pub use model::{
    aggro::{AggroRecord, Tick},
    crop::{BlockFace, BlockPos, CropState, HeldItem},
    entity::{ActorState, EntityId, EntityKind, EntityRef, Location, PlayerState},
    settings::{AggroSettings, CropSettings, TriggerMode},
    stimulus::Stimulus,
};

pub use port::{crop_field::CropField, directory::EntityDirectory, settings::SettingsSource};

pub use service::{
    crop_growth::{CropGrowth, CropOutcome, PlantedSeed},
    engine::{AggroEngine, EvictionReason, RecordOutcome, RecordReport, TickReport},
    registry::AggroRegistry,
    trigger_policy::{Mutation, TriggerPolicy},
};

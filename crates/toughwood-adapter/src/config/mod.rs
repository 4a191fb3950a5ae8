//! Settings Adapters - Where configuration snapshots come from

pub mod shared;
pub mod yaml;

//! World Adapters - EntityDirectory and CropField implementations

pub mod in_memory;

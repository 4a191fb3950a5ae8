//! Domain Services - The verbs of the simulation
//!
//! `registry` owns aggression state, `trigger_policy` decides what stimuli
//! do to it, `engine` advances it one tick at a time, and `crop_growth`
//! decides what a delayed maturation check does to a block.

pub mod crop_growth;
pub mod engine;
pub mod registry;
pub mod trigger_policy;

//! Domain Models - The vocabulary of Toughwood
//!
//! Plain values describing the world as the simulation sees it.
//! The host owns the real entities; these are snapshots and ids.

pub mod aggro;
pub mod crop;
pub mod entity;
pub mod settings;
pub mod stimulus;

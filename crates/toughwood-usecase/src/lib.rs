//! # Toughwood Use Case Layer
//!
//! Application services that put the domain on a clock.
//!
//! - [`AggroService`] - `start`/`stop` lifecycle, the repeating tick timer,
//!   and the stimulus entry point
//! - [`CropGrowthService`] - delayed maturation of planted wheat
//!
//! Both expect to run inside a tokio runtime.

pub mod aggro_service;
pub mod clock;
pub mod crop_service;

pub use aggro_service::{AggroService, ServiceConfig};
pub use clock::TickClock;
pub use crop_service::CropGrowthService;

pub use toughwood_domain;

//! Per-run planet state.
//!
//! Provides the configuration, seed and node data every generation stage works on.

mod config;
mod seed;
mod planet;

pub use config::{ConfigError, PlanetConfig};
pub use seed::PlanetSeed;
pub use planet::{Node, PlanetState};

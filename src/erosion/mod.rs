//! Erosion and hydrology.
//!
//! Land is worn down toward wetter and lower neighbors, then nodes collecting
//! enough inbound water become river sources draining to the nearest low sea.

mod config;
mod diffusion;
mod rivers;

pub use config::ErosionConfig;
pub use diffusion::{erode, ErosionStats};
pub use rivers::{compute_water_flow_in, find_river_mouth, trace_rivers, RiverPath};

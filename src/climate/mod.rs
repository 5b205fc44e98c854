//! Climate: node temperatures and wind-driven moisture.

mod config;
mod temperature;
mod wind;
mod moisture;

pub use config::ClimateConfig;
pub use temperature::{assign_temperatures, temperature_c};
pub use wind::{downwind_edges, init_downwind_sets, prevailing_wind, WindEdge};
pub use moisture::{advect_moisture, AdvectionStats};

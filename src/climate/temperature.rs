//! Node temperature model.

use rayon::prelude::*;

use crate::terrain::Node;

use super::ClimateConfig;

/// Temperature (°C) at elevation `h` and latitude `lat_deg`.
pub fn temperature_c(h: f32, lat_deg: f32, cfg: &ClimateConfig) -> f32 {
    cfg.max_temperature
        - cfg.altitude_temperature_drop.eval(h)
        - cfg.latitude_temperature_drop.eval(lat_deg)
}

/// Sets `t` on every node from its current elevation and latitude.
pub fn assign_temperatures(nodes: &mut [Node], cfg: &ClimateConfig) {
    nodes.par_iter_mut().for_each(|node| {
        node.t = temperature_c(node.h, node.lat(), cfg);
    });
}

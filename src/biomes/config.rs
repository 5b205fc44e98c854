//! Biome configuration.

use serde::{Deserialize, Serialize};

use crate::curve::{CurveError, QuantizeCurve};

/// Configuration for biome classification and vertex coloring.
///
/// Temperatures are °C; moisture is the node's accumulated moisture drop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiomeConfig {
    /// Temperature bands (rows of the biome table).
    pub temperature_bands: QuantizeCurve,
    /// Moisture bands (columns of the biome table).
    pub moisture_bands: QuantizeCurve,

    // --- Per-vertex color jitter ---
    /// Maximum darkening of the gray the base color is blended toward.
    pub gray_jitter: f32,
    /// Maximum blend weight toward that gray.
    pub blend_jitter: f32,
}

impl Default for BiomeConfig {
    fn default() -> Self {
        Self {
            temperature_bands: QuantizeCurve::new(-5.0, 30.0, 4),
            moisture_bands: QuantizeCurve::new(0.0, 1.0, 6),
            gray_jitter: 0.1,
            blend_jitter: 0.05,
        }
    }
}

impl BiomeConfig {
    pub fn validate(&self) -> Result<(), CurveError> {
        self.temperature_bands.validate()?;
        self.moisture_bands.validate()
    }
}

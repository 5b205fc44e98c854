//! Top-level generation configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::biomes::BiomeConfig;
use crate::climate::ClimateConfig;
use crate::curve::CurveError;
use crate::erosion::ErosionConfig;
use crate::geometry::ANCHOR_POINTS;
use crate::tectonics::ContinentConfig;

/// Errors raised by an invalid or unreadable configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("radius must be finite and positive, got {0}")]
    InvalidRadius(f32),
    #[error("n_samples must be at least 1")]
    ZeroSamples,
    #[error("n_continents must be at least 1")]
    ZeroContinents,
    #[error("{0} points cannot be triangulated, at least 4 are required")]
    TooFewPoints(usize),
    #[error("{name} must be finite and positive, got {value}")]
    InvalidValue { name: &'static str, value: f32 },
    #[error("{name} curve is invalid: {source}")]
    InvalidCurve {
        name: &'static str,
        #[source]
        source: CurveError,
    },
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Everything a generation run needs besides the seed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanetConfig {
    /// Planet radius; elevations are in the same unit.
    pub radius: f32,
    /// Sampled points, not counting the fixed anchors.
    pub n_points: usize,
    /// Candidates drawn per sampled point, also the continent seed retry budget.
    pub n_samples: usize,
    pub continents: ContinentConfig,
    pub climate: ClimateConfig,
    pub erosion: ErosionConfig,
    pub biomes: BiomeConfig,
}

impl Default for PlanetConfig {
    fn default() -> Self {
        Self::with_radius(100.0)
    }
}

impl PlanetConfig {
    /// Defaults for a planet of radius `radius`, with every height-derived
    /// tunable scaled to it.
    pub fn with_radius(radius: f32) -> Self {
        let continents = ContinentConfig::for_radius(radius);
        let climate = ClimateConfig::for_max_height(continents.max_continent_height);
        Self {
            radius,
            n_points: 400,
            n_samples: 25,
            continents,
            climate,
            erosion: ErosionConfig::default(),
            biomes: BiomeConfig::default(),
        }
    }

    pub fn earth_like() -> Self {
        Self::default()
    }

    /// Few large continents, no late islands.
    pub fn supercontinent() -> Self {
        Self {
            continents: ContinentConfig::supercontinent(100.0),
            ..Self::default()
        }
    }

    /// Many continents and many small islands.
    pub fn archipelago() -> Self {
        Self {
            continents: ContinentConfig::archipelago(100.0),
            ..Self::default()
        }
    }

    /// Reads a config from a JSON file; missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Total point count including the anchors.
    pub fn total_points(&self) -> usize {
        self.n_points + ANCHOR_POINTS.len()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(ConfigError::InvalidRadius(self.radius));
        }
        if self.n_samples == 0 {
            return Err(ConfigError::ZeroSamples);
        }
        if self.continents.n_continents == 0 {
            return Err(ConfigError::ZeroContinents);
        }
        if self.total_points() < 4 {
            return Err(ConfigError::TooFewPoints(self.total_points()));
        }

        let positive = [
            ("max_continent_height", self.continents.max_continent_height),
            ("max_continent_dir", self.continents.max_continent_dir),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidValue { name, value });
            }
        }
        if !(0.0..=1.0).contains(&self.climate.ambient_retention) {
            return Err(ConfigError::InvalidValue {
                name: "ambient_retention",
                value: self.climate.ambient_retention,
            });
        }

        let curve = |name: &'static str, result: Result<(), CurveError>| {
            result.map_err(|source| ConfigError::InvalidCurve { name, source })
        };
        curve("climate", self.climate.validate())?;
        curve("erosion", self.erosion.validate())?;
        curve("biome", self.biomes.validate())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = PlanetConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.n_points, 400);
        assert_eq!(config.total_points(), 403);
    }

    #[test]
    fn with_radius_rescales_heights() {
        let config = PlanetConfig::with_radius(1000.0);
        assert!((config.continents.max_continent_height - 10.0).abs() < 1e-5);
        assert_eq!(config.climate.altitude_capacity.domain[1], 30.0);
        assert_eq!(config.climate.altitude_temperature_drop.domain[0], -10.0);
    }

    #[test]
    fn rejects_bad_values() {
        let mut config = PlanetConfig::default();
        config.radius = -1.0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidRadius(_))));

        let mut config = PlanetConfig::default();
        config.n_samples = 0;
        assert!(matches!(config.validate(), Err(ConfigError::ZeroSamples)));

        let mut config = PlanetConfig::default();
        config.continents.n_continents = 0;
        assert!(matches!(config.validate(), Err(ConfigError::ZeroContinents)));

        let mut config = PlanetConfig::default();
        config.climate.temperature_capacity.range.pop();
        assert!(matches!(config.validate(), Err(ConfigError::InvalidCurve { .. })));
    }

    #[test]
    fn partial_json_takes_defaults() {
        let config: PlanetConfig = serde_json::from_str(r#"{ "n_points": 50 }"#).unwrap();
        assert_eq!(config.n_points, 50);
        assert_eq!(config.radius, 100.0);
        assert_eq!(config.continents.n_continents, 8);
    }

    #[test]
    fn json_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("planet.json");
        let config = PlanetConfig::archipelago();
        std::fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();
        assert_eq!(PlanetConfig::from_json_file(&path).unwrap(), config);
    }
}

//! Configuration for continent partitioning and drift stress.

use serde::{Deserialize, Serialize};

/// Configuration parameters for continents and their drift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContinentConfig {
    /// Number of large continents seeded before expansion starts.
    pub n_continents: usize,
    /// Maximum number of small continents spawned while expansion runs.
    pub n_small_continents: usize,
    /// Largest base elevation bias a continent can carry.
    pub max_continent_height: f32,
    /// Largest magnitude of each drift-vector component.
    pub max_continent_dir: f32,
    /// Scales drift stress into elevation change at boundaries.
    pub continent_force_factor: f32,
    /// Probability that a continent gets a negative (oceanic) bias.
    pub ocean_probability: f32,
    /// Smallest bias, as a fraction of `max_continent_height`.
    pub min_bias_fraction: f32,
    /// Per-node elevation jitter during expansion, as a fraction of `max_continent_height`.
    pub height_jitter_fraction: f32,
}

impl Default for ContinentConfig {
    fn default() -> Self {
        Self::for_radius(100.0)
    }
}

impl ContinentConfig {
    /// Defaults for a planet of the given radius; heights scale with it.
    pub fn for_radius(radius: f32) -> Self {
        Self {
            n_continents: 8,
            n_small_continents: 8,
            max_continent_height: radius / 100.0,
            max_continent_dir: 2.0,
            continent_force_factor: 0.5,
            ocean_probability: 0.7,
            min_bias_fraction: 0.1,
            height_jitter_fraction: 0.1,
        }
    }

    /// Few large continents and no late islands.
    pub fn supercontinent(radius: f32) -> Self {
        Self {
            n_continents: 4,
            n_small_continents: 0,
            ocean_probability: 0.5,
            ..Self::for_radius(radius)
        }
    }

    /// Many small continents with frequent late islands.
    pub fn archipelago(radius: f32) -> Self {
        Self {
            n_continents: 12,
            n_small_continents: 24,
            ..Self::for_radius(radius)
        }
    }

    /// Elevation change per unit of drift stress.
    pub fn force_factor(&self) -> f32 {
        self.continent_force_factor * self.max_continent_height / self.max_continent_dir
    }
}

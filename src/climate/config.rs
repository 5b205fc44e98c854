//! Climate configuration parameters.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::curve::{CurveError, LinearCurve, ThresholdCurve};

/// Configuration for temperature and moisture advection.
///
/// Units are the planet's own: elevation in radius units, temperature in °C,
/// moisture in dimensionless "drops".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClimateConfig {
    // Temperature model
    pub max_temperature: f32,
    /// Temperature lost by latitude (degrees), symmetric about the equator.
    pub latitude_temperature_drop: LinearCurve,
    /// Temperature lost by elevation; zero at and below sea level.
    pub altitude_temperature_drop: LinearCurve,

    // Moisture model
    /// Moisture evaporated by an ocean node at a given temperature.
    pub evaporation: LinearCurve,
    /// Deposit capacity contributed by elevation (sea level clamped).
    /// Also the orographic blocking factor for an altitude gain.
    pub altitude_capacity: LinearCurve,
    /// Deposit capacity contributed by temperature.
    pub temperature_capacity: LinearCurve,
    /// Prevailing wind in (lon, lat) space per latitude band.
    pub wind_bands: ThresholdCurve<Vec2>,
    /// Maximum recursion depth of one moisture push.
    pub max_hops: u32,
    /// Fraction of undeposited moisture that survives each hop.
    pub ambient_retention: f32,
    /// Pushes carrying this much or less stop.
    pub min_carried_moisture: f32,
}

impl Default for ClimateConfig {
    fn default() -> Self {
        Self::for_max_height(1.0)
    }
}

impl ClimateConfig {
    /// Earth-ish bands and curves for a planet whose continents peak near `max_height`.
    pub fn for_max_height(max_height: f32) -> Self {
        let diag = |x: f32, y: f32| Vec2::new(x, y).normalize();
        Self {
            max_temperature: 40.0,
            latitude_temperature_drop: LinearCurve::new(
                [-90.0, -60.0, -30.0, 0.0, 30.0, 60.0, 90.0],
                [50.0, 24.0, 6.0, 0.0, 6.0, 24.0, 50.0],
            ),
            altitude_temperature_drop: LinearCurve::new(
                [-max_height, 0.0, max_height],
                [0.0, 0.0, 15.0],
            ),
            evaporation: LinearCurve::new([0.0, 30.0], [0.5, 1.0]),
            altitude_capacity: LinearCurve::new([0.0, max_height * 3.0], [0.1, 1.0]),
            temperature_capacity: LinearCurve::new(
                [0.0, 10.0, 20.0, 30.0, 40.0],
                [0.18, 0.25, 0.38, 0.61, 0.95],
            ),
            wind_bands: ThresholdCurve::new(
                [-60.0, -30.0, 0.0, 30.0, 60.0],
                [
                    diag(-1.0, 1.0),
                    diag(1.0, -1.0),
                    diag(-1.0, 1.0),
                    diag(-1.0, -1.0),
                    diag(1.0, 1.0),
                    diag(-1.0, -1.0),
                ],
            ),
            max_hops: 10,
            ambient_retention: 0.9,
            min_carried_moisture: 0.01,
        }
    }

    pub fn earth_like() -> Self {
        Self::default()
    }

    /// Total deposit capacity of a node.
    pub fn capacity(&self, h: f32, t: f32) -> f32 {
        self.altitude_capacity.eval(h.max(0.0)) + self.temperature_capacity.eval(t)
    }

    pub fn validate(&self) -> Result<(), CurveError> {
        self.latitude_temperature_drop.validate()?;
        self.altitude_temperature_drop.validate()?;
        self.evaporation.validate()?;
        self.altitude_capacity.validate()?;
        self.temperature_capacity.validate()?;
        self.wind_bands.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_curves_are_valid() {
        assert!(ClimateConfig::default().validate().is_ok());
        assert!(ClimateConfig::for_max_height(63.7).validate().is_ok());
    }

    #[test]
    fn capacity_ignores_depth_below_sea_level() {
        let cfg = ClimateConfig::default();
        assert_eq!(cfg.capacity(-5.0, 20.0), cfg.capacity(0.0, 20.0));
        assert!(cfg.capacity(1.0, 20.0) > cfg.capacity(0.0, 20.0));
    }

    #[test]
    fn wind_bands_are_unit_vectors() {
        let cfg = ClimateConfig::default();
        for w in &cfg.wind_bands.values {
            assert!((w.length() - 1.0).abs() < 1e-6);
        }
    }
}

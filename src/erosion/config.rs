//! Erosion and hydrology configuration.

use serde::{Deserialize, Serialize};

use crate::curve::{CurveError, LinearCurve};

/// Parameters for moisture-driven erosion and river tracing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErosionConfig {
    /// High ground eroding into a wetter neighbor, keyed on the neighbor's moisture drop.
    pub high_to_wet: LinearCurve,
    /// Wet ground eroding into an underwater neighbor, keyed on the node's moisture drop.
    pub wet_to_water: LinearCurve,
    /// Catch-all high ground eroding into any lower land neighbor, keyed on the node's moisture drop.
    pub high_wet_to_any: LinearCurve,

    /// Inbound flow above which a land node becomes a river source.
    pub river_flow_threshold: f32,
    /// Cap applied to each inbound flow contribution.
    pub flow_contribution_cap: f32,
}

impl Default for ErosionConfig {
    fn default() -> Self {
        let scale = LinearCurve::new([0.0, 1.0], [0.0, 0.75]).clamped();
        Self {
            high_to_wet: scale.clone(),
            wet_to_water: scale.clone(),
            high_wet_to_any: scale,
            river_flow_threshold: 3.0,
            flow_contribution_cap: 1.0,
        }
    }
}

impl ErosionConfig {
    pub fn validate(&self) -> Result<(), CurveError> {
        self.high_to_wet.validate()?;
        self.wet_to_water.validate()?;
        self.high_wet_to_any.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_factors_are_clamped_to_three_quarters() {
        let cfg = ErosionConfig::default();
        assert_eq!(cfg.high_to_wet.eval(5.0), 0.75);
        assert_eq!(cfg.wet_to_water.eval(-1.0), 0.0);
        assert!((cfg.high_wet_to_any.eval(0.5) - 0.375).abs() < 1e-6);
    }
}

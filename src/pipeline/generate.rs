//! One-call planet generation.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::geometry::{sample_sphere_points, ConvexHullTopology, TopologyBuilder, TopologyError};
use crate::mesh::{assemble, PlanetModel};
use crate::terrain::{PlanetConfig, PlanetSeed, PlanetState};

use super::{GenerationError, Pipeline};

/// Generates a planet with the default convex-hull triangulation.
///
/// The same seed and config always give the same model.
pub fn generate(seed: &PlanetSeed, config: &PlanetConfig) -> Result<PlanetModel, GenerationError> {
    generate_with(&ConvexHullTopology, seed, config)
}

/// Generates a planet, triangulating the sampled points with `builder`.
pub fn generate_with<B: TopologyBuilder + ?Sized>(
    builder: &B,
    seed: &PlanetSeed,
    config: &PlanetConfig,
) -> Result<PlanetModel, GenerationError> {
    config.validate()?;
    let seed_value = seed.to_u64();
    info!(%seed, seed_value, n_points = config.n_points, radius = config.radius, "generating planet");

    let mut rng = ChaCha8Rng::seed_from_u64(seed_value);
    let points = sample_sphere_points(config.n_points, config.n_samples, &mut rng);
    if points.len() < 4 {
        return Err(TopologyError::TooFewPoints(points.len()).into());
    }

    let topology = builder.build(&points)?;
    info!(
        points = points.len(),
        triangles = topology.num_triangles(),
        "sphere triangulated"
    );

    let mut state = PlanetState::new(config.clone(), seed_value, &points, topology, rng);
    Pipeline::standard().run(&mut state)?;
    Ok(assemble(state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Topology;
    use glam::Vec2;

    struct Broken;

    impl TopologyBuilder for Broken {
        fn build(&self, points: &[Vec2]) -> Result<Topology, TopologyError> {
            Err(TopologyError::Degenerate(format!("{} points refused", points.len())))
        }
    }

    #[test]
    fn small_planet_generates() {
        let config = PlanetConfig { n_points: 60, ..PlanetConfig::default() };
        let model = generate(&PlanetSeed::from(5), &config).unwrap();
        assert_eq!(model.num_nodes(), 63);
        assert_eq!(model.triangles.len(), 2 * 63 - 4);
    }

    #[test]
    fn invalid_config_is_rejected_before_sampling() {
        let config = PlanetConfig { radius: 0.0, ..PlanetConfig::default() };
        let err = generate(&PlanetSeed::default(), &config).unwrap_err();
        assert!(matches!(err, GenerationError::Config(_)));
    }

    #[test]
    fn builder_errors_propagate() {
        let config = PlanetConfig { n_points: 10, ..PlanetConfig::default() };
        let err = generate_with(&Broken, &PlanetSeed::default(), &config).unwrap_err();
        assert!(matches!(err, GenerationError::Topology(TopologyError::Degenerate(_))));
    }
}

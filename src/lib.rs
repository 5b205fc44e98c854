//! Procedural planet generator.
//!
//! Scatters points over a sphere, triangulates them, grows continents that
//! drift against each other, then runs a simple climate (temperature and
//! wind-carried moisture), erosion and river tracing before assembling a
//! colored, textured mesh with biome labels.

pub mod geometry;
pub mod curve;
pub mod terrain;
pub mod tectonics;
pub mod climate;
pub mod erosion;
pub mod biomes;
pub mod mesh;
pub mod pipeline;
pub mod export;

pub use curve::{LinearCurve, ThresholdCurve};
pub use terrain::{PlanetConfig, PlanetSeed, PlanetState, Node};
pub use pipeline::{generate, generate_with, GenerationError, GenerationStage, Pipeline};
pub use tectonics::{Continent, ContinentConfig};
pub use climate::ClimateConfig;
pub use erosion::{ErosionConfig, RiverPath};
pub use biomes::{Biome, BiomeConfig};
pub use mesh::{MeshTriangle, PlanetModel};

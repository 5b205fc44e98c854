//! Node and per-run working state.

use glam::Vec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::biomes::Biome;
use crate::climate::WindEdge;
use crate::erosion::RiverPath;
use crate::geometry::Topology;
use crate::tectonics::Continent;

use super::PlanetConfig;

/// A vertex of the planet surface with its elevation and climate state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Stable index into the node array.
    pub index: usize,
    /// (longitude, latitude) in degrees.
    pub point: Vec2,
    /// Elevation relative to sea level.
    pub h: f32,
    /// Temperature in °C (populated by the climate stage).
    pub t: f32,
    /// Owning continent, set once by the partitioner.
    pub continent: Option<usize>,
    /// Saturating accumulator of deposited moisture; never decreases.
    pub moisture_drop: f32,
    /// Part of `moisture_drop` that came from orographic blocking.
    pub orographic_drop: f32,
    /// Sum of all moisture this node received.
    pub moisture: f32,
    /// Moisture queued by upwind nodes, injected at this node's own turn.
    pub moisture_from_neighbors: f32,
    /// Inbound flow (populated by the hydrology stage).
    pub water_flow_in: f32,
    /// Downwind neighbor edges (populated by the climate stage).
    #[serde(skip)]
    pub downwind: Option<Vec<WindEdge>>,
    /// Indices of triangles incident to this node.
    pub triangles: Vec<usize>,
    /// Biome (populated by mesh assembly).
    #[serde(skip)]
    pub biome: Option<Biome>,
}

impl Node {
    pub fn new(index: usize, point: Vec2) -> Self {
        Self {
            index,
            point,
            h: 0.0,
            t: 0.0,
            continent: None,
            moisture_drop: 0.0,
            orographic_drop: 0.0,
            moisture: 0.0,
            moisture_from_neighbors: 0.0,
            water_flow_in: 0.0,
            downwind: None,
            triangles: Vec::new(),
            biome: None,
        }
    }

    pub fn lon(&self) -> f32 {
        self.point.x
    }

    pub fn lat(&self) -> f32 {
        self.point.y
    }

    /// Sea level counts as water.
    pub fn is_land(&self) -> bool {
        self.h > 0.0
    }

    /// Blocked moisture recorded on this node's downwind edge toward `neighbor`.
    pub fn blocked_toward(&self, neighbor: usize) -> f32 {
        self.downwind
            .as_deref()
            .and_then(|edges| edges.iter().find(|e| e.neighbor == neighbor))
            .map_or(0.0, |e| e.moisture_blocked)
    }
}

/// Everything one generation run owns: nodes, adjacency, continents and its RNG.
///
/// Stages read what earlier stages wrote and fill in their own fields.
#[derive(Debug, Clone)]
pub struct PlanetState {
    pub config: PlanetConfig,
    /// Resolved numeric seed.
    pub seed: u64,
    pub nodes: Vec<Node>,
    pub topology: Topology,
    pub continents: Vec<Continent>,
    /// River paths (populated by the hydrology stage).
    pub rivers: Vec<RiverPath>,
    pub rng: ChaCha8Rng,
}

impl PlanetState {
    /// Wraps sampled points and their triangulation; `rng` continues the run's stream.
    pub fn new(
        config: PlanetConfig,
        seed: u64,
        points: &[Vec2],
        topology: Topology,
        rng: ChaCha8Rng,
    ) -> Self {
        let incident = topology.incident_triangles();
        let nodes = points
            .iter()
            .zip(incident)
            .enumerate()
            .map(|(i, (&p, triangles))| Node { triangles, ..Node::new(i, p) })
            .collect();
        Self {
            config,
            seed,
            nodes,
            topology,
            continents: Vec::new(),
            rivers: Vec::new(),
            rng,
        }
    }

    /// Fresh state with its own RNG seeded from `seed`.
    pub fn from_seed(config: PlanetConfig, seed: u64, points: &[Vec2], topology: Topology) -> Self {
        Self::new(config, seed, points, topology, ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn land_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_land()).count()
    }

    /// Returns (min, max) elevation over all nodes.
    pub fn height_range(&self) -> (f32, f32) {
        self.nodes.iter().fold((f32::MAX, f32::MIN), |(lo, hi), n| {
            (lo.min(n.h), hi.max(n.h))
        })
    }

    pub fn max_moisture_drop(&self) -> f32 {
        self.nodes.iter().map(|n| n.moisture_drop).fold(0.0, f32::max)
    }

    /// Returns true once every node belongs to a continent.
    pub fn is_partitioned(&self) -> bool {
        !self.nodes.is_empty() && self.nodes.iter().all(|n| n.continent.is_some())
    }
}

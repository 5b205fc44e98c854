//! Continent partitioning by multi-source frontier expansion.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::terrain::Node;

use super::ContinentConfig;

/// A group of nodes sharing an elevation bias and a drift vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Continent {
    /// Position of this continent in the continent list.
    pub id: usize,
    /// Member nodes in the order they were claimed.
    pub nodes: Vec<usize>,
    /// Drift in (lon, lat) space.
    pub drift: Vec2,
    /// Elevation added to each member when the frontier passes it.
    pub bias: f32,
    /// Next member whose neighbors still need claiming.
    pub cursor: usize,
    pub expanding: bool,
    /// Spawned during expansion rather than up front.
    pub small: bool,
}

impl Continent {
    /// Drift magnitude.
    pub fn speed(&self) -> f32 {
        self.drift.length()
    }

    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    /// Claims the unclaimed neighbors of the node at the cursor and raises
    /// that node by the bias plus jitter.
    fn expand<R: Rng + ?Sized>(
        &mut self,
        nodes: &mut [Node],
        neighbors: &[Vec<usize>],
        jitter: f32,
        rng: &mut R,
    ) {
        let Some(&current) = self.nodes.get(self.cursor) else {
            self.expanding = false;
            return;
        };

        nodes[current].h += self.bias + (rng.random::<f32>() - 0.5) * jitter;
        for &n in &neighbors[current] {
            if nodes[n].continent.is_none() {
                nodes[n].continent = Some(self.id);
                self.nodes.push(n);
            }
        }

        self.cursor += 1;
        if self.cursor >= self.nodes.len() {
            self.expanding = false;
        }
    }
}

/// Draws drift and bias, then searches up to `n_samples` random nodes for an
/// unclaimed seed. Returns `None` when the search starves.
fn spawn_continent<R: Rng + ?Sized>(
    id: usize,
    nodes: &mut [Node],
    config: &ContinentConfig,
    n_samples: usize,
    small: bool,
    rng: &mut R,
) -> Option<Continent> {
    let max_dir = config.max_continent_dir;
    let drift = Vec2::new(
        (2.0 * rng.random::<f32>() - 1.0) * max_dir,
        (2.0 * rng.random::<f32>() - 1.0) * max_dir,
    );

    let seed = (0..n_samples)
        .map(|_| rng.random_range(0..nodes.len()))
        .find(|&i| nodes[i].continent.is_none())?;

    let sign = if rng.random::<f32>() < config.ocean_probability { -1.0 } else { 1.0 };
    let min = config.min_bias_fraction;
    let bias = sign * config.max_continent_height * (min + (1.0 - min) * rng.random::<f32>());

    nodes[seed].continent = Some(id);
    Some(Continent {
        id,
        nodes: vec![seed],
        drift,
        bias,
        cursor: 0,
        expanding: true,
        small,
    })
}

/// Spawn chance for small continents: grows by `delta` every tick and drops
/// back to `-delta` whenever it fires. Only successful spawns use up the budget.
#[derive(Debug, Clone, PartialEq)]
struct SmallContinentRamp {
    delta: f32,
    probability: f32,
    remaining: usize,
}

impl SmallContinentRamp {
    fn new(config: &ContinentConfig, n_nodes: usize) -> Self {
        let delta = (config.n_continents as f32 / n_nodes as f32)
            * config.n_small_continents as f32
            / 2.0;
        Self {
            delta,
            probability: -delta,
            remaining: config.n_small_continents,
        }
    }

    /// Advances one tick. Draws from `rng` only while budget remains.
    fn fires<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.probability += self.delta;
        if rng.random::<f32>() < self.probability {
            self.probability = -self.delta;
            true
        } else {
            false
        }
    }

    fn spawned(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }
}

/// Assigns every node to a continent and applies each continent's bias.
///
/// Seeds `n_continents` continents, then grows all of them one frontier node
/// per tick. Between ticks a small continent may spawn from the unclaimed
/// pool with a probability that ramps up each tick and resets when it fires.
/// Any node still unclaimed at the end seeds a continent of its own.
pub fn partition_continents<R: Rng + ?Sized>(
    nodes: &mut [Node],
    neighbors: &[Vec<usize>],
    config: &ContinentConfig,
    n_samples: usize,
    rng: &mut R,
) -> Vec<Continent> {
    let mut continents: Vec<Continent> = Vec::new();
    if nodes.is_empty() {
        return continents;
    }
    let jitter = config.max_continent_height * config.height_jitter_fraction;

    for _ in 0..config.n_continents {
        match spawn_continent(continents.len(), nodes, config, n_samples, false, rng) {
            Some(c) => continents.push(c),
            None => debug!("continent seed search starved, skipping"),
        }
    }

    let mut ramp = SmallContinentRamp::new(config, nodes.len());

    while continents.iter().any(|c| c.expanding) {
        for continent in continents.iter_mut().filter(|c| c.expanding) {
            continent.expand(nodes, neighbors, jitter, rng);
        }

        if ramp.fires(rng) {
            match spawn_continent(continents.len(), nodes, config, n_samples, true, rng) {
                Some(c) => {
                    ramp.spawned();
                    continents.push(c);
                }
                None => debug!("small continent seed search starved, skipping"),
            }
        }
    }

    // Only reachable when the adjacency graph is disconnected or no seed was placed.
    for i in 0..nodes.len() {
        if nodes[i].continent.is_some() {
            continue;
        }
        let id = continents.len();
        nodes[i].continent = Some(id);
        let mut continent = Continent {
            id,
            nodes: vec![i],
            drift: Vec2::ZERO,
            bias: 0.0,
            cursor: 0,
            expanding: true,
            small: true,
        };
        while continent.expanding {
            continent.expand(nodes, neighbors, jitter, rng);
        }
        debug!(node = i, size = continent.size(), "unclaimed node seeded its own continent");
        continents.push(continent);
    }

    continents
}

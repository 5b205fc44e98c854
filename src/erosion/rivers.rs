//! River sources and their descent to the sea.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::terrain::Node;

use super::ErosionConfig;

/// A river source and the ocean node it drains into, if any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiverPath {
    pub source: usize,
    /// Lowest underwater neighbor of the source.
    pub mouth: Option<usize>,
    /// Ribbon triangle (populated by mesh assembly when there is a mouth).
    pub ribbon: Option<[Vec3; 3]>,
}

impl RiverPath {
    /// Source followed by the mouth, if there is one.
    pub fn nodes(&self) -> Vec<usize> {
        std::iter::once(self.source).chain(self.mouth).collect()
    }
}

/// Sets `water_flow_in` on every land node. Returns the number of river sources.
///
/// Flow is the node's own capped moisture plus, for each higher neighbor, that
/// neighbor's capped moisture and the capped moisture blocked on the node's
/// downwind edge toward it.
pub fn compute_water_flow_in(nodes: &mut [Node], neighbors: &[Vec<usize>], cfg: &ErosionConfig) -> usize {
    let cap = cfg.flow_contribution_cap;
    let mut sources = 0;

    for i in 0..nodes.len() {
        if !nodes[i].is_land() {
            nodes[i].water_flow_in = 0.0;
            continue;
        }
        let h = nodes[i].h;
        let mut flow = nodes[i].moisture_drop.min(cap);
        for &nb in &neighbors[i] {
            if nodes[nb].h > h {
                flow += nodes[nb].moisture_drop.min(cap) + nodes[i].blocked_toward(nb).min(cap);
            }
        }
        nodes[i].water_flow_in = flow;
        if flow > cfg.river_flow_threshold {
            sources += 1;
        }
    }
    sources
}

/// Lowest neighbor below sea level and below `node`.
pub fn find_river_mouth(node: usize, nodes: &[Node], neighbors: &[Vec<usize>]) -> Option<usize> {
    let mut best: Option<usize> = None;
    let mut best_h = nodes[node].h;
    for &nb in &neighbors[node] {
        let h = nodes[nb].h;
        if h < 0.0 && h < best_h {
            best_h = h;
            best = Some(nb);
        }
    }
    best
}

/// One path per land node whose inbound flow exceeds the river threshold.
pub fn trace_rivers(nodes: &[Node], neighbors: &[Vec<usize>], cfg: &ErosionConfig) -> Vec<RiverPath> {
    nodes
        .iter()
        .filter(|n| n.is_land() && n.water_flow_in > cfg.river_flow_threshold)
        .map(|n| RiverPath {
            source: n.index,
            mouth: find_river_mouth(n.index, nodes, neighbors),
            ribbon: None,
        })
        .collect()
}

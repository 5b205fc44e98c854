//! Latitude-band prevailing winds and per-node downwind edges.

use glam::Vec2;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::geometry::lon_lat_direction;
use crate::terrain::Node;

use super::ClimateConfig;

/// An adjacency edge the prevailing wind blows along.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindEdge {
    pub neighbor: usize,
    /// Alignment of the edge with the wind, in (0, 1].
    pub dot: f32,
    /// `dot` normalized over the node's downwind edges.
    pub frac: f32,
    /// Moisture held back along this edge by orographic blocking.
    pub moisture_blocked: f32,
}

/// Unit wind direction in (lon, lat) space at latitude `lat_deg`.
pub fn prevailing_wind(lat_deg: f32, cfg: &ClimateConfig) -> Vec2 {
    *cfg.wind_bands.eval(lat_deg)
}

/// Neighbors of `node` whose direction has a positive dot product with the wind.
pub fn downwind_edges(
    node: usize,
    nodes: &[Node],
    neighbors: &[Vec<usize>],
    cfg: &ClimateConfig,
) -> Vec<WindEdge> {
    let from = nodes[node].point;
    let wind = prevailing_wind(from.y, cfg);

    let mut edges: Vec<WindEdge> = neighbors[node]
        .iter()
        .filter_map(|&n| {
            let dot = lon_lat_direction(from, nodes[n].point).dot(wind);
            (dot > 0.0).then_some(WindEdge { neighbor: n, dot, frac: 0.0, moisture_blocked: 0.0 })
        })
        .collect();

    let total: f32 = edges.iter().map(|e| e.dot).sum();
    if total > 0.0 {
        for e in &mut edges {
            e.frac = e.dot / total;
        }
    }
    edges
}

/// Computes the downwind set of every node. Returns the total edge count.
pub fn init_downwind_sets(nodes: &mut [Node], neighbors: &[Vec<usize>], cfg: &ClimateConfig) -> usize {
    let view: &[Node] = nodes;
    let sets: Vec<Vec<WindEdge>> = (0..view.len())
        .into_par_iter()
        .map(|i| downwind_edges(i, view, neighbors, cfg))
        .collect();

    let mut total = 0;
    for (node, edges) in nodes.iter_mut().zip(sets) {
        total += edges.len();
        node.downwind = Some(edges);
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(i: usize, lon: f32, lat: f32) -> Node {
        Node::new(i, Vec2::new(lon, lat))
    }

    #[test]
    fn bands_switch_at_thresholds() {
        let cfg = ClimateConfig::default();
        let s = std::f32::consts::FRAC_1_SQRT_2;
        assert!((prevailing_wind(10.0, &cfg) - Vec2::new(-s, -s)).length() < 1e-6);
        assert!((prevailing_wind(-10.0, &cfg) - Vec2::new(-s, s)).length() < 1e-6);
        assert!((prevailing_wind(45.0, &cfg) - Vec2::new(s, s)).length() < 1e-6);
        assert!((prevailing_wind(-75.0, &cfg) - Vec2::new(-s, s)).length() < 1e-6);
        // the threshold itself belongs to the band above it
        assert_eq!(prevailing_wind(0.0, &cfg), prevailing_wind(10.0, &cfg));
    }

    #[test]
    fn only_downwind_neighbors_are_kept() {
        let cfg = ClimateConfig::default();
        // at 10N the wind blows toward the south-west
        let nodes = vec![
            node(0, 0.0, 10.0),
            node(1, -5.0, 5.0),
            node(2, 5.0, 15.0),
            node(3, -5.0, 10.0),
        ];
        let neighbors = vec![vec![1, 2, 3], vec![0], vec![0], vec![0]];
        let edges = downwind_edges(0, &nodes, &neighbors, &cfg);

        let kept: Vec<usize> = edges.iter().map(|e| e.neighbor).collect();
        assert_eq!(kept, vec![1, 3]);
        let total: f32 = edges.iter().map(|e| e.frac).sum();
        assert!((total - 1.0).abs() < 1e-6);
        assert!(edges[0].dot > edges[1].dot);
    }

    #[test]
    fn init_populates_every_node() {
        let cfg = ClimateConfig::default();
        let mut nodes = vec![node(0, 0.0, 10.0), node(1, -5.0, 5.0)];
        let neighbors = vec![vec![1], vec![0]];
        let total = init_downwind_sets(&mut nodes, &neighbors, &cfg);

        assert_eq!(total, 1);
        assert_eq!(nodes[0].downwind.as_ref().map(Vec::len), Some(1));
        assert_eq!(nodes[1].downwind.as_ref().map(Vec::len), Some(0));
    }
}

//! Moisture-driven elevation diffusion.

use crate::terrain::Node;

use super::ErosionConfig;

/// Totals from one erosion sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ErosionStats {
    /// Land nodes that were eroded.
    pub eroded_nodes: usize,
    /// Elevation removed from sources.
    pub removed: f32,
    /// Elevation added to neighbors.
    pub added: f32,
}

/// Moves `diff * factor / (4n)` off `node` and `diff * factor / (2n)` onto `neighbor`.
///
/// The neighbor gains twice what the source loses, so total elevation grows.
fn transfer(nodes: &mut [Node], node: usize, neighbor: usize, diff: f32, factor: f32, n: f32, stats: &mut ErosionStats) {
    let loss = diff * factor / (4.0 * n);
    let gain = diff * factor / (2.0 * n);
    nodes[node].h -= loss;
    nodes[neighbor].h += gain;
    stats.removed += loss;
    stats.added += gain;
}

/// Erodes every land node into its neighbors, in index order and in place.
///
/// For each neighbor the height difference is taken once, then up to two
/// transfers apply: high ground into a wetter neighbor, followed by either
/// wet ground into a neighbor now under water, or high ground into any
/// remaining lower neighbor.
pub fn erode(nodes: &mut [Node], neighbors: &[Vec<usize>], cfg: &ErosionConfig) -> ErosionStats {
    let mut stats = ErosionStats::default();

    for i in 0..nodes.len() {
        if !nodes[i].is_land() {
            continue;
        }
        let adjacent = &neighbors[i];
        let n = adjacent.len() as f32;
        if adjacent.is_empty() {
            continue;
        }
        stats.eroded_nodes += 1;

        for &nb in adjacent {
            let diff = nodes[i].h - nodes[nb].h;

            if diff > 0.0 {
                let factor = cfg.high_to_wet.eval(nodes[nb].moisture_drop);
                transfer(nodes, i, nb, diff, factor, n, &mut stats);
            }

            if nodes[nb].h <= 0.0 {
                let factor = cfg.wet_to_water.eval(nodes[i].moisture_drop);
                transfer(nodes, i, nb, diff, factor, n, &mut stats);
            } else if diff > 0.0 {
                let factor = cfg.high_wet_to_any.eval(nodes[i].moisture_drop);
                transfer(nodes, i, nb, diff, factor, n, &mut stats);
            }
        }
    }

    stats
}

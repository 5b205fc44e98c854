//! Wind-driven moisture advection.
//!
//! Ocean nodes evaporate moisture that is pushed along downwind edges. Each
//! node keeps what its capacity allows, lets a fraction of the rest continue,
//! and holds some back when the wind climbs to a higher neighbor.
//!
//! Nodes are opened in index order. Moisture headed for a node that is not yet
//! open is queued on it and injected when its turn comes; moisture headed for
//! an open node recurses into it, up to a fixed hop count.

use tracing::debug;

use crate::terrain::Node;

use super::ClimateConfig;

/// Totals collected during one advection pass.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AdvectionStats {
    /// Moisture evaporated by ocean nodes.
    pub evaporated: f32,
    /// Moisture parked on not-yet-open nodes.
    pub queued: f32,
    /// Moisture deposited by capacity-limited accumulation.
    pub deposited: f32,
    /// Moisture deposited by orographic blocking.
    pub blocked: f32,
    /// Number of node visits.
    pub visits: usize,
    /// Pushes dropped at the hop limit.
    pub hop_capped: usize,
}

struct Advection<'a> {
    nodes: &'a mut [Node],
    opened: Vec<bool>,
    cfg: &'a ClimateConfig,
    stats: AdvectionStats,
}

impl Advection<'_> {
    fn travel(&mut self, i: usize, moisture: f32, hops: u32) {
        if hops > self.cfg.max_hops {
            self.stats.hop_capped += 1;
            return;
        }
        self.stats.visits += 1;

        let cfg = self.cfg;
        let (h, source_is_water) = {
            let node = &self.nodes[i];
            (node.h.max(0.0), !node.is_land())
        };
        let capacity = cfg.capacity(self.nodes[i].h, self.nodes[i].t);

        let m = (moisture.min(capacity) - self.nodes[i].moisture_drop).max(0.0);
        self.nodes[i].moisture_drop += m;
        self.nodes[i].moisture += moisture;
        self.stats.deposited += m;

        let left = cfg.ambient_retention * (moisture - m);
        if left <= cfg.min_carried_moisture {
            return;
        }

        let n_edges = self.nodes[i].downwind.as_ref().map_or(0, Vec::len);
        for k in 0..n_edges {
            let Some(neighbor) = self.edge_neighbor(i, k) else {
                break;
            };
            let nh = self.nodes[neighbor].h.max(0.0);
            let factor = cfg.altitude_capacity.eval(nh - h);
            let blocked = (factor * left).max(0.0);
            let m_blocked = (factor * m).max(0.0);
            let passed = left - blocked;

            if let Some(edge) = self.nodes[i].downwind.as_mut().and_then(|e| e.get_mut(k)) {
                edge.moisture_blocked += blocked;
            }

            if nh > 0.0 {
                if source_is_water {
                    self.deposit_blocked(neighbor, m_blocked);
                } else {
                    self.deposit_blocked(i, m_blocked * 0.5);
                    self.deposit_blocked(neighbor, m_blocked * 0.5);
                }
            }

            if passed > 0.0 {
                if self.opened[neighbor] {
                    self.travel(neighbor, passed, hops + 1);
                } else {
                    self.nodes[neighbor].moisture_from_neighbors += passed;
                    self.stats.queued += passed;
                }
            }
        }
    }

    fn edge_neighbor(&self, i: usize, k: usize) -> Option<usize> {
        self.nodes[i].downwind.as_ref()?.get(k).map(|e| e.neighbor)
    }

    fn deposit_blocked(&mut self, i: usize, amount: f32) {
        let node = &mut self.nodes[i];
        node.moisture_drop += amount;
        node.orographic_drop += amount;
        self.stats.blocked += amount;
    }
}

/// Runs moisture advection over every node.
///
/// Downwind sets must already be populated; a node without one only
/// accumulates. Queued moisture is always drained by the end of the pass.
pub fn advect_moisture(nodes: &mut [Node], cfg: &ClimateConfig) -> AdvectionStats {
    let n = nodes.len();
    let mut pass = Advection {
        nodes,
        opened: vec![false; n],
        cfg,
        stats: AdvectionStats::default(),
    };

    for i in 0..n {
        pass.opened[i] = true;
        let queued = std::mem::take(&mut pass.nodes[i].moisture_from_neighbors);
        let evaporated = if pass.nodes[i].is_land() {
            0.0
        } else {
            cfg.evaporation.eval(pass.nodes[i].t).max(0.0)
        };
        pass.stats.evaporated += evaporated;

        let injected = evaporated + queued;
        if injected > 0.0 {
            pass.travel(i, injected, 0);
        }
    }

    if pass.stats.hop_capped > 0 {
        debug!(pushes = pass.stats.hop_capped, "moisture pushes stopped at the hop limit");
    }
    pass.stats
}

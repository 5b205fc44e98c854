//! Elevation change from drift stress along continent boundaries.

use glam::Vec2;

use crate::geometry::lon_lat_direction;
use crate::terrain::Node;

use super::Continent;

/// Stress along the edge `from -> to` between two drifting continents.
///
/// Positive when the continents converge along the edge.
pub fn edge_stress(from: Vec2, to: Vec2, drift_from: Vec2, drift_to: Vec2) -> f32 {
    let dir = lon_lat_direction(from, to);
    dir.dot(drift_from) - dir.dot(drift_to)
}

/// Raises or lowers both endpoints of every edge of every boundary triangle
/// by `force_factor * stress`. Returns the number of boundary triangles.
pub fn apply_boundary_stress(
    nodes: &mut [Node],
    triangles: &[[usize; 3]],
    continents: &[Continent],
    force_factor: f32,
) -> usize {
    let mut boundary = 0;
    for tri in triangles {
        let [Some(a), Some(b), Some(c)] = tri.map(|v| nodes[v].continent) else {
            continue;
        };
        if a == b && b == c {
            continue;
        }
        boundary += 1;

        let owners = [a, b, c];
        for (p, q) in [(0, 1), (1, 2), (0, 2)] {
            let (np, nq) = (tri[p], tri[q]);
            let drift_p = continents[owners[p]].drift;
            let drift_q = continents[owners[q]].drift;
            let dh = force_factor * edge_stress(nodes[np].point, nodes[nq].point, drift_p, drift_q);
            nodes[np].h += dh;
            nodes[nq].h += dh;
        }
    }
    boundary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn continent(id: usize, drift: Vec2) -> Continent {
        Continent {
            id,
            nodes: Vec::new(),
            drift,
            bias: 0.0,
            cursor: 0,
            expanding: false,
            small: false,
        }
    }

    #[test]
    fn equal_drift_has_no_stress() {
        let d = Vec2::new(1.0, -0.5);
        assert_eq!(edge_stress(Vec2::ZERO, Vec2::new(10.0, 0.0), d, d), 0.0);
    }

    #[test]
    fn converging_drift_is_positive() {
        let from = Vec2::ZERO;
        let to = Vec2::new(10.0, 0.0);
        let stress = edge_stress(from, to, Vec2::new(1.0, 0.0), Vec2::new(-1.0, 0.0));
        assert!((stress - 2.0).abs() < 1e-6);
        let stress = edge_stress(from, to, Vec2::new(-1.0, 0.0), Vec2::new(1.0, 0.0));
        assert!((stress + 2.0).abs() < 1e-6);
    }

    #[test]
    fn edge_direction_wraps_the_antimeridian() {
        // 175 -> -175 is a short hop east
        let stress = edge_stress(
            Vec2::new(175.0, 0.0),
            Vec2::new(-175.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::ZERO,
        );
        assert!((stress - 1.0).abs() < 1e-6);
    }

    #[test]
    fn interior_triangles_are_untouched() {
        let mut nodes: Vec<Node> = [Vec2::ZERO, Vec2::new(10.0, 0.0), Vec2::new(0.0, 10.0)]
            .iter()
            .enumerate()
            .map(|(i, &p)| Node { continent: Some(0), ..Node::new(i, p) })
            .collect();
        let continents = vec![continent(0, Vec2::new(2.0, 0.0))];
        let n = apply_boundary_stress(&mut nodes, &[[0, 1, 2]], &continents, 0.25);
        assert_eq!(n, 0);
        assert!(nodes.iter().all(|n| n.h == 0.0));
    }

    #[test]
    fn boundary_edge_moves_both_endpoints_equally() {
        let mut nodes: Vec<Node> = [Vec2::ZERO, Vec2::new(10.0, 0.0), Vec2::new(0.0, 10.0)]
            .iter()
            .enumerate()
            .map(|(i, &p)| Node::new(i, p))
            .collect();
        nodes[0].continent = Some(0);
        nodes[1].continent = Some(1);
        nodes[2].continent = Some(1);
        let continents = vec![
            continent(0, Vec2::new(1.0, 0.0)),
            continent(1, Vec2::new(-1.0, 0.0)),
        ];
        let n = apply_boundary_stress(&mut nodes, &[[0, 1, 2]], &continents, 0.5);
        assert_eq!(n, 1);

        // edge 0->1 converges (+1.0), 1->2 shares a continent (0), 0->2 is
        // perpendicular to both drifts (0)
        assert!((nodes[0].h - 1.0).abs() < 1e-5);
        assert!((nodes[1].h - 1.0).abs() < 1e-5);
        assert!(nodes[2].h.abs() < 1e-5);
    }
}

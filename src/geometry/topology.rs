//! Sphere triangulation and adjacency.
//!
//! The generator only needs the [`TopologyBuilder`] capability: turn a lon/lat
//! point set into triangles plus neighbor lists forming a closed 2-manifold.
//! [`ConvexHullTopology`] provides it by taking the 3-D convex hull of the unit
//! vectors, which is the spherical Delaunay triangulation of the points.

use std::collections::HashSet;

use glam::{DVec3, Vec2};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::coords::{angle_between, unit_vector};

/// Errors that can occur while triangulating a point set.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TopologyError {
    #[error("triangulation needs at least 4 points, got {0}")]
    TooFewPoints(usize),
    #[error("degenerate point set: {0}")]
    Degenerate(String),
}

/// Triangles and neighbor lists over a point set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topology {
    /// Sorted, de-duplicated neighbor indices per point.
    pub neighbors: Vec<Vec<usize>>,
    /// Triangles, counter-clockwise seen from outside the sphere.
    pub triangles: Vec<[usize; 3]>,
}

impl Topology {
    /// Builds neighbor lists from a triangle list over `n_points` points.
    pub fn from_triangles(n_points: usize, triangles: Vec<[usize; 3]>) -> Self {
        let mut neighbors: Vec<Vec<usize>> = vec![Vec::new(); n_points];
        for &[a, b, c] in &triangles {
            for (p, q) in [(a, b), (b, c), (c, a)] {
                neighbors[p].push(q);
                neighbors[q].push(p);
            }
        }
        for list in &mut neighbors {
            list.sort_unstable();
            list.dedup();
        }
        Self { neighbors, triangles }
    }

    pub fn num_points(&self) -> usize {
        self.neighbors.len()
    }

    pub fn num_triangles(&self) -> usize {
        self.triangles.len()
    }

    /// Number of undirected edges.
    pub fn num_edges(&self) -> usize {
        self.neighbors.iter().map(Vec::len).sum::<usize>() / 2
    }

    /// `V - E + F`; 2 for a closed sphere.
    pub fn euler_characteristic(&self) -> i64 {
        self.num_points() as i64 - self.num_edges() as i64 + self.num_triangles() as i64
    }

    pub fn are_neighbors(&self, a: usize, b: usize) -> bool {
        self.neighbors[a].binary_search(&b).is_ok()
    }

    /// Triangle indices incident to each point.
    pub fn incident_triangles(&self) -> Vec<Vec<usize>> {
        let mut incident = vec![Vec::new(); self.num_points()];
        for (t, tri) in self.triangles.iter().enumerate() {
            for &v in tri {
                incident[v].push(t);
            }
        }
        incident
    }

    /// Index of the point nearest to `target`, found by walking the adjacency
    /// graph downhill in distance from `start`.
    ///
    /// On a Delaunay graph the greedy walk always ends at the true nearest point.
    pub fn find_nearest(&self, points: &[Vec2], target: Vec2, start: usize) -> usize {
        let target = unit_vector(target);
        let mut current = start.min(points.len().saturating_sub(1));
        let mut current_d = angle_between(target, unit_vector(points[current]));

        loop {
            let mut best = current;
            for &n in &self.neighbors[current] {
                let d = angle_between(target, unit_vector(points[n]));
                if d < current_d {
                    current_d = d;
                    best = n;
                }
            }
            if best == current {
                return current;
            }
            current = best;
        }
    }
}

/// Capability the generator requires from a triangulation backend.
pub trait TopologyBuilder {
    /// Triangulates `points` (lon/lat degrees) into a closed sphere mesh.
    fn build(&self, points: &[Vec2]) -> Result<Topology, TopologyError>;
}

/// Spherical Delaunay triangulation via an incremental 3-D convex hull.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConvexHullTopology;

impl TopologyBuilder for ConvexHullTopology {
    fn build(&self, points: &[Vec2]) -> Result<Topology, TopologyError> {
        if points.len() < 4 {
            return Err(TopologyError::TooFewPoints(points.len()));
        }

        let units: Vec<DVec3> = points.iter().map(|&p| unit_vector(p)).collect();
        let triangles = convex_hull(&units)?;

        let topology = Topology::from_triangles(points.len(), triangles);
        if let Some(missing) = topology.neighbors.iter().position(Vec::is_empty) {
            return Err(TopologyError::Degenerate(format!(
                "point {missing} is not a hull vertex (duplicate or coplanar)"
            )));
        }

        debug!(
            points = topology.num_points(),
            triangles = topology.num_triangles(),
            "convex hull triangulation built"
        );
        Ok(topology)
    }
}

#[derive(Debug, Clone, Copy)]
struct HullFace {
    v: [usize; 3],
    normal: DVec3,
    offset: f64,
}

impl HullFace {
    fn new(v: [usize; 3], pts: &[DVec3]) -> Self {
        let [a, b, c] = v;
        let normal = (pts[b] - pts[a]).cross(pts[c] - pts[a]);
        Self {
            v,
            normal,
            offset: normal.dot(pts[a]),
        }
    }

    #[inline]
    fn signed_distance(&self, p: DVec3) -> f64 {
        self.normal.dot(p) - self.offset
    }

    fn edges(&self) -> [(usize, usize); 3] {
        let [a, b, c] = self.v;
        [(a, b), (b, c), (c, a)]
    }
}

const HULL_EPS: f64 = 1e-12;

fn convex_hull(pts: &[DVec3]) -> Result<Vec<[usize; 3]>, TopologyError> {
    let [i0, i1, i2, i3] = initial_tetrahedron(pts)?;
    let interior = (pts[i0] + pts[i1] + pts[i2] + pts[i3]) / 4.0;

    let mut faces: Vec<HullFace> = [
        [i0, i1, i2],
        [i0, i1, i3],
        [i0, i2, i3],
        [i1, i2, i3],
    ]
    .into_iter()
    .map(|v| {
        let face = HullFace::new(v, pts);
        if face.signed_distance(interior) > 0.0 {
            HullFace::new([v[0], v[2], v[1]], pts)
        } else {
            face
        }
    })
    .collect();

    for (i, &p) in pts.iter().enumerate() {
        if i == i0 || i == i1 || i == i2 || i == i3 {
            continue;
        }

        let visible: Vec<bool> = faces
            .iter()
            .map(|f| f.signed_distance(p) > HULL_EPS)
            .collect();
        if !visible.iter().any(|&v| v) {
            return Err(TopologyError::Degenerate(format!(
                "point {i} lies on or inside the hull"
            )));
        }

        let visible_edges: HashSet<(usize, usize)> = faces
            .iter()
            .zip(&visible)
            .filter(|(_, &v)| v)
            .flat_map(|(f, _)| f.edges())
            .collect();

        // Horizon edges keep their orientation from the visible face.
        let horizon: Vec<(usize, usize)> = faces
            .iter()
            .zip(&visible)
            .filter(|(_, &v)| v)
            .flat_map(|(f, _)| f.edges())
            .filter(|&(a, b)| !visible_edges.contains(&(b, a)))
            .collect();

        let mut kept: Vec<HullFace> = faces
            .iter()
            .zip(&visible)
            .filter(|(_, &v)| !v)
            .map(|(f, _)| *f)
            .collect();
        kept.extend(horizon.into_iter().map(|(a, b)| HullFace::new([a, b, i], pts)));
        faces = kept;
    }

    Ok(faces.into_iter().map(|f| f.v).collect())
}

/// Picks four points spanning a non-degenerate tetrahedron.
fn initial_tetrahedron(pts: &[DVec3]) -> Result<[usize; 4], TopologyError> {
    let i0 = 0;
    let i1 = farthest_by(pts, |p| (p - pts[i0]).length_squared());
    let line = pts[i1] - pts[i0];
    let i2 = farthest_by(pts, |p| line.cross(p - pts[i0]).length_squared());
    let normal = line.cross(pts[i2] - pts[i0]);
    let i3 = farthest_by(pts, |p| normal.dot(p - pts[i0]).abs());

    if normal.length_squared() <= HULL_EPS || normal.dot(pts[i3] - pts[i0]).abs() <= HULL_EPS {
        return Err(TopologyError::Degenerate(
            "all points are coplanar".to_string(),
        ));
    }
    Ok([i0, i1, i2, i3])
}

fn farthest_by(pts: &[DVec3], metric: impl Fn(DVec3) -> f64) -> usize {
    let mut best = 0;
    let mut best_v = f64::NEG_INFINITY;
    for (i, &p) in pts.iter().enumerate() {
        let v = metric(p);
        if v > best_v {
            best_v = v;
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::sample_sphere_points;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashMap;

    fn octahedron() -> Vec<Vec2> {
        vec![
            Vec2::new(0.0, 90.0),
            Vec2::new(0.0, -90.0),
            Vec2::new(0.0, 0.0),
            Vec2::new(90.0, 0.0),
            Vec2::new(180.0, 0.0),
            Vec2::new(-90.0, 0.0),
        ]
    }

    fn sampled(n: usize, seed: u64) -> Vec<Vec2> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        sample_sphere_points(n, 10, &mut rng)
    }

    #[test]
    fn rejects_fewer_than_four_points() {
        let pts = vec![Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), Vec2::new(0.0, 10.0)];
        assert_eq!(
            ConvexHullTopology.build(&pts),
            Err(TopologyError::TooFewPoints(3))
        );
    }

    #[test]
    fn octahedron_has_eight_faces() {
        let topo = ConvexHullTopology.build(&octahedron()).unwrap();
        assert_eq!(topo.num_triangles(), 8);
        assert_eq!(topo.num_edges(), 12);
        assert_eq!(topo.euler_characteristic(), 2);
        assert!(topo.neighbors.iter().all(|n| n.len() == 4));
        assert!(!topo.are_neighbors(0, 1));
    }

    #[test]
    fn sampled_sphere_is_closed_manifold() {
        let pts = sampled(300, 5);
        let topo = ConvexHullTopology.build(&pts).unwrap();

        assert_eq!(topo.euler_characteristic(), 2);
        assert_eq!(topo.num_triangles(), 2 * pts.len() - 4);

        let mut directed: HashMap<(usize, usize), usize> = HashMap::new();
        for &[a, b, c] in &topo.triangles {
            assert!(a != b && b != c && a != c);
            for e in [(a, b), (b, c), (c, a)] {
                *directed.entry(e).or_default() += 1;
            }
        }
        // Consistent winding: every directed edge once, and its twin exists.
        for (&(a, b), &count) in &directed {
            assert_eq!(count, 1);
            assert_eq!(directed.get(&(b, a)), Some(&1));
        }
    }

    #[test]
    fn triangles_face_outward() {
        let pts = sampled(100, 8);
        let topo = ConvexHullTopology.build(&pts).unwrap();
        for &[a, b, c] in &topo.triangles {
            let (pa, pb, pc) = (unit_vector(pts[a]), unit_vector(pts[b]), unit_vector(pts[c]));
            let normal = (pb - pa).cross(pc - pa);
            assert!(normal.dot(pa + pb + pc) > 0.0);
        }
    }

    #[test]
    fn greedy_walk_finds_true_nearest() {
        let pts = sampled(200, 21);
        let topo = ConvexHullTopology.build(&pts).unwrap();
        let targets = [
            Vec2::new(12.0, 34.0),
            Vec2::new(-170.0, -5.0),
            Vec2::new(179.5, 80.0),
            Vec2::new(-60.0, -75.0),
        ];
        for target in targets {
            let found = topo.find_nearest(&pts, target, 0);
            let t = unit_vector(target);
            let brute = (0..pts.len())
                .min_by(|&i, &j| {
                    angle_between(t, unit_vector(pts[i]))
                        .total_cmp(&angle_between(t, unit_vector(pts[j])))
                })
                .unwrap();
            assert_eq!(found, brute, "target {target:?}");
        }
    }

    #[test]
    fn incident_triangles_cover_each_point() {
        let topo = ConvexHullTopology.build(&octahedron()).unwrap();
        let incident = topo.incident_triangles();
        assert!(incident.iter().all(|t| t.len() == 4));
    }
}

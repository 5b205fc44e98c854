//! Point location on a radially displaced sphere mesh.

use glam::Vec3;

/// Triangle hit by a ray from the planet center, with barycentric weights.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    /// Index into the triangle list.
    pub triangle: usize,
    /// Weights of the triangle's three vertices; they sum to 1.
    pub weights: Vec3,
    /// Nearest node, usable as the start hint for the next query.
    pub nearest: usize,
}

impl Location {
    /// Blends three per-vertex values with the barycentric weights.
    pub fn blend(&self, values: [f32; 3]) -> f32 {
        self.weights.x * values[0] + self.weights.y * values[1] + self.weights.z * values[2]
    }
}

const BARY_EPS: f32 = 1e-5;

/// Barycentric weights where the ray from the origin along `dir` crosses
/// triangle `(a, b, c)`, or `None` if it misses.
///
/// Scaling a vertex along its own radius does not change the cone the triangle
/// spans, so this works the same on the elevated land mesh and the ocean shell.
pub fn ray_triangle_weights(dir: Vec3, a: Vec3, b: Vec3, c: Vec3) -> Option<Vec3> {
    let e1 = b - a;
    let e2 = c - a;
    let p = dir.cross(e2);
    let det = e1.dot(p);
    if det.abs() <= f32::EPSILON * e1.length() * e2.length() * dir.length() {
        return None;
    }
    let inv = 1.0 / det;
    let s = -a;
    let u = s.dot(p) * inv;
    if u < -BARY_EPS || u > 1.0 + BARY_EPS {
        return None;
    }
    let q = s.cross(e1);
    let v = dir.dot(q) * inv;
    if v < -BARY_EPS || u + v > 1.0 + BARY_EPS {
        return None;
    }
    let t = e2.dot(q) * inv;
    if t <= 0.0 {
        return None;
    }
    Some(Vec3::new(1.0 - u - v, u, v))
}

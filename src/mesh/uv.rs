//! Equirectangular texture coordinates.

use glam::Vec2;

/// `((lon + 180) / 360, (lat + 90) / 180)`.
pub fn node_uv(point: Vec2) -> Vec2 {
    Vec2::new((point.x + 180.0) / 360.0, (point.y + 90.0) / 180.0)
}

/// Per-vertex UVs of a triangle with the antimeridian seam closed.
///
/// A U more than half a turn below the triangle's largest U belongs to the far
/// side of the seam and is moved up by one.
pub fn triangle_uvs(points: [Vec2; 3]) -> [Vec2; 3] {
    let mut uvs = points.map(node_uv);
    let max_u = uvs.iter().map(|uv| uv.x).fold(f32::MIN, f32::max);
    for uv in &mut uvs {
        if max_u - uv.x > 0.5 {
            uv.x += 1.0;
        }
    }
    uvs
}

/// Largest pairwise U difference within a triangle.
pub fn u_spread(uvs: &[Vec2; 3]) -> f32 {
    let (lo, hi) = uvs
        .iter()
        .fold((f32::MAX, f32::MIN), |(lo, hi), uv| (lo.min(uv.x), hi.max(uv.x)));
    hi - lo
}

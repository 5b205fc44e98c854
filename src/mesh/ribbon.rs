//! River ribbon geometry.

use glam::{Vec2, Vec3};

use crate::geometry::spherical_to_cartesian;

/// Height of a ribbon's start point above the source surface.
pub const RIVER_LIFT: f32 = 0.1;

/// Half-width of a ribbon at its mouth.
pub fn river_width(source_flow_in: f32, mouth_moisture_drop: f32, threshold: f32, max_moisture_drop: f32) -> f32 {
    (source_flow_in + mouth_moisture_drop) / (threshold + max_moisture_drop) + 1.0
}

/// Thin triangle from just above the source to both sides of the mouth.
///
/// The mouth is widened along the normal of the plane through the center,
/// the source and the mouth.
pub fn river_ribbon(
    radius: f32,
    source_point: Vec2,
    source_h: f32,
    source_coords: Vec3,
    mouth_coords: Vec3,
    width: f32,
) -> [Vec3; 3] {
    let side = source_coords.cross(mouth_coords).normalize_or_zero() * width;
    [
        spherical_to_cartesian(radius + source_h + RIVER_LIFT, source_point),
        mouth_coords - side,
        mouth_coords + side,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_grows_with_flow() {
        assert_eq!(river_width(0.0, 0.0, 3.0, 1.0), 1.0);
        assert!((river_width(4.0, 0.0, 3.0, 1.0) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn ribbon_spans_the_mouth() {
        let src_point = Vec2::new(0.0, 0.0);
        let dst_point = Vec2::new(5.0, 0.0);
        let src = spherical_to_cartesian(100.5, src_point);
        let dst = spherical_to_cartesian(99.5, dst_point);
        let [v0, left, right] = river_ribbon(100.0, src_point, 0.5, src, dst, 1.5);

        assert!((v0.length() - 100.6).abs() < 1e-3);
        assert!(((left + right) * 0.5 - dst).length() < 1e-4);
        assert!(((right - left).length() - 3.0).abs() < 1e-4);
        // the mouth edge is perpendicular to the river's plane
        assert!((right - left).dot(dst - src).abs() < 1e-2);
    }
}

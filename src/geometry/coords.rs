//! Geographic coordinate helpers.
//!
//! Points on the planet are stored as `Vec2` with `x = longitude` and
//! `y = latitude`, both in degrees.

use glam::{DVec3, Vec2, Vec3};

/// Wraps a longitude difference into `[-180, 180]`.
#[inline]
pub fn wrap_lon_delta(mut d: f32) -> f32 {
    while d > 180.0 {
        d -= 360.0;
    }
    while d < -180.0 {
        d += 360.0;
    }
    d
}

/// Unit direction from `from` to `to` in (lon, lat) space, taking the short way
/// across the antimeridian. Returns zero for coincident points.
pub fn lon_lat_direction(from: Vec2, to: Vec2) -> Vec2 {
    Vec2::new(wrap_lon_delta(to.x - from.x), to.y - from.y).normalize_or_zero()
}

/// Geographic unit vector (`z` toward the north pole), in double precision.
///
/// Used for distances and triangulation, where f32 loses too much on nearby points.
pub fn unit_vector(p: Vec2) -> DVec3 {
    let lon = (p.x as f64).to_radians();
    let lat = (p.y as f64).to_radians();
    let (slat, clat) = lat.sin_cos();
    let (slon, clon) = lon.sin_cos();
    DVec3::new(clat * clon, clat * slon, slat)
}

/// Angle in radians between two unit vectors.
#[inline]
pub fn angle_between(a: DVec3, b: DVec3) -> f64 {
    a.cross(b).length().atan2(a.dot(b))
}

/// Great-circle distance (radians on the unit sphere) between two lon/lat points.
pub fn great_circle_distance(a: Vec2, b: Vec2) -> f64 {
    angle_between(unit_vector(a), unit_vector(b))
}

/// Renderer-space position of a lon/lat point at the given radius.
///
/// Polar angle is `lat + 90` degrees measured from `+Y` and azimuth is the
/// longitude, i.e. `x = r sin(phi) sin(theta)`, `y = r cos(phi)`,
/// `z = r sin(phi) cos(theta)`. Consumers of the model use the same convention.
pub fn spherical_to_cartesian(radius: f32, p: Vec2) -> Vec3 {
    let phi = (p.y + 90.0).to_radians();
    let theta = p.x.to_radians();
    let (sphi, cphi) = phi.sin_cos();
    let (stheta, ctheta) = theta.sin_cos();
    Vec3::new(radius * sphi * stheta, radius * cphi, radius * sphi * ctheta)
}

/// Inverse of [`spherical_to_cartesian`]; the radius is discarded.
pub fn cartesian_to_lon_lat(v: Vec3) -> Vec2 {
    let r = v.length();
    if r <= f32::EPSILON {
        return Vec2::ZERO;
    }
    let phi = (v.y / r).clamp(-1.0, 1.0).acos();
    let theta = v.x.atan2(v.z);
    Vec2::new(theta.to_degrees(), phi.to_degrees() - 90.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_takes_short_way() {
        assert_eq!(wrap_lon_delta(350.0), -10.0);
        assert_eq!(wrap_lon_delta(-350.0), 10.0);
        assert_eq!(wrap_lon_delta(90.0), 90.0);
    }

    #[test]
    fn direction_across_antimeridian_points_east() {
        let d = lon_lat_direction(Vec2::new(179.0, 0.0), Vec2::new(-179.0, 0.0));
        assert!((d - Vec2::X).length() < 1e-6);
    }

    #[test]
    fn quarter_turn_distance() {
        let d = great_circle_distance(Vec2::new(0.0, 0.0), Vec2::new(90.0, 0.0));
        assert!((d - std::f64::consts::FRAC_PI_2).abs() < 1e-9);
        let d = great_circle_distance(Vec2::new(0.0, 90.0), Vec2::new(0.0, -90.0));
        assert!((d - std::f64::consts::PI).abs() < 1e-9);
    }

    #[test]
    fn spherical_round_trip() {
        for p in [
            Vec2::new(0.0, 0.0),
            Vec2::new(45.0, 30.0),
            Vec2::new(-120.0, -60.0),
            Vec2::new(170.0, 10.0),
        ] {
            let v = spherical_to_cartesian(100.0, p);
            assert!((v.length() - 100.0).abs() < 1e-3);
            let back = cartesian_to_lon_lat(v);
            assert!((back - p).length() < 1e-3, "{p:?} -> {back:?}");
        }
    }

    #[test]
    fn renderer_convention_puts_southern_pole_on_positive_y() {
        let v = spherical_to_cartesian(1.0, Vec2::new(0.0, -90.0));
        assert!((v - Vec3::Y).length() < 1e-6);
    }
}

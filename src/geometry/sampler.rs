//! Best-candidate point sampling on the sphere.

use glam::{DVec3, Vec2};
use rand::Rng;
use tracing::debug;

use super::coords::{angle_between, unit_vector};

/// Fixed points seeded before sampling: a point on the antimeridian and both poles.
///
/// They pin the triangulation so the seam and poles are always vertices.
pub const ANCHOR_POINTS: [Vec2; 3] = [
    Vec2::new(-180.0, 0.0),
    Vec2::new(0.0, 90.0),
    Vec2::new(0.0, -90.0),
];

/// Returns the anchors followed by up to `n_points` best-candidate samples.
///
/// Each sample draws `n_samples` uniform (lon, lat) candidates and keeps the one
/// whose great-circle distance to the nearest accepted point is largest. A round
/// where no candidate is separated from the existing set is skipped, so the
/// result can hold fewer than `n_points + 3` points.
pub fn sample_sphere_points<R: Rng + ?Sized>(
    n_points: usize,
    n_samples: usize,
    rng: &mut R,
) -> Vec<Vec2> {
    let mut points: Vec<Vec2> = ANCHOR_POINTS.to_vec();
    let mut units: Vec<DVec3> = points.iter().map(|&p| unit_vector(p)).collect();
    points.reserve(n_points);
    units.reserve(n_points);

    let mut starved = 0usize;
    for _ in 0..n_points {
        let mut chosen: Option<(Vec2, DVec3)> = None;
        let mut best_distance = 0.0f64;

        for _ in 0..n_samples {
            let candidate = Vec2::new(
                (2.0 * rng.random::<f32>() - 1.0) * 180.0,
                (2.0 * rng.random::<f32>() - 1.0) * 90.0,
            );
            let unit = unit_vector(candidate);
            let nearest = units
                .iter()
                .map(|&u| angle_between(unit, u))
                .fold(f64::INFINITY, f64::min);

            if nearest > best_distance {
                best_distance = nearest;
                chosen = Some((candidate, unit));
            }
        }

        match chosen {
            Some((p, u)) => {
                points.push(p);
                units.push(u);
            }
            None => starved += 1,
        }
    }

    if starved > 0 {
        debug!(starved, "point sampler skipped rounds without a separated candidate");
    }

    points
}

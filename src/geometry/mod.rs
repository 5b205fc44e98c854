//! Sphere geometry: coordinates, point sampling, triangulation and point location.

pub mod coords;
mod sampler;
mod topology;
mod locate;

pub use coords::{
    great_circle_distance, lon_lat_direction, spherical_to_cartesian, cartesian_to_lon_lat,
    unit_vector, wrap_lon_delta,
};
pub use sampler::{sample_sphere_points, ANCHOR_POINTS};
pub use topology::{ConvexHullTopology, Topology, TopologyBuilder, TopologyError};
pub use locate::{ray_triangle_weights, Location};

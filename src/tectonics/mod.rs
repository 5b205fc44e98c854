//! Continent partitioning and boundary drift stress.
//!
//! Continents are grown breadth-first from random seeds over the adjacency
//! graph, so their shapes follow discovery order rather than distance. Each
//! carries a drift vector; triangles spanning two or more continents are
//! raised or lowered by how strongly the drifts converge along their edges.

mod config;
mod continent;
mod drift;

pub use config::ContinentConfig;
pub use continent::{partition_continents, Continent};
pub use drift::{apply_boundary_stress, edge_stress};

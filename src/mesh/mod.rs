//! Final planet model: 3-D vertices, colored triangles, rivers and biome usage.

mod ribbon;
mod uv;

pub use ribbon::{river_ribbon, river_width, RIVER_LIFT};
pub use uv::{node_uv, triangle_uvs, u_spread};

use glam::{Vec2, Vec3};
use tracing::info;

use crate::biomes::{assign_biomes, jittered_color, BiomeHistogram};
use crate::erosion::RiverPath;
use crate::geometry::{cartesian_to_lon_lat, ray_triangle_weights, spherical_to_cartesian, Location, Topology};
use crate::tectonics::Continent;
use crate::terrain::{Node, PlanetState};

/// A surface triangle with per-vertex colors and texture coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshTriangle {
    /// Node indices, counter-clockwise seen from outside in renderer space.
    pub indexes: [usize; 3],
    pub vertex_colors: [Vec3; 3],
    pub uvs: [Vec2; 3],
}

/// The generated planet.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanetModel {
    pub radius: f32,
    pub seed: u64,
    pub nodes: Vec<Node>,
    /// Lon/lat of each node.
    pub points: Vec<Vec2>,
    /// Node positions at `radius + h`.
    pub coords: Vec<Vec3>,
    /// Node positions on the sea-level shell.
    pub ocean_coords: Vec<Vec3>,
    /// Shared by the land mesh and the ocean shell.
    pub triangles: Vec<MeshTriangle>,
    pub rivers: Vec<RiverPath>,
    pub continents: Vec<Continent>,
    pub biomes: BiomeHistogram,
    pub topology: Topology,
}

/// Turns a fully simulated state into the output model.
///
/// Classifies biomes, places vertices, colors every triangle corner with the
/// run's RNG, and builds ribbons for rivers that reach the sea.
pub fn assemble(state: PlanetState) -> PlanetModel {
    let PlanetState { config, seed, mut nodes, topology, continents, mut rivers, mut rng } = state;
    let radius = config.radius;

    assign_biomes(&mut nodes, &config.biomes);

    let points: Vec<Vec2> = nodes.iter().map(|n| n.point).collect();
    let coords: Vec<Vec3> = nodes
        .iter()
        .map(|n| spherical_to_cartesian(radius + n.h, n.point))
        .collect();
    let ocean_coords: Vec<Vec3> = points.iter().map(|&p| spherical_to_cartesian(radius, p)).collect();

    // Lon/lat to renderer space is a reflection, so hull winding flips.
    let triangles: Vec<MeshTriangle> = topology
        .triangles
        .iter()
        .map(|&[a, b, c]| {
            let indexes = [a, c, b];
            let vertex_colors = indexes.map(|i| {
                let base = nodes[i].biome.map_or(Vec3::ONE, |b| b.base_color());
                jittered_color(base, &config.biomes, &mut rng)
            });
            let uvs = triangle_uvs(indexes.map(|i| points[i]));
            MeshTriangle { indexes, vertex_colors, uvs }
        })
        .collect();

    let biomes = BiomeHistogram::from_nodes(&nodes);

    let threshold = config.erosion.river_flow_threshold;
    let max_drop = nodes.iter().map(|n| n.moisture_drop).fold(0.0, f32::max);
    for river in &mut rivers {
        let Some(mouth) = river.mouth else {
            continue;
        };
        let source = &nodes[river.source];
        let width = river_width(source.water_flow_in, nodes[mouth].moisture_drop, threshold, max_drop);
        river.ribbon = Some(river_ribbon(
            radius,
            source.point,
            source.h,
            coords[river.source],
            coords[mouth],
            width,
        ));
    }

    info!(
        triangles = triangles.len(),
        rivers = rivers.len(),
        land_nodes = biomes.total(),
        "assembled planet model"
    );

    PlanetModel {
        radius,
        seed,
        nodes,
        points,
        coords,
        ocean_coords,
        triangles,
        rivers,
        continents,
        biomes,
        topology,
    }
}

impl PlanetModel {
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Triangle the ray from the center through `point` passes through.
    pub fn locate(&self, point: Vec3) -> Option<Location> {
        self.locate_from(point, 0)
    }

    /// Like [`locate`](Self::locate), starting the nearest-node walk at `hint`.
    ///
    /// Tests the nearest node's triangles first, then its neighbors', then
    /// every triangle.
    pub fn locate_from(&self, point: Vec3, hint: usize) -> Option<Location> {
        if self.nodes.is_empty() || point.length_squared() <= f32::EPSILON {
            return None;
        }
        let nearest = self.topology.find_nearest(&self.points, cartesian_to_lon_lat(point), hint);
        let hit = |t: usize| {
            let [a, b, c] = self.triangles[t].indexes;
            ray_triangle_weights(point, self.coords[a], self.coords[b], self.coords[c])
                .map(|weights| Location { triangle: t, weights, nearest })
        };

        self.nodes[nearest]
            .triangles
            .iter()
            .chain(
                self.topology.neighbors[nearest]
                    .iter()
                    .flat_map(|&n| self.nodes[n].triangles.iter()),
            )
            .find_map(|&t| hit(t))
            .or_else(|| (0..self.triangles.len()).find_map(hit))
    }

    /// Interpolated elevation at a lon/lat point.
    pub fn elevation_at(&self, lon_lat: Vec2) -> Option<f32> {
        let loc = self.locate(spherical_to_cartesian(1.0, lon_lat))?;
        let [a, b, c] = self.triangles[loc.triangle].indexes;
        Some(loc.blend([self.nodes[a].h, self.nodes[b].h, self.nodes[c].h]))
    }

    /// Interpolated vertex color at a located point.
    pub fn color_at(&self, loc: &Location) -> Vec3 {
        let colors = self.triangles[loc.triangle].vertex_colors;
        colors[0] * loc.weights.x + colors[1] * loc.weights.y + colors[2] * loc.weights.z
    }

    /// Interpolated elevation at a located point.
    pub fn elevation_of(&self, loc: &Location) -> f32 {
        let [a, b, c] = self.triangles[loc.triangle].indexes;
        loc.blend([self.nodes[a].h, self.nodes[b].h, self.nodes[c].h])
    }
}

//! JSON payload export of the planet model.
//!
//! The payload keeps the field names renderers of this format expect
//! (`planetR`, `planetNodes`, `planetLandUVs`, ...).

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::mesh::PlanetModel;

/// Errors that can occur during JSON export.
#[derive(Error, Debug)]
pub enum JsonExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct XyzPayload {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl From<Vec3> for XyzPayload {
    fn from(v: Vec3) -> Self {
        Self { x: v.x, y: v.y, z: v.z }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct XyPayload {
    pub x: f32,
    pub y: f32,
}

impl From<Vec2> for XyPayload {
    fn from(v: Vec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

/// Color with channels in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorPayload {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl From<Vec3> for ColorPayload {
    fn from(c: Vec3) -> Self {
        Self { r: c.x, g: c.y, b: c.z }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodePayload {
    pub i: usize,
    /// -1 if unclaimed.
    pub continent: i64,
    pub h: f32,
    pub t: f32,
    /// `[lon, lat]` in degrees.
    pub point: [f32; 2],
    pub moisture_drop: f32,
    pub moisture: f32,
    pub water_flow_in: f32,
    pub triangles: Vec<usize>,
    pub coords: XyzPayload,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub biome: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OceanNodePayload {
    pub coords: XyzPayload,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrianglePayload {
    pub indexes: [usize; 3],
    pub vertex_colors: [ColorPayload; 3],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OceanTrianglePayload {
    pub indexes: [usize; 3],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContinentPayload {
    pub nodes: Vec<usize>,
    /// Elevation bias.
    pub h: f32,
    pub dir: XyPayload,
    /// Drift magnitude.
    pub len: f32,
    pub size: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiverPayload {
    pub nodes: Vec<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coords: Option<[XyzPayload; 3]>,
}

/// The whole model in wire form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanetPayload {
    pub planet_r: f32,
    pub seed: u64,
    pub planet_nodes: Vec<NodePayload>,
    pub ocean_nodes: Vec<OceanNodePayload>,
    pub planet_triangles: Vec<TrianglePayload>,
    pub ocean_triangles: Vec<OceanTrianglePayload>,
    pub continents: Vec<ContinentPayload>,
    pub river_nodes: Vec<RiverPayload>,
    #[serde(rename = "planetLandUVs")]
    pub planet_land_uvs: Vec<[XyPayload; 3]>,
    /// Rounded percent of land per biome name.
    pub biomes_used: BTreeMap<String, f32>,
}

/// Converts a model to its payload.
pub fn to_payload(model: &PlanetModel) -> PlanetPayload {
    let planet_nodes = model
        .nodes
        .iter()
        .zip(&model.coords)
        .map(|(n, &coords)| NodePayload {
            i: n.index,
            continent: n.continent.map_or(-1, |c| c as i64),
            h: n.h,
            t: n.t,
            point: [n.lon(), n.lat()],
            moisture_drop: n.moisture_drop,
            moisture: n.moisture,
            water_flow_in: n.water_flow_in,
            triangles: n.triangles.clone(),
            coords: coords.into(),
            biome: n.biome.map(|b| b.name().to_string()),
        })
        .collect();

    let continents = model
        .continents
        .iter()
        .map(|c| ContinentPayload {
            nodes: c.nodes.clone(),
            h: c.bias,
            dir: c.drift.into(),
            len: c.speed(),
            size: c.size(),
        })
        .collect();

    let river_nodes = model
        .rivers
        .iter()
        .map(|r| RiverPayload {
            nodes: r.nodes(),
            coords: r.ribbon.map(|ribbon| ribbon.map(XyzPayload::from)),
        })
        .collect();

    PlanetPayload {
        planet_r: model.radius,
        seed: model.seed,
        planet_nodes,
        ocean_nodes: model
            .ocean_coords
            .iter()
            .map(|&c| OceanNodePayload { coords: c.into() })
            .collect(),
        planet_triangles: model
            .triangles
            .iter()
            .map(|t| TrianglePayload {
                indexes: t.indexes,
                vertex_colors: t.vertex_colors.map(ColorPayload::from),
            })
            .collect(),
        ocean_triangles: model
            .triangles
            .iter()
            .map(|t| OceanTrianglePayload { indexes: t.indexes })
            .collect(),
        continents,
        river_nodes,
        planet_land_uvs: model.triangles.iter().map(|t| t.uvs.map(XyPayload::from)).collect(),
        biomes_used: model
            .biomes
            .percentages()
            .into_iter()
            .map(|(b, pct)| (b.name().to_string(), pct))
            .collect(),
    }
}

/// Serializes the model payload to a JSON string.
pub fn to_json_string(model: &PlanetModel, pretty: bool) -> Result<String, JsonExportError> {
    let payload = to_payload(model);
    Ok(if pretty {
        serde_json::to_string_pretty(&payload)?
    } else {
        serde_json::to_string(&payload)?
    })
}

/// Writes the model payload as JSON.
///
/// Output is written to `{output_dir}/{base_name}.json`.
pub fn export_planet_json(
    model: &PlanetModel,
    output_dir: &Path,
    base_name: &str,
) -> Result<PathBuf, JsonExportError> {
    std::fs::create_dir_all(output_dir)?;
    let path = output_dir.join(format!("{}.json", base_name));
    let writer = BufWriter::new(File::create(&path)?);
    serde_json::to_writer(writer, &to_payload(model))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::generate;
    use crate::terrain::{PlanetConfig, PlanetSeed};

    fn model() -> PlanetModel {
        let config = PlanetConfig { n_points: 80, ..PlanetConfig::default() };
        generate(&PlanetSeed::from("json"), &config).unwrap()
    }

    #[test]
    fn payload_uses_wire_field_names() {
        let json = to_json_string(&model(), false).unwrap();
        for key in [
            "\"planetR\"",
            "\"planetNodes\"",
            "\"oceanNodes\"",
            "\"planetTriangles\"",
            "\"oceanTriangles\"",
            "\"continents\"",
            "\"riverNodes\"",
            "\"planetLandUVs\"",
            "\"moistureDrop\"",
            "\"waterFlowIn\"",
            "\"vertexColors\"",
            "\"biomesUsed\"",
        ] {
            assert!(json.contains(key), "missing {key}");
        }
    }

    #[test]
    fn payload_matches_model() {
        let model = model();
        let payload = to_payload(&model);
        assert_eq!(payload.planet_nodes.len(), model.num_nodes());
        assert_eq!(payload.ocean_nodes.len(), model.num_nodes());
        assert_eq!(payload.planet_triangles.len(), payload.ocean_triangles.len());
        assert_eq!(payload.planet_land_uvs.len(), model.triangles.len());
        assert_eq!(payload.biomes_used.len(), 13);
        assert!(payload.planet_nodes.iter().all(|n| n.continent >= 0));
        let total: usize = payload.continents.iter().map(|c| c.size).sum();
        assert_eq!(total, model.num_nodes());
    }

    #[test]
    fn export_writes_parseable_file() {
        let model = model();
        let dir = tempfile::tempdir().unwrap();
        let path = export_planet_json(&model, dir.path(), "planet").unwrap();
        assert_eq!(path, dir.path().join("planet.json"));

        let text = std::fs::read_to_string(&path).unwrap();
        let parsed: PlanetPayload = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.planet_r, 100.0);
        assert_eq!(parsed.planet_nodes.len(), model.num_nodes());
    }
}

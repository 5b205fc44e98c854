//! Export module for saving generated planets.
//!
//! Supports the JSON payload consumed by renderers and an equirectangular
//! PNG preview for quick viewing.

mod json;
mod preview;

pub use json::{
    export_planet_json, to_json_string, to_payload,
    PlanetPayload, NodePayload, OceanNodePayload, TrianglePayload, OceanTrianglePayload,
    ContinentPayload, RiverPayload, XyzPayload, XyPayload, ColorPayload,
    JsonExportError,
};
pub use preview::{export_equirect_biome_png, render_equirect, PreviewOptions, PreviewExportError};

//! Equirectangular (lat/lon) PNG preview rendered from the planet mesh.
//!
//! Every pixel is located on the mesh; land pixels blend the triangle's vertex
//! colors and sea pixels are shaded by depth.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use glam::{Vec2, Vec3};
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ImageBuffer, ImageEncoder, Rgb, RgbImage};
use rayon::prelude::*;
use thiserror::Error;

use crate::geometry::spherical_to_cartesian;
use crate::mesh::PlanetModel;

/// Errors that can occur during preview export.
#[derive(Error, Debug)]
pub enum PreviewExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Invalid output dimensions: {0}x{1}")]
    InvalidDimensions(u32, u32),
}

/// Options for the preview export.
#[derive(Debug, Clone)]
pub struct PreviewOptions {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels. If None, defaults to `width / 2`.
    pub height: Option<u32>,
    pub shallow_color: [u8; 3],
    pub deep_color: [u8; 3],
    /// PNG compression type.
    pub compression: CompressionType,
    /// PNG filter type.
    pub filter: FilterType,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            width: 512,
            height: None,
            shallow_color: [70, 130, 180],
            deep_color: [15, 35, 85],
            compression: CompressionType::Default,
            filter: FilterType::Adaptive,
        }
    }
}

impl PreviewOptions {
    fn dims(&self) -> Result<(u32, u32), PreviewExportError> {
        let w = self.width;
        let h = self.height.unwrap_or(w / 2);
        if w < 2 || h < 2 {
            return Err(PreviewExportError::InvalidDimensions(w, h));
        }
        Ok((w, h))
    }
}

fn to_rgb(c: Vec3) -> [u8; 3] {
    let c = (c.clamp(Vec3::ZERO, Vec3::ONE) * 255.0).round();
    [c.x as u8, c.y as u8, c.z as u8]
}

/// Renders the preview into memory, one row per rayon task.
pub fn render_equirect(model: &PlanetModel, options: &PreviewOptions) -> Result<RgbImage, PreviewExportError> {
    let (width, height) = options.dims()?;
    let max_depth = model
        .nodes
        .iter()
        .map(|n| -n.h)
        .fold(f32::EPSILON, f32::max);
    let shallow = Vec3::from_array(options.shallow_color.map(f32::from)) / 255.0;
    let deep = Vec3::from_array(options.deep_color.map(f32::from)) / 255.0;

    let rows: Vec<Vec<[u8; 3]>> = (0..height)
        .into_par_iter()
        .map(|y| {
            // top row is the north pole, pixel centers sampled
            let lat = 90.0 - (y as f32 + 0.5) / height as f32 * 180.0;
            let mut hint = 0;
            (0..width)
                .map(|x| {
                    let lon = -180.0 + (x as f32 + 0.5) / width as f32 * 360.0;
                    let dir = spherical_to_cartesian(1.0, Vec2::new(lon, lat));
                    let Some(loc) = model.locate_from(dir, hint) else {
                        return [0, 0, 0];
                    };
                    hint = loc.nearest;
                    let h = model.elevation_of(&loc);
                    if h > 0.0 {
                        to_rgb(model.color_at(&loc))
                    } else {
                        to_rgb(shallow.lerp(deep, (-h / max_depth).clamp(0.0, 1.0)))
                    }
                })
                .collect()
        })
        .collect();

    let mut img: RgbImage = ImageBuffer::new(width, height);
    for (y, row) in rows.iter().enumerate() {
        for (x, &c) in row.iter().enumerate() {
            img.put_pixel(x as u32, y as u32, Rgb(c));
        }
    }
    Ok(img)
}

/// Export an equirectangular RGB biome preview PNG.
///
/// Output is written to `{output_dir}/{base_name}_equirect_biomes.png`.
pub fn export_equirect_biome_png(
    model: &PlanetModel,
    output_dir: &Path,
    base_name: &str,
    options: &PreviewOptions,
) -> Result<PathBuf, PreviewExportError> {
    let img = render_equirect(model, options)?;

    std::fs::create_dir_all(output_dir)?;
    let path = output_dir.join(format!("{}_equirect_biomes.png", base_name));
    let writer = BufWriter::new(File::create(&path)?);
    let encoder = PngEncoder::new_with_quality(writer, options.compression, options.filter);
    encoder.write_image(
        img.as_raw(),
        img.width(),
        img.height(),
        image::ExtendedColorType::Rgb8,
    )?;

    Ok(path)
}

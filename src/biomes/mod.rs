//! Biome classification, vertex colors and usage statistics.
//!
//! A node's biome comes from a 4x6 table indexed by its temperature band and
//! its moisture-drop band. Colors are a fixed base per biome, lightly grayed
//! per vertex so neighboring triangles do not look flat.

mod config;

pub use config::BiomeConfig;

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::terrain::Node;

/// One of the 13 surface biomes. `as_u8()` is stable and used for storage/export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Biome {
    Scorched,
    Bare,
    Tundra,
    Snow,
    TemperateDesert,
    ShrubLand,
    Taiga,
    Grassland,
    DeciduousForest,
    RainForest,
    TropicalDesert,
    SeasonalForest,
    TropicalRainForest,
}

impl Biome {
    pub const ALL: [Biome; 13] = [
        Biome::Scorched,
        Biome::Bare,
        Biome::Tundra,
        Biome::Snow,
        Biome::TemperateDesert,
        Biome::ShrubLand,
        Biome::Taiga,
        Biome::Grassland,
        Biome::DeciduousForest,
        Biome::RainForest,
        Biome::TropicalDesert,
        Biome::SeasonalForest,
        Biome::TropicalRainForest,
    ];

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Name used in exported payloads.
    pub fn name(self) -> &'static str {
        match self {
            Biome::Scorched => "scorched",
            Biome::Bare => "bare",
            Biome::Tundra => "tundra",
            Biome::Snow => "snow",
            Biome::TemperateDesert => "temperateDesert",
            Biome::ShrubLand => "shrubLand",
            Biome::Taiga => "taiga",
            Biome::Grassland => "grassland",
            Biome::DeciduousForest => "deciduousForest",
            Biome::RainForest => "rainForest",
            Biome::TropicalDesert => "tropicalDesert",
            Biome::SeasonalForest => "seasonalForest",
            Biome::TropicalRainForest => "tropicalRainForest",
        }
    }

    /// Base color as 0xRRGGBB.
    pub fn hex(self) -> u32 {
        match self {
            Biome::Scorched => 0x999999,
            Biome::Bare => 0xbbbbbb,
            Biome::Tundra => 0xddddbb,
            Biome::Snow => 0xf8f8f8,
            Biome::TemperateDesert => 0xe4e8ca,
            Biome::ShrubLand => 0xc4ccbb,
            Biome::Taiga => 0xccd4bb,
            Biome::Grassland => 0xc4d4aa,
            Biome::DeciduousForest => 0xb4c9a9,
            Biome::RainForest => 0xa4c4a8,
            Biome::TropicalDesert => 0xe9ddc7,
            Biome::SeasonalForest => 0xa9cca4,
            Biome::TropicalRainForest => 0x9cbba9,
        }
    }

    /// RGB preview color for this biome.
    pub fn preview_rgb(self) -> [u8; 3] {
        let hex = self.hex();
        [(hex >> 16) as u8, (hex >> 8) as u8, hex as u8]
    }

    /// Base color with channels in [0, 1].
    pub fn base_color(self) -> Vec3 {
        let [r, g, b] = self.preview_rgb();
        Vec3::new(r as f32, g as f32, b as f32) / 255.0
    }
}

/// Rows are temperature bands (cold to hot), columns moisture bands (dry to wet).
pub const BIOME_TABLE: [[Biome; 6]; 4] = {
    use Biome::*;
    [
        [Scorched, Bare, Tundra, Snow, Snow, Snow],
        [TemperateDesert, ShrubLand, ShrubLand, ShrubLand, Taiga, Taiga],
        [TemperateDesert, Grassland, Grassland, DeciduousForest, DeciduousForest, RainForest],
        [TropicalDesert, Grassland, SeasonalForest, SeasonalForest, TropicalRainForest, TropicalRainForest],
    ]
};

/// Biome for a temperature (°C) and accumulated moisture drop.
pub fn classify(t: f32, moisture_drop: f32, cfg: &BiomeConfig) -> Biome {
    let row = cfg.temperature_bands.index(t).min(BIOME_TABLE.len() - 1);
    let col = cfg.moisture_bands.index(moisture_drop).min(BIOME_TABLE[0].len() - 1);
    BIOME_TABLE[row][col]
}

/// Sets `biome` on every node.
pub fn assign_biomes(nodes: &mut [Node], cfg: &BiomeConfig) {
    for node in nodes {
        node.biome = Some(classify(node.t, node.moisture_drop, cfg));
    }
}

/// `base` blended a little toward a random light gray.
///
/// Draws two values from `rng`: the gray level, then the blend weight.
pub fn jittered_color<R: Rng + ?Sized>(base: Vec3, cfg: &BiomeConfig, rng: &mut R) -> Vec3 {
    let gray = 1.0 - cfg.gray_jitter * rng.random::<f32>();
    let weight = cfg.blend_jitter * rng.random::<f32>();
    base.lerp(Vec3::splat(gray), weight)
}

/// Per-biome land node counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BiomeHistogram {
    counts: [usize; 13],
    total: usize,
}

impl BiomeHistogram {
    /// Counts the biome of every land node that has one.
    pub fn from_nodes(nodes: &[Node]) -> Self {
        let mut histogram = Self::default();
        for node in nodes.iter().filter(|n| n.is_land()) {
            if let Some(biome) = node.biome {
                histogram.add(biome);
            }
        }
        histogram
    }

    pub fn add(&mut self, biome: Biome) {
        self.counts[biome as usize] += 1;
        self.total += 1;
    }

    pub fn count(&self, biome: Biome) -> usize {
        self.counts[biome as usize]
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Rounded share of each biome in percent, in `Biome::ALL` order.
    /// All zero when there is no land.
    pub fn percentages(&self) -> Vec<(Biome, f32)> {
        Biome::ALL
            .iter()
            .map(|&b| {
                let pct = if self.total == 0 {
                    0.0
                } else {
                    (100.0 * self.count(b) as f32 / self.total as f32).round()
                };
                (b, pct)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn table_corners() {
        let cfg = BiomeConfig::default();
        assert_eq!(classify(-20.0, 0.0, &cfg), Biome::Scorched);
        assert_eq!(classify(-20.0, 5.0, &cfg), Biome::Snow);
        assert_eq!(classify(35.0, 0.0, &cfg), Biome::TropicalDesert);
        assert_eq!(classify(35.0, 0.95, &cfg), Biome::TropicalRainForest);
        // second band starts at 3.75 °C, moisture 0.5 is column 3
        assert_eq!(classify(5.0, 0.5, &cfg), Biome::ShrubLand);
        assert_eq!(classify(15.0, 0.5, &cfg), Biome::DeciduousForest);
    }

    #[test]
    fn every_biome_is_reachable() {
        let mut seen: Vec<Biome> = BIOME_TABLE.iter().flatten().copied().collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen, Biome::ALL.to_vec());
    }

    #[test]
    fn colors_decode_from_hex() {
        assert_eq!(Biome::Snow.preview_rgb(), [0xf8, 0xf8, 0xf8]);
        let c = Biome::Scorched.base_color();
        assert!((c.x - 0x99 as f32 / 255.0).abs() < 1e-6);
        assert_eq!(Biome::TropicalRainForest.name(), "tropicalRainForest");
    }

    #[test]
    fn jitter_stays_close_to_base() {
        let cfg = BiomeConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for biome in Biome::ALL {
            let base = biome.base_color();
            let c = jittered_color(base, &cfg, &mut rng);
            assert!((c - base).abs().max_element() <= 0.05 + 1e-6);
            assert!(c.min_element() >= 0.0 && c.max_element() <= 1.0);
        }
    }

    #[test]
    fn histogram_counts_land_only() {
        let mut nodes: Vec<Node> = (0..4).map(|i| Node::new(i, Vec2::ZERO)).collect();
        nodes[0].h = 1.0;
        nodes[0].biome = Some(Biome::Taiga);
        nodes[1].h = 1.0;
        nodes[1].biome = Some(Biome::Taiga);
        nodes[2].h = 1.0;
        nodes[2].biome = Some(Biome::Snow);
        nodes[3].h = -1.0;
        nodes[3].biome = Some(Biome::Snow);

        let histogram = BiomeHistogram::from_nodes(&nodes);
        assert_eq!(histogram.total(), 3);
        let pct = histogram.percentages();
        assert_eq!(pct.len(), 13);
        assert_eq!(pct[Biome::Taiga as usize], (Biome::Taiga, 67.0));
        assert_eq!(pct[Biome::Snow as usize], (Biome::Snow, 33.0));
        let sum: f32 = pct.iter().map(|(_, p)| p).sum();
        assert_eq!(sum, 100.0);
    }

    #[test]
    fn no_land_means_zero_percent() {
        let histogram = BiomeHistogram::default();
        assert!(histogram.percentages().iter().all(|&(_, p)| p == 0.0));
    }
}

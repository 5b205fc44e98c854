//! Planetgen CLI - Procedural planet generator.
//!
//! Generates a triangulated planet with continents, climate, erosion and
//! rivers, and writes it as a JSON payload with an optional PNG preview.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;

use tracing_subscriber::EnvFilter;

use planetgen::export::{export_equirect_biome_png, export_planet_json, PreviewOptions};
use planetgen::pipeline::generate;
use planetgen::terrain::{PlanetConfig, PlanetSeed};

/// Procedural planet generator.
#[derive(Parser)]
#[command(name = "planetgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new planet.
    Generate {
        /// Seed text or number; the same seed gives the same planet.
        #[arg(short, long, default_value = "hello.")]
        seed: PlanetSeed,

        /// Starting configuration.
        #[arg(short, long, default_value = "earth-like")]
        preset: Preset,

        /// JSON config file; overrides the preset.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Number of sampled points, not counting the anchors.
        #[arg(long)]
        points: Option<usize>,

        /// Planet radius.
        #[arg(long)]
        radius: Option<f32>,

        /// Number of large continents.
        #[arg(long)]
        continents: Option<usize>,

        /// Number of small continents spawned while the large ones grow.
        #[arg(long)]
        small_continents: Option<usize>,

        /// Output directory for generated files.
        #[arg(short, long, default_value = "./output")]
        output: PathBuf,

        /// Base name for output files.
        #[arg(short, long, default_value = "planet")]
        name: String,

        /// Also write an equirectangular biome preview PNG.
        #[arg(long)]
        preview: bool,

        /// Preview width in pixels (height is half).
        #[arg(long, default_value = "1024")]
        preview_width: u32,
    },

    /// Print a configuration as JSON.
    Info {
        /// Configuration to print.
        #[arg(short, long, default_value = "earth-like")]
        preset: Preset,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Preset {
    /// Default tunables.
    EarthLike,
    /// Few large continents.
    Supercontinent,
    /// Many continents and islands.
    Archipelago,
}

impl Preset {
    fn config(self) -> PlanetConfig {
        match self {
            Preset::EarthLike => PlanetConfig::earth_like(),
            Preset::Supercontinent => PlanetConfig::supercontinent(),
            Preset::Archipelago => PlanetConfig::archipelago(),
        }
    }
}

struct GenerateArgs {
    seed: PlanetSeed,
    preset: Preset,
    config: Option<PathBuf>,
    points: Option<usize>,
    radius: Option<f32>,
    continents: Option<usize>,
    small_continents: Option<usize>,
    output: PathBuf,
    name: String,
    preview: bool,
    preview_width: u32,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            seed,
            preset,
            config,
            points,
            radius,
            continents,
            small_continents,
            output,
            name,
            preview,
            preview_width,
        } => {
            run_generate(GenerateArgs {
                seed,
                preset,
                config,
                points,
                radius,
                continents,
                small_continents,
                output,
                name,
                preview,
                preview_width,
            });
        }
        Commands::Info { preset } => {
            run_info(preset);
        }
    }
}

/// Builds the run config: file or preset first, then explicit overrides.
fn build_config(args: &GenerateArgs) -> PlanetConfig {
    let mut config = match &args.config {
        Some(path) => PlanetConfig::from_json_file(path).unwrap_or_else(|e| {
            eprintln!("Error reading config {}: {}", path.display(), e);
            std::process::exit(1);
        }),
        None => args.preset.config(),
    };

    if let Some(radius) = args.radius {
        // height-derived tunables follow the radius
        let scaled = PlanetConfig::with_radius(radius);
        config.radius = radius;
        config.continents.max_continent_height = scaled.continents.max_continent_height;
        config.climate = scaled.climate;
    }
    if let Some(points) = args.points {
        config.n_points = points;
    }
    if let Some(n) = args.continents {
        config.continents.n_continents = n;
    }
    if let Some(n) = args.small_continents {
        config.continents.n_small_continents = n;
    }

    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
    config
}

fn run_generate(args: GenerateArgs) {
    let config = build_config(&args);

    println!("Planetgen - Procedural Planet Generator");
    println!("=======================================");
    println!("Seed: {} ({})", args.seed, args.seed.to_u64());
    println!("Points: {} ({} with anchors)", config.n_points, config.total_points());
    println!("Radius: {}", config.radius);
    println!(
        "Continents: {} large, {} small",
        config.continents.n_continents, config.continents.n_small_continents
    );
    println!("Output: {}", args.output.display());
    println!();

    let start = Instant::now();

    println!("Generating planet...");
    let model = generate(&args.seed, &config).unwrap_or_else(|e| {
        eprintln!("Error generating planet: {}", e);
        std::process::exit(1);
    });
    let gen_time = start.elapsed();
    println!("Generation completed in {:.2?}", gen_time);

    let land = model.nodes.iter().filter(|n| n.is_land()).count();
    println!();
    println!("Planet summary:");
    println!("  Nodes:      {:>6}", model.num_nodes());
    println!("  Triangles:  {:>6}", model.triangles.len());
    println!("  Continents: {:>6}", model.continents.len());
    println!("  Rivers:     {:>6}", model.rivers.len());
    println!(
        "  Land:       {:>6} ({:.1}%)",
        land,
        100.0 * land as f32 / model.num_nodes().max(1) as f32
    );
    println!();
    println!("Biomes (% of land):");
    for (biome, pct) in model.biomes.percentages() {
        if pct > 0.0 {
            println!("  {:<28} {:>5.0}%", biome.name(), pct);
        }
    }
    println!();

    println!("Exporting...");
    let export_start = Instant::now();

    let json_path = export_planet_json(&model, &args.output, &args.name).unwrap_or_else(|e| {
        eprintln!("Error exporting JSON: {}", e);
        std::process::exit(1);
    });
    println!("  Exported {}", json_path.display());

    if args.preview {
        let options = PreviewOptions {
            width: args.preview_width,
            ..Default::default()
        };
        let png_path = export_equirect_biome_png(&model, &args.output, &args.name, &options)
            .unwrap_or_else(|e| {
                eprintln!("Error exporting preview: {}", e);
                std::process::exit(1);
            });
        println!("  Exported {}", png_path.display());
    }

    let export_time = export_start.elapsed();
    let total_time = start.elapsed();

    println!("Export completed in {:.2?}", export_time);
    println!("\nTotal time: {:.2?}", total_time);
    println!("Done!");
}

fn run_info(preset: Preset) {
    let config = preset.config();
    match serde_json::to_string_pretty(&config) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing config: {}", e);
            std::process::exit(1);
        }
    }
}

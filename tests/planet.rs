use std::collections::HashMap;

use glam::Vec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use planetgen::export::{to_json_string, to_payload};
use planetgen::geometry::{sample_sphere_points, ConvexHullTopology, TopologyBuilder};
use planetgen::mesh::u_spread;
use planetgen::pipeline::{generate, ClimateStage, ContinentStage, Pipeline, TectonicStage};
use planetgen::terrain::{PlanetConfig, PlanetSeed, PlanetState};
use planetgen::PlanetModel;

fn default_planet() -> PlanetModel {
    generate(&PlanetSeed::default(), &PlanetConfig::default()).expect("default planet generates")
}

#[test]
fn default_run_has_expected_shape() {
    let model = default_planet();
    let config = PlanetConfig::default();

    assert_eq!(model.num_nodes(), config.total_points());
    assert_eq!(model.num_nodes(), 403);
    assert_eq!(model.triangles.len(), 2 * 403 - 4);
    assert!(
        (8..=16).contains(&model.continents.len()),
        "{} continents",
        model.continents.len()
    );
    assert!(model.nodes.iter().any(|n| n.is_land()));
    assert!(model.nodes.iter().any(|n| !n.is_land()));
}

#[test]
fn mesh_is_a_closed_sphere() {
    let model = default_planet();
    assert_eq!(model.topology.euler_characteristic(), 2);

    let mut edges: HashMap<(usize, usize), usize> = HashMap::new();
    for tri in &model.triangles {
        let [a, b, c] = tri.indexes;
        for (p, q) in [(a, b), (b, c), (c, a)] {
            *edges.entry((p.min(q), p.max(q))).or_default() += 1;
        }
    }
    assert!(edges.values().all(|&n| n == 2));
}

#[test]
fn every_node_belongs_to_exactly_one_continent() {
    let model = default_planet();
    let mut seen = vec![0usize; model.num_nodes()];
    for continent in &model.continents {
        for &i in &continent.nodes {
            seen[i] += 1;
            assert_eq!(model.nodes[i].continent, Some(continent.id));
        }
    }
    assert!(seen.iter().all(|&n| n == 1));
}

#[test]
fn climate_respects_capacity() {
    let config = PlanetConfig::default();
    let seed = PlanetSeed::from("capacity").to_u64();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let points = sample_sphere_points(config.n_points, config.n_samples, &mut rng);
    let topology = ConvexHullTopology.build(&points).unwrap();
    let mut state = PlanetState::new(config.clone(), seed, &points, topology, rng);

    let mut pipeline = Pipeline::new();
    pipeline
        .add_stage(ContinentStage)
        .add_stage(TectonicStage)
        .add_stage(ClimateStage);
    pipeline.run(&mut state).unwrap();

    assert!(state.max_moisture_drop() > 0.0);
    for node in &state.nodes {
        let capacity = config.climate.capacity(node.h, node.t);
        assert!(
            node.moisture_drop - node.orographic_drop <= capacity + 1e-4,
            "node {}: drop {} orographic {} capacity {}",
            node.index,
            node.moisture_drop,
            node.orographic_drop,
            capacity
        );
        assert!(node.orographic_drop >= 0.0);
        assert_eq!(node.moisture_from_neighbors, 0.0);
    }
}

#[test]
fn biome_shares_add_up() {
    let model = default_planet();
    let shares = model.biomes.percentages();
    assert_eq!(shares.len(), 13);

    let total: f32 = shares.iter().map(|(_, pct)| pct).sum();
    if model.biomes.total() == 0 {
        assert_eq!(total, 0.0);
    } else {
        // each share is rounded on its own
        assert!((total - 100.0).abs() <= 13.0, "total {total}");
    }
}

#[test]
fn default_seed_has_rivers() {
    let model = default_planet();
    assert!(!model.rivers.is_empty());
    assert!(model.rivers.iter().any(|r| r.mouth.is_some()));
}

#[test]
fn rivers_run_downhill_into_the_sea() {
    for seed in ["hello.", "rivers", "delta"] {
        let model = generate(&PlanetSeed::from(seed), &PlanetConfig::default()).unwrap();
        let threshold = PlanetConfig::default().erosion.river_flow_threshold;
        for river in &model.rivers {
            let source = &model.nodes[river.source];
            assert!(source.is_land());
            assert!(source.water_flow_in > threshold);
            match river.mouth {
                Some(mouth) => {
                    let mouth = &model.nodes[mouth];
                    assert!(mouth.h < 0.0);
                    assert!(mouth.h < source.h);
                    assert!(model.topology.are_neighbors(source.index, mouth.index));
                    assert!(river.ribbon.is_some());
                }
                None => assert!(river.ribbon.is_none()),
            }
        }
    }
}

#[test]
fn texture_seam_is_closed_away_from_poles() {
    let model = default_planet();
    // anchors 1 and 2 are the poles, where every longitude meets
    for tri in model.triangles.iter().filter(|t| !t.indexes.iter().any(|&i| i == 1 || i == 2)) {
        assert!(u_spread(&tri.uvs) <= 0.5, "triangle {:?} uvs {:?}", tri.indexes, tri.uvs);
    }
}

#[test]
fn vertex_elevations_are_recovered() {
    let model = default_planet();
    for node in model.nodes.iter().step_by(11) {
        let h = model.elevation_at(node.point).unwrap();
        assert!((h - node.h).abs() < 1e-2, "node {} expected {} got {}", node.index, node.h, h);
    }
    assert!(model.elevation_at(Vec2::new(33.0, -17.0)).is_some());
}

#[test]
fn same_seed_same_payload() {
    let a = default_planet();
    let b = default_planet();
    assert_eq!(to_json_string(&a, false).unwrap(), to_json_string(&b, false).unwrap());

    let other = generate(&PlanetSeed::from("other"), &PlanetConfig::default()).unwrap();
    assert_ne!(to_payload(&a), to_payload(&other));
}

#[test]
fn parallel_runs_match_sequential() {
    use rayon::prelude::*;

    let seeds: Vec<PlanetSeed> = (0..4u64).map(PlanetSeed::from).collect();
    let config = PlanetConfig { n_points: 120, ..PlanetConfig::default() };

    let sequential: Vec<String> = seeds
        .iter()
        .map(|s| to_json_string(&generate(s, &config).unwrap(), false).unwrap())
        .collect();
    let parallel: Vec<String> = seeds
        .par_iter()
        .map(|s| to_json_string(&generate(s, &config).unwrap(), false).unwrap())
        .collect();

    assert_eq!(sequential, parallel);
}

#[test]
fn config_file_drives_generation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("planet.json");
    std::fs::write(&path, r#"{ "radius": 50.0, "n_points": 90 }"#).unwrap();

    let config = PlanetConfig::from_json_file(&path).unwrap();
    assert_eq!(config.n_points, 90);
    assert_eq!(config.radius, 50.0);

    let model = generate(&PlanetSeed::from(3), &config).unwrap();
    assert_eq!(model.num_nodes(), 93);
    assert_eq!(model.radius, 50.0);
}

//! Generation stage trait and pipeline orchestration.

use thiserror::Error;
use tracing::info;

use crate::climate::{advect_moisture, assign_temperatures, init_downwind_sets};
use crate::erosion::{compute_water_flow_in, erode, trace_rivers};
use crate::geometry::TopologyError;
use crate::tectonics::{apply_boundary_stress, partition_continents};
use crate::terrain::{ConfigError, PlanetState};

/// Unique identifier for generation stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageId {
    /// Continent partitioning and elevation bias.
    Continents,
    /// Drift stress along continent boundaries.
    Tectonics,
    /// Temperature and moisture advection.
    Climate,
    /// Moisture-driven elevation diffusion.
    Erosion,
    /// Inbound flow and river paths.
    Hydrology,
}

impl StageId {
    /// Returns the name of the stage.
    pub fn name(&self) -> &'static str {
        match self {
            StageId::Continents => "continents",
            StageId::Tectonics => "tectonics",
            StageId::Climate => "climate",
            StageId::Erosion => "erosion",
            StageId::Hydrology => "hydrology",
        }
    }
}

/// Errors that can occur while generating a planet.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("triangulation failed: {0}")]
    Topology(#[from] TopologyError),
    #[error("Stage '{0}' failed: {1}")]
    StageFailed(String, String),
    #[error("Missing dependency: stage '{0}' requires '{1}'")]
    MissingDependency(String, String),
}

/// Trait for implementing generation stages.
///
/// Each stage reads what earlier stages wrote into the [`PlanetState`] and
/// fills in its own fields.
pub trait GenerationStage: Send + Sync {
    /// Returns the unique identifier for this stage.
    fn id(&self) -> StageId;

    /// Returns a human-readable name for the stage.
    fn name(&self) -> &str;

    /// Returns the stage IDs that must be executed before this stage.
    fn dependencies(&self) -> &[StageId] {
        &[]
    }

    /// Executes the stage, modifying the state in place.
    fn execute(&self, state: &mut PlanetState) -> Result<(), GenerationError>;
}

/// Orchestrates multiple generation stages into a complete pipeline.
#[derive(Default)]
pub struct Pipeline {
    stages: Vec<Box<dyn GenerationStage>>,
}

impl Pipeline {
    /// Creates a new empty pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Continents, tectonics, climate, erosion and hydrology, in that order.
    pub fn standard() -> Self {
        let mut pipeline = Self::new();
        pipeline
            .add_stage(ContinentStage)
            .add_stage(TectonicStage)
            .add_stage(ClimateStage)
            .add_stage(ErosionStage)
            .add_stage(HydrologyStage);
        pipeline
    }

    /// Adds a stage to the pipeline.
    pub fn add_stage<S: GenerationStage + 'static>(&mut self, stage: S) -> &mut Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Returns the number of stages in the pipeline.
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Executes all stages in order on the given state.
    pub fn run(&self, state: &mut PlanetState) -> Result<(), GenerationError> {
        self.run_with_callbacks(state, |_, _, _| {}, |_, _, _| {})
    }

    /// Executes all stages with progress callbacks.
    ///
    /// # Arguments
    /// * `state` - The planet state to generate into
    /// * `on_stage_start` - Called when each stage begins
    /// * `on_stage_complete` - Called when each stage finishes
    pub fn run_with_callbacks<F1, F2>(
        &self,
        state: &mut PlanetState,
        mut on_stage_start: F1,
        mut on_stage_complete: F2,
    ) -> Result<(), GenerationError>
    where
        F1: FnMut(&str, usize, usize),
        F2: FnMut(&str, usize, usize),
    {
        let total = self.stages.len();
        let mut completed: Vec<StageId> = Vec::new();

        for (i, stage) in self.stages.iter().enumerate() {
            on_stage_start(stage.name(), i, total);

            for dep in stage.dependencies() {
                if !completed.contains(dep) {
                    return Err(GenerationError::MissingDependency(
                        stage.name().to_string(),
                        dep.name().to_string(),
                    ));
                }
            }

            stage.execute(state)?;
            completed.push(stage.id());

            on_stage_complete(stage.name(), i, total);
        }

        Ok(())
    }
}

/// Partitions nodes into continents and applies their elevation bias.
pub struct ContinentStage;

impl GenerationStage for ContinentStage {
    fn id(&self) -> StageId {
        StageId::Continents
    }

    fn name(&self) -> &str {
        "Continent Partitioning"
    }

    fn execute(&self, state: &mut PlanetState) -> Result<(), GenerationError> {
        if state.nodes.is_empty() {
            return Err(GenerationError::StageFailed(
                self.name().to_string(),
                "planet has no nodes".to_string(),
            ));
        }

        let PlanetState { config, nodes, topology, continents, rng, .. } = &mut *state;
        *continents = partition_continents(
            nodes,
            &topology.neighbors,
            &config.continents,
            config.n_samples,
            rng,
        );

        let small = state.continents.iter().filter(|c| c.small).count();
        info!(
            continents = state.continents.len(),
            small,
            land = state.land_count(),
            "continents partitioned"
        );
        Ok(())
    }
}

/// Raises and lowers boundary triangles by continent drift stress.
pub struct TectonicStage;

impl GenerationStage for TectonicStage {
    fn id(&self) -> StageId {
        StageId::Tectonics
    }

    fn name(&self) -> &str {
        "Tectonic Drift"
    }

    fn dependencies(&self) -> &[StageId] {
        &[StageId::Continents]
    }

    fn execute(&self, state: &mut PlanetState) -> Result<(), GenerationError> {
        if !state.is_partitioned() {
            return Err(GenerationError::StageFailed(
                self.name().to_string(),
                "some nodes have no continent".to_string(),
            ));
        }

        let force_factor = state.config.continents.force_factor();
        let boundary = apply_boundary_stress(
            &mut state.nodes,
            &state.topology.triangles,
            &state.continents,
            force_factor,
        );

        let (min_h, max_h) = state.height_range();
        info!(boundary_triangles = boundary, min_h, max_h, "drift stress applied");
        Ok(())
    }
}

/// Computes temperatures, downwind edges and moisture.
pub struct ClimateStage;

impl GenerationStage for ClimateStage {
    fn id(&self) -> StageId {
        StageId::Climate
    }

    fn name(&self) -> &str {
        "Climate Simulation"
    }

    fn dependencies(&self) -> &[StageId] {
        &[StageId::Tectonics]
    }

    fn execute(&self, state: &mut PlanetState) -> Result<(), GenerationError> {
        let cfg = &state.config.climate;
        assign_temperatures(&mut state.nodes, cfg);
        let edges = init_downwind_sets(&mut state.nodes, &state.topology.neighbors, cfg);
        let stats = advect_moisture(&mut state.nodes, cfg);

        info!(
            downwind_edges = edges,
            evaporated = stats.evaporated,
            deposited = stats.deposited,
            blocked = stats.blocked,
            visits = stats.visits,
            "moisture advected"
        );
        Ok(())
    }
}

/// Wears land down into wetter and lower neighbors.
pub struct ErosionStage;

impl GenerationStage for ErosionStage {
    fn id(&self) -> StageId {
        StageId::Erosion
    }

    fn name(&self) -> &str {
        "Erosion"
    }

    fn dependencies(&self) -> &[StageId] {
        &[StageId::Climate]
    }

    fn execute(&self, state: &mut PlanetState) -> Result<(), GenerationError> {
        let stats = erode(&mut state.nodes, &state.topology.neighbors, &state.config.erosion);
        info!(
            eroded_nodes = stats.eroded_nodes,
            removed = stats.removed,
            added = stats.added,
            "erosion applied"
        );
        Ok(())
    }
}

/// Computes inbound water flow and traces rivers to the sea.
pub struct HydrologyStage;

impl GenerationStage for HydrologyStage {
    fn id(&self) -> StageId {
        StageId::Hydrology
    }

    fn name(&self) -> &str {
        "Hydrology"
    }

    fn dependencies(&self) -> &[StageId] {
        &[StageId::Erosion]
    }

    fn execute(&self, state: &mut PlanetState) -> Result<(), GenerationError> {
        let cfg = &state.config.erosion;
        let sources = compute_water_flow_in(&mut state.nodes, &state.topology.neighbors, cfg);
        state.rivers = trace_rivers(&state.nodes, &state.topology.neighbors, cfg);

        let reaching_sea = state.rivers.iter().filter(|r| r.mouth.is_some()).count();
        info!(sources, reaching_sea, "rivers traced");
        Ok(())
    }
}

//! Pipeline module for orchestrating planet generation stages.
//!
//! Provides a trait-based architecture for generation stages that run in a
//! fixed order over one owned [`PlanetState`](crate::terrain::PlanetState),
//! plus the [`generate`] entry point that samples, triangulates, runs the
//! standard pipeline and assembles the model.

mod stage;
mod generate;

pub use stage::{
    GenerationStage, StageId, Pipeline, GenerationError,
    ContinentStage, TectonicStage, ClimateStage, ErosionStage, HydrologyStage,
};
pub use generate::{generate, generate_with};

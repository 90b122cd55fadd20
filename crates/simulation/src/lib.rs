//! World model and deterministic baseline generator for isocity.

pub mod config;
pub mod district_policies;
pub mod grid;
pub mod sim_config;
pub mod sim_rng;
pub mod stats;
pub mod terrain_generation;
pub mod world_gen;

pub use district_policies::DistrictPolicy;
pub use grid::{Overlay, Terrain, Tile, WorldGrid};
pub use sim_config::SimConfig;
pub use stats::Stats;
pub use terrain_generation::GenerationConfig;
pub use world_gen::generate_world;

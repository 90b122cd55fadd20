//! Procedural terrain: fBm height field and the knobs that shape a world.

use bevy::prelude::*;
use fastnoise_lite::{FastNoiseLite, FractalType, NoiseType};
use serde::{Deserialize, Serialize};

use crate::config::{TERRAIN_LACUNARITY, TERRAIN_OCTAVES, TERRAIN_PERSISTENCE};
use crate::grid::Terrain;

// ---------------------------------------------------------------------------
// Generation configuration resource
// ---------------------------------------------------------------------------

/// Parameters the world generator was run with.
///
/// Together with the seed and dimensions these fully determine the baseline
/// world, so they are persisted in every save that stores diffs.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Noise frequency; larger values give smaller landmasses.
    pub terrain_scale: f32,
    pub water_level: f32,
    pub sand_level: f32,
    pub hubs: i32,
    pub extra_connections: i32,
    pub zone_chance: f32,
    pub park_chance: f32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            terrain_scale: 0.08,
            water_level: 0.35,
            sand_level: 0.42,
            hubs: 4,
            extra_connections: 2,
            zone_chance: 0.22,
            park_chance: 0.06,
        }
    }
}

impl GenerationConfig {
    pub fn classify(&self, height: f32) -> Terrain {
        Terrain::from_height(height, self.water_level, self.sand_level)
    }
}

// ---------------------------------------------------------------------------
// fBm noise generation
// ---------------------------------------------------------------------------

fn noise_seed(seed: u64) -> i32 {
    (seed ^ (seed >> 32)) as u32 as i32
}

/// Generate base elevation using fBm noise.
///
/// Returns a flat `Vec<f32>` (row-major, width x height) with values in [0, 1].
pub fn generate_heightfield(width: usize, height: usize, seed: u64, scale: f32) -> Vec<f32> {
    let mut noise = FastNoiseLite::with_seed(noise_seed(seed));
    noise.set_noise_type(Some(NoiseType::OpenSimplex2));
    noise.set_frequency(Some(scale.abs().max(1e-4)));
    noise.set_fractal_type(Some(FractalType::FBm));
    noise.set_fractal_octaves(Some(TERRAIN_OCTAVES));
    noise.set_fractal_gain(Some(TERRAIN_PERSISTENCE));
    noise.set_fractal_lacunarity(Some(TERRAIN_LACUNARITY));

    let mut elevations = vec![0.0_f32; width * height];
    for y in 0..height {
        for x in 0..width {
            let raw = noise.get_noise_2d(x as f32, y as f32);
            // fBm with OpenSimplex2 outputs in [-1, 1]; normalize to [0, 1]
            elevations[y * width + x] = ((raw + 1.0) * 0.5).clamp(0.0, 1.0);
        }
    }
    elevations
}

//! Height quantization.
//!
//! Heights are persisted as u16 covering [0, 1] in 65535 steps. Comparing
//! quantized values (never raw floats) is what decides whether a tile's
//! height differs from the baseline.

use simulation::{GenerationConfig, Terrain};

const Q_MAX: f32 = 65535.0;

pub fn quantize_height(h: f32) -> u16 {
    (h.clamp(0.0, 1.0) * Q_MAX).round() as u16
}

pub fn dequantize_height(q: u16) -> f32 {
    q as f32 / Q_MAX
}

/// Terrain class for a height under the given generation thresholds.
pub fn terrain_from_height(h: f32, cfg: &GenerationConfig) -> Terrain {
    Terrain::from_height(h, cfg.water_level, cfg.sand_level)
}

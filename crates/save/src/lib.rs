//! Binary save/load for isocity worlds.
//!
//! Saves store the generation seed and config plus per-tile differences from
//! the regenerated baseline. Every historical format version (v1..v7) still
//! loads and is migrated to the current in-memory model.

mod atomic_write;
mod byte_io;
pub mod crc32;
mod diff;
mod file_header;
mod height;
mod integrity;
mod save_api;
mod save_body;
mod save_codec;
mod save_error;
mod save_migrate;
mod save_plugin;
mod save_summary;
mod save_version;
pub mod varint;

#[cfg(test)]
mod save_legacy_tests;

pub use atomic_write::atomic_write;
pub use diff::{
    apply_height_diffs, apply_tile_diffs, compute_height_diffs, compute_tile_diffs, HeightDiff,
    TileDiff,
};
pub use file_header::{parse_header, SaveHeader, HEADER_SIZE, MAGIC};
pub use height::{dequantize_height, quantize_height, terrain_from_height};
pub use save_api::{
    load_world_binary, load_world_from_bytes, save_world_binary, save_world_to_bytes,
};
pub use save_body::{DiffBody, FullTileBody, SaveBody, SimDiffBody, TerrainDiffBody};
pub use save_error::SaveError;
pub use save_migrate::{LoadedWorld, MigrationReport};
pub use save_plugin::{LoadGameEvent, SaveGameEvent, SaveLoadOutcome, SavePlugin};
pub use save_summary::{read_save_summary, CrcStatus, SaveSummary};
pub use save_version::SaveVersion;

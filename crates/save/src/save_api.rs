// ---------------------------------------------------------------------------
// Public save/load entry points
// ---------------------------------------------------------------------------

use std::path::Path;

use bevy::prelude::*;
use simulation::config::MAX_WORLD_DIMENSION;
use simulation::{GenerationConfig, SimConfig, WorldGrid};

use crate::atomic_write::atomic_write;
use crate::byte_io::ByteReader;
use crate::file_header::{parse_header, HEADER_SIZE};
use crate::integrity::verify_trailing_crc;
use crate::save_body::SaveBody;
use crate::save_error::SaveError;
use crate::save_migrate::{restore, LoadedWorld};
use crate::save_version::SaveVersion;

fn check_world(world: &WorldGrid) -> Result<(u32, u32), SaveError> {
    let width = u32::try_from(world.width).unwrap_or(u32::MAX);
    let height = u32::try_from(world.height).unwrap_or(u32::MAX);
    if width == 0 || height == 0 || width > MAX_WORLD_DIMENSION || height > MAX_WORLD_DIMENSION {
        return Err(SaveError::InvalidDimensions { width, height });
    }
    if world.tiles.len() != world.width * world.height {
        return Err(SaveError::corrupt(format!(
            "world has {} tiles, expected {}x{}",
            world.tiles.len(),
            width,
            height
        )));
    }
    Ok((width, height))
}

/// Encode `world` at an explicit format version. Only the current version is
/// exposed publicly; older versions exist to produce compatibility fixtures.
pub(crate) fn encode_world(
    version: SaveVersion,
    world: &WorldGrid,
    generation: &GenerationConfig,
    sim: &SimConfig,
) -> Result<Vec<u8>, SaveError> {
    let (width, height) = check_world(world)?;
    let body = SaveBody::from_world(version, world, generation, sim);
    Ok(body.encode(width, height, world.seed)?)
}

/// Serialize `world` into a complete current-version save file image.
pub fn save_world_to_bytes(
    world: &WorldGrid,
    generation: &GenerationConfig,
    sim: &SimConfig,
) -> Result<Vec<u8>, SaveError> {
    encode_world(SaveVersion::CURRENT, world, generation, sim)
}

/// Save `world` to `path`, replacing any existing file atomically.
pub fn save_world_binary(
    world: &WorldGrid,
    generation: &GenerationConfig,
    sim: &SimConfig,
    path: impl AsRef<Path>,
) -> Result<(), SaveError> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Err(SaveError::EmptyPath);
    }
    let bytes = save_world_to_bytes(world, generation, sim)?;
    atomic_write(path, &bytes)?;
    info!(
        "Saved {}x{} world to {} ({} bytes, {:?})",
        world.width,
        world.height,
        path.display(),
        bytes.len(),
        SaveVersion::CURRENT
    );
    Ok(())
}

/// Restore a world from a complete save file image of any supported version.
pub fn load_world_from_bytes(bytes: &[u8]) -> Result<LoadedWorld, SaveError> {
    if bytes.is_empty() {
        return Err(SaveError::EmptyBuffer);
    }

    let header = parse_header(bytes)?;
    let version = SaveVersion::from_u32(header.version)?;

    let (header, payload) = if version.has_checksum() {
        let verified = verify_trailing_crc(bytes, HEADER_SIZE)?;
        (parse_header(verified)?, verified)
    } else {
        (header, bytes)
    };

    let mut r = ByteReader::new(&payload[HEADER_SIZE..]);
    let body = SaveBody::parse(version, &header, &mut r)?;
    if r.remaining() != 0 {
        return Err(SaveError::corrupt(format!(
            "{} unexpected bytes after {:?} body",
            r.remaining(),
            version
        )));
    }

    Ok(restore(&header, body))
}

/// Load a save file from disk.
pub fn load_world_binary(path: impl AsRef<Path>) -> Result<LoadedWorld, SaveError> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Err(SaveError::EmptyPath);
    }
    let bytes = std::fs::read(path)?;
    let loaded = load_world_from_bytes(&bytes)?;
    info!(
        "Loaded {}x{} world from {} ({:?})",
        loaded.grid.width,
        loaded.grid.height,
        path.display(),
        loaded.version
    );
    Ok(loaded)
}

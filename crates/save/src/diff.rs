//! Tile and height diffs against the regenerated baseline world.
//!
//! Diff-based saves store only the tiles whose persisted fields differ from
//! what `generate_world` produces for the same seed and config. Lists are
//! sorted by tile index; varint encodings store the gap to the previous
//! index (the first entry stores its absolute index).
//!
//! | encoding          | per record                                                 |
//! |-------------------|------------------------------------------------------------|
//! | `Fixed` (v2, v3)  | u32 index, u8 overlay, u8 level, u16 occupants             |
//! | `Varint` (v4..v6) | varint delta, u8 overlay, u8 level, varint occupants       |
//! | `District` (v7)   | varint delta, u8 overlay, u8 level, u8 district, varint occ |
//! | heights (v5+)     | varint delta, u16 quantized height                         |

use std::io::{self, Write};

use simulation::config::DISTRICT_COUNT;
use simulation::{GenerationConfig, Overlay, Terrain, WorldGrid};

use crate::byte_io::{ByteReader, WriteLe};
use crate::height::{dequantize_height, quantize_height, terrain_from_height};
use crate::save_error::SaveError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileDiff {
    pub index: u32,
    pub overlay: Overlay,
    pub level: u8,
    pub district: u8,
    pub occupants: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeightDiff {
    pub index: u32,
    pub height_q: u16,
}

/// Wire layout of a tile diff list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DiffEncoding {
    Fixed,
    Varint,
    District,
}

const FIXED_RECORD_SIZE: usize = 8;
// smallest possible varint record: 1-byte delta, overlay, level, 1-byte occ
const MIN_VARINT_RECORD_SIZE: usize = 4;
const MIN_HEIGHT_RECORD_SIZE: usize = 3;

// ---------------------------------------------------------------------------
// Computing diffs
// ---------------------------------------------------------------------------

/// Tiles whose overlay, level, district or occupants differ from `base`,
/// in row-major order.
pub fn compute_tile_diffs(world: &WorldGrid, base: &WorldGrid) -> Vec<TileDiff> {
    world
        .tiles
        .iter()
        .zip(base.tiles.iter())
        .enumerate()
        .filter(|(_, (t, b))| {
            t.overlay != b.overlay
                || t.level != b.level
                || t.district != b.district
                || t.occupants != b.occupants
        })
        .map(|(i, (t, _))| TileDiff {
            index: i as u32,
            overlay: t.overlay,
            level: t.level,
            district: t.district.min(DISTRICT_COUNT as u8 - 1),
            occupants: t.occupants,
        })
        .collect()
}

/// Tiles whose quantized height differs from `base`, in row-major order.
pub fn compute_height_diffs(world: &WorldGrid, base: &WorldGrid) -> Vec<HeightDiff> {
    world
        .tiles
        .iter()
        .zip(base.tiles.iter())
        .enumerate()
        .filter_map(|(i, (t, b))| {
            let q = quantize_height(t.height);
            (q != quantize_height(b.height)).then_some(HeightDiff {
                index: i as u32,
                height_q: q,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

pub(crate) fn write_tile_diffs<W: Write>(
    w: &mut W,
    diffs: &[TileDiff],
    encoding: DiffEncoding,
) -> io::Result<()> {
    if encoding == DiffEncoding::Fixed {
        w.write_u32(diffs.len() as u32)?;
        for d in diffs {
            w.write_u32(d.index)?;
            w.write_u8(d.overlay as u8)?;
            w.write_u8(d.level)?;
            w.write_u16(d.occupants)?;
        }
        return Ok(());
    }

    w.write_varint(diffs.len() as u32)?;
    let mut prev = 0u32;
    for d in diffs {
        w.write_varint(d.index - prev)?;
        prev = d.index;
        w.write_u8(d.overlay as u8)?;
        w.write_u8(d.level)?;
        if encoding == DiffEncoding::District {
            w.write_u8(d.district)?;
        }
        w.write_varint(d.occupants as u32)?;
    }
    Ok(())
}

pub(crate) fn write_height_diffs<W: Write>(w: &mut W, diffs: &[HeightDiff]) -> io::Result<()> {
    w.write_varint(diffs.len() as u32)?;
    let mut prev = 0u32;
    for d in diffs {
        w.write_varint(d.index - prev)?;
        prev = d.index;
        w.write_u16(d.height_q)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

fn check_count(count: u32, tile_count: usize, what: &str) -> Result<usize, SaveError> {
    let count = count as usize;
    if count > tile_count {
        return Err(SaveError::corrupt(format!(
            "{what} count {count} exceeds tile count {tile_count}"
        )));
    }
    Ok(count)
}

/// Tracks delta-encoded indices and enforces strictly increasing order.
struct IndexCursor {
    prev: u64,
    first: bool,
    tile_count: u64,
}

impl IndexCursor {
    fn new(tile_count: usize) -> Self {
        Self {
            prev: 0,
            first: true,
            tile_count: tile_count as u64,
        }
    }

    fn advance(&mut self, delta: u32, what: &str) -> Result<u32, SaveError> {
        if !self.first && delta == 0 {
            return Err(SaveError::corrupt(format!(
                "{what} index delta is zero (non-increasing)"
            )));
        }
        let idx = self.prev + delta as u64;
        if idx >= self.tile_count {
            return Err(SaveError::corrupt(format!(
                "{what} index {idx} out of range (tile count {})",
                self.tile_count
            )));
        }
        self.prev = idx;
        self.first = false;
        Ok(idx as u32)
    }
}

fn read_overlay(r: &mut ByteReader<'_>) -> Result<Overlay, SaveError> {
    let v = r.read_u8("diff overlay")?;
    Overlay::from_u8(v).ok_or_else(|| SaveError::corrupt(format!("invalid overlay value {v}")))
}

pub(crate) fn read_tile_diffs(
    r: &mut ByteReader<'_>,
    encoding: DiffEncoding,
    tile_count: usize,
) -> Result<Vec<TileDiff>, SaveError> {
    if encoding == DiffEncoding::Fixed {
        let count = check_count(r.read_u32("diff count")?, tile_count, "diff")?;
        if r.remaining() < count * FIXED_RECORD_SIZE {
            return Err(SaveError::Truncated("diff list"));
        }
        let mut diffs = Vec::with_capacity(count);
        for _ in 0..count {
            let index = r.read_u32("diff index")?;
            if index as usize >= tile_count {
                return Err(SaveError::corrupt(format!(
                    "diff index {index} out of range (tile count {tile_count})"
                )));
            }
            let overlay = read_overlay(r)?;
            let level = r.read_u8("diff level")?;
            let occupants = r.read_u16("diff occupants")?;
            diffs.push(TileDiff {
                index,
                overlay,
                level,
                district: 0,
                occupants,
            });
        }
        return Ok(diffs);
    }

    let count = check_count(r.read_varint("diff count")?, tile_count, "diff")?;
    let mut diffs = Vec::with_capacity(count.min(r.remaining() / MIN_VARINT_RECORD_SIZE));
    let mut cursor = IndexCursor::new(tile_count);
    for _ in 0..count {
        let index = cursor.advance(r.read_varint("diff index delta")?, "diff")?;
        let overlay = read_overlay(r)?;
        let level = r.read_u8("diff level")?;
        let district = if encoding == DiffEncoding::District {
            let d = r.read_u8("diff district")?;
            if d as usize >= DISTRICT_COUNT {
                return Err(SaveError::corrupt(format!("invalid district value {d}")));
            }
            d
        } else {
            0
        };
        let occ = r.read_varint("diff occupants")?;
        let occupants = u16::try_from(occ)
            .map_err(|_| SaveError::corrupt(format!("invalid occupants value {occ}")))?;
        diffs.push(TileDiff {
            index,
            overlay,
            level,
            district,
            occupants,
        });
    }
    Ok(diffs)
}

pub(crate) fn read_height_diffs(
    r: &mut ByteReader<'_>,
    tile_count: usize,
) -> Result<Vec<HeightDiff>, SaveError> {
    let count = check_count(r.read_varint("height diff count")?, tile_count, "height diff")?;
    let mut diffs = Vec::with_capacity(count.min(r.remaining() / MIN_HEIGHT_RECORD_SIZE));
    let mut cursor = IndexCursor::new(tile_count);
    for _ in 0..count {
        let index = cursor.advance(r.read_varint("height diff index delta")?, "height diff")?;
        let height_q = r.read_u16("height diff value")?;
        diffs.push(HeightDiff { index, height_q });
    }
    Ok(diffs)
}

// ---------------------------------------------------------------------------
// Replay
// ---------------------------------------------------------------------------

/// Apply overlay diffs, normalizing level and occupants for the new overlay.
/// Indices must already be validated against the grid size.
pub fn apply_tile_diffs(grid: &mut WorldGrid, diffs: &[TileDiff]) {
    for d in diffs {
        let tile = &mut grid.tiles[d.index as usize];
        tile.set_overlay_normalized(d.overlay, d.level, d.occupants);
        tile.district = d.district;
    }
}

/// Apply height diffs and re-derive terrain. A tile that ends up under water
/// loses its overlay.
pub fn apply_height_diffs(grid: &mut WorldGrid, diffs: &[HeightDiff], cfg: &GenerationConfig) {
    for d in diffs {
        let tile = &mut grid.tiles[d.index as usize];
        tile.height = dequantize_height(d.height_q);
        tile.terrain = terrain_from_height(tile.height, cfg);
        if tile.terrain == Terrain::Water {
            tile.clear_overlay();
        }
    }
}

// ---------------------------------------------------------------------------
// SaveBody: one variant per on-disk version, owning exactly its fields
// ---------------------------------------------------------------------------
//
// Parsing produces a `SaveBody`; `save_migrate` turns any body into the
// current in-memory model. Writing goes the other way and is what both the
// public save path (always V7) and the legacy-fixture tests use.

use std::io::{self, Write};

use simulation::{generate_world, GenerationConfig, SimConfig, Stats, Tile, WorldGrid};

use crate::byte_io::ByteReader;
use crate::diff::{
    compute_height_diffs, compute_tile_diffs, read_height_diffs, read_tile_diffs,
    write_height_diffs, write_tile_diffs, DiffEncoding, HeightDiff, TileDiff,
};
use crate::file_header::SaveHeader;
use crate::integrity::CrcWriter;
use crate::save_codec::{
    read_district_policies, read_generation_config, read_sim_config, read_stats, read_tile_v1,
    write_district_policies, write_generation_config, write_sim_config, write_stats,
    write_tile_v1, V1_TILE_SIZE,
};
use crate::save_error::SaveError;
use crate::save_version::SaveVersion;

/// v1: every tile in full.
#[derive(Debug, Clone, PartialEq)]
pub struct FullTileBody {
    pub stats: Stats,
    pub tiles: Vec<Tile>,
}

/// v2..v4: overlay diffs only.
#[derive(Debug, Clone, PartialEq)]
pub struct DiffBody {
    pub generation: GenerationConfig,
    pub stats: Stats,
    pub tile_diffs: Vec<TileDiff>,
}

/// v5: overlay and height diffs.
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainDiffBody {
    pub generation: GenerationConfig,
    pub stats: Stats,
    pub tile_diffs: Vec<TileDiff>,
    pub height_diffs: Vec<HeightDiff>,
}

/// v6 and v7: diffs plus the simulation config. Only v7 carries district
/// ids and policies; a v6 body holds default policies.
#[derive(Debug, Clone, PartialEq)]
pub struct SimDiffBody {
    pub generation: GenerationConfig,
    pub stats: Stats,
    pub sim: SimConfig,
    pub tile_diffs: Vec<TileDiff>,
    pub height_diffs: Vec<HeightDiff>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SaveBody {
    V1(FullTileBody),
    V2(DiffBody),
    V3(DiffBody),
    V4(DiffBody),
    V5(TerrainDiffBody),
    V6(SimDiffBody),
    V7(SimDiffBody),
}

impl SaveBody {
    pub fn version(&self) -> SaveVersion {
        match self {
            SaveBody::V1(_) => SaveVersion::V1,
            SaveBody::V2(_) => SaveVersion::V2,
            SaveBody::V3(_) => SaveVersion::V3,
            SaveBody::V4(_) => SaveVersion::V4,
            SaveBody::V5(_) => SaveVersion::V5,
            SaveBody::V6(_) => SaveVersion::V6,
            SaveBody::V7(_) => SaveVersion::V7,
        }
    }

    /// Build the body `version` would store for `world`. Diff versions
    /// compare against the baseline regenerated from `generation`.
    pub(crate) fn from_world(
        version: SaveVersion,
        world: &WorldGrid,
        generation: &GenerationConfig,
        sim: &SimConfig,
    ) -> Self {
        let generation = *generation;
        let stats = world.stats;
        let base = || generate_world(world.width, world.height, world.seed, &generation);
        let diff_body = || DiffBody {
            generation,
            stats,
            tile_diffs: compute_tile_diffs(world, &base()),
        };
        let sim_body = |sim: SimConfig| {
            let base = base();
            SimDiffBody {
                generation,
                stats,
                sim,
                tile_diffs: compute_tile_diffs(world, &base),
                height_diffs: compute_height_diffs(world, &base),
            }
        };

        match version {
            SaveVersion::V1 => SaveBody::V1(FullTileBody {
                stats,
                tiles: world.tiles.clone(),
            }),
            SaveVersion::V2 => SaveBody::V2(diff_body()),
            SaveVersion::V3 => SaveBody::V3(diff_body()),
            SaveVersion::V4 => SaveBody::V4(diff_body()),
            SaveVersion::V5 => {
                let base = base();
                SaveBody::V5(TerrainDiffBody {
                    generation,
                    stats,
                    tile_diffs: compute_tile_diffs(world, &base),
                    height_diffs: compute_height_diffs(world, &base),
                })
            }
            SaveVersion::V6 => SaveBody::V6(sim_body(SimConfig {
                district_policies_enabled: false,
                district_policies: SimConfig::default().district_policies,
                ..sim.clone()
            })),
            SaveVersion::V7 => SaveBody::V7(sim_body(sim.clone())),
        }
    }

    // -----------------------------------------------------------------------
    // Writing
    // -----------------------------------------------------------------------

    fn write_fields<W: Write>(&self, w: &mut W) -> io::Result<()> {
        match self {
            SaveBody::V1(b) => {
                write_stats(w, &b.stats)?;
                for t in &b.tiles {
                    write_tile_v1(w, t)?;
                }
                Ok(())
            }
            SaveBody::V2(b) | SaveBody::V3(b) => {
                write_generation_config(w, &b.generation)?;
                write_stats(w, &b.stats)?;
                write_tile_diffs(w, &b.tile_diffs, DiffEncoding::Fixed)
            }
            SaveBody::V4(b) => {
                write_generation_config(w, &b.generation)?;
                write_stats(w, &b.stats)?;
                write_tile_diffs(w, &b.tile_diffs, DiffEncoding::Varint)
            }
            SaveBody::V5(b) => {
                write_generation_config(w, &b.generation)?;
                write_stats(w, &b.stats)?;
                write_tile_diffs(w, &b.tile_diffs, DiffEncoding::Varint)?;
                write_height_diffs(w, &b.height_diffs)
            }
            SaveBody::V6(b) => {
                write_generation_config(w, &b.generation)?;
                write_stats(w, &b.stats)?;
                write_sim_config(w, &b.sim)?;
                write_tile_diffs(w, &b.tile_diffs, DiffEncoding::Varint)?;
                write_height_diffs(w, &b.height_diffs)
            }
            SaveBody::V7(b) => {
                write_generation_config(w, &b.generation)?;
                write_stats(w, &b.stats)?;
                write_sim_config(w, &b.sim)?;
                write_district_policies(w, &b.sim)?;
                write_tile_diffs(w, &b.tile_diffs, DiffEncoding::District)?;
                write_height_diffs(w, &b.height_diffs)
            }
        }
    }

    /// Serialize header + body (+ CRC for checksummed versions).
    pub(crate) fn encode(&self, width: u32, height: u32, seed: u64) -> io::Result<Vec<u8>> {
        let version = self.version();
        let header = SaveHeader {
            version: version.as_u32(),
            width,
            height,
            seed,
        };
        let mut w = CrcWriter::new(Vec::new());
        header.write(&mut w)?;
        self.write_fields(&mut w)?;
        if version.has_checksum() {
            Ok(w.finish()?.0)
        } else {
            Ok(w.into_inner())
        }
    }

    // -----------------------------------------------------------------------
    // Parsing
    // -----------------------------------------------------------------------

    /// Parse the body that follows `header`. `r` must stop before any
    /// trailing checksum.
    pub(crate) fn parse(
        version: SaveVersion,
        header: &SaveHeader,
        r: &mut ByteReader<'_>,
    ) -> Result<Self, SaveError> {
        let tile_count = header.tile_count();

        match version {
            SaveVersion::V1 => {
                let stats = read_stats(r)?;
                if r.remaining() / V1_TILE_SIZE < tile_count {
                    return Err(SaveError::Truncated("tiles"));
                }
                let mut tiles = Vec::with_capacity(tile_count);
                for _ in 0..tile_count {
                    tiles.push(read_tile_v1(r)?);
                }
                Ok(SaveBody::V1(FullTileBody { stats, tiles }))
            }
            SaveVersion::V2 | SaveVersion::V3 | SaveVersion::V4 => {
                let encoding = if version.uses_varint_diffs() {
                    DiffEncoding::Varint
                } else {
                    DiffEncoding::Fixed
                };
                let body = DiffBody {
                    generation: read_generation_config(r)?,
                    stats: read_stats(r)?,
                    tile_diffs: read_tile_diffs(r, encoding, tile_count)?,
                };
                Ok(match version {
                    SaveVersion::V2 => SaveBody::V2(body),
                    SaveVersion::V3 => SaveBody::V3(body),
                    _ => SaveBody::V4(body),
                })
            }
            SaveVersion::V5 => Ok(SaveBody::V5(TerrainDiffBody {
                generation: read_generation_config(r)?,
                stats: read_stats(r)?,
                tile_diffs: read_tile_diffs(r, DiffEncoding::Varint, tile_count)?,
                height_diffs: read_height_diffs(r, tile_count)?,
            })),
            SaveVersion::V6 => Ok(SaveBody::V6(SimDiffBody {
                generation: read_generation_config(r)?,
                stats: read_stats(r)?,
                sim: read_sim_config(r)?,
                tile_diffs: read_tile_diffs(r, DiffEncoding::Varint, tile_count)?,
                height_diffs: read_height_diffs(r, tile_count)?,
            })),
            SaveVersion::V7 => {
                let generation = read_generation_config(r)?;
                let stats = read_stats(r)?;
                let mut sim = read_sim_config(r)?;
                let (enabled, policies) = read_district_policies(r)?;
                sim.district_policies_enabled = enabled;
                sim.district_policies = policies;
                Ok(SaveBody::V7(SimDiffBody {
                    generation,
                    stats,
                    sim,
                    tile_diffs: read_tile_diffs(r, DiffEncoding::District, tile_count)?,
                    height_diffs: read_height_diffs(r, tile_count)?,
                }))
            }
        }
    }
}

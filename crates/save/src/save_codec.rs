// ---------------------------------------------------------------------------
// Fixed-width record codecs: Stats, GenerationConfig, SimConfig, policies,
// full v1 tiles
// ---------------------------------------------------------------------------
//
// Field order and widths match the packed little-endian records of the file
// format. Sizes are asserted in tests.

use std::io::{self, Write};

use simulation::config::DISTRICT_COUNT;
use simulation::{DistrictPolicy, GenerationConfig, Overlay, SimConfig, Stats, Terrain, Tile};

use crate::byte_io::{ByteReader, WriteLe};
use crate::save_error::SaveError;

pub const STATS_SIZE: usize = 36;
pub const GENERATION_CONFIG_SIZE: usize = 28;
pub const SIM_CONFIG_SIZE: usize = 48;
pub const DISTRICT_POLICY_SIZE: usize = 20;
pub const V1_TILE_SIZE: usize = 10;

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

pub(crate) fn write_stats<W: Write>(w: &mut W, s: &Stats) -> io::Result<()> {
    w.write_i32(s.day)?;
    w.write_i32(s.population)?;
    w.write_i32(s.housing_capacity)?;
    w.write_i32(s.jobs_capacity)?;
    w.write_i32(s.employed)?;
    w.write_f32(s.happiness)?;
    w.write_i32(s.money)?;
    w.write_i32(s.roads)?;
    w.write_i32(s.parks)
}

pub(crate) fn read_stats(r: &mut ByteReader<'_>) -> Result<Stats, SaveError> {
    const WHAT: &str = "stats";
    Ok(Stats {
        day: r.read_i32(WHAT)?,
        population: r.read_i32(WHAT)?,
        housing_capacity: r.read_i32(WHAT)?,
        jobs_capacity: r.read_i32(WHAT)?,
        employed: r.read_i32(WHAT)?,
        happiness: r.read_f32(WHAT)?,
        money: r.read_i32(WHAT)?,
        roads: r.read_i32(WHAT)?,
        parks: r.read_i32(WHAT)?,
    })
}

// ---------------------------------------------------------------------------
// GenerationConfig
// ---------------------------------------------------------------------------

pub(crate) fn write_generation_config<W: Write>(
    w: &mut W,
    c: &GenerationConfig,
) -> io::Result<()> {
    w.write_f32(c.terrain_scale)?;
    w.write_f32(c.water_level)?;
    w.write_f32(c.sand_level)?;
    w.write_i32(c.hubs)?;
    w.write_i32(c.extra_connections)?;
    w.write_f32(c.zone_chance)?;
    w.write_f32(c.park_chance)
}

pub(crate) fn read_generation_config(
    r: &mut ByteReader<'_>,
) -> Result<GenerationConfig, SaveError> {
    const WHAT: &str = "generation config";
    Ok(GenerationConfig {
        terrain_scale: r.read_f32(WHAT)?,
        water_level: r.read_f32(WHAT)?,
        sand_level: r.read_f32(WHAT)?,
        hubs: r.read_i32(WHAT)?,
        extra_connections: r.read_i32(WHAT)?,
        zone_chance: r.read_f32(WHAT)?,
        park_chance: r.read_f32(WHAT)?,
    })
}

// ---------------------------------------------------------------------------
// SimConfig (without policies) and district policies
// ---------------------------------------------------------------------------

pub(crate) fn write_sim_config<W: Write>(w: &mut W, c: &SimConfig) -> io::Result<()> {
    w.write_f32(c.tick_seconds)?;
    w.write_i32(c.park_influence_radius)?;
    w.write_u8(u8::from(c.require_outside_connection))?;
    w.write_all(&[0u8; 3])?;
    w.write_i32(c.tax_residential)?;
    w.write_i32(c.tax_commercial)?;
    w.write_i32(c.tax_industrial)?;
    w.write_i32(c.maintenance_road)?;
    w.write_i32(c.maintenance_park)?;
    w.write_f32(c.tax_happiness_per_capita)?;
    w.write_f32(c.residential_desirability_weight)?;
    w.write_f32(c.commercial_desirability_weight)?;
    w.write_f32(c.industrial_desirability_weight)
}

/// Reads the 48-byte record. District policy fields keep their defaults; v7
/// bodies overwrite them from the policy block that follows.
pub(crate) fn read_sim_config(r: &mut ByteReader<'_>) -> Result<SimConfig, SaveError> {
    const WHAT: &str = "sim config";
    let tick_seconds = r.read_f32(WHAT)?;
    let park_influence_radius = r.read_i32(WHAT)?;
    let require_outside_connection = r.read_u8(WHAT)? != 0;
    r.take(3, WHAT)?;
    Ok(SimConfig {
        tick_seconds,
        park_influence_radius,
        require_outside_connection,
        tax_residential: r.read_i32(WHAT)?,
        tax_commercial: r.read_i32(WHAT)?,
        tax_industrial: r.read_i32(WHAT)?,
        maintenance_road: r.read_i32(WHAT)?,
        maintenance_park: r.read_i32(WHAT)?,
        tax_happiness_per_capita: r.read_f32(WHAT)?,
        residential_desirability_weight: r.read_f32(WHAT)?,
        commercial_desirability_weight: r.read_f32(WHAT)?,
        industrial_desirability_weight: r.read_f32(WHAT)?,
        ..SimConfig::default()
    })
}

pub(crate) fn write_district_policies<W: Write>(w: &mut W, c: &SimConfig) -> io::Result<()> {
    w.write_u8(u8::from(c.district_policies_enabled))?;
    for p in &c.district_policies {
        w.write_f32(p.tax_residential_mult)?;
        w.write_f32(p.tax_commercial_mult)?;
        w.write_f32(p.tax_industrial_mult)?;
        w.write_f32(p.road_maintenance_mult)?;
        w.write_f32(p.park_maintenance_mult)?;
    }
    Ok(())
}

pub(crate) fn read_district_policies(
    r: &mut ByteReader<'_>,
) -> Result<(bool, [DistrictPolicy; DISTRICT_COUNT]), SaveError> {
    const WHAT: &str = "district policies";
    let enabled = r.read_u8(WHAT)? != 0;
    let mut policies = [DistrictPolicy::default(); DISTRICT_COUNT];
    for p in &mut policies {
        *p = DistrictPolicy {
            tax_residential_mult: r.read_f32(WHAT)?,
            tax_commercial_mult: r.read_f32(WHAT)?,
            tax_industrial_mult: r.read_f32(WHAT)?,
            road_maintenance_mult: r.read_f32(WHAT)?,
            park_maintenance_mult: r.read_f32(WHAT)?,
        };
    }
    Ok((enabled, policies))
}

// ---------------------------------------------------------------------------
// v1 full tiles
// ---------------------------------------------------------------------------

pub(crate) fn write_tile_v1<W: Write>(w: &mut W, t: &Tile) -> io::Result<()> {
    w.write_u8(t.terrain as u8)?;
    w.write_u8(t.overlay as u8)?;
    w.write_f32(t.height)?;
    w.write_u8(t.variation)?;
    w.write_u8(t.level)?;
    w.write_u16(t.occupants)
}

pub(crate) fn read_tile_v1(r: &mut ByteReader<'_>) -> Result<Tile, SaveError> {
    const WHAT: &str = "tiles";
    let terrain_u8 = r.read_u8(WHAT)?;
    let overlay_u8 = r.read_u8(WHAT)?;
    let height = r.read_f32(WHAT)?;
    let variation = r.read_u8(WHAT)?;
    let level = r.read_u8(WHAT)?;
    let occupants = r.read_u16(WHAT)?;

    let terrain = Terrain::from_u8(terrain_u8)
        .ok_or_else(|| SaveError::corrupt(format!("invalid terrain value {terrain_u8}")))?;
    let overlay = Overlay::from_u8(overlay_u8)
        .ok_or_else(|| SaveError::corrupt(format!("invalid overlay value {overlay_u8}")))?;

    Ok(Tile {
        terrain,
        overlay,
        height,
        variation,
        level,
        occupants,
        district: 0,
    })
}

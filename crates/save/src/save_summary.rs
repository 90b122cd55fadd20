//! Cheap inspection of a save file without materializing tiles.
//!
//! Only the fixed-size prefix (header, configs, stats, policies) is read.
//! The optional CRC check streams the file instead of buffering it, and its
//! result is reported in the summary rather than failing the call, so tools
//! can still show what a damaged file claims to contain.

use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use serde::{Deserialize, Serialize};
use simulation::config::DISTRICT_COUNT;
use simulation::{GenerationConfig, SimConfig, Stats};

use crate::byte_io::ByteReader;
use crate::crc32::crc32_reader;
use crate::file_header::{SaveHeader, HEADER_SIZE};
use crate::integrity::CRC_SIZE;
use crate::save_codec::{
    read_district_policies, read_generation_config, read_sim_config, read_stats,
    DISTRICT_POLICY_SIZE, GENERATION_CONFIG_SIZE, SIM_CONFIG_SIZE, STATS_SIZE,
};
use crate::save_error::SaveError;
use crate::save_version::SaveVersion;

/// Longest prefix any supported version needs for its summary.
const MAX_PREFIX: usize = HEADER_SIZE
    + GENERATION_CONFIG_SIZE
    + STATS_SIZE
    + SIM_CONFIG_SIZE
    + 1
    + DISTRICT_COUNT * DISTRICT_POLICY_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrcStatus {
    /// Version has no checksum, or verification was not requested.
    NotChecked,
    Valid,
    Mismatch { stored: u32, computed: u32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveSummary {
    pub version: SaveVersion,
    pub width: u32,
    pub height: u32,
    pub seed: u64,
    /// `None` for v1, which predates stored generation configs.
    pub generation: Option<GenerationConfig>,
    pub stats: Stats,
    /// Present from v6 on; district policies only from v7.
    pub sim: Option<SimConfig>,
    pub crc: CrcStatus,
}

impl SaveSummary {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

fn summarize_prefix(prefix: &[u8]) -> Result<SaveSummary, SaveError> {
    let mut r = ByteReader::new(prefix);
    let header = SaveHeader::read(&mut r)?;
    let version = SaveVersion::from_u32(header.version)?;

    let generation = if version.has_generation_config() {
        Some(read_generation_config(&mut r)?)
    } else {
        None
    };
    let stats = read_stats(&mut r)?;
    let sim = if version.has_sim_config() {
        let mut sim = read_sim_config(&mut r)?;
        if version.has_districts() {
            let (enabled, policies) = read_district_policies(&mut r)?;
            sim.district_policies_enabled = enabled;
            sim.district_policies = policies;
        }
        Some(sim.clamped())
    } else {
        None
    };

    Ok(SaveSummary {
        version,
        width: header.width,
        height: header.height,
        seed: header.seed,
        generation,
        stats,
        sim,
        crc: CrcStatus::NotChecked,
    })
}

fn check_file_crc(file: &mut File) -> Result<CrcStatus, SaveError> {
    let len = file.metadata()?.len();
    if len < (HEADER_SIZE + CRC_SIZE) as u64 {
        return Err(SaveError::Truncated("checksum"));
    }
    file.rewind()?;
    let (computed, _) = crc32_reader(file.by_ref().take(len - CRC_SIZE as u64))?;
    let mut tail = [0u8; CRC_SIZE];
    file.read_exact(&mut tail)?;
    let stored = u32::from_le_bytes(tail);
    Ok(if stored == computed {
        CrcStatus::Valid
    } else {
        CrcStatus::Mismatch { stored, computed }
    })
}

/// Read header, configs and stats of the save at `path`.
///
/// With `verify_crc`, checksummed versions are hashed in full and the outcome
/// is reported in [`SaveSummary::crc`].
pub fn read_save_summary(
    path: impl AsRef<Path>,
    verify_crc: bool,
) -> Result<SaveSummary, SaveError> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Err(SaveError::EmptyPath);
    }

    let mut file = File::open(path)?;
    let mut prefix = Vec::with_capacity(MAX_PREFIX);
    file.by_ref().take(MAX_PREFIX as u64).read_to_end(&mut prefix)?;

    let mut summary = summarize_prefix(&prefix)?;
    if verify_crc && summary.version.has_checksum() {
        summary.crc = check_file_crc(&mut file)?;
    }
    Ok(summary)
}

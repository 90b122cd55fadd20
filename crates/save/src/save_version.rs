// ---------------------------------------------------------------------------
// Save file versions
// ---------------------------------------------------------------------------
//
// v1 = stats + every tile written in full, no checksum
// v2 = generation config + stats + fixed-width overlay diffs vs the baseline
// v3 = v2 + trailing CRC32
// v4 = varint/delta-encoded overlay diffs
// v5 = v4 + quantized height diffs
// v6 = v5 + SimConfig
// v7 = v6 + district policies and per-tile district ids

use serde::{Deserialize, Serialize};

use crate::save_error::SaveError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SaveVersion {
    V1 = 1,
    V2 = 2,
    V3 = 3,
    V4 = 4,
    V5 = 5,
    V6 = 6,
    V7 = 7,
}

impl SaveVersion {
    /// Version written by this build.
    pub const CURRENT: SaveVersion = SaveVersion::V7;

    pub const ALL: [SaveVersion; 7] = [
        SaveVersion::V1,
        SaveVersion::V2,
        SaveVersion::V3,
        SaveVersion::V4,
        SaveVersion::V5,
        SaveVersion::V6,
        SaveVersion::V7,
    ];

    pub fn from_u32(v: u32) -> Result<Self, SaveError> {
        match v {
            1 => Ok(SaveVersion::V1),
            2 => Ok(SaveVersion::V2),
            3 => Ok(SaveVersion::V3),
            4 => Ok(SaveVersion::V4),
            5 => Ok(SaveVersion::V5),
            6 => Ok(SaveVersion::V6),
            7 => Ok(SaveVersion::V7),
            other => Err(SaveError::UnsupportedVersion(other)),
        }
    }

    pub fn as_u32(self) -> u32 {
        self as u32
    }

    pub fn has_checksum(self) -> bool {
        self >= SaveVersion::V3
    }

    pub fn has_generation_config(self) -> bool {
        self >= SaveVersion::V2
    }

    pub fn uses_varint_diffs(self) -> bool {
        self >= SaveVersion::V4
    }

    pub fn has_height_diffs(self) -> bool {
        self >= SaveVersion::V5
    }

    pub fn has_sim_config(self) -> bool {
        self >= SaveVersion::V6
    }

    pub fn has_districts(self) -> bool {
        self >= SaveVersion::V7
    }

    pub fn description(self) -> &'static str {
        match self {
            SaveVersion::V1 => "full tile dump",
            SaveVersion::V2 => "overlay diffs against regenerated baseline",
            SaveVersion::V3 => "overlay diffs with CRC32",
            SaveVersion::V4 => "varint delta-encoded overlay diffs",
            SaveVersion::V5 => "height diffs",
            SaveVersion::V6 => "simulation config",
            SaveVersion::V7 => "districts and district policies",
        }
    }
}

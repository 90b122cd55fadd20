// ---------------------------------------------------------------------------
// file_header – magic, version, dimensions and seed
// ---------------------------------------------------------------------------
//
// Header format (28 bytes, fixed-size, little-endian):
//   [0..8]   Magic bytes: "ISOCITY\0"
//   [8..12]  Save version (u32)
//   [12..16] Width in tiles (u32)
//   [16..20] Height in tiles (u32)
//   [20..28] World seed (u64)
//
// Validation order: magic -> dimensions -> width*height overflow. The version
// number is range checked by the caller through `SaveVersion::from_u32`.

use std::io::{self, Write};

use simulation::config::MAX_WORLD_DIMENSION;

use crate::byte_io::{ByteReader, WriteLe};
use crate::save_error::SaveError;

/// Magic bytes identifying an isocity save file.
pub const MAGIC: [u8; 8] = *b"ISOCITY\0";

/// Size of the file header in bytes.
pub const HEADER_SIZE: usize = 28;

/// Parsed file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveHeader {
    pub version: u32,
    pub width: u32,
    pub height: u32,
    pub seed: u64,
}

impl SaveHeader {
    /// Number of tiles the header describes. Only meaningful after
    /// `validate` succeeded.
    pub fn tile_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub(crate) fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&MAGIC)?;
        w.write_u32(self.version)?;
        w.write_u32(self.width)?;
        w.write_u32(self.height)?;
        w.write_u64(self.seed)
    }

    pub(crate) fn read(r: &mut ByteReader<'_>) -> Result<Self, SaveError> {
        let magic = r.take(MAGIC.len(), "magic")?;
        if magic != MAGIC {
            return Err(SaveError::BadMagic);
        }
        let header = SaveHeader {
            version: r.read_u32("version")?,
            width: r.read_u32("width")?,
            height: r.read_u32("height")?,
            seed: r.read_u64("seed")?,
        };
        header.validate()?;
        Ok(header)
    }

    fn validate(&self) -> Result<(), SaveError> {
        let (width, height) = (self.width, self.height);
        if width == 0 || height == 0 || width > MAX_WORLD_DIMENSION || height > MAX_WORLD_DIMENSION
        {
            return Err(SaveError::InvalidDimensions { width, height });
        }
        if (width as usize).checked_mul(height as usize).is_none() {
            return Err(SaveError::DimensionOverflow { width, height });
        }
        Ok(())
    }
}

/// Parse and validate the header at the front of `bytes`.
pub fn parse_header(bytes: &[u8]) -> Result<SaveHeader, SaveError> {
    SaveHeader::read(&mut ByteReader::new(bytes))
}

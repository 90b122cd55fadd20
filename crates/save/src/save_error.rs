// ---------------------------------------------------------------------------
// SaveError: typed errors for save/load operations
// ---------------------------------------------------------------------------

use std::fmt;

/// Errors that can occur during save/load operations.
///
/// Every failure aborts the whole operation: a load that returns an error
/// never hands back a partially restored world.
#[derive(Debug)]
pub enum SaveError {
    /// I/O error (file not found, permission denied, disk full, etc.)
    Io(std::io::Error),
    /// The file does not start with the `ISOCITY\0` magic.
    BadMagic,
    /// Version 0, or newer than this build understands.
    UnsupportedVersion(u32),
    /// Width or height is zero or above the supported maximum.
    InvalidDimensions { width: u32, height: u32 },
    /// `width * height` does not fit in memory addressing on this target.
    DimensionOverflow { width: u32, height: u32 },
    /// Trailing CRC32 disagrees with the bytes before it.
    ChecksumMismatch { stored: u32, computed: u32 },
    /// Input ended while reading the named field.
    Truncated(&'static str),
    /// Well-framed but semantically invalid data (bad enum, index out of
    /// range, non-increasing diff list, ...).
    Corrupt(String),
    /// A varint ran past five bytes or overflowed 32 bits.
    MalformedVarint,
    /// Save or load was called with an empty path.
    EmptyPath,
    /// Load was called with an empty byte buffer.
    EmptyBuffer,
}

impl SaveError {
    pub(crate) fn corrupt(msg: impl Into<String>) -> Self {
        SaveError::Corrupt(msg.into())
    }
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveError::Io(e) => write!(f, "I/O error: {e}"),
            SaveError::BadMagic => write!(f, "Not an isocity save file (bad magic)"),
            SaveError::UnsupportedVersion(v) => {
                write!(f, "Unsupported save version: v{v}")
            }
            SaveError::InvalidDimensions { width, height } => {
                write!(f, "Invalid world dimensions: {width}x{height}")
            }
            SaveError::DimensionOverflow { width, height } => {
                write!(f, "World dimensions overflow: {width}x{height}")
            }
            SaveError::ChecksumMismatch { stored, computed } => write!(
                f,
                "Save file is corrupted: CRC32 mismatch (stored {stored:#010X}, computed {computed:#010X})"
            ),
            SaveError::Truncated(what) => write!(f, "Save file is truncated (reading {what})"),
            SaveError::Corrupt(msg) => write!(f, "Save file is corrupt: {msg}"),
            SaveError::MalformedVarint => write!(f, "Malformed varint in save file"),
            SaveError::EmptyPath => write!(f, "Save path is empty"),
            SaveError::EmptyBuffer => write!(f, "Save buffer is empty"),
        }
    }
}

impl std::error::Error for SaveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SaveError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SaveError {
    fn from(e: std::io::Error) -> Self {
        SaveError::Io(e)
    }
}

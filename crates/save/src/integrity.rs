// ---------------------------------------------------------------------------
// integrity – running CRC on write, verify-before-parse on read
// ---------------------------------------------------------------------------
//
// Checksummed files (v3+) end with a little-endian u32 CRC32 of every byte
// before it, header included.

use std::io::{self, Write};

use crate::crc32::{crc32, Crc32};
use crate::save_error::SaveError;

/// Size of the trailing checksum.
pub const CRC_SIZE: usize = 4;

/// Writer adapter that hashes every byte passed through it.
pub(crate) struct CrcWriter<W: Write> {
    inner: W,
    crc: Crc32,
}

impl<W: Write> CrcWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            crc: Crc32::new(),
        }
    }

    /// Append the checksum of everything written so far and return the inner
    /// writer together with that checksum.
    pub fn finish(mut self) -> io::Result<(W, u32)> {
        let crc = self.crc.finalize();
        self.inner.write_all(&crc.to_le_bytes())?;
        Ok((self.inner, crc))
    }

    /// Return the inner writer without appending a checksum (v1/v2 files).
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for CrcWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.crc.update(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Split a checksummed buffer into its payload and verify the trailing CRC.
///
/// `min_payload` is the number of bytes that must precede the checksum (the
/// header); anything shorter is reported as truncated.
pub(crate) fn verify_trailing_crc(bytes: &[u8], min_payload: usize) -> Result<&[u8], SaveError> {
    if bytes.len() < min_payload + CRC_SIZE {
        return Err(SaveError::Truncated("checksum"));
    }
    let (payload, tail) = bytes.split_at(bytes.len() - CRC_SIZE);
    let stored = u32::from_le_bytes([tail[0], tail[1], tail[2], tail[3]]);
    let computed = crc32(payload);
    if stored != computed {
        return Err(SaveError::ChecksumMismatch { stored, computed });
    }
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checksummed(payload: &[u8]) -> Vec<u8> {
        let mut w = CrcWriter::new(Vec::new());
        w.write_all(payload).unwrap();
        w.finish().unwrap().0
    }

    #[test]
    fn test_writer_appends_crc_of_payload() {
        let out = checksummed(b"123456789");
        assert_eq!(out.len(), 9 + CRC_SIZE);
        assert_eq!(&out[9..], &0xCBF4_3926u32.to_le_bytes());
    }

    #[test]
    fn test_verify_accepts_valid() {
        let out = checksummed(b"hello world");
        let payload = verify_trailing_crc(&out, 0).unwrap();
        assert_eq!(payload, b"hello world");
    }

    #[test]
    fn test_verify_detects_every_single_byte_flip() {
        let out = checksummed(b"some payload bytes");
        for i in 0..out.len() {
            let mut bad = out.clone();
            bad[i] ^= 0x01;
            let err = verify_trailing_crc(&bad, 0).unwrap_err();
            assert!(
                matches!(err, SaveError::ChecksumMismatch { .. }),
                "flip at {i}: {err}"
            );
        }
    }

    #[test]
    fn test_verify_short_buffer_is_truncated() {
        let err = verify_trailing_crc(&[1, 2, 3], 0).unwrap_err();
        assert!(matches!(err, SaveError::Truncated(_)), "got: {err}");
        let err = verify_trailing_crc(&[0; 10], 8).unwrap_err();
        assert!(matches!(err, SaveError::Truncated(_)), "got: {err}");
    }

    #[test]
    fn test_into_inner_has_no_crc() {
        let mut w = CrcWriter::new(Vec::new());
        w.write_all(b"abc").unwrap();
        assert_eq!(w.into_inner(), b"abc");
    }
}

// ---------------------------------------------------------------------------
// crc32 – reflected CRC-32 (IEEE 802.3, poly 0xEDB88320)
// ---------------------------------------------------------------------------
//
// The lookup table is built at compile time, so there is no lazy init and no
// first-use race. Output matches zlib's crc32 and the `crc32fast` crate.

use std::io::{self, Read};

const POLY: u32 = 0xEDB8_8320;

/// Chunk size used when hashing a stream.
pub const STREAM_CHUNK: usize = 64 * 1024;

const fn build_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    let mut i = 0;
    while i < 256 {
        let mut c = i as u32;
        let mut k = 0;
        while k < 8 {
            c = if c & 1 != 0 { POLY ^ (c >> 1) } else { c >> 1 };
            k += 1;
        }
        table[i] = c;
        i += 1;
    }
    table
}

static TABLE: [u32; 256] = build_table();

/// Fold `bytes` into a raw (non-finalized) CRC state.
pub fn crc32_update(mut state: u32, bytes: &[u8]) -> u32 {
    for &b in bytes {
        state = TABLE[((state ^ b as u32) & 0xFF) as usize] ^ (state >> 8);
    }
    state
}

/// Incremental CRC32 hasher.
#[derive(Debug, Clone, Copy)]
pub struct Crc32 {
    state: u32,
}

impl Default for Crc32 {
    fn default() -> Self {
        Self::new()
    }
}

impl Crc32 {
    pub fn new() -> Self {
        Self { state: 0xFFFF_FFFF }
    }

    pub fn update(&mut self, bytes: &[u8]) {
        self.state = crc32_update(self.state, bytes);
    }

    pub fn finalize(self) -> u32 {
        self.state ^ 0xFFFF_FFFF
    }
}

/// One-shot CRC32 of `bytes`.
pub fn crc32(bytes: &[u8]) -> u32 {
    let mut h = Crc32::new();
    h.update(bytes);
    h.finalize()
}

/// CRC32 of everything `reader` yields, read in [`STREAM_CHUNK`] pieces.
/// Returns the checksum and the number of bytes hashed.
pub fn crc32_reader<R: Read>(mut reader: R) -> io::Result<(u32, u64)> {
    let mut h = Crc32::new();
    let mut buf = vec![0u8; STREAM_CHUNK];
    let mut total = 0u64;
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        h.update(&buf[..n]);
        total += n as u64;
    }
    Ok((h.finalize(), total))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_vector() {
        assert_eq!(crc32(b"123456789"), 0xCBF4_3926);
        assert_eq!(crc32(b""), 0);
    }

    #[test]
    fn test_table_entries() {
        assert_eq!(TABLE[0], 0);
        assert_eq!(TABLE[1], 0x7707_3096);
        assert_eq!(TABLE[255], 0x2D02_EF8D);
    }

    #[test]
    fn test_incremental_matches_one_shot() {
        let data: Vec<u8> = (0..10_000u32).map(|i| (i * 31 % 251) as u8).collect();
        let mut h = Crc32::new();
        for chunk in data.chunks(77) {
            h.update(chunk);
        }
        assert_eq!(h.finalize(), crc32(&data));
    }

    #[test]
    fn test_matches_crc32fast() {
        let data: Vec<u8> = (0..200_000u32).map(|i| (i ^ (i >> 7)) as u8).collect();
        for len in [0, 1, 3, 64, 1000, data.len()] {
            assert_eq!(
                crc32(&data[..len]),
                crc32fast::hash(&data[..len]),
                "mismatch at len {len}"
            );
        }
    }

    #[test]
    fn test_reader_spans_chunks() {
        let data = vec![0x5Au8; STREAM_CHUNK * 2 + 123];
        let (crc, n) = crc32_reader(&data[..]).unwrap();
        assert_eq!(n, data.len() as u64);
        assert_eq!(crc, crc32(&data));
    }
}

// ---------------------------------------------------------------------------
// varint – unsigned LEB128 for u32 (1..=5 bytes)
// ---------------------------------------------------------------------------
//
// Seven payload bits per byte, least significant group first. The high bit
// is set on every byte except the last.

use std::io::{self, Write};

use crate::save_error::SaveError;

/// Longest encoding of a u32.
pub const MAX_VARINT_BYTES: usize = 5;

/// Encode `value` into a stack buffer, returning the buffer and used length.
pub fn encode_varint(mut value: u32) -> ([u8; MAX_VARINT_BYTES], usize) {
    let mut buf = [0u8; MAX_VARINT_BYTES];
    let mut n = 0;
    while value >= 0x80 {
        buf[n] = (value & 0x7F) as u8 | 0x80;
        value >>= 7;
        n += 1;
    }
    buf[n] = value as u8;
    (buf, n + 1)
}

pub fn write_varint<W: Write + ?Sized>(w: &mut W, value: u32) -> io::Result<()> {
    let (buf, len) = encode_varint(value);
    w.write_all(&buf[..len])
}

/// Number of bytes `value` occupies once encoded.
pub fn varint_len(value: u32) -> usize {
    encode_varint(value).1
}

/// Decode a varint from the front of `bytes`, returning `(value, consumed)`.
///
/// Returns `Truncated` if the input ends mid-varint and `MalformedVarint` if
/// the fifth byte still has its continuation bit set or carries bits above
/// the 32nd.
pub fn decode_varint(bytes: &[u8]) -> Result<(u32, usize), SaveError> {
    let mut result: u32 = 0;
    for i in 0..MAX_VARINT_BYTES {
        let Some(&byte) = bytes.get(i) else {
            return Err(SaveError::Truncated("varint"));
        };
        let payload = (byte & 0x7F) as u32;
        if i == MAX_VARINT_BYTES - 1 && (byte & 0x80 != 0 || payload > 0x0F) {
            return Err(SaveError::MalformedVarint);
        }
        result |= payload << (7 * i);
        if byte & 0x80 == 0 {
            return Ok((result, i + 1));
        }
    }
    Err(SaveError::MalformedVarint)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(value: u32) -> usize {
        let mut buf = Vec::new();
        write_varint(&mut buf, value).unwrap();
        let (decoded, len) = decode_varint(&buf).unwrap();
        assert_eq!(decoded, value);
        assert_eq!(len, buf.len());
        len
    }

    #[test]
    fn test_varint_boundaries() {
        assert_eq!(roundtrip(0), 1);
        assert_eq!(roundtrip(127), 1);
        assert_eq!(roundtrip(128), 2);
        assert_eq!(roundtrip(16_383), 2);
        assert_eq!(roundtrip(16_384), 3);
        assert_eq!(roundtrip((1 << 21) - 1), 3);
        assert_eq!(roundtrip(1 << 21), 4);
        assert_eq!(roundtrip(1 << 28), 5);
        assert_eq!(roundtrip(u32::MAX), 5);
    }

    #[test]
    fn test_varint_known_encodings() {
        let (buf, len) = encode_varint(300);
        assert_eq!(&buf[..len], &[0xAC, 0x02]);
        let (buf, len) = encode_varint(u32::MAX);
        assert_eq!(&buf[..len], &[0xFF, 0xFF, 0xFF, 0xFF, 0x0F]);
    }

    #[test]
    fn test_varint_len_matches_encoding() {
        for v in [0, 1, 127, 128, 1 << 14, 1 << 21, 1 << 28, u32::MAX] {
            assert_eq!(varint_len(v), encode_varint(v).1);
        }
    }

    #[test]
    fn test_varint_rejects_continuation_on_fifth_byte() {
        let err = decode_varint(&[0x80, 0x80, 0x80, 0x80, 0x80, 0x01]).unwrap_err();
        assert!(matches!(err, SaveError::MalformedVarint), "got: {err}");
    }

    #[test]
    fn test_varint_rejects_overflow_bits() {
        let err = decode_varint(&[0xFF, 0xFF, 0xFF, 0xFF, 0x1F]).unwrap_err();
        assert!(matches!(err, SaveError::MalformedVarint), "got: {err}");
    }

    #[test]
    fn test_varint_truncated() {
        assert!(matches!(
            decode_varint(&[]),
            Err(SaveError::Truncated(_))
        ));
        assert!(matches!(
            decode_varint(&[0x80, 0x80]),
            Err(SaveError::Truncated(_))
        ));
    }

    #[test]
    fn test_varint_ignores_trailing_bytes() {
        let (v, len) = decode_varint(&[0x05, 0xFF, 0xFF]).unwrap();
        assert_eq!((v, len), (5, 1));
    }
}

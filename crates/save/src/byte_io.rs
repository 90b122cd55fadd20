// ---------------------------------------------------------------------------
// byte_io – little-endian primitives over byte slices and io::Write
// ---------------------------------------------------------------------------

use std::io::{self, Write};

use crate::save_error::SaveError;
use crate::varint;

/// Forward-only cursor over an in-memory save buffer. Every read names the
/// field it is reading so truncation errors say where the file ended.
pub(crate) struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn take(&mut self, n: usize, what: &'static str) -> Result<&'a [u8], SaveError> {
        if self.remaining() < n {
            return Err(SaveError::Truncated(what));
        }
        let out = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(out)
    }

    fn array<const N: usize>(&mut self, what: &'static str) -> Result<[u8; N], SaveError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N, what)?);
        Ok(out)
    }

    pub fn read_u8(&mut self, what: &'static str) -> Result<u8, SaveError> {
        Ok(self.array::<1>(what)?[0])
    }

    pub fn read_u16(&mut self, what: &'static str) -> Result<u16, SaveError> {
        Ok(u16::from_le_bytes(self.array(what)?))
    }

    pub fn read_u32(&mut self, what: &'static str) -> Result<u32, SaveError> {
        Ok(u32::from_le_bytes(self.array(what)?))
    }

    pub fn read_u64(&mut self, what: &'static str) -> Result<u64, SaveError> {
        Ok(u64::from_le_bytes(self.array(what)?))
    }

    pub fn read_i32(&mut self, what: &'static str) -> Result<i32, SaveError> {
        Ok(i32::from_le_bytes(self.array(what)?))
    }

    pub fn read_f32(&mut self, what: &'static str) -> Result<f32, SaveError> {
        Ok(f32::from_le_bytes(self.array(what)?))
    }

    pub fn read_varint(&mut self, what: &'static str) -> Result<u32, SaveError> {
        let (value, used) = match varint::decode_varint(&self.data[self.pos..]) {
            Ok(ok) => ok,
            Err(SaveError::Truncated(_)) => return Err(SaveError::Truncated(what)),
            Err(e) => return Err(e),
        };
        self.pos += used;
        Ok(value)
    }
}

/// Little-endian writers for any `io::Write`.
pub(crate) trait WriteLe: Write {
    fn write_u8(&mut self, v: u8) -> io::Result<()> {
        self.write_all(&[v])
    }

    fn write_u16(&mut self, v: u16) -> io::Result<()> {
        self.write_all(&v.to_le_bytes())
    }

    fn write_u32(&mut self, v: u32) -> io::Result<()> {
        self.write_all(&v.to_le_bytes())
    }

    fn write_u64(&mut self, v: u64) -> io::Result<()> {
        self.write_all(&v.to_le_bytes())
    }

    fn write_i32(&mut self, v: i32) -> io::Result<()> {
        self.write_all(&v.to_le_bytes())
    }

    fn write_f32(&mut self, v: f32) -> io::Result<()> {
        self.write_all(&v.to_le_bytes())
    }

    fn write_varint(&mut self, v: u32) -> io::Result<()> {
        varint::write_varint(self, v)
    }
}

impl<W: Write + ?Sized> WriteLe for W {}

use std::io::{self, Read};

/// Reads the save's fixed-width fields. The game dumps its in-memory struct
/// on x86, so every integer is little-endian.
pub struct LittleEndianReader<R> {
    inner: R,
    position: u64,
}

impl<R: Read> LittleEndianReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, position: 0 }
    }

    pub fn read_u32(&mut self) -> io::Result<u32> {
        let mut buf = [0u8; 4];
        self.inner.read_exact(&mut buf)?;
        self.position += buf.len() as u64;
        Ok(u32::from_le_bytes(buf))
    }

    pub fn read_u32_array<const N: usize>(&mut self) -> io::Result<[u32; N]> {
        let mut result = [0u32; N];
        for item in &mut result {
            *item = self.read_u32()?;
        }
        Ok(result)
    }

    pub fn position(&self) -> u64 {
        self.position
    }
}

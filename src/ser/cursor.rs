use super::error::{SerError, SerKind, SerResult};

/// Cursor over a byte slice that hands out bits most-significant first.
#[derive(Debug, Clone, Copy)]
pub struct BitReader<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> BitReader<'a> {
    /// Creates a new cursor positioned at the first bit of `bytes`.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, position: 0 }
    }

    /// Returns the number of bits consumed so far.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns the number of unread bits.
    pub fn remaining(&self) -> usize {
        (self.bytes.len() * 8).saturating_sub(self.position)
    }

    /// Reads a single bit.
    pub fn read_bit(&mut self, kind: SerKind, field: &'static str) -> SerResult<bool> {
        if self.remaining() == 0 {
            return Err(SerError::unexpected_end(kind, field));
        }
        let byte = self.bytes[self.position / 8];
        let bit = (byte >> (7 - self.position % 8)) & 1 == 1;
        self.position += 1;
        Ok(bit)
    }

    /// Reads `count` bits (at most 64) as a big-endian unsigned integer.
    pub fn read_bits(
        &mut self,
        count: usize,
        kind: SerKind,
        field: &'static str,
    ) -> SerResult<u64> {
        debug_assert!(count <= 64);
        if self.remaining() < count {
            return Err(SerError::unexpected_end(kind, field));
        }
        let mut value = 0u64;
        for _ in 0..count {
            value = (value << 1) | u64::from(self.read_bit(kind, field)?);
        }
        Ok(value)
    }

    /// Reads `N` whole bytes that may start at any bit offset.
    pub fn read_array<const N: usize>(
        &mut self,
        kind: SerKind,
        field: &'static str,
    ) -> SerResult<[u8; N]> {
        if self.remaining() < N * 8 {
            return Err(SerError::unexpected_end(kind, field));
        }
        let mut out = [0u8; N];
        let shift = self.position % 8;
        let start = self.position / 8;
        for (i, slot) in out.iter_mut().enumerate() {
            let hi = self.bytes[start + i] << shift;
            let lo = if shift == 0 {
                0
            } else {
                self.bytes[start + i + 1] >> (8 - shift)
            };
            *slot = hi | lo;
        }
        self.position += N * 8;
        Ok(out)
    }

    /// Checks that only a zero-filled partial byte remains.
    ///
    /// Whole unused bytes are reported as [`SerError::TrailingBytes`], set bits
    /// in the final partial byte as [`SerError::IllegalPadding`].
    pub fn finish(mut self, kind: SerKind) -> SerResult<()> {
        let remaining = self.remaining();
        if remaining >= 8 {
            return Err(SerError::trailing_bytes(kind, self.position, remaining));
        }
        let position = self.position;
        while self.remaining() > 0 {
            if self.read_bit(kind, "padding")? {
                return Err(SerError::illegal_padding(kind, position));
            }
        }
        Ok(())
    }
}

impl<'a> From<&'a [u8]> for BitReader<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        BitReader::new(bytes)
    }
}

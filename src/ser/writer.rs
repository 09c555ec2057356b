use core::fmt;

/// Growable bitstring packed most-significant bit first.
///
/// Bits past `len` in the final byte are always zero, so [`BitString::as_bytes`]
/// is directly usable as padded output.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct BitString {
    bytes: Vec<u8>,
    len: usize,
}

impl BitString {
    /// Creates an empty bitstring.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a bitstring from individual bits.
    pub fn from_bits<I: IntoIterator<Item = bool>>(bits: I) -> Self {
        let mut out = Self::new();
        for bit in bits {
            out.push(bit);
        }
        out
    }

    /// Number of bits stored.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` when no bits are stored.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Appends one bit.
    pub fn push(&mut self, bit: bool) {
        if self.len % 8 == 0 {
            self.bytes.push(0);
        }
        if bit {
            let last = self.bytes.len() - 1;
            self.bytes[last] |= 0x80 >> (self.len % 8);
        }
        self.len += 1;
    }

    /// Returns the bit at `index`, if present.
    pub fn get(&self, index: usize) -> Option<bool> {
        if index >= self.len {
            return None;
        }
        Some((self.bytes[index / 8] >> (7 - index % 8)) & 1 == 1)
    }

    /// Iterates over the stored bits in order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(move |index| (self.bytes[index / 8] >> (7 - index % 8)) & 1 == 1)
    }

    /// Packed bytes, zero padded to a byte boundary.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consumes the bitstring and returns the padded bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl fmt::Debug for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitString(")?;
        for bit in self.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        write!(f, ")")
    }
}

/// Append-only writer producing a zero-padded bitstream.
#[derive(Debug, Clone, Default)]
pub struct BitWriter {
    bits: BitString,
}

impl BitWriter {
    /// Creates an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bits written so far.
    pub fn bit_len(&self) -> usize {
        self.bits.len()
    }

    /// Writes a single bit.
    pub fn write_bit(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    /// Writes the low `count` bits of `value`, most significant first.
    pub fn write_bits(&mut self, value: u64, count: usize) {
        debug_assert!(count <= 64);
        for shift in (0..count).rev() {
            self.bits.push((value >> shift) & 1 == 1);
        }
    }

    /// Writes whole bytes at the current (possibly unaligned) position.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.write_bits(u64::from(byte), 8);
        }
    }

    /// Appends every bit of `bits`.
    pub fn write_bit_string(&mut self, bits: &BitString) {
        for bit in bits.iter() {
            self.bits.push(bit);
        }
    }

    /// Returns the written bits without padding information loss.
    pub fn into_bit_string(self) -> BitString {
        self.bits
    }

    /// Finishes the stream, padding the final byte with zeros.
    pub fn finish(self) -> Vec<u8> {
        self.bits.into_bytes()
    }
}

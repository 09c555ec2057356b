use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Error surfaced when parsing a digest from hexadecimal text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DigestParseError {
    /// The text was not valid hexadecimal.
    #[error("digest is not valid hexadecimal")]
    InvalidHex,
    /// The decoded byte string had the wrong length.
    #[error("digest must be 32 bytes, got {got}")]
    InvalidLength {
        /// Number of decoded bytes.
        got: usize,
    },
}

/// 256-bit digest stored as eight 32-bit words.
///
/// The words are the SHA-256 chaining values, so the canonical byte form is the
/// big-endian serialization of each word in order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Digest256 {
    words: [u32; 8],
}

impl Digest256 {
    /// The all-zero digest, used as the left half of single-child blocks.
    pub const ZERO: Digest256 = Digest256 { words: [0; 8] };

    /// Constructs a digest from its eight words.
    pub const fn from_words(words: [u32; 8]) -> Self {
        Self { words }
    }

    /// Returns the eight words of the digest.
    pub const fn words(&self) -> &[u32; 8] {
        &self.words
    }

    /// Constructs a digest from its canonical big-endian byte form.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        let mut words = [0u32; 8];
        for (word, chunk) in words.iter_mut().zip(bytes.chunks_exact(4)) {
            *word = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        Self { words }
    }

    /// Returns the canonical big-endian byte form.
    pub fn to_bytes(&self) -> [u8; 32] {
        let mut bytes = [0u8; 32];
        for (chunk, word) in bytes.chunks_exact_mut(4).zip(self.words.iter()) {
            chunk.copy_from_slice(&word.to_be_bytes());
        }
        bytes
    }

    /// Returns the lowercase hexadecimal encoding of the byte form.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }
}

impl From<[u8; 32]> for Digest256 {
    fn from(bytes: [u8; 32]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<Digest256> for [u8; 32] {
    fn from(digest: Digest256) -> Self {
        digest.to_bytes()
    }
}

impl fmt::Display for Digest256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for word in &self.words {
            write!(f, "{:08x}", word)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Digest256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest256(0x{})", self)
    }
}

impl FromStr for Digest256 {
    type Err = DigestParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s).map_err(|_| DigestParseError::InvalidHex)?;
        let array: [u8; 32] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| DigestParseError::InvalidLength { got: bytes.len() })?;
        Ok(Self::from_bytes(array))
    }
}

impl Serialize for Digest256 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Digest256 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

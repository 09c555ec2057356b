use sha2::digest::generic_array::typenum::U64;
use sha2::digest::generic_array::GenericArray;
use sha2::{Digest as _, Sha256};

use super::digest::Digest256;
use crate::ser::BitString;

/// SHA-256 initial chaining value (FIPS 180-4, section 5.3.3).
const SHA256_IV: [u32; 8] = [
    0x6a09_e667,
    0xbb67_ae85,
    0x3c6e_f372,
    0xa54f_f53a,
    0x510e_527f,
    0x9b05_688c,
    0x1f83_d9ab,
    0x5be0_cd19,
];

/// Raw SHA-256 chaining state driven one 64-byte block at a time.
///
/// Merkle roots never finalize with length padding: every step compresses a
/// block made of two 256-bit halves into the running state, and the state
/// itself is the resulting digest.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Midstate {
    state: [u32; 8],
}

impl Midstate {
    /// The standard SHA-256 initial value.
    pub const fn initial() -> Self {
        Self { state: SHA256_IV }
    }

    /// Tagged initial value: the state after compressing
    /// `SHA256(tag) || SHA256(tag)`.
    pub fn tagged(tag: &[u8]) -> Self {
        let tag_hash = Sha256::digest(tag);
        let mut block = [0u8; 64];
        block[..32].copy_from_slice(&tag_hash);
        block[32..].copy_from_slice(&tag_hash);
        let mut midstate = Self::initial();
        midstate.compress_block(&block);
        midstate
    }

    /// Resumes hashing from an existing digest.
    pub const fn from_digest(digest: Digest256) -> Self {
        Self {
            state: *digest.words(),
        }
    }

    fn compress_block(&mut self, block: &[u8]) {
        let block = GenericArray::<u8, U64>::clone_from_slice(block);
        sha2::compress256(&mut self.state, &[block]);
    }

    /// Compresses the block `left || right` into the state.
    pub fn update(mut self, left: Digest256, right: Digest256) -> Self {
        let mut block = [0u8; 64];
        block[..32].copy_from_slice(&left.to_bytes());
        block[32..].copy_from_slice(&right.to_bytes());
        self.compress_block(&block);
        self
    }

    /// Compresses the block `0^256 || right` into the state.
    pub fn update_1(self, right: Digest256) -> Self {
        self.update(Digest256::ZERO, right)
    }

    /// Returns the current state as a digest.
    pub const fn finish(self) -> Digest256 {
        Digest256::from_words(self.state)
    }
}

/// Standard SHA-256 of a bitstring whose length need not be a multiple of 8.
pub fn sha256_bits(bits: &BitString) -> Digest256 {
    let len = bits.len();
    let mut message = bits.as_bytes().to_vec();
    if len % 8 == 0 {
        message.push(0x80);
    } else if let Some(last) = message.last_mut() {
        *last |= 0x80 >> (len % 8);
    }
    while message.len() % 64 != 56 {
        message.push(0);
    }
    message.extend_from_slice(&(len as u64).to_be_bytes());

    let mut midstate = Midstate::initial();
    for block in message.chunks_exact(64) {
        midstate.compress_block(block);
    }
    midstate.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_aligned_bits_match_sha256() {
        let bits = BitString::from_bits([false, true, true, false, false, false, false, true]);
        let expected: [u8; 32] = Sha256::digest(b"a").into();
        assert_eq!(sha256_bits(&bits).to_bytes(), expected);

        let empty: [u8; 32] = Sha256::digest(b"").into();
        assert_eq!(sha256_bits(&BitString::new()).to_bytes(), empty);
    }

    #[test]
    fn partial_byte_hash() {
        let bits = BitString::from_bits([true, true, true]);
        assert_eq!(
            sha256_bits(&bits).to_string(),
            "8287ea50445e9ddd80b791cf413e74d152a577b8441b93fa29d88edc830f4400"
        );
    }

    #[test]
    fn tagged_iv_is_stable() {
        let iv = Midstate::tagged(b"Simplicity-Draft\x1fCommitment\x1fcomp").finish();
        assert_eq!(
            iv.to_string(),
            "259190d1c4690c864974c5ca257521337c94edf5eeb490ae568944bd8509e058"
        );
    }
}

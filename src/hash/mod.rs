//! Hashing primitives shared by every Merkle root.
//!
//! All roots are built from the raw SHA-256 compression function rather than
//! the padded hash: a node's root is the chaining state obtained by starting
//! from a tagged initial value and compressing one or more 64-byte blocks,
//! each consisting of two 256-bit halves.
//!
//! * [`Digest256`] stores a root as eight 32-bit words with a big-endian byte
//!   form and hex rendering.
//! * [`Midstate`] drives the compression function.
//! * [`sha256_bits`] hashes bitstrings of arbitrary length, which is how
//!   witness values enter the identity and annotated roots.

mod digest;
mod sha256;

pub use digest::{Digest256, DigestParseError};
pub use sha256::{sha256_bits, Midstate};

/// Prefix shared by every tag used for domain separation.
pub const TAG_PREFIX: &str = "Simplicity-Draft\x1f";

/// Builds the tagged initial value for `domain` and `name`.
///
/// The tag is `TAG_PREFIX ‖ domain ‖ 0x1f ‖ name`.
pub fn tagged_iv(domain: &str, name: &str) -> Midstate {
    let tag = format!("{TAG_PREFIX}{domain}\x1f{name}");
    Midstate::tagged(tag.as_bytes())
}

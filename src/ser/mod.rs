//! Bit-level serialization helpers.
//!
//! Simplicity programs and witnesses are bitstreams rather than byte streams:
//! every field is read most-significant bit first and the stream is padded
//! with zero bits up to the next byte boundary. The helpers in this module
//! provide the shared vocabulary for both directions:
//!
//! * [`BitReader`] hands out bits, fixed-width integers and unaligned byte
//!   arrays, and validates the final padding.
//! * [`BitWriter`] and [`BitString`] accumulate bits and emit the padded form.
//! * [`read_natural`] / [`write_natural`] implement the self-delimiting code for
//!   positive integers used for node counts and child offsets.

mod cursor;
mod error;
mod natural;
mod writer;

pub use cursor::BitReader;
pub use error::{SerError, SerKind, SerResult};
pub use natural::{natural_bit_len, read_natural, write_natural, MAX_NATURAL};
pub use writer::{BitString, BitWriter};

//! Program and witness bitstream codecs.
//!
//! Program bytes carry the expression DAG; witness bytes carry the compact
//! values of the witness nodes and can only be decoded once the program has
//! been typed. Both streams share the bit-level primitives in [`crate::ser`].

mod error;
mod program;
mod witness;

pub use error::{DecodeError, DecodeResult};
pub use program::{decode_program, decode_program_with_limits, encode_program};
pub use witness::{
    decode_witness, decode_witness_with_limits, encode_witness, WitnessAssignment,
};

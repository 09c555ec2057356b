//! Canonical codec, type inference and Merkle roots for Simplicity
//! combinator expressions.
//!
//! A program travels as two bitstreams: the expression itself and the
//! values of its witness nodes. [`Program::decode`] runs the whole pipeline
//! (decode, infer types, decode witnesses, check sharing, compute roots and
//! cost); the modules below expose each stage on its own.
//!
//! ```
//! use simplicity_codec::{vectors::type_skip, Program};
//!
//! let program = Program::decode(&type_skip::PROGRAM, &type_skip::WITNESS).unwrap();
//! assert_eq!(program.cmr(), type_skip::CMR);
//! assert_eq!(program.cost().milli_weight(), type_skip::COST);
//! ```

pub mod analysis;
pub mod codec;
pub mod config;
pub mod hash;
pub mod merkle;
pub mod node;
pub mod program;
pub mod ser;
pub mod types;
pub mod value;
pub mod vectors;

pub use analysis::{Cost, NodeBounds};
pub use codec::{
    decode_program, decode_witness, encode_program, encode_witness, DecodeError, DecodeResult,
    WitnessAssignment,
};
pub use config::{ConfigError, DecodeLimits};
pub use hash::Digest256;
pub use merkle::Roots;
pub use node::{Combinator, Expression, ExpressionBuilder, NodeId};
pub use program::{Program, ProgramReport};
pub use types::{Arrow, Type, TypeError};
pub use value::Value;

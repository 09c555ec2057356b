//! Merkle roots of expressions.
//!
//! Three roots are computed over the same DAG, each by a single forward
//! pass over the canonical node order:
//!
//! * the **commitment root** (CMR) hashes structure only;
//! * the **identity root** (IMR) additionally commits to witness values and
//!   binds each node to its inferred arrow;
//! * the **annotated root** (AMR) folds in the type annotations of every
//!   combinator.
//!
//! Each node starts from a tagged initial value named after its combinator,
//! so nodes with different combinators never collide even when their
//! children do. Sharing is structural: a node referenced twice is hashed
//! once.

mod amr;
mod cmr;
mod imr;
mod tags;

use serde::{Deserialize, Serialize};

pub use amr::{annotated_root, annotated_roots};
pub use cmr::{commitment_root, commitment_roots};
pub use imr::{identity_root, identity_roots};

use crate::codec::{DecodeResult, WitnessAssignment};
use crate::hash::Digest256;
use crate::node::Expression;

/// The three roots of an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Roots {
    /// Commitment root.
    pub cmr: Digest256,
    /// Identity root.
    pub imr: Digest256,
    /// Annotated root.
    pub amr: Digest256,
}

impl Roots {
    /// Computes all three roots of `expr` with the given witness values.
    pub fn compute(expr: &Expression, witness: &WitnessAssignment) -> DecodeResult<Self> {
        Ok(Self {
            cmr: commitment_root(expr),
            imr: identity_root(expr, witness)?,
            amr: annotated_root(expr, witness)?,
        })
    }
}

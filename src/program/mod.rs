//! Full program pipeline.
//!
//! [`Program`] ties the pieces together: decode the program bitstream, infer
//! types, decode the witness against the inferred witness types, reject
//! duplicated subexpressions, compute the three roots and the static bounds,
//! and enforce the configured cost budget.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::{node_bounds, Cost, NodeBounds};
use crate::codec::{
    decode_program_with_limits, decode_witness_with_limits, encode_program, encode_witness,
    DecodeError, DecodeResult, WitnessAssignment,
};
use crate::config::DecodeLimits;
use crate::hash::Digest256;
use crate::merkle::{annotated_root, commitment_root, identity_roots, Roots};
use crate::node::{Combinator, Expression};
use crate::ser::SerResult;

/// A decoded, typed and analysed program together with its witness values.
#[derive(Clone, Debug)]
pub struct Program {
    expr: Expression,
    witness: WitnessAssignment,
    roots: Roots,
    bounds: NodeBounds,
}

impl Program {
    /// Decodes program and witness bytes with [`DecodeLimits::default`].
    pub fn decode(program: &[u8], witness: &[u8]) -> DecodeResult<Self> {
        Self::decode_with_limits(program, witness, &DecodeLimits::default())
    }

    /// Decodes program and witness bytes under `limits`.
    pub fn decode_with_limits(
        program: &[u8],
        witness: &[u8],
        limits: &DecodeLimits,
    ) -> DecodeResult<Self> {
        let expr = decode_program_with_limits(program, limits)?;
        let witness = decode_witness_with_limits(witness, &expr, limits)?;
        Self::with_limits(expr, witness, limits)
    }

    /// Analyses an in-memory expression with [`DecodeLimits::default`].
    pub fn new(expr: Expression, witness: WitnessAssignment) -> DecodeResult<Self> {
        Self::with_limits(expr, witness, &DecodeLimits::default())
    }

    /// Analyses an in-memory expression under `limits`.
    ///
    /// Fails with [`DecodeError::SharingNotMaximal`] when two nodes have the
    /// same identity root or two hidden nodes carry the same root, and with
    /// [`DecodeError::CostExceeded`] when the cost is over budget. Limits
    /// that fail [`DecodeLimits::validate`] are rejected up front.
    pub fn with_limits(
        expr: Expression,
        witness: WitnessAssignment,
        limits: &DecodeLimits,
    ) -> DecodeResult<Self> {
        limits.validate()?;
        let identity = identity_roots(&expr, &witness)?;
        check_maximal_sharing(&expr, &identity)?;

        let bounds = node_bounds(&expr)?
            .last()
            .copied()
            .unwrap_or_default();
        if let Some(budget) = limits.cost_budget {
            if bounds.cost.milli_weight() > budget {
                return Err(DecodeError::CostExceeded {
                    cost: bounds.cost.milli_weight(),
                    budget,
                });
            }
        }

        let imr = identity
            .last()
            .copied()
            .ok_or(DecodeError::EmptyProgram)?;
        let roots = Roots {
            cmr: commitment_root(&expr),
            imr,
            amr: annotated_root(&expr, &witness)?,
        };
        debug!(
            nodes = expr.len(),
            cmr = %roots.cmr,
            cost = bounds.cost.milli_weight(),
            "program analysed"
        );
        Ok(Self {
            expr,
            witness,
            roots,
            bounds,
        })
    }

    /// The typed expression.
    pub fn expression(&self) -> &Expression {
        &self.expr
    }

    /// The witness values.
    pub fn witness(&self) -> &WitnessAssignment {
        &self.witness
    }

    /// All three roots.
    pub fn roots(&self) -> &Roots {
        &self.roots
    }

    /// Commitment root.
    pub fn cmr(&self) -> Digest256 {
        self.roots.cmr
    }

    /// Identity root.
    pub fn imr(&self) -> Digest256 {
        self.roots.imr
    }

    /// Annotated root.
    pub fn amr(&self) -> Digest256 {
        self.roots.amr
    }

    /// Execution cost.
    pub fn cost(&self) -> Cost {
        self.bounds.cost
    }

    /// Cost together with the cell and frame bounds.
    pub fn bounds(&self) -> &NodeBounds {
        &self.bounds
    }

    /// Re-encodes the program and witness bitstreams.
    pub fn encode(&self) -> SerResult<(Vec<u8>, Vec<u8>)> {
        Ok((encode_program(&self.expr)?, encode_witness(&self.witness)))
    }

    /// Summary suitable for logging or JSON output.
    pub fn report(&self) -> ProgramReport {
        ProgramReport {
            cmr: self.roots.cmr,
            imr: self.roots.imr,
            amr: self.roots.amr,
            cost: self.bounds.cost,
            weight: self.bounds.cost.weight(),
            extra_cells: self.bounds.extra_cells,
            extra_frames: self.bounds.extra_frames,
            nodes: self.expr.len(),
            witness_nodes: self.expr.witness_nodes().len(),
            witness_bits: self.witness.bit_len(),
        }
    }
}

fn check_maximal_sharing(expr: &Expression, identity: &[Digest256]) -> DecodeResult<()> {
    let mut seen: HashMap<Digest256, usize> = HashMap::with_capacity(expr.len());
    let mut hidden: HashMap<Digest256, usize> = HashMap::new();
    for ((id, node, _), root) in expr.iter().zip(identity) {
        let table = match node {
            Combinator::Hidden(_) => &mut hidden,
            _ => &mut seen,
        };
        if let Some(&first) = table.get(root) {
            return Err(DecodeError::SharingNotMaximal {
                first,
                second: id.index(),
            });
        }
        table.insert(*root, id.index());
    }
    Ok(())
}

/// Serializable summary of an analysed program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramReport {
    /// Commitment root.
    pub cmr: Digest256,
    /// Identity root.
    pub imr: Digest256,
    /// Annotated root.
    pub amr: Digest256,
    /// Cost in milli weight units.
    pub cost: Cost,
    /// Cost in weight units, rounded up.
    pub weight: u32,
    /// Extra cells needed beyond input and output.
    pub extra_cells: u64,
    /// Extra frames needed beyond input and output.
    pub extra_frames: u64,
    /// Number of nodes.
    pub nodes: usize,
    /// Number of witness nodes.
    pub witness_nodes: usize,
    /// Total witness value bits.
    pub witness_bits: usize,
}

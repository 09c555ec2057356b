use super::tags::{COMMITMENT, IDENTITY_DISCONNECT, IDENTITY_ROOT, IDENTITY_WITNESS};
use crate::codec::{DecodeError, DecodeResult, WitnessAssignment};
use crate::hash::{sha256_bits, Digest256};
use crate::node::{Combinator, Expression, NodeTag};
use crate::types::Arrow;

/// Identity root of every node, in node order.
///
/// Hidden nodes report the commitment root they carry.
pub fn identity_roots(
    expr: &Expression,
    witness: &WitnessAssignment,
) -> DecodeResult<Vec<Digest256>> {
    witness.check_count(expr)?;
    let first_pass = first_pass(expr, witness)?;
    let mut roots = Vec::with_capacity(expr.len());
    for ((id, node, _), &fingerprint) in expr.iter().zip(&first_pass) {
        let root = match node {
            Combinator::Hidden(payload) => *payload,
            _ => bind_arrow(fingerprint, expr.typed_arrow(id)?),
        };
        roots.push(root);
    }
    Ok(roots)
}

/// Identity root of the expression.
pub fn identity_root(expr: &Expression, witness: &WitnessAssignment) -> DecodeResult<Digest256> {
    witness.check_count(expr)?;
    let first_pass = first_pass(expr, witness)?;
    let root = expr.root();
    let arrow = expr.typed_arrow(root)?;
    Ok(bind_arrow(first_pass[root.index()], arrow))
}

fn bind_arrow(fingerprint: Digest256, arrow: &Arrow) -> Digest256 {
    IDENTITY_ROOT
        .update_1(fingerprint)
        .update(arrow.source.tmr(), arrow.target.tmr())
        .finish()
}

/// Structure-and-witness pass shared by every node: commitment hashing,
/// except that witness nodes commit to their value and output type and
/// disconnect commits to both children.
fn first_pass(expr: &Expression, witness: &WitnessAssignment) -> DecodeResult<Vec<Digest256>> {
    let mut values = witness.iter();
    let mut passes: Vec<Digest256> = Vec::with_capacity(expr.len());
    for (id, node, _) in expr.iter() {
        let pass = match *node {
            Combinator::Hidden(payload) => payload,
            Combinator::Witness => {
                let bits = values.next().ok_or(DecodeError::WitnessCountMismatch {
                    expected: expr.witness_nodes().len(),
                    got: witness.len(),
                })?;
                let arrow = expr.typed_arrow(id)?;
                IDENTITY_WITNESS
                    .update(sha256_bits(bits), arrow.target.tmr())
                    .finish()
            }
            Combinator::Disconnect(left, right) => IDENTITY_DISCONNECT
                .update(passes[left.index()], passes[right.index()])
                .finish(),
            Combinator::Iden | Combinator::Unit => COMMITMENT.get(node.tag()).finish(),
            Combinator::InjL(child)
            | Combinator::InjR(child)
            | Combinator::Take(child)
            | Combinator::Drop(child) => COMMITMENT
                .get(node.tag())
                .update_1(passes[child.index()])
                .finish(),
            Combinator::AssertL(left, right) | Combinator::AssertR(left, right) => COMMITMENT
                .get(NodeTag::Case)
                .update(passes[left.index()], passes[right.index()])
                .finish(),
            Combinator::Comp(left, right)
            | Combinator::Case(left, right)
            | Combinator::Pair(left, right) => COMMITMENT
                .get(node.tag())
                .update(passes[left.index()], passes[right.index()])
                .finish(),
        };
        passes.push(pass);
    }
    Ok(passes)
}

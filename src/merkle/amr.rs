use super::tags::ANNOTATED;
use crate::codec::{DecodeError, DecodeResult, WitnessAssignment};
use crate::hash::{sha256_bits, Digest256, Midstate};
use crate::node::{Combinator, Expression};
use crate::types::{Type, TypeError, TypeShape};

fn sum_of(ty: &Type, node: usize) -> DecodeResult<(&Type, &Type)> {
    ty.as_sum().ok_or(DecodeError::TypeMismatch(TypeError::Unify {
        node,
        left: ty.shape(),
        right: TypeShape::Sum,
    }))
}

fn product_of(ty: &Type, node: usize) -> DecodeResult<(&Type, &Type)> {
    ty.as_product().ok_or(DecodeError::TypeMismatch(TypeError::Unify {
        node,
        left: ty.shape(),
        right: TypeShape::Product,
    }))
}

/// Annotated root of every node, in node order.
///
/// Every node commits to the type annotations of its combinator in addition
/// to its children; witness nodes also commit to their value. Hidden nodes
/// report the commitment root they carry.
pub fn annotated_roots(
    expr: &Expression,
    witness: &WitnessAssignment,
) -> DecodeResult<Vec<Digest256>> {
    witness.check_count(expr)?;
    let mut values = witness.iter();
    let mut roots: Vec<Digest256> = Vec::with_capacity(expr.len());
    for (id, node, arrow) in expr.iter() {
        let index = id.index();
        let arrow = match (node, arrow) {
            (Combinator::Hidden(payload), _) => {
                roots.push(*payload);
                continue;
            }
            (_, Some(arrow)) => arrow,
            (_, None) => return Err(DecodeError::Untyped { index }),
        };
        let (a, b) = (&arrow.source, &arrow.target);
        let iv = ANNOTATED.get(node.tag());
        let root = match *node {
            Combinator::Iden | Combinator::Unit => iv.update_1(a.tmr()),
            Combinator::InjL(child) | Combinator::InjR(child) => {
                let (left, right) = sum_of(b, index)?;
                iv.update(a.tmr(), left.tmr())
                    .update(right.tmr(), roots[child.index()])
            }
            Combinator::Take(child) | Combinator::Drop(child) => {
                let (first, second) = product_of(a, index)?;
                iv.update(first.tmr(), second.tmr())
                    .update(b.tmr(), roots[child.index()])
            }
            Combinator::Comp(left, right) => {
                let middle = &expr.typed_arrow(left)?.target;
                iv.update_1(a.tmr())
                    .update(middle.tmr(), b.tmr())
                    .update(roots[left.index()], roots[right.index()])
            }
            Combinator::Pair(left, right) => {
                let (first, second) = product_of(b, index)?;
                iv.update_1(a.tmr())
                    .update(first.tmr(), second.tmr())
                    .update(roots[left.index()], roots[right.index()])
            }
            Combinator::Case(left, right)
            | Combinator::AssertL(left, right)
            | Combinator::AssertR(left, right) => {
                let (tagged, context) = product_of(a, index)?;
                let (left_branch, right_branch) = sum_of(tagged, index)?;
                iv.update(left_branch.tmr(), right_branch.tmr())
                    .update(context.tmr(), b.tmr())
                    .update(roots[left.index()], roots[right.index()])
            }
            Combinator::Disconnect(left, right) => {
                let (first, _) = product_of(&expr.typed_arrow(left)?.target, index)?;
                let right_arrow = expr.typed_arrow(right)?;
                iv.update(a.tmr(), first.tmr())
                    .update(right_arrow.source.tmr(), right_arrow.target.tmr())
                    .update(roots[left.index()], roots[right.index()])
            }
            Combinator::Witness => {
                let bits = values.next().ok_or(DecodeError::WitnessCountMismatch {
                    expected: expr.witness_nodes().len(),
                    got: witness.len(),
                })?;
                iv.update_1(a.tmr()).update(b.tmr(), sha256_bits(bits))
            }
            Combinator::Hidden(payload) => Midstate::from_digest(payload),
        };
        roots.push(root.finish());
    }
    Ok(roots)
}

/// Annotated root of the expression.
pub fn annotated_root(expr: &Expression, witness: &WitnessAssignment) -> DecodeResult<Digest256> {
    let roots = annotated_roots(expr, witness)?;
    roots
        .last()
        .copied()
        .ok_or(DecodeError::EmptyProgram)
}

use super::tags::COMMITMENT;
use crate::hash::Digest256;
use crate::node::{Combinator, Expression, NodeTag};

/// Commitment root of every node, in node order.
///
/// The commitment root depends on structure only: types and witness values
/// never enter it, and a hidden node contributes the root it carries.
pub fn commitment_roots(expr: &Expression) -> Vec<Digest256> {
    let mut roots: Vec<Digest256> = Vec::with_capacity(expr.len());
    for node in expr.nodes() {
        let root = match *node {
            Combinator::Hidden(payload) => payload,
            Combinator::Iden | Combinator::Unit | Combinator::Witness => {
                COMMITMENT.get(node.tag()).finish()
            }
            Combinator::InjL(child)
            | Combinator::InjR(child)
            | Combinator::Take(child)
            | Combinator::Drop(child)
            | Combinator::Disconnect(child, _) => COMMITMENT
                .get(node.tag())
                .update_1(roots[child.index()])
                .finish(),
            Combinator::AssertL(left, right) | Combinator::AssertR(left, right) => COMMITMENT
                .get(NodeTag::Case)
                .update(roots[left.index()], roots[right.index()])
                .finish(),
            Combinator::Comp(left, right)
            | Combinator::Case(left, right)
            | Combinator::Pair(left, right) => COMMITMENT
                .get(node.tag())
                .update(roots[left.index()], roots[right.index()])
                .finish(),
        };
        roots.push(root);
    }
    roots
}

/// Commitment root of the expression.
pub fn commitment_root(expr: &Expression) -> Digest256 {
    commitment_roots(expr)
        .last()
        .copied()
        .unwrap_or(Digest256::ZERO)
}

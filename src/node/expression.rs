use tracing::debug;

use super::kind::{Combinator, NodeId};
use crate::codec::{DecodeError, DecodeResult};
use crate::types::{infer_arrows, Arrow};

/// A validated, fully typed expression DAG.
///
/// Invariants established by [`Expression::from_nodes`]:
///
/// * at least one node, children strictly precede their parents;
/// * hidden nodes only appear as exactly one branch of a case, which is then
///   stored as [`Combinator::AssertL`] or [`Combinator::AssertR`];
/// * node order is the canonical post-order from the root (last node);
/// * every non-hidden node has an inferred [`Arrow`] and the root is `1 ⊢ 1`.
#[derive(Clone, Debug)]
pub struct Expression {
    nodes: Vec<Combinator>,
    arrows: Vec<Option<Arrow>>,
    witness_nodes: Vec<NodeId>,
}

impl Expression {
    /// Validates and types a list of nodes.
    ///
    /// A `Case` with one hidden branch is normalized to the matching
    /// assertion.
    pub fn from_nodes(mut nodes: Vec<Combinator>) -> DecodeResult<Self> {
        if nodes.is_empty() {
            return Err(DecodeError::EmptyProgram);
        }
        for index in 0..nodes.len() {
            let node = nodes[index];
            for child in node.children() {
                if child.index() >= index {
                    return Err(DecodeError::ForwardReference {
                        index,
                        child: child.index(),
                    });
                }
            }
            let normalized = normalize(&nodes, index)?;
            nodes[index] = normalized;
        }
        if nodes.last().map_or(false, Combinator::is_hidden) {
            return Err(DecodeError::HiddenRoot);
        }
        check_canonical_order(&nodes)?;

        let arrows = infer_arrows(&nodes)?;
        let witness_nodes = nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| matches!(node, Combinator::Witness))
            .map(|(index, _)| NodeId::new(index))
            .collect::<Vec<_>>();
        debug!(
            nodes = nodes.len(),
            witnesses = witness_nodes.len(),
            "expression validated"
        );
        Ok(Self {
            nodes,
            arrows,
            witness_nodes,
        })
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`; expressions have at least one node.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The root node, which is always the last one.
    pub fn root(&self) -> NodeId {
        NodeId::new(self.nodes.len() - 1)
    }

    /// All nodes in canonical order.
    pub fn nodes(&self) -> &[Combinator] {
        &self.nodes
    }

    /// Returns the node stored at `id`.
    pub fn node(&self, id: NodeId) -> Option<&Combinator> {
        self.nodes.get(id.index())
    }

    /// Returns the inferred arrow of `id`; `None` for hidden nodes.
    pub fn arrow(&self, id: NodeId) -> Option<&Arrow> {
        self.arrows.get(id.index()).and_then(Option::as_ref)
    }

    /// Like [`Expression::arrow`], but reports hidden or unknown nodes as
    /// [`DecodeError::Untyped`].
    pub fn typed_arrow(&self, id: NodeId) -> DecodeResult<&Arrow> {
        self.arrow(id)
            .ok_or(DecodeError::Untyped { index: id.index() })
    }

    /// Witness nodes in node order.
    pub fn witness_nodes(&self) -> &[NodeId] {
        &self.witness_nodes
    }

    /// Iterates over `(id, node, arrow)` triples in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Combinator, Option<&Arrow>)> + '_ {
        self.nodes
            .iter()
            .zip(&self.arrows)
            .enumerate()
            .map(|(index, (node, arrow))| (NodeId::new(index), node, arrow.as_ref()))
    }
}

fn normalize(nodes: &[Combinator], index: usize) -> DecodeResult<Combinator> {
    let node = nodes[index];
    let hidden = |id: NodeId| nodes[id.index()].is_hidden();
    let normalized = match node {
        Combinator::Case(left, right)
        | Combinator::AssertL(left, right)
        | Combinator::AssertR(left, right) => match (hidden(left), hidden(right)) {
            (false, false) if matches!(node, Combinator::Case(..)) => node,
            (false, true) if !matches!(node, Combinator::AssertR(..)) => {
                Combinator::AssertL(left, right)
            }
            (true, false) if !matches!(node, Combinator::AssertL(..)) => {
                Combinator::AssertR(left, right)
            }
            _ => return Err(DecodeError::HiddenChild { index }),
        },
        _ => {
            if node.children().any(hidden) {
                return Err(DecodeError::HiddenChild { index });
            }
            node
        }
    };
    Ok(normalized)
}

fn check_canonical_order(nodes: &[Combinator]) -> DecodeResult<()> {
    let root = nodes.len() - 1;
    let mut visited = vec![false; nodes.len()];
    let mut emitted = 0usize;
    let mut stack = vec![(root, false)];
    while let Some((index, expanded)) = stack.pop() {
        if expanded {
            if index != emitted {
                return Err(DecodeError::NotInCanonicalOrder { index: emitted });
            }
            emitted += 1;
            continue;
        }
        if visited[index] {
            continue;
        }
        visited[index] = true;
        stack.push((index, true));
        let children = nodes[index].children().collect::<Vec<_>>();
        for child in children.into_iter().rev() {
            if !visited[child.index()] {
                stack.push((child.index(), false));
            }
        }
    }
    if emitted != nodes.len() {
        return Err(DecodeError::NotInCanonicalOrder { index: emitted });
    }
    Ok(())
}

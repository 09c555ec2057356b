use super::expression::Expression;
use super::kind::{Combinator, NodeId};
use crate::codec::{DecodeError, DecodeResult};
use crate::hash::Digest256;

/// In-memory constructor for expressions.
///
/// Each method appends a node and returns its [`NodeId`]; reusing an id
/// shares the node. No hash-consing is performed, so building the same
/// subexpression twice yields two nodes (which [`crate::Program`] later
/// rejects as non-maximal sharing).
///
/// ```
/// use simplicity_codec::node::ExpressionBuilder;
///
/// let mut builder = ExpressionBuilder::new();
/// let witness = builder.witness();
/// let unit = builder.unit();
/// let root = builder.comp(witness, unit);
/// let expr = builder.finish(root).unwrap();
/// assert_eq!(expr.len(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExpressionBuilder {
    nodes: Vec<Combinator>,
}

impl ExpressionBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes added so far.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` when no node has been added.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Appends an arbitrary node.
    pub fn push(&mut self, node: Combinator) -> NodeId {
        self.nodes.push(node);
        NodeId::new(self.nodes.len() - 1)
    }

    /// Appends `iden`.
    pub fn iden(&mut self) -> NodeId {
        self.push(Combinator::Iden)
    }

    /// Appends `unit`.
    pub fn unit(&mut self) -> NodeId {
        self.push(Combinator::Unit)
    }

    /// Appends `injl child`.
    pub fn injl(&mut self, child: NodeId) -> NodeId {
        self.push(Combinator::InjL(child))
    }

    /// Appends `injr child`.
    pub fn injr(&mut self, child: NodeId) -> NodeId {
        self.push(Combinator::InjR(child))
    }

    /// Appends `take child`.
    pub fn take(&mut self, child: NodeId) -> NodeId {
        self.push(Combinator::Take(child))
    }

    /// Appends `drop child`.
    pub fn drop(&mut self, child: NodeId) -> NodeId {
        self.push(Combinator::Drop(child))
    }

    /// Appends `comp left right`.
    pub fn comp(&mut self, left: NodeId, right: NodeId) -> NodeId {
        self.push(Combinator::Comp(left, right))
    }

    /// Appends `case left right`.
    pub fn case(&mut self, left: NodeId, right: NodeId) -> NodeId {
        self.push(Combinator::Case(left, right))
    }

    /// Appends `pair left right`.
    pub fn pair(&mut self, left: NodeId, right: NodeId) -> NodeId {
        self.push(Combinator::Pair(left, right))
    }

    /// Appends `disconnect left right`.
    pub fn disconnect(&mut self, left: NodeId, right: NodeId) -> NodeId {
        self.push(Combinator::Disconnect(left, right))
    }

    /// Appends a witness node.
    pub fn witness(&mut self) -> NodeId {
        self.push(Combinator::Witness)
    }

    /// Appends a pruned branch with the given commitment root.
    pub fn hidden(&mut self, cmr: Digest256) -> NodeId {
        self.push(Combinator::Hidden(cmr))
    }

    /// Case whose right branch is pruned to `right_cmr`.
    pub fn assertl(&mut self, left: NodeId, right_cmr: Digest256) -> NodeId {
        let hidden = self.hidden(right_cmr);
        self.push(Combinator::AssertL(left, hidden))
    }

    /// Case whose left branch is pruned to `left_cmr`.
    pub fn assertr(&mut self, left_cmr: Digest256, right: NodeId) -> NodeId {
        let hidden = self.hidden(left_cmr);
        self.push(Combinator::AssertR(hidden, right))
    }

    /// Relinearizes the nodes reachable from `root` into canonical order and
    /// validates the result.
    ///
    /// Unreachable nodes are dropped.
    pub fn finish(self, root: NodeId) -> DecodeResult<Expression> {
        let count = self.nodes.len();
        if root.index() >= count {
            return Err(DecodeError::ForwardReference {
                index: count,
                child: root.index(),
            });
        }

        let mut remap: Vec<Option<NodeId>> = vec![None; count];
        let mut ordered = Vec::new();
        let mut stack = vec![(root, false)];
        while let Some((id, expanded)) = stack.pop() {
            let index = id.index();
            let node = self.nodes[index];
            if expanded {
                if remap[index].is_some() {
                    continue;
                }
                let relinked = node.map_children(|child| {
                    remap[child.index()].unwrap_or(child)
                });
                remap[index] = Some(NodeId::new(ordered.len()));
                ordered.push(relinked);
                continue;
            }
            if remap[index].is_some() {
                continue;
            }
            stack.push((id, true));
            let children = node.children().collect::<Vec<_>>();
            for child in children.into_iter().rev() {
                if child.index() >= index {
                    return Err(DecodeError::ForwardReference {
                        index,
                        child: child.index(),
                    });
                }
                stack.push((child, false));
            }
        }
        Expression::from_nodes(ordered)
    }
}
